//! Reads pipe and manhole tables.
//!
//! Tables are delimited text (usually CSV exported from a GIS or a
//! spreadsheet). We keep every cell of every row, so the tables can be
//! written back out filtered; only a few columns are validated into records:
//!
//! * pipes: "Start Node" and "Stop Node"
//! * manholes: "Label", "X (m)" and "Y (m)"
//!
//! Column names are configurable with `ColumnNames`.
//!
//! # Examples
//!
//! ```
//! use sewergrid::read::{self, Table};
//! use sewergrid::ColumnNames;
//!
//! let table = Table::parse("Start Node,Stop Node\nMH1,MH2\nMH2,\n", ',').unwrap();
//! let result = read::pipes(&table, &ColumnNames::default()).unwrap();
//!
//! assert_eq!(1, result.records.len());
//! assert_eq!(vec![ 1 ], result.rejected);
//! ```
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::options::TableOptions;

pub mod records;
pub mod table;

pub use self::records::{manholes, node_id, pipe_list, pipes, ManholeRecord, PipeRecord, Records};
pub use self::table::{decode, Row, Table};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    IOError(#[from] io::Error),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Parse error on line {line}: {description}")]
    ParseError { line: usize, description: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// Reads, decodes and parses a table file.
pub fn open(path: &Path, options: &TableOptions) -> Result<Table, ReadError> {
    let bytes = fs::read(path)?;
    let text = decode(&bytes, &options.encoding)?;
    let table = Table::parse(&text, options.delimiter)?;

    info!(path = %path.display(), n_rows = table.len(), n_columns = table.headers.len(), "read table");

    Ok(table)
}
