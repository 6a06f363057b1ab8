//! Writes tables back out, optionally filtered to the manholes we keep.
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use thiserror::Error;
use tracing::info;

use crate::read::{ManholeRecord, PipeRecord, Table};
use crate::simplify::Simplification;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error writing {}: {}", .path.display(), .source)]
    IOError { path: PathBuf, source: io::Error },
}

/// Returns `cell` quoted iff it contains the delimiter, a quote or a line
/// break.
fn quote(cell: &str, delimiter: char) -> String {
    if cell.contains(|c: char| c == delimiter || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn write_record<'a, W, T>(w: &mut W, cells: T, delimiter: char) -> io::Result<()>
    where W: Write, T: IntoIterator<Item=&'a String>
{
    let line = cells.into_iter().map(|c| quote(c, delimiter)).join(&delimiter.to_string());
    writeln!(w, "{}", line)
}

/// Writes the header and the given rows (by index, in the order given).
pub fn write_table<W: Write, I: IntoIterator<Item=usize>>(w: &mut W, table: &Table, rows: I) -> io::Result<()> {
    write_record(w, table.headers.iter(), table.delimiter)?;

    for index in rows {
        if let Some(row) = table.rows.get(index) {
            write_record(w, row.cells.iter(), table.delimiter)?;
        }
    }

    w.flush()
}

/// Row indexes of manholes we keep, in table order.
pub fn simplified_manholes(records: &[ManholeRecord], simplification: &Simplification) -> Vec<usize> {
    records.iter()
        .filter(|r| simplification.keeps_node(&r.label))
        .map(|r| r.row)
        .collect()
}

/// Row indexes of pipes whose both ends we keep, in table order.
pub fn simplified_pipes(records: &[PipeRecord], simplification: &Simplification) -> Vec<usize> {
    records.iter()
        .filter(|r| simplification.keeps_pipe(&r.pipe))
        .map(|r| r.row)
        .collect()
}

fn write_file<I: IntoIterator<Item=usize>>(path: PathBuf, table: &Table, rows: I) -> Result<PathBuf, WriteError> {
    let result = fs::File::create(&path).and_then(|f| {
        let mut w = io::BufWriter::new(f);
        write_table(&mut w, table, rows)
    });

    match result {
        Err(err) => Err(WriteError::IOError { path: path, source: err }),
        Ok(()) => {
            info!(path = %path.display(), "wrote table");
            Ok(path)
        }
    }
}

/// Files written by `write_outputs()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub original_pipes: PathBuf,
    pub simplified_manholes: PathBuf,
    pub simplified_pipes: PathBuf,
}

/// Writes `original_pipes.csv`, `simplified_manholes.csv` and
/// `simplified_pipes.csv` into `dir`.
///
/// Every file keeps all of its table's columns. The original pipe table is
/// written whole, including rows we couldn't read.
pub fn write_outputs(
    dir: &Path,
    pipe_table: &Table,
    pipe_records: &[PipeRecord],
    manhole_table: &Table,
    manhole_records: &[ManholeRecord],
    simplification: &Simplification,
) -> Result<OutputPaths, WriteError> {
    Ok(OutputPaths {
        original_pipes: write_file(
            dir.join("original_pipes.csv"),
            pipe_table,
            0 .. pipe_table.rows.len(),
        )?,
        simplified_manholes: write_file(
            dir.join("simplified_manholes.csv"),
            manhole_table,
            simplified_manholes(manhole_records, simplification),
        )?,
        simplified_pipes: write_file(
            dir.join("simplified_pipes.csv"),
            pipe_table,
            simplified_pipes(pipe_records, simplification),
        )?,
    })
}
