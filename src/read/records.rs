//! Validates table rows into pipe and manhole records.
//!
//! A row we can't use is skipped with a warning; the rest of the table is
//! still read.
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::network::{NodeId, Pipe};
use crate::options::ColumnNames;
use super::table::{Row, Table};
use super::ReadError;

lazy_static! {
    /// Cells spreadsheets and dataframes write for "no value".
    static ref NULL_CELL: Regex = Regex::new(
        r"^(?:|nan|NaN|NAN|-nan|-NaN|NULL|null|Null|None|none|N/A|n/a|NA|#N/A|<NA>)$"
    ).unwrap();

    /// An integer written as a float: "12.0", "-3.000".
    static ref INTEGRAL_FLOAT: Regex = Regex::new(r"^([+-]?\d+)\.0+$").unwrap();
}

/// Returns the NodeId a cell names, or `None` for a null cell.
///
/// Whitespace is trimmed. An integral float like `12.0` becomes `12`, so a
/// pipe table exported with float formatting still matches a manhole table
/// that wasn't.
pub fn node_id(cell: &str) -> Option<NodeId> {
    let cell = cell.trim();

    if NULL_CELL.is_match(cell) {
        return None;
    }

    match INTEGRAL_FLOAT.captures(cell) {
        Some(caps) => Some(NodeId(caps[1].to_string())),
        None => Some(NodeId(cell.to_string())),
    }
}

fn coordinate(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if NULL_CELL.is_match(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A pipe row that names both of its manholes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipeRecord {
    /// Index into `Table::rows`.
    pub row: usize,
    pub pipe: Pipe,
}

/// A manhole row with a label and a position.
#[derive(Clone, Debug, PartialEq)]
pub struct ManholeRecord {
    /// Index into `Table::rows`.
    pub row: usize,
    pub label: NodeId,
    pub x: f64,
    pub y: f64,
}

/// What a validation pass kept and dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Records<T> {
    pub records: Vec<T>,
    /// Indexes into `Table::rows` of rows we skipped.
    pub rejected: Vec<usize>,
}

impl<T> Records<T> {
    fn new() -> Records<T> {
        Records { records: vec![], rejected: vec![] }
    }
}

fn cell<'a>(row: &'a Row, column: usize) -> &'a str {
    row.get(column).unwrap_or("")
}

/// Reads the start and stop manhole of every pipe row.
///
/// Fails only if a column is missing. Rows with a null endpoint are skipped
/// (with a warning) and listed in `rejected`.
pub fn pipes(table: &Table, columns: &ColumnNames) -> Result<Records<PipeRecord>, ReadError> {
    let start_column = table.require_column(&columns.start_node)?;
    let stop_column = table.require_column(&columns.stop_node)?;

    let mut ret = Records::<PipeRecord>::new();

    for (index, row) in table.rows.iter().enumerate() {
        match (node_id(cell(row, start_column)), node_id(cell(row, stop_column))) {
            (Some(start), Some(stop)) => {
                ret.records.push(PipeRecord { row: index, pipe: Pipe(start, stop) });
            }
            (start, stop) => {
                warn!(
                    line = row.line,
                    start = start.as_ref().map_or("<null>", |n| n.as_str()),
                    stop = stop.as_ref().map_or("<null>", |n| n.as_str()),
                    "skipping pipe with a missing endpoint"
                );
                ret.rejected.push(index);
            }
        }
    }

    Ok(ret)
}

/// Reads the label and coordinates of every manhole row.
///
/// Rows with a null label or an unreadable coordinate are skipped (with a
/// warning) and listed in `rejected`.
pub fn manholes(table: &Table, columns: &ColumnNames) -> Result<Records<ManholeRecord>, ReadError> {
    let label_column = table.require_column(&columns.label)?;
    let x_column = table.require_column(&columns.x)?;
    let y_column = table.require_column(&columns.y)?;

    let mut ret = Records::<ManholeRecord>::new();

    for (index, row) in table.rows.iter().enumerate() {
        let label = node_id(cell(row, label_column));
        let x = coordinate(cell(row, x_column));
        let y = coordinate(cell(row, y_column));

        match (label, x, y) {
            (Some(label), Some(x), Some(y)) => {
                ret.records.push(ManholeRecord { row: index, label: label, x: x, y: y });
            }
            _ => {
                warn!(
                    line = row.line,
                    label = cell(row, label_column),
                    x = cell(row, x_column),
                    y = cell(row, y_column),
                    "skipping manhole with a missing label or coordinate"
                );
                ret.rejected.push(index);
            }
        }
    }

    Ok(ret)
}

/// Just the pipes, for `simplify()`.
pub fn pipe_list(records: &[PipeRecord]) -> Vec<Pipe> {
    records.iter().map(|r| r.pipe.clone()).collect()
}
