//! Knobs for simplifying and for reading/writing tables.
use std::num::NonZeroUsize;

/// What to do with a closed loop of PathNodes that touches no Junction.
///
/// No Junction means no place for a chain walk to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Walk the loop from its smallest NodeId and sample it like any other
    /// chain. The loop keeps at least one manhole.
    Anchor,

    /// Leave the loop out entirely: none of its manholes are kept.
    Omit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Keep every Nth PathNode along a chain, starting with the first.
    pub sample_interval: NonZeroUsize,
    pub cycles: CyclePolicy,
}

/// Keep one, skip three.
pub const DEFAULT_SAMPLE_INTERVAL: usize = 4;

impl Default for SimplifyOptions {
    fn default() -> SimplifyOptions {
        SimplifyOptions {
            sample_interval: NonZeroUsize::new(DEFAULT_SAMPLE_INTERVAL).unwrap_or(NonZeroUsize::MIN),
            cycles: CyclePolicy::Anchor,
        }
    }
}

/// Header names of the columns we read.
///
/// Every other column is carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNames {
    pub start_node: String,
    pub stop_node: String,
    pub label: String,
    pub x: String,
    pub y: String,
}

impl Default for ColumnNames {
    fn default() -> ColumnNames {
        ColumnNames {
            start_node: "Start Node".to_string(),
            stop_node: "Stop Node".to_string(),
            label: "Label".to_string(),
            x: "X (m)".to_string(),
            y: "Y (m)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// A WHATWG encoding label, e.g. "utf-8" or "windows-1255".
    pub encoding: String,
    pub delimiter: char,
    pub columns: ColumnNames,
}

impl Default for TableOptions {
    fn default() -> TableOptions {
        TableOptions {
            encoding: "utf-8".to_string(),
            delimiter: ',',
            columns: ColumnNames::default(),
        }
    }
}
