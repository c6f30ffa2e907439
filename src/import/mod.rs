mod columns;
mod normalize;
mod rows;

pub(crate) use columns::ColumnMap;
pub(crate) use normalize::{normalize_rows, ImportOutcome};
pub(crate) use rows::{pad_rows, parse_rows, read_rows};
