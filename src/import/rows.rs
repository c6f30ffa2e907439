use anyhow::{Context, Result};
use std::path::Path;

/// Read a CSV file into an ordered list of rows of trimmed string fields.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    parse_rows(&text)
}

/// Parse delimited text into rows. Quoted fields keep embedded commas,
/// every field is trimmed, and blank lines are dropped rather than emitted
/// as empty rows. Rows may have differing field counts.
pub(crate) fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;
        let fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        // A whitespace-only line surfaces as a single empty field.
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        rows.push(fields);
    }
    Ok(rows)
}

/// Right-pad short rows with empty fields so every row has the same column
/// count as the first row. Used by the whole-log replace path, where the
/// downstream table write expects a rectangular grid.
pub(crate) fn pad_rows(rows: &mut [Vec<String>]) {
    let Some(width) = rows.first().map(|row| row.len()) else {
        return;
    };
    for row in rows.iter_mut() {
        while row.len() < width {
            row.push(String::new());
        }
    }
}

#[cfg(test)]
#[path = "rows_tests.rs"]
mod tests;
