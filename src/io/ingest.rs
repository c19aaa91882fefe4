//! CSV ingest.
//!
//! Turns a delimited text file with a header row into an [`ObservationTable`].
//!
//! Column typing is decided per column, deterministically:
//! - numeric when every non-missing cell parses as `f64`
//! - categorical otherwise
//!
//! Missing cells are empty strings or `NA` (case-insensitive). In numeric
//! columns they become NaN; in categorical columns they become `""`.
//!
//! An unnamed first column (the row index written by many statistics tools)
//! is dropped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::data::{Column, ObservationTable};
use crate::error::AppError;

/// Summary of what ingest read.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub table: ObservationTable,
    pub rows_read: usize,
    /// Names of columns typed as categorical.
    pub categorical: Vec<String>,
}

/// Load a delimited file from disk.
pub fn load_table(path: &Path, delimiter: u8) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    log::debug!("reading {}", path.display());
    read_table(file, delimiter)
}

/// Parse a delimited table from any reader.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let names = normalize_headers(&headers)?;

    // Skip a leading unnamed row-index column.
    let skip_first = names.first().is_some_and(|n| n.is_empty());
    let first_col = usize::from(skip_first);
    if let Some(i) = names.iter().skip(first_col).position(String::is_empty) {
        return Err(AppError::new(
            2,
            format!("CSV header has an empty column name at position {}", i + first_col + 1),
        ));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    let mut rows_read = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {line}: {e}")))?;
        rows_read += 1;
        for (j, col) in cells.iter_mut().enumerate() {
            col.push(record.get(j).unwrap_or("").to_string());
        }
    }

    if rows_read == 0 {
        return Err(AppError::new(3, "CSV contains no data rows."));
    }

    let mut table = ObservationTable::new();
    let mut categorical = Vec::new();
    for (name, raw) in names.into_iter().zip(cells).skip(first_col) {
        let column = type_column(raw);
        if matches!(column, Column::Categorical(_)) {
            categorical.push(name.clone());
        }
        table.push(name, column)?;
    }

    log::info!(
        "ingested {rows_read} rows, {} columns ({} categorical)",
        table.n_columns(),
        categorical.len()
    );

    Ok(IngestedData {
        table,
        rows_read,
        categorical,
    })
}

fn normalize_headers(headers: &StringRecord) -> Result<Vec<String>, AppError> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers.iter() {
        // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
        // first header. If we don't strip it, column lookups fail.
        let name = name.trim().trim_start_matches('\u{feff}').to_string();
        if !name.is_empty() && out.contains(&name) {
            return Err(AppError::new(2, format!("Duplicate CSV column: `{name}`")));
        }
        out.push(name);
    }
    Ok(out)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("na")
}

fn type_column(raw: Vec<String>) -> Column {
    let parsed: Option<Vec<f64>> = raw
        .iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(f64::NAN)
            } else {
                cell.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        })
        .collect();

    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Categorical(
            raw.into_iter()
                .map(|cell| if is_missing(&cell) { String::new() } else { cell })
                .collect(),
        ),
    }
}
