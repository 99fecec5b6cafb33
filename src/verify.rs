//! Check a written fixture against the literal data it should hold

use crate::error::{FixtureError, Result};
use crate::reader::WorkbookReader;
use crate::types::{CellValue, Sheet, Workbook};
use std::path::Path;

/// Read `path` back and compare it with `expected`
///
/// Sheet names and order must match exactly. Each sheet must hold the header
/// row followed by the expected data rows, cell for cell.
pub fn verify_workbook<P: AsRef<Path>>(path: P, expected: &Workbook) -> Result<()> {
    let mut reader = WorkbookReader::open(path)?;

    let found = reader.sheet_names();
    let wanted: Vec<String> = expected
        .sheet_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    if found != wanted {
        return Err(FixtureError::Mismatch {
            sheet: "<workbook>".to_string(),
            detail: format!("expected sheets {:?}, found {:?}", wanted, found),
        });
    }

    for sheet in expected.sheets() {
        let rows = reader
            .rows(sheet.name())?
            .map(|row| row.map(|r| r.cells))
            .collect::<Result<Vec<_>>>()?;
        compare_rows(sheet, &rows)?;
    }
    Ok(())
}

/// Read a CSV file back and compare it with `expected`
pub fn verify_csv<P: AsRef<Path>>(path: P, expected: &Sheet) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(CellValue::from).collect::<Vec<_>>());
    }

    // CSV has no types: compare against the text form of each expected cell.
    let as_text: Vec<Vec<CellValue>> = expected
        .rows_with_header()
        .map(|row| row.iter().map(|c| CellValue::String(c.as_string())).collect())
        .collect();
    compare_grid(expected.name(), &as_text, &rows)
}

fn compare_rows(sheet: &Sheet, found: &[Vec<CellValue>]) -> Result<()> {
    let wanted: Vec<Vec<CellValue>> = sheet.rows_with_header().collect();
    compare_grid(sheet.name(), &wanted, found)
}

fn compare_grid(sheet: &str, wanted: &[Vec<CellValue>], found: &[Vec<CellValue>]) -> Result<()> {
    let mismatch = |detail: String| FixtureError::Mismatch {
        sheet: sheet.to_string(),
        detail,
    };

    if wanted.len() != found.len() {
        return Err(mismatch(format!(
            "expected {} rows including header, found {}",
            wanted.len(),
            found.len()
        )));
    }

    for (row_idx, (want, got)) in wanted.iter().zip(found).enumerate() {
        if want.len() != got.len() {
            return Err(mismatch(format!(
                "row {} has {} columns, expected {}",
                row_idx + 1,
                got.len(),
                want.len()
            )));
        }
        for (col_idx, (w, g)) in want.iter().zip(got).enumerate() {
            if !w.same_value(g) {
                return Err(mismatch(format!(
                    "cell ({}, {}) is {:?}, expected {:?}",
                    row_idx + 1,
                    col_idx + 1,
                    g,
                    w
                )));
            }
        }
    }
    Ok(())
}
