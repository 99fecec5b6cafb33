//! Workbook output through `rust_xlsxwriter`, the preferred writer

use crate::error::{FixtureError, Result};
use crate::types::{CellValue, Workbook};
use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Write every sheet of `workbook` to `path`
pub fn write_workbook<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    created: Option<NaiveDateTime>,
) -> Result<()> {
    let mut book = new_book(created)?;

    for sheet in workbook.sheets() {
        let worksheet = book.add_worksheet();
        worksheet.set_name(sheet.name())?;
        for (row_idx, row) in sheet.rows_with_header().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                write_cell(worksheet, row_idx, col_idx, value)?;
            }
        }
    }

    book.save(path.as_ref())?;
    Ok(())
}

/// Empty `rust_xlsxwriter` workbook, with a pinned creation time if given
pub(crate) fn new_book(created: Option<NaiveDateTime>) -> Result<XlsxWorkbook> {
    let mut book = XlsxWorkbook::new();
    if let Some(created) = created {
        let properties = DocProperties::new().set_creation_datetime(&excel_datetime(created)?);
        book.set_properties(&properties);
    }
    Ok(book)
}

pub(crate) fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &CellValue,
) -> Result<()> {
    let (row, col) = (cast_row_num(row_idx)?, cast_col_num(col_idx)?);
    match value {
        CellValue::Empty => {}
        CellValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

pub(crate) fn excel_datetime(ts: NaiveDateTime) -> Result<ExcelDateTime> {
    let year = u16::try_from(ts.year())
        .map_err(|_| FixtureError::WriteError(format!("Year out of range: {}", ts.year())))?;
    let date = ExcelDateTime::from_ymd(year, ts.month() as u8, ts.day() as u8)?;
    Ok(date.and_hms(ts.hour() as u16, ts.minute() as u8, f64::from(ts.second()))?)
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| FixtureError::WriteError(format!("Row index overflow: {value}")))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value)
        .map_err(|_| FixtureError::WriteError(format!("Column index overflow: {value}")))
}
