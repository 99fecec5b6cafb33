//! Dataframe-backed fixture export
//!
//! Builds the three fixture tables as polars DataFrames, column by column,
//! and exports them as named sheets of one workbook. No index column is
//! written and there is no fallback: any polars or writer error is returned.

use crate::config::FixtureConfig;
use crate::data::{EMPLOYEE_SHEET, PRODUCT_SHEET, SALES_SHEET};
use crate::error::Result;
use crate::types::{CellValue, Sheet};
use crate::xlsx_writer::{cast_col_num, new_book, write_cell};
use polars::prelude::{AnyValue, DataFrame, PolarsResult};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};
use std::path::{Path, PathBuf};
use tracing::info;

/// A DataFrame and the sheet it is exported to
#[derive(Debug, Clone)]
pub struct NamedFrame {
    pub sheet_name: String,
    pub frame: DataFrame,
}

impl NamedFrame {
    pub fn new(sheet_name: &str, frame: DataFrame) -> Self {
        NamedFrame {
            sheet_name: sheet_name.to_string(),
            frame,
        }
    }
}

/// Shape of one exported sheet, data rows only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// Result of [`export_frames`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameExport {
    pub path: PathBuf,
    pub sheets: Vec<SheetSummary>,
}

pub fn employees_frame() -> PolarsResult<DataFrame> {
    polars::df!(
        "Name" => &["John Doe", "Jane Smith", "Bob Johnson"],
        "Age" => &[25i64, 30, 35],
        "City" => &["New York", "Los Angeles", "Chicago"],
        "Salary" => &[50_000i64, 60_000, 70_000],
    )
}

pub fn products_frame() -> PolarsResult<DataFrame> {
    polars::df!(
        "Product" => &["Laptop", "Mouse", "Keyboard"],
        "Price" => &[999.99f64, 25.50, 75.00],
        "Stock" => &[10i64, 50, 25],
    )
}

pub fn sales_frame() -> PolarsResult<DataFrame> {
    polars::df!(
        "Date" => &["2024-01-01", "2024-01-02", "2024-01-03"],
        "Sales" => &[1000i64, 1200, 800],
        "Profit" => &[200i64, 300, 150],
    )
}

/// Employees, Products, Sales, in sheet order
pub fn fixture_frames() -> Result<Vec<NamedFrame>> {
    Ok(vec![
        NamedFrame::new(EMPLOYEE_SHEET, employees_frame()?),
        NamedFrame::new(PRODUCT_SHEET, products_frame()?),
        NamedFrame::new(SALES_SHEET, sales_frame()?),
    ])
}

/// Write each frame to its own sheet: header row from the column names, then
/// one worksheet row per frame row.
pub fn write_frames<P: AsRef<Path>>(
    frames: &[NamedFrame],
    path: P,
    config: &FixtureConfig,
) -> Result<()> {
    let mut book = new_book(Some(config.created()))?;
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for named in frames {
        let worksheet = book.add_worksheet();
        worksheet.set_name(&named.sheet_name)?;

        let columns = named.frame.get_columns();
        for (col_idx, column) in columns.iter().enumerate() {
            worksheet.write_string_with_format(
                0,
                cast_col_num(col_idx)?,
                column.name().as_str(),
                &header_format,
            )?;
        }

        for row_idx in 0..named.frame.height() {
            for (col_idx, column) in columns.iter().enumerate() {
                let value = any_value_to_cell(column.get(row_idx)?);
                write_cell(worksheet, row_idx + 1, col_idx, &value)?;
            }
        }
    }

    book.save(path.as_ref())?;
    Ok(())
}

/// Convert a frame into the crate's [`Sheet`] model
pub fn sheet_from_frame(sheet_name: &str, frame: &DataFrame) -> Result<Sheet> {
    let columns = frame.get_columns();
    let mut sheet = Sheet::new(sheet_name, columns.iter().map(|c| c.name().as_str()))?;
    for row_idx in 0..frame.height() {
        let cells = columns
            .iter()
            .map(|c| c.get(row_idx).map(any_value_to_cell))
            .collect::<PolarsResult<Vec<_>>>()?;
        sheet.push_row(cells)?;
    }
    Ok(sheet)
}

/// Build the fixture frames and write them to `config.xlsx_path()`
pub fn export_frames(config: &FixtureConfig) -> Result<FrameExport> {
    let frames = fixture_frames()?;
    let path = config.xlsx_path();
    write_frames(&frames, &path, config)?;

    let sheets: Vec<SheetSummary> = frames
        .iter()
        .map(|named| SheetSummary {
            name: named.sheet_name.clone(),
            rows: named.frame.height(),
            columns: named.frame.width(),
        })
        .collect();
    for summary in &sheets {
        info!(
            sheet = %summary.name,
            rows = summary.rows,
            columns = summary.columns,
            "sheet exported"
        );
    }

    Ok(FrameExport { path, sheets })
}

fn any_value_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Empty,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::String(s) => CellValue::String(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::String(s.to_string()),
        AnyValue::Int8(v) => CellValue::Int(v.into()),
        AnyValue::Int16(v) => CellValue::Int(v.into()),
        AnyValue::Int32(v) => CellValue::Int(v.into()),
        AnyValue::Int64(v) => CellValue::Int(v),
        AnyValue::UInt8(v) => CellValue::Int(v.into()),
        AnyValue::UInt16(v) => CellValue::Int(v.into()),
        AnyValue::UInt32(v) => CellValue::Int(v.into()),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(i) => CellValue::Int(i),
            Err(_) => CellValue::Float(v as f64),
        },
        AnyValue::Float32(v) => CellValue::Float(v.into()),
        AnyValue::Float64(v) => CellValue::Float(v),
        other => CellValue::String(other.to_string()),
    }
}
