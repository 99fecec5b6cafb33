//! Reading written fixtures back

use crate::error::{FixtureError, Result};
use crate::types::{CellValue, Row};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Workbook reader backed by calamine
pub struct WorkbookReader {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookReader {
    /// Open a workbook; the format is detected from the file extension
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use xlsx_fixtures::WorkbookReader;
    ///
    /// let reader = WorkbookReader::open("test_data.xlsx")?;
    /// println!("Sheets: {:?}", reader.sheet_names());
    /// # Ok::<(), xlsx_fixtures::FixtureError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workbook =
            open_workbook_auto(path).map_err(|e| FixtureError::ReadError(e.to_string()))?;
        Ok(WorkbookReader { workbook })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_names().len()
    }

    /// All rows of a sheet, header included
    pub fn rows(&mut self, sheet_name: &str) -> Result<RowIterator> {
        Ok(RowIterator::new(self.range(sheet_name)?))
    }

    /// `(rows, cols)` of the used range of a sheet
    pub fn dimensions(&mut self, sheet_name: &str) -> Result<(u32, u32)> {
        let (rows, cols) = self.range(sheet_name)?.get_size();
        Ok((rows as u32, cols as u32))
    }

    fn range(&mut self, sheet_name: &str) -> Result<Range<Data>> {
        if !self.workbook.sheet_names().iter().any(|s| s == sheet_name) {
            return Err(FixtureError::SheetNotFound {
                sheet: sheet_name.to_string(),
                available: self.sheet_names().join(", "),
            });
        }
        Ok(self.workbook.worksheet_range(sheet_name)?)
    }
}

/// Iterator over the rows of one sheet
pub struct RowIterator {
    range: Range<Data>,
    current_row: u32,
    max_row: u32,
}

impl RowIterator {
    fn new(range: Range<Data>) -> Self {
        let (rows, _) = range.get_size();
        RowIterator {
            range,
            current_row: 0,
            max_row: rows as u32,
        }
    }
}

impl Iterator for RowIterator {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.max_row {
            return None;
        }

        let row_idx = self.current_row;
        self.current_row += 1;

        // `get` is relative to the range start, so a sheet whose data begins
        // below A1 still yields its first used row first.
        let (_, cols) = self.range.get_size();
        let cells = (0..cols)
            .map(|col| {
                self.range
                    .get((row_idx as usize, col))
                    .map(data_to_cell_value)
                    .unwrap_or(CellValue::Empty)
            })
            .collect();

        Some(Ok(Row::new(row_idx, cells)))
    }
}

fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(d) => CellValue::Float(d.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR {:?}", e)),
    }
}
