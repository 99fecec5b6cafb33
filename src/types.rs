//! Type definitions for fixture data

use crate::error::{FixtureError, Result};
use std::fmt;

/// Excel sheet name maximum length.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters Excel does not allow in sheet names.
pub const ILLEGAL_SHEET_CHARS: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

/// Represents a single cell value in a fixture sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl CellValue {
    /// Convert cell value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Check if cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if cell holds a number
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Compare two values the way a workbook round trip preserves them.
    ///
    /// Readers report every number as a float, so `Int(25)` and `Float(25.0)`
    /// are the same value. Strings are never coerced to numbers here.
    pub fn same_value(&self, other: &CellValue) -> bool {
        match (self, other) {
            (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Represents a row of cells read from a workbook
#[derive(Debug, Clone)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    /// Cells in this row
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(index: u32, cells: Vec<CellValue>) -> Self {
        Row { index, cells }
    }

    /// Get cell at column index
    pub fn get(&self, col: usize) -> Option<&CellValue> {
        self.cells.get(col)
    }

    /// Get number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cells.iter().all(|c| c.is_empty())
    }

    /// Convert row to vector of strings
    pub fn to_strings(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.as_string()).collect()
    }
}

/// A named grid: one header row plus data rows of the same width
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create an empty sheet with the given column headers
    pub fn new<I, S>(name: &str, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_sheet_name(name)?;
        Ok(Sheet {
            name: name.to_string(),
            headers: headers
                .into_iter()
                .map(|h| h.as_ref().to_string())
                .collect(),
            rows: Vec::new(),
        })
    }

    /// Append a data row. The row must have exactly one cell per header.
    pub fn push_row<I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = CellValue>,
    {
        let cells: Vec<CellValue> = cells.into_iter().collect();
        if cells.len() != self.column_count() {
            return Err(FixtureError::ShapeMismatch {
                sheet: self.name.clone(),
                row: self.rows.len() + 1,
                expected: self.column_count(),
                found: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Builder-style variant of [`Sheet::push_row`]
    pub fn with_row<I>(mut self, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellValue>,
    {
        self.push_row(cells)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, header excluded
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Header row followed by every data row
    pub fn rows_with_header(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        let header = self
            .headers
            .iter()
            .map(|h| CellValue::String(h.clone()))
            .collect::<Vec<_>>();
        std::iter::once(header).chain(self.rows.iter().cloned())
    }
}

/// Ordered collection of uniquely named sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet. Names are compared case-insensitively, as Excel does.
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<()> {
        let lowered = sheet.name().to_lowercase();
        if self.sheets.iter().any(|s| s.name().to_lowercase() == lowered) {
            return Err(FixtureError::DuplicateSheet(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }
}

/// Check a sheet name against Excel's naming rules
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(FixtureError::InvalidSheetName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return reject("name is empty");
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return reject("name is longer than 31 characters");
    }
    if let Some(c) = name.chars().find(|c| ILLEGAL_SHEET_CHARS.contains(c)) {
        return reject(&format!("character '{}' is not allowed", c));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return reject("name cannot start or end with an apostrophe");
    }
    Ok(())
}
