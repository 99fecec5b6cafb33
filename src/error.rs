//! Error types for fixture generation

use thiserror::Error;

/// Result type alias for fixture operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Main error type for all fixture operations
#[derive(Error, Debug)]
pub enum FixtureError {
    /// The requested workbook writer was not compiled into this build
    #[error("Workbook writer '{backend}' is not available (enable the '{feature}' feature)")]
    BackendUnavailable {
        backend: &'static str,
        feature: &'static str,
    },

    /// A row does not have one cell per header
    #[error("Row {row} of sheet '{sheet}' has {found} cells, expected {expected}")]
    ShapeMismatch {
        sheet: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Sheet name rejected by Excel naming rules
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    /// Two sheets with the same name in one workbook
    #[error("Sheet '{0}' already exists in the workbook")]
    DuplicateSheet(String),

    /// Error occurred while reading a workbook back
    #[error("Failed to read Excel file: {0}")]
    ReadError(String),

    /// Error occurred while writing a workbook
    #[error("Failed to write Excel file: {0}")]
    WriteError(String),

    /// Sheet not found in a workbook being read
    #[error("Sheet '{sheet}' not found. Available sheets: {available}")]
    SheetNotFound { sheet: String, available: String },

    /// Written file does not hold the expected fixture
    #[error("Fixture mismatch in '{sheet}': {detail}")]
    Mismatch { sheet: String, detail: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error wrapper
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Calamine error wrapper
    #[error("Calamine error: {0}")]
    CalamineError(String),

    /// rust_xlsxwriter error wrapper
    #[cfg(feature = "xlsxwriter")]
    #[error("rust_xlsxwriter error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    /// ZIP archive error wrapper
    #[cfg(feature = "streaming")]
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Polars error wrapper
    #[cfg(feature = "dataframe")]
    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::prelude::PolarsError),
}

impl FixtureError {
    /// True for the one error kind the fallback chain recovers from
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FixtureError::BackendUnavailable { .. })
    }
}

impl From<calamine::Error> for FixtureError {
    fn from(err: calamine::Error) -> Self {
        FixtureError::CalamineError(err.to_string())
    }
}
