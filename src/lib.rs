//! # xlsx-fixtures
//!
//! Generates a small Excel workbook of synthetic tabular data, for use as a
//! fixture by spreadsheet parser tests.
//!
//! ## Generators
//!
//! - **Fallback chain** ([`generate_with_fallback`]): writes "Sheet1" and
//!   "Products" with the first available workbook writer, `rust_xlsxwriter`
//!   then the built-in streaming writer, else writes the employee table to
//!   `test_data.csv`.
//! - **Dataframe export** ([`export_frames`], feature `dataframe`): builds
//!   three polars DataFrames and writes them as "Employees", "Products" and
//!   "Sales".
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xlsx_fixtures::{generate_with_fallback, FixtureConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let output = generate_with_fallback(&FixtureConfig::default())?;
//! println!("{}", output.describe());
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking a fixture
//!
//! ```rust,no_run
//! use xlsx_fixtures::{data, verify};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! verify::verify_workbook("test_data.xlsx", &data::fallback_workbook()?)?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod csv_output;
pub mod data;
pub mod error;
#[cfg(feature = "streaming")]
pub mod fast_writer;
#[cfg(feature = "dataframe")]
pub mod frames;
pub mod logging;
pub mod reader;
pub mod types;
pub mod verify;
#[cfg(feature = "xlsxwriter")]
pub mod xlsx_writer;

pub use backend::{generate_with_fallback, BackendKind, FixtureOutput};
pub use config::{FixtureConfig, FixtureConfigBuilder};
pub use error::{FixtureError, Result};
#[cfg(feature = "dataframe")]
pub use frames::{export_frames, FrameExport, NamedFrame, SheetSummary};
pub use reader::WorkbookReader;
pub use types::{CellValue, Row, Sheet, Workbook};
