//! Built-in streaming Excel writer
//!
//! The second workbook writer of the fallback chain. It needs nothing beyond
//! the `zip` crate:
//! - Direct XML generation
//! - Shared strings deduplication
//! - One worksheet open at a time, rows streamed into the archive

pub mod shared_strings;
pub mod workbook;
pub mod xml_writer;

use crate::error::Result;
use crate::types::Workbook;
use chrono::NaiveDateTime;
use std::path::Path;

pub use workbook::FastWorkbook;

/// Write a whole fixture workbook with [`FastWorkbook`]
///
/// # Examples
///
/// ```no_run
/// use xlsx_fixtures::{data, fast_writer};
///
/// let workbook = data::fallback_workbook()?;
/// fast_writer::write_workbook(&workbook, "test_data.xlsx", None)?;
/// # Ok::<(), xlsx_fixtures::FixtureError>(())
/// ```
pub fn write_workbook<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    created: Option<NaiveDateTime>,
) -> Result<()> {
    let mut writer = FastWorkbook::new(path)?;
    if let Some(created) = created {
        writer.set_created(created);
    }

    for sheet in workbook.sheets() {
        writer.add_worksheet(sheet.name())?;
        for row in sheet.rows_with_header() {
            writer.write_row_typed(&row)?;
        }
    }

    writer.close()
}
