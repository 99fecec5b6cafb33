//! Plain CSV output, used when no workbook writer is available

use crate::error::Result;
use crate::types::Sheet;
use std::path::Path;

/// Write one sheet as CSV: header line, then one line per data row.
///
/// Lines end with `\n`. Fields are quoted only when they contain a comma,
/// a quote or a line break.
pub fn write_csv<P: AsRef<Path>>(sheet: &Sheet, path: P) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)?;

    writer.write_record(sheet.headers())?;
    for row in sheet.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_string()))?;
    }

    writer.flush()?;
    Ok(())
}
