//! Writes `test_data.xlsx` with three sheets built from polars DataFrames.

use xlsx_fixtures::{export_frames, logging, FixtureConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logger();

    let export = export_frames(&FixtureConfig::default())?;

    let file_name = export
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "Created {} with {} sheets:",
        file_name,
        export.sheets.len()
    );
    for sheet in &export.sheets {
        println!(
            "- {}: {} rows, {} columns",
            sheet.name, sheet.rows, sheet.columns
        );
    }

    Ok(())
}
