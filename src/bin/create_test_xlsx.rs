//! Writes `test_data.xlsx` with the first available workbook writer, or
//! `test_data.csv` when none is compiled in.

use xlsx_fixtures::{backend, generate_with_fallback, logging, FixtureConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logger();
    println!("Creating test Excel file...");

    let output = generate_with_fallback(&FixtureConfig::default())?;

    if output.is_fallback() {
        println!("❌ Neither rust_xlsxwriter nor the streaming writer available");
        println!("{}", backend::install_hint());
        println!("{}", output.describe());
        println!("Note: You'll need a real Excel file to test the xlsx parser");
    } else {
        println!("{}", output.describe());
    }

    Ok(())
}
