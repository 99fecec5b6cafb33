//! Integration tests for fixture generation

use tempfile::tempdir;
use xlsx_fixtures::verify::verify_csv;
use xlsx_fixtures::{data, generate_with_fallback, BackendKind, FixtureConfigBuilder, FixtureOutput};

#[cfg(any(feature = "xlsxwriter", feature = "streaming"))]
use xlsx_fixtures::{verify::verify_workbook, WorkbookReader};

#[test]
fn test_csv_fallback_when_no_writer() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new()
        .output_dir(dir.path())
        .backends(Vec::<BackendKind>::new())
        .build();

    let output = generate_with_fallback(&config).unwrap();
    assert_eq!(
        output,
        FixtureOutput::Csv {
            path: dir.path().join("test_data.csv")
        }
    );

    let content = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(
        content,
        "Name,Age,City,Salary\n\
         John Doe,25,New York,50000\n\
         Jane Smith,30,Los Angeles,60000\n\
         Bob Johnson,35,Chicago,70000\n"
    );

    let employees = data::employees(data::FALLBACK_EMPLOYEE_SHEET).unwrap();
    verify_csv(output.path(), &employees).unwrap();
}

#[cfg(any(feature = "xlsxwriter", feature = "streaming"))]
#[test]
fn test_default_chain_writes_two_sheets() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();

    let output = generate_with_fallback(&config).unwrap();
    assert!(!output.is_fallback());
    assert_eq!(output.path(), dir.path().join("test_data.xlsx"));
    assert!(!dir.path().join("test_data.csv").exists());

    let reader = WorkbookReader::open(output.path()).unwrap();
    assert_eq!(reader.sheet_count(), 2);
    assert_eq!(reader.sheet_names(), vec!["Sheet1", "Products"]);

    verify_workbook(output.path(), &data::fallback_workbook().unwrap()).unwrap();
}

#[cfg(feature = "xlsxwriter")]
#[test]
fn test_rust_xlsxwriter_is_preferred() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();

    match generate_with_fallback(&config).unwrap() {
        FixtureOutput::Workbook { backend, .. } => {
            assert_eq!(backend, BackendKind::RustXlsxWriter)
        }
        other => panic!("unexpected output: {other:?}"),
    }
}

#[cfg(feature = "streaming")]
#[test]
fn test_streaming_writer_alone() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new()
        .output_dir(dir.path())
        .backends([BackendKind::Streaming])
        .build();

    let output = generate_with_fallback(&config).unwrap();
    verify_workbook(output.path(), &data::fallback_workbook().unwrap()).unwrap();

    let mut reader = WorkbookReader::open(output.path()).unwrap();
    assert_eq!(reader.dimensions("Products").unwrap(), (4, 3));

    let rows: Vec<_> = reader
        .rows("Products")
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(rows[0].to_strings(), vec!["Product", "Price", "Stock"]);
    assert_eq!(rows[1].get(1).unwrap().as_f64(), Some(999.99));
    assert_eq!(rows[3].get(2).unwrap().as_i64(), Some(25));
}

#[cfg(not(feature = "xlsxwriter"))]
#[test]
fn test_missing_writer_is_skipped() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new()
        .output_dir(dir.path())
        .backends([BackendKind::RustXlsxWriter])
        .build();

    let output = generate_with_fallback(&config).unwrap();
    assert!(output.is_fallback());
}

#[cfg(any(feature = "xlsxwriter", feature = "streaming"))]
#[test]
fn test_rerun_overwrites_with_identical_bytes() {
    let available: Vec<BackendKind> = BackendKind::default_order()
        .iter()
        .copied()
        .filter(|b| b.is_available())
        .collect();

    for backend in available {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_data.xlsx");
        std::fs::write(&path, b"stale content").unwrap();

        let config = FixtureConfigBuilder::new()
            .output_dir(dir.path())
            .backends([backend])
            .build();

        generate_with_fallback(&config).unwrap();
        let first = std::fs::read(&path).unwrap();
        generate_with_fallback(&config).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_ne!(first, b"stale content".to_vec(), "{backend}");
        assert_eq!(first, second, "{backend} output changed between runs");
    }
}

#[test]
fn test_verify_rejects_wrong_layout() {
    let dir = tempdir().unwrap();
    let config = FixtureConfigBuilder::new()
        .output_dir(dir.path())
        .backends(Vec::<BackendKind>::new())
        .build();
    let output = generate_with_fallback(&config).unwrap();

    let products = data::products().unwrap();
    let err = verify_csv(output.path(), &products).unwrap_err();
    assert!(err.to_string().contains("Fixture mismatch in 'Products'"));
}

#[cfg(feature = "dataframe")]
mod dataframe {
    use super::*;
    use xlsx_fixtures::{export_frames, CellValue};

    #[test]
    fn test_export_writes_three_sheets() {
        let dir = tempdir().unwrap();
        let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();

        let export = export_frames(&config).unwrap();
        assert_eq!(export.path, dir.path().join("test_data.xlsx"));

        let summary: Vec<_> = export
            .sheets
            .iter()
            .map(|s| (s.name.as_str(), s.rows, s.columns))
            .collect();
        assert_eq!(
            summary,
            vec![("Employees", 3, 4), ("Products", 3, 3), ("Sales", 3, 3)]
        );

        verify_workbook(&export.path, &data::dataframe_workbook().unwrap()).unwrap();
    }

    #[test]
    fn test_export_has_no_index_column() {
        let dir = tempdir().unwrap();
        let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();
        let export = export_frames(&config).unwrap();

        let mut reader = WorkbookReader::open(&export.path).unwrap();
        let header = reader.rows("Sales").unwrap().next().unwrap().unwrap();
        assert_eq!(header.to_strings(), vec!["Date", "Sales", "Profit"]);

        let first = reader.rows("Sales").unwrap().nth(1).unwrap().unwrap();
        assert_eq!(first.get(0), Some(&CellValue::from("2024-01-01")));
        assert_eq!(first.get(1).unwrap().as_i64(), Some(1000));
    }

    #[test]
    fn test_export_is_reproducible() {
        let dir = tempdir().unwrap();
        let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();

        let first = std::fs::read(export_frames(&config).unwrap().path).unwrap();
        let second = std::fs::read(export_frames(&config).unwrap().path).unwrap();
        assert_eq!(first, second);
    }
}
