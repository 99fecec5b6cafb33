//! Ordered fallback chain over the workbook writers
//!
//! Each writer is a cargo feature. A writer that was not compiled in reports
//! [`FixtureError::BackendUnavailable`], which is the only error the chain
//! recovers from: the next writer is tried, and when none is left the
//! employee table is written as CSV instead.

use crate::config::FixtureConfig;
use crate::csv_output;
use crate::data;
use crate::error::{FixtureError, Result};
use crate::types::Workbook;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The workbook writers the fallback chain knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// `rust_xlsxwriter` (feature `xlsxwriter`)
    RustXlsxWriter,
    /// Built-in [`crate::fast_writer`] (feature `streaming`)
    Streaming,
}

impl BackendKind {
    const DEFAULT_ORDER: [BackendKind; 2] = [BackendKind::RustXlsxWriter, BackendKind::Streaming];

    /// Preference order used when the config does not override it
    pub fn default_order() -> &'static [BackendKind] {
        &Self::DEFAULT_ORDER
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::RustXlsxWriter => "rust_xlsxwriter",
            BackendKind::Streaming => "streaming",
        }
    }

    /// Cargo feature that compiles this writer in
    pub fn feature(self) -> &'static str {
        match self {
            BackendKind::RustXlsxWriter => "xlsxwriter",
            BackendKind::Streaming => "streaming",
        }
    }

    pub fn is_available(self) -> bool {
        match self {
            BackendKind::RustXlsxWriter => cfg!(feature = "xlsxwriter"),
            BackendKind::Streaming => cfg!(feature = "streaming"),
        }
    }

    /// Write `workbook` to `path` with this writer
    pub fn write(self, workbook: &Workbook, path: &Path, config: &FixtureConfig) -> Result<()> {
        match self {
            #[cfg(feature = "xlsxwriter")]
            BackendKind::RustXlsxWriter => {
                crate::xlsx_writer::write_workbook(workbook, path, Some(config.created()))
            }
            #[cfg(feature = "streaming")]
            BackendKind::Streaming => {
                crate::fast_writer::write_workbook(workbook, path, Some(config.created()))
            }
            #[allow(unreachable_patterns)]
            _ => {
                let _ = (workbook, path, config);
                Err(self.unavailable())
            }
        }
    }

    fn unavailable(self) -> FixtureError {
        FixtureError::BackendUnavailable {
            backend: self.name(),
            feature: self.feature(),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the fallback chain ended up writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureOutput {
    /// A workbook written by the given writer
    Workbook { path: PathBuf, backend: BackendKind },
    /// The CSV fallback
    Csv { path: PathBuf },
}

impl FixtureOutput {
    pub fn path(&self) -> &Path {
        match self {
            FixtureOutput::Workbook { path, .. } | FixtureOutput::Csv { path } => path,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FixtureOutput::Csv { .. })
    }

    /// One-line success message
    pub fn describe(&self) -> String {
        let file_name = self
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self {
            FixtureOutput::Workbook { backend, .. } => {
                format!("✅ Created {} using {}", file_name, backend)
            }
            FixtureOutput::Csv { .. } => format!("✅ Created {} as fallback", file_name),
        }
    }
}

/// Write the two-sheet fixture workbook with the first available writer,
/// else write the employee table as CSV.
///
/// Errors other than "writer not available" are returned as-is; there is no
/// retry and no partial-failure recovery.
pub fn generate_with_fallback(config: &FixtureConfig) -> Result<FixtureOutput> {
    let workbook = data::fallback_workbook()?;
    let xlsx_path = config.xlsx_path();

    for &backend in config.backends() {
        debug!(backend = backend.name(), path = %xlsx_path.display(), "trying workbook writer");
        match backend.write(&workbook, &xlsx_path, config) {
            Ok(()) => {
                info!(backend = backend.name(), path = %xlsx_path.display(), "workbook written");
                return Ok(FixtureOutput::Workbook {
                    path: xlsx_path,
                    backend,
                });
            }
            Err(err) if err.is_unavailable() => {
                debug!(backend = backend.name(), "{}", err);
            }
            Err(err) => return Err(err),
        }
    }

    let missing: Vec<&str> = config.backends().iter().map(|b| b.name()).collect();
    warn!(tried = ?missing, "no workbook writer available, falling back to CSV");

    let csv_path = config.csv_path();
    let employees = workbook
        .sheet(data::FALLBACK_EMPLOYEE_SHEET)
        .ok_or_else(|| FixtureError::WriteError("employee table missing".to_string()))?;
    csv_output::write_csv(employees, &csv_path)?;
    info!(path = %csv_path.display(), "CSV fallback written");

    Ok(FixtureOutput::Csv { path: csv_path })
}

/// Install hint printed when the chain fell back to CSV
pub fn install_hint() -> String {
    let features: Vec<&str> = BackendKind::default_order()
        .iter()
        .map(|b| b.feature())
        .collect();
    format!(
        "Install one of them: cargo build --features {}",
        features.join("  or  cargo build --features ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfigBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_names_and_features() {
        assert_eq!(BackendKind::RustXlsxWriter.name(), "rust_xlsxwriter");
        assert_eq!(BackendKind::Streaming.feature(), "streaming");
        assert_eq!(BackendKind::Streaming.to_string(), "streaming");
        assert_eq!(
            BackendKind::default_order(),
            [BackendKind::RustXlsxWriter, BackendKind::Streaming]
        );
    }

    #[test]
    fn test_availability_follows_features() {
        assert_eq!(
            BackendKind::RustXlsxWriter.is_available(),
            cfg!(feature = "xlsxwriter")
        );
        assert_eq!(
            BackendKind::Streaming.is_available(),
            cfg!(feature = "streaming")
        );
    }

    #[test]
    fn test_empty_chain_writes_csv() {
        let dir = tempdir().unwrap();
        let config = FixtureConfigBuilder::new()
            .output_dir(dir.path())
            .backends(Vec::<BackendKind>::new())
            .build();

        let output = generate_with_fallback(&config).unwrap();
        assert!(output.is_fallback());
        assert_eq!(output.path(), dir.path().join("test_data.csv"));
        assert_eq!(output.describe(), "✅ Created test_data.csv as fallback");
        assert!(!dir.path().join("test_data.xlsx").exists());
    }

    #[cfg(feature = "streaming")]
    #[test]
    fn test_first_available_writer_wins() {
        let dir = tempdir().unwrap();
        let config = FixtureConfigBuilder::new()
            .output_dir(dir.path())
            .backends([BackendKind::Streaming, BackendKind::RustXlsxWriter])
            .build();

        let output = generate_with_fallback(&config).unwrap();
        assert_eq!(
            output,
            FixtureOutput::Workbook {
                path: dir.path().join("test_data.xlsx"),
                backend: BackendKind::Streaming,
            }
        );
        assert_eq!(output.describe(), "✅ Created test_data.xlsx using streaming");
    }

    #[cfg(any(feature = "xlsxwriter", feature = "streaming"))]
    #[test]
    fn test_write_error_does_not_fall_back_to_csv() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("test_data.xlsx")).unwrap();
        let config = FixtureConfigBuilder::new().output_dir(dir.path()).build();

        let err = generate_with_fallback(&config).unwrap_err();
        assert!(!err.is_unavailable());
        assert!(!dir.path().join("test_data.csv").exists());
    }

    #[test]
    fn test_install_hint_names_features() {
        let hint = install_hint();
        assert!(hint.contains("--features xlsxwriter"));
        assert!(hint.contains("--features streaming"));
    }
}
