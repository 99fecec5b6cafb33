//! Output location and writer preference for the generators

use crate::backend::BackendKind;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Default output file name without extension
pub const DEFAULT_FILE_STEM: &str = "test_data";

/// Where fixtures go and which writers the fallback chain may use
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    output_dir: PathBuf,
    file_stem: String,
    backends: Vec<BackendKind>,
    created: NaiveDateTime,
}

impl FixtureConfig {
    /// `test_data.xlsx` in the output directory
    pub fn xlsx_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xlsx", self.file_stem))
    }

    /// `test_data.csv` in the output directory
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.file_stem))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writers in preference order
    pub fn backends(&self) -> &[BackendKind] {
        &self.backends
    }

    /// Creation timestamp stamped into workbook document properties
    pub fn created(&self) -> NaiveDateTime {
        self.created
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        FixtureConfigBuilder::new().build()
    }
}

/// Builder for [`FixtureConfig`]
///
/// # Examples
///
/// ```
/// use xlsx_fixtures::{BackendKind, FixtureConfigBuilder};
///
/// let config = FixtureConfigBuilder::new()
///     .output_dir("/tmp/fixtures")
///     .backends([BackendKind::Streaming])
///     .build();
///
/// assert!(config.xlsx_path().ends_with("test_data.xlsx"));
/// ```
pub struct FixtureConfigBuilder {
    output_dir: Option<PathBuf>,
    file_stem: Option<String>,
    backends: Option<Vec<BackendKind>>,
    created: Option<NaiveDateTime>,
}

impl FixtureConfigBuilder {
    pub fn new() -> Self {
        FixtureConfigBuilder {
            output_dir: None,
            file_stem: None,
            backends: None,
            created: None,
        }
    }

    /// Directory the fixture files are written to (default: current directory)
    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// File name without extension (default: `test_data`)
    pub fn file_stem(mut self, stem: &str) -> Self {
        self.file_stem = Some(stem.to_string());
        self
    }

    /// Writers to try, most preferred first. An empty list goes straight to CSV.
    pub fn backends<I>(mut self, backends: I) -> Self
    where
        I: IntoIterator<Item = BackendKind>,
    {
        self.backends = Some(backends.into_iter().collect());
        self
    }

    /// Document creation timestamp (default: 2024-01-01 00:00:00)
    pub fn created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    pub fn build(self) -> FixtureConfig {
        FixtureConfig {
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            file_stem: self
                .file_stem
                .unwrap_or_else(|| DEFAULT_FILE_STEM.to_string()),
            backends: self
                .backends
                .unwrap_or_else(|| BackendKind::default_order().to_vec()),
            created: self.created.unwrap_or_else(default_created),
        }
    }
}

impl Default for FixtureConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Pinned so that re-running a generator reproduces the same bytes.
fn default_created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
