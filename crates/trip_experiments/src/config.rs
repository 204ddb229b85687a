//! Comparison-run manifest.
//!
//! ```json
//! {
//!   "output_dir": "output",
//!   "images_dir": "images",
//!   "scenarios": [
//!     { "name": "Base Case", "path": "tripinfo_base.xml" },
//!     { "name": "Optimized Lights", "path": "tripinfo_optimized.xml" }
//!   ]
//! }
//! ```
//!
//! Relative paths in the manifest, scenario logs and output directories
//! alike, resolve against the manifest's directory. Directories given on the
//! command line resolve against the working directory. The scenario list
//! order is the report order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::scenario::ScenarioSource;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub images_dir: Option<PathBuf>,
    pub scenarios: Vec<ScenarioSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    Io(String),
    InvalidFormat(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(message) => write!(f, "{message}"),
            ManifestError::InvalidFormat(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ManifestError {}

pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|error| {
        ManifestError::Io(format!(
            "failed to read manifest '{}': {error}",
            path.display()
        ))
    })?;

    let mut manifest: Manifest = serde_json::from_str(&contents).map_err(|error| {
        ManifestError::InvalidFormat(format!("invalid manifest '{}': {error}", path.display()))
    })?;

    if manifest.scenarios.is_empty() {
        return Err(ManifestError::InvalidFormat(format!(
            "manifest '{}' lists no scenarios",
            path.display()
        )));
    }

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for scenario in &mut manifest.scenarios {
        scenario.path = relative_to(base, &scenario.path);
    }
    manifest.output_dir = manifest.output_dir.map(|dir| relative_to(base, &dir));
    manifest.images_dir = manifest.images_dir.map(|dir| relative_to(base, &dir));

    Ok(manifest)
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Where a comparison run writes its table and chart data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }
}

impl OutputConfig {
    /// Explicit directories win over the manifest's, which win over defaults.
    pub fn resolve(
        output_dir: Option<PathBuf>,
        images_dir: Option<PathBuf>,
        manifest: Option<&Manifest>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            output_dir: output_dir
                .or_else(|| manifest.and_then(|m| m.output_dir.clone()))
                .unwrap_or(defaults.output_dir),
            images_dir: images_dir
                .or_else(|| manifest.and_then(|m| m.images_dir.clone()))
                .unwrap_or(defaults.images_dir),
        }
    }

    pub fn comparison_csv_path(&self) -> PathBuf {
        self.output_dir.join("comparison_results.csv")
    }

    pub fn report_json_path(&self) -> PathBuf {
        self.output_dir.join("comparison_report.json")
    }
}
