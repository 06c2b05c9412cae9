//! Project configuration loader describing where bundle data lives on disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::layout::ProjectLayout;

const DEFAULT_CONFIG_FILE: &str = "relocation.config.json";

/// Discoverable project configuration describing bundle data locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Product name used to derive player data directories on desktop targets.
    pub product_name: String,
    /// Canonical bundle output directory, relative to the project root.
    pub source_build_dir: String,
    /// Ephemeral streaming-assets root, relative to the project root.
    pub streaming_assets_dir: String,
    /// Subfolder name bundle data occupies inside staging and player outputs.
    pub bundle_subfolder: String,
    /// Persisted build preferences file, relative to the project root.
    pub preferences_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            product_name: "Player".into(),
            source_build_dir: "Library/BundleBuild".into(),
            streaming_assets_dir: "Assets/StreamingAssets".into(),
            bundle_subfolder: "bundles".into(),
            preferences_file: "Library/BuildPrefs.json".into(),
        }
    }
}

impl ProjectConfig {
    /// Attempt to load configuration from the provided project directory.
    ///
    /// When the configuration file does not exist or fails to parse we fallback to default
    /// values so downstream callers can continue operating with sensible assumptions.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Convert the configuration into the runtime layout rooted at the project directory.
    pub fn into_layout(self, project_dir: &Path) -> ProjectLayout {
        ProjectLayout {
            project_dir: project_dir.to_path_buf(),
            product_name: self.product_name,
            source_build_dir: self.source_build_dir,
            streaming_assets_dir: self.streaming_assets_dir,
            bundle_subfolder: self.bundle_subfolder,
        }
    }

    /// Path to the persisted preferences file for this project.
    pub fn preferences_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.preferences_file)
    }
}
