//! Persisted, string-keyed build preferences shared across editor sessions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Preference key marking bundle data as already staged by hand.
///
/// When set, the pre-build phase leaves the canonical bundle output where the
/// user placed it instead of staging it automatically.
pub const MANUAL_OVERRIDE_KEY: &str = "bundles-manually-staged";

/// String-keyed boolean preferences persisted by the host environment.
///
/// Unknown keys read as `false`, matching the host convention that an unset
/// preference is indistinguishable from one explicitly disabled.
pub trait PreferenceStore {
  /// Current value for `key`, defaulting to `false` when never set.
  fn get_bool(&self, key: &str) -> bool;

  /// Record a new value for `key`.
  fn set_bool(&mut self, key: &str, value: bool);
}

/// In-memory preference store, useful for tests and one-shot invocations.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
  values: BTreeMap<String, bool>,
}

impl PreferenceStore for MemoryPreferences {
  fn get_bool(&self, key: &str) -> bool {
    self.values.get(key).copied().unwrap_or(false)
  }

  fn set_bool(&mut self, key: &str, value: bool) {
    self.values.insert(key.to_string(), value);
  }
}

/// Preference store backed by a JSON file of key/value pairs.
#[derive(Debug, Clone)]
pub struct FilePreferences {
  path: PathBuf,
  values: BTreeMap<String, bool>,
}

/// Errors that can occur while loading or saving the preference file.
#[derive(Debug)]
pub enum PreferenceStoreError {
  /// Failed to read or write the preference file on disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON preference file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl FilePreferences {
  /// Load preferences from the given file if present.
  ///
  /// A missing file is not an error and loads as an empty store; saving later
  /// creates it.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, PreferenceStoreError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self {
          path: path.to_path_buf(),
          values: BTreeMap::new(),
        });
      }
      Err(err) => {
        return Err(PreferenceStoreError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let values: BTreeMap<String, bool> =
      serde_json::from_str(&contents).map_err(|err| PreferenceStoreError::Parse {
        path: path.to_path_buf(),
        source: err,
      })?;
    Ok(Self {
      path: path.to_path_buf(),
      values,
    })
  }

  /// Write the current values back to the file this store was loaded from.
  pub fn save(&self) -> Result<(), PreferenceStoreError> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(|err| PreferenceStoreError::Io {
          path: self.path.clone(),
          source: err,
        })?;
      }
    }

    let contents = serde_json::to_string_pretty(&self.values).expect("preference map serialises");
    fs::write(&self.path, contents).map_err(|err| PreferenceStoreError::Io {
      path: self.path.clone(),
      source: err,
    })
  }

  /// Path of the backing file.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl PreferenceStore for FilePreferences {
  fn get_bool(&self, key: &str) -> bool {
    self.values.get(key).copied().unwrap_or(false)
  }

  fn set_bool(&mut self, key: &str, value: bool) {
    self.values.insert(key.to_string(), value);
  }
}

impl std::fmt::Display for PreferenceStoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to access {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for PreferenceStoreError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}
