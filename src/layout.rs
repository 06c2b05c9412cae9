//! Filesystem layout of bundle data within a project tree.

use std::path::PathBuf;

/// Locations a project keeps its bundle data in, resolved against the project
/// root.
///
/// The bundling pipeline always writes its output to the same canonical
/// directory regardless of build target; the streaming-assets root is the
/// ephemeral area the engine packs into players and must never accumulate
/// leftovers between builds.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
  /// Absolute path of the project root.
  pub project_dir: PathBuf,
  /// Product name used to derive player data directories on desktop targets.
  pub product_name: String,
  /// Canonical bundle output directory, relative to the project root.
  pub source_build_dir: String,
  /// Ephemeral streaming-assets root, relative to the project root.
  pub streaming_assets_dir: String,
  /// Subfolder name bundle data occupies inside staging and player outputs.
  pub bundle_subfolder: String,
}

impl ProjectLayout {
  /// Canonical directory the bundling pipeline writes its output to.
  pub fn source_build_path(&self) -> PathBuf {
    self.project_dir.join(&self.source_build_dir)
  }

  /// Root of the ephemeral streaming-assets area.
  pub fn streaming_assets_root(&self) -> PathBuf {
    self.project_dir.join(&self.streaming_assets_dir)
  }

  /// Staging directory bundle data is parked in while a build runs.
  pub fn staging_path(&self) -> PathBuf {
    self.streaming_assets_root().join(&self.bundle_subfolder)
  }
}

/// The three logical directories involved in relocating one build's bundles.
///
/// Recomputed from the build context on every callback; nothing is cached
/// between the pre- and post-build phases.
#[derive(Debug, Clone)]
pub struct RelocationPaths {
  /// Where the bundling pipeline left its output.
  pub source_build_path: PathBuf,
  /// Where bundle data is parked during the build.
  pub staging_path: PathBuf,
  /// Platform-specific directory the player reads streamed bundles from, or
  /// `None` when the platform consumes the canonical location directly.
  pub final_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  fn layout() -> ProjectLayout {
    ProjectLayout {
      project_dir: PathBuf::from("/project"),
      product_name: "Game".into(),
      source_build_dir: "Library/BundleBuild".into(),
      streaming_assets_dir: "Assets/StreamingAssets".into(),
      bundle_subfolder: "bundles".into(),
    }
  }

  #[test]
  fn staging_lives_inside_the_streaming_assets_root() {
    let layout = layout();
    assert_eq!(
      layout.staging_path(),
      Path::new("/project/Assets/StreamingAssets/bundles")
    );
    assert!(
      layout
        .staging_path()
        .starts_with(layout.streaming_assets_root())
    );
  }

  #[test]
  fn source_build_path_is_project_relative() {
    assert_eq!(
      layout().source_build_path(),
      Path::new("/project/Library/BundleBuild")
    );
  }
}
