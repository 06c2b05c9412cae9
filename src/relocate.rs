//! Pre- and post-build relocation of pre-built bundle data.

use anyhow::Result;

use crate::context::BuildContext;
use crate::fsops;
use crate::hooks::BuildHook;
use crate::layout::{ProjectLayout, RelocationPaths};
use crate::platform::TargetPathTable;
use crate::prefs::{MANUAL_OVERRIDE_KEY, PreferenceStore};

/// Relocates the bundling pipeline's output around a player build.
///
/// Before the build, bundle data is parked inside the streaming-assets area so
/// the engine packs it into the player; after the build it is restored to the
/// canonical location and, for platforms with a fixed player data directory,
/// moved into the final output. Both phases recompute every path from the
/// build context, so repeating a phase is harmless.
pub struct BundleRelocator<P> {
  layout: ProjectLayout,
  targets: TargetPathTable,
  prefs: P,
}

impl<P: PreferenceStore> BundleRelocator<P> {
  /// Create a relocator with the built-in platform rules.
  pub fn new(layout: ProjectLayout, prefs: P) -> Self {
    Self::with_target_table(layout, TargetPathTable::with_builtin_rules(), prefs)
  }

  /// Create a relocator with a custom platform rule table.
  pub fn with_target_table(layout: ProjectLayout, targets: TargetPathTable, prefs: P) -> Self {
    Self {
      layout,
      targets,
      prefs,
    }
  }

  /// The three directories relocation would use for this build.
  pub fn relocation_paths(&self, context: &BuildContext) -> RelocationPaths {
    RelocationPaths {
      source_build_path: self.layout.source_build_path(),
      staging_path: self.layout.staging_path(),
      final_path: self.targets.resolve(context, &self.layout),
    }
  }

  /// Stage bundle data ahead of the host build.
  ///
  /// Platforms with a fixed player data directory are served after the build
  /// instead, so nothing is staged for them. Absence of bundle output means
  /// nothing was built this session and is not an error.
  pub fn pre_build(&self, context: &BuildContext) -> Result<()> {
    let paths = self.relocation_paths(context);
    if paths.final_path.is_some() {
      return Ok(());
    }

    if self.prefs.get_bool(MANUAL_OVERRIDE_KEY) {
      log::info!(
        "bundle data marked as manually staged, leaving {} untouched",
        paths.source_build_path.display()
      );
      return Ok(());
    }

    self.clean_stale_staging()?;

    if !paths.source_build_path.exists() {
      return Ok(());
    }

    log::info!(
      "staging bundle data from {} to {}, restored when the build finishes",
      paths.source_build_path.display(),
      paths.staging_path.display()
    );
    fsops::move_dir(&paths.source_build_path, &paths.staging_path)
  }

  /// Restore staging and place bundle data in the player output.
  ///
  /// Staging cleanup runs unconditionally so leftovers never outlive the
  /// build; the final relocation only happens for platforms that resolved a
  /// fixed player data directory.
  pub fn post_build(&self, context: &BuildContext) -> Result<()> {
    let paths = self.relocation_paths(context);

    if paths.staging_path.exists() {
      if paths.source_build_path.exists() {
        log::warn!(
          "discarding staged bundle data at {}: {} already exists",
          paths.staging_path.display(),
          paths.source_build_path.display()
        );
        fsops::remove_dir_if_exists(&paths.staging_path)?;
      } else {
        log::info!(
          "restoring bundle data from {} to {}",
          paths.staging_path.display(),
          paths.source_build_path.display()
        );
        fsops::move_dir(&paths.staging_path, &paths.source_build_path)?;
      }
    }
    fsops::remove_dir_if_empty(&self.layout.streaming_assets_root())?;

    let Some(final_dir) = paths.final_path else {
      return Ok(());
    };
    if !paths.source_build_path.exists() {
      return Ok(());
    }

    let target = final_dir.join(&self.layout.bundle_subfolder);
    if target.exists() {
      log::warn!("deleting stale bundle data at {}", target.display());
      fsops::remove_dir_if_exists(&target)?;
    }

    log::info!(
      "moving bundle data from {} to {}, bypassing the editor streaming assets",
      paths.source_build_path.display(),
      target.display()
    );
    fsops::move_dir(&paths.source_build_path, &target)
  }

  /// Delete staged bundle data left behind by an interrupted build.
  ///
  /// The streaming-assets root itself is only removed when it ends up empty;
  /// unrelated content the user keeps there survives.
  pub fn clean_stale_staging(&self) -> Result<()> {
    let staging = self.layout.staging_path();
    if fsops::remove_dir_if_exists(&staging)? {
      log::warn!("deleted stale staged bundle data at {}", staging.display());
    }
    fsops::remove_dir_if_empty(&self.layout.streaming_assets_root())?;
    Ok(())
  }
}

impl<P: PreferenceStore> BuildHook for BundleRelocator<P> {
  // Runs after most other hooks so host-assigned output paths are final.
  fn callback_order(&self) -> i32 {
    1
  }

  fn on_pre_build(&self, context: &BuildContext) -> Result<()> {
    self.pre_build(context)
  }

  fn on_post_build(&self, context: &BuildContext) -> Result<()> {
    self.post_build(context)
  }
}
