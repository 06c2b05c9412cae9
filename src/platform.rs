//! Lookup table mapping build targets to fixed player data directories.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::context::{BuildContext, BuildTarget, ConsoleSubtarget, DeployMethod};
use crate::layout::ProjectLayout;

/// Resolver consulted for one build target.
///
/// Returning `None` means the platform stages streamed assets itself and no
/// relocation into the player output is required.
pub type TargetPathRule = fn(&BuildContext, &ProjectLayout) -> Option<PathBuf>;

/// Capability table answering where a platform's player reads streamed bundle
/// data from.
///
/// Targets without a registered rule resolve to `None`; that is a valid
/// result, not an error. Rules are pure functions of the build context and
/// project layout and perform no I/O.
#[derive(Debug, Clone)]
pub struct TargetPathTable {
  rules: BTreeMap<BuildTarget, TargetPathRule>,
}

impl TargetPathTable {
  /// Table with no rules registered; every target resolves to `None`.
  pub fn empty() -> Self {
    Self {
      rules: BTreeMap::new(),
    }
  }

  /// Table covering the targets whose players read bundle data from a fixed
  /// location in the build output.
  pub fn with_builtin_rules() -> Self {
    let mut table = Self::empty();
    table.register(BuildTarget::Windows, desktop_player_data_dir);
    table.register(BuildTarget::Windows64, desktop_player_data_dir);
    table.register(BuildTarget::XboxOne, host_deployed_data_dir);
    table.register(BuildTarget::Ps4, pc_hosted_media_dir);
    table
  }

  /// Register or replace the rule for a target.
  pub fn register(&mut self, target: BuildTarget, rule: TargetPathRule) {
    self.rules.insert(target, rule);
  }

  /// Resolve the fixed player data directory for the given build, if any.
  pub fn resolve(&self, context: &BuildContext, layout: &ProjectLayout) -> Option<PathBuf> {
    let rule = self.rules.get(&context.target)?;
    rule(context, layout)
  }
}

impl Default for TargetPathTable {
  fn default() -> Self {
    Self::with_builtin_rules()
  }
}

/// Desktop players read streamed assets from `<product>_Data/StreamingAssets`
/// next to the executable.
fn desktop_player_data_dir(context: &BuildContext, layout: &ProjectLayout) -> Option<PathBuf> {
  Some(
    context
      .output_dir()
      .join(format!("{}_Data", layout.product_name))
      .join("StreamingAssets"),
  )
}

/// Consoles whose deployment is mediated by the host workstation read staged
/// data out of the build output; device-pulled deployments stage themselves.
fn host_deployed_data_dir(context: &BuildContext, layout: &ProjectLayout) -> Option<PathBuf> {
  match context.deploy_method {
    Some(DeployMethod::Push) | Some(DeployMethod::RunFromHost) => Some(
      context
        .output_path
        .join(&layout.product_name)
        .join("Data")
        .join("StreamingAssets"),
    ),
    _ => None,
  }
}

/// PC-hosted console builds keep media on the workstation; packaged builds
/// stage their own data.
fn pc_hosted_media_dir(context: &BuildContext, _layout: &ProjectLayout) -> Option<PathBuf> {
  match context.subtarget {
    Some(ConsoleSubtarget::PcHosted) => {
      Some(context.output_path.join("Media").join("StreamingAssets"))
    }
    _ => None,
  }
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
  fn desktop_targets_resolve_next_to_the_executable() {
    let table = TargetPathTable::with_builtin_rules();
    let context = BuildContext::new(BuildTarget::Windows64, "C:/Build/Game.exe");
    assert_eq!(
      table.resolve(&context, &layout()),
      Some(PathBuf::from("C:/Build/Game_Data/StreamingAssets"))
    );
  }

  #[test]
  fn desktop_resolution_ignores_the_deploy_method() {
    let table = TargetPathTable::with_builtin_rules();
    let context = BuildContext::new(BuildTarget::Windows, "C:/Build/Game.exe")
      .with_deploy_method(DeployMethod::Pull);
    assert_eq!(
      table.resolve(&context, &layout()),
      Some(PathBuf::from("C:/Build/Game_Data/StreamingAssets"))
    );
  }

  #[test]
  fn host_mediated_console_deployments_resolve_a_staged_path() {
    let table = TargetPathTable::with_builtin_rules();
    for method in [DeployMethod::Push, DeployMethod::RunFromHost] {
      let context = BuildContext::new(BuildTarget::XboxOne, "/builds/xb").with_deploy_method(method);
      assert_eq!(
        table.resolve(&context, &layout()),
        Some(PathBuf::from("/builds/xb/Game/Data/StreamingAssets"))
      );
    }
  }

  #[test]
  fn device_pulled_console_deployments_resolve_to_none() {
    let table = TargetPathTable::with_builtin_rules();
    let pulled =
      BuildContext::new(BuildTarget::XboxOne, "/builds/xb").with_deploy_method(DeployMethod::Pull);
    assert_eq!(table.resolve(&pulled, &layout()), None);

    let unspecified = BuildContext::new(BuildTarget::XboxOne, "/builds/xb");
    assert_eq!(table.resolve(&unspecified, &layout()), None);
  }

  #[test]
  fn pc_hosted_subtarget_resolves_the_media_path() {
    let table = TargetPathTable::with_builtin_rules();
    let hosted = BuildContext::new(BuildTarget::Ps4, "/builds/ps4")
      .with_subtarget(ConsoleSubtarget::PcHosted);
    assert_eq!(
      table.resolve(&hosted, &layout()),
      Some(PathBuf::from("/builds/ps4/Media/StreamingAssets"))
    );

    let packaged =
      BuildContext::new(BuildTarget::Ps4, "/builds/ps4").with_subtarget(ConsoleSubtarget::Package);
    assert_eq!(table.resolve(&packaged, &layout()), None);
  }

  #[test]
  fn unregistered_targets_resolve_to_none() {
    let table = TargetPathTable::with_builtin_rules();
    for target in [
      BuildTarget::MacOs,
      BuildTarget::Linux64,
      BuildTarget::Android,
      BuildTarget::Ios,
      BuildTarget::WebGl,
    ] {
      let context = BuildContext::new(target, "/builds/out");
      assert_eq!(table.resolve(&context, &layout()), None);
    }
  }

  #[test]
  fn registered_rules_can_be_replaced() {
    let mut table = TargetPathTable::empty();
    table.register(BuildTarget::Linux64, |context, _layout| {
      Some(context.output_dir().join("data"))
    });
    let context = BuildContext::new(BuildTarget::Linux64, "/builds/game.x86_64");
    assert_eq!(
      table.resolve(&context, &layout()),
      Some(Path::new("/builds/data").to_path_buf())
    );
  }
}
