//! Build context describing the player build a host pipeline is producing.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Platform a player build targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum BuildTarget {
  /// 32-bit Windows standalone player.
  Windows,
  /// 64-bit Windows standalone player.
  Windows64,
  /// macOS standalone player.
  MacOs,
  /// 64-bit Linux standalone player.
  Linux64,
  /// Xbox One player deployed through the development kit tooling.
  XboxOne,
  /// PS4 player deployed through the development kit tooling.
  Ps4,
  /// Android application package.
  Android,
  /// iOS application bundle.
  Ios,
  /// WebGL player served over HTTP.
  WebGl,
}

/// How a console build is delivered to the hardware that runs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeployMethod {
  /// Build output is pushed onto the device before launch.
  Push,
  /// Device pulls the build output on demand.
  Pull,
  /// Build runs directly from the host workstation's filesystem.
  RunFromHost,
}

/// Build subtarget for consoles that can run packages hosted on the workstation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConsoleSubtarget {
  /// Self-contained package installed on the device.
  Package,
  /// Build content remains on the workstation and is served to the device.
  PcHosted,
}

/// Immutable description of one player build, supplied by the host pipeline.
///
/// The same context is handed to both lifecycle callbacks of a build, so every
/// path derived from it is stable between the pre- and post-build phases.
#[derive(Clone, Debug)]
pub struct BuildContext {
  /// Platform the player is being built for.
  pub target: BuildTarget,
  /// Path of the build output as reported by the host, e.g. the executable
  /// path for desktop targets or the output directory for consoles.
  pub output_path: PathBuf,
  /// Deployment method for targets that distinguish push and host-mediated
  /// delivery; `None` for targets without the concept.
  pub deploy_method: Option<DeployMethod>,
  /// Console build subtarget, when the target exposes one.
  pub subtarget: Option<ConsoleSubtarget>,
}

impl BuildContext {
  /// Create a context for the given target and host-reported output path.
  pub fn new(target: BuildTarget, output_path: impl Into<PathBuf>) -> Self {
    Self {
      target,
      output_path: output_path.into(),
      deploy_method: None,
      subtarget: None,
    }
  }

  /// Attach the deployment method reported by the host.
  pub fn with_deploy_method(mut self, method: DeployMethod) -> Self {
    self.deploy_method = Some(method);
    self
  }

  /// Attach the console subtarget reported by the host.
  pub fn with_subtarget(mut self, subtarget: ConsoleSubtarget) -> Self {
    self.subtarget = Some(subtarget);
    self
  }

  /// Directory containing the build output.
  ///
  /// Desktop hosts report the player executable itself as the output path, so
  /// relocation targets are derived from its parent directory.
  pub fn output_dir(&self) -> &Path {
    match self.output_path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn output_dir_strips_the_executable_name() {
    let context = BuildContext::new(BuildTarget::Windows64, "C:/Build/Game.exe");
    assert_eq!(context.output_dir(), Path::new("C:/Build"));
  }

  #[test]
  fn output_dir_of_a_bare_name_is_the_current_directory() {
    let context = BuildContext::new(BuildTarget::Windows64, "Game.exe");
    assert_eq!(context.output_dir(), Path::new("."));
  }
}
