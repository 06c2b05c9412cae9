//! Command-line adapter letting external build pipelines fire the relocation
//! hooks as subprocess steps.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use bundle_relocation_hooks::{
    BuildContext, BuildTarget, BundleRelocator, ConsoleSubtarget, DeployMethod, FilePreferences,
    MANUAL_OVERRIDE_KEY, PreferenceStore, ProjectConfig,
};

#[derive(Parser)]
#[command(name = "bundle-relocation-hooks", version, about)]
struct Cli {
    /// Project root containing the bundle build and streaming-assets directories.
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stage bundle data before the host build runs.
    PreBuild(BuildArgs),
    /// Restore staging and place bundle data in the player output.
    PostBuild(BuildArgs),
    /// Delete staged bundle data left behind by an interrupted build.
    CleanStaging,
    /// Mark bundle data as manually staged, clear the mark, or print it.
    ManualOverride {
        /// New state; omit to print the current state.
        #[arg(value_enum)]
        state: Option<OverrideState>,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Platform the player is being built for.
    #[arg(long, value_enum)]
    target: BuildTarget,

    /// Build output path as reported by the host pipeline.
    #[arg(long)]
    output: PathBuf,

    /// Deployment method, for targets that distinguish one.
    #[arg(long, value_enum)]
    deploy_method: Option<DeployMethod>,

    /// Console build subtarget, for targets that expose one.
    #[arg(long, value_enum)]
    subtarget: Option<ConsoleSubtarget>,
}

impl BuildArgs {
    fn into_context(self) -> BuildContext {
        let mut context = BuildContext::new(self.target, self.output);
        if let Some(method) = self.deploy_method {
            context = context.with_deploy_method(method);
        }
        if let Some(subtarget) = self.subtarget {
            context = context.with_subtarget(subtarget);
        }
        context
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OverrideState {
    /// Trust manual placement; pre-build staging is skipped.
    On,
    /// Stage automatically on every build.
    Off,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = ProjectConfig::discover(&cli.project_dir);
    let prefs_path = config.preferences_path(&cli.project_dir);

    match cli.command {
        Command::PreBuild(args) => {
            let prefs = FilePreferences::load_from_path(&prefs_path)?;
            let relocator = BundleRelocator::new(config.into_layout(&cli.project_dir), prefs);
            relocator.pre_build(&args.into_context())
        }
        Command::PostBuild(args) => {
            let prefs = FilePreferences::load_from_path(&prefs_path)?;
            let relocator = BundleRelocator::new(config.into_layout(&cli.project_dir), prefs);
            relocator.post_build(&args.into_context())
        }
        Command::CleanStaging => {
            let prefs = FilePreferences::load_from_path(&prefs_path)?;
            let relocator = BundleRelocator::new(config.into_layout(&cli.project_dir), prefs);
            relocator.clean_stale_staging()
        }
        Command::ManualOverride { state } => {
            let mut prefs = FilePreferences::load_from_path(&prefs_path)?;
            match state {
                Some(OverrideState::On) => {
                    prefs.set_bool(MANUAL_OVERRIDE_KEY, true);
                    prefs.save()?;
                }
                Some(OverrideState::Off) => {
                    prefs.set_bool(MANUAL_OVERRIDE_KEY, false);
                    prefs.save()?;
                }
                None => {
                    let state = if prefs.get_bool(MANUAL_OVERRIDE_KEY) {
                        "on"
                    } else {
                        "off"
                    };
                    println!("{state}");
                }
            }
            Ok(())
        }
    }
}
