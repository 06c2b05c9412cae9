#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod fsops;
pub mod hooks;
pub mod layout;
pub mod platform;
pub mod prefs;
pub mod relocate;

pub use config::ProjectConfig;
pub use context::{BuildContext, BuildTarget, ConsoleSubtarget, DeployMethod};
pub use hooks::{BuildHook, HookRegistry};
pub use layout::{ProjectLayout, RelocationPaths};
pub use platform::TargetPathTable;
pub use prefs::{FilePreferences, MANUAL_OVERRIDE_KEY, MemoryPreferences, PreferenceStore};
pub use relocate::BundleRelocator;
