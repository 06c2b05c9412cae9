//! Dispatch of host build events to registered hooks.

use anyhow::Result;

use crate::context::BuildContext;

/// A participant in the host build lifecycle.
///
/// The host invokes every registered hook once before and once after each
/// player build, in ascending [`callback_order`](BuildHook::callback_order).
pub trait BuildHook {
  /// Ordering priority within a phase; lower values run earlier.
  fn callback_order(&self) -> i32 {
    0
  }

  /// Invoked before the host starts building the player.
  fn on_pre_build(&self, context: &BuildContext) -> Result<()>;

  /// Invoked after the host finished building the player.
  fn on_post_build(&self, context: &BuildContext) -> Result<()>;
}

/// Orders and dispatches build hooks for a host pipeline.
///
/// Registration order is preserved between hooks with equal callback order. A
/// failing hook aborts the phase; the host surfaces the error and halts the
/// build.
#[derive(Default)]
pub struct HookRegistry {
  hooks: Vec<Box<dyn BuildHook>>,
}

impl HookRegistry {
  /// Registry with no hooks.
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a hook, keeping the run order sorted by callback order.
  pub fn register(&mut self, hook: Box<dyn BuildHook>) {
    self.hooks.push(hook);
    self.hooks.sort_by_key(|hook| hook.callback_order());
  }

  /// Run the pre-build phase of every registered hook.
  pub fn run_pre_build(&self, context: &BuildContext) -> Result<()> {
    for hook in &self.hooks {
      hook.on_pre_build(context)?;
    }
    Ok(())
  }

  /// Run the post-build phase of every registered hook.
  pub fn run_post_build(&self, context: &BuildContext) -> Result<()> {
    for hook in &self.hooks {
      hook.on_post_build(context)?;
    }
    Ok(())
  }
}
