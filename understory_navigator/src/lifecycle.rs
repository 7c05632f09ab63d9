// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene lifecycle: enter/exit hooks run after each commit.
//!
//! ## Usage
//!
//! 1) Register [`SceneHooks`] for a scene with
//!    [`Navigator::register_scene`](crate::navigator::Navigator::register_scene).
//! 2) Navigate. Every commit schedules one scheduler run on the navigator's [`Spawner`](crate::spawn::Spawner).
//! 3) The run calls [`plan`] on the current [`Snapshot`], marks the due steps as executed,
//!    starts the previous scene's exit hook, then awaits the current scene's enter hook
//!    and calls `success` or `failure`.
//!
//! Guards are per commit: a second run for the same commit finds both flags
//! set and does nothing.
//!
//! ## Minimal example
//!
//! ```
//! use understory_navigator::lifecycle::{LifecyclePlan, plan};
//! use understory_navigator::types::Snapshot;
//!
//! let snapshot = Snapshot {
//!     prev_scene: Some("Home".into()),
//!     current_scene: Some("Detail".into()),
//!     ..Default::default()
//! };
//! assert_eq!(
//!     plan(&snapshot, |scene| scene == "Detail"),
//!     LifecyclePlan { exit: Some("Home".into()), enter: Some("Detail".into()) }
//! );
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use serde_json::Value;
use understory_route_tree::Params;

use crate::error::HookError;
use crate::navigator::{Navigator, panic_message};
use crate::normalize::is_truthy;
use crate::types::{HookFlags, Snapshot};

type EnterFn = Box<dyn Fn(Params) -> LocalBoxFuture<'static, Result<Value, HookError>>>;
type ExitFn = Box<dyn Fn() -> LocalBoxFuture<'static, Result<(), HookError>>>;
type SuccessFn = Box<dyn Fn(Value)>;
type FailureFn = Box<dyn Fn(Option<HookError>)>;

/// Hooks registered for one scene.
///
/// All four are optional. `on_enter` resolves to a value: truthy values go to
/// `success`, falsy values call `failure(None)`, and errors call `failure(Some(err))`.
#[derive(Default)]
pub struct SceneHooks {
    on_enter: Option<EnterFn>,
    on_exit: Option<ExitFn>,
    success: Option<SuccessFn>,
    failure: Option<FailureFn>,
}

impl core::fmt::Debug for SceneHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneHooks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("success", &self.success.is_some())
            .field("failure", &self.failure.is_some())
            .finish()
    }
}

impl SceneHooks {
    /// No hooks. Registering this still makes the scene eligible for enter handling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Async enter hook; receives the scene's params at call time.
    #[must_use]
    pub fn on_enter<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Params) -> Fut + 'static,
        Fut: Future<Output = Result<Value, HookError>> + 'static,
    {
        self.on_enter = Some(Box::new(move |params| f(params).boxed_local()));
        self
    }

    /// Synchronous enter hook.
    #[must_use]
    pub fn on_enter_sync<F>(self, f: F) -> Self
    where
        F: Fn(Params) -> Result<Value, HookError> + 'static,
    {
        self.on_enter(move |params| future::ready(f(params)))
    }

    /// Async exit hook. Its outcome is only logged.
    #[must_use]
    pub fn on_exit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), HookError>> + 'static,
    {
        self.on_exit = Some(Box::new(move || f().boxed_local()));
        self
    }

    /// Synchronous exit hook.
    #[must_use]
    pub fn on_exit_sync<F>(self, f: F) -> Self
    where
        F: Fn() -> Result<(), HookError> + 'static,
    {
        self.on_exit(move || future::ready(f()))
    }

    /// Continuation for a truthy enter result.
    #[must_use]
    pub fn success(mut self, f: impl Fn(Value) + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    /// Continuation for a falsy enter result (`None`) or an enter error (`Some`).
    #[must_use]
    pub fn failure(mut self, f: impl Fn(Option<HookError>) + 'static) -> Self {
        self.failure = Some(Box::new(f));
        self
    }

    fn succeed(&self, value: Value) {
        if let Some(success) = &self.success {
            success(value);
        }
    }

    fn fail(&self, error: Option<HookError>) {
        if let Some(failure) = &self.failure {
            failure(error);
        }
    }
}

/// Hook registrations keyed by scene name.
#[derive(Debug, Default)]
pub struct HookTable {
    scenes: HashMap<String, Rc<SceneHooks>>,
}

impl HookTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) hooks for `scene`.
    pub fn insert(&mut self, scene: impl Into<String>, hooks: SceneHooks) {
        self.scenes.insert(scene.into(), Rc::new(hooks));
    }

    /// Remove hooks for `scene`, returning whether it was registered.
    pub fn remove(&mut self, scene: &str) -> bool {
        self.scenes.remove(scene).is_some()
    }

    /// Hooks for `scene`. The `Rc` lets callers release the table before invoking them.
    pub fn get(&self, scene: &str) -> Option<Rc<SceneHooks>> {
        self.scenes.get(scene).cloned()
    }

    /// Returns true if `scene` has an entry.
    pub fn contains(&self, scene: &str) -> bool {
        self.scenes.contains_key(scene)
    }
}

/// Steps a scheduler run should take for the current commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecyclePlan {
    /// Scene whose exit hook is due.
    pub exit: Option<String>,
    /// Scene whose enter hook is due.
    pub enter: Option<String>,
}

impl LifecyclePlan {
    /// Returns true when nothing is due.
    pub fn is_empty(&self) -> bool {
        self.exit.is_none() && self.enter.is_none()
    }

    /// Flags to set before running the planned steps.
    pub fn claimed_flags(&self) -> HookFlags {
        let mut flags = HookFlags::empty();
        flags.set(HookFlags::EXIT_EXECUTED, self.exit.is_some());
        flags.set(HookFlags::ENTER_EXECUTED, self.enter.is_some());
        flags
    }
}

/// Decide which hooks are due for `snapshot`.
///
/// - Exit is due when there is a previous scene, it differs from the current
///   scene, and the exit guard is clear.
/// - Enter is due when there is a current scene, it differs from the previous
///   scene, it has a hook-table entry, and the enter guard is clear.
pub fn plan(snapshot: &Snapshot, has_entry: impl Fn(&str) -> bool) -> LifecyclePlan {
    let prev = snapshot.prev_scene.as_deref();
    let current = snapshot.current_scene.as_deref();
    let exit = match prev {
        Some(prev)
            if current != Some(prev) && !snapshot.flags.contains(HookFlags::EXIT_EXECUTED) =>
        {
            Some(prev.to_owned())
        }
        _ => None,
    };
    let enter = match current {
        Some(current)
            if prev != Some(current)
                && has_entry(current)
                && !snapshot.flags.contains(HookFlags::ENTER_EXECUTED) =>
        {
            Some(current.to_owned())
        }
        _ => None,
    };
    LifecyclePlan { exit, enter }
}

/// One scheduler run. Never fails; errors end up in logs or `failure` continuations.
pub(crate) async fn react(nav: Navigator) {
    let (steps, generation) = nav.claim_lifecycle();
    if steps.is_empty() {
        return;
    }

    if let Some(scene) = steps.exit
        && let Some(hooks) = nav.hooks_for(&scene)
        && let Some(on_exit) = &hooks.on_exit
    {
        // Started now, completed whenever; the enter hook does not wait for it.
        match std::panic::catch_unwind(AssertUnwindSafe(on_exit)) {
            Ok(exit) => nav.spawn_detached(async move {
                if let Err(err) = exit.await {
                    tracing::error!(scene = %scene, error = %err, "error during exit hook");
                }
            }),
            Err(panic) => {
                tracing::error!(
                    scene = %scene,
                    panic = panic_message(&*panic),
                    "exit hook panicked"
                );
            }
        }
    }

    let Some(scene) = steps.enter else {
        return;
    };
    let Some(hooks) = nav.hooks_for(&scene) else {
        return;
    };
    let Some(on_enter) = &hooks.on_enter else {
        return;
    };
    let params = nav.leaf_params().unwrap_or_default();
    tracing::debug!(scene = %scene, generation, "running enter hook");
    let outcome = AssertUnwindSafe(async { on_enter(params).await })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            let message = panic_message(&*panic);
            tracing::error!(scene = %scene, panic = message, "enter hook panicked");
            Err(HookError::failed(message))
        });

    if nav.config().discard_stale_completions && nav.generation() != generation {
        tracing::warn!(
            scene = %scene,
            generation,
            current = nav.generation(),
            "discarding stale enter hook completion"
        );
        return;
    }
    match outcome {
        Ok(value) if is_truthy(&value) => hooks.succeed(value),
        Ok(_) => hooks.fail(None),
        Err(err) => {
            tracing::debug!(scene = %scene, error = %err, "enter hook failed");
            hooks.fail(Some(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(prev: Option<&str>, current: Option<&str>, flags: HookFlags) -> Snapshot {
        Snapshot {
            prev_scene: prev.map(Into::into),
            current_scene: current.map(Into::into),
            flags,
            ..Default::default()
        }
    }

    fn registered(scene: &str) -> bool {
        scene != "Unregistered"
    }

    // First commit: nothing to exit, enter the initial scene.
    #[test]
    fn initial_commit_enters_only() {
        let p = plan(&snapshot(None, Some("A"), HookFlags::empty()), registered);
        assert_eq!(
            p,
            LifecyclePlan {
                exit: None,
                enter: Some("A".into())
            }
        );
        assert_eq!(p.claimed_flags(), HookFlags::ENTER_EXECUTED);
    }

    // Scene change: exit old, enter new.
    #[test]
    fn scene_change_exits_then_enters() {
        let p = plan(&snapshot(Some("A"), Some("B"), HookFlags::empty()), registered);
        assert_eq!(p.exit.as_deref(), Some("A"));
        assert_eq!(p.enter.as_deref(), Some("B"));
        assert_eq!(p.claimed_flags(), HookFlags::all());
    }

    // Same scene on both sides (refresh, repeated push of the same name): nothing.
    #[test]
    fn same_scene_runs_nothing() {
        let p = plan(&snapshot(Some("A"), Some("A"), HookFlags::empty()), registered);
        assert!(p.is_empty());
    }

    // Guards already claimed by an earlier run for this commit.
    #[test]
    fn claimed_flags_block_repeat_runs() {
        let p = plan(&snapshot(Some("A"), Some("B"), HookFlags::all()), registered);
        assert!(p.is_empty());
        let p = plan(
            &snapshot(Some("A"), Some("B"), HookFlags::EXIT_EXECUTED),
            registered,
        );
        assert_eq!(p.exit, None);
        assert_eq!(p.enter.as_deref(), Some("B"));
    }

    // Enter requires a registration; exit does not.
    #[test]
    fn unregistered_scene_is_not_entered() {
        let p = plan(
            &snapshot(Some("A"), Some("Unregistered"), HookFlags::empty()),
            registered,
        );
        assert_eq!(p.exit.as_deref(), Some("A"));
        assert_eq!(p.enter, None);
    }

    #[test]
    fn hook_table_registration() {
        let mut table = HookTable::new();
        assert!(!table.contains("A"));
        table.insert("A", SceneHooks::new().success(|_| {}));
        assert!(table.contains("A"));
        assert!(table.get("A").is_some_and(|h| h.success.is_some()));
        assert!(table.remove("A"));
        assert!(!table.remove("A"));
    }
}
