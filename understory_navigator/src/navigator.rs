// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator implementation.
//!
//! ## Overview
//!
//! Accepts verbs, normalizes their params, lowers them into route actions,
//! computes the next tree through the router (or a custom reducer), commits it,
//! and schedules the lifecycle hooks.
//!
//! ## Verbs
//!
//! - `push` / `jump` lower to `navigate`. A jump to the active scene is a no-op.
//! - `pop` lowers to `back`, and refreshes the new leaf if the params carry `refresh`.
//! - `replace` / `reset` lower to a single-entry `reset`.
//! - `pop_to` simulates `back` until the named scene is active, then commits once.
//! - `pop_and_push` pops, then pushes.
//! - `refresh` merges params into the active leaf by its key.
//!
//! ## Reducer
//!
//! When a [`Reducer`] is configured it computes every transition instead of the router,
//! sees a blur and a focus action around each commit, and is notified of verbs that
//! take a custom path. Whatever state it returns is adopted.
//!
//! Blur names the scene being left in this commit (`prev_scene` after the shift),
//! not the scene that was `prev_scene` before the commit.
//!
//! ## See Also
//!
//! [`lifecycle`](crate::lifecycle) for what happens after a commit.

use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use futures::FutureExt;
use understory_route_tree::resolve::active_leaf;
use understory_route_tree::{Params, RouteAction, RouteTreeState, Router};

use crate::config::NavigatorConfig;
use crate::engine::Store;
use crate::lifecycle::{self, HookTable, LifecyclePlan, SceneHooks, plan};
use crate::normalize::{
    embedded_verb, filter_param, has_caller_params, is_truthy, lower, unite_params,
};
use crate::reducer::Reducer;
use crate::spawn::Spawner;
use crate::types::{ParamArg, ROUTE_NAME_KEY, ReducerAction, SceneChange, Snapshot, Verb};

struct Shared {
    router: Box<dyn Router>,
    reducer: Option<Box<dyn Reducer>>,
    spawner: Box<dyn Spawner>,
    config: NavigatorConfig,
    store: RefCell<Store>,
    hooks: RefCell<HookTable>,
}

/// Navigation state controller.
///
/// ## Usage
///
/// - Construct with [`Navigator::new`], or with [`Navigator::builder`] to add a
///   reducer, a config, or scene hooks up front.
/// - Call the verb methods ([`push`](Navigator::push), [`pop`](Navigator::pop), ...)
///   or [`execute`](Navigator::execute) with a [`Verb`].
/// - Drive the spawner's executor to let lifecycle hooks run.
///
/// The handle is cheap to clone and single-threaded. Hooks may hold a clone and
/// navigate from inside their continuations.
#[derive(Clone)]
pub struct Navigator {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Navigator")
            .field(
                "snapshot",
                &self
                    .shared
                    .store
                    .try_borrow()
                    .ok()
                    .map(|store| store.snapshot().clone()),
            )
            .field("has_reducer", &self.shared.reducer.is_some())
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
    router: Box<dyn Router>,
    spawner: Box<dyn Spawner>,
    reducer: Option<Box<dyn Reducer>>,
    config: NavigatorConfig,
    hooks: HookTable,
}

impl core::fmt::Debug for NavigatorBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigatorBuilder")
            .field("has_reducer", &self.reducer.is_some())
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl NavigatorBuilder {
    /// Use `reducer` for transitions and notifications.
    #[must_use]
    pub fn reducer(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducer = Some(Box::new(reducer));
        self
    }

    /// Replace the default config.
    #[must_use]
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Register hooks for `scene`.
    #[must_use]
    pub fn scene(mut self, scene: impl Into<String>, hooks: SceneHooks) -> Self {
        self.hooks.insert(scene, hooks);
        self
    }

    /// Build the navigator and dispatch the initial action.
    pub fn build(self) -> Navigator {
        let nav = Navigator {
            shared: Rc::new(Shared {
                router: self.router,
                reducer: self.reducer,
                spawner: self.spawner,
                config: self.config,
                store: RefCell::new(Store::new()),
                hooks: RefCell::new(self.hooks),
            }),
        };
        nav.dispatch(RouteAction::init());
        nav
    }
}

impl Navigator {
    /// Create a navigator with default config and no reducer, and dispatch the initial action.
    pub fn new(router: impl Router + 'static, spawner: impl Spawner + 'static) -> Self {
        Self::builder(router, spawner).build()
    }

    /// Start building a navigator.
    pub fn builder(
        router: impl Router + 'static,
        spawner: impl Spawner + 'static,
    ) -> NavigatorBuilder {
        NavigatorBuilder {
            router: Box::new(router),
            spawner: Box::new(spawner),
            reducer: None,
            config: NavigatorConfig::default(),
            hooks: HookTable::new(),
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &NavigatorConfig {
        &self.shared.config
    }

    /// Committed tree.
    pub fn state(&self) -> Option<RouteTreeState> {
        self.shared.store.borrow().state().cloned()
    }

    /// Derived observables.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.store.borrow().snapshot().clone()
    }

    /// Active scene name.
    pub fn current_scene(&self) -> Option<String> {
        self.shared.store.borrow().snapshot().current_scene.clone()
    }

    /// Scene active before the last commit.
    pub fn prev_scene(&self) -> Option<String> {
        self.shared.store.borrow().snapshot().prev_scene.clone()
    }

    /// Params of the active scene as of the last commit.
    pub fn current_params(&self) -> Option<Params> {
        self.shared.store.borrow().snapshot().current_params.clone()
    }

    /// Active leaf of the committed tree.
    pub fn current_leaf(&self) -> Option<RouteTreeState> {
        self.shared.store.borrow().current_leaf().cloned()
    }

    /// Register (or replace) hooks for `scene`.
    pub fn register_scene(&self, scene: impl Into<String>, hooks: SceneHooks) {
        self.shared.hooks.borrow_mut().insert(scene, hooks);
    }

    /// Remove hooks for `scene`, returning whether it was registered.
    pub fn unregister_scene(&self, scene: &str) -> bool {
        self.shared.hooks.borrow_mut().remove(scene)
    }

    /// Compute the state `action` leads to from `state`, without committing.
    ///
    /// Delegates to the reducer when one is configured, otherwise to the router.
    pub fn compute_next(
        &self,
        state: Option<&RouteTreeState>,
        action: &RouteAction,
    ) -> Option<RouteTreeState> {
        match &self.shared.reducer {
            Some(reducer) => reducer.reduce(state, &ReducerAction::Route(action.clone())),
            None => self.shared.router.get_state_for_action(action, state),
        }
    }

    /// Apply `action` to the committed tree and commit the result.
    pub fn dispatch(&self, action: RouteAction) {
        self.dispatch_with(action, None, None);
    }

    fn dispatch_with(&self, action: RouteAction, verb: Option<Verb>, params: Option<Params>) {
        let next = self.compute_next(self.state().as_ref(), &action);
        if next.is_none() {
            tracing::debug!(action = action.name(), "transition not handled");
        }
        self.set_state(next, verb.as_ref(), params);
    }

    fn reduce_and_adopt(&self, state: &RouteTreeState, action: ReducerAction) {
        let Some(reducer) = &self.shared.reducer else {
            return;
        };
        if let Some(overridden) = reducer.reduce(Some(state), &action) {
            self.shared.store.borrow_mut().adopt(overridden);
        }
    }

    fn set_state(
        &self,
        new_state: Option<RouteTreeState>,
        verb: Option<&Verb>,
        params: Option<Params>,
    ) -> Option<SceneChange> {
        let new_state = new_state?;
        let change = self
            .shared
            .store
            .borrow_mut()
            .commit(new_state.clone(), verb);
        let Some(change) = change else {
            tracing::debug!(scene = ?self.current_scene(), "jump to active scene ignored");
            return None;
        };
        tracing::debug!(
            prev = ?change.prev_scene,
            scene = %change.current_scene,
            generation = change.generation,
            verb = verb.map(Verb::as_str),
            "committed"
        );

        self.reduce_and_adopt(
            &new_state,
            ReducerAction::Blur {
                route_name: change.prev_scene.clone(),
            },
        );

        if verb == Some(&Verb::Jump)
            && let Some(params) = params.filter(has_caller_params)
        {
            self.refresh(params);
        }

        self.reduce_and_adopt(
            &new_state,
            ReducerAction::Focus {
                route_name: Some(change.current_scene.clone()),
                params: active_leaf(&new_state).params.clone(),
            },
        );

        self.schedule_lifecycle();
        Some(change)
    }

    /// Normalize `params`, let an embedded `"type"` override `verb`, and run the matching operation.
    ///
    /// For [`Verb::Refresh`] the `routeName` tag is dropped, so the active leaf keeps its own.
    pub fn execute(&self, verb: Verb, route_name: &str, params: &[ParamArg]) {
        let res = unite_params(route_name, params);
        let verb = embedded_verb(&res).unwrap_or(verb);
        let args = [ParamArg::from(res.clone())];
        match verb {
            Verb::Push | Verb::PushOrPop => self.push(route_name, &args),
            Verb::Jump => self.jump(route_name, &args),
            Verb::Pop | Verb::BackAction | Verb::PopAndReplace => {
                self.pop(Some(ParamArg::from(res)));
            }
            Verb::PopTo => self.pop_to(route_name, &args),
            Verb::Replace => self.replace(route_name, &args),
            Verb::Reset => self.reset(route_name, &args),
            Verb::Refresh => {
                let mut res = res;
                res.remove(ROUTE_NAME_KEY);
                self.refresh(res);
            }
            Verb::PopAndPush => self.pop_and_push(route_name, &args),
            Verb::DrawerOpen => self.drawer_open(),
            Verb::DrawerClose => self.drawer_close(),
            Verb::Init => self.dispatch(RouteAction::Init { params: Some(res) }),
            Verb::Custom(_) => self.run(verb, route_name, &args),
        }
    }

    /// Lower `verb` and commit, or run its custom algorithm.
    ///
    /// Verbs without a single-action lowering (pop-to, pop-and-push, custom verbs)
    /// are also offered to the reducer, and any state it returns is committed.
    pub fn run(&self, verb: Verb, route_name: &str, params: &[ParamArg]) {
        let res = unite_params(route_name, params);
        if let Some(action) = lower(&verb, route_name, &res) {
            self.dispatch_with(action, Some(verb), Some(res));
            return;
        }

        match verb {
            Verb::PopTo => {
                if let Some(found) = self.pop_to_search(route_name) {
                    self.set_state(Some(found), None, None);
                }
            }
            Verb::PopAndPush => {
                self.pop(None);
                self.push(route_name, &[ParamArg::from(res.clone())]);
            }
            Verb::BackAction | Verb::PopAndReplace => self.pop(Some(ParamArg::from(res.clone()))),
            Verb::PushOrPop => self.push(route_name, &[ParamArg::from(res.clone())]),
            Verb::DrawerOpen => self.drawer_open(),
            Verb::DrawerClose => self.drawer_close(),
            Verb::Init => self.dispatch(RouteAction::Init {
                params: Some(res.clone()),
            }),
            Verb::Push
            | Verb::Jump
            | Verb::Pop
            | Verb::Replace
            | Verb::Reset
            | Verb::Refresh
            | Verb::Custom(_) => {}
        }

        if let Some(reducer) = &self.shared.reducer {
            let notify = ReducerAction::Verb {
                verb,
                route_name: route_name.into(),
                params: res,
            };
            let next = reducer.reduce(self.state().as_ref(), &notify);
            self.set_state(next, None, None);
        }
    }

    /// Simulate `back` from the committed tree until `target` is the active leaf.
    ///
    /// Stops with `None` when `back` is not handled, when it makes no progress,
    /// or when the scene the search started from comes up again. Nothing is committed.
    pub fn pop_to_search(&self, target: &str) -> Option<RouteTreeState> {
        let (start_scene, mut cursor) = {
            let store = self.shared.store.borrow();
            (
                store.snapshot().current_scene.clone(),
                store.state()?.clone(),
            )
        };
        let back = RouteAction::back();
        let mut steps = 0_usize;
        loop {
            let Some(next) = self.compute_next(Some(&cursor), &back) else {
                tracing::debug!(route = target, steps, "pop-to exhausted the stack");
                return None;
            };
            steps += 1;
            if next == cursor {
                tracing::debug!(route = target, steps, "pop-to made no progress");
                return None;
            }
            let scene = active_leaf(&next).route_name.as_str();
            if scene == target {
                tracing::debug!(route = target, steps, "pop-to found target");
                return Some(next);
            }
            if Some(scene) == start_scene.as_deref() {
                tracing::debug!(route = target, steps, "pop-to cycled back to start");
                return None;
            }
            cursor = next;
        }
    }

    /// Push `route_name`.
    pub fn push(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::Push, route_name, params);
    }

    /// Switch to `route_name`; a no-op when it is already active.
    pub fn jump(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::Jump, route_name, params);
    }

    /// Go back one step. A truthy `refresh` entry in `params` is applied to the new leaf.
    pub fn pop(&self, params: Option<ParamArg>) {
        let res = params.as_ref().map(filter_param).unwrap_or_default();
        self.dispatch(RouteAction::back());
        if let Some(refresh) = res.get("refresh").filter(|v| is_truthy(v)) {
            self.refresh(filter_param(&ParamArg::Value(refresh.clone())));
        }
    }

    /// Go back to the nearest earlier `route_name`; no-op when it is not on the stack.
    pub fn pop_to(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::PopTo, route_name, params);
    }

    /// Pop, then push `route_name`.
    pub fn pop_and_push(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::PopAndPush, route_name, params);
    }

    /// Reset to a single-entry stack keyed by `route_name`.
    pub fn replace(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::Replace, route_name, params);
    }

    /// Reset to a single-entry stack.
    pub fn reset(&self, route_name: &str, params: &[ParamArg]) {
        self.run(Verb::Reset, route_name, params);
    }

    /// Merge `params` into the active leaf, addressed by its key.
    pub fn refresh(&self, params: Params) {
        let key = self.current_leaf().and_then(|leaf| leaf.key);
        self.dispatch(RouteAction::set_params(key, params));
    }

    /// Navigate to the configured drawer-open route.
    pub fn drawer_open(&self) {
        let route = self.shared.config.drawer_open_route.clone();
        self.dispatch(RouteAction::navigate(route, None));
    }

    /// Navigate to the configured drawer-close route.
    pub fn drawer_close(&self) {
        let route = self.shared.config.drawer_close_route.clone();
        self.dispatch(RouteAction::navigate(route, None));
    }

    /// Schedule one lifecycle run. Safe to call repeatedly; guards make extra runs no-ops.
    pub fn schedule_lifecycle(&self) {
        self.spawn_detached(lifecycle::react(self.clone()));
    }

    pub(crate) fn spawn_detached(&self, task: impl Future<Output = ()> + 'static) {
        let task = AssertUnwindSafe(task).catch_unwind().map(|outcome| {
            if let Err(panic) = outcome {
                tracing::error!(
                    panic = panic_message(&*panic),
                    "lifecycle task panicked"
                );
            }
        });
        if let Err(err) = self.shared.spawner.spawn_local(task.boxed_local()) {
            tracing::error!(error = %err, "lifecycle task dropped");
        }
    }

    /// Plan the due lifecycle steps and mark them executed, atomically.
    pub(crate) fn claim_lifecycle(&self) -> (LifecyclePlan, u64) {
        let hooks = self.shared.hooks.borrow();
        let mut store = self.shared.store.borrow_mut();
        let steps = plan(&store.snapshot, |scene| hooks.contains(scene));
        store.snapshot.flags |= steps.claimed_flags();
        (steps, store.snapshot.generation)
    }

    pub(crate) fn hooks_for(&self, scene: &str) -> Option<Rc<SceneHooks>> {
        self.shared.hooks.borrow().get(scene)
    }

    pub(crate) fn leaf_params(&self) -> Option<Params> {
        self.shared.store.borrow().leaf_params()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.shared.store.borrow().snapshot().generation
    }
}

/// Text of a panic payload, for logs and hook errors.
pub(crate) fn panic_message<'a>(panic: &'a (dyn Any + Send + 'static)) -> &'a str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
