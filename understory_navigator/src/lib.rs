// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_navigator --heading-base-level=0

//! Understory Navigator: a navigation-state controller for trees of named scenes.
//!
//! ## Overview
//!
//! This crate owns the authoritative navigation state and turns high-level intents
//! (push, pop, replace, reset, jump, pop-to, pop-and-push) into low-level route actions.
//! It does not compute tree transitions itself.
//! Instead, it calls a [`Router`](understory_route_tree::Router) (or an injected
//! [`Reducer`](crate::reducer::Reducer)) and commits what comes back.
//!
//! ## Inputs
//!
//! Every verb takes a scene name and variadic [`ParamArg`](crate::types::ParamArg)s.
//! Params are merged left to right (later keys win) and tagged with `routeName`.
//! Scalars are wrapped under `data`, falsy values are skipped, and platform payloads are dropped.
//! A merged `"type"` string overrides the verb passed to [`Navigator::execute`](crate::navigator::Navigator::execute).
//!
//! ## Commit
//!
//! A commit stores the new tree, shifts the active scene into `prev_scene`, clears the
//! lifecycle guards, and derives `current_scene`/`current_params` from the active leaf.
//! A `null` transition (the router declined) changes nothing.
//! A jump to the scene that is already active changes nothing.
//!
//! ## Lifecycle
//!
//! After a commit the navigator spawns one lifecycle run on its [`Spawner`](crate::spawn::Spawner).
//! The run starts the previous scene's exit hook, then awaits the new scene's enter hook and
//! calls its `success` or `failure` continuation. The verb call has already returned by then.
//! Hook errors never reach the caller: exit errors are logged, enter errors become `failure`.
//!
//! ## Workflow
//!
//! 1) Pick a router, for example a [`StackRouter`](understory_route_tree::routers::StackRouter),
//!    or a [`TabRouter`](understory_route_tree::routers::TabRouter) with nested stacks.
//! 2) Build a [`Navigator`](crate::navigator::Navigator) with a spawner bound to your event loop.
//!    It dispatches `init` immediately.
//! 3) Register [`SceneHooks`](crate::lifecycle::SceneHooks) for scenes that need enter/exit work.
//! 4) Navigate, and let the executor run between input events.
//!
//! ## Example
//!
//! ```
//! use futures::executor::LocalPool;
//! use serde_json::json;
//! use understory_navigator::navigator::Navigator;
//! use understory_navigator::lifecycle::SceneHooks;
//! use understory_route_tree::routers::StackRouter;
//!
//! let mut pool = LocalPool::new();
//! let router = StackRouter::new("Home", ["Home", "Detail", "Settings"]);
//! let nav = Navigator::new(router, pool.spawner());
//! nav.register_scene(
//!     "Detail",
//!     SceneHooks::new().on_enter_sync(|params| Ok(params["id"].clone())),
//! );
//!
//! nav.push("Detail", &[json!({ "id": 7 }).into()]);
//! nav.push("Settings", &[]);
//! assert_eq!(nav.current_scene().as_deref(), Some("Settings"));
//!
//! nav.pop_to("Home", &[]);
//! assert_eq!(nav.current_scene().as_deref(), Some("Home"));
//! assert_eq!(nav.state().unwrap().routes.len(), 1);
//!
//! // Hooks run when the executor gets a turn.
//! pool.run_until_stalled();
//! ```
//!
//! ## Concurrency
//!
//! Everything runs on one thread. Commits are synchronous; lifecycle runs are the only
//! suspension points. There is no cancellation: an enter hook that resolves after the
//! scene changed again still runs its continuation, unless
//! [`NavigatorConfig::discard_stale_completions`](crate::config::NavigatorConfig::discard_stale_completions)
//! is set.

pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod navigator;
pub mod normalize;
pub mod reducer;
pub mod spawn;
pub mod types;

pub use navigator::{Navigator, NavigatorBuilder};
