// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Route Tree: navigation state as a tree of named scenes.
//!
//! ## Overview
//!
//! This crate holds the data a navigation controller reasons about and the seams it calls through.
//! It does not own any state itself.
//!
//! - [`RouteTreeState`](crate::types::RouteTreeState): one node of the navigation tree.
//!   Leaves are scenes; containers hold an ordered list of child routes and the `index` of the active one.
//! - [`active_leaf`](crate::resolve::active_leaf): walks `routes[index]` down to the active scene.
//! - [`RouteAction`](crate::action::RouteAction): the low-level actions a router understands
//!   (`init`, `navigate`, `back`, `reset`, `set_params`).
//! - [`Router`](crate::router::Router): pure transition function from `(action, state)` to the next state,
//!   or `None` when the action is not handled.
//!
//! ## Reference routers
//!
//! [`StackRouter`](crate::routers::StackRouter) and [`TabRouter`](crate::routers::TabRouter) implement
//! [`Router`](crate::router::Router) for the two common container shapes.
//! A tab router can host a stack router per tab, which yields nested trees.
//!
//! ## Minimal example
//!
//! ```
//! use understory_route_tree::action::RouteAction;
//! use understory_route_tree::resolve::active_leaf;
//! use understory_route_tree::router::Router;
//! use understory_route_tree::routers::StackRouter;
//!
//! let router = StackRouter::new("Home", ["Home", "Detail"]);
//! let s0 = router.get_state_for_action(&RouteAction::init(), None).unwrap();
//! let s1 = router
//!     .get_state_for_action(&RouteAction::navigate("Detail", None), Some(&s0))
//!     .unwrap();
//! assert_eq!(active_leaf(&s1).route_name, "Detail");
//!
//! // Back at the root is not handled.
//! assert!(router.get_state_for_action(&RouteAction::back(), Some(&s0)).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod action;
pub mod resolve;
pub mod router;
pub mod routers;
pub mod types;

pub use action::RouteAction;
pub use resolve::active_leaf;
pub use router::Router;
pub use types::{Params, RouteTreeError, RouteTreeState};
