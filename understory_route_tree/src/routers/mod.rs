// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference [`Router`](crate::router::Router) implementations.
//!
//! - `stack`: a flat stack; `navigate` pushes, `back` pops, `reset` rebuilds.
//! - `tab`: a fixed set of named tabs; `navigate` switches, each tab may host a child router.
//!
//! Both answer `set_params` the same way: merge into the route carrying the key,
//! or into the active leaf when no key is given.

mod stack;
mod tab;

pub use stack::StackRouter;
pub use tab::TabRouter;

use crate::resolve::{active_leaf_mut, find_by_key_mut};
use crate::types::{Params, RouteTreeState};

/// Shallow merge: keys in `params` override keys already present.
pub(crate) fn merge_params(target: &mut Option<Params>, params: &Params) {
    let merged = target.get_or_insert_with(Params::new);
    for (k, v) in params {
        merged.insert(k.clone(), v.clone());
    }
}

pub(crate) fn set_params(
    state: &RouteTreeState,
    key: Option<&str>,
    params: &Params,
) -> Option<RouteTreeState> {
    let mut next = state.clone();
    let target = match key {
        Some(key) => find_by_key_mut(&mut next, key)?,
        None => active_leaf_mut(&mut next),
    };
    merge_params(&mut target.params, params);
    Some(next)
}
