// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition engine store: the committed tree and its derived snapshot.
//!
//! ## Overview
//!
//! [`Store`] owns the authoritative [`RouteTreeState`] and the [`Snapshot`] derived from it.
//! A commit is synchronous and atomic: it stores the tree, shifts
//! `current_scene` into `prev_scene`, clears the lifecycle guards, and reports a
//! [`SceneChange`] for the scheduler.
//!
//! Reducer notifications and the jump refresh are layered on top by the
//! [`navigator`](crate::navigator), which owns the reducer and the router.

use understory_route_tree::resolve::active_leaf;
use understory_route_tree::{Params, RouteTreeState};

use crate::types::{HookFlags, SceneChange, Snapshot, Verb};

/// Committed navigation state.
#[derive(Clone, Debug, Default)]
pub struct Store {
    state: Option<RouteTreeState>,
    pub(crate) snapshot: Snapshot,
}

impl Store {
    /// Create an empty store. Nothing is active until the first commit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed tree, if any.
    pub fn state(&self) -> Option<&RouteTreeState> {
        self.state.as_ref()
    }

    /// Derived observables.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Active leaf of the committed tree.
    pub fn current_leaf(&self) -> Option<&RouteTreeState> {
        self.state.as_ref().map(active_leaf)
    }

    /// Params of the active leaf, resolved now rather than taken from the snapshot.
    pub fn leaf_params(&self) -> Option<Params> {
        self.current_leaf().and_then(|leaf| leaf.params.clone())
    }

    /// Commit `new_state` and derive the snapshot.
    ///
    /// A [`Verb::Jump`] whose resolved leaf is already the current scene is a
    /// no-op and returns `None` without touching anything.
    pub fn commit(
        &mut self,
        new_state: RouteTreeState,
        verb: Option<&Verb>,
    ) -> Option<SceneChange> {
        let leaf = active_leaf(&new_state);
        if verb == Some(&Verb::Jump)
            && self.snapshot.current_scene.as_deref() == Some(leaf.route_name.as_str())
        {
            return None;
        }
        let current_scene = leaf.route_name.clone();
        let current_params = leaf.params.clone();

        self.state = Some(new_state);
        self.snapshot.prev_scene = self.snapshot.current_scene.take();
        self.snapshot.flags = HookFlags::empty();
        self.snapshot.current_scene = Some(current_scene.clone());
        self.snapshot.current_params = current_params;
        self.snapshot.generation += 1;

        Some(SceneChange {
            prev_scene: self.snapshot.prev_scene.clone(),
            current_scene,
            generation: self.snapshot.generation,
        })
    }

    /// Replace the committed tree without deriving a new snapshot.
    ///
    /// Used when a reducer overrides the tree during blur/focus.
    pub fn adopt(&mut self, state: RouteTreeState) {
        self.state = Some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(names: &[&str]) -> RouteTreeState {
        let routes = names
            .iter()
            .enumerate()
            .map(|(i, n)| RouteTreeState::leaf(*n).with_key(format!("{n}-{i}")))
            .collect::<Vec<_>>();
        RouteTreeState::container("stack", routes.len() - 1, routes)
    }

    #[test]
    fn commit_shifts_scenes_and_clears_flags() {
        let mut store = Store::new();
        let first = store.commit(stack(&["A"]), None).unwrap();
        assert_eq!(first.prev_scene, None);
        assert_eq!(first.current_scene, "A");
        assert_eq!(first.generation, 1);

        store.snapshot.flags = HookFlags::all();
        let second = store.commit(stack(&["A", "B"]), Some(&Verb::Push)).unwrap();
        assert_eq!(second.prev_scene.as_deref(), Some("A"));
        assert_eq!(second.current_scene, "B");
        assert_eq!(store.snapshot().flags, HookFlags::empty());
        assert_eq!(store.snapshot().generation, 2);
        assert_eq!(store.current_leaf().unwrap().key.as_deref(), Some("B-1"));
    }

    #[test]
    fn jump_to_current_scene_is_a_no_op() {
        let mut store = Store::new();
        store.commit(stack(&["A"]), None);
        store.commit(stack(&["A", "B"]), None);
        let before = store.snapshot().clone();
        assert!(store.commit(stack(&["A", "B", "B"]), Some(&Verb::Jump)).is_none());
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.state().unwrap().routes.len(), 2);
    }

    #[test]
    fn same_scene_without_jump_still_commits() {
        let mut store = Store::new();
        store.commit(stack(&["A"]), None);
        let change = store.commit(stack(&["A"]), None).unwrap();
        assert!(!change.scene_changed());
        assert_eq!(store.snapshot().prev_scene.as_deref(), Some("A"));
    }

    #[test]
    fn adopt_keeps_snapshot() {
        let mut store = Store::new();
        store.commit(stack(&["A"]), None);
        let before = store.snapshot().clone();
        store.adopt(stack(&["A", "Z"]));
        assert_eq!(store.snapshot(), &before);
        assert_eq!(store.current_leaf().unwrap().route_name, "Z");
    }
}
