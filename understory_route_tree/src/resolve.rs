// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-leaf resolution and key lookup.
//!
//! Resolution never panics: a container whose `index` is missing or out of
//! bounds is treated as the end of the active branch. Use
//! [`RouteTreeState::validate`] to reject such trees up front.

use alloc::vec::Vec;

use crate::types::RouteTreeState;

/// Descend `routes[index]` until a node without children is reached.
pub fn active_leaf(state: &RouteTreeState) -> &RouteTreeState {
    match state.active_child() {
        Some(child) => active_leaf(child),
        None => state,
    }
}

/// Mutable variant of [`active_leaf`].
pub fn active_leaf_mut(state: &mut RouteTreeState) -> &mut RouteTreeState {
    match state.index {
        Some(i) if i < state.routes.len() => active_leaf_mut(&mut state.routes[i]),
        _ => state,
    }
}

/// Root-to-leaf path of the active branch (inclusive on both ends).
pub fn active_path(state: &RouteTreeState) -> Vec<&RouteTreeState> {
    let mut out = Vec::new();
    let mut cur = state;
    loop {
        out.push(cur);
        match cur.active_child() {
            Some(child) => cur = child,
            None => break,
        }
    }
    out
}

/// Number of containers between the root and the active leaf.
pub fn depth(state: &RouteTreeState) -> usize {
    active_path(state).len() - 1
}

/// Find the first node (pre-order) carrying `key`.
pub fn find_by_key<'a>(state: &'a RouteTreeState, key: &str) -> Option<&'a RouteTreeState> {
    if state.key.as_deref() == Some(key) {
        return Some(state);
    }
    state.routes.iter().find_map(|child| find_by_key(child, key))
}

/// Mutable variant of [`find_by_key`].
pub fn find_by_key_mut<'a>(
    state: &'a mut RouteTreeState,
    key: &str,
) -> Option<&'a mut RouteTreeState> {
    if state.key.as_deref() == Some(key) {
        return Some(state);
    }
    state
        .routes
        .iter_mut()
        .find_map(|child| find_by_key_mut(child, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn nested() -> RouteTreeState {
        let stack = RouteTreeState::container(
            "feed",
            1,
            vec![
                RouteTreeState::leaf("List").with_key("List-0"),
                RouteTreeState::leaf("Post").with_key("Post-1"),
            ],
        );
        RouteTreeState::container(
            "tabs",
            0,
            vec![stack, RouteTreeState::leaf("Settings").with_key("Settings")],
        )
    }

    #[test]
    fn leaf_resolves_to_itself() {
        let leaf = RouteTreeState::leaf("A");
        assert_eq!(active_leaf(&leaf).route_name, "A");
        assert_eq!(depth(&leaf), 0);
    }

    #[test]
    fn nested_tree_resolves_active_branch() {
        let tree = nested();
        assert_eq!(active_leaf(&tree).route_name, "Post");
        let names: Vec<_> = active_path(&tree)
            .iter()
            .map(|n| n.route_name.as_str())
            .collect();
        assert_eq!(names, vec!["tabs", "feed", "Post"]);
        assert_eq!(depth(&tree), 2);
    }

    #[test]
    fn out_of_bounds_index_stops_at_container() {
        let mut tree = nested();
        tree.index = Some(7);
        assert_eq!(active_leaf(&tree).route_name, "tabs");
        assert_eq!(active_leaf_mut(&mut tree).route_name, "tabs");
        assert!(tree.validate().is_err());
    }

    #[test]
    fn active_leaf_mut_targets_same_node() {
        let mut tree = nested();
        active_leaf_mut(&mut tree).route_name = "Edited".into();
        assert_eq!(active_leaf(&tree).route_name, "Edited");
    }

    #[test]
    fn key_lookup_searches_inactive_branches() {
        let mut tree = nested();
        assert_eq!(
            find_by_key(&tree, "Settings").map(|n| n.route_name.as_str()),
            Some("Settings")
        );
        assert!(find_by_key(&tree, "missing").is_none());
        find_by_key_mut(&mut tree, "List-0").unwrap().route_name = "Feed".into();
        assert_eq!(find_by_key(&tree, "List-0").unwrap().route_name, "Feed");
    }
}
