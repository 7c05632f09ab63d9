// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack router: push on navigate, pop on back.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::action::RouteAction;
use crate::router::Router;
use crate::types::{Params, RouteTreeState};

/// Router for a single stack of scenes.
///
/// Route keys are `"{route_name}-{position}"`, so the same input always yields
/// the same keys.
#[derive(Clone, Debug)]
pub struct StackRouter {
    name: String,
    initial_route: String,
    route_names: Vec<String>,
}

impl StackRouter {
    /// Create a stack that starts at `initial_route` and accepts `route_names`.
    ///
    /// The initial route is always accepted.
    pub fn new<I, S>(initial_route: impl Into<String>, route_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let initial_route = initial_route.into();
        let mut route_names: Vec<String> = route_names.into_iter().map(Into::into).collect();
        if !route_names.contains(&initial_route) {
            route_names.push(initial_route.clone());
        }
        Self {
            name: String::from("stack"),
            initial_route,
            route_names,
        }
    }

    /// Set the container's route name (defaults to `"stack"`).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns true if `route_name` can be pushed on this stack.
    pub fn handles(&self, route_name: &str) -> bool {
        self.route_names.iter().any(|r| r == route_name)
    }

    fn scene(route_name: &str, params: Option<Params>, position: usize) -> RouteTreeState {
        let mut leaf = RouteTreeState::leaf(route_name).with_key(format!("{route_name}-{position}"));
        leaf.params = params;
        leaf
    }

    fn initial_state(&self, params: Option<Params>) -> RouteTreeState {
        RouteTreeState::container(
            self.name.clone(),
            0,
            alloc::vec![Self::scene(&self.initial_route, params, 0)],
        )
    }

    fn reset(
        &self,
        state: &RouteTreeState,
        key: Option<&String>,
        index: usize,
        actions: &[RouteAction],
    ) -> Option<RouteTreeState> {
        let mut routes = Vec::with_capacity(actions.len());
        for (position, action) in actions.iter().enumerate() {
            match action {
                RouteAction::Navigate { route_name, params } if self.handles(route_name) => {
                    routes.push(Self::scene(route_name, params.clone(), position));
                }
                _ => return None,
            }
        }
        if index >= routes.len() {
            return None;
        }
        let mut next = RouteTreeState::container(state.route_name.clone(), index, routes);
        next.key = key.cloned();
        Some(next)
    }
}

impl Router for StackRouter {
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState> {
        let Some(state) = state else {
            let init = match action {
                RouteAction::Init { params } => return Some(self.initial_state(params.clone())),
                _ => self.initial_state(None),
            };
            return self.get_state_for_action(action, Some(&init));
        };

        match action {
            RouteAction::Init { .. } => None,
            RouteAction::Navigate { route_name, params } => {
                if !self.handles(route_name) {
                    return None;
                }
                let mut next = state.clone();
                let position = next.routes.len();
                next.routes.push(Self::scene(route_name, params.clone(), position));
                next.index = Some(position);
                Some(next)
            }
            RouteAction::Back { key } => {
                let cut = match key {
                    Some(key) => state
                        .routes
                        .iter()
                        .position(|r| r.key.as_deref() == Some(key.as_str()))?,
                    None => state.routes.len().checked_sub(1)?,
                };
                if cut == 0 {
                    return None;
                }
                let mut next = state.clone();
                next.routes.truncate(cut);
                next.index = Some(cut - 1);
                Some(next)
            }
            RouteAction::Reset {
                key,
                index,
                actions,
            } => self.reset(state, key.as_ref(), *index, actions),
            RouteAction::SetParams { key, params } => {
                super::set_params(state, key.as_deref(), params)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::active_leaf;
    use alloc::vec;
    use serde_json::json;

    fn params(v: serde_json::Value) -> Params {
        match v {
            serde_json::Value::Object(map) => map,
            _ => Params::new(),
        }
    }

    fn names(state: &RouteTreeState) -> Vec<&str> {
        state.routes.iter().map(|r| r.route_name.as_str()).collect()
    }

    fn router() -> StackRouter {
        StackRouter::new("A", ["A", "B", "C"])
    }

    #[test]
    fn init_builds_single_entry_stack() {
        let s = router()
            .get_state_for_action(&RouteAction::init(), None)
            .unwrap();
        assert_eq!(s.route_name, "stack");
        assert_eq!(s.index, Some(0));
        assert_eq!(names(&s), vec!["A"]);
        assert_eq!(s.routes[0].key.as_deref(), Some("A-0"));
        assert!(router().get_state_for_action(&RouteAction::init(), Some(&s)).is_none());
    }

    #[test]
    fn navigate_pushes_and_back_pops() {
        let r = router();
        let s0 = r.get_state_for_action(&RouteAction::init(), None).unwrap();
        let s1 = r
            .get_state_for_action(&RouteAction::navigate("B", None), Some(&s0))
            .unwrap();
        assert_eq!(names(&s1), vec!["A", "B"]);
        assert_eq!(s1.index, Some(1));
        let s2 = r.get_state_for_action(&RouteAction::back(), Some(&s1)).unwrap();
        assert_eq!(s2, s0);
        assert!(r.get_state_for_action(&RouteAction::back(), Some(&s2)).is_none());
    }

    #[test]
    fn unknown_route_is_not_handled() {
        let r = router();
        let s0 = r.get_state_for_action(&RouteAction::init(), None).unwrap();
        assert!(
            r.get_state_for_action(&RouteAction::navigate("Nope", None), Some(&s0))
                .is_none()
        );
    }

    #[test]
    fn back_with_key_pops_past_that_route() {
        let r = router();
        let mut s = r.get_state_for_action(&RouteAction::init(), None).unwrap();
        for name in ["B", "C", "B"] {
            s = r
                .get_state_for_action(&RouteAction::navigate(name, None), Some(&s))
                .unwrap();
        }
        let back = RouteAction::Back {
            key: Some("C-2".into()),
        };
        let s = r.get_state_for_action(&back, Some(&s)).unwrap();
        assert_eq!(names(&s), vec!["A", "B"]);
        assert_eq!(s.index, Some(1));
    }

    #[test]
    fn reset_replaces_stack() {
        let r = router();
        let s0 = r.get_state_for_action(&RouteAction::init(), None).unwrap();
        let s1 = r
            .get_state_for_action(&RouteAction::navigate("B", None), Some(&s0))
            .unwrap();
        let reset = RouteAction::reset(
            Some("C".into()),
            0,
            vec![RouteAction::navigate("C", Some(params(json!({"x": 1}))))],
        );
        let s2 = r.get_state_for_action(&reset, Some(&s1)).unwrap();
        assert_eq!(names(&s2), vec!["C"]);
        assert_eq!(s2.index, Some(0));
        assert_eq!(s2.key.as_deref(), Some("C"));
        assert_eq!(active_leaf(&s2).params, Some(params(json!({"x": 1}))));

        let bad = RouteAction::reset(None, 2, vec![RouteAction::navigate("C", None)]);
        assert!(r.get_state_for_action(&bad, Some(&s1)).is_none());
    }

    #[test]
    fn set_params_merges_by_key() {
        let r = router();
        let s0 = r
            .get_state_for_action(
                &RouteAction::Init {
                    params: Some(params(json!({"id": 1, "name": "a"}))),
                },
                None,
            )
            .unwrap();
        let s1 = r
            .get_state_for_action(
                &RouteAction::set_params(Some("A-0".into()), params(json!({"id": 2}))),
                Some(&s0),
            )
            .unwrap();
        let leaf = active_leaf(&s1);
        assert_eq!(leaf.params, Some(params(json!({"id": 2, "name": "a"}))));
        assert_eq!(leaf.key.as_deref(), Some("A-0"));
        assert!(
            r.get_state_for_action(
                &RouteAction::set_params(Some("missing".into()), Params::new()),
                Some(&s0),
            )
            .is_none()
        );
    }
}
