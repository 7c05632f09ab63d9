// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab router: a fixed set of named tabs, optionally hosting child routers.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::action::RouteAction;
use crate::router::Router;
use crate::types::RouteTreeState;

struct Tab {
    route_name: String,
    child: Option<Box<dyn Router>>,
}

/// Router switching between named tabs.
///
/// A tab is either a plain scene or a nested navigator driven by its own
/// [`Router`]. Actions a tab router does not handle directly are offered to
/// the active tab's child first, then to the other children in order; the first
/// child that handles the action becomes active.
///
/// `back` is offered to the active child; if it declines, the router returns to
/// the first tab, and at the first tab it declines too.
pub struct TabRouter {
    name: String,
    tabs: Vec<Tab>,
}

impl core::fmt::Debug for TabRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tabs: Vec<(&str, bool)> = self
            .tabs
            .iter()
            .map(|t| (t.route_name.as_str(), t.child.is_some()))
            .collect();
        f.debug_struct("TabRouter")
            .field("name", &self.name)
            .field("tabs", &tabs)
            .finish()
    }
}

impl TabRouter {
    /// Create a tab router with no tabs; add them with [`TabRouter::tab`] and [`TabRouter::nested`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tabs: Vec::new(),
        }
    }

    /// Add a plain scene tab.
    #[must_use]
    pub fn tab(mut self, route_name: impl Into<String>) -> Self {
        self.tabs.push(Tab {
            route_name: route_name.into(),
            child: None,
        });
        self
    }

    /// Add a tab driven by a child router.
    #[must_use]
    pub fn nested(mut self, route_name: impl Into<String>, child: impl Router + 'static) -> Self {
        self.tabs.push(Tab {
            route_name: route_name.into(),
            child: Some(Box::new(child)),
        });
        self
    }

    // Child routers name their own container; the tab name wins.
    fn adopt(tab: &Tab, mut state: RouteTreeState) -> RouteTreeState {
        state.route_name = tab.route_name.clone();
        state.key = Some(tab.route_name.clone());
        state
    }

    fn initial_state(&self) -> Option<RouteTreeState> {
        if self.tabs.is_empty() {
            return None;
        }
        let mut routes = Vec::with_capacity(self.tabs.len());
        for tab in &self.tabs {
            let route = match &tab.child {
                Some(child) => {
                    Self::adopt(tab, child.get_state_for_action(&RouteAction::init(), None)?)
                }
                None => RouteTreeState::leaf(tab.route_name.clone()).with_key(tab.route_name.clone()),
            };
            routes.push(route);
        }
        Some(RouteTreeState::container(self.name.clone(), 0, routes))
    }

    fn offer_to_children(
        &self,
        action: &RouteAction,
        state: &RouteTreeState,
    ) -> Option<RouteTreeState> {
        let active = state.index.unwrap_or(0);
        let order = core::iter::once(active).chain((0..self.tabs.len()).filter(|&i| i != active));
        for i in order {
            let (Some(tab), Some(current)) = (self.tabs.get(i), state.routes.get(i)) else {
                continue;
            };
            let Some(child) = &tab.child else {
                continue;
            };
            if let Some(child_state) = child.get_state_for_action(action, Some(current)) {
                let mut next = state.clone();
                next.routes[i] = Self::adopt(tab, child_state);
                next.index = Some(i);
                return Some(next);
            }
        }
        None
    }

    fn offer_to_active_child(
        &self,
        action: &RouteAction,
        state: &RouteTreeState,
    ) -> Option<RouteTreeState> {
        let i = state.index?;
        let child = self.tabs.get(i)?.child.as_ref()?;
        let child_state = child.get_state_for_action(action, state.routes.get(i))?;
        let mut next = state.clone();
        next.routes[i] = Self::adopt(&self.tabs[i], child_state);
        Some(next)
    }
}

impl Router for TabRouter {
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState> {
        let Some(state) = state else {
            let init = self.initial_state()?;
            return match action {
                RouteAction::Init { .. } => Some(init),
                _ => self.get_state_for_action(action, Some(&init)),
            };
        };

        match action {
            RouteAction::Init { .. } => None,
            RouteAction::Navigate { route_name, params } => {
                if let Some(i) = self.tabs.iter().position(|t| &t.route_name == route_name) {
                    let mut next = state.clone();
                    next.index = Some(i);
                    if let Some(params) = params
                        && self.tabs[i].child.is_none()
                    {
                        super::merge_params(&mut next.routes[i].params, params);
                    }
                    return Some(next);
                }
                self.offer_to_children(action, state)
            }
            RouteAction::Back { .. } => {
                if let Some(next) = self.offer_to_active_child(action, state) {
                    return Some(next);
                }
                match state.index {
                    Some(i) if i != 0 => {
                        let mut next = state.clone();
                        next.index = Some(0);
                        Some(next)
                    }
                    _ => None,
                }
            }
            RouteAction::Reset { .. } => self.offer_to_active_child(action, state),
            RouteAction::SetParams { key, params } => {
                super::set_params(state, key.as_deref(), params)
            }
        }
    }
}
