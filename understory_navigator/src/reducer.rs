// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom reducer seam.

use understory_route_tree::RouteTreeState;

use crate::types::ReducerAction;

/// Optional reducer injected into a navigator.
///
/// When present it replaces the router for every transition
/// ([`ReducerAction::Route`]), and it is notified of blur/focus and of verbs the
/// router cannot express. Returning `Some` replaces the committed state;
/// returning `None` leaves it alone.
///
/// Any `Fn(Option<&RouteTreeState>, &ReducerAction) -> Option<RouteTreeState>` is a reducer.
pub trait Reducer {
    /// Handle `action` against `state`.
    fn reduce(
        &self,
        state: Option<&RouteTreeState>,
        action: &ReducerAction,
    ) -> Option<RouteTreeState>;
}

impl<F> Reducer for F
where
    F: Fn(Option<&RouteTreeState>, &ReducerAction) -> Option<RouteTreeState>,
{
    fn reduce(
        &self,
        state: Option<&RouteTreeState>,
        action: &ReducerAction,
    ) -> Option<RouteTreeState> {
        self(state, action)
    }
}
