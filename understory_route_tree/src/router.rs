// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router trait: the transition function the navigator calls through.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::action::RouteAction;
use crate::types::RouteTreeState;

/// Pure transition function over route trees.
///
/// Implementations must be total over well-formed input and must not keep
/// hidden state that changes the answer for the same `(action, state)` pair;
/// the navigator relies on that to simulate transitions without committing them.
pub trait Router {
    /// Return the state that results from applying `action` to `state`,
    /// or `None` when the action is not handled.
    ///
    /// `state` is `None` only before initialization.
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState>;
}

impl<R: Router + ?Sized> Router for &R {
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState> {
        (**self).get_state_for_action(action, state)
    }
}

impl<R: Router + ?Sized> Router for Box<R> {
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState> {
        (**self).get_state_for_action(action, state)
    }
}

impl<R: Router + ?Sized> Router for Rc<R> {
    fn get_state_for_action(
        &self,
        action: &RouteAction,
        state: Option<&RouteTreeState>,
    ) -> Option<RouteTreeState> {
        (**self).get_state_for_action(action, state)
    }
}
