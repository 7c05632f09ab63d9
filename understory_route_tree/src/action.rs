// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Low-level route actions and their constructors.
//!
//! These are the only actions a [`Router`](crate::router::Router) is asked to handle.
//! Higher-level verbs (push, jump, pop-to, ...) are lowered into them by the navigator.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::Params;

/// A low-level transition request.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteAction {
    /// Build the initial state.
    Init {
        /// Params for the initial scene.
        params: Option<Params>,
    },
    /// Go to `route_name`, pushing or switching depending on the container.
    Navigate {
        /// Target scene.
        route_name: String,
        /// Params for the target scene.
        params: Option<Params>,
    },
    /// Go back one step, or back past the route carrying `key`.
    Back {
        /// Optional route key to pop.
        key: Option<String>,
    },
    /// Replace a container's children with the result of `actions`.
    Reset {
        /// Key assigned to the reset container, if any.
        key: Option<String>,
        /// Active child after the reset.
        index: usize,
        /// One `Navigate` per new child, in order.
        actions: Vec<RouteAction>,
    },
    /// Merge params into the route carrying `key`.
    SetParams {
        /// Target route key.
        key: Option<String>,
        /// Params to merge; later keys override.
        params: Params,
    },
}

impl RouteAction {
    /// `init` constructor.
    pub fn init() -> Self {
        Self::Init { params: None }
    }

    /// `navigate` constructor.
    pub fn navigate(route_name: impl Into<String>, params: Option<Params>) -> Self {
        Self::Navigate {
            route_name: route_name.into(),
            params,
        }
    }

    /// `back` constructor (no key: pop the active route).
    pub fn back() -> Self {
        Self::Back { key: None }
    }

    /// `reset` constructor.
    pub fn reset(key: Option<String>, index: usize, actions: Vec<Self>) -> Self {
        Self::Reset {
            key,
            index,
            actions,
        }
    }

    /// `set_params` constructor.
    pub fn set_params(key: Option<String>, params: Params) -> Self {
        Self::SetParams { key, params }
    }

    /// Short stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Navigate { .. } => "navigate",
            Self::Back { .. } => "back",
            Self::Reset { .. } => "reset",
            Self::SetParams { .. } => "setParams",
        }
    }
}
