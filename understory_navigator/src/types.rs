// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the navigator: verbs, params arguments, reducer actions, and snapshots.
//!
//! ## Overview
//!
//! These types describe what callers ask for and what the store exposes.
//! They are consumed by the [`navigator`](crate::navigator) and the [`lifecycle`](crate::lifecycle) scheduler.

use core::fmt;

use serde_json::Value;
use understory_route_tree::{Params, RouteAction};

/// Key under which the target scene name is stored in normalized params.
pub const ROUTE_NAME_KEY: &str = "routeName";

/// Key a caller can use to pre-tag params with an explicit verb.
pub const TYPE_KEY: &str = "type";

/// Key under which non-object payloads are wrapped.
pub const DATA_KEY: &str = "data";

/// A navigation intent, before it is lowered into a [`RouteAction`].
///
/// Parses from and displays as a stable camel-case name (see [`Verb::as_str`]),
/// which is also the form accepted in an embedded `"type"` param.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Push a scene.
    Push,
    /// Switch to a scene; a no-op when it is already active.
    Jump,
    /// Go back one step.
    Pop,
    /// Alias of [`Verb::Pop`] for hardware/back-button actions.
    BackAction,
    /// Alias of [`Verb::Pop`].
    PopAndReplace,
    /// Go back until the named scene is active.
    PopTo,
    /// Replace the stack with a single scene.
    Replace,
    /// Reset the stack to a single scene.
    Reset,
    /// Re-apply params to the active scene.
    Refresh,
    /// Alias of [`Verb::Push`].
    PushOrPop,
    /// Pop, then push.
    PopAndPush,
    /// Open the drawer.
    DrawerOpen,
    /// Close the drawer.
    DrawerClose,
    /// Initialize the tree.
    Init,
    /// A verb the navigator does not know; only a custom reducer sees it.
    Custom(String),
}

impl Verb {
    /// Stable name of this verb.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "push",
            Self::Jump => "jump",
            Self::Pop => "pop",
            Self::BackAction => "backAction",
            Self::PopAndReplace => "popAndReplace",
            Self::PopTo => "popTo",
            Self::Replace => "replace",
            Self::Reset => "reset",
            Self::Refresh => "refresh",
            Self::PushOrPop => "pushOrPop",
            Self::PopAndPush => "popAndPush",
            Self::DrawerOpen => "drawerOpen",
            Self::DrawerClose => "drawerClose",
            Self::Init => "init",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for Verb {
    fn from(name: &str) -> Self {
        match name {
            "push" => Self::Push,
            "jump" => Self::Jump,
            "pop" | "back" => Self::Pop,
            "backAction" => Self::BackAction,
            "popAndReplace" => Self::PopAndReplace,
            "popTo" => Self::PopTo,
            "replace" => Self::Replace,
            "reset" => Self::Reset,
            "refresh" => Self::Refresh,
            "pushOrPop" => Self::PushOrPop,
            "popAndPush" => Self::PopAndPush,
            "drawerOpen" => Self::DrawerOpen,
            "drawerClose" => Self::DrawerClose,
            "init" => Self::Init,
            other => Self::Custom(other.into()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One variadic params argument.
///
/// Plain data merges into the normalized params; platform payloads
/// (for example a UI event handed straight to a button callback) are dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamArg {
    /// Plain data. Objects merge key by key; other values are wrapped under `"data"`.
    Value(Value),
    /// A non-data payload. Always excluded.
    Foreign,
}

impl From<Value> for ParamArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ParamArg {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.into()))
    }
}

impl From<Params> for ParamArg {
    fn from(params: Params) -> Self {
        Self::Value(Value::Object(params))
    }
}

/// What a custom [`Reducer`](crate::reducer::Reducer) is asked to handle.
#[derive(Clone, Debug, PartialEq)]
pub enum ReducerAction {
    /// Compute a transition in place of the router.
    Route(RouteAction),
    /// The scene that is losing focus in the current commit.
    Blur {
        /// Scene being left, if any.
        route_name: Option<String>,
    },
    /// The scene that gained focus in the current commit.
    Focus {
        /// Scene being entered.
        route_name: Option<String>,
        /// Its params.
        params: Option<Params>,
    },
    /// A verb the router cannot express as one action (pop-to, pop-and-push, custom verbs).
    Verb {
        /// Original verb.
        verb: Verb,
        /// Target scene.
        route_name: String,
        /// Normalized params.
        params: Params,
    },
}

bitflags::bitflags! {
    /// Per-commit lifecycle guards. Cleared on every commit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct HookFlags: u8 {
        /// The previous scene's exit hook has been started for this commit.
        const EXIT_EXECUTED  = 0b0000_0001;
        /// The current scene's enter hook has been started for this commit.
        const ENTER_EXECUTED = 0b0000_0010;
    }
}

/// Externally observed navigation state, derived on every commit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Active leaf after the last commit.
    pub current_scene: Option<String>,
    /// Active leaf before the last commit.
    pub prev_scene: Option<String>,
    /// Params of the active leaf.
    pub current_params: Option<Params>,
    /// Lifecycle guards for the last commit.
    pub flags: HookFlags,
    /// Number of commits so far.
    pub generation: u64,
}

/// Change descriptor returned by a commit and consumed by the lifecycle scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneChange {
    /// Scene active before the commit.
    pub prev_scene: Option<String>,
    /// Scene active after the commit.
    pub current_scene: String,
    /// Commit number.
    pub generation: u64,
}

impl SceneChange {
    /// Returns true when the active scene name changed.
    pub fn scene_changed(&self) -> bool {
        self.prev_scene.as_deref() != Some(self.current_scene.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_names_round_trip() {
        let verbs = [
            Verb::Push,
            Verb::Jump,
            Verb::Pop,
            Verb::BackAction,
            Verb::PopAndReplace,
            Verb::PopTo,
            Verb::Replace,
            Verb::Reset,
            Verb::Refresh,
            Verb::PushOrPop,
            Verb::PopAndPush,
            Verb::DrawerOpen,
            Verb::DrawerClose,
            Verb::Init,
        ];
        for verb in verbs {
            assert_eq!(Verb::from(verb.as_str()), verb);
        }
    }

    #[test]
    fn back_is_an_alias_of_pop() {
        assert_eq!(Verb::from("back"), Verb::Pop);
    }

    #[test]
    fn unknown_names_become_custom() {
        let verb = Verb::from("openModal");
        assert_eq!(verb, Verb::Custom("openModal".into()));
        assert_eq!(verb.to_string(), "openModal");
    }

    #[test]
    fn scene_change_detects_same_scene() {
        let same = SceneChange {
            prev_scene: Some("A".into()),
            current_scene: "A".into(),
            generation: 2,
        };
        assert!(!same.scene_changed());
        let first = SceneChange {
            prev_scene: None,
            current_scene: "A".into(),
            generation: 1,
        };
        assert!(first.scene_changed());
    }
}
