// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`Navigator`](crate::navigator::Navigator).
///
/// Deserializes from camel-case keys; missing keys take their defaults.
///
/// ```
/// use understory_navigator::config::NavigatorConfig;
///
/// let config = NavigatorConfig::from_json(r#"{ "drawerOpenRoute": "Menu" }"#).unwrap();
/// assert_eq!(config.drawer_open_route, "Menu");
/// assert_eq!(config.drawer_close_route, "DrawerClose");
/// assert!(!config.discard_stale_completions);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatorConfig {
    /// Route navigated to by [`Navigator::drawer_open`](crate::navigator::Navigator::drawer_open).
    pub drawer_open_route: String,
    /// Route navigated to by [`Navigator::drawer_close`](crate::navigator::Navigator::drawer_close).
    pub drawer_close_route: String,
    /// Skip an enter hook's `success`/`failure` continuation when another commit
    /// happened while the hook was pending.
    ///
    /// Off by default: continuations fire against whatever scene is current when
    /// the hook completes.
    pub discard_stale_completions: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            drawer_open_route: "DrawerOpen".into(),
            drawer_close_route: "DrawerClose".into(),
            discard_stale_completions: false,
        }
    }
}

impl NavigatorConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
