// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route tree nodes, scene params, and structural validation.

use alloc::string::String;
use alloc::vec::Vec;

/// Opaque key/value payload attached to a scene.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// One node of the navigation tree.
///
/// A node is either a leaf (a scene, `routes` empty) or a container with a
/// non-empty ordered list of children and an `index` selecting the active one.
///
/// Params are created by the action that produced the node and are not
/// mutated in place; routers build a new node when params change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteTreeState {
    /// Scene or nested navigator name.
    pub route_name: String,
    /// Stable identifier distinguishing repeated instances of the same `route_name`.
    pub key: Option<String>,
    /// Scene payload.
    pub params: Option<Params>,
    /// Active child, present only on containers.
    pub index: Option<usize>,
    /// Children in order, empty on leaves.
    pub routes: Vec<RouteTreeState>,
}

impl RouteTreeState {
    /// Create a leaf scene.
    pub fn leaf(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            ..Default::default()
        }
    }

    /// Create a container whose active child is `index`.
    pub fn container(
        route_name: impl Into<String>,
        index: usize,
        routes: Vec<Self>,
    ) -> Self {
        Self {
            route_name: route_name.into(),
            key: None,
            params: None,
            index: Some(index),
            routes,
        }
    }

    /// Attach a stable key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach params.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Returns true when this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.routes.is_empty()
    }

    /// The active child of a container, or `None` on leaves and on an out-of-bounds `index`.
    pub fn active_child(&self) -> Option<&Self> {
        self.index.and_then(|i| self.routes.get(i))
    }

    /// Check the container invariant on this node and every descendant.
    pub fn validate(&self) -> Result<(), RouteTreeError> {
        match (self.index, self.routes.len()) {
            (None, 0) => Ok(()),
            (None, _) => Err(RouteTreeError::MissingIndex {
                route_name: self.route_name.clone(),
            }),
            (Some(_), 0) => Err(RouteTreeError::IndexWithoutRoutes {
                route_name: self.route_name.clone(),
            }),
            (Some(index), len) if index >= len => Err(RouteTreeError::IndexOutOfBounds {
                route_name: self.route_name.clone(),
                index,
                len,
            }),
            (Some(_), _) => self.routes.iter().try_for_each(Self::validate),
        }
    }
}

/// Structural problems reported by [`RouteTreeState::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteTreeError {
    /// A node has children but no active index.
    #[error("route `{route_name}` has children but no index")]
    MissingIndex {
        /// Offending node.
        route_name: String,
    },
    /// A node has an index but no children.
    #[error("route `{route_name}` has an index but no children")]
    IndexWithoutRoutes {
        /// Offending node.
        route_name: String,
    },
    /// The active index does not address a child.
    #[error("route `{route_name}` index {index} is out of bounds for {len} children")]
    IndexOutOfBounds {
        /// Offending node.
        route_name: String,
        /// Stored index.
        index: usize,
        /// Number of children.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn leaf_and_container_validate() {
        let tree = RouteTreeState::container(
            "root",
            1,
            vec![RouteTreeState::leaf("A"), RouteTreeState::leaf("B")],
        );
        assert_eq!(tree.validate(), Ok(()));
        assert!(RouteTreeState::leaf("A").validate().is_ok());
    }

    #[test]
    fn validate_reports_nested_out_of_bounds() {
        let inner = RouteTreeState::container("inner", 3, vec![RouteTreeState::leaf("A")]);
        let tree = RouteTreeState::container("root", 0, vec![inner]);
        assert_eq!(
            tree.validate(),
            Err(RouteTreeError::IndexOutOfBounds {
                route_name: "inner".into(),
                index: 3,
                len: 1,
            })
        );
    }

    #[test]
    fn validate_reports_index_mismatch() {
        let mut no_index = RouteTreeState::leaf("root");
        no_index.routes.push(RouteTreeState::leaf("A"));
        assert!(matches!(
            no_index.validate(),
            Err(RouteTreeError::MissingIndex { .. })
        ));

        let mut no_routes = RouteTreeState::leaf("root");
        no_routes.index = Some(0);
        assert!(matches!(
            no_routes.validate(),
            Err(RouteTreeError::IndexWithoutRoutes { .. })
        ));
    }
}
