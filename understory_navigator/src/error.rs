// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised inside the lifecycle layer.
//!
//! None of these reach the caller of a navigation verb: exit errors are logged,
//! enter errors become a `failure` continuation, and spawn failures are logged.

use serde_json::Value;

/// Error produced by a scene's enter or exit hook.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The hook failed with a message.
    #[error("hook failed: {0}")]
    Failed(String),
    /// The hook rejected with a data payload.
    #[error("hook rejected with {0}")]
    Rejected(Value),
    /// Any other error.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl HookError {
    /// Shorthand for [`HookError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A lifecycle task could not be handed to the executor.
#[derive(Debug, thiserror::Error)]
#[error("failed to spawn lifecycle task: {0}")]
pub struct SpawnFailed(pub String);
