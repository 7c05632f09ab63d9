// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Task spawning seam for fire-and-forget lifecycle work.
//!
//! The navigator never blocks on hooks. It hands each scheduler run (and each
//! exit hook) to a [`Spawner`] bound to the UI thread's event loop.

use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;

use crate::error::SpawnFailed;

/// Runs `!Send` tasks on the thread that owns the navigator.
pub trait Spawner {
    /// Schedule `task`; it must not run inline.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnFailed>;
}

impl Spawner for LocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnFailed> {
        futures::task::LocalSpawnExt::spawn_local(self, task)
            .map_err(|err| SpawnFailed(err.to_string()))
    }
}
