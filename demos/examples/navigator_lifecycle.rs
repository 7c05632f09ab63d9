// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene enter/exit hooks.
//!
//! `Detail` loads asynchronously on enter and bounces back when the load
//! resolves to nothing. `Home` logs when it is left.
//!
//! Run:
//! - `cargo run -p understory_demos --example navigator_lifecycle`

use futures::executor::LocalPool;
use serde_json::{Value, json};
use understory_navigator::Navigator;
use understory_navigator::error::HookError;
use understory_navigator::lifecycle::SceneHooks;
use understory_route_tree::routers::StackRouter;

async fn load_item(id: Option<u64>) -> Result<Value, HookError> {
    match id {
        Some(0) => Ok(Value::Null),
        Some(id) => Ok(json!({ "id": id, "title": format!("Item {id}") })),
        None => Err(HookError::failed("missing id")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let mut pool = LocalPool::new();
    let nav = Navigator::new(
        StackRouter::new("Home", ["Home", "Detail"]),
        pool.spawner(),
    );

    nav.register_scene(
        "Home",
        SceneHooks::new().on_exit_sync(|| {
            tracing::info!("leaving Home");
            Ok(())
        }),
    );

    let bounce = nav.clone();
    nav.register_scene(
        "Detail",
        SceneHooks::new()
            .on_enter(|params| load_item(params.get("id").and_then(Value::as_u64)))
            .success(|item| tracing::info!(%item, "detail loaded"))
            .failure(move |err| {
                match err {
                    Some(err) => tracing::warn!(error = %err, "detail failed"),
                    None => tracing::warn!("detail empty"),
                }
                bounce.pop(None);
            }),
    );

    for id in [json!({ "id": 3 }), json!({ "id": 0 }), json!({})] {
        nav.push("Detail", &[id.into()]);
        pool.run_until_stalled();
        println!(
            "after push: current={:?} gen={}",
            nav.current_scene(),
            nav.snapshot().generation
        );
        if nav.current_scene().as_deref() == Some("Detail") {
            nav.pop(None);
            pool.run_until_stalled();
        }
    }
}
