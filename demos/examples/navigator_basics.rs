// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack navigation with the high-level verbs.
//!
//! Pushes a few scenes, refreshes one, pops back to the root, and prints the
//! stack after each step. Set `RUST_LOG=understory_navigator=debug` to see commits.
//!
//! Run:
//! - `cargo run -p understory_demos --example navigator_basics`

use futures::executor::LocalPool;
use serde_json::json;
use understory_navigator::Navigator;
use understory_route_tree::routers::StackRouter;

fn print_stack(label: &str, nav: &Navigator) {
    let names: Vec<String> = nav
        .state()
        .map(|s| s.routes.iter().map(|r| r.route_name.clone()).collect())
        .unwrap_or_default();
    println!(
        "{label:<18} stack={names:?} current={:?} prev={:?}",
        nav.current_scene(),
        nav.prev_scene()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let pool = LocalPool::new();
    let router = StackRouter::new("Inbox", ["Inbox", "Thread", "Compose", "Settings"]);
    let nav = Navigator::new(router, pool.spawner());
    print_stack("init", &nav);

    nav.push("Thread", &[json!({ "id": 41 }).into()]);
    print_stack("push Thread", &nav);

    nav.push("Compose", &["reply".into()]);
    print_stack("push Compose", &nav);
    println!("  compose params: {:?}", nav.current_params());

    nav.pop(Some(json!({ "refresh": { "unread": 0 } }).into()));
    print_stack("pop + refresh", &nav);
    println!("  thread params: {:?}", nav.current_params());

    nav.jump("Thread", &[]);
    print_stack("jump Thread (no-op)", &nav);

    nav.pop_and_push("Settings", &[]);
    print_stack("popAndPush", &nav);

    nav.push("Thread", &[json!({ "id": 42 }).into()]);
    nav.pop_to("Inbox", &[]);
    print_stack("popTo Inbox", &nav);

    nav.replace("Compose", &[]);
    print_stack("replace", &nav);
}
