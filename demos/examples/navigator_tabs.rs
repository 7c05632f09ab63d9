// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs hosting nested stacks.
//!
//! The active scene is always the deepest active leaf, so pushing inside a tab
//! and switching tabs both change `current_scene`.
//!
//! Run:
//! - `cargo run -p understory_demos --example navigator_tabs`

use futures::executor::LocalPool;
use serde_json::json;
use understory_navigator::Navigator;
use understory_navigator::types::Verb;
use understory_route_tree::resolve::active_path;
use understory_route_tree::routers::{StackRouter, TabRouter};

fn print_path(label: &str, nav: &Navigator) {
    let path: Vec<String> = nav
        .state()
        .map(|s| {
            active_path(&s)
                .into_iter()
                .map(|n| n.route_name.clone())
                .collect()
        })
        .unwrap_or_default();
    println!("{label:<22} path={path:?} gen={}", nav.snapshot().generation);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let pool = LocalPool::new();
    let router = TabRouter::new("main")
        .nested("Feed", StackRouter::new("FeedList", ["FeedItem", "Author"]))
        .nested("Search", StackRouter::new("SearchHome", ["Results"]))
        .tab("Profile");
    let nav = Navigator::new(router, pool.spawner());
    print_path("init", &nav);

    nav.push("FeedItem", &[json!({ "id": 7 }).into()]);
    nav.push("Author", &[]);
    print_path("push FeedItem, Author", &nav);

    nav.jump("Search", &[]);
    print_path("jump Search", &nav);

    nav.push("Results", &[json!({ "q": "rust" }).into()]);
    print_path("push Results", &nav);

    nav.jump("Profile", &[json!({ "tab": "likes" }).into()]);
    print_path("jump Profile", &nav);
    println!("  profile params: {:?}", nav.current_params());

    nav.jump("Profile", &[]);
    print_path("jump Profile again", &nav);

    nav.execute(Verb::Push, "FeedItem", &[json!({ "id": 8, "type": "jump" }).into()]);
    print_path("execute (type=jump)", &nav);

    nav.pop_to("FeedList", &[]);
    print_path("popTo FeedList", &nav);
}
