// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_route_tree::resolve::{active_leaf, find_by_key};
use understory_route_tree::routers::StackRouter;
use understory_route_tree::{RouteAction, RouteTreeState, Router};

// A chain of containers `depth` deep, each with `width` children, active on the last child.
fn gen_nested(depth: usize, width: usize) -> RouteTreeState {
    let mut node = RouteTreeState::leaf("Leaf").with_key("leaf");
    for level in 0..depth {
        let mut routes: Vec<RouteTreeState> = (0..width - 1)
            .map(|i| RouteTreeState::leaf(format!("S{level}_{i}")).with_key(format!("s{level}-{i}")))
            .collect();
        routes.push(node);
        node = RouteTreeState::container(format!("C{level}"), width - 1, routes)
            .with_key(format!("c{level}"));
    }
    node
}

fn gen_stack(router: &StackRouter, names: &[String], n: usize) -> RouteTreeState {
    let mut state = router
        .get_state_for_action(&RouteAction::init(), None)
        .unwrap_or_default();
    for i in 0..n {
        let action = RouteAction::navigate(names[i % names.len()].clone(), None);
        if let Some(next) = router.get_state_for_action(&action, Some(&state)) {
            state = next;
        }
    }
    state
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &depth in &[4usize, 16, 64] {
        let tree = gen_nested(depth, 8);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("active_leaf_depth{depth}"), |b| {
            b.iter(|| black_box(active_leaf(black_box(&tree))).route_name.len())
        });
        group.bench_function(format!("find_by_key_depth{depth}"), |b| {
            b.iter(|| find_by_key(black_box(&tree), "leaf").is_some())
        });
    }
    group.finish();
}

fn bench_stack_router(c: &mut Criterion) {
    let names: Vec<String> = (0..16).map(|i| format!("Scene{i}")).collect();
    let router = StackRouter::new("Root", names.clone());
    let mut group = c.benchmark_group("stack_router");
    for &n in &[8usize, 64, 256] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("push_n{n}"), |b| {
            b.iter(|| black_box(gen_stack(&router, &names, n)).routes.len())
        });
        let full = gen_stack(&router, &names, n);
        group.bench_function(format!("back_to_root_n{n}"), |b| {
            b.iter_batched(
                || full.clone(),
                |mut state| {
                    let back = RouteAction::back();
                    while let Some(next) = router.get_state_for_action(&back, Some(&state)) {
                        state = next;
                    }
                    black_box(state.routes.len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_stack_router);
criterion_main!(benches);
