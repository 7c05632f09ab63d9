// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use futures::executor::LocalPool;
use serde_json::json;
use understory_navigator::Navigator;
use understory_navigator::lifecycle::SceneHooks;
use understory_navigator::normalize::unite_params;
use understory_navigator::types::ParamArg;
use understory_route_tree::routers::StackRouter;

fn scene_names() -> Vec<String> {
    (0..16).map(|i| format!("Scene{i}")).collect()
}

fn navigator_with_stack(pool: &LocalPool, names: &[String], n: usize) -> Navigator {
    let nav = Navigator::new(StackRouter::new("Root", names.to_vec()), pool.spawner());
    for i in 0..n {
        nav.push(&names[i % names.len()], &[]);
    }
    nav
}

fn bench_normalize(c: &mut Criterion) {
    let args: Vec<ParamArg> = (0..8)
        .map(|i| ParamArg::from(json!({ "slot": format!("k{i}"), "shared": i })))
        .chain([ParamArg::Foreign, ParamArg::from(json!(null)), ParamArg::from("tail")])
        .collect();
    c.bench_function("unite_params_11_args", |b| {
        b.iter(|| black_box(unite_params("Detail", black_box(&args))).len())
    });
}

fn bench_pop_to(c: &mut Criterion) {
    let names = scene_names();
    let mut group = c.benchmark_group("pop_to");
    for &n in &[8usize, 64, 256] {
        let pool = LocalPool::new();
        let nav = navigator_with_stack(&pool, &names, n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("search_root_n{n}"), |b| {
            b.iter(|| black_box(nav.pop_to_search("Root")).is_some())
        });
        group.bench_function(format!("search_missing_n{n}"), |b| {
            b.iter(|| black_box(nav.pop_to_search("Missing")).is_none())
        });
        group.bench_function(format!("commit_root_n{n}"), |b| {
            b.iter_batched(
                || {
                    let pool = LocalPool::new();
                    let nav = navigator_with_stack(&pool, &names, n);
                    (pool, nav)
                },
                |(pool, nav)| {
                    nav.pop_to("Root", &[]);
                    black_box(nav.snapshot().generation);
                    drop(pool);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_push_pop_with_hooks(c: &mut Criterion) {
    let names = scene_names();
    let mut pool = LocalPool::new();
    let nav = navigator_with_stack(&pool, &names, 0);
    for name in &names {
        nav.register_scene(
            name.clone(),
            SceneHooks::new()
                .on_enter_sync(|params| Ok(params.into()))
                .on_exit_sync(|| Ok(())),
        );
    }
    c.bench_function("push_pop_run_hooks", |b| {
        b.iter(|| {
            nav.push("Scene3", &[json!({ "id": 1 }).into()]);
            pool.run_until_stalled();
            nav.pop(None);
            pool.run_until_stalled();
        })
    });
}

criterion_group!(benches, bench_normalize, bench_pop_to, bench_push_pop_with_hooks);
criterion_main!(benches);
