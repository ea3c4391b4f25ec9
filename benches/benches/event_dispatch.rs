// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dom::{Document, NodeId, QueryFilter};
use understory_responder::adapters::dom::{DomParents, top_hit_for_point};
use understory_responder::dispatcher;
use understory_responder::listeners::ListenerRegistry;
use understory_responder::router::Router;
use understory_responder::types::Outcome;

/// A chain of `depth` nested elements; returns the leaf.
fn chain(depth: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let mut cur = doc.root();
    for _ in 0..depth {
        cur = doc.append_element(cur, "div");
    }
    (doc, cur)
}

/// A `n`×`n` grid of cells with bounds.
fn grid(n: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for y in 0..n {
        for x in 0..n {
            let cell = doc.append_element(root, "div");
            let (x0, y0) = (x as f64 * 10.0, y as f64 * 10.0);
            doc.set_bounds(cell, Rect::new(x0, y0, x0 + 10.0, y0 + 10.0));
        }
    }
    doc
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for &depth in &[4_usize, 16, 64] {
        let (doc, leaf) = chain(depth);
        group.bench_function(format!("dispatch_for_depth{depth}"), |b| {
            let router = Router::with_parent(DomParents(&doc));
            b.iter(|| black_box(router.dispatch_for(leaf)));
        });

        let mut listeners = ListenerRegistry::new();
        for node in doc.path_to_root(leaf) {
            listeners.add(node, "click", true, 1_u32);
            listeners.add(node, "click", false, 2_u32);
        }
        let seq = Router::with_parent(DomParents(&doc)).dispatch_for(leaf);
        group.bench_function(format!("run_with_listeners_depth{depth}"), |b| {
            b.iter(|| {
                let mut sum = 0_u32;
                dispatcher::run(&seq, &mut sum, |step, sum| {
                    for h in listeners.matching(step, &"click") {
                        *sum += *h;
                    }
                    Outcome::Continue
                });
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit");
    for &n in &[8_usize, 32] {
        let doc = grid(n);
        let pt = Point::new(n as f64 * 5.0 + 1.0, n as f64 * 5.0 + 1.0);
        group.bench_function(format!("top_hit_grid{n}"), |b| {
            b.iter(|| black_box(top_hit_for_point(&doc, pt, QueryFilter::POINTER)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_route, bench_hit);
criterion_main!(benches);
