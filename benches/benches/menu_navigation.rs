// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_dom::{Document, NodeId};
use understory_menu::focus::{DomItems, FocusEngine, Intent, resolve};
use understory_menu::{Key, MenuButton, MenuConfig, Page, View};

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}item {i}", (b'a' + (i % 26) as u8) as char)).collect()
}

fn menu_document(n: usize) -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let menu = doc.append_element(root, "ul");
    doc.set_attr(menu, "role", "menu");
    let items = labels(n)
        .iter()
        .map(|label| {
            let li = doc.append_element(menu, "li");
            doc.set_attr(li, "role", "menuitem");
            doc.set_attr(li, "tabindex", "-1");
            doc.append_text(li, label);
            li
        })
        .collect();
    (doc, menu, items)
}

fn menu_page(n: usize) -> (Page, NodeId) {
    let items = labels(n);
    let button = MenuButton::new(MenuConfig::new("bench"), move |p| {
        View::fragment([
            View::element("button").with(&p.control).text("Menu").into(),
            View::when(p.is_open, || {
                View::element("ul")
                    .with(&p.menu)
                    .children(items.iter().map(|l| View::element("li").with(&p.item).text(l.as_str())))
            }),
        ])
    });
    let mut page = Page::new();
    page.mount(page.body(), button);
    let control = page.document().element_by_id("bench").unwrap();
    page.key_down(control, Key::Enter);
    (page, control)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &n in &[8_usize, 64, 512] {
        let names = labels(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("next_full_cycle_n{n}"), |b| {
            b.iter(|| {
                let mut at = Some(0);
                for _ in 0..n {
                    at = resolve(Intent::Next, n, at, |i| names[i].as_str());
                }
                black_box(at)
            });
        });
        group.bench_function(format!("match_char_miss_n{n}"), |b| {
            b.iter(|| black_box(resolve(Intent::MatchChar('#'), n, Some(0), |i| names[i].as_str())));
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_dom");
    for &n in &[8_usize, 64, 512] {
        let (mut doc, menu, items) = menu_document(n);
        assert!(doc.focus(items[0]));
        group.bench_function(format!("next_n{n}"), |b| {
            let mut engine = FocusEngine::new();
            b.iter(|| {
                engine.next();
                black_box(engine.evaluate(&mut DomItems::new(&mut doc, menu)))
            });
        });
        group.bench_function(format!("match_char_n{n}"), |b| {
            let mut engine = FocusEngine::new();
            b.iter(|| {
                doc.focus(items[0]);
                engine.match_char('z');
                black_box(engine.evaluate(&mut DomItems::new(&mut doc, menu)))
            });
        });
    }
    group.finish();
}

fn bench_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("page");
    for &n in &[8_usize, 64] {
        group.bench_function(format!("arrow_down_n{n}"), |b| {
            let (mut page, _) = menu_page(n);
            b.iter(|| black_box(page.press(Key::ArrowDown)));
        });
        group.bench_function(format!("open_close_n{n}"), |b| {
            let (mut page, control) = menu_page(n);
            page.press(Key::Escape);
            b.iter(|| {
                page.key_down(control, Key::Enter);
                black_box(page.press(Key::Escape))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_evaluate, bench_page);
criterion_main!(benches);
