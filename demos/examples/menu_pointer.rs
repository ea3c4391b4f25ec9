// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer interaction with two menus side by side.
//!
//! Items carry bounds so clicks can be hit tested. Opening one menu dismisses the
//! other through its outside-click listener, and clicking empty space closes whatever
//! is open.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_pointer`
//! - `RUST_LOG=debug cargo run -p understory_menu_demos --example menu_pointer`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_menu::{MenuButton, MenuConfig, Page, View, WidgetId};

fn column_menu(id: &str, x: f64, labels: &'static [&'static str]) -> MenuButton {
    MenuButton::new(MenuConfig::new(id), move |p| {
        View::fragment([
            View::element("button")
                .with(&p.control)
                .bounds(Rect::new(x, 0.0, x + 100.0, 20.0))
                .text("Menu")
                .into(),
            View::when(p.is_open, || {
                View::element("ul")
                    .with(&p.menu)
                    .z_index(1)
                    .children(labels.iter().enumerate().map(|(i, label)| {
                        let y = 20.0 * (i as f64 + 1.0);
                        View::element("li")
                            .with(&p.item)
                            .bounds(Rect::new(x, y, x + 100.0, y + 20.0))
                            .z_index(1)
                            .text(*label)
                    }))
            }),
        ])
    })
}

fn describe(page: &Page, menus: &[(&str, WidgetId)]) {
    for (name, id) in menus {
        let open = page.widget(*id).is_some_and(MenuButton::is_open);
        print!("{name}: {}  ", if open { "open" } else { "closed" });
    }
    let focus = page
        .active_element()
        .map(|n| page.document().text_content(n))
        .unwrap_or_else(|| "(none)".into());
    println!("| focus: {focus}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut page = Page::new();
    let body = page.body();
    let fruit = page.mount(body, column_menu("fruit", 0.0, &["Apple", "Bananas", "Clementine"]));
    let herbs = page.mount(body, column_menu("herbs", 150.0, &["Basil", "Chives", "Dill"]));
    let menus = [("fruit", fruit), ("herbs", herbs)];

    let clicks = [
        ("fruit control", Point::new(50.0, 10.0)),
        ("second fruit item", Point::new(50.0, 50.0)),
        ("herbs control", Point::new(200.0, 10.0)),
        ("empty space", Point::new(400.0, 300.0)),
    ];
    describe(&page, &menus);
    for (what, pt) in clicks {
        let out = page.click_at(pt);
        print!("click {what:<18} ({} handlers)  ", out.delivered);
        describe(&page, &menus);
    }

    page.unmount(fruit);
    page.unmount(herbs);
    println!("listeners after unmount: {}", page.listener_count());
}
