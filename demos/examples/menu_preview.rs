// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard walk through a menu.
//!
//! Mounts a six-item menu, replays a sequence of DOM key names against it, and
//! prints the document after every key with the focused element marked.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_preview`
//! - `cargo run -p understory_menu_demos --example menu_preview -- ArrowUp b b Escape`
//! - `RUST_LOG=understory_menu=trace cargo run -p understory_menu_demos --example menu_preview`

use tracing_subscriber::EnvFilter;
use understory_dom::{Document, NodeId, NodeKind};
use understory_menu::{Key, MenuButton, MenuConfig, Page, View};

const FRUIT: [&str; 6] = ["Apple", "Bananas", "Clementine", "Avocado", "Bee Honey", "Chives"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let menu = MenuButton::builder(MenuConfig::new("my-menu").class_name("preview"))
        .render(|p| {
            View::fragment([
                View::element("button").with(&p.control).text("Menu").into(),
                View::when(p.is_open, || {
                    View::element("ul")
                        .with(&p.menu)
                        .children(FRUIT.map(|label| View::element("li").with(&p.item).text(label)))
                }),
            ])
        })
        .build()?;

    let mut page = Page::new();
    page.mount(page.body(), menu);
    let control = page
        .document()
        .element_by_id("my-menu")
        .ok_or("control not rendered")?;
    page.focus(control);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let script: Vec<&str> = if args.is_empty() {
        vec!["Enter", "ArrowDown", "c", "b", "b", "End", "ArrowDown", "Escape"]
    } else {
        args.iter().map(String::as_str).collect()
    };

    println!("== initial ==");
    print_tree(page.document(), page.document().root(), 0);
    for name in script {
        let out = page.press(Key::from_dom(name));
        println!(
            "\n== {name:?} (handlers: {}, default prevented: {}) ==",
            out.delivered, out.default_prevented
        );
        print_tree(page.document(), page.document().root(), 0);
    }
    Ok(())
}

fn print_tree(doc: &Document, node: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    let focus = if doc.active_element() == Some(node) { "  <- focus" } else { "" };
    match doc.kind(node) {
        Some(NodeKind::Document) => println!("{indent}#document"),
        Some(NodeKind::Text(t)) => println!("{indent}\"{t}\""),
        Some(NodeKind::Element(tag)) => {
            let attrs: Vec<String> = doc.attrs(node).map(|(k, v)| format!(" {k}=\"{v}\"")).collect();
            println!("{indent}<{tag}{}>{focus}", attrs.concat());
        }
        None => return,
    }
    for &child in doc.children(node) {
        print_tree(doc, child, depth + 1);
    }
}
