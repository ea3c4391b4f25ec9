// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event routing underneath a menu.
//!
//! Builds the elements a menu renders by hand, then shows the capture → target → bubble
//! sequence the responder produces for a key press on an item, which listeners each
//! step selects, and how `Stop` and `StopAndConsume` cut the walk short.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_dispatch`

use understory_dom::{Document, NodeId};
use understory_responder::adapters::dom::DomParents;
use understory_responder::dispatcher;
use understory_responder::listeners::ListenerRegistry;
use understory_responder::router::Router;
use understory_responder::types::{Dispatch, Outcome, Phase};

fn label(doc: &Document, node: NodeId) -> String {
    match (doc.tag(node), doc.attr(node, "role")) {
        (Some(tag), Some(role)) => format!("<{tag} role={role}>"),
        (Some(tag), None) => format!("<{tag}>"),
        _ => "#document".to_string(),
    }
}

fn main() {
    let mut doc = Document::new();
    let body = doc.append_element(doc.root(), "body");
    let container = doc.append_element(body, "div");
    let control = doc.append_element(container, "button");
    doc.set_attr(control, "id", "menu");
    let list = doc.append_element(container, "ul");
    doc.set_attr(list, "role", "menu");
    let item = doc.append_element(list, "li");
    doc.set_attr(item, "role", "menuitem");

    let mut listeners = ListenerRegistry::new();
    listeners.add(doc.root(), "keydown", true, "document capture");
    listeners.add(list, "keydown", true, "list capture");
    listeners.add(item, "keydown", false, "item handler");
    listeners.add(list, "keydown", false, "list bubble");
    listeners.add(body, "keydown", false, "body bubble");

    let seq = Router::with_parent(DomParents(&doc)).dispatch_for(item);
    println!("== Dispatch for a key press on the item ==");
    for d in &seq {
        let names: Vec<_> = listeners.matching(d, &"keydown");
        println!("{:?}\t{}\t{:?}", d.phase, label(&doc, d.node), names);
    }

    let walk = |stop_at: Option<(Phase, &str, Outcome)>| {
        let mut ran: Vec<&str> = Vec::new();
        let consumed = dispatcher::run(&seq, &mut ran, |d: &Dispatch<NodeId>, ran| {
            let mut outcome = Outcome::Continue;
            for name in listeners.matching(d, &"keydown") {
                ran.push(*name);
                if let Some((phase, at, o)) = stop_at
                    && phase == d.phase
                    && at == *name
                {
                    outcome = o;
                }
            }
            outcome
        });
        (ran, consumed)
    };

    println!("\n== Continue everywhere ==");
    println!("{:?}", walk(None));
    println!("\n== Stop in document capture (list capture skipped, target and bubble run) ==");
    println!("{:?}", walk(Some((Phase::Capture, "document capture", Outcome::Stop))));
    println!("\n== StopAndConsume at the item ==");
    println!("{:?}", walk(Some((Phase::Target, "item handler", Outcome::StopAndConsume))));
}
