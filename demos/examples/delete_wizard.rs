// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select a node and a link, press Delete, and confirm the deletions one by one.
//!
//! Links are offered before nodes, and the links of a deleted node are offered right
//! after it. The host keeps the link coming out of node 3; the editor drops it anyway
//! once the pin it ends on is gone, and reports it through the link-dropped callback.
//!
//! Run:
//! - `cargo run -p nodeweave_demos --example delete_wizard`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use nodeweave_editor::{Editor, Input, Keys, Modifiers, PointerButtons};
use nodeweave_graph::{Color, LinkId, NodeId, PinId};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const WINDOW: Rect = Rect::new(0.0, 0.0, 1000.0, 600.0);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nodeweave_editor=debug,info".into());
    fmt().with_env_filter(filter).with_target(true).init();
}

#[derive(Debug)]
struct Host {
    nodes: Vec<u32>,
    links: Vec<(u32, u32, u32)>,
    log: Vec<String>,
}

impl Host {
    fn frame(&mut self, editor: &mut Editor, input: Input) {
        editor.begin(WINDOW, &input);
        for &id in &self.nodes {
            editor.begin_node(NodeId(id));
            editor.begin_header(Color::from_rgba8(90, 90, 90, 255));
            editor.end_header(Size::new(120.0, 20.0));
            editor.begin_input(PinId(id * 10));
            editor.end_input(Size::new(20.0, 20.0));
            editor.begin_output(PinId(id * 10 + 1));
            editor.end_output(Size::new(20.0, 20.0));
            editor.end_node();
        }
        for &(id, start, end) in &self.links {
            let declared = [start, end].iter().all(|pin| self.nodes.contains(&(pin / 10)));
            if declared {
                editor.link(LinkId(id), PinId(start), PinId(end), Color::WHITE, 2.0);
            }
        }
        editor.end();

        if editor.begin_delete() {
            while let Some(link) = editor.query_deleted_link() {
                if self.links.iter().any(|l| l.0 == link.0 && l.1 == 31) {
                    self.log.push(format!("kept link {}", link.0));
                    editor.reject_deleted_item();
                } else {
                    self.log.push(format!("deleted link {}", link.0));
                    editor.accept_deleted_item();
                    self.links.retain(|l| l.0 != link.0);
                }
            }
            while let Some(node) = editor.query_deleted_node() {
                self.log.push(format!("deleted node {}", node.0));
                editor.accept_deleted_item();
                self.nodes.retain(|n| *n != node.0);
            }
            editor.end_delete();
        }
    }
}

fn main() {
    init_tracing();

    let mut editor = Editor::default();
    for (id, at) in [(1, (0.0, 0.0)), (2, (300.0, 0.0)), (3, (600.0, 200.0))] {
        editor.set_node_canvas_position(NodeId(id), at.into());
    }
    let dropped = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&dropped);
    editor.set_link_dropped_callback(move |id| sink.borrow_mut().push(id));

    let mut host = Host {
        nodes: vec![1, 2, 3],
        links: vec![(100, 11, 20), (101, 21, 30), (102, 31, 20)],
        log: Vec::new(),
    };

    // Click node 2, shift-click link 100, then press Delete.
    let click = |host: &mut Host, editor: &mut Editor, at: Point, modifiers: Modifiers| {
        let input = Input::at(at).with_modifiers(modifiers);
        host.frame(editor, input.with_buttons(PointerButtons::PRIMARY));
        host.frame(editor, input);
    };
    click(&mut host, &mut editor, Point::new(360.0, 15.0), Modifiers::empty());
    click(&mut host, &mut editor, Point::new(186.0, 42.0), Modifiers::SHIFT);
    info!(nodes = ?editor.selected_nodes(), links = ?editor.selected_links(), "selection");

    host.frame(&mut editor, Input::at(Point::new(500.0, 400.0)).with_keys(Keys::DELETE));
    for _ in 0..4 {
        host.frame(&mut editor, Input::at(Point::new(500.0, 400.0)));
    }

    println!("== Host decisions ==");
    for line in &host.log {
        println!("  {line}");
    }
    println!("== Dropped by the editor ==\n  {:?}", dropped.borrow());

    assert_eq!(host.nodes, vec![1, 3]);
    assert_eq!(*dropped.borrow(), vec![LinkId(102)]);
    assert!(editor.graph().find_link(LinkId(101)).is_none());
}
