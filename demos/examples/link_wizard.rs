// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a link out of a pin and answer the creation wizard like a host would.
//!
//! The first drop lands on a compatible pin and is accepted; the second lands on
//! empty canvas and proposes a node, which the host declines.
//!
//! Run:
//! - `cargo run -p nodeweave_demos --example link_wizard`

use kurbo::{Point, Rect, Size};
use nodeweave_editor::{CreateStage, Editor, Input, PointerButtons, Query, QueryResult};
use nodeweave_graph::{Color, LinkId, NodeId, PinId};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const WINDOW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nodeweave_editor=debug,info".into());
    fmt().with_env_filter(filter).with_target(true).init();
}

/// The host's side: the links it declares every frame.
#[derive(Debug, Default)]
struct Host {
    links: Vec<(LinkId, PinId, PinId)>,
    next_link: u32,
}

impl Host {
    fn frame(&mut self, editor: &mut Editor, input: Input) {
        editor.begin(WINDOW, &input);
        for (node, input_pin, output_pin) in [(1, 10, 11), (2, 20, 21)] {
            editor.begin_node(NodeId(node));
            editor.begin_header(Color::from_rgba8(60, 90, 160, 255));
            editor.end_header(Size::new(120.0, 20.0));
            editor.begin_input(PinId(input_pin));
            editor.end_input(Size::new(20.0, 20.0));
            editor.begin_output(PinId(output_pin));
            editor.end_output(Size::new(20.0, 20.0));
            editor.end_node();
        }
        for &(id, start, end) in &self.links {
            editor.link(id, start, end, Color::from_rgba8(120, 200, 120, 255), 2.0);
        }
        editor.end();

        if editor.begin_create() {
            match editor.query_new_link() {
                Query::True((start, end)) => {
                    self.next_link += 1;
                    let id = LinkId(100 + self.next_link);
                    info!(?id, ?start, ?end, "link accepted");
                    assert_eq!(editor.accept_new_item(), QueryResult::True);
                    self.links.push((id, start, end));
                }
                Query::False(_) | Query::Indeterminate => {}
            }
            if let Query::True(from) = editor.query_new_node() {
                info!(?from, at = ?editor.new_node_position(), "node proposal declined");
                editor.reject_new_item();
            }
            editor.end_create();
        }
    }

    fn drag(&mut self, editor: &mut Editor, from: Point, to: Point) {
        let press = PointerButtons::PRIMARY;
        self.frame(editor, Input::at(from).with_buttons(press));
        let mid = from.midpoint(to);
        self.frame(editor, Input::at(mid).with_buttons(press));
        if let Some((a, b)) = editor.create_preview() {
            println!("  preview {a:?} -> {b:?}");
        }
        self.frame(editor, Input::at(to).with_buttons(press));
        self.frame(editor, Input::at(to));
        self.frame(editor, Input::at(to));
    }
}

fn main() {
    init_tracing();

    let mut editor = Editor::default();
    editor.set_node_canvas_position(NodeId(2), Point::new(300.0, 0.0));
    editor.set_create_style(Color::from_rgba8(255, 220, 80, 255), 3.0);
    let mut host = Host::default();

    println!("== Output 11 onto input 20 ==");
    host.drag(&mut editor, Point::new(54.0, 42.0), Point::new(318.0, 42.0));
    assert_eq!(host.links, vec![(LinkId(101), PinId(11), PinId(20))]);
    assert_eq!(editor.create_stage(), CreateStage::None);

    println!("== Output 21 onto empty canvas ==");
    host.drag(&mut editor, Point::new(354.0, 42.0), Point::new(500.0, 300.0));
    assert_eq!(host.links.len(), 1);

    println!("== Same gesture again is not a duplicate ==");
    host.drag(&mut editor, Point::new(318.0, 42.0), Point::new(54.0, 42.0));
    assert_eq!(host.links.len(), 1);

    println!("links: {:?}", host.links);
}
