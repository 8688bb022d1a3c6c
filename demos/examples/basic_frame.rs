// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declare two nodes every frame, drag one of them and paint the result.
//!
//! Set `RUST_LOG=nodeweave_editor=trace` to watch the actions start and finish.
//!
//! Run:
//! - `cargo run -p nodeweave_demos --example basic_frame`

use kurbo::{Point, Rect, Size};
use nodeweave_editor::{
    ActionKind, DrawCommand, Editor, Input, PointerButtons, RecordingDrawList, StyleColor,
};
use nodeweave_graph::{Color, LinkId, NodeId, PinId};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const WINDOW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nodeweave_editor=debug,info".into());
    fmt().with_env_filter(filter).with_target(true).init();
}

fn frame(editor: &mut Editor, input: Input) {
    editor.begin(WINDOW, &input);

    editor.begin_node(NodeId(1));
    editor.begin_header(Color::from_rgba8(60, 90, 160, 255));
    editor.end_header(Size::new(120.0, 20.0));
    editor.begin_output(PinId(11));
    editor.end_output(Size::new(20.0, 20.0));
    editor.end_node();

    editor.begin_node(NodeId(2));
    editor.begin_header(Color::from_rgba8(160, 90, 60, 255));
    editor.end_header(Size::new(120.0, 20.0));
    editor.begin_input(PinId(20));
    editor.end_input(Size::new(20.0, 20.0));
    editor.add_content(Size::new(80.0, 40.0));
    editor.end_node();

    editor.link(LinkId(100), PinId(11), PinId(20), Color::WHITE, 2.0);
    editor.end();
}

fn main() {
    init_tracing();

    let mut editor = Editor::default();
    editor.set_node_canvas_position(NodeId(2), Point::new(300.0, 100.0));

    // Grab node 1 by its header and pull it down and to the right.
    let press = PointerButtons::PRIMARY;
    frame(&mut editor, Input::at(Point::new(40.0, 15.0)));
    frame(&mut editor, Input::at(Point::new(40.0, 15.0)).with_buttons(press));
    for step in 1..=5 {
        let at = Point::new(40.0 + 10.0 * f64::from(step), 15.0 + 8.0 * f64::from(step));
        frame(&mut editor, Input::at(at).with_buttons(press));
        assert_eq!(editor.current_action(), Some(ActionKind::Drag));
    }
    frame(&mut editor, Input::at(Point::new(90.0, 55.0)));

    let moved = editor.node_position(NodeId(1));
    info!(?moved, selected = ?editor.selected_nodes(), "drag finished");
    assert_eq!(moved, Some(Point::new(50.0, 40.0)));

    let colors = |role: StyleColor| match role {
        StyleColor::Background => Color::from_rgba8(30, 30, 34, 255),
        StyleColor::Grid => Color::from_rgba8(50, 50, 56, 255),
        StyleColor::SelNodeBorder => Color::from_rgba8(255, 176, 50, 255),
        _ => Color::from_rgba8(200, 200, 200, 255),
    };
    let mut draw = RecordingDrawList::default();
    editor.paint(&mut draw, &colors);
    let fills = draw
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
        .count();
    println!(
        "== Paint ==\n  {} commands: {} fills, {} lines",
        draw.commands.len(),
        fills,
        draw.line_count()
    );

    let mut overlay = RecordingDrawList::default();
    editor.paint_metrics(&mut overlay, &colors, Point::new(8.0, 8.0));
    println!("== Metrics ==");
    for line in overlay.texts() {
        println!("  {line}");
    }
}
