// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use nodeweave_editor::{Editor, Input, PointerButtons, RecordingDrawList, StyleColor};
use nodeweave_graph::{Color, LinkId, NodeId, PinId};

const WINDOW: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// Declare an `n` by `n` grid of nodes chained row by row.
fn frame(editor: &mut Editor, n: u32, input: &Input) {
    editor.begin(WINDOW, input);
    for id in 0..n * n {
        editor.begin_node(NodeId(id));
        editor.begin_header(Color::from_rgba8(60, 90, 160, 255));
        editor.end_header(Size::new(100.0, 16.0));
        editor.begin_input(PinId(id * 2 + 1_000_000));
        editor.end_input(Size::new(16.0, 16.0));
        editor.add_content(Size::new(60.0, 40.0));
        editor.begin_output(PinId(id * 2 + 1_000_001));
        editor.end_output(Size::new(16.0, 16.0));
        editor.end_node();
    }
    for id in 0..n * n {
        if id % n != 0 {
            editor.link(
                LinkId(id + 2_000_000),
                PinId((id - 1) * 2 + 1_000_001),
                PinId(id * 2 + 1_000_000),
                Color::WHITE,
                2.0,
            );
        }
    }
    editor.end();
}

fn grid_editor(n: u32) -> Editor {
    let mut editor = Editor::default();
    for y in 0..n {
        for x in 0..n {
            let at = Point::new(f64::from(x) * 180.0, f64::from(y) * 120.0);
            editor.set_node_canvas_position(NodeId(y * n + x), at);
        }
    }
    editor
}

fn bench_idle_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for &n in &[8_u32, 16, 32] {
        let mut editor = grid_editor(n);
        let hover = Input::at(Point::new(400.0, 300.0));
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("idle_n{}", n), |b| {
            b.iter(|| frame(&mut editor, n, black_box(&hover)));
        });
    }
    group.finish();
}

fn bench_drag_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for &n in &[8_u32, 16, 32] {
        let mut editor = grid_editor(n);
        let press = Input::at(Point::new(40.0, 8.0)).with_buttons(PointerButtons::PRIMARY);
        frame(&mut editor, n, &press);
        let mut x = 40.0;
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("dragging_n{}", n), |b| {
            b.iter(|| {
                x = if x > 400.0 { 40.0 } else { x + 7.0 };
                let input = Input::at(Point::new(x, 8.0)).with_buttons(PointerButtons::PRIMARY);
                frame(&mut editor, n, black_box(&input));
            });
        });
    }
    group.finish();
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");
    let colors = |_: StyleColor| Color::WHITE;
    for &n in &[8_u32, 16, 32] {
        let mut editor = grid_editor(n);
        frame(&mut editor, n, &Input::at(Point::new(400.0, 300.0)));
        group.bench_function(format!("record_n{}", n), |b| {
            b.iter(|| {
                let mut draw = RecordingDrawList::default();
                editor.paint(&mut draw, &colors);
                black_box(draw.commands.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_idle_frame, bench_drag_frame, bench_paint);
criterion_main!(benches);
