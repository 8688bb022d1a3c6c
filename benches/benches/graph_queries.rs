// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use nodeweave_graph::{Graph, LinkId, NodeId, PinId, PinKind};

const CELL: f64 = 200.0;
const NODE_W: f64 = 120.0;
const NODE_H: f64 = 60.0;

/// An `n` by `n` grid of nodes, each with one input and one output pin, every
/// output linked to the input of the next node in its row.
fn gen_grid_graph(n: u32) -> Graph {
    let mut graph = Graph::new();
    for y in 0..n {
        for x in 0..n {
            let id = y * n + x;
            let origin = Point::new(f64::from(x) * CELL, f64::from(y) * CELL);
            let (node, _) = graph.get_or_create_node(NodeId(id), origin).unwrap();
            graph.node_mut(node).unwrap().bounds =
                Rect::from_origin_size(origin, (NODE_W, NODE_H));
            graph.push_layer(node);

            let (input, _) = graph
                .get_or_create_pin(PinId(id * 2 + 1_000_000), PinKind::Input, node)
                .unwrap();
            let pin = graph.pin_mut(input).unwrap();
            pin.bounds = Rect::from_origin_size(origin + (0.0, 30.0), (20.0, 20.0));
            pin.drag_point = origin + (0.0, 40.0);

            let (output, _) = graph
                .get_or_create_pin(PinId(id * 2 + 1_000_001), PinKind::Output, node)
                .unwrap();
            let pin = graph.pin_mut(output).unwrap();
            pin.bounds = Rect::from_origin_size(origin + (NODE_W - 20.0, 30.0), (20.0, 20.0));
            pin.drag_point = origin + (NODE_W, 40.0);
        }
    }
    for y in 0..n {
        for x in 1..n {
            let from = y * n + x - 1;
            let to = y * n + x;
            let _ = graph.get_or_create_link(
                LinkId(to + 2_000_000),
                PinId(from * 2 + 1_000_001),
                PinId(to * 2 + 1_000_000),
            );
        }
    }
    graph.finish_layers();
    graph
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &n in &[8_u32, 16, 32] {
        let graph = gen_grid_graph(n);
        let extent = f64::from(n) * CELL;
        // Over a node body, over a pin, in a link gap and over empty canvas.
        let probes = [
            Point::new(extent * 0.5 + 50.0, extent * 0.5 + 10.0),
            Point::new(extent * 0.5 + 10.0, extent * 0.5 + 40.0),
            Point::new(extent * 0.5 + 160.0, extent * 0.5 + 40.0),
            Point::new(extent * 0.5 + 160.0, extent * 0.5 + 150.0),
        ];
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("probes_n{}", n), |b| {
            b.iter(|| {
                for p in probes {
                    black_box(graph.hit_test(black_box(p)));
                }
            });
        });
    }
    group.finish();
}

fn bench_marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("marquee");
    for &n in &[8_u32, 16, 32] {
        let graph = gen_grid_graph(n);
        let extent = f64::from(n) * CELL;
        let rect = Rect::new(extent * 0.25, extent * 0.25, extent * 0.75, extent * 0.75);
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("nodes_in_rect_n{}", n), |b| {
            b.iter(|| black_box(graph.nodes_in_rect(black_box(rect))).len());
        });
        group.bench_function(format!("links_in_rect_n{}", n), |b| {
            b.iter(|| black_box(graph.links_in_rect(black_box(rect))).len());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_marquee);
criterion_main!(benches);
