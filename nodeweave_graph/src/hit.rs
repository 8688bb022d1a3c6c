// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point and rectangle queries over the live objects of a frame.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use nodeweave_canvas::{rects_overlap, segment_distance_sq, segment_intersects_rect};

use crate::graph::Graph;
use crate::types::ObjectKey;

impl Graph {
    /// Find the topmost live object under `pt` (canvas space).
    ///
    /// Nodes are tested front to back along the layering order; within a node its
    /// pins win over its body. Links are tested only when no node claims the point:
    /// a link is hit when `pt` lies within `thickness / 2` of the segment between its
    /// pins, and the closest such link wins (newer slot on ties). Zero-length links
    /// are never hit.
    pub fn hit_test(&self, pt: Point) -> Option<ObjectKey> {
        for &node_key in self.layers().iter().rev() {
            if !self.is_live(node_key) {
                continue;
            }
            let Some(node) = self.node(node_key) else {
                continue;
            };
            let pin = self
                .pins_of(node_key)
                .find(|(key, pin)| self.is_live(*key) && pin.bounds.contains(pt));
            if let Some((key, _)) = pin {
                return Some(key);
            }
            if node.bounds.contains(pt) {
                return Some(node_key);
            }
        }
        self.link_at(pt)
    }

    fn link_at(&self, pt: Point) -> Option<ObjectKey> {
        let mut best: Option<(ObjectKey, f64)> = None;
        for (key, _, link) in self.links() {
            if !self.is_live(key) {
                continue;
            }
            let Some((a, b)) = self.link_endpoints(key) else {
                continue;
            };
            if a == b {
                continue;
            }
            let half = link.thickness * 0.5;
            let d2 = segment_distance_sq(a, b, pt);
            if d2 > half * half {
                continue;
            }
            if best.is_none_or(|(_, best_d2)| d2 <= best_d2) {
                best = Some((key, d2));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Live nodes whose bounds overlap `rect`, back to front.
    ///
    /// A zero-area `rect` yields nothing.
    pub fn nodes_in_rect(&self, rect: Rect) -> Vec<ObjectKey> {
        self.layers()
            .iter()
            .copied()
            .filter(|key| self.is_live(*key))
            .filter(|key| {
                self.node(*key)
                    .is_some_and(|node| rects_overlap(node.bounds, rect))
            })
            .collect()
    }

    /// Live links whose segment touches `rect`.
    ///
    /// A zero-area `rect` and zero-length links yield nothing.
    pub fn links_in_rect(&self, rect: Rect) -> Vec<ObjectKey> {
        self.links()
            .filter(|(key, _, _)| self.is_live(*key))
            .filter(|(key, _, _)| {
                self.link_endpoints(*key)
                    .is_some_and(|(a, b)| segment_intersects_rect(a, b, rect))
            })
            .map(|(key, _, _)| key)
            .collect()
    }

    /// Links declared this frame with an endpoint on one of `node`'s pins.
    pub fn links_for_node(&self, node: ObjectKey) -> Vec<ObjectKey> {
        let touches = |pin: ObjectKey| self.pin_node(pin) == Some(node);
        self.links()
            .filter(|(key, _, _)| self.is_live(*key))
            .filter(|(_, _, link)| touches(link.start) || touches(link.end))
            .map(|(key, _, _)| key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Graph, LinkId, NodeId, ObjectKey, PinId, PinKind};
    use alloc::vec;
    use kurbo::{Point, Rect};

    fn node(graph: &mut Graph, id: u32, bounds: Rect) -> ObjectKey {
        let (key, _) = graph.get_or_create_node(NodeId(id), bounds.origin()).unwrap();
        graph.node_mut(key).unwrap().bounds = bounds;
        graph.push_layer(key);
        key
    }

    fn pin(graph: &mut Graph, id: u32, kind: PinKind, node: ObjectKey, bounds: Rect) -> ObjectKey {
        let (key, _) = graph.get_or_create_pin(PinId(id), kind, node).unwrap();
        let pin = graph.pin_mut(key).unwrap();
        pin.bounds = bounds;
        pin.drag_point = bounds.center();
        key
    }

    fn two_nodes() -> (Graph, ObjectKey, ObjectKey) {
        let mut graph = Graph::new();
        let a = node(&mut graph, 1, Rect::new(0.0, 0.0, 100.0, 60.0));
        pin(&mut graph, 10, PinKind::Output, a, Rect::new(90.0, 20.0, 100.0, 30.0));
        let b = node(&mut graph, 2, Rect::new(300.0, 0.0, 400.0, 60.0));
        pin(&mut graph, 20, PinKind::Input, b, Rect::new(300.0, 20.0, 310.0, 30.0));
        let (link, _) = graph
            .get_or_create_link(LinkId(100), PinId(10), PinId(20))
            .unwrap();
        graph.link_mut(link).unwrap().thickness = 4.0;
        graph.finish_layers();
        (graph, a, b)
    }

    #[test]
    fn pins_win_over_node_body() {
        let (graph, a, _) = two_nodes();
        let hit = graph.hit_test(Point::new(95.0, 25.0)).unwrap();
        assert_eq!(graph.id_of(hit), Some(PinId(10).into()));
        assert_eq!(graph.hit_test(Point::new(50.0, 25.0)), Some(a));
    }

    #[test]
    fn topmost_node_wins() {
        let mut graph = Graph::new();
        let back = node(&mut graph, 1, Rect::new(0.0, 0.0, 100.0, 100.0));
        let top = node(&mut graph, 2, Rect::new(50.0, 50.0, 150.0, 150.0));
        graph.finish_layers();
        assert_eq!(graph.hit_test(Point::new(75.0, 75.0)), Some(top));

        graph.set_front(Some(back));
        graph.finish_layers();
        assert_eq!(graph.hit_test(Point::new(75.0, 75.0)), Some(back));
    }

    #[test]
    fn links_hit_within_half_thickness() {
        let (graph, _, _) = two_nodes();
        let link = graph.find_link(LinkId(100)).unwrap();
        assert_eq!(graph.hit_test(Point::new(200.0, 26.5)), Some(link));
        assert_eq!(graph.hit_test(Point::new(200.0, 28.0)), None);
    }

    #[test]
    fn dead_objects_are_not_hit() {
        let (mut graph, a, _) = two_nodes();
        graph.set_live(a, false);
        assert_eq!(graph.hit_test(Point::new(50.0, 25.0)), None);
    }

    #[test]
    fn rect_queries() {
        let (graph, a, b) = two_nodes();
        let link = graph.find_link(LinkId(100)).unwrap();
        assert_eq!(graph.nodes_in_rect(Rect::new(-10.0, -10.0, 500.0, 10.0)), vec![a, b]);
        assert!(graph.nodes_in_rect(Rect::new(150.0, 0.0, 250.0, 60.0)).is_empty());
        assert_eq!(graph.links_in_rect(Rect::new(150.0, 0.0, 250.0, 60.0)), vec![link]);
        assert!(graph.links_in_rect(Rect::new(150.0, 0.0, 150.0, 60.0)).is_empty());
        assert_eq!(graph.links_for_node(b), vec![link]);
    }

    #[test]
    fn undeclared_links_are_not_incident() {
        let (mut graph, a, _) = two_nodes();
        let link = graph.find_link(LinkId(100)).unwrap();
        graph.set_live(link, false);
        assert!(graph.links_for_node(a).is_empty());
    }
}
