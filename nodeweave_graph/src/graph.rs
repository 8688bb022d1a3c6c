// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The object arena: creation, lookup, liveness, layering and destruction.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::error::GraphError;
use crate::object::{Link, Node, Object, Pin};
use crate::types::{Color, LinkId, NodeId, ObjectId, ObjectKey, ObjectKind, PinId, PinKind};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    id: ObjectId,
    live: bool,
    object: Object,
}

/// Arena of nodes, pins and links addressed by caller ids.
///
/// Objects live in generational slots and refer to each other by [`ObjectKey`],
/// so destroying a node never leaves a dangling reference: stale keys simply stop
/// resolving.
///
/// ## Liveness
///
/// Every object carries a `live` flag meaning "declared during the current frame".
/// [`Graph::mark_all_dead`] clears it at the start of a frame and the
/// `get_or_create_*` calls set it again. Objects that are not live keep their
/// state (bounds, settings) but are skipped by hit testing and rectangle queries.
///
/// ## Layering
///
/// Nodes are pushed on the layering order as they finish staging, back to front.
/// [`Graph::finish_layers`] then promotes the [front](Graph::set_front) node.
pub struct Graph {
    slots: Vec<Option<Slot>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    ids: BTreeMap<u32, ObjectKey>,
    layers: Vec<ObjectKey>,
    front: Option<ObjectKey>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Graph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let count = |kind: ObjectKind| {
            self.slots
                .iter()
                .flatten()
                .filter(|s| s.object.kind() == kind)
                .count()
        };
        f.debug_struct("Graph")
            .field("nodes", &count(ObjectKind::Node))
            .field("pins", &count(ObjectKind::Pin))
            .field("links", &count(ObjectKind::Link))
            .field("free_list", &self.free_list.len())
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            ids: BTreeMap::new(),
            layers: Vec::new(),
            front: None,
        }
    }

    /// Number of objects of all kinds.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn alloc(&mut self, id: ObjectId, object: Object) -> ObjectKey {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot {
                generation,
                id,
                live: true,
                object,
            });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot {
                generation,
                id,
                live: true,
                object,
            }));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ObjectKey uses 32-bit indices by design."
        )]
        let key = ObjectKey::new(idx as u32, generation);
        self.ids.insert(id.raw(), key);
        key
    }

    fn free(&mut self, key: ObjectKey) {
        let Some(slot) = self.slot(key) else {
            return;
        };
        let raw = slot.id.raw();
        if self.ids.get(&raw) == Some(&key) {
            self.ids.remove(&raw);
        }
        self.slots[key.idx()] = None;
        self.free_list.push(key.idx());
        self.layers.retain(|k| *k != key);
        if self.front == Some(key) {
            self.front = None;
        }
    }

    fn slot(&self, key: ObjectKey) -> Option<&Slot> {
        self.slots
            .get(key.idx())
            .and_then(Option::as_ref)
            .filter(|s| s.generation == key.1)
    }

    fn slot_mut(&mut self, key: ObjectKey) -> Option<&mut Slot> {
        self.slots
            .get_mut(key.idx())
            .and_then(Option::as_mut)
            .filter(|s| s.generation == key.1)
    }

    /// Resolve a raw caller id regardless of kind.
    pub fn find(&self, raw: u32) -> Option<ObjectKey> {
        self.ids.get(&raw).copied()
    }

    /// Resolve a kind-tagged id. Returns `None` if the id names another kind.
    pub fn find_id(&self, id: ObjectId) -> Option<ObjectKey> {
        self.find(id.raw())
            .filter(|key| self.kind(*key) == Some(id.kind()))
    }

    /// Resolve a node id.
    pub fn find_node(&self, id: NodeId) -> Option<ObjectKey> {
        self.find_id(id.into())
    }

    /// Resolve a pin id.
    pub fn find_pin(&self, id: PinId) -> Option<ObjectKey> {
        self.find_id(id.into())
    }

    /// Resolve a link id.
    pub fn find_link(&self, id: LinkId) -> Option<ObjectKey> {
        self.find_id(id.into())
    }

    fn existing(&self, id: ObjectId) -> Result<Option<ObjectKey>, GraphError> {
        let Some(key) = self.find(id.raw()) else {
            return Ok(None);
        };
        match self.kind(key) {
            Some(found) if found != id.kind() => Err(GraphError::KindMismatch {
                id: id.raw(),
                expected: id.kind(),
                found,
            }),
            _ => Ok(Some(key)),
        }
    }

    /// Look up node `id`, creating it with empty bounds at `origin` if unseen.
    ///
    /// The node is marked live. Returns the key and whether it was created.
    pub fn get_or_create_node(
        &mut self,
        id: NodeId,
        origin: Point,
    ) -> Result<(ObjectKey, bool), GraphError> {
        if let Some(key) = self.existing(id.into())? {
            self.set_live(key, true);
            return Ok((key, false));
        }
        let key = self.alloc(id.into(), Object::Node(Node::new(origin)));
        Ok((key, true))
    }

    /// Look up pin `id` under `node`, creating it if unseen, and chain it to the
    /// node's previously registered pin.
    ///
    /// An existing pin takes the given kind and owner. The pin is marked live.
    pub fn get_or_create_pin(
        &mut self,
        id: PinId,
        kind: PinKind,
        node: ObjectKey,
    ) -> Result<(ObjectKey, bool), GraphError> {
        let previous = self.node(node).ok_or(GraphError::StaleKey)?.last_pin;
        let (key, created) = match self.existing(id.into())? {
            Some(key) => {
                let pin = self.pin_mut(key).ok_or(GraphError::StaleKey)?;
                pin.kind = kind;
                pin.node = node;
                self.set_live(key, true);
                (key, false)
            }
            None => {
                let pin = Pin {
                    kind,
                    node,
                    bounds: Rect::ZERO,
                    drag_point: Point::ZERO,
                    previous_pin: None,
                };
                (self.alloc(id.into(), Object::Pin(pin)), true)
            }
        };
        if previous != Some(key) {
            if let Some(pin) = self.pin_mut(key) {
                pin.previous_pin = previous;
            }
            if let Some(n) = self.node_mut(node) {
                n.last_pin = Some(key);
            }
        }
        Ok((key, created))
    }

    /// Look up link `id`, creating it if unseen, and point it at the two pins.
    ///
    /// New links are white with thickness 1. The link is marked live.
    pub fn get_or_create_link(
        &mut self,
        id: LinkId,
        start: PinId,
        end: PinId,
    ) -> Result<(ObjectKey, bool), GraphError> {
        let start_key = self.find_pin(start).ok_or(GraphError::UnknownPin(start))?;
        let end_key = self.find_pin(end).ok_or(GraphError::UnknownPin(end))?;
        match self.existing(id.into())? {
            Some(key) => {
                let link = self.link_mut(key).ok_or(GraphError::StaleKey)?;
                link.start = start_key;
                link.end = end_key;
                self.set_live(key, true);
                Ok((key, false))
            }
            None => {
                let link = Link {
                    start: start_key,
                    end: end_key,
                    color: Color::WHITE,
                    thickness: 1.0,
                };
                Ok((self.alloc(id.into(), Object::Link(link)), true))
            }
        }
    }

    /// Returns true if `key` refers to an existing object.
    pub fn is_alive(&self, key: ObjectKey) -> bool {
        self.slot(key).is_some()
    }

    /// Returns true if `key` exists and was declared during the current frame.
    pub fn is_live(&self, key: ObjectKey) -> bool {
        self.slot(key).is_some_and(|s| s.live)
    }

    /// Set or clear the live flag of an object.
    pub fn set_live(&mut self, key: ObjectKey, live: bool) {
        if let Some(slot) = self.slot_mut(key) {
            slot.live = live;
        }
    }

    /// Clear the live flag of every object and empty the layering order.
    pub fn mark_all_dead(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.live = false;
            if let Object::Node(node) = &mut slot.object {
                node.last_pin = None;
            }
        }
        self.layers.clear();
    }

    /// Kind of the object behind `key`.
    pub fn kind(&self, key: ObjectKey) -> Option<ObjectKind> {
        self.slot(key).map(|s| s.object.kind())
    }

    /// Caller id of the object behind `key`.
    pub fn id_of(&self, key: ObjectKey) -> Option<ObjectId> {
        self.slot(key).map(|s| s.id)
    }

    /// The object behind `key`.
    pub fn object(&self, key: ObjectKey) -> Option<&Object> {
        self.slot(key).map(|s| &s.object)
    }

    /// The node behind `key`.
    pub fn node(&self, key: ObjectKey) -> Option<&Node> {
        self.object(key).and_then(Object::as_node)
    }

    /// The pin behind `key`.
    pub fn pin(&self, key: ObjectKey) -> Option<&Pin> {
        self.object(key).and_then(Object::as_pin)
    }

    /// The link behind `key`.
    pub fn link(&self, key: ObjectKey) -> Option<&Link> {
        self.object(key).and_then(Object::as_link)
    }

    /// Mutable node behind `key`.
    pub fn node_mut(&mut self, key: ObjectKey) -> Option<&mut Node> {
        self.slot_mut(key).and_then(|s| s.object.as_node_mut())
    }

    /// Mutable pin behind `key`.
    pub fn pin_mut(&mut self, key: ObjectKey) -> Option<&mut Pin> {
        self.slot_mut(key).and_then(|s| s.object.as_pin_mut())
    }

    /// Mutable link behind `key`.
    pub fn link_mut(&mut self, key: ObjectKey) -> Option<&mut Link> {
        self.slot_mut(key).and_then(|s| s.object.as_link_mut())
    }

    /// All existing objects with their keys and ids, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, ObjectId, &Object)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let slot = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ObjectKey uses 32-bit indices by design."
            )]
            let key = ObjectKey::new(idx as u32, slot.generation);
            Some((key, slot.id, &slot.object))
        })
    }

    /// Existing nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (ObjectKey, NodeId, &Node)> + '_ {
        self.iter().filter_map(|(key, id, object)| match (id, object) {
            (ObjectId::Node(id), Object::Node(node)) => Some((key, id, node)),
            _ => None,
        })
    }

    /// Existing links in slot order.
    pub fn links(&self) -> impl Iterator<Item = (ObjectKey, LinkId, &Link)> + '_ {
        self.iter().filter_map(|(key, id, object)| match (id, object) {
            (ObjectId::Link(id), Object::Link(link)) => Some((key, id, link)),
            _ => None,
        })
    }

    /// Pins registered under `node` this frame, most recent first.
    pub fn pins_of(&self, node: ObjectKey) -> PinChain<'_> {
        PinChain {
            graph: self,
            next: self.node(node).and_then(|n| n.last_pin),
            remaining: self.slots.len(),
        }
    }

    /// The node owning `pin`.
    pub fn pin_node(&self, pin: ObjectKey) -> Option<ObjectKey> {
        self.pin(pin).map(|p| p.node)
    }

    /// Attachment points of a link's two pins, in canvas space.
    pub fn link_endpoints(&self, link: ObjectKey) -> Option<(Point, Point)> {
        let link = self.link(link)?;
        let a = self.pin(link.start)?.drag_point;
        let b = self.pin(link.end)?.drag_point;
        Some((a, b))
    }

    /// Whether a link declared this frame joins pins `a` and `b`, in either direction.
    pub fn has_link(&self, a: ObjectKey, b: ObjectKey) -> bool {
        self.links().any(|(key, _, l)| {
            self.is_live(key) && ((l.start == a && l.end == b) || (l.start == b && l.end == a))
        })
    }

    /// Whether `link` lost a pin, or the node owning one.
    ///
    /// Returns `false` for keys that are not links.
    pub fn is_dangling(&self, link: ObjectKey) -> bool {
        let endpoint_ok =
            |pin: ObjectKey| self.pin(pin).is_some_and(|p| self.node(p.node).is_some());
        self.link(link)
            .is_some_and(|l| !(endpoint_ok(l.start) && endpoint_ok(l.end)))
    }

    /// Move a node's origin to `origin`, carrying its header and pins along.
    ///
    /// Returns `false` if `key` is not a node.
    pub fn move_node(&mut self, key: ObjectKey, origin: Point) -> bool {
        let Some(node) = self.node_mut(key) else {
            return false;
        };
        let shift = origin - node.bounds.origin();
        node.bounds = node.bounds + shift;
        if let Some((header, _)) = &mut node.header {
            *header = *header + shift;
        }
        for slot in self.slots.iter_mut().flatten() {
            if let Object::Pin(pin) = &mut slot.object {
                if pin.node == key {
                    pin.bounds = pin.bounds + shift;
                    pin.drag_point += shift;
                }
            }
        }
        true
    }

    /// Destroy the object behind `key`. Returns `false` if it did not exist.
    ///
    /// Destroying a node also destroys its pins. Links touching those pins stay
    /// until [`Graph::prune_dangling_links`] drops them.
    pub fn destroy(&mut self, key: ObjectKey) -> bool {
        let Some(kind) = self.kind(key) else {
            return false;
        };
        if kind == ObjectKind::Node {
            let pins: Vec<ObjectKey> = self
                .iter()
                .filter_map(|(k, _, o)| o.as_pin().filter(|p| p.node == key).map(|_| k))
                .collect();
            for pin in pins {
                self.free(pin);
            }
        }
        self.free(key);
        true
    }

    /// Destroy every link whose pins (or their nodes) no longer exist, except those
    /// in `protected`. Returns the ids of the dropped links.
    pub fn prune_dangling_links(&mut self, protected: &[ObjectKey]) -> Vec<LinkId> {
        let dangling: Vec<(ObjectKey, LinkId)> = self
            .links()
            .filter(|(key, _, _)| !protected.contains(key) && self.is_dangling(*key))
            .map(|(key, id, _)| (key, id))
            .collect();
        for (key, _) in &dangling {
            self.free(*key);
        }
        dangling.into_iter().map(|(_, id)| id).collect()
    }

    /// Append a node to the layering order of the current frame.
    pub fn push_layer(&mut self, node: ObjectKey) {
        if self.node(node).is_some() && !self.layers.contains(&node) {
            self.layers.push(node);
        }
    }

    /// Promote `node` to the front of the layering order from now on.
    pub fn set_front(&mut self, node: Option<ObjectKey>) {
        self.front = node;
    }

    /// The node promoted to the front, if any.
    pub fn front(&self) -> Option<ObjectKey> {
        self.front
    }

    /// Move the front node last and assign every layered node its channel.
    pub fn finish_layers(&mut self) {
        if let Some(front) = self.front {
            if let Some(pos) = self.layers.iter().position(|k| *k == front) {
                let key = self.layers.remove(pos);
                self.layers.push(key);
            }
        }
        for channel in 0..self.layers.len() {
            let key = self.layers[channel];
            if let Some(node) = self.node_mut(key) {
                node.channel = channel;
            }
        }
    }

    /// Nodes of the current frame, back to front.
    pub fn layers(&self) -> &[ObjectKey] {
        &self.layers
    }
}

/// Iterator over the pins registered under one node, most recent first.
///
/// Returned by [`Graph::pins_of`].
#[derive(Clone, Debug)]
pub struct PinChain<'a> {
    graph: &'a Graph,
    next: Option<ObjectKey>,
    remaining: usize,
}

impl<'a> Iterator for PinChain<'a> {
    type Item = (ObjectKey, &'a Pin);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let key = self.next?;
        let pin = self.graph.pin(key)?;
        self.next = pin.previous_pin;
        Some((key, pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn node_with_pins(graph: &mut Graph, node: u32, pins: &[(u32, PinKind)]) -> ObjectKey {
        let (key, _) = graph.get_or_create_node(NodeId(node), Point::ZERO).unwrap();
        for (pin, kind) in pins {
            graph.get_or_create_pin(PinId(*pin), *kind, key).unwrap();
        }
        key
    }

    #[test]
    fn creates_once_and_reuses_by_id() {
        let mut graph = Graph::new();
        let (a, created) = graph.get_or_create_node(NodeId(1), Point::new(5.0, 5.0)).unwrap();
        assert!(created, "first reference creates");
        let (b, created) = graph.get_or_create_node(NodeId(1), Point::ZERO).unwrap();
        assert!(!created, "second reference reuses");
        assert_eq!(a, b);
        assert_eq!(graph.node(a).unwrap().bounds.origin(), Point::new(5.0, 5.0));
        assert_eq!(graph.find_node(NodeId(1)), Some(a));
        assert_eq!(graph.find_pin(PinId(1)), None, "kind-tagged lookup");
    }

    #[test]
    fn raw_id_reuse_across_kinds_is_refused() {
        let mut graph = Graph::new();
        let node = node_with_pins(&mut graph, 1, &[]);
        let err = graph.get_or_create_pin(PinId(1), PinKind::Input, node).unwrap_err();
        assert_eq!(
            err,
            GraphError::KindMismatch {
                id: 1,
                expected: ObjectKind::Pin,
                found: ObjectKind::Node,
            }
        );
    }

    #[test]
    fn pins_chain_in_registration_order() {
        let mut graph = Graph::new();
        let node = node_with_pins(
            &mut graph,
            1,
            &[(10, PinKind::Input), (11, PinKind::Output), (12, PinKind::Output)],
        );
        let ids: Vec<_> = graph
            .pins_of(node)
            .map(|(k, _)| graph.id_of(k).unwrap().raw())
            .collect();
        assert_eq!(ids, vec![12, 11, 10]);

        // A new frame rebuilds the chain from scratch.
        graph.mark_all_dead();
        assert_eq!(graph.pins_of(node).count(), 0);
        graph.get_or_create_pin(PinId(11), PinKind::Output, node).unwrap();
        assert_eq!(graph.pins_of(node).count(), 1);
    }

    #[test]
    fn liveness_follows_frames() {
        let mut graph = Graph::new();
        let node = node_with_pins(&mut graph, 1, &[]);
        assert!(graph.is_live(node), "created objects are live");
        graph.mark_all_dead();
        assert!(!graph.is_live(node), "new frame clears liveness");
        assert!(graph.is_alive(node), "but keeps the object");
        graph.get_or_create_node(NodeId(1), Point::ZERO).unwrap();
        assert!(graph.is_live(node), "declaring it again revives it");
    }

    #[test]
    fn destroying_node_cascades_to_pins_and_leaves_links_dangling() {
        let mut graph = Graph::new();
        let n1 = node_with_pins(&mut graph, 1, &[(10, PinKind::Output)]);
        let _n2 = node_with_pins(&mut graph, 2, &[(20, PinKind::Input)]);
        let (link, _) = graph
            .get_or_create_link(LinkId(100), PinId(10), PinId(20))
            .unwrap();
        let pin = graph.find_pin(PinId(10)).unwrap();

        assert!(graph.destroy(n1), "node existed");
        assert!(!graph.is_alive(n1), "node gone");
        assert!(!graph.is_alive(pin), "its pins are gone too");
        assert!(graph.is_alive(link), "links are dropped lazily");

        assert!(graph.prune_dangling_links(&[link]).is_empty(), "protected");
        assert_eq!(graph.prune_dangling_links(&[]), vec![LinkId(100)]);
        assert!(!graph.is_alive(link), "pruned");
        assert_eq!(graph.find_link(LinkId(100)), None);
    }

    #[test]
    fn freed_slots_are_reused_with_new_generation() {
        let mut graph = Graph::new();
        let a = node_with_pins(&mut graph, 1, &[]);
        assert!(graph.destroy(a), "destroyed");
        let b = node_with_pins(&mut graph, 2, &[]);
        assert_eq!(a.idx(), b.idx(), "slot reused");
        assert_ne!(a, b, "generation bumped");
        assert!(graph.node(a).is_none(), "stale key does not alias");
    }

    #[test]
    fn unknown_pin_for_link() {
        let mut graph = Graph::new();
        node_with_pins(&mut graph, 1, &[(10, PinKind::Output)]);
        let err = graph
            .get_or_create_link(LinkId(100), PinId(10), PinId(99))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownPin(PinId(99)));
    }

    #[test]
    fn has_link_checks_both_directions() {
        let mut graph = Graph::new();
        node_with_pins(&mut graph, 1, &[(10, PinKind::Output)]);
        node_with_pins(&mut graph, 2, &[(20, PinKind::Input)]);
        graph
            .get_or_create_link(LinkId(100), PinId(10), PinId(20))
            .unwrap();
        let a = graph.find_pin(PinId(10)).unwrap();
        let b = graph.find_pin(PinId(20)).unwrap();
        assert!(graph.has_link(a, b), "forward");
        assert!(graph.has_link(b, a), "reverse");

        graph.mark_all_dead();
        assert!(!graph.has_link(a, b), "undeclared links no longer count");
    }

    #[test]
    fn dangling_means_a_lost_endpoint() {
        let mut graph = Graph::new();
        let n1 = node_with_pins(&mut graph, 1, &[(10, PinKind::Output)]);
        node_with_pins(&mut graph, 2, &[(20, PinKind::Input)]);
        let (link, _) = graph
            .get_or_create_link(LinkId(100), PinId(10), PinId(20))
            .unwrap();
        graph.mark_all_dead();
        assert!(!graph.is_dangling(link), "undeclared but intact");
        graph.destroy(n1);
        assert!(graph.is_dangling(link), "pin 10 went with its node");
        assert!(!graph.is_dangling(n1), "not a link");
    }

    #[test]
    fn front_node_moves_last() {
        let mut graph = Graph::new();
        let a = node_with_pins(&mut graph, 1, &[]);
        let b = node_with_pins(&mut graph, 2, &[]);
        let c = node_with_pins(&mut graph, 3, &[]);
        graph.set_front(Some(a));
        for key in [a, b, c] {
            graph.push_layer(key);
        }
        graph.finish_layers();
        assert_eq!(graph.layers(), &[b, c, a]);
        assert_eq!(graph.node(a).unwrap().channel, 2);
        assert_eq!(graph.node(b).unwrap().channel, 0);
    }

    #[test]
    fn moving_a_node_carries_its_pins() {
        let mut graph = Graph::new();
        let node = node_with_pins(&mut graph, 1, &[(10, PinKind::Output)]);
        let pin = graph.find_pin(PinId(10)).unwrap();
        graph.node_mut(node).unwrap().bounds = Rect::new(0.0, 0.0, 50.0, 40.0);
        {
            let p = graph.pin_mut(pin).unwrap();
            p.bounds = Rect::new(40.0, 10.0, 50.0, 20.0);
            p.drag_point = Point::new(50.0, 15.0);
        }
        assert!(graph.move_node(node, Point::new(100.0, 5.0)), "node moved");
        assert_eq!(graph.node(node).unwrap().bounds, Rect::new(100.0, 5.0, 150.0, 45.0));
        assert_eq!(graph.pin(pin).unwrap().drag_point, Point::new(150.0, 20.0));
        assert!(!graph.move_node(pin, Point::ZERO), "pins are not nodes");
    }
}
