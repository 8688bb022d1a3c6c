// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payloads of the three object kinds.

use kurbo::{Point, Rect, Size};

use crate::types::{Color, ObjectKey, ObjectKind, PinKind};

/// A node: a rectangle in canvas space that owns pins.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Bounds in canvas space, refreshed by layout staging and moved by dragging.
    pub bounds: Rect,
    /// Position in the layering order of the last frame (0 = back).
    pub channel: usize,
    /// The pin registered most recently under this node during the current frame.
    pub last_pin: Option<ObjectKey>,
    /// Origin captured when a drag started.
    pub drag_start: Point,
    /// Header rectangle and fill color, when the node declared a header.
    pub header: Option<(Rect, Color)>,
}

impl Node {
    /// A node with empty bounds at `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            bounds: Rect::from_origin_size(origin, Size::ZERO),
            channel: 0,
            last_pin: None,
            drag_start: origin,
            header: None,
        }
    }
}

/// A pin: a connection point owned by a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    /// Direction.
    pub kind: PinKind,
    /// Owning node.
    pub node: ObjectKey,
    /// Bounds in canvas space.
    pub bounds: Rect,
    /// Where links attach, in canvas space.
    pub drag_point: Point,
    /// The pin registered before this one under the same node, this frame.
    pub previous_pin: Option<ObjectKey>,
}

/// A link between two pins.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    /// Start pin.
    pub start: ObjectKey,
    /// End pin.
    pub end: ObjectKey,
    /// Display color.
    pub color: Color,
    /// Display thickness in canvas units.
    pub thickness: f64,
}

/// A graph object: one of the three kinds, with its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    /// A node.
    Node(Node),
    /// A pin.
    Pin(Pin),
    /// A link.
    Link(Link),
}

impl Object {
    /// Which kind of object this is.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Node(_) => ObjectKind::Node,
            Self::Pin(_) => ObjectKind::Pin,
            Self::Link(_) => ObjectKind::Link,
        }
    }

    /// The node payload, if this is a node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// The pin payload, if this is a pin.
    pub fn as_pin(&self) -> Option<&Pin> {
        match self {
            Self::Pin(p) => Some(p),
            _ => None,
        }
    }

    /// The link payload, if this is a link.
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(l) => Some(l),
            _ => None,
        }
    }

    /// Mutable node payload.
    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Mutable pin payload.
    pub fn as_pin_mut(&mut self) -> Option<&mut Pin> {
        match self {
            Self::Pin(p) => Some(p),
            _ => None,
        }
    }

    /// Mutable link payload.
    pub fn as_link_mut(&mut self) -> Option<&mut Link> {
        match self {
            Self::Link(l) => Some(l),
            _ => None,
        }
    }
}
