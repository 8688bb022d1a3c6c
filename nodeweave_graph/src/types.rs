// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers, kinds and colors shared by the graph and the editor.

use core::fmt;

/// Caller-chosen identifier of a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Caller-chosen identifier of a pin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u32);

/// Caller-chosen identifier of a link.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(pub u32);

/// A caller identifier tagged with the kind of object it names.
///
/// Raw ids are unique across all three kinds within one graph. Using the same
/// integer for, say, a node and a pin is a caller error: the second use is
/// refused with [`GraphError::KindMismatch`](crate::GraphError::KindMismatch).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectId {
    /// A node.
    Node(NodeId),
    /// A pin.
    Pin(PinId),
    /// A link.
    Link(LinkId),
}

impl ObjectId {
    /// The raw caller integer.
    pub const fn raw(self) -> u32 {
        match self {
            Self::Node(NodeId(id)) | Self::Pin(PinId(id)) | Self::Link(LinkId(id)) => id,
        }
    }

    /// Which kind of object this id names.
    pub const fn kind(self) -> ObjectKind {
        match self {
            Self::Node(_) => ObjectKind::Node,
            Self::Pin(_) => ObjectKind::Pin,
            Self::Link(_) => ObjectKind::Link,
        }
    }
}

impl From<NodeId> for ObjectId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<PinId> for ObjectId {
    fn from(id: PinId) -> Self {
        Self::Pin(id)
    }
}

impl From<LinkId> for ObjectId {
    fn from(id: LinkId) -> Self {
        Self::Link(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node {}", id.0),
            Self::Pin(id) => write!(f, "pin {}", id.0),
            Self::Link(id) => write!(f, "link {}", id.0),
        }
    }
}

/// The closed set of object kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A node.
    Node,
    /// A pin.
    Pin,
    /// A link.
    Link,
}

/// Direction of a pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PinKind {
    /// Accepts links.
    Input,
    /// Emits links.
    Output,
}

/// Arena handle of a graph object.
///
/// A slot index plus a generation counter, like the ids of a slot arena:
///
/// - On create, a fresh slot is allocated with generation `1`.
/// - On destroy, the slot is freed; existing keys for that slot become stale.
/// - On reuse of a freed slot, its generation is incremented.
///
/// Stale keys never alias a different live object because the generation must match.
/// Use [`Graph::is_alive`](crate::Graph::is_alive) to check a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey(pub(crate) u32, pub(crate) u32);

impl ObjectKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque white, the default link color.
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);

    /// Build a color from its four channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with another alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
