// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nodeweave Graph: the object model of a node editor.
//!
//! A [`Graph`] owns nodes, pins and links addressed by caller-chosen 32-bit ids.
//! Objects are stored as a closed [`Object`] enum in a generational slot arena and
//! refer to each other by [`ObjectKey`], so a pin's owner or a link's endpoints are
//! plain lookups rather than references.
//!
//! - Pins belong to a node; destroying the node destroys its pins.
//! - Links join two pins. A link whose pins disappeared stays in the arena until
//!   [`Graph::prune_dangling_links`] drops it and reports its id.
//! - Every object has a per-frame `live` flag. Hit testing, rectangle and incidence
//!   queries and [`Graph::has_link`] only see objects declared during the current frame.
//!
//! ## Queries
//!
//! - [`Graph::hit_test`]: topmost node or pin under a point, else the nearest link
//!   within half its thickness.
//! - [`Graph::nodes_in_rect`], [`Graph::links_in_rect`]: marquee candidates.
//! - [`Graph::links_for_node`]: links incident to a node's pins.
//!
//! [`Selection`] keeps an ordered set of selected keys with change tracking.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use nodeweave_graph::{Graph, NodeId, PinId, PinKind};
//!
//! let mut graph = Graph::new();
//! let (node, created) = graph.get_or_create_node(NodeId(1), Point::ZERO).unwrap();
//! assert!(created);
//! graph.node_mut(node).unwrap().bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
//! graph.push_layer(node);
//!
//! let (pin, _) = graph.get_or_create_pin(PinId(10), PinKind::Output, node).unwrap();
//! graph.pin_mut(pin).unwrap().bounds = Rect::new(90.0, 20.0, 100.0, 30.0);
//! graph.finish_layers();
//!
//! assert_eq!(graph.hit_test(Point::new(95.0, 25.0)), Some(pin));
//! assert_eq!(graph.hit_test(Point::new(10.0, 10.0)), Some(node));
//! assert_eq!(graph.hit_test(Point::new(200.0, 10.0)), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod graph;
mod hit;
mod object;
mod selection;
mod types;

pub use error::GraphError;
pub use graph::{Graph, PinChain};
pub use object::{Link, Node, Object, Pin};
pub use selection::Selection;
pub use types::{Color, LinkId, NodeId, ObjectId, ObjectKey, ObjectKind, PinId, PinKind};
