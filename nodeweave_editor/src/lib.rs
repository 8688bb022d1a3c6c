// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nodeweave Editor: the interaction core of an immediate-mode node editor.
//!
//! The host redeclares its graph every frame and the [`Editor`] turns pointer and
//! keyboard state into editing operations on it:
//!
//! - **Scroll**: pan with the pan button on empty canvas, stepped zoom with the wheel.
//! - **Drag**: move a node, and the rest of the selection with it.
//! - **Select**: click and marquee selection of nodes or links, with add (Shift) and
//!   toggle (Ctrl) modifiers.
//! - **Create item**: drag a link out of a pin; the host confirms the proposed link
//!   or node through the creation wizard.
//! - **Delete items**: the host confirms, one by one, the deletion of the selection.
//!
//! Exactly one of these [actions](ActionKind) owns a frame. Idle actions are offered
//! the frame in that priority order; the first to accept keeps it until it finishes.
//!
//! Layout, hit testing and coordinates come from [`nodeweave_graph`] and
//! [`nodeweave_canvas`]. Painting goes through the host's [`DrawList`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use nodeweave_editor::{Editor, Input, PointerButtons};
//! use nodeweave_graph::{Color, NodeId, PinId};
//!
//! let mut editor = Editor::default();
//! let window = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! let frame = |editor: &mut Editor, input: Input| {
//!     editor.begin(window, &input);
//!     editor.begin_node(NodeId(1));
//!     editor.begin_header(Color::from_rgba8(60, 90, 160, 255));
//!     editor.end_header(Size::new(120.0, 20.0));
//!     editor.begin_output(PinId(10));
//!     editor.end_output(Size::new(20.0, 20.0));
//!     editor.end_node();
//!     editor.end();
//! };
//!
//! // Press on the node header, drag 50 pixels to the right, release.
//! frame(&mut editor, Input::at(Point::new(20.0, 15.0)).with_buttons(PointerButtons::PRIMARY));
//! frame(&mut editor, Input::at(Point::new(70.0, 15.0)).with_buttons(PointerButtons::PRIMARY));
//! frame(&mut editor, Input::at(Point::new(70.0, 15.0)));
//!
//! assert_eq!(editor.node_position(NodeId(1)), Some(Point::new(50.0, 0.0)));
//! assert_eq!(editor.selected_nodes(), vec![NodeId(1)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod actions;
mod builder;
mod config;
mod control;
mod editor;
mod error;
mod input;
mod render;
mod settings;
mod style;

#[cfg(test)]
mod tests;

pub use actions::{ActionKind, CreateStage, ItemType, Query, QueryResult, UserAction};
pub use builder::NodeStage;
pub use config::{Config, Style};
pub use control::Control;
pub use editor::{Editor, LinkDroppedFn};
pub use error::UsageError;
pub use input::{Input, Keys, Modifiers, PointerButtons};
pub use render::{DrawCommand, DrawList, RecordingDrawList, TextureId};
pub use settings::{MemoryStore, NodeSettings, Settings, SettingsStore};
pub use style::{ColorLookup, StyleColor};
