// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hot, active and clicked objects of a frame.

use nodeweave_canvas::Canvas;
use nodeweave_graph::{Graph, ObjectKey, ObjectKind};

use crate::input::{MouseState, PointerButtons};

/// What the pointer is doing to the graph this frame.
///
/// - *hot*: under the pointer.
/// - *active*: captured by the press of a button, until that button is released.
/// - *clicked*: pressed and released over the same object without dragging.
///
/// The `background_*` flags are the same three notions for empty canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Control {
    /// Object under the pointer.
    pub hot: Option<ObjectKey>,
    /// Object captured by a held button.
    pub active: Option<ObjectKey>,
    /// Object clicked this frame.
    pub clicked: Option<ObjectKey>,
    /// Hot node; also set when a pin of the node is hot.
    pub hot_node: Option<ObjectKey>,
    /// Hot pin.
    pub hot_pin: Option<ObjectKey>,
    /// Hot link.
    pub hot_link: Option<ObjectKey>,
    /// Active node.
    pub active_node: Option<ObjectKey>,
    /// Active pin.
    pub active_pin: Option<ObjectKey>,
    /// Active link.
    pub active_link: Option<ObjectKey>,
    /// Clicked node.
    pub clicked_node: Option<ObjectKey>,
    /// Clicked pin.
    pub clicked_pin: Option<ObjectKey>,
    /// Clicked link.
    pub clicked_link: Option<ObjectKey>,
    /// The pointer is over empty canvas.
    pub background_hot: bool,
    /// Empty canvas is captured by a held button.
    pub background_active: bool,
    /// Empty canvas was clicked this frame.
    pub background_clicked: bool,
    /// The button holding the capture, if any.
    pub button: Option<PointerButtons>,
}

impl Control {
    fn new(
        graph: &Graph,
        hot: Option<ObjectKey>,
        active: Option<ObjectKey>,
        clicked: Option<ObjectKey>,
        background: (bool, bool, bool),
        button: Option<PointerButtons>,
    ) -> Self {
        let of = |key: Option<ObjectKey>, kind: ObjectKind| {
            key.filter(|k| graph.kind(*k) == Some(kind))
        };
        let hot_pin = of(hot, ObjectKind::Pin);
        Self {
            hot,
            active,
            clicked,
            hot_node: of(hot, ObjectKind::Node).or_else(|| hot_pin.and_then(|p| graph.pin_node(p))),
            hot_pin,
            hot_link: of(hot, ObjectKind::Link),
            active_node: of(active, ObjectKind::Node),
            active_pin: of(active, ObjectKind::Pin),
            active_link: of(active, ObjectKind::Link),
            clicked_node: of(clicked, ObjectKind::Node),
            clicked_pin: of(clicked, ObjectKind::Pin),
            clicked_link: of(clicked, ObjectKind::Link),
            background_hot: background.0,
            background_active: background.1,
            background_clicked: background.2,
            button,
        }
    }
}

/// Carries the capture across frames and computes [`Control`].
#[derive(Clone, Debug, Default)]
pub(crate) struct ControlResolver {
    active: Option<ObjectKey>,
    background_active: bool,
    button: Option<PointerButtons>,
}

impl ControlResolver {
    /// Resolve this frame. `buttons` lists the buttons that can take the capture,
    /// in priority order.
    pub(crate) fn resolve(
        &mut self,
        graph: &Graph,
        canvas: &Canvas,
        mouse: &MouseState,
        buttons: &[PointerButtons],
    ) -> Control {
        let in_window = mouse.has_pointer && canvas.window_rect().contains(mouse.pos);
        let hot = if in_window {
            graph.hit_test(canvas.from_screen(mouse.pos))
        } else {
            None
        };
        let background_hot = in_window && hot.is_none();

        if self.active.is_some_and(|k| !graph.is_alive(k)) {
            self.active = None;
        }

        if self.button.is_none() && in_window {
            if let Some(&button) = buttons.iter().find(|b| mouse.pressed(**b)) {
                self.active = hot;
                self.background_active = background_hot;
                self.button = Some(button);
            }
        }

        let mut clicked = None;
        let mut background_clicked = false;
        let button = self.button;
        let mut active = self.active;
        let mut background_active = self.background_active;
        if let Some(b) = self.button {
            if mouse.released(b) || !mouse.down(b) {
                if !mouse.drag_exceeded(b) && hot == self.active {
                    clicked = hot;
                    background_clicked = self.background_active && background_hot;
                }
                *self = Self::default();
                active = None;
                background_active = false;
            }
        }

        Control::new(
            graph,
            hot,
            active,
            clicked,
            (background_hot, background_active, background_clicked),
            button,
        )
    }

    /// Drop the capture, e.g. when the editor is reset.
    pub(crate) fn release(&mut self) {
        *self = Self::default();
    }
}
