// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving a node, together with the rest of the selection.

use alloc::vec::Vec;
use nodeweave_graph::{ObjectId, ObjectKey};

use super::ActionContext;
use crate::control::Control;
use crate::input::{Modifiers, PointerButtons};

const BUTTON: PointerButtons = PointerButtons::PRIMARY;

#[derive(Clone, Debug)]
pub(crate) struct DragAction {
    node: ObjectKey,
    /// Nodes moving with `node`; empty until the first processed frame.
    group: Vec<ObjectKey>,
}

impl DragAction {
    pub(crate) fn accept(cx: &ActionContext<'_>, control: &Control) -> Option<Self> {
        let node = control.active_node?;
        if control.button != Some(BUTTON) || !cx.mouse.is_dragging(BUTTON) {
            return None;
        }
        if cx
            .mouse
            .modifiers
            .intersects(Modifiers::SHIFT | Modifiers::CTRL)
        {
            return None;
        }
        Some(Self {
            node,
            group: Vec::new(),
        })
    }

    /// The node under the pointer when the drag started.
    pub(crate) fn node(&self) -> ObjectKey {
        self.node
    }

    fn start(&mut self, cx: &mut ActionContext<'_>) {
        if !cx.selection.contains(self.node) {
            cx.selection.set(self.node);
        }
        self.group = cx.selection.nodes(cx.graph).collect();
        for key in &self.group {
            if let Some(node) = cx.graph.node_mut(*key) {
                node.drag_start = node.bounds.origin();
            }
        }
        cx.graph.set_front(Some(self.node));
    }

    pub(crate) fn process(&mut self, cx: &mut ActionContext<'_>) -> bool {
        if self.group.is_empty() {
            self.start(cx);
        }
        let delta = cx.canvas.from_screen_delta(cx.mouse.drag_delta(BUTTON));
        for key in &self.group {
            let Some(start) = cx.graph.node(*key).map(|node| node.drag_start) else {
                continue;
            };
            let origin = start + delta;
            cx.graph.move_node(*key, origin);
            if let Some(ObjectId::Node(id)) = cx.graph.id_of(*key) {
                cx.settings.set_node_location(id.0, origin);
            }
        }
        cx.mouse.down(BUTTON)
    }
}
