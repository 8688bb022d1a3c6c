// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click and marquee selection.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use nodeweave_graph::ObjectKey;
use tracing::trace;

use super::ActionContext;
use crate::control::Control;
use crate::input::{Modifiers, PointerButtons};

const BUTTON: PointerButtons = PointerButtons::PRIMARY;

/// What a marquee collects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SelectMode {
    Nodes,
    Links,
}

/// How the gesture combines with the selection it started from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Op {
    Replace,
    Add,
    Toggle,
}

impl Op {
    fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.contains(Modifiers::CTRL) {
            Self::Toggle
        } else if modifiers.contains(Modifiers::SHIFT) {
            Self::Add
        } else {
            Self::Replace
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SelectAction {
    mode: SelectMode,
    op: Op,
    /// Object the gesture started on; `None` for empty canvas.
    origin: Option<ObjectKey>,
    /// Press position in canvas space.
    start: Point,
    /// Current marquee in canvas space, once the drag threshold was crossed.
    rect: Option<Rect>,
    snapshot: Vec<ObjectKey>,
    /// Clicked on the accepting frame; applied and finished immediately.
    immediate: bool,
}

impl SelectAction {
    pub(crate) fn accept(cx: &ActionContext<'_>, control: &Control) -> Option<Self> {
        let op = Op::from_modifiers(cx.mouse.modifiers);
        let start = cx.canvas.from_screen(cx.mouse.click_pos(BUTTON));
        let new = |mode, origin, immediate| Self {
            mode,
            op,
            origin,
            start,
            rect: None,
            snapshot: cx.selection.as_slice().to_vec(),
            immediate,
        };

        if control.button != Some(BUTTON) {
            return None;
        }
        if let Some(node) = control.clicked_node {
            return Some(new(SelectMode::Nodes, Some(node), true));
        }
        if !cx.mouse.pressed(BUTTON) {
            return None;
        }
        if control.background_active {
            return Some(new(SelectMode::Nodes, None, false));
        }
        if let Some(link) = control.active_link {
            return Some(new(SelectMode::Links, Some(link), false));
        }
        if let Some(node) = control.active_node {
            if op != Op::Replace {
                return Some(new(SelectMode::Nodes, Some(node), false));
            }
        }
        None
    }

    /// The marquee in canvas space and whether it collects links.
    pub(crate) fn marquee(&self) -> Option<(Rect, bool)> {
        self.rect.map(|rect| (rect, self.mode == SelectMode::Links))
    }

    pub(crate) fn process(&mut self, cx: &mut ActionContext<'_>) -> bool {
        if self.immediate {
            self.apply_click(cx);
            return false;
        }
        if cx.mouse.drag_exceeded(BUTTON) {
            self.update_marquee(cx);
        }
        if cx.mouse.down(BUTTON) {
            return true;
        }
        if self.rect.is_none() {
            self.apply_click(cx);
        }
        self.rect = None;
        false
    }

    fn update_marquee(&mut self, cx: &mut ActionContext<'_>) {
        let end = cx.canvas.from_screen(cx.mouse.pos);
        let rect = Rect::from_points(self.start, end);
        self.rect = Some(rect);
        let candidates = match self.mode {
            SelectMode::Nodes => cx.graph.nodes_in_rect(rect),
            SelectMode::Links => cx.graph.links_in_rect(rect),
        };
        trace!(candidates = candidates.len(), "marquee");
        match self.op {
            Op::Replace => cx.selection.replace(candidates),
            Op::Add => {
                let extra = candidates
                    .into_iter()
                    .filter(|k| !self.snapshot.contains(k));
                cx.selection
                    .replace(self.snapshot.iter().copied().chain(extra).collect::<Vec<_>>());
            }
            Op::Toggle => {
                let kept = self
                    .snapshot
                    .iter()
                    .copied()
                    .filter(|k| !candidates.contains(k));
                let added = candidates
                    .iter()
                    .copied()
                    .filter(|k| !self.snapshot.contains(k));
                cx.selection.replace(kept.chain(added).collect::<Vec<_>>());
            }
        }
    }

    fn apply_click(&self, cx: &mut ActionContext<'_>) {
        match (self.origin, self.op) {
            (None, Op::Replace) => cx.selection.clear(),
            (None, _) => {}
            (Some(key), Op::Replace) => cx.selection.set(key),
            (Some(key), Op::Add) => {
                cx.selection.select(key);
            }
            (Some(key), Op::Toggle) => {
                cx.selection.toggle(key);
            }
        }
    }
}
