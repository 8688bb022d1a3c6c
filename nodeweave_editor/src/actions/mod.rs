// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction actions and their scheduler.
//!
//! ## Overview
//!
//! An action is a small state machine that turns [`Control`] and pointer movement
//! into one editing operation. Each frame the [`Scheduler`] either advances the
//! action already in progress or offers the frame to every action in a fixed
//! priority order: Scroll, Drag, Select, `CreateItem`, `DeleteItems`. The first one
//! to accept owns the frame and is processed immediately.
//!
//! ## Contract
//!
//! - `accept` inspects the frame and returns the initial state if the action claims it.
//! - `process` advances the state by one frame and returns whether it continues.
//!   When it returns `false` the scheduler goes idle and the next frame starts
//!   a fresh round of `accept`.
//!
//! Holding at most one [`Action`] value makes "one action at a time" structural.

mod create;
mod delete;
mod drag;
mod scroll;
mod select;

use alloc::vec::Vec;
use nodeweave_canvas::{Canvas, View};
use nodeweave_graph::{Graph, ObjectKey, Selection};
use tracing::debug;

use crate::config::Config;
use crate::control::Control;
use crate::input::MouseState;
use crate::settings::Settings;

pub use create::{CreateStage, ItemType, Query, QueryResult, UserAction};
pub(crate) use create::CreateItemAction;
pub(crate) use delete::DeleteItemsAction;
pub(crate) use drag::DragAction;
pub(crate) use scroll::ScrollAction;
pub(crate) use select::SelectAction;

/// Everything an action may read or edit during a frame.
pub(crate) struct ActionContext<'a> {
    pub(crate) graph: &'a mut Graph,
    pub(crate) selection: &'a mut Selection,
    pub(crate) view: &'a mut View,
    pub(crate) canvas: &'a Canvas,
    pub(crate) mouse: &'a MouseState,
    pub(crate) config: &'a Config,
    pub(crate) settings: &'a mut Settings,
}

/// The five kinds of interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Pan and wheel zoom.
    Scroll,
    /// Moving nodes.
    Drag,
    /// Click and marquee selection.
    Select,
    /// Proposing a new link or node.
    CreateItem,
    /// Confirming deletion of the selection.
    DeleteItems,
}

impl ActionKind {
    /// Priority order in which idle actions are offered a frame.
    pub const PRIORITY: [Self; 5] = [
        Self::Scroll,
        Self::Drag,
        Self::Select,
        Self::CreateItem,
        Self::DeleteItems,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "Scroll",
            Self::Drag => "Drag",
            Self::Select => "Select",
            Self::CreateItem => "Create Item",
            Self::DeleteItems => "Delete Items",
        }
    }
}

/// The action in progress.
#[derive(Clone, Debug)]
pub(crate) enum Action {
    Scroll(ScrollAction),
    Drag(DragAction),
    Select(SelectAction),
    CreateItem(CreateItemAction),
    DeleteItems(DeleteItemsAction),
}

impl Action {
    pub(crate) fn kind(&self) -> ActionKind {
        match self {
            Self::Scroll(_) => ActionKind::Scroll,
            Self::Drag(_) => ActionKind::Drag,
            Self::Select(_) => ActionKind::Select,
            Self::CreateItem(_) => ActionKind::CreateItem,
            Self::DeleteItems(_) => ActionKind::DeleteItems,
        }
    }

    fn accept(
        kind: ActionKind,
        cx: &ActionContext<'_>,
        control: &Control,
        arms: Arms,
    ) -> Option<Self> {
        match kind {
            ActionKind::Scroll => ScrollAction::accept(cx, control).map(Self::Scroll),
            ActionKind::Drag => DragAction::accept(cx, control).map(Self::Drag),
            ActionKind::Select => SelectAction::accept(cx, control).map(Self::Select),
            ActionKind::CreateItem => {
                CreateItemAction::accept(cx, control, arms.create).map(Self::CreateItem)
            }
            ActionKind::DeleteItems => {
                DeleteItemsAction::accept(cx, arms.delete).map(Self::DeleteItems)
            }
        }
    }

    fn process(&mut self, cx: &mut ActionContext<'_>, control: &Control) -> bool {
        match self {
            Self::Scroll(a) => a.process(cx),
            Self::Drag(a) => a.process(cx),
            Self::Select(a) => a.process(cx),
            Self::CreateItem(a) => a.process(cx, control),
            Self::DeleteItems(a) => a.process(cx),
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Arms {
    create: bool,
    delete: bool,
}

/// Arbitrates which action owns each frame.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scheduler {
    current: Option<Action>,
    arms: Arms,
}

impl Scheduler {
    pub(crate) fn current(&self) -> Option<&Action> {
        self.current.as_ref()
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Action> {
        self.current.as_mut()
    }

    pub(crate) fn kind(&self) -> Option<ActionKind> {
        self.current.as_ref().map(Action::kind)
    }

    /// An action in progress holds the mouse capture.
    pub(crate) fn is_capturing(&self) -> bool {
        self.current.is_some()
    }

    /// Offer `CreateItem` a node proposal on the next run.
    pub(crate) fn arm_create(&mut self) {
        self.arms.create = true;
    }

    /// Offer `DeleteItems` the selection on the next run.
    pub(crate) fn arm_delete(&mut self) {
        self.arms.delete = true;
    }

    /// Links that must survive dangling-link pruning this frame.
    pub(crate) fn protected_links(&self) -> Vec<ObjectKey> {
        match &self.current {
            Some(Action::DeleteItems(delete)) => delete.remaining(),
            _ => Vec::new(),
        }
    }

    /// Run one frame.
    pub(crate) fn run(&mut self, cx: &mut ActionContext<'_>, control: &Control) {
        let arms = core::mem::take(&mut self.arms);
        if let Some(action) = &mut self.current {
            if !action.process(cx, control) {
                debug!(action = action.kind().name(), "action finished");
                self.current = None;
            }
            if arms.create || arms.delete {
                debug!("arming ignored while another action is in progress");
            }
            return;
        }
        for kind in ActionKind::PRIORITY {
            let Some(mut action) = Action::accept(kind, cx, control, arms) else {
                continue;
            };
            debug!(action = kind.name(), "action started");
            if action.process(cx, control) {
                self.current = Some(action);
            } else {
                debug!(action = kind.name(), "action finished");
            }
            break;
        }
    }

    /// Abandon whatever is in progress.
    pub(crate) fn cancel(&mut self) {
        if let Some(action) = self.current.take() {
            debug!(action = action.kind().name(), "action cancelled");
        }
        self.arms = Arms::default();
    }
}
