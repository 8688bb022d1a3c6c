// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proposing new links and nodes to the host.
//!
//! Dragging from a pin and dropping it elsewhere turns into a *proposal*. The host
//! answers it between [`Editor::begin_create`](crate::Editor::begin_create) and
//! [`Editor::end_create`](crate::Editor::end_create): it queries what is proposed,
//! then accepts or rejects it exactly once. The editor never mutates the graph on
//! its own; an accepted link or node is declared by the host on a later frame.

use kurbo::Point;
use nodeweave_graph::{Graph, ObjectId, ObjectKey, PinId};
use tracing::debug;

use super::ActionContext;
use crate::control::Control;
use crate::input::PointerButtons;

const BUTTON: PointerButtons = PointerButtons::PRIMARY;

/// Progress of a creation gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CreateStage {
    /// Nothing in flight.
    #[default]
    None,
    /// A link is being dragged out of a pin.
    Possible,
    /// A proposal waits for the host's answer.
    Create,
}

/// What a proposal would create.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ItemType {
    /// Nothing yet.
    #[default]
    NoItem,
    /// A node, optionally fed by the pin the drag started from.
    Node,
    /// A link between two pins.
    Link,
}

/// The host's answer to the current proposal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UserAction {
    /// Not answered yet.
    #[default]
    Unknown,
    /// Rejected.
    UserReject,
    /// Accepted.
    UserAccept,
}

/// Outcome of an accept or reject call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryResult {
    /// The answer was recorded.
    True,
    /// The opposite answer was already given.
    False,
    /// There is nothing to answer.
    Indeterminate,
}

/// Outcome of a proposal query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Query<T> {
    /// A proposal of the queried type is waiting.
    True(T),
    /// The proposal was already rejected.
    False(T),
    /// No proposal of the queried type.
    Indeterminate,
}

impl<T> Query<T> {
    /// The payload of a live proposal.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::True(value) => Some(value),
            Self::False(_) | Self::Indeterminate => None,
        }
    }

    /// Whether this is [`Query::Indeterminate`].
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CreateItemAction {
    stage: CreateStage,
    item: ItemType,
    user_action: UserAction,
    /// Pin the drag started from.
    start: Option<ObjectKey>,
    /// Pin the drag was dropped on.
    end: Option<ObjectKey>,
    /// Floating end of the dragged link, or the drop point of a node proposal,
    /// in canvas space.
    end_point: Point,
    /// Set by the host each frame it answers; checked and cleared by `process`.
    handshake: bool,
}

impl CreateItemAction {
    pub(crate) fn accept(cx: &ActionContext<'_>, control: &Control, armed: bool) -> Option<Self> {
        if let Some(pin) = control.active_pin {
            if control.button == Some(BUTTON) && cx.mouse.pressed(BUTTON) {
                let end_point = cx
                    .graph
                    .pin(pin)
                    .map_or(cx.canvas.from_screen(cx.mouse.pos), |p| p.drag_point);
                return Some(Self {
                    stage: CreateStage::Possible,
                    item: ItemType::Link,
                    user_action: UserAction::Unknown,
                    start: Some(pin),
                    end: None,
                    end_point,
                    handshake: false,
                });
            }
        }
        if armed {
            return Some(Self {
                stage: CreateStage::Create,
                item: ItemType::Node,
                user_action: UserAction::Unknown,
                start: None,
                end: None,
                end_point: cx.canvas.from_screen(cx.mouse.pos),
                handshake: true,
            });
        }
        None
    }

    pub(crate) fn stage(&self) -> CreateStage {
        self.stage
    }

    pub(crate) fn item(&self) -> ItemType {
        self.item
    }

    pub(crate) fn user_action(&self) -> UserAction {
        self.user_action
    }

    pub(crate) fn process(&mut self, cx: &mut ActionContext<'_>, control: &Control) -> bool {
        match self.stage {
            CreateStage::None => false,
            CreateStage::Possible => self.drag(cx, control),
            CreateStage::Create => {
                if self.user_action != UserAction::Unknown {
                    return false;
                }
                if !self.handshake {
                    debug!(item = ?self.item, "proposal discarded, host did not answer");
                    return false;
                }
                self.handshake = false;
                true
            }
        }
    }

    fn drag(&mut self, cx: &mut ActionContext<'_>, control: &Control) -> bool {
        let Some(start) = self.start.filter(|pin| cx.graph.is_alive(*pin)) else {
            self.revert("start pin vanished");
            return false;
        };
        self.end_point = cx.canvas.from_screen(cx.mouse.pos);
        if cx.mouse.down(BUTTON) {
            return true;
        }

        if let Some(pin) = control.hot_pin {
            if pin == start {
                self.revert("dropped on the start pin");
                return false;
            }
            if !compatible(cx.graph, start, pin) {
                self.revert("dropped on an incompatible pin");
                return false;
            }
            self.end = Some(pin);
            self.enter_create(ItemType::Link);
            return true;
        }
        if control.background_hot {
            self.enter_create(ItemType::Node);
            return true;
        }
        self.revert("dropped outside of empty canvas");
        false
    }

    fn enter_create(&mut self, item: ItemType) {
        debug!(?item, "proposal ready");
        self.stage = CreateStage::Create;
        self.item = item;
        self.user_action = UserAction::Unknown;
        self.handshake = false;
    }

    fn revert(&mut self, why: &'static str) {
        debug!(why, "creation reverted");
        self.stage = CreateStage::None;
        self.item = ItemType::NoItem;
    }

    /// The host opened the wizard this frame.
    pub(crate) fn shake_hands(&mut self) {
        self.handshake = true;
    }

    fn pin_id(graph: &Graph, key: Option<ObjectKey>) -> Option<PinId> {
        match graph.id_of(key?) {
            Some(ObjectId::Pin(id)) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn query_link(&self, graph: &Graph) -> Query<(PinId, PinId)> {
        if self.stage != CreateStage::Create || self.item != ItemType::Link {
            return Query::Indeterminate;
        }
        let (Some(start), Some(end)) = (
            Self::pin_id(graph, self.start),
            Self::pin_id(graph, self.end),
        ) else {
            return Query::Indeterminate;
        };
        match self.user_action {
            UserAction::UserReject => Query::False((start, end)),
            _ => Query::True((start, end)),
        }
    }

    pub(crate) fn query_node(&self, graph: &Graph) -> Query<Option<PinId>> {
        if self.stage != CreateStage::Create || self.item != ItemType::Node {
            return Query::Indeterminate;
        }
        let pin = Self::pin_id(graph, self.start);
        match self.user_action {
            UserAction::UserReject => Query::False(pin),
            _ => Query::True(pin),
        }
    }

    /// Record an answer. `None` when there is no proposal to answer.
    pub(crate) fn answer(&mut self, answer: UserAction) -> Option<QueryResult> {
        if self.stage != CreateStage::Create {
            return None;
        }
        if self.user_action != UserAction::Unknown && self.user_action != answer {
            return Some(QueryResult::False);
        }
        self.user_action = answer;
        Some(QueryResult::True)
    }

    /// The in-flight link in canvas space.
    pub(crate) fn preview(&self, graph: &Graph) -> Option<(Point, Point)> {
        if self.item != ItemType::Link || self.stage == CreateStage::None {
            return None;
        }
        let a = graph.pin(self.start?)?.drag_point;
        let b = self
            .end
            .and_then(|end| graph.pin(end))
            .map_or(self.end_point, |pin| pin.drag_point);
        Some((a, b))
    }

    /// Where a proposed node would be placed, in canvas space.
    pub(crate) fn drop_point(&self) -> Option<Point> {
        (self.stage == CreateStage::Create && self.item == ItemType::Node).then_some(self.end_point)
    }
}

/// Whether `a` and `b` may be joined by a new link.
fn compatible(graph: &Graph, a: ObjectKey, b: ObjectKey) -> bool {
    let (Some(pa), Some(pb)) = (graph.pin(a), graph.pin(b)) else {
        return false;
    };
    pa.node != pb.node
        && pa.kind != pb.kind
        && graph.is_live(b)
        && !graph.has_link(a, b)
}
