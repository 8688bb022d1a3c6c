// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offering the selection to the host for deletion, one object at a time.

use alloc::vec::Vec;
use nodeweave_graph::{Graph, ObjectKey, ObjectKind, Selection};
use tracing::debug;

use super::{ActionContext, QueryResult};
use crate::input::Keys;

#[derive(Clone, Debug)]
pub(crate) struct DeleteItemsAction {
    /// Selected links, then selected nodes; incident links of accepted nodes are
    /// spliced in right after them.
    candidates: Vec<ObjectKey>,
    cursor: usize,
    /// The candidate at `cursor` was handed out and awaits an answer.
    pending: bool,
    handshake: bool,
}

impl DeleteItemsAction {
    pub(crate) fn accept(cx: &ActionContext<'_>, armed: bool) -> Option<Self> {
        let key = cx.config.delete_key_arms && cx.mouse.keys.contains(Keys::DELETE);
        if !(armed || key) || cx.selection.is_empty() {
            return None;
        }
        let candidates: Vec<ObjectKey> = cx
            .selection
            .links(cx.graph)
            .chain(cx.selection.nodes(cx.graph))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        debug!(candidates = candidates.len(), "deletion armed");
        Some(Self {
            candidates,
            cursor: 0,
            pending: false,
            handshake: true,
        })
    }

    pub(crate) fn process(&mut self, _cx: &mut ActionContext<'_>) -> bool {
        if self.cursor >= self.candidates.len() {
            return false;
        }
        if !self.handshake {
            debug!(
                left = self.candidates.len() - self.cursor,
                "deletion discarded, host did not answer"
            );
            return false;
        }
        self.handshake = false;
        true
    }

    /// The host opened the wizard this frame.
    pub(crate) fn shake_hands(&mut self) {
        self.handshake = true;
    }

    /// Candidates not decided yet, including the pending one.
    pub(crate) fn remaining(&self) -> Vec<ObjectKey> {
        self.candidates
            .get(self.cursor..)
            .map(<[ObjectKey]>::to_vec)
            .unwrap_or_default()
    }

    /// Hand out the next candidate if it is of `kind`.
    ///
    /// A candidate handed out earlier and not answered yet is rejected first.
    /// Candidates the host stopped declaring are passed over, except links left
    /// dangling by an accepted node, which the host still has to decide.
    pub(crate) fn next(&mut self, graph: &Graph, kind: ObjectKind) -> Option<ObjectKey> {
        if self.pending {
            debug!("unanswered deletion candidate rejected");
            self.skip();
        }
        let gone = |key: ObjectKey| {
            !graph.is_alive(key) || !(graph.is_live(key) || graph.is_dangling(key))
        };
        while self
            .candidates
            .get(self.cursor)
            .is_some_and(|key| gone(*key))
        {
            self.cursor += 1;
        }
        let key = *self.candidates.get(self.cursor)?;
        if graph.kind(key) != Some(kind) {
            return None;
        }
        self.pending = true;
        Some(key)
    }

    fn skip(&mut self) {
        self.cursor += 1;
        self.pending = false;
    }

    pub(crate) fn accept_current(
        &mut self,
        graph: &mut Graph,
        selection: &mut Selection,
    ) -> QueryResult {
        if !self.pending {
            return QueryResult::Indeterminate;
        }
        let key = self.candidates[self.cursor];
        if graph.kind(key) == Some(ObjectKind::Node) {
            let incident: Vec<ObjectKey> = graph
                .links_for_node(key)
                .into_iter()
                .filter(|link| !self.candidates.contains(link))
                .collect();
            let at = self.cursor + 1;
            self.candidates.splice(at..at, incident);
        }
        graph.destroy(key);
        selection.deselect(key);
        self.skip();
        QueryResult::True
    }

    pub(crate) fn reject_current(&mut self) -> QueryResult {
        if !self.pending {
            return QueryResult::Indeterminate;
        }
        self.skip();
        QueryResult::True
    }

    /// Close the host's turn, rejecting a candidate left unanswered.
    pub(crate) fn finish_turn(&mut self) {
        if self.pending {
            debug!("unanswered deletion candidate rejected");
            self.skip();
        }
    }
}
