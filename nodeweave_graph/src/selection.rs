// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered selection of graph objects.

use alloc::vec::Vec;

use crate::graph::Graph;
use crate::types::{ObjectKey, ObjectKind};

/// The set of selected objects, in selection order.
///
/// Tracks whether it changed since the last [`Selection::reset_changed`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    objects: Vec<ObjectKey>,
    changed: bool,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is selected.
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains(&key)
    }

    /// Number of selected objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Selected objects in selection order.
    pub fn as_slice(&self) -> &[ObjectKey] {
        &self.objects
    }

    /// Add `key`. Returns `false` if it was already selected.
    pub fn select(&mut self, key: ObjectKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.objects.push(key);
        self.changed = true;
        true
    }

    /// Remove `key`. Returns `false` if it was not selected.
    pub fn deselect(&mut self, key: ObjectKey) -> bool {
        let before = self.objects.len();
        self.objects.retain(|k| *k != key);
        let removed = self.objects.len() != before;
        self.changed |= removed;
        removed
    }

    /// Flip the membership of `key`. Returns the new membership.
    pub fn toggle(&mut self, key: ObjectKey) -> bool {
        if self.deselect(key) {
            false
        } else {
            self.select(key)
        }
    }

    /// Make `key` the only selected object.
    pub fn set(&mut self, key: ObjectKey) {
        self.replace([key]);
    }

    /// Replace the whole selection.
    pub fn replace(&mut self, keys: impl IntoIterator<Item = ObjectKey>) {
        let mut next: Vec<ObjectKey> = Vec::new();
        for key in keys {
            if !next.contains(&key) {
                next.push(key);
            }
        }
        let same = next.len() == self.objects.len() && next.iter().all(|k| self.contains(*k));
        if !same {
            self.changed = true;
        }
        self.objects = next;
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        if !self.objects.is_empty() {
            self.objects.clear();
            self.changed = true;
        }
    }

    /// Keep only the objects for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(ObjectKey) -> bool) {
        let before = self.objects.len();
        self.objects.retain(|k| keep(*k));
        self.changed |= self.objects.len() != before;
    }

    /// Whether the selection changed since the last reset.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Forget past changes.
    pub fn reset_changed(&mut self) {
        self.changed = false;
    }

    /// Selected nodes, in selection order.
    pub fn nodes<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = ObjectKey> + 'a {
        self.of_kind(graph, ObjectKind::Node)
    }

    /// Selected links, in selection order.
    pub fn links<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = ObjectKey> + 'a {
        self.of_kind(graph, ObjectKind::Link)
    }

    fn of_kind<'a>(
        &'a self,
        graph: &'a Graph,
        kind: ObjectKind,
    ) -> impl Iterator<Item = ObjectKey> + 'a {
        self.objects
            .iter()
            .copied()
            .filter(move |k| graph.kind(*k) == Some(kind))
    }
}
