// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted node locations and view state, and the store they are written to.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use kurbo::{Point, Vec2};

/// Persisted state of one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSettings {
    /// Raw node id.
    pub id: u32,
    /// Node origin in canvas space.
    pub location: Point,
    /// Whether the node was staged since the settings were loaded.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub was_used: bool,
}

/// Everything the editor persists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Set whenever something worth saving changed.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub dirty: bool,
    /// Per-node entries.
    pub nodes: Vec<NodeSettings>,
    /// View scroll.
    pub view_scroll: Vec2,
    /// View zoom.
    pub view_zoom: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dirty: false,
            nodes: Vec::new(),
            view_scroll: Vec2::ZERO,
            view_zoom: 1.0,
        }
    }
}

impl Settings {
    /// The entry for node `id`.
    pub fn node(&self, id: u32) -> Option<&NodeSettings> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The entry for node `id`, created at `location` if missing, marked used.
    pub fn touch(&mut self, id: u32, location: Point) -> &mut NodeSettings {
        let idx = match self.nodes.iter().position(|n| n.id == id) {
            Some(idx) => idx,
            None => {
                self.nodes.push(NodeSettings {
                    id,
                    location,
                    was_used: false,
                });
                self.nodes.len() - 1
            }
        };
        let entry = &mut self.nodes[idx];
        entry.was_used = true;
        entry
    }

    /// Record a node's location, marking the settings dirty if it moved.
    pub fn set_node_location(&mut self, id: u32, location: Point) {
        let entry = self.touch(id, location);
        if entry.location != location {
            entry.location = location;
            self.dirty = true;
        }
    }

    /// Request a save at the end of the frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Drop entries of nodes never staged since loading.
    pub fn prune_unused(&mut self) {
        self.nodes.retain(|n| n.was_used);
    }

    /// Mark every entry unused, as after a fresh load.
    pub(crate) fn reset_usage(&mut self) {
        for node in &mut self.nodes {
            node.was_used = false;
        }
    }
}

/// Where settings are loaded from and saved to.
pub trait SettingsStore {
    /// Previously saved settings, if any.
    fn load(&mut self) -> Option<Settings>;
    /// Persist `settings`. Called only when they are dirty.
    fn save(&mut self, settings: &Settings);
}

/// A [`SettingsStore`] kept in memory.
///
/// Clones share the same storage, so a test or host can keep a handle while the
/// editor owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    saved: Option<Settings>,
    saves: usize,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that loads `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().saved = Some(settings);
        store
    }

    /// The last saved (or preloaded) settings.
    pub fn saved(&self) -> Option<Settings> {
        self.inner.borrow().saved.clone()
    }

    /// Number of saves so far.
    pub fn saves(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self) -> Option<Settings> {
        self.inner.borrow().saved.clone()
    }

    fn save(&mut self, settings: &Settings) {
        let mut inner = self.inner.borrow_mut();
        let mut copy = settings.clone();
        copy.dirty = false;
        inner.saved = Some(copy);
        inner.saves += 1;
    }
}
