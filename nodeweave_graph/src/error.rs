// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors from inconsistent graph edits.

use crate::types::{ObjectKind, PinId};

/// Errors raised by graph edits that reference objects inconsistently.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A raw id already names an object of another kind.
    #[error("id {id} is already used by a {found:?}, not a {expected:?}")]
    KindMismatch {
        /// The raw caller id.
        id: u32,
        /// Kind the caller asked for.
        expected: ObjectKind,
        /// Kind registered under that id.
        found: ObjectKind,
    },
    /// A link references a pin that does not exist.
    #[error("pin {} does not exist", .0.0)]
    UnknownPin(PinId),
    /// An arena key no longer refers to a live object of the expected kind.
    #[error("object key is stale or of the wrong kind")]
    StaleKey,
}
