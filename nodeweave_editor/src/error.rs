// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misuse of the editor API.

use nodeweave_graph::GraphError;

use crate::builder::NodeStage;

/// A call made outside the sequence the editor expects.
///
/// These never cross the public surface as `Result`s: the editor logs them with
/// `tracing::warn!`, keeps the last one for [`Editor::last_usage_error`] and
/// answers the call with a neutral value.
///
/// [`Editor::last_usage_error`]: crate::Editor::last_usage_error
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// A staging call was made from the wrong stage.
    #[error("`{op}` is not valid in node stage {stage:?}")]
    Stage {
        /// The offending call.
        op: &'static str,
        /// The stage the builder was in.
        stage: NodeStage,
    },
    /// A call that needs an open frame was made between frames.
    #[error("`{op}` requires an open frame")]
    FrameClosed {
        /// The offending call.
        op: &'static str,
    },
    /// `begin` was called while a frame was already open.
    #[error("`begin` called while a frame is open")]
    FrameOpen,
    /// A wizard query was made without a successful `begin_create`/`begin_delete`.
    #[error("`{op}` called outside a `begin_{wizard}`/`end_{wizard}` pair")]
    NoHandshake {
        /// The offending call.
        op: &'static str,
        /// `"create"` or `"delete"`.
        wizard: &'static str,
    },
    /// Accept or reject was called with no item awaiting a decision.
    #[error("`{op}`: no item is awaiting a decision")]
    NothingPending {
        /// The offending call.
        op: &'static str,
    },
    /// `suspend`/`resume` did not pair up.
    #[error("unbalanced suspend/resume at `{op}`")]
    Unbalanced {
        /// The offending call.
        op: &'static str,
    },
    /// The graph refused an edit.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
