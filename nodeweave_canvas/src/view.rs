// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persistent part of a canvas: scroll offset and zoom.

use kurbo::{Point, Rect, Size, Vec2};

use crate::canvas::Canvas;

/// Persistent scroll and zoom of an editor window.
///
/// `scroll` is the canvas point displayed at the window's top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    /// Canvas point at the top-left corner of the window.
    pub scroll: Vec2,
    /// Uniform zoom factor. Always positive.
    pub zoom: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            scroll: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl View {
    /// Build the frame's [`Canvas`] for a window occupying `window` in screen space.
    pub fn canvas(&self, window: Rect) -> Canvas {
        Canvas::new(
            window.origin(),
            window.size(),
            Vec2::new(self.zoom, self.zoom),
            -self.scroll * self.zoom,
        )
    }

    /// Assign the zoom directly.
    ///
    /// Any positive finite value is accepted; anything else leaves the view
    /// unchanged and returns `false`.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        if !zoom.is_finite() || zoom <= 0.0 {
            return false;
        }
        self.zoom = zoom;
        true
    }

    /// Change the zoom to `new_zoom` keeping the canvas point under `anchor` fixed.
    ///
    /// `anchor` is in screen space; `window_origin` is the window's screen position.
    /// Returns `false` without changes when `new_zoom` is not a positive finite value.
    pub fn zoom_about(&mut self, new_zoom: f64, anchor: Point, window_origin: Point) -> bool {
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            return false;
        }
        let offset = anchor - window_origin;
        let pinned = self.scroll + offset / self.zoom;
        self.scroll = pinned - offset / new_zoom;
        self.zoom = new_zoom;
        true
    }

    /// Scroll so that the canvas point `p` lands at the window center.
    pub fn center_on(&mut self, p: Point, window_size: Size) {
        let half = Vec2::new(window_size.width, window_size.height) / (2.0 * self.zoom);
        self.scroll = p.to_vec2() - half;
    }
}
