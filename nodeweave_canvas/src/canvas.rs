// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame canvas ⇄ client ⇄ screen mapping.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Affine mapping between canvas, client and screen spaces.
///
/// - `to_client(p) = p * zoom + client_origin`
/// - `to_screen(p) = to_client(p) + window_screen_pos`
///
/// The inverse maps multiply by the cached reciprocal of the zoom.
/// For all finite points `to_screen(from_screen(p)) == p` within floating-point epsilon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    window_screen_pos: Point,
    window_screen_size: Size,
    client_origin: Vec2,
    zoom: Vec2,
    inv_zoom: Vec2,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Point::ZERO, Size::ZERO, Vec2::new(1.0, 1.0), Vec2::ZERO)
    }
}

#[allow(
    clippy::wrong_self_convention,
    reason = "Method names follow the coordinate spaces: canvas from/to screen and client."
)]
impl Canvas {
    /// Create a mapping for a window at `window_screen_pos` of `window_screen_size`.
    ///
    /// `zoom` must be positive on both axes. `client_origin` is where the canvas
    /// origin lands in client space.
    pub fn new(
        window_screen_pos: Point,
        window_screen_size: Size,
        zoom: Vec2,
        client_origin: Vec2,
    ) -> Self {
        debug_assert!(
            zoom.x > 0.0 && zoom.y > 0.0,
            "canvas zoom must be positive, got {zoom:?}"
        );
        Self {
            window_screen_pos,
            window_screen_size,
            client_origin,
            zoom,
            inv_zoom: Vec2::new(1.0 / zoom.x, 1.0 / zoom.y),
        }
    }

    /// Window position in screen space.
    pub fn window_screen_pos(&self) -> Point {
        self.window_screen_pos
    }

    /// Window size in screen space.
    pub fn window_screen_size(&self) -> Size {
        self.window_screen_size
    }

    /// Window rectangle in screen space.
    pub fn window_rect(&self) -> Rect {
        Rect::from_origin_size(self.window_screen_pos, self.window_screen_size)
    }

    /// Where the canvas origin lands in client space.
    pub fn client_origin(&self) -> Vec2 {
        self.client_origin
    }

    /// Zoom factor per axis.
    pub fn zoom(&self) -> Vec2 {
        self.zoom
    }

    /// Reciprocal of [`Canvas::zoom`].
    pub fn inv_zoom(&self) -> Vec2 {
        self.inv_zoom
    }

    /// Map a screen-space point to canvas space.
    pub fn from_screen(&self, point: Point) -> Point {
        self.from_client(point - self.window_screen_pos.to_vec2())
    }

    /// Map a canvas-space point to screen space.
    pub fn to_screen(&self, point: Point) -> Point {
        self.to_client(point) + self.window_screen_pos.to_vec2()
    }

    /// Map a client-space point to canvas space.
    pub fn from_client(&self, point: Point) -> Point {
        let v = point.to_vec2() - self.client_origin;
        Point::new(v.x * self.inv_zoom.x, v.y * self.inv_zoom.y)
    }

    /// Map a canvas-space point to client space.
    pub fn to_client(&self, point: Point) -> Point {
        Point::new(
            point.x * self.zoom.x + self.client_origin.x,
            point.y * self.zoom.y + self.client_origin.y,
        )
    }

    /// Map a screen-space displacement (for example a drag delta) to canvas space.
    pub fn from_screen_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x * self.inv_zoom.x, delta.y * self.inv_zoom.y)
    }

    /// Map a canvas-space displacement to screen space.
    pub fn to_screen_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x * self.zoom.x, delta.y * self.zoom.y)
    }

    /// Map a screen-space rectangle to canvas space.
    pub fn from_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.from_screen(Point::new(rect.x0, rect.y0)),
            self.from_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Map a canvas-space rectangle to screen space.
    pub fn to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.to_screen(Point::new(rect.x0, rect.y0)),
            self.to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// The canvas-space rectangle currently visible through the window.
    pub fn visible_rect(&self) -> Rect {
        self.from_screen_rect(self.window_rect())
    }

    /// Canvas → screen as an [`Affine`], for draw layers that take transforms.
    pub fn to_screen_transform(&self) -> Affine {
        Affine::translate(self.window_screen_pos.to_vec2() + self.client_origin)
            * Affine::scale_non_uniform(self.zoom.x, self.zoom.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> [Point; 7] {
        [
            Point::ZERO,
            Point::new(1.0, 1.0),
            Point::new(-250.5, 13.25),
            Point::new(1024.0, -768.0),
            Point::new(0.001, 9999.0),
            Point::new(-12345.678, -0.5),
            Point::new(333.3, 666.6),
        ]
    }

    #[test]
    fn screen_round_trip_across_zoom_levels() {
        for zoom in [0.1, 1.0, 2.5] {
            let canvas = Canvas::new(
                Point::new(40.0, 25.0),
                Size::new(800.0, 600.0),
                Vec2::new(zoom, zoom),
                Vec2::new(-17.5, 230.0),
            );
            for p in sample_points() {
                let back = canvas.to_screen(canvas.from_screen(p));
                assert!(
                    (back - p).hypot() < 1e-4,
                    "round trip at zoom {zoom} moved {p:?} to {back:?}"
                );
                let forth = canvas.from_screen(canvas.to_screen(p));
                assert!((forth - p).hypot() < 1e-4, "inverse round trip drifted");
            }
        }
    }

    #[test]
    fn client_and_screen_differ_by_window_position() {
        let canvas = Canvas::new(
            Point::new(10.0, 20.0),
            Size::new(100.0, 100.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(5.0, 5.0),
        );
        let p = Point::new(3.0, 4.0);
        assert_eq!(canvas.to_client(p), Point::new(11.0, 13.0));
        assert_eq!(canvas.to_screen(p), Point::new(21.0, 33.0));
        assert_eq!(canvas.from_client(Point::new(11.0, 13.0)), p);
    }

    #[test]
    fn transform_matches_point_mapping() {
        let canvas = Canvas::new(
            Point::new(7.0, -3.0),
            Size::new(640.0, 480.0),
            Vec2::new(1.5, 0.75),
            Vec2::new(-20.0, 12.0),
        );
        let tf = canvas.to_screen_transform();
        for p in sample_points() {
            let a = tf * p;
            let b = canvas.to_screen(p);
            assert!((a - b).hypot() < 1e-6, "affine and point map disagree");
        }
    }

    #[test]
    fn visible_rect_is_window_in_canvas_space() {
        let canvas = Canvas::new(
            Point::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            Vec2::new(2.0, 2.0),
            Vec2::ZERO,
        );
        assert_eq!(canvas.visible_rect(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn deltas_scale_with_zoom_only() {
        let canvas = Canvas::new(
            Point::new(500.0, 500.0),
            Size::new(10.0, 10.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(99.0, -99.0),
        );
        assert_eq!(canvas.from_screen_delta(Vec2::new(8.0, -4.0)), Vec2::new(2.0, -1.0));
        assert_eq!(canvas.to_screen_delta(Vec2::new(2.0, -1.0)), Vec2::new(8.0, -4.0));
    }
}
