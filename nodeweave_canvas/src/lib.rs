// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nodeweave Canvas: coordinate spaces and view geometry for node editors.
//!
//! ## Spaces
//!
//! A node editor works with three 2D coordinate systems:
//!
//! - Canvas: where node geometry is authored. Independent of scroll and zoom.
//! - Client: the editor widget's local pixels. `client = canvas * zoom + origin`.
//! - Screen: the application's global pixels. `screen = client + window position`.
//!
//! [`Canvas`] is the affine mapping between them for one frame. It caches the
//! reciprocal of the zoom so the inverse maps never divide.
//!
//! ## Views
//!
//! [`View`] is the persistent state a canvas is built from: a scroll offset
//! (the canvas point shown at the window's top-left corner) and a zoom factor.
//! [`View::zoom_about`] changes the zoom while keeping the canvas point under
//! an anchor fixed, which is what wheel zooming needs.
//! [`step_zoom`] walks an ascending table of discrete zoom levels such as
//! [`DEFAULT_ZOOM_LEVELS`].
//!
//! ## Segment geometry
//!
//! Links between pins are hit-tested and marquee-tested as straight segments.
//! See [`segment_distance_sq`], [`segment_intersects_rect`] and [`rects_overlap`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use nodeweave_canvas::View;
//!
//! let window = Rect::new(100.0, 50.0, 900.0, 650.0);
//! let view = View { scroll: Vec2::new(20.0, 10.0), zoom: 2.0 };
//! let canvas = view.canvas(window);
//!
//! let p = Point::new(30.0, 40.0);
//! let on_screen = canvas.to_screen(p);
//! assert_eq!(on_screen, Point::new(120.0, 110.0));
//! assert!((canvas.from_screen(on_screen) - p).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod canvas;
mod geom;
mod view;
mod zoom;

pub use canvas::Canvas;
pub use geom::{rects_overlap, segment_distance_sq, segment_intersects_rect};
pub use view::View;
pub use zoom::{DEFAULT_ZOOM_LEVELS, step_zoom};
