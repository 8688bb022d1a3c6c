// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting through a narrow draw interface.
//!
//! The editor does not rasterize anything itself. [`Editor::paint`](crate::Editor::paint)
//! walks the graph and emits screen-space primitives to a host-provided [`DrawList`],
//! looking colors up through [`ColorLookup`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};
use nodeweave_canvas::Canvas;
use nodeweave_graph::{Color, Graph, ObjectKey, Selection};

use crate::config::Style;
use crate::control::Control;
use crate::style::{ColorLookup, StyleColor};

/// Opaque handle of a host texture, used as a fill brush.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureId(pub u64);

/// Screen-space drawing primitives supplied by the host.
pub trait DrawList {
    /// Fill a rounded rectangle, optionally with a texture brush tinted by `color`.
    fn fill_rect(&mut self, rect: Rect, rounding: f64, color: Color, texture: Option<TextureId>);
    /// Stroke a rounded rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, rounding: f64, color: Color, width: f64);
    /// Draw a straight line.
    fn line(&mut self, from: Point, to: Point, color: Color, thickness: f64);
    /// Draw one line of text with its top-left corner at `pos`.
    fn text(&mut self, pos: Point, color: Color, text: &str);
    /// Size `text` would occupy.
    fn measure_text(&self, text: &str) -> Size;
}

/// A [`DrawList`] that records every call, for tests and headless hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingDrawList {
    /// Recorded primitives, in emission order.
    pub commands: Vec<DrawCommand>,
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "Fields mirror the DrawList arguments.")]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        rounding: f64,
        color: Color,
        texture: Option<TextureId>,
    },
    StrokeRect {
        rect: Rect,
        rounding: f64,
        color: Color,
        width: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        thickness: f64,
    },
    Text {
        pos: Point,
        color: Color,
        text: String,
    },
}

impl RecordingDrawList {
    /// Number of recorded lines.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Recorded text lines.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawList for RecordingDrawList {
    fn fill_rect(&mut self, rect: Rect, rounding: f64, color: Color, texture: Option<TextureId>) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            rounding,
            color,
            texture,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, rounding: f64, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            rounding,
            color,
            width,
        });
    }

    fn line(&mut self, from: Point, to: Point, color: Color, thickness: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn text(&mut self, pos: Point, color: Color, text: &str) {
        self.commands.push(DrawCommand::Text {
            pos,
            color,
            text: String::from(text),
        });
    }

    fn measure_text(&self, text: &str) -> Size {
        let width = text.chars().count() as f64 * 7.0;
        Size::new(width, 13.0)
    }
}

/// Everything one paint pass reads.
pub(crate) struct Scene<'a> {
    pub(crate) graph: &'a Graph,
    pub(crate) selection: &'a Selection,
    pub(crate) control: &'a Control,
    pub(crate) canvas: &'a Canvas,
    pub(crate) style: &'a Style,
    pub(crate) header_texture: Option<TextureId>,
    /// Marquee in canvas space, and whether it selects links.
    pub(crate) marquee: Option<(Rect, bool)>,
    /// In-flight link in canvas space.
    pub(crate) preview: Option<(Point, Point)>,
    pub(crate) preview_style: (Color, f64),
}

impl Scene<'_> {
    pub(crate) fn paint(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup) {
        let window = self.canvas.window_rect();
        draw.fill_rect(window, 0.0, colors.color(StyleColor::Background), None);
        self.paint_grid(draw, colors, window);

        for key in self.graph.layers() {
            if self.graph.is_live(*key) {
                self.paint_node(draw, colors, *key);
            }
        }
        self.paint_links(draw, colors);

        if let Some((a, b)) = self.preview {
            let (color, thickness) = self.preview_style;
            draw.line(
                self.canvas.to_screen(a),
                self.canvas.to_screen(b),
                color,
                thickness * self.canvas.zoom().x,
            );
        }

        if let Some((rect, links)) = self.marquee {
            let (fill, border) = if links {
                (StyleColor::LinkSelRect, StyleColor::LinkSelRectBorder)
            } else {
                (StyleColor::NodeSelRect, StyleColor::NodeSelRectBorder)
            };
            let rect = self.canvas.to_screen_rect(rect);
            draw.fill_rect(rect, 0.0, colors.color(fill), None);
            draw.stroke_rect(rect, 0.0, colors.color(border), 1.0);
        }
    }

    fn paint_grid(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup, window: Rect) {
        let zoom = self.canvas.zoom();
        let step_x = self.style.grid_spacing * zoom.x;
        let step_y = self.style.grid_spacing * zoom.y;
        if !(step_x >= 1.0 && step_y >= 1.0) {
            return;
        }
        let origin = self.canvas.to_screen(Point::ZERO);
        let color = colors.color(StyleColor::Grid);

        let mut x = window.x0 + ((origin.x - window.x0) % step_x + step_x) % step_x;
        while x < window.x1 {
            draw.line(Point::new(x, window.y0), Point::new(x, window.y1), color, 1.0);
            x += step_x;
        }
        let mut y = window.y0 + ((origin.y - window.y0) % step_y + step_y) % step_y;
        while y < window.y1 {
            draw.line(Point::new(window.x0, y), Point::new(window.x1, y), color, 1.0);
            y += step_y;
        }
    }

    fn paint_node(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup, key: ObjectKey) {
        let Some(node) = self.graph.node(key) else {
            return;
        };
        let style = self.style;
        let scale = self.canvas.zoom().x;
        let rounding = style.node_rounding * scale;
        let bounds = self.canvas.to_screen_rect(node.bounds);

        draw.fill_rect(bounds, rounding, colors.color(StyleColor::NodeBg), None);
        if let Some((header, color)) = node.header {
            draw.fill_rect(
                self.canvas.to_screen_rect(header),
                rounding,
                color,
                self.header_texture,
            );
        }

        let (role, width) = if self.selection.contains(key) {
            (StyleColor::SelNodeBorder, style.selected_node_border_width)
        } else if self.control.hot_node == Some(key) {
            (StyleColor::HovNodeBorder, style.hovered_node_border_width)
        } else {
            (StyleColor::NodeBorder, style.node_border_width)
        };
        if width > 0.0 {
            draw.stroke_rect(bounds, rounding, colors.color(role), width);
        }

        let pin_rounding = style.pin_rounding * scale;
        for (_, pin) in self.graph.pins_of(key) {
            let rect = self.canvas.to_screen_rect(pin.bounds);
            draw.fill_rect(rect, pin_rounding, colors.color(StyleColor::PinRect), None);
            if style.pin_border_width > 0.0 {
                draw.stroke_rect(
                    rect,
                    pin_rounding,
                    colors.color(StyleColor::PinRectBorder),
                    style.pin_border_width,
                );
            }
        }
    }

    fn paint_links(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup) {
        let scale = self.canvas.zoom().x;
        for (key, _, link) in self.graph.links() {
            if !self.graph.is_live(key) {
                continue;
            }
            let Some((a, b)) = self.graph.link_endpoints(key) else {
                continue;
            };
            let (a, b) = (self.canvas.to_screen(a), self.canvas.to_screen(b));
            let thickness = link.thickness * scale;
            let outline = if self.selection.contains(key) {
                Some(StyleColor::SelLinkBorder)
            } else if self.control.hot_link == Some(key) {
                Some(StyleColor::HovLinkBorder)
            } else {
                None
            };
            if let Some(role) = outline {
                let width = thickness + self.style.link_outline_width;
                draw.line(a, b, colors.color(role), width);
            }
            draw.line(a, b, link.color, thickness);
        }
    }
}

/// Write `lines` top to bottom starting at `origin`.
pub(crate) fn paint_lines(draw: &mut dyn DrawList, color: Color, origin: Point, lines: &[String]) {
    let mut pos = origin;
    for line in lines {
        draw.text(pos, color, line);
        pos.y += draw.measure_text(line).height;
    }
}

/// Format an optional object for the metrics overlay.
pub(crate) fn describe(graph: &Graph, key: Option<ObjectKey>) -> String {
    match key.and_then(|k| graph.id_of(k)) {
        Some(id) => format!("{id}"),
        None => String::from("-"),
    }
}
