// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior and layout knobs.

use alloc::vec::Vec;
use kurbo::Size;
use nodeweave_canvas::DEFAULT_ZOOM_LEVELS;

use crate::input::PointerButtons;
use crate::render::TextureId;

/// Numeric layout and painting metrics. Colors live behind [`ColorLookup`](crate::ColorLookup).
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Inset between a node's border and its regions.
    pub node_padding: f64,
    /// Corner radius of node bodies.
    pub node_rounding: f64,
    /// Border width of idle nodes.
    pub node_border_width: f64,
    /// Border width of hovered nodes.
    pub hovered_node_border_width: f64,
    /// Border width of selected nodes.
    pub selected_node_border_width: f64,
    /// Corner radius of pin rectangles.
    pub pin_rounding: f64,
    /// Border width of pin rectangles.
    pub pin_border_width: f64,
    /// Extra thickness of the outline drawn under hovered or selected links.
    pub link_outline_width: f64,
    /// Gap between the header and the body columns.
    pub header_spacing: f64,
    /// Gap between the input, content and output columns.
    pub column_spacing: f64,
    /// Gap between stacked items of one column.
    pub row_spacing: f64,
    /// Smallest node size.
    pub min_node_size: Size,
    /// Background grid spacing in canvas units; zero disables the grid.
    pub grid_spacing: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            node_padding: 8.0,
            node_rounding: 12.0,
            node_border_width: 1.5,
            hovered_node_border_width: 3.5,
            selected_node_border_width: 3.5,
            pin_rounding: 4.0,
            pin_border_width: 0.0,
            link_outline_width: 4.0,
            header_spacing: 4.0,
            column_spacing: 16.0,
            row_spacing: 4.0,
            min_node_size: Size::ZERO,
            grid_spacing: 64.0,
        }
    }
}

/// Editor behavior knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Screen distance the pointer must travel before a press becomes a drag.
    pub drag_threshold: f64,
    /// Button that pans the canvas when pressed on the background.
    pub pan_button: PointerButtons,
    /// Ascending wheel zoom levels.
    pub zoom_levels: Vec<f64>,
    /// Fraction of the remaining distance to the target zoom covered per frame.
    ///
    /// `1.0` jumps straight to the next level.
    pub zoom_smoothing: f64,
    /// Whether [`Keys::DELETE`](crate::Keys::DELETE) arms deletion of the selection.
    pub delete_key_arms: bool,
    /// Brush used to fill node headers.
    pub header_texture: Option<TextureId>,
    /// Layout and painting metrics.
    pub style: Style,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drag_threshold: 6.0,
            pan_button: PointerButtons::MIDDLE,
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            zoom_smoothing: 1.0,
            delete_key_arms: true,
            header_texture: None,
            style: Style::default(),
        }
    }
}
