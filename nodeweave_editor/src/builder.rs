// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node layout staging.
//!
//! The caller declares a node region by region and passes the size of each region's
//! content. Regions are placed from the node origin, inset by the padding:
//!
//! ```text
//! +--------------------------------------+
//! | header                               |
//! | inputs  |  content  |  outputs       |
//! +--------------------------------------+
//! ```
//!
//! Each body column is placed when first used and grows downwards.

use kurbo::{Point, Rect, Size, Vec2};
use nodeweave_graph::{Color, Graph, NodeId, ObjectKey, PinId, PinKind};

use crate::config::Style;
use crate::error::UsageError;
use crate::settings::Settings;

/// Where a node declaration currently stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeStage {
    /// No node has been started this frame.
    #[default]
    Invalid,
    /// A node is open; no region yet.
    Begin,
    /// Inside the header region.
    Header,
    /// In the body, between pins.
    Content,
    /// Inside an input pin.
    Input,
    /// Inside an output pin.
    Output,
    /// The last node was closed.
    End,
}

#[derive(Copy, Clone, Debug, Default)]
struct Column {
    x: Option<f64>,
    y: f64,
    width: f64,
}

impl Column {
    fn right(&self) -> Option<f64> {
        self.x.map(|x| x + self.width)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct NodeBuilder {
    stage: NodeStage,
    node: Option<ObjectKey>,
    origin: Point,
    extent: Point,
    body_top: f64,
    header: Option<(Rect, Color)>,
    columns: [Column; 3],
    pin: Option<(ObjectKey, PinKind)>,
    pivot: Vec2,
}

const INPUTS: usize = 0;
const CONTENT: usize = 1;
const OUTPUTS: usize = 2;

impl NodeBuilder {
    pub(crate) fn stage(&self) -> NodeStage {
        self.stage
    }

    /// Forget any node of the previous frame.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect(&self, op: &'static str, valid: &[NodeStage]) -> Result<(), UsageError> {
        if valid.contains(&self.stage) {
            Ok(())
        } else {
            Err(UsageError::Stage {
                op,
                stage: self.stage,
            })
        }
    }

    pub(crate) fn begin_node(
        &mut self,
        graph: &mut Graph,
        settings: &mut Settings,
        id: NodeId,
    ) -> Result<ObjectKey, UsageError> {
        self.expect("begin_node", &[NodeStage::Invalid, NodeStage::End])?;
        let stored = settings.node(id.0).map(|s| s.location).unwrap_or(Point::ZERO);
        let (key, _) = graph.get_or_create_node(id, stored)?;
        let origin = graph.node(key).map(|n| n.bounds.origin()).unwrap_or(stored);
        settings.touch(id.0, origin);

        *self = Self {
            stage: NodeStage::Begin,
            node: Some(key),
            origin,
            extent: origin,
            body_top: origin.y,
            ..Self::default()
        };
        if let Some(node) = graph.node_mut(key) {
            node.header = None;
        }
        Ok(key)
    }

    pub(crate) fn begin_header(&mut self, color: Color) -> Result<(), UsageError> {
        self.expect("begin_header", &[NodeStage::Begin])?;
        self.header = Some((Rect::ZERO, color));
        self.stage = NodeStage::Header;
        Ok(())
    }

    pub(crate) fn end_header(
        &mut self,
        graph: &mut Graph,
        style: &Style,
        size: Size,
    ) -> Result<(), UsageError> {
        self.expect("end_header", &[NodeStage::Header])?;
        let pad = style.node_padding;
        let rect = Rect::from_origin_size(self.origin + Vec2::new(pad, pad), size);
        if let Some((header, _)) = &mut self.header {
            *header = rect;
        }
        self.grow(rect);
        self.body_top = rect.y1 + style.header_spacing;
        self.stage = NodeStage::Content;
        self.sync_bounds(graph, style);
        Ok(())
    }

    pub(crate) fn begin_content(&mut self, style: &Style) -> Result<(), UsageError> {
        self.expect("begin_content", &[NodeStage::Begin])?;
        self.body_top = self.origin.y + style.node_padding;
        self.stage = NodeStage::Content;
        Ok(())
    }

    pub(crate) fn add_content(
        &mut self,
        graph: &mut Graph,
        style: &Style,
        size: Size,
    ) -> Result<Rect, UsageError> {
        self.expect("add_content", &[NodeStage::Content])?;
        let rect = self.place(CONTENT, style, size);
        self.sync_bounds(graph, style);
        Ok(rect)
    }

    pub(crate) fn begin_pin(
        &mut self,
        graph: &mut Graph,
        id: PinId,
        kind: PinKind,
    ) -> Result<ObjectKey, UsageError> {
        let op = match kind {
            PinKind::Input => "begin_input",
            PinKind::Output => "begin_output",
        };
        self.expect(op, &[NodeStage::Content])?;
        let node = self.node.ok_or(UsageError::Stage {
            op,
            stage: self.stage,
        })?;
        let (key, _) = graph.get_or_create_pin(id, kind, node)?;
        self.pin = Some((key, kind));
        self.pivot = match kind {
            PinKind::Input => Vec2::new(0.0, 0.5),
            PinKind::Output => Vec2::new(1.0, 0.5),
        };
        self.stage = match kind {
            PinKind::Input => NodeStage::Input,
            PinKind::Output => NodeStage::Output,
        };
        Ok(key)
    }

    pub(crate) fn set_pin_pivot(&mut self, pivot: Vec2) -> Result<(), UsageError> {
        self.expect("set_pin_pivot", &[NodeStage::Input, NodeStage::Output])?;
        self.pivot = pivot;
        Ok(())
    }

    pub(crate) fn end_pin(
        &mut self,
        graph: &mut Graph,
        style: &Style,
        kind: PinKind,
        size: Size,
    ) -> Result<Rect, UsageError> {
        let (op, stage, column) = match kind {
            PinKind::Input => ("end_input", NodeStage::Input, INPUTS),
            PinKind::Output => ("end_output", NodeStage::Output, OUTPUTS),
        };
        self.expect(op, &[stage])?;
        let rect = self.place(column, style, size);
        if let Some((key, _)) = self.pin.take() {
            if let Some(pin) = graph.pin_mut(key) {
                pin.bounds = rect;
                pin.drag_point = rect.origin()
                    + Vec2::new(self.pivot.x * rect.width(), self.pivot.y * rect.height());
            }
        }
        self.stage = NodeStage::Content;
        self.sync_bounds(graph, style);
        Ok(rect)
    }

    pub(crate) fn end_node(&mut self, graph: &mut Graph, style: &Style) -> Result<(), UsageError> {
        self.expect("end_node", &[NodeStage::Begin, NodeStage::Content])?;
        let bounds = self.sync_bounds(graph, style);
        if let Some(key) = self.node {
            let header = self.header.map(|(rect, color)| {
                let widened = Rect::new(rect.x0, rect.y0, bounds.x1 - style.node_padding, rect.y1);
                (widened, color)
            });
            if let Some(node) = graph.node_mut(key) {
                node.header = header;
            }
            graph.push_layer(key);
        }
        self.stage = NodeStage::End;
        self.node = None;
        Ok(())
    }

    /// Place `size` at the bottom of `column` and return its rectangle.
    fn place(&mut self, column: usize, style: &Style, size: Size) -> Rect {
        if self.columns[column].x.is_none() {
            let left = self.columns[..column]
                .iter()
                .rev()
                .find_map(Column::right)
                .map(|right| right + style.column_spacing)
                .unwrap_or(self.origin.x + style.node_padding);
            self.columns[column] = Column {
                x: Some(left),
                y: self.body_top,
                width: 0.0,
            };
        }
        let col = &mut self.columns[column];
        let x = col.x.unwrap_or(self.origin.x + style.node_padding);
        let rect = Rect::from_origin_size(Point::new(x, col.y), size);
        col.y = rect.y1 + style.row_spacing;
        col.width = col.width.max(size.width);
        self.grow(rect);
        rect
    }

    fn grow(&mut self, rect: Rect) {
        self.extent.x = self.extent.x.max(rect.x1);
        self.extent.y = self.extent.y.max(rect.y1);
    }

    /// Write the padded extent (at least the minimum size) to the node.
    fn sync_bounds(&self, graph: &mut Graph, style: &Style) -> Rect {
        let pad = style.node_padding;
        let min = style.min_node_size;
        let x1 = (self.extent.x + pad).max(self.origin.x + min.width);
        let y1 = (self.extent.y + pad).max(self.origin.y + min.height);
        let bounds = Rect::new(self.origin.x, self.origin.y, x1, y1);
        if let Some(node) = self.node.and_then(|key| graph.node_mut(key)) {
            node.bounds = bounds;
        }
        bounds
    }
}
