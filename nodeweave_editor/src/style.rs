// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color roles and how the host resolves them.

use nodeweave_graph::Color;

/// Semantic color roles the editor paints with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleColor {
    /// Canvas background.
    Background,
    /// Background grid lines.
    Grid,
    /// Node body fill.
    NodeBg,
    /// Idle node border.
    NodeBorder,
    /// Hovered node border.
    HovNodeBorder,
    /// Selected node border.
    SelNodeBorder,
    /// Node marquee fill.
    NodeSelRect,
    /// Node marquee border.
    NodeSelRectBorder,
    /// Outline under a hovered link.
    HovLinkBorder,
    /// Outline under a selected link.
    SelLinkBorder,
    /// Link marquee fill.
    LinkSelRect,
    /// Link marquee border.
    LinkSelRectBorder,
    /// Pin rectangle fill.
    PinRect,
    /// Pin rectangle border.
    PinRectBorder,
}

impl StyleColor {
    /// Every role, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Background,
        Self::Grid,
        Self::NodeBg,
        Self::NodeBorder,
        Self::HovNodeBorder,
        Self::SelNodeBorder,
        Self::NodeSelRect,
        Self::NodeSelRectBorder,
        Self::HovLinkBorder,
        Self::SelLinkBorder,
        Self::LinkSelRect,
        Self::LinkSelRectBorder,
        Self::PinRect,
        Self::PinRectBorder,
    ];

    /// Display name, for style editors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Grid => "Grid",
            Self::NodeBg => "Node Background",
            Self::NodeBorder => "Node Border",
            Self::HovNodeBorder => "Hovered Node Border",
            Self::SelNodeBorder => "Selected Node Border",
            Self::NodeSelRect => "Node Selector",
            Self::NodeSelRectBorder => "Node Selector Border",
            Self::HovLinkBorder => "Hovered Link Border",
            Self::SelLinkBorder => "Selected Link Border",
            Self::LinkSelRect => "Link Selector",
            Self::LinkSelRectBorder => "Link Selector Border",
            Self::PinRect => "Pin Rect",
            Self::PinRectBorder => "Pin Rect Border",
        }
    }
}

/// The host's color table.
pub trait ColorLookup {
    /// The concrete color for `role`.
    fn color(&self, role: StyleColor) -> Color;
}

impl<F: Fn(StyleColor) -> Color> ColorLookup for F {
    fn color(&self, role: StyleColor) -> Color {
        self(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        for (i, a) in StyleColor::ALL.iter().enumerate() {
            for b in &StyleColor::ALL[i + 1..] {
                assert_ne!(a.name(), b.name(), "{a:?} and {b:?} share a name");
            }
        }
    }

    #[test]
    fn closures_are_lookups() {
        let lookup = |role: StyleColor| match role {
            StyleColor::Background => Color::BLACK,
            _ => Color::WHITE,
        };
        assert_eq!(lookup.color(StyleColor::Background), Color::BLACK);
        assert_eq!(lookup.color(StyleColor::PinRect), Color::WHITE);
    }
}
