// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame input and the pointer state derived from it.

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Pointer buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Usually the left button.
        const PRIMARY   = 0b0000_0001;
        /// Usually the right button.
        const SECONDARY = 0b0000_0010;
        /// Usually the wheel button.
        const MIDDLE    = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during the frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift: add to the selection.
        const SHIFT = 0b0000_0001;
        /// Control (Command on macOS): toggle selection membership.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keys pressed during the frame (press events, not held state).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        /// Delete or Backspace.
        const DELETE = 0b0000_0001;
    }
}

/// Raw input sampled by the host for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    /// Pointer position in screen space, `None` when the pointer left the host window.
    pub pointer: Option<Point>,
    /// Buttons currently held.
    pub buttons: PointerButtons,
    /// Wheel notches this frame; positive zooms in.
    pub wheel: f64,
    /// Modifiers currently held.
    pub modifiers: Modifiers,
    /// Keys pressed this frame.
    pub keys: Keys,
}

impl Input {
    /// Pointer at `pos` with nothing pressed.
    pub fn at(pos: Point) -> Self {
        Self {
            pointer: Some(pos),
            ..Self::default()
        }
    }

    /// The same input with `buttons` held.
    #[must_use]
    pub fn with_buttons(self, buttons: PointerButtons) -> Self {
        Self { buttons, ..self }
    }

    /// The same input with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// The same input with a wheel movement.
    #[must_use]
    pub fn with_wheel(self, wheel: f64) -> Self {
        Self { wheel, ..self }
    }

    /// The same input with `keys` pressed.
    #[must_use]
    pub fn with_keys(self, keys: Keys) -> Self {
        Self { keys, ..self }
    }
}

const BUTTONS: [PointerButtons; 3] = [
    PointerButtons::PRIMARY,
    PointerButtons::SECONDARY,
    PointerButtons::MIDDLE,
];

fn slot(button: PointerButtons) -> usize {
    BUTTONS.iter().position(|b| *b == button).unwrap_or(0)
}

/// Pointer state with edges, click positions and drag tracking per button.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MouseState {
    pub(crate) pos: Point,
    pub(crate) has_pointer: bool,
    down: PointerButtons,
    pressed: PointerButtons,
    released: PointerButtons,
    dragged: PointerButtons,
    click_pos: [Point; 3],
    pub(crate) wheel: f64,
    pub(crate) modifiers: Modifiers,
    pub(crate) keys: Keys,
}

impl MouseState {
    /// Fold one frame of input in. Drag detection is sticky: once a held button
    /// moved `threshold` away from its click position it counts as dragged until
    /// the next press.
    pub(crate) fn update(&mut self, input: &Input, threshold: f64) {
        if let Some(pos) = input.pointer {
            self.pos = pos;
        }
        self.has_pointer = input.pointer.is_some();
        self.pressed = input.buttons - self.down;
        self.released = self.down - input.buttons;
        self.down = input.buttons;
        self.wheel = input.wheel;
        self.modifiers = input.modifiers;
        self.keys = input.keys;

        for button in BUTTONS {
            if self.pressed.contains(button) {
                self.click_pos[slot(button)] = self.pos;
                self.dragged.remove(button);
            }
            let held = self.down.contains(button) || self.released.contains(button);
            if held && self.drag_delta(button).hypot2() >= threshold * threshold {
                self.dragged.insert(button);
            }
        }
    }

    pub(crate) fn down(&self, button: PointerButtons) -> bool {
        self.down.contains(button)
    }

    pub(crate) fn pressed(&self, button: PointerButtons) -> bool {
        self.pressed.contains(button)
    }

    pub(crate) fn released(&self, button: PointerButtons) -> bool {
        self.released.contains(button)
    }

    /// Moved past the drag threshold since the last press.
    pub(crate) fn drag_exceeded(&self, button: PointerButtons) -> bool {
        self.dragged.contains(button)
    }

    /// Held and moved past the drag threshold.
    pub(crate) fn is_dragging(&self, button: PointerButtons) -> bool {
        self.down(button) && self.drag_exceeded(button)
    }

    pub(crate) fn click_pos(&self, button: PointerButtons) -> Point {
        self.click_pos[slot(button)]
    }

    /// Screen-space movement since the last press of `button`.
    pub(crate) fn drag_delta(&self, button: PointerButtons) -> Vec2 {
        self.pos - self.click_pos(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_sticky_drag() {
        let mut mouse = MouseState::default();
        let p = PointerButtons::PRIMARY;
        mouse.update(&Input::at(Point::new(10.0, 10.0)).with_buttons(p), 6.0);
        assert!(mouse.pressed(p), "press edge");
        assert_eq!(mouse.click_pos(p), Point::new(10.0, 10.0));

        mouse.update(&Input::at(Point::new(13.0, 10.0)).with_buttons(p), 6.0);
        assert!(!mouse.pressed(p), "no repeated edge");
        assert!(!mouse.is_dragging(p), "below threshold");

        mouse.update(&Input::at(Point::new(20.0, 10.0)).with_buttons(p), 6.0);
        assert!(mouse.is_dragging(p), "past threshold");
        mouse.update(&Input::at(Point::new(11.0, 10.0)).with_buttons(p), 6.0);
        assert!(mouse.is_dragging(p), "stays dragging when coming back");
        assert_eq!(mouse.drag_delta(p), Vec2::new(1.0, 0.0));

        mouse.update(&Input::at(Point::new(11.0, 10.0)), 6.0);
        assert!(mouse.released(p), "release edge");
        assert!(mouse.drag_exceeded(p), "drag flag survives the release frame");
        assert!(!mouse.is_dragging(p), "but no longer held");
    }

    #[test]
    fn pointer_leaving_keeps_last_position() {
        let mut mouse = MouseState::default();
        mouse.update(&Input::at(Point::new(5.0, 5.0)), 6.0);
        mouse.update(&Input::default(), 6.0);
        assert_eq!(mouse.pos, Point::new(5.0, 5.0));
        assert!(!mouse.has_pointer, "pointer gone");
    }
}
