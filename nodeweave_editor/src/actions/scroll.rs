// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panning with the pan button on empty canvas, and stepped wheel zoom.

use kurbo::{Point, Vec2};
use nodeweave_canvas::step_zoom;
use tracing::trace;

use super::ActionContext;
use crate::control::Control;

const ZOOM_EPSILON: f64 = 1e-6;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Mode {
    /// Dragging the canvas; `start` is the scroll at the press.
    Pan { start: Vec2 },
    /// Easing towards a zoom level. `settled` is set on the frame the target is reached.
    Zoom {
        target: f64,
        anchor: Point,
        settled: bool,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct ScrollAction {
    mode: Mode,
}

impl ScrollAction {
    pub(crate) fn accept(cx: &ActionContext<'_>, control: &Control) -> Option<Self> {
        let pan = cx.config.pan_button;
        if control.background_active && control.button == Some(pan) && cx.mouse.down(pan) {
            return Some(Self {
                mode: Mode::Pan {
                    start: cx.view.scroll,
                },
            });
        }
        if cx.mouse.wheel != 0.0 && (control.hot.is_some() || control.background_hot) {
            return Some(Self {
                mode: Mode::Zoom {
                    target: cx.view.zoom,
                    anchor: cx.mouse.pos,
                    settled: false,
                },
            });
        }
        None
    }

    /// Zoom level the action is easing towards, if zooming.
    pub(crate) fn zoom_target(&self) -> Option<f64> {
        match self.mode {
            Mode::Zoom { target, .. } => Some(target),
            Mode::Pan { .. } => None,
        }
    }

    pub(crate) fn process(&mut self, cx: &mut ActionContext<'_>) -> bool {
        match &mut self.mode {
            Mode::Pan { start } => {
                let pan = cx.config.pan_button;
                let delta = cx.mouse.drag_delta(pan);
                let inv = cx.canvas.inv_zoom();
                let scroll = *start - Vec2::new(delta.x * inv.x, delta.y * inv.y);
                if scroll != cx.view.scroll {
                    cx.view.scroll = scroll;
                    cx.settings.mark_dirty();
                }
                cx.mouse.down(pan) && !cx.mouse.released(pan)
            }
            Mode::Zoom {
                target,
                anchor,
                settled,
            } => {
                let wheel = cx.mouse.wheel;
                if wheel != 0.0 {
                    let steps = if wheel > 0.0 { 1 } else { -1 };
                    *target = step_zoom(&cx.config.zoom_levels, *target, steps);
                    *anchor = cx.mouse.pos;
                    *settled = false;
                } else if *settled {
                    return false;
                }

                let current = cx.view.zoom;
                let smoothing = cx.config.zoom_smoothing.clamp(0.0, 1.0);
                let mut next = current + (*target - current) * smoothing;
                if smoothing <= 0.0 || (*target - next).abs() < ZOOM_EPSILON {
                    next = *target;
                }
                if next != current
                    && cx
                        .view
                        .zoom_about(next, *anchor, cx.canvas.window_screen_pos())
                {
                    trace!(zoom = next, target = *target, "zoom step");
                    cx.settings.mark_dirty();
                }
                if cx.view.zoom == *target {
                    *settled = true;
                }
                true
            }
        }
    }
}
