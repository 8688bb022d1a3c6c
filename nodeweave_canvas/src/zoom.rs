// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete zoom levels for wheel zooming.

/// The default ascending table of wheel zoom levels.
pub const DEFAULT_ZOOM_LEVELS: [f64; 15] = [
    0.1, 0.15, 0.2, 0.25, 0.33, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0,
];

const ON_LEVEL_EPSILON: f64 = 1e-3;

/// Step `steps` entries through the ascending table `levels`, starting from `current`.
///
/// The start is the entry nearest to `current`; when two entries are equally near,
/// the one in the direction of travel wins. If `current` is not on a level and the
/// nearest entry already lies in the direction of travel, reaching it counts as the
/// first step. The result is clamped to the table's range.
///
/// An empty table or `steps == 0` returns `current` unchanged.
pub fn step_zoom(levels: &[f64], current: f64, steps: i32) -> f64 {
    if levels.is_empty() || steps == 0 {
        return current;
    }
    let mut nearest = 0_usize;
    let mut best = f64::INFINITY;
    for (i, level) in levels.iter().enumerate() {
        let d = (level - current).abs();
        let closer = d < best;
        let tie_toward_travel = d == best && steps > 0;
        if closer || tie_toward_travel {
            nearest = i;
            best = d;
        }
    }

    let steps = steps as isize;
    let mut target = nearest as isize + steps;
    if best > ON_LEVEL_EPSILON {
        let ahead = (levels[nearest] > current && steps > 0)
            || (levels[nearest] < current && steps < 0);
        if ahead {
            target -= steps.signum();
        }
    }
    let last = levels.len() as isize - 1;
    #[allow(
        clippy::cast_sign_loss,
        reason = "The target index is clamped to the table range first."
    )]
    let idx = target.clamp(0, last) as usize;
    levels[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_from_exact_level() {
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.0, 1), 1.25);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.0, -1), 0.75);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.0, 3), 2.0);
    }

    #[test]
    fn off_level_start_snaps_to_nearest() {
        // Nearest is 1.0, behind the travel direction.
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.1, 1), 1.25);
        // Nearest is 1.25, ahead: reaching it is the step.
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.2, 1), 1.25);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.2, -1), 1.0);
    }

    #[test]
    fn ties_break_toward_travel() {
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.125, 1), 1.25);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.125, -1), 1.0);
    }

    #[test]
    fn clamps_to_table() {
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 5.0, 4), 5.0);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 0.1, -3), 0.1);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 40.0, -1), 5.0);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 40.0, -2), 4.0);
    }

    #[test]
    fn empty_table_is_identity() {
        assert_eq!(step_zoom(&[], 1.7, 2), 1.7);
        assert_eq!(step_zoom(&DEFAULT_ZOOM_LEVELS, 1.7, 0), 1.7);
    }
}
