//! Tilt measurement for pourable flasks
//!
//! Flasks pour around their local Z axis. Tilting left or right by the same
//! amount must read the same, so angles are folded into [0°, 180°].

use bevy::prelude::*;

use crate::math::{FULL_TURN_DEGREES, HALF_TURN_DEGREES, Real, wrap_degrees};

/// Fold an angle in degrees into [0, 180]. Values past a half turn are
/// mirrored as `360 - angle`.
#[inline]
pub fn normalize_tilt(angle: Real) -> Real {
    let wrapped = wrap_degrees(angle);
    if wrapped > HALF_TURN_DEGREES {
        FULL_TURN_DEGREES - wrapped
    } else {
        wrapped
    }
}

/// Local rotation about the pour (Z) axis, in degrees within [0, 360).
///
/// Uses a Y-X-Z decomposition so that roll is read last, the same way
/// editor-style euler angles report it.
pub fn pour_axis_degrees(rotation: Quat) -> Real {
    let (_yaw, _pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    wrap_degrees(roll.to_degrees())
}

#[inline]
pub fn exceeds_threshold(raw_angle: Real, threshold: Real) -> bool {
    normalize_tilt(raw_angle) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn angles_up_to_half_turn_are_unchanged() {
        for angle in [0.0, 20.0, 59.9, 60.0, 135.0, 180.0] {
            assert_eq!(normalize_tilt(angle), angle);
        }
    }

    #[test]
    fn angles_past_half_turn_fold_back() {
        for angle in [180.5_f32, 200.0, 290.0, 300.0, 359.0] {
            assert!(approx(normalize_tilt(angle), 360.0 - angle));
            assert!(approx(normalize_tilt(angle), normalize_tilt(360.0 - angle)));
        }
    }

    #[test]
    fn negative_angles_read_like_their_mirror() {
        assert!(approx(normalize_tilt(-70.0), 70.0));
        assert!(approx(normalize_tilt(-170.0), 170.0));
    }

    #[test]
    fn pour_axis_reads_roll() {
        let rotation = Quat::from_rotation_z(70_f32.to_radians());
        assert!(approx(pour_axis_degrees(rotation), 70.0));

        let rotation = Quat::from_rotation_z((-70_f32).to_radians());
        assert!(approx(pour_axis_degrees(rotation), 290.0));
        assert!(approx(normalize_tilt(pour_axis_degrees(rotation)), 70.0));
    }

    #[test]
    fn pour_axis_ignores_yaw() {
        let rotation = Quat::from_rotation_y(1.2) * Quat::from_rotation_z(45_f32.to_radians());
        assert!(approx(pour_axis_degrees(rotation), 45.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(exceeds_threshold(60.0, 60.0));
        assert!(exceeds_threshold(300.0, 60.0));
        assert!(!exceeds_threshold(59.0, 60.0));
        assert!(!exceeds_threshold(301.0, 60.0));
    }
}
