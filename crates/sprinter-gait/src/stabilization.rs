//! Contralateral arm swing.
//!
//! Each shoulder swings with the opposite leg's forward offset, the way arms
//! counter the legs in natural gait.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use sprinter_types::{JointId, Side};

use crate::params::GaitParameters;

/// Shoulder pitch of the neutral rest pose (arms hanging slightly forward).
pub const SHOULDER_REST_PITCH: f64 = FRAC_PI_2 - 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoulderAngles {
    pub left_shoulder_pitch: f64,
    pub right_shoulder_pitch: f64,
}

impl ShoulderAngles {
    /// Right shoulder first, then left.
    pub fn commands(&self) -> [(JointId, f64); 2] {
        [
            (JointId::shoulder(Side::Right), self.right_shoulder_pitch),
            (JointId::shoulder(Side::Left), self.left_shoulder_pitch),
        ]
    }
}

/// Shoulder pitch correction from the legs' forward offsets.
pub fn compute_shoulders(x_left: f64, x_right: f64, params: &GaitParameters) -> ShoulderAngles {
    ShoulderAngles {
        right_shoulder_pitch: params.arm_swing * x_left + SHOULDER_REST_PITCH,
        left_shoulder_pitch: params.arm_swing * x_right + SHOULDER_REST_PITCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn shoulders_cross_couple_to_opposite_leg() {
        let p = GaitParameters {
            arm_swing: 1.4,
            ..GaitParameters::default()
        };
        let s = compute_shoulders(0.4, -0.4, &p);
        assert!((s.right_shoulder_pitch - (1.4 * 0.4 + SHOULDER_REST_PITCH)).abs() < EPS);
        assert!((s.left_shoulder_pitch - (-1.4 * 0.4 + SHOULDER_REST_PITCH)).abs() < EPS);
    }

    #[test]
    fn no_stride_means_rest_pose() {
        let s = compute_shoulders(0.0, 0.0, &GaitParameters::default());
        assert_eq!(s.left_shoulder_pitch, SHOULDER_REST_PITCH);
        assert_eq!(s.right_shoulder_pitch, SHOULDER_REST_PITCH);
    }

    #[test]
    fn rest_pose_value() {
        assert!((SHOULDER_REST_PITCH - 1.470_796_326_794_896_6).abs() < EPS);
    }

    #[test]
    fn commands_dispatch_right_then_left() {
        let s = ShoulderAngles {
            left_shoulder_pitch: 1.0,
            right_shoulder_pitch: 2.0,
        };
        assert_eq!(
            s.commands(),
            [(JointId::RShoulderPitch, 2.0), (JointId::LShoulderPitch, 1.0)]
        );
    }
}
