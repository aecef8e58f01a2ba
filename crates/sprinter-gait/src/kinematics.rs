//! Parallel-foot leg kinematics.
//!
//! [`solve_leg`] converts a [`FootOffset`] into leg joint angles under the
//! assumption that the foot sole stays parallel to the ground.  This is a
//! closed-form approximation, not an inverse-kinematics solve: it treats the
//! hip-to-ankle segment as pivoting symmetrically about the knee and relies on
//! small-angle behaviour.  The mapping is empirically tuned for the gait
//! parameter ranges and is not derived from link lengths, so it must not be
//! used as a general-purpose IK routine.
//!
//! Invariants, exact for every real input:
//!
//! - `hip_pitch + ankle_pitch == -z` and `hip_pitch - ankle_pitch == 2x`
//!   (sagittal foot plane stays level regardless of knee flexion),
//! - `ankle_roll == -hip_roll` (lateral foot plane stays level).

use serde::{Deserialize, Serialize};
use sprinter_types::{JointId, Side};

use crate::oscillator::FootOffset;

/// Hip yaw-pitch is not driven by the gait; it is held here.
pub const HIP_YAW_PITCH_NEUTRAL: f64 = 0.0;

/// Joint angles for one leg, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegAngles {
    pub hip_yaw_pitch: f64,
    pub hip_roll: f64,
    pub hip_pitch: f64,
    pub knee_pitch: f64,
    pub ankle_pitch: f64,
    pub ankle_roll: f64,
}

impl LegAngles {
    /// Pair each angle with `side`'s joint, ordered as [`JointId::leg`].
    pub fn commands(&self, side: Side) -> [(JointId, f64); 6] {
        let [yaw, hip_roll, hip_pitch, knee, ankle_pitch, ankle_roll] = JointId::leg(side);
        [
            (yaw, self.hip_yaw_pitch),
            (hip_roll, self.hip_roll),
            (hip_pitch, self.hip_pitch),
            (knee, self.knee_pitch),
            (ankle_pitch, self.ankle_pitch),
            (ankle_roll, self.ankle_roll),
        ]
    }
}

/// Map a foot offset to leg joint angles.  Same form for both legs.
pub fn solve_leg(offset: &FootOffset) -> LegAngles {
    let FootOffset { x, y, z } = *offset;
    LegAngles {
        hip_yaw_pitch: HIP_YAW_PITCH_NEUTRAL,
        hip_roll: y,
        hip_pitch: -z / 2.0 + x,
        knee_pitch: z,
        ankle_pitch: -z / 2.0 - x,
        ankle_roll: -y,
    }
}
