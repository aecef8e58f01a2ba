use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which leg (or arm) a joint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Every joint the gait generator drives: six per leg plus one shoulder
/// pitch per arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JointId {
    LHipYawPitch,
    LHipRoll,
    LHipPitch,
    LKneePitch,
    LAnklePitch,
    LAnkleRoll,
    RHipYawPitch,
    RHipRoll,
    RHipPitch,
    RKneePitch,
    RAnklePitch,
    RAnkleRoll,
    LShoulderPitch,
    RShoulderPitch,
}

impl JointId {
    /// All 14 driven joints, legs first (left then right), then shoulders.
    pub const ALL: [JointId; 14] = [
        JointId::LHipYawPitch,
        JointId::LHipRoll,
        JointId::LHipPitch,
        JointId::LKneePitch,
        JointId::LAnklePitch,
        JointId::LAnkleRoll,
        JointId::RHipYawPitch,
        JointId::RHipRoll,
        JointId::RHipPitch,
        JointId::RKneePitch,
        JointId::RAnklePitch,
        JointId::RAnkleRoll,
        JointId::LShoulderPitch,
        JointId::RShoulderPitch,
    ];

    /// The six leg joints of `side`, ordered hip yaw-pitch, hip roll, hip
    /// pitch, knee pitch, ankle pitch, ankle roll.
    pub fn leg(side: Side) -> [JointId; 6] {
        match side {
            Side::Left => [
                JointId::LHipYawPitch,
                JointId::LHipRoll,
                JointId::LHipPitch,
                JointId::LKneePitch,
                JointId::LAnklePitch,
                JointId::LAnkleRoll,
            ],
            Side::Right => [
                JointId::RHipYawPitch,
                JointId::RHipRoll,
                JointId::RHipPitch,
                JointId::RKneePitch,
                JointId::RAnklePitch,
                JointId::RAnkleRoll,
            ],
        }
    }

    /// The shoulder pitch joint of `side`.
    pub fn shoulder(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LShoulderPitch,
            Side::Right => JointId::RShoulderPitch,
        }
    }

    /// Device name as exposed by the robot runtime, e.g. `"LKneePitch"`.
    pub fn name(self) -> &'static str {
        match self {
            JointId::LHipYawPitch => "LHipYawPitch",
            JointId::LHipRoll => "LHipRoll",
            JointId::LHipPitch => "LHipPitch",
            JointId::LKneePitch => "LKneePitch",
            JointId::LAnklePitch => "LAnklePitch",
            JointId::LAnkleRoll => "LAnkleRoll",
            JointId::RHipYawPitch => "RHipYawPitch",
            JointId::RHipRoll => "RHipRoll",
            JointId::RHipPitch => "RHipPitch",
            JointId::RKneePitch => "RKneePitch",
            JointId::RAnklePitch => "RAnklePitch",
            JointId::RAnkleRoll => "RAnkleRoll",
            JointId::LShoulderPitch => "LShoulderPitch",
            JointId::RShoulderPitch => "RShoulderPitch",
        }
    }

    pub fn side(self) -> Side {
        match self {
            JointId::LHipYawPitch
            | JointId::LHipRoll
            | JointId::LHipPitch
            | JointId::LKneePitch
            | JointId::LAnklePitch
            | JointId::LAnkleRoll
            | JointId::LShoulderPitch => Side::Left,
            _ => Side::Right,
        }
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error taxonomy shared by the HAL, the gait core and the CLI.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SprinterError {
    /// Invalid gait parameters or configuration, detected before the loop starts.
    #[error("Configuration Error in {field}: {details}")]
    Configuration { field: String, details: String },

    /// The actuator port rejected a setpoint.
    #[error("Actuator Fault on {joint}: {details}")]
    ActuatorFault { joint: JointId, details: String },

    /// The tick source reported an unrecoverable condition.
    #[error("Clock Fault: {0}")]
    ClockFault(String),
}
