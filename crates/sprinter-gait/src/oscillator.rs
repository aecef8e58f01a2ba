//! Sinusoidal gait oscillator.
//!
//! Maps a phase (scaled elapsed time) to a Cartesian offset per foot.  The
//! vertical channel is the same for every direction: the two feet lift half a
//! period apart, so one leg is near full extension while the other is raised.
//! The direction only changes how the lateral and forward channels are
//! phased against it.
//!
//! The function is pure; calling it twice with the same phase yields the same
//! output, so the gait can be restarted at any point.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sprinter_types::SprinterError;

use crate::params::GaitParameters;

/// Which way the robot travels.  Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    SidewaysRight,
    SidewaysLeft,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::Forward,
        Direction::SidewaysRight,
        Direction::SidewaysLeft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::SidewaysRight => "sideways_right",
            Direction::SidewaysLeft => "sideways_left",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = SprinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| SprinterError::Configuration {
                field: "direction".to_string(),
                details: format!("unknown direction '{s}'"),
            })
    }
}

/// Displacement of one foot from neutral stance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FootOffset {
    /// Forward (+) / backward (−).
    pub x: f64,
    /// Lateral.
    pub y: f64,
    /// Vertical; drives knee flexion.
    pub z: f64,
}

impl FootOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Oscillator output for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorOutput {
    pub left: FootOffset,
    pub right: FootOffset,
    /// Raw forward offset of the left leg, fed to the arm-swing coupling.
    pub arm_swing_left: f64,
    /// Raw forward offset of the right leg, fed to the arm-swing coupling.
    pub arm_swing_right: f64,
}

/// Evaluate the oscillator at `phase` for `direction`.
pub fn compute(phase: f64, direction: Direction, params: &GaitParameters) -> OscillatorOutput {
    let z_left = lift(phase, params);
    let z_right = lift(phase + PI, params);

    let (x_left, x_right, y_left, y_right) = match direction {
        Direction::Forward => {
            let sway = phase.sin() * params.shift_y;
            (
                phase.cos() * params.step_length,
                (phase + PI).cos() * params.step_length,
                sway,
                sway,
            )
        }
        Direction::SidewaysRight => (
            0.0,
            0.0,
            phase.cos() * params.shift_y,
            phase.sin() * params.shift_y,
        ),
        Direction::SidewaysLeft => (
            0.0,
            0.0,
            phase.sin() * params.shift_y,
            phase.cos() * params.shift_y,
        ),
    };

    OscillatorOutput {
        left: FootOffset::new(x_left, y_left, z_left),
        right: FootOffset::new(x_right, y_right, z_right),
        arm_swing_left: x_left,
        arm_swing_right: x_right,
    }
}

// (sin + 1) / 2 maps the lift into [0, 1] before scaling.
fn lift(phase: f64, params: &GaitParameters) -> f64 {
    (phase.sin() + 1.0) / 2.0 * params.step_height + params.robot_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const EPS: f64 = 1e-9;

    fn params() -> GaitParameters {
        GaitParameters {
            frequency: 20.0,
            robot_height: 0.5,
            shift_y: 0.11,
            step_height: 0.6,
            step_length: 0.4,
            arm_swing: 1.4,
        }
    }

    fn sample_phases() -> impl Iterator<Item = f64> {
        (0..200).map(|i| i as f64 * 0.173 - 7.0)
    }

    fn close(a: &FootOffset, b: &FootOffset) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS
    }

    #[test]
    fn forward_scenario_at_phase_zero() {
        let out = compute(0.0, Direction::Forward, &params());
        assert!((out.left.z - 0.8).abs() < EPS);
        assert!((out.right.z - 0.8).abs() < EPS);
        assert!((out.left.x - 0.4).abs() < EPS);
        assert!((out.right.x + 0.4).abs() < EPS);
        assert!(out.left.y.abs() < EPS);
        assert!(out.right.y.abs() < EPS);
        assert!((out.arm_swing_left - 0.4).abs() < EPS);
        assert!((out.arm_swing_right + 0.4).abs() < EPS);
    }

    #[test]
    fn output_is_periodic_in_phase() {
        let p = params();
        for d in Direction::ALL {
            for t in sample_phases() {
                let a = compute(t, d, &p);
                let b = compute(t + TAU, d, &p);
                assert!(close(&a.left, &b.left), "{d} left at {t}");
                assert!(close(&a.right, &b.right), "{d} right at {t}");
            }
        }
    }

    #[test]
    fn vertical_channels_are_antiphase() {
        let p = params();
        let expected = 2.0 * p.robot_height + p.step_height;
        for d in Direction::ALL {
            for t in sample_phases() {
                let out = compute(t, d, &p);
                assert!((out.left.z + out.right.z - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn lift_peaks_alternate_between_legs() {
        let p = params();
        let out = compute(FRAC_PI_2, Direction::Forward, &p);
        assert!((out.left.z - (p.robot_height + p.step_height)).abs() < EPS);
        assert!((out.right.z - p.robot_height).abs() < EPS);
    }

    #[test]
    fn forward_sway_is_shared_by_both_feet() {
        let p = params();
        for t in sample_phases() {
            let out = compute(t, Direction::Forward, &p);
            assert_eq!(out.left.y, out.right.y);
        }
    }

    #[test]
    fn forward_strides_are_antiphase() {
        let p = params();
        for t in sample_phases() {
            let out = compute(t, Direction::Forward, &p);
            assert!((out.left.x + out.right.x).abs() < EPS);
        }
    }

    #[test]
    fn sideways_has_no_forward_drive() {
        let p = params();
        for d in [Direction::SidewaysRight, Direction::SidewaysLeft] {
            for t in sample_phases() {
                let out = compute(t, d, &p);
                assert_eq!(out.left.x, 0.0);
                assert_eq!(out.right.x, 0.0);
                assert_eq!(out.arm_swing_left, 0.0);
                assert_eq!(out.arm_swing_right, 0.0);
            }
        }
    }

    #[test]
    fn sideways_left_mirrors_sideways_right() {
        let p = params();
        for t in sample_phases() {
            let r = compute(t, Direction::SidewaysRight, &p);
            let l = compute(t, Direction::SidewaysLeft, &p);
            assert_eq!(r.left.y, l.right.y);
            assert_eq!(r.right.y, l.left.y);
            assert_eq!(r.left.z, l.left.z);
        }
    }

    #[test]
    fn sideways_right_lateral_channels_are_quarter_period_apart() {
        let p = params();
        let out = compute(0.0, Direction::SidewaysRight, &p);
        assert!((out.left.y - p.shift_y).abs() < EPS);
        assert!(out.right.y.abs() < EPS);
    }

    #[test]
    fn negative_step_height_inverts_lift_timing() {
        let mut p = params();
        p.step_height = -0.6;
        let out = compute(FRAC_PI_2, Direction::Forward, &p);
        assert!(out.left.z < out.right.z);
    }

    #[test]
    fn compute_is_deterministic() {
        let p = params();
        assert_eq!(
            compute(1.234, Direction::SidewaysLeft, &p),
            compute(1.234, Direction::SidewaysLeft, &p)
        );
    }

    #[test]
    fn direction_parses_from_config_strings() {
        assert_eq!("forward".parse::<Direction>().unwrap(), Direction::Forward);
        assert_eq!(
            "sideways-right".parse::<Direction>().unwrap(),
            Direction::SidewaysRight
        );
        assert_eq!(
            " SIDEWAYS_LEFT ".parse::<Direction>().unwrap(),
            Direction::SidewaysLeft
        );
        assert!("backward".parse::<Direction>().is_err());
    }
}
