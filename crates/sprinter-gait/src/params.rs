//! [`GaitParameters`] and the named tuning presets.
//!
//! Parameters are chosen once, before the loop starts, and never mutated
//! mid-run.  Every field is an empirically tuned constant for a NAO-class
//! humanoid; none is derived from link lengths.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sprinter_types::SprinterError;

/// The tunable constants shaping the walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitParameters {
    /// How fast steps are taken; scales elapsed time into oscillator phase.
    pub frequency: f64,
    /// Baseline knee flexion; lower values stand the robot up straighter.
    pub robot_height: f64,
    /// Amplitude of the lateral weight shift.
    pub shift_y: f64,
    /// How high the feet are lifted.  Negative values invert lift timing.
    pub step_height: f64,
    /// Forward/backward stride amplitude.  The sign only mirrors direction.
    pub step_length: f64,
    /// Gain from the opposite leg's forward offset to shoulder pitch.
    pub arm_swing: f64,
}

impl Default for GaitParameters {
    fn default() -> Self {
        GaitPreset::default().params()
    }
}

impl GaitParameters {
    /// Check that the parameters can drive a gait.
    ///
    /// `frequency` must be finite and strictly positive; every other field
    /// must be finite.  A negative `step_height` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::Configuration`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SprinterError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(SprinterError::Configuration {
                field: "frequency".to_string(),
                details: format!("must be finite and positive, got {}", self.frequency),
            });
        }
        let amplitudes = [
            ("robot_height", self.robot_height),
            ("shift_y", self.shift_y),
            ("step_height", self.step_height),
            ("step_length", self.step_length),
            ("arm_swing", self.arm_swing),
        ];
        for (field, value) in amplitudes {
            if !value.is_finite() {
                return Err(SprinterError::Configuration {
                    field: field.to_string(),
                    details: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Oscillator period in seconds of elapsed time.
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.frequency
    }
}

/// Named parameter sets found to work on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitPreset {
    SlowAndSteady,
    Walk,
    LargerSteps,
    TippelTappel,
    Run,
    /// Stable, moderately fast.
    Stable,
    /// Stable with a longer stride.
    StableFast,
    /// Fastest tuning; drifts sideways over long runs.
    #[default]
    Sprint,
}

impl GaitPreset {
    pub const ALL: [GaitPreset; 8] = [
        GaitPreset::SlowAndSteady,
        GaitPreset::Walk,
        GaitPreset::LargerSteps,
        GaitPreset::TippelTappel,
        GaitPreset::Run,
        GaitPreset::Stable,
        GaitPreset::StableFast,
        GaitPreset::Sprint,
    ];

    pub fn params(self) -> GaitParameters {
        let (frequency, robot_height, shift_y, step_height, step_length, arm_swing) = match self {
            GaitPreset::SlowAndSteady => (4.0, 0.5, 0.3, 0.4, 0.2, 2.0),
            GaitPreset::Walk => (8.0, 1.0, 0.26, 0.5, 0.2, 2.0),
            GaitPreset::LargerSteps => (10.0, 0.9, 0.2, 0.5, 0.25, 2.0),
            GaitPreset::TippelTappel => (16.0, 1.0, 0.1, 0.5, 0.2, 2.0),
            GaitPreset::Run => (14.0, 0.9, 0.15, 0.7, 0.4, 1.5),
            GaitPreset::Stable => (19.0, 0.5, 0.11, 0.6, 0.3, 1.5),
            GaitPreset::StableFast => (20.0, 0.5, 0.11, 0.6, 0.35, 1.4),
            GaitPreset::Sprint => (20.0, 0.5, 0.11, 0.6, 0.4, 1.4),
        };
        GaitParameters {
            frequency,
            robot_height,
            shift_y,
            step_height,
            step_length,
            arm_swing,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GaitPreset::SlowAndSteady => "slow_and_steady",
            GaitPreset::Walk => "walk",
            GaitPreset::LargerSteps => "larger_steps",
            GaitPreset::TippelTappel => "tippel_tappel",
            GaitPreset::Run => "run",
            GaitPreset::Stable => "stable",
            GaitPreset::StableFast => "stable_fast",
            GaitPreset::Sprint => "sprint",
        }
    }
}

impl std::fmt::Display for GaitPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GaitPreset {
    type Err = SprinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        GaitPreset::ALL
            .into_iter()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| SprinterError::Configuration {
                field: "preset".to_string(),
                details: format!("unknown gait preset '{s}'"),
            })
    }
}
