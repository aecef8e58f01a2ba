//! [`ControlLoop`] – the tick-by-tick gait driver.
//!
//! The loop has a single **Running** state.  Each iteration:
//!
//! 1. blocks on [`Clock::advance_timestep`], the only suspension point;
//! 2. reads the elapsed time `T` and derives `phase = T * frequency`;
//! 3. runs the oscillator, the leg kinematics for both legs and the shoulder
//!    coupling ([`compute_frame`]);
//! 4. writes all 14 setpoints to the [`ActuatorPort`] in fixed order: left
//!    leg, right leg, right shoulder, left shoulder.
//!
//! The loop ends when the clock signals termination.  A clock fault also ends
//! it, gracefully, and is reported in the [`RunSummary`].  An actuator fault
//! is fatal: it aborts the tick immediately, with no further setpoints
//! issued, and propagates out of [`ControlLoop::run`].  Nothing is retried.
//!
//! # Example
//!
//! ```rust
//! use sprinter_gait::{ControlLoop, Direction, GaitPreset, StopReason};
//! use sprinter_hal::sim::{SimClock, SimRegistry};
//!
//! let clock = SimClock::new(20).unwrap().with_duration(1.0);
//! let registry = SimRegistry::new().with_all_joints().build();
//!
//! let mut gait = ControlLoop::new(clock, registry, Direction::Forward, GaitPreset::Walk.params())
//!     .expect("preset parameters are valid");
//! let summary = gait.run().expect("sim actuators never fail");
//! assert_eq!(summary.ticks, 50);
//! assert_eq!(summary.stop_reason, StopReason::Terminated);
//! ```

use serde::{Deserialize, Serialize};
use sprinter_hal::{ActuatorPort, Clock};
use sprinter_types::{JointId, Side, SprinterError};
use tracing::{debug, error, info, warn};

use crate::kinematics::{LegAngles, solve_leg};
use crate::oscillator::{self, Direction};
use crate::params::GaitParameters;
use crate::stabilization::{ShoulderAngles, compute_shoulders};

// ─────────────────────────────────────────────────────────────────────────────
// Per-tick frame
// ─────────────────────────────────────────────────────────────────────────────

/// Every setpoint produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaitFrame {
    /// Elapsed simulation time the frame was computed for, in seconds.
    pub elapsed: f64,
    /// Oscillator phase, `elapsed * frequency`.
    pub phase: f64,
    pub left: LegAngles,
    pub right: LegAngles,
    pub shoulders: ShoulderAngles,
}

impl GaitFrame {
    /// The 14 setpoints in dispatch order.
    pub fn commands(&self) -> [(JointId, f64); 14] {
        let mut out = [(JointId::LHipYawPitch, 0.0); 14];
        out[..6].copy_from_slice(&self.left.commands(Side::Left));
        out[6..12].copy_from_slice(&self.right.commands(Side::Right));
        out[12..].copy_from_slice(&self.shoulders.commands());
        out
    }
}

/// Compute the full set of joint setpoints for elapsed time `elapsed`.
pub fn compute_frame(elapsed: f64, direction: Direction, params: &GaitParameters) -> GaitFrame {
    let phase = elapsed * params.frequency;
    let osc = oscillator::compute(phase, direction, params);
    GaitFrame {
        elapsed,
        phase,
        left: solve_leg(&osc.left),
        right: solve_leg(&osc.right),
        shoulders: compute_shoulders(osc.arm_swing_left, osc.arm_swing_right, params),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Run outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Why [`ControlLoop::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The tick source signalled end of simulation.
    Terminated,
    /// The tick source reported an unrecoverable condition.
    ClockFault(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks fully dispatched.
    pub ticks: u64,
    /// Elapsed simulation time when the loop stopped, in seconds.
    pub elapsed: f64,
    pub stop_reason: StopReason,
}

// ─────────────────────────────────────────────────────────────────────────────
// ControlLoop
// ─────────────────────────────────────────────────────────────────────────────

/// Open-loop gait driver over a [`Clock`] and an [`ActuatorPort`].
///
/// Direction and parameters are fixed at construction for the lifetime of
/// the loop.
pub struct ControlLoop<C, A> {
    clock: C,
    port: A,
    direction: Direction,
    params: GaitParameters,
    ticks: u64,
}

impl<C: Clock, A: ActuatorPort> ControlLoop<C, A> {
    /// Build a loop, validating `params` before anything is dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::Configuration`] for invalid parameters.
    pub fn new(
        clock: C,
        port: A,
        direction: Direction,
        params: GaitParameters,
    ) -> Result<Self, SprinterError> {
        params.validate()?;
        if params.step_height < 0.0 {
            warn!(
                step_height = params.step_height,
                "negative step height inverts lift timing"
            );
        }
        Ok(Self {
            clock,
            port,
            direction,
            params,
            ticks: 0,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn params(&self) -> &GaitParameters {
        &self.params
    }

    /// Ticks fully dispatched so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Compute and dispatch one frame at the clock's current time.
    ///
    /// Does not advance the clock; [`run`][Self::run] does that.
    ///
    /// # Errors
    ///
    /// Returns the first [`SprinterError::ActuatorFault`]; later joints of
    /// the same tick are not written.
    pub fn tick(&mut self) -> Result<GaitFrame, SprinterError> {
        let frame = compute_frame(self.clock.elapsed_time(), self.direction, &self.params);
        debug!(elapsed = frame.elapsed, phase = frame.phase, "gait tick");

        for (joint, radians) in frame.commands() {
            self.port.set_angle(joint, radians).inspect_err(|e| {
                error!(joint = %joint, tick = self.ticks, error = %e, "setpoint rejected; aborting gait");
            })?;
        }
        self.ticks += 1;
        Ok(frame)
    }

    /// Run until the clock terminates.
    ///
    /// # Errors
    ///
    /// Propagates actuator faults.  Clock faults end the run normally with
    /// [`StopReason::ClockFault`].
    pub fn run(&mut self) -> Result<RunSummary, SprinterError> {
        info!(
            direction = %self.direction,
            frequency = self.params.frequency,
            step_length = self.params.step_length,
            "gait started"
        );

        let stop_reason = loop {
            match self.clock.advance_timestep() {
                Ok(true) => {
                    self.tick()?;
                }
                Ok(false) => break StopReason::Terminated,
                Err(SprinterError::ClockFault(msg)) => {
                    warn!(error = %msg, ticks = self.ticks, "tick source failed; stopping gait");
                    break StopReason::ClockFault(msg);
                }
                Err(e) => return Err(e),
            }
        };

        let summary = RunSummary {
            ticks: self.ticks,
            elapsed: self.clock.elapsed_time(),
            stop_reason,
        };
        info!(ticks = summary.ticks, elapsed = summary.elapsed, "gait stopped");
        Ok(summary)
    }

    /// Release the clock and actuator port.
    pub fn into_parts(self) -> (C, A) {
        (self.clock, self.port)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
