//! In-process simulation drivers for running the gait headless.
//!
//! [`SimRegistry`] builds a [`JointRegistry`] whose every joint is backed by
//! a [`SimActuator`], and [`SimClock`] stands in for the robot runtime's
//! fixed-step tick source.  Together they let the full control loop run in
//! unit tests and CI without a simulator or a physical robot.
//!
//! # Example
//!
//! ```rust
//! use sprinter_hal::sim::{SimClock, SimRegistry};
//! use sprinter_hal::{ActuatorPort, Clock};
//! use sprinter_types::JointId;
//!
//! let mut registry = SimRegistry::new().with_all_joints().build();
//! registry.set_angle(JointId::LKneePitch, 0.8).expect("sim joint must accept");
//!
//! let mut clock = SimClock::new(20).unwrap().with_duration(0.1);
//! let mut ticks = 0;
//! while clock.advance_timestep().unwrap() {
//!     ticks += 1;
//! }
//! assert_eq!(ticks, 5);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sprinter_types::{JointId, SprinterError};
use tracing::{debug, warn};

use crate::actuator::Actuator;
use crate::clock::Clock;
use crate::registry::JointRegistry;

// ────────────────────────────────────────────────────────────────────────────
// Simulated actuator
// ────────────────────────────────────────────────────────────────────────────

/// A simulated joint motor that records the most recent commanded position.
///
/// With limits configured, out-of-range targets saturate at the nearest
/// bound the way a motor device does.  Always succeeds.
pub struct SimActuator {
    joint: JointId,
    position: f64,
    limits: Option<(f64, f64)>,
}

impl SimActuator {
    /// Create an unlimited simulated actuator for `joint`.
    pub fn new(joint: JointId) -> Box<Self> {
        Box::new(Self {
            joint,
            position: 0.0,
            limits: None,
        })
    }

    /// Create a simulated actuator that saturates to `[min_rad, max_rad]`.
    pub fn with_limits(joint: JointId, min_rad: f64, max_rad: f64) -> Box<Self> {
        Box::new(Self {
            joint,
            position: 0.0,
            limits: Some((min_rad, max_rad)),
        })
    }
}

impl Actuator for SimActuator {
    fn joint(&self) -> JointId {
        self.joint
    }

    fn set_position(&mut self, target_rad: f64) -> Result<(), SprinterError> {
        self.position = match self.limits {
            Some((min, max)) if target_rad < min || target_rad > max => {
                debug!(joint = %self.joint, target_rad, min, max, "setpoint saturated");
                target_rad.clamp(min, max)
            }
            _ => target_rad,
        };
        Ok(())
    }

    fn position(&self) -> f64 {
        self.position
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Simulated clock
// ────────────────────────────────────────────────────────────────────────────

/// Fixed-step simulated time source.
///
/// Each [`advance_timestep`][Clock::advance_timestep] moves time forward by
/// `timestep_ms`.  The run ends once the optional duration is exhausted or
/// the shutdown flag is raised.
#[derive(Debug)]
pub struct SimClock {
    timestep_ms: u32,
    steps: u64,
    max_steps: Option<u64>,
    fault_at: Option<(u64, String)>,
    shutdown: Option<Arc<AtomicBool>>,
}

impl SimClock {
    /// Create a clock advancing `timestep_ms` per tick, running forever.
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::Configuration`] for a zero timestep.
    pub fn new(timestep_ms: u32) -> Result<Self, SprinterError> {
        if timestep_ms == 0 {
            return Err(SprinterError::Configuration {
                field: "timestep_ms".to_string(),
                details: "timestep must be at least 1 ms".to_string(),
            });
        }
        Ok(Self {
            timestep_ms,
            steps: 0,
            max_steps: None,
            fault_at: None,
            shutdown: None,
        })
    }

    /// Stop after `seconds` of simulated time.  Non-positive or non-finite
    /// durations end the run before the first tick.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        let steps = if seconds.is_finite() && seconds > 0.0 {
            (seconds * 1000.0 / f64::from(self.timestep_ms)).round() as u64
        } else {
            0
        };
        self.max_steps = Some(steps);
        self
    }

    /// End the run as soon as `flag` becomes `true`.
    pub fn with_shutdown(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = Some(flag);
        self
    }

    /// Report a [`SprinterError::ClockFault`] once `steps` ticks have elapsed.
    pub fn with_fault_after(mut self, steps: u64, message: impl Into<String>) -> Self {
        self.fault_at = Some((steps, message.into()));
        self
    }

    /// Seconds advanced per tick.
    pub fn timestep(&self) -> f64 {
        f64::from(self.timestep_ms) / 1000.0
    }

    /// Ticks completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Clock for SimClock {
    fn elapsed_time(&self) -> f64 {
        self.steps as f64 * self.timestep()
    }

    fn advance_timestep(&mut self) -> Result<bool, SprinterError> {
        if let Some(flag) = &self.shutdown
            && flag.load(Ordering::SeqCst)
        {
            return Ok(false);
        }
        if let Some((at, message)) = &self.fault_at
            && self.steps >= *at
        {
            warn!(step = self.steps, "simulated clock fault");
            return Err(SprinterError::ClockFault(message.clone()));
        }
        if self.max_steps.is_some_and(|max| self.steps >= max) {
            return Ok(false);
        }
        self.steps += 1;
        Ok(true)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimRegistry builder
// ────────────────────────────────────────────────────────────────────────────

/// Builder that constructs a [`JointRegistry`] pre-populated with simulated
/// drivers.
#[derive(Default)]
pub struct SimRegistry {
    actuators: Vec<Box<dyn Actuator>>,
}

impl SimRegistry {
    /// Create an empty [`SimRegistry`] builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an unlimited [`SimActuator`] for every joint in [`JointId::ALL`].
    pub fn with_all_joints(mut self) -> Self {
        for joint in JointId::ALL {
            self.actuators.push(SimActuator::new(joint));
        }
        self
    }

    /// Register a custom actuator driver.  Later registrations for the same
    /// joint replace earlier ones, so this also overrides a joint added by
    /// [`with_all_joints`][Self::with_all_joints].
    pub fn with_actuator(mut self, actuator: Box<dyn Actuator>) -> Self {
        self.actuators.push(actuator);
        self
    }

    /// Consume the builder and return a fully configured [`JointRegistry`].
    pub fn build(self) -> JointRegistry {
        let mut registry = JointRegistry::new();
        for a in self.actuators {
            registry.register_actuator(a);
        }
        registry
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
