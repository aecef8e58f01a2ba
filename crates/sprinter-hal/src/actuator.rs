//! Joint actuation capabilities.
//!
//! Two traits live here:
//!
//! - [`Actuator`] is implemented by a single position-controlled joint driver
//!   (one NAO motor device, a simulated servo, …).
//! - [`ActuatorPort`] is what the gait control loop talks to: a sink that
//!   accepts a setpoint for any of the 14 driven [`JointId`]s.
//!
//! [`JointRegistry`][crate::registry::JointRegistry] bridges the two by
//! routing port calls to registered drivers, so the gait core never depends
//! on a concrete robot runtime.

use sprinter_types::{JointId, SprinterError};

/// A position-controlled joint motor.
pub trait Actuator: Send {
    /// The joint this driver moves.
    fn joint(&self) -> JointId;

    /// Command the joint to `target_rad` (radians from its zero position).
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::ActuatorFault`] if the command cannot be
    /// applied (device unreachable, fault state, …).
    fn set_position(&mut self, target_rad: f64) -> Result<(), SprinterError>;

    /// The most recently applied position in radians.
    fn position(&self) -> f64;
}

/// Joint-addressed setpoint sink used by the control loop.
///
/// Every tick writes each joint exactly once; implementations must accept all
/// identifiers in [`JointId::ALL`].
pub trait ActuatorPort {
    /// Apply `radians` to `joint`.
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::ActuatorFault`] when the joint is unknown or
    /// its driver rejects the command.
    fn set_angle(&mut self, joint: JointId, radians: f64) -> Result<(), SprinterError>;
}

impl<P: ActuatorPort + ?Sized> ActuatorPort for &mut P {
    fn set_angle(&mut self, joint: JointId, radians: f64) -> Result<(), SprinterError> {
        (**self).set_angle(joint, radians)
    }
}

impl<P: ActuatorPort + ?Sized> ActuatorPort for Box<P> {
    fn set_angle(&mut self, joint: JointId, radians: f64) -> Result<(), SprinterError> {
        (**self).set_angle(joint, radians)
    }
}
