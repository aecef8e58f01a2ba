//! `sprinter-hal` – collaborator capabilities for the gait core.
//!
//! # Modules
//!
//! - [`actuator`] – [`Actuator`] (one joint driver) and [`ActuatorPort`]
//!   (the joint-addressed setpoint sink the control loop writes to).
//! - [`clock`] – [`Clock`]: the external tick source the loop blocks on.
//! - [`registry`] – [`JointRegistry`]: routes [`ActuatorPort`] calls to the
//!   registered [`Actuator`] for each [`JointId`][sprinter_types::JointId].
//! - [`sim`] – simulated drivers ([`SimActuator`][sim::SimActuator],
//!   [`SimClock`][sim::SimClock], [`SimRegistry`][sim::SimRegistry]) for
//!   headless runs and tests.

pub mod actuator;
pub mod clock;
pub mod registry;
pub mod sim;

pub use actuator::{Actuator, ActuatorPort};
pub use clock::Clock;
pub use registry::JointRegistry;
pub use sim::{SimActuator, SimClock, SimRegistry};
