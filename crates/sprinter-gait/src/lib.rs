//! `sprinter-gait` – open-loop bipedal gait generator.
//!
//! Produces joint setpoints for a NAO-class humanoid from a fixed-form
//! sinusoidal oscillator.  There is no sensor feedback: each tick is fully
//! determined by the elapsed time, the chosen [`Direction`] and the
//! [`GaitParameters`].
//!
//! # Modules
//!
//! - [`params`] – [`GaitParameters`] and the named [`GaitPreset`] tunings.
//! - [`oscillator`] – [`compute`][oscillator::compute]: phase → per-foot
//!   [`FootOffset`] plus the arm-swing inputs.
//! - [`kinematics`] – [`solve_leg`][kinematics::solve_leg]: foot offset →
//!   [`LegAngles`] under the parallel-foot assumption.
//! - [`stabilization`] – [`compute_shoulders`][stabilization::compute_shoulders]:
//!   contralateral shoulder pitch.
//! - [`control_loop`] – [`ControlLoop`]: drives the pipeline each tick over a
//!   [`Clock`][sprinter_hal::Clock] and an
//!   [`ActuatorPort`][sprinter_hal::ActuatorPort].

pub mod control_loop;
pub mod kinematics;
pub mod oscillator;
pub mod params;
pub mod stabilization;

pub use control_loop::{ControlLoop, GaitFrame, RunSummary, StopReason, compute_frame};
pub use kinematics::{LegAngles, solve_leg};
pub use oscillator::{Direction, FootOffset, OscillatorOutput};
pub use params::{GaitParameters, GaitPreset};
pub use stabilization::{SHOULDER_REST_PITCH, ShoulderAngles, compute_shoulders};
