//! The external tick source.
//!
//! The control loop never sleeps or measures wall-clock time itself. It
//! blocks on [`Clock::advance_timestep`], which returns once the robot
//! runtime (or simulator) has advanced by one basic time step.

use sprinter_types::SprinterError;

/// Simulation/robot time source driving the control loop.
pub trait Clock {
    /// Seconds of simulated time since the run started. Monotonic.
    fn elapsed_time(&self) -> f64;

    /// Block until the environment has advanced by one timestep.
    ///
    /// Returns `Ok(true)` to continue and `Ok(false)` when the environment
    /// signals end of simulation.
    ///
    /// # Errors
    ///
    /// Returns [`SprinterError::ClockFault`] when the tick source hits an
    /// unrecoverable condition.
    fn advance_timestep(&mut self) -> Result<bool, SprinterError>;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn elapsed_time(&self) -> f64 {
        (**self).elapsed_time()
    }

    fn advance_timestep(&mut self) -> Result<bool, SprinterError> {
        (**self).advance_timestep()
    }
}
