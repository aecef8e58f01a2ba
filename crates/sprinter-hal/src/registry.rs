//! [`JointRegistry`] – joint driver registry and [`ActuatorPort`] implementation.
//!
//! The registry stores one [`Actuator`] per [`JointId`].  When the control
//! loop issues a setpoint through [`ActuatorPort::set_angle`], the registry
//! resolves the driver for that joint and forwards the command.  A joint with
//! no registered driver is an [`SprinterError::ActuatorFault`]: a tick must
//! never leave a joint silently unset.

use std::collections::HashMap;

use sprinter_types::{JointId, SprinterError};

use crate::actuator::{Actuator, ActuatorPort};

/// Central joint driver registry.
///
/// Construct with [`JointRegistry::new`], register drivers, then hand the
/// registry to the control loop as its [`ActuatorPort`].
#[derive(Default)]
pub struct JointRegistry {
    actuators: HashMap<JointId, Box<dyn Actuator>>,
}

impl JointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actuator driver.  Any previously registered driver for the
    /// same joint is replaced.
    pub fn register_actuator(&mut self, actuator: Box<dyn Actuator>) {
        self.actuators.insert(actuator.joint(), actuator);
    }

    /// Joints from [`JointId::ALL`] that have no driver yet, in canonical order.
    pub fn missing_joints(&self) -> Vec<JointId> {
        JointId::ALL
            .iter()
            .copied()
            .filter(|j| !self.actuators.contains_key(j))
            .collect()
    }

    /// Fail with an [`SprinterError::ActuatorFault`] naming the first joint
    /// that has no driver.
    pub fn ensure_complete(&self) -> Result<(), SprinterError> {
        match self.missing_joints().first() {
            Some(&joint) => Err(unregistered(joint)),
            None => Ok(()),
        }
    }

    /// Last applied position of `joint`, if a driver is registered.
    pub fn position(&self, joint: JointId) -> Option<f64> {
        self.actuators.get(&joint).map(|a| a.position())
    }

    /// Snapshot of every registered joint's position, in canonical order.
    pub fn positions(&self) -> Vec<(JointId, f64)> {
        JointId::ALL
            .iter()
            .filter_map(|&j| self.position(j).map(|p| (j, p)))
            .collect()
    }
}

impl ActuatorPort for JointRegistry {
    fn set_angle(&mut self, joint: JointId, radians: f64) -> Result<(), SprinterError> {
        match self.actuators.get_mut(&joint) {
            Some(act) => act.set_position(radians),
            None => Err(unregistered(joint)),
        }
    }
}

fn unregistered(joint: JointId) -> SprinterError {
    SprinterError::ActuatorFault {
        joint,
        details: format!("actuator '{joint}' is not registered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    struct MockActuator {
        joint: JointId,
        position: f64,
    }
    impl MockActuator {
        fn new(joint: JointId) -> Box<Self> {
            Box::new(Self {
                joint,
                position: 0.0,
            })
        }
    }
    impl Actuator for MockActuator {
        fn joint(&self) -> JointId {
            self.joint
        }
        fn set_position(&mut self, target_rad: f64) -> Result<(), SprinterError> {
            self.position = target_rad;
            Ok(())
        }
        fn position(&self) -> f64 {
            self.position
        }
    }

    struct BrokenActuator(JointId);
    impl Actuator for BrokenActuator {
        fn joint(&self) -> JointId {
            self.0
        }
        fn set_position(&mut self, _target_rad: f64) -> Result<(), SprinterError> {
            Err(SprinterError::ActuatorFault {
                joint: self.0,
                details: "device unreachable".to_string(),
            })
        }
        fn position(&self) -> f64 {
            0.0
        }
    }

    // ------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------

    #[test]
    fn set_angle_routes_to_registered_joint() {
        let mut registry = JointRegistry::new();
        registry.register_actuator(MockActuator::new(JointId::LKneePitch));

        registry.set_angle(JointId::LKneePitch, 0.8).unwrap();

        let pos = registry.position(JointId::LKneePitch).unwrap();
        assert!((pos - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn set_angle_on_missing_joint_returns_fault() {
        let mut registry = JointRegistry::new();
        let result = registry.set_angle(JointId::RAnkleRoll, 0.1);
        assert!(matches!(
            result,
            Err(SprinterError::ActuatorFault {
                joint: JointId::RAnkleRoll,
                ..
            })
        ));
    }

    #[test]
    fn driver_error_is_propagated() {
        let mut registry = JointRegistry::new();
        registry.register_actuator(Box::new(BrokenActuator(JointId::LHipRoll)));
        let err = registry.set_angle(JointId::LHipRoll, 0.0).unwrap_err();
        assert!(err.to_string().contains("device unreachable"));
    }

    #[test]
    fn missing_joints_lists_unwired_joints_in_order() {
        let mut registry = JointRegistry::new();
        assert_eq!(registry.missing_joints().len(), 14);
        assert!(registry.ensure_complete().is_err());

        for joint in JointId::ALL {
            registry.register_actuator(MockActuator::new(joint));
        }
        assert!(registry.missing_joints().is_empty());
        assert!(registry.ensure_complete().is_ok());
    }

    #[test]
    fn re_registering_actuator_replaces_old_driver() {
        let mut registry = JointRegistry::new();
        registry.register_actuator(MockActuator::new(JointId::RHipPitch));
        registry.set_angle(JointId::RHipPitch, 3.0).unwrap();

        registry.register_actuator(MockActuator::new(JointId::RHipPitch));
        let pos = registry.position(JointId::RHipPitch).unwrap();
        assert!((pos - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn positions_snapshot_is_canonical_order() {
        let mut registry = JointRegistry::new();
        registry.register_actuator(MockActuator::new(JointId::RShoulderPitch));
        registry.register_actuator(MockActuator::new(JointId::LHipYawPitch));
        let joints: Vec<JointId> = registry.positions().into_iter().map(|(j, _)| j).collect();
        assert_eq!(joints, vec![JointId::LHipYawPitch, JointId::RShoulderPitch]);
    }
}
