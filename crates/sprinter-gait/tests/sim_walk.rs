//! Full gait runs against the simulated HAL.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sprinter_gait::{
    ControlLoop, Direction, GaitParameters, GaitPreset, SHOULDER_REST_PITCH, StopReason,
    compute_frame,
};
use sprinter_hal::sim::{SimActuator, SimClock, SimRegistry};
use sprinter_hal::{Clock, JointRegistry};
use sprinter_types::{JointId, SprinterError};

fn run(direction: Direction, params: GaitParameters, seconds: f64) -> (SimClock, JointRegistry) {
    let clock = SimClock::new(20).unwrap().with_duration(seconds);
    let registry = SimRegistry::new().with_all_joints().build();
    let mut gait = ControlLoop::new(clock, registry, direction, params).unwrap();
    let summary = gait.run().unwrap();
    assert_eq!(summary.stop_reason, StopReason::Terminated);
    gait.into_parts()
}

#[test]
fn forward_walk_leaves_last_frame_on_joints() {
    let params = GaitPreset::Sprint.params();
    let (clock, registry) = run(Direction::Forward, params, 2.0);
    assert_eq!(clock.steps(), 100);

    let last = compute_frame(clock.elapsed_time(), Direction::Forward, &params);
    for (joint, expected) in last.commands() {
        let actual = registry.position(joint).unwrap();
        assert!((actual - expected).abs() < 1e-12, "{joint}: {actual} != {expected}");
    }
}

#[test]
fn every_direction_and_preset_runs_to_completion() {
    for preset in GaitPreset::ALL {
        for direction in Direction::ALL {
            let (clock, registry) = run(direction, preset.params(), 0.5);
            assert_eq!(clock.steps(), 25, "{preset} {direction}");
            assert!(registry.missing_joints().is_empty());
        }
    }
}

#[test]
fn sideways_walk_keeps_arms_at_rest_and_feet_parallel() {
    let (_, registry) = run(Direction::SidewaysRight, GaitPreset::Walk.params(), 1.3);
    let pos = |j| registry.position(j).unwrap();

    assert_eq!(pos(JointId::LShoulderPitch), SHOULDER_REST_PITCH);
    assert_eq!(pos(JointId::RShoulderPitch), SHOULDER_REST_PITCH);
    assert_eq!(pos(JointId::LAnkleRoll), -pos(JointId::LHipRoll));
    assert_eq!(pos(JointId::RAnkleRoll), -pos(JointId::RHipRoll));
    assert!(
        (pos(JointId::LHipPitch) + pos(JointId::LAnklePitch) + pos(JointId::LKneePitch)).abs()
            < 1e-12
    );
    assert_eq!(pos(JointId::LHipYawPitch), 0.0);
    assert_eq!(pos(JointId::RHipYawPitch), 0.0);
}

#[test]
fn saturating_actuator_does_not_stop_the_gait() {
    let clock = SimClock::new(20).unwrap().with_duration(0.4);
    let registry = SimRegistry::new()
        .with_all_joints()
        .with_actuator(SimActuator::with_limits(JointId::LKneePitch, -0.09, 0.9))
        .build();
    let mut gait =
        ControlLoop::new(clock, registry, Direction::Forward, GaitPreset::Run.params()).unwrap();
    let summary = gait.run().unwrap();
    assert_eq!(summary.ticks, 20);

    let (_, registry) = gait.into_parts();
    assert!(registry.position(JointId::LKneePitch).unwrap() <= 0.9);
}

#[test]
fn missing_joint_is_an_actuator_fault() {
    let clock = SimClock::new(20).unwrap().with_duration(1.0);
    let mut registry = JointRegistry::new();
    for joint in JointId::ALL.iter().filter(|&&j| j != JointId::RAnkleRoll) {
        registry.register_actuator(SimActuator::new(*joint));
    }
    let mut gait =
        ControlLoop::new(clock, registry, Direction::Forward, GaitParameters::default()).unwrap();
    let err = gait.run().unwrap_err();
    assert!(matches!(
        err,
        SprinterError::ActuatorFault {
            joint: JointId::RAnkleRoll,
            ..
        }
    ));
    assert_eq!(gait.ticks(), 0);
}

#[test]
fn clock_fault_ends_run_gracefully() {
    let clock = SimClock::new(20).unwrap().with_fault_after(7, "runtime crashed");
    let registry = SimRegistry::new().with_all_joints().build();
    let mut gait =
        ControlLoop::new(clock, registry, Direction::SidewaysLeft, GaitParameters::default())
            .unwrap();
    let summary = gait.run().unwrap();
    assert_eq!(summary.ticks, 7);
    assert_eq!(
        summary.stop_reason,
        StopReason::ClockFault("runtime crashed".to_string())
    );
}

#[test]
fn shutdown_flag_terminates_unbounded_run() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut clock = SimClock::new(20).unwrap().with_shutdown(flag.clone());
    let mut registry = SimRegistry::new().with_all_joints().build();

    // Drive a few ticks by hand, then raise the flag as a Ctrl-C handler would.
    for _ in 0..3 {
        assert!(clock.advance_timestep().unwrap());
    }
    flag.store(true, Ordering::SeqCst);

    let mut gait =
        ControlLoop::new(&mut clock, &mut registry, Direction::Forward, GaitParameters::default())
            .unwrap();
    let summary = gait.run().unwrap();
    assert_eq!(summary.ticks, 0);
    assert_eq!(summary.stop_reason, StopReason::Terminated);
    assert!((summary.elapsed - 0.06).abs() < 1e-12);
}
