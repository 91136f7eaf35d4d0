//! Heading and speed control shared by patrol navigation and pursuit.
//!
//! Turning is proportional: each nominal 60 Hz frame corrects `turn_speed`
//! of the remaining heading error, so the rate is independent of the real
//! frame delta. Forward speed drops with turn sharpness, down to
//! `1 - TURN_SPEED_PENALTY` of cruise when the target is dead astern.

use std::f64::consts::PI;

use corsair_core::constants::{NOMINAL_FRAME_RATE, TURN_SPEED_PENALTY};
use corsair_core::math::{forward_from_yaw, horizontal_distance, normalize_angle, travel_yaw};
use corsair_core::types::Point3;

/// Input to a single steering step.
#[derive(Debug, Clone, Copy)]
pub struct SteerInput {
    pub position: Point3,
    pub yaw: f64,
    pub target: Point3,
    /// Cruise speed before the turn penalty (units/s).
    pub speed: f64,
    pub turn_speed: f64,
    pub dt: f64,
}

/// Result of a steering step.
#[derive(Debug, Clone, Copy)]
pub struct SteerOutput {
    pub position: Point3,
    pub yaw: f64,
    pub velocity: Point3,
    /// Horizontal distance to the target after moving.
    pub distance_to_target: f64,
}

/// Turn toward the target and advance along the new heading.
pub fn steer(input: &SteerInput) -> SteerOutput {
    let to_target = horizontal_distance(input.position, input.target);
    if to_target < 1e-9 {
        return SteerOutput {
            position: input.position,
            yaw: input.yaw,
            velocity: Point3::ZERO,
            distance_to_target: 0.0,
        };
    }

    let desired = travel_yaw(input.position, input.target);
    let error = normalize_angle(desired - input.yaw);
    let fraction = (input.turn_speed * input.dt * NOMINAL_FRAME_RATE).clamp(0.0, 1.0);
    let yaw = normalize_angle(input.yaw + error * fraction);

    let sharpness = error.abs() / PI;
    let speed = input.speed * (1.0 - TURN_SPEED_PENALTY * sharpness);

    // Never step past the target
    let step = (speed * input.dt).min(to_target);
    let velocity = forward_from_yaw(yaw) * speed;
    let position = input.position + forward_from_yaw(yaw) * step;

    SteerOutput {
        position,
        yaw,
        velocity,
        distance_to_target: horizontal_distance(position, input.target),
    }
}
