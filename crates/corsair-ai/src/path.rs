//! Procedural patrol path generation.
//!
//! A patrol leg picks a random point within the patrol radius of the spawn
//! anchor, bends it sideways according to a weighted path shape, and may
//! break the approach into a few perturbed intermediate points. There is
//! no obstacle avoidance.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::Rng;

use corsair_core::config::NavigationConfig;
use corsair_core::enums::PathShape;
use corsair_core::math::{horizontal_direction, horizontal_perpendicular};
use corsair_core::types::Point3;

/// A freshly generated patrol plan.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// The point to steer toward now.
    pub waypoint: Point3,
    /// Points to visit after `waypoint`, front to back.
    pub queue: VecDeque<Point3>,
    pub shape: PathShape,
}

/// Random point within `patrol_radius` of `anchor`, on the anchor's plane.
pub fn generate_waypoint(rng: &mut impl Rng, anchor: Point3, patrol_radius: f64) -> Point3 {
    let angle: f64 = rng.gen_range(0.0..TAU);
    let distance: f64 = if patrol_radius > 0.0 {
        rng.gen_range(0.0..=patrol_radius)
    } else {
        0.0
    };
    Point3::new(
        anchor.x + angle.cos() * distance,
        anchor.y,
        anchor.z + angle.sin() * distance,
    )
}

/// Pick a path shape using the configured weights.
pub fn pick_shape(rng: &mut impl Rng, config: &NavigationConfig) -> PathShape {
    let total = config.curved_weight + config.zigzag_weight + config.direct_weight;
    if total == 0 {
        return PathShape::Direct;
    }
    let roll = rng.gen_range(0..total);
    if roll < config.curved_weight {
        PathShape::Curved
    } else if roll < config.curved_weight + config.zigzag_weight {
        PathShape::Zigzag
    } else {
        PathShape::Direct
    }
}

/// Build the next patrol plan for a ship at `current`.
///
/// `zigzag_sign` carries the alternating offset sign between calls and is
/// flipped every time a zigzag leg is produced.
pub fn plan_route(
    rng: &mut impl Rng,
    current: Point3,
    anchor: Point3,
    patrol_radius: f64,
    zigzag_sign: &mut f64,
    config: &NavigationConfig,
) -> RoutePlan {
    let base = generate_waypoint(rng, anchor, patrol_radius);
    let shape = pick_shape(rng, config);

    let perpendicular = horizontal_direction(current, base).map(horizontal_perpendicular);
    let target = match (shape, perpendicular) {
        (PathShape::Curved, Some(perp)) => {
            let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let magnitude = config.max_deviation * rng.gen_range(0.3..=1.0);
            base + perp * magnitude * side
        }
        (PathShape::Zigzag, Some(perp)) => {
            let offset = perp * config.max_deviation * *zigzag_sign;
            *zigzag_sign = -*zigzag_sign;
            base + offset
        }
        _ => base,
    };

    let mut queue = VecDeque::new();
    if config.max_intermediate_points > 0 && rng.gen_bool(config.intermediate_probability) {
        let count = rng.gen_range(1..=config.max_intermediate_points);
        let jitter = config.max_deviation * config.intermediate_jitter_factor;
        for i in 1..=count {
            let t = i as f64 / (count + 1) as f64;
            let mut point = current.lerp(target, t);
            if jitter > 0.0 {
                point.x += rng.gen_range(-jitter..=jitter);
                point.z += rng.gen_range(-jitter..=jitter);
            }
            point.y = target.y;
            queue.push_back(point);
        }
        queue.push_back(target);
    }

    match queue.pop_front() {
        Some(first) => RoutePlan {
            waypoint: first,
            queue,
            shape,
        },
        None => RoutePlan {
            waypoint: target,
            queue,
            shape,
        },
    }
}
