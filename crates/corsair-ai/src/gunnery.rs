//! Firing solutions for broadside cannons.
//!
//! Aim deviation, mount selection, launch direction and the geometric
//! tests used by projectile flight. Pure physics, no ECS access.

use rand::Rng;

use corsair_core::config::WeaponConfig;
use corsair_core::enums::MountSide;
use corsair_core::math::{horizontal_distance, rotate_y};
use corsair_core::types::Point3;

/// A cannon mount chosen for a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountChoice {
    pub side: MountSide,
    /// Index into the side's mount list.
    pub index: usize,
    pub world_position: Point3,
}

/// Perturb an aim point so NPC fire is not perfectly accurate.
///
/// Horizontal error grows with distance and is capped at
/// `max_inaccuracy_factor` times the base inaccuracy.
pub fn apply_inaccuracy(
    rng: &mut impl Rng,
    target: Point3,
    distance: f64,
    config: &WeaponConfig,
) -> Point3 {
    let growth = if config.inaccuracy_falloff > 0.0 {
        1.0 + distance / config.inaccuracy_falloff
    } else {
        1.0
    };
    let spread = (config.base_inaccuracy * growth)
        .min(config.base_inaccuracy * config.max_inaccuracy_factor)
        .max(0.0);

    let mut aimed = target;
    if spread > 0.0 {
        aimed.x += rng.gen_range(-spread..=spread);
        aimed.z += rng.gen_range(-spread..=spread);
    }
    if config.vertical_inaccuracy > 0.0 {
        aimed.y += rng.gen_range(-config.vertical_inaccuracy..=config.vertical_inaccuracy);
    }
    aimed
}

/// Side of the hull a target lies on.
pub fn side_of(hull_position: Point3, yaw: f64, target: Point3) -> MountSide {
    let local = rotate_y(target - hull_position, -yaw);
    if local.x >= 0.0 {
        MountSide::Starboard
    } else {
        MountSide::Port
    }
}

/// Local offset of a mount on the given side.
pub fn mount_offset(starboard: [f64; 3], side: MountSide) -> Point3 {
    let [x, y, z] = starboard;
    match side {
        MountSide::Starboard => Point3::new(x.abs(), y, z),
        MountSide::Port => Point3::new(-x.abs(), y, z),
    }
}

/// Choose the mount facing the target that sits closest to it.
///
/// Returns `None` only when the weapon has no mounts.
pub fn select_mount(
    hull_position: Point3,
    yaw: f64,
    target: Point3,
    starboard_mounts: &[[f64; 3]],
) -> Option<MountChoice> {
    let side = side_of(hull_position, yaw, target);
    starboard_mounts
        .iter()
        .enumerate()
        .map(|(index, offset)| {
            let world_position = hull_position + rotate_y(mount_offset(*offset, side), yaw);
            MountChoice {
                side,
                index,
                world_position,
            }
        })
        .min_by(|a, b| {
            a.world_position
                .distance_squared(target)
                .total_cmp(&b.world_position.distance_squared(target))
        })
}

/// Unit launch direction from `from` toward `to`.
///
/// Elevation scales with horizontal distance between the configured
/// vertical-adjust bounds, so far shots arc higher. The result never
/// points below the horizon.
pub fn launch_direction(from: Point3, to: Point3, config: &WeaponConfig) -> Point3 {
    let distance = horizontal_distance(from, to);
    let flat = Point3::new(to.x - from.x, 0.0, to.z - from.z);
    if distance < 1e-9 {
        return Point3::Y;
    }
    let reach = if config.range > 0.0 {
        (distance / config.range).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let adjust = config.min_vertical_adjust
        + (config.max_vertical_adjust - config.min_vertical_adjust) * reach;

    // Height difference still nudges the shot, but never below level
    let rise = ((to.y - from.y) / distance + adjust).max(0.0);
    let direction = flat / distance + Point3::new(0.0, rise, 0.0);
    direction.normalize()
}

/// First point where the segment `from → to` enters the sphere, if it does.
pub fn segment_hits_sphere(from: Point3, to: Point3, center: Point3, radius: f64) -> Option<Point3> {
    if from.distance_squared(center) <= radius * radius {
        return Some(from);
    }
    let d = to - from;
    let a = d.length_squared();
    if a < 1e-12 {
        return None;
    }
    let f = from - center;
    let b = 2.0 * f.dot(d);
    let c = f.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if (0.0..=1.0).contains(&t) {
        Some(from + d * t)
    } else {
        None
    }
}

/// Advance a ballistic body by one step. Returns the new position and velocity.
pub fn integrate(position: Point3, velocity: Point3, gravity: f64, step: f64) -> (Point3, Point3) {
    let velocity = velocity - Point3::new(0.0, gravity * step, 0.0);
    (position + velocity * step, velocity)
}

/// Points a projectile would pass through, stopping at the first point at
/// or below the water plane or after `max_steps`.
pub fn predict_trajectory(
    origin: Point3,
    velocity: Point3,
    gravity: f64,
    step: f64,
    water_level: f64,
    max_steps: usize,
) -> Vec<Point3> {
    let mut points = Vec::with_capacity(max_steps.min(512) + 1);
    points.push(origin);
    let (mut position, mut velocity) = (origin, velocity);
    for _ in 0..max_steps {
        (position, velocity) = integrate(position, velocity, gravity, step);
        points.push(position);
        if position.y <= water_level {
            break;
        }
    }
    points
}
