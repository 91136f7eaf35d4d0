//! Vector and angle helpers shared by steering, pursuit and gunnery.
//!
//! Ships are modelled facing opposite their travel vector, so a hull with
//! yaw `θ` moves along `(-sin θ, 0, -cos θ)`.

use std::f64::consts::{PI, TAU};

use crate::types::Point3;

/// Wrap an angle into `[-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps exactly π to -π; keep the sign of the input there
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Yaw a hull must adopt to travel from `from` toward `to`.
pub fn travel_yaw(from: Point3, to: Point3) -> f64 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    dx.atan2(dz) + PI
}

/// Unit travel vector of a hull with the given yaw.
pub fn forward_from_yaw(yaw: f64) -> Point3 {
    Point3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Rotate a vector about the Y axis by `angle` radians, matching the
/// yaw convention of [`travel_yaw`].
pub fn rotate_y(v: Point3, angle: f64) -> Point3 {
    let (s, c) = angle.sin_cos();
    Point3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

/// Distance in the XZ plane, ignoring height.
pub fn horizontal_distance(a: Point3, b: Point3) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Horizontal unit vector from `from` to `to`, or `None` when they coincide.
pub fn horizontal_direction(from: Point3, to: Point3) -> Option<Point3> {
    let flat = Point3::new(to.x - from.x, 0.0, to.z - from.z);
    let len = flat.length();
    if len < 1e-9 {
        None
    } else {
        Some(flat / len)
    }
}

/// Left-hand perpendicular of a horizontal direction.
pub fn horizontal_perpendicular(dir: Point3) -> Point3 {
    Point3::new(-dir.z, 0.0, dir.x)
}

/// True when every component is finite.
pub fn is_finite_point(p: Point3) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}
