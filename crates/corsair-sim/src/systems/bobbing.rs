//! Cosmetic wave motion.
//!
//! Writes heave, pitch and roll from a wave function of time and hull
//! position into `Attitude`. The hull itself never leaves the water plane.

use std::f64::consts::TAU;

use hecs::World;

use corsair_core::components::{Attitude, Hull};
use corsair_core::config::BobConfig;

pub fn run(world: &mut World, now_secs: f64, config: &BobConfig) {
    for (_entity, (hull, attitude)) in world.query_mut::<(&Hull, &mut Attitude)>() {
        *attitude = wave_attitude(hull, now_secs, config);
    }
}

pub fn wave_attitude(hull: &Hull, now_secs: f64, config: &BobConfig) -> Attitude {
    let spatial = (hull.position.x + hull.position.z) * config.spatial_frequency;
    let phase = now_secs * config.frequency * TAU + spatial;
    Attitude {
        heave: config.height * phase.sin(),
        pitch: config.tilt * (phase * 0.8).cos(),
        roll: config.tilt * (phase * 0.6 + hull.position.x * config.spatial_frequency).sin(),
    }
}
