//! Projectile flight system.
//!
//! Advances every flying cannonball once per update and resolves at most
//! one terminal condition per projectile, checked in this order: travel
//! range, host impact probe, player sphere, water plane, lifetime. Ended
//! projectiles stay in the world with a terminal phase until cleanup.

use std::f64::consts::TAU;

use hecs::World;
use tracing::debug;

use corsair_core::components::{ImpactCallback, Projectile};
use corsair_core::config::WeaponConfig;
use corsair_core::constants::{IMPACT_VOLUME, SOUND_HIT, SOUND_SPLASH};
use corsair_core::enums::{DamageSource, ProjectilePhase, TerminalCause};
use corsair_core::events::{ImpactInfo, SimEvent};
use corsair_core::types::{AgentId, Point3, ProjectileId};

use corsair_ai::gunnery::{integrate, segment_hits_sphere};

use crate::host::CombatHost;

/// Everything needed to put a projectile in flight.
#[derive(Clone)]
pub struct ProjectileSpec {
    pub origin: Point3,
    pub velocity: Point3,
    pub owner: Option<AgentId>,
    pub damage: f64,
    pub hit_radius: f64,
    pub splash_radius: f64,
    pub splash_damage: f64,
    pub max_travel_distance: f64,
    pub max_lifetime_secs: f64,
    pub spin_rate: f64,
    pub on_impact: Option<ImpactCallback>,
}

impl ProjectileSpec {
    /// A shot carrying the weapon's damage, radii and limits.
    pub fn from_weapon(
        origin: Point3,
        velocity: Point3,
        owner: Option<AgentId>,
        weapon: &WeaponConfig,
    ) -> Self {
        Self {
            origin,
            velocity,
            owner,
            damage: weapon.damage,
            hit_radius: weapon.hit_radius,
            splash_radius: weapon.splash_radius,
            splash_damage: weapon.damage * weapon.splash_damage_factor,
            max_travel_distance: weapon.max_travel_distance,
            max_lifetime_secs: weapon.max_lifetime_secs,
            spin_rate: weapon.spin_rate,
            on_impact: None,
        }
    }

    pub fn with_on_impact(mut self, callback: ImpactCallback) -> Self {
        self.on_impact = Some(callback);
        self
    }
}

/// Per-update flight parameters.
#[derive(Debug, Clone, Copy)]
pub struct FlightFrame {
    /// Frame delta; drives lifetime and spin.
    pub dt: f64,
    /// Ballistic integration step.
    pub step: f64,
    pub gravity: f64,
    pub water_level: f64,
    pub player: Option<Point3>,
}

/// Add a projectile entity to the world.
pub fn spawn(world: &mut World, next_id: &mut u32, spec: ProjectileSpec) -> ProjectileId {
    let id = ProjectileId(*next_id);
    *next_id += 1;
    world.spawn((Projectile {
        id,
        owner: spec.owner,
        phase: ProjectilePhase::Flying,
        position: spec.origin,
        velocity: spec.velocity,
        elapsed_secs: 0.0,
        traveled: 0.0,
        damage: spec.damage,
        hit_radius: spec.hit_radius,
        splash_radius: spec.splash_radius,
        splash_damage: spec.splash_damage,
        max_travel_distance: spec.max_travel_distance,
        max_lifetime_secs: spec.max_lifetime_secs,
        spin: 0.0,
        spin_rate: spec.spin_rate,
        terminal: None,
        on_impact: spec.on_impact,
    },));
    id
}

/// Run one flight step for every flying projectile.
pub fn run<H: CombatHost + ?Sized>(
    world: &mut World,
    host: &mut H,
    frame: &FlightFrame,
    events: &mut Vec<SimEvent>,
) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.phase == ProjectilePhase::Flying {
            advance(projectile, host, frame, events);
        }
    }
}

/// Move one projectile and resolve its terminal condition, if any.
pub fn advance<H: CombatHost + ?Sized>(
    projectile: &mut Projectile,
    host: &mut H,
    frame: &FlightFrame,
    events: &mut Vec<SimEvent>,
) {
    let from = projectile.position;
    let (to, velocity) = integrate(from, projectile.velocity, frame.gravity, frame.step);
    projectile.position = to;
    projectile.velocity = velocity;
    projectile.traveled += from.distance(to);
    // Lifetime counts flight time, not frame time
    projectile.elapsed_secs += frame.step;
    projectile.spin = (projectile.spin + projectile.spin_rate * frame.dt).rem_euclid(TAU);

    if projectile.traveled > projectile.max_travel_distance {
        finish(projectile, TerminalCause::RangeExceeded, to, None, false);
        return;
    }

    if let Some(struck) = host.probe_impact(from, to, projectile.owner) {
        finish(
            projectile,
            TerminalCause::TargetHit,
            struck.point,
            Some(struck.target),
            false,
        );
        return;
    }

    let player_hit = frame
        .player
        .and_then(|player| segment_hits_sphere(from, to, player, projectile.hit_radius));
    if let Some(point) = player_hit {
        let source = projectile
            .owner
            .map_or(DamageSource::Environment, DamageSource::Agent);
        let applied = host.apply_damage_to_player(projectile.damage, source);
        events.push(SimEvent::HitEffect { point });
        events.push(impact_sound(SOUND_HIT, point));
        finish(projectile, TerminalCause::PlayerHit, point, None, applied);
        return;
    }

    if to.y <= frame.water_level {
        let point = water_crossing(from, to, frame.water_level);
        events.push(SimEvent::SplashEffect { point });
        events.push(impact_sound(SOUND_SPLASH, point));
        host.apply_splash_damage(point, projectile.splash_radius, projectile.splash_damage);
        finish(projectile, TerminalCause::WaterImpact, point, None, false);
        return;
    }

    if projectile.elapsed_secs >= projectile.max_lifetime_secs {
        finish(projectile, TerminalCause::LifetimeExpired, to, None, false);
    }
}

fn finish(
    projectile: &mut Projectile,
    cause: TerminalCause,
    point: Point3,
    target: Option<String>,
    damage_applied: bool,
) {
    projectile.phase = cause.phase();
    projectile.terminal = Some(cause);
    projectile.position = point;
    debug!(
        projectile = %projectile.id,
        ?cause,
        x = point.x,
        y = point.y,
        z = point.z,
        traveled = projectile.traveled,
        "projectile ended"
    );

    if cause.phase() != ProjectilePhase::Hit {
        return;
    }
    if let Some(callback) = &projectile.on_impact {
        callback(&ImpactInfo {
            projectile: projectile.id,
            owner: projectile.owner,
            cause,
            point,
            target,
            damage_applied,
        });
    }
}

/// Where the segment crosses the water plane.
fn water_crossing(from: Point3, to: Point3, water_level: f64) -> Point3 {
    let drop = from.y - to.y;
    if drop <= f64::EPSILON {
        return Point3::new(to.x, water_level, to.z);
    }
    let t = ((from.y - water_level) / drop).clamp(0.0, 1.0);
    let mut point = from.lerp(to, t);
    point.y = water_level;
    point
}

fn impact_sound(name: &str, point: Point3) -> SimEvent {
    SimEvent::PlaySound {
        name: name.to_string(),
        volume: IMPACT_VOLUME,
        spatial: true,
        position: Some(point),
    }
}
