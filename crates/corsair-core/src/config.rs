//! Tuning configuration for worlds and agents.
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON document only
//! needs the fields it overrides. Defaults come from [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::BallisticStep;
use crate::error::{SimError, SimResult};

/// World-wide settings shared by every agent and projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed. Same seed and inputs give the same simulation.
    pub seed: u64,
    pub water_level: f64,
    pub gravity: f64,
    pub ballistic_step: BallisticStep,
    /// Seconds a destroyed ship lingers before removal.
    pub destruction_delay_secs: f64,
    pub navigation: NavigationConfig,
    pub pursuit: PursuitConfig,
    pub weapon: WeaponConfig,
    pub bob: BobConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            water_level: WATER_LEVEL,
            gravity: GRAVITY,
            ballistic_step: BallisticStep::default(),
            destruction_delay_secs: DESTRUCTION_REMOVAL_DELAY_SECS,
            navigation: NavigationConfig::default(),
            pursuit: PursuitConfig::default(),
            weapon: WeaponConfig::default(),
            bob: BobConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the systems cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("water level", self.water_level),
            ("gravity", self.gravity),
            ("destruction delay", self.destruction_delay_secs),
        ])?;
        if let BallisticStep::Fixed(step) = self.ballistic_step {
            if !(step > 0.0 && step.is_finite()) {
                return Err(invalid("ballistic step must be positive"));
            }
        }
        if self.gravity < 0.0 {
            return Err(invalid("gravity must point down (non-negative)"));
        }
        if self.destruction_delay_secs < 0.0 {
            return Err(invalid("destruction delay must be non-negative"));
        }
        self.navigation.validate()?;
        self.pursuit.validate()?;
        self.weapon.validate()?;
        self.bob.validate()
    }
}

/// Patrol path generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub curved_weight: u32,
    pub zigzag_weight: u32,
    pub direct_weight: u32,
    /// Largest perpendicular offset applied to curved/zigzag legs.
    pub max_deviation: f64,
    /// Chance that a leg is broken up with intermediate points.
    pub intermediate_probability: f64,
    /// Intermediate perturbation as a fraction of `max_deviation`.
    pub intermediate_jitter_factor: f64,
    pub max_intermediate_points: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            curved_weight: PATH_CURVED_WEIGHT,
            zigzag_weight: PATH_ZIGZAG_WEIGHT,
            direct_weight: PATH_DIRECT_WEIGHT,
            max_deviation: PATH_MAX_DEVIATION,
            intermediate_probability: PATH_INTERMEDIATE_PROBABILITY,
            intermediate_jitter_factor: PATH_INTERMEDIATE_JITTER_FACTOR,
            max_intermediate_points: PATH_MAX_INTERMEDIATE_POINTS,
        }
    }
}

impl NavigationConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("max deviation", self.max_deviation),
            ("intermediate probability", self.intermediate_probability),
            ("intermediate jitter factor", self.intermediate_jitter_factor),
        ])?;
        if self.curved_weight + self.zigzag_weight + self.direct_weight == 0 {
            return Err(invalid("at least one path shape needs a weight"));
        }
        if !(0.0..=1.0).contains(&self.intermediate_probability) {
            return Err(invalid("intermediate probability must be within [0, 1]"));
        }
        if self.max_deviation < 0.0 || self.intermediate_jitter_factor < 0.0 {
            return Err(invalid("path deviation and jitter must be non-negative"));
        }
        Ok(())
    }
}

/// Pursuit and orbit maneuvering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    pub min_distance: f64,
    pub optimal_distance: f64,
    pub max_distance: f64,
    pub mode_switch_interval_secs: f64,
    pub orbit_probability: f64,
    pub direction_flip_probability: f64,
    /// Orbit angular speed (rad/s).
    pub orbit_speed: f64,
    pub jitter: f64,
    pub speed_boost: f64,
    pub speed_reduction: f64,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            min_distance: FOLLOW_MIN_DISTANCE,
            optimal_distance: FOLLOW_OPTIMAL_DISTANCE,
            max_distance: FOLLOW_MAX_DISTANCE,
            mode_switch_interval_secs: FOLLOW_MODE_SWITCH_INTERVAL_SECS,
            orbit_probability: FOLLOW_ORBIT_PROBABILITY,
            direction_flip_probability: FOLLOW_DIRECTION_FLIP_PROBABILITY,
            orbit_speed: FOLLOW_ORBIT_SPEED,
            jitter: FOLLOW_JITTER,
            speed_boost: FOLLOW_SPEED_BOOST,
            speed_reduction: FOLLOW_SPEED_REDUCTION,
        }
    }
}

impl PursuitConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("follow min distance", self.min_distance),
            ("follow optimal distance", self.optimal_distance),
            ("follow max distance", self.max_distance),
            ("mode switch interval", self.mode_switch_interval_secs),
            ("orbit probability", self.orbit_probability),
            ("direction flip probability", self.direction_flip_probability),
            ("orbit speed", self.orbit_speed),
            ("follow jitter", self.jitter),
            ("follow speed boost", self.speed_boost),
            ("follow speed reduction", self.speed_reduction),
        ])?;
        if !(self.min_distance <= self.optimal_distance
            && self.optimal_distance <= self.max_distance)
        {
            return Err(invalid(
                "follow distances must satisfy min <= optimal <= max",
            ));
        }
        for p in [self.orbit_probability, self.direction_flip_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid("follow probabilities must be within [0, 1]"));
            }
        }
        if self.jitter < 0.0 {
            return Err(invalid("follow jitter must be non-negative"));
        }
        Ok(())
    }
}

/// Cannon and projectile parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub range: f64,
    pub launch_speed: f64,
    pub damage: f64,
    /// Radius of the player's collision sphere.
    pub hit_radius: f64,
    pub splash_radius: f64,
    /// Fraction of `damage` applied by a splash.
    pub splash_damage_factor: f64,
    pub base_inaccuracy: f64,
    pub inaccuracy_falloff: f64,
    pub max_inaccuracy_factor: f64,
    pub vertical_inaccuracy: f64,
    pub min_vertical_adjust: f64,
    pub max_vertical_adjust: f64,
    pub max_travel_distance: f64,
    pub max_lifetime_secs: f64,
    pub spin_rate: f64,
    /// Mount offsets on the starboard side, in hull-local coordinates.
    /// Port mounts mirror them across the keel.
    pub starboard_mounts: Vec<[f64; 3]>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            range: WEAPON_RANGE,
            launch_speed: WEAPON_LAUNCH_SPEED,
            damage: WEAPON_DAMAGE,
            hit_radius: PLAYER_HIT_RADIUS,
            splash_radius: SPLASH_RADIUS,
            splash_damage_factor: SPLASH_DAMAGE_FACTOR,
            base_inaccuracy: WEAPON_BASE_INACCURACY,
            inaccuracy_falloff: WEAPON_INACCURACY_FALLOFF,
            max_inaccuracy_factor: WEAPON_MAX_INACCURACY_FACTOR,
            vertical_inaccuracy: WEAPON_VERTICAL_INACCURACY,
            min_vertical_adjust: WEAPON_MIN_VERTICAL_ADJUST,
            max_vertical_adjust: WEAPON_MAX_VERTICAL_ADJUST,
            max_travel_distance: PROJECTILE_MAX_DISTANCE,
            max_lifetime_secs: PROJECTILE_MAX_LIFETIME_SECS,
            spin_rate: PROJECTILE_SPIN_RATE,
            starboard_mounts: STARBOARD_MOUNTS.to_vec(),
        }
    }
}

impl WeaponConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("weapon range", self.range),
            ("launch speed", self.launch_speed),
            ("weapon damage", self.damage),
            ("hit radius", self.hit_radius),
            ("splash radius", self.splash_radius),
            ("splash damage factor", self.splash_damage_factor),
            ("base inaccuracy", self.base_inaccuracy),
            ("inaccuracy falloff", self.inaccuracy_falloff),
            ("max inaccuracy factor", self.max_inaccuracy_factor),
            ("vertical inaccuracy", self.vertical_inaccuracy),
            ("min vertical adjust", self.min_vertical_adjust),
            ("max vertical adjust", self.max_vertical_adjust),
            ("max travel distance", self.max_travel_distance),
            ("max lifetime", self.max_lifetime_secs),
            ("spin rate", self.spin_rate),
        ])?;
        if self
            .starboard_mounts
            .iter()
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err(invalid("mount offsets must be finite"));
        }
        if self.launch_speed <= 0.0 {
            return Err(invalid("launch speed must be positive"));
        }
        if self.min_vertical_adjust < 0.0 || self.min_vertical_adjust > self.max_vertical_adjust
        {
            return Err(invalid(
                "vertical adjust bounds must satisfy 0 <= min <= max",
            ));
        }
        if self.starboard_mounts.is_empty() {
            return Err(invalid("a weapon needs at least one mount"));
        }
        if self.max_travel_distance <= 0.0 || self.max_lifetime_secs <= 0.0 {
            return Err(invalid("projectile limits must be positive"));
        }
        Ok(())
    }
}

/// Cosmetic rocking applied after movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobConfig {
    pub height: f64,
    pub frequency: f64,
    pub tilt: f64,
    pub spatial_frequency: f64,
}

impl Default for BobConfig {
    fn default() -> Self {
        Self {
            height: BOB_HEIGHT,
            frequency: BOB_FREQUENCY,
            tilt: BOB_TILT,
            spatial_frequency: BOB_SPATIAL_FREQUENCY,
        }
    }
}

impl BobConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("bob height", self.height),
            ("bob frequency", self.frequency),
            ("bob tilt", self.tilt),
            ("bob spatial frequency", self.spatial_frequency),
        ])
    }
}

/// Per-agent tuning. Stored on the agent at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub speed: f64,
    pub turn_speed: f64,
    pub patrol_radius: f64,
    pub idle_duration_secs: f64,
    pub arrival_radius: f64,
    pub max_health: f64,
    pub damage_cooldown_secs: f64,
    pub combat_enabled: bool,
    pub attack_range: f64,
    pub aggro_range: f64,
    pub min_cooldown_secs: f64,
    pub max_cooldown_secs: f64,
    pub model: String,
    /// Respawn at the spawn origin this long after removal; `None` disables.
    pub respawn_delay_secs: Option<f64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            speed: AGENT_SPEED,
            turn_speed: AGENT_TURN_SPEED,
            patrol_radius: AGENT_PATROL_RADIUS,
            idle_duration_secs: AGENT_IDLE_DURATION_SECS,
            arrival_radius: AGENT_ARRIVAL_RADIUS,
            max_health: AGENT_MAX_HEALTH,
            damage_cooldown_secs: AGENT_DAMAGE_COOLDOWN_SECS,
            combat_enabled: true,
            attack_range: AGENT_ATTACK_RANGE,
            aggro_range: AGENT_AGGRO_RANGE,
            min_cooldown_secs: WEAPON_MIN_COOLDOWN_SECS,
            max_cooldown_secs: WEAPON_MAX_COOLDOWN_SECS,
            model: DEFAULT_SHIP_MODEL.to_string(),
            respawn_delay_secs: None,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> SimResult<()> {
        require_finite(&[
            ("speed", self.speed),
            ("turn speed", self.turn_speed),
            ("patrol radius", self.patrol_radius),
            ("idle duration", self.idle_duration_secs),
            ("arrival radius", self.arrival_radius),
            ("max health", self.max_health),
            ("damage cooldown", self.damage_cooldown_secs),
            ("attack range", self.attack_range),
            ("aggro range", self.aggro_range),
            ("min weapon cooldown", self.min_cooldown_secs),
            ("max weapon cooldown", self.max_cooldown_secs),
        ])?;
        if let Some(delay) = self.respawn_delay_secs {
            require_finite(&[("respawn delay", delay)])?;
        }
        if self.speed < 0.0 || self.turn_speed < 0.0 {
            return Err(invalid("speed and turn speed must be non-negative"));
        }
        if self.max_health <= 0.0 {
            return Err(invalid("max health must be positive"));
        }
        if self.attack_range > self.aggro_range {
            return Err(invalid("attack range must not exceed aggro range"));
        }
        if self.min_cooldown_secs < 0.0 || self.min_cooldown_secs > self.max_cooldown_secs {
            return Err(invalid(
                "weapon cooldown bounds must satisfy 0 <= min <= max",
            ));
        }
        if self.patrol_radius < 0.0 {
            return Err(invalid("patrol radius must be non-negative"));
        }
        if self.arrival_radius <= 0.0 {
            return Err(invalid("arrival radius must be positive"));
        }
        if let Some(delay) = self.respawn_delay_secs {
            if delay < 0.0 {
                return Err(invalid("respawn delay must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Overrides for [`AgentConfig`]; unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOptions {
    pub speed: Option<f64>,
    pub turn_speed: Option<f64>,
    pub patrol_radius: Option<f64>,
    pub idle_duration_secs: Option<f64>,
    pub arrival_radius: Option<f64>,
    pub max_health: Option<f64>,
    pub damage_cooldown_secs: Option<f64>,
    pub combat_enabled: Option<bool>,
    pub attack_range: Option<f64>,
    pub aggro_range: Option<f64>,
    pub min_cooldown_secs: Option<f64>,
    pub max_cooldown_secs: Option<f64>,
    pub model: Option<String>,
    pub respawn_delay_secs: Option<f64>,
}

impl AgentOptions {
    /// Merge these overrides onto `base`.
    pub fn apply(&self, base: &AgentConfig) -> AgentConfig {
        AgentConfig {
            speed: self.speed.unwrap_or(base.speed),
            turn_speed: self.turn_speed.unwrap_or(base.turn_speed),
            patrol_radius: self.patrol_radius.unwrap_or(base.patrol_radius),
            idle_duration_secs: self.idle_duration_secs.unwrap_or(base.idle_duration_secs),
            arrival_radius: self.arrival_radius.unwrap_or(base.arrival_radius),
            max_health: self.max_health.unwrap_or(base.max_health),
            damage_cooldown_secs: self
                .damage_cooldown_secs
                .unwrap_or(base.damage_cooldown_secs),
            combat_enabled: self.combat_enabled.unwrap_or(base.combat_enabled),
            attack_range: self.attack_range.unwrap_or(base.attack_range),
            aggro_range: self.aggro_range.unwrap_or(base.aggro_range),
            min_cooldown_secs: self.min_cooldown_secs.unwrap_or(base.min_cooldown_secs),
            max_cooldown_secs: self.max_cooldown_secs.unwrap_or(base.max_cooldown_secs),
            model: self.model.clone().unwrap_or_else(|| base.model.clone()),
            respawn_delay_secs: self.respawn_delay_secs.or(base.respawn_delay_secs),
        }
    }
}

fn invalid(reason: &str) -> SimError {
    SimError::InvalidConfig(reason.to_string())
}

/// Fails on the first NaN or infinite field.
fn require_finite(fields: &[(&str, f64)]) -> SimResult<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(SimError::InvalidConfig(format!("{name} must be finite"))),
        None => Ok(()),
    }
}
