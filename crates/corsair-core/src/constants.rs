//! Simulation constants and tuning defaults.
//!
//! Every configuration struct in [`crate::config`] defaults to these values.
//! Units are world units (roughly meters) and seconds; Y is up.

/// Nominal frame rate the turn-rate tuning is normalized against (Hz).
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

/// Fixed ballistic integration step (seconds).
pub const BALLISTIC_FIXED_STEP: f64 = 1.0 / NOMINAL_FRAME_RATE;

/// Height of the water plane.
pub const WATER_LEVEL: f64 = 0.0;

/// Downward acceleration applied to projectiles (units/s²).
pub const GRAVITY: f64 = 9.8;

/// Default RNG seed for a new world.
pub const DEFAULT_SEED: u64 = 42;

// --- Agent handling ---

/// Cruise speed while patrolling (units/s).
pub const AGENT_SPEED: f64 = 5.0;

/// Fraction of the heading error corrected per nominal frame.
pub const AGENT_TURN_SPEED: f64 = 0.05;

/// Radius around the spawn origin that patrol waypoints are drawn from.
pub const AGENT_PATROL_RADIUS: f64 = 50.0;

/// Seconds an agent idles after finishing a patrol plan.
pub const AGENT_IDLE_DURATION_SECS: f64 = 3.0;

/// Distance at which a waypoint counts as reached.
pub const AGENT_ARRIVAL_RADIUS: f64 = 5.0;

/// Maximum forward-speed reduction at a full half-turn (fraction).
pub const TURN_SPEED_PENALTY: f64 = 0.7;

// --- Health ---

/// Default hull points.
pub const AGENT_MAX_HEALTH: f64 = 100.0;

/// Minimum seconds between two accepted hits on the same agent.
pub const AGENT_DAMAGE_COOLDOWN_SECS: f64 = 0.5;

/// Seconds between destruction and removal from the active set.
pub const DESTRUCTION_REMOVAL_DELAY_SECS: f64 = 3.0;

// --- Combat ---

/// Distance below which an agent turns aggressive.
pub const AGENT_AGGRO_RANGE: f64 = 150.0;

/// Distance below which an aggressive agent may fire.
pub const AGENT_ATTACK_RANGE: f64 = 80.0;

/// Shortest reload after a successful shot (seconds).
pub const WEAPON_MIN_COOLDOWN_SECS: f64 = 2.0;

/// Longest reload after a successful shot (seconds).
pub const WEAPON_MAX_COOLDOWN_SECS: f64 = 4.0;

// --- Path planning ---

/// Relative weight of the curved path shape.
pub const PATH_CURVED_WEIGHT: u32 = 6;

/// Relative weight of the zigzag path shape.
pub const PATH_ZIGZAG_WEIGHT: u32 = 2;

/// Relative weight of the direct path shape.
pub const PATH_DIRECT_WEIGHT: u32 = 2;

/// Largest perpendicular offset applied to curved and zigzag waypoints.
pub const PATH_MAX_DEVIATION: f64 = 15.0;

/// Probability that a plan gets intermediate points.
pub const PATH_INTERMEDIATE_PROBABILITY: f64 = 0.4;

/// Perturbation of intermediate points, as a fraction of the max deviation.
pub const PATH_INTERMEDIATE_JITTER_FACTOR: f64 = 0.3;

/// Most intermediate points a single plan can hold.
pub const PATH_MAX_INTERMEDIATE_POINTS: usize = 3;

// --- Pursuit ---

/// Closer than this, an engaged agent backs off.
pub const FOLLOW_MIN_DISTANCE: f64 = 30.0;

/// Preferred stand-off distance from the player.
pub const FOLLOW_OPTIMAL_DISTANCE: f64 = 50.0;

/// Farther than this, an engaged agent closes in at boosted speed.
pub const FOLLOW_MAX_DISTANCE: f64 = 70.0;

/// Seconds between maneuver-mode rolls.
pub const FOLLOW_MODE_SWITCH_INTERVAL_SECS: f64 = 3.0;

/// Probability that a maneuver roll selects orbit mode.
pub const FOLLOW_ORBIT_PROBABILITY: f64 = 0.4;

/// Probability that a maneuver roll flips the orbit direction.
pub const FOLLOW_DIRECTION_FLIP_PROBABILITY: f64 = 0.3;

/// Orbit angular speed (rad/s).
pub const FOLLOW_ORBIT_SPEED: f64 = 0.3;

/// Bound on the random offset added to pursuit target points.
pub const FOLLOW_JITTER: f64 = 5.0;

/// Speed multiplier when farther than the max follow distance.
pub const FOLLOW_SPEED_BOOST: f64 = 1.5;

/// Speed multiplier when closer than the min follow distance.
pub const FOLLOW_SPEED_REDUCTION: f64 = 0.6;

// --- Weapon ---

/// Farthest distance a weapon will fire at.
pub const WEAPON_RANGE: f64 = 100.0;

/// Muzzle speed of a cannonball (units/s).
pub const WEAPON_LAUNCH_SPEED: f64 = 40.0;

/// Damage dealt by a direct hit.
pub const WEAPON_DAMAGE: f64 = 10.0;

/// Radius of the player's collision sphere.
pub const PLAYER_HIT_RADIUS: f64 = 5.0;

/// Radius of the area damaged by a water splash.
pub const SPLASH_RADIUS: f64 = 6.0;

/// Splash damage as a fraction of direct-hit damage.
pub const SPLASH_DAMAGE_FACTOR: f64 = 0.3;

/// Horizontal aim error at zero distance.
pub const WEAPON_BASE_INACCURACY: f64 = 2.0;

/// Distance over which the aim error grows by one base unit.
pub const WEAPON_INACCURACY_FALLOFF: f64 = 50.0;

/// Cap on the aim error, in multiples of the base inaccuracy.
pub const WEAPON_MAX_INACCURACY_FACTOR: f64 = 3.0;

/// Bound on the vertical aim error.
pub const WEAPON_VERTICAL_INACCURACY: f64 = 0.5;

/// Launch elevation (rise per unit of horizontal travel) at point-blank.
pub const WEAPON_MIN_VERTICAL_ADJUST: f64 = 0.05;

/// Launch elevation at full weapon range.
pub const WEAPON_MAX_VERTICAL_ADJUST: f64 = 0.35;

/// Travel distance after which a projectile is discarded.
pub const PROJECTILE_MAX_DISTANCE: f64 = 150.0;

/// Seconds after which a projectile is discarded regardless of travel.
pub const PROJECTILE_MAX_LIFETIME_SECS: f64 = 6.0;

/// Visual spin rate of a projectile (rad/s).
pub const PROJECTILE_SPIN_RATE: f64 = 6.0;

/// Cannon mount offsets on the starboard (local +X) side.
/// Port mounts mirror these across the keel.
pub const STARBOARD_MOUNTS: [[f64; 3]; 3] = [[2.0, 1.5, -3.0], [2.0, 1.5, 0.0], [2.0, 1.5, 3.0]];

// --- Cosmetic motion ---

/// Vertical bob amplitude.
pub const BOB_HEIGHT: f64 = 0.3;

/// Wave angular frequency driving the bob (rad/s).
pub const BOB_FREQUENCY: f64 = 1.2;

/// Peak pitch/roll from the bob (radians).
pub const BOB_TILT: f64 = 0.04;

/// Spatial frequency of the wave field.
pub const BOB_SPATIAL_FREQUENCY: f64 = 0.05;

// --- Presentation ---

/// Model descriptor attached to new agents.
pub const DEFAULT_SHIP_MODEL: &str = "ships/pirate_sloop.glb";

/// Sound played when a cannon fires.
pub const SOUND_CANNON_FIRE: &str = "cannon_fire";

/// Sound played when a cannonball lands in the water.
pub const SOUND_SPLASH: &str = "cannon_splash";

/// Sound played when a cannonball strikes the player.
pub const SOUND_HIT: &str = "cannon_hit";

/// Sound played when a ship is destroyed.
pub const SOUND_SHIP_EXPLOSION: &str = "ship_explosion";

/// Playback volume for cannon fire.
pub const CANNON_FIRE_VOLUME: f64 = 0.8;

/// Playback volume for splashes and hits.
pub const IMPACT_VOLUME: f64 = 0.6;

/// Playback volume for ship explosions.
pub const EXPLOSION_VOLUME: f64 = 1.0;

// --- Stats ---

/// Stat bumped when an agent is destroyed.
pub const STAT_SHIPS_SUNK: &str = "ships_sunk";

/// Stat bumped when an agent respawns.
pub const STAT_SHIPS_RESPAWNED: &str = "ships_respawned";
