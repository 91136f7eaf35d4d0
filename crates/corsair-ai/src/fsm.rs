//! Combat posture finite state machine.
//!
//! Pure function that computes the passive/aggressive transition and the
//! fire decision for one ship from its current situation. No ECS
//! dependency; operates on plain data.

use corsair_core::enums::CombatState;

/// Input to the combat FSM for a single ship.
pub struct CombatContext {
    pub state: CombatState,
    pub combat_enabled: bool,
    /// Distance to the player, or `None` when there is no player to engage.
    pub distance_to_player: Option<f64>,
    pub attack_range: f64,
    pub aggro_range: f64,
    /// Reload timer after this tick's decrement.
    pub cooldown_secs: f64,
}

/// Output from the combat FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatUpdate {
    pub new_state: CombatState,
    pub state_changed: bool,
    /// The ship is engaged, in attack range and reloaded.
    pub should_fire: bool,
}

/// Evaluate the FSM for one ship.
///
/// Aggression starts strictly inside the aggro range and only ends at or
/// beyond it, so the band between attack and aggro range keeps a ship
/// engaged without firing.
pub fn evaluate(ctx: &CombatContext) -> CombatUpdate {
    let new_state = match (ctx.combat_enabled, ctx.distance_to_player) {
        // Disabled or no player: never aggressive
        (false, _) | (true, None) => CombatState::Passive,
        (true, Some(distance)) => match ctx.state {
            CombatState::Passive if distance < ctx.aggro_range => CombatState::Aggressive,
            CombatState::Aggressive if distance >= ctx.aggro_range => CombatState::Passive,
            unchanged => unchanged,
        },
    };

    let should_fire = new_state == CombatState::Aggressive
        && ctx.cooldown_secs <= 0.0
        && ctx
            .distance_to_player
            .is_some_and(|distance| distance < ctx.attack_range);

    CombatUpdate {
        new_state,
        state_changed: new_state != ctx.state,
        should_fire,
    }
}

/// Decrement a reload timer by `dt`, flooring at zero.
pub fn tick_cooldown(cooldown_secs: f64, dt: f64) -> f64 {
    (cooldown_secs - dt).max(0.0)
}
