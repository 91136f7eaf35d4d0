#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use crate::config::{AgentConfig, AgentOptions, WorldConfig};
    use crate::enums::*;
    use crate::error::SimError;
    use crate::events::SimEvent;
    use crate::math::*;
    use crate::types::{AgentId, Point3, SimTime};

    // ---- Math ----

    #[test]
    fn test_normalize_angle_wraps_into_half_turn() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(3.0 * PI / 2.0), -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-3.0 * PI / 2.0), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(PI), PI);
        assert_relative_eq!(normalize_angle(-PI), -PI);
        for raw in [-20.0, -7.5, -0.1, 4.0, 9.9, 31.0] {
            let n = normalize_angle(raw);
            assert!((-PI..=PI).contains(&n), "{raw} normalized to {n}");
            let turns = (raw - n) / (2.0 * PI);
            assert!((turns - turns.round()).abs() < 1e-9, "{raw} -> {n} is not a whole-turn shift");
        }
    }

    #[test]
    fn test_travel_yaw_points_forward_at_target() {
        let from = Point3::new(3.0, 0.0, -4.0);
        for to in [
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(-2.0, 0.0, 30.0),
            Point3::new(3.0, 0.0, -40.0),
        ] {
            let yaw = travel_yaw(from, to);
            let forward = forward_from_yaw(yaw);
            let expected = horizontal_direction(from, to).unwrap();
            assert_relative_eq!(forward.x, expected.x, epsilon = 1e-9);
            assert_relative_eq!(forward.z, expected.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rotate_y_matches_yaw_convention() {
        let yaw = 0.7;
        let rotated = rotate_y(Point3::new(0.0, 0.0, -1.0), yaw);
        let forward = forward_from_yaw(yaw);
        assert_relative_eq!(rotated.x, forward.x, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, forward.z, epsilon = 1e-12);

        let v = Point3::new(1.5, 2.0, -3.0);
        let back = rotate_y(rotate_y(v, yaw), -yaw);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, v.y);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Point3::new(0.0, 100.0, 0.0);
        let b = Point3::new(3.0, -5.0, 4.0);
        assert_relative_eq!(horizontal_distance(a, b), 5.0);
        assert!(horizontal_direction(a, Point3::new(0.0, 7.0, 0.0)).is_none());
    }

    #[test]
    fn test_sim_time_accumulates_variable_dt() {
        let mut t = SimTime::default();
        t.advance(0.016);
        t.advance(0.034);
        assert_eq!(t.tick, 2);
        assert_relative_eq!(t.elapsed_secs, 0.05);
    }

    // ---- Config ----

    #[test]
    fn test_default_configs_validate() {
        WorldConfig::default().validate().unwrap();
        AgentConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config = WorldConfig::from_json(
            r#"{ "seed": 7, "weapon": { "damage": 25.0 }, "ballistic_step": { "mode": "FrameDelta" } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_relative_eq!(config.weapon.damage, 25.0);
        assert_eq!(config.ballistic_step, BallisticStep::FrameDelta);
        // Untouched fields keep their defaults
        assert_eq!(config.pursuit, WorldConfig::default().pursuit);
        assert_relative_eq!(config.weapon.launch_speed, WorldConfig::default().weapon.launch_speed);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = WorldConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }

    #[test]
    fn test_inverted_follow_distances_rejected() {
        let err = WorldConfig::from_json(
            r#"{ "pursuit": { "min_distance": 80.0, "optimal_distance": 50.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn test_agent_config_rejects_attack_beyond_aggro() {
        let config = AgentConfig {
            attack_range: 200.0,
            aggro_range: 150.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AgentConfig {
            min_cooldown_secs: 5.0,
            max_cooldown_secs: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_agent_config_rejects_non_finite_values() {
        let cases = [
            AgentOptions {
                patrol_radius: Some(f64::INFINITY),
                ..Default::default()
            },
            AgentOptions {
                min_cooldown_secs: Some(f64::NAN),
                ..Default::default()
            },
            AgentOptions {
                max_cooldown_secs: Some(f64::INFINITY),
                ..Default::default()
            },
            AgentOptions {
                aggro_range: Some(f64::NAN),
                ..Default::default()
            },
            AgentOptions {
                speed: Some(f64::NAN),
                ..Default::default()
            },
            AgentOptions {
                respawn_delay_secs: Some(f64::NAN),
                ..Default::default()
            },
        ];
        for options in cases {
            let err = options.apply(&AgentConfig::default()).validate().unwrap_err();
            assert!(matches!(err, SimError::InvalidConfig(_)), "{options:?} gave {err:?}");
        }

        let negative_radius = AgentConfig {
            patrol_radius: -1.0,
            ..Default::default()
        };
        assert!(negative_radius.validate().is_err());
    }

    #[test]
    fn test_world_config_rejects_non_finite_values() {
        let mut config = WorldConfig::default();
        config.pursuit.orbit_speed = f64::NAN;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let mut config = WorldConfig::default();
        config.pursuit.jitter = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.weapon.base_inaccuracy = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.weapon.range = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.weapon.starboard_mounts[0][1] = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.navigation.max_deviation = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.gravity = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WorldConfig::default();
        config.bob.frequency = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_agent_options_merge_only_set_fields() {
        let base = AgentConfig::default();
        let options = AgentOptions {
            speed: Some(9.0),
            combat_enabled: Some(false),
            model: Some("ships/brig.glb".into()),
            ..Default::default()
        };
        let merged = options.apply(&base);
        assert_relative_eq!(merged.speed, 9.0);
        assert!(!merged.combat_enabled);
        assert_eq!(merged.model, "ships/brig.glb");
        assert_relative_eq!(merged.turn_speed, base.turn_speed);
        assert_relative_eq!(merged.aggro_range, base.aggro_range);
        assert_eq!(merged.respawn_delay_secs, base.respawn_delay_secs);
    }

    // ---- Enums and events ----

    #[test]
    fn test_terminal_cause_phase() {
        assert_eq!(TerminalCause::PlayerHit.phase(), ProjectilePhase::Hit);
        assert_eq!(TerminalCause::WaterImpact.phase(), ProjectilePhase::Hit);
        assert_eq!(TerminalCause::TargetHit.phase(), ProjectilePhase::Hit);
        assert_eq!(TerminalCause::RangeExceeded.phase(), ProjectilePhase::Expired);
        assert_eq!(TerminalCause::LifetimeExpired.phase(), ProjectilePhase::Expired);
    }

    #[test]
    fn test_ballistic_step_selection() {
        assert_relative_eq!(BallisticStep::Fixed(0.02).step_for(0.5), 0.02);
        assert_relative_eq!(BallisticStep::FrameDelta.step_for(0.5), 0.5);
    }

    #[test]
    fn test_sim_event_serde_is_tagged() {
        let event = SimEvent::SetVisible {
            agent: AgentId(3),
            visible: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"SetVisible""#), "{json}");
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_damage_source_serde() {
        for source in [
            DamageSource::Agent(AgentId(9)),
            DamageSource::Player,
            DamageSource::Environment,
        ] {
            let json = serde_json::to_string(&source).unwrap();
            let back: DamageSource = serde_json::from_str(&json).unwrap();
            assert_eq!(back, source);
        }
    }
}
