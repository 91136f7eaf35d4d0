#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use corsair_core::config::{AgentConfig, NavigationConfig, PursuitConfig, WeaponConfig};
    use corsair_core::constants::*;
    use corsair_core::enums::{CombatState, FollowMode, MountSide, PathShape};
    use corsair_core::math::{forward_from_yaw, horizontal_distance, normalize_angle};
    use corsair_core::types::Point3;

    use crate::fsm::{evaluate, tick_cooldown, CombatContext};
    use crate::gunnery::*;
    use crate::path::{generate_waypoint, pick_shape, plan_route};
    use crate::pursuit::{approach_for, begin_follow, plan_follow, Approach};
    use crate::steering::{steer, SteerInput};

    const DT: f64 = 1.0 / 60.0;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn make_context(state: CombatState, distance: f64, cooldown: f64) -> CombatContext {
        CombatContext {
            state,
            combat_enabled: true,
            distance_to_player: Some(distance),
            attack_range: AGENT_ATTACK_RANGE,
            aggro_range: AGENT_AGGRO_RANGE,
            cooldown_secs: cooldown,
        }
    }

    // ---- Combat FSM ----

    #[test]
    fn test_passive_turns_aggressive_inside_aggro_range() {
        let update = evaluate(&make_context(CombatState::Passive, AGENT_AGGRO_RANGE - 1.0, 0.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, CombatState::Aggressive);
        // Outside attack range: engaged but holding fire
        assert!(!update.should_fire);
    }

    #[test]
    fn test_passive_stays_passive_at_aggro_boundary() {
        let update = evaluate(&make_context(CombatState::Passive, AGENT_AGGRO_RANGE, 0.0));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, CombatState::Passive);
    }

    #[test]
    fn test_aggressive_holds_inside_hysteresis_band() {
        // Between attack and aggro range: stay engaged
        let update = evaluate(&make_context(CombatState::Aggressive, 120.0, 0.0));
        assert_eq!(update.new_state, CombatState::Aggressive);
        assert!(!update.state_changed);
        assert!(!update.should_fire, "no fire beyond attack range");
    }

    #[test]
    fn test_aggressive_drops_at_aggro_range() {
        let update = evaluate(&make_context(CombatState::Aggressive, AGENT_AGGRO_RANGE, 0.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, CombatState::Passive);
    }

    #[test]
    fn test_fire_requires_range_and_reload() {
        let ready = evaluate(&make_context(CombatState::Aggressive, 50.0, 0.0));
        assert!(ready.should_fire);
        let reloading = evaluate(&make_context(CombatState::Aggressive, 50.0, 0.5));
        assert!(!reloading.should_fire);
        // A passive ship entering attack range fires on the same tick
        let entering = evaluate(&make_context(CombatState::Passive, 50.0, 0.0));
        assert_eq!(entering.new_state, CombatState::Aggressive);
        assert!(entering.should_fire);
    }

    #[test]
    fn test_disabled_combat_forces_passive() {
        let mut ctx = make_context(CombatState::Aggressive, 10.0, 0.0);
        ctx.combat_enabled = false;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, CombatState::Passive);
        assert!(!update.should_fire);
    }

    #[test]
    fn test_missing_player_disengages() {
        let mut ctx = make_context(CombatState::Aggressive, 10.0, 0.0);
        ctx.distance_to_player = None;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, CombatState::Passive);
        assert!(!update.should_fire);
    }

    #[test]
    fn test_never_drops_inside_aggro_range_sweep() {
        let mut r = rng(5);
        let mut state = CombatState::Passive;
        for _ in 0..5_000 {
            let distance = r.gen_range(0.0..300.0);
            let update = evaluate(&make_context(state, distance, 0.0));
            if state == CombatState::Aggressive && distance < AGENT_AGGRO_RANGE {
                assert_eq!(update.new_state, CombatState::Aggressive, "dropped at {distance}");
            }
            if update.should_fire {
                assert!(distance < AGENT_ATTACK_RANGE, "fired at {distance}");
            }
            state = update.new_state;
        }
    }

    #[test]
    fn test_cooldown_floors_at_zero() {
        assert_relative_eq!(tick_cooldown(1.0, 0.25), 0.75);
        assert_relative_eq!(tick_cooldown(0.1, 0.25), 0.0);
        assert_relative_eq!(tick_cooldown(0.0, 0.25), 0.0);
    }

    // ---- Steering ----

    fn steer_input(position: Point3, yaw: f64, target: Point3) -> SteerInput {
        SteerInput {
            position,
            yaw,
            target,
            speed: AGENT_SPEED,
            turn_speed: AGENT_TURN_SPEED,
            dt: DT,
        }
    }

    #[test]
    fn test_steer_straight_ahead_moves_full_speed() {
        // Yaw 0 travels toward -Z
        let out = steer(&steer_input(Point3::ZERO, 0.0, Point3::new(0.0, 0.0, -100.0)));
        assert_relative_eq!(out.yaw, 0.0, epsilon = 1e-12);
        assert_relative_eq!(out.position.z, -AGENT_SPEED * DT, epsilon = 1e-12);
        assert_relative_eq!(out.velocity.length(), AGENT_SPEED, epsilon = 1e-9);
    }

    #[test]
    fn test_steer_slows_for_sharp_turns() {
        // Target directly astern: full penalty
        let out = steer(&steer_input(Point3::ZERO, 0.0, Point3::new(0.0, 0.0, 100.0)));
        let expected = AGENT_SPEED * (1.0 - TURN_SPEED_PENALTY);
        assert_relative_eq!(out.velocity.length(), expected, epsilon = 1e-9);
        // Turned by the configured fraction of a half turn
        assert_relative_eq!(out.yaw.abs(), PI * AGENT_TURN_SPEED, epsilon = 1e-9);
    }

    #[test]
    fn test_steer_turn_is_frame_rate_normalized() {
        let target = Point3::new(100.0, 0.0, 0.0);
        let mut slow = steer_input(Point3::ZERO, 0.0, target);
        slow.dt = 1.0 / 30.0;
        let fast = steer_input(Point3::ZERO, 0.0, target);
        let slow_turn = normalize_angle(steer(&slow).yaw);
        let fast_turn = normalize_angle(steer(&fast).yaw);
        assert_relative_eq!(slow_turn, 2.0 * fast_turn, epsilon = 1e-9);
    }

    #[test]
    fn test_steer_reaches_waypoint_from_any_start() {
        let mut r = rng(11);
        for case in 0..50 {
            let mut position = Point3::new(r.gen_range(-50.0..50.0), 0.0, r.gen_range(-50.0..50.0));
            let mut yaw = r.gen_range(-PI..PI);
            let target = Point3::new(r.gen_range(-50.0..50.0), 0.0, r.gen_range(-50.0..50.0));
            let mut reached = horizontal_distance(position, target) < AGENT_ARRIVAL_RADIUS;
            for _ in 0..60 * 120 {
                if reached {
                    break;
                }
                let out = steer(&steer_input(position, yaw, target));
                position = out.position;
                yaw = out.yaw;
                reached = out.distance_to_target < AGENT_ARRIVAL_RADIUS;
            }
            assert!(reached, "case {case}: never reached {target:?}, stuck at {position:?}");
        }
    }

    #[test]
    fn test_steer_at_target_is_stationary() {
        let out = steer(&steer_input(Point3::new(1.0, 0.0, 1.0), 0.3, Point3::new(1.0, 0.0, 1.0)));
        assert_eq!(out.velocity, Point3::ZERO);
        assert_relative_eq!(out.yaw, 0.3);
    }

    // ---- Path planning ----

    #[test]
    fn test_generate_waypoint_within_radius() {
        let mut r = rng(3);
        let anchor = Point3::new(100.0, 0.0, -40.0);
        for _ in 0..500 {
            let wp = generate_waypoint(&mut r, anchor, AGENT_PATROL_RADIUS);
            assert!(horizontal_distance(anchor, wp) <= AGENT_PATROL_RADIUS + 1e-9);
            assert_relative_eq!(wp.y, anchor.y);
        }
    }

    #[test]
    fn test_shape_weights_favor_curved() {
        let mut r = rng(8);
        let config = NavigationConfig::default();
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match pick_shape(&mut r, &config) {
                PathShape::Curved => counts[0] += 1,
                PathShape::Zigzag => counts[1] += 1,
                PathShape::Direct => counts[2] += 1,
            }
        }
        assert!(counts[0] > counts[1] && counts[0] > counts[2], "{counts:?}");
        assert!(counts[1] > 0 && counts[2] > 0, "{counts:?}");
    }

    #[test]
    fn test_zigzag_alternates_offset_sign() {
        let config = NavigationConfig {
            curved_weight: 0,
            zigzag_weight: 1,
            direct_weight: 0,
            intermediate_probability: 0.0,
            ..Default::default()
        };
        let mut r = rng(21);
        let mut sign = 1.0;
        let plan_a = plan_route(&mut r, Point3::ZERO, Point3::ZERO, 50.0, &mut sign, &config);
        assert_eq!(plan_a.shape, PathShape::Zigzag);
        assert_relative_eq!(sign, -1.0);
        let _plan_b = plan_route(&mut r, Point3::ZERO, Point3::ZERO, 50.0, &mut sign, &config);
        assert_relative_eq!(sign, 1.0);
    }

    #[test]
    fn test_plan_offsets_stay_bounded() {
        let config = NavigationConfig {
            intermediate_probability: 0.0,
            ..Default::default()
        };
        let mut r = rng(4);
        let mut sign = 1.0;
        let anchor = Point3::new(10.0, 0.0, 10.0);
        for _ in 0..500 {
            let plan = plan_route(&mut r, anchor, anchor, 50.0, &mut sign, &config);
            assert!(plan.queue.is_empty());
            assert!(
                horizontal_distance(anchor, plan.waypoint) <= 50.0 + config.max_deviation + 1e-9,
                "{:?}",
                plan.waypoint
            );
        }
    }

    #[test]
    fn test_intermediate_points_queue_ends_at_target() {
        let config = NavigationConfig {
            intermediate_probability: 1.0,
            direct_weight: 1,
            curved_weight: 0,
            zigzag_weight: 0,
            ..Default::default()
        };
        let mut r = rng(13);
        let mut sign = 1.0;
        for _ in 0..100 {
            let current = Point3::new(0.0, 0.0, 0.0);
            let plan = plan_route(&mut r, current, Point3::new(30.0, 0.0, 0.0), 40.0, &mut sign, &config);
            // 1-3 intermediate points plus the final target; the first is returned
            let total = plan.queue.len() + 1;
            assert!((2..=4).contains(&total), "plan had {total} points");
            let last = *plan.queue.back().unwrap();
            assert!(horizontal_distance(Point3::new(30.0, 0.0, 0.0), last) <= 40.0 + 1e-9);
            assert_relative_eq!(plan.waypoint.y, 0.0);
        }
    }

    // ---- Pursuit ----

    #[test]
    fn test_approach_bands() {
        let config = PursuitConfig::default();
        assert_eq!(approach_for(10.0, &config), Approach::BackOff);
        assert_eq!(approach_for(50.0, &config), Approach::Hold);
        assert_eq!(approach_for(120.0, &config), Approach::CloseIn);
    }

    #[test]
    fn test_direct_target_sits_at_stand_off() {
        let config = PursuitConfig::default();
        let mut r = rng(1);
        let agent = Point3::ZERO;
        let player = Point3::new(100.0, 0.0, 0.0);
        let mut state = begin_follow(&mut r, agent, player, 0.0, &config);
        assert_eq!(state.mode, FollowMode::Direct);

        let plan = plan_follow(&mut r, &mut state, agent, player, 0.1, DT, WATER_LEVEL, &config);
        assert!(!plan.rerolled);
        assert_eq!(plan.approach, Approach::CloseIn);
        assert_relative_eq!(plan.speed_multiplier, config.speed_boost);
        // Stand-off point between ship and player, within jitter
        let expected = Point3::new(100.0 - config.optimal_distance, 0.0, 0.0);
        assert!(horizontal_distance(plan.target, expected) <= config.jitter * 2f64.sqrt() + 1e-9);
        assert_relative_eq!(plan.target.y, WATER_LEVEL);
    }

    #[test]
    fn test_orbit_advances_angle_and_keeps_radius() {
        let config = PursuitConfig {
            orbit_probability: 1.0,
            direction_flip_probability: 0.0,
            jitter: 0.0,
            ..Default::default()
        };
        let mut r = rng(2);
        let agent = Point3::new(50.0, 0.0, 0.0);
        let player = Point3::ZERO;
        let mut state = begin_follow(&mut r, agent, player, 0.0, &config);

        // Timer fires: orbit mode starting at the ship's own angle
        let plan = plan_follow(&mut r, &mut state, agent, player, 10.0, 0.5, WATER_LEVEL, &config);
        assert!(plan.rerolled);
        assert_eq!(state.mode, FollowMode::Orbit);
        assert_relative_eq!(horizontal_distance(plan.target, player), config.optimal_distance, epsilon = 1e-9);
        let swept = config.orbit_speed * 0.5;
        let angle = state.orbit_angle;
        let expected = if state.orbit_direction > 0.0 { swept } else { 2.0 * PI - swept };
        assert_relative_eq!(angle, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_follow_speed_drops_when_too_close() {
        let config = PursuitConfig::default();
        let mut r = rng(9);
        let agent = Point3::new(10.0, 0.0, 0.0);
        let player = Point3::ZERO;
        let mut state = begin_follow(&mut r, agent, player, 0.0, &config);
        let plan = plan_follow(&mut r, &mut state, agent, player, 0.0, DT, WATER_LEVEL, &config);
        assert_eq!(plan.approach, Approach::BackOff);
        assert_relative_eq!(plan.speed_multiplier, config.speed_reduction);
        // The stand-off point lies beyond the ship, away from the player
        assert!(horizontal_distance(plan.target, player) > horizontal_distance(agent, player));
    }

    // ---- Gunnery ----

    #[test]
    fn test_inaccuracy_is_capped() {
        let config = WeaponConfig::default();
        let mut r = rng(17);
        let target = Point3::new(0.0, 0.0, 0.0);
        let cap = config.base_inaccuracy * config.max_inaccuracy_factor;
        for _ in 0..1_000 {
            let aimed = apply_inaccuracy(&mut r, target, 10_000.0, &config);
            assert!(aimed.x.abs() <= cap && aimed.z.abs() <= cap, "{aimed:?}");
            assert!(aimed.y.abs() <= config.vertical_inaccuracy);
        }
    }

    #[test]
    fn test_side_of_follows_hull_frame() {
        // Yaw 0 travels toward -Z, so +X is starboard
        assert_eq!(side_of(Point3::ZERO, 0.0, Point3::new(10.0, 0.0, 0.0)), MountSide::Starboard);
        assert_eq!(side_of(Point3::ZERO, 0.0, Point3::new(-10.0, 0.0, 0.0)), MountSide::Port);
        // Turned half around, the sides swap
        assert_eq!(side_of(Point3::ZERO, PI, Point3::new(10.0, 0.0, 0.0)), MountSide::Port);
    }

    #[test]
    fn test_select_mount_picks_nearest_on_facing_side() {
        let mounts = WeaponConfig::default().starboard_mounts;
        // Target off the starboard bow (ahead is -Z)
        let target = Point3::new(30.0, 0.0, -30.0);
        let choice = select_mount(Point3::ZERO, 0.0, target, &mounts).unwrap();
        assert_eq!(choice.side, MountSide::Starboard);
        assert!(choice.world_position.x > 0.0);
        assert!(choice.world_position.z < 0.0, "bow mount expected, got {choice:?}");
        assert!(select_mount(Point3::ZERO, 0.0, target, &[]).is_none());
    }

    #[test]
    fn test_launch_direction_arcs_higher_for_far_targets() {
        let config = WeaponConfig::default();
        let from = Point3::new(0.0, 1.5, 0.0);
        let near = launch_direction(from, Point3::new(20.0, 0.0, 0.0), &config);
        let far = launch_direction(from, Point3::new(95.0, 0.0, 0.0), &config);
        assert_relative_eq!(near.length(), 1.0, epsilon = 1e-12);
        assert!(far.y > near.y, "near {near:?} far {far:?}");
        // Never downward, even with the target well below the muzzle
        let below = launch_direction(Point3::new(0.0, 30.0, 0.0), Point3::new(5.0, 0.0, 0.0), &config);
        assert!(below.y >= 0.0);
    }

    #[test]
    fn test_segment_sphere_intersection() {
        let center = Point3::new(10.0, 0.0, 0.0);
        let hit = segment_hits_sphere(Point3::ZERO, Point3::new(20.0, 0.0, 0.0), center, 2.0).unwrap();
        assert_relative_eq!(hit.x, 8.0, epsilon = 1e-9);
        assert!(segment_hits_sphere(Point3::ZERO, Point3::new(5.0, 0.0, 0.0), center, 2.0).is_none());
        assert!(segment_hits_sphere(Point3::new(0.0, 5.0, 0.0), Point3::new(20.0, 5.0, 0.0), center, 2.0).is_none());
        // Starting inside counts as a hit at the start point
        let inside = segment_hits_sphere(Point3::new(10.5, 0.0, 0.0), Point3::new(30.0, 0.0, 0.0), center, 2.0);
        assert_eq!(inside, Some(Point3::new(10.5, 0.0, 0.0)));
    }

    #[test]
    fn test_trajectory_stops_at_water() {
        let points = predict_trajectory(
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(40.0, 0.0, 0.0),
            GRAVITY,
            BALLISTIC_FIXED_STEP,
            WATER_LEVEL,
            10_000,
        );
        let last = *points.last().unwrap();
        assert!(last.y <= WATER_LEVEL);
        assert!(points[..points.len() - 1].iter().all(|p| p.y > WATER_LEVEL));
        // ~1.43 s of fall at 60 Hz
        assert!((80..=95).contains(&points.len()), "{} points", points.len());
    }

    #[test]
    fn test_max_range_shot_lands_near_weapon_range() {
        let config = WeaponConfig::default();
        let from = Point3::new(0.0, 1.5, 0.0);
        let direction = launch_direction(from, Point3::new(config.range, 0.0, 0.0), &config);
        let points = predict_trajectory(from, direction * config.launch_speed, GRAVITY, BALLISTIC_FIXED_STEP, WATER_LEVEL, 10_000);
        let landing = points.last().unwrap().x;
        assert!((config.range * 0.8..config.range * 1.25).contains(&landing), "landed at {landing}");
    }

    #[test]
    fn test_agent_defaults_use_forward_convention() {
        // Sanity check tying steering to the hull frame used by gunnery
        let forward = forward_from_yaw(0.0);
        assert_eq!(side_of(Point3::ZERO, 0.0, forward * 10.0 + Point3::new(1.0, 0.0, 0.0)), MountSide::Starboard);
        assert!(AgentConfig::default().attack_range < WeaponConfig::default().range);
    }
}
