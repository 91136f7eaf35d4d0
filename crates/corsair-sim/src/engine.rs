//! Simulation world: the core of the NPC combat simulation.
//!
//! `SimulationWorld` owns the hecs ECS world with every agent and projectile,
//! the seeded RNG, sim time, queued presentation events and respawn
//! bookkeeping. It runs all systems once per `update_all` call and is
//! completely headless: the embedding game supplies a `CombatHost` and
//! drains `SimEvent`s after each update.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use corsair_core::components::{Projectile, Ship, Visual};
use corsair_core::config::{AgentConfig, AgentOptions, WorldConfig};
use corsair_core::constants::STAT_SHIPS_RESPAWNED;
use corsair_core::enums::{DamageSource, VisualState};
use corsair_core::error::{SimError, SimResult};
use corsair_core::events::SimEvent;
use corsair_core::math::is_finite_point;
use corsair_core::state::{AgentView, WorldSnapshot};
use corsair_core::types::{AgentId, Point3, ProjectileId, SimTime};

use crate::host::CombatHost;
use crate::systems;
use crate::systems::combat::AgentFrame;
use crate::systems::lifecycle::{DamageOutcome, RespawnTicket};
use crate::systems::projectiles::{FlightFrame, ProjectileSpec};
use crate::systems::weapon::{Armory, FireRejection};

/// The simulation world. Owns the ECS world and all sim state.
pub struct SimulationWorld {
    world: World,
    config: WorldConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    /// Live agents in insertion order.
    roster: Vec<Entity>,
    next_agent_id: u32,
    next_projectile_id: u32,
    respawns: Vec<RespawnTicket>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationWorld {
    /// Create an empty world. Fails if the config does not validate.
    pub fn new(config: WorldConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            roster: Vec::new(),
            next_agent_id: 0,
            next_projectile_id: 0,
            respawns: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Spawn an agent at `position` with `options` merged over the defaults.
    ///
    /// The agent is placed on the water plane and an `AttachVisual` event is
    /// queued; answer it with [`SimulationWorld::visual_ready`].
    pub fn create_agent(&mut self, position: Point3, options: &AgentOptions) -> SimResult<Entity> {
        if !is_finite_point(position) {
            warn!(?position, "refusing to create agent at non-finite position");
            return Err(SimError::InvalidTarget);
        }
        let config = options.apply(&AgentConfig::default());
        if let Err(err) = config.validate() {
            warn!(error = %err, "refusing to create agent");
            return Err(err);
        }
        Ok(self.spawn_agent(position, config))
    }

    /// Advance every agent and projectile by `dt` seconds.
    ///
    /// Order: agents in insertion order (posture, motion, fire), projectile
    /// flight, wave motion, wreck removal and respawns, projectile cleanup.
    pub fn update_all<H: CombatHost + ?Sized>(&mut self, dt: f64, host: &mut H) {
        if !(dt.is_finite() && dt >= 0.0) {
            warn!(dt, "skipping update with invalid frame delta");
            return;
        }
        self.time.advance(dt);
        let now_secs = self.time.elapsed_secs;
        let player = host.player_position().filter(|p| is_finite_point(*p));

        // 1. Agents
        let frame = AgentFrame {
            now_secs,
            dt,
            player,
            config: &self.config,
        };
        for index in 0..self.roster.len() {
            let entity = self.roster[index];
            let fire_at =
                systems::combat::update_agent(&mut self.world, &mut self.rng, entity, &frame);
            if let Some(target) = fire_at {
                // Rejections are logged by the weapon system
                let _ = systems::weapon::try_fire(
                    Armory {
                        world: &mut self.world,
                        rng: &mut self.rng,
                        events: &mut self.events,
                        next_projectile_id: &mut self.next_projectile_id,
                    },
                    &self.config,
                    entity,
                    target,
                );
            }
        }

        // 2. Projectile flight
        let flight = FlightFrame {
            dt,
            step: self.config.ballistic_step.step_for(dt),
            gravity: self.config.gravity,
            water_level: self.config.water_level,
            player,
        };
        systems::projectiles::run(&mut self.world, host, &flight, &mut self.events);

        // 3. Wave motion
        systems::bobbing::run(&mut self.world, now_secs, &self.config.bob);

        // 4. Wreck removal and respawns
        self.remove_wrecks(now_secs);
        self.process_respawns(now_secs, host);

        // 5. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Apply damage to an agent. See [`systems::lifecycle::take_damage`].
    pub fn take_damage<H: CombatHost + ?Sized>(
        &mut self,
        entity: Entity,
        amount: f64,
        source: DamageSource,
        host: &mut H,
    ) -> SimResult<DamageOutcome> {
        systems::lifecycle::take_damage(
            &mut self.world,
            &mut self.events,
            &self.config,
            self.time.elapsed_secs,
            entity,
            amount,
            source,
            host,
        )
    }

    /// Remove an agent from the active set. Returns whether anything was
    /// removed; disposing twice is harmless.
    pub fn dispose(&mut self, entity: Entity) -> bool {
        let before = self.roster.len();
        self.roster.retain(|e| *e != entity);
        let removed = self.roster.len() != before;
        // Follow state and every other component go with the entity
        if removed {
            let _ = self.world.despawn(entity);
        }
        removed
    }

    /// Fire an agent's cannons at `target`. Returns whether a projectile
    /// was launched.
    pub fn fire_at_target(&mut self, entity: Entity, target: Point3) -> bool {
        self.try_fire(entity, target).is_ok()
    }

    /// Like [`SimulationWorld::fire_at_target`], with the rejection reason.
    pub fn try_fire(&mut self, entity: Entity, target: Point3) -> Result<ProjectileId, FireRejection> {
        if !self.roster.contains(&entity) {
            warn!(?entity, "fire requested for unknown agent");
            return Err(FireRejection::UnknownAgent);
        }
        systems::weapon::try_fire(
            Armory {
                world: &mut self.world,
                rng: &mut self.rng,
                events: &mut self.events,
                next_projectile_id: &mut self.next_projectile_id,
            },
            &self.config,
            entity,
            target,
        )
    }

    /// Launch a projectile that is not tied to an agent's reload.
    pub fn spawn_projectile(&mut self, spec: ProjectileSpec) -> ProjectileId {
        systems::projectiles::spawn(&mut self.world, &mut self.next_projectile_id, spec)
    }

    /// Completion of an `AttachVisual` request. A failed load leaves the
    /// agent simulating with a placeholder.
    pub fn visual_ready(&mut self, entity: Entity, result: Result<(), String>) -> SimResult<()> {
        let Ok((ship, visual)) = self.world.query_one_mut::<(&Ship, &mut Visual)>(entity) else {
            return Err(SimError::UnknownAgent);
        };
        match result {
            Ok(()) => visual.state = VisualState::Ready,
            Err(reason) => {
                warn!(agent = %ship.id, %reason, "model failed to load, using placeholder");
                visual.state = VisualState::Placeholder;
            }
        }
        Ok(())
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.roster)
    }

    pub fn agent_view(&self, entity: Entity) -> Option<AgentView> {
        systems::snapshot::agent_view(&self.world, entity)
    }

    pub fn agent_config(&self, entity: Entity) -> Option<AgentConfig> {
        systems::snapshot::agent_config(&self.world, entity)
    }

    /// Live agents in insertion order.
    pub fn agents(&self) -> &[Entity] {
        &self.roster
    }

    pub fn agent_count(&self) -> usize {
        self.roster.len()
    }

    /// Projectiles still in flight.
    pub fn projectile_count(&self) -> usize {
        let mut query = self.world.query::<&Projectile>();
        query.iter().count()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn spawn_agent(&mut self, position: Point3, config: AgentConfig) -> Entity {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        let entity = systems::lifecycle::spawn_agent(
            &mut self.world,
            &mut self.rng,
            &mut self.events,
            id,
            position,
            config,
            &self.config,
        );
        self.roster.push(entity);
        entity
    }

    fn remove_wrecks(&mut self, now_secs: f64) {
        for (entity, id, ticket) in systems::lifecycle::due_wrecks(&self.world, now_secs) {
            self.events.push(SimEvent::DestroyVisual { agent: id });
            self.dispose(entity);
            info!(agent = %id, respawn = ticket.is_some(), "agent removed");
            if let Some(ticket) = ticket {
                self.respawns.push(ticket);
            }
        }
    }

    fn process_respawns<H: CombatHost + ?Sized>(&mut self, now_secs: f64, host: &mut H) {
        if self.respawns.is_empty() {
            return;
        }
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.respawns)
            .into_iter()
            .partition(|ticket| ticket.due_secs <= now_secs);
        self.respawns = waiting;

        for ticket in due {
            let entity = self.spawn_agent(ticket.origin, ticket.config);
            host.increment_stat(STAT_SHIPS_RESPAWNED, 1);
            if let Ok(ship) = self.world.get::<&Ship>(entity) {
                info!(agent = %ship.id, "agent respawned");
            }
        }
    }
}
