//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, processes commands, runs all
//! systems, and produces `SimSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;
use std::path::Path;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use salvo_core::aabb::Aabb;
use salvo_core::commands::SimCommand;
use salvo_core::constants::{CANNON_ACTIVATION_TICKS, DT, SCENE_CENTER, SCENE_HALF_EXTENTS};
use salvo_core::enums::SimPhase;
use salvo_core::error::ConfigError;
use salvo_core::events::SimEvent;
use salvo_core::math::Vec3;
use salvo_core::state::{BoxView, SimSnapshot};
use salvo_core::types::SimTime;
use salvo_octree::OctreeConfig;

use crate::systems;
use crate::systems::collision::HitCounter;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Center of the scene volume, which is also the octree root.
    pub scene_center: Vec3,
    pub scene_half_extents: Vec3,
    /// Simulation seconds per tick.
    pub dt: f32,
    pub octree: OctreeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scene_center: SCENE_CENTER,
            scene_half_extents: SCENE_HALF_EXTENTS,
            dt: DT,
            octree: OctreeConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scene_center.is_finite() {
            return Err(ConfigError::Invalid("scene_center must be finite".into()));
        }
        let h = self.scene_half_extents;
        if !(h.is_finite() && h.x > 0.0 && h.y > 0.0 && h.z > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scene_half_extents must be positive, got {h:?}"
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        self.octree.validate()
    }

    pub fn scene(&self) -> Aabb {
        Aabb::new(self.scene_center, self.scene_half_extents)
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    hit_counter: HitCounter,
    octree_boxes: Vec<BoxView>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the scene set up and idle.
    ///
    /// `config` must be valid; use [`SimulationEngine::try_new`] for configs
    /// that did not come through [`SimConfig::from_json`].
    pub fn new(config: SimConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid SimConfig: {config:?}");
        let mut world = World::new();
        world_setup::setup_scene(&mut world);
        Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            time: SimTime::default(),
            phase: SimPhase::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            hit_counter: HitCounter::default(),
            octree_boxes: Vec::new(),
        }
    }

    /// Validate `config`, then create the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Active {
            self.run_systems();
            self.time.advance(self.config.dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            events,
            self.octree_boxes.clone(),
            self.hit_counter.hits(),
        )
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Unique contacts destroyed so far.
    pub fn hits(&self) -> u32 {
        self.hit_counter.hits()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a shell with the given kinematics (for testing).
    #[cfg(test)]
    pub fn spawn_test_shell(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        lifespan: f32,
    ) -> salvo_core::types::BodyId {
        let shot = crate::ballistics::Shot {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            lifespan,
        };
        world_setup::body_id(world_setup::spawn_shell(&mut self.world, 0, &shot))
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Start => {
                if self.phase == SimPhase::Idle {
                    systems::cannon::arm(
                        &mut self.world,
                        self.time.tick,
                        &CANNON_ACTIVATION_TICKS,
                    );
                    self.phase = SimPhase::Active;
                    info!(tick = self.time.tick, "simulation started");
                }
            }
            SimCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                    info!(tick = self.time.tick, "simulation paused");
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                    info!(tick = self.time.tick, "simulation resumed");
                }
            }
            SimCommand::Stop => {
                if self.phase != SimPhase::Idle {
                    systems::cannon::disarm(&mut self.world);
                    self.phase = SimPhase::Idle;
                    info!(tick = self.time.tick, "simulation stopped");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;
        let scene = self.config.scene();
        // 1. Cannons (activation, firing)
        systems::cannon::run(&mut self.world, &mut self.rng, tick, &mut self.events);
        // 2. Defender tracking and interceptor launch
        systems::tracking::run(&mut self.world, tick, &mut self.events);
        // 3. Movement integration
        systems::movement::run(&mut self.world, self.config.dt);
        // 4. Broad phase and hit resolution
        self.octree_boxes = systems::collision::run(
            &mut self.world,
            &scene,
            self.config.octree,
            &mut self.hit_counter,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 5. Cleanup (expired, out of bounds)
        systems::cleanup::run(&mut self.world, &scene, &mut self.despawn_buffer);
    }
}
