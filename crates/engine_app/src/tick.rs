//! Fixed-timestep tick loop.
//!
//! Each tick runs the built-in systems in order:
//!
//! 1. Physics integrates velocities.
//! 2. Entity tracking snapshots names and positions for the panels.
//! 3. Draw collection gathers the meshes an external renderer would draw.

use std::time::{Duration, Instant};

use engine_defaults::{
    DefaultSystems, DrawItem, EntityTrackSystem, PhysicsSystem, RendererSystem, Scene,
    TrackedEntity,
};
use engine_ecs::{Coordinator, EcsResult};
use tracing::{debug, info, warn};

use crate::config::TickConfig;

/// What one tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub tick_id: u64,
    /// Entities moved by physics.
    pub moved: usize,
    pub tracked: Vec<TrackedEntity>,
    pub draws: Vec<DrawItem>,
}

/// The application's tick loop state.
#[derive(Debug)]
pub struct TickLoop {
    /// Current tick counter.
    tick_id: u64,
    config: TickConfig,
    coord: Coordinator,
    scene: Scene,
    systems: DefaultSystems,
}

impl TickLoop {
    /// Create a tick loop around a coordinator that already has the default
    /// systems registered.
    #[must_use]
    pub fn new(
        config: TickConfig,
        coord: Coordinator,
        scene: Scene,
        systems: DefaultSystems,
    ) -> Self {
        Self {
            tick_id: 0,
            config,
            coord,
            scene,
            systems,
        }
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn coordinator(&self) -> &Coordinator {
        &self.coord
    }

    #[must_use]
    pub fn systems(&self) -> &DefaultSystems {
        &self.systems
    }

    /// Run one tick of `dt` seconds.
    ///
    /// # Errors
    ///
    /// Propagates any system error. The tick counter still advances.
    pub fn tick(&mut self, dt: f64) -> EcsResult<Frame> {
        self.tick_id += 1;

        self.scene.retain_live(&self.coord);
        let moved = PhysicsSystem::update(&mut self.coord, dt as f32)?;
        let tracked = EntityTrackSystem::snapshot(&self.coord)?;
        let draws = RendererSystem::collect(&self.coord)?;

        debug!(
            tick_id = self.tick_id,
            dt,
            moved,
            tracked = tracked.len(),
            draws = draws.len(),
            "tick complete"
        );

        Ok(Frame {
            tick_id: self.tick_id,
            moved,
            tracked,
            draws,
        })
    }

    /// Run for the configured number of ticks and return the last frame.
    ///
    /// This is a blocking loop; with `max_ticks == 0` it only returns on
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the first system error.
    pub fn run(&mut self) -> EcsResult<Frame> {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            scene = self.scene.name(),
            entities = self.scene.entities().len(),
            "starting tick loop"
        );

        loop {
            let start = Instant::now();

            let dt = tick_duration.as_secs_f64();
            let frame = self.tick(dt)?;

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, last_tick = frame.tick_id, "tick loop complete");
                return Ok(frame);
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}
