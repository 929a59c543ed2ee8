//! # engine_app
//!
//! Runs one ECS world headless.
//!
//! ## Startup Sequence
//!
//! 1. Load [`AppConfig`] (first argument, else `ENGINE_CONFIG`, else defaults).
//! 2. Build the coordinator and register the default components and systems.
//! 3. Populate the scene with the configured cubes and spheres.
//! 4. Enter the fixed-timestep tick loop.

mod config;
mod tick;

use anyhow::{Context, Result};
use engine_defaults::{EntityType, RigidBody, Scene, register_defaults};
use engine_ecs::Coordinator;
use engine_math::{Transform, Vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, SceneConfig};
use tick::TickLoop;

/// Spacing between placed entities along the X axis.
const SPACING: f32 = 2.5;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("engine_app=info".parse()?))
        .init();

    info!("engine starting");

    let config = AppConfig::load()?;
    let mut coord = Coordinator::new(config.world).context("invalid world config")?;
    let systems = register_defaults(&mut coord).context("failed to register default systems")?;
    let scene = build_scene(&mut coord, &config.scene)?;

    let mut tick_loop = TickLoop::new(config.tick, coord, scene, systems);
    let last = tick_loop.run().context("tick loop failed")?;

    let coord = tick_loop.coordinator();
    let physics = coord.system(tick_loop.systems().physics).map_or(0, |r| r.entities.len());
    info!(
        ticks = tick_loop.tick_id(),
        entities = coord.living_count(),
        physics_bodies = physics,
        moved = last.moved,
        tracked = last.tracked.len(),
        draws = last.draws.len(),
        "engine shut down"
    );
    Ok(())
}

/// Place cubes in a row at rest and spheres in a row above them, falling.
fn build_scene(coord: &mut Coordinator, config: &SceneConfig) -> Result<Scene> {
    let mut scene = Scene::new(config.name.clone());

    for i in 0..config.cubes {
        let cube = scene.add_entity(coord, EntityType::Cube)?;
        coord.get_component_mut::<Transform>(cube)?.position =
            Vec3::new(i as f32 * SPACING, 0.0, 0.0);
    }
    for i in 0..config.spheres {
        let sphere = scene.add_entity(coord, EntityType::Sphere)?;
        coord.get_component_mut::<Transform>(sphere)?.position =
            Vec3::new(i as f32 * SPACING, SPACING, 0.0);
        coord.add_component(sphere, RigidBody::new(Vec3::new(0.0, -1.0, 0.0)))?;
    }

    if let Some(&first) = scene.entities().first() {
        coord.set_current_entity(Some(first))?;
    }

    info!(
        scene = scene.name(),
        entities = scene.entities().len(),
        "scene populated"
    );
    Ok(scene)
}
