//! Built-in systems.
//!
//! Each system is a marker type registered with the coordinator. The work
//! itself is an associated function that takes the coordinator, reads the
//! system's entity set, and touches only the components in its signature.

use engine_ecs::{Coordinator, EcsResult, Entity, Signature, System, SystemHandle};
use engine_math::{Mat4, Transform, Vec3};
use tracing::{info, trace};

use crate::components::{Color, MeshComponent, MeshHandle, RigidBody, SceneCamera};

/// Integrates [`RigidBody`] velocity into [`Transform`] position.
///
/// Signature: `{Transform, RigidBody}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsSystem;

impl System for PhysicsSystem {
    fn type_name() -> &'static str {
        "PhysicsSystem"
    }
}

impl PhysicsSystem {
    /// Advance every member by `dt` seconds. Returns the number of entities
    /// moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the system or its components are not registered.
    pub fn update(coord: &mut Coordinator, dt: f32) -> EcsResult<usize> {
        // Collect first; the entity set borrows the coordinator.
        let members: Vec<Entity> = coord.system_entities::<Self>()?.iter().copied().collect();
        for &entity in &members {
            let velocity = coord.get_component::<RigidBody>(entity)?.velocity;
            coord
                .get_component_mut::<Transform>(entity)?
                .translate(velocity * dt);
        }
        trace!(moved = members.len(), dt, "physics step");
        Ok(members.len())
    }
}

/// One mesh ready to be drawn by an external renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// The entity being drawn.
    pub entity: Entity,
    /// Mesh to draw, resolved by the renderer's loader.
    pub mesh: MeshHandle,
    /// Model matrix built from the entity's transform.
    pub model: Mat4,
    /// Flat RGB color.
    pub color: Vec3,
}

/// Gathers draw data for every visible mesh.
///
/// Signature: `{Transform, Color, MeshComponent}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererSystem;

impl System for RendererSystem {
    fn type_name() -> &'static str {
        "RendererSystem"
    }
}

impl RendererSystem {
    /// Build one [`DrawItem`] per member, in entity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the system or its components are not registered.
    pub fn collect(coord: &Coordinator) -> EcsResult<Vec<DrawItem>> {
        coord
            .system_entities::<Self>()?
            .iter()
            .map(|&entity| {
                Ok(DrawItem {
                    entity,
                    mesh: coord.get_component::<MeshComponent>(entity)?.mesh,
                    model: coord.get_component::<Transform>(entity)?.to_matrix(),
                    color: coord.get_component::<Color>(entity)?.rgb,
                })
            })
            .collect()
    }
}

/// A row of the scene hierarchy panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub entity: Entity,
    pub name: String,
    pub position: Vec3,
}

/// Tracks every placed entity for the hierarchy and inspector panels.
///
/// Signature: `{Transform}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityTrackSystem;

impl System for EntityTrackSystem {
    fn type_name() -> &'static str {
        "EntityTrackSystem"
    }
}

impl EntityTrackSystem {
    /// Snapshot the name and position of every member, in entity order.
    ///
    /// # Errors
    ///
    /// Returns an error if the system or [`Transform`] is not registered.
    pub fn snapshot(coord: &Coordinator) -> EcsResult<Vec<TrackedEntity>> {
        coord
            .system_entities::<Self>()?
            .iter()
            .map(|&entity| {
                Ok(TrackedEntity {
                    entity,
                    name: coord.entity_name(entity)?.to_owned(),
                    position: coord.get_component::<Transform>(entity)?.position,
                })
            })
            .collect()
    }
}

/// Handles to the built-in systems.
#[derive(Debug, Clone, Copy)]
pub struct DefaultSystems {
    pub physics: SystemHandle<PhysicsSystem>,
    pub renderer: SystemHandle<RendererSystem>,
    pub tracker: SystemHandle<EntityTrackSystem>,
}

/// Register the built-in component types, then the built-in systems and
/// their signatures.
///
/// # Errors
///
/// Fails if any of them is already registered or the component limit is
/// reached. Both are setup mistakes the caller should treat as fatal.
pub fn register_defaults(coord: &mut Coordinator) -> EcsResult<DefaultSystems> {
    let transform = coord.register_component::<Transform>()?;
    let color = coord.register_component::<Color>()?;
    let rigid_body = coord.register_component::<RigidBody>()?;
    let mesh = coord.register_component::<MeshComponent>()?;
    coord.register_component::<SceneCamera>()?;

    let systems = DefaultSystems {
        physics: coord.register_system::<PhysicsSystem>()?,
        renderer: coord.register_system::<RendererSystem>()?,
        tracker: coord.register_system::<EntityTrackSystem>()?,
    };

    coord.set_system_signature::<PhysicsSystem>(Signature::EMPTY.with(transform).with(rigid_body))?;
    coord.set_system_signature::<RendererSystem>([transform, color, mesh].into_iter().collect())?;
    coord.set_system_signature::<EntityTrackSystem>(Signature::EMPTY.with(transform))?;

    info!(
        components = coord.components().registered_count(),
        systems = coord.systems().system_count(),
        "registered default components and systems"
    );
    Ok(systems)
}

#[cfg(test)]
mod tests {
    use engine_ecs::EcsError;

    use super::*;

    fn world() -> (Coordinator, DefaultSystems) {
        let mut coord = Coordinator::default();
        let systems = register_defaults(&mut coord).unwrap();
        (coord, systems)
    }

    #[test]
    fn test_register_defaults_twice_fails() {
        let (mut coord, _) = world();
        let err = register_defaults(&mut coord).unwrap_err();
        assert_eq!(err, EcsError::ComponentAlreadyRegistered("Transform"));
        assert!(err.is_registration_error());
    }

    #[test]
    fn test_physics_moves_only_bodies() {
        let (mut coord, systems) = world();
        let moving = coord.create_entity().unwrap();
        coord.add_component(moving, Transform::IDENTITY).unwrap();
        coord
            .add_component(moving, RigidBody::new(Vec3::new(2.0, 0.0, -1.0)))
            .unwrap();
        let still = coord.create_entity().unwrap();
        coord
            .add_component(still, Transform::from_position(Vec3::Y))
            .unwrap();

        assert_eq!(PhysicsSystem::update(&mut coord, 0.5).unwrap(), 1);
        assert_eq!(
            coord.get_component::<Transform>(moving).unwrap().position,
            Vec3::new(1.0, 0.0, -0.5)
        );
        assert_eq!(coord.get_component::<Transform>(still).unwrap().position, Vec3::Y);

        let record = coord.system(systems.physics).unwrap();
        assert_eq!(record.entities.len(), 1);
    }

    #[test]
    fn test_renderer_needs_all_three_components() {
        let (mut coord, _) = world();
        let e = coord.create_entity().unwrap();
        coord
            .add_component(e, Transform::from_position(Vec3::X))
            .unwrap();
        coord.add_component(e, Color::new(1.0, 0.0, 0.0)).unwrap();
        assert!(RendererSystem::collect(&coord).unwrap().is_empty());

        coord
            .add_component(e, MeshComponent { mesh: MeshHandle::SPHERE })
            .unwrap();
        let items = RendererSystem::collect(&coord).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].entity, e);
        assert_eq!(items[0].mesh, MeshHandle::SPHERE);
        assert_eq!(items[0].color, Vec3::X);
        assert_eq!(items[0].model, Mat4::from_translation(Vec3::X));
    }

    #[test]
    fn test_tracker_reports_names() {
        let (mut coord, _) = world();
        let e = coord.create_named_entity("Lamp").unwrap();
        coord
            .add_component(e, Transform::from_position(Vec3::Z))
            .unwrap();
        coord.create_entity().unwrap();

        let rows = EntityTrackSystem::snapshot(&coord).unwrap();
        assert_eq!(
            rows,
            vec![TrackedEntity {
                entity: e,
                name: "Lamp".to_string(),
                position: Vec3::Z,
            }]
        );
    }
}
