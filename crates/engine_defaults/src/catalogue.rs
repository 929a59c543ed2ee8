//! Attach built-in components by display name.
//!
//! The editor's "Add component" popup lists [`COMPONENT_NAMES`] and passes
//! the chosen string to [`add_component_by_name`].

use engine_ecs::{Coordinator, EcsError, Entity};
use engine_math::Transform;

use crate::components::{Color, MeshComponent, RigidBody, SceneCamera};

/// Display names of the components the editor can attach, in menu order.
pub const COMPONENT_NAMES: [&str; 5] = ["Transform", "Color", "Mesh", "RigidBody", "Camera"];

/// Errors from [`add_component_by_name`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// The name is not one of [`COMPONENT_NAMES`].
    #[error("unknown component name `{0}`")]
    UnknownComponentName(String),

    /// The coordinator rejected the component.
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

/// Attach the component called `name` to `entity`, initialised to its
/// editor default.
///
/// # Errors
///
/// Returns [`CatalogueError::UnknownComponentName`] for a name not in
/// [`COMPONENT_NAMES`], or the coordinator's error if the entity is dead or
/// already has the component.
pub fn add_component_by_name(
    coord: &mut Coordinator,
    entity: Entity,
    name: &str,
) -> Result<(), CatalogueError> {
    match name {
        "Transform" => coord.add_component(entity, Transform::IDENTITY)?,
        "Color" => coord.add_component(entity, Color::DEFAULT_GREY)?,
        "Mesh" => coord.add_component(entity, MeshComponent::default())?,
        "RigidBody" => coord.add_component(entity, RigidBody::AT_REST)?,
        "Camera" => coord.add_component(entity, SceneCamera::default())?,
        other => return Err(CatalogueError::UnknownComponentName(other.to_owned())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::register_defaults;

    fn world() -> Coordinator {
        let mut coord = Coordinator::default();
        register_defaults(&mut coord).unwrap();
        coord
    }

    #[test]
    fn test_every_listed_name_attaches() {
        let mut coord = world();
        let e = coord.create_entity().unwrap();
        for name in COMPONENT_NAMES {
            add_component_by_name(&mut coord, e, name).unwrap();
        }
        assert_eq!(coord.entity_signature(e).unwrap().len(), COMPONENT_NAMES.len());
        assert_eq!(coord.get_component::<Color>(e).unwrap(), &Color::DEFAULT_GREY);
    }

    #[test]
    fn test_unknown_name() {
        let mut coord = world();
        let e = coord.create_entity().unwrap();
        assert_eq!(
            add_component_by_name(&mut coord, e, "Light"),
            Err(CatalogueError::UnknownComponentName("Light".to_string()))
        );
        assert!(coord.entity_signature(e).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_is_reported() {
        let mut coord = world();
        let e = coord.create_entity().unwrap();
        add_component_by_name(&mut coord, e, "Mesh").unwrap();
        assert!(matches!(
            add_component_by_name(&mut coord, e, "Mesh"),
            Err(CatalogueError::Ecs(EcsError::DuplicateComponent { .. }))
        ));
    }
}
