//! ECS error types.

use crate::entity::Entity;

/// Errors returned by entity, component, and system operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// Every entity id is in use.
    #[error("entity capacity of {capacity} exceeded")]
    CapacityExceeded {
        /// The configured entity universe size.
        capacity: usize,
    },

    /// The entity id is out of range or not currently alive.
    #[error("invalid entity: {0}")]
    InvalidEntity(Entity),

    /// Every component type id is in use.
    #[error("cannot register more than {max} component types")]
    TooManyComponents {
        /// The configured component universe size.
        max: usize,
    },

    /// The component type was registered before.
    #[error("component type {0} is already registered")]
    ComponentAlreadyRegistered(&'static str),

    /// The component type was never registered.
    #[error("component type {0} is not registered")]
    ComponentNotRegistered(&'static str),

    /// The entity does not hold a component of this type.
    #[error("{entity} has no {component} component")]
    ComponentMissing {
        /// The entity that was queried.
        entity: Entity,
        /// Name of the missing component type.
        component: &'static str,
    },

    /// The entity already holds a component of this type.
    #[error("{entity} already has a {component} component")]
    DuplicateComponent {
        /// The entity that was modified.
        entity: Entity,
        /// Name of the duplicated component type.
        component: &'static str,
    },

    /// The system type was registered before.
    #[error("system {0} is already registered")]
    SystemAlreadyRegistered(&'static str),

    /// A component type id does not fit in a signature.
    #[error(
        "component type id {0} is outside the {width}-bit signature",
        width = crate::signature::MAX_COMPONENTS
    )]
    ComponentTypeOutOfRange(usize),

    /// The system type was never registered.
    #[error("system {0} is not registered")]
    SystemNotRegistered(&'static str),
}

impl EcsError {
    /// Returns `true` for errors that can only happen while the world is being
    /// configured at startup.
    ///
    /// These indicate a configuration bug and callers should abort rather
    /// than try to recover.
    #[must_use]
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::TooManyComponents { .. }
                | Self::ComponentAlreadyRegistered(_)
                | Self::SystemAlreadyRegistered(_)
        )
    }
}

/// Shorthand result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
