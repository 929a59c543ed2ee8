//! # engine_ecs
//!
//! One ECS world behind one facade.
//!
//! The [`Coordinator`] composes the entity, component, and system managers
//! and is the only ECS type the rest of the engine talks to. Rendering,
//! editor panels, and physics all receive a `&Coordinator` or
//! `&mut Coordinator` from whoever owns the world.
//!
//! ```rust
//! use engine_ecs::{Component, Coordinator, Signature, System};
//!
//! struct Position(f32);
//! impl Component for Position {
//!     fn type_name() -> &'static str { "Position" }
//! }
//!
//! struct Printer;
//! impl System for Printer {
//!     fn type_name() -> &'static str { "Printer" }
//! }
//!
//! let mut world = Coordinator::default();
//! let position = world.register_component::<Position>().unwrap();
//! world.register_system::<Printer>().unwrap();
//! world.set_system_signature::<Printer>(Signature::EMPTY.with(position)).unwrap();
//!
//! let e = world.create_entity().unwrap();
//! world.add_component(e, Position(1.0)).unwrap();
//! assert!(world.system_entities::<Printer>().unwrap().contains(&e));
//! ```

pub mod config;
pub mod coordinator;

pub use config::{ConfigError, WorldConfig};
pub use coordinator::Coordinator;

pub use engine_component::{
    Component, ComponentArray, ComponentType, EcsError, EcsResult, Entity, MAX_COMPONENTS,
    MAX_ENTITIES, Signature,
};
pub use engine_system::{System, SystemHandle, SystemRecord};
