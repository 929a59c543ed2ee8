//! # engine_component
//!
//! The "E" and "C" in ECS: entity identities, signatures, and packed
//! component storage.
//!
//! This crate provides:
//!
//! - [`Entity`] and [`EntityManager`]: bounded id pool with per-entity signatures.
//! - [`Signature`] and [`ComponentType`]: fixed-width component bitsets.
//! - [`Component`] trait: the contract all ECS data must satisfy.
//! - [`ComponentArray`]: dense, gap-free storage for one component type.
//! - [`ComponentManager`]: type registry dispatching to the right array.
//! - [`EcsError`]: the error taxonomy shared by the whole ECS.

pub mod array;
pub mod component;
pub mod entity;
pub mod error;
pub mod manager;
pub mod signature;

pub use array::{ComponentArray, ErasedComponentArray};
pub use component::Component;
pub use entity::{Entity, EntityManager, MAX_ENTITIES};
pub use error::{EcsError, EcsResult};
pub use manager::ComponentManager;
pub use signature::{ComponentType, MAX_COMPONENTS, Signature};
