//! # engine_system
//!
//! The "S" in ECS. This crate keeps one record per registered system type:
//! the system's required [`Signature`](engine_component::Signature) and the
//! set of entities that currently satisfy it.
//!
//! Systems are registered once at startup. After that, the coordinator calls
//! [`SystemManager::entity_signature_changed`] on every component add or
//! remove and [`SystemManager::entity_destroyed`] on every destroy, so each
//! system's entity set always reflects the current signatures.

pub mod manager;
pub mod system;

pub use manager::{SystemManager, SystemRecord};
pub use system::{System, SystemHandle};
