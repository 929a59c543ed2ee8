//! The [`System`] trait and typed system handles.

use std::marker::PhantomData;

/// Marker trait for system types.
///
/// A system is logic that runs over every entity whose signature contains the
/// system's required signature. The ECS only tracks which entities those are;
/// the system type itself decides what to do with them.
pub trait System: 'static {
    /// A human-readable name for this system type, used in errors and logs.
    fn type_name() -> &'static str;
}

/// Typed handle returned when a system is registered.
///
/// The handle is a cheap copyable key into the [`SystemManager`] that issued
/// it, and is used to look up the system's entity set without a type lookup.
///
/// [`SystemManager`]: crate::SystemManager
pub struct SystemHandle<S> {
    index: usize,
    _marker: PhantomData<fn() -> S>,
}

impl<S: System> SystemHandle<S> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the registration index of the system.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls so `S` itself need not be `Clone`/`Debug`/`PartialEq`.
impl<S> Clone for SystemHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SystemHandle<S> {}

impl<S> PartialEq for SystemHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<S> Eq for SystemHandle<S> {}

impl<S: System> std::fmt::Debug for SystemHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemHandle")
            .field("system", &S::type_name())
            .field("index", &self.index)
            .finish()
    }
}
