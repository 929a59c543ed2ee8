//! Component type ids and entity signatures.
//!
//! A [`ComponentType`] is the small integer assigned to a component type when
//! it is registered. A [`Signature`] is a fixed-width bitset with one bit per
//! component type, used both for "which components does this entity have" and
//! "which components does this system require".

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

use crate::error::EcsError;

/// Width of a [`Signature`], and so the largest number of component types a
/// world can register.
pub const MAX_COMPONENTS: usize = 64;

/// Small integer id of a registered component type, in `0..MAX_COMPONENTS`.
///
/// Ids are minted by component registration. Outside this crate they can
/// only be built through the range-checked [`ComponentType::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ComponentType(pub(crate) u8);

impl ComponentType {
    /// Returns the id for `index`, or `None` if it does not fit in a
    /// [`Signature`].
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < MAX_COMPONENTS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the id as an index into per-type tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    const fn bit(self) -> u64 {
        1 << self.0
    }
}

impl TryFrom<u8> for ComponentType {
    type Error = EcsError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(index)).ok_or(EcsError::ComponentTypeOutOfRange(usize::from(index)))
    }
}

impl From<ComponentType> for u8 {
    fn from(component: ComponentType) -> Self {
        component.0
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentType({})", self.0)
    }
}

/// A set of component types, stored as a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature(u64);

impl Signature {
    /// The signature with no bits set.
    pub const EMPTY: Self = Self(0);

    /// Create a signature from a raw bit mask.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw bit mask.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns a copy of this signature with `component` added.
    #[must_use]
    pub const fn with(self, component: ComponentType) -> Self {
        Self(self.0 | component.bit())
    }

    /// Returns a copy of this signature with `component` removed.
    #[must_use]
    pub const fn without(self, component: ComponentType) -> Self {
        Self(self.0 & !component.bit())
    }

    /// Set or clear the bit for `component`.
    pub fn set(&mut self, component: ComponentType, value: bool) {
        if value {
            self.0 |= component.bit();
        } else {
            self.0 &= !component.bit();
        }
    }

    /// Returns `true` if the bit for `component` is set.
    #[must_use]
    pub const fn contains(self, component: ComponentType) -> bool {
        self.0 & component.bit() != 0
    }

    /// Returns `true` if every bit of `required` is also set here.
    #[must_use]
    pub const fn matches(self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of bits set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the component types in this signature, lowest id first.
    pub fn iter(self) -> impl Iterator<Item = ComponentType> {
        (0..MAX_COMPONENTS as u8)
            .map(ComponentType)
            .filter(move |ty| self.contains(*ty))
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<ComponentType> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}
