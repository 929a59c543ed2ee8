//! Built-in component types.
//!
//! [`Transform`](engine_math::Transform) lives in `engine_math`; everything
//! else a default scene uses is defined here.

use engine_component::Component;
use engine_math::Vec3;
use serde::{Deserialize, Serialize};

/// Flat RGB color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    /// Red, green, and blue channels.
    pub rgb: Vec3,
}

impl Color {
    /// The light grey new meshes are painted with.
    pub const DEFAULT_GREY: Self = Self {
        rgb: Vec3::splat(0.7),
    };

    /// Create a new color.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            rgb: Vec3::new(r, g, b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT_GREY
    }
}

impl Component for Color {
    fn type_name() -> &'static str {
        "Color"
    }
}

/// Linear motion integrated by [`PhysicsSystem`](crate::PhysicsSystem).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RigidBody {
    /// Velocity in world units per second.
    pub velocity: Vec3,
}

impl RigidBody {
    /// A body at rest.
    pub const AT_REST: Self = Self {
        velocity: Vec3::ZERO,
    };

    /// Create a body moving with `velocity`.
    #[must_use]
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::AT_REST
    }
}

impl Component for RigidBody {
    fn type_name() -> &'static str {
        "RigidBody"
    }
}

/// Opaque id of a mesh owned by an external resource loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

impl MeshHandle {
    /// The unit cube every loader provides.
    pub const CUBE: Self = Self(0);
    /// The unit sphere every loader provides.
    pub const SPHERE: Self = Self(1);
}

/// Attaches a mesh to an entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshComponent {
    pub mesh: MeshHandle,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            mesh: MeshHandle::CUBE,
        }
    }
}

impl Component for MeshComponent {
    fn type_name() -> &'static str {
        "Mesh"
    }
}

/// Perspective camera placed in the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SceneCamera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Component for SceneCamera {
    fn type_name() -> &'static str {
        "Camera"
    }
}
