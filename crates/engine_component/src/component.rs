//! Core [`Component`] trait.
//!
//! Every piece of data stored in the ECS must implement [`Component`]. A
//! component is a plain data record; the ECS never looks inside it. Values
//! that refer to externally loaded resources (meshes, textures) hold opaque
//! handles that only their owners interpret.

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use engine_component::Component;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: 'static {
    /// A human-readable name for this component type, used in errors and logs.
    fn type_name() -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }
    }

    fn name_of<T: Component>() -> &'static str {
        T::type_name()
    }

    #[test]
    fn test_type_name_through_generic() {
        assert_eq!(name_of::<Health>(), "Health");
    }
}
