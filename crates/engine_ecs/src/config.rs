//! World configuration.

use engine_component::{MAX_COMPONENTS, MAX_ENTITIES};
use serde::{Deserialize, Serialize};

/// Errors produced while loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text was not valid JSON for this type.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    /// `max_entities` was zero.
    #[error("max_entities must be greater than zero")]
    NoEntities,

    /// `max_entities` does not fit in the entity id space.
    #[error("max_entities {0} exceeds the u32 id space")]
    EntityIdSpace(usize),

    /// `max_components` exceeds the signature width.
    #[error("max_components {requested} exceeds the signature width of {width}", width = MAX_COMPONENTS)]
    SignatureWidth {
        /// The configured value.
        requested: usize,
    },
}

/// Capacity limits of one ECS world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Size of the entity id universe.
    pub max_entities: usize,
    /// Largest number of component types that may be registered.
    pub max_components: usize,
}

impl WorldConfig {
    /// Create a config with the given limits.
    #[must_use]
    pub fn new(max_entities: usize, max_components: usize) -> Self {
        Self {
            max_entities,
            max_components,
        }
    }

    /// Override the entity limit.
    #[must_use]
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Override the component type limit.
    #[must_use]
    pub fn with_max_components(mut self, max_components: usize) -> Self {
        self.max_components = max_components;
        self
    }

    /// Parse and validate a config from JSON. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any
    /// [`validate`](Self::validate) error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the limits against what the ECS can represent.
    ///
    /// # Errors
    ///
    /// Returns the first limit that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entities == 0 {
            return Err(ConfigError::NoEntities);
        }
        if u32::try_from(self.max_entities).is_err() {
            return Err(ConfigError::EntityIdSpace(self.max_entities));
        }
        if self.max_components > MAX_COMPONENTS {
            return Err(ConfigError::SignatureWidth {
                requested: self.max_components,
            });
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            max_components: MAX_COMPONENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = WorldConfig::default();
        assert_eq!(config.max_entities, MAX_ENTITIES);
        assert_eq!(config.max_components, MAX_COMPONENTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldConfig::from_json_str(r#"{ "max_entities": 800 }"#).unwrap();
        assert_eq!(config, WorldConfig::default().with_max_entities(800));
    }

    #[test]
    fn test_rejects_out_of_range_limits() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "max_entities": 0 }"#),
            Err(ConfigError::NoEntities)
        ));
        assert!(matches!(
            WorldConfig::default().with_max_components(65).validate(),
            Err(ConfigError::SignatureWidth { requested: 65 })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            WorldConfig::from_json_str("{ max_entities: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
