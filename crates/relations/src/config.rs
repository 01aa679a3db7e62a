//! Relation resolution configuration and builder

use serde::{Deserialize, Serialize};
use service_builder::builder;

use crate::error::{RelationError, RelationResult};

/// Configuration shared by every model type of a registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder]
pub struct RelationConfig {
    /// Separator between hops of a relation path
    #[builder(default = "'.'", getter)]
    pub path_separator: char,

    /// Suffix appended to a belongs-to name to form its foreign key
    #[builder(default = "\"_id\".to_string()", getter)]
    pub foreign_key_suffix: String,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self {
            path_separator: '.',
            foreign_key_suffix: "_id".to_string(),
        }
    }
}

impl RelationConfig {
    /// Foreign key attribute (or collection option) backing a belongs-to relation
    pub fn foreign_key_for(&self, relation: &str) -> String {
        format!("{}{}", relation, self.foreign_key_suffix)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> RelationResult<()> {
        if self.path_separator.is_alphanumeric() || self.path_separator == '_' {
            return Err(RelationError::Configuration(format!(
                "path separator '{}' would split relation names",
                self.path_separator
            )));
        }

        if self.foreign_key_suffix.is_empty() {
            return Err(RelationError::Configuration(
                "foreign key suffix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl RelationConfigBuilder {
    /// Build and validate the configuration
    pub fn build_config(self) -> RelationResult<RelationConfig> {
        let config = self
            .build()
            .map_err(|e| RelationError::Configuration(format!("{:?}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelationConfig::default();
        assert_eq!(config.path_separator, '.');
        assert_eq!(config.foreign_key_for("project"), "project_id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RelationConfigBuilder::new()
            .path_separator('/')
            .foreign_key_suffix("Id".to_string())
            .build_config()
            .expect("Failed to build config");

        assert_eq!(*config.get_path_separator(), '/');
        assert_eq!(config.foreign_key_for("owner"), "ownerId");
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = RelationConfigBuilder::new()
            .build_config()
            .expect("Failed to build config");
        assert_eq!(config, RelationConfig::default());
    }

    #[test]
    fn test_invalid_separator_rejected() {
        let result = RelationConfigBuilder::new().path_separator('_').build_config();
        assert!(matches!(result, Err(RelationError::Configuration(_))));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let config = RelationConfig {
            foreign_key_suffix: String::new(),
            ..RelationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let config: RelationConfig =
            serde_json::from_str(r#"{"path_separator": ":", "foreign_key_suffix": "_ref"}"#)
                .unwrap();
        assert_eq!(config.foreign_key_for("user"), "user_ref");
        assert_eq!(config.path_separator, ':');
    }
}
