//! Configuration loading and management

use crate::core::SortOrder;
use crate::core::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`Paginator`](crate::core::Paginator)
///
/// # Example
///
/// ```yaml
/// identifier_field: order_id
/// default_order: descending
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Field holding the unique, ordered document key (e.g., "_id")
    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,

    /// Order used when a request does not specify one
    #[serde(default)]
    pub default_order: SortOrder,
}

fn default_identifier_field() -> String {
    "_id".to_string()
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            identifier_field: default_identifier_field(),
            default_order: SortOrder::default(),
        }
    }
}

impl PaginatorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the identifier field
    pub fn with_identifier_field(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = field.into();
        self
    }

    /// Set the default order
    pub fn with_default_order(mut self, order: SortOrder) -> Self {
        self.default_order = order;
        self
    }

    /// Check that the identifier field can be used as a query key
    pub fn validate(&self) -> ConfigResult<()> {
        if self.identifier_field.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "identifier_field".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        // `$`-prefixed keys are query operators, not fields
        if self.identifier_field.starts_with('$') {
            return Err(ConfigError::InvalidValue {
                field: "identifier_field".to_string(),
                message: format!(
                    "'{}' is an operator name, not a field",
                    self.identifier_field
                ),
            });
        }

        Ok(())
    }
}
