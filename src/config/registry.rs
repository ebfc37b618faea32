//! Template registry
//!
//! Holds the loaded config for the lifetime of the process and resolves
//! template keys given on the command line.

use super::template::{SandboxConfig, SandboxTemplate};
use crate::error::{Result, SandboxError};

/// Read-only lookup over the loaded templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    config: SandboxConfig,
}

impl TemplateRegistry {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// Get a template by key
    pub fn get(&self, key: &str) -> Result<&SandboxTemplate> {
        self.config
            .templates
            .get(key)
            .ok_or_else(|| SandboxError::TemplateNotFound(key.to_string()))
    }

    /// Iterate templates in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SandboxTemplate)> {
        self.config.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.config.templates.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.config.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.templates.is_empty()
    }
}

impl From<SandboxConfig> for TemplateRegistry {
    fn from(config: SandboxConfig) -> Self {
        Self::new(config)
    }
}
