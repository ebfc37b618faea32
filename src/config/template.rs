//! Sandbox template definitions
//!
//! A template describes everything needed to start one sandbox: the image,
//! the init command, environment, port mappings and the message printed once
//! the container is running.

use std::collections::BTreeMap;
use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{Result, SandboxError};

/// A named, reusable sandbox definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Command the container starts with, one argument per entry
    #[serde(default)]
    pub init_command: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vscode_config: Option<VsCodeConfig>,
    /// Environment in `KEY=VALUE` form
    #[serde(default)]
    pub environment: Vec<String>,
    #[serde(default)]
    pub ports: Vec<PortMapping>,
    #[serde(default)]
    pub messages: Messages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VsCodeConfig {
    #[serde(default)]
    pub application_folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    #[serde(default)]
    pub post_start: String,
}

/// Container port published on a host port
///
/// Both sides are kept as written in the config, so `"3000"`, `"3000/udp"`
/// and a bare YAML integer are all accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(deserialize_with = "port_value")]
    pub container_port: String,
    #[serde(deserialize_with = "port_value")]
    pub host_port: String,
}

impl SandboxTemplate {
    /// Check the fields a sandbox cannot start without
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SandboxError::ConfigParse(
                "sandbox name cannot be empty".to_string(),
            ));
        }
        if self.image.trim().is_empty() {
            return Err(SandboxError::ConfigParse(format!(
                "sandbox image cannot be empty (template '{}')",
                self.name
            )));
        }
        Ok(())
    }

    /// Folder VS Code opens inside the container
    pub fn application_folder(&self) -> &str {
        match &self.vscode_config {
            Some(cfg) if !cfg.application_folder.trim().is_empty() => &cfg.application_folder,
            _ => "/",
        }
    }
}

/// Mapping from template key to template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default)]
    pub templates: BTreeMap<String, SandboxTemplate>,
}

fn port_value<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct PortVisitor;

    impl<'de> de::Visitor<'de> for PortVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a port number or a port string such as \"3000/tcp\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            if v < 0 {
                return Err(E::custom(format!("port cannot be negative: {}", v)));
            }
            Ok(v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.trim().to_string())
        }
    }

    deserializer.deserialize_any(PortVisitor)
}
