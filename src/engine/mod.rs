//! Container engine adapter
//!
//! The orchestrator only talks to the engine through [`ContainerEngine`], so
//! the Docker implementation can be swapped for an in-memory one in tests.

pub mod docker;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub use docker::DockerEngine;

/// Engine identity reported by a successful ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    pub api_version: String,
    pub version: String,
}

/// One published port: container port to host address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    /// Container port with protocol, e.g. `3000/tcp`
    pub container_port: String,
    pub host_ip: String,
    pub host_port: String,
}

/// Everything needed to create a container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    /// `KEY=VALUE` entries
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
    /// Exposed ports and their host bindings, in template order
    pub ports: Vec<PortBinding>,
}

/// Container list filter; all conditions must match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerFilter {
    /// `key` (label present) or `key=value` entries
    pub labels: Vec<String>,
    /// Regular expression matched against container names
    pub name: Option<String>,
}

impl ContainerFilter {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }
}

/// Container as reported by a list call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSummary {
    pub id: String,
    /// Names as the engine reports them (Docker prefixes a `/`)
    pub names: Vec<String>,
    pub image: String,
    pub labels: HashMap<String, String>,
    pub state: String,
    pub status: String,
    /// Unix timestamp in seconds
    pub created: i64,
}

impl ContainerSummary {
    /// Names without the leading `/`, joined with spaces
    pub fn display_name(&self) -> String {
        self.names
            .iter()
            .map(|n| n.trim_start_matches('/'))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Operations the orchestrator needs from a container engine
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Check the engine answers; fails with `EngineUnreachable`
    async fn ping(&self) -> Result<EngineInfo>;

    /// Whether an image matching `reference` exists locally
    async fn image_exists(&self, reference: &str) -> Result<bool>;

    async fn pull_image(&self, reference: &str) -> Result<()>;

    /// Create a container and return its ID
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String>;

    async fn start_container(&self, id: &str) -> Result<()>;

    /// List containers, stopped ones included
    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>>;

    async fn remove_container(&self, id: &str, force: bool) -> Result<()>;
}
