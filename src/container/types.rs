//! Sandbox types shared by the orchestrator and the output formatters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::naming::{is_sandbox, LABEL_ID, LABEL_TEMPLATE};
use crate::engine::ContainerSummary;

/// Options for starting a sandbox
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Don't expose or publish any of the template's ports
    pub disable_ports: bool,
    /// Open VS Code attached to the container once it started
    pub open_editor: bool,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub container_id: String,
    pub container_name: String,
    pub template: String,
    /// Rendered post-start message
    pub message: String,
}

/// A sandbox as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxInfo {
    pub id: String,
    pub name: String,
    pub template: String,
    pub sandbox_id: Option<String>,
    pub image: String,
    pub state: String,
    pub status: String,
    pub created: Option<DateTime<Utc>>,
}

impl SandboxInfo {
    /// Build from an engine summary; `None` when the container isn't a sandbox
    pub fn from_summary(summary: &ContainerSummary) -> Option<Self> {
        if !is_sandbox(&summary.labels) {
            return None;
        }

        Some(Self {
            id: summary.id.clone(),
            name: summary.display_name(),
            template: summary.labels.get(LABEL_TEMPLATE).cloned().unwrap_or_default(),
            sandbox_id: summary.labels.get(LABEL_ID).cloned(),
            image: summary.image.clone(),
            state: summary.state.clone(),
            status: summary.status.clone(),
            created: DateTime::from_timestamp(summary.created, 0),
        })
    }

    /// Short engine ID as shown by `docker ps`
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(12)]
    }
}
