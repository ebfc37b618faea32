//! Shared test helpers: an in-memory container engine and a capturing writer

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use regex::Regex;

use dev_sandbox::engine::{
    ContainerEngine, ContainerFilter, ContainerSpec, ContainerSummary, EngineInfo,
};
use dev_sandbox::{Printer, Result, SandboxConfig, SandboxError, TemplateRegistry, Theme};

pub const TEST_CONFIG: &str = r#"
templates:
  react:
    name: React App
    image: node:20
    description: React with Vite
    initCommand: ["npm", "run", "dev"]
    vscodeConfig:
      applicationFolder: /app
    environment:
      - NODE_ENV=development
    ports:
      - containerPort: "5173"
        hostPort: "5173"
      - containerPort: "9229"
        hostPort: "19229"
    messages:
      postStart: "Attach with: docker exec -it {{.ContainerName}} sh"
  golang:
    name: Golang
    image: golang:1.22
    initCommand: ["sleep", "infinity"]
  broken-message:
    name: Broken
    image: alpine
    messages:
      postStart: "Hello {{.ContainerName"
"#;

pub fn registry() -> TemplateRegistry {
    TemplateRegistry::new(SandboxConfig::from_yaml(TEST_CONFIG).unwrap())
}

/// Everything the fake engine saw and holds
#[derive(Debug, Default)]
pub struct EngineState {
    pub containers: Vec<ContainerSummary>,
    pub images: Vec<String>,
    pub pings: usize,
    pub pulled: Vec<String>,
    pub created: Vec<ContainerSpec>,
    pub started: Vec<String>,
    pub removed: Vec<(String, bool)>,
    pub list_filters: Vec<ContainerFilter>,
    pub unreachable: bool,
    pub fail_start: bool,
    pub fail_remove: Vec<String>,
    next_id: usize,
}

/// In-memory engine that records every call
#[derive(Debug, Default)]
pub struct FakeEngine {
    state: Mutex<EngineState>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_images(images: &[&str]) -> Self {
        let engine = Self::new();
        engine.state().images = images.iter().map(|i| i.to_string()).collect();
        engine
    }

    pub fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }

    pub fn add_container(&self, id: &str, name: &str, labels: &[(&str, &str)]) {
        self.state().containers.push(ContainerSummary {
            id: id.to_string(),
            names: vec![format!("/{}", name)],
            image: "alpine".to_string(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            state: "running".to_string(),
            status: "Up 1 minute".to_string(),
            created: 1_700_000_000,
        });
    }

    /// Engine calls that change state, in order
    pub fn mutations(&self) -> usize {
        let state = self.state();
        state.created.len() + state.started.len() + state.removed.len() + state.pulled.len()
    }
}

fn filter_matches(filter: &ContainerFilter, container: &ContainerSummary) -> bool {
    let labels_ok = filter.labels.iter().all(|label| match label.split_once('=') {
        Some((key, value)) => container.labels.get(key).map(|v| v == value).unwrap_or(false),
        None => container.labels.contains_key(label),
    });

    let name_ok = match &filter.name {
        Some(pattern) => {
            let re = Regex::new(pattern).unwrap();
            container.names.iter().any(|n| re.is_match(n))
        }
        None => true,
    };

    labels_ok && name_ok
}

#[async_trait]
impl ContainerEngine for FakeEngine {
    async fn ping(&self) -> Result<EngineInfo> {
        let mut state = self.state();
        state.pings += 1;
        if state.unreachable {
            return Err(SandboxError::EngineUnreachable(
                "Cannot connect to the Docker daemon".to_string(),
            ));
        }
        Ok(EngineInfo {
            api_version: "1.45".to_string(),
            version: "26.1.0".to_string(),
        })
    }

    async fn image_exists(&self, reference: &str) -> Result<bool> {
        Ok(self.state().images.iter().any(|i| i == reference))
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        let mut state = self.state();
        state.pulled.push(reference.to_string());
        state.images.push(reference.to_string());
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        let mut state = self.state();
        state.next_id += 1;
        let id = format!("container-{}", state.next_id);
        state.created.push(spec.clone());
        state.containers.push(ContainerSummary {
            id: id.clone(),
            names: vec![format!("/{}", spec.name)],
            image: spec.image.clone(),
            labels: spec.labels.clone(),
            state: "created".to_string(),
            status: "Created".to_string(),
            created: 1_700_000_000,
        });
        Ok(id)
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_start {
            return Err(SandboxError::Engine(
                "port is already allocated".to_string(),
            ));
        }
        state.started.push(id.to_string());
        if let Some(c) = state.containers.iter_mut().find(|c| c.id == id) {
            c.state = "running".to_string();
        }
        Ok(())
    }

    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>> {
        let mut state = self.state();
        state.list_filters.push(filter.clone());
        Ok(state
            .containers
            .iter()
            .filter(|c| filter_matches(filter, c))
            .cloned()
            .collect())
    }

    async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        let mut state = self.state();
        if state.fail_remove.iter().any(|f| f == id) {
            return Err(SandboxError::Engine(format!(
                "removal of container {} is already in progress",
                id
            )));
        }
        state.removed.push((id.to_string(), force));
        state.containers.retain(|c| c.id != id);
        Ok(())
    }
}

/// Writer whose contents can be read back after the printer is gone
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn printer() -> (Printer, SharedBuffer) {
    let buffer = SharedBuffer::default();
    (
        Printer::with_writer(Box::new(buffer.clone()), Theme::plain()),
        buffer,
    )
}
