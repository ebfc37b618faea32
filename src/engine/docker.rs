//! Docker implementation of the container engine, built on bollard

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, RemoveContainerOptions,
    StartContainerOptions,
};
use bollard::image::{CreateImageOptions, ListImagesOptions};
use bollard::models::HostConfig;
use bollard::Docker;
use futures::StreamExt;
use tracing::{debug, info};

use super::{ContainerEngine, ContainerFilter, ContainerSpec, ContainerSummary, EngineInfo};
use crate::error::{Result, SandboxError};

/// Docker Engine API client
pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    /// Connect using `DOCKER_HOST` or the platform's default socket
    pub fn connect() -> Result<Self> {
        let client = Docker::connect_with_defaults()
            .map_err(|e| SandboxError::EngineUnreachable(e.to_string()))?;
        Ok(Self { client })
    }

    /// Use an existing bollard connection
    pub fn with_client(client: Docker) -> Self {
        Self { client }
    }

    /// Convert a spec into bollard's create request
    fn to_bollard_config(spec: &ContainerSpec) -> Config<String> {
        let mut exposed_ports = HashMap::new();
        let mut port_bindings = HashMap::new();

        for port in &spec.ports {
            exposed_ports.insert(port.container_port.clone(), HashMap::new());
            port_bindings.insert(
                port.container_port.clone(),
                Some(vec![bollard::models::PortBinding {
                    host_ip: Some(port.host_ip.clone()),
                    host_port: Some(port.host_port.clone()),
                }]),
            );
        }

        let host_config = HostConfig {
            port_bindings: if port_bindings.is_empty() {
                None
            } else {
                Some(port_bindings)
            },
            ..Default::default()
        };

        Config {
            image: Some(spec.image.clone()),
            cmd: if spec.command.is_empty() {
                None
            } else {
                Some(spec.command.clone())
            },
            env: Some(spec.env.clone()),
            labels: Some(spec.labels.clone()),
            exposed_ports: if exposed_ports.is_empty() {
                None
            } else {
                Some(exposed_ports)
            },
            host_config: Some(host_config),
            ..Default::default()
        }
    }

    fn to_filters(filter: &ContainerFilter) -> HashMap<String, Vec<String>> {
        let mut filters = HashMap::new();
        if !filter.labels.is_empty() {
            filters.insert("label".to_string(), filter.labels.clone());
        }
        if let Some(name) = &filter.name {
            filters.insert("name".to_string(), vec![name.clone()]);
        }
        filters
    }
}

/// Default tag for image references that carry neither tag nor digest
pub const DEFAULT_TAG: &str = "latest";

/// Qualify an image reference the way the docker CLI does
///
/// `golang` becomes `golang:latest`. Tagged and digest references are kept;
/// a registry port (`localhost:5000/img`) is not a tag.
pub fn normalize_image(reference: &str) -> String {
    if reference.contains('@') {
        return reference.to_string();
    }
    let last_component = reference.rsplit('/').next().unwrap_or(reference);
    if last_component.contains(':') {
        reference.to_string()
    } else {
        format!("{}:{}", reference, DEFAULT_TAG)
    }
}

/// Split a normalized reference into the `fromImage` and `tag` pull parameters
fn split_image(reference: &str) -> (String, String) {
    if let Some((name, digest)) = reference.split_once('@') {
        return (name.to_string(), digest.to_string());
    }
    match reference.rsplit_once(':') {
        Some((name, tag)) if !tag.contains('/') => (name.to_string(), tag.to_string()),
        _ => (reference.to_string(), DEFAULT_TAG.to_string()),
    }
}

fn engine_error(e: bollard::errors::Error) -> SandboxError {
    SandboxError::Engine(e.to_string())
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn ping(&self) -> Result<EngineInfo> {
        self.client
            .ping()
            .await
            .map_err(|e| SandboxError::EngineUnreachable(e.to_string()))?;

        let version = self
            .client
            .version()
            .await
            .map_err(|e| SandboxError::EngineUnreachable(e.to_string()))?;

        Ok(EngineInfo {
            api_version: version.api_version.unwrap_or_else(|| "unknown".to_string()),
            version: version.version.unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn image_exists(&self, reference: &str) -> Result<bool> {
        let reference = normalize_image(reference);
        debug!("Looking up image {}", reference);

        let mut filters = HashMap::new();
        filters.insert("reference".to_string(), vec![reference]);

        let images = self
            .client
            .list_images(Some(ListImagesOptions::<String> {
                filters,
                ..Default::default()
            }))
            .await
            .map_err(engine_error)?;

        Ok(!images.is_empty())
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        let reference = normalize_image(reference);
        info!("Pulling image: {}", reference);

        // An empty tag would pull every tag of the repository
        let (from_image, tag) = split_image(&reference);
        let options = CreateImageOptions {
            from_image,
            tag,
            ..Default::default()
        };

        let mut stream = self.client.create_image(Some(options), None, None);
        let mut last_status = String::new();

        while let Some(result) = stream.next().await {
            let progress = result.map_err(engine_error)?;
            if let Some(error) = progress.error {
                return Err(SandboxError::Engine(format!(
                    "failed to pull image {}: {}",
                    reference, error
                )));
            }
            if let Some(status) = progress.status {
                if status != last_status {
                    debug!("Pull status: {}", status);
                    last_status = status;
                }
            }
        }

        info!("Pulled image: {}", reference);
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        info!("Creating container: {}", spec.name);

        let options = CreateContainerOptions {
            name: spec.name.clone(),
            platform: None,
        };

        let response = self
            .client
            .create_container(Some(options), Self::to_bollard_config(spec))
            .await
            .map_err(engine_error)?;

        for warning in &response.warnings {
            debug!("Create warning for {}: {}", spec.name, warning);
        }

        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        info!("Starting container: {}", id);

        self.client
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(engine_error)
    }

    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>> {
        debug!("Listing containers with {:?}", filter);

        let options = ListContainersOptions {
            all: true,
            filters: Self::to_filters(filter),
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(engine_error)?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: c.id.unwrap_or_default(),
                names: c.names.unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                labels: c.labels.unwrap_or_default(),
                state: c.state.unwrap_or_default(),
                status: c.status.unwrap_or_default(),
                created: c.created.unwrap_or_default(),
            })
            .collect())
    }

    async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        info!("Removing container: {} (force: {})", id, force);

        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(id, Some(options))
            .await
            .map_err(engine_error)
    }
}
