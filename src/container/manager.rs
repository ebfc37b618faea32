//! Sandbox manager
//!
//! Sequences engine calls into the user-facing operations: run a template,
//! list sandboxes, purge them all, or delete one by name. Progress is written
//! through the [`Printer`]; nothing here exits the process.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::editor::{manual_attach_instructions, EditorLaunch, VsCode};
use super::naming::{SandboxName, LABEL_CONTAINER, LABEL_TEMPLATE};
use super::types::{RunOptions, RunOutcome, SandboxInfo};
use crate::config::{PortMapping, SandboxTemplate, TemplateRegistry};
use crate::engine::{ContainerEngine, ContainerFilter, ContainerSpec, PortBinding};
use crate::error::{Result, SandboxError};
use crate::message;
use crate::output::Printer;

/// Host address published ports bind to
pub const HOST_IP: &str = "127.0.0.1";

/// Field available to post-start messages
pub const FIELD_CONTAINER_NAME: &str = "ContainerName";

/// Runs sandbox operations against a container engine
pub struct SandboxManager<E: ContainerEngine> {
    engine: E,
    registry: TemplateRegistry,
    printer: Printer,
    editor: VsCode,
}

impl<E: ContainerEngine> SandboxManager<E> {
    pub fn new(engine: E, registry: TemplateRegistry, printer: Printer) -> Self {
        Self {
            engine,
            registry,
            printer,
            editor: VsCode::default(),
        }
    }

    /// Use a different editor launcher
    pub fn with_editor(mut self, editor: VsCode) -> Self {
        self.editor = editor;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Create and start a sandbox from a template
    pub async fn run(&mut self, template_key: &str, options: RunOptions) -> Result<RunOutcome> {
        let template = self.registry.get(template_key)?.clone();

        let info = self.engine.ping().await?;
        self.printer.header(&format!(
            "Docker API Version: {}\nTemplate: {}",
            info.api_version, template.name
        ))?;

        if !self.engine.image_exists(&template.image).await? {
            self.printer
                .info(&format!("Image '{}' not found locally, pulling it.", template.image))?;
            self.engine.pull_image(&template.image).await?;
        }

        let sandbox_name = SandboxName::generate(&template.name);
        let container_name = sandbox_name.name.clone();
        self.printer
            .info(&format!("Creating container '{}'.", container_name))?;

        let ports = if options.disable_ports {
            Vec::new()
        } else {
            port_bindings(&template.ports)
        };
        for port in &ports {
            self.printer.info(&format!(
                "Mapping Container Port {} to Host Port {}.",
                port.container_port, port.host_port
            ))?;
        }

        let spec = ContainerSpec {
            name: container_name.clone(),
            image: template.image.clone(),
            command: template.init_command.clone(),
            env: template.environment.clone(),
            labels: sandbox_name.labels(&template.name),
            ports,
        };
        let container_id = self.engine.create_container(&spec).await?;
        debug!("Created container {} ({})", container_name, container_id);

        self.printer
            .info(&format!("Starting Container '{}'.", container_name))?;
        if let Err(err) = self.engine.start_container(&container_id).await {
            if let Err(cleanup) = self.engine.remove_container(&container_id, true).await {
                warn!(
                    "Failed to remove container {} after start failure: {}",
                    container_name, cleanup
                );
            }
            return Err(err);
        }

        self.printer
            .success(&format!("Container '{}' started successfully.", container_name))?;

        let message = render_post_start(&template, &container_name)?;
        if !message.trim().is_empty() {
            self.printer.alert(&format!("\n{}", message))?;
        }

        if options.open_editor {
            self.open_editor(&template, &container_name)?;
        }

        Ok(RunOutcome {
            container_id,
            container_name,
            template: template.name,
            message,
        })
    }

    /// All sandboxes known to the engine
    pub async fn list(&self) -> Result<Vec<SandboxInfo>> {
        let containers = self
            .engine
            .list_containers(&ContainerFilter::default().label(LABEL_TEMPLATE))
            .await?;

        Ok(containers.iter().filter_map(SandboxInfo::from_summary).collect())
    }

    /// Force-remove every sandbox, stopping at the first failure
    pub async fn purge(&mut self) -> Result<usize> {
        let sandboxes = self.list().await?;

        let mut removed = 0;
        for sandbox in &sandboxes {
            self.printer
                .info(&format!("Deleting sandbox {}", sandbox.name))?;
            self.engine.remove_container(&sandbox.id, true).await?;
            removed += 1;
        }

        Ok(removed)
    }

    /// Force-remove the sandbox with exactly this name
    pub async fn delete(&mut self, name: &str) -> Result<SandboxInfo> {
        let name = name.trim().trim_start_matches('/');
        if name.is_empty() {
            return Err(SandboxError::Validation(
                "provide a sandbox name to delete".to_string(),
            ));
        }

        let filter = ContainerFilter::default()
            .name(format!("^/?{}$", regex::escape(name)))
            .label(LABEL_CONTAINER);
        let containers = self.engine.list_containers(&filter).await?;

        let container = match containers.as_slice() {
            [] => return Err(SandboxError::NotFound(name.to_string())),
            [single] => single,
            many => {
                return Err(SandboxError::AmbiguousMatch {
                    name: name.to_string(),
                    count: many.len(),
                })
            }
        };

        let info = SandboxInfo::from_summary(container)
            .ok_or_else(|| SandboxError::NotFound(name.to_string()))?;

        self.printer
            .info(&format!("Deleting sandbox '{}'", info.name))?;
        self.engine.remove_container(&info.id, true).await?;

        Ok(info)
    }

    fn open_editor(&mut self, template: &SandboxTemplate, container_name: &str) -> Result<()> {
        let folder = template.application_folder();
        match self.editor.open(container_name, folder)? {
            EditorLaunch::Opened { uri } => {
                debug!("Opened editor at {}", uri);
                self.printer.success("Opened VS Code attached to the sandbox.")?;
            }
            EditorLaunch::Missing { binary } => {
                for line in manual_attach_instructions(&binary, container_name, folder) {
                    self.printer.alert(&line)?;
                }
            }
        }
        Ok(())
    }
}

/// Port bindings for a template, one per mapping, in order
pub fn port_bindings(ports: &[PortMapping]) -> Vec<PortBinding> {
    ports
        .iter()
        .map(|port| PortBinding {
            container_port: normalize_port(&port.container_port),
            host_ip: HOST_IP.to_string(),
            host_port: port.host_port.clone(),
        })
        .collect()
}

/// `3000` becomes `3000/tcp`; ports with a protocol are kept as they are
fn normalize_port(port: &str) -> String {
    if port.contains('/') {
        port.to_string()
    } else {
        format!("{}/tcp", port)
    }
}

/// Render a template's post-start message for a container
pub fn render_post_start(template: &SandboxTemplate, container_name: &str) -> Result<String> {
    let data = BTreeMap::from([(FIELD_CONTAINER_NAME, container_name.to_string())]);
    message::render(&template.messages.post_start, &data)
}
