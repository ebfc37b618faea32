//! dev-sandbox - run predefined development sandboxes in Docker
//!
//! Templates loaded from YAML describe an image, its init command, ports,
//! environment and a post-start message. Each run creates a uniquely named,
//! labelled container; the labels are how `list`, `purge` and `delete` find
//! the sandboxes again.
//!
//! # Example
//!
//! ```no_run
//! use dev_sandbox::{DockerEngine, Printer, RunOptions, SandboxConfig, SandboxManager, Theme, TemplateRegistry, DEFAULT_CONFIG};
//!
//! # async fn example() -> dev_sandbox::Result<()> {
//! let registry = TemplateRegistry::new(SandboxConfig::from_yaml(DEFAULT_CONFIG)?);
//! let engine = DockerEngine::connect()?;
//! let mut manager = SandboxManager::new(engine, registry, Printer::stdout(Theme::default()));
//! let outcome = manager.run("golang", RunOptions::default()).await?;
//! println!("started {}", outcome.container_name);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod doctor;
pub mod engine;
pub mod error;
pub mod message;
pub mod output;

pub use config::{SandboxConfig, SandboxTemplate, TemplateRegistry, DEFAULT_CONFIG};
pub use container::{RunOptions, RunOutcome, SandboxInfo, SandboxManager, SandboxName};
pub use engine::{ContainerEngine, DockerEngine};
pub use error::{Result, SandboxError};
pub use output::{format_sandboxes, format_templates, OutputFormat, Printer, Theme};
