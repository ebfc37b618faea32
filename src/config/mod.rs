//! Sandbox configuration
//!
//! Templates are parsed from YAML once at startup and never change afterwards.

pub mod loader;
mod registry;
mod template;

pub use loader::{load, load_dir, load_file, merge_dir, template_key, DEFAULT_CONFIG};
pub use registry::TemplateRegistry;
pub use template::{Messages, PortMapping, SandboxConfig, SandboxTemplate, VsCodeConfig};
