//! Sandbox containers
//!
//! Sandboxes are ordinary engine containers recognised by their labels:
//! - naming and labelling conventions live in `naming`
//! - the orchestrating `SandboxManager` drives the engine
//! - `editor` opens VS Code attached to a running sandbox

pub mod editor;
mod manager;
pub mod naming;
mod types;

pub use editor::{EditorLaunch, VsCode};
pub use manager::{port_bindings, render_post_start, SandboxManager, HOST_IP};
pub use naming::SandboxName;
pub use types::{RunOptions, RunOutcome, SandboxInfo};
