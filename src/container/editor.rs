//! VS Code remote-attach launcher

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, SandboxError};

/// Default launcher binary
pub const VSCODE_BINARY: &str = "code";

const URI_SCHEME: &str = "vscode-remote";

/// Outcome of trying to open the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorLaunch {
    /// The editor was started with the given attach URI
    Opened { uri: String },
    /// The launcher is not on PATH; the user has to attach by hand
    Missing { binary: String },
}

/// Opens VS Code attached to a running container
#[derive(Debug, Clone)]
pub struct VsCode {
    binary: String,
}

impl Default for VsCode {
    fn default() -> Self {
        Self::new(VSCODE_BINARY)
    }
}

impl VsCode {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Attach URI for a container and the folder to open inside it
    ///
    /// The container name is hex encoded, which is how the Dev Containers
    /// extension expects the authority.
    pub fn attach_uri(container_name: &str, folder: &str) -> String {
        let folder = if folder.starts_with('/') {
            folder.to_string()
        } else {
            format!("/{}", folder)
        };
        format!(
            "{}://attached-container+{}{}",
            URI_SCHEME,
            hex::encode(container_name),
            folder
        )
    }

    fn locate(&self) -> Option<PathBuf> {
        which::which(&self.binary).ok()
    }

    /// Start the editor, or report that it is not installed
    pub fn open(&self, container_name: &str, folder: &str) -> Result<EditorLaunch> {
        let Some(path) = self.locate() else {
            return Ok(EditorLaunch::Missing {
                binary: self.binary.clone(),
            });
        };

        let uri = Self::attach_uri(container_name, folder);
        debug!("Launching {} --folder-uri {}", path.display(), uri);

        let status = Command::new(&path)
            .arg("--folder-uri")
            .arg(&uri)
            .status()
            .map_err(|e| SandboxError::Editor(e.to_string()))?;

        if !status.success() {
            return Err(SandboxError::Editor(format!(
                "{} exited with {}",
                self.binary, status
            )));
        }

        Ok(EditorLaunch::Opened { uri })
    }
}

/// Steps for attaching by hand when the launcher is missing
pub fn manual_attach_instructions(binary: &str, container_name: &str, folder: &str) -> Vec<String> {
    vec![
        format!(
            "VS Code launcher '{}' was not found on PATH. To attach manually:",
            binary
        ),
        "  1. Open VS Code with the Dev Containers extension installed.".to_string(),
        "  2. Run 'Dev Containers: Attach to Running Container...' from the command palette."
            .to_string(),
        format!("  3. Pick '{}' and open the folder '{}'.", container_name, folder),
    ]
}
