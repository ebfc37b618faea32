//! Error types for dev-sandbox

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("failed to parse sandbox config: {0}")]
    ConfigParse(String),

    #[error("sandbox template '{0}' doesn't exist")]
    TemplateNotFound(String),

    #[error("container engine is unreachable: {0}")]
    EngineUnreachable(String),

    #[error("container engine error: {0}")]
    Engine(String),

    #[error("{0}")]
    Validation(String),

    #[error("no sandbox found with name '{0}'")]
    NotFound(String),

    #[error("multiple sandboxes ({count}) found with name '{name}'")]
    AmbiguousMatch { name: String, count: usize },

    #[error("failed to render message template: {0}")]
    Render(String),

    #[error("failed to launch editor: {0}")]
    Editor(String),

    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SandboxError {
    /// Message shown to the user: first letter capitalized, ending with a period.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        let mut chars = text.chars();
        let mut message = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => return String::new(),
        };
        if !message.ends_with('.') {
            message.push('.');
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, SandboxError>;
