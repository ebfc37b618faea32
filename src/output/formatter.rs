//! Output formatting

use crate::config::TemplateRegistry;
use crate::container::SandboxInfo;
use crate::output::console::Theme;
use crate::output::{human, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

pub fn format_sandboxes(sandboxes: &[SandboxInfo], format: &OutputFormat, theme: &Theme) -> String {
    match format {
        OutputFormat::Human => human::format_sandboxes(sandboxes, theme),
        OutputFormat::Json => json::format_sandboxes(sandboxes),
    }
}

pub fn format_templates(registry: &TemplateRegistry, format: &OutputFormat, theme: &Theme) -> String {
    match format {
        OutputFormat::Human => human::format_templates(registry, theme),
        OutputFormat::Json => json::format_templates(registry),
    }
}
