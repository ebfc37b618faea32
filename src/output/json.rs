//! JSON output formatting

use serde_json::{json, Value};

use crate::config::TemplateRegistry;
use crate::container::SandboxInfo;

pub fn format_sandboxes(sandboxes: &[SandboxInfo]) -> String {
    let data = serde_json::to_value(sandboxes).unwrap_or(json!([]));
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "[]".to_string())
}

pub fn format_templates(registry: &TemplateRegistry) -> String {
    let items: Vec<Value> = registry
        .iter()
        .map(|(key, template)| {
            json!({
                "key": key,
                "name": template.name,
                "image": template.image,
                "description": template.description,
                "ports": template.ports,
            })
        })
        .collect();

    serde_json::to_string_pretty(&Value::Array(items)).unwrap_or_else(|_| "[]".to_string())
}
