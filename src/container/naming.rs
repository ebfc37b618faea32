//! Sandbox naming and labelling conventions
//!
//! Labels are the only way to tell our containers apart from everything else
//! on the engine, so all of them live under the `dev.sandbox.` namespace.

use std::collections::HashMap;

use uuid::Uuid;

/// Prefix of every generated container name
pub const NAME_PREFIX: &str = "dev-sandbox";

/// Marks a container as created by this tool
pub const LABEL_CONTAINER: &str = "dev.sandbox.container";
/// Random suffix shared with the container name
pub const LABEL_ID: &str = "dev.sandbox.id";
/// Display name of the template the sandbox was created from
pub const LABEL_TEMPLATE: &str = "dev.sandbox.template";

const SUFFIX_LEN: usize = 6;

/// Generated identity of a new sandbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxName {
    pub name: String,
    pub suffix: String,
}

impl SandboxName {
    /// Generate a fresh name for a template: `dev-sandbox-<name>-<suffix>`
    ///
    /// Spaces in the template name become underscores; the suffix is six
    /// lowercase hex characters.
    pub fn generate(template_name: &str) -> Self {
        let suffix = random_suffix();
        Self::with_suffix(template_name, suffix)
    }

    pub fn with_suffix(template_name: &str, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        let name = format!(
            "{}-{}-{}",
            NAME_PREFIX,
            template_name.replace(' ', "_"),
            suffix
        );
        Self { name, suffix }
    }

    /// Labels attached to the container at creation
    pub fn labels(&self, template_name: &str) -> HashMap<String, String> {
        HashMap::from([
            (LABEL_CONTAINER.to_string(), "true".to_string()),
            (LABEL_ID.to_string(), self.suffix.clone()),
            (LABEL_TEMPLATE.to_string(), template_name.to_string()),
        ])
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string()
}

/// A container counts as a sandbox only when it carries the template label
pub fn is_sandbox(labels: &HashMap<String, String>) -> bool {
    labels.contains_key(LABEL_TEMPLATE)
}
