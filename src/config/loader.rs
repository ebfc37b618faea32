//! Loading sandbox configs from YAML
//!
//! Templates come either from one aggregate document with a top-level
//! `templates` mapping, or from a folder tree holding one template per
//! `.yaml`/`.yml` file.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;
use walkdir::WalkDir;

use super::template::{SandboxConfig, SandboxTemplate};
use crate::error::{Result, SandboxError};

/// Aggregate config compiled into the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../sandbox-config.yaml");

impl SandboxConfig {
    /// Parse an aggregate document and validate every template
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: SandboxConfig =
            serde_yaml::from_str(text).map_err(|e| SandboxError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all templates, naming the offending key on failure
    pub fn validate(&self) -> Result<()> {
        for (key, template) in &self.templates {
            template.validate().map_err(|e| match e {
                SandboxError::ConfigParse(msg) => {
                    SandboxError::ConfigParse(format!("template '{}': {}", key, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Load a config from a file or from a folder of template files
pub fn load(path: &Path) -> Result<SandboxConfig> {
    if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}

/// Load a single aggregate config file
pub fn load_file(path: &Path) -> Result<SandboxConfig> {
    let text = fs::read_to_string(path)?;
    SandboxConfig::from_yaml(&text)
}

/// Load every template file below `root` into one config
pub fn load_dir(root: &Path) -> Result<SandboxConfig> {
    let mut config = SandboxConfig::default();
    for (key, path) in template_files(root)? {
        let text = fs::read_to_string(&path)?;
        let template: SandboxTemplate = serde_yaml::from_str(&text).map_err(|e| {
            SandboxError::ConfigParse(format!("{}: {}", path.display(), e))
        })?;
        debug!("Loaded template '{}' from {}", key, path.display());
        config.templates.insert(key, template);
    }
    config.validate()?;
    Ok(config)
}

/// Merge raw template files into one aggregate document
///
/// Each file is kept as written (no field validation), so the output can be
/// fed back through [`SandboxConfig::from_yaml`].
pub fn merge_dir(root: &Path) -> Result<Value> {
    let mut templates = Mapping::new();
    for (key, path) in template_files(root)? {
        let text = fs::read_to_string(&path)?;
        let value: Value = serde_yaml::from_str(&text).map_err(|e| {
            SandboxError::ConfigParse(format!("{}: {}", path.display(), e))
        })?;
        templates.insert(Value::String(key), value);
    }

    let mut document = Mapping::new();
    document.insert(Value::String("templates".to_string()), Value::Mapping(templates));
    Ok(Value::Mapping(document))
}

/// Derive the template key for a file
///
/// The key is the containing folder's name. When the file name (up to its
/// first dot) differs from the folder, it is appended:
/// `golang/golang.yaml` is `golang`, `node/express.yml` is `node-express`.
pub fn template_key(file_name: &str, path: &Path) -> String {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    let folder = path
        .parent()
        .and_then(|p| p.file_name())
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    if folder.is_empty() {
        return stem.to_string();
    }
    if stem != folder {
        format!("{}-{}", folder, stem)
    } else {
        folder
    }
}

fn template_files(root: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    if !root.is_dir() {
        return Err(SandboxError::ConfigParse(format!(
            "config folder '{}' is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SandboxError::IoError(e.into()))?;
        if !entry.file_type().is_file() || !is_yaml(entry.path()) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        files.push((template_key(&file_name, entry.path()), entry.path().to_path_buf()));
    }
    Ok(files)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
