//! Merge a folder of per-template YAML files into one sandbox config
//!
//! Every `.yaml`/`.yml` file below `--config-folder` becomes one entry under
//! `templates`, keyed by its folder (and file name when they differ). The
//! result is what `dev-sandbox` embeds as its default config.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use dev_sandbox::config::merge_dir;
use dev_sandbox::SandboxConfig;

#[derive(Parser)]
#[command(name = "config-generator")]
#[command(about = "Build the aggregate sandbox config from a folder of templates", long_about = None)]
struct Args {
    /// Path to read template files from
    #[arg(long)]
    config_folder: PathBuf,

    /// Path to write the aggregate config to
    #[arg(long)]
    config_file_out: PathBuf,

    /// Skip validating the merged templates
    #[arg(long)]
    no_validate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Sandbox config folder path: {}", args.config_folder.display());
    println!("Template out file: {}", args.config_file_out.display());

    if args.config_file_out.is_dir() {
        bail!("out file must be a file: {}", args.config_file_out.display());
    }

    let document = merge_dir(&args.config_folder)
        .with_context(|| format!("reading templates from {}", args.config_folder.display()))?;
    let yaml = serde_yaml::to_string(&document).context("encoding merged config")?;

    if !args.no_validate {
        let config = SandboxConfig::from_yaml(&yaml).context("validating merged config")?;
        println!("Merged {} template(s)", config.templates.len());
    }

    fs::write(&args.config_file_out, yaml)
        .with_context(|| format!("writing {}", args.config_file_out.display()))?;

    Ok(())
}
