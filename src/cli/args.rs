//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dev-sandbox")]
#[command(author, version, about = "Run predefined sandbox templates in docker containers", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Sandbox config file, or a folder of per-template YAML files
    #[arg(long, global = true, env = "DEV_SANDBOX_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format as JSON (list and list-templates)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Run a sandbox
    #[command(visible_alias = "r")]
    Run {
        /// Template to start, see list-templates
        template: Option<String>,

        /// Don't expose any ports on the container
        #[arg(long)]
        disable_ports: bool,

        /// Open container code in VS Code
        #[arg(long = "open-vscode")]
        open_vscode: bool,
    },

    /// List all the dev sandboxes
    #[command(visible_alias = "ls")]
    List,

    /// Delete all sandboxes
    Purge,

    /// Delete a sandbox
    #[command(visible_alias = "rm")]
    Delete {
        /// Sandbox container name
        name: Option<String>,
    },

    /// List all the available templates
    #[command(visible_alias = "lst")]
    ListTemplates,

    /// Check for all requirements on your system
    Doctor,
}
