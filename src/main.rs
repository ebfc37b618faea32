//! dev-sandbox CLI - run predefined sandbox templates in docker containers

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use dev_sandbox::cli::{Args, SubCommand};
use dev_sandbox::{
    config, doctor, format_sandboxes, format_templates, DockerEngine, OutputFormat, Printer,
    RunOptions, SandboxConfig, SandboxError, SandboxManager, TemplateRegistry, Theme,
    DEFAULT_CONFIG,
};

/// Set to `1` to abort with the full error instead of a one-line message
const PANIC_ON_ERROR: &str = "PANIC_ON_ERROR";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let theme = if args.no_color || std::env::var_os("NO_COLOR").is_some() {
        Theme::plain()
    } else {
        Theme::default()
    };

    if let Err(e) = run(args, theme).await {
        if std::env::var(PANIC_ON_ERROR).map_or(false, |v| v == "1") {
            panic!("{:?}", e);
        }
        println!("{}", theme.paint(&e.user_message(), theme.error));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let directives = log_directives(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout is reserved for user-facing output
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `-v` wins, then `RUST_LOG`, then `warn`
fn log_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

fn load_registry(args: &Args) -> dev_sandbox::Result<TemplateRegistry> {
    let config = match &args.config {
        Some(path) => {
            debug!("Loading sandbox config from {}", path.display());
            config::load(path)?
        }
        None => SandboxConfig::from_yaml(DEFAULT_CONFIG)?,
    };
    Ok(TemplateRegistry::new(config))
}

fn connect(registry: TemplateRegistry, theme: Theme) -> dev_sandbox::Result<SandboxManager<DockerEngine>> {
    let engine = DockerEngine::connect()?;
    Ok(SandboxManager::new(engine, registry, Printer::stdout(theme)))
}

async fn run(args: Args, theme: Theme) -> dev_sandbox::Result<()> {
    let output_format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match &args.command {
        SubCommand::Doctor => {
            doctor::run_doctor(&mut Printer::stdout(theme))?;
            Ok(())
        }

        SubCommand::ListTemplates => {
            let registry = load_registry(&args)?;
            println!("{}", format_templates(&registry, &output_format, &theme));
            Ok(())
        }

        SubCommand::Run {
            template,
            disable_ports,
            open_vscode,
        } => {
            let template = template
                .as_deref()
                .ok_or_else(|| SandboxError::Usage("no sandbox template specified".to_string()))?;
            let registry = load_registry(&args)?;
            // Unknown templates fail before touching the engine
            registry.get(template)?;

            let mut manager = connect(registry, theme)?;
            let options = RunOptions {
                disable_ports: *disable_ports,
                open_editor: *open_vscode,
            };
            manager.run(template, options).await?;
            Ok(())
        }

        SubCommand::List => {
            let manager = connect(load_registry(&args)?, theme)?;
            let sandboxes = manager.list().await?;
            if output_format == OutputFormat::Human {
                Printer::stdout(theme).header(&format!("Total Sandboxes: {}", sandboxes.len()))?;
            }
            println!("{}", format_sandboxes(&sandboxes, &output_format, &theme));
            Ok(())
        }

        SubCommand::Purge => {
            let mut manager = connect(load_registry(&args)?, theme)?;
            let removed = manager.purge().await?;
            Printer::stdout(theme).success(&format!("Removed {} sandbox(es).", removed))?;
            Ok(())
        }

        SubCommand::Delete { name } => {
            let name = name.as_deref().unwrap_or_default();
            if name.trim().is_empty() {
                return Err(SandboxError::Validation(
                    "provide a sandbox name to delete".to_string(),
                ));
            }
            let mut manager = connect(load_registry(&args)?, theme)?;
            let removed = manager.delete(name).await?;
            Printer::stdout(theme).success(&format!("Sandbox '{}' deleted.", removed.name))?;
            Ok(())
        }
    }
}
