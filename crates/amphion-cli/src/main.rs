mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "amphion",
    about = "Resolve and rehearse AI chat dispatch for VS Code, Cursor, Windsurf and Antigravity",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .amphion/ or .git/)
    #[arg(long, global = true, env = "AMPHION_ROOT")]
    root: Option<PathBuf>,

    /// Chat dispatch config file (default: <root>/.amphion/chat-dispatch.yaml)
    #[arg(long, global = true, env = "AMPHION_DISPATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an editor application name into a chat provider
    Detect {
        /// Application name as reported by the editor, e.g. "Visual Studio Code"
        app_name: String,
    },

    /// Show the built-in chat commands and discovery patterns
    Catalog {
        /// Limit output to one provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Resolve the dispatch plan for a host snapshot without invoking anything
    Plan {
        /// Host snapshot file (YAML or JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Chat text to classify
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Run a live dispatch against a host snapshot
    Simulate {
        /// Host snapshot file (YAML or JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Chat text to deliver
        #[arg(long)]
        text: String,
    },

    /// Inspect and validate the chat dispatch config
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let config_path = root::resolve_config(&root, cli.config.as_deref());

    let result = match cli.command {
        Commands::Detect { app_name } => cmd::detect::run(&app_name, cli.json),
        Commands::Catalog { provider } => cmd::catalog::run(provider.as_deref(), cli.json),
        Commands::Plan { snapshot, text } => {
            cmd::plan::run(&root, &config_path, &snapshot, &text, cli.json)
        }
        Commands::Simulate { snapshot, text } => {
            cmd::simulate::run(&root, &config_path, &snapshot, &text, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&config_path, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
