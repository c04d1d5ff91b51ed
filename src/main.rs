//! # Thermal Typer CLI
//!
//! Turn a receipt printer into a typewriter.
//!
//! ## Usage
//!
//! ```bash
//! # Web page on :5000 plus a prompt in this terminal
//! thermal-typer
//!
//! # Only the web page
//! thermal-typer serve
//!
//! # Only the prompt
//! thermal-typer repl
//!
//! # One-off print (same parsing as the prompt: "cut", "!time", ...)
//! thermal-typer print Hello there
//!
//! # Print pre-formatted text without wrapping
//! thermal-typer print --raw "  x   y"
//!
//! # List shortcuts
//! thermal-typer shortcuts --config ~/typer.toml
//! ```

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use thermal_typer::{
    Dispatcher, Printer, TyperError, cli,
    config::AppConfig,
    dispatch, server,
    shortcuts::{ShortcutRegistry, SystemClock},
    transport::UsbConnector,
};

const DEFAULT_CONFIG: &str = "config.toml";

/// Thermal Typer - type on a receipt printer
#[derive(Parser, Debug)]
#[command(name = "thermal-typer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (missing default file means built-in defaults)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Web page in the background, prompt in the foreground (default)
    Run,

    /// Serve the web page only
    Serve,

    /// Prompt only
    Repl,

    /// Dispatch one line of text and exit
    Print {
        /// Words to print, joined with spaces
        #[arg(required = true)]
        text: Vec<String>,

        /// Keep spacing as-is instead of word-wrapping
        #[arg(long)]
        raw: bool,
    },

    /// List shortcut keywords
    Shortcuts,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TyperError> {
    let cli = Cli::parse();

    let (config, found) = match &cli.config {
        Some(path) => (AppConfig::load(path)?, true),
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG))?,
    };

    init_logging(&config.logging.level);
    if !found {
        warn!("{} not found, using defaults", DEFAULT_CONFIG);
    }

    let printer = Arc::new(Printer::new(config.printer, UsbConnector::new()));
    let registry = Arc::new(ShortcutRegistry::builtin_with_extras(
        Arc::new(SystemClock),
        &config.shortcuts,
    ));
    let dispatcher = Dispatcher::new(printer, registry);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let runtime = tokio::runtime::Runtime::new()?;
            let web = config.web.clone();
            let background = dispatcher.clone();
            runtime.spawn(async move {
                if let Err(e) = server::serve(web, background).await {
                    error!(error = %e, "Web server stopped");
                }
            });

            cli::run_line_mode(&dispatcher, io::stdin().lock(), io::stdout())?;
            runtime.shutdown_background();
        }

        Commands::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config.web, dispatcher))?;
        }

        Commands::Repl => {
            cli::run_line_mode(&dispatcher, io::stdin().lock(), io::stdout())?;
        }

        Commands::Print { text, raw } => {
            let text = text.join(" ");
            if raw {
                dispatcher.printer().print_text(&text, true)?;
                info!("Printed raw text");
                return Ok(());
            }

            let result = dispatcher.dispatch(&text);
            if result.error {
                eprintln!("{}", result.message);
                std::process::exit(1);
            }
            if !result.message.is_empty() {
                println!("{}", result.message);
            }
        }

        Commands::Shortcuts => {
            println!("{}", dispatch::help_text(dispatcher.registry()));
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the config file's level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
