//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::output::OutputContext;

/// Fetch an agent installer over SFTP and launch a silent install
#[derive(Parser)]
#[command(
    name = "agent-provision",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output the outcome in JSON format (logs move to stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install the agent unless it is already present
    Install(commands::install::InstallArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot run at all (bad request input).
    pub async fn run(self) -> Result<i32> {
        let Cli { no_color, quiet, json, command } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(0)
            }
            Command::Install(args) => {
                init_logging(no_color, quiet, json);
                let app = AppContext::new(&OutputFlags { no_color, quiet, json });
                commands::install::run(&args, &app).await
            }
        }
    }
}

/// Install the global `tracing` subscriber for the provisioning log stream.
///
/// `RUST_LOG` wins over the default filter. In JSON mode the log goes to
/// stderr so stdout carries only the outcome document.
fn init_logging(no_color: bool, quiet: bool, json: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let writer = if json {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    let is_tty = if json {
        console::Term::stderr().is_term()
    } else {
        console::Term::stdout().is_term()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(OutputContext::use_colors(no_color, is_tty))
        .with_writer(writer)
        .init();
}
