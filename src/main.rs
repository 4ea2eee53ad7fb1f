use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

mod build;
mod commands;
mod config;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: TrombaCommand,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in (defaults to the current directory)
    path: Option<PathBuf>,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The project directory containing tromba.toml (defaults to the current directory)
    path: Option<PathBuf>,

    /// Exit with an error if any page failed to render
    #[arg(long, default_value = "false")]
    deny_warnings: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The project directory containing tromba.toml (defaults to the current directory)
    path: Option<PathBuf>,

    /// Print what would be deleted without deleting it
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum TrombaCommand {
    /// Initialize a new project
    Init(InitArgs),

    /// Build the site into the output directory
    Build(BuildArgs),

    /// Delete the output directory
    Clean(CleanArgs),
}

/// Initialize tracing based on CLI flags.
fn init_tracing(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match (args.quiet, args.verbose) {
        (true, _) => "tromba=warn",
        (false, 0) => "tromba=info",
        (false, 1) => "tromba=debug",
        (false, _) => "tromba=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(&args);

    match args.command {
        TrombaCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        TrombaCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        TrombaCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
