use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "phasegate")]
#[command(version, about = "Gated workflow orchestrator")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to the workflow file. If not provided, will search
    /// .phasegate/ and then *workflow*.{json,yaml} in the project directory
    #[arg(long, global = true)]
    pub workflow_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute the workflow from the first phase
    Run {
        /// Initial input as key=value; value is parsed as JSON, falling
        /// back to a plain string (repeatable)
        #[arg(short, long = "input")]
        input: Vec<String>,

        /// JSON file with an object of initial inputs
        #[arg(long)]
        inputs_file: Option<PathBuf>,
    },
    /// List the workflow's phases in execution order
    List,
    /// Validate the workflow configuration without running it
    Validate,
    /// Show the most recent run recorded in the state log
    Status,
    /// Clear the run state log
    Reset {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Run { input, inputs_file } => {
            cmd::cmd_run(&cli, project_dir, input, inputs_file.as_deref()).await?;
        }
        Commands::List => cmd::cmd_list(&cli, &project_dir)?,
        Commands::Validate => cmd::cmd_validate(&cli, &project_dir)?,
        Commands::Status => cmd::cmd_status(&cli, &project_dir)?,
        Commands::Reset { force } => cmd::cmd_reset(&cli, &project_dir, *force)?,
    }

    Ok(())
}
