mod commands;
mod logging;
mod output;
mod terminal;

use anyhow::{Context, Result};
use callforward_core::{Config, MenuController, Pacer, RunContext, RunStamp, Session};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use terminal::ConsoleOperator;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "callforward")]
#[command(about = "Back up and bulk-configure call forwarding for a list of users", long_about = None)]
struct Cli {
    /// Directory holding the input list and receiving backups and logs [default: current directory]
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,
    /// Use this config file instead of the per-user one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store and validate service credentials
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Setup) => {
            let code = commands::run_setup(cli.config.as_deref()).await?;
            std::process::exit(code);
        }
        None => run_menu(cli.dir, cli.config).await,
    }
}

async fn run_menu(dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot resolve the run directory")?,
    };
    let config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    let ctx = RunContext::new(
        dir,
        RunStamp::now(),
        config.run.input_file.clone(),
        Pacer::new(config.throttle()),
    );
    logging::init_run_log(ctx.dir(), &ctx.log_file_name())?;
    info!("Run started in {}", ctx.dir().display());

    let session = match Session::connect(&config).await {
        Ok(session) => session,
        Err(e) => {
            error!("{:#}", e);
            return Err(e);
        }
    };

    let operator = ConsoleOperator::new(session.tenant_id());
    MenuController::new(&session, &ctx, operator).run().await?;
    Ok(())
}
