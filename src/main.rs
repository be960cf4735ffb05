mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{CheckArgs, RefreshArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange an MFA code for temporary credentials
    Refresh(RefreshArgs),
    /// Check if the temporary credentials are still valid
    Check(CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    use Commands::*;
    match cli.command {
        Refresh(args) => args.main().await,
        Check(args) => args.main().await,
    }
}
