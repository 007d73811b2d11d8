//! `aura`: run the lesson pipeline from the terminal.

mod render;
mod run;

use aura_core::config::load_config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "aura", version, about = "Turn a math topic into an animated video lesson")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline for a topic and stream its logs.
    Run(RunArgs),

    /// Print the effective settings as JSON.
    Config {
        /// Project root containing `.aura/config.toml`.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Topic of the lesson, e.g. "Chain Rule".
    pub topic: String,

    /// Use the remote task backend instead of the simulated pipeline.
    #[arg(long)]
    pub live: bool,

    /// Project root containing `.aura/config.toml`.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Skip simulated latencies and poll quickly.
    #[arg(long)]
    pub fast: bool,

    /// Print the final project and logs as JSON instead of streaming logs.
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(args).await,
        Command::Config { root } => {
            let config = load_config(&root).await?;
            match &config.source {
                Some(path) => tracing::info!(path = %path.display(), "Using config file"),
                None => tracing::info!("No config file found, using defaults"),
            }
            println!("{}", serde_json::to_string_pretty(&config.settings)?);
            Ok(())
        }
    }
}
