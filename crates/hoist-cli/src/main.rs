mod commands;

use clap::{Parser, Subcommand};
use commands::InputArgs;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(name = "hoist", about = "Build and push container images from CI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, log in, and push (the full CI step)
    Publish(InputArgs),
    /// Build the image only
    Build(InputArgs),
    /// Log in to the registry only
    Login(InputArgs),
    /// Push an already built image
    Push(InputArgs),
    /// Print the tag that would be used for this commit
    Tag(InputArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so INPUT_* values from it are picked up.
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(dotenv = dotenv_loaded, "starting hoist");

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Publish(inputs) => commands::publish(inputs).await,
        Commands::Build(inputs) => commands::build(inputs).await,
        Commands::Login(inputs) => commands::login(inputs).await,
        Commands::Push(inputs) => commands::push(inputs).await,
        Commands::Tag(inputs) => commands::tag(inputs),
    };

    if let Err(e) = &result {
        commands::report_failure(e);
    }

    result
}
