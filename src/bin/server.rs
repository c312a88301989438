use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::configuration::Settings;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, overriding ./trivia.{toml,yaml,json}
    #[clap(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let pool = db::establish_connection(&settings.database)
        .await
        .with_context(|| {
            format!(
                "Cannot open database {}",
                settings.database.path.display()
            )
        })?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(pool, &settings.application, settings.quiz.order).await
}
