use clap::Parser;
use retail_cli::{AppState, Cli, Config, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env();
    init_logger(Some(&config.log_level), config.log_dir.as_deref());

    let state = AppState::initialize(&config).await?;

    retail_cli::cli::run(cli, &state).await;

    Ok(())
}
