use anyhow::Context;
use clap::Parser;

use plantcare_app_lib::cli::{self, Cli};
use plantcare_app_lib::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    let state = plantcare_app_lib::bootstrap(&config).context("failed to start")?;
    cli::run(cli, &state).await
}
