use clap::Parser;
use flatauth::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;
    tracing::debug!(
        version = flatauth::pkg_version(),
        environment = %settings.application.env_name,
        "Configuration loaded"
    );

    execute_command(&cli, settings).await
}
