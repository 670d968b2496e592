use clap::Parser;
use sackboy_studio::config::{StudioConfig, setup_logging};
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = sackboy_studio::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let config = StudioConfig::from(&cli);

    if let Err(err) =
        sackboy_studio::web::setup_server(&cli.listen_address, cli.port, config).await
    {
        error!("Application error: {}", err);
    }
}
