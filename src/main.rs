use clap::Parser;

use kennel::config::{Args, Config};
use kennel::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_args(Args::parse())?;
    tracing::debug!(?config, "configuration loaded");

    kennel::server::serve(config).await
}
