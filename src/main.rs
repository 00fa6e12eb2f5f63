use anyhow::Result;
use clap::Parser;
use par_connector::cli::{self, Cli};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config first so its log_level can seed the logger.
    let config = cli::load_config(cli.config.as_deref())?;
    let source = par_connector::logging::init(cli.log_level, config.log_level);
    log::debug!("Log filter taken from {source:?}");

    log::info!("Starting par-connector {}", par_connector::VERSION);

    let runtime = Runtime::new()?;
    let result = runtime.block_on(cli::run(cli.command, &config));

    if let Err(ref e) = result {
        eprintln!("par-connector: error: {e:#}");
    }
    result
}
