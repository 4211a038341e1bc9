use anyhow::{Context, Result};
use std::io;
use tracing::info;

use cityscout::{CityScoutConfig, ConsolePresenter, ConsolePrompter, Session, logging};

fn main() -> Result<()> {
    let config = CityScoutConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;
    info!("cityscout {} starting", cityscout::VERSION);

    let prompter = ConsolePrompter::new(io::stdin().lock(), io::stdout());
    let presenter = ConsolePresenter::new(io::stdout(), config.output.map_dir.clone());

    let mut session = Session::from_config(&config, prompter, presenter)
        .context("Failed to set up data sources")?;

    if let Err(e) = session.run() {
        eprintln!("{}", e.user_message());
        return Err(e).context("Session ended unexpectedly");
    }
    Ok(())
}
