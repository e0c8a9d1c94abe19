//! Headless galaxy generator.
//!
//! Loads `config.ron`, applies CLI overrides and builds one galaxy. With
//! `--watch true` (or `watch.enabled` in the config) it keeps running and
//! rebuilds the galaxy every time the file is saved with new values.
//!
//! Run with `cargo run -p galaxy-app -- --count 50000 --branches 5`.

mod display;
mod session;

use std::time::Duration;

use clap::Parser;
use galaxy_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

use crate::session::{PollOutcome, Session};

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let file_config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });

    let mut startup = file_config.clone();
    startup.apply_cli_overrides(&args);
    let log_dir = config_dir.join("logs");
    galaxy_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&startup));

    info!("Using config directory {}", config_dir.display());

    let mut session = Session::new(config_dir, file_config, args);
    if let Err(e) = session.regenerate() {
        error!("Initial generation failed: {e}");
        if !session.config().watch.enabled {
            std::process::exit(1);
        }
    }

    if !session.config().watch.enabled {
        return;
    }

    info!(
        interval_ms = session.config().watch.poll_interval_ms,
        "Watching config for changes"
    );
    loop {
        std::thread::sleep(Duration::from_millis(
            session.config().watch.poll_interval_ms.max(1),
        ));
        if let PollOutcome::Regenerated(count) = session.poll() {
            info!(
                count,
                generation = session.generator().generation(),
                uploads = session.display().uploads(),
                detaches = session.display().detaches(),
                vertices = session.display().vertex_count(),
                "Galaxy rebuilt"
            );
        }
        if !session.config().watch.enabled {
            info!("Watching disabled in config, exiting");
            break;
        }
    }
}
