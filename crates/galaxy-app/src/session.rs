//! Ties the config file, the generator and the display together.

use std::path::PathBuf;

use galaxy_config::{CliArgs, Config};
use galaxy_core::{GalaxyError, GalaxyGenerator};
use tracing::{error, info, warn};

use crate::display::LoggingDisplay;

/// Result of one [`Session::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// File content matches what was last applied.
    Unchanged,
    /// A new cloud with this many particles is installed.
    Regenerated(usize),
    /// The new parameters were rejected; the previous cloud stays installed.
    Rejected,
    /// The file could not be read or parsed; nothing changed.
    ReloadFailed,
}

/// A running generator driven by `config.ron`.
pub struct Session {
    config_dir: PathBuf,
    overrides: CliArgs,
    /// Config as last read from disk, before CLI overrides.
    file_config: Config,
    /// `file_config` with CLI overrides applied.
    config: Config,
    generator: GalaxyGenerator,
    display: LoggingDisplay,
}

impl Session {
    pub fn new(config_dir: PathBuf, file_config: Config, overrides: CliArgs) -> Self {
        let config = with_overrides(&file_config, &overrides);
        let generator = make_generator(config.generator.seed);
        let display = LoggingDisplay::new(config.debug.log_stats);
        Self {
            config_dir,
            overrides,
            file_config,
            config,
            generator,
            display,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn generator(&self) -> &GalaxyGenerator {
        &self.generator
    }

    pub fn display(&self) -> &LoggingDisplay {
        &self.display
    }

    /// Generate from the current config and hand the cloud to the display.
    pub fn regenerate(&mut self) -> Result<usize, GalaxyError> {
        let params = self.config.effective_parameters();
        self.display.set_branches(params.branches);
        self.display.set_log_stats(self.config.debug.log_stats);
        let cloud = self.generator.generate_into(&params, &mut self.display)?;
        Ok(cloud.len())
    }

    /// Check the config file once and regenerate if it changed.
    pub fn poll(&mut self) -> PollOutcome {
        let reloaded = match self.file_config.reload(&self.config_dir) {
            Ok(Some(config)) => config,
            Ok(None) => return PollOutcome::Unchanged,
            Err(e) => {
                warn!("Ignoring config change: {e}");
                return PollOutcome::ReloadFailed;
            }
        };

        let config = with_overrides(&reloaded, &self.overrides);
        if config.generator.seed != self.config.generator.seed {
            info!(seed = ?config.generator.seed, "Seed changed, restarting random source");
            self.generator.set_seed(config.generator.seed);
        }
        self.file_config = reloaded;
        self.config = config;

        match self.regenerate() {
            Ok(count) => PollOutcome::Regenerated(count),
            Err(e) => {
                error!("Keeping previous galaxy: {e}");
                PollOutcome::Rejected
            }
        }
    }
}

fn with_overrides(file_config: &Config, overrides: &CliArgs) -> Config {
    let mut config = file_config.clone();
    config.apply_cli_overrides(overrides);
    config
}

fn make_generator(seed: Option<u64>) -> GalaxyGenerator {
    match seed {
        Some(seed) => GalaxyGenerator::from_seed(seed),
        None => GalaxyGenerator::new(),
    }
}
