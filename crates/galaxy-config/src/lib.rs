//! Configuration system for the galaxy generator.
//!
//! Settings persist to disk as a RON file that doubles as the parameter editor:
//! saving a change to `config.ron` is the "finished editing" signal that
//! triggers regeneration. Supports CLI overrides via clap and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, GeneratorConfig, WatchConfig, default_config_dir,
};
pub use error::ConfigError;
