//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use galaxy_core::Rgb;

use crate::Config;

/// Spiral galaxy generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "galaxy", about = "Procedural spiral galaxy point cloud generator")]
pub struct CliArgs {
    /// Number of particles.
    #[arg(long)]
    pub count: Option<u32>,

    /// Point sprite size.
    #[arg(long)]
    pub size: Option<f32>,

    /// Galaxy radius.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Number of spiral arms.
    #[arg(long)]
    pub branches: Option<u32>,

    /// Spin angle per unit radius, in radians.
    #[arg(long, allow_negative_numbers = true)]
    pub spin_angle: Option<f32>,

    /// Jitter exponent.
    #[arg(long)]
    pub randomness_power: Option<f32>,

    /// Core color as #rrggbb.
    #[arg(long)]
    pub inside_color: Option<Rgb>,

    /// Rim color as #rrggbb.
    #[arg(long)]
    pub outside_color: Option<Rgb>,

    /// Fixed RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Clamp parameters to the control panel slider ranges.
    #[arg(long)]
    pub snap_to_editor: Option<bool>,

    /// Keep running and regenerate when the config file changes.
    #[arg(long)]
    pub watch: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(count) = args.count {
            self.galaxy.count = count;
        }
        if let Some(size) = args.size {
            self.galaxy.size = size;
        }
        if let Some(radius) = args.radius {
            self.galaxy.radius = radius;
        }
        if let Some(branches) = args.branches {
            self.galaxy.branches = branches;
        }
        if let Some(spin) = args.spin_angle {
            self.galaxy.spin_angle = spin;
        }
        if let Some(power) = args.randomness_power {
            self.galaxy.randomness_power = power;
        }
        if let Some(color) = args.inside_color {
            self.galaxy.inside_color = color;
        }
        if let Some(color) = args.outside_color {
            self.galaxy.outside_color = color;
        }
        if let Some(seed) = args.seed {
            self.generator.seed = Some(seed);
        }
        if let Some(snap) = args.snap_to_editor {
            self.generator.snap_to_editor = snap;
        }
        if let Some(watch) = args.watch {
            self.watch.enabled = watch;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            count: Some(5_000),
            branches: Some(6),
            inside_color: Some(Rgb::WHITE),
            seed: Some(99),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.galaxy.count, 5_000);
        assert_eq!(config.galaxy.branches, 6);
        assert_eq!(config.galaxy.inside_color, Rgb::WHITE);
        assert_eq!(config.generator.seed, Some(99));
        // Non-overridden fields retain defaults
        assert_eq!(config.galaxy.radius, 5.0);
        assert_eq!(config.galaxy.outside_color, Rgb::RED);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_colors_and_negative_spin() {
        let args = CliArgs::try_parse_from([
            "galaxy",
            "--spin-angle",
            "-2.5",
            "--outside-color",
            "#1b3984",
            "--watch",
            "true",
        ])
        .unwrap();
        assert_eq!(args.spin_angle, Some(-2.5));
        assert_eq!(args.outside_color, Rgb::from_hex("#1b3984").ok());
        assert_eq!(args.watch, Some(true));
    }

    #[test]
    fn test_cli_rejects_bad_color() {
        let result = CliArgs::try_parse_from(["galaxy", "--inside-color", "chartreuse"]);
        assert!(result.is_err());
    }
}
