//! Galaxy shape parameters and the ranges the control panel exposes for them.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::GalaxyError;

/// Tunable shape of the generated galaxy.
///
/// Owned and mutated by whoever edits it; the generator only borrows it for the
/// duration of a [`generate`](crate::GalaxyGenerator::generate) call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyParameters {
    /// Number of particles.
    pub count: u32,
    /// Point sprite size. Display-only, not used by the generation math.
    pub size: f32,
    /// Maximum galaxy radius.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Twist per unit of radial distance, in radians.
    pub spin_angle: f32,
    /// Exposed to the editor but not consulted by the jitter formula.
    pub randomness: f32,
    /// Exponent applied to each jitter draw. Higher values pull particles onto the arms.
    pub randomness_power: f32,
    /// Color at the galactic center.
    pub inside_color: Rgb,
    /// Color at `radius`.
    pub outside_color: Rgb,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin_angle: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Rgb::GREEN,
            outside_color: Rgb::RED,
        }
    }
}

impl GalaxyParameters {
    /// Check the preconditions of generation.
    ///
    /// Runs before any buffer is allocated.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count < 1 {
            return Err(GalaxyError::invalid("count", "must be at least 1"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GalaxyError::invalid(
                "radius",
                format!("must be finite and > 0, got {}", self.radius),
            ));
        }
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !self.spin_angle.is_finite() {
            return Err(GalaxyError::invalid("spin_angle", "must be finite"));
        }
        // A negative exponent would push jitter magnitude above 1.
        if !(self.randomness_power.is_finite() && self.randomness_power >= 0.0) {
            return Err(GalaxyError::invalid(
                "randomness_power",
                format!("must be finite and >= 0, got {}", self.randomness_power),
            ));
        }
        for (name, color) in [
            ("inside_color", self.inside_color),
            ("outside_color", self.outside_color),
        ] {
            if !color.is_normalized() {
                return Err(GalaxyError::invalid(
                    name,
                    format!("channels must be within [0, 1], got {color:?}"),
                ));
            }
        }
        Ok(())
    }

    /// Clamp and step-snap every editable field, as the control panel sliders would.
    pub fn snapped_to_editor(&self) -> Self {
        Self {
            count: COUNT_RANGE.apply(self.count as f32).round() as u32,
            size: SIZE_RANGE.apply(self.size),
            radius: RADIUS_RANGE.apply(self.radius),
            branches: BRANCHES_RANGE.apply(self.branches as f32).round() as u32,
            spin_angle: SPIN_ANGLE_RANGE.apply(self.spin_angle),
            randomness: RANDOMNESS_RANGE.apply(self.randomness),
            randomness_power: RANDOMNESS_POWER_RANGE.apply(self.randomness_power),
            inside_color: self.inside_color,
            outside_color: self.outside_color,
        }
    }
}

/// Slider bounds for one numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp `value` into `[min, max]` and snap it to the nearest step counted from `min`.
    pub fn apply(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const COUNT_RANGE: ParameterRange = ParameterRange::new(100.0, 100_000.0, 100.0);
pub const SIZE_RANGE: ParameterRange = ParameterRange::new(0.01, 1.0, 0.01);
pub const RADIUS_RANGE: ParameterRange = ParameterRange::new(0.1, 10.0, 0.1);
pub const BRANCHES_RANGE: ParameterRange = ParameterRange::new(2.0, 10.0, 1.0);
pub const SPIN_ANGLE_RANGE: ParameterRange = ParameterRange::new(-5.0, 5.0, 0.1);
pub const RANDOMNESS_RANGE: ParameterRange = ParameterRange::new(0.0, 1.0, 0.1);
pub const RANDOMNESS_POWER_RANGE: ParameterRange = ParameterRange::new(1.0, 10.0, 0.1);

/// Every editable numeric field with its slider range, in control panel order.
pub const EDITOR_RANGES: [(&str, ParameterRange); 7] = [
    ("count", COUNT_RANGE),
    ("size", SIZE_RANGE),
    ("radius", RADIUS_RANGE),
    ("branches", BRANCHES_RANGE),
    ("spin_angle", SPIN_ANGLE_RANGE),
    ("randomness", RANDOMNESS_RANGE),
    ("randomness_power", RANDOMNESS_POWER_RANGE),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(params: &GalaxyParameters, field: &str) {
        match params.validate() {
            Err(GalaxyError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidParameter({field}), got {other:?}"),
        }
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(GalaxyParameters::default().validate().is_ok());
    }

    #[test]
    fn test_zero_count_rejected() {
        let params = GalaxyParameters {
            count: 0,
            ..Default::default()
        };
        assert_invalid(&params, "count");
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let params = GalaxyParameters {
                radius,
                ..Default::default()
            };
            assert_invalid(&params, "radius");
        }
    }

    #[test]
    fn test_zero_branches_rejected() {
        let params = GalaxyParameters {
            branches: 0,
            ..Default::default()
        };
        assert_invalid(&params, "branches");
    }

    #[test]
    fn test_single_branch_accepted() {
        let params = GalaxyParameters {
            branches: 1,
            count: 1,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_randomness_power_rejected() {
        let params = GalaxyParameters {
            randomness_power: -0.5,
            ..Default::default()
        };
        assert_invalid(&params, "randomness_power");
    }

    #[test]
    fn test_out_of_range_colors_rejected() {
        let params = GalaxyParameters {
            inside_color: Rgb::new(2.0, -1.0, 0.0),
            ..Default::default()
        };
        assert_invalid(&params, "inside_color");

        let params = GalaxyParameters {
            outside_color: Rgb::new(0.0, 0.0, f32::INFINITY),
            ..Default::default()
        };
        assert_invalid(&params, "outside_color");
    }

    #[test]
    fn test_randomness_is_not_validated() {
        let params = GalaxyParameters {
            randomness: 42.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_range_clamps_and_snaps() {
        assert_eq!(COUNT_RANGE.apply(0.0), 100.0);
        assert_eq!(COUNT_RANGE.apply(1_000_000.0), 100_000.0);
        assert_eq!(COUNT_RANGE.apply(1_249.0), 1_200.0);
        assert_eq!(BRANCHES_RANGE.apply(3.4), 3.0);
        assert_eq!(BRANCHES_RANGE.apply(1.0), 2.0);
        assert!((SPIN_ANGLE_RANGE.apply(-7.0) - -5.0).abs() < 1e-6);
        assert!((RADIUS_RANGE.apply(4.96) - 5.0).abs() < 1e-4);
        assert_eq!(RANDOMNESS_POWER_RANGE.apply(f32::NAN), 1.0);
    }

    #[test]
    fn test_snapped_to_editor_keeps_defaults_in_range() {
        let params = GalaxyParameters::default();
        let snapped = params.snapped_to_editor();
        assert_eq!(snapped.count, params.count);
        assert_eq!(snapped.branches, params.branches);
        assert!((snapped.radius - params.radius).abs() < 1e-4);
        assert!((snapped.randomness_power - params.randomness_power).abs() < 1e-4);
        assert_eq!(snapped.inside_color, params.inside_color);
        for (name, range) in EDITOR_RANGES {
            let value = match name {
                "count" => snapped.count as f32,
                "size" => snapped.size,
                "radius" => snapped.radius,
                "branches" => snapped.branches as f32,
                "spin_angle" => snapped.spin_angle,
                "randomness" => snapped.randomness,
                "randomness_power" => snapped.randomness_power,
                _ => unreachable!(),
            };
            assert!(range.contains(value), "{name} = {value} outside {range:?}");
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: GalaxyParameters = ron::from_str("(count: 500)").unwrap();
        assert_eq!(params.count, 500);
        assert_eq!(params.branches, 3);
        assert_eq!(params.outside_color, Rgb::RED);
    }
}
