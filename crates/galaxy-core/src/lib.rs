//! Procedural spiral galaxy point clouds.
//!
//! A [`GalaxyGenerator`] turns a [`GalaxyParameters`] record into a
//! [`ParticleCloud`] of positions and colors ready for point sprite rendering,
//! and owns that cloud until the next regeneration replaces it.

pub mod cloud;
pub mod color;
pub mod display;
pub mod error;
pub mod generator;
pub mod params;

pub use cloud::{CloudStats, POINT_VERTEX_LAYOUT, ParticleCloud, PointVertex};
pub use color::{ParseColorError, Rgb};
pub use display::{BlendMode, CloudDisplay, PointsMaterial};
pub use error::GalaxyError;
pub use generator::{GalaxyGenerator, GeneratorState, Particle, branch_angle, sample_particle};
pub use params::{EDITOR_RANGES, GalaxyParameters, ParameterRange};
