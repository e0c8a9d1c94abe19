//! Spiral galaxy point cloud generation.
//!
//! Each particle is placed on one of `branches` evenly spaced arms at a
//! uniformly random distance from the center, twisted by `spin_angle` per unit
//! of distance, then displaced by an independent signed jitter on every axis.
//! Radial sampling is uniform in distance, not area, so the core is denser
//! than the rim.

use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cloud::ParticleCloud;
use crate::display::{CloudDisplay, PointsMaterial};
use crate::error::GalaxyError;
use crate::params::GalaxyParameters;

/// What a generator currently holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GeneratorState {
    /// Nothing generated yet, or cleared.
    #[default]
    Empty,
    /// Holds exactly one cloud.
    Populated(ParticleCloud),
}

impl GeneratorState {
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }

    pub fn cloud(&self) -> Option<&ParticleCloud> {
        match self {
            Self::Populated(cloud) => Some(cloud),
            Self::Empty => None,
        }
    }

    /// Move to `Populated(cloud)`, dropping any previous cloud in place.
    fn install(&mut self, cloud: ParticleCloud) -> &ParticleCloud {
        *self = Self::Populated(cloud);
        match self {
            Self::Populated(cloud) => cloud,
            Self::Empty => unreachable!("state was populated on the line above"),
        }
    }

    fn take(&mut self) -> Option<ParticleCloud> {
        match std::mem::take(self) {
            Self::Populated(cloud) => Some(cloud),
            Self::Empty => None,
        }
    }
}

/// A single sampled particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Owns the current particle cloud and rebuilds it on demand.
///
/// The random source is a type parameter so tests can drive the generator
/// with a seeded or fixed-output RNG.
pub struct GalaxyGenerator<R = ChaCha8Rng> {
    rng: R,
    state: GeneratorState,
    generation: u64,
}

impl GalaxyGenerator<ChaCha8Rng> {
    /// Create a generator seeded from the thread-local entropy source.
    pub fn new() -> Self {
        Self::with_rng(entropy_rng())
    }

    /// Create a generator whose output sequence is fixed by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the random sequence from `seed`, or from entropy when `None`.
    ///
    /// The installed cloud and the generation count are kept.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => entropy_rng(),
        };
        self.reseed(rng);
    }
}

impl Default for GalaxyGenerator<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GalaxyGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            state: GeneratorState::Empty,
            generation: 0,
        }
    }

    /// Replace the random source without touching the installed cloud.
    pub fn reseed(&mut self, rng: R) {
        self.rng = rng;
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn is_populated(&self) -> bool {
        self.state.is_populated()
    }

    /// The installed cloud, if any.
    pub fn cloud(&self) -> Option<&ParticleCloud> {
        self.state.cloud()
    }

    /// Number of successful `generate` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Build a fresh cloud from `params` and install it, releasing the previous one.
    ///
    /// On error the previously installed cloud (if any) is left untouched.
    pub fn generate(&mut self, params: &GalaxyParameters) -> Result<&ParticleCloud, GalaxyError> {
        let cloud = build_cloud(&mut self.rng, params)?;
        Ok(self.install(cloud))
    }

    /// Like [`generate`](Self::generate), and also swaps the cloud shown by `display`.
    ///
    /// `display.detach()` runs only if a cloud was installed before, and only
    /// once the replacement has been built successfully.
    pub fn generate_into<D>(
        &mut self,
        params: &GalaxyParameters,
        display: &mut D,
    ) -> Result<&ParticleCloud, GalaxyError>
    where
        D: CloudDisplay + ?Sized,
    {
        let cloud = build_cloud(&mut self.rng, params)?;
        if self.state.is_populated() {
            display.detach();
        }
        let material = PointsMaterial::for_parameters(params);
        let cloud = self.install(cloud);
        display.attach(cloud, &material);
        Ok(cloud)
    }

    /// Release the installed cloud and return to [`GeneratorState::Empty`].
    pub fn clear(&mut self) -> Option<ParticleCloud> {
        self.state.take()
    }

    fn install(&mut self, cloud: ParticleCloud) -> &ParticleCloud {
        if let GeneratorState::Populated(previous) = &self.state {
            tracing::debug!(
                generation = self.generation,
                particles = previous.len(),
                "Releasing previous galaxy"
            );
        }
        self.generation += 1;
        self.state.install(cloud)
    }
}

fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_rng(&mut rand::rng())
}

/// Validate `params`, reserve both buffers, and fill them.
fn build_cloud<R: Rng + ?Sized>(
    rng: &mut R,
    params: &GalaxyParameters,
) -> Result<ParticleCloud, GalaxyError> {
    params.validate()?;

    let start = Instant::now();
    let count = params.count as usize;
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[f32; 3]> = Vec::new();
    positions
        .try_reserve_exact(count)
        .map_err(|source| GalaxyError::AllocationFailure { count, source })?;
    colors
        .try_reserve_exact(count)
        .map_err(|source| GalaxyError::AllocationFailure { count, source })?;

    for i in 0..count {
        let particle = sample_particle(rng, i, params);
        positions.push(particle.position);
        colors.push(particle.color);
    }

    tracing::info!(
        count,
        branches = params.branches,
        radius = params.radius,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Generated galaxy"
    );

    Ok(ParticleCloud::from_buffers(positions, colors))
}

/// Angle of the arm that particle `index` belongs to, in radians.
///
/// Assignment is by index, not by random draw: `branch_angle(i) == branch_angle(i + branches)`.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1) as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

/// Sample one particle.
///
/// Draws one value for the radius, then a magnitude and a sign for each of x, y and z.
pub fn sample_particle<R: Rng + ?Sized>(
    rng: &mut R,
    index: usize,
    params: &GalaxyParameters,
) -> Particle {
    let radius = rng.random::<f32>() * params.radius;
    let spin = radius * params.spin_angle;
    let angle = branch_angle(index, params.branches) + spin;

    let jitter = Vec3::new(
        signed_jitter(rng, params.randomness_power),
        signed_jitter(rng, params.randomness_power),
        signed_jitter(rng, params.randomness_power),
    );

    // Flat disk; height comes from jitter alone.
    let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius) + jitter;

    let t = (radius / params.radius).clamp(0.0, 1.0);
    let color = params.inside_color.lerp(params.outside_color, t);

    Particle {
        position: position.to_array(),
        color: color.to_array(),
    }
}

/// `±u^power` for uniform `u` in [0, 1); the magnitude never exceeds 1.
fn signed_jitter<R: Rng + ?Sized>(rng: &mut R, power: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power);
    let sign = if rng.random::<f32>() < 0.5 { 1.0 } else { -1.0 };
    sign * magnitude
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
