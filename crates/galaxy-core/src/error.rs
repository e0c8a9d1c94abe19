//! Errors raised while validating parameters or building a particle cloud.

use std::collections::TryReserveError;

/// Errors that can occur during galaxy generation.
///
/// Both variants are raised before the generator's installed cloud is touched,
/// so a failed call leaves the previously generated cloud in place.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    /// A parameter is outside the domain the generator accepts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name as it appears in [`GalaxyParameters`](crate::GalaxyParameters).
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// Storage for the position/color buffers could not be reserved.
    #[error("failed to allocate buffers for {count} particles: {source}")]
    AllocationFailure {
        /// Particle count that was requested.
        count: usize,
        #[source]
        source: TryReserveError,
    },
}

impl GalaxyError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
