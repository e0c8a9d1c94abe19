//! The seam between the generator and whatever draws its output.

use crate::cloud::ParticleCloud;
use crate::params::GalaxyParameters;

/// How overlapping points combine in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Additive,
}

impl BlendMode {
    /// Color blend state for a `wgpu` render pipeline.
    pub fn to_wgpu(self) -> wgpu::BlendState {
        match self {
            Self::Normal => wgpu::BlendState::ALPHA_BLENDING,
            Self::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// Render settings paired with each installed cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Point sprite size in world units.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    pub depth_write: bool,
    pub blending: BlendMode,
    /// Use the per-particle color buffer instead of a flat color.
    pub vertex_colors: bool,
}

impl PointsMaterial {
    pub fn for_parameters(params: &GalaxyParameters) -> Self {
        Self {
            size: params.size,
            size_attenuation: true,
            // Additive points must not occlude each other.
            depth_write: false,
            blending: BlendMode::Additive,
            vertex_colors: true,
        }
    }
}

/// A rendering collaborator that shows at most one cloud at a time.
///
/// [`GalaxyGenerator::generate_into`](crate::GalaxyGenerator::generate_into)
/// calls `detach` for the outgoing cloud before `attach` for the new one.
/// Implementations release any GPU buffers derived from the old cloud in
/// `detach` and must not keep borrowed slices beyond the `attach` call.
pub trait CloudDisplay {
    /// Drop everything derived from the currently attached cloud.
    fn detach(&mut self);

    /// Upload or otherwise take what is needed from `cloud`.
    fn attach(&mut self, cloud: &ParticleCloud, material: &PointsMaterial);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_follows_parameter_size() {
        let params = GalaxyParameters {
            size: 0.25,
            ..Default::default()
        };
        let material = PointsMaterial::for_parameters(&params);
        assert_eq!(material.size, 0.25);
        assert!(material.size_attenuation);
        assert!(!material.depth_write);
        assert!(material.vertex_colors);
        assert_eq!(material.blending, BlendMode::Additive);
    }

    #[test]
    fn test_additive_blend_adds_destination() {
        let state = BlendMode::Additive.to_wgpu();
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(state.color.operation, wgpu::BlendOperation::Add);
    }
}
