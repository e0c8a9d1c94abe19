//! The generated particle buffers and their GPU-facing views.
//!
//! ## Vertex Packing
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | color    |

use std::mem;

use bytemuck::{Pod, Zeroable};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// One generated snapshot of the galaxy.
///
/// Index `i` of [`positions`](Self::positions) and [`colors`](Self::colors)
/// describes the same particle. Both buffers always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCloud {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl ParticleCloud {
    /// Assemble a cloud from buffers filled by the generator.
    pub(crate) fn from_buffers(positions: Vec<[f32; 3]>, colors: Vec<[f32; 3]>) -> Self {
        debug_assert_eq!(positions.len(), colors.len());
        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Iterate `(position, color)` pairs in particle order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32; 3], &[f32; 3])> {
        self.positions.iter().zip(self.colors.iter())
    }

    /// Raw bytes of the position buffer, tightly packed `f32 x 3`.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the color buffer, tightly packed `f32 x 3`.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Interleave positions and colors into a single vertex stream.
    pub fn to_vertices(&self) -> Vec<PointVertex> {
        self.iter()
            .map(|(&position, &color)| PointVertex { position, color })
            .collect()
    }

    /// Summarize the cloud's shape for diagnostics.
    pub fn stats(&self, branches: u32) -> CloudStats {
        let branches = branches.max(1);
        let mut per_branch = vec![0usize; branches as usize];
        let mut max_planar_radius = 0.0f32;
        let mut sum_planar_radius = 0.0f64;

        for (i, p) in self.positions.iter().enumerate() {
            per_branch[i % branches as usize] += 1;
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            max_planar_radius = max_planar_radius.max(r);
            sum_planar_radius += f64::from(r);
        }

        let mean_planar_radius = if self.is_empty() {
            0.0
        } else {
            (sum_planar_radius / self.len() as f64) as f32
        };

        CloudStats {
            count: self.len(),
            max_planar_radius,
            mean_planar_radius,
            per_branch,
        }
    }
}

/// Summary statistics of a [`ParticleCloud`].
#[derive(Debug, Clone, PartialEq)]
pub struct CloudStats {
    pub count: usize,
    /// Largest distance from the y axis, `sqrt(x² + z²)`.
    pub max_planar_radius: f32,
    pub mean_planar_radius: f32,
    /// Particle count per branch index (`i mod branches`).
    pub per_branch: Vec<usize>,
}

/// Interleaved point sprite vertex: position followed by color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const POINT_VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
];

/// Vertex buffer layout for drawing [`PointVertex`] streams as a point list.
pub const POINT_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<PointVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &POINT_VERTEX_ATTRIBUTES,
};

const _: () = assert!(
    mem::size_of::<PointVertex>() == 24,
    "PointVertex size changed, update POINT_VERTEX_LAYOUT"
);
const _: () = assert!(POINT_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(PointVertex, color) as u64);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cloud() -> ParticleCloud {
        ParticleCloud::from_buffers(
            vec![[3.0, 0.5, 4.0], [-1.0, 0.0, 0.0], [0.0, -0.2, 0.0]],
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        )
    }

    #[test]
    fn test_buffers_have_matching_lengths() {
        let cloud = sample_cloud();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.positions().len(), cloud.colors().len());
        assert!(!cloud.is_empty());
    }

    #[test]
    fn test_byte_views_are_tightly_packed() {
        let cloud = sample_cloud();
        assert_eq!(cloud.position_bytes().len(), 3 * 12);
        assert_eq!(cloud.color_bytes().len(), 3 * 12);
    }

    #[test]
    fn test_vertices_interleave_in_order() {
        let cloud = sample_cloud();
        let vertices = cloud.to_vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, [-1.0, 0.0, 0.0]);
        assert_eq!(vertices[1].color, [0.0, 1.0, 0.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 3 * POINT_VERTEX_LAYOUT.array_stride as usize);
    }

    #[test]
    fn test_stats_planar_radius_ignores_height() {
        let stats = sample_cloud().stats(2);
        assert_eq!(stats.count, 3);
        assert!((stats.max_planar_radius - 5.0).abs() < 1e-6);
        assert!((stats.mean_planar_radius - 2.0).abs() < 1e-6);
        assert_eq!(stats.per_branch, vec![2, 1]);
    }

    #[test]
    fn test_stats_of_empty_cloud() {
        let stats = ParticleCloud::from_buffers(Vec::new(), Vec::new()).stats(3);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean_planar_radius, 0.0);
        assert_eq!(stats.per_branch, vec![0, 0, 0]);
    }
}
