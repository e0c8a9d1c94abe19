//! Headless stand-in for the point sprite renderer.

use galaxy_core::{CloudDisplay, ParticleCloud, PointVertex, PointsMaterial};
use tracing::{debug, info};

/// Vertex data "uploaded" for the attached cloud.
struct Upload {
    vertices: Vec<PointVertex>,
    point_size: f32,
}

/// Keeps an interleaved copy of the current cloud, as a GPU vertex buffer would,
/// and logs a summary on every attach.
pub struct LoggingDisplay {
    branches: u32,
    log_stats: bool,
    upload: Option<Upload>,
    uploads: u64,
    detaches: u64,
}

impl LoggingDisplay {
    pub fn new(log_stats: bool) -> Self {
        Self {
            branches: 1,
            log_stats,
            upload: None,
            uploads: 0,
            detaches: 0,
        }
    }

    /// Branch count used to bucket particles in the logged statistics.
    pub fn set_branches(&mut self, branches: u32) {
        self.branches = branches;
    }

    pub fn set_log_stats(&mut self, log_stats: bool) {
        self.log_stats = log_stats;
    }

    /// Number of vertices currently held, zero when detached.
    pub fn vertex_count(&self) -> usize {
        self.upload.as_ref().map_or(0, |u| u.vertices.len())
    }

    /// Total number of attach calls.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Total number of detach calls.
    pub fn detaches(&self) -> u64 {
        self.detaches
    }
}

impl CloudDisplay for LoggingDisplay {
    fn detach(&mut self) {
        self.detaches += 1;
        if let Some(old) = self.upload.take() {
            debug!(
                vertices = old.vertices.len(),
                point_size = old.point_size,
                "Detached previous cloud"
            );
        }
    }

    fn attach(&mut self, cloud: &ParticleCloud, material: &PointsMaterial) {
        self.uploads += 1;
        let vertices = cloud.to_vertices();
        let bytes = std::mem::size_of_val(vertices.as_slice());

        if self.log_stats {
            let stats = cloud.stats(self.branches);
            info!(
                particles = stats.count,
                bytes,
                point_size = material.size,
                max_planar_radius = stats.max_planar_radius,
                mean_planar_radius = stats.mean_planar_radius,
                per_branch = ?stats.per_branch,
                "Attached cloud"
            );
        }

        self.upload = Some(Upload {
            vertices,
            point_size: material.size,
        });
    }
}
