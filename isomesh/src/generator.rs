//! End-to-end generation: sample, march, emit.

use instant::Instant;

use isomesh_core::Triangle;

use crate::config::GenerationConfig;
use crate::density::{DensityField, HeightmapDensity, PerlinNoise};
use crate::engine::MarchingCubesEngine;
use crate::error::Result;
use crate::grid::VoxelGrid;
use crate::mesh::{MeshBuffers, MeshStats};
use crate::sampler::DensityFieldSampler;

/// The result of one generation request.
#[derive(Debug, Clone, Default)]
pub struct GeneratedMesh {
    /// Triangles in emission order.
    pub triangles: Vec<Triangle>,
    /// Flat buffers for the mesh host.
    pub buffers: MeshBuffers,
    /// Statistics over `triangles`.
    pub stats: MeshStats,
}

impl GeneratedMesh {
    /// Buffers and statistics for `triangles`.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let buffers = MeshBuffers::from_triangles(&triangles);
        let stats = MeshStats::from_triangles(&triangles);
        Self {
            triangles,
            buffers,
            stats,
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when no surface was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Turns a density field into a mesh.
///
/// Every call to [`MeshGenerator::generate`] builds a new grid and a new
/// triangle buffer; nothing is cached between calls, so changing the config
/// simply means generating again.
///
/// # Example
///
/// ```ignore
/// use isomesh::{GenerationConfig, MeshGenerator};
///
/// let mesh = MeshGenerator::terrain(GenerationConfig::new(30).with_seed(7)).generate()?;
/// println!("{} triangles", mesh.triangle_count());
/// ```
#[derive(Debug, Clone)]
pub struct MeshGenerator<D> {
    config: GenerationConfig,
    field: D,
}

impl<D: DensityField> MeshGenerator<D> {
    /// Generator for `field` shaped by `config`.
    pub fn new(config: GenerationConfig, field: D) -> Self {
        Self { config, field }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// The density field.
    #[inline]
    pub fn field(&self) -> &D {
        &self.field
    }

    /// Replace the configuration. The next generation starts from scratch.
    pub fn set_config(&mut self, config: GenerationConfig) {
        self.config = config;
    }

    /// Sample the field onto a fresh grid.
    pub fn sample_grid(&self) -> VoxelGrid {
        let start = Instant::now();
        let grid = DensityFieldSampler::new(&self.field).sample(&self.config);
        log::debug!(
            "sampled {} points ({}³) in {:?}",
            grid.len(),
            self.config.points_per_axis,
            start.elapsed()
        );

        let non_finite = grid.non_finite_count();
        if non_finite > 0 {
            log::warn!(
                "{} of {} density samples are not finite",
                non_finite,
                grid.len()
            );
        }
        grid
    }

    /// Run one full generation.
    ///
    /// A grid with fewer than two points per axis holds no voxel: the result
    /// is an empty mesh, not an error.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn generate(&self) -> Result<GeneratedMesh> {
        self.config.validate()?;
        let total = Instant::now();

        if self.config.points_per_axis < 2 {
            log::warn!(
                "points_per_axis = {} leaves no voxel to march, returning an empty mesh",
                self.config.points_per_axis
            );
            return Ok(GeneratedMesh::default());
        }

        let grid = self.sample_grid();

        let start = Instant::now();
        let engine = MarchingCubesEngine::new(self.config.iso_level);
        let buffer = engine.march_with(&grid, self.config.parallel);
        log::debug!(
            "marched {} voxels into {} of at most {} triangles in {:?}",
            self.config.num_voxels(),
            buffer.len(),
            buffer.capacity(),
            start.elapsed()
        );

        let start = Instant::now();
        let mesh = GeneratedMesh::from_triangles(buffer.into_vec());
        log::debug!(
            "emitted {} vertices in {:?}",
            mesh.buffers.vertices.len(),
            start.elapsed()
        );

        log::info!(
            "generated {} triangles from {}³ grid (iso {}) in {:?}",
            mesh.triangle_count(),
            self.config.points_per_axis,
            self.config.iso_level,
            total.elapsed()
        );
        Ok(mesh)
    }
}

impl MeshGenerator<HeightmapDensity<PerlinNoise>> {
    /// Perlin heightmap terrain generator built from `config.seed` and
    /// `config.terrain`.
    pub fn terrain(config: GenerationConfig) -> Self {
        let field = HeightmapDensity::terrain(config.seed, &config.terrain);
        Self::new(config, field)
    }
}

/// Generate the default terrain mesh for `config`.
///
/// # Errors
/// Returns `InvalidConfig` if the configuration fails validation.
pub fn generate_terrain(config: &GenerationConfig) -> Result<GeneratedMesh> {
    MeshGenerator::terrain(*config).generate()
}
