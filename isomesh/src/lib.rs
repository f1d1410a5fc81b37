//! # isomesh
//!
//! Density-field sampling and marching cubes mesh generation.
//!
//! `isomesh` is the runtime half of the pipeline. It owns everything that
//! allocates: the voxel grid, the sampler that fills it, the whole-grid
//! marching engine (sequential and rayon-parallel) and the flat output
//! buffers. The per-voxel math and the triangulation tables live in
//! `isomesh_core`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use isomesh::{generate_terrain, write_obj, GenerationConfig};
//!
//! let config = GenerationConfig::new(30).with_seed(1337).with_iso_level(0.0);
//! let mesh = generate_terrain(&config)?;
//!
//! println!("{} triangles", mesh.triangle_count());
//! upload(mesh.buffers.vertex_bytes(), mesh.buffers.index_bytes());
//! write_obj(std::fs::File::create("terrain.obj")?, &mesh.triangles)?;
//! ```
//!
//! Any closure `Fn(Point3) -> f32` works as a field:
//!
//! ```ignore
//! use isomesh::{GenerationConfig, MeshGenerator, Point3};
//!
//! let sphere = |p: Point3| (p - Point3::splat(8.0)).length() - 5.0;
//! let mesh = MeshGenerator::new(GenerationConfig::new(17), sphere).generate()?;
//! ```
//!
//! ## Pipeline
//!
//! 1. **Sample**: [`DensityFieldSampler`] writes one density per grid point.
//! 2. **March**: [`MarchingCubesEngine`] triangulates every voxel into a
//!    [`TriangleBuffer`] preallocated to `5·(N-1)³` triangles.
//! 3. **Emit**: [`MeshBuffers`] flattens the triangles into unshared vertices
//!    and a `0..3n` index list.
//!
//! Each generation starts from scratch; nothing is cached across calls.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon sampling and marching
//! - `serde`: JSON configuration files

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod density;
mod engine;
mod error;
mod generator;
mod grid;
mod mesh;
mod sampler;

pub use config::{GenerationConfig, TerrainParams};
pub use density::{DensityField, HeightmapDensity, NoiseSource, PerlinNoise};
pub use engine::{MarchingCubesEngine, TriangleBuffer};
pub use error::{IsoError, Result};
pub use generator::{generate_terrain, GeneratedMesh, MeshGenerator};
pub use grid::VoxelGrid;
pub use mesh::{triangles_to_obj, write_obj, MeshBuffers, MeshStats};
pub use sampler::DensityFieldSampler;

// Re-export isomesh_core types for convenience
pub use isomesh_core::{
    max_triangles, CubeConfiguration, GridPoint, IsoCoreError, Point3, ScalarGrid, Triangle,
};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use isomesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{GenerationConfig, TerrainParams};
    pub use crate::density::{DensityField, HeightmapDensity, NoiseSource, PerlinNoise};
    pub use crate::engine::MarchingCubesEngine;
    pub use crate::error::{IsoError, Result};
    pub use crate::generator::{generate_terrain, GeneratedMesh, MeshGenerator};
    pub use crate::grid::VoxelGrid;
    pub use crate::mesh::{MeshBuffers, MeshStats};

    pub use isomesh_core::{Point3, ScalarGrid, Triangle};
}
