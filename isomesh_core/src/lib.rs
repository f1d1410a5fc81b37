//! # isomesh_core
//!
//! Pure marching cubes algorithms for turning a sampled scalar field into
//! triangles.
//!
//! This crate holds the parts of the pipeline that need no storage or
//! allocation: the triangulation tables, corner classification, edge vertex
//! interpolation and per-voxel triangulation. Grid storage, sampling,
//! parallel marching and output buffers live in the `isomesh` crate.
//!
//! ## Features
//!
//! - **no_std compatible**: disable the default `std` feature for embedded use
//! - **Compile-time tables**: `EDGE_TABLE` and `TRIANGLE_COUNT` are derived
//!   from `TRI_TABLE` by `const fn`
//! - **No allocation**: a voxel yields at most 5 triangles in a fixed array
//!
//! ## Modules
//!
//! - [`types`]: `Point3`, `GridPoint`, `Triangle`
//! - [`traits`]: the `ScalarGrid` read abstraction and grid indexing
//! - [`marching_cubes`]: tables, classification, interpolation, triangulation
//! - [`error`]: error types for the checked lookups
//!
//! ## Usage
//!
//! ```ignore
//! use isomesh_core::prelude::*;
//!
//! let mut triangles = Vec::with_capacity(max_triangles(grid.points_per_axis()));
//! for x in 0..grid.voxels_per_axis() {
//!     for y in 0..grid.voxels_per_axis() {
//!         for z in 0..grid.voxels_per_axis() {
//!             let (tris, count) = process_voxel(&grid, x, y, z, 0.0);
//!             triangles.extend_from_slice(&tris[..count]);
//!         }
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::IsoCoreError;
    pub use crate::marching_cubes::{
        interpolate_vertex, max_triangles, process_voxel, triangulate_cube, voxel_triangle_count,
        CubeConfiguration,
    };
    pub use crate::traits::{grid_coord, grid_index, ScalarGrid};
    pub use crate::types::{GridPoint, Point3, Triangle};
}

pub use error::IsoCoreError;
pub use marching_cubes::{
    classify_voxel, interpolate_vertex, max_triangles, process_voxel, triangulate_cube,
    voxel_triangle_count, CubeConfiguration, CubeTriangles,
};
pub use traits::{grid_coord, grid_index, ScalarGrid};
pub use types::{GridPoint, Point3, Triangle};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Dense test grid sampling `f` at integer positions.
    struct FnGrid<F> {
        n: u32,
        f: F,
    }

    impl<F: Fn(Point3) -> f32 + Sync> ScalarGrid for FnGrid<F> {
        fn points_per_axis(&self) -> u32 {
            self.n
        }

        fn point(&self, x: u32, y: u32, z: u32) -> GridPoint {
            let position = Point3::new(x as f32, y as f32, z as f32);
            GridPoint::new(position, (self.f)(position))
        }
    }

    #[test]
    fn test_sphere_surface_vertices_near_radius() {
        let center = Point3::splat(3.0);
        let radius = 2.0;
        let grid = FnGrid {
            n: 7,
            f: |p: Point3| (p - center).length() - radius,
        };

        let mut total = 0;
        for x in 0..grid.voxels_per_axis() {
            for y in 0..grid.voxels_per_axis() {
                for z in 0..grid.voxels_per_axis() {
                    let (triangles, count) = process_voxel(&grid, x, y, z, 0.0);
                    for tri in &triangles[..count] {
                        for v in tri.vertices() {
                            let dist = (v - center).length();
                            // linear interpolation of a curved field stays within a cell
                            assert!((dist - radius).abs() < 0.5, "vertex {:?} at {}", v, dist);
                        }
                    }
                    total += count;
                }
            }
        }

        assert!(total > 0);
        assert!(total <= max_triangles(grid.points_per_axis()));
    }

    #[test]
    fn test_count_matches_triangulation() {
        let grid = FnGrid {
            n: 6,
            f: |p: Point3| p.y - 2.5 + 0.3 * p.x - 0.2 * p.z,
        };

        for x in 0..grid.voxels_per_axis() {
            for y in 0..grid.voxels_per_axis() {
                for z in 0..grid.voxels_per_axis() {
                    let (_, count) = process_voxel(&grid, x, y, z, 0.0);
                    assert_eq!(count, voxel_triangle_count(&grid, x, y, z, 0.0));
                }
            }
        }
    }
}
