//! Marching Cubes isosurface extraction.
//!
//! This module provides the table-driven core of the algorithm:
//!
//! - Compile-time lookup tables for the 256 cube configurations
//! - [`CubeConfiguration`] classification of a voxel's corners
//! - [`interpolate_vertex`] for placing vertices on crossed edges
//! - No-alloc per-voxel triangulation ([`triangulate_cube`], [`process_voxel`])
//!
//! # Example
//!
//! ```ignore
//! use isomesh_core::marching_cubes::{process_voxel, max_triangles};
//!
//! let mut out = Vec::with_capacity(max_triangles(grid.points_per_axis()));
//! let (triangles, count) = process_voxel(&grid, 0, 0, 0, iso_level);
//! out.extend_from_slice(&triangles[..count]);
//! ```

mod algorithm;
mod classify;
mod tables;

pub use algorithm::{
    classify_voxel, interpolate_vertex, max_triangles, process_voxel, triangulate_cube,
    voxel_triangle_count, CubeTriangles,
};
pub use classify::CubeConfiguration;
pub use tables::{
    edge_corners, triangle_edges, CORNER_INDEX_A_FROM_EDGE, CORNER_INDEX_B_FROM_EDGE,
    CORNER_OFFSETS, EDGE_TABLE, MAX_TRIANGLES_PER_CUBE, SENTINEL, TRIANGLE_COUNT, TRI_TABLE,
};
