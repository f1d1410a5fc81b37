//! Per-voxel marching cubes.
//!
//! Classify the 8 corners, look up the configuration's edge triples, place one
//! vertex on each crossed edge and emit the triangles. Nothing here allocates.

use crate::traits::ScalarGrid;
use crate::types::{GridPoint, Point3, Triangle};

use super::classify::CubeConfiguration;
use super::tables::{
    CORNER_INDEX_A_FROM_EDGE, CORNER_INDEX_B_FROM_EDGE, MAX_TRIANGLES_PER_CUBE, SENTINEL,
    TRI_TABLE,
};

/// Triangles produced by one voxel and how many of them are valid.
pub type CubeTriangles = ([Triangle; MAX_TRIANGLES_PER_CUBE], usize);

/// Place a vertex where the field crosses `iso_value` along the edge `p1 -> p2`.
///
/// `t = (iso - d1) / (d2 - d1)` and the result is `p1 + t * (p2 - p1)`.
///
/// - `iso_value == d1` returns exactly `p1`, `iso_value == d2` exactly `p2`.
/// - `d1 == d2` has no crossing point; the edge midpoint is returned.
/// - `t` is clamped to `[0, 1]`, so rounding never pushes a vertex off its edge.
///   NaN densities still yield NaN coordinates rather than a panic.
#[inline]
pub fn interpolate_vertex(p1: Point3, p2: Point3, d1: f32, d2: f32, iso_value: f32) -> Point3 {
    if iso_value == d1 {
        return p1;
    }
    if iso_value == d2 {
        return p2;
    }

    let denom = d2 - d1;
    if denom == 0.0 {
        return p1.lerp(p2, 0.5);
    }

    let t = (iso_value - d1) / denom;
    p1.lerp(p2, t.clamp(0.0, 1.0))
}

/// Vertex on edge `edge` of a voxel given its corners in canonical order.
#[inline]
fn edge_vertex(corners: &[GridPoint; 8], edge: usize, iso_value: f32) -> Point3 {
    let a = &corners[CORNER_INDEX_A_FROM_EDGE[edge]];
    let b = &corners[CORNER_INDEX_B_FROM_EDGE[edge]];
    interpolate_vertex(a.position, b.position, a.density, b.density, iso_value)
}

/// Triangulate one voxel from its corners in canonical order.
///
/// For each table triple `(e0, e1, e2)` the triangle is emitted as
/// `a = v(e2), b = v(e1), c = v(e0)`. This reversed order is part of the output
/// contract: it fixes the winding the mesh host uses for its normals.
pub fn triangulate_cube(corners: &[GridPoint; 8], iso_value: f32) -> CubeTriangles {
    let mut triangles = [Triangle::default(); MAX_TRIANGLES_PER_CUBE];

    let mut densities = [0.0f32; 8];
    for (density, corner) in densities.iter_mut().zip(corners.iter()) {
        *density = corner.density;
    }

    let config = CubeConfiguration::from_densities(&densities, iso_value);
    if config.is_uniform() {
        return (triangles, 0);
    }

    let row = &TRI_TABLE[config.index()];
    let mut count = 0;
    let mut i = 0;
    while i < 16 && row[i] != SENTINEL {
        let e0 = row[i] as usize;
        let e1 = row[i + 1] as usize;
        let e2 = row[i + 2] as usize;

        triangles[count] = Triangle::new(
            edge_vertex(corners, e2, iso_value),
            edge_vertex(corners, e1, iso_value),
            edge_vertex(corners, e0, iso_value),
        );
        count += 1;
        i += 3;
    }

    debug_assert_eq!(count, config.triangle_count());
    (triangles, count)
}

/// Triangulate voxel `(x, y, z)` of `grid`.
///
/// The voxel spans grid points `(x..=x+1, y..=y+1, z..=z+1)`, so each
/// coordinate must be below `grid.voxels_per_axis()`.
#[inline]
pub fn process_voxel<G: ScalarGrid + ?Sized>(
    grid: &G,
    x: u32,
    y: u32,
    z: u32,
    iso_value: f32,
) -> CubeTriangles {
    triangulate_cube(&grid.corners(x, y, z), iso_value)
}

/// Classify voxel `(x, y, z)` without interpolating any vertex.
#[inline]
pub fn classify_voxel<G: ScalarGrid + ?Sized>(
    grid: &G,
    x: u32,
    y: u32,
    z: u32,
    iso_value: f32,
) -> CubeConfiguration {
    CubeConfiguration::from_densities(&grid.corner_densities(x, y, z), iso_value)
}

/// Number of triangles voxel `(x, y, z)` will emit.
#[inline]
pub fn voxel_triangle_count<G: ScalarGrid + ?Sized>(
    grid: &G,
    x: u32,
    y: u32,
    z: u32,
    iso_value: f32,
) -> usize {
    classify_voxel(grid, x, y, z, iso_value).triangle_count()
}

/// Upper bound on the triangles of a grid: `5 * (n - 1)³`, or 0 when `n < 2`.
#[inline]
pub const fn max_triangles(points_per_axis: u32) -> usize {
    if points_per_axis < 2 {
        return 0;
    }
    let voxels = (points_per_axis - 1) as usize;
    MAX_TRIANGLES_PER_CUBE * voxels * voxels * voxels
}
