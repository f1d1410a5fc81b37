//! Storage abstraction for sampled density grids.
//!
//! The marching loop only needs indexed read access to samples, so any
//! storage (the dense `VoxelGrid` in `isomesh`, a test fixture, a memory-mapped
//! buffer) can feed it by implementing [`ScalarGrid`].

use crate::error::IsoCoreError;
use crate::marching_cubes::CORNER_OFFSETS;
use crate::types::GridPoint;

/// Read access to a cubic grid of `points_per_axis³` samples.
///
/// `Sync` is required so the same grid can be marched from several threads.
pub trait ScalarGrid: Sync {
    /// Number of samples along each axis.
    fn points_per_axis(&self) -> u32;

    /// The sample at integer grid coordinates.
    ///
    /// Callers guarantee `x, y, z < points_per_axis()`; implementations may
    /// panic otherwise.
    fn point(&self, x: u32, y: u32, z: u32) -> GridPoint;

    /// Number of voxels along each axis (`points_per_axis - 1`, or 0).
    #[inline]
    fn voxels_per_axis(&self) -> u32 {
        self.points_per_axis().saturating_sub(1)
    }

    /// Bounds-checked variant of [`ScalarGrid::point`].
    ///
    /// # Errors
    /// Returns `CoordinateOutOfBounds` for the first component outside the grid.
    fn try_point(&self, x: u32, y: u32, z: u32) -> Result<GridPoint, IsoCoreError> {
        let n = self.points_per_axis();
        for coord in [x, y, z] {
            if coord >= n {
                return Err(IsoCoreError::CoordinateOutOfBounds {
                    coord,
                    max: n.saturating_sub(1),
                });
            }
        }
        Ok(self.point(x, y, z))
    }

    /// The 8 corners of voxel `(x, y, z)` in canonical corner order.
    #[inline]
    fn corners(&self, x: u32, y: u32, z: u32) -> [GridPoint; 8] {
        let mut corners = [GridPoint::default(); 8];
        for (corner, &(dx, dy, dz)) in corners.iter_mut().zip(CORNER_OFFSETS.iter()) {
            *corner = self.point(x + dx, y + dy, z + dz);
        }
        corners
    }

    /// Densities of the 8 corners of voxel `(x, y, z)` in canonical order.
    #[inline]
    fn corner_densities(&self, x: u32, y: u32, z: u32) -> [f32; 8] {
        let mut densities = [0.0; 8];
        for (density, &(dx, dy, dz)) in densities.iter_mut().zip(CORNER_OFFSETS.iter()) {
            *density = self.point(x + dx, y + dy, z + dz).density;
        }
        densities
    }
}

/// Flat index of `(x, y, z)` in a grid with `n` points per axis (x fastest).
#[inline]
pub const fn grid_index(x: u32, y: u32, z: u32, n: u32) -> usize {
    let n = n as usize;
    (z as usize) * n * n + (y as usize) * n + x as usize
}

/// Inverse of [`grid_index`].
///
/// # Panics
/// If `n == 0`. Every grid index belongs to a grid with at least one point.
#[inline]
pub const fn grid_coord(index: usize, n: u32) -> (u32, u32, u32) {
    let n = n as usize;
    ((index % n) as u32, ((index / n) % n) as u32, (index / (n * n)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3;

    /// Grid whose density is the x + 10y + 100z of each point.
    struct CoordGrid {
        n: u32,
    }

    impl ScalarGrid for CoordGrid {
        fn points_per_axis(&self) -> u32 {
            self.n
        }

        fn point(&self, x: u32, y: u32, z: u32) -> GridPoint {
            let position = Point3::new(x as f32, y as f32, z as f32);
            GridPoint::new(position, x as f32 + 10.0 * y as f32 + 100.0 * z as f32)
        }
    }

    #[test]
    fn test_grid_index_roundtrip() {
        let n = 5;
        for index in 0..(n * n * n) as usize {
            let (x, y, z) = grid_coord(index, n);
            assert_eq!(grid_index(x, y, z, n), index);
        }
        assert_eq!(grid_index(1, 2, 3, 5), 3 * 25 + 2 * 5 + 1);
    }

    #[test]
    #[should_panic]
    fn test_grid_coord_zero_axis() {
        let _ = grid_coord(0, 0);
    }

    #[test]
    fn test_corners_follow_canonical_order() {
        let grid = CoordGrid { n: 3 };
        let densities = grid.corner_densities(0, 0, 0);
        assert_eq!(densities, [0.0, 1.0, 101.0, 100.0, 10.0, 11.0, 111.0, 110.0]);

        let corners = grid.corners(1, 1, 1);
        assert_eq!(corners[0].position, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(corners[6].position, Point3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_try_point_bounds() {
        let grid = CoordGrid { n: 3 };
        assert!(grid.try_point(2, 2, 2).is_ok());
        assert_eq!(
            grid.try_point(0, 3, 0),
            Err(IsoCoreError::CoordinateOutOfBounds { coord: 3, max: 2 })
        );
    }

    #[test]
    fn test_voxels_per_axis() {
        assert_eq!(CoordGrid { n: 0 }.voxels_per_axis(), 0);
        assert_eq!(CoordGrid { n: 1 }.voxels_per_axis(), 0);
        assert_eq!(CoordGrid { n: 5 }.voxels_per_axis(), 4);
    }
}
