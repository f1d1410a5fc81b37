//! Dense voxel grid storage.

use isomesh_core::{grid_coord, grid_index, GridPoint, IsoCoreError, Point3, ScalarGrid};

use crate::config::GenerationConfig;

/// A cubic grid of `points_per_axis³` samples stored in one flat array.
///
/// Point `(x, y, z)` lives at index `z·N² + y·N + x` and sits at world position
/// `origin + cell_size · (x, y, z)`. The grid is created fresh for each
/// generation and never resized.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    points_per_axis: u32,
    origin: Point3,
    cell_size: f32,
    points: Vec<GridPoint>,
}

impl VoxelGrid {
    /// A grid with every position laid out and every density zero.
    pub fn new(points_per_axis: u32, origin: Point3, cell_size: f32) -> Self {
        let n = points_per_axis as usize;
        let points = (0..n * n * n)
            .map(|index| {
                let (x, y, z) = grid_coord(index, points_per_axis);
                GridPoint::new(
                    origin + Point3::new(x as f32, y as f32, z as f32) * cell_size,
                    0.0,
                )
            })
            .collect();

        Self {
            points_per_axis,
            origin,
            cell_size,
            points,
        }
    }

    /// An unsampled grid shaped by `config`.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.points_per_axis, config.origin(), config.cell_size)
    }

    /// World position of grid point (0, 0, 0).
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Distance between neighbouring points.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        grid_index(x, y, z, self.points_per_axis)
    }

    /// World position of grid point `(x, y, z)`.
    #[inline]
    pub fn position(&self, x: u32, y: u32, z: u32) -> Point3 {
        self.origin + Point3::new(x as f32, y as f32, z as f32) * self.cell_size
    }

    /// The sample at `(x, y, z)`, or an error when outside the grid.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfBounds` naming the offending component.
    pub fn get(&self, x: u32, y: u32, z: u32) -> Result<&GridPoint, IsoCoreError> {
        let max = self.points_per_axis.saturating_sub(1);
        for coord in [x, y, z] {
            if coord >= self.points_per_axis {
                return Err(IsoCoreError::CoordinateOutOfBounds { coord, max });
            }
        }
        Ok(&self.points[self.index(x, y, z)])
    }

    /// Overwrite the density at `(x, y, z)`.
    ///
    /// # Errors
    /// Returns `CoordinateOutOfBounds` when outside the grid.
    pub fn set_density(&mut self, x: u32, y: u32, z: u32, density: f32) -> Result<(), IsoCoreError> {
        self.get(x, y, z)?;
        let index = self.index(x, y, z);
        self.points[index].density = density;
        Ok(())
    }

    /// All samples in index order.
    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Mutable samples in index order, for the sampler.
    #[inline]
    pub(crate) fn points_mut(&mut self) -> &mut [GridPoint] {
        &mut self.points
    }

    /// Number of samples whose density is NaN or infinite.
    pub fn non_finite_count(&self) -> usize {
        self.points.iter().filter(|p| !p.density.is_finite()).count()
    }

    /// Smallest and largest finite density, or `None` if there is none.
    pub fn density_range(&self) -> Option<(f32, f32)> {
        self.points
            .iter()
            .map(|p| p.density)
            .filter(|d| d.is_finite())
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

impl ScalarGrid for VoxelGrid {
    #[inline]
    fn points_per_axis(&self) -> u32 {
        self.points_per_axis
    }

    #[inline]
    fn point(&self, x: u32, y: u32, z: u32) -> GridPoint {
        self.points[self.index(x, y, z)]
    }
}
