//! Filling a voxel grid from a density field.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::GenerationConfig;
use crate::density::DensityField;
use crate::grid::VoxelGrid;

/// Writes one density sample per grid point.
///
/// Every sample depends only on its position, so the parallel path produces
/// exactly the same grid as the sequential one. Both return only after every
/// point is written.
pub struct DensityFieldSampler<'a, D: ?Sized> {
    field: &'a D,
}

impl<'a, D: DensityField + ?Sized> DensityFieldSampler<'a, D> {
    /// Sampler over `field`.
    pub fn new(field: &'a D) -> Self {
        Self { field }
    }

    /// Sample every point of `grid` on the calling thread.
    pub fn fill(&self, grid: &mut VoxelGrid) {
        let field = self.field;
        for point in grid.points_mut() {
            point.density = field.density(point.position);
        }
    }

    /// Sample every point of `grid` on the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn fill_parallel(&self, grid: &mut VoxelGrid) {
        let field = self.field;
        grid.points_mut().par_iter_mut().for_each(|point| {
            point.density = field.density(point.position);
        });
    }

    /// Sample `grid`, in parallel when asked and the `parallel` feature is on.
    pub fn fill_with(&self, grid: &mut VoxelGrid, parallel: bool) {
        #[cfg(feature = "parallel")]
        if parallel {
            self.fill_parallel(grid);
            return;
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        self.fill(grid);
    }

    /// A fresh grid shaped by `config` and fully sampled.
    pub fn sample(&self, config: &GenerationConfig) -> VoxelGrid {
        let mut grid = VoxelGrid::from_config(config);
        self.fill_with(&mut grid, config.parallel);
        grid
    }
}
