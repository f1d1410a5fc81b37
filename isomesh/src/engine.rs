//! Marching every voxel of a sampled grid.
//!
//! The output buffer is sized to the worst case `5·(N-1)³` before the first
//! voxel is visited and is never grown afterwards. Exceeding it means the
//! table or the classifier is broken, so [`TriangleBuffer::push`] panics
//! instead of truncating.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use isomesh_core::{max_triangles, process_voxel, voxel_triangle_count, ScalarGrid, Triangle};

/// Fixed-capacity triangle output.
#[derive(Debug, Clone, Default)]
pub struct TriangleBuffer {
    triangles: Vec<Triangle>,
    capacity: usize,
}

impl TriangleBuffer {
    /// Empty buffer holding at most `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer sized for a grid with `points_per_axis` samples per axis.
    pub fn for_grid(points_per_axis: u32) -> Self {
        Self::with_capacity(max_triangles(points_per_axis))
    }

    /// Append one triangle.
    ///
    /// # Panics
    /// If the buffer is already full.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        assert!(
            self.triangles.len() < self.capacity,
            "triangle buffer overflow: capacity {}",
            self.capacity
        );
        self.triangles.push(triangle);
    }

    /// Append a run of triangles.
    ///
    /// # Panics
    /// If they do not all fit.
    #[inline]
    pub fn extend_from_slice(&mut self, triangles: &[Triangle]) {
        assert!(
            self.triangles.len() + triangles.len() <= self.capacity,
            "triangle buffer overflow: {} + {} exceeds capacity {}",
            self.triangles.len(),
            triangles.len(),
            self.capacity
        );
        self.triangles.extend_from_slice(triangles);
    }

    /// Claim `count` default-initialised slots at the end of the buffer.
    ///
    /// # Panics
    /// If they do not fit.
    #[cfg(feature = "parallel")]
    pub(crate) fn reserve_slots(&mut self, count: usize) -> &mut [Triangle] {
        let start = self.triangles.len();
        assert!(
            start + count <= self.capacity,
            "triangle buffer overflow: {} + {} exceeds capacity {}",
            start,
            count,
            self.capacity
        );
        self.triangles.resize(start + count, Triangle::default());
        &mut self.triangles[start..]
    }

    /// Triangles emitted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when nothing has been emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Maximum number of triangles.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Emitted triangles in order.
    #[inline]
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Take the emitted triangles, releasing the unused worst-case capacity.
    pub fn into_vec(self) -> Vec<Triangle> {
        let mut triangles = self.triangles;
        triangles.shrink_to_fit();
        triangles
    }
}

/// Runs marching cubes over a whole grid at one iso level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchingCubesEngine {
    /// Threshold; corners strictly below it count as inside.
    pub iso_level: f32,
}

impl MarchingCubesEngine {
    /// Engine extracting the surface at `iso_level`.
    pub const fn new(iso_level: f32) -> Self {
        Self { iso_level }
    }

    /// March every voxel on the calling thread.
    ///
    /// Voxels are visited with x outermost and z innermost; triangles appear in
    /// that order.
    pub fn march<G: ScalarGrid + ?Sized>(&self, grid: &G) -> TriangleBuffer {
        let mut buffer = TriangleBuffer::for_grid(grid.points_per_axis());
        let voxels = grid.voxels_per_axis();

        for x in 0..voxels {
            self.march_slab(grid, x, &mut buffer);
        }

        buffer
    }

    fn march_slab<G: ScalarGrid + ?Sized>(&self, grid: &G, x: u32, buffer: &mut TriangleBuffer) {
        let voxels = grid.voxels_per_axis();
        for y in 0..voxels {
            for z in 0..voxels {
                let (triangles, count) = process_voxel(grid, x, y, z, self.iso_level);
                buffer.extend_from_slice(&triangles[..count]);
            }
        }
    }

    /// Number of triangles the voxels of slab `x` will emit.
    pub fn slab_triangle_count<G: ScalarGrid + ?Sized>(&self, grid: &G, x: u32) -> usize {
        let voxels = grid.voxels_per_axis();
        let mut total = 0;
        for y in 0..voxels {
            for z in 0..voxels {
                total += voxel_triangle_count(grid, x, y, z, self.iso_level);
            }
        }
        total
    }

    /// Number of triangles the whole grid will emit, without interpolating.
    pub fn count_triangles<G: ScalarGrid + ?Sized>(&self, grid: &G) -> usize {
        (0..grid.voxels_per_axis())
            .map(|x| self.slab_triangle_count(grid, x))
            .sum()
    }

    /// March on the rayon pool.
    ///
    /// Each x-slab first counts its triangles, the counts are prefix-summed
    /// into disjoint slices of the preallocated buffer, then every slab fills
    /// its own slice. The result equals [`MarchingCubesEngine::march`].
    #[cfg(feature = "parallel")]
    pub fn march_parallel<G: ScalarGrid + ?Sized>(&self, grid: &G) -> TriangleBuffer {
        let mut buffer = TriangleBuffer::for_grid(grid.points_per_axis());
        let voxels = grid.voxels_per_axis();
        if voxels == 0 {
            return buffer;
        }

        let counts: Vec<usize> = (0..voxels)
            .into_par_iter()
            .map(|x| self.slab_triangle_count(grid, x))
            .collect();
        let total: usize = counts.iter().sum();

        let mut rest = buffer.reserve_slots(total);
        let mut slabs = Vec::with_capacity(counts.len());
        for (x, &count) in counts.iter().enumerate() {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
            slabs.push((x as u32, head));
            rest = tail;
        }

        slabs.into_par_iter().for_each(|(x, out)| {
            let mut cursor = 0;
            for y in 0..voxels {
                for z in 0..voxels {
                    let (triangles, count) = process_voxel(grid, x, y, z, self.iso_level);
                    out[cursor..cursor + count].copy_from_slice(&triangles[..count]);
                    cursor += count;
                }
            }
            assert_eq!(cursor, out.len(), "slab {} emitted a different count", x);
        });

        buffer
    }

    /// March in parallel when asked and the `parallel` feature is on.
    pub fn march_with<G: ScalarGrid + ?Sized>(&self, grid: &G, parallel: bool) -> TriangleBuffer {
        #[cfg(feature = "parallel")]
        if parallel {
            return self.march_parallel(grid);
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        self.march(grid)
    }
}
