//! Generation configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use isomesh_core::Point3;

use crate::error::{IsoError, Result};

/// Parameters of the default heightmap terrain field.
///
/// `density(p) = (base_height - p.y) + amplitude * noise(p.x * frequency, p.z * frequency)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainParams {
    /// Height at which the vertical bias crosses zero.
    pub base_height: f32,
    /// Scale applied to the noise sample.
    pub amplitude: f32,
    /// Scale applied to the horizontal coordinates before sampling noise.
    pub frequency: f32,
}

impl Default for TerrainParams {
    /// `base_height` 10, `amplitude` 15 (three summed samples of amplitude 5)
    /// and `frequency` 0.01.
    fn default() -> Self {
        Self {
            base_height: 10.0,
            amplitude: 15.0,
            frequency: 0.01,
        }
    }
}

/// Everything one generation request depends on.
///
/// Generation is a pure function of this struct and the density field: the
/// same config always produces the same mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    /// Threshold separating "below" (inside) from "above" samples.
    pub iso_level: f32,
    /// Samples per grid axis. Values below 2 produce an empty mesh.
    pub points_per_axis: u32,
    /// Seed for the noise generator.
    pub seed: u32,
    /// Distance between neighbouring grid points.
    pub cell_size: f32,
    /// World position of grid point (0, 0, 0).
    pub origin: [f32; 3],
    /// Sample and march on the rayon pool when the `parallel` feature is on.
    pub parallel: bool,
    /// Heightmap terrain parameters.
    pub terrain: TerrainParams,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            iso_level: 0.0,
            points_per_axis: 30,
            seed: 0,
            cell_size: 1.0,
            origin: [0.0; 3],
            parallel: true,
            terrain: TerrainParams::default(),
        }
    }
}

impl GenerationConfig {
    /// Default config with the given grid resolution.
    pub fn new(points_per_axis: u32) -> Self {
        Self {
            points_per_axis,
            ..Self::default()
        }
    }

    /// Set the iso level.
    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }

    /// Set the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the grid spacing.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the world position of the first grid point.
    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin.as_array();
        self
    }

    /// Enable or disable parallel sampling and marching.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the terrain parameters.
    pub fn with_terrain(mut self, terrain: TerrainParams) -> Self {
        self.terrain = terrain;
        self
    }

    /// Origin as a point.
    #[inline]
    pub fn origin(&self) -> Point3 {
        Point3::from(self.origin)
    }

    /// Number of grid samples (`points_per_axis³`).
    #[inline]
    pub fn num_points(&self) -> usize {
        let n = self.points_per_axis as usize;
        n * n * n
    }

    /// Number of voxels (`(points_per_axis - 1)³`, or 0).
    #[inline]
    pub fn num_voxels(&self) -> usize {
        let v = self.points_per_axis.saturating_sub(1) as usize;
        v * v * v
    }

    /// Upper bound on emitted triangles.
    #[inline]
    pub fn max_triangles(&self) -> usize {
        isomesh_core::max_triangles(self.points_per_axis)
    }

    /// Check that every value is usable.
    ///
    /// `points_per_axis < 2` is accepted: it describes an empty mesh, not an
    /// invalid request.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !self.iso_level.is_finite() {
            return Err(IsoError::invalid_config("iso_level must be finite"));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(IsoError::invalid_config("cell_size must be positive and finite"));
        }
        if !self.origin.iter().all(|c| c.is_finite()) {
            return Err(IsoError::invalid_config("origin must be finite"));
        }
        let t = &self.terrain;
        if !(t.base_height.is_finite() && t.amplitude.is_finite() && t.frequency.is_finite()) {
            return Err(IsoError::invalid_config("terrain parameters must be finite"));
        }
        Ok(())
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Json` for malformed input and `InvalidConfig` when a value
    /// fails [`GenerationConfig::validate`].
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    /// Returns `Io` when the file cannot be read, otherwise as
    /// [`GenerationConfig::from_json_str`].
    #[cfg(feature = "serde")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
