//! Density field strategies.
//!
//! The sampler only sees a [`DensityField`]. The terrain field shipped here is
//! a heightmap: a linear vertical bias plus a 2D noise term from a
//! [`NoiseSource`]. Any closure `Fn(Point3) -> f32` is also a field, so tests
//! and callers can plug in spheres, planes or anything else.

use isomesh_core::Point3;
use noise::{NoiseFn, Perlin};

use crate::config::TerrainParams;

/// A 2D scalar noise function sampled at horizontal coordinates.
pub trait NoiseSource: Sync {
    /// Noise value at `(x, z)`.
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<F> NoiseSource for F
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// A scalar field over world space.
///
/// Implementations must be pure: the same point always yields the same
/// density, from any thread.
pub trait DensityField: Sync {
    /// Density at world position `p`.
    fn density(&self, p: Point3) -> f32;
}

impl<F> DensityField for F
where
    F: Fn(Point3) -> f32 + Sync,
{
    #[inline]
    fn density(&self, p: Point3) -> f32 {
        self(p)
    }
}

/// Seeded 2D Perlin noise with a coordinate scale.
#[derive(Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
    frequency: f32,
}

impl PerlinNoise {
    /// Perlin noise for `seed`, sampling at `(x * frequency, z * frequency)`.
    pub fn new(seed: u32, frequency: f32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
        }
    }

    /// The coordinate scale.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl std::fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise")
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}

impl NoiseSource for PerlinNoise {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        let f = self.frequency as f64;
        self.perlin.get([x as f64 * f, z as f64 * f]) as f32
    }
}

/// Heightmap terrain: `(base_height - y) + amplitude * noise(x, z)`.
///
/// Height only enters through the vertical bias, so every column crosses the
/// iso level exactly once when the noise is bounded.
#[derive(Debug, Clone)]
pub struct HeightmapDensity<N> {
    noise: N,
    base_height: f32,
    amplitude: f32,
}

impl<N: NoiseSource> HeightmapDensity<N> {
    /// Heightmap over an arbitrary noise source.
    pub fn new(noise: N, base_height: f32, amplitude: f32) -> Self {
        Self {
            noise,
            base_height,
            amplitude,
        }
    }

    /// The underlying noise source.
    #[inline]
    pub fn noise(&self) -> &N {
        &self.noise
    }
}

impl HeightmapDensity<PerlinNoise> {
    /// The default terrain field for `seed`.
    pub fn terrain(seed: u32, params: &TerrainParams) -> Self {
        Self::new(
            PerlinNoise::new(seed, params.frequency),
            params.base_height,
            params.amplitude,
        )
    }
}

impl<N: NoiseSource> DensityField for HeightmapDensity<N> {
    #[inline]
    fn density(&self, p: Point3) -> f32 {
        (self.base_height - p.y) + self.amplitude * self.noise.sample(p.x, p.z)
    }
}
