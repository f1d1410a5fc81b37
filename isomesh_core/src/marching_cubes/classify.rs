//! Cube configuration codes.

use crate::error::IsoCoreError;

use super::tables::{EDGE_TABLE, TRIANGLE_COUNT};

/// 8-bit classification of one voxel: bit `i` is set iff corner `i` has a
/// density strictly below the iso level.
///
/// The corner order and the strict `<` are shared with [`super::TRI_TABLE`];
/// changing either one without regenerating the table breaks every mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CubeConfiguration(u8);

impl CubeConfiguration {
    /// Every corner at or above the iso level.
    pub const EMPTY: Self = Self(0);
    /// Every corner below the iso level.
    pub const FULL: Self = Self(255);

    /// Wrap a raw code.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Classify 8 corner densities given in canonical corner order.
    ///
    /// NaN densities compare false and therefore count as "not below".
    #[inline]
    pub fn from_densities(densities: &[f32; 8], iso_level: f32) -> Self {
        let mut bits = 0u8;
        for (i, &density) in densities.iter().enumerate() {
            if density < iso_level {
                bits |= 1u8 << i;
            }
        }
        Self(bits)
    }

    /// The raw code.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Row index into the triangulation table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for codes 0 and 255, which produce no surface.
    #[inline]
    pub const fn is_uniform(self) -> bool {
        self.0 == 0 || self.0 == 255
    }

    /// Whether corner `corner` is below the iso level.
    #[inline]
    pub const fn is_below(self, corner: usize) -> bool {
        self.0 & (1u8 << (corner & 7)) != 0
    }

    /// Number of triangles this configuration emits (0..=5).
    #[inline]
    pub const fn triangle_count(self) -> usize {
        TRIANGLE_COUNT[self.0 as usize] as usize
    }

    /// 12-bit mask of the edges crossed by the surface.
    #[inline]
    pub const fn edge_mask(self) -> u16 {
        EDGE_TABLE[self.0 as usize]
    }
}

impl From<u8> for CubeConfiguration {
    #[inline]
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<CubeConfiguration> for u8 {
    #[inline]
    fn from(config: CubeConfiguration) -> Self {
        config.0
    }
}

impl TryFrom<usize> for CubeConfiguration {
    type Error = IsoCoreError;

    fn try_from(code: usize) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map(Self)
            .map_err(|_| IsoCoreError::ConfigurationOutOfRange { code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_configurations() {
        assert_eq!(CubeConfiguration::from_densities(&[1.0; 8], 0.0), CubeConfiguration::EMPTY);
        assert_eq!(CubeConfiguration::from_densities(&[-1.0; 8], 0.0), CubeConfiguration::FULL);
        assert!(CubeConfiguration::EMPTY.is_uniform());
        assert!(CubeConfiguration::FULL.is_uniform());
        assert_eq!(CubeConfiguration::FULL.triangle_count(), 0);
    }

    #[test]
    fn test_bit_per_corner() {
        for corner in 0..8 {
            let mut densities = [1.0; 8];
            densities[corner] = -1.0;
            let config = CubeConfiguration::from_densities(&densities, 0.0);
            assert_eq!(config.bits(), 1u8 << corner);
            assert!(config.is_below(corner));
            assert_eq!(config.triangle_count(), 1);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // a density equal to the iso level is not "below"
        let config = CubeConfiguration::from_densities(&[0.5; 8], 0.5);
        assert_eq!(config, CubeConfiguration::EMPTY);
    }

    #[test]
    fn test_nan_counts_as_not_below() {
        let mut densities = [-1.0; 8];
        densities[3] = f32::NAN;
        let config = CubeConfiguration::from_densities(&densities, 0.0);
        assert_eq!(config.bits(), 0b1111_0111);
    }

    #[test]
    fn test_try_from_rejects_wide_codes() {
        assert_eq!(CubeConfiguration::try_from(255usize).unwrap().bits(), 255);
        assert_eq!(
            CubeConfiguration::try_from(256usize),
            Err(IsoCoreError::ConfigurationOutOfRange { code: 256 })
        );
    }
}
