//! Comprehensive Test Suite for isomesh_core
//!
//! The tests here pin down the observable contract of the core crate: the
//! table data, the classification convention, interpolation boundary
//! behaviour and the winding of emitted triangles.
//!
//! # Test Categories
//!
//! 1. **Table Invariants** - Sizes, sentinels, triples, edge/corner topology
//! 2. **Classification** - Bit order and the strict threshold
//! 3. **Interpolation** - Boundary exactness and degenerate edges
//! 4. **Per-Voxel Triangulation** - Single corner, complements, winding
//! 5. **Grid Access** - Canonical corner gathering through `ScalarGrid`

use isomesh_core::marching_cubes::{
    edge_corners, triangle_edges, CORNER_INDEX_A_FROM_EDGE, CORNER_INDEX_B_FROM_EDGE,
    CORNER_OFFSETS, EDGE_TABLE, MAX_TRIANGLES_PER_CUBE, SENTINEL, TRIANGLE_COUNT, TRI_TABLE,
};
use isomesh_core::prelude::*;
use isomesh_core::classify_voxel;

// =============================================================================
// Test Helpers
// =============================================================================

/// Unit cube at `origin` with the given corner densities.
fn cube_at(origin: Point3, densities: [f32; 8]) -> [GridPoint; 8] {
    let mut corners = [GridPoint::default(); 8];
    for (i, &(dx, dy, dz)) in CORNER_OFFSETS.iter().enumerate() {
        let offset = Point3::new(dx as f32, dy as f32, dz as f32);
        corners[i] = GridPoint::new(origin + offset, densities[i]);
    }
    corners
}

/// Densities realising configuration `config` (-1 below, +1 above).
fn densities_for(config: u8) -> [f32; 8] {
    let mut densities = [1.0; 8];
    for (corner, density) in densities.iter_mut().enumerate() {
        if config & (1 << corner) != 0 {
            *density = -1.0;
        }
    }
    densities
}

fn corner_position(corner: usize) -> Point3 {
    let (dx, dy, dz) = CORNER_OFFSETS[corner];
    Point3::new(dx as f32, dy as f32, dz as f32)
}

fn edge_midpoint(edge: usize) -> Point3 {
    let (a, b) = edge_corners(edge).unwrap();
    corner_position(a).lerp(corner_position(b), 0.5)
}

/// Dense grid sampling a closure at integer positions.
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

// =============================================================================
// SECTION 1: Table Invariants
// =============================================================================

mod table_tests {
    use super::*;

    #[test]
    fn should_have_256_rows_of_16() {
        assert_eq!(TRI_TABLE.len(), 256);
        for row in &TRI_TABLE {
            assert_eq!(row.len(), 16);
        }
    }

    #[test]
    fn should_terminate_every_row_with_sentinel() {
        for (config, row) in TRI_TABLE.iter().enumerate() {
            let len = row.iter().position(|&e| e == SENTINEL).unwrap_or(16);
            assert!(len < 16, "row {} has no sentinel", config);
            assert!(
                row[len..].iter().all(|&e| e == SENTINEL),
                "row {} has edges after the sentinel",
                config
            );
        }
    }

    #[test]
    fn should_group_edges_in_triples() {
        for (config, row) in TRI_TABLE.iter().enumerate() {
            let len = row.iter().take_while(|&&e| e != SENTINEL).count();
            assert_eq!(len % 3, 0, "row {} length {} is not a multiple of 3", config, len);
            assert!(len / 3 <= MAX_TRIANGLES_PER_CUBE);
            assert_eq!(len / 3, TRIANGLE_COUNT[config] as usize);
        }
    }

    #[test]
    fn should_only_reference_valid_edges() {
        for row in &TRI_TABLE {
            for &edge in row.iter().take_while(|&&e| e != SENTINEL) {
                assert!((0..12).contains(&edge));
            }
        }
    }

    #[test]
    fn should_have_empty_rows_for_uniform_configs() {
        assert_eq!(TRI_TABLE[0][0], SENTINEL);
        assert_eq!(TRI_TABLE[255][0], SENTINEL);
        assert_eq!(TRIANGLE_COUNT[0], 0);
        assert_eq!(TRIANGLE_COUNT[255], 0);
    }

    #[test]
    fn should_have_symmetric_edge_masks_for_complement_configs() {
        for config in 0..128 {
            assert_eq!(
                EDGE_TABLE[config],
                EDGE_TABLE[255 - config],
                "asymmetry at configs {} and {}",
                config,
                255 - config
            );
        }
    }

    #[test]
    fn should_only_use_edges_with_a_sign_change() {
        for config in 0..=255u8 {
            let mask = EDGE_TABLE[config as usize];
            for edge in 0..12 {
                let a = CORNER_INDEX_A_FROM_EDGE[edge];
                let b = CORNER_INDEX_B_FROM_EDGE[edge];
                let crosses = ((config >> a) & 1) != ((config >> b) & 1);
                assert_eq!(
                    mask & (1 << edge) != 0,
                    crosses,
                    "config {} edge {}",
                    config,
                    edge
                );
            }
        }
    }

    #[test]
    fn should_produce_one_triangle_for_single_corner() {
        for corner in 0..8 {
            assert_eq!(TRIANGLE_COUNT[1 << corner], 1, "corner {}", corner);
        }
    }

    #[test]
    fn should_map_edges_to_unit_length_corner_pairs() {
        for edge in 0..12 {
            let (a, b) = edge_corners(edge).unwrap();
            let len = (corner_position(a) - corner_position(b)).length();
            assert_eq!(len, 1.0, "edge {}", edge);
        }
    }

    #[test]
    fn should_reject_out_of_range_edges() {
        assert_eq!(edge_corners(12), Err(IsoCoreError::EdgeOutOfRange { edge: 12 }));
    }

    #[test]
    fn should_iterate_triples_like_the_raw_row() {
        let triples: Vec<[usize; 3]> = triangle_edges(15).collect();
        assert_eq!(triples, vec![[9, 8, 10], [10, 8, 11]]);
        assert_eq!(triangle_edges(0).count(), 0);
    }
}

// =============================================================================
// SECTION 2: Classification
// =============================================================================

mod classification_tests {
    use super::*;

    #[test]
    fn should_set_bit_i_for_corner_i() {
        for corner in 0..8 {
            let config = CubeConfiguration::from_densities(&densities_for(1 << corner), 0.0);
            assert_eq!(config.bits(), 1 << corner);
        }
    }

    #[test]
    fn should_roundtrip_every_code() {
        for code in 0..=255u8 {
            let config = CubeConfiguration::from_densities(&densities_for(code), 0.0);
            assert_eq!(config.bits(), code);
        }
    }

    #[test]
    fn should_treat_equal_density_as_not_below() {
        let config = CubeConfiguration::from_densities(&[2.0; 8], 2.0);
        assert!(config.is_uniform());
        assert_eq!(config.bits(), 0);
    }

    #[test]
    fn should_reject_codes_above_255() {
        assert!(CubeConfiguration::try_from(1000usize).is_err());
    }

    #[test]
    fn should_classify_voxels_through_grid() {
        let grid = FnGrid {
            n: 2,
            f: |p: Point3| if p == Point3::ZERO { -1.0 } else { 1.0 },
        };
        assert_eq!(classify_voxel(&grid, 0, 0, 0, 0.0).bits(), 1);
    }
}

// =============================================================================
// SECTION 3: Interpolation
// =============================================================================

mod interpolation_tests {
    use super::*;

    #[test]
    fn should_return_p1_when_iso_equals_d1() {
        let p1 = Point3::new(0.3, 1.7, -2.2);
        let p2 = Point3::new(1.3, 1.7, -2.2);
        assert_eq!(interpolate_vertex(p1, p2, 0.7, -0.4, 0.7), p1);
    }

    #[test]
    fn should_return_p2_when_iso_equals_d2() {
        let p1 = Point3::new(0.3, 1.7, -2.2);
        let p2 = Point3::new(0.3, 2.7, -2.2);
        assert_eq!(interpolate_vertex(p1, p2, 0.7, -0.4, -0.4), p2);
    }

    #[test]
    fn should_interpolate_linearly() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 0.0, 4.0);
        let v = interpolate_vertex(p1, p2, 0.0, 4.0, 1.0);
        assert!((v.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn should_stay_finite_for_equal_densities() {
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(2.0, 0.0, 0.0);
        let v = interpolate_vertex(p1, p2, 3.0, 3.0, 0.0);
        assert!(v.is_finite());
        assert_eq!(v, Point3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn should_stay_on_the_edge() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(1.0, 0.0, 0.0);
        // iso outside [d1, d2] is clamped to an endpoint
        assert_eq!(interpolate_vertex(p1, p2, 0.0, 1.0, 2.0), p2);
        assert_eq!(interpolate_vertex(p1, p2, 0.0, 1.0, -2.0), p1);
    }
}

// =============================================================================
// SECTION 4: Per-Voxel Triangulation
// =============================================================================

mod triangulation_tests {
    use super::*;

    #[test]
    fn should_emit_nothing_for_config_0_and_255() {
        assert_eq!(triangulate_cube(&cube_at(Point3::ZERO, densities_for(0)), 0.0).1, 0);
        assert_eq!(triangulate_cube(&cube_at(Point3::ZERO, densities_for(255)), 0.0).1, 0);
    }

    #[test]
    fn should_place_single_corner_triangle_on_incident_edges() {
        let (triangles, count) = triangulate_cube(&cube_at(Point3::ZERO, densities_for(1)), 0.0);
        assert_eq!(count, 1);

        let expected = [edge_midpoint(0), edge_midpoint(3), edge_midpoint(8)];
        for v in triangles[0].vertices() {
            assert!(expected.contains(&v), "unexpected vertex {:?}", v);
        }
    }

    #[test]
    fn should_reverse_table_order_when_emitting() {
        // row 1 is [0, 8, 3]
        let (triangles, _) = triangulate_cube(&cube_at(Point3::ZERO, densities_for(1)), 0.0);
        assert_eq!(triangles[0].a, edge_midpoint(3));
        assert_eq!(triangles[0].b, edge_midpoint(8));
        assert_eq!(triangles[0].c, edge_midpoint(0));
    }

    #[test]
    fn should_match_table_count_for_every_config() {
        for code in 0..=255u8 {
            let (_, count) = triangulate_cube(&cube_at(Point3::ZERO, densities_for(code)), 0.0);
            assert_eq!(count, TRIANGLE_COUNT[code as usize] as usize, "config {}", code);
            assert!(count <= 5);
        }
    }

    #[test]
    fn should_point_normals_toward_lower_density() {
        // bottom four corners below: a horizontal sheet at y = 0.5
        let (triangles, count) = triangulate_cube(&cube_at(Point3::ZERO, densities_for(0x0F)), 0.0);
        assert_eq!(count, 2);
        for tri in &triangles[..count] {
            let n = tri.normal();
            assert!(n.y < 0.0, "normal {:?} should face -y", n);
            assert!(n.x.abs() < 1e-6 && n.z.abs() < 1e-6);
            for v in tri.vertices() {
                assert_eq!(v.y, 0.5);
            }
        }
    }

    #[test]
    fn should_translate_with_the_voxel() {
        let origin = Point3::new(4.0, -2.0, 7.0);
        let (at_origin, n0) = triangulate_cube(&cube_at(Point3::ZERO, densities_for(0x5A)), 0.0);
        let (moved, n1) = triangulate_cube(&cube_at(origin, densities_for(0x5A)), 0.0);
        assert_eq!(n0, n1);
        for (a, b) in at_origin[..n0].iter().zip(moved[..n1].iter()) {
            for (va, vb) in a.vertices().iter().zip(b.vertices().iter()) {
                let d = (*va + origin) - *vb;
                assert!(d.length() < 1e-5);
            }
        }
    }
}

// =============================================================================
// SECTION 5: Grid Access
// =============================================================================

mod grid_tests {
    use super::*;

    #[test]
    fn should_index_x_fastest() {
        assert_eq!(grid_index(1, 0, 0, 4), 1);
        assert_eq!(grid_index(0, 1, 0, 4), 4);
        assert_eq!(grid_index(0, 0, 1, 4), 16);
        assert_eq!(grid_coord(16 + 4 + 1, 4), (1, 1, 1));
    }

    #[test]
    fn should_triangulate_single_voxel_grid_at_midpoints() {
        let grid = FnGrid {
            n: 2,
            f: |p: Point3| if p == Point3::ZERO { -1.0 } else { 1.0 },
        };

        let (triangles, count) = process_voxel(&grid, 0, 0, 0, 0.0);
        assert_eq!(count, 1);
        assert_eq!(triangles[0].a, Point3::new(0.0, 0.0, 0.5));
        assert_eq!(triangles[0].b, Point3::new(0.0, 0.5, 0.0));
        assert_eq!(triangles[0].c, Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn should_bound_total_triangles() {
        let grid = FnGrid {
            n: 6,
            // checkerboard field maximises sign changes
            f: |p: Point3| if ((p.x + p.y + p.z) as i32) % 2 == 0 { -1.0 } else { 1.0 },
        };

        let mut total = 0;
        for x in 0..grid.voxels_per_axis() {
            for y in 0..grid.voxels_per_axis() {
                for z in 0..grid.voxels_per_axis() {
                    total += process_voxel(&grid, x, y, z, 0.0).1;
                }
            }
        }
        assert!(total > 0);
        assert!(total <= max_triangles(grid.n));
    }
}
