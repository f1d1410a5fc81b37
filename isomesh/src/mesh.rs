//! Mesh output: flat buffers for the mesh host, statistics and OBJ export.

use std::io::Write;

use isomesh_core::{Point3, Triangle};

use crate::error::Result;

/// Flat vertex and index arrays handed to the mesh host.
///
/// Vertices are not shared: triangle `k` owns vertices `3k`, `3k + 1` and
/// `3k + 2`, and `indices[i] == i`. The host computes per-face normals from
/// this layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Three positions per triangle, in winding order.
    pub vertices: Vec<[f32; 3]>,
    /// `0, 1, 2, ..., 3·triangle_count - 1`.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Flatten `triangles` into vertex and index arrays.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        for tri in triangles {
            vertices.push(tri.a.as_array());
            vertices.push(tri.b.as_array());
            vertices.push(tri.c.as_array());
        }
        let indices = (0..vertices.len() as u32).collect();

        Self { vertices, indices }
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangle `k`, if present.
    pub fn triangle(&self, k: usize) -> Option<Triangle> {
        let start = k.checked_mul(3)?;
        let i = self.indices.get(start..start.checked_add(3)?)?;
        let v = |j: usize| self.vertices.get(i[j] as usize).copied().map(Point3::from);
        Some(Triangle::new(v(0)?, v(1)?, v(2)?))
    }

    /// Vertex data as raw bytes (12 bytes per vertex, native endian).
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes (4 bytes per index, native endian).
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Mesh statistics after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices (triangle_count * 3).
    pub vertex_count: usize,
    /// Sum of the finite triangle areas.
    pub surface_area: f32,
    /// Bounding box minimum over finite vertices.
    pub bbox_min: Point3,
    /// Bounding box maximum over finite vertices.
    pub bbox_max: Point3,
    /// Finite triangles with zero area.
    pub degenerate_count: usize,
    /// Triangles with a NaN or infinite vertex.
    pub non_finite_count: usize,
}

impl Default for MeshStats {
    fn default() -> Self {
        Self {
            triangle_count: 0,
            vertex_count: 0,
            surface_area: 0.0,
            bbox_min: Point3::ZERO,
            bbox_max: Point3::ZERO,
            degenerate_count: 0,
            non_finite_count: 0,
        }
    }
}

impl MeshStats {
    /// Compute statistics from a set of triangles.
    ///
    /// Non-finite triangles are counted but left out of the area and bounding
    /// box. An empty (or entirely non-finite) mesh has a zero bounding box.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut stats = Self {
            triangle_count: triangles.len(),
            vertex_count: triangles.len() * 3,
            ..Self::default()
        };

        let mut bbox: Option<(Point3, Point3)> = None;
        for tri in triangles {
            if !tri.is_finite() {
                stats.non_finite_count += 1;
                continue;
            }

            for v in tri.vertices() {
                bbox = Some(match bbox {
                    None => (v, v),
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                });
            }

            let area = tri.area();
            if area == 0.0 {
                stats.degenerate_count += 1;
            }
            stats.surface_area += area;
        }

        if let Some((lo, hi)) = bbox {
            stats.bbox_min = lo;
            stats.bbox_max = hi;
        }
        stats
    }

    /// Extent of the bounding box.
    #[inline]
    pub fn extent(&self) -> Point3 {
        self.bbox_max - self.bbox_min
    }
}

/// Write `triangles` as a Wavefront OBJ document.
///
/// Every triangle gets its own three `v` lines followed by one `f` line per
/// triangle (1-based indices), mirroring [`MeshBuffers`].
///
/// # Errors
/// Returns `Io` if the writer fails.
pub fn write_obj<W: Write>(mut writer: W, triangles: &[Triangle]) -> Result<()> {
    writeln!(writer, "# isomesh generated mesh")?;
    writeln!(
        writer,
        "# {} triangles, {} vertices",
        triangles.len(),
        triangles.len() * 3
    )?;
    writeln!(writer)?;

    for tri in triangles {
        for v in tri.vertices() {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
    }

    writeln!(writer)?;

    for i in 0..triangles.len() {
        let base = i * 3 + 1;
        writeln!(writer, "f {} {} {}", base, base + 1, base + 2)?;
    }

    writer.flush()?;
    Ok(())
}

/// Export mesh to OBJ format string.
pub fn triangles_to_obj(triangles: &[Triangle]) -> String {
    let mut bytes = Vec::with_capacity(triangles.len() * 96 + 64);
    // writing into a Vec<u8> cannot fail
    let _ = write_obj(&mut bytes, triangles);
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Vec<Triangle> {
        vec![
            Triangle::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
            Triangle::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ),
        ]
    }

    #[test]
    fn test_mesh_buffers_layout() {
        let triangles = two_triangles();
        let buffers = MeshBuffers::from_triangles(&triangles);

        assert_eq!(buffers.vertices.len(), 6);
        assert_eq!(buffers.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(buffers.triangle_count(), 2);
        assert_eq!(buffers.vertices[4], [0.0, 1.0, 0.0]);
        assert_eq!(buffers.triangle(1), Some(triangles[1]));
        assert_eq!(buffers.triangle(2), None);
    }

    #[test]
    fn test_mesh_buffers_bytes() {
        let buffers = MeshBuffers::from_triangles(&two_triangles());
        assert_eq!(buffers.vertex_bytes().len(), 6 * 12);
        assert_eq!(buffers.index_bytes().len(), 6 * 4);
        assert_eq!(&buffers.index_bytes()[4..8], &1u32.to_ne_bytes());

        let empty = MeshBuffers::from_triangles(&[]);
        assert!(empty.is_empty());
        assert!(empty.vertex_bytes().is_empty());
    }

    #[test]
    fn test_mesh_stats() {
        let stats = MeshStats::from_triangles(&two_triangles());

        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 6);
        assert!((stats.surface_area - 1.0).abs() < 1e-6);
        assert_eq!(stats.bbox_min, Point3::ZERO);
        assert_eq!(stats.bbox_max, Point3::splat(1.0));
        assert_eq!(stats.degenerate_count, 0);
        assert_eq!(stats.non_finite_count, 0);
    }

    #[test]
    fn test_mesh_stats_degenerate_and_non_finite() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let triangles = vec![
            Triangle::new(p, p, p),
            Triangle::new(Point3::new(f32::NAN, 0.0, 0.0), p, p),
        ];
        let stats = MeshStats::from_triangles(&triangles);

        assert_eq!(stats.degenerate_count, 1);
        assert_eq!(stats.non_finite_count, 1);
        assert_eq!(stats.surface_area, 0.0);
        assert_eq!(stats.bbox_min, p);
        assert_eq!(stats.extent(), Point3::ZERO);
    }

    #[test]
    fn test_triangle_out_of_range() {
        let buffers = MeshBuffers::from_triangles(&two_triangles());
        assert!(buffers.triangle(1).is_some());
        assert_eq!(buffers.triangle(2), None);
        assert_eq!(buffers.triangle(usize::MAX / 2), None);
        assert_eq!(buffers.triangle(usize::MAX), None);
    }

    #[test]
    fn test_mesh_stats_empty() {
        assert_eq!(MeshStats::from_triangles(&[]), MeshStats::default());
    }

    #[test]
    fn test_triangles_to_obj() {
        let obj = triangles_to_obj(&two_triangles()[..1]);

        assert!(obj.contains("v 0 0 0"));
        assert!(obj.contains("v 1 0 0"));
        assert!(obj.contains("v 0 1 0"));
        assert!(obj.contains("f 1 2 3"));
        assert!(!obj.contains("f 4 5 6"));
    }

    #[test]
    fn test_write_obj_to_file() {
        let path = std::env::temp_dir().join(format!("isomesh_obj_{}.obj", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        write_obj(std::io::BufWriter::new(file), &two_triangles()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert!(text.contains("f 4 5 6"));
    }
}
