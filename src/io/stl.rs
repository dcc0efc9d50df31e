//! STL mesh reader.
//!
//! STL stores a flat soup of triangles where every triangle repeats its own
//! corner coordinates. To recover vertex adjacency the reader merges
//! coincident corners into shared vertices.

use crate::geom::mesh::{Mesh, TriangleIndex};
use crate::geom::point::Point;
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::path::Path;
use tracing::debug;

/// Binary STL: 80 header + 4 bytes count + 50 bytes per triangle
const BINARY_HEADER_LEN: usize = 80;
const BINARY_TRIANGLE_LEN: usize = 50;

/// Quantization scale for merging coincident vertices (≈ 1 nm).
const DEDUP_SCALE: f64 = 1e9;

/// Reads triangles from an ASCII or binary STL file into a [`Mesh`].
///
/// Vertices closer than the deduplication tolerance are merged, so the
/// returned mesh is indexed and its edges describe the surface graph.
pub fn read_stl(path: &Path) -> Result<Mesh> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mesh = if looks_like_ascii(&bytes) {
        parse_stl_ascii(&bytes)
            .with_context(|| format!("Failed to parse ASCII STL: {}", path.display()))?
    } else {
        parse_stl_binary(&bytes)
            .with_context(|| format!("Failed to parse binary STL: {}", path.display()))?
    };

    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded STL mesh"
    );
    Ok(mesh)
}

/// Some binary files also start with "solid" in the header, so the size and
/// the presence of ASCII keywords are checked too.
fn looks_like_ascii(bytes: &[u8]) -> bool {
    let head_len = bytes.len().min(512);
    let head = String::from_utf8_lossy(&bytes[..head_len]);
    if !head.trim_start().starts_with("solid") {
        return false;
    }
    if bytes.len() >= BINARY_HEADER_LEN + 4 {
        let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
        let expected = BINARY_HEADER_LEN + 4 + count * BINARY_TRIANGLE_LEN;
        if expected == bytes.len() && !head.contains("facet") {
            return false;
        }
    }
    head.contains("facet") || head.contains("vertex") || head.contains("endsolid")
}

fn parse_stl_ascii(bytes: &[u8]) -> Result<Mesh> {
    let mut dedup = VertexDedup::default();
    let mut faces: Vec<TriangleIndex> = Vec::new();
    let mut corners: Vec<Point> = Vec::new();

    for (line_no, line) in bytes.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("vertex") {
            let coords: Vec<&str> = rest.split_whitespace().collect();
            if coords.len() < 3 {
                bail!("Line {}: vertex needs 3 coordinates", line_no + 1);
            }
            let parse = |s: &str| -> Result<f64> {
                s.parse()
                    .with_context(|| format!("Line {}: invalid coordinate `{s}`", line_no + 1))
            };
            corners.push(Point::new(
                parse(coords[0])?,
                parse(coords[1])?,
                parse(coords[2])?,
            ));
        } else if trimmed.starts_with("endloop") {
            if corners.len() == 3 {
                let i0 = dedup.insert(corners[0]);
                let i1 = dedup.insert(corners[1]);
                let i2 = dedup.insert(corners[2]);
                faces.push(TriangleIndex(i0, i1, i2));
            }
            corners.clear();
        }
    }

    Ok(Mesh::new(dedup.vertices, faces))
}

fn parse_stl_binary(bytes: &[u8]) -> Result<Mesh> {
    if bytes.len() < BINARY_HEADER_LEN + 4 {
        bail!("File too short for a binary STL header ({} bytes)", bytes.len());
    }
    let num_triangles = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let body = &bytes[BINARY_HEADER_LEN + 4..];
    if body.len() < num_triangles * BINARY_TRIANGLE_LEN {
        bail!(
            "Truncated binary STL: {} triangles declared, {} bytes of data",
            num_triangles,
            body.len()
        );
    }

    let mut dedup = VertexDedup::default();
    let mut faces: Vec<TriangleIndex> = Vec::with_capacity(num_triangles);

    for record in body.chunks_exact(BINARY_TRIANGLE_LEN).take(num_triangles) {
        // Skip normal (3 x f32 = 12 bytes)
        let mut corners = &record[12..48];
        let mut tri_idx: [usize; 3] = [0; 3];
        for slot in tri_idx.iter_mut() {
            let mut v_bytes = [0u8; 12];
            corners.read_exact(&mut v_bytes)?;
            let x = f32::from_le_bytes([v_bytes[0], v_bytes[1], v_bytes[2], v_bytes[3]]) as f64;
            let y = f32::from_le_bytes([v_bytes[4], v_bytes[5], v_bytes[6], v_bytes[7]]) as f64;
            let z = f32::from_le_bytes([v_bytes[8], v_bytes[9], v_bytes[10], v_bytes[11]]) as f64;
            *slot = dedup.insert(Point::new(x, y, z));
        }
        faces.push(TriangleIndex(tri_idx[0], tri_idx[1], tri_idx[2]));
    }

    Ok(Mesh::new(dedup.vertices, faces))
}

#[derive(Default)]
struct VertexDedup {
    map: HashMap<(i64, i64, i64), usize>,
    vertices: Vec<Point>,
}

impl VertexDedup {
    fn insert(&mut self, p: Point) -> usize {
        let key = (
            (p.x * DEDUP_SCALE).round() as i64,
            (p.y * DEDUP_SCALE).round() as i64,
            (p.z * DEDUP_SCALE).round() as i64,
        );
        *self.map.entry(key).or_insert_with(|| {
            self.vertices.push(p);
            self.vertices.len() - 1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const TETRA: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.5, 1.0, 0.0],
        [0.5, 0.5, 1.0],
    ];
    const TETRA_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

    fn tetra_ascii() -> String {
        let mut s = String::from("solid tetra\n");
        for f in TETRA_FACES {
            s.push_str("  facet normal 0 0 1\n    outer loop\n");
            for i in f {
                let p = TETRA[i];
                s.push_str(&format!("      vertex {} {} {}\n", p[0], p[1], p[2]));
            }
            s.push_str("    endloop\n  endfacet\n");
        }
        s.push_str("endsolid tetra\n");
        s
    }

    fn tetra_binary(header: &str) -> Vec<u8> {
        let mut out = vec![0u8; 80];
        let h = header.as_bytes();
        out[..h.len()].copy_from_slice(h);
        out.extend_from_slice(&(TETRA_FACES.len() as u32).to_le_bytes());
        for f in TETRA_FACES {
            for c in [0.0f32, 0.0, 1.0] {
                out.extend_from_slice(&c.to_le_bytes());
            }
            for i in f {
                for c in TETRA[i] {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_read_stl_ascii() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tetra.stl");
        std::fs::write(&path, tetra_ascii())?;

        let mesh = read_stl(&path)?;
        assert_eq!(mesh.face_count(), 4);
        // Corners shared between facets are merged
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edges().len(), 6);
        Ok(())
    }

    #[test]
    fn test_parse_ascii_from_memory() -> Result<()> {
        let mesh = parse_stl_ascii(tetra_ascii().as_bytes())?;
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex_count(), 4);

        let bad = "solid x\n facet normal 0 0 1\n  outer loop\n   vertex 0 0\n";
        let err = parse_stl_ascii(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 4"));
        Ok(())
    }

    #[test]
    fn test_read_stl_binary() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tetra.stl");
        let mut file = File::create(&path)?;
        file.write_all(&tetra_binary("binary STL - tetra"))?;
        drop(file);

        let mesh = read_stl(&path)?;
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex_count(), 4);
        Ok(())
    }

    #[test]
    fn test_read_binary_with_solid_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tricky.stl");
        std::fs::write(&path, tetra_binary("solid exported by a CAD tool"))?;

        let mesh = read_stl(&path)?;
        assert_eq!(mesh.face_count(), 4);
        Ok(())
    }

    #[test]
    fn test_truncated_binary_fails() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("short.stl");
        let mut bytes = tetra_binary("binary");
        bytes.truncate(120);
        std::fs::write(&path, bytes)?;

        assert!(read_stl(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_file_fails() {
        let err = read_stl(Path::new("/nonexistent/mesh.stl")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
