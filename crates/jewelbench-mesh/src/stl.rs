//! STL (Stereolithography) decoding and encoding on top of [`stl_io`].
//!
//! `stl_io` handles both ASCII and binary STL and returns a deduplicated
//! indexed mesh. This module sits in front of it to:
//!
//! - strip a UTF-8 byte-order mark and leading whitespace from ASCII files
//! - route binary files that carry `solid` in their 80-byte header to the
//!   binary reader
//! - reject binary headers that declare more triangles than the buffer
//!   holds, before any allocation is sized from that count
//! - widen coordinates to `f64` and indices to `u32`
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored, recomputed from winding)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```
//!
//! Bytes after the last declared triangle are ignored.

use std::borrow::Cow;
use std::io::Cursor;

use nalgebra::Point3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::IndexedMesh;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode an STL buffer, detecting ASCII vs binary.
///
/// # Errors
///
/// Returns an error if the buffer is not a valid STL or holds no triangles.
pub fn decode(bytes: &[u8]) -> MeshResult<IndexedMesh> {
    let input = if is_binary(bytes) {
        check_binary_size(bytes)?;
        blank_solid_header(bytes)
    } else {
        Cow::Borrowed(trim_text_start(bytes))
    };

    let parsed = stl_io::read_stl(&mut Cursor::new(input.as_ref())).map_err(MeshError::Parse)?;
    let mesh = convert(parsed)?;

    if mesh.is_empty() {
        return Err(MeshError::Empty);
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Decoded STL"
    );

    Ok(mesh)
}

fn trim_text_start(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    trim_text_start(bytes)
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case(b"solid"))
}

/// ASCII STL is text; a `solid` prefix followed by non-UTF-8 data whose
/// length covers the declared triangle count is a binary file.
fn is_binary(bytes: &[u8]) -> bool {
    if !starts_with_solid(bytes) {
        return true;
    }
    declared_triangles(bytes)
        .is_some_and(|count| expected_binary_len(count) <= bytes.len() as u64)
        && std::str::from_utf8(bytes).is_err()
}

fn declared_triangles(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn expected_binary_len(count: u32) -> u64 {
    (HEADER_SIZE as u64 + 4) + u64::from(count) * TRIANGLE_SIZE as u64
}

fn check_binary_size(bytes: &[u8]) -> MeshResult<()> {
    let declared = declared_triangles(bytes).ok_or(MeshError::TooSmall { len: bytes.len() })?;
    let available = ((bytes.len() - HEADER_SIZE - 4) / TRIANGLE_SIZE) as u64;
    if available < u64::from(declared) {
        return Err(MeshError::Truncated {
            declared,
            available,
        });
    }
    if bytes.len() as u64 > expected_binary_len(declared) {
        tracing::debug!(
            trailing = bytes.len() as u64 - expected_binary_len(declared),
            "Ignoring trailing bytes after binary STL triangles"
        );
    }
    Ok(())
}

/// `stl_io` sniffs the header text, so a binary header starting with
/// `solid` is blanked before handing it over.
fn blank_solid_header(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !starts_with_solid(bytes) {
        return Cow::Borrowed(bytes);
    }
    let mut owned = bytes.to_vec();
    owned[..HEADER_SIZE].fill(0);
    Cow::Owned(owned)
}

fn convert(parsed: stl_io::IndexedMesh) -> MeshResult<IndexedMesh> {
    if u32::try_from(parsed.vertices.len()).is_err() {
        return Err(MeshError::TooManyVertices {
            max: u64::from(u32::MAX),
        });
    }

    let vertices: Vec<Point3<f64>> = parsed
        .vertices
        .iter()
        .map(|v| Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])))
        .collect();

    let mut faces = Vec::with_capacity(parsed.faces.len());
    for (index, face) in parsed.faces.iter().enumerate() {
        let corners = face.vertices;
        if corners
            .iter()
            .any(|&i| !vertices[i].iter().all(|c| c.is_finite()))
        {
            return Err(MeshError::NonFinite { triangle: index });
        }
        // Bounded by the vertex count check above
        #[allow(clippy::cast_possible_truncation)]
        faces.push(corners.map(|i| i as u32));
    }

    Ok(IndexedMesh::from_parts(vertices, faces))
}

/// Encode a mesh as binary STL through `stl_io`.
///
/// Coordinates are narrowed to `f32` as the format requires.
#[must_use]
pub fn encode_binary(mesh: &IndexedMesh) -> Vec<u8> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[v0, v1, v2]| {
            let normal = (v1 - v0).cross(&(v2 - v0));
            let len = normal.norm();
            let normal = if len > f64::EPSILON {
                normal / len
            } else {
                normal * 0.0
            };
            stl_io::Triangle {
                normal: stl_io::Normal::new(narrow([normal.x, normal.y, normal.z])),
                vertices: [v0, v1, v2].map(|p| stl_io::Vertex::new(narrow([p.x, p.y, p.z]))),
            }
        })
        .collect();

    let mut out = Vec::with_capacity(HEADER_SIZE + 4 + triangles.len() * TRIANGLE_SIZE);
    // Writing into a Vec cannot fail
    let _ = stl_io::write_stl(&mut out, triangles.iter());
    out
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(coords: [f64; 3]) -> [f32; 3] {
    coords.map(|c| c as f32)
}
