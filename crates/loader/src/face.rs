//! Corner parsing, index resolution, and face emission.

use glam::Vec3;
use objcore::{Attrib, Index, Mesh, ParseError};

use crate::config::{LoadConfig, TriangulationMethod};
use crate::triangulate::triangulate;

/// The three primitive directives that take corner lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Primitive {
    Face,
    Line,
    Point,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Face => "f",
            Primitive::Line => "l",
            Primitive::Point => "p",
        }
    }

    pub fn min_corners(self) -> usize {
        match self {
            Primitive::Face => 3,
            Primitive::Line => 2,
            Primitive::Point => 1,
        }
    }
}

/// Attribute pool sizes at the time a directive is read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AttribCounts {
    pub vertices: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl AttribCounts {
    pub fn of(attrib: &Attrib) -> Self {
        Self {
            vertices: attrib.vertex_count(),
            texcoords: attrib.texcoord_count(),
            normals: attrib.normal_count(),
        }
    }
}

/// Resolve every corner of a directive. The first bad corner fails the whole list.
pub fn resolve_corners<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    counts: AttribCounts,
) -> Result<Vec<Index>, ParseError> {
    tokens
        .into_iter()
        .map(|token| resolve_corner(token, counts))
        .collect()
}

/// Parse `v`, `v/t`, `v//n` or `v/t/n` and resolve each component to a 0-based index.
pub fn resolve_corner(token: &str, counts: AttribCounts) -> Result<Index, ParseError> {
    let malformed = || ParseError::MalformedCorner {
        corner: token.to_string(),
    };

    let mut parts = token.split('/');
    let v = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
    let t = parts.next().filter(|s| !s.is_empty());
    let n = parts.next().filter(|s| !s.is_empty());
    if parts.next().is_some() {
        return Err(malformed());
    }

    let vertex_index = resolve_component(v, counts.vertices, "vertex", token)?;
    let texcoord_index = match t {
        Some(t) => resolve_component(t, counts.texcoords, "texcoord", token)?,
        None => Index::UNSET,
    };
    let normal_index = match n {
        Some(n) => resolve_component(n, counts.normals, "normal", token)?,
        None => Index::UNSET,
    };

    Ok(Index::new(vertex_index, normal_index, texcoord_index))
}

/// OBJ indices are 1-based; negative values count back from the current end
/// (`-1` is the last element appended so far). Zero is never valid.
pub fn resolve_index(raw: i64, available: usize, attribute: &'static str) -> Result<i32, ParseError> {
    let out_of_range = || ParseError::IndexOutOfRange {
        attribute,
        raw,
        available,
    };
    let resolved = match raw {
        r if r > 0 => r - 1,
        r if r < 0 => available as i64 + r,
        _ => return Err(out_of_range()),
    };
    if resolved < 0 || resolved >= available as i64 {
        return Err(out_of_range());
    }
    i32::try_from(resolved).map_err(|_| out_of_range())
}

fn resolve_component(
    text: &str,
    available: usize,
    attribute: &'static str,
    corner: &str,
) -> Result<i32, ParseError> {
    let raw = text.parse::<i64>().map_err(|_| ParseError::MalformedCorner {
        corner: corner.to_string(),
    })?;
    resolve_index(raw, available, attribute)
}

/// Carries the active material and smoothing group and writes faces into a mesh.
#[derive(Clone, Debug)]
pub struct FaceAssembler {
    pub material_id: i32,
    pub smoothing_group: u32,
    triangulate: bool,
    method: TriangulationMethod,
}

impl FaceAssembler {
    pub fn new(config: &LoadConfig) -> Self {
        Self {
            material_id: -1,
            smoothing_group: 0,
            triangulate: config.triangulate,
            method: config.triangulation,
        }
    }

    /// Append one polygon (at least 3 corners) to `mesh`, split into triangles
    /// when triangulation is on. Returns the number of faces written.
    pub fn emit_face(&self, corners: &[Index], attrib: &Attrib, mesh: &mut Mesh) -> usize {
        if !self.triangulate || corners.len() == 3 {
            mesh.push_face(corners, self.material_id, self.smoothing_group);
            return 1;
        }

        let positions = match self.method {
            TriangulationMethod::EarClip => corner_positions(corners, attrib),
            TriangulationMethod::Fan => None,
        };
        let triangles = triangulate(self.method, corners.len(), positions.as_deref());
        for [a, b, c] in &triangles {
            mesh.push_face(
                &[corners[*a], corners[*b], corners[*c]],
                self.material_id,
                self.smoothing_group,
            );
        }
        triangles.len()
    }
}

fn corner_positions(corners: &[Index], attrib: &Attrib) -> Option<Vec<Vec3>> {
    corners
        .iter()
        .map(|c| c.vertex().and_then(|i| attrib.position(i)).map(Vec3::from_array))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: AttribCounts = AttribCounts {
        vertices: 4,
        texcoords: 2,
        normals: 1,
    };

    fn quad_attrib() -> Attrib {
        Attrib {
            vertices: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            ..Default::default()
        }
    }

    #[test]
    fn corner_forms() {
        assert_eq!(resolve_corner("2", COUNTS), Ok(Index::new(1, -1, -1)));
        assert_eq!(resolve_corner("2/1", COUNTS), Ok(Index::new(1, -1, 0)));
        assert_eq!(resolve_corner("2//1", COUNTS), Ok(Index::new(1, 0, -1)));
        assert_eq!(resolve_corner("4/2/1", COUNTS), Ok(Index::new(3, 0, 1)));
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(resolve_corner("-1/-1/-1", COUNTS), Ok(Index::new(3, 0, 1)));
        assert_eq!(resolve_corner("-4", COUNTS), Ok(Index::new(0, -1, -1)));
        assert_eq!(resolve_index(-1, 7, "vertex"), resolve_index(7, 7, "vertex"));
    }

    #[test]
    fn out_of_range_and_zero_are_rejected() {
        assert!(matches!(
            resolve_corner("5", COUNTS),
            Err(ParseError::IndexOutOfRange { attribute: "vertex", raw: 5, available: 4 })
        ));
        assert!(matches!(
            resolve_corner("-5", COUNTS),
            Err(ParseError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            resolve_corner("0", COUNTS),
            Err(ParseError::IndexOutOfRange { raw: 0, .. })
        ));
        assert!(matches!(
            resolve_corner("1/3", COUNTS),
            Err(ParseError::IndexOutOfRange { attribute: "texcoord", .. })
        ));
    }

    #[test]
    fn malformed_corners() {
        for token in ["", "/1", "a", "1/x", "1/1/1/1", "1.5"] {
            assert!(
                matches!(resolve_corner(token, COUNTS), Err(ParseError::MalformedCorner { .. })),
                "{token}"
            );
        }
    }

    #[test]
    fn quad_fans_into_two_triangles() {
        let attrib = quad_attrib();
        let corners = resolve_corners(["1", "2", "3", "4"], AttribCounts::of(&attrib)).unwrap();
        let mut asm = FaceAssembler::new(&LoadConfig::default());
        asm.material_id = 2;
        asm.smoothing_group = 5;

        let mut mesh = Mesh::default();
        assert_eq!(asm.emit_face(&corners, &attrib, &mut mesh), 2);
        assert_eq!(mesh.num_face_vertices, vec![3, 3]);
        assert_eq!(mesh.material_ids, vec![2, 2]);
        assert_eq!(mesh.smoothing_group_ids, vec![5, 5]);
        let verts: Vec<i32> = mesh.indices.iter().map(|i| i.vertex_index).collect();
        assert_eq!(verts, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn polygon_kept_when_not_triangulating() {
        let attrib = quad_attrib();
        let corners = resolve_corners(["1", "2", "3", "4"], AttribCounts::of(&attrib)).unwrap();
        let asm = FaceAssembler::new(&LoadConfig::default().with_triangulate(false));

        let mut mesh = Mesh::default();
        assert_eq!(asm.emit_face(&corners, &attrib, &mut mesh), 1);
        assert_eq!(mesh.num_face_vertices, vec![4]);
        assert_eq!(mesh.material_ids, vec![-1]);
    }

    #[test]
    fn ear_clip_emits_n_minus_two_triangles() {
        let attrib = quad_attrib();
        let corners = resolve_corners(["1", "2", "3", "4"], AttribCounts::of(&attrib)).unwrap();
        let config = LoadConfig::default().with_triangulation(TriangulationMethod::EarClip);
        let asm = FaceAssembler::new(&config);

        let mut mesh = Mesh::default();
        assert_eq!(asm.emit_face(&corners, &attrib, &mut mesh), 2);
        assert_eq!(mesh.indices.len(), 6);
    }
}
