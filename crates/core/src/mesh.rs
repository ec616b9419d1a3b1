//! Per-shape primitive lists produced by the face assembler.

/// Attribute indices of one corner. Values are 0-based; `-1` means the
/// corner did not reference that attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Index {
    pub vertex_index: i32,
    pub normal_index: i32,
    pub texcoord_index: i32,
}

impl Index {
    pub const UNSET: i32 = -1;

    pub fn new(vertex_index: i32, normal_index: i32, texcoord_index: i32) -> Self {
        Self {
            vertex_index,
            normal_index,
            texcoord_index,
        }
    }

    #[inline]
    pub fn vertex(&self) -> Option<usize> {
        component(self.vertex_index)
    }

    #[inline]
    pub fn normal(&self) -> Option<usize> {
        component(self.normal_index)
    }

    #[inline]
    pub fn texcoord(&self) -> Option<usize> {
        component(self.texcoord_index)
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new(Self::UNSET, Self::UNSET, Self::UNSET)
    }
}

fn component(raw: i32) -> Option<usize> {
    usize::try_from(raw).ok()
}

/// Polygon (or triangle) soup of one shape.
///
/// `indices` is flattened across faces; face `f` owns the next
/// `num_face_vertices[f]` entries. The three per-face vectors always have the
/// same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub indices: Vec<Index>,
    pub num_face_vertices: Vec<u32>,
    /// Index into the material list, `-1` when no material was active.
    pub material_ids: Vec<i32>,
    /// 0 = smoothing off.
    pub smoothing_group_ids: Vec<u32>,
}

impl Mesh {
    /// Append one face and its metadata.
    pub fn push_face(&mut self, corners: &[Index], material_id: i32, smoothing_group: u32) {
        self.indices.extend_from_slice(corners);
        self.num_face_vertices.push(corners.len() as u32);
        self.material_ids.push(material_id);
        self.smoothing_group_ids.push(smoothing_group);
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.num_face_vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_face_vertices.is_empty()
    }

    /// Iterate faces as corner slices.
    pub fn faces(&self) -> impl Iterator<Item = &[Index]> {
        let mut offset = 0usize;
        self.num_face_vertices.iter().map(move |&n| {
            let start = offset;
            offset += n as usize;
            &self.indices[start..offset]
        })
    }
}

/// Polylines from `l` directives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lines {
    pub indices: Vec<Index>,
    pub num_line_vertices: Vec<u32>,
}

impl Lines {
    pub fn push_line(&mut self, corners: &[Index]) {
        self.indices.extend_from_slice(corners);
        self.num_line_vertices.push(corners.len() as u32);
    }

    pub fn is_empty(&self) -> bool {
        self.num_line_vertices.is_empty()
    }
}

/// Points from `p` directives, flattened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Points {
    pub indices: Vec<Index>,
}

impl Points {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Named group of primitives bounded by `g`/`o` directives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub name: String,
    pub mesh: Mesh,
    pub lines: Lines,
    pub points: Points,
}

impl Shape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// `true` if the shape holds no face, line or point.
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty() && self.lines.is_empty() && self.points.is_empty()
    }
}
