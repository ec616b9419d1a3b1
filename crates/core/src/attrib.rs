//! Global vertex attribute pools shared by every shape of a parse.

use crate::Real;

/// Flat attribute arrays in file order.
///
/// Indices stored in [`crate::Index`] point into these pools, counted in
/// elements (a vertex index `i` addresses `vertices[3 * i..3 * i + 3]`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrib {
    /// `v` positions, stride 3.
    pub vertices: Vec<Real>,
    /// `v` fourth component, one per vertex (1.0 when omitted).
    pub vertex_weights: Vec<Real>,
    /// `vn` normals, stride 3.
    pub normals: Vec<Real>,
    /// `vt` coordinates, stride 2.
    pub texcoords: Vec<Real>,
    /// `vt` third component, one per texcoord (0.0 when omitted).
    pub texcoord_ws: Vec<Real>,
    /// Vertex colours, stride 3. Empty unless the source carried colours.
    pub colors: Vec<Real>,
}

impl Attrib {
    pub const VERTEX_STRIDE: usize = 3;
    pub const NORMAL_STRIDE: usize = 3;
    pub const TEXCOORD_STRIDE: usize = 2;
    pub const COLOR_STRIDE: usize = 3;

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::VERTEX_STRIDE
    }

    #[inline]
    pub fn normal_count(&self) -> usize {
        self.normals.len() / Self::NORMAL_STRIDE
    }

    #[inline]
    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len() / Self::TEXCOORD_STRIDE
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.colors.len() / Self::COLOR_STRIDE
    }

    /// Position of vertex `i`, if it exists.
    pub fn position(&self, i: usize) -> Option<[Real; 3]> {
        triple(&self.vertices, i)
    }

    pub fn normal(&self, i: usize) -> Option<[Real; 3]> {
        triple(&self.normals, i)
    }

    pub fn texcoord(&self, i: usize) -> Option<[Real; 2]> {
        let s = self.texcoords.get(2 * i..2 * i + 2)?;
        Some([s[0], s[1]])
    }

    pub fn color(&self, i: usize) -> Option<[Real; 3]> {
        triple(&self.colors, i)
    }

    /// `true` when every pool length is a multiple of its stride.
    pub fn is_well_formed(&self) -> bool {
        self.vertices.len() % Self::VERTEX_STRIDE == 0
            && self.normals.len() % Self::NORMAL_STRIDE == 0
            && self.texcoords.len() % Self::TEXCOORD_STRIDE == 0
            && self.colors.len() % Self::COLOR_STRIDE == 0
    }
}

fn triple(data: &[Real], i: usize) -> Option<[Real; 3]> {
    let s = data.get(3 * i..3 * i + 3)?;
    Some([s[0], s[1], s[2]])
}
