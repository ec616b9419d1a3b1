//! Append-only attribute store filled while streaming `v`/`vn`/`vt`/`vc` lines.

use objcore::{Attrib, Real};

const WHITE: [Real; 3] = [1.0, 1.0, 1.0];

/// Builds an [`Attrib`] in file order. No deduplication: face corners index
/// whatever the source file wrote.
///
/// Colours are resolved per vertex at [`finish`](Self::finish): an inline
/// `v x y z r g b` colour wins, otherwise the `k`-th `vc` line colours vertex
/// `k`, otherwise the vertex is white.
#[derive(Debug, Default)]
pub struct AttribStore {
    attrib: Attrib,
    /// Inline colours by vertex; empty until a `v` line carries one.
    inline_colors: Vec<Option<[Real; 3]>>,
    /// `vc` lines in file order.
    listed_colors: Vec<[Real; 3]>,
}

impl AttribStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_vertex(&mut self, x: Real, y: Real, z: Real) {
        self.append_weighted_vertex([x, y, z], 1.0);
    }

    pub fn append_weighted_vertex(&mut self, position: [Real; 3], w: Real) {
        self.attrib.vertices.extend_from_slice(&position);
        self.attrib.vertex_weights.push(w);
    }

    /// Vertex with an inline colour (`v x y z r g b`).
    pub fn append_colored_vertex(&mut self, position: [Real; 3], color: [Real; 3]) {
        self.inline_colors.resize(self.attrib.vertex_count(), None);
        self.inline_colors.push(Some(color));
        self.append_weighted_vertex(position, 1.0);
    }

    pub fn append_normal(&mut self, x: Real, y: Real, z: Real) {
        self.attrib.normals.extend_from_slice(&[x, y, z]);
    }

    pub fn append_texcoord(&mut self, u: Real, v: Real) {
        self.append_texcoord_w(u, v, 0.0);
    }

    pub fn append_texcoord_w(&mut self, u: Real, v: Real, w: Real) {
        self.attrib.texcoords.extend_from_slice(&[u, v]);
        self.attrib.texcoord_ws.push(w);
    }

    /// `vc r g b` line.
    pub fn append_color(&mut self, r: Real, g: Real, b: Real) {
        self.listed_colors.push([r, g, b]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.attrib.vertex_count()
    }

    #[inline]
    pub fn normal_count(&self) -> usize {
        self.attrib.normal_count()
    }

    #[inline]
    pub fn texcoord_count(&self) -> usize {
        self.attrib.texcoord_count()
    }

    /// Read access to what has been appended so far. Colours are only filled
    /// in by `finish`.
    pub fn attrib(&self) -> &Attrib {
        &self.attrib
    }

    /// Finish the store. With `keep_colors`, every vertex gets a colour as soon
    /// as any colour was seen; otherwise `colors` stays empty.
    pub fn finish(mut self, keep_colors: bool) -> Attrib {
        if !keep_colors || (self.inline_colors.is_empty() && self.listed_colors.is_empty()) {
            return self.attrib;
        }

        let count = self.attrib.vertex_count();
        if self.listed_colors.len() > count {
            log::debug!(
                "{} vc lines but only {} vertices; extra colours dropped",
                self.listed_colors.len(),
                count
            );
        }
        let colors = (0..count).flat_map(|i| {
            self.inline_colors
                .get(i)
                .copied()
                .flatten()
                .or_else(|| self.listed_colors.get(i).copied())
                .unwrap_or(WHITE)
        });
        self.attrib.colors = colors.collect();
        self.attrib
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order_with_strides() {
        let mut store = AttribStore::new();
        store.append_vertex(1.0, 2.0, 3.0);
        store.append_vertex(4.0, 5.0, 6.0);
        store.append_normal(0.0, 0.0, 1.0);
        store.append_texcoord(0.25, 0.75);
        assert_eq!(store.vertex_count(), 2);

        let attrib = store.finish(true);
        assert_eq!(attrib.vertices, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(attrib.vertex_weights, vec![1.0, 1.0]);
        assert_eq!(attrib.normals, vec![0.0, 0.0, 1.0]);
        assert_eq!(attrib.texcoords, vec![0.25, 0.75]);
        assert_eq!(attrib.texcoord_ws, vec![0.0]);
        assert!(attrib.colors.is_empty());
        assert!(attrib.is_well_formed());
    }

    #[test]
    fn inline_colors_are_padded_to_vertex_count() {
        let mut store = AttribStore::new();
        store.append_vertex(0.0, 0.0, 0.0);
        store.append_colored_vertex([1.0, 0.0, 0.0], [0.5, 0.5, 0.5]);
        store.append_vertex(0.0, 1.0, 0.0);

        let attrib = store.finish(true);
        assert_eq!(
            attrib.colors,
            vec![1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0]
        );
        assert_eq!(attrib.color_count(), attrib.vertex_count());
    }

    #[test]
    fn vc_lines_and_inline_colors_stay_aligned() {
        let mut store = AttribStore::new();
        store.append_color(0.1, 0.1, 0.1);
        store.append_color(0.2, 0.2, 0.2);
        store.append_color(0.3, 0.3, 0.3);
        store.append_colored_vertex([0.0; 3], [1.0, 0.0, 0.0]);
        store.append_vertex(1.0, 0.0, 0.0);
        store.append_vertex(2.0, 0.0, 0.0);
        store.append_vertex(3.0, 0.0, 0.0);

        let attrib = store.finish(true);
        assert_eq!(attrib.color_count(), attrib.vertex_count());
        assert_eq!(attrib.color(0), Some([1.0, 0.0, 0.0]));
        assert_eq!(attrib.color(1), Some([0.2, 0.2, 0.2]));
        assert_eq!(attrib.color(2), Some([0.3, 0.3, 0.3]));
        assert_eq!(attrib.color(3), Some([1.0, 1.0, 1.0]));
    }

    #[test]
    fn extra_vc_lines_are_dropped() {
        let mut store = AttribStore::new();
        store.append_vertex(0.0, 0.0, 0.0);
        store.append_color(0.5, 0.5, 0.5);
        store.append_color(0.7, 0.7, 0.7);
        assert_eq!(store.finish(true).colors, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn colors_dropped_when_disabled() {
        let mut store = AttribStore::new();
        store.append_colored_vertex([0.0; 3], [0.1, 0.2, 0.3]);
        store.append_color(1.0, 1.0, 1.0);
        assert!(store.finish(false).colors.is_empty());
    }
}
