//! Loader configuration.

/// How polygons with more than three corners are split when triangulating.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TriangulationMethod {
    /// Fixed fan from corner 0: `(0, i, i + 1)`. Correct only for convex,
    /// planar polygons; callers may rely on this exact ordering.
    #[default]
    Fan,
    /// Ear clipping in the polygon's best-fit plane. Falls back to the fan for
    /// degenerate input.
    EarClip,
}

impl TriangulationMethod {
    /// Parse `fan` / `earclip` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fan" => Some(Self::Fan),
            "earclip" | "ear-clip" | "ear_clip" => Some(Self::EarClip),
            _ => None,
        }
    }
}

/// Options for one parse call.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadConfig {
    /// Split every face into triangles.
    pub triangulate: bool,
    pub triangulation: TriangulationMethod,
    /// Keep per-vertex colours (`vc` lines and `v x y z r g b`).
    pub vertex_color: bool,
    /// Treat malformed numbers, out-of-range indices and short faces as fatal.
    pub strict: bool,
    /// Fail when the input contains no vertex and no primitive.
    pub require_geometry: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            triangulate: true,
            triangulation: TriangulationMethod::Fan,
            vertex_color: true,
            strict: false,
            require_geometry: false,
        }
    }
}

impl LoadConfig {
    pub fn with_triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }

    pub fn with_triangulation(mut self, method: TriangulationMethod) -> Self {
        self.triangulation = method;
        self
    }

    pub fn with_vertex_color(mut self, vertex_color: bool) -> Self {
        self.vertex_color = vertex_color;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_require_geometry(mut self, require: bool) -> Self {
        self.require_geometry = require;
        self
    }
}
