//! Wavefront OBJ/MTL parsing and mesh assembly.
//! Text in, [`LoadResult`] out: flat attribute pools, per-shape meshes,
//! materials, and a diagnostic log. No file I/O; `mtllib` goes through a
//! caller-supplied [`MaterialResolver`].

pub mod attrib;
pub mod config;
pub mod face;
pub mod lexer;
pub mod loader;
pub mod mtl;
pub mod number;
pub mod resolver;
pub mod shape;
pub mod triangulate;

pub use config::{LoadConfig, TriangulationMethod};
pub use loader::{
    LoadResult, LoaderError, load_mtl_from_str, load_obj_from_reader, load_obj_from_str,
    load_obj_with_mtl,
};
pub use mtl::{MaterialLibrary, parse_mtl};
pub use resolver::{MaterialMap, MaterialResolver, NoMaterials, ResolveError, StaticMaterial};
