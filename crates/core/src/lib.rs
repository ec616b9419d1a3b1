//! Core shared types and errors (renderer-agnostic).
//! Everything a parse produces lives here: attribute pools, shapes,
//! materials and the diagnostic log.

pub mod attrib;
pub mod diagnostics;
pub mod material;
pub mod mesh;

pub use attrib::Attrib;
pub use diagnostics::{Diagnostic, Diagnostics, Origin, ParseError};
pub use material::{Material, TextureOption, TextureType};
pub use mesh::{Index, Lines, Mesh, Points, Shape};

/// Scalar type of every attribute and material value.
pub type Real = f32;
