//! Material library lookup injected by the caller.
//!
//! The loader never opens files. When it meets `mtllib name`, it asks a
//! [`MaterialResolver`] for the text of `name`.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    /// No library by that name. The parse continues with a warning.
    #[error("not found")]
    NotFound,
    /// The library exists but could not be read. Fatal for the parse.
    #[error("{reason}")]
    Unreadable { reason: String },
}

/// Supplies MTL text by library name. Implementations must be safe to call
/// from whichever thread runs the parse; the loader adds no locking.
pub trait MaterialResolver {
    fn resolve(&self, library: &str) -> Result<String, ResolveError>;
}

impl<F> MaterialResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError>,
{
    fn resolve(&self, library: &str) -> Result<String, ResolveError> {
        self(library)
    }
}

/// Resolves nothing: every `mtllib` yields a missing-library warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMaterials;

impl MaterialResolver for NoMaterials {
    fn resolve(&self, _library: &str) -> Result<String, ResolveError> {
        Err(ResolveError::NotFound)
    }
}

/// Returns the same MTL text for every library name.
#[derive(Clone, Debug, Default)]
pub struct StaticMaterial(pub String);

impl MaterialResolver for StaticMaterial {
    fn resolve(&self, _library: &str) -> Result<String, ResolveError> {
        Ok(self.0.clone())
    }
}

/// In-memory table of library name to MTL text.
#[derive(Clone, Debug, Default)]
pub struct MaterialMap {
    libraries: HashMap<String, String>,
}

impl MaterialMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, library: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(library, text);
        self
    }

    pub fn insert(&mut self, library: impl Into<String>, text: impl Into<String>) {
        self.libraries.insert(library.into(), text.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MaterialMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            libraries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl MaterialResolver for MaterialMap {
    fn resolve(&self, library: &str) -> Result<String, ResolveError> {
        self.libraries
            .get(library)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}
