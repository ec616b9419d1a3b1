//! Warning/error log of a single parse call.

use std::fmt;

use thiserror::Error;

/// Every anomaly the loader can report. Whether one is a warning or an error
/// depends on where it is filed in [`Diagnostics`], not on the variant.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("malformed {field}")]
    MalformedNumericField { field: &'static str },

    #[error("ignored `{ignored}` after {field}")]
    IgnoredTrailingFields {
        field: &'static str,
        ignored: String,
    },

    #[error("unknown directive `{directive}`")]
    UnknownDirective { directive: String },

    #[error("{attribute} index {raw} out of range (have {available})")]
    IndexOutOfRange {
        attribute: &'static str,
        raw: i64,
        available: usize,
    },

    #[error("material `{name}` is not defined")]
    UnresolvedMaterialName { name: String },

    #[error("material library `{library}` not found")]
    MissingMaterialLibrary { library: String },

    #[error("material library `{library}` could not be read: {reason}")]
    UnreadableMaterialLibrary { library: String, reason: String },

    #[error("`{directive}` needs at least {required} corner(s), found {found}")]
    MalformedFaceDirective {
        directive: &'static str,
        required: usize,
        found: usize,
    },

    #[error("malformed corner `{corner}`")]
    MalformedCorner { corner: String },

    #[error("input contains no geometry")]
    EmptyInput,

    #[error("`{key}` appears before any `newmtl`")]
    MaterialPropertyOutsideBlock { key: String },

    #[error("both `d` and `Tr` set for `{material}`; using `d`")]
    ConflictingDissolve { material: String },

    #[error("empty {what}")]
    EmptyName { what: &'static str },
}

/// Document a diagnostic refers to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Origin {
    #[default]
    Obj,
    /// MTL library, by the name used in `mtllib`.
    Mtl(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Obj => f.write_str("obj"),
            Origin::Mtl(name) => write!(f, "mtl `{name}`"),
        }
    }
}

/// One located log entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub origin: Origin,
    /// 1-based physical line where the logical line starts. 0 if not tied to a line.
    pub line: usize,
    /// Logical line text (comments stripped).
    pub text: String,
    pub error: ParseError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.origin, self.error)
        } else {
            write!(
                f,
                "{} line {}: {} (`{}`)",
                self.origin, self.line, self.error, self.text
            )
        }
    }
}

/// Warnings and errors accumulated during one parse. A fresh instance is
/// created for each call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, diagnostic: Diagnostic) {
        log::debug!("warning: {diagnostic}");
        self.warnings.push(diagnostic);
    }

    pub fn error(&mut self, diagnostic: Diagnostic) {
        log::debug!("error: {diagnostic}");
        self.errors.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Warnings rendered one per line.
    pub fn warning_log(&self) -> String {
        render(&self.warnings)
    }

    /// Errors rendered one per line.
    pub fn error_log(&self) -> String {
        render(&self.errors)
    }
}

fn render(entries: &[Diagnostic]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}
