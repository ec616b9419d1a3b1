//! OBJ loader facade: streams directives through the attribute store, face
//! assembler, shape builder and material library.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Read;

use objcore::{
    Attrib, Diagnostic, Diagnostics, Material, Origin, ParseError, Real, Shape,
};
use thiserror::Error;

use crate::attrib::AttribStore;
use crate::config::LoadConfig;
use crate::face::{AttribCounts, FaceAssembler, Primitive, resolve_corners};
use crate::lexer::{LineScanner, LogicalLine};
use crate::mtl::{MaterialLibrary, parse_mtl};
use crate::number::{parse_int, parse_real};
use crate::resolver::{MaterialResolver, ResolveError, StaticMaterial};
use crate::shape::ShapeBuilder;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read OBJ input: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one parse produced. Returned even when `success` is false, with
/// whatever was accumulated before the fatal error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadResult {
    pub success: bool,
    pub attrib: Attrib,
    pub shapes: Vec<Shape>,
    pub materials: Vec<Material>,
    pub diagnostics: Diagnostics,
}

impl LoadResult {
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.diagnostics.warnings
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics.errors
    }
}

/// Parse OBJ text. `mtllib` names are looked up through `resolver`.
pub fn load_obj_from_str<R>(text: &str, resolver: &R, config: &LoadConfig) -> LoadResult
where
    R: MaterialResolver + ?Sized,
{
    ObjParser::new(resolver, config).run(text)
}

/// Read a whole OBJ document from `reader`, then parse it. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD; only an I/O failure is an error.
pub fn load_obj_from_reader<T, R>(
    mut reader: T,
    resolver: &R,
    config: &LoadConfig,
) -> Result<LoadResult, LoaderError>
where
    T: Read,
    R: MaterialResolver + ?Sized,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        log::debug!("OBJ input is not valid UTF-8, decoding lossily");
    }
    Ok(load_obj_from_str(&text, resolver, config))
}

/// Parse OBJ text with one MTL document that answers every `mtllib`.
pub fn load_obj_with_mtl(obj_text: &str, mtl_text: &str, config: &LoadConfig) -> LoadResult {
    load_obj_from_str(obj_text, &StaticMaterial(mtl_text.to_string()), config)
}

/// Parse a standalone MTL document.
pub fn load_mtl_from_str(text: &str) -> (Vec<Material>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut library = MaterialLibrary::new();
    library.extend(parse_mtl(text, &Origin::Mtl(String::new()), &mut diagnostics));
    (library.into_materials(), diagnostics)
}

/// Marker for a condition that stops the parse.
struct Fatal;

type Step = Result<(), Fatal>;

/// Per-call parser state. Nothing here outlives one `run`.
struct ObjParser<'a, R: ?Sized> {
    resolver: &'a R,
    config: &'a LoadConfig,
    store: AttribStore,
    faces: FaceAssembler,
    shapes: ShapeBuilder,
    materials: MaterialLibrary,
    loaded_libraries: HashSet<String>,
    diagnostics: Diagnostics,
}

impl<'a, R: MaterialResolver + ?Sized> ObjParser<'a, R> {
    fn new(resolver: &'a R, config: &'a LoadConfig) -> Self {
        Self {
            resolver,
            config,
            store: AttribStore::new(),
            faces: FaceAssembler::new(config),
            shapes: ShapeBuilder::new(),
            materials: MaterialLibrary::new(),
            loaded_libraries: HashSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn run(mut self, text: &str) -> LoadResult {
        let aborted = LineScanner::new(text)
            .try_for_each(|line| self.line(&line))
            .is_err();
        if !aborted {
            self.check_geometry();
        }
        self.finish()
    }

    fn finish(self) -> LoadResult {
        let success = !self.diagnostics.has_errors();
        let result = LoadResult {
            success,
            attrib: self.store.finish(self.config.vertex_color),
            shapes: self.shapes.finish(),
            materials: self.materials.into_materials(),
            diagnostics: self.diagnostics,
        };

        log::info!(
            "Parsed OBJ: {} vertices, {} normals, {} texcoords, {} shapes, {} materials, {} warnings",
            result.attrib.vertex_count(),
            result.attrib.normal_count(),
            result.attrib.texcoord_count(),
            result.shapes.len(),
            result.materials.len(),
            result.diagnostics.warnings.len(),
        );
        if !success {
            log::warn!(
                "OBJ parse failed: {}",
                result.diagnostics.error_log().trim_end()
            );
        }
        result
    }

    fn diagnostic(line: &LogicalLine<'_>, error: ParseError) -> Diagnostic {
        Diagnostic {
            origin: Origin::Obj,
            line: line.number,
            text: line.text.to_string(),
            error,
        }
    }

    fn warn(&mut self, line: &LogicalLine<'_>, error: ParseError) {
        self.diagnostics.warn(Self::diagnostic(line, error));
    }

    fn fail(&mut self, line: &LogicalLine<'_>, error: ParseError) -> Fatal {
        self.diagnostics.error(Self::diagnostic(line, error));
        Fatal
    }

    /// Warning normally, fatal under `strict`.
    fn recoverable(&mut self, line: &LogicalLine<'_>, error: ParseError) -> Step {
        if self.config.strict {
            Err(self.fail(line, error))
        } else {
            self.warn(line, error);
            Ok(())
        }
    }

    fn line(&mut self, line: &LogicalLine<'_>) -> Step {
        match line.keyword() {
            "v" => self.vertex(line),
            "vn" => self.normal(line),
            "vt" => self.texcoord(line),
            "vc" => self.color(line),
            "f" => self.primitive(line, Primitive::Face),
            "l" => self.primitive(line, Primitive::Line),
            "p" => self.primitive(line, Primitive::Point),
            "g" => {
                self.group(line);
                Ok(())
            }
            "o" => {
                self.object(line);
                Ok(())
            }
            "s" => self.smoothing(line),
            "usemtl" => {
                self.usemtl(line);
                Ok(())
            }
            "mtllib" => self.mtllib(line),
            other => {
                let directive = other.to_string();
                self.warn(line, ParseError::UnknownDirective { directive });
                Ok(())
            }
        }
    }

    /// Leading numeric arguments, at most `max`. Fewer than `min` is a
    /// malformed line (`Ok(None)` unless strict); arguments after the numbers
    /// are ignored with a warning.
    fn fields(
        &mut self,
        line: &LogicalLine<'_>,
        min: usize,
        max: usize,
        field: &'static str,
    ) -> Result<Option<Vec<Real>>, Fatal> {
        let mut args = line.args().peekable();
        let mut values = Vec::with_capacity(max);
        while values.len() < max {
            let Some(v) = args.peek().and_then(|t| parse_real(t)) else {
                break;
            };
            values.push(v as Real);
            args.next();
        }
        if values.len() < min {
            self.recoverable(line, ParseError::MalformedNumericField { field })?;
            return Ok(None);
        }

        let ignored: Vec<&str> = args.collect();
        if !ignored.is_empty() {
            let ignored = ignored.join(" ");
            self.warn(line, ParseError::IgnoredTrailingFields { field, ignored });
        }
        Ok(Some(values))
    }

    fn vertex(&mut self, line: &LogicalLine<'_>) -> Step {
        let Some(v) = self.fields(line, 3, 6, "vertex position")? else {
            return Ok(());
        };
        let position = [v[0], v[1], v[2]];
        match v.len() {
            3 => self.store.append_vertex(v[0], v[1], v[2]),
            4 | 5 => self.store.append_weighted_vertex(position, v[3]),
            _ => self.store.append_colored_vertex(position, [v[3], v[4], v[5]]),
        }
        Ok(())
    }

    fn normal(&mut self, line: &LogicalLine<'_>) -> Step {
        if let Some(n) = self.fields(line, 3, 3, "normal")? {
            self.store.append_normal(n[0], n[1], n[2]);
        }
        Ok(())
    }

    fn texcoord(&mut self, line: &LogicalLine<'_>) -> Step {
        if let Some(t) = self.fields(line, 1, 3, "texture coordinate")? {
            let v = t.get(1).copied().unwrap_or(0.0);
            let w = t.get(2).copied().unwrap_or(0.0);
            self.store.append_texcoord_w(t[0], v, w);
        }
        Ok(())
    }

    fn color(&mut self, line: &LogicalLine<'_>) -> Step {
        if let Some(c) = self.fields(line, 3, 3, "vertex color")? {
            self.store.append_color(c[0], c[1], c[2]);
        }
        Ok(())
    }

    fn primitive(&mut self, line: &LogicalLine<'_>, kind: Primitive) -> Step {
        let found = line.args().count();
        if found < kind.min_corners() {
            let error = ParseError::MalformedFaceDirective {
                directive: kind.keyword(),
                required: kind.min_corners(),
                found,
            };
            return self.recoverable(line, error);
        }

        let counts = AttribCounts::of(self.store.attrib());
        let corners = match resolve_corners(line.args(), counts) {
            Ok(corners) => corners,
            Err(error) => return self.recoverable(line, error),
        };

        let shape = self.shapes.current_mut();
        match kind {
            Primitive::Face => {
                self.faces
                    .emit_face(&corners, self.store.attrib(), &mut shape.mesh);
            }
            Primitive::Line => shape.lines.push_line(&corners),
            Primitive::Point => shape.points.indices.extend_from_slice(&corners),
        }
        Ok(())
    }

    fn group(&mut self, line: &LogicalLine<'_>) {
        let name = line.args().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            self.warn(line, ParseError::EmptyName { what: "group name" });
        }
        self.shapes.begin(name);
    }

    fn object(&mut self, line: &LogicalLine<'_>) {
        let name = line.rest();
        if name.is_empty() {
            self.warn(line, ParseError::EmptyName { what: "object name" });
        }
        self.shapes.begin(name.to_string());
    }

    fn smoothing(&mut self, line: &LogicalLine<'_>) -> Step {
        let id = match line.args().next() {
            Some("off") => Some(0),
            Some(token) => parse_int(token).and_then(|v| u32::try_from(v).ok()),
            None => None,
        };
        match id {
            Some(id) => {
                self.faces.smoothing_group = id;
                Ok(())
            }
            None => {
                self.faces.smoothing_group = 0;
                self.recoverable(line, ParseError::MalformedNumericField { field: "smoothing group" })
            }
        }
    }

    fn usemtl(&mut self, line: &LogicalLine<'_>) {
        let name = line.rest();
        if name.is_empty() {
            self.warn(line, ParseError::EmptyName { what: "material name" });
            return;
        }
        match self.materials.id_of(name) {
            Some(id) => self.faces.material_id = id,
            None => {
                let name = name.to_string();
                self.warn(line, ParseError::UnresolvedMaterialName { name });
            }
        }
    }

    fn mtllib(&mut self, line: &LogicalLine<'_>) -> Step {
        let libraries: Vec<&str> = line.args().collect();
        if libraries.is_empty() {
            self.warn(line, ParseError::EmptyName { what: "material library name" });
            return Ok(());
        }

        for library in libraries {
            if !self.loaded_libraries.insert(library.to_string()) {
                log::debug!("material library `{library}` already loaded");
                continue;
            }
            match self.resolver.resolve(library) {
                Ok(text) => {
                    let origin = Origin::Mtl(library.to_string());
                    let parsed = parse_mtl(&text, &origin, &mut self.diagnostics);
                    log::debug!("material library `{library}`: {} materials", parsed.len());
                    self.materials.extend(parsed);
                }
                Err(ResolveError::NotFound) => {
                    let library = library.to_string();
                    self.warn(line, ParseError::MissingMaterialLibrary { library });
                }
                Err(ResolveError::Unreadable { reason }) => {
                    let library = library.to_string();
                    return Err(self.fail(line, ParseError::UnreadableMaterialLibrary { library, reason }));
                }
            }
        }
        Ok(())
    }

    fn check_geometry(&mut self) {
        if !self.config.require_geometry {
            return;
        }
        let no_vertices = self.store.vertex_count() == 0;
        let no_primitives =
            self.shapes.current().is_empty() && self.shapes.shapes().iter().all(Shape::is_empty);
        if no_vertices && no_primitives {
            self.diagnostics.error(Diagnostic {
                origin: Origin::Obj,
                line: 0,
                text: String::new(),
                error: ParseError::EmptyInput,
            });
        }
    }
}
