//! objinfo: parse an OBJ file and print what it contains.
//! Flags: --no-triangulate, --triangulation=fan|earclip, --no-vertex-color,
//! --strict, --require-geometry, --mtl-dir=<dir>, --dump-materials.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use objcore::{Material, Shape};
use objloader::{LoadConfig, ResolveError, TriangulationMethod, load_obj_from_reader};

fn parse_flag(name: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == name)
}

fn parse_triangulation_arg() -> TriangulationMethod {
    // Accept: --triangulation=fan|earclip
    let mut method = TriangulationMethod::Fan;
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--triangulation=") {
            method = match TriangulationMethod::from_name(val) {
                Some(m) => m,
                None => {
                    log::warn!("Unknown triangulation '{}', falling back to fan.", val);
                    TriangulationMethod::Fan
                }
            };
        }
    }
    method
}

fn parse_mtl_dir_arg() -> Option<PathBuf> {
    std::env::args()
        .filter_map(|arg| arg.strip_prefix("--mtl-dir=").map(PathBuf::from))
        .last()
}

fn parse_input_arg() -> Option<PathBuf> {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
}

fn load_config() -> LoadConfig {
    LoadConfig::default()
        .with_triangulate(!parse_flag("--no-triangulate"))
        .with_triangulation(parse_triangulation_arg())
        .with_vertex_color(!parse_flag("--no-vertex-color"))
        .with_strict(parse_flag("--strict"))
        .with_require_geometry(parse_flag("--require-geometry"))
}

/// Reads `<dir>/<library>` from disk. Only a missing file is a soft failure.
fn read_library(dir: &Path, library: &str) -> Result<String, ResolveError> {
    let path = dir.join(library);
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            log::debug!("Loaded material library {}", path.display());
            Ok(text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ResolveError::NotFound),
        Err(e) => Err(ResolveError::Unreadable {
            reason: format!("{}: {e}", path.display()),
        }),
    }
}

fn log_shape(shape: &Shape) {
    let name = if shape.name.is_empty() { "<unnamed>" } else { shape.name.as_str() };
    let materials: BTreeSet<i32> = shape.mesh.material_ids.iter().copied().collect();
    log::info!(
        "shape {}: {} faces ({} corners), {} line strips, {} points, materials {:?}",
        name,
        shape.mesh.face_count(),
        shape.mesh.indices.len(),
        shape.lines.num_line_vertices.len(),
        shape.points.indices.len(),
        materials
    );
}

fn log_material(id: usize, m: &Material) {
    log::info!(
        "material #{} {}: Kd={:?} Ks={:?} Ns={} d={} illum={}",
        id,
        m.name,
        m.diffuse,
        m.specular,
        m.shininess,
        m.dissolve,
        m.illum
    );
    if !m.diffuse_texname.is_empty() {
        log::info!("  map_Kd {}", m.diffuse_texname);
    }
    for (key, value) in &m.unknown_parameters {
        log::info!("  {} {}", key, value);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(input) = parse_input_arg() else {
        bail!("usage: objinfo [flags] <file.obj>");
    };
    let config = load_config();
    let mtl_dir = parse_mtl_dir_arg()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    log::info!(
        "Loading {} (triangulate={}, method={:?}, strict={}, mtl_dir={})",
        input.display(),
        config.triangulate,
        config.triangulation,
        config.strict,
        mtl_dir.display()
    );

    let file = std::fs::File::open(&input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let resolver = |library: &str| read_library(&mtl_dir, library);
    let result = load_obj_from_reader(std::io::BufReader::new(file), &resolver, &config)
        .with_context(|| format!("failed to read {}", input.display()))?;

    for warning in result.warnings() {
        log::warn!("{}", warning);
    }
    log::info!(
        "{} vertices, {} normals, {} texcoords, {} colors",
        result.attrib.vertex_count(),
        result.attrib.normal_count(),
        result.attrib.texcoord_count(),
        result.attrib.color_count()
    );
    for shape in &result.shapes {
        log_shape(shape);
    }
    if parse_flag("--dump-materials") {
        for (id, material) in result.materials.iter().enumerate() {
            log_material(id, material);
        }
    } else {
        log::info!("{} materials", result.materials.len());
    }

    if !result.success {
        for error in result.errors() {
            log::error!("{}", error);
        }
        bail!("failed to parse {}", input.display());
    }
    Ok(())
}
