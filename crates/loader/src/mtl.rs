//! MTL material library parser and the cumulative material table of a parse.

use std::collections::HashMap;

use objcore::{Diagnostic, Diagnostics, Material, Origin, ParseError, Real, TextureOption, TextureType};

use crate::lexer::{LineScanner, LogicalLine};
use crate::number::{parse_int, parse_real, parse_real_prefix};

/// Materials seen so far, addressable by name. Ids are positions in the list
/// and stay stable when a later library redefines a name.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    ids: HashMap<String, usize>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace (last definition wins). Returns the material id.
    pub fn insert(&mut self, material: Material) -> usize {
        match self.ids.get(&material.name) {
            Some(&id) => {
                log::debug!("material `{}` redefined", material.name);
                self.materials[id] = material;
                id
            }
            None => {
                let id = self.materials.len();
                self.ids.insert(material.name.clone(), id);
                self.materials.push(material);
                id
            }
        }
    }

    pub fn extend(&mut self, materials: impl IntoIterator<Item = Material>) {
        for material in materials {
            self.insert(material);
        }
    }

    pub fn id_of(&self, name: &str) -> Option<i32> {
        self.ids.get(name).and_then(|&id| i32::try_from(id).ok())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn into_materials(self) -> Vec<Material> {
        self.materials
    }
}

/// Parse one MTL document. Materials are returned in file order; anomalies go
/// to `diagnostics` as warnings tagged with `origin`.
pub fn parse_mtl(text: &str, origin: &Origin, diagnostics: &mut Diagnostics) -> Vec<Material> {
    let mut parser = MtlParser {
        origin,
        diagnostics,
        materials: Vec::new(),
        current: None,
        has_d: false,
        has_tr: false,
    };
    for line in LineScanner::new(text) {
        parser.line(&line);
    }
    parser.finish()
}

struct MtlParser<'a> {
    origin: &'a Origin,
    diagnostics: &'a mut Diagnostics,
    materials: Vec<Material>,
    current: Option<Material>,
    // `d` beats `Tr` within one block.
    has_d: bool,
    has_tr: bool,
}

impl MtlParser<'_> {
    fn finish(mut self) -> Vec<Material> {
        if let Some(material) = self.current.take() {
            self.materials.push(material);
        }
        self.materials
    }

    fn warn(&mut self, line: &LogicalLine<'_>, error: ParseError) {
        self.diagnostics.warn(Diagnostic {
            origin: self.origin.clone(),
            line: line.number,
            text: line.text.to_string(),
            error,
        });
    }

    fn line(&mut self, line: &LogicalLine<'_>) {
        let key = line.keyword();

        if key == "newmtl" {
            if let Some(done) = self.current.take() {
                self.materials.push(done);
            }
            let name = line.rest();
            if name.is_empty() {
                self.warn(line, ParseError::EmptyName { what: "material name" });
            }
            self.current = Some(Material::new(name));
            self.has_d = false;
            self.has_tr = false;
            return;
        }

        let Some(mut material) = self.current.take() else {
            self.warn(
                line,
                ParseError::MaterialPropertyOutsideBlock {
                    key: key.to_string(),
                },
            );
            return;
        };
        if let Err(error) = self.property(&mut material, line) {
            self.warn(line, error);
        }
        self.current = Some(material);
    }

    fn property(&mut self, m: &mut Material, line: &LogicalLine<'_>) -> Result<(), ParseError> {
        let key = line.keyword();
        let rest = line.rest();

        match key {
            "Ka" => m.ambient = parse_rgb(rest, "ambient color")?,
            "Kd" => m.diffuse = parse_rgb(rest, "diffuse color")?,
            "Ks" => m.specular = parse_rgb(rest, "specular color")?,
            "Ke" => m.emission = parse_rgb(rest, "emission color")?,
            "Kt" | "Tf" => m.transmittance = parse_rgb(rest, "transmittance")?,
            "Ns" => m.shininess = parse_scalar(rest, "shininess")?,
            "Ni" => m.ior = parse_scalar(rest, "index of refraction")?,
            "illum" => {
                m.illum = first_token(rest)
                    .and_then(parse_int)
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or(ParseError::MalformedNumericField {
                        field: "illumination model",
                    })?;
            }
            "d" => {
                let value = parse_scalar(rest, "dissolve")?;
                if self.has_tr {
                    self.warn(line, conflicting(m));
                }
                m.dissolve = value;
                self.has_d = true;
            }
            "Tr" => {
                let value = parse_scalar(rest, "transparency")?;
                if self.has_d {
                    self.warn(line, conflicting(m));
                } else {
                    m.dissolve = 1.0 - value;
                }
                self.has_tr = true;
            }
            "Pr" => m.roughness = parse_scalar(rest, "roughness")?,
            "Pm" => m.metallic = parse_scalar(rest, "metallic")?,
            "Ps" => m.sheen = parse_scalar(rest, "sheen")?,
            "Pc" => m.clearcoat_thickness = parse_scalar(rest, "clearcoat thickness")?,
            "Pcr" => m.clearcoat_roughness = parse_scalar(rest, "clearcoat roughness")?,
            "aniso" => m.anisotropy = parse_scalar(rest, "anisotropy")?,
            "anisor" => m.anisotropy_rotation = parse_scalar(rest, "anisotropy rotation")?,

            "map_Ka" => (m.ambient_texname, m.ambient_texopt) = parse_texture(rest, false)?,
            "map_Kd" => (m.diffuse_texname, m.diffuse_texopt) = parse_texture(rest, false)?,
            "map_Ks" => (m.specular_texname, m.specular_texopt) = parse_texture(rest, false)?,
            "map_Ns" => {
                (m.specular_highlight_texname, m.specular_highlight_texopt) =
                    parse_texture(rest, false)?
            }
            "map_bump" | "map_Bump" | "bump" => {
                (m.bump_texname, m.bump_texopt) = parse_texture(rest, true)?
            }
            "map_d" => (m.alpha_texname, m.alpha_texopt) = parse_texture(rest, false)?,
            "disp" => {
                (m.displacement_texname, m.displacement_texopt) = parse_texture(rest, false)?
            }
            "refl" => (m.reflection_texname, m.reflection_texopt) = parse_texture(rest, false)?,
            "map_Pr" => (m.roughness_texname, m.roughness_texopt) = parse_texture(rest, false)?,
            "map_Pm" => (m.metallic_texname, m.metallic_texopt) = parse_texture(rest, false)?,
            "map_Ps" => (m.sheen_texname, m.sheen_texopt) = parse_texture(rest, false)?,
            "map_Ke" => (m.emissive_texname, m.emissive_texopt) = parse_texture(rest, false)?,
            "norm" => (m.normal_texname, m.normal_texopt) = parse_texture(rest, false)?,

            _ => {
                m.unknown_parameters.insert(key.to_string(), rest.to_string());
            }
        }
        Ok(())
    }
}

fn conflicting(m: &Material) -> ParseError {
    ParseError::ConflictingDissolve {
        material: m.name.clone(),
    }
}

fn first_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

fn parse_scalar(rest: &str, field: &'static str) -> Result<Real, ParseError> {
    first_token(rest)
        .and_then(parse_real)
        .map(|v| v as Real)
        .ok_or(ParseError::MalformedNumericField { field })
}

/// `r [g b]`; a lone `r` is a grey level.
fn parse_rgb(rest: &str, field: &'static str) -> Result<[Real; 3], ParseError> {
    let malformed = ParseError::MalformedNumericField { field };
    let mut tokens = rest.split_whitespace();
    let r = tokens.next().and_then(parse_real).ok_or(malformed.clone())? as Real;
    match (tokens.next(), tokens.next()) {
        (None, _) => Ok([r, r, r]),
        (Some(g), Some(b)) => {
            let g = parse_real(g).ok_or(malformed.clone())? as Real;
            let b = parse_real(b).ok_or(malformed)? as Real;
            Ok([r, g, b])
        }
        (Some(_), None) => Err(malformed),
    }
}

/// Split off the first whitespace-delimited token.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (s, ""),
    }
}

/// A token that is a number and nothing else.
fn whole_real(token: &str) -> Option<f64> {
    match parse_real_prefix(token) {
        Some((v, used)) if used == token.len() => Some(v),
        _ => None,
    }
}

/// Fill `out` from the front of `s`: the first real is mandatory, the rest optional.
fn take_reals<'s>(
    mut s: &'s str,
    out: &mut [Real],
    field: &'static str,
) -> Result<&'s str, ParseError> {
    for (i, slot) in out.iter_mut().enumerate() {
        let (token, after) = split_token(s);
        match whole_real(token) {
            Some(v) => {
                *slot = v as Real;
                s = after;
            }
            None if i == 0 => return Err(ParseError::MalformedNumericField { field }),
            None => break,
        }
    }
    Ok(s)
}

fn on_off(token: &str, field: &'static str) -> Result<bool, ParseError> {
    match token {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(ParseError::MalformedNumericField { field }),
    }
}

/// Parse `[options] filename`. The filename is the rest of the line and may
/// contain spaces.
pub fn parse_texture(rest: &str, is_bump: bool) -> Result<(String, TextureOption), ParseError> {
    let mut opt = if is_bump {
        TextureOption::bump()
    } else {
        TextureOption::default()
    };

    let mut s = rest.trim();
    loop {
        let (flag, after) = split_token(s);
        s = match flag {
            "-blendu" | "-blendv" | "-clamp" => {
                let (value, after) = split_token(after);
                let value = on_off(value, "texture on/off flag")?;
                match flag {
                    "-blendu" => opt.blendu = value,
                    "-blendv" => opt.blendv = value,
                    _ => opt.clamp = value,
                }
                after
            }
            "-boost" => {
                let mut v = [opt.sharpness];
                let after = take_reals(after, &mut v, "texture boost")?;
                opt.sharpness = v[0];
                after
            }
            "-bm" => {
                let mut v = [opt.bump_multiplier];
                let after = take_reals(after, &mut v, "bump multiplier")?;
                opt.bump_multiplier = v[0];
                after
            }
            "-o" => take_reals(after, &mut opt.origin_offset, "texture offset")?,
            "-s" => take_reals(after, &mut opt.scale, "texture scale")?,
            "-t" => take_reals(after, &mut opt.turbulence, "texture turbulence")?,
            "-mm" => {
                let mut v = [opt.brightness, opt.contrast];
                let after = take_reals(after, &mut v, "texture range")?;
                [opt.brightness, opt.contrast] = v;
                after
            }
            "-texres" => {
                let mut v = [0.0];
                take_reals(after, &mut v, "texture resolution")?
            }
            "-imfchan" => {
                let (value, after) = split_token(after);
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if "rgbmlz".contains(c) => opt.imfchan = c,
                    _ => {
                        return Err(ParseError::MalformedNumericField {
                            field: "texture channel",
                        });
                    }
                }
                after
            }
            "-type" => {
                let (value, after) = split_token(after);
                opt.texture_type = TextureType::from_name(value).unwrap_or_default();
                after
            }
            "-colorspace" => {
                let (value, after) = split_token(after);
                opt.colorspace = value.to_string();
                after
            }
            _ => break,
        };
    }

    let name = s.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName {
            what: "texture filename",
        });
    }
    Ok((name.to_string(), opt))
}
