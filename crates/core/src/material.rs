//! Material records parsed from MTL libraries.

use std::collections::BTreeMap;

use crate::Real;

/// Projection hint for reflection maps (`-type`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TextureType {
    #[default]
    None,
    Sphere,
    CubeTop,
    CubeBottom,
    CubeFront,
    CubeBack,
    CubeLeft,
    CubeRight,
}

impl TextureType {
    /// Parse a `-type` argument. Unrecognized names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sphere" => Self::Sphere,
            "cube_top" => Self::CubeTop,
            "cube_bottom" => Self::CubeBottom,
            "cube_front" => Self::CubeFront,
            "cube_back" => Self::CubeBack,
            "cube_left" => Self::CubeLeft,
            "cube_right" => Self::CubeRight,
            _ => return None,
        })
    }
}

/// Options preceding a texture filename in a `map_*` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureOption {
    pub texture_type: TextureType,
    /// `-boost`
    pub sharpness: Real,
    /// `-mm` base value
    pub brightness: Real,
    /// `-mm` gain value
    pub contrast: Real,
    /// `-o u v w`
    pub origin_offset: [Real; 3],
    /// `-s u v w`
    pub scale: [Real; 3],
    /// `-t u v w`
    pub turbulence: [Real; 3],
    pub clamp: bool,
    /// `-imfchan`: one of `r g b m l z`.
    pub imfchan: char,
    pub blendu: bool,
    pub blendv: bool,
    /// `-bm`, bump maps only.
    pub bump_multiplier: Real,
    /// `-colorspace`, e.g. `sRGB` or `linear`. Empty when unspecified.
    pub colorspace: String,
}

impl TextureOption {
    /// Defaults for a bump-like slot (`imfchan` = `l`).
    pub fn bump() -> Self {
        Self {
            imfchan: 'l',
            ..Self::default()
        }
    }
}

impl Default for TextureOption {
    fn default() -> Self {
        Self {
            texture_type: TextureType::None,
            sharpness: 1.0,
            brightness: 0.0,
            contrast: 1.0,
            origin_offset: [0.0; 3],
            scale: [1.0; 3],
            turbulence: [0.0; 3],
            clamp: false,
            imfchan: 'm',
            blendu: true,
            blendv: true,
            bump_multiplier: 1.0,
            colorspace: String::new(),
        }
    }
}

/// One `newmtl` block.
///
/// Texture names are empty when the slot was not set. Keys the parser does not
/// recognize are kept verbatim in `unknown_parameters`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,

    pub ambient: [Real; 3],
    pub diffuse: [Real; 3],
    pub specular: [Real; 3],
    pub transmittance: [Real; 3],
    pub emission: [Real; 3],
    pub shininess: Real,
    /// Index of refraction.
    pub ior: Real,
    /// 1 = opaque, 0 = fully transparent.
    pub dissolve: Real,
    pub illum: i32,

    pub ambient_texname: String,
    pub diffuse_texname: String,
    pub specular_texname: String,
    pub specular_highlight_texname: String,
    pub bump_texname: String,
    pub displacement_texname: String,
    pub alpha_texname: String,
    pub reflection_texname: String,

    pub ambient_texopt: TextureOption,
    pub diffuse_texopt: TextureOption,
    pub specular_texopt: TextureOption,
    pub specular_highlight_texopt: TextureOption,
    pub bump_texopt: TextureOption,
    pub displacement_texopt: TextureOption,
    pub alpha_texopt: TextureOption,
    pub reflection_texopt: TextureOption,

    // PBR extension.
    pub roughness: Real,
    pub metallic: Real,
    pub sheen: Real,
    pub clearcoat_thickness: Real,
    pub clearcoat_roughness: Real,
    pub anisotropy: Real,
    pub anisotropy_rotation: Real,
    pub roughness_texname: String,
    pub metallic_texname: String,
    pub sheen_texname: String,
    pub emissive_texname: String,
    pub normal_texname: String,
    pub roughness_texopt: TextureOption,
    pub metallic_texopt: TextureOption,
    pub sheen_texopt: TextureOption,
    pub emissive_texopt: TextureOption,
    pub normal_texopt: TextureOption,

    pub unknown_parameters: BTreeMap<String, String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Raw value of a key the parser kept verbatim.
    pub fn unknown_parameter(&self, key: &str) -> Option<&str> {
        self.unknown_parameters.get(key).map(String::as_str)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            transmittance: [0.0; 3],
            emission: [0.0; 3],
            shininess: 1.0,
            ior: 1.0,
            dissolve: 1.0,
            illum: 0,
            ambient_texname: String::new(),
            diffuse_texname: String::new(),
            specular_texname: String::new(),
            specular_highlight_texname: String::new(),
            bump_texname: String::new(),
            displacement_texname: String::new(),
            alpha_texname: String::new(),
            reflection_texname: String::new(),
            ambient_texopt: TextureOption::default(),
            diffuse_texopt: TextureOption::default(),
            specular_texopt: TextureOption::default(),
            specular_highlight_texopt: TextureOption::default(),
            bump_texopt: TextureOption::bump(),
            displacement_texopt: TextureOption::default(),
            alpha_texopt: TextureOption::default(),
            reflection_texopt: TextureOption::default(),
            roughness: 0.0,
            metallic: 0.0,
            sheen: 0.0,
            clearcoat_thickness: 0.0,
            clearcoat_roughness: 0.0,
            anisotropy: 0.0,
            anisotropy_rotation: 0.0,
            roughness_texname: String::new(),
            metallic_texname: String::new(),
            sheen_texname: String::new(),
            emissive_texname: String::new(),
            normal_texname: String::new(),
            roughness_texopt: TextureOption::default(),
            metallic_texopt: TextureOption::default(),
            sheen_texopt: TextureOption::default(),
            emissive_texopt: TextureOption::default(),
            normal_texopt: TextureOption::default(),
            unknown_parameters: BTreeMap::new(),
        }
    }
}
