//! Materials, textures, and the `Assets` registries that own them.
//!
//! The reference engine keeps `MaterialManager`/`TextureManager` as
//! Meyers-singletons (`static MaterialManager mInstance`) reached via
//! `getInstance()`. That pattern doesn't translate to safe, testable Rust —
//! here `Assets` is an explicit context object constructed once and borrowed
//! by the scene and tracer, with the same `create`/`get` semantics
//! (auto-naming, warn-on-collision, fallback-to-default) the originals had.

use bitflags::bitflags;
use tracing::warn;

use crate::math::Color;

bitflags! {
    /// Tracks which material channels are active, recomputed on every
    /// setter call from the channel's magnitude — mirrors `Material::mState`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MaterialFlags: u32 {
        const AMBIENT      = 1 << 0;
        const DIFFUSE      = 1 << 1;
        const SPECULAR     = 1 << 2;
        const EMISSION     = 1 << 3;
        const REFLECTION   = 1 << 4;
        const REFRACTION   = 1 << 5;
        const DIFFUSE_REFL = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// A decoded bitmap sampled with wraparound bilinear filtering. The core
/// never opens image files itself — textures arrive as already-decoded
/// `Color` data, matching the Non-goal that excludes image decoding.
#[derive(Debug, Clone)]
pub struct Texture {
    pub bitmap: Vec<Color>,
    pub width: usize,
    pub height: usize,
}

impl Texture {
    pub fn new(bitmap: Vec<Color>, width: usize, height: usize) -> Self {
        assert_eq!(bitmap.len(), width * height, "texture bitmap size mismatch");
        Self {
            bitmap,
            width,
            height,
        }
    }

    /// Bilinearly filtered texel lookup. `u`/`v` wrap modulo 1 (folding
    /// negative values back into range) and `v` is flipped, matching
    /// `Texture::getTexel`.
    pub fn texel(&self, u: f64, v: f64) -> Color {
        let wrap = |x: f64| {
            let f = x.rem_euclid(1.0);
            f
        };
        let u = wrap(u);
        let v = 1.0 - wrap(v);

        let fu = u * self.width as f64;
        let fv = v * self.height as f64;
        let u1 = (fu as usize) % self.width;
        let u2 = (fu as usize + 1) % self.width;
        let v1 = (fv as usize) % self.height;
        let v2 = (fv as usize + 1) % self.height;

        let fracu = fu - fu.floor();
        let fracv = fv - fv.floor();

        let w1 = (1.0 - fracu) * (1.0 - fracv);
        let w2 = fracu * (1.0 - fracv);
        let w3 = (1.0 - fracu) * fracv;
        let w4 = fracu * fracv;

        let c1 = self.bitmap[u1 + v1 * self.width];
        let c2 = self.bitmap[u2 + v1 * self.width];
        let c3 = self.bitmap[u1 + v2 * self.width];
        let c4 = self.bitmap[u2 + v2 * self.width];

        c1 * w1 + c2 * w2 + c3 * w3 + c4 * w4
    }
}

/// Surface shading parameters for the Phong/mirror/refraction model.
///
/// Every color setter in this port applies channels in `(r, g, b)` order —
/// the reference engine's `setSpecular(const Color&)` overload swaps two
/// arguments (`setSpecular(val.r, val.b, val.g)`); that bug is not
/// reproduced here, nor anywhere else in the crate.
#[derive(Debug, Clone)]
pub struct Material {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    emission: Color,
    shininess: f64,
    reflection: f64,
    diffuse_refl: f64,
    refraction: f64,
    refr_index: f64,
    texture: Option<TextureHandle>,
    u_scale: f64,
    v_scale: f64,
    flags: MaterialFlags,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::new(0.2, 0.2, 0.2),
            diffuse: Color::new(0.8, 0.8, 0.8),
            specular: Color::zero(),
            emission: Color::zero(),
            shininess: 0.0,
            reflection: 0.0,
            diffuse_refl: 0.0,
            refraction: 0.0,
            refr_index: 1.5,
            texture: None,
            u_scale: 1.0,
            v_scale: 1.0,
            flags: MaterialFlags::AMBIENT | MaterialFlags::DIFFUSE,
        }
    }
}

impl Material {
    fn set_color_flag(&mut self, color: Color, flag: MaterialFlags) {
        if color.length() > crate::math::EPSILON {
            self.flags.insert(flag);
        } else {
            self.flags.remove(flag);
        }
    }

    fn set_value_flag(&mut self, value: f64, flag: MaterialFlags) {
        if value.abs() > crate::math::EPSILON {
            self.flags.insert(flag);
        } else {
            self.flags.remove(flag);
        }
    }

    pub fn set_ambient(&mut self, r: f64, g: f64, b: f64) {
        self.ambient = Color::new(r, g, b);
        self.set_color_flag(self.ambient, MaterialFlags::AMBIENT);
    }
    pub fn ambient(&self) -> Color {
        self.ambient
    }
    pub fn is_ambient(&self) -> bool {
        self.flags.contains(MaterialFlags::AMBIENT)
    }

    pub fn set_diffuse(&mut self, r: f64, g: f64, b: f64) {
        self.diffuse = Color::new(r, g, b);
        self.set_color_flag(self.diffuse, MaterialFlags::DIFFUSE);
    }
    pub fn diffuse(&self) -> Color {
        self.diffuse
    }
    pub fn is_diffuse(&self) -> bool {
        self.flags.contains(MaterialFlags::DIFFUSE)
    }

    pub fn set_specular(&mut self, r: f64, g: f64, b: f64) {
        self.specular = Color::new(r, g, b);
        self.set_color_flag(self.specular, MaterialFlags::SPECULAR);
    }
    pub fn specular(&self) -> Color {
        self.specular
    }
    pub fn is_specular(&self) -> bool {
        self.flags.contains(MaterialFlags::SPECULAR)
    }

    pub fn set_emission(&mut self, r: f64, g: f64, b: f64) {
        self.emission = Color::new(r, g, b);
        self.set_color_flag(self.emission, MaterialFlags::EMISSION);
    }
    pub fn emission(&self) -> Color {
        self.emission
    }
    pub fn is_emission(&self) -> bool {
        self.flags.contains(MaterialFlags::EMISSION)
    }

    pub fn shininess(&self) -> f64 {
        self.shininess
    }
    pub fn set_shininess(&mut self, val: f64) {
        self.shininess = val;
    }

    pub fn reflection(&self) -> f64 {
        self.reflection
    }
    pub fn is_reflection(&self) -> bool {
        self.flags.contains(MaterialFlags::REFLECTION)
    }
    pub fn set_reflection(&mut self, val: f64) {
        self.reflection = val;
        self.set_value_flag(val, MaterialFlags::REFLECTION);
    }

    pub fn diffuse_refl(&self) -> f64 {
        self.diffuse_refl
    }
    pub fn is_diffuse_refl(&self) -> bool {
        self.flags.contains(MaterialFlags::DIFFUSE_REFL)
    }
    pub fn set_diffuse_refl(&mut self, val: f64) {
        self.diffuse_refl = val;
        self.set_value_flag(val, MaterialFlags::DIFFUSE_REFL);
    }

    pub fn refraction(&self) -> f64 {
        self.refraction
    }
    pub fn is_refraction(&self) -> bool {
        self.flags.contains(MaterialFlags::REFRACTION)
    }
    pub fn set_refraction(&mut self, val: f64) {
        self.refraction = val;
        self.set_value_flag(val, MaterialFlags::REFRACTION);
    }

    pub fn refr_index(&self) -> f64 {
        self.refr_index
    }
    pub fn set_refr_index(&mut self, val: f64) {
        self.refr_index = val;
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }
    pub fn set_texture(&mut self, tex: Option<TextureHandle>) {
        self.texture = tex;
    }

    pub fn set_uv_scale(&mut self, u: f64, v: f64) {
        self.u_scale = u;
        self.v_scale = v;
    }
    pub fn u_scale(&self) -> f64 {
        self.u_scale
    }
    pub fn v_scale(&self) -> f64 {
        self.v_scale
    }
}

/// Explicit registry replacing the reference engine's `MaterialManager`
/// singleton. Owns a `"_default_"` entry at index 0 so lookups against a
/// missing name always have somewhere safe to fall back to.
pub struct MaterialRegistry {
    materials: Vec<Material>,
    names: std::collections::HashMap<String, MaterialHandle>,
    id_counter: u32,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        let mut reg = Self {
            materials: Vec::new(),
            names: std::collections::HashMap::new(),
            id_counter: 0,
        };
        let default = reg.create(Some("_default_"), Material::default());
        debug_assert_eq!(default.0, 0);
        reg
    }

    pub fn default_handle(&self) -> MaterialHandle {
        MaterialHandle(0)
    }

    /// Creates a material under `name`, or an auto-generated `_Mat<N>` name
    /// if `name` is `None`. A name collision logs a warning and returns the
    /// existing handle rather than overwriting it, matching
    /// `MaterialManager::createManual`.
    pub fn create(&mut self, name: Option<&str>, material: Material) -> MaterialHandle {
        let owned_name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                self.id_counter += 1;
                format!("_Mat{}", self.id_counter)
            }
        };
        if let Some(&existing) = self.names.get(&owned_name) {
            warn!(name = %owned_name, "material already exists");
            return existing;
        }
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(material);
        self.names.insert(owned_name, handle);
        handle
    }

    /// Looks up a material by name; a miss logs a warning and falls back to
    /// `"_default_"`, matching `MaterialManager::getMaterial`.
    pub fn get_named(&self, name: &str) -> MaterialHandle {
        match self.names.get(name) {
            Some(&h) => h,
            None => {
                warn!(name, "material not found, falling back to default");
                self.default_handle()
            }
        }
    }

    pub fn get(&self, handle: MaterialHandle) -> &Material {
        &self.materials[handle.0 as usize]
    }

    pub fn get_mut(&mut self, handle: MaterialHandle) -> &mut Material {
        &mut self.materials[handle.0 as usize]
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit registry replacing the reference engine's `TextureManager`
/// singleton.
pub struct TextureRegistry {
    textures: Vec<Texture>,
    names: std::collections::HashMap<String, TextureHandle>,
    id_counter: u32,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            names: std::collections::HashMap::new(),
            id_counter: 0,
        }
    }

    pub fn create(&mut self, name: Option<&str>, texture: Texture) -> TextureHandle {
        let owned_name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                self.id_counter += 1;
                format!("_Tex{}", self.id_counter)
            }
        };
        if let Some(&existing) = self.names.get(&owned_name) {
            warn!(name = %owned_name, "texture already exists");
            return existing;
        }
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(texture);
        self.names.insert(owned_name, handle);
        handle
    }

    pub fn get_named(&self, name: &str) -> Option<TextureHandle> {
        match self.names.get(name) {
            Some(&h) => Some(h),
            None => {
                warn!(name, "texture not found");
                None
            }
        }
    }

    pub fn get(&self, handle: TextureHandle) -> &Texture {
        &self.textures[handle.0 as usize]
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundles the material and texture registries that `Scene`/`Engine` borrow,
/// replacing the reference engine's pair of global singletons with a value
/// the caller owns and passes explicitly.
#[derive(Default)]
pub struct Assets {
    pub materials: MaterialRegistry,
    pub textures: TextureRegistry,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_wraps_and_flips() {
        let bitmap = vec![
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
            Color::new(1.0, 1.0, 1.0),
        ];
        let tex = Texture::new(bitmap, 2, 2);
        let a = tex.texel(0.01, 0.01);
        let b = tex.texel(1.01, 1.01);
        assert!((a - b).length() < 1e-9);
    }

    #[test]
    fn default_material_has_ambient_and_diffuse_active() {
        let mat = Material::default();
        assert!(mat.is_ambient());
        assert!(mat.is_diffuse());
        assert!(!mat.is_reflection());
    }

    #[test]
    fn setting_zero_color_clears_flag() {
        let mut mat = Material::default();
        mat.set_diffuse(0.0, 0.0, 0.0);
        assert!(!mat.is_diffuse());
    }

    #[test]
    fn color_setters_preserve_rgb_order() {
        let mut mat = Material::default();
        mat.set_specular(0.1, 0.2, 0.3);
        let c = mat.specular();
        assert_eq!((c.x, c.y, c.z), (0.1, 0.2, 0.3));
    }

    #[test]
    fn missing_material_lookup_falls_back_to_default() {
        let registry = MaterialRegistry::new();
        let handle = registry.get_named("does-not-exist");
        assert_eq!(handle, registry.default_handle());
    }

    #[test]
    fn duplicate_name_returns_existing_handle() {
        let mut registry = MaterialRegistry::new();
        let first = registry.create(Some("glass"), Material::default());
        let second = registry.create(Some("glass"), Material::default());
        assert_eq!(first, second);
    }
}
