//! Light sources. A tagged `enum` instead of the reference engine's single
//! `Light` class carrying a `mType` discriminant and fields for every kind at
//! once — the same redesign applied to `Primitive`.

use bitflags::bitflags;

use crate::math::{Aabb, Color, Vec3};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LightFlags: u32 {
        const AMBIENT  = 1 << 0;
        const DIFFUSE  = 1 << 1;
        const SPECULAR = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub struct LightShading {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    flags: LightFlags,
}

impl Default for LightShading {
    fn default() -> Self {
        Self {
            ambient: Color::new(0.2, 0.2, 0.2),
            diffuse: Color::new(0.8, 0.8, 0.8),
            specular: Color::zero(),
            flags: LightFlags::AMBIENT | LightFlags::DIFFUSE,
        }
    }
}

impl LightShading {
    fn set_flag(&mut self, color: Color, flag: LightFlags) {
        if color.length() > crate::math::EPSILON {
            self.flags.insert(flag);
        } else {
            self.flags.remove(flag);
        }
    }

    pub fn set_ambient(&mut self, r: f64, g: f64, b: f64) {
        self.ambient = Color::new(r, g, b);
        self.set_flag(self.ambient, LightFlags::AMBIENT);
    }
    pub fn ambient(&self) -> Color {
        self.ambient
    }
    pub fn is_ambient(&self) -> bool {
        self.flags.contains(LightFlags::AMBIENT)
    }

    pub fn set_diffuse(&mut self, r: f64, g: f64, b: f64) {
        self.diffuse = Color::new(r, g, b);
        self.set_flag(self.diffuse, LightFlags::DIFFUSE);
    }
    pub fn diffuse(&self) -> Color {
        self.diffuse
    }
    pub fn is_diffuse(&self) -> bool {
        self.flags.contains(LightFlags::DIFFUSE)
    }

    pub fn set_specular(&mut self, r: f64, g: f64, b: f64) {
        self.specular = Color::new(r, g, b);
        self.set_flag(self.specular, LightFlags::SPECULAR);
    }
    pub fn specular(&self) -> Color {
        self.specular
    }
    pub fn is_specular(&self) -> bool {
        self.flags.contains(LightFlags::SPECULAR)
    }
}

#[derive(Debug, Clone)]
pub struct PointLight {
    pub shading: LightShading,
    pub position: Vec3,
    pub attenuation0: f64,
    pub attenuation1: f64,
    pub attenuation2: f64,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            shading: LightShading::default(),
            position: Vec3::zero(),
            attenuation0: 1.0,
            attenuation1: 0.0,
            attenuation2: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub shading: LightShading,
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            shading: LightShading::default(),
            direction: Vec3::new(0.0, 0.0, -1.0),
        }
    }
}

impl DirectionalLight {
    pub fn set_direction(&mut self, dir: Vec3) {
        self.direction = dir.normalized();
    }
}

#[derive(Debug, Clone)]
pub struct AreaLight {
    pub shading: LightShading,
    pub bounds: Aabb,
    pub attenuation0: f64,
    pub attenuation1: f64,
    pub attenuation2: f64,
}

impl Default for AreaLight {
    fn default() -> Self {
        Self {
            shading: LightShading::default(),
            bounds: Aabb::new(Vec3::zero(), Vec3::zero()),
            attenuation0: 1.0,
            attenuation1: 0.0,
            attenuation2: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
    Area(AreaLight),
}

impl Light {
    pub fn shading(&self) -> &LightShading {
        match self {
            Light::Point(l) => &l.shading,
            Light::Directional(l) => &l.shading,
            Light::Area(l) => &l.shading,
        }
    }

    pub fn shading_mut(&mut self) -> &mut LightShading {
        match self {
            Light::Point(l) => &mut l.shading,
            Light::Directional(l) => &mut l.shading,
            Light::Area(l) => &mut l.shading,
        }
    }
}
