//! Built-in scene presets. Ported from the reference engine's example
//! `.scn` files (`showcase.scn`, `cornell.scn`, ...), which hand-authored a
//! scene by calling `Scene::addPrimitive`/`addLight` directly — here each
//! preset is a plain Rust function building the same kind of scene through
//! the `Scene`/`Assets`/`Camera` API instead of a parsed text format, since
//! scene-file parsing is an explicit Non-goal.

use rand::Rng;

use crate::camera::Camera;
use crate::light::{AreaLight, DirectionalLight, Light, PointLight};
use crate::material::{Assets, Material, Texture};
use crate::math::{Aabb, Color, Vec3};
use crate::scene::Scene;
use crate::primitive::Primitive;

/// Eye/target/up/field-of-view the CLI turns into a fully configured
/// [`Camera`] once it knows the output aspect ratio — presets describe the
/// shot, `main` decides the resolution.
#[derive(Debug, Clone, Copy)]
pub struct CameraSetup {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: f64,
}

impl CameraSetup {
    pub fn build(&self, aspect: f64) -> Camera {
        Camera::from_look_at_fov(self.eye, self.target, self.up, self.fov_degrees, aspect)
    }
}

/// A complete scene description bundling geometry, materials, lighting, and
/// the intended shot — everything a preset hands back to its caller.
pub struct SceneDescription {
    pub name: &'static str,
    pub scene: Scene,
    pub assets: Assets,
    pub camera: CameraSetup,
}

/// Available built-in scene presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScenePreset {
    /// Mirror, glass, and matte spheres over a ground plane under a point and
    /// a directional light.
    Showcase,
    /// An open-fronted Cornell box with a ceiling area light and two hero
    /// spheres.
    Cornell,
    /// A single reflective sphere on a ground plane, lit by one directional
    /// light — useful as a quick smoke test.
    Minimal,
    /// A gallery demonstrating every primitive and light kind together,
    /// including a textured checkerboard sphere.
    Gallery,
    /// Many small diffuse spheres scattered across the grid, to exercise the
    /// uniform grid with a high cell-occupancy count.
    Stress,
}

impl ScenePreset {
    pub fn build(self) -> SceneDescription {
        match self {
            ScenePreset::Showcase => build_showcase(),
            ScenePreset::Cornell => build_cornell(),
            ScenePreset::Minimal => build_minimal(),
            ScenePreset::Gallery => build_gallery(),
            ScenePreset::Stress => build_stress(),
        }
    }
}

fn checker_material(assets: &mut Assets, name: &str) -> crate::material::MaterialHandle {
    let size = 8usize;
    let mut bitmap = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let on = (x + y) % 2 == 0;
            bitmap.push(if on {
                Color::new(0.9, 0.9, 0.9)
            } else {
                Color::new(0.05, 0.05, 0.05)
            });
        }
    }
    let tex = Texture::new(bitmap, size, size);
    let tex_handle = assets.textures.create(Some("checker"), tex);
    let mut mat = Material::default();
    mat.set_diffuse(1.0, 1.0, 1.0);
    mat.set_specular(0.05, 0.05, 0.05);
    mat.set_shininess(8.0);
    mat.set_texture(Some(tex_handle));
    mat.set_uv_scale(6.0, 6.0);
    assets.materials.create(Some(name), mat)
}

fn build_showcase() -> SceneDescription {
    let mut assets = Assets::new();
    let mut scene = Scene::new();

    let ground = checker_material(&mut assets, "ground");
    scene.add_primitive(Primitive::plane(Vec3::unit_y(), 0.0, ground).with_name("ground"));

    let mut mirror_mat = Material::default();
    mirror_mat.set_diffuse(0.05, 0.05, 0.05);
    mirror_mat.set_specular(0.8, 0.8, 0.8);
    mirror_mat.set_shininess(60.0);
    mirror_mat.set_reflection(0.9);
    let mirror = assets.materials.create(Some("mirror"), mirror_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(-2.2, 1.0, 5.0), 1.0, mirror).with_name("mirror_sphere"));

    let mut glass_mat = Material::default();
    glass_mat.set_diffuse(0.0, 0.0, 0.0);
    glass_mat.set_specular(0.9, 0.9, 0.9);
    glass_mat.set_shininess(80.0);
    glass_mat.set_refraction(0.9);
    glass_mat.set_refr_index(1.5);
    let glass = assets.materials.create(Some("glass"), glass_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(1.2, 1.0, 4.0), 1.0, glass).with_name("glass_sphere"));

    let mut red_mat = Material::default();
    red_mat.set_diffuse(0.75, 0.15, 0.15);
    red_mat.set_specular(0.2, 0.2, 0.2);
    red_mat.set_shininess(20.0);
    let red = assets.materials.create(Some("red_matte"), red_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(3.4, 0.6, 3.0), 0.6, red).with_name("red_sphere"));

    let mut gloss_mat = Material::default();
    gloss_mat.set_diffuse(0.1, 0.3, 0.7);
    gloss_mat.set_specular(0.4, 0.4, 0.4);
    gloss_mat.set_shininess(30.0);
    gloss_mat.set_reflection(0.35);
    gloss_mat.set_diffuse_refl(0.25);
    let gloss = assets.materials.create(Some("blue_gloss"), gloss_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(-0.2, 0.5, 1.6), 0.5, gloss).with_name("gloss_sphere"));

    scene.set_extends(Aabb::new(Vec3::new(-8.0, -1.0, -2.0), Vec3::new(8.0, 10.0, 12.0)));

    let mut key = PointLight {
        position: Vec3::new(-4.0, 6.0, -1.0),
        ..PointLight::default()
    };
    key.shading.set_ambient(0.1, 0.1, 0.1);
    key.shading.set_diffuse(0.9, 0.85, 0.78);
    key.shading.set_specular(1.0, 1.0, 1.0);
    scene.add_light(Light::Point(key));

    let mut fill = DirectionalLight::default();
    fill.set_direction(Vec3::new(0.4, -1.0, 0.5));
    fill.shading.set_ambient(0.0, 0.0, 0.0);
    fill.shading.set_diffuse(0.18, 0.18, 0.25);
    fill.shading.set_specular(0.0, 0.0, 0.0);
    scene.add_light(Light::Directional(fill));

    scene.build_grid();
    crate::scene::log_scene_summary(&scene);

    SceneDescription {
        name: "Showcase",
        scene,
        assets,
        camera: CameraSetup {
            eye: Vec3::new(0.0, 2.4, -6.0),
            target: Vec3::new(0.3, 1.1, 4.0),
            up: Vec3::unit_y(),
            fov_degrees: 50.0,
        },
    }
}

/// An open-fronted box: floor, ceiling, back wall, and two side walls built
/// from infinite planes rather than finite quads — `Quad` has no counterpart
/// among the primitive kinds this engine supports (sphere/plane/box/triangle),
/// so the walls are planes clipped implicitly by the grid's own extends.
fn build_cornell() -> SceneDescription {
    let mut assets = Assets::new();
    let mut scene = Scene::new();

    let mut white_mat = Material::default();
    white_mat.set_diffuse(0.73, 0.73, 0.73);
    let white = assets.materials.create(Some("white"), white_mat);

    let mut red_mat = Material::default();
    red_mat.set_diffuse(0.65, 0.05, 0.05);
    let red = assets.materials.create(Some("red"), red_mat);

    let mut green_mat = Material::default();
    green_mat.set_diffuse(0.12, 0.45, 0.15);
    let green = assets.materials.create(Some("green"), green_mat);

    scene.add_primitive(Primitive::plane(Vec3::unit_y(), 0.0, white).with_name("floor"));
    scene.add_primitive(Primitive::plane(-Vec3::unit_y(), 6.0, white).with_name("ceiling"));
    scene.add_primitive(Primitive::plane(-Vec3::unit_z(), 9.0, white).with_name("back_wall"));
    scene.add_primitive(Primitive::plane(Vec3::unit_x(), 3.0, red).with_name("left_wall"));
    scene.add_primitive(Primitive::plane(-Vec3::unit_x(), 3.0, green).with_name("right_wall"));

    let mut mirror_mat = Material::default();
    mirror_mat.set_diffuse(0.05, 0.05, 0.05);
    mirror_mat.set_specular(0.9, 0.9, 0.9);
    mirror_mat.set_shininess(80.0);
    mirror_mat.set_reflection(0.85);
    let mirror = assets.materials.create(Some("mirror"), mirror_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(-1.2, 1.1, 5.0), 1.1, mirror).with_name("mirror_sphere"));

    let mut glass_mat = Material::default();
    glass_mat.set_diffuse(0.0, 0.0, 0.0);
    glass_mat.set_specular(0.9, 0.9, 0.9);
    glass_mat.set_shininess(90.0);
    glass_mat.set_refraction(0.9);
    glass_mat.set_refr_index(1.5);
    let glass = assets.materials.create(Some("glass"), glass_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(1.3, 0.9, 3.2), 0.9, glass).with_name("glass_sphere"));

    scene.set_extends(Aabb::new(Vec3::new(-3.0, -0.5, -4.0), Vec3::new(3.0, 6.5, 9.5)));

    let mut ceiling_light = AreaLight {
        bounds: Aabb::new(Vec3::new(-0.8, 5.95, 3.7), Vec3::new(0.8, 6.0, 5.3)),
        ..AreaLight::default()
    };
    ceiling_light.shading.set_ambient(0.0, 0.0, 0.0);
    ceiling_light.shading.set_diffuse(1.0, 0.96, 0.88);
    ceiling_light.shading.set_specular(0.8, 0.8, 0.75);
    ceiling_light.attenuation0 = 0.3;
    ceiling_light.attenuation1 = 0.02;
    scene.add_light(Light::Area(ceiling_light));

    scene.build_grid();
    crate::scene::log_scene_summary(&scene);

    SceneDescription {
        name: "Cornell Box",
        scene,
        assets,
        camera: CameraSetup {
            eye: Vec3::new(0.0, 3.0, -3.2),
            target: Vec3::new(0.0, 3.0, 4.0),
            up: Vec3::unit_y(),
            fov_degrees: 60.0,
        },
    }
}

fn build_minimal() -> SceneDescription {
    let mut assets = Assets::new();
    let mut scene = Scene::new();

    let mut ground_mat = Material::default();
    ground_mat.set_diffuse(0.4, 0.4, 0.45);
    ground_mat.set_specular(0.1, 0.1, 0.1);
    ground_mat.set_shininess(10.0);
    let ground = assets.materials.create(Some("ground"), ground_mat);
    scene.add_primitive(Primitive::plane(Vec3::unit_y(), 0.0, ground).with_name("ground"));

    let mut mirror_mat = Material::default();
    mirror_mat.set_diffuse(0.05, 0.05, 0.05);
    mirror_mat.set_specular(0.9, 0.9, 0.9);
    mirror_mat.set_shininess(70.0);
    mirror_mat.set_reflection(0.85);
    let mirror = assets.materials.create(Some("mirror"), mirror_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(0.0, 1.0, 5.0), 1.0, mirror).with_name("hero_sphere"));

    scene.set_extends(Aabb::new(Vec3::new(-6.0, -1.0, -2.0), Vec3::new(6.0, 8.0, 10.0)));

    let mut sun = DirectionalLight::default();
    sun.set_direction(Vec3::new(0.3, -1.0, 0.6));
    sun.shading.set_ambient(0.15, 0.15, 0.15);
    sun.shading.set_diffuse(0.85, 0.82, 0.75);
    sun.shading.set_specular(0.9, 0.9, 0.9);
    scene.add_light(Light::Directional(sun));

    scene.build_grid();
    crate::scene::log_scene_summary(&scene);

    SceneDescription {
        name: "Minimal",
        scene,
        assets,
        camera: CameraSetup {
            eye: Vec3::new(0.0, 1.6, -3.0),
            target: Vec3::new(0.0, 1.0, 5.0),
            up: Vec3::unit_y(),
            fov_degrees: 45.0,
        },
    }
}

fn build_gallery() -> SceneDescription {
    let mut assets = Assets::new();
    let mut scene = Scene::new();

    let checker = checker_material(&mut assets, "checker_floor");
    scene.add_primitive(Primitive::plane(Vec3::unit_y(), 0.0, checker).with_name("floor"));

    let mut backdrop_mat = Material::default();
    backdrop_mat.set_diffuse(0.15, 0.15, 0.2);
    let backdrop = assets.materials.create(Some("backdrop"), backdrop_mat);
    scene.add_primitive(Primitive::plane(-Vec3::unit_z(), 14.0, backdrop).with_name("backdrop"));

    let mut pedestal_mat = Material::default();
    pedestal_mat.set_diffuse(0.08, 0.08, 0.08);
    pedestal_mat.set_specular(0.6, 0.6, 0.65);
    pedestal_mat.set_shininess(40.0);
    pedestal_mat.set_reflection(0.3);
    let pedestal = assets.materials.create(Some("pedestal"), pedestal_mat);
    scene.add_primitive(
        Primitive::aabb_box(
            Aabb::new(Vec3::new(-2.5, 0.0, 4.0), Vec3::new(2.5, 0.2, 9.0)),
            pedestal,
        )
        .with_name("pedestal"),
    );

    let mut glass_mat = Material::default();
    glass_mat.set_diffuse(0.0, 0.0, 0.0);
    glass_mat.set_specular(0.9, 0.9, 0.9);
    glass_mat.set_shininess(90.0);
    glass_mat.set_refraction(0.9);
    glass_mat.set_refr_index(1.5);
    let glass = assets.materials.create(Some("glass"), glass_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(0.0, 1.2, 6.0), 1.2, glass).with_name("glass_sphere"));

    let mut gold_mat = Material::default();
    gold_mat.set_diffuse(0.4, 0.28, 0.05);
    gold_mat.set_specular(0.9, 0.75, 0.3);
    gold_mat.set_shininess(50.0);
    gold_mat.set_reflection(0.4);
    gold_mat.set_diffuse_refl(0.15);
    let gold = assets.materials.create(Some("gold"), gold_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(-2.9, 0.85, 5.0), 0.85, gold).with_name("gold_sphere"));

    let mut accent_mat = Material::default();
    accent_mat.set_diffuse(0.1, 0.45, 0.85);
    accent_mat.set_specular(0.3, 0.3, 0.3);
    accent_mat.set_shininess(20.0);
    let accent = assets.materials.create(Some("accent"), accent_mat);
    scene.add_primitive(Primitive::sphere(Vec3::new(2.6, 0.7, 4.6), 0.7, accent).with_name("accent_sphere"));

    let vertices = vec![
        crate::primitive::Vertex::new(Vec3::new(-1.4, 0.2, 7.6), Vec3::zero(), 0.0, 0.0),
        crate::primitive::Vertex::new(Vec3::new(1.4, 0.2, 7.6), Vec3::zero(), 1.0, 0.0),
        crate::primitive::Vertex::new(Vec3::new(0.0, 2.4, 7.6), Vec3::zero(), 0.5, 1.0),
    ];
    let mut banner_mat = Material::default();
    banner_mat.set_diffuse(0.85, 0.2, 0.25);
    banner_mat.set_specular(0.15, 0.15, 0.15);
    banner_mat.set_shininess(12.0);
    let banner = assets.materials.create(Some("banner"), banner_mat);
    scene.add_mesh(crate::scene::Mesh {
        vertices,
        triangles: vec![crate::scene::MeshTriangle {
            v0: 0,
            v1: 1,
            v2: 2,
            material: banner,
            flat_shaded: true,
        }],
    });

    scene.set_extends(Aabb::new(Vec3::new(-8.0, -1.0, -2.0), Vec3::new(8.0, 10.0, 14.0)));

    let mut key = PointLight {
        position: Vec3::new(-3.0, 6.0, 2.0),
        ..PointLight::default()
    };
    key.shading.set_diffuse(0.9, 0.85, 0.8);
    key.shading.set_specular(1.0, 1.0, 1.0);
    scene.add_light(Light::Point(key));

    let mut rim = DirectionalLight::default();
    rim.set_direction(Vec3::new(-0.2, -0.6, -1.0));
    rim.shading.set_ambient(0.0, 0.0, 0.0);
    rim.shading.set_diffuse(0.25, 0.3, 0.4);
    scene.add_light(Light::Directional(rim));

    let mut fill = AreaLight {
        bounds: Aabb::new(Vec3::new(2.0, 5.0, 1.0), Vec3::new(3.5, 5.3, 2.5)),
        ..AreaLight::default()
    };
    fill.shading.set_diffuse(0.6, 0.65, 0.75);
    fill.attenuation0 = 0.4;
    fill.attenuation1 = 0.03;
    scene.add_light(Light::Area(fill));

    scene.build_grid();
    crate::scene::log_scene_summary(&scene);

    SceneDescription {
        name: "Gallery",
        scene,
        assets,
        camera: CameraSetup {
            eye: Vec3::new(0.0, 2.6, -2.0),
            target: Vec3::new(0.0, 1.3, 7.0),
            up: Vec3::unit_y(),
            fov_degrees: 45.0,
        },
    }
}

/// Scatters many small diffuse spheres across the grid extents, exercising
/// the uniform grid's per-cell candidate lists with a much higher primitive
/// count than the hand-placed presets.
fn build_stress() -> SceneDescription {
    let mut assets = Assets::new();
    let mut scene = Scene::new();
    let mut rng = rand::thread_rng();

    let mut ground_mat = Material::default();
    ground_mat.set_diffuse(0.5, 0.5, 0.5);
    let ground = assets.materials.create(Some("ground"), ground_mat);
    scene.add_primitive(Primitive::plane(Vec3::unit_y(), 0.0, ground).with_name("ground"));

    for i in 0..400 {
        let x = rng.gen_range(-10.0..10.0);
        let z = rng.gen_range(1.0..18.0);
        let radius = rng.gen_range(0.08..0.3);
        let mut mat = Material::default();
        mat.set_diffuse(rng.gen_range(0.1..0.9), rng.gen_range(0.1..0.9), rng.gen_range(0.1..0.9));
        mat.set_specular(0.1, 0.1, 0.1);
        mat.set_shininess(8.0);
        let handle = assets.materials.create(Some(&format!("stress_{i}")), mat);
        scene.add_primitive(Primitive::sphere(Vec3::new(x, radius, z), radius, handle));
    }

    scene.set_extends(Aabb::new(Vec3::new(-11.0, -1.0, -1.0), Vec3::new(11.0, 6.0, 20.0)));

    let mut sun = DirectionalLight::default();
    sun.set_direction(Vec3::new(0.3, -1.0, 0.5));
    sun.shading.set_ambient(0.2, 0.2, 0.2);
    sun.shading.set_diffuse(0.8, 0.78, 0.7);
    scene.add_light(Light::Directional(sun));

    scene.build_grid();
    crate::scene::log_scene_summary(&scene);

    SceneDescription {
        name: "Stress Test (400 spheres)",
        scene,
        assets,
        camera: CameraSetup {
            eye: Vec3::new(0.0, 3.5, -4.0),
            target: Vec3::new(0.0, 0.5, 10.0),
            up: Vec3::unit_y(),
            fov_degrees: 55.0,
        },
    }
}
