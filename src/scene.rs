//! Scene storage and the uniform-grid acceleration structure.
//!
//! Ported from `Scene`/`ObjectList`/`GridMap`. The reference engine keeps
//! primitives in a `std::list<Primitive*>` and a separate
//! `std::vector<ObjectList*>` of per-cell primitive-pointer lists sized
//! `RT_GRIDSIZE^3`; here both collapse into a `Vec<Primitive>` owned by the
//! scene plus a grid of `Vec<PrimitiveId>` index lists, since there's no
//! reason to pay for a second indirection through a pointer when an index
//! into the primitive vector does the same job.

use tracing::{debug, info};

use crate::light::Light;
use crate::material::{Assets, MaterialHandle};
use crate::math::{Aabb, Vec3};
use crate::primitive::{Primitive, PrimitiveId, Vertex};

/// Grid resolution along each axis (`RT_GRIDSIZE`). Chosen by the reference
/// engine as a fixed compromise between traversal-step count and per-cell
/// list length; never made configurable there, so it isn't here either.
pub const GRID_SIZE: usize = 32;
const GRID_SHIFT: usize = 5;

/// Default scene bounds used when no mesh supplies its own, taken verbatim
/// from `Scene::updateExtends`'s hardcoded fallback.
const DEFAULT_EXTENDS_MIN: Vec3 = Vec3::new(-3.0, -3.0, -6.0);
const DEFAULT_EXTENDS_MAX: Vec3 = Vec3::new(14.0, 8.0, 30.0);

/// A triangle in mesh-import space — three vertex indices into the
/// accompanying vertex buffer plus a material, handed to [`Scene::add_mesh`].
#[derive(Debug, Clone, Copy)]
pub struct MeshTriangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub material: MaterialHandle,
    /// Whether the triangle should overwrite its vertices' normals with its
    /// own face normal (flat shading) rather than keep normals supplied by
    /// the loader (smooth shading).
    pub flat_shaded: bool,
}

/// A self-contained polygon mesh ready to be folded into a [`Scene`], mirroring
/// the external surface `Scene::loadObjModel` exposes to callers: a flat
/// vertex buffer and a list of triangles indexing into it.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<MeshTriangle>,
}

/// The complete renderable scene: primitives, lights, a shared vertex pool
/// for triangle meshes, the scene's overall bounding box, and the uniform
/// grid built over it.
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    vertices: Vec<Vertex>,
    extends: Aabb,
    /// Flattened `GRID_SIZE^3` array of per-cell primitive-id lists, indexed
    /// by `x + (y << GRID_SHIFT) + (z << (GRID_SHIFT*2))`, matching
    /// `GridMap`'s indexing in `findNearest`.
    grid: Vec<Vec<PrimitiveId>>,
    /// Reciprocal cell size per axis (`mRCS` in the reference engine) —
    /// converts a world-space offset from `extends.min` into a cell index.
    rcs: Vec3,
    /// Cell size per axis (`mCS`) — converts a cell index back into a
    /// world-space offset, used when stepping the DDA.
    cs: Vec3,
    has_explicit_extends: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            vertices: Vec::new(),
            extends: Aabb::new(DEFAULT_EXTENDS_MIN, DEFAULT_EXTENDS_MAX),
            grid: Vec::new(),
            rcs: Vec3::ones(),
            cs: Vec3::ones(),
            has_explicit_extends: false,
        }
    }

    pub fn extends(&self) -> Aabb {
        self.extends
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Vec<Light> {
        &mut self.lights
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn primitive(&self, id: PrimitiveId) -> &Primitive {
        &self.primitives[id]
    }

    pub fn add_primitive(&mut self, prim: Primitive) -> PrimitiveId {
        self.primitives.push(prim);
        self.primitives.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Explicitly sets the scene bounds, overriding the hardcoded default.
    /// Mirrors `Scene::updateExtends` using the mesh loader's precomputed
    /// bounds when one is present.
    pub fn set_extends(&mut self, extends: Aabb) {
        self.extends = extends;
        self.has_explicit_extends = true;
    }

    /// Folds a loaded mesh into the scene: appends its vertices (remapping
    /// triangle indices by the prior vertex-buffer length) and its triangle
    /// primitives. Ported from `Scene::loadObjModel`'s per-triangle
    /// `TrianglePrim` construction loop.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        let base = self.vertices.len();
        self.vertices.extend(mesh.vertices);
        for tri in mesh.triangles {
            let prim = Primitive::triangle(
                base + tri.v0,
                base + tri.v1,
                base + tri.v2,
                &mut self.vertices,
                tri.flat_shaded,
                tri.material,
            );
            self.primitives.push(prim);
        }
    }

    /// Rebuilds the scene's bounding box and the uniform grid over it.
    /// Ported from `Scene::buildGrid`: clears any existing grid, recomputes
    /// `extends` if it hasn't been set explicitly, then for every primitive
    /// walks its candidate cell range and inserts it into every cell it
    /// actually overlaps (tested with `Primitive::intersects_box`, not just
    /// bounding-box candidacy).
    pub fn build_grid(&mut self) {
        if !self.has_explicit_extends {
            self.update_default_extends();
        }

        self.grid = vec![Vec::new(); GRID_SIZE * GRID_SIZE * GRID_SIZE];
        let dim = self.extends.dim();
        self.cs = Vec3::new(
            dim.x / GRID_SIZE as f64,
            dim.y / GRID_SIZE as f64,
            dim.z / GRID_SIZE as f64,
        );
        self.rcs = Vec3::new(
            GRID_SIZE as f64 / dim.x,
            GRID_SIZE as f64 / dim.y,
            GRID_SIZE as f64 / dim.z,
        );

        let mut inserted = 0usize;
        for (id, prim) in self.primitives.iter().enumerate() {
            let rmin = (prim.aabb.min - self.extends.min) * self.rcs;
            let rmax = (prim.aabb.max - self.extends.min) * self.rcs + Vec3::ones();

            let clamp_axis = |v: f64| v.clamp(0.0, (GRID_SIZE - 1) as f64) as i64;
            let x0 = clamp_axis(rmin.x);
            let x1 = clamp_axis(rmax.x);
            let y0 = clamp_axis(rmin.y);
            let y1 = clamp_axis(rmax.y);
            let z0 = clamp_axis(rmin.z);
            let z1 = clamp_axis(rmax.z);

            for z in z0..=z1 {
                for y in y0..=y1 {
                    for x in x0..=x1 {
                        let cell_min = self.extends.min
                            + Vec3::new(x as f64, y as f64, z as f64) * self.cs;
                        let cell = Aabb::new(cell_min, cell_min + self.cs);
                        if prim.intersects_box(&cell, &self.vertices) {
                            let idx = x as usize
                                + ((y as usize) << GRID_SHIFT)
                                + ((z as usize) << (GRID_SHIFT * 2));
                            self.grid[idx].push(id);
                            inserted += 1;
                        }
                    }
                }
            }
        }
        debug!(
            primitives = self.primitives.len(),
            cell_insertions = inserted,
            "grid rebuilt"
        );
    }

    fn update_default_extends(&mut self) {
        if self.vertices.is_empty() {
            self.extends = Aabb::new(DEFAULT_EXTENDS_MIN, DEFAULT_EXTENDS_MAX);
            return;
        }
        let mut min = self.vertices[0].position;
        let mut max = min;
        for v in &self.vertices {
            min = min.min(v.position);
            max = max.max(v.position);
        }
        self.extends = Aabb::new(min, max);
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cs
    }

    pub fn reciprocal_cell_size(&self) -> Vec3 {
        self.rcs
    }

    /// Primitive ids stored in the grid cell `(x, y, z)`. Empty when the
    /// coordinates are out of range — callers guard with the grid-bounds
    /// check in `find_nearest` before indexing, as the reference engine's
    /// `findNearest` does with its `curCell > 0 && curCell < GRIDSIZE` test.
    pub fn cell(&self, x: usize, y: usize, z: usize) -> &[PrimitiveId] {
        if x >= GRID_SIZE || y >= GRID_SIZE || z >= GRID_SIZE {
            return &[];
        }
        let idx = x + (y << GRID_SHIFT) + (z << (GRID_SHIFT * 2));
        &self.grid[idx]
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Looks up a material by name in `assets`, warning and falling back to the
/// default material if it isn't found — the scene-construction counterpart
/// of `MaterialManager::getMaterial`'s fallback behavior.
pub fn resolve_material(assets: &Assets, name: &str) -> MaterialHandle {
    assets.materials.get_named(name)
}

pub fn log_scene_summary(scene: &Scene) {
    info!(
        primitives = scene.primitives().len(),
        lights = scene.lights().len(),
        vertices = scene.vertices().len(),
        "scene ready"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Assets;

    #[test]
    fn default_extends_used_when_scene_has_no_mesh() {
        let mut scene = Scene::new();
        let assets = Assets::new();
        let mat = assets.materials.default_handle();
        scene.add_primitive(Primitive::sphere(Vec3::zero(), 1.0, mat));
        scene.build_grid();
        assert_eq!(scene.extends().min, DEFAULT_EXTENDS_MIN);
        assert_eq!(scene.extends().max, DEFAULT_EXTENDS_MAX);
    }

    #[test]
    fn sphere_at_origin_lands_in_a_central_cell() {
        let mut scene = Scene::new();
        let assets = Assets::new();
        let mat = assets.materials.default_handle();
        scene.set_extends(Aabb::new(Vec3::ones() * -10.0, Vec3::ones() * 10.0));
        scene.add_primitive(Primitive::sphere(Vec3::zero(), 1.0, mat));
        scene.build_grid();
        let centre_cell = GRID_SIZE / 2;
        assert!(!scene.cell(centre_cell, centre_cell, centre_cell).is_empty());
    }

    #[test]
    fn out_of_range_cell_lookup_is_empty_not_a_panic() {
        let mut scene = Scene::new();
        scene.build_grid();
        assert!(scene.cell(GRID_SIZE, 0, 0).is_empty());
    }

    #[test]
    fn far_apart_primitives_occupy_disjoint_cells() {
        let mut scene = Scene::new();
        let assets = Assets::new();
        let mat = assets.materials.default_handle();
        scene.set_extends(Aabb::new(Vec3::ones() * -10.0, Vec3::ones() * 10.0));
        let a = scene.add_primitive(Primitive::sphere(Vec3::new(-8.0, -8.0, -8.0), 0.2, mat));
        let b = scene.add_primitive(Primitive::sphere(Vec3::new(8.0, 8.0, 8.0), 0.2, mat));
        scene.build_grid();
        let found_a = (0..GRID_SIZE).any(|x| {
            (0..GRID_SIZE).any(|y| (0..GRID_SIZE).any(|z| scene.cell(x, y, z).contains(&a)))
        });
        let found_b = (0..GRID_SIZE).any(|x| {
            (0..GRID_SIZE).any(|y| (0..GRID_SIZE).any(|z| scene.cell(x, y, z).contains(&b)))
        });
        assert!(found_a && found_b);
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                for z in 0..GRID_SIZE {
                    let cell = scene.cell(x, y, z);
                    assert!(!(cell.contains(&a) && cell.contains(&b)));
                }
            }
        }
    }
}
