//! Primitives: spheres, planes, boxes, and triangles.
//!
//! The reference engine expresses `Primitive` as an abstract base class with
//! virtual `intersect`/`intersetBox`/`getNormal`, one concrete subclass per
//! shape. Rust has no good reason to pay for a vtable here — the shape set
//! is closed, so this is a tagged `enum` instead (`REDESIGN FLAGS`). The
//! other structural change: the reference `TrianglePrim` caches its last
//! computed barycentric coordinate in `mBaryCoord`, mutated by `intersect`
//! and read back by `getNormal`/`getTextureCoord` on the very next call —
//! that's a hidden temporal coupling that breaks under any future
//! parallelism. Here, `intersect` returns the barycentric coordinate inline
//! in the `Hit` it produces, and `normal_at`/`texture_coord` take it as an
//! argument instead of reading mutable scratch state.

use std::cell::Cell;

use crate::material::{Assets, MaterialHandle};
use crate::math::{Aabb, Color, Ray, Vec3, EPSILON};

pub type PrimitiveId = usize;

/// `MODULO3[i] = i % 3` precomputed for i in 0..=4, used by the triangle's
/// major-axis projection the same way the reference engine's `MODULO3`
/// lookup table is.
const MODULO3: [usize; 5] = [0, 1, 2, 0, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RTResult {
    /// The ray started inside the primitive.
    InPrim,
    /// A normal surface hit.
    Hit,
}

/// Per-intersection data that doesn't fit on the primitive itself — for a
/// triangle, the barycentric coordinate computed at hit time.
#[derive(Debug, Clone, Copy)]
pub enum HitDetail {
    None,
    Triangle { bary: [f64; 3] },
}

#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub result: RTResult,
    pub detail: HitDetail,
}

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub u: f64,
    pub v: f64,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, u: f64, v: f64) -> Self {
        Self {
            position,
            normal,
            u,
            v,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SphereData {
    pub centre: Vec3,
    pub radius: f64,
    pub sqr_radius: f64,
    pub rcp_radius: f64,
}

impl SphereData {
    pub fn new(centre: Vec3, radius: f64) -> Self {
        Self {
            centre,
            radius,
            sqr_radius: radius * radius,
            rcp_radius: 1.0 / radius,
        }
    }

    /// Previously a no-op accessor in the reference engine
    /// (`Real getSqrRadius() { mSqrRadius; }` — an expression statement with
    /// no `return`, so it compiled to undefined behavior). Here it actually
    /// returns the value.
    pub fn sqr_radius(&self) -> f64 {
        self.sqr_radius
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlaneData {
    pub normal: Vec3,
    pub d: f64,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl PlaneData {
    pub fn new(normal: Vec3, d: f64) -> Self {
        let u_axis = Vec3::new(normal.y, normal.z, -normal.x);
        let v_axis = u_axis.cross(normal);
        Self {
            normal,
            d,
            u_axis,
            v_axis,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TriangleData {
    pub v: [usize; 3],
    pub normal: Vec3,
    pub major_axis: usize,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
}

impl TriangleData {
    pub fn new(v0: usize, v1: usize, v2: usize, vertices: &mut [Vertex], gen_norm: bool) -> Self {
        let p0 = vertices[v0].position;
        let b = vertices[v1].position - p0;
        let c = vertices[v2].position - p0;
        let mut normal = b.cross(c);
        normal = normal.normalized();
        let n_abs = normal.abs();
        let major_axis = if n_abs.x > n_abs.y && n_abs.x > n_abs.z {
            0
        } else if n_abs.y > n_abs.x && n_abs.y > n_abs.z {
            1
        } else {
            2
        };
        let u = MODULO3[major_axis + 1];
        let v_axis = MODULO3[major_axis + 2];
        let krec = 1.0 / (b[u] * c[v_axis] - b[v_axis] * c[u]);
        let bx = c[v_axis] * krec;
        let by = -c[u] * krec;
        let cx = -b[v_axis] * krec;
        let cy = b[u] * krec;

        if gen_norm {
            vertices[v0].normal = normal;
            vertices[v1].normal = normal;
            vertices[v2].normal = normal;
        }

        Self {
            v: [v0, v1, v2],
            normal,
            major_axis,
            bx,
            by,
            cx,
            cy,
        }
    }

    fn aabb(&self, vertices: &[Vertex]) -> Aabb {
        let p0 = vertices[self.v[0]].position;
        let p1 = vertices[self.v[1]].position;
        let p2 = vertices[self.v[2]].position;
        Aabb::new(p0.min(p1).min(p2), p0.max(p1).max(p2))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PrimitiveKind {
    Sphere(SphereData),
    Plane(PlaneData),
    Box,
    Triangle(TriangleData),
}

/// A primitive together with the bookkeeping shared by every shape: its
/// bounding box, name, material, light flag, and the self-hit guard
/// (`last_ray_id`) that prevents a ray from immediately re-intersecting the
/// surface it was just spawned from due to floating point error at the hit
/// point. `last_ray_id` is a `Cell` because `intersect` needs to record it
/// through a shared `&self` — primitives are looked up by id out of a
/// shared `Vec`, not held by unique reference, during grid traversal.
#[derive(Debug)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub aabb: Aabb,
    pub name: String,
    pub material: MaterialHandle,
    pub is_light: bool,
    last_ray_id: Cell<u64>,
}

impl Primitive {
    pub fn sphere(centre: Vec3, radius: f64, material: MaterialHandle) -> Self {
        let data = SphereData::new(centre, radius);
        let r = Vec3::ones() * radius;
        Self {
            kind: PrimitiveKind::Sphere(data),
            aabb: Aabb::new(centre - r, centre + r),
            name: String::new(),
            material,
            is_light: false,
            last_ray_id: Cell::new(0),
        }
    }

    pub fn plane(normal: Vec3, d: f64, material: MaterialHandle) -> Self {
        let data = PlaneData::new(normal, d);
        let far = Vec3::ones() * 10_000.0;
        Self {
            kind: PrimitiveKind::Plane(data),
            aabb: Aabb::new(-far, far),
            name: String::new(),
            material,
            is_light: false,
            last_ray_id: Cell::new(0),
        }
    }

    pub fn aabb_box(aabb: Aabb, material: MaterialHandle) -> Self {
        Self {
            kind: PrimitiveKind::Box,
            aabb,
            name: String::new(),
            material,
            is_light: false,
            last_ray_id: Cell::new(0),
        }
    }

    pub fn triangle(
        v0: usize,
        v1: usize,
        v2: usize,
        vertices: &mut [Vertex],
        gen_norm: bool,
        material: MaterialHandle,
    ) -> Self {
        let data = TriangleData::new(v0, v1, v2, vertices, gen_norm);
        let aabb = data.aabb(vertices);
        Self {
            kind: PrimitiveKind::Triangle(data),
            aabb,
            name: String::new(),
            material,
            is_light: false,
            last_ray_id: Cell::new(0),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_light(mut self, is_light: bool) -> Self {
        self.is_light = is_light;
        self
    }

    pub fn last_ray_id(&self) -> u64 {
        self.last_ray_id.get()
    }

    /// Intersects `ray`, shrinking `dist` in place when a closer hit is
    /// found — same in/out-parameter contract as `Primitive::intersect`, so
    /// a chain of candidates in a grid cell can all be tested against the
    /// same running closest distance without reallocating per call.
    pub fn intersect(&self, ray: &Ray, dist: &mut f64, vertices: &[Vertex]) -> Option<Hit> {
        self.last_ray_id.set(ray.id);
        match &self.kind {
            PrimitiveKind::Sphere(s) => intersect_sphere(s, ray, dist),
            PrimitiveKind::Plane(p) => intersect_plane(p, ray, dist),
            PrimitiveKind::Box => intersect_box(&self.aabb, ray, dist),
            PrimitiveKind::Triangle(t) => intersect_triangle(t, ray, dist, vertices),
        }
    }

    pub fn intersects_box(&self, b: &Aabb, vertices: &[Vertex]) -> bool {
        match &self.kind {
            PrimitiveKind::Sphere(s) => sphere_intersects_box(s, b),
            PrimitiveKind::Plane(p) => plane_intersects_box(p, b),
            PrimitiveKind::Box => self.aabb.intersects(b),
            PrimitiveKind::Triangle(t) => triangle_intersects_box(t, b, vertices),
        }
    }

    pub fn normal_at(&self, pos: Vec3, detail: &HitDetail, vertices: &[Vertex]) -> Vec3 {
        match &self.kind {
            PrimitiveKind::Sphere(s) => (pos - s.centre) * s.rcp_radius,
            PrimitiveKind::Plane(p) => p.normal,
            PrimitiveKind::Box => box_normal_at(&self.aabb, pos),
            PrimitiveKind::Triangle(t) => triangle_normal_at(t, detail, vertices),
        }
    }

    pub fn texture_coord(&self, pos: Vec3, detail: &HitDetail, vertices: &[Vertex]) -> (f64, f64) {
        match &self.kind {
            PrimitiveKind::Sphere(s) => sphere_texcoord(s, pos),
            PrimitiveKind::Plane(p) => (pos.dot(p.u_axis), pos.dot(p.v_axis)),
            PrimitiveKind::Box => (0.0, 0.0),
            PrimitiveKind::Triangle(t) => triangle_texcoord(t, detail, vertices),
        }
    }

    /// Diffuse albedo at the intersection point — flat diffuse color, or the
    /// diffuse color modulated by a bilinearly-sampled texel if the material
    /// carries a texture.
    pub fn color_at(&self, pos: Vec3, detail: &HitDetail, vertices: &[Vertex], assets: &Assets) -> Color {
        let mat = assets.materials.get(self.material);
        match mat.texture() {
            None => mat.diffuse(),
            Some(tex_handle) => {
                let (mut u, mut v) = self.texture_coord(pos, detail, vertices);
                u *= mat.u_scale();
                v *= mat.v_scale();
                assets.textures.get(tex_handle).texel(u, v) * mat.diffuse()
            }
        }
    }
}

// ─── Sphere ─────────────────────────────────────────────────────────────────

fn intersect_sphere(s: &SphereData, ray: &Ray, dist: &mut f64) -> Option<Hit> {
    let v = s.centre - ray.origin;
    let b = v.dot(ray.direction);
    let a2 = v.length_squared() - b * b;
    let det = s.sqr_radius - a2;
    if det <= 0.0 {
        return None;
    }
    let det = det.sqrt();
    let i1 = b - det;
    let i2 = b + det;
    if i2 <= 0.0 {
        return None;
    }
    if i1 < 0.0 {
        if i2 < *dist {
            *dist = i2;
            return Some(Hit {
                result: RTResult::InPrim,
                detail: HitDetail::None,
            });
        }
    } else if i1 < *dist {
        *dist = i1;
        return Some(Hit {
            result: RTResult::Hit,
            detail: HitDetail::None,
        });
    }
    None
}

fn sphere_intersects_box(s: &SphereData, b: &Aabb) -> bool {
    let mut dmin = 0.0;
    for axis in 0..3 {
        let c = s.centre[axis];
        if c < b.min[axis] {
            dmin += (c - b.min[axis]) * (c - b.min[axis]);
        } else if c > b.max[axis] {
            dmin += (c - b.max[axis]) * (c - b.max[axis]);
        }
    }
    dmin <= s.sqr_radius
}

fn sphere_texcoord(s: &SphereData, pos: Vec3) -> (f64, f64) {
    let vp = (pos - s.centre) * s.rcp_radius;
    let phi = vp.dot(Vec3::unit_y()).clamp(-1.0, 1.0).acos();
    let v = phi * (1.0 / std::f64::consts::PI);
    let sin_phi = phi.sin();
    let theta = (vp.dot(Vec3::unit_x()) / sin_phi).clamp(-1.0, 1.0).acos() * 0.5 / std::f64::consts::PI;
    let u = if vp.dot(Vec3::unit_z()) >= 0.0 {
        1.0 - theta
    } else {
        theta
    };
    (u, v)
}

// ─── Plane ──────────────────────────────────────────────────────────────────

fn intersect_plane(p: &PlaneData, ray: &Ray, dist: &mut f64) -> Option<Hit> {
    let d = p.normal.dot(ray.direction);
    if d >= 0.0 {
        return None;
    }
    let t = -(p.normal.dot(ray.origin) + p.d) / d;
    if t > 0.0 && t < *dist {
        *dist = t;
        Some(Hit {
            result: RTResult::Hit,
            detail: HitDetail::None,
        })
    } else {
        None
    }
}

fn plane_intersects_box(p: &PlaneData, b: &Aabb) -> bool {
    let corners = [b.min, b.max];
    let mut side1 = 0;
    let mut side2 = 0;
    for i in 0..8 {
        let corner = Vec3::new(
            corners[i & 1].x,
            corners[(i >> 1) & 1].y,
            corners[(i >> 2) & 1].z,
        );
        if corner.dot(p.normal) + p.d < 0.0 {
            side1 += 1;
        } else {
            side2 += 1;
        }
    }
    !(side1 == 0 || side2 == 0)
}

// ─── Box ────────────────────────────────────────────────────────────────────

fn intersect_box(aabb: &Aabb, ray: &Ray, dist: &mut f64) -> Option<Hit> {
    let mut candidate: [f64; 6] = [-1.0; 6];
    let v1 = aabb.min;
    let v2 = aabb.max;
    let d = ray.direction;
    let o = ray.origin;

    if d.x != 0.0 {
        let rc = 1.0 / d.x;
        candidate[0] = (v1.x - o.x) * rc;
        candidate[1] = (v2.x - o.x) * rc;
    }
    if d.y != 0.0 {
        let rc = 1.0 / d.y;
        candidate[2] = (v1.y - o.y) * rc;
        candidate[3] = (v2.y - o.y) * rc;
    }
    if d.z != 0.0 {
        let rc = 1.0 / d.z;
        candidate[4] = (v1.z - o.z) * rc;
        candidate[5] = (v2.z - o.z) * rc;
    }

    let mut hit = false;
    for &t in &candidate {
        if t > 0.0 {
            let ip = o + d * t;
            if t < *dist
                && ip.all_gt(v1 - Vec3::ones() * EPSILON)
                && ip.all_lt(v2 + Vec3::ones() * EPSILON)
            {
                *dist = t;
                hit = true;
            }
        }
    }

    if hit {
        let result = if aabb.contains(o) {
            RTResult::InPrim
        } else {
            RTResult::Hit
        };
        Some(Hit {
            result,
            detail: HitDetail::None,
        })
    } else {
        None
    }
}

fn box_normal_at(aabb: &Aabb, pos: Vec3) -> Vec3 {
    let tdist = [
        (pos.x - aabb.min.x).abs(),
        (pos.y - aabb.min.y).abs(),
        (pos.z - aabb.min.z).abs(),
        (pos.x - aabb.max.x).abs(),
        (pos.y - aabb.max.y).abs(),
        (pos.z - aabb.max.z).abs(),
    ];
    let mut best = 0;
    let mut bdist = tdist[0];
    for (i, &d) in tdist.iter().enumerate().skip(1) {
        if d < bdist {
            bdist = d;
            best = i;
        }
    }
    match best {
        0 => Vec3::new(-1.0, 0.0, 0.0),
        1 => Vec3::new(0.0, -1.0, 0.0),
        2 => Vec3::new(0.0, 0.0, -1.0),
        3 => Vec3::new(1.0, 0.0, 0.0),
        4 => Vec3::new(0.0, 1.0, 0.0),
        _ => Vec3::new(0.0, 0.0, 1.0),
    }
}

// ─── Triangle ───────────────────────────────────────────────────────────────

fn intersect_triangle(t: &TriangleData, ray: &Ray, dist: &mut f64, vertices: &[Vertex]) -> Option<Hit> {
    let o = ray.origin;
    let d = ray.direction;
    let denom = t.normal.dot(d);
    if denom >= 0.0 {
        return None;
    }
    let p0 = vertices[t.v[0]].position;
    let hit_dist = t.normal.dot(p0 - o) / denom;
    if !(hit_dist > 0.0 && hit_dist < *dist) {
        return None;
    }

    let hit = o + d * hit_dist - p0;
    let u = MODULO3[t.major_axis + 1];
    let v = MODULO3[t.major_axis + 2];
    let b1 = hit[u] * t.bx + hit[v] * t.by;
    if b1 < 0.0 {
        return None;
    }
    let b2 = hit[u] * t.cx + hit[v] * t.cy;
    if b2 < 0.0 {
        return None;
    }
    let b0 = 1.0 - b1 - b2;
    if b0 < 0.0 {
        return None;
    }

    *dist = hit_dist;
    Some(Hit {
        result: RTResult::Hit,
        detail: HitDetail::Triangle { bary: [b0, b1, b2] },
    })
}

/// Full 13-axis separating axis test (3 box axes + 1 triangle-face normal +
/// 9 edge cross-products). The reference engine's `intersetBox` computes the
/// same 9 edge-normal candidates but the depth-along-normal accumulation is
/// inside `for (i=0; i<0; ++i)` — a loop bound that never executes, so
/// `d2r` is always zero and every edge-axis test after the face-normal test
/// is a no-op. That is not reproduced here; all 13 axes are tested.
fn triangle_intersects_box(t: &TriangleData, b: &Aabb, vertices: &[Vertex]) -> bool {
    let half_dim = b.dim() * 0.5;
    let centre = b.min + half_dim;

    let p: [Vec3; 3] = [
        vertices[t.v[0]].position,
        vertices[t.v[1]].position,
        vertices[t.v[2]].position,
    ];
    let v: [Vec3; 3] = [p[0] - centre, p[1] - centre, p[2] - centre];
    let mut e: [Vec3; 3] = [
        p[MODULO3[0]] - p[MODULO3[1]],
        p[MODULO3[1]] - p[MODULO3[2]],
        p[MODULO3[2]] - p[MODULO3[0]],
    ];
    for edge in &mut e {
        *edge = edge.normalized();
    }

    // 3 box axes.
    let mut touching_all = [false; 3];
    for axis in 0..3 {
        let mut side = 0i32;
        let mut sv = 0;
        for vert in &v {
            if vert[axis] > half_dim[axis] {
                side += 1;
            } else if vert[axis] < -half_dim[axis] {
                side -= 1;
            } else {
                sv += 1;
            }
        }
        if side == -3 || side == 3 {
            return false;
        }
        touching_all[axis] = sv == 3;
    }
    if touching_all.iter().any(|&x| x) {
        return true;
    }

    // Triangle face normal axis.
    let norm = e[0].cross(e[1]);
    let d2tri = norm.dot(v[0]).abs();
    let d2r = norm.abs().dot(half_dim);
    if d2tri > d2r {
        return false;
    }

    // 9 edge cross-product axes.
    for axis in 0..3 {
        for edge in &e {
            let axis_vec = unit_axis(axis);
            if axis_vec.dot(*edge).abs() > 1.0 - EPSILON {
                continue;
            }
            let norm = axis_vec.cross(*edge);
            let d2v0 = norm.dot(v[axis]).abs();
            let d2v2 = norm.dot(v[MODULO3[axis + 2]]).abs();
            let d2tri = d2v0.min(d2v2);
            let d2r = norm.abs().dot(half_dim);
            if d2tri > d2r {
                return false;
            }
        }
    }

    true
}

fn unit_axis(axis: usize) -> Vec3 {
    match axis {
        0 => Vec3::unit_x(),
        1 => Vec3::unit_y(),
        _ => Vec3::unit_z(),
    }
}

fn triangle_normal_at(t: &TriangleData, detail: &HitDetail, vertices: &[Vertex]) -> Vec3 {
    let bary = match detail {
        HitDetail::Triangle { bary } => *bary,
        _ => [1.0, 0.0, 0.0],
    };
    let mut n = Vec3::zero();
    for i in 0..3 {
        n += vertices[t.v[i]].normal * bary[i];
    }
    n.normalized()
}

fn triangle_texcoord(t: &TriangleData, detail: &HitDetail, vertices: &[Vertex]) -> (f64, f64) {
    let bary = match detail {
        HitDetail::Triangle { bary } => *bary,
        _ => [1.0, 0.0, 0.0],
    };
    let mut u = 0.0;
    let mut v = 0.0;
    for i in 0..3 {
        u += bary[i] * vertices[t.v[i]].u;
        v += bary[i] * vertices[t.v[i]].v;
    }
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Assets;

    fn mat() -> MaterialHandle {
        Assets::new().materials.default_handle()
    }

    #[test]
    fn sphere_hit_from_outside_shrinks_dist() {
        let prim = Primitive::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, mat());
        let ray = Ray::new(Vec3::zero(), Vec3::unit_z());
        let mut dist = 100.0;
        let hit = prim.intersect(&ray, &mut dist, &[]);
        assert!(hit.is_some());
        assert!((dist - 4.0).abs() < 1e-9);
        assert_eq!(hit.unwrap().result, RTResult::Hit);
    }

    #[test]
    fn sphere_hit_from_inside_reports_in_prim() {
        let prim = Primitive::sphere(Vec3::zero(), 2.0, mat());
        let ray = Ray::new(Vec3::zero(), Vec3::unit_x());
        let mut dist = 100.0;
        let hit = prim.intersect(&ray, &mut dist, &[]).unwrap();
        assert_eq!(hit.result, RTResult::InPrim);
        assert!((dist - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sphere_miss_leaves_dist_untouched() {
        let prim = Primitive::sphere(Vec3::new(10.0, 10.0, 10.0), 1.0, mat());
        let ray = Ray::new(Vec3::zero(), Vec3::unit_z());
        let mut dist = 100.0;
        assert!(prim.intersect(&ray, &mut dist, &[]).is_none());
        assert_eq!(dist, 100.0);
    }

    #[test]
    fn plane_blocks_ray_heading_away() {
        let prim = Primitive::plane(Vec3::unit_y(), 0.0, mat());
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::unit_y());
        let mut dist = 100.0;
        assert!(prim.intersect(&ray, &mut dist, &[]).is_none());
    }

    #[test]
    fn plane_hit_computes_correct_distance() {
        let prim = Primitive::plane(Vec3::unit_y(), 0.0, mat());
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::unit_y());
        let mut dist = 100.0;
        assert!(prim.intersect(&ray, &mut dist, &[]).is_some());
        assert!((dist - 5.0).abs() < 1e-9);
    }

    #[test]
    fn box_hit_from_outside_reports_hit() {
        let prim = Primitive::aabb_box(Aabb::new(Vec3::ones() * -1.0, Vec3::ones()), mat());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::unit_z());
        let mut dist = 100.0;
        let hit = prim.intersect(&ray, &mut dist, &[]).unwrap();
        assert_eq!(hit.result, RTResult::Hit);
        assert!((dist - 4.0).abs() < 1e-9);
    }

    #[test]
    fn box_ray_from_inside_reports_in_prim() {
        let prim = Primitive::aabb_box(Aabb::new(Vec3::ones() * -1.0, Vec3::ones()), mat());
        let ray = Ray::new(Vec3::zero(), Vec3::unit_z());
        let mut dist = 100.0;
        let hit = prim.intersect(&ray, &mut dist, &[]).unwrap();
        assert_eq!(hit.result, RTResult::InPrim);
    }

    #[test]
    fn box_normal_picks_nearest_face() {
        let aabb = Aabb::new(Vec3::ones() * -1.0, Vec3::ones());
        let n = box_normal_at(&aabb, Vec3::new(1.0, 0.2, -0.3));
        assert_eq!(n, Vec3::new(1.0, 0.0, 0.0));
    }

    fn triangle_vertices() -> Vec<Vertex> {
        vec![
            Vertex::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::zero(), 0.0, 0.0),
            Vertex::new(Vec3::new(1.0, -1.0, 5.0), Vec3::zero(), 1.0, 0.0),
            Vertex::new(Vec3::new(0.0, 1.0, 5.0), Vec3::zero(), 0.5, 1.0),
        ]
    }

    #[test]
    fn triangle_hit_at_centroid() {
        let mut vertices = triangle_vertices();
        let prim = Primitive::triangle(0, 1, 2, &mut vertices, true, mat());
        let ray = Ray::new(Vec3::new(0.0, -1.0 / 3.0, 0.0), Vec3::unit_z());
        let mut dist = 100.0;
        let hit = prim.intersect(&ray, &mut dist, &vertices);
        assert!(hit.is_some());
        assert!((dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn triangle_miss_outside_edge() {
        let mut vertices = triangle_vertices();
        let prim = Primitive::triangle(0, 1, 2, &mut vertices, true, mat());
        let ray = Ray::new(Vec3::new(5.0, 5.0, 0.0), Vec3::unit_z());
        let mut dist = 100.0;
        assert!(prim.intersect(&ray, &mut dist, &vertices).is_none());
    }

    #[test]
    fn triangle_overlapping_its_own_aabb_passes_sat() {
        let mut vertices = triangle_vertices();
        let data = TriangleData::new(0, 1, 2, &mut vertices, true);
        let cell = Aabb::new(Vec3::new(-2.0, -2.0, 4.0), Vec3::new(2.0, 2.0, 6.0));
        assert!(triangle_intersects_box(&data, &cell, &vertices));
    }

    #[test]
    fn triangle_far_from_cell_fails_sat() {
        let mut vertices = triangle_vertices();
        let data = TriangleData::new(0, 1, 2, &mut vertices, true);
        let cell = Aabb::new(Vec3::new(50.0, 50.0, 50.0), Vec3::new(51.0, 51.0, 51.0));
        assert!(!triangle_intersects_box(&data, &cell, &vertices));
    }

    #[test]
    fn sqr_radius_accessor_returns_value() {
        let data = SphereData::new(Vec3::zero(), 3.0);
        assert_eq!(data.sqr_radius(), 9.0);
    }
}
