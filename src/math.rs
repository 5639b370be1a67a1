use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

/// Epsilon used throughout intersection and containment tests, matching the
/// tolerance the reference engine uses for its `AABB::contains` / grazing-angle
/// guards.
pub const EPSILON: f64 = 1e-6;

/// A 3-component vector used for positions, directions, and colors.
///
/// Implements the arithmetic operator set the rest of the crate relies on
/// (add/sub/scale/negate/index), plus the geometric helpers (dot, cross,
/// reflect, refract) the shader needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub type Point3 = Vec3;
pub type Color = Vec3;

impl Vec3 {
    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn ones() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    #[inline(always)]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline(always)]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline(always)]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    pub fn normalized(self) -> Self {
        let len = self.length();
        debug_assert!(len > 1e-12, "attempted to normalize a zero-length vector");
        self / len
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline(always)]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Specular reflection of `self` about the surface normal `n`: I - 2·dot(I, N)·N
    #[inline(always)]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * 2.0 * self.dot(normal)
    }

    /// Hadamard (component-wise) product — used to modulate a color by a
    /// surface albedo or texel.
    #[inline(always)]
    pub fn hadamard(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    #[inline(always)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }

    #[inline(always)]
    pub fn saturate(self) -> Self {
        Self::new(
            self.x.clamp(0.0, 1.0),
            self.y.clamp(0.0, 1.0),
            self.z.clamp(0.0, 1.0),
        )
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline(always)]
    pub fn min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[inline(always)]
    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    /// Converts a [0,1] color to an 8-bit RGB triple for terminal/PPM output.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = (self * 255.0).saturate_u8();
        c
    }

    fn saturate_u8(self) -> (u8, u8, u8) {
        let clamp = |v: f64| v.clamp(0.0, 255.0) as u8;
        (clamp(self.x), clamp(self.y), clamp(self.z))
    }

    /// Random point on the unit disk via rejection sampling — used to jitter
    /// the reflection cone for glossy (diffuse) reflection.
    pub fn random_in_unit_disk(rng: &mut dyn rand::RngCore) -> Self {
        use rand::Rng;
        loop {
            let v = Self::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            if v.length_squared() < 1.0 {
                return v;
            }
        }
    }

    /// Component access by axis index, matching the `cell[]` union the
    /// reference engine indexes into during DDA stepping and SAT tests.
    #[inline(always)]
    pub fn get(self, axis: usize) -> f64 {
        self[axis]
    }

    /// True when every component of `self` is strictly less than `rhs`'s
    /// corresponding component — the reference engine's `operator<` between
    /// two `Vector3`s, used for box-epsilon and grid-bounds checks.
    #[inline(always)]
    pub fn all_lt(self, rhs: Self) -> bool {
        self.x < rhs.x && self.y < rhs.y && self.z < rhs.z
    }

    /// True when every component of `self` is strictly greater than `rhs`'s.
    #[inline(always)]
    pub fn all_gt(self, rhs: Self) -> bool {
        self.x > rhs.x && self.y > rhs.y && self.z > rhs.z
    }

    /// True when every component of `self` is strictly less than scalar `f`
    /// — the reference engine's `Vector3::operator<(Tp)` overload, used for
    /// the grid-bounds guard in `findNearest`.
    #[inline(always)]
    pub fn all_lt_scalar(self, f: f64) -> bool {
        self.x < f && self.y < f && self.z < f
    }

    /// True when every component of `self` is strictly greater than scalar `f`.
    #[inline(always)]
    pub fn all_gt_scalar(self, f: f64) -> bool {
        self.x > f && self.y > f && self.z > f
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: f64) -> Self {
        Self::new(self.x * t, self.y * t, self.z * t)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline(always)]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.hadamard(rhs)
    }
}

impl MulAssign<f64> for Vec3 {
    #[inline(always)]
    fn mul_assign(&mut self, t: f64) {
        self.x *= t;
        self.y *= t;
        self.z *= t;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    #[inline(always)]
    fn div(self, t: f64) -> Self {
        let inv = 1.0 / t;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl DivAssign<f64> for Vec3 {
    #[inline(always)]
    fn div_assign(&mut self, t: f64) {
        let inv = 1.0 / t;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

// ─── Ray ────────────────────────────────────────────────────────────────────

static RAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A parametric ray R(t) = origin + t·direction. Every ray constructed through
/// [`Ray::new`] receives a fresh monotonic `id`, which primitives use as a
/// self-hit guard: a primitive records the id of the last ray that hit it, so
/// a reflection/refraction/shadow ray spawned from its own surface doesn't
/// immediately re-intersect it due to floating point error.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub id: u64,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let id = RAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            origin,
            direction,
            id,
        }
    }

    #[inline(always)]
    pub fn at(self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

// ─── 4x4 matrix ─────────────────────────────────────────────────────────────

/// Row-major 4x4 matrix. Only the affine subset the camera basis needs
/// (rotation + translation, implicit `[0 0 0 1]` bottom row) is implemented —
/// there is no perspective divide or general inverse, matching the reference
/// engine's `Matrix_`.
#[derive(Debug, Clone, Copy)]
pub struct Matrix4 {
    pub cell: [f64; 16],
}

impl Matrix4 {
    pub fn identity() -> Self {
        let mut cell = [0.0; 16];
        cell[0] = 1.0;
        cell[5] = 1.0;
        cell[10] = 1.0;
        cell[15] = 1.0;
        Self { cell }
    }

    /// Transforms a point by the upper 3x4 block (rotation/translation only).
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let c = &self.cell;
        Vec3::new(
            c[0] * v.x + c[1] * v.y + c[2] * v.z + c[3],
            c[4] * v.x + c[5] * v.y + c[6] * v.z + c[7],
            c[8] * v.x + c[9] * v.y + c[10] * v.z + c[11],
        )
    }

    /// Matrix product `self * rhs`.
    pub fn concatenate(&self, rhs: &Matrix4) -> Matrix4 {
        let mut res = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                res[r * 4 + c] = self.cell[r * 4] * rhs.cell[c]
                    + self.cell[r * 4 + 1] * rhs.cell[c + 4]
                    + self.cell[r * 4 + 2] * rhs.cell[c + 8]
                    + self.cell[r * 4 + 3] * rhs.cell[c + 12];
            }
        }
        Matrix4 { cell: res }
    }
}

// ─── Plane ──────────────────────────────────────────────────────────────────

/// An implicit plane `{ p : normal·p + d = 0 }`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f64,
}

impl Plane {
    pub const fn new(normal: Vec3, d: f64) -> Self {
        Self { normal, d }
    }
}

// ─── Axis-Aligned Bounding Box ──────────────────────────────────────────────

/// An axis-aligned bounding box, used both as the per-primitive bound stored
/// for grid insertion and as the scene's overall `extends`.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn dim(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn centre(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict open-interval overlap test on all three axes — used for
    /// box-vs-box candidacy checks. Touching-but-not-overlapping boxes do
    /// not count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.min.x < other.max.x)
            && (other.min.x < self.max.x)
            && (self.min.y < other.max.y)
            && (other.min.y < self.max.y)
            && (self.min.z < other.max.z)
            && (other.min.z < self.max.z)
    }

    /// Epsilon-widened containment test, matching the reference engine's
    /// `AABB::contains` — used to decide whether a box-primitive hit started
    /// with the ray origin already inside the box.
    pub fn contains(&self, p: Vec3) -> bool {
        (p.x > self.min.x - EPSILON)
            && (p.x < self.max.x + EPSILON)
            && (p.y > self.min.y - EPSILON)
            && (p.y < self.max.y + EPSILON)
            && (p.z > self.min.z - EPSILON)
            && (p.z < self.max.z + EPSILON)
    }

    /// Slab-method ray/AABB intersection, used to advance a camera ray that
    /// starts outside the scene's grid bounds up to the bounding box surface.
    pub fn hit(&self, ray: &Ray, mut t_min: f64, mut t_max: f64) -> bool {
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }

    /// Same slab test, but also returns the near distance — used by
    /// `Engine::render_ray` to advance a camera ray outside the scene's
    /// extends up to the boundary before handing it to `find_nearest`.
    pub fn hit_distance(&self, ray: &Ray, mut t_min: f64, mut t_max: f64) -> Option<f64> {
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max <= t_min {
                return None;
            }
        }
        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_unit_length() {
        let v = Vec3::new(3.0, 4.0, 0.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cross_is_orthogonal_to_both_inputs() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let n = a.cross(b);
        assert!(n.dot(a).abs() < 1e-12);
        assert!(n.dot(b).abs() < 1e-12);
    }

    #[test]
    fn identity_matrix_leaves_points_unchanged() {
        let m = Matrix4::identity();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let t = m.transform_point(p);
        assert!((t - p).length() < 1e-12);
    }

    #[test]
    fn concatenation_matches_sequential_transform() {
        let mut a = Matrix4::identity();
        a.cell[3] = 5.0; // translate x by 5
        let mut b = Matrix4::identity();
        b.cell[7] = 2.0; // translate y by 2
        let combined = a.concatenate(&b);
        let p = Vec3::zero();
        let direct = a.transform_point(b.transform_point(p));
        let via_concat = combined.transform_point(p);
        assert!((direct - via_concat).length() < 1e-9);
    }

    #[test]
    fn aabb_contains_respects_epsilon_widening() {
        let bx = Aabb::new(Vec3::zero(), Vec3::ones());
        assert!(bx.contains(Vec3::new(1.0 + EPSILON * 0.5, 0.5, 0.5)));
        assert!(!bx.contains(Vec3::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn aabb_intersects_is_strict_overlap() {
        let a = Aabb::new(Vec3::zero(), Vec3::ones());
        let touching = Aabb::new(Vec3::ones(), Vec3::ones() * 2.0);
        assert!(!a.intersects(&touching));
        let overlapping = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::ones() * 2.0);
        assert!(a.intersects(&overlapping));
    }
}
