//! Eye-and-screen-rectangle camera, ported from `CCamera`.
//!
//! Deliberately not the teacher's thin-lens depth-of-field model: this
//! engine's camera is a pinhole with an explicit near-plane frustum rather
//! than a lens with an aperture, matching the reference `CCamera`'s
//! `lookAt`/`frustum`/`getScreenPos` triple. Screen corners are transformed
//! into world space lazily, on the first `screen_at` call after `look_at`
//! or `frustum` last changed them, exactly like `CCamera::getScreenPos`'s
//! `mNeedUpdate` flag — it avoids recomputing the basis on every one of the
//! millions of per-pixel calls when only the corners actually changed once.

use crate::math::{Matrix4, Vec3};

pub struct Camera {
    inv_view: Matrix4,
    eye: Vec3,

    p1: Vec3,
    p2: Vec3,
    p4: Vec3,

    world_p1: Vec3,
    dx: Vec3,
    dy: Vec3,
    needs_update: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            inv_view: Matrix4::identity(),
            eye: Vec3::new(0.0, 0.0, 1.0),
            p1: Vec3::zero(),
            p2: Vec3::zero(),
            p4: Vec3::zero(),
            world_p1: Vec3::zero(),
            dx: Vec3::zero(),
            dy: Vec3::zero(),
            needs_update: true,
        }
    }

    pub fn pos(&self) -> Vec3 {
        self.eye
    }

    /// Convenience constructor combining `look_at` and `frustum`, deriving the
    /// near-plane half-extents from a vertical field of view the way
    /// `Engine::initEngine` derives its frustum from the aspect ratio
    /// (`frustum(-ratio, ratio, -1, 1, 1)`), generalized to an arbitrary fov
    /// instead of a fixed half-height of 1.
    pub fn from_look_at_fov(eye: Vec3, target: Vec3, up: Vec3, fov_degrees: f64, aspect: f64) -> Self {
        let mut cam = Self::new();
        cam.look_at(eye, target, up);
        let z_near = 1.0;
        let half_h = (fov_degrees.to_radians() * 0.5).tan() * z_near;
        let half_w = half_h * aspect;
        cam.frustum(-half_w, half_w, -half_h, half_h, z_near);
        cam
    }

    /// Builds the camera-to-world basis. If `up` is nearly parallel to the
    /// view direction (`|up·forward| > 0.99`), falls back to `UNIT_Z` to
    /// avoid a degenerate cross product — the same substitution
    /// `CCamera::lookAt` performs.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;

        let forward = (target - eye).normalized();
        let mut up_dir = up.normalized();
        if up_dir.dot(forward) > 0.99 {
            up_dir = Vec3::unit_z();
        }
        let x_axis = up_dir.cross(forward);
        let y_axis = forward.cross(x_axis);

        let mut cell = [0.0; 16];
        cell[0] = x_axis.x;
        cell[4] = x_axis.y;
        cell[8] = x_axis.z;
        cell[1] = y_axis.x;
        cell[5] = y_axis.y;
        cell[9] = y_axis.z;
        cell[2] = forward.x;
        cell[6] = forward.y;
        cell[10] = forward.z;
        cell[3] = eye.x;
        cell[7] = eye.y;
        cell[11] = eye.z;
        cell[15] = 1.0;
        self.inv_view = Matrix4 { cell };

        self.needs_update = true;
    }

    /// Sets the near-plane frustum corners in camera space.
    pub fn frustum(&mut self, left: f64, right: f64, bottom: f64, top: f64, z_near: f64) {
        self.p1 = Vec3::new(left, top, z_near);
        self.p2 = Vec3::new(right, top, z_near);
        self.p4 = Vec3::new(left, bottom, z_near);
        self.needs_update = true;
    }

    /// World-space point on the screen rectangle at relative coordinates
    /// `(x, y)` in `[0, 1]`. Lazily transforms the frustum corners into
    /// world space on first use after `look_at`/`frustum` changed them.
    pub fn screen_at(&mut self, x: f64, y: f64) -> Vec3 {
        if self.needs_update {
            self.world_p1 = self.inv_view.transform_point(self.p1);
            let world_p2 = self.inv_view.transform_point(self.p2);
            let world_p4 = self.inv_view.transform_point(self.p4);
            self.dx = world_p2 - self.world_p1;
            self.dy = world_p4 - self.world_p1;
            self.needs_update = false;
        }
        self.world_p1 + self.dx * x + self.dy * y
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_centre_lies_along_view_direction() {
        let mut cam = Camera::new();
        cam.look_at(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0), Vec3::unit_y());
        cam.frustum(-1.0, 1.0, -1.0, 1.0, 1.0);
        let centre = cam.screen_at(0.5, 0.5);
        assert!(centre.x.abs() < 1e-9);
        assert!(centre.y.abs() < 1e-9);
        assert!((centre.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_up_vector_falls_back_to_unit_z() {
        let mut cam = Camera::new();
        cam.look_at(Vec3::zero(), Vec3::unit_y(), Vec3::unit_y());
        cam.frustum(-1.0, 1.0, -1.0, 1.0, 1.0);
        let p = cam.screen_at(0.5, 0.5);
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    }

    #[test]
    fn lazy_update_reflects_latest_frustum() {
        let mut cam = Camera::new();
        cam.look_at(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0), Vec3::unit_y());
        cam.frustum(-1.0, 1.0, -1.0, 1.0, 1.0);
        let _ = cam.screen_at(0.0, 0.0); // force the lazy update
        cam.frustum(-2.0, 2.0, -2.0, 2.0, 1.0);
        let corner = cam.screen_at(0.0, 0.0);
        assert!((corner.x - (-2.0)).abs() < 1e-9);
    }
}
