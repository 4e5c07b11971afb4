use glam::{Mat4, Vec2, Vec3};

/// User-facing orbit control settings.
///
/// Mirrors the usual "orbit controls" contract: drag to rotate around the
/// target, wheel to dolly, secondary drag to pan, optional damping.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// `Some(factor)` enables damping: each update applies `factor` of the
    /// pending motion and keeps the rest for later frames.
    pub damping: Option<f32>,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    /// Radians per frame when `auto_rotate` is set.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            damping: None,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            auto_rotate: false,
            auto_rotate_speed: 2.0 * std::f32::consts::PI / 60.0 / 60.0 * 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

/// Projection result from world space to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in CSS pixels, origin top-left, Y down.
    pub pos: Vec2,
    /// Distance along the view direction (larger = farther away).
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera orbiting a target point.
///
/// Position is kept in spherical form around `target`: `azimuth` is measured
/// from +Z toward +X, `elevation` from the XZ plane toward +Y.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub target: Vec3,
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub controls: OrbitControls,
    pub screen_width: f32,
    pub screen_height: f32,
    pending_azimuth: f32,
    pending_elevation: f32,
    pending_pan: Vec3,
    pending_dolly: f32,
}

impl OrbitCamera {
    /// Elevation stays short of the poles so the view basis never degenerates.
    pub const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;
    /// Remaining motion below this is dropped when damping.
    const REST_EPSILON: f32 = 1e-5;

    /// Camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, fov_y_degrees: f32) -> Self {
        let mut cam = Self {
            fov_y: fov_y_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            target,
            azimuth: 0.0,
            elevation: 0.0,
            distance: 1.0,
            controls: OrbitControls::default(),
            screen_width: 800.0,
            screen_height: 600.0,
            pending_azimuth: 0.0,
            pending_elevation: 0.0,
            pending_pan: Vec3::ZERO,
            pending_dolly: 1.0,
        };
        cam.set_position(position);
        cam
    }

    /// Re-derive the spherical coordinates from a world position.
    pub fn set_position(&mut self, position: Vec3) {
        let rel = position - self.target;
        let distance = rel.length();
        if distance < 1e-6 || !distance.is_finite() {
            return;
        }
        self.distance = distance;
        self.azimuth = rel.x.atan2(rel.z);
        self.elevation = (rel.y / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0 {
            self.screen_width = width;
            self.screen_height = height;
        }
    }

    /// Update distance bounds and pull the current distance inside them.
    pub fn set_distance_bounds(&mut self, min: f32, max: f32) {
        self.controls.min_distance = min.min(max);
        self.controls.max_distance = max.max(min);
        self.distance = self
            .distance
            .clamp(self.controls.min_distance, self.controls.max_distance);
    }

    // -- User input (queued, applied in `update`) --

    /// Rotate by a pointer drag of `dx`, `dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.controls.enable_rotate {
            return;
        }
        let per_px = std::f32::consts::TAU / self.screen_height * self.controls.rotate_speed;
        self.pending_azimuth -= dx * per_px;
        self.pending_elevation += dy * per_px;
    }

    /// Dolly by a wheel delta (positive = away from the target).
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !self.controls.enable_zoom || wheel_delta == 0.0 || !wheel_delta.is_finite() {
            return;
        }
        let step = 0.95_f32.powf(self.controls.zoom_speed);
        if wheel_delta > 0.0 {
            self.pending_dolly /= step;
        } else {
            self.pending_dolly *= step;
        }
    }

    /// Pan by a pointer drag of `dx`, `dy` pixels. The point under the
    /// cursor stays under the cursor at the target's depth.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.controls.enable_pan {
            return;
        }
        let world_per_px = 2.0 * self.distance * (self.fov_y / 2.0).tan() / self.screen_height;
        let (right, up, _) = self.basis();
        self.pending_pan += (-right * dx + up * dy) * world_per_px * self.controls.pan_speed;
    }

    /// Apply queued motion. Call once per tick.
    pub fn update(&mut self) {
        if self.controls.auto_rotate {
            self.pending_azimuth -= self.controls.auto_rotate_speed;
        }

        let factor = self.controls.damping.map_or(1.0, |f| f.clamp(0.0, 1.0));

        self.azimuth += self.pending_azimuth * factor;
        self.elevation = (self.elevation + self.pending_elevation * factor)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.target += self.pending_pan * factor;

        self.distance = (self.distance * self.pending_dolly)
            .clamp(self.controls.min_distance, self.controls.max_distance);
        self.pending_dolly = 1.0;

        if self.controls.damping.is_some() {
            let keep = 1.0 - factor;
            self.pending_azimuth *= keep;
            self.pending_elevation *= keep;
            self.pending_pan *= keep;
            if self.pending_azimuth.abs() < Self::REST_EPSILON {
                self.pending_azimuth = 0.0;
            }
            if self.pending_elevation.abs() < Self::REST_EPSILON {
                self.pending_elevation = 0.0;
            }
            if self.pending_pan.length_squared() < Self::REST_EPSILON * Self::REST_EPSILON {
                self.pending_pan = Vec3::ZERO;
            }
        } else {
            self.pending_azimuth = 0.0;
            self.pending_elevation = 0.0;
            self.pending_pan = Vec3::ZERO;
        }
    }

    // -- Projection --

    /// Camera right, up, forward unit vectors.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up, forward)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Focal length in pixels for the current viewport height.
    fn focal_px(&self) -> f32 {
        (self.screen_height / 2.0) / (self.fov_y / 2.0).tan()
    }

    /// Project a world point to screen pixels.
    /// Returns `None` for points behind the near plane or beyond the far plane.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let scale = self.focal_px() / depth;
        Some(Projection {
            pos: Vec2::new(
                self.screen_width / 2.0 + view.x * scale,
                self.screen_height / 2.0 - view.y * scale,
            ),
            depth,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        let mut cam = OrbitCamera::looking_at(Vec3::new(0.0, 15.0, 25.0), Vec3::ZERO, 60.0);
        cam.set_screen_size(800.0, 600.0);
        cam
    }

    #[test]
    fn looking_at_roundtrips_position() {
        let cam = camera();
        let p = cam.position();
        assert!((p - Vec3::new(0.0, 15.0, 25.0)).length() < 1e-4, "{p:?}");
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let proj = cam.project(Vec3::ZERO).unwrap();
        assert!((proj.pos.x - 400.0).abs() < 1e-3);
        assert!((proj.pos.y - 300.0).abs() < 1e-3);
        assert!((proj.depth - cam.distance).abs() < 1e-3);
    }

    #[test]
    fn nearer_points_have_larger_scale() {
        let cam = camera();
        let near = cam.project(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        let far = cam.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert!(near.scale > far.scale);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let cam = camera();
        assert!(cam.project(Vec3::new(0.0, 30.0, 50.0)).is_none());
    }

    #[test]
    fn zoom_respects_distance_bounds() {
        let mut cam = camera();
        cam.set_distance_bounds(3.0, 30.0);
        for _ in 0..200 {
            cam.zoom(-1.0);
            cam.update();
        }
        assert!((cam.distance - 3.0).abs() < 1e-4);
        for _ in 0..200 {
            cam.zoom(1.0);
            cam.update();
        }
        assert!((cam.distance - 30.0).abs() < 1e-4);
    }

    #[test]
    fn bounds_clamp_current_distance() {
        let mut cam = camera();
        cam.set_distance_bounds(3.0, 10.0);
        assert_eq!(cam.distance, 10.0);
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut cam = camera();
        cam.controls.damping = Some(0.05);
        let start = cam.azimuth;
        cam.rotate(100.0, 0.0);
        cam.update();
        let first = (cam.azimuth - start).abs();
        let total = std::f32::consts::TAU / 600.0 * 100.0;
        assert!(first > 0.0 && first < total * 0.1);
        assert!(cam.pending_azimuth != 0.0);
        for _ in 0..2000 {
            cam.update();
        }
        assert!(((cam.azimuth - start).abs() - total).abs() < 1e-3);
        assert_eq!(cam.pending_azimuth, 0.0);
    }

    #[test]
    fn elevation_is_clamped() {
        let mut cam = camera();
        cam.rotate(0.0, 100_000.0);
        cam.update();
        assert!(cam.elevation <= OrbitCamera::MAX_ELEVATION);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut cam = camera();
        cam.controls.enable_rotate = false;
        cam.controls.enable_zoom = false;
        cam.controls.enable_pan = false;
        let before = (cam.azimuth, cam.distance, cam.target);
        cam.rotate(50.0, 50.0);
        cam.zoom(1.0);
        cam.pan(10.0, 10.0);
        cam.update();
        assert_eq!((cam.azimuth, cam.distance, cam.target), before);
    }

    #[test]
    fn pan_moves_target() {
        let mut cam = camera();
        cam.pan(100.0, 0.0);
        cam.update();
        assert!(cam.target.x < 0.0);
        assert!(cam.target.y.abs() < 1e-4);
    }
}
