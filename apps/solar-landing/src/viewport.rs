/// Viewport-driven sizing: one scale factor for the whole system plus the
/// camera bounds, initial camera position, star count and label sizes that
/// follow from it. Pure; recomputed on every resize.

use glam::Vec3;

/// Viewport short side that maps to scale 1.0.
pub const REFERENCE_SIZE: f32 = 800.0;
pub const MIN_SCALE: f32 = 0.4;
pub const MAX_SCALE: f32 = 2.0;

pub const MOBILE_MAX_WIDTH: f32 = 640.0;
pub const TABLET_MAX_WIDTH: f32 = 1024.0;

pub const CAMERA_MOBILE: Vec3 = Vec3::new(0.0, 12.0, 20.0);
pub const CAMERA_TABLET: Vec3 = Vec3::new(0.0, 14.0, 22.0);
pub const CAMERA_DESKTOP: Vec3 = Vec3::new(0.0, 15.0, 25.0);

pub const MAX_STARS: usize = 5000;
const STARS_PER_PX: f32 = 5.0;

/// Label glyph heights in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSizes {
    pub name: f32,
    pub nickname: f32,
    pub sun: f32,
}

impl LabelSizes {
    pub fn for_width(width: f32) -> Self {
        Self {
            name: (width / 50.0).clamp(0.1, 0.3),
            nickname: (width / 60.0).clamp(0.08, 0.25),
            sun: (width / 40.0).clamp(0.15, 0.4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportScale {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub camera_position: Vec3,
    pub star_count: usize,
    pub labels: LabelSizes,
}

impl ViewportScale {
    /// Scale for a viewport of `width` × `height` CSS pixels.
    /// Non-finite or sub-pixel sizes fall back to the nominal desktop setup.
    pub fn from_size(width: f32, height: f32) -> Self {
        if !(width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0) {
            log::debug!("degenerate viewport {width}x{height}, using fallback");
            return Self::fallback();
        }
        let scale_factor = (width.min(height) / REFERENCE_SIZE).clamp(MIN_SCALE, MAX_SCALE);
        Self {
            width,
            height,
            scale_factor,
            min_distance: (6.0 * scale_factor).max(3.0),
            max_distance: (60.0 * scale_factor).max(30.0),
            camera_position: camera_position_for_width(width),
            star_count: ((width * STARS_PER_PX) as usize).min(MAX_STARS),
            labels: LabelSizes::for_width(width),
        }
    }

    pub fn fallback() -> Self {
        Self {
            width: REFERENCE_SIZE,
            height: REFERENCE_SIZE,
            scale_factor: 1.0,
            min_distance: 6.0,
            max_distance: 60.0,
            camera_position: CAMERA_DESKTOP,
            star_count: MAX_STARS,
            labels: LabelSizes::for_width(REFERENCE_SIZE),
        }
    }
}

/// Initial camera position by width breakpoint.
pub fn camera_position_for_width(width: f32) -> Vec3 {
    if width < MOBILE_MAX_WIDTH {
        CAMERA_MOBILE
    } else if width < TABLET_MAX_WIDTH {
        CAMERA_TABLET
    } else {
        CAMERA_DESKTOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_portrait() {
        let v = ViewportScale::from_size(375.0, 667.0);
        assert!((v.scale_factor - 0.46875).abs() < 1e-6);
        assert_eq!(v.min_distance, 3.0);
        assert_eq!(v.max_distance, 30.0);
        assert_eq!(v.camera_position, Vec3::new(0.0, 12.0, 20.0));
        assert_eq!(v.star_count, 1875);
    }

    #[test]
    fn tablet_is_nominal_scale() {
        let v = ViewportScale::from_size(800.0, 800.0);
        assert_eq!(v.scale_factor, 1.0);
        assert_eq!(v.min_distance, 6.0);
        assert_eq!(v.max_distance, 60.0);
        assert_eq!(v.camera_position, Vec3::new(0.0, 14.0, 22.0));
    }

    #[test]
    fn desktop_breakpoint() {
        let v = ViewportScale::from_size(1200.0, 900.0);
        assert_eq!(v.camera_position, Vec3::new(0.0, 15.0, 25.0));
        assert_eq!(v.star_count, MAX_STARS);
    }

    #[test]
    fn huge_viewport_is_capped() {
        let v = ViewportScale::from_size(4000.0, 3000.0);
        assert_eq!(v.scale_factor, MAX_SCALE);
        assert_eq!(v.min_distance, 12.0);
        assert_eq!(v.max_distance, 120.0);
    }

    #[test]
    fn bounds_hold_across_sizes() {
        let mut w = 1.0;
        while w < 5000.0 {
            for h in [1.0, 240.0, 800.0, 2160.0] {
                let v = ViewportScale::from_size(w, h);
                assert!((MIN_SCALE..=MAX_SCALE).contains(&v.scale_factor));
                assert!(v.min_distance < v.max_distance);
                assert!(v.star_count <= MAX_STARS);
            }
            w *= 1.7;
        }
    }

    #[test]
    fn degenerate_sizes_fall_back() {
        for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f32::NAN, 600.0), (f32::INFINITY, 1.0)] {
            let v = ViewportScale::from_size(w, h);
            assert_eq!(v, ViewportScale::fallback());
            assert_eq!(v.scale_factor, 1.0);
            assert_eq!(v.star_count, 5000);
        }
    }

    #[test]
    fn label_sizes_clamp() {
        let small = LabelSizes::for_width(3.0);
        assert_eq!(small.name, 0.1);
        assert_eq!(small.nickname, 0.08);
        assert_eq!(small.sun, 0.15);
        let wide = LabelSizes::for_width(1920.0);
        assert_eq!(wide.name, 0.3);
        assert_eq!(wide.nickname, 0.25);
        assert_eq!(wide.sun, 0.4);
    }
}
