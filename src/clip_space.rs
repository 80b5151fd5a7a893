//! Forward transform from view space into homogeneous clip space.
//!
//! Clip coordinates are returned before the perspective divide. The visible
//! volume in clip space is:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w   (for [-1, 1] depth range, OpenGL-style)
//! ```
//!
//! `w` can be zero or negative for points on or behind the camera plane, so
//! classify with [`crate::outcode::classify`] before dividing.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Transforms a view-space point by `matrix` with an implicit `w = 1`.
#[inline]
pub fn to_clip_space(point: Vec3, matrix: &Mat4) -> Vec4 {
    *matrix * Vec4::from_vec3(point, 1.0)
}

/// Perspective divide: clip space to normalized device coordinates.
///
/// The caller must ensure `clip.w > 0`. Use [`try_to_ndc`] when that is not
/// already known.
#[inline]
pub fn to_ndc(clip: Vec4) -> Vec3 {
    debug_assert!(
        clip.w > 0.0,
        "perspective divide of a point on or behind the camera plane (w = {})",
        clip.w
    );
    Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
}

/// Perspective divide that refuses points with `w <= 0`.
#[inline]
pub fn try_to_ndc(clip: Vec4) -> Option<Vec3> {
    (clip.w > 0.0).then(|| to_ndc(clip))
}

/// True if every NDC component lies within `[-1, 1]`.
pub fn is_inside_ndc(ndc: Vec3) -> bool {
    ndc.max_abs() <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{build_perspective, ProjectionParams};
    use approx::assert_relative_eq;

    #[test]
    fn clip_space_keeps_w_unnormalized() {
        let m = build_perspective(&ProjectionParams::default()).unwrap();
        let clip = to_clip_space(Vec3::new(0.0, 0.0, -20.0), &m);
        // w equals the distance along the viewing direction.
        assert_relative_eq!(clip, Vec4::new(0.0, 0.0, 5.0, 20.0), epsilon = 1e-4);
    }

    #[test]
    fn identity_matrix_passes_points_through() {
        let p = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(to_clip_space(p, &Mat4::identity()), Vec4::point(1.5, -2.0, 3.25));
    }

    #[test]
    fn ndc_divides_by_w() {
        let ndc = to_ndc(Vec4::new(2.0, -4.0, 1.0, 4.0));
        assert_eq!(ndc, Vec3::new(0.5, -1.0, 0.25));
    }

    #[test]
    fn try_to_ndc_refuses_camera_plane_and_behind() {
        assert_eq!(try_to_ndc(Vec4::new(1.0, 1.0, 1.0, 0.0)), None);
        assert_eq!(try_to_ndc(Vec4::new(1.0, 1.0, 1.0, -3.0)), None);
        assert_eq!(
            try_to_ndc(Vec4::new(1.0, 1.0, 1.0, 2.0)),
            Some(Vec3::new(0.5, 0.5, 0.5))
        );
    }

    #[test]
    fn ndc_cube_membership_is_inclusive() {
        assert!(is_inside_ndc(Vec3::new(1.0, -1.0, 0.0)));
        assert!(!is_inside_ndc(Vec3::new(0.0, 0.0, 1.01)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn to_ndc_rejects_behind_camera_in_debug() {
        to_ndc(Vec4::new(0.0, 0.0, 0.0, -1.0));
    }
}
