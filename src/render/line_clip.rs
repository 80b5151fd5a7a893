//! Clip-space clipping of line segments against the homogeneous clip cube.
//!
//! Used by the diagnostic panels so that wireframe edges crossing the panel
//! camera's near plane or running far off-screen are cut before the perspective
//! divide. Each plane is the implicit linear inequality
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```

use crate::math::vec4::Vec4;
use crate::outcode::{classify, trivially_accepted, trivially_rejected};

/// The 6 planes of the canonical clip-space cube.
#[derive(Clone, Copy, Debug)]
enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Positive = inside the clip volume, Negative = outside.
    fn signed_distance(self, p: Vec4) -> f32 {
        match self {
            Self::Left => p.w + p.x,
            Self::Right => p.w - p.x,
            Self::Bottom => p.w + p.y,
            Self::Top => p.w - p.y,
            Self::Near => p.w + p.z,
            Self::Far => p.w - p.z,
        }
    }
}

fn lerp(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a + (b - a) * t
}

/// Cuts the segment `a`-`b` to the clip volume.
///
/// Returns `None` when nothing of the segment is visible. Both returned
/// endpoints have `w > 0` and can be divided safely.
pub fn clip_segment(a: Vec4, b: Vec4) -> Option<(Vec4, Vec4)> {
    let codes = [classify(a), classify(b)];
    if trivially_accepted(codes) {
        return Some((a, b));
    }
    if trivially_rejected(codes) {
        return None;
    }

    let (mut a, mut b) = (a, b);
    for plane in ClipPlane::ALL {
        let da = plane.signed_distance(a);
        let db = plane.signed_distance(b);
        match (da >= 0.0, db >= 0.0) {
            (true, true) => {}
            (false, false) => return None,
            (true, false) => b = lerp(a, b, da / (da - db)),
            (false, true) => a = lerp(a, b, da / (da - db)),
        }
    }

    (a.w > 0.0 && b.w > 0.0).then_some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inside_segment_is_untouched() {
        let a = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(0.5, -0.5, 0.2, 1.0);
        assert_eq!(clip_segment(a, b), Some((a, b)));
    }

    #[test]
    fn segment_outside_one_plane_is_rejected() {
        let a = Vec4::new(2.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(3.0, 0.5, 0.0, 1.0);
        assert_eq!(clip_segment(a, b), None);
    }

    #[test]
    fn crossing_segment_is_cut_at_the_plane() {
        let a = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let b = Vec4::new(3.0, 0.0, 0.0, 1.0);
        let (_, end) = clip_segment(a, b).unwrap();
        assert_relative_eq!(end, Vec4::new(1.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn segment_through_camera_plane_keeps_front_part() {
        let front = Vec4::new(0.0, 0.0, 0.0, 2.0);
        let behind = Vec4::new(0.0, 0.0, -6.0, -2.0);
        let (a, b) = clip_segment(front, behind).unwrap();
        assert_eq!(a, front);
        assert!(b.w > 0.0);
        assert_relative_eq!(b.z, -b.w, epsilon = 1e-5);
    }
}
