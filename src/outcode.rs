//! Frustum membership outcodes.
//!
//! Each point gets a 7-bit mask, one bit per half-space test against the clip
//! volume plus one for the camera plane. The tests run on un-normalized clip
//! coordinates, so no division happens and the result is defined for every
//! finite input, including `w = 0`.
//!
//! This is the homogeneous 3D form of the 2D line-clipping region code: a batch
//! of points is trivially visible when every code is empty, and trivially
//! invisible when the codes share a set bit.

use std::fmt;

use bitflags::bitflags;

use crate::clip_space::to_clip_space;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

bitflags! {
    /// Set of violated frustum tests. Bits are independent; several can be set
    /// at once (a point can be both left of and above the frustum).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Outcode: u8 {
        /// x < -w
        const LEFT = 1 << 0;
        /// x > w
        const RIGHT = 1 << 1;
        /// y < -w
        const BOTTOM = 1 << 2;
        /// y > w
        const TOP = 1 << 3;
        /// z < -w, nearer than the near plane
        const NEAR = 1 << 4;
        /// z > w, beyond the far plane
        const FAR = 1 << 5;
        /// w <= 0, on or behind the camera plane
        const BEHIND = 1 << 6;
    }
}

impl Outcode {
    /// The six plane bits, without [`Outcode::BEHIND`].
    pub const PLANES: Self = Self::LEFT
        .union(Self::RIGHT)
        .union(Self::BOTTOM)
        .union(Self::TOP)
        .union(Self::NEAR)
        .union(Self::FAR);

    /// True when the point passed every test.
    #[inline]
    pub fn is_inside(self) -> bool {
        self.is_empty()
    }

    #[inline]
    pub fn is_behind(self) -> bool {
        self.contains(Self::BEHIND)
    }
}

impl fmt::Display for Outcode {
    /// Zero-padded binary, most significant (BEHIND) bit first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.bits())
    }
}

/// Computes the outcode of a clip-space point.
pub fn classify(clip: Vec4) -> Outcode {
    let Vec4 { x, y, z, w } = clip;
    let mut code = Outcode::empty();
    code.set(Outcode::LEFT, x < -w);
    code.set(Outcode::RIGHT, x > w);
    code.set(Outcode::BOTTOM, y < -w);
    code.set(Outcode::TOP, y > w);
    code.set(Outcode::NEAR, z < -w);
    code.set(Outcode::FAR, z > w);
    code.set(Outcode::BEHIND, w <= 0.0);
    code
}

/// Transforms a view-space point and classifies it.
#[inline]
pub fn classify_point(point: Vec3, matrix: &Mat4) -> Outcode {
    classify(to_clip_space(point, matrix))
}

/// True when every code in the batch is empty (all points visible).
pub fn trivially_accepted(codes: impl IntoIterator<Item = Outcode>) -> bool {
    codes.into_iter().all(Outcode::is_inside)
}

/// True when the batch is non-empty and all codes share a violated test, so
/// every point lies outside the same half-space.
pub fn trivially_rejected(codes: impl IntoIterator<Item = Outcode>) -> bool {
    codes
        .into_iter()
        .fold(None, |shared: Option<Outcode>, code| {
            Some(shared.map_or(code, |s| s & code))
        })
        .is_some_and(|shared| !shared.is_empty())
}
