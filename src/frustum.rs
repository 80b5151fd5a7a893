//! Frustum geometry recovered from a projection matrix.
//!
//! [`reconstruct_frustum_corners`] inverse-projects the eight corners of the
//! NDC cube back into view space, giving the frustum wireframe.
//! [`FrustumPlanes`] extracts the six bounding planes from the matrix rows,
//! for tests done directly in view space.

use crate::error::FrustumError;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::outcode::Outcode;

/// Corners of the canonical clip cube in NDC.
///
/// x varies fastest, then y, then z: indices 0-3 lie on the near plane
/// (`z = -1`), indices 4-7 on the far plane (`z = +1`), and corner `i + 4` is
/// directly behind corner `i`.
pub const NDC_CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Edges of the frustum as index pairs into the corner array.
pub const FRUSTUM_EDGES: [(usize, usize); 12] = [
    // Near quad
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    // Far quad
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    // Near to far
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// The eight view-space corners of a frustum, in [`NDC_CUBE_CORNERS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCorners {
    corners: [Vec3; 8],
}

impl FrustumCorners {
    /// All eight corners.
    pub fn points(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Corners on the near plane, in quad order.
    pub fn near_quad(&self) -> [Vec3; 4] {
        let c = &self.corners;
        [c[0], c[1], c[3], c[2]]
    }

    /// Corners on the far plane, in quad order.
    pub fn far_quad(&self) -> [Vec3; 4] {
        let c = &self.corners;
        [c[4], c[5], c[7], c[6]]
    }

    /// The 12 wireframe segments as endpoint pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        FRUSTUM_EDGES
            .into_iter()
            .map(move |(a, b)| (self.corners[a], self.corners[b]))
    }

    /// Mean of the eight corners.
    pub fn centroid(&self) -> Vec3 {
        self.corners.iter().fold(Vec3::ZERO, |acc, &c| acc + c) / 8.0
    }

    /// Largest distance from the centroid to a corner.
    pub fn radius(&self) -> f32 {
        let center = self.centroid();
        self.corners
            .iter()
            .map(|&c| (c - center).magnitude())
            .fold(0.0, f32::max)
    }
}

/// Inverse-projects the NDC cube through `matrix` to recover its frustum.
///
/// The un-projection runs in `f64` and only the final corners are rounded, so
/// far/near ratios well beyond what `f32` depth can resolve still come back.
///
/// Fails with [`FrustumError::SingularMatrix`] when `matrix` has no inverse, or
/// when a cube corner maps to a point at infinity (the matrix is invertible but
/// is not a projection of a frustum).
pub fn reconstruct_frustum_corners(matrix: &Mat4) -> Result<FrustumCorners, FrustumError> {
    let inverse = matrix.inverse().ok_or_else(|| {
        log::warn!("cannot reconstruct frustum: matrix is singular: {matrix:?}");
        FrustumError::SingularMatrix
    })?;

    let mut corners = [Vec3::ZERO; 8];
    for (corner, ndc) in corners.iter_mut().zip(NDC_CUBE_CORNERS) {
        let [x, y, z, w] = inverse.transform([ndc.x as f64, ndc.y as f64, ndc.z as f64, 1.0]);
        let extent = x.abs().max(y.abs()).max(z.abs()).max(1.0);
        if w.abs() <= f64::EPSILON * extent {
            log::warn!("NDC corner {ndc:?} maps to infinity (w = {w})");
            return Err(FrustumError::SingularMatrix);
        }
        *corner = Vec3::new((x / w) as f32, (y / w) as f32, (z / w) as f32);
    }

    Ok(FrustumCorners { corners })
}

/// A plane `normal . p + distance = 0`. The normal points into the frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Builds a plane from homogeneous coefficients `(a, b, c, d)`, normalized
    /// so the normal has unit length.
    ///
    /// Returns `None` when `(a, b, c)` is zero or not finite; such coefficients
    /// describe no plane.
    pub fn from_coefficients(coefficients: Vec4) -> Option<Self> {
        let Vec4 { x, y, z, w } = coefficients;
        Self::from_f64([x as f64, y as f64, z as f64, w as f64])
    }

    fn from_f64([a, b, c, d]: [f64; 4]) -> Option<Self> {
        let length = (a * a + b * b + c * c).sqrt();
        if !length.is_finite() || length <= f64::MIN_POSITIVE || !d.is_finite() {
            return None;
        }
        Some(Self {
            normal: Vec3::new((a / length) as f32, (b / length) as f32, (c / length) as f32),
            distance: (d / length) as f32,
        })
    }

    /// Positive on the inside, negative outside, zero on the plane.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// The six bounding planes of a frustum, in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlanes {
    planes: [Plane; 6],
}

impl FrustumPlanes {
    /// Outcode bit of each plane, in storage order.
    pub const SIDES: [Outcode; 6] = [
        Outcode::LEFT,
        Outcode::RIGHT,
        Outcode::BOTTOM,
        Outcode::TOP,
        Outcode::NEAR,
        Outcode::FAR,
    ];

    /// Extracts the planes from a projection matrix.
    ///
    /// Each clip-space test `-w <= x` etc. is a linear form in the view-space
    /// point, `row3 + row0` for the left plane and so on. Returns `None` when
    /// one of those forms has no spatial part, which no frustum projection
    /// produces.
    pub fn from_matrix(matrix: &Mat4) -> Option<Self> {
        let w = matrix.row(3);
        let combine = |row: usize, sign: f64| {
            let r = matrix.row(row);
            Plane::from_f64([0, 1, 2, 3].map(|i| w[i] + sign * r[i]))
        };
        Some(Self {
            planes: [
                combine(0, 1.0)?,
                combine(0, -1.0)?,
                combine(1, 1.0)?,
                combine(1, -1.0)?,
                combine(2, 1.0)?,
                combine(2, -1.0)?,
            ],
        })
    }

    /// Planes ordered Left, Right, Bottom, Top, Near, Far.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Outcode bits of every plane `point` lies outside of.
    ///
    /// Never sets [`Outcode::BEHIND`]. For points in front of the camera this
    /// matches the plane bits of [`crate::outcode::classify`].
    pub fn violations(&self, point: Vec3) -> Outcode {
        self.planes
            .iter()
            .zip(Self::SIDES)
            .filter(|(plane, _)| plane.signed_distance(point) < 0.0)
            .fold(Outcode::empty(), |acc, (_, side)| acc | side)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.violations(point).is_empty()
    }
}
