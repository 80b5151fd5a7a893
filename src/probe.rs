//! A classification session: one camera, many query points.
//!
//! [`FrustumProbe`] owns the projection parameters together with everything
//! derived from them (matrix, corners, planes). Changing the parameters
//! rebuilds all of it before swapping it in, so a probe never holds a matrix
//! from one parameter set next to corners from another.

use std::fmt;

use crate::clip_space::{to_clip_space, try_to_ndc};
use crate::error::FrustumError;
use crate::frustum::{reconstruct_frustum_corners, FrustumCorners, FrustumPlanes};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::outcode::{classify, Outcode};
use crate::projection::{build_perspective, ProjectionParams};

/// Everything derived from one parameter set.
#[derive(Debug, Clone, Copy)]
struct Derived {
    projection: Mat4,
    corners: FrustumCorners,
    planes: FrustumPlanes,
}

impl Derived {
    fn build(params: &ProjectionParams) -> Result<Self, FrustumError> {
        let projection = build_perspective(params)?;
        let corners = reconstruct_frustum_corners(&projection)?;
        let planes = FrustumPlanes::from_matrix(&projection).ok_or(FrustumError::SingularMatrix)?;
        Ok(Self {
            projection,
            corners,
            planes,
        })
    }
}

/// A perspective camera ready to classify points.
#[derive(Debug, Clone, Copy)]
pub struct FrustumProbe {
    params: ProjectionParams,
    derived: Derived,
}

impl FrustumProbe {
    pub fn new(params: ProjectionParams) -> Result<Self, FrustumError> {
        Ok(Self {
            params,
            derived: Derived::build(&params)?,
        })
    }

    /// Replaces the camera parameters.
    ///
    /// On error the probe keeps its previous parameters and matrix.
    pub fn set_params(&mut self, params: ProjectionParams) -> Result<(), FrustumError> {
        let derived = Derived::build(&params)?;
        log::debug!("probe parameters changed: {:?} -> {:?}", self.params, params);
        self.params = params;
        self.derived = derived;
        Ok(())
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    pub fn projection(&self) -> &Mat4 {
        &self.derived.projection
    }

    pub fn corners(&self) -> &FrustumCorners {
        &self.derived.corners
    }

    pub fn planes(&self) -> &FrustumPlanes {
        &self.derived.planes
    }

    /// Classifies a view-space point.
    pub fn probe(&self, point: Vec3) -> PointReport {
        let clip = to_clip_space(point, &self.derived.projection);
        PointReport {
            point,
            clip,
            outcode: classify(clip),
            ndc: try_to_ndc(clip),
        }
    }
}

/// Result of classifying a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointReport {
    /// The query point, in view space.
    pub point: Vec3,
    /// Clip coordinates before the perspective divide.
    pub clip: Vec4,
    pub outcode: Outcode,
    /// Normalized device coordinates; `None` when `clip.w <= 0`.
    pub ndc: Option<Vec3>,
}

impl PointReport {
    pub fn is_visible(&self) -> bool {
        self.outcode.is_inside()
    }
}

impl fmt::Display for PointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Vec4 { x, y, z, w } = self.clip;
        writeln!(f, "Position CS: ({x:.3}, {y:.3}, {z:.3}, {w:.3})")?;
        write!(f, "Cull Bits: {}", self.outcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn probe_reports_visible_point() {
        let probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let report = probe.probe(Vec3::new(0.0, 0.0, -20.0));
        assert!(report.is_visible());
        let ndc = report.ndc.expect("point in front of the camera has NDC");
        assert_relative_eq!(ndc, Vec3::new(0.0, 0.0, 0.25), epsilon = 1e-5);
    }

    #[test]
    fn probe_reports_behind_camera_without_ndc() {
        let probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let report = probe.probe(Vec3::new(0.0, 0.0, 5.0));
        assert!(report.outcode.is_behind());
        assert_eq!(report.ndc, None);
        assert!(!report.is_visible());
    }

    #[test]
    fn invalid_params_leave_probe_untouched() {
        let mut probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let before = *probe.projection();

        let bad = ProjectionParams {
            z_far: 1.0,
            ..ProjectionParams::default()
        };
        assert!(probe.set_params(bad).is_err());
        assert_eq!(*probe.projection(), before);
        assert_eq!(*probe.params(), ProjectionParams::default());
    }

    #[test]
    fn set_params_rebuilds_matrix_and_corners() {
        let mut probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let point = Vec3::new(0.0, 0.0, -70.0);
        assert!(probe.probe(point).outcode.contains(Outcode::FAR));

        let deeper = ProjectionParams {
            z_far: 100.0,
            ..ProjectionParams::default()
        };
        probe.set_params(deeper).unwrap();
        assert!(probe.probe(point).is_visible());
        assert_relative_eq!(probe.corners().far_quad()[0].z, -100.0, epsilon = 1e-2);
        assert!(probe.planes().contains(point));
    }

    #[test]
    fn deep_frustum_with_tiny_near_plane_is_usable() {
        let params = ProjectionParams::from_degrees(60.0, 1280.0, 720.0, 0.001, 100000.0);
        let probe = FrustumProbe::new(params).unwrap();
        assert_relative_eq!(probe.corners().far_quad()[0].z, -100000.0, max_relative = 1e-5);

        assert!(probe.probe(Vec3::new(0.0, 0.0, -5000.0)).is_visible());
        assert!(probe.probe(Vec3::new(0.0, 0.0, -0.0005)).outcode.contains(Outcode::NEAR));
        // Clip-space depth cannot resolve the far plane at this ratio; the planes can.
        let beyond = Vec3::new(0.0, 0.0, -200000.0);
        assert_eq!(probe.planes().violations(beyond), Outcode::FAR);
    }

    #[test]
    fn display_matches_position_and_bits() {
        let probe = FrustumProbe::new(ProjectionParams::default()).unwrap();
        let text = probe.probe(Vec3::new(0.0, 0.0, -20.0)).to_string();
        assert_eq!(text, "Position CS: (0.000, 0.000, 5.000, 20.000)\nCull Bits: 0000000");
    }

    #[test]
    fn probe_is_shareable_across_threads() {
        let probe = Arc::new(FrustumProbe::new(ProjectionParams::default()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let probe = Arc::clone(&probe);
                std::thread::spawn(move || {
                    probe
                        .probe(Vec3::new(i as f32 * 400.0, 0.0, -20.0))
                        .outcode
                })
            })
            .collect();
        let codes: Vec<Outcode> = handles
            .into_iter()
            .map(|h| h.join().expect("classification thread panicked"))
            .collect();
        assert_eq!(codes[0], Outcode::empty());
        assert!(codes[1..].iter().all(|c| *c == Outcode::RIGHT));
    }
}
