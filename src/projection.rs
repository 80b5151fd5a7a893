//! Projection parameters and matrix construction.
//!
//! [`ProjectionParams`] fully determines a perspective projection; there is no
//! hidden state. [`build_perspective`] validates the parameters and produces the
//! matrix, or fails without producing anything.
//!
//! View space is right-handed with the camera looking down -Z. After the
//! perspective divide the visible volume is the cube `[-1, 1]^3`, with NDC
//! `z = -1` on the near plane and `z = +1` on the far plane.

use std::f32::consts::PI;

use crate::error::FrustumError;
use crate::math::mat4::Mat4;

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view in radians, `0 < fov_y < pi`.
    pub fov_y: f32,
    /// Viewport width in pixels (or any unit shared with the height).
    pub viewport_width: f32,
    /// Viewport height, same unit as the width.
    pub viewport_height: f32,
    /// Near clipping plane distance (must be > 0).
    pub z_near: f32,
    /// Far clipping plane distance (must be > z_near).
    pub z_far: f32,
}

impl Default for ProjectionParams {
    /// 60 degree vertical FOV on a 1280x720 viewport, depth range 10 to 50.
    fn default() -> Self {
        Self::from_degrees(60.0, 1280.0, 720.0, 10.0, 50.0)
    }
}

impl ProjectionParams {
    pub fn new(
        fov_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            fov_y,
            viewport_width,
            viewport_height,
            z_near,
            z_far,
        }
    }

    /// Creates parameters from a vertical FOV in degrees instead of radians.
    pub fn from_degrees(
        fov_y_degrees: f32,
        viewport_width: f32,
        viewport_height: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::new(
            fov_y_degrees.to_radians(),
            viewport_width,
            viewport_height,
            z_near,
            z_far,
        )
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio() * (self.fov_y / 2.0).tan()).atan()
    }

    /// Checks every parameter constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), FrustumError> {
        let fields = [
            ("fov_y", self.fov_y),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("z_near", self.z_near),
            ("z_far", self.z_far),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FrustumError::invalid(format!("{name} is not finite ({value})")));
        }

        if self.fov_y <= 0.0 || self.fov_y >= PI {
            return Err(FrustumError::invalid(format!(
                "vertical field of view must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(FrustumError::invalid(format!(
                "viewport must have positive size, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.z_near <= 0.0 {
            return Err(FrustumError::invalid(format!(
                "near plane distance must be positive, got {}",
                self.z_near
            )));
        }
        if self.z_far <= self.z_near {
            return Err(FrustumError::invalid(format!(
                "far plane ({}) must lie beyond near plane ({})",
                self.z_far, self.z_near
            )));
        }
        Ok(())
    }
}

/// Builds the perspective projection matrix for `params`.
///
/// Points strictly inside the view frustum land strictly inside `[-1, 1]^3`
/// after the perspective divide.
pub fn build_perspective(params: &ProjectionParams) -> Result<Mat4, FrustumError> {
    params.validate()?;
    log::debug!(
        "building perspective: fov_y={:.4} aspect={:.4} near={} far={}",
        params.fov_y,
        params.aspect_ratio(),
        params.z_near,
        params.z_far
    );
    Ok(Mat4::perspective_rh_gl(
        params.fov_y,
        params.aspect_ratio(),
        params.z_near,
        params.z_far,
    ))
}

/// Orthographic camera volume, in view-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicParams {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl OrthographicParams {
    pub fn validate(&self) -> Result<(), FrustumError> {
        let values = [
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.z_near,
            self.z_far,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FrustumError::invalid("orthographic bounds must be finite"));
        }
        if self.right <= self.left {
            return Err(FrustumError::invalid(format!(
                "right ({}) must be greater than left ({})",
                self.right, self.left
            )));
        }
        if self.top <= self.bottom {
            return Err(FrustumError::invalid(format!(
                "top ({}) must be greater than bottom ({})",
                self.top, self.bottom
            )));
        }
        if self.z_far <= self.z_near {
            return Err(FrustumError::invalid(format!(
                "far plane ({}) must lie beyond near plane ({})",
                self.z_far, self.z_near
            )));
        }
        Ok(())
    }
}

/// Builds an orthographic projection matrix. Its `w` output is always 1, so
/// classification and corner reconstruction work on it unchanged.
pub fn build_orthographic(params: &OrthographicParams) -> Result<Mat4, FrustumError> {
    params.validate()?;
    log::debug!("building orthographic: {params:?}");
    Ok(Mat4::orthographic_rh_gl(
        params.left,
        params.right,
        params.bottom,
        params.top,
        params.z_near,
        params.z_far,
    ))
}
