//! Perspective frustum classification.
//!
//! Builds a projection matrix from camera parameters, moves view-space points
//! into homogeneous clip space, and tells which frustum planes each point
//! violates with a 7-bit outcode. The frustum's corners can be recovered by
//! inverse-projecting the NDC cube, for drawing or debugging.
//!
//! View space is right-handed and the camera looks down -Z.
//!
//! # Quick Start
//!
//! ```
//! use frustum_probe::prelude::*;
//!
//! let params = ProjectionParams::from_degrees(60.0, 1280.0, 720.0, 10.0, 50.0);
//! let projection = build_perspective(&params)?;
//!
//! let code = classify(to_clip_space(Vec3::new(0.0, 0.0, -20.0), &projection));
//! assert!(code.is_inside());
//!
//! let corners = reconstruct_frustum_corners(&projection)?;
//! assert_eq!(corners.edges().count(), 12);
//! # Ok::<(), FrustumError>(())
//! ```

// Classification core
pub mod clip_space;
pub mod error;
pub mod frustum;
pub mod math;
pub mod outcode;
pub mod probe;
pub mod projection;

// Diagnostics built on top of the core
pub mod colors;
pub mod render;
#[cfg(feature = "viewer")]
pub mod viewer;

// Re-export commonly needed types at crate root for convenience
pub use error::FrustumError;
pub use outcode::Outcode;
pub use probe::{FrustumProbe, PointReport};
pub use projection::ProjectionParams;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use frustum_probe::prelude::*;
/// ```
pub mod prelude {
    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Projection
    pub use crate::projection::{
        build_orthographic, build_perspective, OrthographicParams, ProjectionParams,
    };

    // Classification
    pub use crate::clip_space::{is_inside_ndc, to_clip_space, to_ndc, try_to_ndc};
    pub use crate::outcode::{
        classify, classify_point, trivially_accepted, trivially_rejected, Outcode,
    };

    // Geometry
    pub use crate::frustum::{
        reconstruct_frustum_corners, FrustumCorners, FrustumPlanes, Plane, FRUSTUM_EDGES,
        NDC_CUBE_CORNERS,
    };

    // Sessions and errors
    pub use crate::error::FrustumError;
    pub use crate::probe::{FrustumProbe, PointReport};
}
