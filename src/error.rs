//! Errors raised by matrix construction and inversion.
//!
//! Points behind the camera or on the camera plane are not errors; they are
//! reported through [`Outcode::BEHIND`](crate::outcode::Outcode::BEHIND).

/// Failure of a projection or reconstruction call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrustumError {
    /// A camera parameter is out of range; no matrix was produced.
    #[error("invalid projection parameters: {reason}")]
    InvalidProjectionParams { reason: String },

    /// The matrix has no inverse. A matrix built from validated parameters never
    /// hits this, so it points at a bug upstream.
    #[error("projection matrix is not invertible")]
    SingularMatrix,
}

impl FrustumError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidProjectionParams {
            reason: reason.into(),
        }
    }
}
