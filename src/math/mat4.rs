//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - View space is **right-handed**, the camera looks down **-Z**
//! - Clip space is OpenGL style: the visible volume is `-w <= x, y, z <= w`
//!
//! Elements are stored as `f64`. With a large far/near ratio the depth terms
//! of a perspective matrix differ from -1 by less than an `f32` ulp, and the
//! inverse needs those digits. Vectors stay `f32`; products are computed in
//! `f64` and rounded once.
//!
//! # Example
//! ```ignore
//! let view_projection = projection * view;  // view applied first
//! let clip = view_projection * Vec4::point(x, y, z);
//! ```

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec3::Vec3;
use super::vec4::Vec4;

/// Relative pivot magnitude below which [`Mat4::inverse`] treats the matrix as singular.
const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-12;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
///
/// Equality via `PartialEq` is bit equality. To compare the maps two matrices
/// implement, use the `approx` traits (`relative_eq!`, `abs_diff_eq!`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Mat4 {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x as f64],
            [0.0, 1.0, 0.0, y as f64],
            [0.0, 0.0, 1.0, z as f64],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective matrix with a `[-1, 1]` depth range.
    ///
    /// Does not validate its arguments; see [`crate::projection::build_perspective`].
    pub fn perspective_rh_gl(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let (fov_y, aspect_ratio) = (fov_y as f64, aspect_ratio as f64);
        let (near, far) = (near as f64, far as f64);
        let f = 1.0 / (fov_y / 2.0).tan();
        let a = (far + near) / (near - far);
        let b = 2.0 * far * near / (near - far);
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a right-handed orthographic matrix with a `[-1, 1]` depth range.
    pub fn orthographic_rh_gl(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let (l, r, b, t) = (left as f64, right as f64, bottom as f64, top as f64);
        let (n, f) = (near as f64, far as f64);
        Mat4::new([
            [2.0 / (r - l), 0.0, 0.0, -(r + l) / (r - l)],
            [0.0, 2.0 / (t - b), 0.0, -(t + b) / (t - b)],
            [0.0, 0.0, -2.0 / (f - n), -(f + n) / (f - n)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        let row = |axis: Vec3, offset: f32| {
            [axis.x as f64, axis.y as f64, axis.z as f64, offset as f64]
        };
        Self::new([
            row(right, -right.dot(eye)),
            row(up, -up.dot(eye)),
            row(-forward, forward.dot(eye)),
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Computes the inverse of the matrix, if it exists.
    ///
    /// Gauss-Jordan elimination with partial pivoting. Returns `None` when a
    /// pivot is negligible compared to the largest entry of the matrix, or when
    /// the matrix contains non-finite values.
    pub fn inverse(&self) -> Option<Mat4> {
        if self.data.iter().flatten().any(|v| !v.is_finite()) {
            return None;
        }
        let scale = self.max_abs();
        if scale == 0.0 {
            return None;
        }

        let mut a = self.data;
        let mut inv = Mat4::identity().data;

        for col in 0..4 {
            // Pick the row with the largest magnitude in this column.
            let pivot_row = (col..4)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            let pivot = a[pivot_row][col];
            if pivot.abs() <= scale * SINGULAR_PIVOT_TOLERANCE {
                return None;
            }

            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let inv_pivot = 1.0 / pivot;
            for k in 0..4 {
                a[col][k] *= inv_pivot;
                inv[col][k] *= inv_pivot;
            }

            for row in 0..4 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..4 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        Some(Mat4::new(inv))
    }

    /// Row `index` at full precision.
    #[inline]
    pub(crate) fn row(&self, index: usize) -> [f64; 4] {
        self.data[index]
    }

    /// `self * v` without rounding the result to `f32`.
    pub(crate) fn transform(&self, v: [f64; 4]) -> [f64; 4] {
        self.data
            .map(|r| r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3])
    }

    fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .flatten()
            .fold(0.0f64, |acc, v| acc.max(v.abs()))
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let [x, y, z, w] = self.transform([v.x as f64, v.y as f64, v.z as f64, v.w as f64]);
        Vec4::new(x as f32, y as f32, z as f32, w as f32)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
