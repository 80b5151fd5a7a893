//! Small linear algebra toolkit: 3D/4D vectors and a 4x4 matrix.

pub mod mat4;
pub mod vec3;
pub mod vec4;
