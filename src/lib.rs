//! Rotation matrices from unit quaternions.
//!
//! An angle and an axis go in, a row-major 4 x 4 homogeneous rotation comes out:
//!
//! ```
//! use quatrot::{Quaternion, Vec3};
//!
//! let m = Quaternion::rotate_about_axis(std::f64::consts::FRAC_PI_2, Vec3::unit_z()).unwrap();
//! assert_eq!(m.to_array().len(), 16);
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use crate::error::{QuatError, QuatResult};
pub use crate::matrix::{multiply4x4, Mat4, BASIS_I, BASIS_J, BASIS_K};
pub use crate::quaternion::{rotate_orthonormal_basis, Quaternion};
pub use crate::vector::{Vec3, Vec4};
