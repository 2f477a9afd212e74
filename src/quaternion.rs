use log::{debug, trace};

use crate::error::{QuatError, QuatResult};
use crate::matrix::Mat4;
use crate::vector::Vec3;

/// A quaternion `w + xi + yj + zk`.
///
/// The scalar methods (`scale`, `divide`, `normalize`, `set`) mutate the
/// receiver and hand it back so calls can be chained:
/// `q.scale(2.0).normalize()?`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Quaternion {
    /// Store the four components as given. No normalization.
    pub fn from_components(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// No rotation.
    pub fn identity() -> Self {
        Self::from_components(1.0, 0.0, 0.0, 0.0)
    }

    pub fn set(&mut self, w: f64, x: f64, y: f64, z: f64) -> &mut Self {
        self.w = w;
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Components as `[w, x, y, z]`.
    pub fn get(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn scale(&mut self, k: f64) -> &mut Self {
        self.w *= k;
        self.x *= k;
        self.y *= k;
        self.z *= k;
        self
    }

    /// Divide every component by `k`. Leaves the receiver untouched when `k` is zero.
    pub fn divide(&mut self, k: f64) -> QuatResult<&mut Self> {
        if k == 0.0 {
            debug!("refusing to divide {:?} by zero", self.get());
            return Err(QuatError::DivisionByZero);
        }
        self.w /= k;
        self.x /= k;
        self.y /= k;
        self.z /= k;
        Ok(self)
    }

    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.w*other.w + self.x*other.x + self.y*other.y + self.z*other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length.
    pub fn normalize(&mut self) -> QuatResult<&mut Self> {
        self.normalize_by(1.0)
    }

    /// Scale to length `1 / k`.
    pub fn normalize_by(&mut self, k: f64) -> QuatResult<&mut Self> {
        let norm = self.norm();
        self.divide(k * norm)
    }

    pub fn normalized(&self) -> QuatResult<Quaternion> {
        let mut unit = *self;
        unit.normalize()?;
        Ok(unit)
    }

    /// Rotation matrix of this quaternion, normalized on a local copy first.
    /// See `From<Quaternion> for Mat4` for the unchecked conversion.
    pub fn to_rotation_matrix(&self) -> QuatResult<Mat4> {
        Ok(Mat4::from(self.normalized()?))
    }

    /// Rotation by `theta` radians about `axis`, built through the half-angle
    /// quaternion. `axis` is normalized along with the quaternion, so it does not
    /// need to be unit length. A zero axis with an odd multiple of pi as angle
    /// leaves nothing to normalize and fails with `DivisionByZero`.
    pub fn rotate_about_axis(theta: f64, axis: impl Into<Vec3>) -> QuatResult<Mat4> {
        let axis = axis.into();
        let (s, c) = (theta / 2.0).sin_cos();
        // cos(n * pi / 2) for odd n only vanishes up to the rounding of theta
        if axis.len_sq() == 0.0 && c.abs() <= theta.abs() * f64::EPSILON {
            debug!("degenerate rotation: theta = {theta}, axis = {axis}");
            return Err(QuatError::DivisionByZero);
        }
        let mut quat = Quaternion::from_components(c, axis.x * s, axis.y * s, axis.z * s);
        quat.normalize()?;
        trace!("rotation quaternion {:?}", quat.get());

        Ok(Mat4::from(quat))
    }

    /// Rotation by `theta` radians about the stored vector part, via Rodrigues'
    /// formula. `(x, y, z)` is taken to be a unit axis; `w` is ignored.
    pub fn rotate(&self, theta: f64) -> Mat4 {
        let (x, y, z) = (self.x, self.y, self.z);
        let (s, c) = theta.sin_cos();
        let t = 1.0 - c;

        Mat4::new(
            c + x*x*t,   x*y*t - z*s, x*z*t + y*s, 0.0,
            y*x*t + z*s, c + y*y*t,   y*z*t - x*s, 0.0,
            z*x*t - y*s, z*y*t + x*s, c + z*z*t,   0.0,
            0.0,         0.0,         0.0,         1.0,
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation by `theta` radians about a unit `axis`, via Rodrigues' formula.
pub fn rotate_orthonormal_basis(theta: f64, axis: impl Into<Vec3>) -> Mat4 {
    let axis = axis.into();
    Quaternion::from_components(0.0, axis.x, axis.y, axis.z).rotate(theta)
}


#[cfg(test)]
const EPS: f64 = 1e-9;

#[cfg(test)]
fn assert_mat_eq(a: Mat4, b: Mat4) {
    for (x, y) in a.m.iter().zip(b.m.iter()) {
        approx::assert_abs_diff_eq!(*x, *y, epsilon = EPS);
    }
}

#[cfg(test)]
fn sample_quaternions() -> Vec<Quaternion> {
    vec![
        Quaternion::from_components(1.0, 2.0, 3.0, 4.0),
        Quaternion::from_components(-0.5, 0.25, 0.0, 8.0),
        Quaternion::from_components(0.0, 0.0, 0.0, 1e-3),
        Quaternion::from_components(3.0, -7.0, 0.1, -2.2),
        Quaternion::from_components(1e6, 1.0, -1.0, 0.5),
    ]
}

#[test]
fn identity_rotation_matrix() {
    assert_mat_eq(Quaternion::identity().to_rotation_matrix().unwrap(), Mat4::identity());
    assert_eq!(Quaternion::default(), Quaternion::identity());
}

#[test]
fn from_components_stores_verbatim() {
    let q = Quaternion::from_components(0.0, 5.0, -2.0, 9.5);
    assert_eq!(q.get(), [0.0, 5.0, -2.0, 9.5]);
}

#[test]
fn set_overwrites_and_chains() {
    let mut q = Quaternion::identity();
    q.set(0.0, 3.0, 0.0, 4.0).scale(2.0);
    assert_eq!(q.get(), [0.0, 6.0, 0.0, 8.0]);
}

#[test]
fn dot_and_norm() {
    let a = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    let b = Quaternion::from_components(-2.0, 0.5, 1.0, 0.0);

    assert_eq!(a.dot(&b), 2.0);
    assert_eq!(a.dot(&b), b.dot(&a));
    assert_eq!(a.norm(), 30f64.sqrt());
    assert_eq!(Quaternion::from_components(0.0, 0.0, 0.0, 0.0).norm(), 0.0);
}

#[test]
fn normalize_gives_unit_norm() {
    for mut q in sample_quaternions() {
        q.normalize().unwrap();
        approx::assert_abs_diff_eq!(q.norm(), 1.0, epsilon = EPS);
    }
}

#[test]
fn normalize_by_scales_to_inverse_length() {
    let mut q = Quaternion::from_components(0.0, 3.0, 0.0, 4.0);
    q.normalize_by(2.0).unwrap();
    approx::assert_abs_diff_eq!(q.norm(), 0.5, epsilon = EPS);
}

#[test]
fn normalized_copy_leaves_receiver() {
    let q = Quaternion::from_components(0.0, 3.0, 0.0, 4.0);
    let unit = q.normalized().unwrap();

    assert_eq!(q.get(), [0.0, 3.0, 0.0, 4.0]);
    approx::assert_abs_diff_eq!(unit.norm(), 1.0, epsilon = EPS);
}

#[test]
fn division_by_zero_is_reported() {
    let mut zero = Quaternion::from_components(0.0, 0.0, 0.0, 0.0);
    assert_eq!(zero.normalize().unwrap_err(), QuatError::DivisionByZero);

    let mut q = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    assert_eq!(q.divide(0.0).unwrap_err(), QuatError::DivisionByZero);
    assert_eq!(q.get(), [1.0, 2.0, 3.0, 4.0]);

    assert_eq!(q.normalize_by(0.0).unwrap_err(), QuatError::DivisionByZero);
    assert_eq!(zero.to_rotation_matrix().unwrap_err(), QuatError::DivisionByZero);
}

#[test]
fn scale_then_divide_restores() {
    for k in [2.0, -0.125, 1e-4, 37.5] {
        for orig in sample_quaternions() {
            let mut q = orig;
            q.scale(k).divide(k).unwrap();
            for (a, b) in q.get().iter().zip(orig.get().iter()) {
                approx::assert_relative_eq!(*a, *b, max_relative = EPS);
            }
        }
    }
}

#[test]
fn scale_by_zero_collapses() {
    let mut q = Quaternion::from_components(1.0, 2.0, 3.0, 4.0);
    q.scale(0.0);
    assert_eq!(q.norm(), 0.0);
}

#[test]
fn rotation_matrices_are_orthonormal() {
    for q in sample_quaternions() {
        let m = q.to_rotation_matrix().unwrap();
        let r0 = m.row(0).xyz();
        let r1 = m.row(1).xyz();
        let r2 = m.row(2).xyz();

        approx::assert_abs_diff_eq!(r0.len(), 1.0, epsilon = EPS);
        approx::assert_abs_diff_eq!(r1.len(), 1.0, epsilon = EPS);
        approx::assert_abs_diff_eq!(r2.len(), 1.0, epsilon = EPS);
        approx::assert_abs_diff_eq!(r0.dot(r1), 0.0, epsilon = EPS);
        approx::assert_abs_diff_eq!(r0.dot(r2), 0.0, epsilon = EPS);
        approx::assert_abs_diff_eq!(r1.dot(r2), 0.0, epsilon = EPS);

        // det(R) = r0 . (r1 x r2)
        approx::assert_abs_diff_eq!(r0.dot(r1.cross(r2)), 1.0, epsilon = EPS);

        // transpose is the inverse
        assert_mat_eq(m * m.transpose(), Mat4::identity());
    }
}

#[test]
fn to_rotation_matrix_does_not_mutate() {
    let q = Quaternion::from_components(2.0, 0.0, 0.0, 2.0);
    let m = q.to_rotation_matrix().unwrap();

    assert_eq!(q.get(), [2.0, 0.0, 0.0, 2.0]);
    assert_mat_eq(m, Mat4::from(q.normalized().unwrap()));
}

#[test]
fn quarter_turn_about_z() {
    let p = crate::vector::Vec4::new(1.0, 0.0, 0.0, 1.0);
    let expected = crate::vector::Vec4::new(0.0, 1.0, 0.0, 1.0);

    let quat = Quaternion::rotate_about_axis(std::f64::consts::FRAC_PI_2, Vec3::unit_z()).unwrap();
    let rodrigues = rotate_orthonormal_basis(std::f64::consts::FRAC_PI_2, Vec3::unit_z());

    for m in [quat, rodrigues] {
        let rotated = m * p;
        approx::assert_abs_diff_eq!((rotated - expected).dot(rotated - expected), 0.0, epsilon = EPS);
    }
}

#[test]
fn both_rotation_paths_agree() {
    let axes = [
        Vec3::unit_x(),
        Vec3::unit_y(),
        Vec3::unit_z(),
        Vec3::new(1.0, 1.0, 1.0) * (1.0 / 3f64.sqrt()),
        Vec3::new(0.6, 0.0, -0.8),
    ];
    let angles = [0.0, 0.3, std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_3, std::f64::consts::PI, 2.5, -1.2, 7.0];

    for axis in axes {
        for theta in angles {
            assert_mat_eq(
                Quaternion::rotate_about_axis(theta, axis).unwrap(),
                rotate_orthonormal_basis(theta, axis),
            );
        }
    }
}

#[test]
fn long_axis_still_rotates_about_its_direction() {
    let unit = Quaternion::rotate_about_axis(1.0, Vec3::unit_y()).unwrap();
    let long = Quaternion::rotate_about_axis(1.0, Vec3::new(0.0, 10.0, 0.0)).unwrap();

    // the axis is a fixed point, but the length of the axis changes the angle
    approx::assert_abs_diff_eq!((long * crate::vector::Vec4::point(Vec3::unit_y())).xyz().dot(Vec3::unit_y()), 1.0, epsilon = EPS);
    approx::assert_abs_diff_eq!(long.row(0).xyz().cross(long.row(1).xyz()).dot(long.row(2).xyz()), 1.0, epsilon = EPS);
    assert!(unit != long);
}

#[test]
fn axis_accepts_tuples_and_quaternions() {
    let from_vec = Quaternion::rotate_about_axis(0.7, Vec3::unit_x()).unwrap();
    let from_tuple = Quaternion::rotate_about_axis(0.7, (1.0, 0.0, 0.0)).unwrap();
    let from_quat = Quaternion::rotate_about_axis(0.7, Quaternion::from_components(0.0, 1.0, 0.0, 0.0)).unwrap();

    assert_mat_eq(from_vec, from_tuple);
    assert_mat_eq(from_vec, from_quat);
}

#[test]
fn zero_axis_half_turn_is_degenerate() {
    for n in [1.0, 3.0, 5.0, 11.0, 51.0, 101.0] {
        for theta in [n * std::f64::consts::PI, -n * std::f64::consts::PI] {
            assert_eq!(
                Quaternion::rotate_about_axis(theta, Vec3::zero()).unwrap_err(),
                QuatError::DivisionByZero,
            );
        }
    }
    // Any other angle about a zero axis is just the identity.
    for theta in [0.0, 1.0, 2.0 * std::f64::consts::PI, 100.0 * std::f64::consts::PI] {
        assert_mat_eq(Quaternion::rotate_about_axis(theta, Vec3::zero()).unwrap(), Mat4::identity());
    }
}

#[test]
fn tiny_axis_half_turn_still_normalizes() {
    let m = Quaternion::rotate_about_axis(std::f64::consts::PI, Vec3::new(1e-17, 0.0, 0.0)).unwrap();

    let mut quat = Quaternion::from_components((std::f64::consts::PI / 2.0).cos(), 1e-17, 0.0, 0.0);
    quat.normalize().unwrap();
    assert_mat_eq(m, Mat4::from(quat));
    approx::assert_abs_diff_eq!(m.row(0).xyz().cross(m.row(1).xyz()).dot(m.row(2).xyz()), 1.0, epsilon = EPS);
}

#[test]
fn rotate_uses_stored_axis() {
    let q = Quaternion::from_components(42.0, 0.0, 1.0, 0.0);
    let m = q.rotate(0.4);

    assert_eq!(q.get(), [42.0, 0.0, 1.0, 0.0]);
    assert_mat_eq(m, rotate_orthonormal_basis(0.4, Vec3::unit_y()));
}

#[test]
fn rodrigues_matches_vector_form() {
    let k = Vec3::new(2.0, -1.0, 2.0) * (1.0 / 3.0);
    let v = Vec3::new(0.3, 1.7, -0.9);
    let theta: f64 = 1.1;
    let (s, c) = theta.sin_cos();

    let expected = v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c));
    let rotated = (rotate_orthonormal_basis(theta, k) * crate::vector::Vec4::point(v)).xyz();

    approx::assert_abs_diff_eq!((rotated - expected).len(), 0.0, epsilon = EPS);
}

#[test]
fn two_quarter_turns_make_a_half_turn() {
    for axis in [Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z(), Vec3::new(0.0, 0.6, 0.8)] {
        let quarter = Quaternion::rotate_about_axis(std::f64::consts::FRAC_PI_2, axis).unwrap();
        let half = Quaternion::rotate_about_axis(std::f64::consts::PI, axis).unwrap();
        assert_mat_eq(quarter * quarter, half);
    }
}

#[test]
fn matches_cgmath_axis_angle() {
    use cgmath::{InnerSpace, Rad};

    let axis = Vec3::new(1.0, 2.0, 3.0);
    let theta = 0.9;
    let ours = Quaternion::rotate_about_axis(theta, axis).unwrap();

    let unit = cgmath::Vector3::from(axis).normalize();
    let reference = cgmath::Matrix4::from_axis_angle(unit, Rad(theta));
    let converted: cgmath::Matrix4<f64> = ours.into();

    for col in 0..4 {
        for row in 0..4 {
            approx::assert_abs_diff_eq!(converted[col][row], reference[col][row], epsilon = EPS);
        }
    }
}
