use std::ops::{Add, Sub, Mul};
use std::fmt;

use crate::matrix::Mat4;
use crate::quaternion::Quaternion;

/// A rotation axis, or any other 3 component vector.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn len(&self) -> f64 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f64 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }

    pub fn dot(&self, vec: Vec3) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    pub fn cross(&self, vec: Vec3) -> Self {
        Self::new(
            self.y*vec.z - self.z*vec.y,
            self.z*vec.x - self.x*vec.z,
            self.x*vec.y - self.y*vec.x,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self::Output {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Vec3 {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

impl From<Quaternion> for Vec3 {
    /// The vector part; `w` is dropped.
    fn from(quat: Quaternion) -> Vec3 {
        Vec3::new(quat.x, quat.y, quat.z)
    }
}

impl From<Vec3> for cgmath::Vector3<f64> {
    fn from(vec: Vec3) -> cgmath::Vector3<f64> {
        cgmath::Vector3::new(vec.x, vec.y, vec.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}


#[test]
fn unit_axes_form_a_right_handed_basis() {
    assert!(Vec3::unit_x().cross(Vec3::unit_y()) == Vec3::unit_z());
    assert!(Vec3::unit_y().cross(Vec3::unit_z()) == Vec3::unit_x());
    assert!(Vec3::unit_z().cross(Vec3::unit_x()) == Vec3::unit_y());
    assert!(Vec3::unit_x().dot(Vec3::unit_z()) == 0.0);
}

#[test]
fn axis_length() {
    let axis = Vec3::new(0.0, 3.0, 4.0);

    assert!(axis.len_sq() == 25.0);
    assert!(axis.len() == 5.0);
    assert!(axis.dot(Vec3::unit_z()) == 4.0);
    assert!((axis * 0.5).len() == 2.5);
}

#[test]
fn axis_from_quaternion_drops_scalar_part() {
    let axis: Vec3 = Quaternion::from_components(7.0, 0.0, 1.0, 0.0).into();
    assert!(axis == Vec3::unit_y());
    assert!(Vec3::from((0.0, 0.0, 1.0)) == Vec3::unit_z());
    assert!(Vec3::from([1.0, 0.0, 0.0]) == Vec3::unit_x());
}


/// A homogeneous point `(x, y, z, w)`.
#[repr(C)]
#[derive(PartialEq, Clone, Copy, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}
impl Vec4 {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            x, 
            y, 
            z,
            w,
        }
    }

    pub fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(&self, vec: Vec4) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z + self.w*vec.w
    }
}

impl Sub for Vec4 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z, self.w - other.w)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    /// Column vector convention: `M · v`.
    fn mul(self, vec: Vec4) -> Self::Output {
        Vec4::new(
            self.row(0).dot(vec),
            self.row(1).dot(vec),
            self.row(2).dot(vec),
            self.row(3).dot(vec),
        )
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[test]
fn multiply_mat_by_vec() {
    let vec = Vec4::new(10.0, 11.0, 12.0, 13.0);
    let mat = Mat4::new(
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 1.0, 2.0, 3.0,
        4.0, 5.0, 6.0, 7.0,
    );
    let res = mat * vec;
    assert!(res == Vec4::new(120.0, 304.0, 164.0, 258.0));
}
