use std::ops::Mul;
use std::fmt;

use crate::quaternion::Quaternion;
use crate::vector::Vec4;

/// Quaternion unit `i` as a 4 x 4 matrix.
pub const BASIS_I: Mat4 = Mat4::from_array([
     0.0, 1.0, 0.0, 0.0,
    -1.0, 0.0, 0.0, 0.0,
     0.0, 0.0, 0.0, 1.0,
     0.0, 0.0,-1.0, 0.0,
]);

/// Quaternion unit `j` as a 4 x 4 matrix.
pub const BASIS_J: Mat4 = Mat4::from_array([
     0.0, 0.0, 0.0,-1.0,
     0.0, 0.0,-1.0, 0.0,
     0.0, 1.0, 0.0, 0.0,
     1.0, 0.0, 0.0, 0.0,
]);

/// Quaternion unit `k` as a 4 x 4 matrix.
pub const BASIS_K: Mat4 = Mat4::from_array([
     0.0, 0.0,-1.0, 0.0,
     0.0, 0.0, 0.0, 1.0,
     1.0, 0.0, 0.0, 0.0,
     0.0,-1.0, 0.0, 0.0,
]);

/// Row-major 4 x 4 homogeneous matrix. Element (row i, column j) lives at `m[i * 4 + j]`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    pub m: [f64; 16],
}
impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r0c0: f64, r0c1: f64, r0c2: f64, r0c3: f64,
        r1c0: f64, r1c1: f64, r1c2: f64, r1c3: f64,
        r2c0: f64, r2c1: f64, r2c2: f64, r2c3: f64,
        r3c0: f64, r3c1: f64, r3c2: f64, r3c3: f64,
    ) -> Self {
        Self::from_array([
            r0c0, r0c1, r0c2, r0c3,
            r1c0, r1c1, r1c2, r1c3,
            r2c0, r2c1, r2c2, r2c3,
            r3c0, r3c1, r3c2, r3c3,
        ])
    }

    pub const fn from_array(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.m[i * 4], self.m[i * 4 + 1], self.m[i * 4 + 2], self.m[i * 4 + 3])
    }

    pub fn transpose(&self) -> Self {
        let mut t = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                t[j * 4 + i] = self.m[i * 4 + j];
            }
        }
        Self::from_array(t)
    }

    /// The 16 entries in row-major order.
    pub fn to_array(&self) -> [f64; 16] {
        self.m
    }

    /// The 16 entries in column-major order, as consumed by CSS `matrix3d()` and most GPU APIs.
    pub fn to_cols_array(&self) -> [f64; 16] {
        self.transpose().m
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Row-major product `C = A * B`.
pub fn multiply4x4(a: &[f64; 16], b: &[f64; 16]) -> [f64; 16] {
    let mut c = [0.0; 16];
    for i in 0..4 {
        for j in 0..4 {
            c[i * 4 + j] = (0..4).map(|k| a[i * 4 + k] * b[k * 4 + j]).sum();
        }
    }
    c
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Mat4::from_array(multiply4x4(&self.m, &other.m))
    }
}

impl From<[f64; 16]> for Mat4 {
    fn from(m: [f64; 16]) -> Mat4 {
        Mat4::from_array(m)
    }
}

impl From<Mat4> for [f64; 16] {
    fn from(mat: Mat4) -> [f64; 16] {
        mat.m
    }
}

impl From<Quaternion> for Mat4 {
    /// Convert the quaternion to a 4 x 4 rotation matrix. The quaternion must already be unit length.
    fn from(quat: Quaternion) -> Mat4 {
        let x2 = quat.x + quat.x;
        let y2 = quat.y + quat.y;
        let z2 = quat.z + quat.z;

        let xx2 = x2 * quat.x;
        let xy2 = x2 * quat.y;
        let xz2 = x2 * quat.z;

        let yy2 = y2 * quat.y;
        let yz2 = y2 * quat.z;
        let zz2 = z2 * quat.z;

        let wx2 = x2 * quat.w;
        let wy2 = y2 * quat.w;
        let wz2 = z2 * quat.w;

        Mat4::new(
            1.0 - yy2 - zz2, xy2 - wz2,       xz2 + wy2,       0.0,
            xy2 + wz2,       1.0 - xx2 - zz2, yz2 - wx2,       0.0,
            xz2 - wy2,       yz2 + wx2,       1.0 - xx2 - yy2, 0.0,
            0.0,             0.0,             0.0,             1.0,
        )
    }
}

impl From<Mat4> for cgmath::Matrix4<f64> {
    fn from(mat: Mat4) -> cgmath::Matrix4<f64> {
        let c = mat.to_cols_array();
        cgmath::Matrix4::new(
            c[0],  c[1],  c[2],  c[3],
            c[4],  c[5],  c[6],  c[7],
            c[8],  c[9],  c[10], c[11],
            c[12], c[13], c[14], c[15],
        )
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            let r = self.row(i);
            writeln!(f, "{:>12.6} {:>12.6} {:>12.6} {:>12.6}", r.x, r.y, r.z, r.w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn assert_mat_eq(a: Mat4, b: Mat4) {
    for (x, y) in a.m.iter().zip(b.m.iter()) {
        approx::assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
    }
}

#[test]
fn mat_multiply() {
    let mat1 = Mat4::new(
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 1.0, 2.0, 3.0,
        4.0, 5.0, 6.0, 7.0,
    );
    let mat2 = Mat4::new(
        2.0, 0.0, 1.0, 3.0,
        1.0, 4.0, 0.0, 2.0,
        0.0, 1.0, 5.0, 1.0,
        3.0, 2.0, 1.0, 0.0,
    );
    let res = mat1 * mat2;

    assert!(res == Mat4::new(
        16.0, 19.0, 20.0, 10.0,
        40.0, 47.0, 48.0, 34.0,
        28.0, 12.0, 22.0, 31.0,
        34.0, 40.0, 41.0, 28.0,
    ));
}

#[test]
fn identity_is_neutral() {
    let m = [
        0.5, -1.25, 3.0, 7.0,
        2.0, 0.0, -4.5, 1.0,
        9.75, 1.0, 2.0, -3.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    assert_eq!(multiply4x4(&Mat4::IDENTITY.m, &m), m);
    assert_eq!(multiply4x4(&m, &Mat4::IDENTITY.m), m);
}

#[test]
fn basis_units_square_to_minus_identity() {
    let minus_one = Mat4::from_array(Mat4::IDENTITY.m.map(|v| -v));

    assert_mat_eq(BASIS_I * BASIS_I, minus_one);
    assert_mat_eq(BASIS_J * BASIS_J, minus_one);
    assert_mat_eq(BASIS_K * BASIS_K, minus_one);
    assert_mat_eq(BASIS_I * BASIS_J * BASIS_K, minus_one);
    assert_mat_eq(BASIS_I * BASIS_J, BASIS_K);
}

#[test]
fn column_major_export() {
    let m = Mat4::from_array(std::array::from_fn(|i| i as f64));
    let cols = m.to_cols_array();

    assert_eq!(cols[1], m.get(1, 0));
    assert_eq!(cols[4], m.get(0, 1));
    assert_eq!(m.transpose().transpose(), m);
    assert_eq!(Mat4::from(m.to_array()), m);

    let flat: [f64; 16] = m.into();
    assert_eq!(flat, m.to_array());
}

#[test]
fn raw_bytes_cover_all_entries() {
    let m = Mat4::identity();
    let bytes = m.as_bytes();

    assert_eq!(bytes.len(), 16 * std::mem::size_of::<f64>());
    let back: &Mat4 = bytemuck::from_bytes(bytes);
    assert_eq!(*back, m);
}

#[test]
fn cgmath_matrix_matches_layout() {
    use cgmath::SquareMatrix;

    let m = Mat4::new(
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 1.0, 2.0, 3.0,
        4.0, 5.0, 6.0, 7.0,
    );
    let cg: cgmath::Matrix4<f64> = m.into();

    // cgmath indexes column first
    assert_eq!(cg[0][1], m.get(1, 0));
    assert_eq!(cg[3][0], m.get(0, 3));
    assert_eq!(cgmath::Matrix4::<f64>::from(Mat4::identity()), cgmath::Matrix4::identity());
}
