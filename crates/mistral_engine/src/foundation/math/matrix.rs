//! Column-major 4x4 matrix

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{utils, Quat, Vec3, Vec4, EPSILON};

/// 4x4 matrix in column-major order.
///
/// `m0..m3` is the first column and the translation lives in `m12..m14`,
/// matching the layout the renderer expects. `a * b` transforms by `b`
/// first, then by `a`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub m0: f32,
    pub m1: f32,
    pub m2: f32,
    pub m3: f32,
    pub m4: f32,
    pub m5: f32,
    pub m6: f32,
    pub m7: f32,
    pub m8: f32,
    pub m9: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m15: f32,
}

impl_approx_eq!(Matrix4x4 {
    m0, m1, m2, m3, m4, m5, m6, m7, m8, m9, m10, m11, m12, m13, m14, m15
});

impl_field_index!(Matrix4x4 {
    0 => m0, 1 => m1, 2 => m2, 3 => m3,
    4 => m4, 5 => m5, 6 => m6, 7 => m7,
    8 => m8, 9 => m9, 10 => m10, 11 => m11,
    12 => m12, 13 => m13, 14 => m14, 15 => m15
});

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// The identity matrix
    pub const IDENTITY: Self = Self::from_cols_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Create a matrix with every element set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::from_cols_array([value; 16])
    }

    /// Build from 16 floats in column-major order
    #[must_use]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self {
            m0: m[0],
            m1: m[1],
            m2: m[2],
            m3: m[3],
            m4: m[4],
            m5: m[5],
            m6: m[6],
            m7: m[7],
            m8: m[8],
            m9: m[9],
            m10: m[10],
            m11: m[11],
            m12: m[12],
            m13: m[13],
            m14: m[14],
            m15: m[15],
        }
    }

    /// The 16 elements in column-major order
    #[must_use]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        [
            self.m0, self.m1, self.m2, self.m3,
            self.m4, self.m5, self.m6, self.m7,
            self.m8, self.m9, self.m10, self.m11,
            self.m12, self.m13, self.m14, self.m15,
        ]
    }

    /// Swap rows and columns
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self::from_cols_array([
            self.m0, self.m4, self.m8, self.m12,
            self.m1, self.m5, self.m9, self.m13,
            self.m2, self.m6, self.m10, self.m14,
            self.m3, self.m7, self.m11, self.m15,
        ])
    }

    /// Determinant by cofactor expansion along the first row
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let Self {
            m0, m1, m2, m3, m4, m5, m6, m7, m8, m9, m10, m11, m12, m13, m14, m15,
        } = *self;

        let c0 = m5 * (m10 * m15 - m14 * m11) - m9 * (m6 * m15 - m14 * m7) + m13 * (m6 * m11 - m10 * m7);
        let c1 = m1 * (m10 * m15 - m14 * m11) - m9 * (m2 * m15 - m14 * m3) + m13 * (m2 * m11 - m10 * m3);
        let c2 = m1 * (m6 * m15 - m14 * m7) - m5 * (m2 * m15 - m14 * m3) + m13 * (m2 * m7 - m6 * m3);
        let c3 = m1 * (m6 * m11 - m10 * m7) - m5 * (m2 * m11 - m10 * m3) + m9 * (m2 * m7 - m6 * m3);

        m0 * c0 - m4 * c1 + m8 * c2 - m12 * c3
    }

    /// Inverse via the adjugate.
    ///
    /// Returns [`Matrix4x4::IDENTITY`] when `|det| < 1e-6`; a caller cannot
    /// tell that fallback apart from a genuine identity result.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Self::IDENTITY;
        }

        let Self {
            m0, m1, m2, m3, m4, m5, m6, m7, m8, m9, m10, m11, m12, m13, m14, m15,
        } = *self;

        let adjugate = Self::from_cols_array([
            m5 * (m10 * m15 - m14 * m11) - m9 * (m6 * m15 - m14 * m7) + m13 * (m6 * m11 - m10 * m7),
            -(m1 * (m10 * m15 - m14 * m11) - m9 * (m2 * m15 - m14 * m3) + m13 * (m2 * m11 - m10 * m3)),
            m1 * (m6 * m15 - m14 * m7) - m5 * (m2 * m15 - m14 * m3) + m13 * (m2 * m7 - m6 * m3),
            -(m1 * (m6 * m11 - m10 * m7) - m5 * (m2 * m11 - m10 * m3) + m9 * (m2 * m7 - m6 * m3)),
            -(m4 * (m10 * m15 - m14 * m11) - m8 * (m6 * m15 - m14 * m7) + m12 * (m6 * m11 - m10 * m7)),
            m0 * (m10 * m15 - m14 * m11) - m8 * (m2 * m15 - m14 * m3) + m12 * (m2 * m11 - m10 * m3),
            -(m0 * (m6 * m15 - m14 * m7) - m4 * (m2 * m15 - m14 * m3) + m12 * (m2 * m7 - m6 * m3)),
            m0 * (m6 * m11 - m10 * m7) - m4 * (m2 * m11 - m10 * m3) + m8 * (m2 * m7 - m6 * m3),
            m4 * (m9 * m15 - m13 * m11) - m8 * (m5 * m15 - m13 * m7) + m12 * (m5 * m11 - m9 * m7),
            -(m0 * (m9 * m15 - m13 * m11) - m8 * (m1 * m15 - m13 * m3) + m12 * (m1 * m11 - m9 * m3)),
            m0 * (m5 * m15 - m13 * m7) - m4 * (m1 * m15 - m13 * m3) + m12 * (m1 * m7 - m5 * m3),
            -(m0 * (m5 * m11 - m9 * m7) - m4 * (m1 * m11 - m9 * m3) + m8 * (m1 * m7 - m5 * m3)),
            -(m4 * (m9 * m14 - m13 * m10) - m8 * (m5 * m14 - m13 * m6) + m12 * (m5 * m10 - m9 * m6)),
            m0 * (m9 * m14 - m13 * m10) - m8 * (m1 * m14 - m13 * m2) + m12 * (m1 * m10 - m9 * m2),
            -(m0 * (m5 * m14 - m13 * m6) - m4 * (m1 * m14 - m13 * m2) + m12 * (m1 * m6 - m5 * m2)),
            m0 * (m5 * m10 - m9 * m6) - m4 * (m1 * m10 - m9 * m2) + m8 * (m1 * m6 - m5 * m2),
        ]);

        adjugate.map(|v| v / det)
    }

    /// Translation part (`m12..m14`)
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        Vec3::new(self.m12, self.m13, self.m14)
    }

    /// Per-axis scale: the lengths of the first three columns
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            Vec3::new(self.m0, self.m1, self.m2).length(),
            Vec3::new(self.m4, self.m5, self.m6).length(),
            Vec3::new(self.m8, self.m9, self.m10).length(),
        )
    }

    /// Rotation extracted from the upper 3x3 block.
    ///
    /// Each column is divided by its extracted scale before the trace-based
    /// conversion, so zero or mirrored scales give meaningless results.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let s = self.scale();
        let (r0, r1, r2) = (self.m0 / s.x, self.m1 / s.x, self.m2 / s.x);
        let (r4, r5, r6) = (self.m4 / s.y, self.m5 / s.y, self.m6 / s.y);
        let (r8, r9, r10) = (self.m8 / s.z, self.m9 / s.z, self.m10 / s.z);

        let trace = r0 + r5 + r10;

        let q = if trace > 0.0 {
            let k = 0.5 / (trace + 1.0).sqrt();
            Quat::new((r6 - r9) * k, (r8 - r2) * k, (r1 - r4) * k, 0.25 / k)
        } else if self.m0 > self.m5 && self.m0 > self.m10 {
            let k = 2.0 * (1.0 + r0 - r5 - r10).sqrt();
            Quat::new(0.25 * k, (r4 + r1) / k, (r8 + r2) / k, (r6 - r9) / k)
        } else if self.m5 > self.m10 {
            let k = 2.0 * (1.0 + r5 - r0 - r10).sqrt();
            Quat::new((r4 + r1) / k, 0.25 * k, (r9 + r6) / k, (r8 - r2) / k)
        } else {
            let k = 2.0 * (1.0 + r10 - r0 - r5).sqrt();
            Quat::new((r8 + r2) / k, (r9 + r6) / k, 0.25 * k, (r1 - r4) / k)
        };

        q.normalized()
    }

    /// Translation matrix
    #[must_use]
    pub const fn from_position(position: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.m12 = position.x;
        m.m13 = position.y;
        m.m14 = position.z;
        m
    }

    /// Rotation matrix; the quaternion is normalized first
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        let q = rotation.normalized();

        let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, xz, yz) = (q.x * q.y, q.x * q.z, q.y * q.z);
        let (wx, wy, wz) = (q.w * q.x, q.w * q.y, q.w * q.z);

        Self::from_cols_array([
            1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0,
            2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0,
            2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Scale matrix
    #[must_use]
    pub const fn from_scale(scale: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.m0 = scale.x;
        m.m5 = scale.y;
        m.m10 = scale.z;
        m
    }

    /// `T * R * S`: scale first, then rotate, then translate
    #[must_use]
    pub fn from_prs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::from_position(position) * Self::from_rotation(rotation) * Self::from_scale(scale)
    }

    /// Right-handed perspective projection; `fov_y` is in degrees
    #[must_use]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (utils::deg_to_rad(fov_y) * 0.5).tan();

        let mut m = Self::splat(0.0);
        m.m0 = 1.0 / (aspect * tan_half_fov);
        m.m5 = 1.0 / tan_half_fov;
        m.m10 = -(far + near) / (far - near);
        m.m11 = -1.0;
        m.m14 = -(2.0 * far * near) / (far - near);
        m
    }

    /// Orthographic projection
    #[must_use]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fne = far - near;

        let mut m = Self::splat(0.0);
        m.m0 = 2.0 / rl;
        m.m5 = 2.0 / tb;
        m.m10 = -2.0 / fne;
        m.m12 = -(left + right) / rl;
        m.m13 = -(top + bottom) / tb;
        m.m14 = -(far + near) / fne;
        m.m15 = 1.0;
        m
    }

    /// View matrix looking from `eye` towards `target`
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = (target - eye).normalized();
        let x = z.cross(up).normalized();
        let y = x.cross(z);

        Self::from_cols_array([
            x.x, y.x, -z.x, 0.0,
            x.y, y.y, -z.y, 0.0,
            x.z, y.z, -z.z, 0.0,
            -x.dot(eye), -y.dot(eye), z.dot(eye), 1.0,
        ])
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_cols_array(self.to_cols_array().map(f))
    }

    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let a = self.to_cols_array();
        let b = other.to_cols_array();
        Self::from_cols_array(std::array::from_fn(|i| f(a[i], b[i])))
    }
}

impl Add for Matrix4x4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let a = self.to_cols_array();
        let b = rhs.to_cols_array();
        Self::from_cols_array(std::array::from_fn(|i| {
            let (col, row) = (i / 4, i % 4);
            (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum()
        }))
    }
}

impl Mul<Vec4> for Matrix4x4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.m0 * v.x + self.m4 * v.y + self.m8 * v.z + self.m12 * v.w,
            self.m1 * v.x + self.m5 * v.y + self.m9 * v.z + self.m13 * v.w,
            self.m2 * v.x + self.m6 * v.y + self.m10 * v.z + self.m14 * v.w,
            self.m3 * v.x + self.m7 * v.y + self.m11 * v.z + self.m15 * v.w,
        )
    }
}

impl AddAssign for Matrix4x4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix4x4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Matrix4x4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<[f32; 16]> for Matrix4x4 {
    fn from(m: [f32; 16]) -> Self {
        Self::from_cols_array(m)
    }
}

impl From<Matrix4x4> for [f32; 16] {
    fn from(m: Matrix4x4) -> Self {
        m.to_cols_array()
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4x4 {
    fn from(m: nalgebra::Matrix4<f32>) -> Self {
        let mut cols = [0.0; 16];
        cols.copy_from_slice(m.as_slice());
        Self::from_cols_array(cols)
    }
}

impl From<Matrix4x4> for nalgebra::Matrix4<f32> {
    fn from(m: Matrix4x4) -> Self {
        Self::from_column_slice(&m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-5;

    fn sample_rotations() -> Vec<Quat> {
        vec![
            Quat::IDENTITY,
            Quat::from_axis_angle(Vec3::UP, 0.7),
            Quat::from_axis_angle(Vec3::RIGHT, -2.4),
            Quat::from_axis_angle(Vec3::FORWARD, 3.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 1.0), 2.0),
            Quat::from_euler(Vec3::new(0.4, -1.2, 2.8)),
        ]
    }

    fn same_rotation(a: Quat, b: Quat) -> bool {
        // q and -q encode the same rotation
        a.dot(b).abs() > 1.0 - 1e-4
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let t = Matrix4x4::from_position(Vec3::new(1.0, 0.0, 0.0));
        let s = Matrix4x4::from_scale(Vec3::splat(2.0));
        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);

        assert_relative_eq!((t * s) * p, Vec4::new(3.0, 0.0, 0.0, 1.0));
        assert_relative_eq!((s * t) * p, Vec4::new(4.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_multiply_matches_nalgebra() {
        let a = Matrix4x4::from_prs(Vec3::new(1.0, 2.0, 3.0), Quat::from_axis_angle(Vec3::UP, 0.5), Vec3::splat(1.5));
        let b = Matrix4x4::perspective(60.0, 1.5, 0.1, 100.0);
        let expected = nalgebra::Matrix4::from(a) * nalgebra::Matrix4::from(b);
        assert_relative_eq!(a * b, Matrix4x4::from(expected), epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let m = Matrix4x4::from_prs(
            Vec3::new(-3.0, 4.0, 0.5),
            Quat::from_euler(Vec3::new(0.3, 0.2, -0.9)),
            Vec3::new(2.0, 0.5, 1.25),
        );
        assert_abs_diff_eq!(m.inverted() * m, Matrix4x4::IDENTITY, epsilon = EPSILON);
        assert_abs_diff_eq!(m * m.inverted(), Matrix4x4::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_falls_back_to_identity() {
        let m = Matrix4x4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverted(), Matrix4x4::IDENTITY);
        assert_eq!(Matrix4x4::splat(2.0).inverted(), Matrix4x4::IDENTITY);
    }

    #[test]
    fn test_determinant() {
        assert_relative_eq!(Matrix4x4::IDENTITY.determinant(), 1.0);
        assert_relative_eq!(Matrix4x4::from_scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
        let r = Matrix4x4::from_rotation(Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 1.0));
        assert_relative_eq!(r.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_prs_decomposition_round_trip() {
        let position = Vec3::new(5.0, -2.0, 7.5);
        let scale = Vec3::new(0.5, 2.0, 3.0);
        for rotation in sample_rotations() {
            let m = Matrix4x4::from_prs(position, rotation, scale);
            assert_relative_eq!(m.position(), position);
            assert_relative_eq!(m.scale(), scale, epsilon = EPSILON);
            assert!(
                same_rotation(m.rotation(), rotation),
                "expected {rotation:?}, got {:?}",
                m.rotation()
            );
        }
    }

    #[test]
    fn test_from_rotation_normalizes_input() {
        let q = Quat::from_axis_angle(Vec3::UP, 1.0);
        assert_relative_eq!(
            Matrix4x4::from_rotation(q * 3.0),
            Matrix4x4::from_rotation(q),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotation_matrix_matches_quaternion() {
        let q = Quat::from_axis_angle(Vec3::new(0.3, -1.0, 0.2), 1.3);
        let v = Vec3::new(1.0, 2.0, -0.5);
        let by_matrix = Matrix4x4::from_rotation(q) * Vec4::from_vec3(v, 0.0);
        assert_abs_diff_eq!(by_matrix.xyz(), q * v, epsilon = EPSILON);
    }

    #[test]
    fn test_transposed() {
        let m = Matrix4x4::from_cols_array(std::array::from_fn(|i| i as f32));
        let t = m.transposed();
        assert_eq!(t.m1, m.m4);
        assert_eq!(t.m12, m.m3);
        assert_eq!(t.transposed(), m);
    }

    #[test]
    fn test_perspective_layout() {
        let m = Matrix4x4::perspective(90.0, 2.0, 1.0, 3.0);
        assert_relative_eq!(m.m0, 0.5, epsilon = EPSILON);
        assert_relative_eq!(m.m5, 1.0, epsilon = EPSILON);
        assert_relative_eq!(m.m10, -2.0);
        assert_eq!(m.m11, -1.0);
        assert_relative_eq!(m.m14, -3.0);
        assert_eq!(m.m15, 0.0);
    }

    #[test]
    fn test_orthographic_maps_box_to_clip_cube() {
        let m = Matrix4x4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        let corner = m * Vec4::new(2.0, 1.0, -10.0, 1.0);
        assert_relative_eq!(corner, Vec4::new(1.0, 1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 2.0, 5.0);
        let view = Matrix4x4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let p = view * Vec4::from_vec3(eye, 1.0);
        assert_abs_diff_eq!(p, Vec4::new(0.0, 0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_nalgebra_layout_is_column_major() {
        let m = Matrix4x4::from_position(Vec3::new(1.0, 2.0, 3.0));
        let n = nalgebra::Matrix4::from(m);
        assert_eq!(n[(0, 3)], 1.0);
        assert_eq!(n[(2, 3)], 3.0);
        assert_eq!(Matrix4x4::from(n), m);
    }
}
