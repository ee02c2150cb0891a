//! Rotation quaternion

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{constants, Vec3, Vec4, EPSILON};

/// Quaternion stored as `(x, y, z, w)` with `w` the scalar part.
///
/// Values are not normalized implicitly; rotation helpers such as
/// [`Quat::from_axis_angle`] produce unit quaternions, while arithmetic
/// operators act component-wise except for `Quat * Quat` (Hamilton product)
/// and `Quat * Vec3` (vector rotation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    /// X (i) component
    pub x: f32,
    /// Y (j) component
    pub y: f32,
    /// Z (k) component
    pub z: f32,
    /// Scalar component
    pub w: f32,
}

impl_approx_eq!(Quat { x, y, z, w });
impl_field_index!(Quat { 0 => x, 1 => y, 2 => z, 3 => w });

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion with every component set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Length of the 4D vector
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit quaternion, or identity when the length is degenerate
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::IDENTITY }
    }

    /// Negate the vector part
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, or identity when the squared length is degenerate
    #[must_use]
    pub fn inverse(self) -> Self {
        let len_sq = self.dot(self);
        if len_sq > EPSILON { self.conjugate() / len_sq } else { Self::IDENTITY }
    }

    /// 4D dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Raise every component to `exponent`
    #[must_use]
    pub fn powf(self, exponent: f32) -> Self {
        Self::new(
            self.x.powf(exponent),
            self.y.powf(exponent),
            self.z.powf(exponent),
            self.w.powf(exponent),
        )
    }

    /// Roll (x), pitch (y) and yaw (z) in radians.
    ///
    /// Pitch is clamped to +/- pi/2 at gimbal lock.
    #[must_use]
    pub fn to_euler(self) -> Vec3 {
        let Self { x, y, z, w } = self;

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));

        let sin_pitch = 2.0 * (w * y - z * x);
        let pitch = if sin_pitch.abs() >= 1.0 {
            constants::HALF_PI.copysign(sin_pitch)
        } else {
            sin_pitch.asin()
        };

        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vec3::new(roll, pitch, yaw)
    }

    /// Build from roll (x), pitch (y) and yaw (z) in radians
    #[must_use]
    pub fn from_euler(euler: Vec3) -> Self {
        let (sy, cy) = (euler.z * 0.5).sin_cos();
        let (sp, cp) = (euler.y * 0.5).sin_cos();
        let (sr, cr) = (euler.x * 0.5).sin_cos();

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Rotation of `angle` radians about `axis`; the axis is normalized first
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let axis = axis.normalized() * sin_half;
        Self::new(axis.x, axis.y, axis.z, cos_half)
    }

    /// Spherical interpolation along the shortest arc.
    ///
    /// Falls back to normalized linear interpolation when the inputs are
    /// nearly parallel.
    #[must_use]
    pub fn slerp(self, target: Self, amount: f32) -> Self {
        let mut target = target;
        let mut cos_theta = self.dot(target);

        if cos_theta < 0.0 {
            target = -target;
            cos_theta = -cos_theta;
        }

        if cos_theta > 0.9995 {
            return (self + (target - self) * amount).normalized();
        }

        let theta = cos_theta.acos();
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        if sin_theta.abs() < 0.001 {
            return (self * 0.5 + target * 0.5).normalized();
        }

        let ratio_a = ((1.0 - amount) * theta).sin() / sin_theta;
        let ratio_b = (amount * theta).sin() / sin_theta;

        (self * ratio_a + target * ratio_b).normalized()
    }
}

impl Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quat {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Add<f32> for Quat {
    type Output = Self;
    fn add(self, rhs: f32) -> Self {
        self + Self::splat(rhs)
    }
}

impl Sub<f32> for Quat {
    type Output = Self;
    fn sub(self, rhs: f32) -> Self {
        self - Self::splat(rhs)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Quat> for f32 {
    type Output = Quat;
    fn mul(self, rhs: Quat) -> Quat {
        rhs * self
    }
}

impl Div<f32> for Quat {
    type Output = Self;

    /// Division by a near-zero scalar yields the identity.
    fn div(self, rhs: f32) -> Self {
        if rhs.abs() < EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl Mul for Quat {
    type Output = Self;
    fn mul(self, q: Self) -> Self {
        let Self { x, y, z, w } = self;
        Self::new(
            w * q.x + x * q.w + y * q.z - z * q.y,
            w * q.y - x * q.z + y * q.w + z * q.x,
            w * q.z + x * q.y - y * q.x + z * q.w,
            w * q.w - x * q.x - y * q.y - z * q.z,
        )
    }
}

/// Rotate a vector: `q * (v, 0) * conj(q)`.
impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        let r = self * Self::new(v.x, v.y, v.z, 0.0) * self.conjugate();
        Vec3::new(r.x, r.y, r.z)
    }
}

impl AddAssign for Quat {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quat {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Quat {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Quat {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl From<Vec4> for Quat {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quat> for Vec4 {
    fn from(q: Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<nalgebra::Quaternion<f32>> for Quat {
    fn from(q: nalgebra::Quaternion<f32>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

impl From<Quat> for nalgebra::Quaternion<f32> {
    fn from(q: Quat) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::UnitQuaternion<f32>> for Quat {
    fn from(q: nalgebra::UnitQuaternion<f32>) -> Self {
        q.into_inner().into()
    }
}

impl From<Quat> for nalgebra::UnitQuaternion<f32> {
    fn from(q: Quat) -> Self {
        Self::new_normalize(q.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_axis_angle_rotates_vector() {
        let q = Quat::from_axis_angle(Vec3::UP, constants::HALF_PI);
        let v = q * Vec3::RIGHT;
        assert_abs_diff_eq!(v, Vec3::BACK, epsilon = EPSILON);
    }

    #[test]
    fn test_axis_is_normalized() {
        let a = Quat::from_axis_angle(Vec3::new(0.0, 5.0, 0.0), 1.0);
        let b = Quat::from_axis_angle(Vec3::UP, 1.0);
        assert_relative_eq!(a, b, epsilon = EPSILON);
        assert_relative_eq!(a.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_hamilton_product_composes_rotations() {
        let a = Quat::from_axis_angle(Vec3::UP, 0.3);
        let b = Quat::from_axis_angle(Vec3::UP, 0.5);
        assert_relative_eq!(a * b, Quat::from_axis_angle(Vec3::UP, 0.8), epsilon = EPSILON);
        assert_relative_eq!(Quat::IDENTITY * a, a);
    }

    #[test]
    fn test_degenerate_fallbacks() {
        assert_eq!(Quat::splat(0.0).normalized(), Quat::IDENTITY);
        assert_eq!(Quat::splat(1e-4).inverse(), Quat::IDENTITY);
        assert_eq!(Quat::new(1.0, 2.0, 3.0, 4.0) / 0.0, Quat::IDENTITY);
    }

    #[test]
    fn test_inverse_cancels() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 1.2) * 2.0;
        assert_abs_diff_eq!(q * q.inverse(), Quat::IDENTITY, epsilon = EPSILON);
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(0.3, -0.4, 1.1);
        let q = Quat::from_euler(euler);
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(q.to_euler(), euler, epsilon = EPSILON);
    }

    #[test]
    fn test_euler_gimbal_lock_clamps_pitch() {
        let q = Quat::from_axis_angle(Vec3::UP, constants::HALF_PI);
        assert_relative_eq!(q.to_euler().y, constants::HALF_PI, epsilon = 1e-3);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quat::from_axis_angle(Vec3::UP, 0.2);
        let b = Quat::from_axis_angle(Vec3::RIGHT, 1.4);
        assert_abs_diff_eq!(a.slerp(b, 0.0), a, epsilon = EPSILON);
        assert_abs_diff_eq!(a.slerp(b, 1.0), b, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_to_self_is_self() {
        let a = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_abs_diff_eq!(a.slerp(a, t), a, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        let a = Quat::IDENTITY;
        let b = -Quat::from_axis_angle(Vec3::UP, 0.5);
        let mid = a.slerp(b, 0.5);
        let expected = Quat::from_axis_angle(Vec3::UP, 0.25);
        assert_abs_diff_eq!(mid, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_slerp_halfway() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::FORWARD, 2.0);
        let mid = a.slerp(b, 0.5);
        assert_abs_diff_eq!(mid, Quat::from_axis_angle(Vec3::FORWARD, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_nalgebra_agrees_on_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(0.2, 1.0, -0.5), 0.9);
        let n: nalgebra::UnitQuaternion<f32> = q.into();
        let rotated = n * nalgebra::Vector3::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(q * Vec3::new(1.0, 2.0, 3.0), Vec3::from(rotated), epsilon = EPSILON);
    }
}
