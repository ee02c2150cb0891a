//! 2D, 3D and 4D float vectors

use serde::{Deserialize, Serialize};

use super::EPSILON;

/// 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

/// 4D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl_elementwise_ops!(Vec2 { x, y });
impl_elementwise_ops!(Vec3 { x, y, z });
impl_elementwise_ops!(Vec4 { x, y, z, w });

impl_approx_eq!(Vec2 { x, y });
impl_approx_eq!(Vec3 { x, y, z });
impl_approx_eq!(Vec4 { x, y, z, w });

impl_field_index!(Vec2 { 0 => x, 1 => y });
impl_field_index!(Vec3 { 0 => x, 1 => y, 2 => z });
impl_field_index!(Vec4 { 0 => x, 1 => y, 2 => z, 3 => w });

impl Vec2 {
    /// (0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// (1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// (0, 1)
    pub const UP: Self = Self::new(0.0, 1.0);
    /// (0, -1)
    pub const DOWN: Self = Self::new(0.0, -1.0);
    /// (-1, 0)
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    /// (1, 0)
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with every component set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction, or zero for a degenerate vector
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::ZERO }
    }

    /// Clamp every component into `[min, max]`
    #[must_use]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }

    /// Linear interpolation towards `target`
    #[must_use]
    pub fn lerp(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
    }

    /// Raise every component to `exponent`
    #[must_use]
    pub fn powf(self, exponent: f32) -> Self {
        Self::new(self.x.powf(exponent), self.y.powf(exponent))
    }

    /// Raise every component to the matching component of `exponent`
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        Self::new(self.x.powf(exponent.x), self.y.powf(exponent.y))
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Vec3 {
    /// (0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// (1, 1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// (0, 1, 0)
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// (0, -1, 0)
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// (-1, 0, 0)
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// (1, 0, 0)
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// (0, 0, 1)
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    /// (0, 0, -1)
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with every component set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Unit vector in the same direction, or zero for a degenerate vector
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::ZERO }
    }

    /// Clamp every component into `[min, max]`
    #[must_use]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max), self.z.clamp(min, max))
    }

    /// Linear interpolation towards `target`
    #[must_use]
    pub fn lerp(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
    }

    /// Raise every component to `exponent`
    #[must_use]
    pub fn powf(self, exponent: f32) -> Self {
        Self::new(self.x.powf(exponent), self.y.powf(exponent), self.z.powf(exponent))
    }

    /// Raise every component to the matching component of `exponent`
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        Self::new(
            self.x.powf(exponent.x),
            self.y.powf(exponent.y),
            self.z.powf(exponent.z),
        )
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unsigned angle to `other` in radians.
    ///
    /// Returns 0 when either vector is degenerate.
    #[must_use]
    pub fn angle(self, other: Self) -> f32 {
        let len1 = self.length();
        let len2 = other.length();
        if len1 < EPSILON || len2 < EPSILON {
            return 0.0;
        }
        (self.dot(other) / (len1 * len2)).clamp(-1.0, 1.0).acos()
    }

    /// Distance to `other`
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Squared distance to `other`
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    /// Reflect about a plane with the given (unit) normal
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        self - 2.0 * self.dot(normal) * normal
    }
}

impl Vec4 {
    /// (0, 0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// (1, 1, 1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a new vector
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a vector with every component set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Extend a 3D vector with a `w` component
    #[must_use]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drop the `w` component
    #[must_use]
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Euclidean length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Unit vector in the same direction, or zero for a degenerate vector
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::ZERO }
    }

    /// Clamp every component into `[min, max]`
    #[must_use]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(
            self.x.clamp(min, max),
            self.y.clamp(min, max),
            self.z.clamp(min, max),
            self.w.clamp(min, max),
        )
    }

    /// Linear interpolation towards `target`
    #[must_use]
    pub fn lerp(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
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

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl From<Vec2> for Vec3 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}

impl From<Vec3> for Vec2 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v, 0.0)
    }
}

impl From<Vec4> for Vec3 {
    fn from(v: Vec4) -> Self {
        v.xyz()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<nalgebra::Vector2<f32>> for Vec2 {
    fn from(v: nalgebra::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec2> for nalgebra::Vector2<f32> {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<nalgebra::Vector3<f32>> for Vec3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for nalgebra::Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector4<f32>> for Vec4 {
    fn from(v: nalgebra::Vector4<f32>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vec4> for nalgebra::Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic_both_operand_orders() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v + Vec3::ONE, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(v * 2.0, 2.0 * v);
        assert_eq!(v / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(-v, Vec3::new(-1.0, -2.0, -3.0));

        let mut w = v;
        w *= Vec3::new(2.0, 0.0, -1.0);
        assert_eq!(w, Vec3::new(2.0, 0.0, -3.0));
    }

    #[test]
    fn test_normalized_degenerate_is_zero() {
        assert_eq!(Vec3::splat(1e-8).normalized(), Vec3::ZERO);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert_relative_eq!(Vec3::new(3.0, 0.0, 4.0).normalized().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vec3::RIGHT.cross(Vec3::UP), Vec3::FORWARD);
    }

    #[test]
    fn test_angle() {
        assert_relative_eq!(Vec3::RIGHT.angle(Vec3::UP), std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(Vec3::RIGHT.angle(Vec3::LEFT), std::f32::consts::PI);
        assert_eq!(Vec3::ZERO.angle(Vec3::UP), 0.0);
    }

    #[test]
    fn test_reflect_and_distance() {
        let r = Vec3::new(1.0, -1.0, 0.0).reflect(Vec3::UP);
        assert_relative_eq!(r, Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(Vec3::ZERO.distance(Vec3::new(0.0, 3.0, 4.0)), 5.0);
        assert_relative_eq!(Vec3::ZERO.distance_squared(Vec3::new(0.0, 3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_indexing() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        v[3] = 8.0;
        assert_eq!(v[0] + v[3], 9.0);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_out_of_range_panics() {
        let v = Vec2::ONE;
        let _ = v[2];
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let n: nalgebra::Vector3<f32> = v.into();
        assert_eq!(Vec3::from(n), v);
    }
}
