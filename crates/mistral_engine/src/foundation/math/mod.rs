//! Math utilities and types
//!
//! Plain `Copy` value types for 3D graphics: vectors, a quaternion, a
//! column-major 4x4 matrix and RGB/RGBA colors. Every type converts to and
//! from its `nalgebra` counterpart so code at the renderer boundary can hand
//! data over without reshuffling fields.

/// Component-wise arithmetic against `Self` and against scalars.
macro_rules! impl_elementwise_ops {
    ($ty:ident { $($f:ident),+ }) => {
        impl_elementwise_ops!(@binary $ty { $($f),+ } Add add AddAssign add_assign +);
        impl_elementwise_ops!(@binary $ty { $($f),+ } Sub sub SubAssign sub_assign -);
        impl_elementwise_ops!(@binary $ty { $($f),+ } Mul mul MulAssign mul_assign *);
        impl_elementwise_ops!(@binary $ty { $($f),+ } Div div DivAssign div_assign /);

        impl std::ops::Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }
    };
    (@binary $ty:ident { $($f:ident),+ } $tr:ident $m:ident $tra:ident $ma:ident $op:tt) => {
        impl std::ops::$tr for $ty {
            type Output = Self;
            fn $m(self, rhs: Self) -> Self {
                Self { $($f: self.$f $op rhs.$f),+ }
            }
        }

        impl std::ops::$tr<f32> for $ty {
            type Output = Self;
            fn $m(self, rhs: f32) -> Self {
                Self { $($f: self.$f $op rhs),+ }
            }
        }

        impl std::ops::$tr<$ty> for f32 {
            type Output = $ty;
            fn $m(self, rhs: $ty) -> $ty {
                $ty { $($f: self $op rhs.$f),+ }
            }
        }

        impl std::ops::$tra for $ty {
            fn $ma(&mut self, rhs: Self) {
                *self = std::ops::$tr::$m(*self, rhs);
            }
        }

        impl std::ops::$tra<f32> for $ty {
            fn $ma(&mut self, rhs: f32) {
                *self = std::ops::$tr::$m(*self, rhs);
            }
        }
    };
}

/// `approx` comparisons that test every field.
macro_rules! impl_approx_eq {
    ($ty:ident { $($f:ident),+ }) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $(approx::AbsDiffEq::abs_diff_eq(&self.$f, &other.$f, epsilon))&&+
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $(approx::RelativeEq::relative_eq(&self.$f, &other.$f, epsilon, max_relative))&&+
            }
        }
    };
}

/// `Index`/`IndexMut` over the named fields in declaration order.
macro_rules! impl_field_index {
    ($ty:ident { $($idx:literal => $f:ident),+ }) => {
        impl std::ops::Index<usize> for $ty {
            type Output = f32;
            fn index(&self, index: usize) -> &f32 {
                match index {
                    $($idx => &self.$f,)+
                    _ => panic!("{} index out of range: {index}", stringify!($ty)),
                }
            }
        }

        impl std::ops::IndexMut<usize> for $ty {
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                match index {
                    $($idx => &mut self.$f,)+
                    _ => panic!("{} index out of range: {index}", stringify!($ty)),
                }
            }
        }
    };
}

mod color;
mod matrix;
mod quaternion;
mod vector;

pub use color::{Color3, Color4};
pub use matrix::Matrix4x4;
pub use quaternion::Quat;
pub use vector::{Vec2, Vec3, Vec4};

/// Lengths at or below this are treated as zero by normalization and inversion.
pub const EPSILON: f32 = 1e-6;

/// Mathematical constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    #[must_use]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    #[must_use]
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    #[must_use]
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    #[must_use]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
