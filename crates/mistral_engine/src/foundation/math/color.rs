//! Floating-point RGB and RGBA colors

use serde::{Deserialize, Serialize};

use super::{Vec3, Vec4, EPSILON};

/// RGB color with channels nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color3 {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

/// RGBA color with channels nominally in `[0, 1]`.
///
/// Arithmetic against another `Color4` touches all four channels; arithmetic
/// against a scalar leaves alpha untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl_elementwise_ops!(Color3 { r, g, b });
impl_approx_eq!(Color3 { r, g, b });
impl_approx_eq!(Color4 { r, g, b, a });
impl_field_index!(Color3 { 0 => r, 1 => g, 2 => b });
impl_field_index!(Color4 { 0 => r, 1 => g, 2 => b, 3 => a });

fn byte_to_unit(value: u8) -> f32 {
    f32::from(value) / 255.0
}

// Truncates like the renderer does: 0.999 maps to 254.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

impl Color3 {
    /// Create a new color
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 0-255 channels
    #[must_use]
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(byte_to_unit(r), byte_to_unit(g), byte_to_unit(b))
    }

    /// Gray level `value` on every channel
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Length of the RGB vector
    #[must_use]
    pub fn length(self) -> f32 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }

    /// Unit-length color, or black for a degenerate one
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::splat(0.0) }
    }

    /// Clamp every channel into `[min, max]`
    #[must_use]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(self.r.clamp(min, max), self.g.clamp(min, max), self.b.clamp(min, max))
    }

    /// Linear interpolation towards `target`
    #[must_use]
    pub fn lerp(self, target: Self, amount: f32) -> Self {
        self + (target - self) * amount
    }

    /// Raise every channel to `exponent`
    #[must_use]
    pub fn powf(self, exponent: f32) -> Self {
        Self::new(self.r.powf(exponent), self.g.powf(exponent), self.b.powf(exponent))
    }

    /// Convert hue, saturation and value (all in `[0, 1]`) to RGB
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn hsv(h: f32, s: f32, v: f32) -> Self {
        if s == 0.0 {
            return Self::splat(v);
        }

        let scaled = h * 6.0;
        let sector = scaled.floor();
        let f = scaled - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as i32 {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }

    /// [`Color3::hsv`] with 0-255 inputs
    #[must_use]
    pub fn hsv_bytes(h: u8, s: u8, v: u8) -> Self {
        Self::hsv(byte_to_unit(h), byte_to_unit(s), byte_to_unit(v))
    }

    /// Extend with an alpha channel
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Color4 {
        Color4::new(self.r, self.g, self.b, a)
    }

    /// 8-bit RGBA for the renderer, fully opaque
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [unit_to_byte(self.r), unit_to_byte(self.g), unit_to_byte(self.b), 255]
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color4 {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Yellow
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    /// Magenta
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);
    /// Cyan
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0, 1.0);
    /// 50% gray
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    /// 75% gray
    pub const LIGHT_GRAY: Self = Self::new(0.75, 0.75, 0.75, 1.0);
    /// 25% gray
    pub const DARK_GRAY: Self = Self::new(0.25, 0.25, 0.25, 1.0);
    /// Orange
    pub const ORANGE: Self = Self::new(1.0, 0.5, 0.0, 1.0);
    /// Purple
    pub const PURPLE: Self = Self::new(0.5, 0.0, 0.5, 1.0);
    /// Brown
    pub const BROWN: Self = Self::new(0.6, 0.4, 0.2, 1.0);
    /// Pink
    pub const PINK: Self = Self::new(1.0, 0.75, 0.8, 1.0);
    /// Lime
    pub const LIME: Self = Self::new(0.75, 1.0, 0.0, 1.0);
    /// Sky blue
    pub const SKY_BLUE: Self = Self::new(0.53, 0.81, 0.92, 1.0);
    /// The off-white the default pipeline clears to (245, 245, 245)
    pub const RAY_WHITE: Self = Self::new(245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0, 1.0);

    /// Create a new color
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 0-255 channels
    #[must_use]
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(byte_to_unit(r), byte_to_unit(g), byte_to_unit(b), byte_to_unit(a))
    }

    /// Opaque gray level `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, 1.0)
    }

    /// Gray level `value` with the given alpha
    #[must_use]
    pub const fn grey(value: f32, alpha: f32) -> Self {
        Self::new(value, value, value, alpha)
    }

    /// Copy with a different alpha
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Drop the alpha channel
    #[must_use]
    pub const fn rgb(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }

    /// Length of the RGBA vector
    #[must_use]
    pub fn length(self) -> f32 {
        (self.r * self.r + self.g * self.g + self.b * self.b + self.a * self.a).sqrt()
    }

    /// Divides the color channels by the RGBA length; alpha is kept.
    ///
    /// Degenerate input yields opaque black.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > EPSILON { self / len } else { Self::splat(0.0) }
    }

    /// Clamp every channel, alpha included, into `[min, max]`
    #[must_use]
    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(
            self.r.clamp(min, max),
            self.g.clamp(min, max),
            self.b.clamp(min, max),
            self.a.clamp(min, max),
        )
    }

    /// Linear interpolation of all four channels
    #[must_use]
    pub fn lerp(self, target: Self, amount: f32) -> Self {
        Self::new(
            self.r + (target.r - self.r) * amount,
            self.g + (target.g - self.g) * amount,
            self.b + (target.b - self.b) * amount,
            self.a + (target.a - self.a) * amount,
        )
    }

    /// HSV plus alpha, all in `[0, 1]`
    #[must_use]
    pub fn hsva(h: f32, s: f32, v: f32, a: f32) -> Self {
        Color3::hsv(h, s, v).with_alpha(a)
    }

    /// [`Color4::hsva`] with 0-255 inputs
    #[must_use]
    pub fn hsva_bytes(h: u8, s: u8, v: u8, a: u8) -> Self {
        Self::hsva(byte_to_unit(h), byte_to_unit(s), byte_to_unit(v), byte_to_unit(a))
    }

    /// Pack as `R | G << 8 | B << 16 | A << 24` after clamping to `[0, 1]`
    #[must_use]
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.to_rgba8())
    }

    /// Inverse of [`Color4::to_u32`]
    #[must_use]
    pub fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self::from_bytes(r, g, b, a)
    }

    /// 8-bit RGBA for the renderer
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [unit_to_byte(self.r), unit_to_byte(self.g), unit_to_byte(self.b), unit_to_byte(self.a)]
    }
}

macro_rules! impl_color4_op {
    ($tr:ident $m:ident $tra:ident $ma:ident $op:tt) => {
        impl std::ops::$tr for Color4 {
            type Output = Self;
            fn $m(self, rhs: Self) -> Self {
                Self::new(self.r $op rhs.r, self.g $op rhs.g, self.b $op rhs.b, self.a $op rhs.a)
            }
        }

        impl std::ops::$tr<f32> for Color4 {
            type Output = Self;
            fn $m(self, rhs: f32) -> Self {
                Self::new(self.r $op rhs, self.g $op rhs, self.b $op rhs, self.a)
            }
        }

        impl std::ops::$tr<Color4> for f32 {
            type Output = Color4;
            fn $m(self, rhs: Color4) -> Color4 {
                Color4::new(self $op rhs.r, self $op rhs.g, self $op rhs.b, rhs.a)
            }
        }

        impl std::ops::$tra for Color4 {
            fn $ma(&mut self, rhs: Self) {
                *self = std::ops::$tr::$m(*self, rhs);
            }
        }

        impl std::ops::$tra<f32> for Color4 {
            fn $ma(&mut self, rhs: f32) {
                *self = std::ops::$tr::$m(*self, rhs);
            }
        }
    };
}

impl_color4_op!(Add add AddAssign add_assign +);
impl_color4_op!(Sub sub SubAssign sub_assign -);
impl_color4_op!(Mul mul MulAssign mul_assign *);
impl_color4_op!(Div div DivAssign div_assign /);

impl From<Color4> for Color3 {
    fn from(c: Color4) -> Self {
        c.rgb()
    }
}

impl From<Color3> for Color4 {
    fn from(c: Color3) -> Self {
        c.with_alpha(1.0)
    }
}

impl From<Vec3> for Color3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Color3> for Vec3 {
    fn from(c: Color3) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl From<Vec4> for Color4 {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color4> for Vec4 {
    fn from(c: Color4) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

impl From<[u8; 4]> for Color4 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_bytes(r, g, b, a)
    }
}

impl From<Color4> for [u8; 4] {
    fn from(c: Color4) -> Self {
        c.to_rgba8()
    }
}
