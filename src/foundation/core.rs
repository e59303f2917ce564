use std::ops::{Add, AddAssign, Mul, Sub};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Three-channel color. Linear-light or gamma-encoded depending on pipeline stage.
///
/// Values are not assumed to lie in `[0, 1]`; stages clamp only where they need to.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::splat(0.0);
    pub const WHITE: Self = Self::splat(1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    #[inline]
    pub fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    /// Component-wise `max(c, 0)`. Required before any fractional power.
    #[inline]
    pub fn max_zero(self) -> Self {
        self.map(|c| c.max(0.0))
    }

    pub fn max_component(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Rgb {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Mul for Rgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a * b)
    }
}

impl Mul<f32> for Rgb {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map(|a| a * rhs)
    }
}

/// Weights for the four horizontal taps at texel offsets `{-1, 0, 1, 2}`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Weights4(pub [f32; 4]);

impl Weights4 {
    /// Passthrough of tap 0 (the texel at or left of the sample point).
    pub const PASSTHROUGH: Self = Self([0.0, 1.0, 0.0, 0.0]);

    pub fn sum(self) -> f32 {
        self.0.iter().sum()
    }

    /// Divide by the weight sum so the taps neither gain nor lose energy.
    pub fn normalized(self) -> Self {
        let sum = self.sum();
        Self(self.0.map(|w| w / sum))
    }

    /// Weighted sum of four colors.
    pub fn apply(self, colors: &[Rgb; 4]) -> Rgb {
        colors
            .iter()
            .zip(self.0)
            .fold(Rgb::BLACK, |acc, (&c, w)| acc + c * w)
    }

    /// Whether the outer taps (`-1` and `2`) carry any weight.
    pub fn uses_outer_taps(self) -> bool {
        self.0[0] != 0.0 || self.0[3] != 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
