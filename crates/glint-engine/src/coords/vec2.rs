use core::ops::{Add, Div, Mul, Sub};

/// 2D vector in clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Broadcasts a scalar into both components.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the vector counter-clockwise around the origin.
    ///
    /// `angle` is in radians.
    #[inline]
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// Wraps an angle in radians into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let tau = 2.0 * std::f32::consts::PI;
    let a = angle % tau;
    if a < 0.0 { a + tau } else { a }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn rotated_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(close(v, Vec2::new(0.0, 1.0)), "{v:?}");
    }

    #[test]
    fn rotated_zero_is_identity() {
        let v = Vec2::new(0.3, -0.7);
        assert!(close(v.rotated(0.0), v));
    }

    #[test]
    fn normalize_angle_wraps_negative() {
        let a = normalize_angle(-FRAC_PI_2);
        assert!((a - 1.5 * PI).abs() < 1e-5, "{a}");
    }

    #[test]
    fn normalize_angle_wraps_above_tau() {
        let a = normalize_angle(2.0 * PI + 0.25);
        assert!((a - 0.25).abs() < 1e-5, "{a}");
    }

    #[test]
    fn splat_fills_both_components() {
        assert_eq!(Vec2::splat(-0.8), Vec2::new(-0.8, -0.8));
    }
}
