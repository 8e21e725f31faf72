//! Color math for light elements
//!
//! Colors are linear RGB with f32 channels in [0, 1]. `Shade` adds a
//! straight alpha and is the unit of layer compositing: a layer produces a
//! shade, the stack paints it over the accumulated base color.

use serde::{Deserialize, Serialize};

/// A linear RGB color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// Create a color from channel values
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Linear interpolation toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Scale all channels by a factor
    pub fn scale(self, f: f32) -> Color {
        Color::new(self.r * f, self.g * f, self.b * f)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// A color with straight alpha, the output of one style layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shade {
    pub color: Color,
    pub alpha: f32,
}

impl Shade {
    /// Fully transparent shade (contributes nothing when composited)
    pub const TRANSPARENT: Shade = Shade {
        color: Color::BLACK,
        alpha: 0.0,
    };

    /// Create a fully opaque shade
    pub const fn opaque(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    /// Create a shade with an explicit alpha
    pub const fn with_alpha(color: Color, alpha: f32) -> Self {
        Self { color, alpha }
    }

    /// Paint this shade over an opaque base color
    pub fn over(self, base: Color) -> Color {
        base.lerp(self.color, self.alpha)
    }

    /// Componentwise interpolation toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Shade, t: f32) -> Shade {
        Shade {
            color: self.color.lerp(other.color, t),
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }
}

impl Default for Shade {
    fn default() -> Self {
        Shade::TRANSPARENT
    }
}

impl From<Color> for Shade {
    fn from(color: Color) -> Self {
        Shade::opaque(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let c = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(c, Color::gray(0.5));

        assert_eq!(Color::RED.lerp(Color::BLUE, 0.0), Color::RED);
        assert_eq!(Color::RED.lerp(Color::BLUE, 1.0), Color::BLUE);
    }

    #[test]
    fn test_shade_over() {
        let base = Color::RED;

        // Opaque shade fully replaces the base
        assert_eq!(Shade::opaque(Color::BLUE).over(base), Color::BLUE);

        // Transparent shade leaves the base untouched
        assert_eq!(Shade::TRANSPARENT.over(base), base);

        // Half alpha blends halfway
        let half = Shade::with_alpha(Color::WHITE, 0.5).over(Color::BLACK);
        assert_eq!(half, Color::gray(0.5));
    }

    #[test]
    fn test_shade_lerp() {
        let a = Shade::opaque(Color::BLACK);
        let b = Shade::TRANSPARENT;
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid.alpha, 0.5);
    }
}
