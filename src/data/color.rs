//! Colors.

/// A straight-alpha RGBA color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const CLEAR: Color = Color::rgba(0., 0., 0., 0.);

    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0., 0., 0.);

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(1., 1., 1.);

    pub const RED: Color = Color::rgb(1., 0., 0.);
    pub const GREEN: Color = Color::rgb(0., 1., 0.);
    pub const BLUE: Color = Color::rgb(0., 0., 1.);

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1. }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Returns this color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Color {
        Color { a, ..self }
    }

    /// Converts straight alpha to premultiplied alpha.
    pub fn to_premultiplied_alpha(self) -> Color {
        Color {
            r: self.r * self.a,
            g: self.g * self.a,
            b: self.b * self.a,
            a: self.a,
        }
    }

    /// Converts premultiplied alpha to straight alpha.
    pub fn to_straight_alpha(self) -> Color {
        if self.a == 0. {
            Color::CLEAR
        } else {
            Color {
                r: self.r / self.a,
                g: self.g / self.a,
                b: self.b / self.a,
                a: self.a,
            }
        }
    }

    /// Composites `self` over `dest` (both straight alpha).
    pub fn over(self, dest: Color) -> Color {
        let src = self.to_premultiplied_alpha();
        let dst = dest.to_premultiplied_alpha();
        let inv = 1. - src.a;
        Color {
            r: src.r + dst.r * inv,
            g: src.g + dst.g * inv,
            b: src.b + dst.b * inv,
            a: src.a + dst.a * inv,
        }
        .to_straight_alpha()
    }

    /// Quantizes to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.max(0.).min(1.) * 255.).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from(i: (f32, f32, f32, f32)) -> Color {
        Color::rgba(i.0, i.1, i.2, i.3)
    }
}

impl From<[f32; 4]> for Color {
    fn from(i: [f32; 4]) -> Color {
        Color::rgba(i[0], i[1], i[2], i[3])
    }
}

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
