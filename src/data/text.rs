use lyon::math::Point;

/// Horizontal text alignment relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Layout options handed to the [TextProvider](crate::eval::TextProvider).
///
/// Font lookup and measurement are the provider's business; these are only passed through.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Font family name.
    pub family: String,

    /// Font size in output units.
    pub size: f32,

    /// Baseline origin of the first line, or the offset along the path for text on a path.
    pub origin: Point,

    pub align: TextAlign,

    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
}

impl TextOptions {
    pub fn new<S: Into<String>>(family: S, size: f32) -> TextOptions {
        TextOptions {
            family: family.into(),
            size,
            origin: Point::new(0., 0.),
            align: TextAlign::Start,
            line_spacing: 1.2,
        }
    }

    pub fn at(mut self, origin: Point) -> TextOptions {
        self.origin = origin;
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> TextOptions {
        self.align = align;
        self
    }
}
