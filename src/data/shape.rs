use crate::data::Color;

/// How a piece of geometry is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tool {
    /// Outline the geometry with a pen of the given width.
    Stroke { color: Color, width: f32 },

    /// Fill the interior of the geometry.
    Fill { color: Color },
}

impl Tool {
    pub fn stroke(color: Color, width: f32) -> Tool {
        Tool::Stroke { color, width }
    }

    pub fn fill(color: Color) -> Tool {
        Tool::Fill { color }
    }

    pub fn color(&self) -> Color {
        match self {
            Tool::Stroke { color, .. } | Tool::Fill { color } => *color,
        }
    }
}
