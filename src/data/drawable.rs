use crate::data::{Path2D, Tool};

/// One paint operation: geometry in final coordinates and the tool to paint it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub tool: Tool,
    pub path: Path2D,
}

impl Drawable {
    pub fn new(tool: Tool, path: Path2D) -> Drawable {
        Drawable { tool, path }
    }
}
