//! Rendering.
//!
//! Drawables are replayed against a [Surface] in order, so later drawables paint over earlier
//! ones. [canvas::Canvas] is an in-memory surface.

pub mod canvas;

use crate::data::{Color, Drawable, Path2D, Tool};
use crate::eval::{flatten, EvalError, TextProvider};
use crate::scene::Scene;
use failure::Error;
use std::sync::Arc;

/// Something that can be painted on.
///
/// Paths are in surface coordinates. Each call paints on top of everything painted before it.
pub trait Surface {
    /// Outlines `path` with a pen of the given color and width.
    fn stroke(&mut self, color: Color, width: f32, path: &Path2D) -> Result<(), Error>;

    /// Fills the interior of `path` with the given color.
    fn fill(&mut self, color: Color, path: &Path2D) -> Result<(), Error>;
}

impl<'a, S: Surface + ?Sized> Surface for &'a mut S {
    fn stroke(&mut self, color: Color, width: f32, path: &Path2D) -> Result<(), Error> {
        (**self).stroke(color, width, path)
    }

    fn fill(&mut self, color: Color, path: &Path2D) -> Result<(), Error> {
        (**self).fill(color, path)
    }
}

/// A drawing error.
#[derive(Fail, Debug, Clone)]
pub enum DrawError {
    /// The scene could not be flattened. Nothing was painted.
    #[fail(display = "{}", _0)]
    Eval(#[cause] EvalError),

    /// The surface rejected a paint operation. Operations before it stay painted.
    #[fail(display = "surface error: {}", _0)]
    Surface(Arc<Error>),
}

impl From<EvalError> for DrawError {
    fn from(err: EvalError) -> DrawError {
        DrawError::Eval(err)
    }
}

/// Paints all drawables in order. Stops at the first surface error.
pub fn paint<S: Surface + ?Sized>(drawables: &[Drawable], surface: &mut S) -> Result<(), DrawError> {
    for (i, drawable) in drawables.iter().enumerate() {
        let result = match drawable.tool {
            Tool::Stroke { color, width } => surface.stroke(color, width, &drawable.path),
            Tool::Fill { color } => surface.fill(color, &drawable.path),
        };
        if let Err(err) = result {
            debug!("surface failed at drawable {} of {}", i, drawables.len());
            return Err(DrawError::Surface(Arc::new(err)));
        }
    }
    debug!("painted {} drawable(s)", drawables.len());
    Ok(())
}

/// Flattens `tree` and paints the result.
///
/// The tree is flattened completely before anything is painted, so evaluation errors leave the
/// surface untouched.
pub fn draw_tree<S, T>(tree: &Scene, surface: &mut S, text: &T) -> Result<(), DrawError>
where
    S: Surface + ?Sized,
    T: TextProvider + ?Sized,
{
    let drawables = flatten(tree, text)?;
    paint(&drawables, surface)
}
