//! Compilation of instructions to paths and of scenes to drawables.

mod construct;
mod flatten;

pub use self::construct::*;
pub use self::flatten::*;

use crate::data::{GeometryError, Path2D, TextOptions};
use failure::Error;
use std::sync::Arc;

/// An evaluation error.
#[derive(Fail, Debug, Clone)]
pub enum EvalError {
    /// A primitive could not be converted to a path.
    #[fail(display = "invalid geometry: {}", _0)]
    Geometry(#[cause] GeometryError),

    /// The text provider failed. The provider's error is kept as is.
    #[fail(display = "text provider error: {}", _0)]
    Text(Arc<Error>),
}

impl From<GeometryError> for EvalError {
    fn from(err: GeometryError) -> EvalError {
        EvalError::Geometry(err)
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Turns strings into glyph outlines.
///
/// Font lookup, measurement and shaping all happen behind this trait; outlines are returned in
/// the same coordinate space as primitive geometry.
pub trait TextProvider {
    /// Returns the outlines of `text` laid out with `options`.
    fn outlines(&self, text: &str, options: &TextOptions) -> Result<Path2D, Error>;

    /// Returns the outlines of `text` laid out along `path`.
    fn outlines_along(
        &self,
        text: &str,
        path: &Path2D,
        options: &TextOptions,
    ) -> Result<Path2D, Error>;
}

/// Returned by [NoText] for every request.
#[derive(Fail, Debug, Clone, PartialEq)]
#[fail(display = "no text provider available for {:?}", _0)]
pub struct TextUnavailable(pub String);

/// A text provider for scenes without text. Fails on every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoText;

impl TextProvider for NoText {
    fn outlines(&self, text: &str, _: &TextOptions) -> Result<Path2D, Error> {
        Err(TextUnavailable(text.into()).into())
    }

    fn outlines_along(&self, text: &str, _: &Path2D, _: &TextOptions) -> Result<Path2D, Error> {
        Err(TextUnavailable(text.into()).into())
    }
}

impl<'a, T: TextProvider + ?Sized> TextProvider for &'a T {
    fn outlines(&self, text: &str, options: &TextOptions) -> Result<Path2D, Error> {
        (**self).outlines(text, options)
    }

    fn outlines_along(
        &self,
        text: &str,
        path: &Path2D,
        options: &TextOptions,
    ) -> Result<Path2D, Error> {
        (**self).outlines_along(text, path, options)
    }
}
