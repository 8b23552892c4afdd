//! Data types and definitions.

mod builder;
mod color;
mod drawable;
mod instruction;
mod path;
mod primitive;
mod shape;
mod text;
mod transform;

pub use self::builder::*;
pub use self::color::*;
pub use self::drawable::*;
pub use self::instruction::*;
pub use self::path::*;
pub use self::primitive::*;
pub use self::shape::*;
pub use self::text::*;
pub use self::transform::*;
