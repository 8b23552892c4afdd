//! Vector path and scene algebra.
//!
//! Paths are written as [Instruction](data::Instruction) trees and compiled with
//! [construct](eval::construct). Painted geometry is arranged in a [Scene](scene::Scene), which
//! [flatten](eval::flatten) turns into an ordered list of drawables and
//! [draw_tree](render::draw_tree) replays against a [Surface](render::Surface).

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod data;
pub mod eval;
pub mod render;
pub mod scene;
