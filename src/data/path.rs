use crate::data::Affine;
use lyon::math::Point;
use lyon::path::iterator::PathIterator;
use lyon::path::{Path, PathEvent};
use std::mem;

/// Tolerance used when curves are flattened or tessellated.
pub const CURVE_TOLERANCE: f32 = 0.1;

/// Degenerate geometry rejected at construction.
#[derive(Fail, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate, radius or angle was NaN or infinite.
    #[fail(display = "non-finite value in {}", what)]
    NonFinite { what: &'static str },

    /// A polyline needs at least two points.
    #[fail(display = "polyline has {} point(s), needs at least 2", _0)]
    ShortPolyline(usize),

    /// An arc or ellipse had a negative radius.
    #[fail(display = "negative radius in {}", what)]
    NegativeRadius { what: &'static str },
}

/// Returns an error if any of the points has a non-finite coordinate.
pub(crate) fn check_finite(what: &'static str, points: &[Point]) -> Result<(), GeometryError> {
    if points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { what })
    }
}

/// An immutable two-dimensional path.
///
/// Every figure starts with a [PathCmd::MoveTo]; figures that were closed end with
/// [PathCmd::Close].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path2D(Vec<PathCmd>);

/// Path2D commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    /// Start a figure at a point (analogous to SVG M).
    MoveTo(Point),

    /// Line to a point (analogous to SVG L).
    LineTo(Point),

    /// Quadratic Bézier curve (analogous to SVG Q).
    QuadTo(Point, Point),

    /// Cubic Bézier curve (analogous to SVG C).
    CubicTo(Point, Point, Point),

    /// Close the current figure (analogous to SVG Z).
    Close,
}

impl PathCmd {
    /// Remaps points using the given closure.
    pub fn remap_points<F: FnMut(Point) -> Point>(self, f: &mut F) -> PathCmd {
        match self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(f(p)),
            PathCmd::LineTo(p) => PathCmd::LineTo(f(p)),
            PathCmd::QuadTo(c, p) => PathCmd::QuadTo(f(c), f(p)),
            PathCmd::CubicTo(c1, c2, p) => PathCmd::CubicTo(f(c1), f(c2), f(p)),
            PathCmd::Close => PathCmd::Close,
        }
    }
}

impl Path2D {
    /// Creates a new empty path.
    pub fn new() -> Path2D {
        Path2D(Vec::new())
    }

    /// Returns a reference to the list of path commands.
    pub fn commands(&self) -> &[PathCmd] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of figures in this path.
    pub fn figure_count(&self) -> usize {
        self.0
            .iter()
            .filter(|cmd| match cmd {
                PathCmd::MoveTo(_) => true,
                _ => false,
            })
            .count()
    }

    /// Returns this path with every point mapped through `transform`.
    pub fn transformed(&self, transform: &Affine) -> Path2D {
        if *transform == Affine::identity() {
            return self.clone();
        }
        let mut map = |p| transform.transform_point(p);
        Path2D(self.0.iter().map(|cmd| cmd.remap_points(&mut map)).collect())
    }

    /// Appends all figures of `other`.
    pub fn extend(&mut self, other: &Path2D) {
        self.0.extend_from_slice(&other.0);
    }

    /// Compares two paths command by command, allowing each coordinate to differ by `eps`.
    pub fn approx_eq(&self, other: &Path2D, eps: f32) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let close = |a: &Point, b: &Point| (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps;
        self.0.iter().zip(&other.0).all(|pair| match pair {
            (PathCmd::MoveTo(a), PathCmd::MoveTo(b)) | (PathCmd::LineTo(a), PathCmd::LineTo(b)) => {
                close(a, b)
            }
            (PathCmd::QuadTo(a1, a2), PathCmd::QuadTo(b1, b2)) => close(a1, b1) && close(a2, b2),
            (PathCmd::CubicTo(a1, a2, a3), PathCmd::CubicTo(b1, b2, b3)) => {
                close(a1, b1) && close(a2, b2) && close(a3, b3)
            }
            (PathCmd::Close, PathCmd::Close) => true,
            _ => false,
        })
    }

    /// Converts this path to a lyon path.
    pub fn to_lyon(&self) -> Path {
        let mut builder = Path::builder();
        let mut open = false;

        for command in &self.0 {
            match *command {
                PathCmd::MoveTo(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(p);
                    open = true;
                }
                PathCmd::Close => {
                    if open {
                        builder.end(true);
                        open = false;
                    }
                }
                _ if !open => {
                    // Path2Ds built by PathBuilder always start figures with MoveTo, but a
                    // hand-made command list may not
                    debug!("path command {:?} without a figure; skipped", command);
                }
                PathCmd::LineTo(p) => {
                    builder.line_to(p);
                }
                PathCmd::QuadTo(c, p) => {
                    builder.quadratic_bezier_to(c, p);
                }
                PathCmd::CubicTo(c1, c2, p) => {
                    builder.cubic_bezier_to(c1, c2, p);
                }
            }
        }

        if open {
            builder.end(false);
        }

        builder.build()
    }

    /// Flattens this path to vertices. Each embedded Vec is one figure; closed figures repeat
    /// their first vertex at the end.
    pub fn flatten_to_verts(&self, tolerance: f32) -> Vec<Vec<Point>> {
        let path = self.to_lyon();

        let mut groups = Vec::new();
        let mut group = Vec::new();

        for event in path.iter().flattened(tolerance) {
            match event {
                PathEvent::Begin { at } => {
                    let old_group = mem::replace(&mut group, Vec::new());
                    if !old_group.is_empty() {
                        groups.push(old_group);
                    }
                    group.push(at);
                }
                PathEvent::Line { to, .. } => group.push(to),
                PathEvent::End { first, close, .. } => {
                    if close {
                        group.push(first);
                    }
                    groups.push(mem::replace(&mut group, Vec::new()));
                }
                // flattened iterators only emit lines
                PathEvent::Quadratic { to, .. } | PathEvent::Cubic { to, .. } => group.push(to),
            }
        }

        if !group.is_empty() {
            groups.push(group);
        }

        groups
    }

    /// Returns the axis-aligned bounds of the flattened path as (min, max), or None if empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut verts = self.flatten_to_verts(CURVE_TOLERANCE).into_iter().flatten();
        let first = verts.next()?;
        Some(verts.fold((first, first), |(min, max), p| {
            (min.min(p), max.max(p))
        }))
    }

    pub(crate) fn check_finite(&self, what: &'static str) -> Result<(), GeometryError> {
        let mut finite = true;
        for command in &self.0 {
            command.remap_points(&mut |p: Point| {
                finite &= p.x.is_finite() && p.y.is_finite();
                p
            });
        }
        if finite {
            Ok(())
        } else {
            Err(GeometryError::NonFinite { what })
        }
    }
}

impl From<Vec<PathCmd>> for Path2D {
    fn from(t: Vec<PathCmd>) -> Path2D {
        Path2D(t)
    }
}
