use crate::data::builder::checked_arc;
use crate::data::path::check_finite;
use crate::data::{GeometryError, Path2D, PathCmd};
use lyon::math::{Angle, Point, Vector};

/// A shape descriptor that converts to a single-figure path.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// An elliptic arc. Angles are measured from the positive x axis of the rotated ellipse.
    Arc {
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        sweep_angle: Angle,
    },

    CubicBezier {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },

    Line { from: Point, to: Point },

    /// An open polyline through at least two points.
    Polyline(Vec<Point>),

    /// An already compiled path, e.g. the output of
    /// [construct](crate::eval::construct).
    Path(Path2D),
}

impl Primitive {
    pub fn line(from: Point, to: Point) -> Primitive {
        Primitive::Line { from, to }
    }

    pub fn cubic_bezier(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Primitive {
        Primitive::CubicBezier {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    pub fn polyline<I: IntoIterator<Item = Point>>(points: I) -> Primitive {
        Primitive::Polyline(points.into_iter().collect())
    }

    pub fn arc(
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        sweep_angle: Angle,
    ) -> Primitive {
        Primitive::Arc {
            center,
            radii,
            x_rotation,
            start_angle,
            sweep_angle,
        }
    }

    /// A full circle.
    pub fn circle(center: Point, radius: f32) -> Primitive {
        Primitive::arc(
            center,
            Vector::new(radius, radius),
            Angle::zero(),
            Angle::zero(),
            Angle::two_pi(),
        )
    }

    /// Converts this primitive into an open single-figure path.
    ///
    /// Fails on non-finite coordinates, negative arc radii and polylines with fewer than two
    /// points.
    pub fn to_path(&self) -> Result<Path2D, GeometryError> {
        let commands = match self {
            Primitive::Line { from, to } => {
                check_finite("line", &[*from, *to])?;
                vec![PathCmd::MoveTo(*from), PathCmd::LineTo(*to)]
            }
            Primitive::CubicBezier {
                from,
                ctrl1,
                ctrl2,
                to,
            } => {
                check_finite("cubic bezier", &[*from, *ctrl1, *ctrl2, *to])?;
                vec![PathCmd::MoveTo(*from), PathCmd::CubicTo(*ctrl1, *ctrl2, *to)]
            }
            Primitive::Polyline(points) => {
                if points.len() < 2 {
                    return Err(GeometryError::ShortPolyline(points.len()));
                }
                check_finite("polyline", points)?;
                let mut commands = Vec::with_capacity(points.len());
                commands.push(PathCmd::MoveTo(points[0]));
                commands.extend(points[1..].iter().map(|p| PathCmd::LineTo(*p)));
                commands
            }
            Primitive::Arc {
                center,
                radii,
                x_rotation,
                start_angle,
                sweep_angle,
            } => {
                let arc = checked_arc(*center, *radii, *x_rotation, *start_angle, *sweep_angle)?;
                let mut commands = vec![PathCmd::MoveTo(arc.from())];
                arc.for_each_quadratic_bezier(&mut |segment| {
                    commands.push(PathCmd::QuadTo(segment.ctrl, segment.to));
                });
                commands
            }
            Primitive::Path(path) => {
                path.check_finite("path")?;
                return Ok(path.clone());
            }
        };
        Ok(commands.into())
    }
}

impl From<Path2D> for Primitive {
    fn from(path: Path2D) -> Primitive {
        Primitive::Path(path)
    }
}
