//! Incremental path construction under a movable coordinate frame.

use crate::data::path::check_finite;
use crate::data::{Affine, GeometryError, Path2D, PathCmd};
use lyon::geom::Arc;
use lyon::math::{point, Angle, Point, Vector};

#[derive(Debug, Clone)]
struct Figure {
    start: Point,
    segments: Vec<PathCmd>,
    closed: bool,
}

/// Builds a single [Path2D] out of figures.
///
/// Every point handed to the builder is mapped through the current transform when it is
/// recorded, so changing the transform only affects points that come after the change. The
/// cursor is kept in output coordinates.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    figures: Vec<Figure>,
    /// Index of the figure that new segments are appended to.
    current: Option<usize>,
    cursor: Point,
    transform: Affine,
}

impl PathBuilder {
    pub fn new() -> PathBuilder {
        PathBuilder {
            figures: Vec::new(),
            current: None,
            cursor: point(0., 0.),
            transform: Affine::identity(),
        }
    }

    /// Returns the transform that is applied to incoming points.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replaces the transform that is applied to incoming points.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// The current point in output coordinates.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Maps `points` through the active transform. Non-finite results fail, so a degenerate
    /// transform is caught as well as degenerate input.
    fn map<const N: usize>(
        &self,
        what: &'static str,
        points: [Point; N],
    ) -> Result<[Point; N], GeometryError> {
        check_finite(what, &points)?;
        let mapped = points.map(|p| self.transform.transform_point(p));
        check_finite(what, &mapped)?;
        Ok(mapped)
    }

    /// Returns the figure segments are appended to, starting one at the cursor if needed.
    fn open_figure(&mut self) -> &mut Figure {
        let index = match self.current {
            Some(index) => index,
            None => {
                self.figures.push(Figure {
                    start: self.cursor,
                    segments: Vec::new(),
                    closed: false,
                });
                let index = self.figures.len() - 1;
                self.current = Some(index);
                index
            }
        };
        &mut self.figures[index]
    }

    fn push(&mut self, segment: PathCmd, end: Point) {
        self.open_figure().segments.push(segment);
        self.cursor = end;
    }

    /// Ends the current figure and moves the cursor to `to`.
    pub fn move_to(&mut self, to: Point) -> Result<(), GeometryError> {
        let [to] = self.map("move_to", [to])?;
        self.start_figure();
        self.cursor = to;
        Ok(())
    }

    pub fn line_to(&mut self, to: Point) -> Result<(), GeometryError> {
        let [to] = self.map("line_to", [to])?;
        self.push(PathCmd::LineTo(to), to);
        Ok(())
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) -> Result<(), GeometryError> {
        let [ctrl, to] = self.map("quadratic_bezier_to", [ctrl, to])?;
        self.push(PathCmd::QuadTo(ctrl, to), to);
        Ok(())
    }

    pub fn cubic_bezier_to(
        &mut self,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    ) -> Result<(), GeometryError> {
        let [ctrl1, ctrl2, to] = self.map("cubic_bezier_to", [ctrl1, ctrl2, to])?;
        self.push(PathCmd::CubicTo(ctrl1, ctrl2, to), to);
        Ok(())
    }

    /// Appends an elliptic arc.
    ///
    /// The arc is approximated by quadratic Bézier segments in local coordinates which are then
    /// transformed. If a figure is open, the arc start is connected to it with a line; otherwise
    /// a new figure starts at the arc start.
    pub fn arc_to(
        &mut self,
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        sweep_angle: Angle,
    ) -> Result<(), GeometryError> {
        let arc = checked_arc(center, radii, x_rotation, start_angle, sweep_angle)?;

        let mut local = Vec::new();
        arc.for_each_quadratic_bezier(&mut |segment| local.push([segment.ctrl, segment.to]));
        let [from, to] = self.map("arc_to", [arc.from(), arc.to()])?;
        let segments = local
            .into_iter()
            .map(|points| -> Result<PathCmd, GeometryError> {
                let [ctrl, to] = self.map("arc_to", points)?;
                Ok(PathCmd::QuadTo(ctrl, to))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.current.is_some() {
            self.push(PathCmd::LineTo(from), from);
        } else {
            self.cursor = from;
        }
        self.open_figure().segments.extend(segments);
        self.cursor = to;
        Ok(())
    }

    /// Ends the current figure without closing it. The next segment starts a new figure.
    pub fn start_figure(&mut self) {
        self.current = None;
    }

    /// Closes the current figure and returns the cursor to its start.
    pub fn close_figure(&mut self) {
        if let Some(index) = self.current.take() {
            let figure = &mut self.figures[index];
            figure.closed = true;
            self.cursor = figure.start;
        }
    }

    /// Closes every figure recorded so far.
    pub fn close_all_figures(&mut self) {
        if let Some(index) = self.current.take() {
            self.cursor = self.figures[index].start;
        }
        for figure in &mut self.figures {
            figure.closed = true;
        }
    }

    /// Finishes the path. Figures without segments are dropped.
    pub fn build(self) -> Path2D {
        let mut commands = Vec::new();
        let mut dropped = 0;
        for figure in self.figures {
            if figure.segments.is_empty() {
                dropped += 1;
                continue;
            }
            commands.push(PathCmd::MoveTo(figure.start));
            commands.extend(figure.segments);
            if figure.closed {
                commands.push(PathCmd::Close);
            }
        }
        if dropped > 0 {
            warn!("dropped {} empty figure(s)", dropped);
        }
        commands.into()
    }
}

impl Default for PathBuilder {
    fn default() -> PathBuilder {
        PathBuilder::new()
    }
}

/// Validates arc parameters and creates the lyon arc.
pub(crate) fn checked_arc(
    center: Point,
    radii: Vector,
    x_rotation: Angle,
    start_angle: Angle,
    sweep_angle: Angle,
) -> Result<Arc<f32>, GeometryError> {
    let finite = [
        radii.x,
        radii.y,
        x_rotation.radians,
        start_angle.radians,
        sweep_angle.radians,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return Err(GeometryError::NonFinite { what: "arc" });
    }
    check_finite("arc", &[center])?;
    if radii.x < 0. || radii.y < 0. {
        return Err(GeometryError::NegativeRadius { what: "arc" });
    }
    Ok(Arc {
        center,
        radii,
        start_angle,
        sweep_angle,
        x_rotation,
    })
}
