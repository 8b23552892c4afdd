//! The path instruction language.
//!
//! An [Instruction] is a tree of drawing commands that compiles to one [Path2D](crate::data::Path2D)
//! with [construct](crate::eval::construct).

use crate::data::Affine;
use lyon::math::{point, Angle, Point, Size, Vector};
use std::iter::FromIterator;
use std::mem;

/// A path construction instruction.
///
/// Cloning, comparing and dropping work on trees of any depth. The derived `Debug` output
/// recurses, so formatting very deep trees can overflow the stack.
#[derive(Debug)]
pub enum Instruction {
    /// Does nothing. Identity for [Instruction::Combine].
    Empty,

    /// Ends the current figure and moves the cursor.
    MoveTo(Point),

    LineTo(Point),

    /// Quadratic Bézier from the cursor: control point, end point.
    QuadraticBezierTo(Point, Point),

    /// Cubic Bézier from the cursor: two control points, end point.
    CubicBezierTo(Point, Point, Point),

    /// Elliptic arc, connected to the open figure with a line.
    ArcTo {
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        sweep_angle: Angle,
    },

    /// Ends the current figure without closing it.
    StartFigure,

    /// Closes the current figure.
    CloseFigure,

    /// Closes every figure drawn so far.
    CloseAllFigures,

    /// Replaces the active coordinate frame for everything that follows.
    SetTransform(Affine),

    /// Uses the given coordinate frame for the nested instructions only, then restores the
    /// frame that was active before.
    LocalTransform(Affine, Box<Instruction>),

    /// Runs the first instruction, then the second.
    Combine(Box<Instruction>, Box<Instruction>),
}

impl Instruction {
    pub fn is_empty(&self) -> bool {
        match self {
            Instruction::Empty => true,
            _ => false,
        }
    }

    /// Sequences two instructions, dropping `Empty` operands.
    pub fn combine(first: Instruction, second: Instruction) -> Instruction {
        if first.is_empty() {
            second
        } else if second.is_empty() {
            first
        } else {
            Instruction::Combine(Box::new(first), Box::new(second))
        }
    }

    /// Sequences all instructions in order.
    pub fn sequence<I: IntoIterator<Item = Instruction>>(instructions: I) -> Instruction {
        instructions
            .into_iter()
            .fold(Instruction::Empty, Instruction::combine)
    }

    /// Scopes `transform` to `nested`.
    pub fn local(transform: Affine, nested: Instruction) -> Instruction {
        Instruction::LocalTransform(transform, Box::new(nested))
    }

    /// Runs `self`, then `next`.
    pub fn then(self, next: Instruction) -> Instruction {
        Instruction::combine(self, next)
    }

    pub fn arc_to(
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        sweep_angle: Angle,
    ) -> Instruction {
        Instruction::ArcTo {
            center,
            radii,
            x_rotation,
            start_angle,
            sweep_angle,
        }
    }

    /// A closed axis-aligned rectangle figure.
    pub fn rectangle(origin: Point, size: Size) -> Instruction {
        Instruction::polygon(vec![
            origin,
            point(origin.x + size.width, origin.y),
            point(origin.x + size.width, origin.y + size.height),
            point(origin.x, origin.y + size.height),
        ])
    }

    /// A closed ellipse figure.
    pub fn ellipse(center: Point, radii: Vector) -> Instruction {
        Instruction::sequence(vec![
            Instruction::StartFigure,
            Instruction::arc_to(center, radii, Angle::zero(), Angle::zero(), Angle::two_pi()),
            Instruction::CloseFigure,
        ])
    }

    /// A closed polygon figure through the given points.
    pub fn polygon<I: IntoIterator<Item = Point>>(points: I) -> Instruction {
        let mut points = points.into_iter();
        let first = match points.next() {
            Some(first) => first,
            None => return Instruction::Empty,
        };
        let outline = points.map(Instruction::LineTo);
        Instruction::sequence(
            Some(Instruction::MoveTo(first))
                .into_iter()
                .chain(outline)
                .chain(Some(Instruction::CloseFigure)),
        )
    }

    /// Moves nested instructions out so they can be dropped without recursion.
    fn detach_children(&mut self, out: &mut Vec<Instruction>) {
        let mut take = |child: &mut Instruction| {
            if !child.is_empty() {
                out.push(mem::replace(child, Instruction::Empty));
            }
        };
        match self {
            Instruction::Combine(a, b) => {
                take(&mut **a);
                take(&mut **b);
            }
            Instruction::LocalTransform(_, nested) => take(&mut **nested),
            _ => (),
        }
    }
}

// instruction trees are often generated with one Combine per segment; dropping them recursively
// would overflow the stack
impl Drop for Instruction {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut instruction) = pending.pop() {
            instruction.detach_children(&mut pending);
        }
    }
}

impl Clone for Instruction {
    fn clone(&self) -> Instruction {
        enum Task<'a> {
            Visit(&'a Instruction),
            Combine,
            Local(Affine),
        }

        let mut tasks = vec![Task::Visit(self)];
        let mut done: Vec<Instruction> = Vec::new();
        while let Some(task) = tasks.pop() {
            let leaf = match task {
                Task::Visit(Instruction::Combine(first, second)) => {
                    tasks.push(Task::Combine);
                    tasks.push(Task::Visit(&**second));
                    tasks.push(Task::Visit(&**first));
                    continue;
                }
                Task::Visit(Instruction::LocalTransform(transform, nested)) => {
                    tasks.push(Task::Local(*transform));
                    tasks.push(Task::Visit(&**nested));
                    continue;
                }
                Task::Combine => {
                    let second = done.pop().unwrap_or_default();
                    let first = done.pop().unwrap_or_default();
                    done.push(Instruction::Combine(Box::new(first), Box::new(second)));
                    continue;
                }
                Task::Local(transform) => {
                    let nested = done.pop().unwrap_or_default();
                    done.push(Instruction::LocalTransform(transform, Box::new(nested)));
                    continue;
                }
                Task::Visit(leaf) => leaf,
            };
            done.push(match *leaf {
                Instruction::Empty => Instruction::Empty,
                Instruction::MoveTo(p) => Instruction::MoveTo(p),
                Instruction::LineTo(p) => Instruction::LineTo(p),
                Instruction::QuadraticBezierTo(c, p) => Instruction::QuadraticBezierTo(c, p),
                Instruction::CubicBezierTo(c1, c2, p) => Instruction::CubicBezierTo(c1, c2, p),
                Instruction::ArcTo {
                    center,
                    radii,
                    x_rotation,
                    start_angle,
                    sweep_angle,
                } => Instruction::ArcTo {
                    center,
                    radii,
                    x_rotation,
                    start_angle,
                    sweep_angle,
                },
                Instruction::StartFigure => Instruction::StartFigure,
                Instruction::CloseFigure => Instruction::CloseFigure,
                Instruction::CloseAllFigures => Instruction::CloseAllFigures,
                Instruction::SetTransform(m) => Instruction::SetTransform(m),
                // visited above
                Instruction::LocalTransform(..) | Instruction::Combine(..) => Instruction::Empty,
            });
        }
        done.pop().unwrap_or_default()
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Instruction) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            let same = match pair {
                (Instruction::Combine(a1, b1), Instruction::Combine(a2, b2)) => {
                    pending.push((&**b1, &**b2));
                    pending.push((&**a1, &**a2));
                    true
                }
                (Instruction::LocalTransform(m1, n1), Instruction::LocalTransform(m2, n2)) => {
                    pending.push((&**n1, &**n2));
                    m1 == m2
                }
                (Instruction::Empty, Instruction::Empty)
                | (Instruction::StartFigure, Instruction::StartFigure)
                | (Instruction::CloseFigure, Instruction::CloseFigure)
                | (Instruction::CloseAllFigures, Instruction::CloseAllFigures) => true,
                (Instruction::MoveTo(a), Instruction::MoveTo(b))
                | (Instruction::LineTo(a), Instruction::LineTo(b)) => a == b,
                (
                    Instruction::QuadraticBezierTo(c1, p1),
                    Instruction::QuadraticBezierTo(c2, p2),
                ) => c1 == c2 && p1 == p2,
                (
                    Instruction::CubicBezierTo(a1, b1, p1),
                    Instruction::CubicBezierTo(a2, b2, p2),
                ) => a1 == a2 && b1 == b2 && p1 == p2,
                (
                    Instruction::ArcTo {
                        center: c1,
                        radii: r1,
                        x_rotation: x1,
                        start_angle: s1,
                        sweep_angle: w1,
                    },
                    Instruction::ArcTo {
                        center: c2,
                        radii: r2,
                        x_rotation: x2,
                        start_angle: s2,
                        sweep_angle: w2,
                    },
                ) => c1 == c2 && r1 == r2 && x1 == x2 && s1 == s2 && w1 == w2,
                (Instruction::SetTransform(a), Instruction::SetTransform(b)) => a == b,
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl Default for Instruction {
    fn default() -> Instruction {
        Instruction::Empty
    }
}

impl FromIterator<Instruction> for Instruction {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Instruction {
        Instruction::sequence(iter)
    }
}
