use crate::data::{Affine, GeometryError, Instruction, Path2D, PathBuilder};

enum Step<'a> {
    Run(&'a Instruction),
    /// Restores the transform that was active before a local transform was entered.
    Restore(Affine),
}

/// Compiles an instruction tree to a path.
///
/// Instructions run in authoring order with an explicit work stack, so arbitrarily deep trees
/// don't grow the call stack. The active transform starts out as the identity.
pub fn construct(instruction: &Instruction) -> Result<Path2D, GeometryError> {
    let mut builder = PathBuilder::new();
    let mut steps = vec![Step::Run(instruction)];
    let mut count = 0_usize;

    while let Some(step) = steps.pop() {
        let instruction = match step {
            Step::Run(instruction) => instruction,
            Step::Restore(transform) => {
                builder.set_transform(transform);
                continue;
            }
        };
        count += 1;

        match instruction {
            Instruction::Empty => (),
            Instruction::MoveTo(p) => builder.move_to(*p)?,
            Instruction::LineTo(p) => builder.line_to(*p)?,
            Instruction::QuadraticBezierTo(c, p) => builder.quadratic_bezier_to(*c, *p)?,
            Instruction::CubicBezierTo(c1, c2, p) => builder.cubic_bezier_to(*c1, *c2, *p)?,
            Instruction::ArcTo {
                center,
                radii,
                x_rotation,
                start_angle,
                sweep_angle,
            } => builder.arc_to(*center, *radii, *x_rotation, *start_angle, *sweep_angle)?,
            Instruction::StartFigure => builder.start_figure(),
            Instruction::CloseFigure => builder.close_figure(),
            Instruction::CloseAllFigures => builder.close_all_figures(),
            Instruction::SetTransform(transform) => builder.set_transform(*transform),
            Instruction::LocalTransform(transform, nested) => {
                steps.push(Step::Restore(builder.transform()));
                builder.set_transform(*transform);
                steps.push(Step::Run(nested));
            }
            Instruction::Combine(first, second) => {
                steps.push(Step::Run(second));
                steps.push(Step::Run(first));
            }
        }
    }

    let path = builder.build();
    trace!(
        "constructed path with {} figure(s) from {} instruction(s)",
        path.figure_count(),
        count
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PathCmd;
    use lyon::math::{point, vector, Angle, Point};

    fn assert_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn end_points(path: &Path2D) -> Vec<Point> {
        path.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(*p),
                PathCmd::QuadTo(_, p) | PathCmd::CubicTo(_, _, p) => Some(*p),
                PathCmd::Close => None,
            })
            .collect()
    }

    #[test]
    fn empty_constructs_empty_path() {
        assert!(construct(&Instruction::Empty).unwrap().is_empty());
    }

    #[test]
    fn local_transform_is_scoped() {
        let rotate90 = Affine::rotate_around_degrees(90., point(0., 0.));
        let instruction = Instruction::sequence(vec![
            Instruction::MoveTo(point(0., 0.)),
            Instruction::LineTo(point(10., 0.)),
            Instruction::local(rotate90, Instruction::LineTo(point(0., 10.))),
            Instruction::LineTo(point(20., 0.)),
        ]);
        let path = construct(&instruction).unwrap();
        let points = end_points(&path);
        assert_eq!(points.len(), 4);
        assert_near(points[1], point(10., 0.));
        // (0, 10) rotated by 90° about the origin
        assert_near(points[2], point(-10., 0.));
        assert_near(points[3], point(20., 0.));
    }

    #[test]
    fn nested_local_transforms_restore_in_order() {
        let instruction = Instruction::sequence(vec![
            Instruction::SetTransform(Affine::translation(100., 0.)),
            Instruction::MoveTo(point(0., 0.)),
            Instruction::local(
                Affine::translation(0., 100.),
                Instruction::sequence(vec![
                    Instruction::LineTo(point(1., 0.)),
                    Instruction::local(Affine::scale(2., 2.), Instruction::LineTo(point(1., 1.))),
                    Instruction::LineTo(point(2., 0.)),
                ]),
            ),
            Instruction::LineTo(point(3., 0.)),
        ]);
        let points = end_points(&construct(&instruction).unwrap());
        assert_eq!(
            points,
            vec![
                point(100., 0.),
                point(1., 100.),
                point(2., 2.),
                point(2., 100.),
                point(103., 0.),
            ]
        );
    }

    #[test]
    fn set_transform_persists_after_combine() {
        let instruction = Instruction::combine(
            Instruction::combine(
                Instruction::MoveTo(point(0., 0.)),
                Instruction::SetTransform(Affine::scale(3., 3.)),
            ),
            Instruction::LineTo(point(1., 1.)),
        );
        let points = end_points(&construct(&instruction).unwrap());
        assert_eq!(points, vec![point(0., 0.), point(3., 3.)]);
    }

    #[test]
    fn figures_close() {
        let instruction = Instruction::sequence(vec![
            Instruction::rectangle(point(0., 0.), lyon::math::size(4., 2.)),
            Instruction::ellipse(point(10., 10.), vector(3., 2.)),
            Instruction::MoveTo(point(20., 20.)),
            Instruction::CubicBezierTo(point(21., 25.), point(24., 25.), point(25., 20.)),
            Instruction::QuadraticBezierTo(point(27., 15.), point(30., 20.)),
        ]);
        let path = construct(&instruction).unwrap();
        assert_eq!(path.figure_count(), 3);
        let closes = path
            .commands()
            .iter()
            .filter(|cmd| **cmd == PathCmd::Close)
            .count();
        assert_eq!(closes, 2);

        let all_closed = construct(&Instruction::combine(
            instruction.clone(),
            Instruction::CloseAllFigures,
        ))
        .unwrap();
        assert_eq!(all_closed.commands().last(), Some(&PathCmd::Close));
    }

    #[test]
    fn arc_under_transform() {
        let instruction = Instruction::local(
            Affine::translation(5., 5.),
            Instruction::arc_to(
                point(0., 0.),
                vector(1., 1.),
                Angle::zero(),
                Angle::zero(),
                Angle::degrees(90.),
            ),
        );
        let points = end_points(&construct(&instruction).unwrap());
        assert_near(points[0], point(6., 5.));
        assert_near(*points.last().unwrap(), point(5., 6.));
    }

    #[test]
    fn degenerate_input_is_reported() {
        let instruction = Instruction::sequence(vec![
            Instruction::MoveTo(point(0., 0.)),
            Instruction::CubicBezierTo(point(std::f32::NAN, 0.), point(1., 1.), point(2., 2.)),
        ]);
        assert_eq!(
            construct(&instruction),
            Err(GeometryError::NonFinite {
                what: "cubic_bezier_to"
            })
        );
    }

    #[test]
    fn degenerate_transforms_are_reported() {
        let nan = Affine::new(std::f32::NAN, 0., 0., 1., 0., 0.);
        let instruction = Instruction::sequence(vec![
            Instruction::SetTransform(nan),
            Instruction::MoveTo(point(0., 0.)),
            Instruction::LineTo(point(1., 1.)),
        ]);
        assert_eq!(
            construct(&instruction),
            Err(GeometryError::NonFinite { what: "move_to" })
        );

        let overflowing = Instruction::sequence(vec![
            Instruction::MoveTo(point(0., 0.)),
            Instruction::local(
                Affine::scale(std::f32::MAX, 1.),
                Instruction::LineTo(point(10., 0.)),
            ),
        ]);
        assert_eq!(
            construct(&overflowing),
            Err(GeometryError::NonFinite { what: "line_to" })
        );
    }

    #[test]
    fn deep_combine_chains_compile() {
        let mut instruction = Instruction::MoveTo(point(0., 0.));
        for i in 1..=100_000 {
            instruction = Instruction::combine(instruction, Instruction::LineTo(point(i as f32, 0.)));
        }
        let path = construct(&instruction).unwrap();
        assert_eq!(path.commands().len(), 100_001);
        assert_eq!(path.commands()[100_000], PathCmd::LineTo(point(100_000., 0.)));

        let mut right_nested = Instruction::LineTo(point(0., 0.));
        for i in 0..100_000 {
            right_nested = Instruction::combine(Instruction::LineTo(point(i as f32, 1.)), right_nested);
        }
        assert_eq!(construct(&right_nested).unwrap().commands().len(), 100_002);
    }
}
