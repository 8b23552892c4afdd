use crate::data::{Affine, Drawable};
use crate::eval::{EvalError, EvalResult, TextProvider};
use crate::scene::{Scene, SceneKind};
use std::sync::Arc;

/// Flattens a scene into drawables in paint order (index 0 is painted first).
///
/// Unions are walked left to right, depth first. Every node carries the composition of the
/// transforms above it, so a transformed sub-tree comes out as one contiguous block whose
/// geometry is already in final coordinates. The walk uses an explicit stack.
pub fn flatten<T: TextProvider + ?Sized>(scene: &Scene, text: &T) -> EvalResult<Vec<Drawable>> {
    let mut drawables = Vec::new();
    let mut pending = vec![(scene, Affine::identity())];

    while let Some((scene, transform)) = pending.pop() {
        let drawable = match scene.kind() {
            SceneKind::Empty => continue,
            SceneKind::Union(first, second) => {
                pending.push((second, transform));
                pending.push((first, transform));
                continue;
            }
            SceneKind::Transformed(inner, sub) => {
                pending.push((sub, Affine::compose(transform, *inner)));
                continue;
            }
            SceneKind::Leaf(tool, primitive) => Drawable::new(*tool, primitive.to_path()?),
            SceneKind::Text(tool, string, options) => {
                let outlines = text
                    .outlines(string, options)
                    .map_err(|err| EvalError::Text(Arc::new(err)))?;
                Drawable::new(*tool, outlines)
            }
            SceneKind::TextAlong(tool, string, options, along) => {
                let along = along.to_path()?;
                let outlines = text
                    .outlines_along(string, &along, options)
                    .map_err(|err| EvalError::Text(Arc::new(err)))?;
                Drawable::new(*tool, outlines)
            }
        };

        let path = drawable.path.transformed(&transform);
        path.check_finite("transformed geometry")?;
        trace!("drawable #{}: {:?}", drawables.len(), drawable.tool);
        drawables.push(Drawable::new(drawable.tool, path));
    }

    debug!("flattened scene to {} drawable(s)", drawables.len());
    Ok(drawables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Color, Path2D, PathCmd, Primitive, TextOptions, Tool};
    use crate::eval::{NoText, TextUnavailable};
    use crate::scene::{self, apply_transform, union};
    use failure::Error;
    use lyon::math::{point, Point};

    /// Returns one "glyph" per character: a unit square advancing along x.
    struct BoxText;

    impl TextProvider for BoxText {
        fn outlines(&self, text: &str, options: &TextOptions) -> Result<Path2D, Error> {
            let mut path = Path2D::new();
            for (i, _) in text.chars().enumerate() {
                let x = options.origin.x + i as f32 * options.size;
                let y = options.origin.y;
                path.extend(
                    &vec![
                        PathCmd::MoveTo(point(x, y)),
                        PathCmd::LineTo(point(x + options.size, y)),
                        PathCmd::LineTo(point(x + options.size, y - options.size)),
                        PathCmd::Close,
                    ]
                    .into(),
                );
            }
            Ok(path)
        }

        fn outlines_along(
            &self,
            text: &str,
            path: &Path2D,
            options: &TextOptions,
        ) -> Result<Path2D, Error> {
            let start = match path.commands().first() {
                Some(PathCmd::MoveTo(p)) => *p,
                _ => point(0., 0.),
            };
            self.outlines(text, &options.clone().at(start))
        }
    }

    fn leaf(color: Color, from: Point, to: Point) -> Scene {
        Scene::leaf(Tool::stroke(color, 1.), Primitive::line(from, to))
    }

    fn sample() -> Scene {
        let a = leaf(Color::RED, point(0., 0.), point(1., 0.));
        let b = leaf(Color::GREEN, point(0., 1.), point(1., 1.));
        let c = leaf(Color::BLUE, point(0., 2.), point(1., 2.));
        let rotated = scene::rotate_around_degrees(45., point(1., 1.), union(b, c.clone()));
        union(
            union(a, scene::translate(3., 0., union(rotated, c))),
            Scene::text(Tool::fill(Color::BLACK), "hi", TextOptions::new("serif", 2.)),
        )
    }

    fn assert_same(a: &[Drawable], b: &[Drawable]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.tool, y.tool);
            assert!(x.path.approx_eq(&y.path, 1e-3), "{:?} != {:?}", x.path, y.path);
        }
    }

    #[test]
    fn union_order_is_preserved() {
        let a = sample();
        let b = scene::scale(2., 1., sample());
        let joined = flatten(&union(a.clone(), b.clone()), &BoxText).unwrap();
        let mut separate = flatten(&a, &BoxText).unwrap();
        separate.extend(flatten(&b, &BoxText).unwrap());
        assert_eq!(joined, separate);
    }

    #[test]
    fn drawable_count_is_conserved() {
        let t = sample();
        assert_eq!(t.drawable_count(), 5);
        assert_eq!(flatten(&t, &BoxText).unwrap().len(), 5);
        assert!(flatten(&Scene::empty(), &NoText).unwrap().is_empty());
    }

    #[test]
    fn nested_transforms_compose() {
        let t = sample();
        let m1 = Affine::rotate_around_degrees(30., point(2., 2.));
        let m2 = Affine::translation(-4., 7.) * Affine::scale(1.5, 0.5);
        let nested = flatten(&apply_transform(m1, apply_transform(m2, t.clone())), &BoxText);
        let fused = flatten(&apply_transform(Affine::compose(m1, m2), t), &BoxText);
        assert_same(&nested.unwrap(), &fused.unwrap());
    }

    #[test]
    fn transform_maps_sub_tree_geometry() {
        let sub = sample();
        let m = Affine::rotate_around_degrees(-60., point(5., 0.)) * Affine::scale(3., 3.);
        let expected: Vec<_> = flatten(&sub, &BoxText)
            .unwrap()
            .into_iter()
            .map(|d| Drawable::new(d.tool, d.path.transformed(&m)))
            .collect();
        assert_same(&flatten(&apply_transform(m, sub), &BoxText).unwrap(), &expected);
    }

    #[test]
    fn transformed_block_is_contiguous() {
        let first = leaf(Color::RED, point(0., 0.), point(1., 0.));
        let inner = union(
            leaf(Color::GREEN, point(0., 0.), point(1., 0.)),
            leaf(Color::BLUE, point(0., 0.), point(1., 0.)),
        );
        let last = leaf(Color::BLACK, point(0., 0.), point(1., 0.));
        let tree = scene::from_list(vec![first, scene::translate(0., 5., inner), last]);
        let drawables = flatten(&tree, &NoText).unwrap();
        let colors: Vec<_> = drawables.iter().map(|d| d.tool.color()).collect();
        assert_eq!(colors, vec![Color::RED, Color::GREEN, Color::BLUE, Color::BLACK]);
        assert_eq!(drawables[1].path.commands()[0], PathCmd::MoveTo(point(0., 5.)));
        assert_eq!(drawables[2].path.commands()[0], PathCmd::MoveTo(point(0., 5.)));
        assert_eq!(drawables[3].path.commands()[0], PathCmd::MoveTo(point(0., 0.)));
    }

    #[test]
    fn identity_transform_flattens_identically() {
        let t = sample();
        assert_eq!(
            flatten(&apply_transform(Affine::identity(), t.clone()), &BoxText).unwrap(),
            flatten(&t, &BoxText).unwrap()
        );
    }

    #[test]
    fn small_rotations_move_far_points() {
        let line = leaf(Color::RED, point(0., 0.), point(100_000., 0.));
        let tree = scene::rotate_around_degrees(0.0005, point(0., 0.), line);
        let drawables = flatten(&tree, &NoText).unwrap();
        match drawables[0].path.commands()[1] {
            PathCmd::LineTo(end) => assert!((end.y - 0.8727).abs() < 1e-3, "{:?}", end),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn text_along_uses_the_primitive_path() {
        let tree = Scene::text_along(
            Tool::fill(Color::BLACK),
            "abc",
            TextOptions::new("mono", 1.),
            Primitive::line(point(4., 4.), point(10., 4.)),
        );
        let drawables = flatten(&scene::translate(1., 0., tree), &BoxText).unwrap();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].path.figure_count(), 3);
        assert_eq!(drawables[0].path.commands()[0], PathCmd::MoveTo(point(5., 4.)));
    }

    #[test]
    fn provider_errors_propagate() {
        let tree = union(
            leaf(Color::RED, point(0., 0.), point(1., 0.)),
            Scene::text(Tool::fill(Color::BLACK), "oops", TextOptions::new("x", 1.)),
        );
        match flatten(&tree, &NoText) {
            Err(EvalError::Text(err)) => {
                assert_eq!(
                    err.downcast_ref::<TextUnavailable>(),
                    Some(&TextUnavailable("oops".into()))
                );
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn degenerate_leaves_fail() {
        let tree = Scene::leaf(Tool::fill(Color::RED), Primitive::polyline(vec![point(0., 0.)]));
        match flatten(&tree, &NoText) {
            Err(EvalError::Geometry(err)) => {
                assert_eq!(err, crate::data::GeometryError::ShortPolyline(1))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn degenerate_transforms_fail() {
        let line = leaf(Color::RED, point(0., 0.), point(1., 0.));
        let inf = scene::scale(std::f32::INFINITY, 1., line.clone());
        let overflow = scene::scale(1e30, 1., scene::translate(1e30, 0., line.clone()));
        let overflow = apply_transform(Affine::scale(1e30, 1.), overflow);
        for tree in vec![inf, overflow] {
            match flatten(&union(line.clone(), tree), &NoText) {
                Err(EvalError::Geometry(err)) => assert_eq!(
                    err,
                    crate::data::GeometryError::NonFinite {
                        what: "transformed geometry"
                    }
                ),
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn deep_unions_flatten() {
        let mut tree = Scene::empty();
        for i in 0..100_000 {
            let x = i as f32;
            tree = union(tree, leaf(Color::RED, point(x, 0.), point(x, 1.)));
        }
        let drawables = flatten(&tree, &NoText).unwrap();
        assert_eq!(drawables.len(), 100_000);
        assert_eq!(drawables[0].path.commands()[0], PathCmd::MoveTo(point(0., 0.)));
        assert_eq!(
            drawables[99_999].path.commands()[0],
            PathCmd::MoveTo(point(99_999., 0.))
        );

        let mut right_nested = Scene::empty();
        for i in 0..100_000 {
            let x = i as f32;
            let line = leaf(Color::BLUE, point(x, 0.), point(x, 1.));
            right_nested = scene::translate(0., 1., union(line, right_nested));
        }
        let drawables = flatten(&right_nested, &NoText).unwrap();
        assert_eq!(drawables.len(), 100_000);
        assert_eq!(drawables[0].path.commands()[0], PathCmd::MoveTo(point(99_999., 1.)));
        assert_eq!(
            drawables[99_999].path.commands()[0],
            PathCmd::MoveTo(point(0., 100_000.))
        );
    }
}
