//! Scene trees.
//!
//! A [Scene] is an immutable tree of painted primitives and text. Unions and transformed
//! sub-trees can only be created through [union] and [apply_transform], which keep the tree
//! free of empty operands and no-op transform layers.

use crate::data::{Affine, Primitive, TextOptions, Tool};
use lyon::math::Point;
use std::iter::FromIterator;
use std::sync::Arc;

/// An immutable scene tree. Cloning is cheap; sub-trees are shared.
#[derive(Clone, Default)]
pub struct Scene(Option<Arc<SceneKind>>);

/// The node kinds of a scene tree, as seen through [Scene::kind].
#[derive(Debug, Clone)]
pub enum SceneKind {
    /// Paints nothing. Identity for [union].
    Empty,

    /// One painted primitive.
    Leaf(Tool, Primitive),

    /// The left tree painted before the right tree.
    Union(Scene, Scene),

    /// A sub-tree with a transform applied to all of its geometry.
    Transformed(Affine, Scene),

    /// Glyph outlines of a string.
    Text(Tool, String, TextOptions),

    /// Glyph outlines of a string laid out along a primitive.
    TextAlong(Tool, String, TextOptions, Primitive),
}

static EMPTY: SceneKind = SceneKind::Empty;

impl Scene {
    fn from_kind(kind: SceneKind) -> Scene {
        match kind {
            SceneKind::Empty => Scene(None),
            kind => Scene(Some(Arc::new(kind))),
        }
    }

    /// The empty scene.
    pub fn empty() -> Scene {
        Scene(None)
    }

    pub fn leaf(tool: Tool, primitive: Primitive) -> Scene {
        Scene::from_kind(SceneKind::Leaf(tool, primitive))
    }

    pub fn text<S: Into<String>>(tool: Tool, text: S, options: TextOptions) -> Scene {
        Scene::from_kind(SceneKind::Text(tool, text.into(), options))
    }

    pub fn text_along<S: Into<String>>(
        tool: Tool,
        text: S,
        options: TextOptions,
        along: Primitive,
    ) -> Scene {
        Scene::from_kind(SceneKind::TextAlong(tool, text.into(), options, along))
    }

    /// Returns the root node.
    pub fn kind(&self) -> &SceneKind {
        match &self.0 {
            Some(kind) => &**kind,
            None => &EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if both scenes share the same root node.
    pub fn ptr_eq(&self, other: &Scene) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Number of leaf and text nodes, i.e. the number of drawables the scene flattens to.
    pub fn drawable_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(scene) = pending.pop() {
            match scene.kind() {
                SceneKind::Empty => (),
                SceneKind::Leaf(..) | SceneKind::Text(..) | SceneKind::TextAlong(..) => count += 1,
                SceneKind::Union(a, b) => {
                    pending.push(b);
                    pending.push(a);
                }
                SceneKind::Transformed(_, sub) => pending.push(sub),
            }
        }
        count
    }

    /// Shorthand for [union].
    pub fn union(self, other: Scene) -> Scene {
        union(self, other)
    }

    /// Shorthand for [apply_transform].
    pub fn transformed(self, transform: Affine) -> Scene {
        apply_transform(transform, self)
    }
}

/// Paints `a`, then `b`. Empty operands are dropped.
pub fn union(a: Scene, b: Scene) -> Scene {
    if a.is_empty() {
        b
    } else if b.is_empty() {
        a
    } else {
        Scene::from_kind(SceneKind::Union(a, b))
    }
}

/// Applies `transform` to all geometry in `tree`.
///
/// The exact identity returns the tree unchanged, transforms of transformed sub-trees are fused
/// into one node, and fusions that cancel out within [Affine::is_identity] collapse to the
/// sub-tree. The empty scene stays empty.
pub fn apply_transform(transform: Affine, tree: Scene) -> Scene {
    if transform == Affine::identity() || tree.is_empty() {
        return tree;
    }
    let fused = match tree.kind() {
        SceneKind::Transformed(current, sub) => {
            Some((Affine::compose(transform, *current), sub.clone()))
        }
        _ => None,
    };
    match fused {
        // round-off from the fusion is expected here
        Some((fused, sub)) if fused.is_identity() => sub,
        Some((fused, sub)) => Scene::from_kind(SceneKind::Transformed(fused, sub)),
        None => Scene::from_kind(SceneKind::Transformed(transform, tree)),
    }
}

/// Rotates `tree` by `angle` degrees about `pivot`.
pub fn rotate_around_degrees(angle: f32, pivot: Point, tree: Scene) -> Scene {
    apply_transform(Affine::rotate_around_degrees(angle, pivot), tree)
}

/// Rotates `tree` by `angle` radians about `pivot`.
pub fn rotate_around_radians(angle: f32, pivot: Point, tree: Scene) -> Scene {
    apply_transform(Affine::rotate_around_radians(angle, pivot), tree)
}

pub fn translate(dx: f32, dy: f32, tree: Scene) -> Scene {
    apply_transform(Affine::translation(dx, dy), tree)
}

pub fn scale(sx: f32, sy: f32, tree: Scene) -> Scene {
    apply_transform(Affine::scale(sx, sy), tree)
}

/// Unions all trees from left to right.
pub fn from_list<I: IntoIterator<Item = Scene>>(trees: I) -> Scene {
    trees.into_iter().fold(Scene::empty(), union)
}

impl FromIterator<Scene> for Scene {
    fn from_iter<I: IntoIterator<Item = Scene>>(iter: I) -> Scene {
        from_list(iter)
    }
}

impl PartialEq for Scene {
    /// Structural equality, compared without recursion.
    fn eq(&self, other: &Scene) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            match (a.kind(), b.kind()) {
                (SceneKind::Leaf(ta, pa), SceneKind::Leaf(tb, pb)) => {
                    if ta != tb || pa != pb {
                        return false;
                    }
                }
                (SceneKind::Union(la, ra), SceneKind::Union(lb, rb)) => {
                    pending.push((ra, rb));
                    pending.push((la, lb));
                }
                (SceneKind::Transformed(ma, sa), SceneKind::Transformed(mb, sb)) => {
                    if ma != mb {
                        return false;
                    }
                    pending.push((sa, sb));
                }
                (SceneKind::Text(ta, sa, oa), SceneKind::Text(tb, sb, ob)) => {
                    if ta != tb || sa != sb || oa != ob {
                        return false;
                    }
                }
                (SceneKind::TextAlong(ta, sa, oa, pa), SceneKind::TextAlong(tb, sb, ob, pb)) => {
                    if ta != tb || sa != sb || oa != ob || pa != pb {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

/// Formats the tree recursively; very deep trees can overflow the stack.
impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.kind().fmt(f)
    }
}

// deep unions (one per generated shape) would overflow the stack if dropped recursively
impl Drop for Scene {
    fn drop(&mut self) {
        let mut pending: Vec<Arc<SceneKind>> = self.0.take().into_iter().collect();
        while let Some(node) = pending.pop() {
            // shared nodes are dropped by their last owner
            if let Ok(kind) = Arc::try_unwrap(node) {
                match kind {
                    SceneKind::Union(mut a, mut b) => {
                        pending.extend(a.0.take());
                        pending.extend(b.0.take());
                    }
                    SceneKind::Transformed(_, mut sub) => pending.extend(sub.0.take()),
                    _ => (),
                }
            }
        }
    }
}
