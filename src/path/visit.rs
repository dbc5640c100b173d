//! Depth-first traversal of path trees.
//!
//! Path nodes never know who is looking at them: every consumer implements [`PathVisitor`] and
//! [`walk`] does the dispatch with one exhaustive match. Adding an analysis means adding a
//! visitor, not touching the node types.

use crate::foundation::value::PathValue;
use crate::path::{
    primitive::{LinearPath, PointPath},
    spline::{BasisSplinePath, CubicSplinePath},
    tree::{CompositePath, NodeId, PathNode, PathTree},
};

/// Callbacks invoked by [`walk`], one per node kind.
///
/// Every method defaults to doing nothing.
pub trait PathVisitor<T: PathValue> {
    /// A constant path.
    fn visit_point(&mut self, _id: NodeId, _path: &PointPath<T>) {}

    /// A linear path.
    fn visit_linear(&mut self, _id: NodeId, _path: &LinearPath<T>) {}

    /// An interpolating cubic spline.
    fn visit_cubic_spline(&mut self, _id: NodeId, _path: &CubicSplinePath<T>) {}

    /// An approximating cubic B-spline.
    fn visit_basis_spline(&mut self, _id: NodeId, _path: &BasisSplinePath<T>) {}

    /// Called before the sub-paths of a composite are visited.
    fn enter_composite(&mut self, _id: NodeId, _path: &CompositePath, _duration: f64) {}

    /// Called after the sub-paths of a composite were visited.
    fn leave_composite(&mut self, _id: NodeId, _path: &CompositePath, _duration: f64) {}
}

/// Visit every node of `tree` in timeline order, starting from the root.
pub fn walk<T, V>(tree: &PathTree<T>, visitor: &mut V)
where
    T: PathValue,
    V: PathVisitor<T> + ?Sized,
{
    walk_from(tree, tree.root(), visitor);
}

/// Visit the sub-tree rooted at `id`.
pub fn walk_from<T, V>(tree: &PathTree<T>, id: NodeId, visitor: &mut V)
where
    T: PathValue,
    V: PathVisitor<T> + ?Sized,
{
    let Some(node) = tree.node(id) else {
        return;
    };
    match node {
        PathNode::Point(p) => visitor.visit_point(id, p),
        PathNode::Linear(p) => visitor.visit_linear(id, p),
        PathNode::CubicSpline(p) => visitor.visit_cubic_spline(id, p),
        PathNode::BasisSpline(p) => visitor.visit_basis_spline(id, p),
        PathNode::Composite(c) => {
            let duration = tree.node_duration(id);
            visitor.enter_composite(id, c, duration);
            for &child in c.paths() {
                walk_from(tree, child, visitor);
            }
            visitor.leave_composite(id, c, duration);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/visit.rs"]
mod tests;
