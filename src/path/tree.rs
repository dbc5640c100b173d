use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::SlotMap;

use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::path::{
    primitive::{LinearPath, PointPath, check_finite},
    spline::{BasisSplinePath, CubicSplinePath},
};

slotmap::new_key_type! {
    /// Handle of a node inside a [`PathTree`].
    pub struct NodeId;
}

/// Identity of a [`PathTree`]. [`NodeId`]s are only meaningful together with the tree they came
/// from; clones keep the identity of their source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

impl TreeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Discriminant of a [`PathNode`].
pub enum PathKind {
    /// [`PointPath`].
    Point,
    /// [`LinearPath`].
    Linear,
    /// [`CubicSplinePath`].
    CubicSpline,
    /// [`BasisSplinePath`].
    BasisSpline,
    /// [`CompositePath`].
    Composite,
}

impl PathKind {
    /// Name used in the `Type` field of a path document.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Point => "PointPath",
            Self::Linear => "LinearPath",
            Self::CubicSpline => "CubicSplinePath",
            Self::BasisSpline => "BasisSplinePath",
            Self::Composite => "CompositePath",
        }
    }

    /// Inverse of [`Self::type_name`].
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "PointPath" => Some(Self::Point),
            "LinearPath" => Some(Self::Linear),
            "CubicSplinePath" => Some(Self::CubicSpline),
            "BasisSplinePath" => Some(Self::BasisSpline),
            "CompositePath" => Some(Self::Composite),
            _ => None,
        }
    }

    /// Short label shown in editor rows.
    pub fn label(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Linear => "Linear",
            Self::CubicSpline => "Cubic Spline",
            Self::BasisSpline => "Basis Spline",
            Self::Composite => "Composite",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered list of sub-paths played back to back.
///
/// The composite only stores handles; the nodes live in the owning [`PathTree`].
pub struct CompositePath {
    children: Vec<NodeId>,
}

impl CompositePath {
    /// Sub-paths in timeline order.
    pub fn paths(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One node of a path tree.
pub enum PathNode<T> {
    /// Constant value.
    Point(PointPath<T>),
    /// Straight interpolation between two values.
    Linear(LinearPath<T>),
    /// Interpolating cubic spline.
    CubicSpline(CubicSplinePath<T>),
    /// Approximating cubic B-spline.
    BasisSpline(BasisSplinePath<T>),
    /// Sequence of sub-paths.
    Composite(CompositePath),
}

impl<T: PathValue> PathNode<T> {
    /// Kind of this node.
    pub fn kind(&self) -> PathKind {
        match self {
            Self::Point(_) => PathKind::Point,
            Self::Linear(_) => PathKind::Linear,
            Self::CubicSpline(_) => PathKind::CubicSpline,
            Self::BasisSpline(_) => PathKind::BasisSpline,
            Self::Composite(_) => PathKind::Composite,
        }
    }

    /// Control points of a primitive; empty for composites.
    pub fn ctrl_pts(&self) -> &[T] {
        match self {
            Self::Point(p) => p.ctrl_pts(),
            Self::Linear(p) => p.ctrl_pts(),
            Self::CubicSpline(p) => p.ctrl_pts(),
            Self::BasisSpline(p) => p.ctrl_pts(),
            Self::Composite(_) => &[],
        }
    }

    /// Mutable control points of a primitive; empty for composites.
    ///
    /// Call [`Self::update`] after editing.
    pub fn ctrl_pts_mut(&mut self) -> &mut [T] {
        match self {
            Self::Point(p) => p.ctrl_pts_mut(),
            Self::Linear(p) => p.ctrl_pts_mut(),
            Self::CubicSpline(p) => p.ctrl_pts_mut(),
            Self::BasisSpline(p) => p.ctrl_pts_mut(),
            Self::Composite(_) => &mut [],
        }
    }

    /// Refresh cached interpolation data after control points changed.
    pub fn update(&mut self) {
        match self {
            Self::Point(p) => p.update(),
            Self::Linear(p) => p.update(),
            Self::CubicSpline(p) => p.update(),
            Self::BasisSpline(p) => p.update(),
            Self::Composite(_) => {}
        }
    }

    /// Composite payload, if this node is a composite.
    pub fn as_composite(&self) -> Option<&CompositePath> {
        match self {
            Self::Composite(c) => Some(c),
            _ => None,
        }
    }
}

impl<T> From<PointPath<T>> for PathNode<T> {
    fn from(p: PointPath<T>) -> Self {
        Self::Point(p)
    }
}

impl<T> From<LinearPath<T>> for PathNode<T> {
    fn from(p: LinearPath<T>) -> Self {
        Self::Linear(p)
    }
}

impl<T> From<CubicSplinePath<T>> for PathNode<T> {
    fn from(p: CubicSplinePath<T>) -> Self {
        Self::CubicSpline(p)
    }
}

impl<T> From<BasisSplinePath<T>> for PathNode<T> {
    fn from(p: BasisSplinePath<T>) -> Self {
        Self::BasisSpline(p)
    }
}

#[derive(Clone, Debug)]
/// A path and all of its sub-paths, stored in one arena.
///
/// Every node is owned by exactly one tree and referenced by exactly one parent; handles from
/// one tree are meaningless in another.
pub struct PathTree<T> {
    id: TreeId,
    nodes: SlotMap<NodeId, PathNode<T>>,
    root: NodeId,
}

impl<T: PathValue> PathTree<T> {
    /// Tree whose root is an empty composite.
    pub fn new_composite() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PathNode::Composite(CompositePath::default()));
        Self {
            id: TreeId::next(),
            nodes,
            root,
        }
    }

    /// Tree made of a single primitive.
    pub fn from_node(node: impl Into<PathNode<T>>) -> PathResult<Self> {
        let node = node.into();
        reject_foreign_composite(&node)?;
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(node);
        Ok(Self {
            id: TreeId::next(),
            nodes,
            root,
        })
    }

    /// Make sure the root is a composite, wrapping a primitive root into a new one.
    pub fn into_composite_root(mut self) -> Self {
        if self.nodes.get(self.root).and_then(PathNode::as_composite).is_none() {
            let root = self.nodes.insert(PathNode::Composite(CompositePath {
                children: vec![self.root],
            }));
            self.root = root;
        }
        self
    }

    /// Identity of this tree.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Root handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, composites included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `node` at the end of composite `parent`.
    pub fn add_path(&mut self, parent: NodeId, node: impl Into<PathNode<T>>) -> PathResult<NodeId> {
        let node = node.into();
        reject_foreign_composite(&node)?;
        self.composite_of(parent)?;
        let id = self.nodes.insert(node);
        if let Some(PathNode::Composite(c)) = self.nodes.get_mut(parent) {
            c.children.push(id);
        }
        Ok(id)
    }

    /// Append an empty composite to `parent` and return its handle.
    pub fn add_composite(&mut self, parent: NodeId) -> PathResult<NodeId> {
        self.add_path(parent, PathNode::Composite(CompositePath::default()))
    }

    /// Node behind `id`.
    pub fn node(&self, id: NodeId) -> Option<&PathNode<T>> {
        self.nodes.get(id)
    }

    /// Mutable node behind `id`. Call [`PathNode::update`] after editing control points.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut PathNode<T>> {
        self.nodes.get_mut(id)
    }

    /// Sub-paths of `id`; empty for primitives and unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(PathNode::Composite(c)) => &c.children,
            _ => &[],
        }
    }

    /// Total duration of the tree.
    pub fn duration(&self) -> f64 {
        self.node_duration(self.root)
    }

    /// Duration of `id`; composites report the sum of their sub-paths.
    pub fn node_duration(&self, id: NodeId) -> f64 {
        match self.nodes.get(id) {
            Some(PathNode::Point(p)) => p.duration(),
            Some(PathNode::Linear(p)) => p.duration(),
            Some(PathNode::CubicSpline(p)) => p.duration(),
            Some(PathNode::BasisSpline(p)) => p.duration(),
            Some(PathNode::Composite(c)) => c.children.iter().map(|&ch| self.node_duration(ch)).sum(),
            None => 0.0,
        }
    }

    /// Change the duration of primitive `id`.
    pub fn set_duration(&mut self, id: NodeId, duration: f64) -> PathResult<()> {
        match self.nodes.get_mut(id) {
            Some(PathNode::Point(p)) => p.set_duration(duration),
            Some(PathNode::Linear(p)) => p.set_duration(duration),
            Some(PathNode::CubicSpline(p)) => p.set_duration(duration),
            Some(PathNode::BasisSpline(p)) => p.set_duration(duration),
            Some(PathNode::Composite(_)) => Err(PathError::validation(
                "composite duration is the sum of its sub-paths and cannot be set",
            )),
            None => Err(unknown_node()),
        }
    }

    /// Value of the whole tree at time `t`.
    ///
    /// Returns `None` only when an empty composite is reached.
    pub fn value(&self, t: f64) -> Option<T> {
        self.node_value(self.root, t)
    }

    /// Value of the sub-tree rooted at `id`, at its local time `t`.
    pub fn node_value(&self, id: NodeId, t: f64) -> Option<T> {
        match self.nodes.get(id)? {
            PathNode::Point(p) => Some(p.value(t)),
            PathNode::Linear(p) => Some(p.value(t)),
            PathNode::CubicSpline(p) => Some(p.value(t)),
            PathNode::BasisSpline(p) => Some(p.value(t)),
            PathNode::Composite(c) => {
                let (&last, rest) = c.children.split_last()?;
                let total = self.node_duration(id);
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, total) };

                // Windows are [start, start + d); the last one also owns its end.
                let mut start = 0.0;
                for &child in rest {
                    let d = self.node_duration(child);
                    if t < start + d {
                        return self.node_value(child, t - start);
                    }
                    start += d;
                }
                self.node_value(last, t - start)
            }
        }
    }

    /// Control points of `id`.
    pub fn ctrl_pts(&self, id: NodeId) -> &[T] {
        self.nodes.get(id).map(PathNode::ctrl_pts).unwrap_or(&[])
    }

    /// Replace control point `index` of primitive `id` and refresh its cache.
    pub fn set_ctrl_pt(&mut self, id: NodeId, index: usize, value: T) -> PathResult<()> {
        check_finite(&[value])?;
        let node = self.nodes.get_mut(id).ok_or_else(unknown_node)?;
        let kind = node.kind();
        let pts = node.ctrl_pts_mut();
        let len = pts.len();
        let slot = pts.get_mut(index).ok_or_else(|| {
            PathError::validation(format!(
                "{} has no control point {index} (len {len})",
                kind.type_name()
            ))
        })?;
        *slot = value;
        node.update();
        Ok(())
    }

    /// Refresh the cache of `id` after its control points were edited in place.
    pub fn update(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.update();
        }
    }

    fn composite_of(&self, id: NodeId) -> PathResult<&CompositePath> {
        match self.nodes.get(id) {
            Some(PathNode::Composite(c)) => Ok(c),
            Some(other) => Err(PathError::validation(format!(
                "cannot add a sub-path to a {}",
                other.kind().type_name()
            ))),
            None => Err(unknown_node()),
        }
    }

    fn same_shape(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        match (self.nodes.get(a), other.nodes.get(b)) {
            (Some(PathNode::Composite(ca)), Some(PathNode::Composite(cb))) => {
                ca.children.len() == cb.children.len()
                    && ca
                        .children
                        .iter()
                        .zip(&cb.children)
                        .all(|(&x, &y)| self.same_shape(x, other, y))
            }
            (Some(na), Some(nb)) => na == nb,
            _ => false,
        }
    }
}

/// Trees compare by structure and values, not by tree or handle identity.
impl<T: PathValue> PartialEq for PathTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(self.root, other, other.root)
    }
}

fn reject_foreign_composite<T>(node: &PathNode<T>) -> PathResult<()> {
    match node {
        PathNode::Composite(c) if !c.children.is_empty() => Err(PathError::validation(
            "composite nodes must be built inside their tree",
        )),
        _ => Ok(()),
    }
}

fn unknown_node() -> PathError {
    PathError::validation("unknown path node handle")
}

#[cfg(test)]
#[path = "../../tests/unit/path/tree.rs"]
mod tests;
