use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::model::{paths::PathModel, role::Channel};
use crate::path::{
    primitive::{LinearPath, PointPath},
    spline::{BasisSplinePath, CubicSplinePath},
    tree::{CompositePath, NodeId, PathKind, PathTree, TreeId},
    visit::{PathVisitor, walk},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Address of one editable primitive: the role owning it and its handle in that role's tree.
///
/// A reference goes stale when the role's tree is replaced (load, applied text, insert); stale
/// references are rejected until the tree is displayed again.
pub struct SegmentRef {
    /// Role name.
    pub role: String,
    /// Tree the handle belongs to.
    pub tree: TreeId,
    /// Primitive handle inside the role's tree.
    pub node: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
/// What a row of the path tree stands for.
pub enum RowKind {
    /// Top-level row of a role.
    Role,
    /// Grouping row of a nested composite.
    Composite,
    /// Editable primitive.
    Segment(SegmentRef),
}

#[derive(Clone, Debug, PartialEq)]
/// One row of the displayed path tree.
pub struct TreeRow {
    /// Display text, e.g. `"Linear [2s]"`.
    pub label: String,
    /// Row meaning.
    pub kind: RowKind,
    /// Nested rows.
    pub children: Vec<TreeRow>,
}

impl TreeRow {
    /// Only primitive rows can be selected.
    pub fn is_selectable(&self) -> bool {
        matches!(self.kind, RowKind::Segment(_))
    }

    /// Segment this row edits, if any.
    pub fn segment(&self) -> Option<&SegmentRef> {
        match &self.kind {
            RowKind::Segment(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Display projection of a whole [`PathModel`].
pub struct PathTreeView {
    /// One row per role.
    pub roots: Vec<TreeRow>,
    /// Every editable primitive, in display order.
    pub segments: Vec<SegmentRef>,
}

#[derive(Clone, Debug, PartialEq)]
/// Editable fields of the selected primitive.
pub struct SegmentView {
    /// Primitive shown.
    pub segment: SegmentRef,
    /// Primitive kind.
    pub kind: PathKind,
    /// Current duration in seconds.
    pub duration: f64,
    /// One label per value component (`Value`, or `X`/`Y`/`Z`).
    pub columns: &'static [&'static str],
    /// One row per control point, one cell per component.
    pub rows: Vec<Vec<f64>>,
    /// Whether the owning role's debug trajectory is shown.
    pub debug_line_visible: bool,
}

fn duration_label(prefix: &str, duration: f64) -> String {
    format!("{prefix} [{duration}s]")
}

struct RowBuilder<'a> {
    role: &'a str,
    tree: TreeId,
    stack: Vec<Vec<TreeRow>>,
    segments: &'a mut Vec<SegmentRef>,
}

impl RowBuilder<'_> {
    fn segment(&mut self, id: NodeId, kind: PathKind, duration: f64) {
        let segment = SegmentRef {
            role: self.role.to_string(),
            tree: self.tree,
            node: id,
        };
        self.segments.push(segment.clone());
        if let Some(top) = self.stack.last_mut() {
            top.push(TreeRow {
                label: duration_label(kind.label(), duration),
                kind: RowKind::Segment(segment),
                children: Vec::new(),
            });
        }
    }
}

impl<T: PathValue> PathVisitor<T> for RowBuilder<'_> {
    fn visit_point(&mut self, id: NodeId, path: &PointPath<T>) {
        self.segment(id, PathKind::Point, path.duration());
    }

    fn visit_linear(&mut self, id: NodeId, path: &LinearPath<T>) {
        self.segment(id, PathKind::Linear, path.duration());
    }

    fn visit_cubic_spline(&mut self, id: NodeId, path: &CubicSplinePath<T>) {
        self.segment(id, PathKind::CubicSpline, path.duration());
    }

    fn visit_basis_spline(&mut self, id: NodeId, path: &BasisSplinePath<T>) {
        self.segment(id, PathKind::BasisSpline, path.duration());
    }

    fn enter_composite(&mut self, _id: NodeId, _path: &CompositePath, _duration: f64) {
        self.stack.push(Vec::new());
    }

    fn leave_composite(&mut self, _id: NodeId, _path: &CompositePath, duration: f64) {
        let children = self.stack.pop().unwrap_or_default();
        if let Some(parent) = self.stack.last_mut() {
            parent.push(TreeRow {
                label: duration_label(PathKind::Composite.label(), duration),
                kind: RowKind::Composite,
                children,
            });
        }
    }
}

fn role_row<T: PathValue>(
    role: &str,
    tree: &PathTree<T>,
    segments: &mut Vec<SegmentRef>,
) -> Option<TreeRow> {
    let mut builder = RowBuilder {
        role,
        tree: tree.id(),
        stack: vec![Vec::new()],
        segments,
    };
    walk(tree, &mut builder);
    let mut row = builder.stack.pop()?.pop()?;
    row.label = duration_label(role, tree.duration());
    if row.kind == RowKind::Composite {
        row.kind = RowKind::Role;
    }
    Some(row)
}

/// Build the row tree of every role of `model`, in role order.
pub fn build_tree_view(model: &PathModel) -> PathTreeView {
    let mut view = PathTreeView::default();
    for name in model.roles() {
        let row = match model.channel(name) {
            Some(Channel::Scalar(t)) => role_row(name, t, &mut view.segments),
            Some(Channel::Vector(t)) => role_row(name, t, &mut view.segments),
            None => None,
        };
        view.roots.extend(row);
    }
    view
}

/// Fail unless `segment` was taken from `tree`.
pub(crate) fn check_segment_tree<T: PathValue>(
    tree: &PathTree<T>,
    segment: &SegmentRef,
) -> PathResult<()> {
    if tree.id() != segment.tree {
        return Err(PathError::validation(format!(
            "segment of role {} refers to a replaced path tree; display the tree again",
            segment.role
        )));
    }
    Ok(())
}

fn tree_segment_view<T: PathValue>(
    tree: &PathTree<T>,
    segment: &SegmentRef,
    debug_line_visible: bool,
) -> PathResult<SegmentView> {
    check_segment_tree(tree, segment)?;
    let node = tree
        .node(segment.node)
        .ok_or_else(|| PathError::validation(format!("role {} has no such segment", segment.role)))?;
    let kind = node.kind();
    if kind == PathKind::Composite {
        return Err(PathError::validation("composite rows are not selectable"));
    }
    let columns = T::COMPONENT_LABELS;
    let rows = node
        .ctrl_pts()
        .iter()
        .map(|pt| (0..columns.len()).map(|c| pt.component(c)).collect())
        .collect();
    Ok(SegmentView {
        segment: segment.clone(),
        kind,
        duration: tree.node_duration(segment.node),
        columns,
        rows,
        debug_line_visible,
    })
}

/// Fields of `segment`, seeded from its current values.
pub fn segment_view(model: &PathModel, segment: &SegmentRef) -> PathResult<SegmentView> {
    let visible = model.is_debug_line_visible(&segment.role);
    match model.channel(&segment.role) {
        Some(Channel::Scalar(t)) => tree_segment_view(t, segment, visible),
        Some(Channel::Vector(t)) => tree_segment_view(t, segment, visible),
        None => Err(PathError::validation(format!("unknown role {}", segment.role))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/view.rs"]
mod tests;
