use std::marker::PhantomData;

use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::model::role::{Channel, Payload};
use crate::path::{
    primitive::{LinearPath, PointPath, check_finite},
    spline::{BasisSplinePath, CubicSplinePath},
    tree::{CompositePath, NodeId, PathKind, PathTree},
    visit::{PathVisitor, walk_from},
};

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct RoleDoc<'a> {
    #[serde(rename = "Type")]
    kind: &'static str,
    data: &'static str,
    name: &'a str,
    paths: Vec<EntryDoc>,
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
enum EntryDoc {
    Segment(SegmentDoc),
    Composite(NestedDoc),
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SegmentDoc {
    #[serde(rename = "Type")]
    kind: &'static str,
    duration: f64,
    ctrl_pts: Vec<serde_json::Value>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct NestedDoc {
    #[serde(rename = "Type")]
    kind: &'static str,
    paths: Vec<EntryDoc>,
}

/// Collects document entries; the bottom of the stack is the role wrapper.
struct EntryCollector<T> {
    stack: Vec<Vec<EntryDoc>>,
    invalid: Option<PathError>,
    _payload: PhantomData<fn() -> T>,
}

impl<T: PathValue> EntryCollector<T> {
    fn new() -> Self {
        Self {
            stack: vec![Vec::new()],
            invalid: None,
            _payload: PhantomData,
        }
    }

    fn segment(&mut self, kind: PathKind, duration: f64, pts: &[T]) {
        if self.invalid.is_none() && check_finite(pts).is_err() {
            self.invalid = Some(PathError::validation(format!(
                "cannot write a {} with a non-finite control point",
                kind.type_name()
            )));
        }
        if let Some(top) = self.stack.last_mut() {
            top.push(EntryDoc::Segment(SegmentDoc {
                kind: kind.type_name(),
                duration,
                ctrl_pts: pts.iter().map(PathValue::to_json).collect(),
            }));
        }
    }

    fn finish(mut self) -> PathResult<Vec<EntryDoc>> {
        match self.invalid {
            Some(e) => Err(e),
            None => Ok(self.stack.pop().unwrap_or_default()),
        }
    }
}

impl<T: PathValue> PathVisitor<T> for EntryCollector<T> {
    fn visit_point(&mut self, _id: NodeId, path: &PointPath<T>) {
        self.segment(PathKind::Point, path.duration(), path.ctrl_pts());
    }

    fn visit_linear(&mut self, _id: NodeId, path: &LinearPath<T>) {
        self.segment(PathKind::Linear, path.duration(), path.ctrl_pts());
    }

    fn visit_cubic_spline(&mut self, _id: NodeId, path: &CubicSplinePath<T>) {
        self.segment(PathKind::CubicSpline, path.duration(), path.ctrl_pts());
    }

    fn visit_basis_spline(&mut self, _id: NodeId, path: &BasisSplinePath<T>) {
        self.segment(PathKind::BasisSpline, path.duration(), path.ctrl_pts());
    }

    fn enter_composite(&mut self, _id: NodeId, _path: &CompositePath, _duration: f64) {
        self.stack.push(Vec::new());
    }

    fn leave_composite(&mut self, _id: NodeId, _path: &CompositePath, _duration: f64) {
        let paths = self.stack.pop().unwrap_or_default();
        if let Some(parent) = self.stack.last_mut() {
            parent.push(EntryDoc::Composite(NestedDoc {
                kind: PathKind::Composite.type_name(),
                paths,
            }));
        }
    }
}

fn collect_entries<T: PathValue>(tree: &PathTree<T>) -> PathResult<Vec<EntryDoc>> {
    let mut collector = EntryCollector::<T>::new();
    let root = tree.root();
    let children = tree.children(root);
    // The role wrapper stands in for a composite root.
    if tree.node(root).and_then(|n| n.as_composite()).is_some() {
        for &child in children {
            walk_from(tree, child, &mut collector);
        }
    } else {
        walk_from(tree, root, &mut collector);
    }
    collector.finish()
}

fn role_doc<'a>(name: &'a str, channel: &Channel) -> PathResult<RoleDoc<'a>> {
    let (payload, paths) = match channel {
        Channel::Scalar(t) => (Payload::Scalar, collect_entries(t)),
        Channel::Vector(t) => (Payload::Vector, collect_entries(t)),
    };
    let paths = paths.map_err(|e| match e {
        PathError::Validation(m) => PathError::validation(format!("role {name}: {m}")),
        other => other,
    })?;
    Ok(RoleDoc {
        kind: PathKind::Composite.type_name(),
        data: payload.data_tag(),
        name,
        paths,
    })
}

/// Render `(role name, channel)` pairs as a pretty-printed path document, in the given order.
///
/// Fails without output when a control point is not finite.
pub fn write_document<'a, I>(channels: I) -> PathResult<String>
where
    I: IntoIterator<Item = (&'a str, &'a Channel)>,
{
    let docs = channels
        .into_iter()
        .map(|(name, channel)| role_doc(name, channel))
        .collect::<PathResult<Vec<RoleDoc<'a>>>>()?;
    serde_json::to_string_pretty(&docs)
        .map_err(|e| PathError::Other(anyhow::Error::new(e).context("serialize path document")))
}

#[cfg(test)]
#[path = "../../tests/unit/model/writer.rs"]
mod tests;
