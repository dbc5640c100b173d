use std::collections::HashSet;
use std::fmt;

use glam::DVec3;
use serde_json::{Map, Value};

use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::model::role::{Channel, Payload, Role};
use crate::path::{
    primitive::{LinearPath, PointPath},
    spline::{BasisSplinePath, CubicSplinePath},
    tree::{NodeId, PathKind, PathNode, PathTree},
};

#[derive(Clone, Debug)]
enum LocElem {
    Field(&'static str),
    Index(usize),
}

/// JSON location of the value being read, rendered as `$[0].Paths[2]`.
#[derive(Clone, Debug, Default)]
struct Loc(Vec<LocElem>);

impl Loc {
    fn field(&self, name: &'static str) -> Self {
        let mut next = self.clone();
        next.0.push(LocElem::Field(name));
        next
    }

    fn index(&self, i: usize) -> Self {
        let mut next = self.clone();
        next.0.push(LocElem::Index(i));
        next
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for e in &self.0 {
            match e {
                LocElem::Field(name) => write!(f, ".{name}")?,
                LocElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

fn locate(loc: &Loc, err: PathError) -> PathError {
    match err {
        PathError::Validation(m) => PathError::validation(format!("{loc}: {m}")),
        PathError::Structure(m) => PathError::structure(format!("{loc}: {m}")),
        PathError::Value(m) => PathError::value(format!("{loc}: {m}")),
        other => other,
    }
}

fn describe(v: &Value) -> String {
    match v {
        Value::String(s) => format!("string {s:?}"),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn as_object<'a>(v: &'a Value, loc: &Loc) -> PathResult<&'a Map<String, Value>> {
    v.as_object()
        .ok_or_else(|| PathError::structure(format!("{loc}: expected an object")))
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &'static str, loc: &Loc) -> PathResult<&'a str> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(PathError::structure(format!(
            "{}: expected a string, got {}",
            loc.field(key),
            describe(other)
        ))),
        None => Err(PathError::structure(format!("{}: missing", loc.field(key)))),
    }
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &'static str, loc: &Loc) -> PathResult<&'a [Value]> {
    match obj.get(key) {
        Some(Value::Array(a)) => Ok(a),
        Some(other) => Err(PathError::structure(format!(
            "{}: expected an array, got {}",
            loc.field(key),
            describe(other)
        ))),
        None => Err(PathError::structure(format!("{}: missing", loc.field(key)))),
    }
}

fn duration_field(obj: &Map<String, Value>, loc: &Loc) -> PathResult<f64> {
    let loc = loc.field("Duration");
    match obj.get("Duration") {
        Some(v) => v.as_f64().ok_or_else(|| {
            PathError::structure(format!("{loc}: expected a number, got {}", describe(v)))
        }),
        None => Err(PathError::structure(format!("{loc}: missing"))),
    }
}

fn read_ctrl_pts<T: PathValue>(raw: &[Value], loc: &Loc) -> PathResult<Vec<T>> {
    raw.iter()
        .enumerate()
        .map(|(k, v)| {
            T::from_json(v).ok_or_else(|| {
                PathError::value(format!(
                    "{}: expected {}, got {}",
                    loc.index(k),
                    T::expected_shape(),
                    describe(v)
                ))
            })
        })
        .collect()
}

fn exact<const N: usize, T: Copy>(pts: &[T], kind: PathKind, loc: &Loc) -> PathResult<[T; N]> {
    <[T; N]>::try_from(pts).map_err(|_| {
        PathError::structure(format!(
            "{loc}: {} takes exactly {N} control point(s), got {}",
            kind.type_name(),
            pts.len()
        ))
    })
}

fn read_segment<T: PathValue>(
    kind: PathKind,
    obj: &Map<String, Value>,
    loc: &Loc,
) -> PathResult<PathNode<T>> {
    let duration = duration_field(obj, loc)?;
    let pts_loc = loc.field("CtrlPts");
    let pts = read_ctrl_pts::<T>(array_field(obj, "CtrlPts", loc)?, &pts_loc)?;

    let node = match kind {
        PathKind::Point => {
            let [v] = exact::<1, T>(&pts, kind, &pts_loc)?;
            PointPath::new(duration, v).map(PathNode::from)
        }
        PathKind::Linear => {
            let [begin, end] = exact::<2, T>(&pts, kind, &pts_loc)?;
            LinearPath::new(duration, begin, end).map(PathNode::from)
        }
        PathKind::CubicSpline => CubicSplinePath::new(duration, pts).map(PathNode::from),
        PathKind::BasisSpline => BasisSplinePath::new(duration, pts).map(PathNode::from),
        PathKind::Composite => Err(PathError::structure("composite is not a segment")),
    };
    node.map_err(|e| locate(loc, e))
}

fn read_paths<T: PathValue>(
    obj: &Map<String, Value>,
    loc: &Loc,
    tree: &mut PathTree<T>,
    parent: NodeId,
) -> PathResult<()> {
    let paths_loc = loc.field("Paths");
    for (j, entry) in array_field(obj, "Paths", loc)?.iter().enumerate() {
        let entry_loc = paths_loc.index(j);
        let entry = as_object(entry, &entry_loc)?;
        let type_name = str_field(entry, "Type", &entry_loc)?;
        let kind = PathKind::from_type_name(type_name).ok_or_else(|| {
            PathError::structure(format!(
                "{}: unknown path {type_name:?}",
                entry_loc.field("Type")
            ))
        })?;

        if kind == PathKind::Composite {
            let id = tree.add_composite(parent)?;
            read_paths(entry, &entry_loc, tree, id)?;
        } else {
            let node = read_segment::<T>(kind, entry, &entry_loc)?;
            tree.add_path(parent, node)?;
        }
    }
    Ok(())
}

fn read_tree<T: PathValue>(obj: &Map<String, Value>, loc: &Loc) -> PathResult<PathTree<T>> {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    read_paths(obj, loc, &mut tree, root)?;
    Ok(tree)
}

/// Parse a path document into `(role name, channel)` pairs, in document order.
///
/// The whole document is rejected on the first error; nothing is returned partially.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn read_document(text: &str) -> PathResult<Vec<(String, Channel)>> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| PathError::structure(format!("invalid path document JSON: {e}")))?;
    read_value(&doc)
}

/// Parse an already-decoded path document.
pub fn read_value(doc: &Value) -> PathResult<Vec<(String, Channel)>> {
    let top = Loc::default();
    let items = doc.as_array().ok_or_else(|| {
        PathError::structure(format!(
            "{top}: top level must be an array of CompositePath objects"
        ))
    })?;

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let loc = top.index(i);
        let obj = as_object(item, &loc)?;

        let type_name = str_field(obj, "Type", &loc)?;
        if type_name != PathKind::Composite.type_name() {
            return Err(PathError::structure(format!(
                "{}: top path must be CompositePath, got {type_name:?}",
                loc.field("Type")
            )));
        }

        let data = str_field(obj, "Data", &loc)?;
        let payload = Payload::from_data_tag(data).ok_or_else(|| {
            PathError::structure(format!(
                "{}: paths are only specialized for \"double\" or \"dvec3\", got {data:?}",
                loc.field("Data")
            ))
        })?;

        let name = str_field(obj, "Name", &loc)?;
        if name.is_empty() {
            return Err(PathError::structure(format!(
                "{}: role name must not be empty",
                loc.field("Name")
            )));
        }
        if let Some(role) = Role::from_name(name)
            && role.payload() != payload
        {
            return Err(PathError::structure(format!(
                "{}: role {name} carries {:?} data, got {data:?}",
                loc.field("Data"),
                role.payload().data_tag()
            )));
        }
        if !seen.insert(name) {
            return Err(PathError::structure(format!(
                "{}: role {name} appears more than once",
                loc.field("Name")
            )));
        }

        let channel = match payload {
            Payload::Scalar => Channel::Scalar(read_tree::<f64>(obj, &loc)?),
            Payload::Vector => Channel::Vector(read_tree::<DVec3>(obj, &loc)?),
        };
        out.push((name.to_string(), channel));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/model/reader.rs"]
mod tests;
