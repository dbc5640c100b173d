use super::*;
use crate::model::reader::read_document;
use glam::DVec3;
use serde_json::json;

fn fruit_channel() -> Channel {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    tree.add_path(
        root,
        LinearPath::new(2.0, DVec3::ZERO, DVec3::new(0.0, 10.0, 0.0)).unwrap(),
    )
    .unwrap();
    Channel::Vector(tree)
}

#[test]
fn writes_documented_shape() {
    let channel = fruit_channel();
    let text = write_document([("TheFruit", &channel)]).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        doc,
        json!([{
            "Type": "CompositePath",
            "Data": "dvec3",
            "Name": "TheFruit",
            "Paths": [{
                "Type": "LinearPath",
                "Duration": 2.0,
                "CtrlPts": [[0.0, 0.0, 0.0], [0.0, 10.0, 0.0]]
            }]
        }])
    );
}

#[test]
fn fields_are_emitted_in_document_order() {
    let channel = fruit_channel();
    let text = write_document([("TheFruit", &channel)]).unwrap();
    let ty = text.find("\"Type\"").unwrap();
    let data = text.find("\"Data\"").unwrap();
    let name = text.find("\"Name\"").unwrap();
    let paths = text.find("\"Paths\"").unwrap();
    assert!(ty < data && data < name && name < paths);
    assert!(text.contains("2.0"));
}

#[test]
fn nested_composites_and_points_survive_a_round_trip() {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    tree.add_path(root, PointPath::new(0.5, 1.25).unwrap()).unwrap();
    let inner = tree.add_composite(root).unwrap();
    tree.add_path(inner, BasisSplinePath::new(3.0, vec![0.1, 0.2, 0.4, 0.8]).unwrap())
        .unwrap();
    tree.add_path(root, CubicSplinePath::new(1.5, vec![2.0, -1.0]).unwrap())
        .unwrap();
    let channel = Channel::Scalar(tree);

    let text = write_document([("Extra", &channel)]).unwrap();
    let back = read_document(&text).unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].0, "Extra");
    assert_eq!(back[0].1, channel);
}

#[test]
fn primitive_root_is_wrapped_in_the_role_entry() {
    let tree = PathTree::from_node(PointPath::new(1.0, 3.0).unwrap()).unwrap();
    let channel = Channel::Scalar(tree);
    let text = write_document([("DayTime", &channel)]).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc[0]["Paths"][0]["Type"], "PointPath");
    assert_eq!(doc[0]["Paths"][0]["CtrlPts"], json!([3.0]));
}

#[test]
fn empty_document_is_an_empty_array() {
    let text = write_document(std::iter::empty()).unwrap();
    assert_eq!(text.trim(), "[]");
}

#[test]
fn non_finite_values_edited_in_place_fail_the_write() {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    let linear = tree
        .add_path(root, LinearPath::new(1.0, 0.0, 1.0).unwrap())
        .unwrap();
    tree.node_mut(linear).unwrap().ctrl_pts_mut()[1] = f64::INFINITY;
    let channel = Channel::Scalar(tree);

    let err = write_document([("DayTime", &channel)]).unwrap_err();
    assert!(err.to_string().contains("DayTime"));
    assert!(err.to_string().contains("LinearPath"));
}
