use super::*;

fn model() -> PathModel {
    let mut model = PathModel::new();
    model
        .deserialize(
            r#"[
          { "Type": "CompositePath", "Data": "dvec3", "Name": "CameraEye",
            "Paths": [
              { "Type": "LinearPath", "Duration": 2, "CtrlPts": [[0, 0, 0], [1, 2, 3]] },
              { "Type": "CompositePath", "Paths": [
                { "Type": "PointPath", "Duration": 0.5, "CtrlPts": [[1, 2, 3]] }
              ] }
            ] },
          { "Type": "CompositePath", "Data": "double", "Name": "CameraFoV",
            "Paths": [
              { "Type": "CubicSplinePath", "Duration": 4, "CtrlPts": [60, 50, 40] }
            ] }
        ]"#,
        )
        .unwrap();
    model
}

#[test]
fn tree_mirrors_role_structure() {
    let view = build_tree_view(&model());
    let labels: Vec<_> = view.roots.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["CameraEye [2.5s]", "CameraFoV [4s]"]);

    let eye = &view.roots[0];
    assert_eq!(eye.kind, RowKind::Role);
    assert!(!eye.is_selectable());
    assert_eq!(eye.children[0].label, "Linear [2s]");
    assert!(eye.children[0].is_selectable());
    assert_eq!(eye.children[1].label, "Composite [0.5s]");
    assert!(!eye.children[1].is_selectable());
    assert_eq!(eye.children[1].children[0].label, "Point [0.5s]");

    assert_eq!(view.roots[1].children[0].label, "Cubic Spline [4s]");
}

#[test]
fn segments_list_every_primitive_with_its_role() {
    let view = build_tree_view(&model());
    let roles: Vec<_> = view.segments.iter().map(|s| s.role.as_str()).collect();
    assert_eq!(roles, vec!["CameraEye", "CameraEye", "CameraFoV"]);
    assert_eq!(
        view.roots[0].children[0].segment(),
        Some(&view.segments[0])
    );
}

#[test]
fn segment_view_seeds_fields_from_current_values() {
    let model = model();
    let view = build_tree_view(&model);

    let linear = segment_view(&model, &view.segments[0]).unwrap();
    assert_eq!(linear.kind, PathKind::Linear);
    assert_eq!(linear.duration, 2.0);
    assert_eq!(linear.columns, &["X", "Y", "Z"]);
    assert_eq!(linear.rows, vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0, 3.0]]);

    let fov = segment_view(&model, &view.segments[2]).unwrap();
    assert_eq!(fov.columns, &["Value"]);
    assert_eq!(fov.rows, vec![vec![60.0], vec![50.0], vec![40.0]]);
    assert!(!fov.debug_line_visible);
}

#[test]
fn composite_and_unknown_segments_are_rejected() {
    let model = model();
    let eye = model.camera_eye().unwrap();
    let composite = SegmentRef {
        role: "CameraEye".to_string(),
        tree: eye.id(),
        node: eye.children(eye.root())[1],
    };
    assert!(segment_view(&model, &composite).is_err());

    let unknown = SegmentRef {
        role: "Nope".to_string(),
        tree: eye.id(),
        node: eye.root(),
    };
    assert!(segment_view(&model, &unknown).is_err());
}

#[test]
fn segments_of_a_replaced_tree_are_stale() {
    let mut model = model();
    let view = build_tree_view(&model);
    let linear = view.segments[0].clone();
    assert_eq!(linear.tree, model.camera_eye().unwrap().id());

    let fresh = model.camera_eye().unwrap().clone();
    model.insert_vector("CameraEye", fresh).unwrap();
    assert!(segment_view(&model, &linear).is_ok());

    model
        .deserialize(
            r#"[{ "Type": "CompositePath", "Data": "dvec3", "Name": "CameraEye",
                  "Paths": [{ "Type": "LinearPath", "Duration": 9,
                              "CtrlPts": [[0, 0, 0], [1, 1, 1]] }] }]"#,
        )
        .unwrap();
    let err = segment_view(&model, &linear).unwrap_err();
    assert!(err.to_string().contains("display the tree again"));
    let view = build_tree_view(&model);
    assert_eq!(segment_view(&model, &view.segments[0]).unwrap().duration, 9.0);
}
