use super::*;
use glam::DVec3;

fn two_linear() -> PathTree<f64> {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    tree.add_path(root, LinearPath::new(1.0, 0.0, 10.0).unwrap())
        .unwrap();
    tree.add_path(root, LinearPath::new(1.0, 100.0, 200.0).unwrap())
        .unwrap();
    tree
}

#[test]
fn composite_duration_is_sum_of_sub_paths() {
    let mut tree = two_linear();
    let root = tree.root();
    tree.add_path(root, PointPath::new(0.5, 7.0).unwrap()).unwrap();
    assert_eq!(tree.duration(), 2.5);
}

#[test]
fn boundary_belongs_to_the_next_sub_path() {
    let tree = two_linear();
    assert_eq!(tree.value(1.0), Some(100.0));
    assert_eq!(tree.value(0.5), Some(5.0));
    assert_eq!(tree.value(1.5), Some(150.0));
}

#[test]
fn last_window_is_closed_and_composite_clamps() {
    let tree = two_linear();
    assert_eq!(tree.value(2.0), Some(200.0));
    assert_eq!(tree.value(50.0), Some(200.0));
    assert_eq!(tree.value(-3.0), Some(0.0));
}

#[test]
fn zero_duration_sub_paths_are_skipped_unless_last() {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    tree.add_path(root, PointPath::new(0.0, -1.0).unwrap()).unwrap();
    tree.add_path(root, LinearPath::new(2.0, 0.0, 2.0).unwrap())
        .unwrap();
    tree.add_path(root, PointPath::new(0.0, 99.0).unwrap()).unwrap();
    assert_eq!(tree.value(0.0), Some(0.0));
    assert_eq!(tree.value(1.0), Some(1.0));
    assert_eq!(tree.value(2.0), Some(99.0));
}

#[test]
fn nested_composites_shift_local_time() {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    tree.add_path(root, PointPath::new(1.0, DVec3::X).unwrap())
        .unwrap();
    let inner = tree.add_composite(root).unwrap();
    tree.add_path(inner, LinearPath::new(2.0, DVec3::ZERO, DVec3::new(0.0, 4.0, 0.0)).unwrap())
        .unwrap();
    assert_eq!(tree.duration(), 3.0);
    assert_eq!(tree.value(2.0), Some(DVec3::new(0.0, 2.0, 0.0)));
    assert_eq!(tree.children(root).len(), 2);
}

#[test]
fn empty_composite_has_no_value() {
    let tree = PathTree::<f64>::new_composite();
    assert_eq!(tree.duration(), 0.0);
    assert_eq!(tree.value(0.0), None);
}

#[test]
fn sub_paths_only_attach_to_composites() {
    let mut tree = PathTree::from_node(PointPath::new(1.0, 0.0).unwrap()).unwrap();
    let root = tree.root();
    let err = tree
        .add_path(root, PointPath::new(1.0, 1.0).unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("PointPath"));
    assert_eq!(tree.value(0.3), Some(0.0));
}

#[test]
fn composite_duration_cannot_be_set() {
    let mut tree = two_linear();
    let root = tree.root();
    assert!(tree.set_duration(root, 4.0).is_err());

    let first = tree.children(root)[0];
    tree.set_duration(first, 4.0).unwrap();
    assert_eq!(tree.duration(), 5.0);
    assert_eq!(tree.value(2.0), Some(5.0));
}

#[test]
fn set_ctrl_pt_updates_evaluation() {
    let mut tree = PathTree::new_composite();
    let root = tree.root();
    let spline = tree
        .add_path(root, CubicSplinePath::new(2.0, vec![0.0, 1.0, 2.0]).unwrap())
        .unwrap();
    tree.set_ctrl_pt(spline, 2, 8.0).unwrap();
    assert!((tree.value(2.0).unwrap() - 8.0).abs() < 1e-9);
    assert_eq!(tree.ctrl_pts(spline), &[0.0, 1.0, 8.0]);
    assert!(tree.set_ctrl_pt(spline, 3, 0.0).is_err());
    assert!(tree.set_ctrl_pt(root, 0, 0.0).is_err());
}

#[test]
fn trees_compare_by_structure() {
    assert_eq!(two_linear(), two_linear());
    let mut other = two_linear();
    let first = other.children(other.root())[0];
    other.set_ctrl_pt(first, 0, 1.0).unwrap();
    assert_ne!(two_linear(), other);
}

#[test]
fn kind_names_round_trip() {
    for kind in [
        PathKind::Point,
        PathKind::Linear,
        PathKind::CubicSpline,
        PathKind::BasisSpline,
        PathKind::Composite,
    ] {
        assert_eq!(PathKind::from_type_name(kind.type_name()), Some(kind));
    }
    assert_eq!(PathKind::from_type_name("BezierPath"), None);
}

#[test]
fn primitive_root_can_be_wrapped() {
    let tree = PathTree::from_node(LinearPath::new(2.0, 0.0, 4.0).unwrap())
        .unwrap()
        .into_composite_root();
    let root = tree.root();
    assert_eq!(tree.node(root).map(PathNode::kind), Some(PathKind::Composite));
    assert_eq!(tree.children(root).len(), 1);
    assert_eq!(tree.value(1.0), Some(2.0));

    let again = tree.clone().into_composite_root();
    assert_eq!(again.len(), tree.len());
}

#[test]
fn set_ctrl_pt_rejects_non_finite_values() {
    let mut tree = two_linear();
    let first = tree.children(tree.root())[0];
    assert!(tree.set_ctrl_pt(first, 1, f64::NAN).is_err());
    assert_eq!(tree.ctrl_pts(first), &[0.0, 10.0]);
}
