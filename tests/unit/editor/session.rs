use super::*;
use glam::DVec3;

const DOC: &str = r#"[
  { "Type": "CompositePath", "Data": "dvec3", "Name": "TheFruit",
    "Paths": [
      { "Type": "LinearPath", "Duration": 2, "CtrlPts": [[0, 0, 0], [0, 10, 0]] }
    ] },
  { "Type": "CompositePath", "Data": "double", "Name": "DayTime",
    "Paths": [
      { "Type": "BasisSplinePath", "Duration": 4, "CtrlPts": [0, 6, 12] }
    ] }
]"#;

#[derive(Default)]
struct RecordingOverlay {
    shown: Vec<(String, Vec<DVec3>)>,
    hidden: Vec<String>,
}

impl DebugOverlay for RecordingOverlay {
    fn show_line(&mut self, role: &str, points: &[DVec3]) {
        self.shown.push((role.to_string(), points.to_vec()));
    }

    fn hide_line(&mut self, role: &str) {
        self.hidden.push(role.to_string());
    }
}

fn setup() -> (PathEditor, PathModel, RecordingOverlay) {
    let mut model = PathModel::new();
    model.deserialize(DOC).unwrap();
    let mut config = PathsConfig::default();
    config.debug_line_samples = 3;
    (PathEditor::new(config), model, RecordingOverlay::default())
}

fn select_first(
    editor: &mut PathEditor,
    model: &mut PathModel,
    overlay: &mut RecordingOverlay,
) -> SegmentRef {
    editor
        .handle(model, overlay, EditorCommand::Display)
        .unwrap();
    let segment = editor.view().segments[0].clone();
    editor
        .handle(model, overlay, EditorCommand::Select(segment.clone()))
        .unwrap();
    segment
}

#[test]
fn display_rebuilds_tree_and_clears_selection() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    assert!(editor.selected().is_some());

    let events = editor
        .handle(&mut model, &mut overlay, EditorCommand::Display)
        .unwrap();
    assert!(matches!(events[0], EditorEvent::TreeRebuilt(ref v) if v.roots.len() == 2));
    assert_eq!(events[1], EditorEvent::PathChanged);
    assert!(editor.selected().is_none());
}

#[test]
fn select_shows_current_fields() {
    let (mut editor, mut model, mut overlay) = setup();
    editor
        .handle(&mut model, &mut overlay, EditorCommand::Display)
        .unwrap();
    let segment = editor.view().segments[1].clone();
    let events = editor
        .handle(&mut model, &mut overlay, EditorCommand::Select(segment))
        .unwrap();
    let EditorEvent::SegmentShown(shown) = &events[0] else {
        panic!("expected SegmentShown, got {events:?}");
    };
    assert_eq!(shown.duration, 4.0);
    assert_eq!(shown.rows, vec![vec![0.0], vec![6.0], vec![12.0]]);
}

#[test]
fn edits_without_selection_do_nothing() {
    let (mut editor, mut model, mut overlay) = setup();
    let before = model.clone();
    for cmd in [
        EditorCommand::SetDuration(9.0),
        EditorCommand::SetControlPoint {
            row: 0,
            component: 0,
            value: 1.0,
        },
        EditorCommand::SetDebugLineVisible(true),
    ] {
        let events = editor.handle(&mut model, &mut overlay, cmd).unwrap();
        assert!(events.is_empty());
    }
    assert_eq!(model, before);
}

#[test]
fn set_duration_updates_the_selected_primitive() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    let events = editor
        .handle(&mut model, &mut overlay, EditorCommand::SetDuration(5.0))
        .unwrap();
    assert_eq!(events, vec![EditorEvent::PathChanged]);
    assert_eq!(model.the_fruit().unwrap().duration(), 5.0);

    assert!(
        editor
            .handle(&mut model, &mut overlay, EditorCommand::SetDuration(-1.0))
            .is_err()
    );
    assert_eq!(model.the_fruit().unwrap().duration(), 5.0);
}

#[test]
fn set_control_point_changes_one_component() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    let events = editor
        .handle(
            &mut model,
            &mut overlay,
            EditorCommand::SetControlPoint {
                row: 1,
                component: 2,
                value: 4.0,
            },
        )
        .unwrap();
    assert_eq!(events, vec![EditorEvent::PathChanged]);
    assert_eq!(
        model.the_fruit().unwrap().value(2.0),
        Some(DVec3::new(0.0, 10.0, 4.0))
    );
    assert!(overlay.shown.is_empty());
}

#[test]
fn set_control_point_rejects_bad_input() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    let before = model.clone();
    for (row, component, value) in [(0, 0, f64::NAN), (0, 3, 1.0), (2, 0, 1.0)] {
        let cmd = EditorCommand::SetControlPoint {
            row,
            component,
            value,
        };
        assert!(editor.handle(&mut model, &mut overlay, cmd).is_err());
    }
    assert_eq!(model, before);
}

#[test]
fn visible_debug_line_follows_edits() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    let events = editor
        .handle(
            &mut model,
            &mut overlay,
            EditorCommand::SetDebugLineVisible(true),
        )
        .unwrap();
    assert_eq!(events, vec![EditorEvent::DebugLinesRefreshed]);
    assert_eq!(overlay.shown.len(), 1);

    let events = editor
        .handle(
            &mut model,
            &mut overlay,
            EditorCommand::SetControlPoint {
                row: 1,
                component: 0,
                value: 2.0,
            },
        )
        .unwrap();
    assert_eq!(
        events,
        vec![EditorEvent::PathChanged, EditorEvent::DebugLinesRefreshed]
    );
    let (role, points) = overlay.shown.last().unwrap();
    assert_eq!(role, "TheFruit");
    assert_eq!(
        points,
        &vec![
            DVec3::ZERO,
            DVec3::new(1.0, 5.0, 0.0),
            DVec3::new(2.0, 10.0, 0.0)
        ]
    );

    editor
        .handle(
            &mut model,
            &mut overlay,
            EditorCommand::SetDebugLineVisible(false),
        )
        .unwrap();
    assert_eq!(overlay.hidden, vec!["TheFruit".to_string()]);
}

#[test]
fn apply_text_is_all_or_nothing() {
    let (mut editor, mut model, mut overlay) = setup();
    let before = model.clone();
    let bad = r#"[{ "Type": "CompositePath", "Data": "double", "Name": "DayTime",
        "Paths": [{ "Type": "LinearPath", "Duration": 1, "CtrlPts": [0] }] }]"#;
    assert!(
        editor
            .handle(&mut model, &mut overlay, EditorCommand::ApplyText(bad.to_string()))
            .is_err()
    );
    assert_eq!(model, before);

    let good = r#"[{ "Type": "CompositePath", "Data": "double", "Name": "DayTime",
        "Paths": [{ "Type": "LinearPath", "Duration": 1, "CtrlPts": [0, 24] }] }]"#;
    let events = editor
        .handle(&mut model, &mut overlay, EditorCommand::ApplyText(good.to_string()))
        .unwrap();
    assert!(matches!(events[0], EditorEvent::TreeRebuilt(_)));
    assert_eq!(model.day_time().unwrap().value(0.5), Some(12.0));
}

#[test]
fn save_and_load_use_the_configured_file() {
    let dir = std::path::PathBuf::from("target").join("unit_editor_session");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("paths.pth");

    let (_, mut model, mut overlay) = setup();
    let mut editor = PathEditor::new(PathsConfig::with_path_file(&file));
    let events = editor
        .handle(&mut model, &mut overlay, EditorCommand::Save)
        .unwrap();
    assert_eq!(events, vec![EditorEvent::Saved(file.clone())]);

    let mut fresh = PathModel::new();
    let events = editor
        .handle(&mut fresh, &mut overlay, EditorCommand::Load)
        .unwrap();
    assert_eq!(events[0], EditorEvent::Loaded(file));
    assert_eq!(fresh, model);
}

#[test]
fn failed_load_keeps_the_model() {
    let (_, mut model, mut overlay) = setup();
    let before = model.clone();
    let mut editor = PathEditor::new(PathsConfig::with_path_file("target/no/such/editor.pth"));
    assert!(
        editor
            .handle(&mut model, &mut overlay, EditorCommand::Load)
            .is_err()
    );
    assert_eq!(model, before);
}

#[test]
fn apply_text_removes_roles_left_out_of_the_text() {
    let (mut editor, mut model, mut overlay) = setup();
    assert_eq!(model.roles(), vec!["TheFruit", "DayTime"]);
    let only_day = r#"[{ "Type": "CompositePath", "Data": "double", "Name": "DayTime",
        "Paths": [{ "Type": "PointPath", "Duration": 1, "CtrlPts": [12] }] }]"#;
    let events = editor
        .handle(
            &mut model,
            &mut overlay,
            EditorCommand::ApplyText(only_day.to_string()),
        )
        .unwrap();
    assert_eq!(model.roles(), vec!["DayTime"]);
    let EditorEvent::TreeRebuilt(view) = &events[0] else {
        panic!("expected TreeRebuilt, got {events:?}");
    };
    assert_eq!(view.roots.len(), 1);
    assert!(!model.serialize().unwrap().contains("TheFruit"));
}

#[test]
fn edits_through_a_stale_selection_are_rejected() {
    let (mut editor, mut model, mut overlay) = setup();
    select_first(&mut editor, &mut model, &mut overlay);
    model
        .deserialize(
            r#"[{ "Type": "CompositePath", "Data": "dvec3", "Name": "TheFruit",
                  "Paths": [{ "Type": "LinearPath", "Duration": 4,
                              "CtrlPts": [[1, 1, 1], [2, 2, 2]] }] }]"#,
        )
        .unwrap();
    let before = model.clone();

    for cmd in [
        EditorCommand::SetDuration(1.0),
        EditorCommand::SetControlPoint {
            row: 0,
            component: 0,
            value: 7.0,
        },
    ] {
        assert!(editor.handle(&mut model, &mut overlay, cmd).is_err());
    }
    assert_eq!(model, before);
}
