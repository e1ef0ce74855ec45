use campkit_designer::{
    CampsiteMap, EditorConfig, EditorError, HistoryActionType, MapEditor, Module, ModuleMetadata,
    ModuleType, Position, ResizeHandle, Size, TransformKind, KEY_SHIFT,
};

const EPS: f64 = 1e-6;

fn site(id: &str, x: f64, y: f64, w: f64, h: f64) -> Module {
    Module::with_id(
        id,
        ModuleMetadata::default_for(ModuleType::Campsite),
        Position::new(x, y),
        Size::new(w, h),
    )
}

fn editor() -> MapEditor {
    MapEditor::new(
        CampsiteMap::new("Riverside", Size::new(1000.0, 800.0)),
        EditorConfig::default(),
    )
}

fn editor_with(modules: Vec<Module>) -> MapEditor {
    let mut map = CampsiteMap::new("Riverside", Size::new(1000.0, 800.0));
    for module in modules {
        map.add_module(module).unwrap();
    }
    MapEditor::new(map, EditorConfig::default())
}

#[test]
fn test_new_editor_records_base_state() {
    let editor = editor();
    assert_eq!(editor.history().undo_stack_size(), 1);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.is_modified());
}

#[test]
fn test_add_then_undo_redo() {
    let mut editor = editor();
    let id = editor
        .add_module(site("pitch-1", 100.0, 100.0, 50.0, 50.0))
        .unwrap();
    assert!(editor.can_undo());
    assert!(editor.is_modified());
    assert_eq!(editor.undo_label().as_deref(), Some("Undo Add module"));

    assert!(editor.undo());
    assert!(!editor.map().contains(&id));
    assert_eq!(editor.redo_label().as_deref(), Some("Redo Add module"));

    assert!(editor.redo());
    assert!(editor.map().contains(&id));
    assert!(!editor.can_redo());
}

#[test]
fn test_duplicate_add_is_rejected_without_history() {
    let mut editor = editor_with(vec![site("a", 0.0, 0.0, 50.0, 50.0)]);
    let err = editor.add_module(site("a", 10.0, 10.0, 50.0, 50.0)).unwrap_err();
    assert!(matches!(err, EditorError::DuplicateModule(_)));
    assert_eq!(editor.history().undo_stack_size(), 1);
}

#[test]
fn test_move_gesture_records_once() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();

    let press = Position::new(120.0, 120.0);
    for step in 1..=10 {
        let step = step as f64;
        editor
            .update_move(Position::new(120.0 + 3.0 * step, 120.0 + 2.0 * step), press)
            .unwrap();
    }
    // Pointer moves only touch the gesture.
    assert_eq!(editor.history().undo_stack_size(), 1);
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(100.0, 100.0)
    );

    assert!(editor.commit_transform().unwrap());
    assert_eq!(editor.history().undo_stack_size(), 2);
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(130.0, 120.0)
    );
    assert_eq!(
        editor.history().last_action().unwrap().action_type,
        HistoryActionType::ModuleMove
    );

    assert!(editor.undo());
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(100.0, 100.0)
    );
}

#[test]
fn test_move_snaps_when_grid_enabled() {
    let mut map = CampsiteMap::new("Riverside", Size::new(1000.0, 800.0));
    map.add_module(site("a", 100.0, 100.0, 50.0, 50.0)).unwrap();
    let config = EditorConfig {
        snap_to_grid: true,
        ..EditorConfig::default()
    };
    let mut editor = MapEditor::new(map, config);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();
    editor
        .update_move(Position::new(14.0, 26.0), Position::new(0.0, 0.0))
        .unwrap();
    editor.commit_transform().unwrap();
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(110.0, 130.0)
    );
}

#[test]
fn test_commit_clamps_into_map() {
    let mut editor = editor_with(vec![site("a", 900.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();
    editor
        .update_move(Position::new(200.0, 0.0), Position::new(0.0, 0.0))
        .unwrap();
    editor.commit_transform().unwrap();
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(950.0, 100.0)
    );
}

#[test]
fn test_cancel_leaves_map_and_history() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    let before = editor.map().clone();
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Rotate).unwrap();
    editor
        .update_rotate(Position::new(125.0, 200.0), Position::new(200.0, 125.0))
        .unwrap();
    assert!(editor.cancel_transform());
    assert!(!editor.cancel_transform());
    assert_eq!(editor.map(), &before);
    assert_eq!(editor.history().undo_stack_size(), 1);
}

#[test]
fn test_noop_commit_records_nothing() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();
    assert!(!editor.commit_transform().unwrap());
    assert_eq!(editor.history().undo_stack_size(), 1);
    assert!(editor.transform().is_none());
}

#[test]
fn test_gesture_errors() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    assert!(matches!(
        editor.begin_transform(TransformKind::Move),
        Err(EditorError::EmptySelection)
    ));
    assert!(matches!(
        editor.commit_transform(),
        Err(EditorError::NoActiveTransform)
    ));

    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();
    assert!(matches!(
        editor.begin_transform(TransformKind::Rotate),
        Err(EditorError::TransformInProgress(_))
    ));
    assert!(matches!(
        editor.update_resize(
            ResizeHandle::MiddleRight,
            Position::new(10.0, 0.0),
            Position::new(0.0, 0.0)
        ),
        Err(EditorError::TransformKindMismatch { .. })
    ));
    assert!(matches!(
        editor.delete_module("a"),
        Err(EditorError::TransformInProgress(_))
    ));
}

#[test]
fn test_locked_modules_are_skipped() {
    let mut locked = site("locked", 100.0, 100.0, 50.0, 50.0);
    locked.locked = true;
    let mut editor = editor_with(vec![locked, site("free", 300.0, 100.0, 50.0, 50.0)]);

    editor.select(["locked"]);
    assert!(matches!(
        editor.begin_transform(TransformKind::Move),
        Err(EditorError::EmptySelection)
    ));
    assert!(matches!(
        editor.delete_module("locked"),
        Err(EditorError::ModuleLocked(_))
    ));

    editor.select_all();
    editor.begin_transform(TransformKind::Move).unwrap();
    assert_eq!(editor.transform().unwrap().module_ids, vec!["free".to_string()]);
}

#[test]
fn test_group_rotation_commits_one_bulk_entry() {
    let mut editor = editor_with(vec![
        site("a", 100.0, 100.0, 100.0, 100.0),
        site("b", 300.0, 100.0, 100.0, 100.0),
    ]);
    editor.select(["a", "b"]);
    editor.begin_transform(TransformKind::Rotate).unwrap();
    // Pivot (250,150); pointer sweeps from right to below.
    editor
        .update_rotate(Position::new(250.0, 250.0), Position::new(350.0, 150.0))
        .unwrap();
    editor.commit_transform().unwrap();

    assert_eq!(editor.history().undo_stack_size(), 2);
    let action = editor.history().last_action().unwrap();
    assert_eq!(action.action_type, HistoryActionType::BulkOperation);
    assert_eq!(action.count, Some(2));
    assert_eq!(editor.undo_label().as_deref(), Some("Undo Rotate 2 modules"));

    let a = editor.map().get_module("a").unwrap();
    assert!((a.rotation - 90.0).abs() < EPS);
    assert!((a.position.x - 200.0).abs() < EPS);
    assert!(a.position.y.abs() < EPS);
    let b = editor.map().get_module("b").unwrap();
    assert!((b.position.x - 200.0).abs() < EPS);
    assert!((b.position.y - 200.0).abs() < EPS);

    editor.undo();
    assert_eq!(editor.map().get_module("a").unwrap().rotation, 0.0);
    assert_eq!(
        editor.map().get_module("b").unwrap().position,
        Position::new(300.0, 100.0)
    );
}

#[test]
fn test_shift_rotation_snaps() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 100.0, 100.0)]);
    editor.select(["a"]);
    editor.input_mut().key_down(KEY_SHIFT);
    editor.begin_transform(TransformKind::Rotate).unwrap();
    // Pivot (150,150); sweep about 40 degrees, snapped to 45.
    let swept = 40f64.to_radians();
    editor
        .update_rotate(
            Position::new(150.0 + 100.0 * swept.cos(), 150.0 + 100.0 * swept.sin()),
            Position::new(250.0, 150.0),
        )
        .unwrap();
    editor.commit_transform().unwrap();
    assert_eq!(editor.map().get_module("a").unwrap().rotation, 45.0);
}

#[test]
fn test_shift_resize_locks_aspect_ratio() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 100.0, 50.0)]);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Resize).unwrap();
    editor
        .update_resize(
            ResizeHandle::BottomRight,
            Position::new(240.0, 150.0),
            Position::new(200.0, 150.0),
        )
        .unwrap();
    assert_eq!(
        editor.transform().unwrap().current_bounds["a"].size,
        Size::new(140.0, 50.0)
    );

    editor.input_mut().key_down(KEY_SHIFT);
    editor
        .update_resize(
            ResizeHandle::BottomRight,
            Position::new(240.0, 150.0),
            Position::new(200.0, 150.0),
        )
        .unwrap();
    editor.commit_transform().unwrap();
    let a = editor.map().get_module("a").unwrap();
    assert_eq!(a.size, Size::new(120.0, 60.0));
    assert_eq!(a.position, Position::new(100.0, 100.0));
}

#[test]
fn test_nudge_steps() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.nudge_selected(1.0, 0.0).unwrap();
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(101.0, 100.0)
    );

    editor.input_mut().key_down(KEY_SHIFT);
    editor.nudge_selected(0.0, -1.0).unwrap();
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(101.0, 90.0)
    );
    assert_eq!(editor.history().undo_stack_size(), 3);
}

#[test]
fn test_delete_selected_is_one_entry() {
    let mut editor = editor_with(vec![
        site("a", 100.0, 100.0, 50.0, 50.0),
        site("b", 300.0, 100.0, 50.0, 50.0),
        site("c", 500.0, 100.0, 50.0, 50.0),
    ]);
    editor.select(["a", "c"]);
    assert_eq!(editor.delete_selected().unwrap(), 2);
    assert_eq!(editor.map().len(), 1);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.history().undo_stack_size(), 2);
    assert_eq!(
        editor.history().last_action().unwrap().label(),
        "Delete 2 modules"
    );

    editor.undo();
    assert_eq!(editor.map().len(), 3);
}

#[test]
fn test_undo_prunes_selection() {
    let mut editor = editor();
    let id = editor
        .add_module(site("pitch", 100.0, 100.0, 50.0, 50.0))
        .unwrap();
    editor.select([id.as_str()]);
    assert_eq!(editor.selection().len(), 1);
    editor.undo();
    assert!(editor.selection().is_empty());
}

#[test]
fn test_select_ignores_unknown_ids() {
    let mut editor = editor_with(vec![site("a", 0.0, 0.0, 50.0, 50.0)]);
    editor.select(["a", "ghost", "a"]);
    assert_eq!(editor.selection(), ["a".to_string()]);
    editor.toggle_selection("a");
    assert!(editor.selection().is_empty());
}

#[test]
fn test_update_module_keeps_id_and_clamps() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    editor
        .update_module("a", |m| {
            m.id = "renamed".to_string();
            m.position = Position::new(-40.0, 790.0);
        })
        .unwrap();
    let a = editor.map().get_module("a").unwrap();
    assert_eq!(a.position, Position::new(0.0, 750.0));
    assert_eq!(
        editor.history().last_action().unwrap().action_type,
        HistoryActionType::ModuleUpdate
    );

    assert!(matches!(
        editor.update_module("ghost", |_| {}),
        Err(EditorError::ModuleNotFound(_))
    ));
}

#[test]
fn test_update_module_normalizes_rotation_and_size() {
    let mut editor = editor_with(vec![site("a", 100.0, 100.0, 50.0, 50.0)]);
    editor
        .update_module("a", |m| {
            m.rotation = 720.0;
            m.size = Size::new(0.0, -5.0);
        })
        .unwrap();
    let a = editor.map().get_module("a").unwrap();
    assert_eq!(a.rotation, 0.0);
    assert_eq!(a.size, Size::new(20.0, 20.0));

    editor.update_module("a", |m| m.rotation = -30.0).unwrap();
    assert_eq!(editor.map().get_module("a").unwrap().rotation, 330.0);
}

#[test]
fn test_update_module_respects_max_size() {
    let mut map = CampsiteMap::new("Riverside", Size::new(1000.0, 800.0));
    map.add_module(site("a", 900.0, 100.0, 50.0, 50.0)).unwrap();
    let config = EditorConfig {
        max_module_size: Some(Size::new(100.0, 100.0)),
        ..EditorConfig::default()
    };
    let mut editor = MapEditor::new(map, config);
    editor
        .update_module("a", |m| m.size = Size::new(500.0, 10.0))
        .unwrap();
    let a = editor.map().get_module("a").unwrap();
    assert_eq!(a.size, Size::new(100.0, 20.0));
    // the grown module is pulled back inside the right edge
    assert_eq!(a.position, Position::new(900.0, 100.0));
}

#[test]
fn test_nudge_against_map_edge_records_nothing() {
    let mut editor = editor_with(vec![site("a", 0.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    assert!(!editor.nudge_selected(-1.0, 0.0).unwrap());
    assert_eq!(editor.history().undo_stack_size(), 1);
    assert!(!editor.is_modified());

    assert!(editor.nudge_selected(-1.0, 1.0).unwrap());
    assert_eq!(
        editor.map().get_module("a").unwrap().position,
        Position::new(0.0, 101.0)
    );
    assert_eq!(editor.history().undo_stack_size(), 2);
}

#[test]
fn test_move_clamped_back_to_start_is_noop() {
    let mut editor = editor_with(vec![site("a", 950.0, 100.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.begin_transform(TransformKind::Move).unwrap();
    editor
        .update_move(Position::new(200.0, 0.0), Position::new(0.0, 0.0))
        .unwrap();
    assert!(!editor.commit_transform().unwrap());
    assert_eq!(editor.history().undo_stack_size(), 1);
}

#[test]
fn test_z_order_edits() {
    let mut editor = editor_with(vec![
        site("a", 0.0, 0.0, 50.0, 50.0),
        site("b", 0.0, 0.0, 50.0, 50.0),
    ]);
    editor.bring_to_front("a").unwrap();
    let order: Vec<&str> = editor
        .map()
        .paint_order()
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(order, vec!["b", "a"]);
    assert_eq!(editor.undo_label().as_deref(), Some("Undo Bring to front"));
}

#[test]
fn test_history_depth_from_config() {
    let config = EditorConfig {
        max_history_size: 5,
        ..EditorConfig::default()
    };
    let mut editor = MapEditor::new(CampsiteMap::new("Lakeside", Size::new(500.0, 500.0)), config);
    for i in 0..10 {
        editor
            .add_module(site(&format!("m{}", i), 10.0, 10.0, 20.0, 20.0))
            .unwrap();
    }
    assert_eq!(editor.history().undo_stack_size(), 5);
    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);
    // The oldest surviving entry is the map after the sixth add.
    assert_eq!(editor.map().len(), 6);
}

#[test]
fn test_load_map_resets_session() {
    let mut editor = editor_with(vec![site("a", 0.0, 0.0, 50.0, 50.0)]);
    editor.select(["a"]);
    editor.nudge_selected(1.0, 1.0).unwrap();
    editor.load_map(CampsiteMap::new("Other", Size::new(200.0, 200.0)));
    assert!(editor.selection().is_empty());
    assert!(!editor.can_undo());
    assert!(!editor.is_modified());
    assert_eq!(editor.map().name, "Other");
}

#[test]
fn test_normalize_records_only_when_something_moved() {
    let mut map = CampsiteMap::new("Riverside", Size::new(1000.0, 800.0));
    map.modules.push(site("outside", 990.0, -30.0, 50.0, 50.0));
    map.modules.push(site("inside", 10.0, 10.0, 50.0, 50.0));
    let mut editor = MapEditor::new(map, EditorConfig::default());

    assert_eq!(editor.normalize().unwrap(), 1);
    assert_eq!(
        editor.map().get_module("outside").unwrap().position,
        Position::new(950.0, 0.0)
    );
    assert_eq!(editor.undo_label().as_deref(), Some("Undo Clamp into map bounds"));

    assert_eq!(editor.normalize().unwrap(), 0);
    assert_eq!(editor.history().undo_stack_size(), 2);
}
