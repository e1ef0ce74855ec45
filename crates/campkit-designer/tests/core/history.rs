use campkit_designer::{
    create_history_manager, CampsiteMap, HistoryAction, HistoryActionType, HistoryConfig,
    HistoryManager, Module, ModuleType, Position, Size,
};

fn map_with(count: usize) -> CampsiteMap {
    let mut map = CampsiteMap::new("Pinewood", Size::new(1000.0, 1000.0));
    for i in 0..count {
        let module = Module::of_type(
            ModuleType::Campsite,
            Position::new(10.0 * i as f64, 10.0),
            Size::new(40.0, 40.0),
        );
        map.add_module(module).unwrap();
    }
    map
}

fn add_action() -> HistoryAction {
    HistoryAction::new(HistoryActionType::ModuleAdd)
}

#[test]
fn test_new_manager_is_empty() {
    let manager = create_history_manager(None);
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.undo_stack_size(), 0);
    assert_eq!(manager.redo_stack_size(), 0);
    assert_eq!(manager.max_history_size(), 50);
    assert!(manager.last_action().is_none());
}

#[test]
fn test_undo_returns_previous_state() {
    let mut manager = HistoryManager::new();
    let m0 = map_with(0);
    let m1 = map_with(1);
    manager.push_state(&m0, HistoryAction::new(HistoryActionType::BulkOperation));
    manager.push_state(&m1, add_action());

    let restored = manager.undo().unwrap();
    assert_eq!(restored, m0);
    assert!(!manager.can_undo());
    assert!(manager.can_redo());
    assert_eq!(manager.next_action().unwrap().action_type, HistoryActionType::ModuleAdd);
}

#[test]
fn test_undo_then_redo_is_identity() {
    let mut manager = HistoryManager::new();
    let states: Vec<CampsiteMap> = (0..4).map(map_with).collect();
    for state in &states {
        manager.push_state(state, add_action());
    }

    assert_eq!(manager.undo().unwrap(), states[2]);
    assert_eq!(manager.undo().unwrap(), states[1]);
    assert_eq!(manager.redo().unwrap(), states[2]);
    assert_eq!(manager.redo().unwrap(), states[3]);
    assert!(manager.redo().is_none());
    assert_eq!(manager.current_state().unwrap().map_state, states[3]);
}

#[test]
fn test_push_discards_redo_branch() {
    let mut manager = HistoryManager::new();
    manager.push_state(&map_with(0), add_action());
    manager.push_state(&map_with(1), add_action());
    manager.push_state(&map_with(2), add_action());
    manager.undo();
    manager.undo();
    assert_eq!(manager.redo_stack_size(), 2);

    manager.push_state(&map_with(5), add_action());
    assert!(!manager.can_redo());
    assert_eq!(manager.redo_stack_size(), 0);
    assert_eq!(manager.undo_stack_size(), 2);
}

#[test]
fn test_depth_bound_evicts_oldest() {
    let mut manager = HistoryManager::with_config(HistoryConfig {
        max_history_size: 3,
    });
    for i in 0..6 {
        manager.push_state(&map_with(i), add_action());
        assert!(manager.undo_stack_size() <= 3);
    }
    assert_eq!(manager.undo_stack_size(), 3);
    assert_eq!(manager.undo().unwrap().len(), 4);
    assert_eq!(manager.undo().unwrap().len(), 3);
    assert!(manager.undo().is_none());
}

#[test]
fn test_snapshots_are_isolated_from_live_map() {
    let mut manager = HistoryManager::new();
    let mut live = map_with(1);
    manager.push_state(&live, add_action());

    live.modules[0].position = Position::new(500.0, 500.0);
    live.name = "Changed".to_string();
    manager.push_state(&live, add_action());

    let mut restored = manager.undo().unwrap();
    assert_eq!(restored.modules[0].position, Position::new(0.0, 10.0));
    assert_eq!(restored.name, "Pinewood");

    // Mutating what undo handed out must not reach the stored entry.
    restored.modules.clear();
    assert_eq!(manager.redo().unwrap().modules[0].position, Position::new(500.0, 500.0));
    assert_eq!(manager.undo().unwrap().len(), 1);
}

#[test]
fn test_clear_empties_both_stacks() {
    let mut manager = HistoryManager::new();
    manager.push_state(&map_with(0), add_action());
    manager.push_state(&map_with(1), add_action());
    manager.undo();
    manager.clear();
    assert_eq!(manager.undo_stack_size(), 0);
    assert_eq!(manager.redo_stack_size(), 0);
    assert!(manager.undo().is_none());
    assert!(manager.redo().is_none());
}

#[test]
fn test_snapshot_reports_sizes_and_labels() {
    let mut manager = HistoryManager::new();
    manager.push_state(&map_with(0), add_action());
    manager.push_state(
        &map_with(2),
        HistoryAction::bulk(vec!["a".into(), "b".into()]),
    );
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.undo_stack_size, 2);
    assert_eq!(snapshot.redo_stack_size, 0);
    assert_eq!(
        snapshot.last_action.unwrap().label(),
        "Bulk operation (2 modules)"
    );
    assert!(snapshot.next_action.is_none());

    let value = serde_json::to_value(manager.snapshot()).unwrap();
    assert_eq!(value["undoStackSize"], 2);
}
