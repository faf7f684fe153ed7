use tasklist_core::{decode_tasks, encode_tasks, Task, TaskFilter, TaskId, TaskStatus};

#[test]
fn task_serialization_uses_storage_field_names() {
    let task = Task::with_id("11111111-2222-4333-8444-555555555555", "ship it", TaskStatus::Done)
        .unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["text"], "ship it");
    assert_eq!(json["status"], "done");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn status_wire_names_are_camel_case() {
    for (status, wire) in [
        (TaskStatus::Undone, "undone"),
        (TaskStatus::InProgress, "inProgress"),
        (TaskStatus::Done, "done"),
    ] {
        assert_eq!(serde_json::to_value(status).unwrap(), wire);
        assert_eq!(status.as_str(), wire);
        assert_eq!(wire.parse::<TaskStatus>().unwrap(), status);
    }
}

#[test]
fn collection_survives_storage_roundtrip() {
    let mut original = vec![
        Task::new("wash dishes").unwrap(),
        Task::with_id("legacy-7", "", TaskStatus::InProgress).unwrap(),
        Task::with_id("b", "Buy milk", TaskStatus::Done).unwrap(),
        Task::new("buy milk").unwrap(),
    ];

    let mut decoded = decode_tasks(&encode_tasks(&original).unwrap()).unwrap();

    original.sort_by(|a, b| a.id.cmp(&b.id));
    decoded.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(decoded, original);
}

#[test]
fn with_id_keeps_foreign_ids_verbatim() {
    let task = Task::with_id("not-a-uuid", "x", TaskStatus::Undone).unwrap();
    assert_eq!(task.id, TaskId::from("not-a-uuid"));
    assert!(Task::with_id("", "x", TaskStatus::Undone).is_err());
}

#[test]
fn filter_defaults_to_all_and_lists_controls_in_order() {
    assert_eq!(TaskFilter::default(), TaskFilter::All);
    let labels: Vec<&str> = TaskFilter::ALL.iter().map(|f| f.label()).collect();
    assert_eq!(labels, vec!["All", "Completed", "Pending", "Undone"]);
}
