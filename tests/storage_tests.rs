// Integration tests for the flat-file task store, against real temp files.

use chrono::NaiveDate;
use taskmate::{Storage, TaskList};
use tempfile::TempDir;

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 8, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("tasks.txt"));
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("nested/data/tasks.txt"));
    storage.save(&["T | 0 | read book".to_string()]).unwrap();
    assert!(storage.file_path().exists());
    assert_eq!(storage.load().unwrap(), ["T | 0 | read book"]);
}

#[test]
fn test_blank_lines_are_skipped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");
    std::fs::write(&path, "T | 0 | read book\n\n   \nT | 1 | buy milk\n").unwrap();
    let storage = Storage::new(&path);
    assert_eq!(
        storage.load().unwrap(),
        ["T | 0 | read book", "T | 1 | buy milk"]
    );
}

#[test]
fn test_raw_when_text_round_trips_verbatim() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("tasks.txt"));

    // The user's own spelling is what lands on disk, not the resolved
    // instant; reloading re-parses it to an equal task.
    let mut list = TaskList::new();
    list.add(taskmate::Task::deadline("return book /by 24/08/21 6pm", now()).unwrap())
        .unwrap();
    storage.save(&list.to_records()).unwrap();

    let lines = storage.load().unwrap();
    assert_eq!(lines, ["D | 0 | return book /by 24/08/21 6pm"]);

    let reloaded = TaskList::from_records(&lines, now()).unwrap();
    assert_eq!(reloaded.get(0).unwrap(), list.get(0).unwrap());
}

#[test]
fn test_overwriting_save_replaces_the_file() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path().join("tasks.txt"));
    storage
        .save(&["T | 0 | read book".to_string(), "T | 0 | buy milk".to_string()])
        .unwrap();
    storage.save(&["T | 0 | buy milk".to_string()]).unwrap();
    assert_eq!(storage.load().unwrap(), ["T | 0 | buy milk"]);
}
