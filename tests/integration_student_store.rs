use std::fs;

use assert_matches::assert_matches;
use skillfolio::students::{Grade, SortOrder, StoreError, StudentRecord, StudentStore};
use tempfile::tempdir;

const SAMPLE: &str = "3\n1345,John Curry,8,15,7,45\n2345,Sam Sturgeon,14,15,14,77\n9876,Lee Scott,17,11,16,99\n";

fn record(code: u32, name: &str, marks: [u32; 4]) -> StudentRecord {
    let [c1, c2, c3, exam] = marks;
    StudentRecord {
        code,
        name: name.to_string(),
        c1,
        c2,
        c3,
        exam,
    }
}

#[test]
fn edits_survive_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("studentMarks.txt");
    fs::write(&path, SAMPLE).unwrap();

    let mut store = StudentStore::open(&path).unwrap();
    store.add(record(4444, "Grace Hopper", [20, 20, 20, 100])).unwrap();
    store.delete(2345).unwrap();
    store.update(1345, record(0, "John Curry", [10, 15, 7, 60])).unwrap();
    store.sort(SortOrder::Descending).unwrap();

    let reloaded = StudentStore::open(&path).unwrap();
    let codes: Vec<u32> = reloaded.records().iter().map(|r| r.code).collect();
    assert_eq!(codes, vec![4444, 9876, 1345]);

    let grace = reloaded.find(4444).unwrap();
    assert_eq!(grace.overall_percentage(), 100.0);
    assert_eq!(grace.grade(), Grade::A);
    // Update keeps the original code
    assert_eq!(reloaded.find(1345).unwrap().exam, 60);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("3\n4444,Grace Hopper,20,20,20,100\n"));
}

#[test]
fn fresh_file_is_created_on_first_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("marks.txt");

    let mut store = StudentStore::open(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.class_average(), 0.0);
    assert_eq!(store.highest(), None);

    store.add(record(1, "Solo", [10, 10, 10, 50])).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1\n1,Solo,10,10,10,50\n");
}

#[test]
fn names_with_commas_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("marks.txt");

    let mut store = StudentStore::open(&path).unwrap();
    store.add(record(7, "Scott, Lee", [1, 2, 3, 4])).unwrap();

    let reloaded = StudentStore::open(&path).unwrap();
    assert_eq!(reloaded.find(7).unwrap().name, "Scott, Lee");
}

#[test]
fn malformed_row_reports_its_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("marks.txt");
    fs::write(&path, "2\n1345,John Curry,8,15,7,45\n2345,Sam Sturgeon,lots,15,14,77\n").unwrap();

    let err = StudentStore::open(&path).unwrap_err();
    assert_matches!(err, StoreError::Parse { line: 3, .. });
}

#[test]
fn class_report_ends_with_average() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("marks.txt");
    fs::write(&path, SAMPLE).unwrap();

    let store = StudentStore::open(&path).unwrap();
    let report = store.report();
    assert_eq!(report.matches("Name: ").count(), 3);
    assert!(report.ends_with("Class Average: 70.42%"));
    assert_eq!(store.highest().unwrap().code, 9876);
    assert_eq!(store.lowest().unwrap().code, 1345);
}
