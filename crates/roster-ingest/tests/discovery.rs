//! Tests for sheet discovery.

use std::fs;
use std::path::Path;

use roster_ingest::{classify_sheet, discover_sheets, list_csv_files};
use roster_model::EntityKind;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "A,B\n1,2\n").expect("write file");
}

#[test]
fn classifies_by_stem_prefix() {
    assert_eq!(classify_sheet(Path::new("clients.csv")), Some(EntityKind::Clients));
    assert_eq!(classify_sheet(Path::new("Workers_2024.CSV")), Some(EntityKind::Workers));
    assert_eq!(classify_sheet(Path::new("TASKS-final.csv")), Some(EntityKind::Tasks));
    assert_eq!(classify_sheet(Path::new("notes.csv")), None);
    assert_eq!(classify_sheet(Path::new("my_clients.csv")), None);
}

#[test]
fn discovers_each_kind_once() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "clients.csv");
    touch(dir.path(), "clients_old.csv");
    touch(dir.path(), "workers.csv");
    touch(dir.path(), "README.csv");
    touch(dir.path(), "tasks.txt");

    let sheets = discover_sheets(dir.path()).expect("discover");
    assert_eq!(sheets.clients, Some(dir.path().join("clients.csv")));
    assert_eq!(sheets.workers, Some(dir.path().join("workers.csv")));
    assert_eq!(sheets.tasks, None);
    assert_eq!(sheets.missing(), vec![EntityKind::Tasks]);
}

#[test]
fn lists_only_csv_files_sorted() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "b.csv");
    touch(dir.path(), "a.CSV");
    touch(dir.path(), "c.json");
    fs::create_dir(dir.path().join("nested.csv")).expect("dir");

    let files = list_csv_files(dir.path()).expect("list");
    let names: Vec<_> = files
        .iter()
        .filter_map(|path| path.file_name()?.to_str())
        .collect();
    assert_eq!(names, vec!["a.CSV", "b.csv"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let result = discover_sheets(&dir.path().join("absent"));
    assert!(result.is_err());
}
