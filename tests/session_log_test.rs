//! Session log tests - file numbering and CSV rows

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use autotris::session_log::{next_log_path, SessionLog};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("autotris-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_first_log_is_number_one() {
    let dir = scratch_dir("first");
    assert_eq!(next_log_path(&dir).unwrap(), dir.join("session_data_1.csv"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_next_number_follows_largest() {
    let dir = scratch_dir("numbering");
    for name in ["session_data_2.csv", "session_data_10.csv", "session_data_x.csv", "notes.txt"] {
        fs::write(dir.join(name), "").unwrap();
    }
    assert_eq!(next_log_path(&dir).unwrap(), dir.join("session_data_11.csv"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_rows_written_once_per_interval() {
    let dir = scratch_dir("rows");
    let mut log = SessionLog::create(&dir).unwrap();
    let path = log.path().to_path_buf();
    assert_eq!(path, dir.join("session_data_1.csv"));

    let t0 = Instant::now();
    assert!(!log.maybe_record(t0, 5).unwrap());
    assert!(log.maybe_record(t0 + Duration::from_millis(1500), 40).unwrap());
    assert!(!log.maybe_record(t0 + Duration::from_millis(1800), 41).unwrap());
    log.record(t0 + Duration::from_millis(1900), 99).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 2);
    for (row, score) in rows.iter().zip(["40", "99"]) {
        let (elapsed, value) = row.split_once(',').unwrap();
        assert!(elapsed.parse::<f64>().unwrap() >= 1.5);
        assert_eq!(value, score);
    }

    // A second run picks the next number
    let second = SessionLog::create(&dir).unwrap();
    assert_eq!(second.path(), dir.join("session_data_2.csv"));
    fs::remove_dir_all(&dir).unwrap();
}
