//! Tests for score tallying and persistence.

use tempfile::TempDir;
use tictactoe_core::{
    FileStore, GameResult, Mark, MemoryStore, SCORES_KEY, ScoreStore, ScoreTracker, Scoreboard,
    WinCombo,
};

fn win(mark: Mark) -> GameResult {
    GameResult::Win {
        mark,
        combo: WinCombo::ALL[0],
    }
}

#[test]
fn test_record_counts_each_result() {
    let mut tracker = ScoreTracker::new();
    assert!(tracker.record(&win(Mark::X)));
    assert!(tracker.record(&win(Mark::X)));
    assert!(tracker.record(&win(Mark::O)));
    assert!(tracker.record(&GameResult::Draw));
    assert_eq!(tracker.scores(), Scoreboard::new(2, 1, 1));
    assert_eq!(tracker.scores().rounds(), 4);
}

#[test]
fn test_record_in_progress_is_noop() {
    let mut tracker = ScoreTracker::new();
    assert!(!tracker.record(&GameResult::InProgress));
    assert_eq!(tracker.scores(), Scoreboard::default());
}

#[test]
fn test_reset_zeroes() {
    let mut tracker = ScoreTracker::with_scores(Scoreboard::new(3, 4, 5));
    tracker.reset();
    assert_eq!(tracker.scores(), Scoreboard::new(0, 0, 0));
}

#[test]
fn test_persist_format() {
    let mut store = MemoryStore::new();
    ScoreTracker::with_scores(Scoreboard::new(1, 2, 3))
        .persist(&mut store)
        .expect("memory store never fails");
    let raw = store.get(SCORES_KEY).expect("get").expect("value written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value, serde_json::json!({"X": 1, "O": 2, "D": 3}));
}

#[test]
fn test_persist_then_load_round_trip() {
    for scores in [
        Scoreboard::default(),
        Scoreboard::new(1, 0, 0),
        Scoreboard::new(7, 11, 2),
        Scoreboard::new(u32::MAX, 0, u32::MAX),
    ] {
        let mut store = MemoryStore::new();
        ScoreTracker::with_scores(scores)
            .persist(&mut store)
            .expect("persist");
        assert_eq!(ScoreTracker::load(&store).scores(), scores);
    }
}

#[test]
fn test_record_saturates_loaded_maximum() {
    let mut store = MemoryStore::new();
    store
        .set(SCORES_KEY, r#"{"X": 4294967295, "O": 0, "D": 4294967295}"#)
        .expect("memory store never fails");
    let mut tracker = ScoreTracker::load(&store);

    assert!(tracker.record(&win(Mark::X)));
    assert!(tracker.record(&GameResult::Draw));
    assert!(tracker.record(&win(Mark::O)));
    assert_eq!(tracker.scores(), Scoreboard::new(u32::MAX, 1, u32::MAX));
    assert_eq!(tracker.scores().rounds(), u32::MAX);
}

#[test]
fn test_load_absent_is_zero() {
    let store = MemoryStore::new();
    assert_eq!(ScoreTracker::load(&store).scores(), Scoreboard::default());
}

#[test]
fn test_load_malformed_is_zero() {
    for raw in ["", "null", "not json", "{\"X\": -1}", "{\"X\": \"two\"}"] {
        let mut store = MemoryStore::new();
        store.set(SCORES_KEY, raw).expect("set");
        assert_eq!(
            ScoreTracker::load(&store).scores(),
            Scoreboard::default(),
            "input {raw:?}"
        );
    }
}

#[test]
fn test_load_partial_record_fills_zero() {
    let mut store = MemoryStore::new();
    store.set(SCORES_KEY, "{\"O\": 4}").expect("set");
    assert_eq!(ScoreTracker::load(&store).scores(), Scoreboard::new(0, 4, 0));
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = FileStore::new(dir.path().join("nested"));
    assert_eq!(store.get(SCORES_KEY).expect("get"), None);

    ScoreTracker::with_scores(Scoreboard::new(5, 6, 7))
        .persist(&mut store)
        .expect("persist");
    assert!(store.path_for(SCORES_KEY).exists());

    let reopened = FileStore::new(dir.path().join("nested"));
    assert_eq!(
        ScoreTracker::load(&reopened).scores(),
        Scoreboard::new(5, 6, 7)
    );
}

#[test]
fn test_file_store_corrupt_file_loads_zero() {
    let dir = TempDir::new().expect("temp dir");
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for(SCORES_KEY), "{{{").expect("write");
    assert_eq!(ScoreTracker::load(&store).scores(), Scoreboard::default());
}
