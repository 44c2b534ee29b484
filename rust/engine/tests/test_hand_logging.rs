use std::fs;

use hucoach_engine::engine::{apply_action, settle_if_needed};
use hucoach_engine::evaluator::StandardEvaluator;
use hucoach_engine::game::{start_hand, GameState, HandConfig};
use hucoach_engine::logger::{format_hand_id, HandLogger, HandRecord};
use hucoach_engine::player::ActionKind as A;

fn finished_hand(seed: u64) -> GameState {
    let gs = start_hand(&HandConfig::default(), "s1", "20250102-000001", 0, Some(seed)).unwrap();
    let gs = apply_action(&gs, A::Raise, Some(4)).unwrap();
    let gs = apply_action(&gs, A::Call, None).unwrap();
    let gs = apply_action(&gs, A::Bet, Some(12)).unwrap();
    let gs = apply_action(&gs, A::Raise, Some(30)).unwrap();
    let gs = apply_action(&gs, A::Call, None).unwrap();
    let mut gs = gs;
    while !gs.street.is_terminal() {
        gs = apply_action(&gs, A::Check, None).unwrap();
    }
    settle_if_needed(&gs, &StandardEvaluator).unwrap()
}

#[test]
fn hand_id_format() {
    assert_eq!(format_hand_id("20250102", 7), "20250102-000007");
}

#[test]
fn record_replays_to_the_same_hand() {
    let done = finished_hand(77);
    let rec = HandRecord::from_state(&done).unwrap();
    assert_eq!(rec.final_stacks, done.stacks());
    let replayed = rec.replay(&StandardEvaluator).unwrap();
    assert!(rec.matches(&replayed));
    assert_eq!(replayed, done);
}

#[test]
fn tampered_record_is_detected() {
    let done = finished_hand(78);
    let mut rec = HandRecord::from_state(&done).unwrap();
    rec.seed += 1;
    let replayed = rec.replay(&StandardEvaluator).unwrap();
    // same decisions on different cards: the deal events differ
    assert!(!rec.matches(&replayed));
}

#[test]
fn writes_one_json_object_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).unwrap();
    for seed in [1, 2] {
        let rec = HandRecord::from_state(&finished_hand(seed)).unwrap();
        logger.write(&rec).unwrap();
    }
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\r'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let rec: HandRecord = serde_json::from_str(line).unwrap();
        assert!(rec.ts.is_some());
        assert!(rec.replay(&StandardEvaluator).is_ok());
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v["events"][0]["t"], "blind");
    }
}
