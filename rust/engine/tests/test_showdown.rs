use hucoach_engine::cards::{parse_cards, Card};
use hucoach_engine::engine::{apply_action, settle_if_needed};
use hucoach_engine::errors::{EvalError, GameError};
use hucoach_engine::evaluator::{
    EvalResult, EvaluatorKind, HandEvaluator, HighCardEvaluator, StandardEvaluator, Strength,
};
use hucoach_engine::events::HandEvent;
use hucoach_engine::game::{start_hand, GameState, HandConfig, Street};
use hucoach_engine::player::ActionKind as A;

fn cards<const N: usize>(s: &str) -> [Card; N] {
    parse_cards(s).unwrap().try_into().unwrap()
}

/// A checked-down hand at showdown with the given holes and board.
fn showdown_with(p0: &str, p1: &str, board: &str) -> GameState {
    let mut gs = start_hand(&HandConfig::default(), "s", "h", 0, Some(31)).unwrap();
    gs = apply_action(&gs, A::Call, None).unwrap();
    while gs.street != Street::Showdown {
        gs = apply_action(&gs, A::Check, None).unwrap();
    }
    gs.players[0].hole = cards(p0);
    gs.players[1].hole = cards(p1);
    gs.board = cards::<5>(board).to_vec();
    gs
}

#[test]
fn stronger_hand_takes_the_pot() {
    let gs = showdown_with("Ah Ad", "Kc Qc", "2s 7h 9d Jc 3c");
    let done = settle_if_needed(&gs, &StandardEvaluator).unwrap();
    assert_eq!(done.stacks(), [202, 198]);
    assert_eq!(done.events.last(), Some(&HandEvent::WinShowdown { who: 0, amt: 4 }));
    match &done.events[done.events.len() - 2] {
        HandEvent::Showdown {
            winner,
            is_tie,
            best5,
            board,
        } => {
            assert_eq!(*winner, Some(0));
            assert!(!is_tie);
            assert_eq!(best5[0][..2], cards::<2>("Ah Ad"));
            assert_eq!(board.len(), 5);
        }
        other => panic!("expected showdown, got {other:?}"),
    }
}

#[test]
fn tie_splits_with_odd_chip_to_seat_one() {
    let mut gs = showdown_with("2c 3d", "4c 5d", "As Ks Qs Js Ts");
    gs.pot += 1;
    gs.starting_stacks[0] += 1;
    let done = settle_if_needed(&gs, &StandardEvaluator).unwrap();
    assert_eq!(done.events.last(), Some(&HandEvent::Split { amts: [2, 3] }));
    assert_eq!(done.stacks(), [200, 201]);
    assert_eq!(done.pot, 0);
    assert_eq!(done.street, Street::Complete);
}

#[test]
fn evaluator_is_injected_not_global() {
    // a pair loses to high cards under the teaching evaluator
    let gs = showdown_with("2c 2d", "Ac Kd", "9h 8s 4c 5d Jh");
    let standard = settle_if_needed(&gs, &StandardEvaluator).unwrap();
    let highcard = settle_if_needed(&gs, &*EvaluatorKind::HighCard.build()).unwrap();
    assert_eq!(standard.stacks(), [202, 198]);
    assert_eq!(highcard.stacks(), [198, 202]);
    assert_eq!(
        settle_if_needed(&gs, &HighCardEvaluator).unwrap().stacks(),
        highcard.stacks()
    );
}

struct AlwaysTie;

impl HandEvaluator for AlwaysTie {
    fn name(&self) -> &'static str {
        "tie"
    }

    fn evaluate7(&self, hole: &[Card; 2], board: &[Card; 5]) -> Result<EvalResult, EvalError> {
        Ok(EvalResult {
            best5: [hole[0], hole[1], board[0], board[1], board[2]],
            strength: Strength::new(0),
            category: None,
        })
    }
}

#[test]
fn custom_evaluators_plug_in() {
    let gs = showdown_with("Ah Ad", "Kc Qc", "2s 7h 9d Jc 3c");
    let done = settle_if_needed(&gs, &AlwaysTie).unwrap();
    assert_eq!(done.events.last(), Some(&HandEvent::Split { amts: [2, 2] }));
}

#[test]
fn duplicate_cards_fail_settlement() {
    let gs = showdown_with("Ah Ad", "Kc 2s", "2s 7h 9d Jc 3c");
    let err = settle_if_needed(&gs, &StandardEvaluator).unwrap_err();
    assert!(matches!(
        err,
        GameError::Evaluation(EvalError::DuplicateCard(_))
    ));
}

#[test]
fn malformed_board_is_an_invalid_state() {
    let mut gs = showdown_with("Ah Ad", "Kc Qc", "2s 7h 9d Jc 3c");
    gs.board.pop();
    assert!(matches!(
        settle_if_needed(&gs, &StandardEvaluator),
        Err(GameError::InvalidState(_))
    ));
}
