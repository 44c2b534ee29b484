use hucoach_engine::engine::{apply_action, settle_if_needed};
use hucoach_engine::errors::GameError;
use hucoach_engine::evaluator::StandardEvaluator;
use hucoach_engine::game::{start_hand, HandConfig};
use hucoach_engine::player::ActionKind as A;
use hucoach_engine::session::{next_hand, SessionView};

#[test]
fn session_carries_stacks_until_a_blind_cannot_be_posted() {
    let cfg = HandConfig {
        init_stack: 6,
        sb: 1,
        bb: 2,
    };
    let mut view = SessionView::new("s1", &cfg);
    let mut gs = start_hand(&cfg, "s1", "h1", view.button, Some(1)).unwrap();
    let mut hands = 1;
    loop {
        // the seat to act always shoves or calls
        while !gs.is_complete() {
            gs = if gs.street.is_terminal() {
                settle_if_needed(&gs, &StandardEvaluator).unwrap()
            } else {
                let acts = hucoach_engine::rules::legal_actions(&gs);
                let a = if acts.contains(&A::AllIn) { A::AllIn } else { A::Call };
                apply_action(&gs, a, None).unwrap()
            };
        }
        assert_eq!(gs.stacks().iter().sum::<u32>(), 12);
        let plan = next_hand(&view, &gs, Some(hands as u64 + 1)).unwrap();
        assert_eq!(plan.next_button, 1 - view.button);
        let hand_id = format!("h{}", plan.next_hand_no);
        match plan.start(&cfg, &hand_id) {
            Ok(next) => {
                gs = next;
                view = plan.into_view(&hand_id);
                hands += 1;
            }
            Err(GameError::InsufficientBlind { stack, blind, .. }) => {
                assert!(stack < blind);
                break;
            }
            Err(e) => panic!("unexpected error {e}"),
        }
        assert!(hands < 500, "session never ended");
    }
    assert!(hands >= 1);
}
