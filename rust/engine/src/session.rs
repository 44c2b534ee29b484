//! Planning the next hand of a heads-up session.
//!
//! The engine does not own sessions. These helpers only turn a finished hand
//! into the inputs of the next one: the button rotates and stacks carry over.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::{start_hand_with_carry, GameState, HandConfig};

/// Caller-side snapshot of a session between hands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: String,
    pub button: usize,
    pub stacks: [u32; 2],
    /// 1-based number of the current hand
    pub hand_no: u32,
    #[serde(default)]
    pub current_hand_id: Option<String>,
}

impl SessionView {
    /// View of a session about to play its first hand, seat 0 on the button.
    pub fn new(session_id: impl Into<String>, cfg: &HandConfig) -> Self {
        Self {
            session_id: session_id.into(),
            button: 0,
            stacks: [cfg.init_stack; 2],
            hand_no: 1,
            current_hand_id: None,
        }
    }
}

/// Inputs for the next hand of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextHandPlan {
    pub session_id: String,
    pub next_button: usize,
    pub stacks: [u32; 2],
    pub next_hand_no: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Plans the hand after `last`, which must be complete.
pub fn next_hand(
    view: &SessionView,
    last: &GameState,
    seed: Option<u64>,
) -> Result<NextHandPlan, GameError> {
    if !last.is_complete() {
        return Err(GameError::HandNotComplete);
    }
    Ok(NextHandPlan {
        session_id: view.session_id.clone(),
        next_button: 1 - view.button,
        stacks: last.stacks(),
        next_hand_no: view.hand_no + 1,
        seed,
    })
}

impl NextHandPlan {
    /// Deals the planned hand. [`GameError::InsufficientBlind`] here means the
    /// session is over.
    pub fn start(&self, cfg: &HandConfig, hand_id: &str) -> Result<GameState, GameError> {
        start_hand_with_carry(
            cfg,
            &self.session_id,
            hand_id,
            self.next_button,
            self.stacks,
            self.seed,
        )
    }

    /// The session as seen once the planned hand has started.
    pub fn into_view(self, hand_id: &str) -> SessionView {
        SessionView {
            session_id: self.session_id,
            button: self.next_button,
            stacks: self.stacks,
            hand_no: self.next_hand_no,
            current_hand_id: Some(hand_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply_action;
    use crate::game::start_hand;
    use crate::player::ActionKind;

    #[test]
    fn plan_rotates_button_and_carries_stacks() {
        let cfg = HandConfig::default();
        let view = SessionView::new("s1", &cfg);
        let gs = start_hand(&cfg, "s1", "h1", view.button, Some(3)).unwrap();
        assert_eq!(next_hand(&view, &gs, None), Err(GameError::HandNotComplete));

        let done = apply_action(&gs, ActionKind::Fold, None).unwrap();
        let plan = next_hand(&view, &done, Some(8)).unwrap();
        assert_eq!(plan.next_button, 1);
        assert_eq!(plan.stacks, [199, 201]);
        assert_eq!(plan.next_hand_no, 2);

        let gs2 = plan.start(&cfg, "h2").unwrap();
        assert_eq!(gs2.button, 1);
        assert_eq!(gs2.starting_stacks, [199, 201]);
        assert_eq!(gs2.seed, 8);
        let view2 = plan.into_view("h2");
        assert_eq!(view2.current_hand_id.as_deref(), Some("h2"));
    }
}
