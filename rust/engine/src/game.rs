use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::HandEvent;
use crate::player::{Player, Position};

/// Betting street, in the only order a hand may move through them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Betting over, waiting for settlement
    Showdown,
    /// Chips distributed
    Complete,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown | Street::Complete => Street::Complete,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Street::Showdown | Street::Complete)
    }

    /// Community cards dealt when this street opens.
    fn cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
            Street::Complete => "complete",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stakes and starting stacks for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub init_stack: u32,
    pub sb: u32,
    pub bb: u32,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            init_stack: 200,
            sb: 1,
            bb: 2,
        }
    }
}

impl HandConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.bb == 0 || self.sb == 0 {
            return Err(GameError::InvalidConfig("blinds must be positive".into()));
        }
        if self.sb >= self.bb {
            return Err(GameError::InvalidConfig(format!(
                "small blind {} must be below big blind {}",
                self.sb, self.bb
            )));
        }
        if self.init_stack == 0 {
            return Err(GameError::InvalidConfig("init_stack must be positive".into()));
        }
        if self.init_stack.checked_mul(2).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "init_stack {} is too large for two seats",
                self.init_stack
            )));
        }
        Ok(())
    }
}

/// Complete state of one heads-up hand.
///
/// Seats are fixed (`players[0]`, `players[1]`); `button` says which of them
/// is the small blind this hand. Operations never modify a `GameState` they
/// are given: each accepted action returns a new value, event log included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub session_id: String,
    pub hand_id: String,
    /// Shuffle seed actually used; replaying with it reproduces the deal
    pub seed: u64,
    pub button: usize,
    pub street: Street,
    /// Undealt cards, next card first
    pub deck: Vec<Card>,
    pub board: Vec<Card>,
    pub players: [Player; 2],
    pub sb: u32,
    pub bb: u32,
    /// Chips swept from finished betting rounds
    pub pot: u32,
    /// Seat to act; `None` once the hand is complete
    pub to_act: Option<usize>,
    pub last_bet: u32,
    pub last_raise_size: u32,
    pub open_bet: bool,
    pub checks_in_round: u32,
    /// Stacks before blinds; their sum is conserved for the whole hand
    pub starting_stacks: [u32; 2],
    pub events: Vec<HandEvent>,
}

impl GameState {
    pub fn small_blind_seat(&self) -> usize {
        self.button
    }

    pub fn big_blind_seat(&self) -> usize {
        1 - self.button
    }

    pub fn position(&self, seat: usize) -> Position {
        if seat == self.button {
            Position::Button
        } else {
            Position::BigBlind
        }
    }

    pub fn is_complete(&self) -> bool {
        self.street == Street::Complete
    }

    /// Stacks plus street investments plus pot.
    pub fn total_chips(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.stack + p.invested_street)
            .sum::<u32>()
            + self.pot
    }

    pub fn starting_total(&self) -> u32 {
        self.starting_stacks.iter().sum()
    }

    pub fn stacks(&self) -> [u32; 2] {
        [self.players[0].stack, self.players[1].stack]
    }

    /// Sweeps street investments into the pot and opens the next street.
    pub(crate) fn advance_street(&mut self) -> Result<(), GameError> {
        let next = self.street.next();
        self.pot += self.players.iter().map(|p| p.invested_street).sum::<u32>();
        self.players = self.players.map(Player::sweep);
        self.last_bet = 0;
        self.last_raise_size = 0;
        self.open_bet = false;
        self.checks_in_round = 0;

        let n = next.cards_dealt();
        if n > 0 {
            if self.deck.len() < n {
                return Err(GameError::InvalidState(format!(
                    "deck has {} cards, {next} needs {n}",
                    self.deck.len()
                )));
            }
            self.board.extend(self.deck.drain(..n));
            self.events.push(HandEvent::Board {
                street: next,
                cards: self.board.clone(),
            });
        }
        self.street = next;
        self.to_act = Some(self.big_blind_seat());
        debug!(hand_id = %self.hand_id, street = %next, pot = self.pot, "street advanced");
        Ok(())
    }

    /// Deals every remaining street when nobody can act any more.
    fn run_out(&mut self) -> Result<(), GameError> {
        while self.street < Street::Showdown {
            self.advance_street()?;
        }
        Ok(())
    }

    /// Closes the betting round if it is over, running the board out when a
    /// player is all-in.
    pub(crate) fn maybe_advance(&mut self) -> Result<(), GameError> {
        let [p0, p1] = self.players;
        if p0.folded || p1.folded || self.street.is_terminal() {
            return Ok(());
        }
        let matched = p0.invested_street == p1.invested_street;
        if (p0.all_in && p1.all_in) || ((p0.all_in || p1.all_in) && matched) {
            return self.run_out();
        }
        let closed = if self.open_bet {
            // preflop the big blind keeps its option after a plain completion
            matched
                && (self.street != Street::Preflop
                    || self.last_bet > self.bb
                    || self.checks_in_round >= 1)
        } else {
            self.checks_in_round >= 2
        };
        if closed {
            self.advance_street()?;
        }
        Ok(())
    }
}

fn draw(deck: &mut Deck) -> Result<Card, GameError> {
    deck.deal_card()
        .ok_or_else(|| GameError::InvalidState("deck exhausted".into()))
}

/// Starts a hand with both seats at `cfg.init_stack`.
pub fn start_hand(
    cfg: &HandConfig,
    session_id: &str,
    hand_id: &str,
    button: usize,
    seed: Option<u64>,
) -> Result<GameState, GameError> {
    start_hand_with_carry(
        cfg,
        session_id,
        hand_id,
        button,
        [cfg.init_stack; 2],
        seed,
    )
}

/// Starts a hand from stacks carried over from the previous hand.
///
/// `stacks` are the seats' chips before blinds. The button seat posts the
/// small blind and acts first. Fails with [`GameError::InsufficientBlind`]
/// when a seat cannot cover its blind; a session cannot continue past that.
pub fn start_hand_with_carry(
    cfg: &HandConfig,
    session_id: &str,
    hand_id: &str,
    button: usize,
    stacks: [u32; 2],
    seed: Option<u64>,
) -> Result<GameState, GameError> {
    cfg.validate()?;
    if button > 1 {
        return Err(GameError::InvalidConfig(format!(
            "button must be seat 0 or 1, got {button}"
        )));
    }
    if stacks[0].checked_add(stacks[1]).is_none() {
        return Err(GameError::InvalidConfig(format!(
            "carried stacks {} + {} exceed the chip range",
            stacks[0], stacks[1]
        )));
    }
    let sb_seat = button;
    let bb_seat = 1 - button;
    for (seat, blind) in [(sb_seat, cfg.sb), (bb_seat, cfg.bb)] {
        if stacks[seat] < blind {
            return Err(GameError::InsufficientBlind {
                seat,
                stack: stacks[seat],
                blind,
            });
        }
    }

    let seed = Deck::resolve_seed(seed);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();
    let dealt = [
        draw(&mut deck)?,
        draw(&mut deck)?,
        draw(&mut deck)?,
        draw(&mut deck)?,
    ];
    let holes = [[dealt[0], dealt[2]], [dealt[1], dealt[3]]];
    let mut players = [
        Player::new(stacks[0], holes[0]),
        Player::new(stacks[1], holes[1]),
    ];
    players[sb_seat] = players[sb_seat].commit(cfg.sb);
    players[bb_seat] = players[bb_seat].commit(cfg.bb);

    let mut gs = GameState {
        session_id: session_id.to_string(),
        hand_id: hand_id.to_string(),
        seed,
        button,
        street: Street::Preflop,
        deck: deck.into_remaining(),
        board: Vec::with_capacity(5),
        players,
        sb: cfg.sb,
        bb: cfg.bb,
        pot: 0,
        to_act: Some(sb_seat),
        last_bet: cfg.bb,
        last_raise_size: cfg.bb,
        open_bet: true,
        checks_in_round: 0,
        starting_stacks: stacks,
        events: vec![
            HandEvent::Blind {
                who: sb_seat,
                amt: cfg.sb,
            },
            HandEvent::Blind {
                who: bb_seat,
                amt: cfg.bb,
            },
            HandEvent::DealHole {
                p0: holes[0],
                p1: holes[1],
            },
        ],
    };

    if gs.players[sb_seat].all_in {
        let excess = cfg.bb - cfg.sb;
        gs.players[bb_seat] = gs.players[bb_seat].refund(excess);
        gs.events.push(HandEvent::Uncalled {
            who: bb_seat,
            amt: excess,
        });
    }
    gs.maybe_advance()?;

    debug!(
        session_id,
        hand_id,
        seed,
        button,
        stacks = ?stacks,
        "hand started"
    );
    debug_assert_eq!(gs.total_chips(), gs.starting_total());
    Ok(gs)
}
