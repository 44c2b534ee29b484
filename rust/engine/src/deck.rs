use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A seeded 52-card deck. The same seed always yields the same permutation,
/// which is what makes hands replayable from their record.
///
/// ```
/// use hucoach_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(42);
/// let mut b = Deck::new_with_seed(42);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.deal_card(), b.deal_card());
/// assert_eq!(a.remaining(), 51);
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
    seed: u64,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
            seed,
        }
    }

    /// Resolves an optional seed, drawing a fresh one from the thread RNG when absent.
    pub fn resolve_seed(seed: Option<u64>) -> u64 {
        seed.unwrap_or_else(rand::random)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Consumes the deck, returning the undealt cards in dealing order.
    pub fn into_remaining(self) -> Vec<Card> {
        self.cards[self.position..].to_vec()
    }
}
