use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Packs category and kickers into one integer with the same ordering.
    pub fn score(&self) -> u32 {
        self.kickers
            .iter()
            .fold(self.category as u32, |acc, &k| (acc << 4) | k as u32)
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_hands(self, other)
    }
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn evaluate_hand(cards: &[Card; 7]) -> HandStrength {
    evaluate_cards(cards)
}

/// Ranks the best poker hand contained in 5 to 7 cards.
pub fn evaluate_cards(cards: &[Card]) -> HandStrength {
    debug_assert!(cards.len() >= 5 && cards.len() <= 7);
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        by_suit[s].sort_unstable();
        if let Some(high) = detect_straight_high(&by_suit[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    let uniq: Vec<u8> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .collect();
    if let Some(high) = detect_straight_high(&uniq) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card; all lists are high -> low
    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trip_ranks.first() {
        let mut k = [t, 0, 0, 0, 0];
        fill_kickers(&mut k[1..3], &singles);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let mut k = [pair_ranks[0], pair_ranks[1], 0, 0, 0];
        // a third pair can play as the kicker
        let mut rest: Vec<u8> = pair_ranks[2..].iter().chain(&singles).copied().collect();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        fill_kickers(&mut k[2..3], &rest);
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(&p) = pair_ranks.first() {
        let mut k = [p, 0, 0, 0, 0];
        fill_kickers(&mut k[1..4], &singles);
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    fill_kickers(&mut k, &singles);
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Picks the strongest 5-card subset of seven cards.
///
/// The returned cards are sorted high to low; the strength equals
/// [`evaluate_hand`] on all seven.
pub fn best_five(cards: &[Card; 7]) -> ([Card; 5], HandStrength) {
    let mut best_cards = [cards[0], cards[1], cards[2], cards[3], cards[4]];
    let mut best = evaluate_cards(&best_cards);
    for skip_a in 0..7 {
        for skip_b in (skip_a + 1)..7 {
            let mut five = [cards[0]; 5];
            let picked = cards
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip_a && i != skip_b)
                .map(|(_, &c)| c);
            for (slot, c) in five.iter_mut().zip(picked) {
                *slot = c;
            }
            let hs = evaluate_cards(&five);
            if hs > best {
                best = hs;
                best_cards = five;
            }
        }
    }
    best_cards.sort_unstable_by(|a, b| b.cmp(a));
    (best_cards, best)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn fill_kickers(slots: &mut [u8], ranks_high_to_low: &[u8]) {
    for (slot, &r) in slots.iter_mut().zip(ranks_high_to_low) {
        *slot = r;
    }
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    let mut v = sorted_unique_ranks.to_vec();
    v.sort_unstable();
    v.dedup();
    // Ace-low straight support: treat Ace as 1 additionally
    if v.last() == Some(&14) {
        v.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = None;
    for i in 1..v.len() {
        if v[i] == v[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = Some(v[i]);
            }
        } else {
            run = 1;
        }
    }
    best_high
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    if let Some(&second_trip) = trips.get(1) {
        return Some((t, second_trip.max(pairs.first().copied().unwrap_or(0))));
    }
    pairs.first().map(|&p| (t, p))
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn seven(s: &str) -> [Card; 7] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn third_pair_can_be_the_two_pair_kicker() {
        let hs = evaluate_hand(&seven("Kc Kd Qh Qs Jc Jd 2h"));
        assert_eq!(hs.category, Category::TwoPair);
        assert_eq!(hs.kickers, [13, 12, 11, 0, 0]);
    }

    #[test]
    fn wheel_is_five_high_straight() {
        let hs = evaluate_hand(&seven("Ac 2d 3h 4s 5c Kd 9h"));
        assert_eq!(hs.category, Category::Straight);
        assert_eq!(hs.kickers[0], 5);
    }

    #[test]
    fn two_trips_make_a_full_house() {
        let hs = evaluate_hand(&seven("9c 9d 9h 4s 4c 4d Ah"));
        assert_eq!(hs.category, Category::FullHouse);
        assert_eq!(hs.kickers[..2], [9, 4]);
    }

    #[test]
    fn score_preserves_ordering() {
        let a = evaluate_hand(&seven("Ac Ad 3h 4s 9c Kd 8h"));
        let b = evaluate_hand(&seven("Ac Ad 3h 4s 9c Qd 8h"));
        assert!(a > b);
        assert!(a.score() > b.score());
    }

    #[test]
    fn best_five_matches_seven_card_strength() {
        for hand in [
            "Th Jh Qh Kh Ah 2c 3d",
            "Kc Kd Qh Qs Jc Jd 2h",
            "Ac 2d 3h 4s 5c Kd 9h",
            "2h 7h Jh Qh 9h Ac Kd",
            "Ac Kh 9s 8d 7c 3d 2h",
        ] {
            let cards = seven(hand);
            let (five, hs) = best_five(&cards);
            assert_eq!(hs, evaluate_hand(&cards), "{hand}");
            assert_eq!(evaluate_cards(&five), hs, "{hand}");
        }
    }
}
