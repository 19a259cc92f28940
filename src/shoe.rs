//! The multi-deck shoe: construction, shuffling, drawing, and the cut card.

use rand::{RngCore, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha20Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeError;

/// A multi-deck shoe with a discard pile and a cut-card threshold.
///
/// Cards are drawn from the tail. Once the remaining cards fall to the cut
/// index, [`Shoe::needs_reshuffle`] turns on; the state machine acts on it
/// only during the betting phase, so a reshuffle never lands mid-round.
///
/// The shoe owns its RNG, seeded at construction. A reshuffle reseeds from
/// the current stream, so no two shoes share one.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    discard: Vec<Card>,
    cut_index: usize,
    decks: u8,
    penetration: f64,
    rng: ChaCha20Rng,
}

impl Shoe {
    /// Builds and shuffles a shoe of `decks × 52` cards.
    ///
    /// `penetration` is the fraction of the shoe dealt before a reshuffle is
    /// signaled; it is clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn new(decks: u8, penetration: f64, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_shoe(decks);
        cards.shuffle(&mut rng);

        let penetration = penetration.clamp(0.0, 1.0);
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let cut_index = (cards.len() as f64 * (1.0 - penetration)).floor() as usize;

        Self {
            cards,
            discard: Vec::new(),
            cut_index,
            decks,
            penetration,
            rng,
        }
    }

    /// Builds a shoe with an explicit card order and no shuffle.
    ///
    /// The last card of `cards` is drawn first. The cut index is computed
    /// from the stacked count, not the deck count, so a short stack does not
    /// read as already past the cut card. Intended for tests and round
    /// replays.
    #[must_use]
    pub fn stacked(decks: u8, penetration: f64, cards: Vec<Card>, seed: u64) -> Self {
        let mut shoe = Self::new(decks, penetration, seed);
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let cut_index = (cards.len() as f64 * (1.0 - shoe.penetration)).floor() as usize;
        shoe.cut_index = cut_index;
        shoe.cards = cards;
        shoe
    }

    /// Draws the next card from the tail of the shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] when no cards remain. This is fatal: the
    /// deck count cannot cover the seats and splits in play.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    /// Moves a hand's cards onto the discard pile.
    pub fn discard_cards(&mut self, cards: Vec<Card>) {
        self.discard.extend(cards);
    }

    /// Whether the cut card has been passed (remaining cards ≤ cut index).
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() <= self.cut_index
    }

    /// Rebuilds the shoe from the full deck count, clears the discard pile,
    /// and reshuffles under a fresh RNG stream.
    pub fn reshuffle(&mut self) {
        let seed = self.rng.next_u64();
        *self = Self::new(self.decks, self.penetration, seed);
    }

    /// Number of undealt cards.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// The cut-card index: a reshuffle is due once remaining ≤ this.
    #[must_use]
    pub const fn cut_index(&self) -> usize {
        self.cut_index
    }

    /// Number of decks the shoe was built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }
}

fn full_shoe(decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);
    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shoe_holds_full_deck_count() {
        let shoe = Shoe::new(6, 0.75, 7);
        assert_eq!(shoe.cards_remaining(), 6 * DECK_SIZE);
        assert_eq!(shoe.discard_len(), 0);
        assert_eq!(shoe.cut_index(), (6 * DECK_SIZE) / 4);
        assert!(!shoe.needs_reshuffle());
    }

    #[test]
    fn draw_pops_from_tail() {
        let top = Card::new(Rank::Five, Suit::Clubs);
        let mut shoe = Shoe::stacked(
            1,
            0.0,
            vec![Card::new(Rank::Nine, Suit::Hearts), top],
            1,
        );
        assert_eq!(shoe.draw().unwrap(), top);
        assert_eq!(shoe.cards_remaining(), 1);
    }

    #[test]
    fn stacked_cut_index_follows_the_stacked_count() {
        let cards = vec![Card::new(Rank::Five, Suit::Clubs); 8];
        let shoe = Shoe::stacked(6, 0.75, cards, 1);
        assert_eq!(shoe.cut_index(), 2);
        assert!(!shoe.needs_reshuffle());
    }

    #[test]
    fn empty_shoe_is_fatal() {
        let mut shoe = Shoe::stacked(1, 0.0, Vec::new(), 1);
        assert_eq!(shoe.draw().unwrap_err(), ShoeError::Empty);
    }

    #[test]
    fn cut_card_signals_reshuffle() {
        let mut shoe = Shoe::new(1, 0.75, 3);
        // Draw down to the cut index.
        while shoe.cards_remaining() > shoe.cut_index() {
            shoe.draw().unwrap();
        }
        assert!(shoe.needs_reshuffle());
    }

    #[test]
    fn reshuffle_restores_full_count_and_clears_discard() {
        let mut shoe = Shoe::new(2, 0.5, 11);
        let mut drawn = Vec::new();
        for _ in 0..60 {
            drawn.push(shoe.draw().unwrap());
        }
        shoe.discard_cards(drawn);
        assert_eq!(shoe.discard_len(), 60);

        shoe.reshuffle();
        assert_eq!(shoe.cards_remaining(), 2 * DECK_SIZE);
        assert_eq!(shoe.discard_len(), 0);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = Shoe::new(1, 0.75, 99);
        let mut b = Shoe::new(1, 0.75, 99);
        for _ in 0..DECK_SIZE {
            assert_eq!(a.draw().unwrap(), b.draw().unwrap());
        }
    }
}
