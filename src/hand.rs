//! Hand evaluation and the player/dealer hand aggregates.

use crate::card::{Card, Rank};

/// Hard and (when present) soft totals of a set of cards.
///
/// The hard total counts every Ace as 1. The soft total counts exactly one
/// Ace as 11 and is present only when that promotion does not bust; a second
/// promotion would always bust, so at most one Ace is ever soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Total with every Ace counted as 1.
    pub hard: u8,
    /// Total with one Ace counted as 11, when that stays at or below 21.
    pub soft: Option<u8>,
}

impl Totals {
    /// The best total: soft when present, hard otherwise.
    #[must_use]
    pub fn best(self) -> u8 {
        self.soft.unwrap_or(self.hard)
    }
}

/// Computes the hard/soft totals of a card sequence.
#[must_use]
pub fn totals(cards: &[Card]) -> Totals {
    let mut hard: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        hard = hard.saturating_add(card.rank.value());
    }

    let soft = (aces > 0 && hard <= 11).then(|| hard + 10);
    Totals { hard, soft }
}

/// Whether the cards are bust: hard total over 21.
#[must_use]
pub fn is_bust(cards: &[Card]) -> bool {
    totals(cards).hard > 21
}

/// Whether the cards form a two-card 21.
///
/// Split-origin hands are excluded at the [`Hand`] level; a post-split
/// two-card 21 is an ordinary 21, not a natural.
#[must_use]
pub fn is_twenty_one(cards: &[Card]) -> bool {
    cards.len() == 2 && totals(cards).best() == 21
}

/// Terminal resolution of a hand. `Pending` until settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not yet settled.
    Pending,
    /// Natural blackjack paid at the configured premium.
    Blackjack,
    /// Won against the dealer.
    Win,
    /// Lost against the dealer.
    Lose,
    /// Tied with the dealer; stake returned.
    Push,
    /// Busted over 21; stake forfeited.
    Bust,
    /// Surrendered; half the stake returned.
    Surrender,
}

/// A player's hand: cards, wager, and per-round flags.
///
/// Owned by exactly one seat. Created empty at round start (or with one card
/// at a split) and immutable in outcome once resolved.
#[derive(Debug, Clone)]
pub struct Hand {
    id: u64,
    cards: Vec<Card>,
    bet: u64,
    insurance: Option<u64>,
    doubled: bool,
    surrendered: bool,
    from_split: bool,
    split_ace: bool,
    resolved: bool,
    outcome: Outcome,
}

impl Hand {
    /// Creates a new empty hand with the given wager.
    #[must_use]
    pub const fn new(id: u64, bet: u64) -> Self {
        Self {
            id,
            cards: Vec::new(),
            bet,
            insurance: None,
            doubled: false,
            surrendered: false,
            from_split: false,
            split_ace: false,
            resolved: false,
            outcome: Outcome::Pending,
        }
    }

    /// Creates one child of a split, seeded with a single card.
    #[must_use]
    pub fn from_split(id: u64, card: Card, bet: u64) -> Self {
        let split_ace = card.rank == Rank::Ace;
        Self {
            id,
            cards: vec![card],
            bet,
            insurance: None,
            doubled: false,
            surrendered: false,
            from_split: true,
            split_ace,
            resolved: false,
            outcome: Outcome::Pending,
        }
    }

    /// Hand identifier, unique within a session.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Adds a card, resolving the hand immediately on a bust.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        if is_bust(&self.cards) {
            self.resolved = true;
            self.settle(Outcome::Bust);
        }
    }

    /// The cards in the hand, in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Hard/soft totals of the hand.
    #[must_use]
    pub fn totals(&self) -> Totals {
        totals(&self.cards)
    }

    /// Best total: soft when present, hard otherwise.
    #[must_use]
    pub fn best_total(&self) -> u8 {
        self.totals().best()
    }

    /// Whether the hard total exceeds 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Whether the hand is a natural: a two-card 21 not created by a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        !self.from_split && is_twenty_one(&self.cards)
    }

    /// The wager on this hand.
    #[must_use]
    pub const fn bet(&self) -> u64 {
        self.bet
    }

    /// The insurance wager, if one was placed.
    #[must_use]
    pub const fn insurance(&self) -> Option<u64> {
        self.insurance
    }

    /// Records an insurance wager.
    pub const fn set_insurance(&mut self, amount: u64) {
        self.insurance = Some(amount);
    }

    /// Removes and returns the insurance wager at settlement.
    pub const fn take_insurance(&mut self) -> Option<u64> {
        self.insurance.take()
    }

    /// Doubles the wager and marks the hand doubled.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    /// Whether the hand has been doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Whether the hand has been surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Whether this hand was created by a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Whether this hand descends from a split pair of Aces.
    #[must_use]
    pub const fn is_split_ace(&self) -> bool {
        self.split_ace
    }

    /// Whether no further player decisions apply to this hand.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Marks the hand as needing no further player decisions.
    pub const fn resolve(&mut self) {
        self.resolved = true;
    }

    /// The settled outcome, `Pending` until settlement.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Settles the hand to a terminal outcome.
    ///
    /// The transition out of `Pending` happens exactly once; settling an
    /// already-terminal hand is a no-op.
    pub const fn settle(&mut self, outcome: Outcome) {
        if matches!(self.outcome, Outcome::Pending) {
            self.outcome = outcome;
        }
    }

    /// Marks the hand surrendered and settles it.
    pub const fn surrender(&mut self) {
        self.surrendered = true;
        self.resolved = true;
        self.settle(Outcome::Surrender);
    }

    /// The number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card when splitting a pair.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Drains all cards out of the hand for the discard pile.
    pub fn drain_cards(&mut self) -> Vec<Card> {
        core::mem::take(&mut self.cards)
    }
}

/// The dealer's hand: up-card, hole-card, and peek bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Dealer {
    cards: Vec<Card>,
    hole_revealed: bool,
    has_peeked: bool,
    blackjack: bool,
}

impl Dealer {
    /// Creates an empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
            has_peeked: false,
            blackjack: false,
        }
    }

    /// Adds a card to the dealer's hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// All cards, up-card first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// The face-down card.
    #[must_use]
    pub fn hole_card(&self) -> Option<Card> {
        self.cards.get(1).copied()
    }

    /// Whether the hole card has been turned over.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Turns the hole card over.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Whether the dealer has checked the hole card for a natural.
    #[must_use]
    pub const fn has_peeked(&self) -> bool {
        self.has_peeked
    }

    /// Peeks at the hole card, finalizing the natural-blackjack flag.
    ///
    /// Runs at most once per round; repeated calls change nothing.
    pub fn peek(&mut self) -> bool {
        if !self.has_peeked {
            self.has_peeked = true;
            self.blackjack = is_twenty_one(&self.cards);
        }
        self.blackjack
    }

    /// Whether the dealer holds a natural blackjack.
    ///
    /// Reliable once the dealer has peeked or the hole card is revealed.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.blackjack || is_twenty_one(&self.cards)
    }

    /// Hard/soft totals of the dealer's full hand.
    #[must_use]
    pub fn totals(&self) -> Totals {
        totals(&self.cards)
    }

    /// Best total of the dealer's full hand.
    #[must_use]
    pub fn best_total(&self) -> u8 {
        self.totals().best()
    }

    /// Whether the dealer has busted.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Drains all cards out for the discard pile and resets peek state.
    pub fn drain_cards(&mut self) -> Vec<Card> {
        self.hole_revealed = false;
        self.has_peeked = false;
        self.blackjack = false;
        core::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    #[test]
    fn hard_total_counts_aces_as_one() {
        let t = totals(&[card(Rank::Ace), card(Rank::Ace), card(Rank::Nine)]);
        assert_eq!(t.hard, 11);
        assert_eq!(t.soft, Some(21));
        assert_eq!(t.best(), 21);
    }

    #[test]
    fn soft_total_absent_when_promotion_busts() {
        let t = totals(&[card(Rank::Ace), card(Rank::Seven), card(Rank::Ten)]);
        assert_eq!(t.hard, 18);
        assert_eq!(t.soft, None);
    }

    #[test]
    fn face_cards_value_ten() {
        let t = totals(&[card(Rank::King), card(Rank::Queen), card(Rank::Jack)]);
        assert_eq!(t.hard, 30);
        assert!(is_bust(&[card(Rank::King), card(Rank::Queen), card(Rank::Jack)]));
    }

    #[test]
    fn natural_requires_two_cards() {
        assert!(is_twenty_one(&[card(Rank::Ace), card(Rank::King)]));
        assert!(!is_twenty_one(&[
            card(Rank::Seven),
            card(Rank::Seven),
            card(Rank::Seven)
        ]));
    }

    #[test]
    fn split_hand_twenty_one_is_not_blackjack() {
        let mut hand = Hand::from_split(1, card(Rank::Ace), 10);
        hand.add_card(card(Rank::King));
        assert_eq!(hand.best_total(), 21);
        assert!(!hand.is_blackjack());
        assert!(hand.is_split_ace());
    }

    #[test]
    fn bust_resolves_and_settles_once() {
        let mut hand = Hand::new(1, 10);
        hand.add_card(card(Rank::Ten));
        hand.add_card(card(Rank::Nine));
        hand.add_card(card(Rank::Five));
        assert!(hand.is_resolved());
        assert_eq!(hand.outcome(), Outcome::Bust);

        // Outcome is monotone: a later settle attempt changes nothing.
        hand.settle(Outcome::Win);
        assert_eq!(hand.outcome(), Outcome::Bust);
    }

    #[test]
    fn dealer_peek_is_idempotent() {
        let mut dealer = Dealer::new();
        dealer.add_card(card(Rank::Ace));
        dealer.add_card(card(Rank::Jack));

        assert!(dealer.peek());
        assert!(dealer.has_peeked());
        assert!(dealer.peek());
        assert!(dealer.is_blackjack());
    }

    #[test]
    fn dealer_drain_resets_round_state() {
        let mut dealer = Dealer::new();
        dealer.add_card(card(Rank::Ace));
        dealer.add_card(card(Rank::Jack));
        dealer.peek();
        dealer.reveal_hole();

        let cards = dealer.drain_cards();
        assert_eq!(cards.len(), 2);
        assert!(!dealer.has_peeked());
        assert!(!dealer.is_hole_revealed());
        assert!(!dealer.is_blackjack());
    }
}
