//! House rule configuration and the action-legality predicates.

use crate::hand::Hand;

/// Payout ratio for a natural blackjack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlackjackPayout {
    /// 3:2, the classic payout.
    #[default]
    ThreeToTwo,
    /// 6:5, the short payout.
    SixToFive,
}

impl BlackjackPayout {
    /// Winnings on top of the returned stake, floored to a chip unit.
    #[must_use]
    pub const fn winnings(self, bet: u64) -> u64 {
        match self {
            Self::ThreeToTwo => bet * 3 / 2,
            Self::SixToFive => bet * 6 / 5,
        }
    }
}

/// Surrender policy of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurrenderPolicy {
    /// Surrender is not offered.
    None,
    /// Surrender after the dealer checks for blackjack.
    #[default]
    Late,
    /// Surrender before the dealer checks for blackjack.
    Early,
}

/// Totals on which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoubleWindow {
    /// Double on any two cards.
    #[default]
    AnyTwo,
    /// Double only on totals 9 through 11.
    NineToEleven,
    /// Double only on totals 10 and 11.
    TenToEleven,
}

impl DoubleWindow {
    fn contains(self, total: u8) -> bool {
        match self {
            Self::AnyTwo => true,
            Self::NineToEleven => (9..=11).contains(&total),
            Self::TenToEleven => (10..=11).contains(&total),
        }
    }
}

/// House rules for a table session.
///
/// Use the builder pattern to customize:
///
/// ```
/// use ventuno::{BlackjackPayout, RuleConfig};
///
/// let rules = RuleConfig::default()
///     .with_decks(8)
///     .with_blackjack_payout(BlackjackPayout::SixToFive)
///     .with_dealer_stands_soft_17(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    /// Whether the dealer stands on soft 17 (S17) or hits it (H17).
    pub dealer_stands_soft_17: bool,
    /// Payout ratio for a natural blackjack.
    pub blackjack_payout: BlackjackPayout,
    /// Whether insurance is offered against a dealer Ace.
    pub insurance: bool,
    /// Surrender policy.
    pub surrender: SurrenderPolicy,
    /// Totals on which doubling is allowed.
    pub double_window: DoubleWindow,
    /// Whether doubling is allowed on hands created by a split.
    pub double_after_split: bool,
    /// Maximum number of hands a seat may hold after splits.
    pub split_max_hands: u8,
    /// Whether ten-value cards of different ranks form a splittable pair.
    pub split_by_value: bool,
    /// Whether split Aces may be split again.
    pub resplit_aces: bool,
    /// Whether split Aces may be hit (otherwise each receives one card).
    pub hit_split_aces: bool,
    /// Whether the dealer peeks for blackjack on a ten or Ace up-card.
    pub dealer_peeks: bool,
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe dealt before a reshuffle is due.
    pub penetration: f64,
    /// Minimum bet per seat.
    pub min_bet: u64,
    /// Maximum bet per seat.
    pub max_bet: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            dealer_stands_soft_17: true,
            blackjack_payout: BlackjackPayout::ThreeToTwo,
            insurance: true,
            surrender: SurrenderPolicy::Late,
            double_window: DoubleWindow::AnyTwo,
            double_after_split: true,
            split_max_hands: 4,
            split_by_value: true,
            resplit_aces: false,
            hit_split_aces: false,
            dealer_peeks: true,
            decks: 6,
            penetration: 0.75,
            min_bet: 5,
            max_bet: 500,
        }
    }
}

impl RuleConfig {
    /// Sets whether the dealer stands on soft 17.
    #[must_use]
    pub const fn with_dealer_stands_soft_17(mut self, stands: bool) -> Self {
        self.dealer_stands_soft_17 = stands;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_payout(mut self, payout: BlackjackPayout) -> Self {
        self.blackjack_payout = payout;
        self
    }

    /// Sets whether insurance is offered.
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }

    /// Sets the surrender policy.
    #[must_use]
    pub const fn with_surrender(mut self, policy: SurrenderPolicy) -> Self {
        self.surrender = policy;
        self
    }

    /// Sets the double-eligibility window.
    #[must_use]
    pub const fn with_double_window(mut self, window: DoubleWindow) -> Self {
        self.double_window = window;
        self
    }

    /// Sets whether doubling after a split is allowed.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the maximum number of hands per seat after splits.
    #[must_use]
    pub const fn with_split_max_hands(mut self, max: u8) -> Self {
        self.split_max_hands = max;
        self
    }

    /// Sets whether mixed ten-value cards form a splittable pair.
    #[must_use]
    pub const fn with_split_by_value(mut self, by_value: bool) -> Self {
        self.split_by_value = by_value;
        self
    }

    /// Sets whether split Aces may be resplit.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets whether split Aces may be hit.
    #[must_use]
    pub const fn with_hit_split_aces(mut self, allowed: bool) -> Self {
        self.hit_split_aces = allowed;
        self
    }

    /// Sets whether the dealer peeks on a ten or Ace up-card.
    #[must_use]
    pub const fn with_dealer_peeks(mut self, peeks: bool) -> Self {
        self.dealer_peeks = peeks;
        self
    }

    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the shoe penetration.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the betting limits.
    #[must_use]
    pub const fn with_bet_limits(mut self, min: u64, max: u64) -> Self {
        self.min_bet = min;
        self.max_bet = max;
        self
    }
}

/// Whether the hand may take another card.
#[must_use]
pub fn can_hit(hand: &Hand) -> bool {
    !hand.is_resolved() && !hand.is_surrendered() && !hand.is_blackjack() && !hand.is_bust()
}

/// Whether the hand may stand.
#[must_use]
pub fn can_stand(hand: &Hand) -> bool {
    !hand.is_resolved()
}

/// Whether the hand may double down.
///
/// The eligibility window is checked on the total the hand reads as: the
/// soft total for a soft hand, the hard total otherwise.
#[must_use]
pub fn can_double(hand: &Hand, rules: &RuleConfig) -> bool {
    if hand.len() != 2
        || hand.is_resolved()
        || hand.is_surrendered()
        || hand.is_blackjack()
        || hand.is_doubled()
    {
        return false;
    }
    if hand.is_from_split() && !rules.double_after_split {
        return false;
    }

    let totals = hand.totals();
    let total = totals.soft.unwrap_or(totals.hard);
    rules.double_window.contains(total)
}

/// Whether the two cards form a pair under the configured equality rule.
#[must_use]
pub fn is_pair(hand: &Hand, rules: &RuleConfig) -> bool {
    match hand.cards() {
        [first, second] => {
            first.rank == second.rank
                || (rules.split_by_value && first.rank.value() == second.rank.value())
        }
        _ => false,
    }
}

/// Whether the hand may be split, given how many hands the seat holds.
#[must_use]
pub fn can_split(hand: &Hand, seat_hand_count: usize, rules: &RuleConfig) -> bool {
    if hand.is_resolved() || hand.is_surrendered() || !is_pair(hand, rules) {
        return false;
    }
    if seat_hand_count >= rules.split_max_hands as usize {
        return false;
    }
    // A pair of Aces born from an earlier split needs the resplit-aces rule.
    if hand.is_split_ace() && !rules.resplit_aces {
        return false;
    }
    true
}

/// Whether the hand may surrender.
#[must_use]
pub fn can_surrender(hand: &Hand, rules: &RuleConfig) -> bool {
    rules.surrender != SurrenderPolicy::None
        && !hand.is_resolved()
        && !hand.is_surrendered()
        && !hand.is_blackjack()
        && hand.len() == 2
}

/// Whether the hand may place an insurance wager.
#[must_use]
pub fn can_take_insurance(hand: &Hand, rules: &RuleConfig) -> bool {
    rules.insurance && hand.insurance().is_none() && hand.len() == 2
}

/// The set of actions legal for a hand in its current state.
///
/// Produced by the state machine for the active hand and consumed by both
/// the host UI (button state) and the strategy advisor (legality
/// reconciliation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalActions {
    /// Hit is legal.
    pub hit: bool,
    /// Stand is legal.
    pub stand: bool,
    /// Double down is legal.
    pub double: bool,
    /// Split is legal.
    pub split: bool,
    /// Surrender is legal.
    pub surrender: bool,
}

impl LegalActions {
    /// Evaluates the rule predicates for a hand, ignoring bankroll.
    #[must_use]
    pub fn for_hand(hand: &Hand, seat_hand_count: usize, rules: &RuleConfig) -> Self {
        Self {
            hit: can_hit(hand),
            stand: can_stand(hand),
            double: can_double(hand, rules),
            split: can_split(hand, seat_hand_count, rules),
            surrender: can_surrender(hand, rules),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new(1, 10);
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Hearts));
        }
        hand
    }

    #[test]
    fn blackjack_payout_floors_to_chip_units() {
        assert_eq!(BlackjackPayout::ThreeToTwo.winnings(20), 30);
        assert_eq!(BlackjackPayout::ThreeToTwo.winnings(5), 7);
        assert_eq!(BlackjackPayout::SixToFive.winnings(20), 24);
    }

    #[test]
    fn cannot_hit_blackjack_or_bust() {
        assert!(!can_hit(&hand_of(&[Rank::Ace, Rank::King])));
        assert!(!can_hit(&hand_of(&[Rank::Ten, Rank::Nine, Rank::Five])));
        assert!(can_hit(&hand_of(&[Rank::Ten, Rank::Six])));
    }

    #[test]
    fn double_window_uses_hand_total() {
        let rules = RuleConfig::default().with_double_window(DoubleWindow::NineToEleven);
        assert!(can_double(&hand_of(&[Rank::Five, Rank::Six]), &rules));
        assert!(!can_double(&hand_of(&[Rank::Ten, Rank::Six]), &rules));
        // Soft 19 reads as 19, not hard 9.
        assert!(!can_double(&hand_of(&[Rank::Ace, Rank::Eight]), &rules));
    }

    #[test]
    fn double_after_split_gate() {
        let mut hand = Hand::from_split(2, Card::new(Rank::Eight, Suit::Clubs), 10);
        hand.add_card(Card::new(Rank::Three, Suit::Spades));

        let das = RuleConfig::default().with_double_after_split(true);
        let no_das = RuleConfig::default().with_double_after_split(false);
        assert!(can_double(&hand, &das));
        assert!(!can_double(&hand, &no_das));
    }

    #[test]
    fn pair_match_strictness() {
        let by_value = RuleConfig::default().with_split_by_value(true);
        let by_rank = RuleConfig::default().with_split_by_value(false);

        let mixed_tens = hand_of(&[Rank::Ten, Rank::King]);
        assert!(is_pair(&mixed_tens, &by_value));
        assert!(!is_pair(&mixed_tens, &by_rank));

        let eights = hand_of(&[Rank::Eight, Rank::Eight]);
        assert!(is_pair(&eights, &by_rank));
    }

    #[test]
    fn split_respects_max_hands_and_resplit_aces() {
        let rules = RuleConfig::default().with_split_max_hands(2);
        let eights = hand_of(&[Rank::Eight, Rank::Eight]);
        assert!(can_split(&eights, 1, &rules));
        assert!(!can_split(&eights, 2, &rules));

        let mut ace_child = Hand::from_split(3, Card::new(Rank::Ace, Suit::Hearts), 10);
        ace_child.add_card(Card::new(Rank::Ace, Suit::Clubs));
        assert!(!can_split(&ace_child, 1, &RuleConfig::default()));
        assert!(can_split(
            &ace_child,
            1,
            &RuleConfig::default().with_resplit_aces(true)
        ));
    }

    #[test]
    fn surrender_requires_policy_and_two_cards() {
        let sixteen = hand_of(&[Rank::Nine, Rank::Seven]);
        assert!(can_surrender(&sixteen, &RuleConfig::default()));
        assert!(!can_surrender(
            &sixteen,
            &RuleConfig::default().with_surrender(SurrenderPolicy::None)
        ));
        assert!(!can_surrender(
            &hand_of(&[Rank::Two, Rank::Four, Rank::Ten]),
            &RuleConfig::default()
        ));
        assert!(!can_surrender(
            &hand_of(&[Rank::Ace, Rank::King]),
            &RuleConfig::default()
        ));
    }

    #[test]
    fn insurance_only_once() {
        let mut hand = hand_of(&[Rank::Nine, Rank::Seven]);
        assert!(can_take_insurance(&hand, &RuleConfig::default()));
        hand.set_insurance(5);
        assert!(!can_take_insurance(&hand, &RuleConfig::default()));
    }
}
