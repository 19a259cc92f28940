use crate::rules;

use super::{GameState, Phase};

impl GameState {
    /// Whether insurance decisions are currently being taken.
    #[must_use]
    pub fn is_insurance_offered(&self) -> bool {
        self.phase == Phase::Insurance
    }

    /// Places an insurance wager on a seat's hand.
    ///
    /// The wager is bounded by half the hand's bet and by the available
    /// bankroll. A no-op outside the insurance phase, on a hand that already
    /// insured, or for a zero amount.
    #[must_use]
    pub fn take_insurance(&self, seat_index: usize, hand_index: usize, amount: u64) -> Self {
        if self.phase != Phase::Insurance || amount == 0 {
            return self.clone();
        }
        let Some(hand) = self
            .seats
            .get(seat_index)
            .and_then(|seat| seat.hands.get(hand_index))
        else {
            return self.clone();
        };
        if !rules::can_take_insurance(hand, &self.rules) {
            return self.clone();
        }

        let wager = amount.min(hand.bet() / 2).min(self.bankroll);
        if wager == 0 {
            return self.clone();
        }

        let mut next = self.clone();
        next.bankroll -= wager;
        next.seats[seat_index].hands[hand_index].set_insurance(wager);
        next.push_message(format!("seat {seat_index}: insured for {wager}"));
        next
    }

    /// Closes the insurance phase: runs the dealer peek and routes the round
    /// exactly as the post-deal branch does.
    ///
    /// A no-op outside the insurance phase.
    #[must_use]
    pub fn skip_insurance(&self) -> Self {
        if self.phase != Phase::Insurance {
            return self.clone();
        }
        let mut next = self.clone();
        next.check_peek_then_advance();
        next
    }
}
