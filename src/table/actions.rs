use crate::error::ShoeError;
use crate::hand::Hand;
use crate::rules;

use super::{Cursor, GameState, Phase};

impl GameState {
    fn active_cursor(&self) -> Option<Cursor> {
        if self.phase != Phase::PlayerTurn {
            return None;
        }
        let cursor = self.cursor?;
        self.seats.get(cursor.seat)?.hands.get(cursor.hand)?;
        Some(cursor)
    }

    /// Draws a card for the active hand.
    ///
    /// A no-op when hitting is illegal. A hand that busts is resolved on the
    /// spot and the cursor advances.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe is out of cards.
    pub fn player_hit(&self) -> Result<Self, ShoeError> {
        let Some(cursor) = self.active_cursor() else {
            return Ok(self.clone());
        };
        if !rules::can_hit(&self.seats[cursor.seat].hands[cursor.hand]) {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let card = next.shoe.draw()?;
        let hand = &mut next.seats[cursor.seat].hands[cursor.hand];
        hand.add_card(card);
        if hand.is_bust() {
            let seat = cursor.seat;
            next.push_message(format!("seat {seat}: bust"));
        }
        next.advance_cursor();
        Ok(next)
    }

    /// Stands the active hand. A no-op when standing is illegal.
    #[must_use]
    pub fn player_stand(&self) -> Self {
        let Some(cursor) = self.active_cursor() else {
            return self.clone();
        };
        if !rules::can_stand(&self.seats[cursor.seat].hands[cursor.hand]) {
            return self.clone();
        }

        let mut next = self.clone();
        next.seats[cursor.seat].hands[cursor.hand].resolve();
        next.advance_cursor();
        next
    }

    /// Doubles the active hand: doubles the wager, draws exactly one card,
    /// and resolves the hand.
    ///
    /// A no-op when doubling is illegal or the bankroll cannot cover the
    /// second stake.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe is out of cards.
    pub fn player_double(&self) -> Result<Self, ShoeError> {
        let Some(cursor) = self.active_cursor() else {
            return Ok(self.clone());
        };
        let hand = &self.seats[cursor.seat].hands[cursor.hand];
        if !rules::can_double(hand, &self.rules) || self.bankroll < hand.bet() {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let stake = next.seats[cursor.seat].hands[cursor.hand].bet();
        next.bankroll -= stake;

        let card = next.shoe.draw()?;
        let hand = &mut next.seats[cursor.seat].hands[cursor.hand];
        hand.double_bet();
        hand.add_card(card);
        hand.resolve();

        let seat = cursor.seat;
        if next.seats[cursor.seat].hands[cursor.hand].is_bust() {
            next.push_message(format!("seat {seat}: doubled and bust"));
        } else {
            next.push_message(format!("seat {seat}: doubled down"));
        }
        next.advance_cursor();
        Ok(next)
    }

    /// Splits the active pair into two hands.
    ///
    /// The children replace the original in place, each receives one card
    /// immediately, and the cursor stays on the first child. Split Aces are
    /// resolved after their one card unless hitting split Aces is allowed.
    ///
    /// A no-op when splitting is illegal or the bankroll cannot cover the
    /// second stake.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe is out of cards.
    #[expect(
        clippy::missing_panics_doc,
        reason = "can_split guarantees a two-card pair before the expects"
    )]
    pub fn player_split(&self) -> Result<Self, ShoeError> {
        let Some(cursor) = self.active_cursor() else {
            return Ok(self.clone());
        };
        let seat = &self.seats[cursor.seat];
        let hand = &seat.hands[cursor.hand];
        if !rules::can_split(hand, seat.hands.len(), &self.rules) || self.bankroll < hand.bet() {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let bet = next.seats[cursor.seat].hands[cursor.hand].bet();
        next.bankroll -= bet;

        let second = next.seats[cursor.seat].hands[cursor.hand]
            .take_split_card()
            .expect("can_split was verified above");
        let first = next.seats[cursor.seat].hands[cursor.hand]
            .cards()
            .first()
            .copied()
            .expect("split hand keeps its first card");

        let left_id = next.next_hand_id();
        let right_id = next.next_hand_id();
        let mut left = Hand::from_split(left_id, first, bet);
        let mut right = Hand::from_split(right_id, second, bet);

        left.add_card(next.shoe.draw()?);
        right.add_card(next.shoe.draw()?);

        // One card only on split Aces, unless the house allows hitting them.
        if left.is_split_ace() && !next.rules.hit_split_aces {
            left.resolve();
            right.resolve();
        }

        let seat_hands = &mut next.seats[cursor.seat].hands;
        seat_hands[cursor.hand] = left;
        seat_hands.insert(cursor.hand + 1, right);

        next.push_message(format!("seat {}: split", cursor.seat));
        next.advance_cursor();
        Ok(next)
    }

    /// Surrenders the active hand, refunding half the wager.
    ///
    /// A no-op when surrendering is illegal.
    #[must_use]
    pub fn player_surrender(&self) -> Self {
        let Some(cursor) = self.active_cursor() else {
            return self.clone();
        };
        if !rules::can_surrender(&self.seats[cursor.seat].hands[cursor.hand], &self.rules) {
            return self.clone();
        }

        let mut next = self.clone();
        let hand = &mut next.seats[cursor.seat].hands[cursor.hand];
        let refund = hand.bet() / 2;
        hand.surrender();
        next.bankroll += refund;
        next.push_message(format!("seat {}: surrendered", cursor.seat));
        next.advance_cursor();
        next
    }

    /// Places the cursor on the first undecided hand and enters the player
    /// phase, or hands the round to the dealer when none remains.
    pub(super) fn begin_player_phase(&mut self) {
        self.cursor = None;
        self.advance_from(Cursor { seat: 0, hand: 0 });
    }

    /// Re-seats the cursor after an action: stays on the current hand while
    /// it is undecided, otherwise walks forward in seat-then-hand order.
    pub(super) fn advance_cursor(&mut self) {
        if let Some(cursor) = self.cursor {
            self.advance_from(cursor);
        }
    }

    fn advance_from(&mut self, from: Cursor) {
        for (seat_index, seat) in self.seats.iter().enumerate().skip(from.seat) {
            let first_hand = if seat_index == from.seat { from.hand } else { 0 };
            for (hand_index, hand) in seat.hands.iter().enumerate().skip(first_hand) {
                if !hand.is_resolved() && !hand.is_surrendered() {
                    self.cursor = Some(Cursor {
                        seat: seat_index,
                        hand: hand_index,
                    });
                    self.phase = Phase::PlayerTurn;
                    return;
                }
            }
        }
        self.cursor = None;
        self.phase = Phase::DealerTurn;
    }
}
