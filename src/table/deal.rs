use crate::card::Rank;
use crate::error::ShoeError;
use crate::hand::Hand;

use super::{GameState, Phase};

impl GameState {
    /// Deals a new round.
    ///
    /// Requires the betting phase, at least one staked seat, and a bankroll
    /// covering the total staked; otherwise a no-op. Reshuffles first when
    /// the cut card was passed, debits the bankroll, then deals one card per
    /// staked seat, the dealer up-card, a second card per seat, and the
    /// dealer hole-card. Naturals are flagged as dealt.
    ///
    /// With an Ace up-card and insurance enabled the table moves to the
    /// insurance phase; otherwise the dealer peek runs immediately and play
    /// continues at the first undecided hand (or jumps straight to
    /// settlement on a dealer blackjack).
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe runs out mid-deal.
    pub fn deal(&self) -> Result<Self, ShoeError> {
        if self.phase != Phase::Betting {
            return Ok(self.clone());
        }

        let staked: Vec<usize> = self
            .seats
            .iter()
            .filter(|seat| seat.is_staked())
            .map(|seat| seat.index)
            .collect();
        let total: u64 = staked.iter().map(|&i| self.seats[i].bet).sum();

        if staked.is_empty() || total > self.bankroll {
            return Ok(self.clone());
        }

        let mut next = self.clone();

        if next.shoe.needs_reshuffle() {
            next.shoe.reshuffle();
            next.push_message("shoe reshuffled");
        }

        next.bankroll -= total;
        next.round += 1;

        // Fresh hands for the round.
        for &i in &staked {
            let id = next.next_hand_id();
            let bet = next.seats[i].bet;
            next.seats[i].hands = vec![Hand::new(id, bet)];
        }
        let stale = next.dealer.drain_cards();
        next.shoe.discard_cards(stale);

        // First pass, then the up-card.
        for &i in &staked {
            let card = next.shoe.draw()?;
            next.seats[i].hands[0].add_card(card);
        }
        let up = next.shoe.draw()?;
        next.dealer.add_card(up);

        // Second pass, then the hole-card.
        for &i in &staked {
            let card = next.shoe.draw()?;
            next.seats[i].hands[0].add_card(card);
            if next.seats[i].hands[0].is_blackjack() {
                next.seats[i].hands[0].resolve();
                next.push_message(format!("seat {i}: blackjack"));
            }
        }
        let hole = next.shoe.draw()?;
        next.dealer.add_card(hole);

        if up.rank == Rank::Ace && next.rules.insurance {
            next.phase = Phase::Insurance;
            next.cursor = None;
        } else {
            next.check_peek_then_advance();
        }

        Ok(next)
    }

    /// Runs the dealer peek when the rules call for it, then routes the
    /// round: straight to settlement on a dealer blackjack, otherwise to the
    /// first undecided hand.
    ///
    /// Shared by the post-deal branch and `skip_insurance`. The peek itself
    /// is idempotent and runs at most once per round.
    pub(super) fn check_peek_then_advance(&mut self) {
        let peek_due = self.rules.dealer_peeks
            && self
                .dealer
                .up_card()
                .is_some_and(|c| c.rank == Rank::Ace || c.rank.is_ten_value());

        if peek_due && self.peek_dealer() {
            self.dealer.reveal_hole();
            self.cursor = None;
            self.phase = Phase::Settlement;
            self.push_message("dealer shows blackjack");
        } else {
            self.begin_player_phase();
        }
    }

    fn peek_dealer(&mut self) -> bool {
        let already = self.dealer.has_peeked();
        let blackjack = self.dealer.peek();
        if !already && !blackjack {
            self.push_message("dealer peeks: no blackjack");
        }
        blackjack
    }
}
