use crate::error::ShoeError;
use crate::hand::Outcome;

use super::{GameState, Phase};

impl GameState {
    /// Whether any hand still competes against the dealer's total.
    ///
    /// Busted, surrendered, and natural hands settle without reference to
    /// dealer draws, so the dealer only plays out when a stood hand remains.
    fn any_live_hand(&self) -> bool {
        self.seats.iter().flat_map(|seat| &seat.hands).any(|hand| {
            hand.outcome() == Outcome::Pending && !hand.is_bust() && !hand.is_blackjack()
        })
    }

    /// Plays out the dealer's hand.
    ///
    /// Reveals the hole card, then draws while the effective total (soft
    /// when at or under 21, hard otherwise) is below 17; on soft 17 the
    /// stand-on-soft-17 rule decides. A no-op outside the dealer phase.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe runs out while the dealer
    /// must draw.
    pub fn play_dealer(&self) -> Result<Self, ShoeError> {
        if self.phase != Phase::DealerTurn {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.dealer.reveal_hole();

        if next.any_live_hand() {
            loop {
                let totals = next.dealer.totals();
                let best = totals.best();
                if best > 17 {
                    break;
                }
                if best == 17 && (totals.soft.is_none() || next.rules.dealer_stands_soft_17) {
                    break;
                }
                let card = next.shoe.draw()?;
                next.dealer.add_card(card);
            }

            if next.dealer.is_bust() {
                next.push_message("dealer busts");
            } else {
                next.push_message(format!("dealer stands on {}", next.dealer.best_total()));
            }
        }

        next.phase = Phase::Settlement;
        Ok(next)
    }

    /// Settles every hand and pays the bankroll.
    ///
    /// Insurance resolves first: 3× the stake returns if and only if the
    /// dealer holds a natural, otherwise the stake is forfeited. Each hand
    /// then settles in priority order: surrendered and busted hands are
    /// already terminal, a player natural beats anything but a dealer
    /// natural, a dealer natural beats any non-natural, a dealer bust pays
    /// even money, and the rest compare best totals.
    ///
    /// Idempotent: a second call finds only terminal outcomes and consumed
    /// insurance, and changes nothing. A no-op outside settlement.
    #[must_use]
    pub fn settle_all_hands(&self) -> Self {
        if self.phase != Phase::Settlement {
            return self.clone();
        }

        let mut next = self.clone();
        next.dealer.reveal_hole();

        let dealer_blackjack = next.dealer.is_blackjack();
        let dealer_bust = next.dealer.is_bust();
        let dealer_total = next.dealer.best_total();

        let mut payouts: u64 = 0;
        let mut messages: Vec<String> = Vec::new();

        for seat in &mut next.seats {
            for hand in &mut seat.hands {
                if let Some(stake) = hand.take_insurance() {
                    if dealer_blackjack {
                        payouts += stake * 3;
                        messages.push(format!("seat {}: insurance pays {}", seat.index, stake * 2));
                    } else {
                        messages.push(format!("seat {}: insurance lost", seat.index));
                    }
                }

                if hand.outcome() != Outcome::Pending {
                    continue;
                }

                let bet = hand.bet();
                let (outcome, payout) = if hand.is_blackjack() {
                    if dealer_blackjack {
                        (Outcome::Push, bet)
                    } else {
                        (
                            Outcome::Blackjack,
                            bet + next.rules.blackjack_payout.winnings(bet),
                        )
                    }
                } else if dealer_blackjack {
                    (Outcome::Lose, 0)
                } else if dealer_bust {
                    (Outcome::Win, bet * 2)
                } else {
                    let total = hand.best_total();
                    if total > dealer_total {
                        (Outcome::Win, bet * 2)
                    } else if total < dealer_total {
                        (Outcome::Lose, 0)
                    } else {
                        (Outcome::Push, bet)
                    }
                };

                hand.settle(outcome);
                hand.resolve();
                payouts += payout;
                messages.push(format!(
                    "seat {}: {} (paid {payout})",
                    seat.index,
                    outcome_label(outcome)
                ));
            }
        }

        next.bankroll += payouts;
        for message in messages {
            next.push_message(message);
        }
        next
    }

    /// Clears the table for the next round.
    ///
    /// Discards every card to the shoe's discard pile, clears hands, resets
    /// the dealer, and returns to betting. Seats and their base bets
    /// persist. Logs a notice when the cut card was passed, since the next
    /// deal will reshuffle. A no-op outside settlement.
    #[must_use]
    pub fn prepare_next_round(&self) -> Self {
        if self.phase != Phase::Settlement {
            return self.clone();
        }

        let mut next = self.clone();
        for seat in &mut next.seats {
            for hand in &mut seat.hands {
                let cards = hand.drain_cards();
                next.shoe.discard_cards(cards);
            }
            seat.hands.clear();
        }
        let dealer_cards = next.dealer.drain_cards();
        next.shoe.discard_cards(dealer_cards);

        next.cursor = None;
        next.phase = Phase::Betting;
        if next.shoe.needs_reshuffle() {
            next.push_message("cut card passed: shoe will be reshuffled before the next deal");
        }
        next
    }
}

const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pending => "pending",
        Outcome::Blackjack => "blackjack",
        Outcome::Win => "win",
        Outcome::Lose => "lose",
        Outcome::Push => "push",
        Outcome::Bust => "bust",
        Outcome::Surrender => "surrender",
    }
}
