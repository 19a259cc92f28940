//! The round state machine: seats, dealer, shoe, phase, and bankroll.
//!
//! [`GameState`] is the aggregate root. Every operation takes the current
//! snapshot by reference and returns a fresh, fully-consistent one; a caller
//! never observes a partially-applied transition. Illegal calls (wrong
//! phase, failed rule predicate, insufficient bankroll) return the state
//! unchanged rather than erroring, so stale UI input cannot corrupt a
//! session. The only fatal condition is an exhausted shoe.

use crate::hand::{Dealer, Hand};
use crate::rules::{LegalActions, RuleConfig};
use crate::shoe::Shoe;

mod actions;
mod deal;
mod dealer;
mod insurance;
pub mod state;

pub use state::{Cursor, Phase};

/// Number of seats at the table.
pub const TABLE_SEATS: usize = 5;

/// Maximum number of entries retained in the message log.
const MESSAGE_LOG_LIMIT: usize = 32;

/// A seat at the table. Seats persist across rounds; hands do not.
#[derive(Debug, Clone)]
pub struct Seat {
    /// Position of the seat at the table.
    pub index: usize,
    /// Whether a player occupies the seat.
    pub occupied: bool,
    /// The seat's base bet for the next deal. Zero sits the round out.
    pub bet: u64,
    /// The seat's hands this round (more than one only after splits).
    pub hands: Vec<Hand>,
}

impl Seat {
    const fn new(index: usize) -> Self {
        Self {
            index,
            occupied: false,
            bet: 0,
            hands: Vec::new(),
        }
    }

    /// Whether the seat takes part in the round being dealt.
    #[must_use]
    pub const fn is_staked(&self) -> bool {
        self.occupied && self.bet > 0
    }
}

/// Full table state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase of the round.
    pub phase: Phase,
    /// All seats, in table order.
    pub seats: Vec<Seat>,
    /// The dealer's hand and peek state.
    pub dealer: Dealer,
    /// The card shoe.
    pub shoe: Shoe,
    /// Position of the active hand, `None` outside the player phase.
    pub cursor: Option<Cursor>,
    /// Player chips not currently staked on a hand.
    pub bankroll: u64,
    /// Number of rounds dealt this session.
    pub round: u32,
    /// Bounded log of table events, oldest first.
    pub messages: Vec<String>,
    /// House rules for the session.
    pub rules: RuleConfig,
    next_hand_id: u64,
}

impl GameState {
    /// Creates a fresh table in the betting phase.
    ///
    /// The shoe is built and shuffled from `rules.decks` with its own RNG
    /// seeded from `seed`.
    #[must_use]
    pub fn new(rules: RuleConfig, bankroll: u64, seed: u64) -> Self {
        let shoe = Shoe::new(rules.decks, rules.penetration, seed);
        Self {
            phase: Phase::Betting,
            seats: (0..TABLE_SEATS).map(Seat::new).collect(),
            dealer: Dealer::new(),
            shoe,
            cursor: None,
            bankroll,
            round: 0,
            messages: Vec::new(),
            rules,
            next_hand_id: 0,
        }
    }

    /// Seats a player. Legal only while betting; otherwise a no-op.
    #[must_use]
    pub fn sit(&self, seat_index: usize) -> Self {
        let mut next = self.clone();
        if self.phase == Phase::Betting {
            if let Some(seat) = next.seats.get_mut(seat_index) {
                seat.occupied = true;
            }
        }
        next
    }

    /// Vacates a seat. Legal only while betting; otherwise a no-op.
    #[must_use]
    pub fn leave(&self, seat_index: usize) -> Self {
        let mut next = self.clone();
        if self.phase == Phase::Betting {
            if let Some(seat) = next.seats.get_mut(seat_index) {
                seat.occupied = false;
                seat.bet = 0;
                seat.hands.clear();
            }
        }
        next
    }

    /// Sets a seat's bet, clamped to the table limits.
    ///
    /// An amount of zero clears the bet, sitting the seat out of the next
    /// deal. Legal only while betting; otherwise a no-op.
    #[must_use]
    pub fn set_bet(&self, seat_index: usize, amount: u64) -> Self {
        let mut next = self.clone();
        if self.phase == Phase::Betting {
            if let Some(seat) = next.seats.get_mut(seat_index) {
                if seat.occupied {
                    seat.bet = if amount == 0 {
                        0
                    } else {
                        amount.clamp(self.rules.min_bet, self.rules.max_bet)
                    };
                }
            }
        }
        next
    }

    /// The hand the cursor points at, if any.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        let cursor = self.cursor?;
        self.seats.get(cursor.seat)?.hands.get(cursor.hand)
    }

    /// Legal actions for the active hand, bankroll included.
    ///
    /// All-false outside the player phase. This is the set the strategy
    /// advisor reconciles against and a host UI renders buttons from.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        if self.phase != Phase::PlayerTurn {
            return LegalActions::default();
        }
        let Some(cursor) = self.cursor else {
            return LegalActions::default();
        };
        let Some(seat) = self.seats.get(cursor.seat) else {
            return LegalActions::default();
        };
        let Some(hand) = seat.hands.get(cursor.hand) else {
            return LegalActions::default();
        };

        let mut legal = LegalActions::for_hand(hand, seat.hands.len(), &self.rules);
        // Doubling and splitting stake a second bet.
        legal.double &= self.bankroll >= hand.bet();
        legal.split &= self.bankroll >= hand.bet();
        legal
    }

    pub(crate) fn next_hand_id(&mut self) -> u64 {
        let id = self.next_hand_id;
        self.next_hand_id += 1;
        id
    }

    pub(crate) fn push_message(&mut self, message: impl Into<String>) {
        if self.messages.len() == MESSAGE_LOG_LIMIT {
            self.messages.remove(0);
        }
        self.messages.push(message.into());
    }
}
