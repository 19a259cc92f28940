//! Phase and cursor types for the round state machine.

/// Table phase. A round walks `Betting → Insurance? → PlayerTurn →
/// DealerTurn → Settlement → Betting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting seat changes and bets for the next round.
    Betting,
    /// Offering insurance against a dealer Ace.
    Insurance,
    /// Waiting for decisions on the active hand.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round is over; hands can be settled and the table reset.
    Settlement,
}

/// Position of the active hand: seat index, then hand index within the seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index of the active seat.
    pub seat: usize,
    /// Index of the active hand within the seat (>0 only after splits).
    pub hand: usize,
}
