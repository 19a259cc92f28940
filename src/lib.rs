//! A rules-driven casino blackjack round engine.
//!
//! The crate provides a [`GameState`] value that tracks a table across the
//! betting, insurance, player-decision, dealer-play, and settlement phases.
//! Every operation is a pure state transform: it takes the current snapshot
//! and returns a fresh, fully-consistent one, so a host UI can render each
//! snapshot without ever observing a half-applied transition.
//!
//! A [`strategy::recommend`] advisor is included that returns the
//! basic-strategy action for any legal hand/dealer-upcard combination.
//!
//! # Example
//!
//! ```
//! use ventuno::{GameState, RuleConfig};
//!
//! let state = GameState::new(RuleConfig::default(), 1_000, 42);
//! let state = state.sit(0).set_bet(0, 25);
//! let state = state.deal().expect("shoe holds enough cards");
//! let _ = state;
//! ```

pub mod card;
pub mod error;
pub mod hand;
pub mod rules;
pub mod shoe;
pub mod strategy;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::ShoeError;
pub use hand::{Dealer, Hand, Outcome, Totals};
pub use rules::{BlackjackPayout, DoubleWindow, LegalActions, RuleConfig, SurrenderPolicy};
pub use shoe::Shoe;
pub use strategy::{Action, Advice, recommend};
pub use table::{Cursor, GameState, Phase, Seat, TABLE_SEATS};
