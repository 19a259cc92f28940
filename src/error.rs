//! Error types for engine operations.

use thiserror::Error;

/// Errors raised by the shoe.
///
/// An empty shoe is the engine's only fatal condition: it means the deck
/// count is too small for the seats and splits in play, and the session
/// needs a new shoe rather than a retry. Every other illegal call in the
/// engine is a silent no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// The shoe has no cards left mid-round.
    #[error("shoe exhausted mid-round: deck count too small for the seats and splits in play")]
    Empty,
}
