//! Basic-strategy advisor.
//!
//! [`recommend`] looks up the statistically correct action for a hand against
//! a dealer up-card in fixed-size tables, applies the rule-dependent
//! adjustments (H17 upgrades, double/surrender availability), and finally
//! reconciles against the caller's legal-action set so the returned action is
//! always executable.
//!
//! The tables are multi-deck basic strategy. Rows are indexed by player total
//! (or pair rank) and columns by the dealer up-card bucketed to ten values:
//! 2 through 9, the ten group, and Ace.

use crate::card::{Card, Rank};
use crate::hand::Hand;
use crate::rules::{LegalActions, RuleConfig, SurrenderPolicy, is_pair};

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Draw a card.
    Hit,
    /// Take no more cards.
    Stand,
    /// Double the wager and draw exactly one card.
    Double,
    /// Split the pair into two hands.
    Split,
    /// Forfeit half the wager and fold.
    Surrender,
}

impl Action {
    const fn name(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        }
    }
}

/// A strategy recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    /// The recommended action; always legal for the caller.
    pub action: Action,
    /// The action to take where the primary one is unavailable.
    pub fallback: Option<Action>,
    /// Human-readable explanation of the table row that produced the advice.
    pub reasoning: String,
}

/// One cell of a strategy table.
///
/// The composite variants carry their own fallback: `Dh` is "double, else
/// hit", `Ds` is "double, else stand", `SpH` is "split only with
/// double-after-split, else hit", `Us` is "surrender, else hit".
#[derive(Clone, Copy)]
enum Cell {
    H,
    S,
    Dh,
    Ds,
    Sp,
    SpH,
    Us,
}

use Cell::{Dh, Ds, H, S, Sp, SpH, Us};

/// Columns: dealer 2, 3, 4, 5, 6, 7, 8, 9, ten group, Ace.
const UPCARDS: usize = 10;

/// Hard totals 8 through 17, row index `total - 8`.
/// Totals below 8 always hit; totals above 17 always stand.
const HARD: [[Cell; UPCARDS]; 10] = [
    // 2   3   4   5   6   7   8   9  10   A
    [H, H, H, H, H, H, H, H, H, H],           // 8
    [H, Dh, Dh, Dh, Dh, H, H, H, H, H],       // 9
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],   // 10
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H],  // 11
    [H, H, S, S, S, H, H, H, H, H],           // 12
    [S, S, S, S, S, H, H, H, H, H],           // 13
    [S, S, S, S, S, H, H, H, H, H],           // 14
    [S, S, S, S, S, H, H, H, Us, H],          // 15
    [S, S, S, S, S, H, H, Us, Us, Us],        // 16
    [S, S, S, S, S, S, S, S, S, S],           // 17
];

/// Soft totals 13 (A-2) through 21 (A-10), row index `soft - 13`.
const SOFT: [[Cell; UPCARDS]; 9] = [
    // 2   3   4   5   6   7   8   9  10   A
    [H, H, H, Dh, Dh, H, H, H, H, H],         // 13
    [H, H, H, Dh, Dh, H, H, H, H, H],         // 14
    [H, H, Dh, Dh, Dh, H, H, H, H, H],        // 15
    [H, H, Dh, Dh, Dh, H, H, H, H, H],        // 16
    [H, Dh, Dh, Dh, Dh, H, H, H, H, H],       // 17
    [S, Ds, Ds, Ds, Ds, S, S, H, H, S],       // 18
    [S, S, S, S, S, S, S, S, S, S],           // 19
    [S, S, S, S, S, S, S, S, S, S],           // 20
    [S, S, S, S, S, S, S, S, S, S],           // 21
];

/// Pairs by rank: A, 2, 3, 4, 5, 6, 7, 8, 9, ten group.
const PAIRS: [[Cell; UPCARDS]; 10] = [
    // 2    3    4    5    6    7   8   9  10   A
    [Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp], // A,A
    [SpH, SpH, Sp, Sp, Sp, Sp, H, H, H, H],   // 2,2
    [SpH, SpH, Sp, Sp, Sp, Sp, H, H, H, H],   // 3,3
    [H, H, H, SpH, SpH, H, H, H, H, H],       // 4,4
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],   // 5,5 plays as hard 10
    [SpH, Sp, Sp, Sp, Sp, H, H, H, H, H],     // 6,6
    [Sp, Sp, Sp, Sp, Sp, Sp, H, H, H, H],     // 7,7
    [Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp, Sp], // 8,8
    [Sp, Sp, Sp, Sp, Sp, S, Sp, Sp, S, S],    // 9,9
    [S, S, S, S, S, S, S, S, S, S],           // 10,10
];

/// Column for a dealer up-card, bucketing the ten group together.
const fn upcard_column(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 8,
        other => other.value() as usize - 2,
    }
}

const fn upcard_label(rank: Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => "10",
    }
}

const fn pair_row(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 9,
        other => other.value() as usize - 1,
    }
}

/// Expands a table cell into a primary action and its fallback.
fn expand(cell: Cell, rules: &RuleConfig) -> (Action, Option<Action>) {
    match cell {
        H => (Action::Hit, None),
        S => (Action::Stand, None),
        Dh => (Action::Double, Some(Action::Hit)),
        Ds => (Action::Double, Some(Action::Stand)),
        Sp => (Action::Split, None),
        SpH => {
            if rules.double_after_split {
                (Action::Split, None)
            } else {
                (Action::Hit, None)
            }
        }
        Us => (Action::Surrender, Some(Action::Hit)),
    }
}

fn is_legal(action: Action, legal: LegalActions) -> bool {
    match action {
        Action::Hit => legal.hit,
        Action::Stand => legal.stand,
        Action::Double => legal.double,
        Action::Split => legal.split,
        Action::Surrender => legal.surrender,
    }
}

/// Returns the basic-strategy recommendation for a hand.
///
/// `legal` is the caller's current legal-action set; the returned
/// [`Advice::action`] is guaranteed to be a member of it (falling back to
/// stand, which is legal for any hand still awaiting a decision).
#[must_use]
pub fn recommend(
    hand: &Hand,
    dealer_up: Card,
    legal: LegalActions,
    rules: &RuleConfig,
) -> Advice {
    let column = upcard_column(dealer_up.rank);
    let up = upcard_label(dealer_up.rank);
    let totals = hand.totals();
    let h17 = !rules.dealer_stands_soft_17;

    let (mut action, mut fallback, reasoning);

    if legal.split && is_pair(hand, rules) {
        let rank = hand.cards()[0].rank;
        let row = pair_row(rank);
        (action, fallback) = expand(PAIRS[row][column], rules);
        reasoning = format!(
            "pair of {label}s vs dealer {up}: {verb}",
            label = upcard_label(rank),
            verb = action.name(),
        );
    } else if let Some(soft) = totals.soft {
        // Soft 12 (unsplittable A,A) and below always hit; the table
        // starts at soft 13.
        (action, fallback) = if soft < 13 {
            (Action::Hit, None)
        } else {
            expand(SOFT[(soft - 13) as usize][column], rules)
        };
        // H17 upgrade: soft 18 against an Ace becomes a hit.
        if h17 && soft == 18 && dealer_up.rank == Rank::Ace {
            (action, fallback) = (Action::Hit, None);
        }
        reasoning = format!("soft {soft} vs dealer {up}: {verb}", verb = action.name());
    } else {
        let total = totals.hard;
        (action, fallback) = if total < 8 {
            (Action::Hit, None)
        } else if total > 17 {
            (Action::Stand, None)
        } else {
            expand(HARD[(total - 8) as usize][column], rules)
        };
        // H17 upgrade: hard 11 against an Ace becomes a double.
        if h17 && total == 11 && dealer_up.rank == Rank::Ace {
            (action, fallback) = (Action::Double, Some(Action::Hit));
        }
        reasoning = format!("hard {total} vs dealer {up}: {verb}", verb = action.name());
    }

    // Rule-level demotions before state-level reconciliation.
    if action == Action::Double && !legal.double {
        action = fallback.take().unwrap_or(Action::Hit);
    }
    if action == Action::Surrender
        && (rules.surrender == SurrenderPolicy::None || !legal.surrender)
    {
        action = if legal.hit { Action::Hit } else { Action::Stand };
        fallback = None;
    }

    // Legality reconciliation: primary, then fallback, then hit, then stand.
    if !is_legal(action, legal) {
        action = match fallback {
            Some(fb) if is_legal(fb, legal) => fb,
            _ if legal.hit => Action::Hit,
            _ => Action::Stand,
        };
    }

    Advice {
        action,
        fallback,
        reasoning,
    }
}
