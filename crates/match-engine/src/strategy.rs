//! Strategy definitions and execution
//!
//! Every strategy sees only the *actual* moves of both players (after
//! noise) and draws randomness exclusively from the source it is handed.

use core::fmt;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::payoff::PayoffMatrix;

/// A move in the Prisoner's Dilemma
///
/// Serialized as the single-character codes `"C"` and `"D"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Move {
    /// The opposite move.
    pub fn flip(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }

    /// Wire code: 'C' or 'D'.
    pub fn code(self) -> char {
        match self {
            Move::Cooperate => 'C',
            Move::Defect => 'D',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<char> for Move {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'C' | 'c' => Ok(Move::Cooperate),
            'D' | 'd' => Ok(Move::Defect),
            other => Err(other),
        }
    }
}

/// Everything a strategy may look at before choosing a move.
#[derive(Clone, Copy, Debug)]
pub struct Turn<'a> {
    /// Round about to be played (1-based)
    pub round: u32,
    /// Our past moves
    pub own: &'a [Move],
    /// Opponent's past moves, same length as `own`
    pub opponent: &'a [Move],
    /// Our cumulative score before this round
    pub score: u64,
    /// Payoff matrix in force for this match
    pub payoff: &'a PayoffMatrix,
}

impl Turn<'_> {
    /// Moves of the previous round as (own, opponent)
    pub fn last(&self) -> Option<(Move, Move)> {
        Some((*self.own.last()?, *self.opponent.last()?))
    }

    /// What we scored in the previous round
    pub fn last_payoff(&self) -> Option<u32> {
        self.last().map(|(mine, theirs)| self.payoff.score(mine, theirs).0)
    }
}

/// A decision unit playing one side of a match.
///
/// Instances are owned by a single match and reset when it starts.
pub trait Strategy {
    /// Registry identifier
    fn name(&self) -> &'static str;

    /// Choose the move for `turn.round`.
    fn decide(&mut self, turn: &Turn<'_>, rng: &mut dyn RngCore) -> Move;

    /// Clear per-match state.
    fn reset(&mut self) {}
}

/// Always cooperate, never defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysCooperate;

impl AlwaysCooperate {
    pub const NAME: &'static str = "AlwaysCooperate";
}

impl Strategy for AlwaysCooperate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, _turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        Move::Cooperate
    }
}

/// Always defect, never cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysDefect;

impl AlwaysDefect {
    pub const NAME: &'static str = "AlwaysDefect";
}

impl Strategy for AlwaysDefect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, _turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        Move::Defect
    }
}

/// Copy opponent's last move. Start with cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitForTat;

impl TitForTat {
    pub const NAME: &'static str = "TitForTat";
}

impl Strategy for TitForTat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        turn.opponent.last().copied().unwrap_or(Move::Cooperate)
    }
}

/// Tit-for-Tat but start with defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuspiciousTitForTat;

impl SuspiciousTitForTat {
    pub const NAME: &'static str = "SuspiciousTitForTat";
}

impl Strategy for SuspiciousTitForTat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        turn.opponent.last().copied().unwrap_or(Move::Defect)
    }
}

/// Cooperate until opponent defects once, then always defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grudger {
    triggered: bool,
}

impl Grudger {
    pub const NAME: &'static str = "Grudger";

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

impl Strategy for Grudger {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        if turn.opponent.last() == Some(&Move::Defect) {
            self.triggered = true;
        }
        if self.triggered {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }

    fn reset(&mut self) {
        self.triggered = false;
    }
}

/// Random choice each round, fair coin.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub const NAME: &'static str = "RandomStrategy";
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, _turn: &Turn<'_>, rng: &mut dyn RngCore) -> Move {
        if rng.random_bool(0.5) {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

/// Win-stay, lose-switch.
/// - If last round paid at least the reward, repeat move
/// - Otherwise switch move
#[derive(Clone, Copy, Debug, Default)]
pub struct Pavlov;

impl Pavlov {
    pub const NAME: &'static str = "Pavlov";
}

impl Strategy for Pavlov {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        let (Some((my_last, _)), Some(score)) = (turn.last(), turn.last_payoff()) else {
            return Move::Cooperate;
        };
        if score >= turn.payoff.reward {
            my_last
        } else {
            my_last.flip()
        }
    }
}

/// Defect only if opponent defected twice in a row.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitForTwoTats;

impl TitForTwoTats {
    pub const NAME: &'static str = "TitForTwoTats";
}

impl Strategy for TitForTwoTats {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        if turn.round <= 2 {
            return Move::Cooperate;
        }
        match turn.opponent {
            [.., Move::Defect, Move::Defect] => Move::Defect,
            _ => Move::Cooperate,
        }
    }
}

/// Escalating retaliation.
/// After N opponent defections, we should have made N(N+1)/2 total defections.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gradual;

impl Gradual {
    pub const NAME: &'static str = "Gradual";
}

impl Strategy for Gradual {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, _rng: &mut dyn RngCore) -> Move {
        let theirs = defections(turn.opponent);
        let mine = defections(turn.own);

        if mine < theirs * (theirs + 1) / 2 {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }
}

fn defections(history: &[Move]) -> u64 {
    history.iter().filter(|m| **m == Move::Defect).count() as u64
}
