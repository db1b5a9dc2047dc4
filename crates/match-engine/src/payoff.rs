//! Payoff matrix for the Prisoner's Dilemma

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::strategy::Move;

/// Payoff values for one round.
///
/// Named after the four outcomes as seen by the row player:
/// temptation (D vs C), reward (C vs C), punishment (D vs D),
/// sucker (C vs D).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub temptation: u32,
    pub reward: u32,
    pub punishment: u32,
    pub sucker: u32,
}

impl PayoffMatrix {
    /// Axelrod's values: T=5, R=3, P=1, S=0
    pub const fn standard() -> Self {
        Self {
            temptation: 5,
            reward: 3,
            punishment: 1,
            sucker: 0,
        }
    }

    /// Returns (score_a, score_b)
    pub fn score(&self, a: Move, b: Move) -> (u32, u32) {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => (self.reward, self.reward),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.punishment, self.punishment),
        }
    }

    /// Check the dilemma ordering T > R > P > S and 2R > T + S.
    pub fn validate(&self) -> Result<(), MatchError> {
        let Self { temptation: t, reward: r, punishment: p, sucker: s } = *self;
        if !(t > r && r > p && p > s) {
            return Err(MatchError::invalid(
                "payoff_matrix",
                format!("expected temptation > reward > punishment > sucker, got T={t} R={r} P={p} S={s}"),
            ));
        }
        if 2 * r as u64 <= t as u64 + s as u64 {
            return Err(MatchError::invalid(
                "payoff_matrix",
                format!("mutual cooperation must beat alternating exploitation: 2R={} <= T+S={}", 2 * r as u64, t as u64 + s as u64),
            ));
        }
        Ok(())
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::standard()
    }
}
