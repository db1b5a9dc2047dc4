//! Trembling-hand noise.
//!
//! A move chosen by a strategy may be flipped before it is played. The
//! flipped move is the one both players observe from then on.

use rand::{Rng, RngCore};

use crate::error::MatchError;
use crate::strategy::Move;

/// Flip `intended` with probability `level`.
///
/// `level` must already be validated to lie in [0, 1].
pub fn apply_noise(intended: Move, level: f64, rng: &mut dyn RngCore) -> Move {
    if rng.random_bool(level) {
        intended.flip()
    } else {
        intended
    }
}

/// Validated noise level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseModel {
    level: f64,
}

impl NoiseModel {
    /// No flips at all.
    pub const NONE: NoiseModel = NoiseModel { level: 0.0 };

    /// Fails unless `0 <= level <= 1`.
    pub fn new(level: f64) -> Result<Self, MatchError> {
        if !(0.0..=1.0).contains(&level) {
            return Err(MatchError::invalid(
                "noise",
                format!("must be within [0, 1], got {level}"),
            ));
        }
        Ok(Self { level })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn apply(&self, intended: Move, rng: &mut dyn RngCore) -> Move {
        apply_noise(intended, self.level, rng)
    }
}
