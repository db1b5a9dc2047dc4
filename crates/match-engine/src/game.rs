//! Match execution engine

use log::{debug, trace};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::noise::NoiseModel;
use crate::payoff::PayoffMatrix;
use crate::strategy::{Move, Strategy, Turn};

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based
    pub round: u32,
    /// Moves actually played (after noise)
    pub p1_move: Move,
    pub p2_move: Move,
    /// Cumulative scores after this round
    pub p1_score: u64,
    pub p2_score: u64,
    /// Moves the strategies chose (before noise)
    pub p1_intended: Move,
    pub p2_intended: Move,
    /// Payoffs of this round alone
    pub p1_payoff: u32,
    pub p2_payoff: u32,
}

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub p1_name: String,
    pub p2_name: String,
    pub rounds: u32,
    pub noise: f64,
    pub p1_score: u64,
    pub p2_score: u64,
    pub p1_history: Vec<Move>,
    pub p2_history: Vec<Move>,
    pub log: Vec<RoundRecord>,
}

/// Lifecycle of a match. Matches run to completion once started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Running,
    Completed,
}

/// Runs matches under one payoff matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MatchEngine {
    payoff: PayoffMatrix,
}

impl MatchEngine {
    /// Fails if the matrix is not a Prisoner's Dilemma.
    pub fn new(payoff: PayoffMatrix) -> Result<Self, MatchError> {
        payoff.validate()?;
        Ok(Self { payoff })
    }

    /// Engine with the standard 5/3/1/0 matrix
    pub fn standard() -> Self {
        Self { payoff: PayoffMatrix::standard() }
    }

    pub fn payoff(&self) -> &PayoffMatrix {
        &self.payoff
    }

    /// Validate parameters and set up a match without playing it.
    ///
    /// Both strategies are reset and owned by the returned match.
    pub fn prepare(
        &self,
        mut p1: Box<dyn Strategy>,
        mut p2: Box<dyn Strategy>,
        rounds: u32,
        noise: f64,
    ) -> Result<Match, MatchError> {
        let noise = check_params(rounds, noise)?;

        p1.reset();
        p2.reset();

        // Histories grow as rounds are played; only a bounded prefix is reserved.
        let reserve = rounds.min(MAX_RESERVED_ROUNDS) as usize;
        Ok(Match {
            payoff: self.payoff,
            noise,
            rounds,
            p1,
            p2,
            history_p1: Vec::with_capacity(reserve),
            history_p2: Vec::with_capacity(reserve),
            log: Vec::with_capacity(reserve),
            total_p1: 0,
            total_p2: 0,
            phase: Phase::Initialized,
        })
    }

    /// Run a complete match between two strategies
    ///
    /// # Arguments
    /// * `p1` - First player's strategy
    /// * `p2` - Second player's strategy
    /// * `rounds` - Number of rounds, at least 1
    /// * `noise` - Per-move flip probability in [0, 1]
    /// * `rng` - Source of every random draw in the match
    ///
    /// # Returns
    /// Complete match result with round-by-round details
    pub fn run(
        &self,
        p1: Box<dyn Strategy>,
        p2: Box<dyn Strategy>,
        rounds: u32,
        noise: f64,
        rng: &mut dyn RngCore,
    ) -> Result<MatchResult, MatchError> {
        Ok(self.prepare(p1, p2, rounds, noise)?.run(rng))
    }
}

/// Upper bound on the rounds reserved up front when a match is prepared
const MAX_RESERVED_ROUNDS: u32 = 4096;

/// Hard bounds on match parameters: rounds >= 1, noise in [0, 1]
pub(crate) fn check_params(rounds: u32, noise: f64) -> Result<NoiseModel, MatchError> {
    if rounds < 1 {
        return Err(MatchError::invalid("rounds", format!("must be at least 1, got {rounds}")));
    }
    NoiseModel::new(noise)
}

/// A validated match between two strategy instances.
pub struct Match {
    payoff: PayoffMatrix,
    noise: NoiseModel,
    rounds: u32,
    p1: Box<dyn Strategy>,
    p2: Box<dyn Strategy>,
    history_p1: Vec<Move>,
    history_p2: Vec<Move>,
    log: Vec<RoundRecord>,
    total_p1: u64,
    total_p2: u64,
    phase: Phase,
}

impl Match {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Play every round and assemble the result.
    pub fn run(mut self, rng: &mut dyn RngCore) -> MatchResult {
        self.phase = Phase::Running;
        debug!(
            "match {} vs {}: {} rounds, noise {}",
            self.p1.name(),
            self.p2.name(),
            self.rounds,
            self.noise.level()
        );

        for round in 1..=self.rounds {
            self.play_round(round, rng);
        }

        self.phase = Phase::Completed;
        debug!(
            "match {} vs {} completed: {} - {}",
            self.p1.name(),
            self.p2.name(),
            self.total_p1,
            self.total_p2
        );

        MatchResult {
            p1_name: self.p1.name().to_string(),
            p2_name: self.p2.name().to_string(),
            rounds: self.rounds,
            noise: self.noise.level(),
            p1_score: self.total_p1,
            p2_score: self.total_p2,
            p1_history: self.history_p1,
            p2_history: self.history_p2,
            log: self.log,
        }
    }

    fn play_round(&mut self, round: u32, rng: &mut dyn RngCore) {
        // Both decide on the same committed history
        let intended_p1 = self.p1.decide(
            &Turn {
                round,
                own: &self.history_p1,
                opponent: &self.history_p2,
                score: self.total_p1,
                payoff: &self.payoff,
            },
            rng,
        );
        let intended_p2 = self.p2.decide(
            &Turn {
                round,
                own: &self.history_p2,
                opponent: &self.history_p1,
                score: self.total_p2,
                payoff: &self.payoff,
            },
            rng,
        );

        let move_p1 = self.noise.apply(intended_p1, rng);
        let move_p2 = self.noise.apply(intended_p2, rng);

        let (payoff_p1, payoff_p2) = self.payoff.score(move_p1, move_p2);
        self.total_p1 += payoff_p1 as u64;
        self.total_p2 += payoff_p2 as u64;

        self.history_p1.push(move_p1);
        self.history_p2.push(move_p2);

        trace!(
            "round {}: {}{} (intended {}{}) -> {} / {}",
            round,
            move_p1,
            move_p2,
            intended_p1,
            intended_p2,
            self.total_p1,
            self.total_p2
        );

        self.log.push(RoundRecord {
            round,
            p1_move: move_p1,
            p2_move: move_p2,
            p1_score: self.total_p1,
            p2_score: self.total_p2,
            p1_intended: intended_p1,
            p2_intended: intended_p2,
            p1_payoff: payoff_p1,
            p2_payoff: payoff_p2,
        });
    }
}
