//! Match engine for the Iterated Prisoner's Dilemma simulator
//!
//! Strategies, noise, payoff, the match loop and the strategy registry
//! behind the visualization client. This crate is compiled to:
//! - Native (for the `arena` command line and any service wrapping [`api`])
//! - WASM (for in-browser match replay, `wasm` feature)
//!
//! Every random draw comes from a caller-supplied source, so a match is a
//! pure function of its inputs and seed.

mod error;
mod game;
mod noise;
mod payoff;
mod qlearning;
mod random;
mod registry;
mod strategy;

pub mod api;
pub mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::MatchError;
pub use game::{Match, MatchEngine, MatchResult, Phase, RoundRecord};
pub use noise::{apply_noise, NoiseModel};
pub use payoff::PayoffMatrix;
pub use qlearning::QLearningAgent;
pub use random::SeededRng;
pub use registry::{Constructor, StrategyEntry, StrategyRegistry};
pub use strategy::{
    AlwaysCooperate, AlwaysDefect, Gradual, Grudger, Move, Pavlov, RandomStrategy, Strategy,
    SuspiciousTitForTat, TitForTat, TitForTwoTats, Turn,
};
pub use tournament::{Standing, Tournament, TournamentConfig, TournamentReport};
