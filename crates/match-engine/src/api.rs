//! Request/response contract consumed by the visualization client
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/strategies` | [`Simulator::strategies`] |
//! | POST | `/simulation/run` | [`Simulator::run`] |
//!
//! Only the shapes and the handlers live here; binding them to a
//! transport is left to the caller.

use log::info;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::game::{MatchEngine, MatchResult};
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::registry::StrategyRegistry;

/// Rounds played when the request leaves them out
pub const DEFAULT_ROUNDS: i64 = 100;

fn default_rounds() -> i64 {
    DEFAULT_ROUNDS
}

/// Body of `GET /strategies`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategiesResponse {
    pub strategies: Vec<String>,
}

/// Body of `POST /simulation/run`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub p1_strategy: String,
    pub p2_strategy: String,
    /// Signed so that negative values are reported as invalid
    /// rather than as undecodable.
    #[serde(default = "default_rounds")]
    pub rounds: i64,
    #[serde(default)]
    pub noise: f64,
    /// Overrides the standard matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payoff_matrix: Option<PayoffMatrix>,
    /// Makes the run reproducible; a seed is drawn when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationRequest {
    pub fn new(p1_strategy: impl Into<String>, p2_strategy: impl Into<String>) -> Self {
        Self {
            p1_strategy: p1_strategy.into(),
            p2_strategy: p2_strategy.into(),
            rounds: DEFAULT_ROUNDS,
            noise: 0.0,
            payoff_matrix: None,
            seed: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error body returned for any rejected request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub detail: String,
}

impl From<&MatchError> for ErrorResponse {
    fn from(e: &MatchError) -> Self {
        Self {
            kind: e.kind().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Framework-free handlers over a strategy registry
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    registry: StrategyRegistry,
}

impl Simulator {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// `GET /strategies`
    pub fn strategies(&self) -> StrategiesResponse {
        StrategiesResponse {
            strategies: self.registry.list_names().into_iter().map(String::from).collect(),
        }
    }

    /// `POST /simulation/run`
    ///
    /// Everything is validated before the first round is played. `rng` is
    /// used as-is; see [`Simulator::run_seeded`] to honour `request.seed`.
    pub fn run(&self, request: &SimulationRequest, rng: &mut dyn RngCore) -> Result<MatchResult, MatchError> {
        let engine = match request.payoff_matrix {
            Some(payoff) => MatchEngine::new(payoff)?,
            None => MatchEngine::standard(),
        };
        let rounds = u32::try_from(request.rounds)
            .map_err(|_| MatchError::invalid("rounds", format!("must be within [1, {}], got {}", u32::MAX, request.rounds)))?;
        let p1 = self.registry.create(&request.p1_strategy)?;
        let p2 = self.registry.create(&request.p2_strategy)?;

        let result = engine.run(p1, p2, rounds, request.noise, rng)?;
        info!(
            "simulated {} vs {} over {} rounds: {} - {}",
            result.p1_name, result.p2_name, result.rounds, result.p1_score, result.p2_score
        );
        Ok(result)
    }

    /// Like [`Simulator::run`], seeding from the request or from `fallback_seed`.
    pub fn run_seeded(&self, request: &SimulationRequest, fallback_seed: u64) -> Result<MatchResult, MatchError> {
        let seed = request.seed.unwrap_or(fallback_seed);
        self.run(request, &mut SeededRng::new(seed))
    }

    /// Decode, run and encode in one step: returns the JSON body and
    /// whether it is a success.
    pub fn handle_json(&self, body: &str, fallback_seed: u64) -> (bool, String) {
        let outcome = SimulationRequest::from_json(body).and_then(|req| self.run_seeded(&req, fallback_seed));
        match outcome {
            Ok(result) => match serde_json::to_string(&result) {
                Ok(json) => (true, json),
                Err(e) => (false, error_json(&MatchError::from(e))),
            },
            Err(e) => (false, error_json(&e)),
        }
    }
}

fn error_json(e: &MatchError) -> String {
    let body = ErrorResponse::from(e);
    serde_json::to_string(&body).unwrap_or_else(|_| format!(r#"{{"kind":"{}","detail":""}}"#, body.kind))
}
