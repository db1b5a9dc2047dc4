//! Round-robin tournament
//!
//! Every entrant meets every other entrant, and a copy of itself, exactly
//! once. Each match draws from its own stream forked off the tournament
//! seed by match index, so results do not depend on scheduling.

use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::game::{check_params, MatchEngine, MatchResult};
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::registry::StrategyRegistry;
use crate::strategy::Move;

/// Parameters shared by every match of a tournament
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub rounds: u32,
    pub noise: f64,
    pub payoff: PayoffMatrix,
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 100,
            noise: 0.0,
            payoff: PayoffMatrix::standard(),
            seed: 0,
        }
    }
}

/// Aggregate performance of one entrant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub strategy: String,
    /// Self-play counts twice, once per side
    pub matches: u32,
    pub total_score: u64,
    pub avg_score_per_match: f64,
    pub avg_score_per_round: f64,
    /// Mean share of cooperative moves over all appearances
    pub cooperation_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    /// In pairing order
    pub matches: Vec<MatchResult>,
    /// Best average score per match first
    pub standings: Vec<Standing>,
}

/// All unordered pairs with replacement over `n` entrants: (i, j) with i <= j,
/// in lexicographic order. Yields n(n+1)/2 pairs.
pub fn pairings(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect()
}

/// Share of `Cooperate` in a history; 0 for an empty one.
pub fn cooperation_rate(history: &[Move]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let cooperations = history.iter().filter(|m| **m == Move::Cooperate).count();
    cooperations as f64 / history.len() as f64
}

/// A validated round-robin over registered strategies
#[derive(Clone, Debug)]
pub struct Tournament<'r> {
    registry: &'r StrategyRegistry,
    entrants: Vec<String>,
    config: TournamentConfig,
    engine: MatchEngine,
}

impl<'r> Tournament<'r> {
    /// Fails on an empty, duplicated or unknown entrant list, or on
    /// invalid match parameters, before any match is played.
    pub fn new(
        registry: &'r StrategyRegistry,
        entrants: Vec<String>,
        config: TournamentConfig,
    ) -> Result<Self, MatchError> {
        if entrants.is_empty() {
            return Err(MatchError::invalid("entrants", "at least one strategy is required"));
        }
        for (i, name) in entrants.iter().enumerate() {
            if !registry.contains(name) {
                return Err(MatchError::UnknownStrategy { name: name.clone() });
            }
            if entrants[..i].contains(name) {
                return Err(MatchError::invalid("entrants", format!("{name} is listed twice")));
            }
        }
        check_params(config.rounds, config.noise)?;
        let engine = MatchEngine::new(config.payoff)?;

        Ok(Self { registry, entrants, config, engine })
    }

    /// Every registered strategy takes part
    pub fn everyone(registry: &'r StrategyRegistry, config: TournamentConfig) -> Result<Self, MatchError> {
        let entrants = registry.list_names().into_iter().map(String::from).collect();
        Self::new(registry, entrants, config)
    }

    pub fn entrants(&self) -> &[String] {
        &self.entrants
    }

    pub fn match_count(&self) -> usize {
        let n = self.entrants.len();
        n * (n + 1) / 2
    }

    pub fn run(&self) -> Result<TournamentReport, MatchError> {
        let pairs = pairings(self.entrants.len());
        let root = SeededRng::new(self.config.seed);
        info!(
            "tournament: {} entrants, {} matches of {} rounds, noise {}",
            self.entrants.len(),
            pairs.len(),
            self.config.rounds,
            self.config.noise
        );

        let play = |(index, &(i, j)): (usize, &(usize, usize))| -> Result<MatchResult, MatchError> {
            let p1 = self.registry.create(&self.entrants[i])?;
            let p2 = self.registry.create(&self.entrants[j])?;
            let mut rng = root.fork(index as u32);
            self.engine.run(p1, p2, self.config.rounds, self.config.noise, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let matches = pairs.par_iter().enumerate().map(play).collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let matches = pairs.iter().enumerate().map(play).collect::<Result<Vec<_>, _>>()?;

        let standings = self.standings(&pairs, &matches);
        if let Some(best) = standings.first() {
            info!("tournament won by {} ({:.2} per match)", best.strategy, best.avg_score_per_match);
        }
        Ok(TournamentReport { matches, standings })
    }

    fn standings(&self, pairs: &[(usize, usize)], matches: &[MatchResult]) -> Vec<Standing> {
        let n = self.entrants.len();
        let mut totals = vec![0u64; n];
        let mut played = vec![0u32; n];
        let mut rates = vec![0f64; n];

        for (&(i, j), result) in pairs.iter().zip(matches) {
            totals[i] += result.p1_score;
            played[i] += 1;
            rates[i] += cooperation_rate(&result.p1_history);

            totals[j] += result.p2_score;
            played[j] += 1;
            rates[j] += cooperation_rate(&result.p2_history);
        }

        let mut standings: Vec<Standing> = (0..n)
            .map(|k| {
                let matches = played[k].max(1) as f64;
                let avg = totals[k] as f64 / matches;
                Standing {
                    strategy: self.entrants[k].clone(),
                    matches: played[k],
                    total_score: totals[k],
                    avg_score_per_match: avg,
                    avg_score_per_round: avg / self.config.rounds as f64,
                    cooperation_rate: rates[k] / matches,
                }
            })
            .collect();
        standings.sort_by(|a, b| b.avg_score_per_match.total_cmp(&a.avg_score_per_match));
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairings() {
        assert_eq!(pairings(0), Vec::<(usize, usize)>::new());
        assert_eq!(pairings(1), vec![(0, 0)]);
        assert_eq!(pairings(3), vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
        for n in 0..20 {
            assert_eq!(pairings(n).len(), n * (n + 1) / 2);
        }
    }

    #[test]
    fn test_cooperation_rate() {
        assert_eq!(cooperation_rate(&[]), 0.0);
        assert_eq!(cooperation_rate(&[Move::Cooperate, Move::Defect, Move::Cooperate, Move::Cooperate]), 0.75);
    }

    #[test]
    fn test_classic_standings() {
        let registry = StrategyRegistry::default();
        let config = TournamentConfig { rounds: 10, ..Default::default() };
        let tournament = Tournament::new(
            &registry,
            names(&["AlwaysCooperate", "AlwaysDefect", "TitForTat"]),
            config,
        )
        .unwrap();
        let report = tournament.run().unwrap();

        assert_eq!(report.matches.len(), 6);
        assert_eq!(report.matches[1].p1_name, "AlwaysCooperate");
        assert_eq!(report.matches[1].p2_name, "AlwaysDefect");

        let order: Vec<_> = report.standings.iter().map(|s| s.strategy.as_str()).collect();
        assert_eq!(order, vec!["TitForTat", "AlwaysCooperate", "AlwaysDefect"]);

        let tft = &report.standings[0];
        assert_eq!(tft.matches, 4);
        assert_eq!(tft.total_score, 99);
        assert_eq!(tft.avg_score_per_match, 24.75);
        assert!((tft.avg_score_per_round - 2.475).abs() < 1e-9);
        assert!((tft.cooperation_rate - 0.775).abs() < 1e-9);

        let defector = &report.standings[2];
        assert_eq!(defector.total_score, 84);
        assert_eq!(defector.cooperation_rate, 0.0);
    }

    #[test]
    fn test_reproducible_with_noise() {
        let registry = StrategyRegistry::default();
        let config = TournamentConfig { rounds: 30, noise: 0.1, seed: 99, ..Default::default() };
        let a = Tournament::everyone(&registry, config).unwrap().run().unwrap();
        let b = Tournament::everyone(&registry, config).unwrap().run().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.matches.len(), 55);
    }

    #[test]
    fn test_self_play_uses_distinct_instances() {
        let registry = StrategyRegistry::default();
        let config = TournamentConfig { rounds: 20, noise: 0.2, seed: 4, ..Default::default() };
        let report = Tournament::new(&registry, names(&["Grudger"]), config).unwrap().run().unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.standings[0].matches, 2);
    }

    #[test]
    fn test_rejects_bad_entrants() {
        let registry = StrategyRegistry::default();
        let config = TournamentConfig::default();

        assert!(matches!(
            Tournament::new(&registry, vec![], config),
            Err(MatchError::InvalidParameter { parameter: "entrants", .. })
        ));
        assert!(matches!(
            Tournament::new(&registry, names(&["TitForTat", "Nobody"]), config),
            Err(MatchError::UnknownStrategy { .. })
        ));
        assert!(matches!(
            Tournament::new(&registry, names(&["Pavlov", "Pavlov"]), config),
            Err(MatchError::InvalidParameter { parameter: "entrants", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let registry = StrategyRegistry::default();
        let zero = TournamentConfig { rounds: 0, ..Default::default() };
        assert!(Tournament::everyone(&registry, zero).is_err());
        let loud = TournamentConfig { noise: -0.5, ..Default::default() };
        assert!(Tournament::everyone(&registry, loud).is_err());
    }
}
