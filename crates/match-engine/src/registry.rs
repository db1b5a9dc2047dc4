//! Strategy registry
//!
//! Maps stable string identifiers to constructors. Listing order is
//! registration order.

use crate::error::MatchError;
use crate::qlearning::QLearningAgent;
use crate::strategy::{
    AlwaysCooperate, AlwaysDefect, Gradual, Grudger, Pavlov, RandomStrategy, Strategy,
    SuspiciousTitForTat, TitForTat, TitForTwoTats,
};

/// Builds a fresh strategy instance.
pub type Constructor = fn() -> Box<dyn Strategy>;

/// One registered strategy
#[derive(Clone, Copy, Debug)]
pub struct StrategyEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: Constructor,
}

impl StrategyEntry {
    pub fn create(&self) -> Box<dyn Strategy> {
        (self.build)()
    }
}

/// Ordered set of available strategies
#[derive(Clone, Debug)]
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
}

impl StrategyRegistry {
    /// Registry with nothing in it
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a strategy under `name`. Names must be unique.
    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        build: Constructor,
    ) -> Result<(), MatchError> {
        if self.get(name).is_some() {
            return Err(MatchError::invalid("strategy", format!("{name} is already registered")));
        }
        self.entries.push(StrategyEntry { name, description, build });
        Ok(())
    }

    /// Identifiers in registration order
    pub fn list_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn entries(&self) -> &[StrategyEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&StrategyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fresh instance of `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Strategy>, MatchError> {
        self.get(name)
            .map(StrategyEntry::create)
            .ok_or_else(|| MatchError::UnknownStrategy { name: name.to_string() })
    }

    /// One-line human-readable description
    pub fn describe(&self, name: &str) -> Option<&'static str> {
        self.get(name).map(|e| e.description)
    }
}

impl Default for StrategyRegistry {
    /// Every built-in strategy
    fn default() -> Self {
        let builtins: [(&'static str, &'static str, Constructor); 10] = [
            (
                AlwaysCooperate::NAME,
                "Never defects. Always cooperates.",
                || Box::new(AlwaysCooperate),
            ),
            (
                AlwaysDefect::NAME,
                "Never cooperates. Always defects.",
                || Box::new(AlwaysDefect),
            ),
            (
                TitForTat::NAME,
                "Copies opponent's last move. Starts by cooperating.",
                || Box::new(TitForTat),
            ),
            (
                Grudger::NAME,
                "Cooperates until betrayed, then always defects.",
                || Box::new(Grudger::default()),
            ),
            (
                RandomStrategy::NAME,
                "Randomly cooperates or defects each round.",
                || Box::new(RandomStrategy),
            ),
            (
                Pavlov::NAME,
                "Repeats move if outcome was good, switches if bad.",
                || Box::new(Pavlov),
            ),
            (
                SuspiciousTitForTat::NAME,
                "Like Tit for Tat, but starts with defect.",
                || Box::new(SuspiciousTitForTat),
            ),
            (
                TitForTwoTats::NAME,
                "Only retaliates after two consecutive defections.",
                || Box::new(TitForTwoTats),
            ),
            (
                Gradual::NAME,
                "Retaliates with increasing severity, then forgives.",
                || Box::new(Gradual),
            ),
            (
                QLearningAgent::NAME,
                "Learns which move pays from the previous round's outcome.",
                || Box::new(QLearningAgent::default()),
            ),
        ];

        let mut registry = Self::empty();
        for (name, description, build) in builtins {
            registry.entries.push(StrategyEntry { name, description, build });
        }
        registry
    }
}
