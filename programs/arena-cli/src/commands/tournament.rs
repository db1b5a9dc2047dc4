use anyhow::Context;
use match_engine::{Standing, StrategyRegistry, Tournament, TournamentConfig};

use crate::cli::TournamentArgs;
use crate::commands::seed_or_random;

pub fn run(args: TournamentArgs) -> anyhow::Result<()> {
    let registry = StrategyRegistry::default();
    let config = TournamentConfig {
        rounds: args.rounds,
        noise: args.noise,
        seed: seed_or_random(args.seed),
        ..Default::default()
    };
    let tournament = if args.strategies.is_empty() {
        Tournament::everyone(&registry, config)
    } else {
        Tournament::new(&registry, args.strategies, config)
    }
    .context("setting up tournament")?;

    let report = tournament.run().context("running tournament")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", table(&report.standings));
    }
    Ok(())
}

pub fn table(standings: &[Standing]) -> String {
    let mut out = format!(
        "{:<20} | {:<15} | {:<15} | {:<10}\n{}\n",
        "Strategy",
        "Avg Score/Match",
        "Avg Score/Round",
        "Coop Rate",
        "-".repeat(70)
    );
    for s in standings {
        out += &format!(
            "{:<20} | {:<15.2} | {:<15.2} | {:<10}\n",
            s.strategy,
            s.avg_score_per_match,
            s.avg_score_per_round,
            format!("{:.2}%", s.cooperation_rate * 100.0)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let standings = vec![Standing {
            strategy: "TitForTat".to_string(),
            matches: 4,
            total_score: 99,
            avg_score_per_match: 24.75,
            avg_score_per_round: 2.5,
            cooperation_rate: 0.775,
        }];
        let table = table(&standings);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Strategy             | Avg Score/Match"));
        assert_eq!(lines[1], "-".repeat(70));
        assert!(lines[2].starts_with("TitForTat            | 24.75           | 2.50 "));
        assert!(lines[2].contains("77.50%"));
    }

    #[test]
    fn test_empty_table_has_header() {
        assert_eq!(table(&[]).lines().count(), 2);
    }
}
