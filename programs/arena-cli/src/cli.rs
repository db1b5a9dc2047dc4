use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write the log to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "List registered strategies", alias = "ls")]
    Strategies(StrategiesArgs),
    #[command(about = "Play one match and print its result as JSON", alias = "sim")]
    Simulate(SimulateArgs),
    #[command(about = "Play a round-robin tournament and print the standings", alias = "tour")]
    Tournament(TournamentArgs),
}

#[derive(Debug, Args)]
pub struct StrategiesArgs {
    /// Print one `name: description` line per strategy instead of JSON
    #[arg(short, long)]
    pub describe: bool,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Player one's strategy
    #[arg(long, required_unless_present = "request")]
    pub p1: Option<String>,

    /// Player two's strategy
    #[arg(long, required_unless_present = "request")]
    pub p2: Option<String>,

    #[arg(short, long, default_value_t = match_engine::api::DEFAULT_ROUNDS, allow_negative_numbers = true)]
    pub rounds: i64,

    /// Probability that an intended move is flipped
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub noise: f64,

    /// Overrides any seed in the request; random when absent everywhere
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Read a JSON simulation request instead of the flags above
    #[arg(long, value_name = "FILE", conflicts_with_all = ["p1", "p2", "rounds", "noise"])]
    pub request: Option<PathBuf>,

    /// Print the result on one line
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args)]
pub struct TournamentArgs {
    #[arg(short, long, default_value_t = 100)]
    pub rounds: u32,

    #[arg(short, long, default_value_t = 0.0)]
    pub noise: f64,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Comma-separated entrants; every registered strategy when absent
    #[arg(long, value_delimiter = ',')]
    pub strategies: Vec<String>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_simulate_flags() {
        let cli = Cli::try_parse_from([
            "arena", "-v", "simulate", "--p1", "TitForTat", "--p2", "Pavlov", "-r", "20", "-n", "0.05", "-s", "7",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Command::Simulate(args) = cli.command else { panic!("expected simulate") };
        assert_eq!(args.p1.as_deref(), Some("TitForTat"));
        assert_eq!(args.p2.as_deref(), Some("Pavlov"));
        assert_eq!(args.rounds, 20);
        assert_eq!(args.noise, 0.05);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["arena", "sim", "--p1", "Grudger", "--p2", "AlwaysDefect"]).unwrap();
        let Command::Simulate(args) = cli.command else { panic!("expected simulate") };
        assert_eq!(args.rounds, 100);
        assert_eq!(args.noise, 0.0);
        assert_eq!(args.seed, None);
        assert!(args.request.is_none());
    }

    #[test]
    fn test_simulate_needs_players_or_request() {
        assert!(Cli::try_parse_from(["arena", "simulate", "--p1", "Grudger"]).is_err());
        assert!(Cli::try_parse_from(["arena", "simulate", "--request", "match.json"]).is_ok());
        assert!(Cli::try_parse_from(["arena", "simulate", "--request", "match.json", "--p1", "Pavlov"]).is_err());
    }

    #[test]
    fn test_tournament_entrants() {
        let cli = Cli::try_parse_from([
            "arena", "tournament", "--strategies", "TitForTat,AlwaysDefect", "--log-file", "run.log",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        let Command::Tournament(args) = cli.command else { panic!("expected tournament") };
        assert_eq!(args.strategies, vec!["TitForTat", "AlwaysDefect"]);
        assert_eq!(args.rounds, 100);
        assert!(!args.json);
    }
}
