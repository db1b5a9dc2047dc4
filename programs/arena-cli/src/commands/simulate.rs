use std::cmp::Ordering;
use std::fs;

use anyhow::{bail, Context};
use log::info;
use match_engine::api::{SimulationRequest, Simulator};
use match_engine::tournament::cooperation_rate;
use match_engine::MatchResult;

use crate::cli::SimulateArgs;
use crate::commands::seed_or_random;

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let mut request = request(&args)?;
    request.seed = Some(seed_or_random(args.seed.or(request.seed)));

    let result = Simulator::default()
        .run_seeded(&request, 0)
        .with_context(|| format!("{} vs {}", request.p1_strategy, request.p2_strategy))?;

    info!("{}", summary(&result));
    let body = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{body}");
    Ok(())
}

fn request(args: &SimulateArgs) -> anyhow::Result<SimulationRequest> {
    if let Some(path) = &args.request {
        let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        return SimulationRequest::from_json(&body).with_context(|| format!("parsing {}", path.display()));
    }
    let (Some(p1), Some(p2)) = (&args.p1, &args.p2) else {
        bail!("--p1 and --p2 are required without --request");
    };
    Ok(SimulationRequest { rounds: args.rounds, noise: args.noise, ..SimulationRequest::new(p1, p2) })
}

/// Name of the higher scorer, or `None` on a tie
pub fn winner(result: &MatchResult) -> Option<&str> {
    match result.p1_score.cmp(&result.p2_score) {
        Ordering::Greater => Some(result.p1_name.as_str()),
        Ordering::Less => Some(result.p2_name.as_str()),
        Ordering::Equal => None,
    }
}

pub fn summary(result: &MatchResult) -> String {
    let outcome = match winner(result) {
        Some(name) => format!("{name} wins"),
        None => "draw".to_string(),
    };
    format!(
        "{} {} - {} {} over {} rounds: {}; cooperation {:.1}% / {:.1}%",
        result.p1_name,
        result.p1_score,
        result.p2_score,
        result.p2_name,
        result.rounds,
        outcome,
        cooperation_rate(&result.p1_history) * 100.0,
        cooperation_rate(&result.p2_history) * 100.0,
    )
}
