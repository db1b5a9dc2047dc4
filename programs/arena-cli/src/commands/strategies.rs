use match_engine::api::Simulator;

use crate::cli::StrategiesArgs;

pub fn run(args: StrategiesArgs) -> anyhow::Result<()> {
    let simulator = Simulator::default();
    if args.describe {
        for entry in simulator.registry().entries() {
            println!("{}: {}", entry.name, entry.description);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&simulator.strategies())?);
    }
    Ok(())
}
