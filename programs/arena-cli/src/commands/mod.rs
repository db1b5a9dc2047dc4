pub mod simulate;
pub mod strategies;
pub mod tournament;

/// The given seed, or a fresh one that is logged so the run can be repeated
pub fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = rand::random();
        log::info!("no seed given, using {seed}");
        seed
    })
}
