use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        match cli_seed {
            Some(seed) => Self::Cli(seed),
            None => Self::Generated(generate_runtime_seed()),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Seeds for a sweep: `count` consecutive values from `start`, wrapping at `u64::MAX`.
pub fn seed_sweep(start: u64, count: u64) -> impl Iterator<Item = u64> {
    (0..count).map(move |offset| start.wrapping_add(offset))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_seed_wins() {
        assert_eq!(SeedChoice::resolve(Some(4_242)), SeedChoice::Cli(4_242));
        assert_eq!(SeedChoice::resolve(Some(4_242)).value(), 4_242);
    }

    #[test]
    fn missing_seed_is_generated() {
        assert!(matches!(SeedChoice::resolve(None), SeedChoice::Generated(_)));
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }

    #[test]
    fn sweep_wraps_around() {
        let seeds: Vec<u64> = seed_sweep(u64::MAX - 1, 3).collect();
        assert_eq!(seeds, vec![u64::MAX - 1, u64::MAX, 0]);
    }

    #[test]
    fn mixing_spreads_neighbouring_values() {
        assert_ne!(mix_seed(1), mix_seed(2));
        assert_eq!(mix_seed(0), 0);
    }
}
