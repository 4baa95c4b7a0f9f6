//! Randomised selection of a constrained multiset from a catalog pool.
//!
//! Every selection honours two rules per entry: never more copies than the
//! entry's capacity at the active tier, and either none or at least
//! `min_number` copies.

use std::collections::HashMap;

use log::{trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::CatalogEntry;
use crate::error::ConfigError;
use crate::tier::Tier;

/// Draw exactly `count` entries from `pool`.
///
/// `label` names the pool in the error raised when it runs dry before
/// `count` is reached.
pub fn select<E, R>(
    pool: &[&E],
    count: usize,
    tier: Tier,
    label: &str,
    rng: &mut R,
) -> Result<Vec<E>, ConfigError>
where
    E: CatalogEntry + Clone,
    R: Rng + ?Sized,
{
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<&E> = pool
        .iter()
        .copied()
        .filter(|entry| {
            let capacity = entry.capacity(tier);
            if capacity > 0 && entry.min_number() > capacity {
                warn!(
                    "skipping {} '{}': min_number {} exceeds capacity {} at {}",
                    label,
                    entry.name(),
                    entry.min_number(),
                    capacity,
                    tier
                );
                return false;
            }
            capacity > 0
        })
        .collect();

    let mut selected: Vec<E> = Vec::with_capacity(count);
    let mut counts: HashMap<&str, u32> = HashMap::new();

    while selected.len() < count {
        let entry = *candidates
            .choose(rng)
            .ok_or_else(|| ConfigError::PoolExhausted {
                pool: label.to_string(),
                count,
            })?;

        let already = counts.get(entry.name()).copied().unwrap_or(0);
        let min_required = entry.min_number();
        let max_allowed = entry.capacity(tier);
        let remaining = count - selected.len();

        if already < min_required && remaining >= (min_required - already) as usize {
            let to_add = min_required - already;
            trace!("{label}: locking in {to_add} x '{}'", entry.name());
            selected.extend(std::iter::repeat(entry).take(to_add as usize).cloned());
            *counts.entry(entry.name()).or_insert(0) += to_add;
        } else if already >= min_required && already < max_allowed {
            trace!("{label}: adding '{}'", entry.name());
            selected.push(entry.clone());
            *counts.entry(entry.name()).or_insert(0) += 1;
        }

        let remaining = count - selected.len();
        candidates.retain(|candidate| {
            let taken = counts.get(candidate.name()).copied().unwrap_or(0);
            let outstanding = candidate.min_number().saturating_sub(taken) as usize;
            taken < candidate.capacity(tier) && remaining >= outstanding
        });
    }

    selected.shuffle(rng);
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Profession, TierCapacity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn entry(name: &str, capacity: u32, min_number: u32) -> Profession {
        Profession::new(name, TierCapacity::default().with(Tier::Tier1, capacity))
            .with_min_number(min_number)
    }

    fn tally(selection: &[Profession]) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for item in selection {
            *counts.entry(item.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn zero_count_returns_empty_without_drawing() {
        let baker = entry("Baker", 3, 1);
        let smith = entry("Smith", 2, 1);
        let pool = vec![&baker, &smith];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let picked = select(&pool, 0, Tier::Tier1, "professions", &mut rng).unwrap();
        assert!(picked.is_empty());

        let mut untouched = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn minimum_is_placed_in_one_step() {
        let twins = entry("Twins", 2, 2);
        let pool = vec![&twins];
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select(&pool, 2, Tier::Tier1, "good roles", &mut rng).unwrap();
            assert_eq!(picked.len(), 2);
            assert!(picked.iter().all(|p| p.name == "Twins"));
        }
    }

    #[test]
    fn never_exceeds_capacity_and_never_splits_a_minimum() {
        let a = entry("A", 3, 0);
        let b = entry("B", 3, 2);
        let c = entry("C", 4, 3);
        let d = entry("D", 1, 0);
        let pool = vec![&a, &b, &c, &d];
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select(&pool, 6, Tier::Tier1, "professions", &mut rng).unwrap();
            assert_eq!(picked.len(), 6);
            let counts = tally(&picked);
            for item in [&a, &b, &c, &d] {
                let n = counts.get(&item.name).copied().unwrap_or(0);
                assert!(n <= item.capacity(Tier::Tier1), "seed {seed}: {} over capacity", item.name);
                assert!(
                    n == 0 || n >= item.min_number,
                    "seed {seed}: {} partially placed ({n})",
                    item.name
                );
            }
        }
    }

    #[test]
    fn oversubscribed_pool_is_exhausted() {
        let a = entry("A", 1, 0);
        let b = entry("B", 2, 0);
        let pool = vec![&a, &b];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = select(&pool, 4, Tier::Tier1, "professions", &mut rng).unwrap_err();
        match err {
            ConfigError::PoolExhausted { pool, count } => {
                assert_eq!(pool, "professions");
                assert_eq!(count, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entries_unavailable_at_tier_are_never_drawn() {
        let here = entry("Here", 5, 0);
        let elsewhere =
            Profession::new("Elsewhere", TierCapacity::default().with(Tier::Tier2, 5));
        let pool = vec![&here, &elsewhere];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let picked = select(&pool, 5, Tier::Tier1, "professions", &mut rng).unwrap();
        assert!(picked.iter().all(|p| p.name == "Here"));
    }

    #[test]
    fn minimum_above_capacity_is_ignored() {
        let broken = entry("Broken", 1, 3);
        let pool = vec![&broken];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = select(&pool, 1, Tier::Tier1, "professions", &mut rng).unwrap_err();
        assert!(matches!(err, ConfigError::PoolExhausted { .. }));
    }

    #[test]
    fn minimum_that_cannot_fit_is_dropped() {
        let pair = entry("Pair", 2, 2);
        let single = entry("Single", 1, 0);
        let pool = vec![&pair, &single];
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = select(&pool, 1, Tier::Tier1, "professions", &mut rng).unwrap();
            assert_eq!(picked.len(), 1);
            assert_eq!(picked[0].name, "Single");
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let a = entry("A", 3, 0);
        let b = entry("B", 2, 2);
        let c = entry("C", 2, 0);
        let pool = vec![&a, &b, &c];
        let mut first = ChaCha8Rng::seed_from_u64(99);
        let mut second = ChaCha8Rng::seed_from_u64(99);
        let x = select(&pool, 5, Tier::Tier1, "professions", &mut first).unwrap();
        let y = select(&pool, 5, Tier::Tier1, "professions", &mut second).unwrap();
        assert_eq!(x, y);
    }
}
