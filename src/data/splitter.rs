// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Holds out the LAST floor(p · N) samples as the test set and
// keeps the first N − floor(p · N) for training. Order is
// preserved, so train ++ test == the input.
//
// Example, N = 4, p = 0.25:
//   [s0, s1, s2, s3]  →  train = [s0, s1, s2], test = [s3]
//
// Shuffling is a separate, opt-in step (shuffle_with_seed) run
// before the split only when a shuffle seed is configured.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom over a
// seeded StdRng, so a given seed always yields the same split.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Number of samples held out for a corpus of `total` and fraction `p`.
pub fn test_size(total: usize, test_fraction: f64) -> usize {
    ((total as f64 * test_fraction) as usize).min(total)
}

/// Split `samples` into (train, test), taking the test set from the tail.
pub fn split_tail<T>(mut samples: Vec<T>, test_fraction: f64) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..=1.0).contains(&test_fraction) {
        bail!("test fraction must be within [0, 1], got {test_fraction}");
    }

    let total    = samples.len();
    let split_at = total - test_size(total, test_fraction);

    // split_off(n) leaves [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} train, {} test",
        samples.len(),
        test.len()
    );

    Ok((samples, test))
}

/// Permute `samples` in place, reproducibly for a given seed.
pub fn shuffle_with_seed<T>(samples: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_out_the_tail() {
        let docs = vec!["a b", "b c", "c a", "a a"];
        let (train, test) = split_tail(docs, 0.25).unwrap();
        assert_eq!(train, vec!["a b", "b c", "c a"]);
        assert_eq!(test, vec!["a a"]);
    }

    #[test]
    fn test_sizes_use_floor() {
        for (total, p) in [(100, 0.2), (7, 0.5), (10, 0.33), (3, 0.1)] {
            let items: Vec<usize> = (0..total).collect();
            let (train, test) = split_tail(items, p).unwrap();
            let expected = (total as f64 * p).floor() as usize;
            assert_eq!(test.len(), expected, "N={total} p={p}");
            assert_eq!(train.len(), total - expected);
        }
    }

    #[test]
    fn test_concatenation_restores_order() {
        let items: Vec<usize> = (0..50).collect();
        let (mut train, test) = split_tail(items.clone(), 0.3).unwrap();
        train.extend(test);
        assert_eq!(train, items);
    }

    #[test]
    fn test_fraction_bounds() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test) = split_tail(items.clone(), 0.0).unwrap();
        assert_eq!((train.len(), test.len()), (10, 0));
        let (train, test) = split_tail(items.clone(), 1.0).unwrap();
        assert_eq!((train.len(), test.len()), (0, 10));
        assert!(split_tail(items, 1.5).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_tail(Vec::<usize>::new(), 0.2).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a: Vec<usize> = (0..20).collect();
        let mut b = a.clone();
        shuffle_with_seed(&mut a, 10);
        shuffle_with_seed(&mut b, 10);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
