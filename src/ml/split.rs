//! Seeded train/test splitting.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerazError};
use crate::ml::label::Label;

/// Row indices of each side of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `labels.len()` rows into train and test index sets.
///
/// The test side gets `ceil(n * test_fraction)` rows. With `stratify`, each
/// class is split in proportion to its size, and every class needs at least
/// two rows. The same seed always yields the same split.
pub fn train_test_split(
    labels: &[Label],
    test_fraction: f64,
    seed: u64,
    stratify: bool,
) -> Result<Split> {
    let n = labels.len();
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(VerazError::invalid_argument(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }
    if n < 2 {
        return Err(VerazError::training(format!(
            "need at least 2 examples to split, got {n}"
        )));
    }

    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test >= n {
        return Err(VerazError::training(format!(
            "test fraction {test_fraction} leaves no training examples out of {n}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    if !stratify {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);
        let train = indices.split_off(n_test);
        return Ok(Split {
            train,
            test: indices,
        });
    }

    let mut by_class: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    if let Some((label, members)) = by_class.iter().find(|(_, members)| members.len() < 2) {
        return Err(VerazError::training(format!(
            "the least populated class '{label}' has only {} member(s); \
             stratified splitting needs at least 2 per class",
            members.len()
        )));
    }
    if n_test < by_class.len() || n - n_test < by_class.len() {
        return Err(VerazError::training(format!(
            "a stratified split of {n} examples into {} test rows cannot hold every class",
            n_test
        )));
    }

    let allocation = allocate(&by_class, n, n_test);

    let mut train = Vec::with_capacity(n - n_test);
    let mut test = Vec::with_capacity(n_test);
    for (label, members) in &mut by_class {
        members.shuffle(&mut rng);
        let take = allocation.get(label).copied().unwrap_or(0);
        test.extend_from_slice(&members[..take]);
        train.extend_from_slice(&members[take..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(Split { train, test })
}

/// Test rows per class: proportional floor, remainder to the largest
/// fractional parts, never a whole class.
fn allocate(
    by_class: &BTreeMap<Label, Vec<usize>>,
    n: usize,
    n_test: usize,
) -> BTreeMap<Label, usize> {
    let mut allocation = BTreeMap::new();
    let mut remainders = Vec::new();
    let mut assigned = 0;

    for (&label, members) in by_class {
        let exact = n_test as f64 * members.len() as f64 / n as f64;
        let base = (exact.floor() as usize).min(members.len() - 1);
        allocation.insert(label, base);
        remainders.push((exact - base as f64, members.len(), label));
        assigned += base;
    }

    remainders.sort_by(|a, b| b.0.total_cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut remaining = n_test.saturating_sub(assigned);
    while remaining > 0 {
        let mut progressed = false;
        for &(_, size, label) in &remainders {
            if remaining == 0 {
                break;
            }
            if let Some(count) = allocation.get_mut(&label) {
                if *count + 1 < size {
                    *count += 1;
                    remaining -= 1;
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(fake: usize, credible: usize) -> Vec<Label> {
        let mut labels = vec![Label::Fake; fake];
        labels.extend(vec![Label::Credible; credible]);
        labels
    }

    fn assert_partition(split: &Split, n: usize) {
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort();
        assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn test_plain_split_sizes() {
        let split = train_test_split(&labels(5, 5), 0.5, 42, false).unwrap();
        assert_eq!(split.test.len(), 5);
        assert_eq!(split.train.len(), 5);
        assert_partition(&split, 10);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let split = train_test_split(&labels(11, 10), 0.2, 42, false).unwrap();
        assert_eq!(split.test.len(), 5);
        assert_eq!(split.train.len(), 16);
    }

    #[test]
    fn test_stratified_split_keeps_proportions() {
        let data = labels(30, 70);
        let split = train_test_split(&data, 0.2, 42, true).unwrap();
        assert_eq!(split.test.len(), 20);
        assert_partition(&split, 100);

        let fake_in_test = split.test.iter().filter(|&&i| data[i] == Label::Fake).count();
        assert_eq!(fake_in_test, 6);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let data = labels(15, 15);
        let a = train_test_split(&data, 0.2, 7, true).unwrap();
        let b = train_test_split(&data, 0.2, 7, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stratify_requires_two_per_class() {
        let err = train_test_split(&labels(1, 30), 0.2, 42, true).unwrap_err();
        assert!(matches!(err, VerazError::Training(_)));
    }

    #[test]
    fn test_single_class_plain_split_is_allowed() {
        let split = train_test_split(&labels(4, 0), 0.5, 42, false).unwrap();
        assert_eq!(split.train.len(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(train_test_split(&labels(1, 0), 0.5, 42, false).is_err());
        assert!(train_test_split(&labels(5, 5), 0.0, 42, false).is_err());
        assert!(train_test_split(&labels(5, 5), 1.0, 42, false).is_err());
    }
}
