//! Random sampling of records
//!
//! A truncated Fisher-Yates shuffle over record references: only the first
//! `size` slots are shuffled, which is still a uniform draw without
//! replacement, and the records themselves are never copied.

use crate::types::Record;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Draw up to `size` records uniformly at random, without replacement
///
/// With a seed the draw is reproducible; otherwise the thread-local RNG is used.
pub fn sample_records(records: &[Record], size: usize, seed: Option<u64>) -> Vec<&Record> {
    match seed {
        Some(seed) => sample_with(records, size, &mut StdRng::seed_from_u64(seed)),
        None => sample_with(records, size, &mut rand::thread_rng()),
    }
}

fn sample_with<'a, R: Rng + ?Sized>(records: &'a [Record], size: usize, rng: &mut R) -> Vec<&'a Record> {
    let mut refs: Vec<&Record> = records.iter().collect();
    let amount = size.min(refs.len());
    let (chosen, _) = refs.partial_shuffle(rng, amount);
    chosen.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn numbered(n: i64) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let mut record = Record::new();
                record.insert("n".to_string(), FieldValue::from(i));
                record
            })
            .collect()
    }

    fn ids(sample: &[&Record]) -> Vec<FieldValue> {
        sample.iter().map(|r| r["n"].clone()).collect()
    }

    #[test]
    fn test_sample_is_bounded() {
        let records = numbered(50);
        assert_eq!(sample_records(&records, 10, Some(1)).len(), 10);
        assert_eq!(sample_records(&records, 500, Some(1)).len(), 50);
        assert!(sample_records(&[], 10, None).is_empty());
    }

    #[test]
    fn test_sample_without_replacement() {
        let records = numbered(30);
        let sample = sample_records(&records, 30, None);
        let mut seen: Vec<String> = ids(&sample).iter().map(|v| format!("{v:?}")).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let records = numbered(100);
        let a = ids(&sample_records(&records, 20, Some(42)));
        let b = ids(&sample_records(&records, 20, Some(42)));
        assert_eq!(a, b);
    }
}
