//! Presentation order generation.
//!
//! The random source is always passed in, so a seeded `StdRng` reproduces the
//! same order in tests while production seeds from the clock.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::QuizError;

/// The order in which a session presents questions: a permutation of
/// `0..len` where each entry is a stable index into the question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresentationOrder(Vec<usize>);

impl PresentationOrder {
    /// Wrap a caller-supplied order, checking it is a permutation of `0..size`.
    pub fn new(indices: Vec<usize>, size: usize) -> Result<Self, QuizError> {
        if indices.len() != size {
            return Err(QuizError::Validation(format!(
                "presentation order has {} entries, expected {size}",
                indices.len()
            )));
        }
        let mut seen = vec![false; size];
        for &i in &indices {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(QuizError::Validation(format!(
                        "presentation order repeats index {i}"
                    )))
                }
                None => {
                    return Err(QuizError::Validation(format!(
                        "presentation order index {i} is out of range"
                    )))
                }
            }
        }
        Ok(Self(indices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// 1-based position of a question index within this order.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.0.iter().position(|&i| i == index).map(|p| p + 1)
    }
}

/// Uniformly random permutation of `0..size` (Fisher–Yates).
pub fn shuffle<R: Rng + ?Sized>(size: usize, rng: &mut R) -> PresentationOrder {
    let mut order: Vec<usize> = (0..size).collect();
    for i in (1..size).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    PresentationOrder(order)
}

/// Identity order, for quizzes run without shuffling.
pub fn sequential(size: usize) -> PresentationOrder {
    PresentationOrder((0..size).collect())
}

/// Order for a new session: shuffled with [`session_rng`] when `shuffled`,
/// otherwise sequential.
pub fn presentation_order(size: usize, shuffled: bool, seed: Option<u64>) -> PresentationOrder {
    if shuffled {
        shuffle(size, &mut session_rng(seed))
    } else {
        sequential(size)
    }
}

/// Random source for a session: seeded when a seed is configured, otherwise
/// seeded from the current time.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(order: &PresentationOrder, size: usize) -> bool {
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();
        sorted == (0..size).collect::<Vec<_>>()
    }

    #[test]
    fn shuffle_is_a_permutation_for_many_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in 0..50 {
            let order = shuffle(size, &mut rng);
            assert_eq!(order.len(), size);
            assert!(is_permutation(&order, size), "size {size}: {order:?}");
        }
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let a = shuffle(20, &mut StdRng::seed_from_u64(42));
        let b = shuffle(20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_actually_reorders() {
        let mut rng = StdRng::seed_from_u64(1);
        let moved = (0..10).any(|_| shuffle(10, &mut rng) != sequential(10));
        assert!(moved);
    }

    #[test]
    fn shuffle_covers_every_permutation_of_three() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..6000 {
            *counts.entry(shuffle(3, &mut rng).0).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 6);
        // Each of the 6 orders should land near 1000.
        assert!(counts.values().all(|&c| (800..1200).contains(&c)), "{counts:?}");
    }

    #[test]
    fn presentation_order_honours_settings() {
        assert_eq!(presentation_order(5, false, Some(3)), sequential(5));
        assert_eq!(
            presentation_order(12, true, Some(3)),
            presentation_order(12, true, Some(3))
        );
        assert!(is_permutation(&presentation_order(12, true, None), 12));
    }

    #[test]
    fn new_rejects_non_permutations() {
        assert!(PresentationOrder::new(vec![1, 0, 2], 3).is_ok());
        assert!(PresentationOrder::new(vec![0, 1], 3).is_err());
        assert!(PresentationOrder::new(vec![0, 0, 1], 3).is_err());
        assert!(PresentationOrder::new(vec![0, 1, 3], 3).is_err());
    }

    #[test]
    fn position_is_one_based() {
        let order = PresentationOrder::new(vec![2, 0, 1], 3).unwrap();
        assert_eq!(order.position_of(2), Some(1));
        assert_eq!(order.position_of(1), Some(3));
        assert_eq!(order.position_of(5), None);
    }
}
