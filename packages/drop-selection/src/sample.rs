use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::index;
use rand::Rng;

use crate::error::DropError;
use crate::types::{Candidate, SelectionMode};

/// Draw `count` candidates from `pool` without replacement.
///
/// Uniform mode gives every subset of size `count` the same probability.
/// Weighted mode draws each candidate with probability proportional to its
/// balance, zeroing the drawn weight before the next draw. Output order is
/// the draw order and carries no meaning.
pub fn sample<R: Rng>(
    pool: &[Candidate],
    count: usize,
    mode: SelectionMode,
    rng: &mut R,
) -> Result<Vec<Candidate>, DropError> {
    if count > pool.len() {
        return Err(DropError::InsufficientPool {
            needed: count,
            found: pool.len(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    match mode {
        SelectionMode::Random => Ok(sample_uniform(pool, count, rng)),
        SelectionMode::Weighted => sample_weighted(pool, count, rng),
    }
}

fn sample_uniform<R: Rng>(pool: &[Candidate], count: usize, rng: &mut R) -> Vec<Candidate> {
    index::sample(rng, pool.len(), count)
        .iter()
        .map(|i| pool[i].clone())
        .collect()
}

fn sample_weighted<R: Rng>(
    pool: &[Candidate],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Candidate>, DropError> {
    let mut weights: Vec<f64> = pool.iter().map(|c| c.token_balance).collect();

    // A zero-weight candidate can never be drawn, so fewer positive weights
    // than requested draws makes the request unsatisfiable up front.
    let positive = weights.iter().filter(|w| **w > 0.0).count();
    if positive < count {
        return Err(DropError::ZeroWeight {
            needed: count,
            positive,
        });
    }

    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let dist = WeightedIndex::new(&weights).map_err(|_| DropError::ZeroWeight {
            needed: count,
            positive,
        })?;
        let idx = dist.sample(rng);
        picked.push(pool[idx].clone());
        weights[idx] = 0.0;
    }
    Ok(picked)
}
