use crate::types::Candidate;

/// Split the descending-sorted eligible set into the guaranteed prefix and
/// the remaining suffix. `num_guaranteed` is clamped to the pool size.
pub fn partition(eligible: &[Candidate], num_guaranteed: usize) -> (Vec<Candidate>, Vec<Candidate>) {
    let k = num_guaranteed.min(eligible.len());
    let (guaranteed, remaining) = eligible.split_at(k);
    (guaranteed.to_vec(), remaining.to_vec())
}
