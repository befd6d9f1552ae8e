use crate::types::Candidate;

/// Keep only candidates whose balance meets the minimum, preserving relative
/// order. Duplicate addresses are not deduplicated here.
pub fn filter_eligible(candidates: &[Candidate], minimum_balance: f64) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| c.token_balance >= minimum_balance)
        .cloned()
        .collect()
}

/// Sort descending by balance. The sort is stable, so equal balances keep
/// their original pool order.
pub fn sort_by_balance_desc(mut eligible: Vec<Candidate>) -> Vec<Candidate> {
    eligible.sort_by(|a, b| b.token_balance.total_cmp(&a.token_balance));
    eligible
}
