use chrono::Utc;
use rand::Rng;

use crate::types::{Candidate, DropParams, DropRecord, SelectionType, Winner};

/// Merge guaranteed and sampled winners into the final immutable record.
///
/// Guaranteed winners come first in their descending-balance order, then the
/// sampled winners in draw order. Tagging is positional: the two sequences
/// arrive already separated, so no membership lookup is needed.
pub fn assemble<R: Rng>(
    guaranteed: Vec<Candidate>,
    sampled: Vec<Candidate>,
    params: &DropParams,
    total_eligible_users: usize,
    rng: &mut R,
) -> DropRecord {
    let sampled_type = SelectionType::from(params.selection_mode);
    let winners: Vec<Winner> = guaranteed
        .into_iter()
        .map(|c| Winner::new(c, SelectionType::Guaranteed))
        .chain(sampled.into_iter().map(|c| Winner::new(c, sampled_type)))
        .collect();

    let now = Utc::now();
    DropRecord {
        drop_id: new_drop_id(now.timestamp_millis(), rng),
        winners,
        timestamp: now,
        num_winners: params.num_winners,
        num_winners_guaranteed: params.num_winners_guaranteed,
        winner_selection_mode: params.selection_mode,
        minimum_token_balance: params.minimum_balance,
        total_eligible_users,
        token_mint_address: params.token_mint_address.clone(),
        created_at: now,
    }
}

/// Drop ids order by creation time; the random suffix makes collisions
/// within the same millisecond negligible at one invocation per drop event.
fn new_drop_id<R: Rng>(unix_millis: i64, rng: &mut R) -> String {
    let mut suffix = [0u8; 4];
    rng.fill_bytes(&mut suffix);
    format!("drop_{}_{}", unix_millis, hex::encode(suffix))
}
