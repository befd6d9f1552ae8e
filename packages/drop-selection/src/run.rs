use rand::Rng;
use tracing::{debug, info};

use crate::eligibility::{filter_eligible, sort_by_balance_desc};
use crate::error::DropError;
use crate::partition::partition;
use crate::record::assemble;
use crate::sample::sample;
use crate::sources::{BalanceOracle, RecordStore, WalletSource};
use crate::types::{Candidate, DropParams, DropRecord};

/// Run one complete drop.
///
/// 1. List wallet addresses from the source
/// 2. Look up each wallet's token balance (failures count as zero)
/// 3. Filter by minimum balance and sort descending
/// 4. Partition into guaranteed (top balances) and remaining
/// 5. Sample the remaining winners per the selection mode
/// 6. Assemble the record and persist it exactly once
///
/// Every failure is terminal and happens before persistence; a returned
/// record has always been stored.
pub fn run_drop<R: Rng>(
    wallets: &dyn WalletSource,
    oracle: &dyn BalanceOracle,
    store: &dyn RecordStore,
    params: &DropParams,
    rng: &mut R,
) -> Result<DropRecord, DropError> {
    let addresses = wallets
        .list_wallet_addresses()
        .map_err(DropError::WalletSource)?;
    if addresses.is_empty() {
        return Err(DropError::EmptyPool);
    }
    info!(wallets = addresses.len(), "wallet addresses resolved");

    // Addresses appearing more than once are kept as-is; the pool is the
    // source's responsibility.
    let candidates: Vec<Candidate> = addresses
        .into_iter()
        .map(|wallet| {
            let balance = oracle.token_balance(&wallet);
            Candidate::new(wallet, balance)
        })
        .collect();

    let eligible = filter_eligible(&candidates, params.minimum_balance);
    let total_eligible_users = eligible.len();
    info!(
        eligible = total_eligible_users,
        minimum_balance = params.minimum_balance,
        "eligibility filter applied"
    );
    if total_eligible_users < params.num_winners {
        return Err(DropError::InsufficientEligible {
            found: total_eligible_users,
            needed: params.num_winners,
        });
    }

    let eligible = sort_by_balance_desc(eligible);
    let (guaranteed, remaining) = partition(&eligible, params.num_winners_guaranteed);
    debug!(
        guaranteed = guaranteed.len(),
        remaining = remaining.len(),
        "eligible set partitioned"
    );

    let num_remaining_winners = params.num_winners.saturating_sub(guaranteed.len());
    let sampled = sample(&remaining, num_remaining_winners, params.selection_mode, rng)?;

    let record = assemble(guaranteed, sampled, params, total_eligible_users, rng);
    store.put(&record).map_err(DropError::RecordStore)?;
    info!(
        drop_id = %record.drop_id,
        winners = record.winners.len(),
        mode = %record.winner_selection_mode,
        "drop record persisted"
    );

    Ok(record)
}
