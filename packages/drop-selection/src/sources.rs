use crate::error::SourceError;
use crate::types::DropRecord;

/// Where the raw wallet pool comes from (user directory, flat file, ...).
pub trait WalletSource {
    fn list_wallet_addresses(&self) -> Result<Vec<String>, SourceError>;
}

/// Token balance lookup for a single wallet.
///
/// Infallible by contract: implementations treat any lookup failure as a
/// zero balance (logged, not escalated).
pub trait BalanceOracle {
    fn token_balance(&self, wallet_address: &str) -> f64;
}

/// Write-once persistence for the finished drop record, keyed by `drop_id`.
pub trait RecordStore {
    fn put(&self, record: &DropRecord) -> Result<(), SourceError>;
}
