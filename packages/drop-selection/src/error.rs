use thiserror::Error;

/// Boxed error type carried across the collaborator seams.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DropError {
    #[error("no wallet addresses resolved from the configured source")]
    EmptyPool,

    #[error("not enough eligible wallets: found {found} meeting the minimum balance, need {needed}")]
    InsufficientEligible { found: usize, needed: usize },

    #[error("not enough remaining wallets to sample: need {needed}, found {found}")]
    InsufficientPool { needed: usize, found: usize },

    #[error("cannot draw {needed} weighted winners: only {positive} remaining wallets carry a positive balance")]
    ZeroWeight { needed: usize, positive: usize },

    #[error("wallet source failed: {0}")]
    WalletSource(#[source] SourceError),

    #[error("record store failed: {0}")]
    RecordStore(#[source] SourceError),
}
