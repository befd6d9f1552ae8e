pub mod eligibility;
pub mod error;
pub mod partition;
pub mod record;
pub mod run;
pub mod sample;
pub mod sources;
pub mod types;

pub use error::{DropError, SourceError};
pub use run::run_drop;
pub use sources::{BalanceOracle, RecordStore, WalletSource};
pub use types::{Candidate, DropParams, DropRecord, SelectionMode, SelectionType, Winner};
