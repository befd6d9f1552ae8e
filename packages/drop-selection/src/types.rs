use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wallet paired with its token balance at lookup time.
///
/// Built once per run from the balance oracle; a failed lookup shows up here
/// as a `0.0` balance rather than an error.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub wallet_address: String,
    pub token_balance: f64,
}

impl Candidate {
    pub fn new(wallet_address: impl Into<String>, token_balance: f64) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            token_balance,
        }
    }
}

/// How the non-guaranteed winners are drawn from the remaining pool.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Random,
    Weighted,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Random => f.write_str("random"),
            SelectionMode::Weighted => f.write_str("weighted"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(SelectionMode::Random),
            "weighted" => Ok(SelectionMode::Weighted),
            other => Err(format!(
                "unknown winner selection mode {other:?}, expected \"random\" or \"weighted\""
            )),
        }
    }
}

/// How a specific winner earned its slot.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Guaranteed,
    Random,
    Weighted,
}

impl From<SelectionMode> for SelectionType {
    fn from(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Random => SelectionType::Random,
            SelectionMode::Weighted => SelectionType::Weighted,
        }
    }
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionType::Guaranteed => f.write_str("guaranteed"),
            SelectionType::Random => f.write_str("random"),
            SelectionType::Weighted => f.write_str("weighted"),
        }
    }
}

/// A candidate tagged with the mechanism that selected it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub wallet_address: String,
    pub token_balance: f64,
    pub selection_type: SelectionType,
}

impl Winner {
    pub fn new(candidate: Candidate, selection_type: SelectionType) -> Self {
        Self {
            wallet_address: candidate.wallet_address,
            token_balance: candidate.token_balance,
            selection_type,
        }
    }
}

/// The immutable outcome of a single drop run.
///
/// Persisted exactly once, keyed by `drop_id`; field names serialize in
/// camelCase to match the stored document shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DropRecord {
    pub drop_id: String,
    pub winners: Vec<Winner>,
    pub timestamp: DateTime<Utc>,
    pub num_winners: usize,
    pub num_winners_guaranteed: usize,
    pub winner_selection_mode: SelectionMode,
    pub minimum_token_balance: f64,
    pub total_eligible_users: usize,
    pub token_mint_address: String,
    pub created_at: DateTime<Utc>,
}

/// Validated per-run inputs for the selection pipeline.
#[derive(Clone, Debug)]
pub struct DropParams {
    pub num_winners: usize,
    pub num_winners_guaranteed: usize,
    pub selection_mode: SelectionMode,
    pub minimum_balance: f64,
    pub token_mint_address: String,
}
