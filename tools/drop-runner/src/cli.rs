use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use drop_selection::SelectionMode;

#[derive(Parser, Debug)]
#[command(
    name = "drop-runner",
    about = "Select winners for a token drop and persist the outcome record"
)]
pub struct Cli {
    /// Total number of winners to select
    #[arg(long)]
    pub num_winners: usize,

    /// Number of top-balance winners to guarantee
    #[arg(long, default_value_t = 0)]
    pub num_winners_guaranteed: usize,

    /// How to select the remaining winners: random or weighted by balance
    #[arg(long, default_value = "random")]
    pub winner_selection_mode: SelectionMode,

    /// Where wallet addresses come from
    #[arg(long, value_enum, default_value_t = SourceKind::Firebase)]
    pub source: SourceKind,

    /// Path to a file with wallet addresses (one per line), required with
    /// --source file
    #[arg(long)]
    pub wallets_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Firebase,
    File,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.num_winners == 0 {
            bail!("--num-winners must be at least 1");
        }
        if self.num_winners_guaranteed > self.num_winners {
            bail!(
                "--num-winners-guaranteed ({}) cannot exceed --num-winners ({})",
                self.num_winners_guaranteed,
                self.num_winners
            );
        }
        if self.source == SourceKind::File && self.wallets_file.is_none() {
            bail!("--wallets-file is required when --source is \"file\"");
        }
        Ok(())
    }
}
