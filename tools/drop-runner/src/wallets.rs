use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use drop_selection::{SourceError, WalletSource};
use tracing::info;

/// Wallet pool read from a text file, one address per line. Lines are
/// trimmed and blank lines ignored.
pub struct FileWalletSource {
    path: PathBuf,
}

impl FileWalletSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_addresses(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read wallets file {}", self.path.display()))?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl WalletSource for FileWalletSource {
    fn list_wallet_addresses(&self) -> Result<Vec<String>, SourceError> {
        let wallets = self.read_addresses().map_err(SourceError::from)?;
        info!(
            wallets = wallets.len(),
            file = %self.path.display(),
            "wallet addresses read from file"
        );
        Ok(wallets)
    }
}
