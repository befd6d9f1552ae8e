use anyhow::{Context, Result};
use drop_selection::BalanceOracle;
use serde_json::{json, Value};
use tracing::warn;

/// Token balance lookup over Solana JSON-RPC.
///
/// Mirrors the drop operator's lookup semantics: only the first token
/// account for the mint is consulted, and any transport or parse failure is
/// treated as a zero balance.
pub struct SolanaBalanceOracle {
    client: reqwest::blocking::Client,
    rpc_url: String,
    token_mint: String,
}

impl SolanaBalanceOracle {
    pub fn new(rpc_url: String, token_mint: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            rpc_url,
            token_mint,
        }
    }

    fn fetch_balance(&self, wallet_address: &str) -> Result<f64> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getTokenAccountsByOwner",
            "params": [
                wallet_address,
                { "mint": self.token_mint },
                { "encoding": "jsonParsed" },
            ],
        });
        let response: Value = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .context("rpc request failed")?
            .error_for_status()
            .context("rpc returned an error status")?
            .json()
            .context("rpc response is not json")?;

        if let Some(error) = response.get("error") {
            anyhow::bail!("rpc error: {error}");
        }

        let amount = response
            .pointer("/result/value/0/account/data/parsed/info/tokenAmount/uiAmount")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        Ok(amount)
    }
}

impl BalanceOracle for SolanaBalanceOracle {
    fn token_balance(&self, wallet_address: &str) -> f64 {
        match self.fetch_balance(wallet_address) {
            Ok(balance) => balance,
            Err(error) => {
                warn!(
                    wallet = wallet_address,
                    error = %error,
                    "balance lookup failed, treating as zero"
                );
                0.0
            }
        }
    }
}
