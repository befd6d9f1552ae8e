use std::env;

use anyhow::{Context, Result};

const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
const DEFAULT_MINIMUM_BALANCE: f64 = 1000.0;

/// Environment-sourced configuration. A `.env` file in the working directory
/// is honored when present.
#[derive(Clone, Debug)]
pub struct Config {
    pub solana_rpc_url: String,
    pub token_mint_address: String,
    pub minimum_balance: f64,
    pub firebase_project_id: String,
    pub firebase_access_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let solana_rpc_url =
            env::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string());
        let token_mint_address =
            env::var("TOKEN_MINT_ADDRESS").context("TOKEN_MINT_ADDRESS is not set")?;
        let minimum_balance = match env::var("MINIMUM_BALANCE_FOR_DROPS") {
            Ok(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("MINIMUM_BALANCE_FOR_DROPS is not a number: {raw:?}"))?,
            Err(_) => DEFAULT_MINIMUM_BALANCE,
        };
        // Records always persist to Firestore, so these are required even
        // when the wallet pool comes from a file.
        let firebase_project_id =
            env::var("FIREBASE_PROJECT_ID").context("FIREBASE_PROJECT_ID is not set")?;
        let firebase_access_token =
            env::var("FIREBASE_ACCESS_TOKEN").context("FIREBASE_ACCESS_TOKEN is not set")?;

        Ok(Self {
            solana_rpc_url,
            token_mint_address,
            minimum_balance,
            firebase_project_id,
            firebase_access_token,
        })
    }
}
