mod cli;
mod config;
mod firestore;
mod solana;
mod wallets;

use anyhow::{Context, Result};
use clap::Parser;
use drop_selection::{run_drop, DropParams, WalletSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, SourceKind};
use crate::config::Config;
use crate::firestore::{FirestoreClient, FirestoreRecordStore, FirestoreWalletSource};
use crate::solana::SolanaBalanceOracle;
use crate::wallets::FileWalletSource;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env().context("configuration error")?;
    cli.validate().context("configuration error")?;

    let params = DropParams {
        num_winners: cli.num_winners,
        num_winners_guaranteed: cli.num_winners_guaranteed,
        selection_mode: cli.winner_selection_mode,
        minimum_balance: config.minimum_balance,
        token_mint_address: config.token_mint_address.clone(),
    };

    let firestore = FirestoreClient::new(
        config.firebase_project_id.clone(),
        config.firebase_access_token.clone(),
    );
    let source: Box<dyn WalletSource> = match cli.source {
        SourceKind::Firebase => Box::new(FirestoreWalletSource::new(
            firestore.clone(),
            config.minimum_balance,
        )),
        SourceKind::File => {
            let path = cli
                .wallets_file
                .clone()
                .context("--wallets-file is required when --source is \"file\"")?;
            Box::new(FileWalletSource::new(path))
        }
    };
    let oracle = SolanaBalanceOracle::new(config.solana_rpc_url, config.token_mint_address);
    let store = FirestoreRecordStore::new(firestore);

    let mut rng = StdRng::from_entropy();
    let record = run_drop(source.as_ref(), &oracle, &store, &params, &mut rng)
        .context("drop failed")?;

    info!(
        drop_id = %record.drop_id,
        winners = record.winners.len(),
        total_eligible = record.total_eligible_users,
        "drop completed"
    );
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .compact()
        .init();
}
