use anyhow::{Context, Result};
use chrono::SecondsFormat;
use drop_selection::{DropRecord, RecordStore, SourceError, WalletSource, Winner};
use serde_json::{json, Value};
use tracing::info;

const USERS_COLLECTION: &str = "users";
const DROPS_COLLECTION: &str = "drops";

/// Minimal Firestore REST client. The bearer token is supplied by the
/// environment; minting and refreshing it is the caller's concern.
#[derive(Clone)]
pub struct FirestoreClient {
    http: reqwest::blocking::Client,
    project_id: String,
    access_token: String,
}

impl FirestoreClient {
    pub fn new(project_id: String, access_token: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            project_id,
            access_token,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Wallet addresses of users whose stored balance meets the minimum.
    /// The stored balance is a cached pre-filter; authoritative balances are
    /// re-checked against the ledger afterwards.
    pub fn eligible_wallet_addresses(&self, minimum_balance: f64) -> Result<Vec<String>> {
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": USERS_COLLECTION }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "balance" },
                        "op": "GREATER_THAN_OR_EQUAL",
                        "value": { "doubleValue": minimum_balance },
                    },
                },
            },
        });
        let results: Vec<Value> = self
            .http
            .post(format!("{}:runQuery", self.documents_url()))
            .bearer_auth(&self.access_token)
            .json(&query)
            .send()
            .context("firestore query request failed")?
            .error_for_status()
            .context("firestore query returned an error status")?
            .json()
            .context("firestore query response is not json")?;

        let wallets: Vec<String> = results
            .iter()
            .filter_map(|entry| {
                entry
                    .pointer("/document/fields/walletAddress/stringValue")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .collect();
        Ok(wallets)
    }

    /// Write-once upsert of the drop record at `drops/{dropId}`.
    pub fn put_drop(&self, record: &DropRecord) -> Result<()> {
        let document = json!({ "fields": record_fields(record) });
        self.http
            .patch(format!(
                "{}/{}/{}",
                self.documents_url(),
                DROPS_COLLECTION,
                record.drop_id
            ))
            .bearer_auth(&self.access_token)
            .json(&document)
            .send()
            .context("firestore write request failed")?
            .error_for_status()
            .context("firestore write returned an error status")?;
        Ok(())
    }
}

/// Encode the record into Firestore's typed-value document fields.
fn record_fields(record: &DropRecord) -> Value {
    let winners: Vec<Value> = record.winners.iter().map(winner_value).collect();
    json!({
        "dropId": { "stringValue": record.drop_id },
        "winners": { "arrayValue": { "values": winners } },
        "timestamp": {
            "timestampValue": record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        },
        "numWinners": { "integerValue": record.num_winners.to_string() },
        "numWinnersGuaranteed": { "integerValue": record.num_winners_guaranteed.to_string() },
        "winnerSelectionMode": { "stringValue": record.winner_selection_mode.to_string() },
        "minimumTokenBalance": { "doubleValue": record.minimum_token_balance },
        "totalEligibleUsers": { "integerValue": record.total_eligible_users.to_string() },
        "tokenMintAddress": { "stringValue": record.token_mint_address },
        "createdAt": {
            "timestampValue": record.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        },
    })
}

fn winner_value(winner: &Winner) -> Value {
    json!({
        "mapValue": {
            "fields": {
                "walletAddress": { "stringValue": winner.wallet_address },
                "tokenBalance": { "doubleValue": winner.token_balance },
                "selectionType": { "stringValue": winner.selection_type.to_string() },
            },
        },
    })
}

/// Wallet pool backed by the Firestore `users` collection.
pub struct FirestoreWalletSource {
    client: FirestoreClient,
    minimum_balance: f64,
}

impl FirestoreWalletSource {
    pub fn new(client: FirestoreClient, minimum_balance: f64) -> Self {
        Self {
            client,
            minimum_balance,
        }
    }
}

impl WalletSource for FirestoreWalletSource {
    fn list_wallet_addresses(&self) -> Result<Vec<String>, SourceError> {
        let wallets = self
            .client
            .eligible_wallet_addresses(self.minimum_balance)
            .map_err(SourceError::from)?;
        info!(wallets = wallets.len(), "eligible users found in firestore");
        Ok(wallets)
    }
}

/// Record persistence into the Firestore `drops` collection.
pub struct FirestoreRecordStore {
    client: FirestoreClient,
}

impl FirestoreRecordStore {
    pub fn new(client: FirestoreClient) -> Self {
        Self { client }
    }
}

impl RecordStore for FirestoreRecordStore {
    fn put(&self, record: &DropRecord) -> Result<(), SourceError> {
        self.client.put_drop(record).map_err(SourceError::from)
    }
}
