use std::str::FromStr;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use chain_dag::transaction::{SignedTransaction, TransactionReference};

use crate::error::NetworkError;
use crate::models::{Balance, PendingTransaction, PostTransactionResponse, TotalSupply};

/// Request timeout for every ledger call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ledger network environments with their fixed host templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DagNetwork {
    Mainnet,
    Testnet,
    Integrationnet,
}

impl DagNetwork {
    pub fn id(&self) -> &'static str {
        match self {
            DagNetwork::Mainnet => "mainnet",
            DagNetwork::Testnet => "testnet",
            DagNetwork::Integrationnet => "integrationnet",
        }
    }

    /// Load-balanced L0 (global snapshot / balance) endpoint.
    pub fn l0_url(&self) -> String {
        format!("https://l0-lb-{}.constellationnetwork.io", self.id())
    }

    /// Load-balanced L1 (transaction) endpoint.
    pub fn l1_url(&self) -> String {
        format!("https://l1-lb-{}.constellationnetwork.io", self.id())
    }

    /// Block explorer endpoint.
    pub fn block_explorer_url(&self) -> String {
        format!("https://be-{}.constellationnetwork.io", self.id())
    }
}

impl FromStr for DagNetwork {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(DagNetwork::Mainnet),
            "testnet" => Ok(DagNetwork::Testnet),
            "integrationnet" => Ok(DagNetwork::Integrationnet),
            other => Err(NetworkError::InvalidResponse(format!(
                "unknown network id: {other}"
            ))),
        }
    }
}

/// Async HTTP client for the ledger's L0/L1 APIs.
///
/// Balance and supply queries go to L0; last-reference lookups, pending
/// transaction queries and submissions go to L1. The client never
/// retries: failed submissions are the caller's decision to repeat.
pub struct LedgerClient {
    client: Client,
    l0_url: String,
    l1_url: String,
}

impl LedgerClient {
    pub fn new(network: DagNetwork) -> Self {
        Self::with_hosts(network.l0_url(), network.l1_url())
    }

    /// Point the client at specific L0/L1 hosts (e.g. a single
    /// load-balancer node or a metagraph).
    pub fn with_hosts(l0_url: impl Into<String>, l1_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("build reqwest client"),
            l0_url: l0_url.into(),
            l1_url: l1_url.into(),
        }
    }

    /// Fetch the last accepted transaction reference for an address.
    /// New transfers chain onto this (hash, ordinal) pair.
    pub async fn get_last_reference(
        &self,
        address: &str,
    ) -> Result<TransactionReference, NetworkError> {
        let url = format!("{}/transactions/last-reference/{address}", self.l1_url);
        self.get_json(&url).await
    }

    /// Look up a transaction still waiting in the L1 queue. A 404 means
    /// the transaction has been accepted (or never seen) and yields
    /// `None`.
    pub async fn get_pending_transaction(
        &self,
        hash: &str,
    ) -> Result<Option<PendingTransaction>, NetworkError> {
        let url = format!("{}/transactions/{hash}", self.l1_url);
        debug!(%url, "ledger GET");
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::decode(response).await?))
    }

    /// Fetch the balance and snapshot ordinal for an address.
    pub async fn get_address_balance(&self, address: &str) -> Result<Balance, NetworkError> {
        let url = format!("{}/dag/{address}/balance", self.l0_url);
        self.get_json(&url).await
    }

    /// Fetch the circulating supply.
    pub async fn get_total_supply(&self) -> Result<TotalSupply, NetworkError> {
        let url = format!("{}/total-supply", self.l0_url);
        self.get_json(&url).await
    }

    /// Submit a signed transaction, returning the hash the ledger
    /// accepted it under.
    pub async fn post_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<PostTransactionResponse, NetworkError> {
        let url = format!("{}/transactions", self.l1_url);
        debug!(%url, source = %transaction.value.source, "ledger POST");
        let response = self.client.post(&url).json(transaction).send().await?;
        Self::decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        debug!(%url, "ledger GET");
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    /// Decode a response body, surfacing non-2xx bodies verbatim.
    /// Payloads arrive either flat or wrapped in a `data` envelope
    /// depending on the endpoint; both shapes are accepted.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, NetworkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await?;
        let value = match value {
            Value::Object(ref map) if map.contains_key("data") => map["data"].clone(),
            other => other,
        };
        serde_json::from_value(value).map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_host_templates() {
        assert_eq!(
            DagNetwork::Mainnet.l1_url(),
            "https://l1-lb-mainnet.constellationnetwork.io"
        );
        assert_eq!(
            DagNetwork::Testnet.l0_url(),
            "https://l0-lb-testnet.constellationnetwork.io"
        );
        assert_eq!(
            DagNetwork::Integrationnet.block_explorer_url(),
            "https://be-integrationnet.constellationnetwork.io"
        );
    }

    #[test]
    fn network_from_str() {
        assert_eq!("mainnet".parse::<DagNetwork>().unwrap(), DagNetwork::Mainnet);
        assert_eq!("TESTNET".parse::<DagNetwork>().unwrap(), DagNetwork::Testnet);
        assert!("devnet".parse::<DagNetwork>().is_err());
    }

    #[test]
    fn client_uses_network_hosts() {
        let client = LedgerClient::new(DagNetwork::Testnet);
        assert_eq!(client.l0_url, DagNetwork::Testnet.l0_url());
        assert_eq!(client.l1_url, DagNetwork::Testnet.l1_url());
    }

    #[test]
    fn custom_hosts_override_templates() {
        let client = LedgerClient::with_hosts("http://localhost:9000", "http://localhost:9010");
        assert_eq!(client.l0_url, "http://localhost:9000");
        assert_eq!(client.l1_url, "http://localhost:9010");
    }
}
