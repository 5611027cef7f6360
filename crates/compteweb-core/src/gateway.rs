//! Transport seam between the data client and the banking service
//!
//! `BankingGateway` is one method per GraphQL operation. `GraphqlGateway`
//! posts the documents from [`crate::operations`] to the configured endpoint
//! with reqwest: no auth headers, no retries.

use std::sync::Arc;

use async_trait::async_trait;
use compteweb_config::GraphqlConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::operations::{self, Operation, OperationKind};
use crate::types::{Account, AccountType, CreatedEntity, NewAccount, NewTransaction, Transaction};

/// Gateway reference type
pub type GatewayRef = Arc<dyn BankingGateway>;

/// One method per operation of the banking service
#[async_trait]
pub trait BankingGateway: Send + Sync {
    /// `allComptes`
    async fn all_accounts(&self) -> CoreResult<Vec<Account>>;

    /// `compteByType`
    async fn accounts_by_type(&self, account_type: AccountType) -> CoreResult<Vec<Account>>;

    /// `compteById`
    async fn account(&self, id: &str) -> CoreResult<Account>;

    /// `compteTransaction`
    async fn transactions(&self, account_id: &str) -> CoreResult<Vec<Transaction>>;

    /// `saveCompte`
    async fn save_account(&self, input: &NewAccount) -> CoreResult<CreatedEntity>;

    /// `deleteCompte`
    async fn delete_account(&self, id: &str) -> CoreResult<bool>;

    /// `addTransaction`
    async fn add_transaction(&self, input: &NewTransaction) -> CoreResult<CreatedEntity>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// HTTP GraphQL client for the banking service
pub struct GraphqlGateway {
    endpoint: String,
    client: Client,
}

impl GraphqlGateway {
    /// Create a gateway for the configured endpoint
    pub fn new(config: &GraphqlConfig) -> CoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::query("client", format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn failure(op: &Operation, message: impl Into<String>) -> CoreError {
        match op.kind {
            OperationKind::Query => CoreError::query(op.name, message),
            OperationKind::Mutation => CoreError::mutation(op.name, message),
        }
    }

    /// Execute an operation and return the raw value of its root field
    async fn execute(&self, op: &Operation, variables: serde_json::Value) -> CoreResult<serde_json::Value> {
        log::debug!("GraphQL {} -> {}", op.name, self.endpoint);

        let request = GraphqlRequest {
            query: op.document,
            operation_name: op.name,
            variables,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::failure(op, e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Self::failure(op, e.to_string()))?;

        // GraphQL servers may report errors with a non-2xx status and a JSON body
        let parsed: Option<GraphqlResponse> = serde_json::from_str(&body).ok();

        if let Some(payload) = &parsed {
            if !payload.errors.is_empty() {
                let message = payload
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(Self::failure(op, message));
            }
        }

        if !status.is_success() {
            return Err(Self::failure(op, format!("Response not successful: Received status code {}", status.as_u16())));
        }

        let mut payload = parsed.ok_or_else(|| Self::failure(op, "Invalid GraphQL response body"))?;
        let mut data = payload.data.take().ok_or_else(|| Self::failure(op, "GraphQL response has no data"))?;

        Ok(data
            .get_mut(op.root_field)
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }

    fn decode<T: DeserializeOwned>(op: &Operation, value: serde_json::Value) -> CoreResult<T> {
        serde_json::from_value(value).map_err(|e| Self::failure(op, format!("Unexpected {} payload: {}", op.root_field, e)))
    }

    async fn list<T: DeserializeOwned>(&self, op: &Operation, variables: serde_json::Value) -> CoreResult<Vec<T>> {
        match self.execute(op, variables).await? {
            serde_json::Value::Null => Ok(Vec::new()),
            value => Self::decode(op, value),
        }
    }
}

#[async_trait]
impl BankingGateway for GraphqlGateway {
    async fn all_accounts(&self) -> CoreResult<Vec<Account>> {
        self.list(&operations::GET_ACCOUNTS, serde_json::json!({})).await
    }

    async fn accounts_by_type(&self, account_type: AccountType) -> CoreResult<Vec<Account>> {
        self.list(
            &operations::GET_ACCOUNTS_BY_TYPE,
            serde_json::json!({ "typeCompte": account_type }),
        )
        .await
    }

    async fn account(&self, id: &str) -> CoreResult<Account> {
        let op = &operations::GET_ACCOUNT_BY_ID;
        match self.execute(op, serde_json::json!({ "id": id })).await? {
            serde_json::Value::Null => Err(Self::failure(op, format!("Account not found: {}", id))),
            value => Self::decode(op, value),
        }
    }

    async fn transactions(&self, account_id: &str) -> CoreResult<Vec<Transaction>> {
        self.list(
            &operations::GET_TRANSACTIONS_BY_ACCOUNT,
            serde_json::json!({ "accountId": account_id }),
        )
        .await
    }

    async fn save_account(&self, input: &NewAccount) -> CoreResult<CreatedEntity> {
        let op = &operations::ADD_ACCOUNT;
        let variables = serde_json::to_value(input).map_err(|e| Self::failure(op, e.to_string()))?;
        let value = self.execute(op, variables).await?;
        Self::decode(op, value)
    }

    async fn delete_account(&self, id: &str) -> CoreResult<bool> {
        let op = &operations::DELETE_ACCOUNT;
        let value = self.execute(op, serde_json::json!({ "id": id })).await?;
        Self::decode(op, value)
    }

    async fn add_transaction(&self, input: &NewTransaction) -> CoreResult<CreatedEntity> {
        let op = &operations::ADD_TRANSACTION;
        let variables = serde_json::to_value(input).map_err(|e| Self::failure(op, e.to_string()))?;
        let value = self.execute(op, variables).await?;
        Self::decode(op, value)
    }
}

// ==================== Tests ====================
