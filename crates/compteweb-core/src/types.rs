//! Entities exchanged with the GraphQL endpoint

use serde::{Deserialize, Deserializer, Serialize};

/// Account type enumeration (`TypeCompte`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Current account
    Courant,
    /// Savings account
    Epargne,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Courant, AccountType::Epargne];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Courant => "COURANT",
            AccountType::Epargne => "EPARGNE",
        }
    }

    /// Label shown in selection controls
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Courant => "Courant",
            AccountType::Epargne => "Epargne",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COURANT" => Ok(AccountType::Courant),
            "EPARGNE" => Ok(AccountType::Epargne),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction type enumeration (`TypeTransaction`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Deposit
    #[default]
    Depot,
    /// Withdrawal
    Retrait,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Depot, TransactionType::Retrait];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Depot => "DEPOT",
            TransactionType::Retrait => "RETRAIT",
        }
    }

    /// Label shown in selection controls
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Depot => "Depot",
            TransactionType::Retrait => "Retrait",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOT" => Ok(TransactionType::Depot),
            "RETRAIT" => Ok(TransactionType::Retrait),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bank account as returned by `allComptes` / `compteById`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub solde: f64,
    pub date_creation: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

/// Deposit or withdrawal as returned by `compteTransaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub montant: f64,
    pub date_transaction: String,
    pub type_transaction: TransactionType,
}

/// Minimal shape returned by create mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEntity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// Validated `saveCompte` input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub solde: f64,
    pub date_creation: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

/// Validated `addTransaction` input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub montant: f64,
    pub date_transaction: String,
    pub type_transaction: TransactionType,
    pub compte_id: i32,
}

/// GraphQL `ID` values arrive as strings, some servers send numbers
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

// ==================== Tests ====================
