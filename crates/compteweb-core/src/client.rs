//! Data client: read-through cache with refetch-after-mutation
//!
//! Views read through the `fetch_*` methods on their first render, so a page
//! load always reflects the service. Reads within one render (a re-render
//! after a mutation, a filter change) are served according to the
//! configured [`FetchPolicy`]. A
//! successful mutation evicts the reads it affects and refetches them
//! before returning, so the next render shows server-confirmed state. A
//! failed refetch is logged and leaves the entry evicted; it never turns a
//! successful mutation into an error.

use std::collections::HashMap;

use compteweb_config::{FetchPolicy, WireDateFormat};
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::gateway::GatewayRef;
use crate::types::{Account, AccountType, CreatedEntity, NewAccount, NewTransaction, Transaction};

/// Identity of a cached read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AllAccounts,
    Account(String),
    Transactions(String),
}

#[derive(Debug, Clone)]
enum CachedData {
    Accounts(Vec<Account>),
    Account(Account),
    Transactions(Vec<Transaction>),
}

/// Process-wide access point to the banking service
pub struct DataClient {
    gateway: GatewayRef,
    policy: FetchPolicy,
    date_format: WireDateFormat,
    cache: RwLock<HashMap<QueryKey, CachedData>>,
}

impl DataClient {
    pub fn new(gateway: GatewayRef, policy: FetchPolicy, date_format: WireDateFormat) -> Self {
        Self {
            gateway,
            policy,
            date_format,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Wire date layout for mutation inputs
    pub fn date_format(&self) -> WireDateFormat {
        self.date_format
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        self.policy
    }

    async fn cached(&self, key: &QueryKey) -> Option<CachedData> {
        if self.policy == FetchPolicy::NetworkOnly {
            return None;
        }
        self.cache.read().await.get(key).cloned()
    }

    async fn store(&self, key: QueryKey, data: CachedData) {
        self.cache.write().await.insert(key, data);
    }

    // ==================== Reads ====================

    /// `listAccounts`
    pub async fn list_accounts(&self) -> CoreResult<Vec<Account>> {
        if let Some(CachedData::Accounts(accounts)) = self.cached(&QueryKey::AllAccounts).await {
            return Ok(accounts);
        }
        self.fetch_accounts().await
    }

    /// `listAccounts` from the cache only
    pub async fn cached_accounts(&self) -> Option<Vec<Account>> {
        match self.cache.read().await.get(&QueryKey::AllAccounts) {
            Some(CachedData::Accounts(accounts)) => Some(accounts.clone()),
            _ => None,
        }
    }

    /// `getAccount`
    pub async fn account(&self, id: &str) -> CoreResult<Account> {
        let key = QueryKey::Account(id.to_string());
        if let Some(CachedData::Account(account)) = self.cached(&key).await {
            return Ok(account);
        }
        self.fetch_account(id).await
    }

    /// `listTransactions`
    pub async fn transactions(&self, account_id: &str) -> CoreResult<Vec<Transaction>> {
        let key = QueryKey::Transactions(account_id.to_string());
        if let Some(CachedData::Transactions(transactions)) = self.cached(&key).await {
            return Ok(transactions);
        }
        self.fetch_transactions(account_id).await
    }

    /// `listAccountsByType`, always from the network
    pub async fn accounts_by_type(&self, account_type: AccountType) -> CoreResult<Vec<Account>> {
        log::debug!("Fetching accounts of type {}", account_type);
        self.gateway.accounts_by_type(account_type).await
    }

    /// `listAccounts` from the network, replacing the cached list
    pub async fn fetch_accounts(&self) -> CoreResult<Vec<Account>> {
        log::debug!("Fetching all accounts");
        let accounts = self.gateway.all_accounts().await?;
        self.store(QueryKey::AllAccounts, CachedData::Accounts(accounts.clone())).await;
        Ok(accounts)
    }

    /// `getAccount` from the network, replacing the cached entry
    pub async fn fetch_account(&self, id: &str) -> CoreResult<Account> {
        log::debug!("Fetching account {}", id);
        let account = self.gateway.account(id).await?;
        self.store(QueryKey::Account(id.to_string()), CachedData::Account(account.clone())).await;
        Ok(account)
    }

    /// `listTransactions` from the network, replacing the cached entry
    pub async fn fetch_transactions(&self, account_id: &str) -> CoreResult<Vec<Transaction>> {
        log::debug!("Fetching transactions of account {}", account_id);
        let transactions = self.gateway.transactions(account_id).await?;
        self.store(
            QueryKey::Transactions(account_id.to_string()),
            CachedData::Transactions(transactions.clone()),
        )
        .await;
        Ok(transactions)
    }

    // ==================== Mutations ====================

    /// `createAccount`, then refetch the account list
    pub async fn create_account(&self, input: &NewAccount) -> CoreResult<CreatedEntity> {
        log::debug!("Creating {} account with balance {}", input.account_type, input.solde);
        let created = self.gateway.save_account(input).await?;
        self.refetch(&[QueryKey::AllAccounts]).await;
        Ok(created)
    }

    /// `deleteAccount`, then refetch the account list
    pub async fn delete_account(&self, id: &str) -> CoreResult<bool> {
        log::debug!("Deleting account {}", id);
        let deleted = self.gateway.delete_account(id).await?;
        {
            let mut cache = self.cache.write().await;
            cache.remove(&QueryKey::Account(id.to_string()));
            cache.remove(&QueryKey::Transactions(id.to_string()));
        }
        self.refetch(&[QueryKey::AllAccounts]).await;
        Ok(deleted)
    }

    /// `createTransaction`, then refetch the account and its transactions
    pub async fn create_transaction(&self, input: &NewTransaction) -> CoreResult<CreatedEntity> {
        log::debug!("Adding {} of {} to account {}", input.type_transaction, input.montant, input.compte_id);
        let created = self.gateway.add_transaction(input).await?;
        let account_id = input.compte_id.to_string();
        self.refetch(&[
            QueryKey::Transactions(account_id.clone()),
            QueryKey::Account(account_id),
        ])
        .await;
        Ok(created)
    }

    /// Evict the given reads and issue them again
    pub async fn refetch(&self, keys: &[QueryKey]) {
        {
            let mut cache = self.cache.write().await;
            for key in keys {
                cache.remove(key);
            }
        }
        for key in keys {
            let result = match key {
                QueryKey::AllAccounts => self.fetch_accounts().await.map(|_| ()),
                QueryKey::Account(id) => self.fetch_account(id).await.map(|_| ()),
                QueryKey::Transactions(id) => self.fetch_transactions(id).await.map(|_| ()),
            };
            if let Err(e) = result {
                log::warn!("Refetch of {:?} failed: {}", key, e);
            }
        }
    }
}

// ==================== Tests ====================
