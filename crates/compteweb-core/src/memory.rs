//! In-memory banking service for tests
//!
//! Behaves like the remote service for the operations this front-end uses:
//! server-assigned ids, balance updated by each transaction, cascade on
//! account deletion. Counts calls per operation and can be told to fail or
//! to delay reads.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::gateway::BankingGateway;
use crate::types::{Account, AccountType, CreatedEntity, NewAccount, NewTransaction, Transaction, TransactionType};

#[derive(Default)]
struct Store {
    accounts: Vec<Account>,
    transactions: HashMap<String, Vec<Transaction>>,
    next_id: u64,
    calls: HashMap<&'static str, usize>,
    failures: HashMap<&'static str, String>,
    delays: HashMap<&'static str, Duration>,
    delete_result: Option<bool>,
    last_account_input: Option<NewAccount>,
    last_transaction_input: Option<NewTransaction>,
}

/// Banking service held in memory
#[derive(Default)]
pub struct MemoryGateway {
    store: Mutex<Store>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing call counters
    pub fn seed_account(&self, solde: f64, date_creation: &str, account_type: AccountType) -> String {
        let mut store = self.lock();
        let id = store.allocate_id();
        store.accounts.push(Account {
            id: id.clone(),
            solde,
            date_creation: date_creation.to_string(),
            account_type,
        });
        id
    }

    /// Insert a transaction directly, without touching the balance
    pub fn seed_transaction(&self, account_id: &str, montant: f64, date: &str, transaction_type: TransactionType) -> String {
        let mut store = self.lock();
        let id = store.allocate_id();
        store.transactions.entry(account_id.to_string()).or_default().push(Transaction {
            id: id.clone(),
            montant,
            date_transaction: date.to_string(),
            type_transaction: transaction_type,
        });
        id
    }

    /// Make every call to `operation` fail with `message`
    pub fn fail(&self, operation: &'static str, message: &str) {
        self.lock().failures.insert(operation, message.to_string());
    }

    /// Stop failing `operation`
    pub fn recover(&self, operation: &'static str) {
        self.lock().failures.remove(operation);
    }

    /// Delay every call to `operation`
    pub fn delay(&self, operation: &'static str, delay: Duration) {
        self.lock().delays.insert(operation, delay);
    }

    /// Value `deleteCompte` answers instead of `true`
    pub fn answer_delete_with(&self, result: bool) {
        self.lock().delete_result = Some(result);
    }

    /// Number of calls received for `operation`
    pub fn calls(&self, operation: &str) -> usize {
        self.lock().calls.get(operation).copied().unwrap_or(0)
    }

    pub fn last_account_input(&self) -> Option<NewAccount> {
        self.lock().last_account_input.clone()
    }

    pub fn last_transaction_input(&self) -> Option<NewTransaction> {
        self.lock().last_transaction_input.clone()
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count the call, then apply the configured delay and failure
    async fn enter(&self, operation: &'static str, mutation: bool) -> CoreResult<()> {
        let (delay, failure) = {
            let mut store = self.lock();
            *store.calls.entry(operation).or_insert(0) += 1;
            (store.delays.get(operation).copied(), store.failures.get(operation).cloned())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(message) if mutation => Err(CoreError::mutation(operation, message)),
            Some(message) => Err(CoreError::query(operation, message)),
            None => Ok(()),
        }
    }
}

impl Store {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

#[async_trait]
impl BankingGateway for MemoryGateway {
    async fn all_accounts(&self) -> CoreResult<Vec<Account>> {
        self.enter("allComptes", false).await?;
        Ok(self.lock().accounts.clone())
    }

    async fn accounts_by_type(&self, account_type: AccountType) -> CoreResult<Vec<Account>> {
        self.enter("compteByType", false).await?;
        Ok(self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.account_type == account_type)
            .cloned()
            .collect())
    }

    async fn account(&self, id: &str) -> CoreResult<Account> {
        self.enter("compteById", false).await?;
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CoreError::query("compteById", format!("Account not found: {}", id)))
    }

    async fn transactions(&self, account_id: &str) -> CoreResult<Vec<Transaction>> {
        self.enter("compteTransaction", false).await?;
        Ok(self.lock().transactions.get(account_id).cloned().unwrap_or_default())
    }

    async fn save_account(&self, input: &NewAccount) -> CoreResult<CreatedEntity> {
        self.enter("saveCompte", true).await?;
        let mut store = self.lock();
        store.last_account_input = Some(input.clone());
        let id = store.allocate_id();
        store.accounts.push(Account {
            id: id.clone(),
            solde: input.solde,
            date_creation: input.date_creation.clone(),
            account_type: input.account_type,
        });
        Ok(CreatedEntity { id })
    }

    async fn delete_account(&self, id: &str) -> CoreResult<bool> {
        self.enter("deleteCompte", true).await?;
        let mut store = self.lock();
        if let Some(result) = store.delete_result {
            return Ok(result);
        }
        let before = store.accounts.len();
        store.accounts.retain(|a| a.id != id);
        store.transactions.remove(id);
        Ok(store.accounts.len() < before)
    }

    async fn add_transaction(&self, input: &NewTransaction) -> CoreResult<CreatedEntity> {
        self.enter("addTransaction", true).await?;
        let mut store = self.lock();
        store.last_transaction_input = Some(input.clone());
        let account_id = input.compte_id.to_string();
        let delta = match input.type_transaction {
            TransactionType::Depot => input.montant,
            TransactionType::Retrait => -input.montant,
        };
        let account = store
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::mutation("addTransaction", format!("Account not found: {}", account_id)))?;
        account.solde += delta;

        let id = store.allocate_id();
        store.transactions.entry(account_id).or_default().push(Transaction {
            id: id.clone(),
            montant: input.montant,
            date_transaction: input.date_transaction.clone(),
            type_transaction: input.type_transaction,
        });
        Ok(CreatedEntity { id })
    }
}
