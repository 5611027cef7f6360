//! Account detail view: one account, its history and the transaction form
//!
//! Serves both the account page and the transaction manager; they differ
//! only in the [`DetailCapabilities`] of their [`DetailVariant`].

use std::collections::HashMap;

use chrono::NaiveDate;
use compteweb_config::WireDateFormat;

use super::account_list::parse_number;
use super::{Notification, ViewState};
use crate::client::DataClient;
use crate::dates::{input_value, normalize_date};
use crate::error::{CoreError, CoreResult};
use crate::types::{Account, NewTransaction, Transaction, TransactionType};

/// Which page hosts the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailVariant {
    /// `/account/:accountId`
    AccountPage,
    /// `/transactions/:accountId`
    TransactionManager,
}

/// What a variant lets the user do and how it displays amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailCapabilities {
    /// The transaction date can be picked; otherwise it is always today
    pub editable_date: bool,
    pub amount_decimals: usize,
    pub currency_suffix: Option<&'static str>,
}

impl DetailVariant {
    pub fn capabilities(&self) -> DetailCapabilities {
        match self {
            DetailVariant::AccountPage => DetailCapabilities {
                editable_date: false,
                amount_decimals: 3,
                currency_suffix: None,
            },
            DetailVariant::TransactionManager => DetailCapabilities {
                editable_date: true,
                amount_decimals: 2,
                currency_suffix: Some("€"),
            },
        }
    }

    pub fn route_prefix(&self) -> &'static str {
        match self {
            DetailVariant::AccountPage => "/account",
            DetailVariant::TransactionManager => "/transactions",
        }
    }
}

/// Both reads of a detail view
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    pub account: Account,
    pub transactions: Vec<Transaction>,
}

/// Combine the two independent reads; the account error wins when both fail
pub fn combine_reads(
    account: CoreResult<Account>,
    transactions: CoreResult<Vec<Transaction>>,
) -> ViewState<AccountDetails> {
    match (account, transactions) {
        (Ok(account), Ok(transactions)) => ViewState::Ready(AccountDetails { account, transactions }),
        (Err(e), _) => ViewState::Failed(e.to_string()),
        (Ok(_), Err(e)) => ViewState::Failed(e.to_string()),
    }
}

/// Raw text of the transaction form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    /// `DEPOT` or `RETRAIT`, checked on submission
    pub transaction_type: String,
    /// `YYYY-MM-DD`, as used by the date input
    pub date: String,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            transaction_type: TransactionType::default().as_str().to_string(),
            date: input_value(today),
        }
    }

    /// Read a submitted form; a variant without an editable date always uses today
    pub fn from_params(params: &HashMap<String, String>, variant: DetailVariant, today: NaiveDate) -> Self {
        let field = |name: &str| params.get(name).cloned().unwrap_or_default();
        let date = if variant.capabilities().editable_date {
            field("dateTransaction")
        } else {
            input_value(today)
        };
        Self {
            amount: field("montant"),
            transaction_type: field("typeTransaction"),
            date,
        }
    }

    /// Check the buffer and build the `addTransaction` input
    pub fn validate(&self, account_id: &str, date_format: WireDateFormat) -> CoreResult<NewTransaction> {
        let compte_id = account_id
            .trim()
            .parse::<i32>()
            .map_err(|_| CoreError::validation("compteId", format!("'{}' is not a valid account id", account_id)))?;
        let type_transaction = self.transaction_type.parse::<TransactionType>().map_err(|_| {
            CoreError::validation(
                "typeTransaction",
                format!("'{}' is not a transaction type, select DEPOT or RETRAIT", self.transaction_type),
            )
        })?;
        let montant = parse_number("montant", &self.amount)?;
        if montant <= 0.0 {
            return Err(CoreError::validation("montant", "the amount must be greater than zero"));
        }
        let date_transaction = normalize_date("dateTransaction", &self.date, date_format)?;

        Ok(NewTransaction {
            montant,
            date_transaction,
            type_transaction,
            compte_id,
        })
    }

    /// Form after a successful submission: only the amount is cleared
    fn submitted(self) -> Self {
        Self {
            amount: String::new(),
            ..self
        }
    }
}

/// Rendered state of a detail page
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetailView {
    pub account_id: String,
    pub variant: DetailVariant,
    pub state: ViewState<AccountDetails>,
    pub form: TransactionForm,
    pub notification: Option<Notification>,
}

impl AccountDetailView {
    /// Fetch the account and its transactions concurrently from the service
    pub async fn load(client: &DataClient, variant: DetailVariant, account_id: &str, today: NaiveDate) -> Self {
        let (account, transactions) =
            tokio::join!(client.fetch_account(account_id), client.fetch_transactions(account_id));
        Self::with_reads(variant, account_id, account, transactions, today)
    }

    /// Re-render after a submission, reading what the mutation refetched
    async fn rerender(client: &DataClient, variant: DetailVariant, account_id: &str, today: NaiveDate) -> Self {
        let (account, transactions) = tokio::join!(client.account(account_id), client.transactions(account_id));
        Self::with_reads(variant, account_id, account, transactions, today)
    }

    fn with_reads(
        variant: DetailVariant,
        account_id: &str,
        account: CoreResult<Account>,
        transactions: CoreResult<Vec<Transaction>>,
        today: NaiveDate,
    ) -> Self {
        Self {
            account_id: account_id.to_string(),
            variant,
            state: combine_reads(account, transactions),
            form: TransactionForm::new(today),
            notification: None,
        }
    }

    /// Submit the transaction form; every field survives a failure
    pub async fn add_transaction(
        client: &DataClient,
        variant: DetailVariant,
        account_id: &str,
        form: TransactionForm,
        today: NaiveDate,
    ) -> Self {
        let result = match form.validate(account_id, client.date_format()) {
            Ok(input) => client.create_transaction(&input).await,
            Err(e) => Err(e),
        };

        let (form, notification) = match result {
            Ok(created) => {
                log::info!("Transaction {} added to account {}", created.id, account_id);
                (form.submitted(), Notification::success("Transaction has been added successfully."))
            }
            Err(e) => {
                log::error!("Error adding transaction: {}", e);
                (form, Notification::error(&format!("Failed to add the transaction. {}", e)))
            }
        };

        Self {
            form,
            notification: Some(notification),
            ..Self::rerender(client, variant, account_id, today).await
        }
    }

    pub fn capabilities(&self) -> DetailCapabilities {
        self.variant.capabilities()
    }
}

// ==================== Tests ====================
