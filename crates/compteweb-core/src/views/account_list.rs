//! Account list view: all accounts, type filter, creation form, deletion

use std::collections::HashMap;

use compteweb_config::WireDateFormat;

use super::{Notification, ViewState};
use crate::client::DataClient;
use crate::dates::normalize_date;
use crate::error::{CoreError, CoreResult};
use crate::types::{Account, AccountType, NewAccount};

/// Type filter selection; the empty selection shows every account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(AccountType),
}

impl TypeFilter {
    /// Anything other than a known account type selects all accounts
    pub fn parse(value: &str) -> Self {
        value.parse::<AccountType>().map(TypeFilter::Only).unwrap_or(TypeFilter::All)
    }

    pub fn from_params(params: &HashMap<String, String>) -> Self {
        params.get("filter").map(|v| Self::parse(v)).unwrap_or_default()
    }

    /// Value of the filter `<select>`
    pub fn as_param(&self) -> &'static str {
        match self {
            TypeFilter::All => "",
            TypeFilter::Only(account_type) => account_type.as_str(),
        }
    }

    pub fn matches(&self, account: &Account) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(account_type) => account.account_type == *account_type,
        }
    }
}

/// Order-preserving subset of `accounts` selected by `filter`
pub fn filter_accounts(accounts: &[Account], filter: TypeFilter) -> Vec<&Account> {
    accounts.iter().filter(|a| filter.matches(a)).collect()
}

/// Raw text of the account creation form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountForm {
    pub solde: String,
    pub date_creation: String,
    pub account_type: String,
}

impl AccountForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let field = |name: &str| params.get(name).cloned().unwrap_or_default();
        Self {
            solde: field("solde"),
            date_creation: field("dateCreation"),
            account_type: field("type"),
        }
    }

    /// Check the buffer and build the `saveCompte` input
    pub fn validate(&self, date_format: WireDateFormat) -> CoreResult<NewAccount> {
        let account_type = self
            .account_type
            .parse::<AccountType>()
            .map_err(|_| CoreError::validation("type", "select COURANT or EPARGNE"))?;
        let solde = parse_number("solde", &self.solde)?;
        let date_creation = normalize_date("dateCreation", &self.date_creation, date_format)?;

        Ok(NewAccount {
            solde,
            date_creation,
            account_type,
        })
    }
}

/// Parse a user-typed number, rejecting empty, NaN and infinite values
pub(crate) fn parse_number(field: &str, input: &str) -> CoreResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "a number is required"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::validation(field, format!("'{}' is not a number", trimmed))),
    }
}

/// Answer to the deletion prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

impl DeleteConfirmation {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        match params.get("confirmed").map(String::as_str) {
            Some("true") => DeleteConfirmation::Confirmed,
            _ => DeleteConfirmation::Declined,
        }
    }
}

/// Rendered state of the account list page
#[derive(Debug, Clone, PartialEq)]
pub struct AccountListView {
    pub state: ViewState<Vec<Account>>,
    pub filter: TypeFilter,
    pub form: AccountForm,
    pub notification: Option<Notification>,
}

impl AccountListView {
    /// Fetch every account from the service
    pub async fn load(client: &DataClient, filter: TypeFilter) -> Self {
        Self::with_accounts(client.fetch_accounts().await, filter)
    }

    /// Re-render after a mutation, reading the list the mutation refetched
    async fn rerender(client: &DataClient, filter: TypeFilter) -> Self {
        Self::with_accounts(client.list_accounts().await, filter)
    }

    fn with_accounts(accounts: CoreResult<Vec<Account>>, filter: TypeFilter) -> Self {
        let state = match accounts {
            Ok(accounts) => ViewState::Ready(accounts),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        Self {
            state,
            filter,
            form: AccountForm::default(),
            notification: None,
        }
    }

    /// Apply another filter to the list already fetched
    pub async fn refilter(client: &DataClient, filter: TypeFilter) -> Self {
        match client.cached_accounts().await {
            Some(accounts) => Self {
                state: ViewState::Ready(accounts),
                filter,
                form: AccountForm::default(),
                notification: None,
            },
            None => Self::load(client, filter).await,
        }
    }

    /// Submit the creation form; the buffer survives a failure
    pub async fn create_account(client: &DataClient, filter: TypeFilter, form: AccountForm) -> Self {
        let result = match form.validate(client.date_format()) {
            Ok(input) => client.create_account(&input).await,
            Err(e) => Err(e),
        };

        let (form, notification) = match result {
            Ok(created) => {
                log::info!("Account {} created", created.id);
                (AccountForm::default(), Notification::success("Account has been added successfully."))
            }
            Err(e) => {
                log::error!("Error adding account: {}", e);
                (form, Notification::error(&format!("Failed to add the account. {}", e)))
            }
        };

        Self {
            form,
            notification: Some(notification),
            ..Self::rerender(client, filter).await
        }
    }

    /// Delete an account once the user confirmed; a declined prompt issues nothing
    pub async fn delete_account(
        client: &DataClient,
        filter: TypeFilter,
        id: &str,
        confirmation: DeleteConfirmation,
    ) -> Self {
        let notification = match confirmation {
            DeleteConfirmation::Declined => None,
            DeleteConfirmation::Confirmed => Some(match client.delete_account(id).await {
                Ok(true) => {
                    log::info!("Account {} deleted", id);
                    Notification::success("The account has been deleted.").with_title("Deleted!")
                }
                Ok(false) => {
                    log::error!("Error deleting account: service refused to delete {}", id);
                    Notification::error("Failed to delete the account.")
                }
                Err(e) => {
                    log::error!("Error deleting account: {}", e);
                    Notification::error("Failed to delete the account.")
                }
            }),
        };

        Self {
            notification,
            ..Self::rerender(client, filter).await
        }
    }

    /// Accounts matching the current filter, empty unless `Ready`
    pub fn visible_accounts(&self) -> Vec<&Account> {
        match &self.state {
            ViewState::Ready(accounts) => filter_accounts(accounts, self.filter),
            _ => Vec::new(),
        }
    }
}

// ==================== Tests ====================
