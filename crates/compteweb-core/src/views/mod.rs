//! View models behind the pages
//!
//! Each view issues its own reads through the [`DataClient`](crate::DataClient)
//! and ends up `Ready` or `Failed`; `Loading` is what the page shows until
//! the view fragment arrives. Form buffers and notifications live only for
//! the duration of one render.

pub mod account_detail;
pub mod account_list;

use serde::Serialize;

pub use account_detail::{AccountDetailView, AccountDetails, DetailCapabilities, DetailVariant, TransactionForm};
pub use account_list::{filter_accounts, AccountForm, AccountListView, DeleteConfirmation, TypeFilter};

/// Lifecycle of a view's data
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Dismissable message shown after a user action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error!".to_string(),
            message: message.to_string(),
        }
    }
}
