//! Account routes - Account list, type filter, creation and deletion
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_account,
    api_accounts,
    htmx_account_delete,
    htmx_account_delete_confirm,
    htmx_account_store,
    htmx_accounts_table,
    htmx_accounts_view,
};
pub use page::{page_accounts, render_account_list_view, render_accounts_table, render_delete_modal};
