//! Transaction routes - Account detail view and transaction form
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_account_transactions,
    htmx_account_page_store,
    htmx_account_page_view,
    htmx_manager_store,
    htmx_manager_view,
    page_account,
    page_transaction_manager,
};
pub use page::render_account_detail_view;
