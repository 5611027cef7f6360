//! Accounts API endpoints - JSON API and HTMX partial responses

use crate::error::ApiError;
use crate::routes::parse_form_body;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use compteweb_core::views::{filter_accounts, AccountForm, AccountListView, DeleteConfirmation, TypeFilter};
use compteweb_core::{Account, AccountType};
use std::collections::HashMap;

use super::page::{render_account_list_view, render_accounts_table, render_delete_modal};

/// `GET /api/accounts[?type=COURANT|EPARGNE]`
pub async fn api_accounts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = match params.get("type").map(|t| t.trim()).filter(|t| !t.is_empty()) {
        Some(raw) => {
            let account_type = raw
                .parse::<AccountType>()
                .map_err(|message| ApiError::BadRequest { message })?;
            state.client.accounts_by_type(account_type).await?
        }
        None => state.client.list_accounts().await?,
    };
    Ok(Json(accounts))
}

/// `GET /api/accounts/:id`
pub async fn api_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.client.account(&id).await?))
}

/// List view fragment
pub async fn htmx_accounts_view(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let view = AccountListView::load(&state.client, TypeFilter::from_params(&params)).await;
    Html(render_account_list_view(&view))
}

/// Table only, filtered from the list already fetched
pub async fn htmx_accounts_table(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = TypeFilter::from_params(&params);
    let view = AccountListView::refilter(&state.client, filter).await;
    match view.state.data() {
        Some(accounts) => Html(render_accounts_table(&filter_accounts(accounts, filter))),
        None => Html(render_account_list_view(&view)),
    }
}

/// Create an account and re-render the list view
pub async fn htmx_account_store(State(state): State<AppState>, body: String) -> Html<String> {
    let params = parse_form_body(&body);
    let filter = TypeFilter::from_params(&params);
    let form = AccountForm::from_params(&params);
    let view = AccountListView::create_account(&state.client, filter, form).await;
    Html(render_account_list_view(&view))
}

/// Confirmation prompt shown before a deletion
pub async fn htmx_account_delete_confirm(Path(id): Path<String>) -> Html<String> {
    Html(render_delete_modal(&id))
}

/// Delete an account when the prompt was confirmed, then re-render the list view
pub async fn htmx_account_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Html<String> {
    let params = parse_form_body(&body);
    let filter = TypeFilter::from_params(&params);
    let confirmation = DeleteConfirmation::from_params(&params);
    let view = AccountListView::delete_account(&state.client, filter, &id, confirmation).await;
    Html(render_account_list_view(&view))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use compteweb_core::{AccountType, MemoryGateway};
    use std::sync::Arc;

    fn seeded() -> Arc<MemoryGateway> {
        let gateway = Arc::new(MemoryGateway::new());
        gateway.seed_account(120.0, "2024-01-01", AccountType::Courant);
        gateway.seed_account(55.5, "2024-02-01", AccountType::Epargne);
        gateway
    }

    #[tokio::test]
    async fn test_api_accounts_lists_and_filters() {
        let router = app(seeded());

        let (status, body) = send(&router, get("/api/accounts")).await;
        assert_eq!(status, StatusCode::OK);
        let all: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(all[0]["type"], "COURANT");
        assert_eq!(all[0]["dateCreation"], "2024-01-01");

        let (_, body) = send(&router, get("/api/accounts?type=EPARGNE")).await;
        let savings: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(savings.as_array().unwrap().len(), 1);
        assert_eq!(savings[0]["solde"], 55.5);
    }

    #[tokio::test]
    async fn test_api_rejects_unknown_type() {
        let router = app(seeded());
        let (status, body) = send(&router, get("/api/accounts?type=LIVRET")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("LIVRET"));
    }

    #[tokio::test]
    async fn test_api_upstream_failure_is_bad_gateway() {
        let gateway = seeded();
        gateway.fail("allComptes", "connection refused");
        let router = app(gateway);

        let (status, body) = send(&router, get("/api/accounts")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "connection refused");
    }

    #[tokio::test]
    async fn test_list_view_renders_accounts() {
        let router = app(seeded());
        let (status, body) = send(&router, htmx_get("/accounts/view")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("120.00"));
        assert!(body.contains("55.50"));
        assert!(body.contains("href='/account/1'"));
    }

    #[tokio::test]
    async fn test_list_view_failure_shows_error_line() {
        let gateway = seeded();
        gateway.fail("allComptes", "service unavailable");
        let router = app(gateway);
        let (_, body) = send(&router, htmx_get("/accounts/view")).await;
        assert!(body.contains("Error: service unavailable"));
    }

    #[tokio::test]
    async fn test_filter_table_served_from_cache() {
        let gateway = seeded();
        let router = app(gateway.clone());
        send(&router, htmx_get("/accounts/view")).await;

        let (_, body) = send(&router, htmx_get("/accounts/table?filter=EPARGNE")).await;
        assert!(body.contains("55.50"));
        assert!(!body.contains("120.00"));

        let (_, body) = send(&router, htmx_get("/accounts/table?filter=")).await;
        assert!(body.contains("55.50"));
        assert!(body.contains("120.00"));
        assert_eq!(gateway.calls("allComptes"), 1);
    }

    #[tokio::test]
    async fn test_list_view_reload_sees_new_accounts() {
        let gateway = seeded();
        let router = app(gateway.clone());
        let (_, body) = send(&router, htmx_get("/accounts/view")).await;
        assert!(!body.contains("999.00"));

        gateway.seed_account(999.0, "2024-06-01", AccountType::Courant);

        let (_, body) = send(&router, htmx_get("/accounts/view")).await;
        assert!(body.contains("999.00"));
        assert_eq!(gateway.calls("allComptes"), 2);
    }

    #[tokio::test]
    async fn test_create_account_sends_normalized_input() {
        let gateway = Arc::new(MemoryGateway::new());
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form("/accounts", "solde=100.5&dateCreation=2024-01-15&type=EPARGNE&filter="),
        )
        .await;

        let input = gateway.last_account_input().unwrap();
        assert_eq!(input.solde, 100.5);
        assert_eq!(input.date_creation, "2024-01-15");
        assert_eq!(input.account_type, AccountType::Epargne);
        assert!(body.contains("Account has been added successfully."));
        assert!(body.contains("100.50"));
    }

    #[tokio::test]
    async fn test_invalid_create_keeps_form_and_issues_no_call() {
        let gateway = Arc::new(MemoryGateway::new());
        let router = app(gateway.clone());

        let (_, body) = send(&router, post_form("/accounts", "solde=abc&dateCreation=2024-01-15&type=COURANT")).await;

        assert_eq!(gateway.calls("saveCompte"), 0);
        assert!(body.contains("Failed to add the account."));
        assert!(body.contains("value='abc'"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let gateway = seeded();
        let router = app(gateway.clone());

        let (_, modal) = send(&router, htmx_get("/accounts/1/delete")).await;
        assert!(modal.contains("Are you sure?"));
        assert_eq!(gateway.calls("deleteCompte"), 0);

        let (_, body) = send(&router, post_form("/accounts/1/delete", "filter=")).await;
        assert_eq!(gateway.calls("deleteCompte"), 0);
        assert!(body.contains("120.00"));

        let (_, body) = send(&router, post_form("/accounts/1/delete", "confirmed=true&filter=")).await;
        assert_eq!(gateway.calls("deleteCompte"), 1);
        assert_eq!(gateway.account_count(), 1);
        assert!(body.contains("The account has been deleted."));
        assert!(!body.contains("120.00"));
    }

    #[tokio::test]
    async fn test_refused_delete_is_reported() {
        let gateway = seeded();
        gateway.answer_delete_with(false);
        let router = app(gateway);

        let (_, body) = send(&router, post_form("/accounts/2/delete", "confirmed=true")).await;
        assert!(body.contains("Failed to delete the account."));
    }
}
