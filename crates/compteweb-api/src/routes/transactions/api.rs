//! Transaction endpoints - JSON history and HTMX detail view handlers
//!
//! `/account/:accountId` and `/transactions/:accountId` are the same view
//! with different capabilities; each handler pins its variant.

use crate::error::ApiError;
use crate::routes::parse_form_body;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use compteweb_core::dates::today;
use compteweb_core::views::{AccountDetailView, DetailVariant, TransactionForm};
use compteweb_core::Transaction;

use super::page::{render_account_detail_view, render_detail_page};

/// `GET /api/accounts/:id/transactions`
pub async fn api_account_transactions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.client.transactions(&id).await?))
}

async fn detail_view(state: &AppState, variant: DetailVariant, account_id: &str) -> Html<String> {
    let view = AccountDetailView::load(&state.client, variant, account_id, today()).await;
    Html(render_account_detail_view(&view))
}

async fn detail_store(state: &AppState, variant: DetailVariant, account_id: &str, body: &str) -> Html<String> {
    let today = today();
    let form = TransactionForm::from_params(&parse_form_body(body), variant, today);
    let view = AccountDetailView::add_transaction(&state.client, variant, account_id, form, today).await;
    Html(render_account_detail_view(&view))
}

/// `/account/:accountId`
pub async fn page_account(headers: HeaderMap, Path(account_id): Path<String>) -> Html<String> {
    Html(render_detail_page(&headers, DetailVariant::AccountPage, &account_id))
}

/// `/transactions/:accountId`
pub async fn page_transaction_manager(headers: HeaderMap, Path(account_id): Path<String>) -> Html<String> {
    Html(render_detail_page(&headers, DetailVariant::TransactionManager, &account_id))
}

pub async fn htmx_account_page_view(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Html<String> {
    detail_view(&state, DetailVariant::AccountPage, &account_id).await
}

pub async fn htmx_manager_view(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Html<String> {
    detail_view(&state, DetailVariant::TransactionManager, &account_id).await
}

pub async fn htmx_account_page_store(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    body: String,
) -> Html<String> {
    detail_store(&state, DetailVariant::AccountPage, &account_id, &body).await
}

pub async fn htmx_manager_store(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    body: String,
) -> Html<String> {
    detail_store(&state, DetailVariant::TransactionManager, &account_id, &body).await
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use compteweb_core::dates::{input_value, today};
    use compteweb_core::{AccountType, MemoryGateway, TransactionType};
    use std::sync::Arc;

    fn seeded() -> (Arc<MemoryGateway>, String) {
        let gateway = Arc::new(MemoryGateway::new());
        let id = gateway.seed_account(100.0, "2024-01-01", AccountType::Courant);
        (gateway, id)
    }

    #[tokio::test]
    async fn test_detail_pages_start_loading() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());

        let (status, body) = send(&router, get(&format!("/account/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loading..."));
        assert!(body.contains(&format!("hx-get='/account/{}/view'", id)));

        let (_, body) = send(&router, get(&format!("/transactions/{}", id))).await;
        assert!(body.contains(&format!("hx-get='/transactions/{}/view'", id)));
        assert_eq!(gateway.calls("compteById"), 0);
    }

    #[tokio::test]
    async fn test_view_without_history() {
        let (gateway, id) = seeded();
        let router = app(gateway);
        let (_, body) = send(&router, htmx_get(&format!("/account/{}/view", id))).await;
        assert!(body.contains("100.000"));
        assert!(body.contains("No transactions available."));
    }

    #[tokio::test]
    async fn test_unknown_account_shows_error() {
        let (gateway, _) = seeded();
        let router = app(gateway);
        let (_, body) = send(&router, htmx_get("/transactions/42/view")).await;
        assert!(body.contains("Error: Account not found: 42"));
    }

    #[tokio::test]
    async fn test_account_page_posts_with_today() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form(&format!("/account/{}", id), "montant=25&typeTransaction=RETRAIT&dateTransaction=1999-01-01"),
        )
        .await;

        let input = gateway.last_transaction_input().unwrap();
        assert_eq!(input.montant, 25.0);
        assert_eq!(input.type_transaction, TransactionType::Retrait);
        assert_eq!(input.date_transaction, input_value(today()));
        assert!(body.contains("Transaction has been added successfully."));
        assert!(body.contains("75.000"));
        assert!(body.contains("<option value='RETRAIT' selected>"));
    }

    #[tokio::test]
    async fn test_manager_posts_chosen_date() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form(&format!("/transactions/{}", id), "montant=10.5&typeTransaction=DEPOT&dateTransaction=2024%2F03%2F02"),
        )
        .await;

        assert_eq!(gateway.last_transaction_input().unwrap().date_transaction, "2024-03-02");
        assert!(body.contains("110.50 €"));
    }

    #[tokio::test]
    async fn test_failed_transaction_keeps_amount() {
        let (gateway, id) = seeded();
        gateway.fail("addTransaction", "Solde insuffisant");
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form(&format!("/account/{}", id), "montant=500&typeTransaction=RETRAIT"),
        )
        .await;

        assert!(body.contains("value='500'"));
        assert_eq!(body.matches("class='notification").count(), 1);
        assert!(body.contains("Failed to add the transaction. Solde insuffisant"));
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_sent() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form(&format!("/account/{}", id), "montant=50&typeTransaction=WITHDRAW"),
        )
        .await;

        assert_eq!(gateway.calls("addTransaction"), 0);
        assert!(body.contains("Failed to add the transaction."));
        assert!(body.contains("value='50'"));
    }

    #[tokio::test]
    async fn test_manager_without_date_is_not_sent() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());

        let (_, body) = send(
            &router,
            post_form(&format!("/transactions/{}", id), "montant=10&typeTransaction=DEPOT"),
        )
        .await;

        assert_eq!(gateway.calls("addTransaction"), 0);
        assert!(body.contains("a date is required"));
    }

    #[tokio::test]
    async fn test_view_reload_sees_new_history() {
        let (gateway, id) = seeded();
        let router = app(gateway.clone());
        let uri = format!("/transactions/{}/view", id);

        let (_, body) = send(&router, htmx_get(&uri)).await;
        assert!(body.contains("No transactions available."));

        gateway.seed_transaction(&id, 12.0, "2024-02-02", TransactionType::Depot);

        let (_, body) = send(&router, htmx_get(&uri)).await;
        assert!(!body.contains("No transactions available."));
        assert_eq!(gateway.calls("compteTransaction"), 2);
    }

    #[tokio::test]
    async fn test_api_transactions() {
        let (gateway, id) = seeded();
        gateway.seed_transaction(&id, 12.0, "2024-02-02", TransactionType::Depot);
        let router = app(gateway);

        let (status, body) = send(&router, get(&format!("/api/accounts/{}/transactions", id))).await;
        assert_eq!(status, StatusCode::OK);
        let list: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(list[0]["typeTransaction"], "DEPOT");
        assert_eq!(list[0]["montant"], 12.0);
    }
}
