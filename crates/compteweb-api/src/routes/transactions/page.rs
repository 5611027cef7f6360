//! Account detail page rendering, shared by the account page and the
//! transaction manager

use crate::{loader, page_response, render_failure, render_notification};
use axum::http::HeaderMap;
use compteweb_core::views::{AccountDetailView, DetailCapabilities, DetailVariant, TransactionForm, ViewState};
use compteweb_core::{Account, Transaction, TransactionType};
use compteweb_utils::{escape_html, format_fixed, selected_if};

const VIEW_ID: &str = "account-detail-view";

/// Path of a detail view for `account_id`
pub(crate) fn detail_path(variant: DetailVariant, account_id: &str) -> String {
    format!("{}/{}", variant.route_prefix(), urlencoding::encode(account_id))
}

/// Page shell of a detail variant, view pulled on load
pub(crate) fn render_detail_page(headers: &HeaderMap, variant: DetailVariant, account_id: &str) -> String {
    let title = match variant {
        DetailVariant::AccountPage => format!("Account {}", account_id),
        DetailVariant::TransactionManager => format!("Transactions {}", account_id),
    };
    let source = format!("{}/view", detail_path(variant, account_id));
    page_response(headers, &title, &loader(VIEW_ID, &source))
}

/// Whole detail view: account card, transaction form, history
pub fn render_account_detail_view(view: &AccountDetailView) -> String {
    let details = match &view.state {
        ViewState::Ready(details) => details,
        ViewState::Loading => {
            return loader(VIEW_ID, &format!("{}/view", detail_path(view.variant, &view.account_id)));
        }
        ViewState::Failed(message) => return render_failure(VIEW_ID, message),
    };
    let caps = view.capabilities();

    format!(
        r#"<div id='{view_id}'>
    {notification}
    {account}
    {form}
    {history}
</div>"#,
        view_id = VIEW_ID,
        notification = render_notification(view.notification.as_ref()),
        account = render_account_card(&details.account, caps),
        form = render_transaction_form(view, caps),
        history = render_history(&details.transactions, caps),
    )
}

fn amount(value: f64, caps: DetailCapabilities) -> String {
    match caps.currency_suffix {
        Some(suffix) => format!("{} {}", format_fixed(value, caps.amount_decimals), suffix),
        None => format_fixed(value, caps.amount_decimals),
    }
}

fn render_account_card(account: &Account, caps: DetailCapabilities) -> String {
    format!(
        r#"<div class='bg-white shadow-lg rounded-lg p-6 mb-8'>
        <h2 class='text-2xl font-bold text-red-600 mb-4'>Account Details</h2>
        <p class='text-gray-700 mb-2'><strong>Type:</strong> {}</p>
        <p class='text-gray-700 mb-2'><strong>Balance:</strong> {}</p>
        <p class='text-gray-700'><strong>Creation Date:</strong> {}</p>
    </div>"#,
        account.account_type,
        amount(account.solde, caps),
        escape_html(&account.date_creation)
    )
}

fn render_transaction_form(view: &AccountDetailView, caps: DetailCapabilities) -> String {
    let form: &TransactionForm = &view.form;
    let type_options: String = TransactionType::ALL
        .iter()
        .map(|t| {
            format!(
                "<option value='{}' {}>{}</option>",
                t.as_str(),
                selected_if(t.as_str(), form.transaction_type.as_str()),
                t.label()
            )
        })
        .collect();
    let date_field = if caps.editable_date {
        format!(
            r#"<div>
                <label class='block text-gray-600 font-medium'>Date</label>
                <input type='date' name='dateTransaction' required value='{}'
                       class='w-full mt-2 p-2 border border-gray-300 rounded-md'>
            </div>"#,
            escape_html(&form.date)
        )
    } else {
        String::new()
    };
    let amount_label = match caps.currency_suffix {
        Some(suffix) => format!("Amount ({})", suffix),
        None => "Amount".to_string(),
    };

    format!(
        r#"<div class='bg-white shadow-lg rounded-lg p-6 mb-8'>
        <h2 class='text-2xl font-bold text-red-600 mb-4'>Add Transaction</h2>
        <form hx-post='{action}' hx-target='#{view_id}' hx-swap='outerHTML' class='grid grid-cols-{columns} gap-4 items-end'>
            <div>
                <label class='block text-gray-600 font-medium'>{amount_label}</label>
                <input type='number' step='any' name='montant' placeholder='Enter amount' required value='{amount}'
                       class='w-full mt-2 p-2 border border-gray-300 rounded-md'>
            </div>
            <div>
                <label class='block text-gray-600 font-medium'>Type</label>
                <select name='typeTransaction' class='w-full mt-2 p-2 border border-gray-300 rounded-md'>{type_options}</select>
            </div>
            {date_field}
            <button type='submit' class='bg-blue-600 text-white px-4 py-2 rounded-md hover:bg-blue-700'>Add Transaction</button>
        </form>
    </div>"#,
        action = detail_path(view.variant, &view.account_id),
        view_id = VIEW_ID,
        columns = if caps.editable_date { 4 } else { 3 },
        amount_label = amount_label,
        amount = escape_html(&form.amount),
        type_options = type_options,
        date_field = date_field,
    )
}

fn render_history(transactions: &[Transaction], caps: DetailCapabilities) -> String {
    let rows: String = if transactions.is_empty() {
        "<tr><td colspan='3' class='p-4 text-center text-gray-500'>No transactions available.</td></tr>".to_string()
    } else {
        transactions
            .iter()
            .map(|t| {
                format!(
                    "<tr class='hover:bg-gray-200'><td class='p-4'>{}</td><td class='p-4'>{}</td><td class='p-4'>{}</td></tr>",
                    t.type_transaction,
                    format_fixed(t.montant, caps.amount_decimals),
                    escape_html(&t.date_transaction)
                )
            })
            .collect()
    };
    let amount_header = match caps.currency_suffix {
        Some(suffix) => format!("Amount ({})", suffix),
        None => "Amount".to_string(),
    };

    format!(
        r#"<div class='bg-white shadow-lg rounded-lg p-6'>
        <h2 class='text-2xl font-bold text-red-600 mb-4'>Transaction History</h2>
        <table class='w-full border-collapse bg-gray-50 rounded-lg shadow-md'>
            <thead class='bg-gray-100 text-left text-gray-700'>
                <tr><th class='p-4'>Type</th><th class='p-4'>{}</th><th class='p-4'>Date</th></tr>
            </thead>
            <tbody>{}</tbody>
        </table>
    </div>"#,
        amount_header, rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use compteweb_core::views::AccountDetails;
    use compteweb_core::AccountType;

    fn view(variant: DetailVariant, transactions: Vec<Transaction>) -> AccountDetailView {
        AccountDetailView {
            account_id: "3".to_string(),
            variant,
            state: ViewState::Ready(AccountDetails {
                account: Account {
                    id: "3".to_string(),
                    solde: 1234.5,
                    date_creation: "2024-01-15".to_string(),
                    account_type: AccountType::Epargne,
                },
                transactions,
            }),
            form: TransactionForm::new(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()),
            notification: None,
        }
    }

    #[test]
    fn test_account_page_uses_three_decimals_and_no_date() {
        let html = render_account_detail_view(&view(DetailVariant::AccountPage, Vec::new()));
        assert!(html.contains("1234.500"));
        assert!(!html.contains("name='dateTransaction'"));
        assert!(html.contains("hx-post='/account/3'"));
        assert!(html.contains("<option value='DEPOT' selected>"));
    }

    #[test]
    fn test_manager_uses_euro_and_editable_date() {
        let html = render_account_detail_view(&view(DetailVariant::TransactionManager, Vec::new()));
        assert!(html.contains("1234.50 €"));
        assert!(html.contains("name='dateTransaction' required value='2024-05-20'"));
        assert!(html.contains("hx-post='/transactions/3'"));
    }

    #[test]
    fn test_empty_history_placeholder() {
        let html = render_account_detail_view(&view(DetailVariant::AccountPage, Vec::new()));
        assert!(html.contains("No transactions available."));

        let html = render_account_detail_view(&view(
            DetailVariant::AccountPage,
            vec![Transaction {
                id: "9".to_string(),
                montant: 20.0,
                date_transaction: "2024/02/01".to_string(),
                type_transaction: TransactionType::Retrait,
            }],
        ));
        assert!(!html.contains("No transactions available."));
        assert!(html.contains("RETRAIT"));
        assert!(html.contains("20.000"));
    }

    #[test]
    fn test_failed_view_is_one_line() {
        let mut failed = view(DetailVariant::AccountPage, Vec::new());
        failed.state = ViewState::Failed("Account not found: 3".to_string());
        let html = render_account_detail_view(&failed);
        assert!(html.contains("Error: Account not found: 3"));
        assert!(!html.contains("Add Transaction"));
    }
}
