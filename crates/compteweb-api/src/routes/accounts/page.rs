//! Accounts page rendering

use crate::{loader, page_response, render_failure, render_notification};
use axum::extract::Query;
use axum::http::HeaderMap;
use axum::response::Html;
use compteweb_core::views::{AccountListView, TypeFilter, ViewState};
use compteweb_core::{Account, AccountType};
use compteweb_utils::{escape_html, format_fixed, selected_if};
use std::collections::HashMap;

const VIEW_ID: &str = "account-list-view";

/// `/` - account list page, view pulled on load
pub async fn page_accounts(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = TypeFilter::from_params(&params);
    let source = format!("/accounts/view?filter={}", filter.as_param());
    Html(page_response(&headers, "Accounts", &loader(VIEW_ID, &source)))
}

/// Whole list view: notification, creation form, filter and table
pub fn render_account_list_view(view: &AccountListView) -> String {
    let accounts = match &view.state {
        ViewState::Ready(_) => view.visible_accounts(),
        ViewState::Loading => return loader(VIEW_ID, &format!("/accounts/view?filter={}", view.filter.as_param())),
        ViewState::Failed(message) => return render_failure(VIEW_ID, message),
    };

    let type_options: String = AccountType::ALL
        .iter()
        .map(|t| {
            format!(
                "<option value='{}' {}>{}</option>",
                t.as_str(),
                selected_if(t.as_str(), &view.form.account_type),
                t.label()
            )
        })
        .collect();
    let filter_options: String = AccountType::ALL
        .iter()
        .map(|t| {
            format!(
                "<option value='{}' {}>{}</option>",
                t.as_str(),
                selected_if(t.as_str(), view.filter.as_param()),
                t.label()
            )
        })
        .collect();

    format!(
        r#"<div id='{view_id}'>
    {notification}
    <div class='bg-white shadow-lg rounded-lg p-6 mb-8 mx-auto w-3/4'>
        <h2 class='text-2xl font-bold text-gray-800 mb-4 text-center'>Add Account</h2>
        <form hx-post='/accounts' hx-target='#{view_id}' hx-swap='outerHTML' hx-include='#type-filter'
              class='grid grid-cols-4 gap-4 items-end justify-items-center'>
            <div class='w-full'>
                <label class='block text-gray-600 font-medium'>Account Type</label>
                <select name='type' required class='w-full mt-2 p-2 border border-gray-300 rounded-md'>
                    <option value='' {no_type}>Select Type</option>
                    {type_options}
                </select>
            </div>
            <div class='w-full'>
                <label class='block text-gray-600 font-medium'>Balance</label>
                <input type='number' step='any' name='solde' placeholder='Enter balance' required value='{solde}'
                       class='w-full mt-2 p-2 border border-gray-300 rounded-md'>
            </div>
            <div class='w-full'>
                <label class='block text-gray-600 font-medium'>Creation Date</label>
                <input type='date' name='dateCreation' required value='{date_creation}'
                       class='w-full mt-2 p-2 border border-gray-300 rounded-md'>
            </div>
            <button type='submit' class='bg-blue-600 text-white px-6 py-3 rounded-md hover:bg-blue-700'>+ Add Account</button>
        </form>
    </div>
    <div class='bg-white shadow-lg rounded-lg p-6'>
        <div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold text-gray-800'>Accounts</h2>
            <div>
                <label class='text-gray-600 font-medium mr-2'>Filter by Type:</label>
                <select id='type-filter' name='filter' hx-get='/accounts/table' hx-target='#accounts-table'
                        hx-trigger='change' class='p-2 border border-gray-300 rounded-md'>
                    <option value='' {all_selected}>All</option>
                    {filter_options}
                </select>
            </div>
        </div>
        <div id='accounts-table'>{table}</div>
    </div>
    <div id='modal'></div>
</div>"#,
        view_id = VIEW_ID,
        notification = render_notification(view.notification.as_ref()),
        no_type = selected_if("", &view.form.account_type),
        type_options = type_options,
        solde = escape_html(&view.form.solde),
        date_creation = escape_html(&view.form.date_creation),
        all_selected = selected_if("", view.filter.as_param()),
        filter_options = filter_options,
        table = render_accounts_table(&accounts),
    )
}

/// Account table; each row links to both detail variants
pub fn render_accounts_table(accounts: &[&Account]) -> String {
    let rows: String = if accounts.is_empty() {
        "<tr><td colspan='5' class='p-4 text-center text-gray-500'>No accounts found.</td></tr>".to_string()
    } else {
        accounts.iter().map(|account| render_account_row(account)).collect()
    };

    format!(
        r#"<table class='w-full border-collapse bg-gray-50 rounded-lg shadow-md'>
    <thead>
        <tr class='bg-gray-100 text-left text-gray-700'>
            <th class='p-4'>ID</th>
            <th class='p-4'>Type</th>
            <th class='p-4'>Balance</th>
            <th class='p-4'>Creation Date</th>
            <th class='p-4'>Actions</th>
        </tr>
    </thead>
    <tbody>{}</tbody>
</table>"#,
        rows
    )
}

fn render_account_row(account: &Account) -> String {
    let id = escape_html(&account.id);
    let encoded_id = urlencoding::encode(&account.id);
    format!(
        r#"<tr class='hover:bg-gray-200'>
    <td class='p-4'>{id}</td>
    <td class='p-4'>{account_type}</td>
    <td class='p-4'>{solde}</td>
    <td class='p-4'>{date}</td>
    <td class='p-4 flex items-center space-x-2'>
        <a href='/account/{encoded_id}' class='bg-yellow-500 text-white px-3 py-2 rounded-md hover:bg-yellow-600'>Transactions</a>
        <a href='/transactions/{encoded_id}' class='bg-gray-600 text-white px-3 py-2 rounded-md hover:bg-gray-700'>Manage</a>
        <button hx-get='/accounts/{encoded_id}/delete' hx-target='#modal'
                class='bg-red-500 text-white px-3 py-2 rounded-md hover:bg-red-600'>Delete</button>
    </td>
</tr>"#,
        id = id,
        encoded_id = encoded_id,
        account_type = account.account_type,
        solde = format_fixed(account.solde, 2),
        date = escape_html(&account.date_creation),
    )
}

/// Deletion prompt; only the confirm button sends `confirmed=true`
pub fn render_delete_modal(id: &str) -> String {
    let encoded_id = urlencoding::encode(id);
    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-50'>
    <div class='bg-white rounded-lg shadow-xl p-6 w-96 text-center'>
        <h3 class='text-xl font-bold mb-2'>Are you sure?</h3>
        <p class='text-gray-600 mb-6'>This action will delete the account and all its associated data!</p>
        <div class='flex justify-center gap-4'>
            <button hx-post='/accounts/{encoded_id}/delete' hx-vals='{{"confirmed": "true"}}' hx-include='#type-filter'
                    hx-target='#{view_id}' hx-swap='outerHTML'
                    class='bg-red-600 text-white px-4 py-2 rounded-md'>Yes, delete it!</button>
            <button type='button' onclick="document.getElementById('modal').innerHTML = ''"
                    class='bg-blue-600 text-white px-4 py-2 rounded-md'>Cancel</button>
        </div>
    </div>
</div>"#,
        encoded_id = encoded_id,
        view_id = VIEW_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use compteweb_core::views::{AccountForm, Notification};

    fn account(id: &str, solde: f64, account_type: AccountType) -> Account {
        Account {
            id: id.to_string(),
            solde,
            date_creation: "2024-01-15".to_string(),
            account_type,
        }
    }

    fn ready(accounts: Vec<Account>, filter: TypeFilter) -> AccountListView {
        AccountListView {
            state: ViewState::Ready(accounts),
            filter,
            form: AccountForm::default(),
            notification: None,
        }
    }

    #[test]
    fn test_table_respects_filter() {
        let view = ready(
            vec![account("1", 10.0, AccountType::Courant), account("2", 20.0, AccountType::Epargne)],
            TypeFilter::Only(AccountType::Courant),
        );
        let html = render_account_list_view(&view);
        assert!(html.contains("10.00"));
        assert!(!html.contains("20.00"));
        assert!(html.contains("<option value='COURANT' selected>"));
    }

    #[test]
    fn test_empty_list_placeholder() {
        let html = render_accounts_table(&[]);
        assert!(html.contains("No accounts found."));
    }

    #[test]
    fn test_failed_state_replaces_body() {
        let mut view = ready(Vec::new(), TypeFilter::All);
        view.state = ViewState::Failed("Response not successful: Received status code 500".to_string());
        let html = render_account_list_view(&view);
        assert!(html.contains("Error: Response not successful: Received status code 500"));
        assert!(!html.contains("Add Account"));
    }

    #[test]
    fn test_form_buffer_and_notification_rendered() {
        let mut view = ready(Vec::new(), TypeFilter::All);
        view.form = AccountForm {
            solde: "12".to_string(),
            date_creation: "2024-03-01".to_string(),
            account_type: "EPARGNE".to_string(),
        };
        view.notification = Some(Notification::error("Failed to add the account. boom"));
        let html = render_account_list_view(&view);
        assert!(html.contains("value='12'"));
        assert!(html.contains("value='2024-03-01'"));
        assert!(html.contains("<option value='EPARGNE' selected>"));
        assert!(html.contains("Failed to add the account. boom"));
    }

    #[test]
    fn test_delete_modal_confirms_explicitly() {
        let html = render_delete_modal("7");
        assert!(html.contains("hx-post='/accounts/7/delete'"));
        assert!(html.contains(r#"{"confirmed": "true"}"#));
    }
}
