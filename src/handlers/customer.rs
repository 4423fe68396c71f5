use axum::{extract::State, http::StatusCode, response::Html, Form};
use minijinja::context;
use tracing::{error, info, warn};

use crate::error::CustomerError;
use crate::handlers::{render, render_error, PageError};
use crate::models::customer::AddCustomerForm;
use crate::{views, AppState};

/// Handler for GET /customers
pub async fn render_customers_page(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    let customers = state.customers.list_customers(None).await.map_err(|e| {
        error!("Failed to list customers: {}", e);
        unexpected(&state, e.to_string(), "")
    })?;

    render(&state.views, views::CUSTOMERS, context! { customers })
}

/// Handler for GET /customers/addCustomer
pub async fn render_add_customer_page(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    render(&state.views, views::ADD_CUSTOMER, context! {})
}

/// Handler for POST /customers/addCustomer
///
/// Renders the customer list on success. Otherwise:
/// - 422 `invalid_name` when the name fails validation
/// - 409 `duplicate` when the name already exists
/// - 500 `add_customer` with the error message for anything else
pub async fn add_customer(
    State(state): State<AppState>,
    Form(form): Form<AddCustomerForm>,
) -> Result<Html<String>, PageError> {
    let name = form.name;
    info!("Add customer request for '{}'", name);

    match state.customers.create_customer(&name, None).await {
        Ok(_) => {
            let customers = state.customers.list_customers(None).await.map_err(|e| {
                error!("Failed to list customers: {}", e);
                unexpected(&state, e.to_string(), &name)
            })?;
            render(&state.views, views::CUSTOMERS, context! { customers })
        }
        Err(e @ CustomerError::InvalidName(_)) => {
            warn!("Invalid name: {}", e);
            Err(render_error(
                &state.views,
                StatusCode::UNPROCESSABLE_ENTITY,
                views::INVALID_NAME,
                context! { name },
            ))
        }
        Err(e @ CustomerError::AlreadyExists(_)) => {
            warn!("Caught a duplicate: {}", e);
            Err(render_error(
                &state.views,
                StatusCode::CONFLICT,
                views::DUPLICATE,
                context! { name },
            ))
        }
        Err(e) => {
            error!("Unexpected exception: {}", e);
            Err(unexpected(&state, e.to_string(), &name))
        }
    }
}

/// Handler for GET /customers/logMessages
pub async fn render_log_messages_page(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    let log_messages = state
        .customers
        .log_messages()
        .list_log_messages(None)
        .await
        .map_err(|e| {
            error!("Failed to list log messages: {}", e);
            unexpected(&state, e.to_string(), "")
        })?;

    render(&state.views, views::LOG_MESSAGES, context! { log_messages })
}

/// Handler for GET /customers/invoices
pub async fn render_invoices_page(
    State(state): State<AppState>,
) -> Result<Html<String>, PageError> {
    let invoices = state
        .customers
        .invoices()
        .list_invoices(None)
        .await
        .map_err(|e| {
            error!("Failed to list invoices: {}", e);
            unexpected(&state, e.to_string(), "")
        })?;

    render(&state.views, views::INVOICES, context! { invoices })
}

/// Back to the add form with the error message, never the error chain
fn unexpected(state: &AppState, message: String, name: &str) -> PageError {
    let messages = vec![format!("Unexpected exception: {}", message)];
    render_error(
        &state.views,
        StatusCode::INTERNAL_SERVER_ERROR,
        views::ADD_CUSTOMER,
        context! { messages, name },
    )
}
