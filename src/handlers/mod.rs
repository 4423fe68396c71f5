//! HTTP handlers
//!
//! Pages are rendered server-side. Failures come back as
//! `(StatusCode, Html<String>)` so each error outcome has its own view.

pub mod customer;

use axum::{http::StatusCode, response::Html, response::Redirect};
use serde::Serialize;

use crate::views::Views;

pub const ADD_CUSTOMER_PATH: &str = "/customers/addCustomer";

pub type PageError = (StatusCode, Html<String>);

/// GET /
///
/// Sends the browser to the add-customer form (303 See Other)
pub async fn redirect_to_add_customer() -> Redirect {
    Redirect::to(ADD_CUSTOMER_PATH)
}

/// Render a 200 page
pub(crate) fn render<S: Serialize>(
    views: &Views,
    template: &str,
    ctx: S,
) -> Result<Html<String>, PageError> {
    views.render(template, ctx).map(Html).map_err(|e| {
        tracing::error!("Failed to render {}: {}", template, e);
        template_failure()
    })
}

/// Render an error page with the given status
pub(crate) fn render_error<S: Serialize>(
    views: &Views,
    status: StatusCode,
    template: &str,
    ctx: S,
) -> PageError {
    match views.render(template, ctx) {
        Ok(body) => (status, Html(body)),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", template, e);
            template_failure()
        }
    }
}

fn template_failure() -> PageError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("Internal Server Error".to_string()),
    )
}
