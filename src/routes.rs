use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, customer};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::redirect_to_add_customer))
        .route("/customers", get(customer::render_customers_page))
        .route(
            handlers::ADD_CUSTOMER_PATH,
            get(customer::render_add_customer_page).post(customer::add_customer),
        )
        .route("/customers/logMessages", get(customer::render_log_messages_page))
        .route("/customers/invoices", get(customer::render_invoices_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
