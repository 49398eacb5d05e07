use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/overview", get(handlers::get_overview))
        .route("/api/metrics", get(handlers::get_metrics))
        .route("/api/advice", get(handlers::get_advice))
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::add_transaction),
        )
        .route("/api/finance", get(handlers::get_finance))
        .route("/api/tasks", get(handlers::get_tasks).post(handlers::add_task))
        .route("/api/tasks/date", put(handlers::select_date))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route(
            "/api/journal",
            get(handlers::get_journal).post(handlers::add_journal_entry),
        )
        .route("/api/chat", get(handlers::get_chat).post(handlers::send_chat))
        .route("/api/chat/quick/:index", post(handlers::quick_chat))
        .with_state(state)
}
