use crate::errors::AppError;
use crate::metrics::{advice_of_day, build_metrics};
use crate::models::{
    Advice, ChatMessage, FinanceSummary, JournalResponse, MetricsResponse, NewTaskRequest,
    NewTransactionRequest, OverviewResponse, SelectDateRequest, Task, TaskSummary, TextRequest,
    Transaction,
};
use crate::overview::{build_journal, build_overview};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = state.dashboard.lock().await;
    let overview = build_overview(&dashboard);
    drop(dashboard);
    let messages = state.chat.messages().await;
    Html(render_index(&overview, &messages))
}

pub async fn get_overview(State(state): State<AppState>) -> Json<OverviewResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(build_overview(&dashboard))
}

pub async fn get_metrics() -> Json<MetricsResponse> {
    Json(build_metrics())
}

pub async fn get_advice() -> Json<Advice> {
    Json(advice_of_day())
}

pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.ledger.transactions().to_vec())
}

pub async fn add_transaction(
    State(state): State<AppState>,
    Json(payload): Json<NewTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let transaction = dashboard.add_transaction(
        payload.kind,
        payload.amount,
        &payload.category,
        payload.description.as_deref(),
    )?;
    info!(id = transaction.id, kind = transaction.kind.as_str(), "transaction recorded");
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get_finance(State(state): State<AppState>) -> Json<FinanceSummary> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.ledger.summary())
}

pub async fn get_tasks(State(state): State<AppState>) -> Json<TaskSummary> {
    let dashboard = state.dashboard.lock().await;
    Json(dashboard.tasks.summary())
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let task = dashboard.add_task(&payload.title, payload.category.as_deref())?;
    info!(id = task.id, date = %task.date, "task added");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard
        .toggle_task(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("task {id} not found")))
}

pub async fn select_date(
    State(state): State<AppState>,
    Json(payload): Json<SelectDateRequest>,
) -> Json<TaskSummary> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.select_date(payload.date);
    Json(dashboard.tasks.summary())
}

pub async fn get_journal(State(state): State<AppState>) -> Json<JournalResponse> {
    let dashboard = state.dashboard.lock().await;
    Json(build_journal(&dashboard))
}

pub async fn add_journal_entry(
    State(state): State<AppState>,
    Json(payload): Json<TextRequest>,
) -> Result<(StatusCode, Json<JournalResponse>), AppError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.add_journal_entry(&payload.text)?;
    info!(count = dashboard.journal.len(), "journal entry saved");
    Ok((StatusCode::CREATED, Json(build_journal(&dashboard))))
}

pub async fn get_chat(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.chat.messages().await)
}

pub async fn send_chat(
    State(state): State<AppState>,
    Json(payload): Json<TextRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = state.chat.send(&payload.text).await?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

pub async fn quick_chat(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = state
        .chat
        .quick_action(index)
        .await
        .ok_or_else(|| AppError::not_found(format!("quick action {index} not found")))??;
    Ok((StatusCode::ACCEPTED, Json(message)))
}
