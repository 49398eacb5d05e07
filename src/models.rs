use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub name: &'static str,
    pub value: u8,
    pub goal: u8,
    pub unit: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub trend: i8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub title: &'static str,
    pub text: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub date: NaiveDate,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskRequest {
    pub title: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of total expenses, 0 when there are none.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinanceSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub category_breakdown: Vec<CategoryShare>,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskSummary {
    pub selected_date: NaiveDate,
    pub tasks: Vec<Task>,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsResponse {
    pub total_progress: u8,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JournalResponse {
    pub count: usize,
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub date: NaiveDate,
    pub progress: MetricsResponse,
    pub advice: Advice,
    pub finance: FinanceSummary,
    pub tasks: TaskSummary,
    pub journal: JournalResponse,
}
