use crate::dashboard::Dashboard;
use crate::metrics::{advice_of_day, build_metrics};
use crate::models::{JournalResponse, OverviewResponse};
use chrono::{Local, NaiveDate};

pub fn build_overview(dashboard: &Dashboard) -> OverviewResponse {
    build_overview_at(Local::now().date_naive(), dashboard)
}

pub fn build_overview_at(today: NaiveDate, dashboard: &Dashboard) -> OverviewResponse {
    OverviewResponse {
        date: today,
        progress: build_metrics(),
        advice: advice_of_day(),
        finance: dashboard.ledger.summary(),
        tasks: dashboard.tasks.summary(),
        journal: build_journal(dashboard),
    }
}

pub fn build_journal(dashboard: &Dashboard) -> JournalResponse {
    JournalResponse {
        count: dashboard.journal.len(),
        entries: dashboard.journal.entries().to_vec(),
    }
}
