use crate::errors::ValidationError;
use crate::journal::Journal;
use crate::ledger::Ledger;
use crate::models::{Task, Transaction, TransactionKind};
use crate::tasks::TaskList;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Page-level store: owns every mutable collection on the dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub ledger: Ledger,
    pub tasks: TaskList,
    pub journal: Journal,
}

impl Dashboard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            ledger: Ledger::new(),
            tasks: TaskList::new(today),
            journal: Journal::new(),
        }
    }

    pub fn with_sample_data(today: NaiveDate) -> Self {
        Self {
            ledger: Ledger::with_sample_data(today),
            tasks: TaskList::with_sample_data(today),
            journal: Journal::new(),
        }
    }

    pub fn add_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Option<Decimal>,
        category: &str,
        description: Option<&str>,
    ) -> Result<Transaction, ValidationError> {
        self.ledger.add(kind, amount, category, description)
    }

    pub fn add_task(&mut self, title: &str, category: Option<&str>) -> Result<Task, ValidationError> {
        self.tasks.add(title, category)
    }

    pub fn toggle_task(&mut self, id: u64) -> Option<Task> {
        self.tasks.toggle(id)
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.tasks.select_date(date);
    }

    pub fn add_journal_entry(&mut self, text: &str) -> Result<(), ValidationError> {
        self.journal.add(text)
    }
}
