use crate::errors::ValidationError;
use crate::models::{CategoryShare, FinanceSummary, Transaction, TransactionKind};
use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use tracing::debug;

pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Еда",
    "Транспорт",
    "Жильё",
    "Развлечения",
    "Здоровье",
    "Образование",
    "Другое",
];

pub const INCOME_CATEGORIES: [&str; 5] = ["Зарплата", "Фриланс", "Инвестиции", "Подарки", "Другое"];

pub fn categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Income and expense records, newest first.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo ledger: 50000 income against 23000 of spread expenses.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut ledger = Self::new();
        let samples = [
            (TransactionKind::Expense, 3_000, "Образование", "Онлайн-курс", 6),
            (TransactionKind::Expense, 4_000, "Здоровье", "Абонемент в зал", 5),
            (TransactionKind::Expense, 5_000, "Развлечения", "Концерт", 4),
            (TransactionKind::Expense, 3_000, "Транспорт", "Проездной", 3),
            (TransactionKind::Expense, 8_000, "Еда", "Продукты", 2),
            (TransactionKind::Income, 50_000, "Зарплата", "Зарплата", 1),
        ];
        for (kind, amount, category, description, days_ago) in samples {
            ledger.push(
                kind,
                Decimal::from(amount),
                category.to_string(),
                Some(description.to_string()),
                today - Duration::days(days_ago),
            );
        }
        ledger
    }

    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: Option<Decimal>,
        category: &str,
        description: Option<&str>,
    ) -> Result<Transaction, ValidationError> {
        self.add_on(Local::now().date_naive(), kind, amount, category, description)
    }

    pub fn add_on(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        amount: Option<Decimal>,
        category: &str,
        description: Option<&str>,
    ) -> Result<Transaction, ValidationError> {
        let amount = amount.ok_or(ValidationError::MissingAmount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if !categories(kind).contains(&category) {
            return Err(ValidationError::UnknownCategory {
                kind: kind.as_str(),
                category: category.to_string(),
            });
        }
        let description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        self.check_totals(kind, amount)?;

        let transaction = self.push(kind, amount, category.to_string(), description, date);
        debug!(id = transaction.id, kind = kind.as_str(), %amount, "transaction added");
        Ok(transaction)
    }

    /// Rejects an amount that would push a total or the balance out of range.
    fn check_totals(&self, kind: TransactionKind, amount: Decimal) -> Result<(), ValidationError> {
        let new_total = self
            .total_of(kind)
            .checked_add(amount)
            .ok_or(ValidationError::AmountTooLarge)?;
        let (income, expense) = match kind {
            TransactionKind::Income => (new_total, self.total_expense()),
            TransactionKind::Expense => (self.total_income(), new_total),
        };
        income
            .checked_sub(expense)
            .ok_or(ValidationError::AmountTooLarge)?;
        Ok(())
    }

    fn push(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        category: String,
        description: Option<String>,
        date: NaiveDate,
    ) -> Transaction {
        self.next_id += 1;
        let transaction = Transaction {
            id: self.next_id,
            kind,
            amount,
            category,
            description,
            date,
        };
        self.transactions.insert(0, transaction.clone());
        transaction
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn total_income(&self) -> Decimal {
        self.total_of(TransactionKind::Income)
    }

    pub fn total_expense(&self) -> Decimal {
        self.total_of(TransactionKind::Expense)
    }

    pub fn balance(&self) -> Decimal {
        self.total_income() - self.total_expense()
    }

    fn total_of(&self, kind: TransactionKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Expense amounts per category, largest first.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let mut per_category: BTreeMap<&str, Decimal> = BTreeMap::new();
        for tx in self
            .transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
        {
            *per_category.entry(tx.category.as_str()).or_default() += tx.amount;
        }

        let total = self.total_expense();
        let mut breakdown: Vec<CategoryShare> = per_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category: category.to_string(),
                amount,
                share: share_of(amount, total),
            })
            .collect();
        // BTreeMap order plus a stable sort keeps ties alphabetical.
        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
        breakdown
    }

    pub fn summary(&self) -> FinanceSummary {
        FinanceSummary {
            total_income: self.total_income(),
            total_expense: self.total_expense(),
            balance: self.balance(),
            category_breakdown: self.category_breakdown(),
            transaction_count: self.transactions.len(),
        }
    }
}

fn share_of(amount: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (amount / total * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn dec(value: i64) -> Option<Decimal> {
        Some(Decimal::from(value))
    }

    #[test]
    fn expense_example_updates_totals_and_category() {
        let mut ledger = Ledger::with_sample_data(day());
        assert_eq!(ledger.total_income(), Decimal::from(50_000));
        assert_eq!(ledger.total_expense(), Decimal::from(23_000));
        let food_before = ledger
            .category_breakdown()
            .into_iter()
            .find(|share| share.category == "Еда")
            .expect("missing category")
            .amount;

        ledger
            .add_on(day(), TransactionKind::Expense, dec(1_000), "Еда", None)
            .unwrap();

        assert_eq!(ledger.total_expense(), Decimal::from(24_000));
        assert_eq!(ledger.balance(), Decimal::from(26_000));
        let food_after = ledger
            .category_breakdown()
            .into_iter()
            .find(|share| share.category == "Еда")
            .expect("missing category")
            .amount;
        assert_eq!(food_after - food_before, Decimal::from(1_000));
    }

    #[test]
    fn balance_moves_by_signed_amount() {
        let mut ledger = Ledger::new();
        let inputs = [
            (TransactionKind::Income, "1200.50", "Фриланс"),
            (TransactionKind::Expense, "99.99", "Транспорт"),
            (TransactionKind::Expense, "300", "Жильё"),
            (TransactionKind::Income, "0.01", "Подарки"),
        ];
        for (kind, amount, category) in inputs {
            let amount: Decimal = amount.parse().unwrap();
            let before = ledger.balance();
            ledger.add_on(day(), kind, Some(amount), category, None).unwrap();
            let expected = match kind {
                TransactionKind::Income => before + amount,
                TransactionKind::Expense => before - amount,
            };
            assert_eq!(ledger.balance(), expected);
        }
    }

    #[test]
    fn new_transactions_are_prepended_with_unique_ids() {
        let mut ledger = Ledger::new();
        let first = ledger
            .add_on(day(), TransactionKind::Income, dec(10), "Зарплата", Some("  "))
            .unwrap();
        let second = ledger
            .add_on(day(), TransactionKind::Expense, dec(5), "Еда", Some(" обед "))
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(ledger.transactions()[0].id, second.id);
        assert_eq!(first.description, None);
        assert_eq!(second.description.as_deref(), Some("обед"));
        assert_eq!(second.date, day());
    }

    #[test]
    fn invalid_input_leaves_ledger_untouched() {
        let mut ledger = Ledger::with_sample_data(day());
        let count = ledger.transactions().len();

        let cases = [
            (TransactionKind::Expense, None, "Еда", ValidationError::MissingAmount),
            (TransactionKind::Expense, dec(0), "Еда", ValidationError::NonPositiveAmount),
            (TransactionKind::Income, dec(-5), "Зарплата", ValidationError::NonPositiveAmount),
            (TransactionKind::Expense, dec(5), "   ", ValidationError::EmptyCategory),
        ];
        for (kind, amount, category, expected) in cases {
            let err = ledger.add_on(day(), kind, amount, category, None).unwrap_err();
            assert_eq!(err, expected);
        }
        let err = ledger
            .add_on(day(), TransactionKind::Expense, dec(5), "Зарплата", None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCategory { kind: "expense", .. }));

        assert_eq!(ledger.transactions().len(), count);
        assert_eq!(ledger.balance(), Decimal::from(27_000));
    }

    #[test]
    fn amounts_overflowing_totals_are_rejected() {
        let mut ledger = Ledger::with_sample_data(day());
        let count = ledger.transactions().len();

        let err = ledger
            .add_on(day(), TransactionKind::Expense, Some(Decimal::MAX), "Еда", None)
            .unwrap_err();
        assert_eq!(err, ValidationError::AmountTooLarge);
        assert_eq!(ledger.transactions().len(), count);

        let summary = ledger.summary();
        assert_eq!(summary.balance, Decimal::from(27_000));
        assert_eq!(summary.total_expense, Decimal::from(23_000));

        let mut ledger = Ledger::new();
        ledger
            .add_on(day(), TransactionKind::Income, Some(Decimal::MAX), "Зарплата", None)
            .unwrap();
        let err = ledger
            .add_on(day(), TransactionKind::Income, dec(1), "Подарки", None)
            .unwrap_err();
        assert_eq!(err, ValidationError::AmountTooLarge);
        assert_eq!(ledger.summary().balance, Decimal::MAX);
    }

    #[test]
    fn breakdown_shares_sum_to_one_hundred() {
        let mut ledger = Ledger::new();
        for (amount, category) in [(333, "Еда"), (333, "Жильё"), (334, "Другое"), (1, "Еда")] {
            ledger
                .add_on(day(), TransactionKind::Expense, dec(amount), category, None)
                .unwrap();
        }
        ledger
            .add_on(day(), TransactionKind::Income, dec(5_000), "Зарплата", None)
            .unwrap();

        let breakdown = ledger.category_breakdown();
        let total: f64 = breakdown.iter().map(|share| share.share).sum();
        assert!((total - 100.0).abs() < 1e-6, "total share {total}");

        let order: Vec<&str> = breakdown.iter().map(|share| share.category.as_str()).collect();
        assert_eq!(order, vec!["Другое", "Еда", "Жильё"]);
        assert_eq!(breakdown[1].amount, Decimal::from(334));
    }

    #[test]
    fn breakdown_ignores_income_and_handles_no_expenses() {
        let mut ledger = Ledger::new();
        assert!(ledger.category_breakdown().is_empty());
        ledger
            .add_on(day(), TransactionKind::Income, dec(100), "Другое", None)
            .unwrap();
        assert!(ledger.category_breakdown().is_empty());
        assert_eq!(share_of(Decimal::from(5), Decimal::ZERO), 0.0);
    }
}
