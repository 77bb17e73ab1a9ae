//! Read-only views derived from the ledger: period history, category totals and
//! the daily/monthly series behind the charts.

use std::collections::BTreeMap;

use budgetbook_domain::{category_color, Period, Transaction, TransactionKind};
use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

use crate::TransactionRepository;

/// One pie-chart slice: a category's total and its palette color.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub total: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DailyTotals {
    pub day: u32,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MonthlyTotals {
    pub month: u32,
    pub label: &'static str,
    pub income: f64,
    pub expense: f64,
}

/// Pure queries over the latest persisted ledger. Each call takes a fresh snapshot.
#[derive(Clone)]
pub struct QueryService {
    repository: TransactionRepository,
}

impl QueryService {
    pub fn new(repository: TransactionRepository) -> Self {
        Self { repository }
    }

    /// Transactions of both kinds in `period`, most recent date first.
    pub fn list_for_period(&self, period: Period) -> Vec<Transaction> {
        let ledger = self.repository.all();
        let mut matches: Vec<Transaction> = ledger
            .iter()
            .filter(|txn| txn.in_period(&period))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(%period, count = matches.len(), "listed transactions for period");
        matches
    }

    /// Sum of `kind` amounts per category in `period`. Categories without
    /// transactions in the period are absent.
    pub fn aggregate_by_category(
        &self,
        kind: TransactionKind,
        period: Period,
    ) -> BTreeMap<String, f64> {
        let ledger = self.repository.all();
        let mut totals = BTreeMap::new();
        for txn in ledger.bucket(kind).iter().filter(|txn| txn.in_period(&period)) {
            *totals.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
        }
        totals
    }

    /// Category totals paired with chart colors, ordered by category name.
    pub fn category_breakdown(&self, kind: TransactionKind, period: Period) -> Vec<CategorySlice> {
        self.aggregate_by_category(kind, period)
            .into_iter()
            .map(|(category, total)| CategorySlice {
                color: category_color(kind, &category),
                category,
                total,
            })
            .collect()
    }

    pub fn total_for_period(&self, kind: TransactionKind, period: Period) -> f64 {
        self.repository
            .all()
            .bucket(kind)
            .iter()
            .filter(|txn| txn.in_period(&period))
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn period_totals(&self, period: Period) -> PeriodTotals {
        let ledger = self.repository.all();
        let sum = |kind: TransactionKind| -> f64 {
            ledger
                .bucket(kind)
                .iter()
                .filter(|txn| txn.in_period(&period))
                .map(|txn| txn.amount)
                .sum()
        };
        let income = sum(TransactionKind::Income);
        let expense = sum(TransactionKind::Expense);
        PeriodTotals {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// One zero-filled entry per calendar day of `period`.
    pub fn daily_totals(&self, period: Period) -> Vec<DailyTotals> {
        let ledger = self.repository.all();
        let mut days: Vec<DailyTotals> = (1..=period.days_in_month())
            .map(|day| DailyTotals {
                day,
                income: 0.0,
                expense: 0.0,
            })
            .collect();
        for txn in ledger.iter().filter(|txn| txn.in_period(&period)) {
            let slot = &mut days[(txn.date.day() - 1) as usize];
            match txn.kind {
                TransactionKind::Income => slot.income += txn.amount,
                TransactionKind::Expense => slot.expense += txn.amount,
            }
        }
        days
    }

    /// Twelve zero-filled entries, January first.
    pub fn monthly_totals(&self, year: i32) -> Vec<MonthlyTotals> {
        let ledger = self.repository.all();
        let mut months: Vec<MonthlyTotals> = (1..=12)
            .filter_map(|month| Period::new(month, year).ok())
            .map(|period| MonthlyTotals {
                month: period.month(),
                label: period.short_month_name(),
                income: 0.0,
                expense: 0.0,
            })
            .collect();
        for txn in ledger.iter().filter(|txn| txn.date.year() == year) {
            let slot = &mut months[(txn.date.month() - 1) as usize];
            match txn.kind {
                TransactionKind::Income => slot.income += txn.amount,
                TransactionKind::Expense => slot.expense += txn.amount,
            }
        }
        months
    }
}
