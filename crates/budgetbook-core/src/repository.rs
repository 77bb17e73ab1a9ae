//! Create/delete/read access to the ledger.

use std::sync::Arc;

use budgetbook_domain::{
    Displayable, Ledger, NewTransaction, Transaction, TransactionId, TransactionKind,
};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{Clock, CoreError, KeyValueStore, LedgerStore, SystemClock};

/// Earliest date accepted for a new transaction.
const EARLIEST_DATE: (i32, u32, u32) = (1900, 1, 1);

/// The only component that reads or writes the persisted ledger.
///
/// Every call re-reads the store, so callers always see the latest saved state.
#[derive(Clone)]
pub struct TransactionRepository {
    store: LedgerStore,
    clock: Arc<dyn Clock>,
}

impl TransactionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: LedgerStore::new(store),
            clock,
        }
    }

    /// Validates `new`, stores it under a fresh id and returns the stored record.
    ///
    /// Fails without writing when the stored ledger cannot be read.
    pub fn append(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        validate(&new, self.clock.today())?;
        let mut stored = self.store.load_for_update()?;
        let id = unique_id(stored.ledger());
        let transaction = Transaction::from_new(id, new);
        stored.ledger_mut().insert(transaction.clone());
        self.store.save_stored(&stored)?;
        info!(transaction = %transaction.display_label(), "transaction added");
        Ok(transaction)
    }

    /// Removes the record with `id` from the `kind` bucket.
    ///
    /// Returns `Ok(false)` without writing when no such record exists.
    pub fn delete(&self, id: &TransactionId, kind: TransactionKind) -> Result<bool, CoreError> {
        let mut stored = self.store.load_for_update()?;
        match stored.ledger_mut().remove(id, kind) {
            Some(removed) => {
                self.store.save_stored(&stored)?;
                info!(transaction = %removed.display_label(), "transaction deleted");
                Ok(true)
            }
            None => {
                debug!(%id, bucket = %kind, "delete requested for unknown transaction");
                Ok(false)
            }
        }
    }

    /// Snapshot of the persisted ledger.
    pub fn all(&self) -> Ledger {
        self.store.load()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

fn validate(new: &NewTransaction, today: NaiveDate) -> Result<(), CoreError> {
    if !(new.amount.is_finite() && new.amount > 0.0) {
        return Err(CoreError::InvalidAmount(new.amount));
    }
    if new.category.trim().is_empty() {
        return Err(CoreError::MissingCategory);
    }
    let (year, month, day) = EARLIEST_DATE;
    let earliest = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN);
    if new.date < earliest || new.date > today {
        return Err(CoreError::InvalidDate(new.date));
    }
    Ok(())
}

fn unique_id(ledger: &Ledger) -> TransactionId {
    loop {
        let id = TransactionId::generate();
        if !ledger.contains_id(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, MemoryStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repository() -> TransactionRepository {
        TransactionRepository::with_clock(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock::on(date(2024, 6, 30))),
        )
    }

    #[test]
    fn append_rejects_non_positive_amounts() {
        let repo = repository();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let new = NewTransaction::new(TransactionKind::Expense, "Food", amount, date(2024, 1, 1));
            let err = repo.append(new).expect_err("amount must be rejected");
            assert!(matches!(err, CoreError::InvalidAmount(_)), "unexpected error: {err:?}");
        }
        assert!(repo.all().is_empty());
    }

    #[test]
    fn append_rejects_blank_category() {
        let repo = repository();
        let new = NewTransaction::new(TransactionKind::Income, "  ", 5.0, date(2024, 1, 1));
        let err = repo.append(new).expect_err("blank category");
        assert!(matches!(err, CoreError::MissingCategory));
    }

    #[test]
    fn append_rejects_dates_in_the_future_or_before_1900() {
        let repo = repository();
        for bad in [date(2024, 7, 1), date(1899, 12, 31)] {
            let new = NewTransaction::new(TransactionKind::Income, "Salary", 5.0, bad);
            let err = repo.append(new).expect_err("date must be rejected");
            assert!(matches!(err, CoreError::InvalidDate(d) if d == bad));
        }
        let today = NewTransaction::new(TransactionKind::Income, "Salary", 5.0, date(2024, 6, 30));
        assert!(repo.append(today).is_ok());
    }

    #[test]
    fn delete_of_unknown_id_is_not_an_error() {
        let repo = repository();
        let removed = repo
            .delete(&TransactionId::from("missing"), TransactionKind::Expense)
            .unwrap();
        assert!(!removed);
    }
}
