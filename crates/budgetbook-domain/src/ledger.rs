use serde::Serialize;

use crate::{
    common::Identifiable,
    transaction::{Transaction, TransactionId, TransactionKind},
};

/// The full set of stored transactions, split into one bucket per kind.
///
/// Buckets keep insertion order. Records can only enter through [`Ledger::insert`],
/// which files them by their own kind, so a record always sits in the bucket
/// matching its `type`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Ledger {
    income: Vec<Transaction>,
    expense: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    fn bucket_mut(&mut self, kind: TransactionKind) -> &mut Vec<Transaction> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        }
    }

    /// Appends to the bucket matching `transaction.kind`.
    pub fn insert(&mut self, transaction: Transaction) {
        self.bucket_mut(transaction.kind).push(transaction);
    }

    /// Removes the record with `id` from the `kind` bucket only.
    pub fn remove(&mut self, id: &TransactionId, kind: TransactionKind) -> Option<Transaction> {
        let bucket = self.bucket_mut(kind);
        let index = bucket.iter().position(|txn| txn.id() == id)?;
        Some(bucket.remove(index))
    }

    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.iter().find(|txn| txn.id() == id)
    }

    pub fn contains_id(&self, id: &TransactionId) -> bool {
        self.find(id).is_some()
    }

    /// Income bucket first, then expenses, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.income.iter().chain(self.expense.iter())
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }
}
