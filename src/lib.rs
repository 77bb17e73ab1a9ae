#![doc(test(attr(deny(warnings))))]

//! budgetbook keeps a personal income and expense ledger in a key-value store
//! and answers period queries over it for charts and history views.

pub mod app;
pub mod errors;
pub mod utils;

pub use app::{BudgetBook, HistoryEntry};
pub use budgetbook_config::{Config, ConfigError, Currency, DateFormat};
pub use budgetbook_core::{CoreError, KeyValueStore, MemoryStore};
pub use budgetbook_domain::{NewTransaction, Period, Transaction, TransactionId, TransactionKind};
pub use budgetbook_storage_json::JsonFileStore;
pub use errors::BudgetBookError;

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the tracing subscriber on first call and logs where data lives.
/// Later calls do nothing.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::info!(
            data_dir = %utils::app_data_dir().display(),
            "budgetbook tracing initialized"
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        assert!(super::INIT.is_completed());
    }
}
