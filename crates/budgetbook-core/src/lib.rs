//! budgetbook-core
//!
//! Ledger storage, the transaction repository and the query/aggregation services.
//! Depends on budgetbook-domain. Talks to persistence only through [`KeyValueStore`].

pub mod error;
pub mod ledger_store;
pub mod period_service;
pub mod query_service;
pub mod repository;
pub mod storage;
pub mod time;


pub use error::CoreError;
pub use ledger_store::{decode_ledger, LedgerStore, StoredLedger, BUDGET_DATA_KEY};
pub use period_service::PeriodService;
pub use query_service::{CategorySlice, DailyTotals, MonthlyTotals, PeriodTotals, QueryService};
pub use repository::TransactionRepository;
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, FixedClock, SystemClock};
