use std::{path::PathBuf, sync::Arc};

use budgetbook_config::{Config, ConfigManager};
use budgetbook_core::{
    Clock, KeyValueStore, PeriodService, QueryService, SystemClock, TransactionRepository,
};
use budgetbook_domain::{NewTransaction, Period, Transaction, TransactionId, TransactionKind};
use budgetbook_storage_json::JsonFileStore;
use tracing::info;

use crate::{errors::BudgetBookError, utils};

/// A transaction paired with its display labels under the current [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub transaction: Transaction,
    pub amount_label: String,
    pub date_label: String,
}

/// Wires one store into the repository, query, period and config services.
#[derive(Clone)]
pub struct BudgetBook {
    repository: TransactionRepository,
    queries: QueryService,
    periods: PeriodService,
    config: ConfigManager,
}

impl BudgetBook {
    /// Opens a file-backed book at `dir`, or at [`utils::app_data_dir`] when `None`.
    pub fn open(dir: Option<PathBuf>) -> Result<Self, BudgetBookError> {
        let root = dir.unwrap_or_else(utils::app_data_dir);
        let store = JsonFileStore::new(root)?;
        info!(path = %store.root().display(), "budget book opened");
        Ok(Self::with_store(Arc::new(store)))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_store_and_clock(store, Arc::new(SystemClock))
    }

    pub fn with_store_and_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let repository = TransactionRepository::with_clock(store.clone(), clock.clone());
        Self {
            queries: QueryService::new(repository.clone()),
            periods: PeriodService::new(clock),
            config: ConfigManager::new(store),
            repository,
        }
    }

    pub fn repository(&self) -> &TransactionRepository {
        &self.repository
    }

    pub fn queries(&self) -> &QueryService {
        &self.queries
    }

    pub fn periods(&self) -> &PeriodService {
        &self.periods
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config
    }

    /// Current preferences; never fails, see [`ConfigManager::load`].
    pub fn config(&self) -> Config {
        self.config.load()
    }

    pub fn add(&self, new: NewTransaction) -> Result<Transaction, BudgetBookError> {
        Ok(self.repository.append(new)?)
    }

    pub fn delete(&self, id: &TransactionId, kind: TransactionKind) -> Result<bool, BudgetBookError> {
        Ok(self.repository.delete(id, kind)?)
    }

    /// Transactions in `period`, newest first, labelled for display.
    pub fn history(&self, period: Period) -> Vec<HistoryEntry> {
        let config = self.config();
        self.queries
            .list_for_period(period)
            .into_iter()
            .map(|transaction| HistoryEntry {
                amount_label: config.format_amount(transaction.kind, transaction.amount),
                date_label: config.format_date(transaction.date),
                transaction,
            })
            .collect()
    }
}
