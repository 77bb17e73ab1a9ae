use budgetbook_config::ConfigError;
use budgetbook_core::CoreError;
use thiserror::Error;

/// Error type surfaced by the [`BudgetBook`](crate::BudgetBook) facade.
#[derive(Debug, Error)]
pub enum BudgetBookError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
