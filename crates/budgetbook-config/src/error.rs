use budgetbook_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid color `{0}`; expected #RRGGBB")]
    InvalidColor(String),

    #[error("Unsupported date format `{0}`")]
    UnsupportedDateFormat(String),

    #[error("Custom currency needs a symbol and a code")]
    IncompleteCurrency,

    #[error("Serialization error: {0}")]
    Serde(String),
}
