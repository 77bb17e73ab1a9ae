//! budgetbook-config
//!
//! Persistent user preferences: display currency, accent color and date format.
//! Owns the Config data structure plus the helpers that render dates and amounts
//! according to it.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, CURRENCY_KEY, DATE_FORMAT_KEY, PRIMARY_COLOR_KEY};
pub use model::{Config, Currency, DateFormat};
