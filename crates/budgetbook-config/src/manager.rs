use std::sync::Arc;

use budgetbook_core::KeyValueStore;
use tracing::{debug, warn};

use crate::{
    model::DEFAULT_PRIMARY_COLOR, Config, ConfigError, Currency, DateFormat,
};

/// JSON `{custom, symbol, code}`.
pub const CURRENCY_KEY: &str = "currency";
/// Raw `#RRGGBB` text.
pub const PRIMARY_COLOR_KEY: &str = "primaryColor";
/// Raw date pattern text.
pub const DATE_FORMAT_KEY: &str = "dateFormat";

/// Handles persistence of [`Config`], one storage key per setting.
#[derive(Clone)]
pub struct ConfigManager {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads every setting, falling back to its default when missing or unusable.
    pub fn load(&self) -> Config {
        Config {
            currency: self.load_currency(),
            primary_color: self.load_primary_color(),
            date_format: self.load_date_format(),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.set_currency(config.currency.clone())?;
        self.set_primary_color(&config.primary_color)?;
        self.set_date_format(config.date_format)?;
        Ok(())
    }

    pub fn set_currency(&self, currency: Currency) -> Result<(), ConfigError> {
        if !currency.is_complete() {
            return Err(ConfigError::IncompleteCurrency);
        }
        let json =
            serde_json::to_string(&currency).map_err(|err| ConfigError::Serde(err.to_string()))?;
        self.store.set(CURRENCY_KEY, &json)?;
        debug!(code = %currency.code, "currency updated");
        Ok(())
    }

    pub fn set_primary_color(&self, color: &str) -> Result<(), ConfigError> {
        let color = color.trim();
        if !is_hex_color(color) {
            return Err(ConfigError::InvalidColor(color.to_string()));
        }
        self.store.set(PRIMARY_COLOR_KEY, color)?;
        debug!(color, "primary color updated");
        Ok(())
    }

    pub fn set_date_format(&self, format: DateFormat) -> Result<(), ConfigError> {
        self.store.set(DATE_FORMAT_KEY, format.pattern())?;
        debug!(pattern = format.pattern(), "date format updated");
        Ok(())
    }

    /// Parses `pattern` and stores it; unknown patterns are rejected.
    pub fn set_date_pattern(&self, pattern: &str) -> Result<(), ConfigError> {
        let format = DateFormat::from_pattern(pattern)
            .ok_or_else(|| ConfigError::UnsupportedDateFormat(pattern.to_string()))?;
        self.set_date_format(format)
    }

    /// Drops all stored settings so the defaults apply again.
    pub fn reset(&self) -> Result<(), ConfigError> {
        for key in [CURRENCY_KEY, PRIMARY_COLOR_KEY, DATE_FORMAT_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "could not read setting; using default");
                None
            }
        }
    }

    fn load_currency(&self) -> Currency {
        let Some(raw) = self.read(CURRENCY_KEY) else {
            return Currency::default();
        };
        match serde_json::from_str::<Currency>(&raw) {
            Ok(currency) if currency.is_complete() => currency,
            Ok(_) => {
                warn!("stored currency is incomplete; using default");
                Currency::default()
            }
            Err(err) => {
                warn!(error = %err, "stored currency is malformed; using default");
                Currency::default()
            }
        }
    }

    fn load_primary_color(&self) -> String {
        match self.read(PRIMARY_COLOR_KEY) {
            Some(color) if is_hex_color(color.trim()) => color.trim().to_string(),
            Some(color) => {
                warn!(color = %color, "stored primary color is invalid; using default");
                DEFAULT_PRIMARY_COLOR.into()
            }
            None => DEFAULT_PRIMARY_COLOR.into(),
        }
    }

    fn load_date_format(&self) -> DateFormat {
        match self.read(DATE_FORMAT_KEY) {
            Some(pattern) => DateFormat::from_pattern(&pattern).unwrap_or_else(|| {
                warn!(pattern = %pattern, "stored date format is unsupported; using default");
                DateFormat::default()
            }),
            None => DateFormat::default(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
