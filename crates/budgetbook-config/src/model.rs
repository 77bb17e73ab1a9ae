use std::fmt;

use budgetbook_domain::TransactionKind;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

pub const DEFAULT_PRIMARY_COLOR: &str = "#D5232C";

/// User-configurable display preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub currency: Currency,
    pub primary_color: String,
    pub date_format: DateFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            primary_color: DEFAULT_PRIMARY_COLOR.into(),
            date_format: DateFormat::default(),
        }
    }
}

impl Config {
    pub fn format_date(&self, date: NaiveDate) -> String {
        self.date_format.format(date)
    }

    pub fn format_amount(&self, kind: TransactionKind, amount: f64) -> String {
        self.currency.format_amount(kind, amount)
    }
}

/// Display currency. No conversion is ever applied; this only affects labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub custom: bool,
    pub symbol: String,
    pub code: String,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            custom: false,
            symbol: symbol.into(),
            code: code.into(),
        }
    }

    pub fn custom(symbol: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            custom: true,
            ..Self::new(symbol, code)
        }
    }

    /// Built-in choices offered alongside a custom entry.
    pub fn presets() -> Vec<Currency> {
        vec![
            Currency::new("$", "USD"),
            Currency::new("€", "EUR"),
            Currency::new("Rp", "IDR"),
        ]
    }

    pub fn is_complete(&self) -> bool {
        !self.symbol.trim().is_empty() && !self.code.trim().is_empty()
    }

    pub fn label(&self) -> String {
        if self.custom {
            "Other (Custom)".into()
        } else {
            format!("{} - {}", self.symbol, self.code)
        }
    }

    /// Signed amount label, e.g. `+ $12.50` for income and `- $12.50` for expenses.
    pub fn format_amount(&self, kind: TransactionKind, amount: f64) -> String {
        let sign = match kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        format!("{} {}{:.2}", sign, self.symbol, amount)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::new("$", "USD")
    }
}

/// Supported date display patterns, stored as their date-fns pattern text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `PPP`: `January 5th, 2024`.
    #[default]
    Long,
    /// `yyyy-MM-dd`
    Iso,
    /// `dd/MM/yyyy`
    DayMonthYearSlash,
    /// `MM/dd/yyyy`
    MonthDayYearSlash,
    /// `dd-MM-yyyy`
    DayMonthYearDash,
}

impl DateFormat {
    pub const ALL: [DateFormat; 5] = [
        DateFormat::Long,
        DateFormat::Iso,
        DateFormat::DayMonthYearSlash,
        DateFormat::MonthDayYearSlash,
        DateFormat::DayMonthYearDash,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Long => "PPP",
            DateFormat::Iso => "yyyy-MM-dd",
            DateFormat::DayMonthYearSlash => "dd/MM/yyyy",
            DateFormat::MonthDayYearSlash => "MM/dd/yyyy",
            DateFormat::DayMonthYearDash => "dd-MM-yyyy",
        }
    }

    pub fn from_pattern(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        Self::ALL.into_iter().find(|format| format.pattern() == pattern)
    }

    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateFormat::Long => format!(
                "{} {}{}, {}",
                date.format("%B"),
                date.day(),
                ordinal_suffix(date.day()),
                date.year()
            ),
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
            DateFormat::DayMonthYearSlash => date.format("%d/%m/%Y").to_string(),
            DateFormat::MonthDayYearSlash => date.format("%m/%d/%Y").to_string(),
            DateFormat::DayMonthYearDash => date.format("%d-%m-%Y").to_string(),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl Serialize for DateFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.pattern())
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
