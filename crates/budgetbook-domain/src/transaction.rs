use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::{EXPENSE_CATEGORIES, INCOME_CATEGORIES},
    common::{Displayable, Identifiable},
    period::Period,
};

/// Which bucket of the ledger a transaction belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Both kinds, in the order buckets are stored and scanned.
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The fixed category list offered when creating a transaction of this kind.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Category preselected when the kind is chosen.
    pub fn default_category(&self) -> &'static str {
        self.categories()[0]
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories().iter().any(|known| *known == category)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque transaction identifier. New identifiers are UUID v4 text, but any
/// string read back from storage is accepted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for TransactionId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Builds a stored record from validated form input.
    pub fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        Self {
            id,
            kind: new.kind,
            category: new.category.trim().to_string(),
            amount: new.amount,
            date: new.date,
            note: normalize_note(new.note),
        }
    }

    pub fn in_period(&self, period: &Period) -> bool {
        period.contains(self.date)
    }

    /// Drops blank notes so that `""` and a missing note compare equal.
    pub fn normalized(mut self) -> Self {
        self.note = normalize_note(self.note.take());
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} on {} [{}]",
            self.kind, self.category, self.amount, self.date, self.id
        )
    }
}

/// Input for creating a transaction; the repository assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount,
            date,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = normalize_note(Some(note.into()));
        self
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|text| !text.trim().is_empty())
}

/// Parses the date strings found in stored records.
///
/// Accepts a plain `YYYY-MM-DD` date as well as full ISO-8601 timestamps such
/// as `2024-01-31T17:00:00.000Z`. Timestamps carrying an offset are converted
/// to the local timezone first, so a local-midnight pick serialized as UTC
/// reads back as the day the user chose.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    parse_calendar_date_in(raw, &Local)
}

/// [`parse_calendar_date`] with an explicit timezone for offset timestamps.
pub fn parse_calendar_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, calendar_date::FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(tz).date_naive());
    }
    // No offset: already wall-clock time.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}

mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid calendar date `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_iso_timestamps() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(parse_calendar_date("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(
            parse_calendar_date_in("2024-01-05T17:00:00.000Z", &utc),
            Some(date(2024, 1, 5))
        );
        assert_eq!(
            parse_calendar_date_in("2024-03-31T23:30:00+07:00", &utc),
            Some(date(2024, 3, 31))
        );
        assert_eq!(
            parse_calendar_date("2024-02-10T08:15:00"),
            Some(date(2024, 2, 10))
        );
        assert_eq!(parse_calendar_date("05/01/2024"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
    }

    #[test]
    fn timestamps_land_on_the_local_day() {
        // Local midnight of Feb 1st at UTC+7, as a browser serializes it.
        let stamp = "2024-01-31T17:00:00.000Z";
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        let feb_first = parse_calendar_date_in(stamp, &jakarta).unwrap();
        assert_eq!(feb_first, date(2024, 2, 1));
        assert!(Period::new(2, 2024).unwrap().contains(feb_first));
        assert_eq!(parse_calendar_date_in(stamp, &new_york), Some(date(2024, 1, 31)));
    }

    #[test]
    fn serializes_with_the_stored_field_names() {
        let txn = Transaction::from_new(
            TransactionId::from("abc"),
            NewTransaction::new(TransactionKind::Expense, "Food", 12.5, date(2024, 1, 5)),
        );
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["type"], "expense");
        assert_eq!(value["category"], "Food");
        assert_eq!(value["amount"], 12.5);
        assert_eq!(value["date"], "2024-01-05");
        assert!(value.get("note").is_none());
    }

    #[test]
    fn decodes_records_written_by_the_browser_app() {
        let raw = r#"{
            "id": "7f0c",
            "type": "income",
            "category": "Salary",
            "amount": 1500,
            "date": "2024-01-31T10:00:00",
            "note": ""
        }"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        let txn = txn.normalized();
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.amount, 1500.0);
        assert_eq!(txn.date, date(2024, 1, 31));
        assert_eq!(txn.note, None);
    }

    #[test]
    fn from_new_trims_category_and_drops_blank_notes() {
        let mut new = NewTransaction::new(TransactionKind::Income, "  Gifts ", 20.0, date(2024, 5, 1));
        new.note = Some("   ".into());
        let txn = Transaction::from_new(TransactionId::generate(), new);
        assert_eq!(txn.category, "Gifts");
        assert_eq!(txn.note, None);

        let noted = NewTransaction::new(TransactionKind::Income, "Gifts", 20.0, date(2024, 5, 1))
            .with_note("birthday");
        assert_eq!(noted.note.as_deref(), Some("birthday"));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(TransactionId::generate(), TransactionId::generate());
    }

    #[test]
    fn default_category_is_first_in_list() {
        assert_eq!(TransactionKind::Income.default_category(), "Business");
        assert_eq!(TransactionKind::Expense.default_category(), "Bills");
        assert!(TransactionKind::Expense.is_known_category("Pets"));
        assert!(!TransactionKind::Income.is_known_category("Pets"));
    }
}
