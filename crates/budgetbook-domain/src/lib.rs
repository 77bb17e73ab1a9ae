//! budgetbook-domain
//!
//! Core data model for the budget tracker: transactions, the two-bucket ledger,
//! month/year periods and the fixed category catalogue.
//! No storage, no I/O.

pub mod category;
pub mod common;
pub mod ledger;
pub mod period;
pub mod transaction;

pub use category::{
    category_color, EXPENSE_CATEGORIES, EXPENSE_CATEGORY_COLORS, FALLBACK_CATEGORY_COLOR,
    INCOME_CATEGORIES, INCOME_CATEGORY_COLORS,
};
pub use common::{Displayable, Identifiable};
pub use ledger::Ledger;
pub use period::{InvalidPeriod, Period};
pub use transaction::{
    parse_calendar_date, parse_calendar_date_in, NewTransaction, Transaction, TransactionId,
    TransactionKind,
};
