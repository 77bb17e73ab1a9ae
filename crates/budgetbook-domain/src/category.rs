//! Fixed category catalogue and the chart palette for each kind.

use crate::transaction::TransactionKind;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Bills",
    "Car",
    "Clothes",
    "Travel",
    "Food",
    "Shopping",
    "House",
    "Entertainment",
    "Phone",
    "Pets",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Business",
    "Investments",
    "Extra income",
    "Deposits",
    "Lottery",
    "Gifts",
    "Salary",
    "Savings",
    "Rental income",
    "Other",
];

/// Pastel teal shades, darkest first.
pub const INCOME_CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Business", "#6DA3A1"),
    ("Investments", "#78B5B2"),
    ("Extra income", "#82C7C4"),
    ("Deposits", "#8CD9D6"),
    ("Lottery", "#97ECE8"),
    ("Gifts", "#A3F5F1"),
    ("Salary", "#AEEDEC"),
    ("Savings", "#B9E5E6"),
    ("Rental income", "#C5DEDF"),
    ("Other", "#D0D6D8"),
];

/// Red shades, darkest first.
pub const EXPENSE_CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Bills", "#B71C1C"),
    ("Car", "#C62828"),
    ("Clothes", "#D32F2F"),
    ("Travel", "#E53935"),
    ("Food", "#F44336"),
    ("Shopping", "#EF5350"),
    ("House", "#E57373"),
    ("Entertainment", "#EF9A9A"),
    ("Phone", "#F4A6A6"),
    ("Pets", "#FFCDD2"),
    ("Other", "#FFE1E4"),
];

/// Color used for categories that are not part of the catalogue.
pub const FALLBACK_CATEGORY_COLOR: &str = "#d0ed57";

pub fn category_color(kind: TransactionKind, category: &str) -> &'static str {
    let palette = match kind {
        TransactionKind::Income => INCOME_CATEGORY_COLORS,
        TransactionKind::Expense => EXPENSE_CATEGORY_COLORS,
    };
    palette
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_color() {
        for kind in TransactionKind::ALL {
            for category in kind.categories() {
                assert_ne!(
                    category_color(kind, category),
                    FALLBACK_CATEGORY_COLOR,
                    "{kind} category {category} has no palette entry"
                );
            }
        }
    }

    #[test]
    fn unknown_categories_use_fallback() {
        assert_eq!(
            category_color(TransactionKind::Expense, "Salary"),
            FALLBACK_CATEGORY_COLOR
        );
        assert_eq!(category_color(TransactionKind::Income, "Salary"), "#AEEDEC");
    }
}
