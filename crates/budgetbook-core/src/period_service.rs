use std::sync::Arc;

use budgetbook_domain::Period;
use chrono::Datelike;

use crate::{Clock, CoreError};

/// How many years, counting the current one, the period picker offers.
const SELECTABLE_YEARS: i32 = 5;

/// Works out which periods a user can browse, relative to today.
#[derive(Clone)]
pub struct PeriodService {
    clock: Arc<dyn Clock>,
}

impl PeriodService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Builds the period for a month/year picked by the caller.
    pub fn period(&self, month: u32, year: i32) -> Result<Period, CoreError> {
        Ok(Period::new(month, year)?)
    }

    pub fn current_period(&self) -> Period {
        Period::containing(self.clock.today())
    }

    /// The current year followed by the previous four.
    pub fn selectable_years(&self) -> Vec<i32> {
        let current = self.clock.today().year();
        (0..SELECTABLE_YEARS).map(|offset| current - offset).collect()
    }

    /// Months of `year` that are not in the future.
    pub fn selectable_months(&self, year: i32) -> Vec<Period> {
        let today = self.clock.today();
        let last_month = match year.cmp(&today.year()) {
            std::cmp::Ordering::Less => 12,
            std::cmp::Ordering::Equal => today.month(),
            std::cmp::Ordering::Greater => 0,
        };
        (1..=last_month)
            .filter_map(|month| Period::new(month, year).ok())
            .collect()
    }

    /// The period shown after switching to `year`: the current month for the
    /// current year, December for earlier years.
    pub fn default_period_for_year(&self, year: i32) -> Option<Period> {
        self.selectable_months(year).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::NaiveDate;

    fn service() -> PeriodService {
        let today = NaiveDate::from_ymd_opt(2025, 4, 18).unwrap();
        PeriodService::new(Arc::new(FixedClock::on(today)))
    }

    #[test]
    fn out_of_range_month_is_invalid_period() {
        let service = service();
        assert_eq!(service.period(9, 2024).unwrap(), Period::new(9, 2024).unwrap());
        for month in [0, 13] {
            let err = service.period(month, 2024).expect_err("month out of range");
            assert!(
                matches!(err, CoreError::InvalidPeriod(ref inner) if inner.month == month),
                "unexpected error: {err:?}"
            );
        }
    }

    #[test]
    fn offers_five_years_newest_first() {
        assert_eq!(service().selectable_years(), vec![2025, 2024, 2023, 2022, 2021]);
    }

    #[test]
    fn current_year_stops_at_current_month() {
        let months: Vec<u32> = service()
            .selectable_months(2025)
            .iter()
            .map(|p| p.month())
            .collect();
        assert_eq!(months, vec![1, 2, 3, 4]);
        assert_eq!(service().selectable_months(2024).len(), 12);
        assert!(service().selectable_months(2026).is_empty());
    }

    #[test]
    fn default_period_follows_year_switch() {
        let service = service();
        assert_eq!(service.current_period(), Period::new(4, 2025).unwrap());
        assert_eq!(
            service.default_period_for_year(2025),
            Some(Period::new(4, 2025).unwrap())
        );
        assert_eq!(
            service.default_period_for_year(2023),
            Some(Period::new(12, 2023).unwrap())
        );
        assert_eq!(service.default_period_for_year(2030), None);
    }
}
