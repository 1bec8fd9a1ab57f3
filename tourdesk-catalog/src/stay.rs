use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult};

/// Hotel nights between two dates; same-day stays are zero nights
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> CatalogResult<u32> {
    let days = (check_out - check_in).num_days();
    u32::try_from(days).map_err(|_| CatalogError::InvalidStay { check_in, check_out })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    pub fn nights(&self) -> CatalogResult<u32> {
        nights_between(self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nights_between() {
        assert_eq!(nights_between(date(2025, 7, 1), date(2025, 7, 5)).unwrap(), 4);
        assert_eq!(nights_between(date(2025, 12, 30), date(2026, 1, 2)).unwrap(), 3);
        assert_eq!(nights_between(date(2025, 7, 1), date(2025, 7, 1)).unwrap(), 0);
    }

    #[test]
    fn test_check_out_before_check_in() {
        let result = nights_between(date(2025, 7, 5), date(2025, 7, 1));
        assert!(matches!(result, Err(CatalogError::InvalidStay { .. })));
    }

    #[test]
    fn test_stay_dates_deserialization() {
        let stay: StayDates =
            serde_json::from_str(r#"{"check_in": "2025-08-10", "check_out": "2025-08-17"}"#).unwrap();
        assert_eq!(stay.nights().unwrap(), 7);
    }
}
