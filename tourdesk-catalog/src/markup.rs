use serde::{Deserialize, Serialize};

use crate::pricing::{add_cents, round_cents};
use crate::{CatalogError, CatalogResult};

/// Transformation from cost to selling price.
///
/// Serialized as `{"type": "percentage", "value": 20.0}` or
/// `{"type": "fixed", "value": 1500}` (fixed amounts are in cents).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MarkupPolicy {
    Percentage(f64),
    Fixed(i64),
}

impl MarkupPolicy {
    /// Reject negative or non-finite values before any aggregation runs
    pub fn validate(&self) -> CatalogResult<()> {
        match *self {
            MarkupPolicy::Percentage(value) if !value.is_finite() => Err(CatalogError::InvalidMarkup(
                format!("percentage {value} is not a finite number"),
            )),
            MarkupPolicy::Percentage(value) if value < 0.0 => Err(CatalogError::InvalidMarkup(
                format!("percentage {value} is negative"),
            )),
            MarkupPolicy::Fixed(value) if value < 0 => Err(CatalogError::InvalidMarkup(format!(
                "fixed amount {value} is negative"
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        MarkupPolicy::Percentage(0.0)
    }
}

/// Apply a markup to a cost in cents.
///
/// Trusts the policy: callers validate it first. Only a result outside the
/// cent range is an error.
pub fn apply_markup(base_cents: i64, policy: &MarkupPolicy) -> CatalogResult<i64> {
    match *policy {
        MarkupPolicy::Percentage(value) => {
            let marked = base_cents as f64 * (1.0 + value / 100.0);
            if !marked.is_finite() || marked.abs() >= i64::MAX as f64 {
                return Err(CatalogError::AmountOverflow(format!("{base_cents} + {value}%")));
            }
            Ok(round_cents(marked))
        }
        MarkupPolicy::Fixed(value) => add_cents(base_cents, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentage_markup() {
        assert_eq!(apply_markup(80_000, &MarkupPolicy::Percentage(20.0)), Ok(96_000));
        assert_eq!(apply_markup(10_000, &MarkupPolicy::Percentage(12.5)), Ok(11_250));
    }

    #[test]
    fn test_fixed_markup() {
        assert_eq!(apply_markup(80_000, &MarkupPolicy::Fixed(2_500)), Ok(82_500));
    }

    #[test]
    fn test_markup_out_of_range() {
        assert!(matches!(
            apply_markup(i64::MAX - 10, &MarkupPolicy::Fixed(100)),
            Err(CatalogError::AmountOverflow(_))
        ));
        assert!(matches!(
            apply_markup(i64::MAX / 2, &MarkupPolicy::Percentage(150.0)),
            Err(CatalogError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_validation() {
        assert!(MarkupPolicy::Percentage(0.0).validate().is_ok());
        assert!(MarkupPolicy::Percentage(150.0).validate().is_ok());
        assert!(MarkupPolicy::Fixed(0).validate().is_ok());

        assert!(matches!(
            MarkupPolicy::Percentage(-5.0).validate(),
            Err(CatalogError::InvalidMarkup(_))
        ));
        assert!(matches!(
            MarkupPolicy::Percentage(f64::INFINITY).validate(),
            Err(CatalogError::InvalidMarkup(_))
        ));
        assert!(matches!(
            MarkupPolicy::Fixed(-1).validate(),
            Err(CatalogError::InvalidMarkup(_))
        ));
    }

    #[test]
    fn test_policy_wire_format() {
        let policy: MarkupPolicy = serde_json::from_str(r#"{"type": "percentage", "value": 20}"#).unwrap();
        assert_eq!(policy, MarkupPolicy::Percentage(20.0));

        let policy: MarkupPolicy = serde_json::from_str(r#"{"type": "fixed", "value": 1500}"#).unwrap();
        assert_eq!(policy, MarkupPolicy::Fixed(1_500));

        assert!(serde_json::from_str::<MarkupPolicy>(r#"{"type": "tiered", "value": 3}"#).is_err());
    }

    proptest! {
        #[test]
        fn zero_markup_is_identity(cost in 0i64..1_000_000_000) {
            prop_assert_eq!(apply_markup(cost, &MarkupPolicy::Percentage(0.0)), Ok(cost));
            prop_assert_eq!(apply_markup(cost, &MarkupPolicy::Fixed(0)), Ok(cost));
        }

        #[test]
        fn markup_never_lowers_cost(cost in 0i64..1_000_000_000, pct in 0.0f64..500.0, fixed in 0i64..1_000_000) {
            prop_assert!(apply_markup(cost, &MarkupPolicy::Percentage(pct)).unwrap() >= cost);
            prop_assert!(apply_markup(cost, &MarkupPolicy::Fixed(fixed)).unwrap() >= cost);
        }
    }
}
