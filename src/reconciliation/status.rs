//! Classifies spending against a budget.

use serde::Serialize;

/// The fraction of a budget at which spending is considered near the limit.
pub const NEAR_LIMIT_THRESHOLD: f64 = 0.8;

// NEAR_LIMIT_THRESHOLD as an exact fraction, 4/5.
const NEAR_LIMIT_NUMERATOR: i64 = 4;
const NEAR_LIMIT_DENOMINATOR: i64 = 5;

/// Round a dollar amount to whole cents.
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert whole cents back to dollars.
pub(crate) fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// How much of a budget has been used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// Less than 80% of the budget has been spent.
    Under,
    /// At least 80% of the budget has been spent, but not more than all of it.
    NearLimit,
    /// More than the budget has been spent.
    Over,
}

impl BudgetStatus {
    /// Classify `actual` spending against the `budgeted` amount.
    ///
    /// Exactly 80% and exactly 100% are both [BudgetStatus::NearLimit].
    /// A budget of zero or less is always [BudgetStatus::Under].
    ///
    /// Both amounts are compared in whole cents so that sums such as
    /// `0.1 + 0.2` against a budget of `0.3` land on the exact boundaries.
    pub fn classify(actual: f64, budgeted: f64) -> Self {
        let actual = to_cents(actual);
        let budgeted = to_cents(budgeted);

        if budgeted <= 0 {
            BudgetStatus::Under
        } else if actual > budgeted {
            BudgetStatus::Over
        } else if actual * NEAR_LIMIT_DENOMINATOR >= budgeted * NEAR_LIMIT_NUMERATOR {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::Under
        }
    }

    /// The label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Under => "On track",
            BudgetStatus::NearLimit => "Near limit",
            BudgetStatus::Over => "Over budget",
        }
    }

    /// The colour used for charts and progress bars.
    pub fn colour(&self) -> &'static str {
        match self {
            BudgetStatus::Under => "#10b981",
            BudgetStatus::NearLimit => "#f59e0b",
            BudgetStatus::Over => "#ef4444",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BudgetStatus;

    #[test]
    fn boundaries() {
        let cases = [
            (0.0, BudgetStatus::Under),
            (79.99, BudgetStatus::Under),
            (80.0, BudgetStatus::NearLimit),
            (80.01, BudgetStatus::NearLimit),
            (100.0, BudgetStatus::NearLimit),
            (100.01, BudgetStatus::Over),
            (250.0, BudgetStatus::Over),
        ];

        for (actual, want) in cases {
            assert_eq!(
                BudgetStatus::classify(actual, 100.0),
                want,
                "actual spend {actual} of 100"
            );
        }
    }

    #[test]
    fn exactly_eighty_percent_of_odd_budget() {
        assert_eq!(BudgetStatus::classify(96.0, 120.0), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::classify(95.99, 120.0), BudgetStatus::Under);
    }

    #[test]
    fn exactly_eighty_percent_with_cents() {
        let cases = [(8.20, 10.25), (8.04, 10.05), (9.04, 11.30), (0.32, 0.40)];

        for (actual, budgeted) in cases {
            assert_eq!(
                BudgetStatus::classify(actual, budgeted),
                BudgetStatus::NearLimit,
                "actual spend {actual} of {budgeted}"
            );
        }

        assert_eq!(BudgetStatus::classify(8.19, 10.25), BudgetStatus::Under);
    }

    #[test]
    fn summed_spend_equal_to_budget_is_near_limit() {
        assert_eq!(BudgetStatus::classify(0.1 + 0.2, 0.3), BudgetStatus::NearLimit);
        assert_eq!(BudgetStatus::classify(0.31, 0.3), BudgetStatus::Over);
    }

    #[test]
    fn zero_budget_is_under() {
        assert_eq!(BudgetStatus::classify(0.0, 0.0), BudgetStatus::Under);
        assert_eq!(BudgetStatus::classify(50.0, 0.0), BudgetStatus::Under);
    }

    #[test]
    fn serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&BudgetStatus::NearLimit).unwrap(),
            "\"near-limit\""
        );
    }
}
