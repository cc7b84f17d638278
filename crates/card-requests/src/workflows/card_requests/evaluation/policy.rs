use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyFormatter;

pub const REJECTED_LABEL: &str = "Rejected";

const FLAT_LIMIT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const UNLIMITED_LIMIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const HALF_INCOME: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const DOUBLE_INCOME: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Credit outcome for a scored request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditDecision {
    Rejected,
    Limit(Decimal),
}

impl CreditDecision {
    /// Text stored in the request's `credit` field.
    pub fn render(&self, formatter: &CurrencyFormatter) -> String {
        match self {
            CreditDecision::Rejected => formatter.format(REJECTED_LABEL),
            CreditDecision::Limit(amount) => formatter.format(*amount),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CreditDecision::Rejected)
    }
}

/// A tier whose limit cannot be represented for the given income.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("credit limit for score {score} overflows with income {income}")]
    LimitOverflow { score: u16, income: Decimal },
}

/// Tiered mapping from (score, income) to a credit decision. First matching tier wins.
pub fn decide(score: u16, income: Decimal) -> Result<CreditDecision, PolicyError> {
    let scaled = |factor: Decimal| {
        income
            .checked_mul(factor)
            .ok_or(PolicyError::LimitOverflow { score, income })
    };

    let decision = match score {
        1..=299 => CreditDecision::Rejected,
        300..=599 => CreditDecision::Limit(FLAT_LIMIT),
        600..=799 => CreditDecision::Limit(scaled(HALF_INCOME)?.max(FLAT_LIMIT)),
        800..=950 => CreditDecision::Limit(scaled(DOUBLE_INCOME)?),
        951..=999 => CreditDecision::Limit(UNLIMITED_LIMIT),
        _ => CreditDecision::Rejected,
    };
    Ok(decision)
}
