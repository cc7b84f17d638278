mod currency;
mod policy;
mod source;

pub use currency::{CreditValue, CurrencyFormatter, DEFAULT_CURRENCY_SYMBOL};
pub use policy::{decide, CreditDecision, PolicyError, REJECTED_LABEL};
pub use source::{
    FixedScoreSource, RandomScoreSource, ScoreSource, SequenceScoreSource, SCORE_RANGE,
};

use super::domain::{CardRequest, RequestKey};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the tier policy and renders the credit text.
pub struct ScoringEngine {
    formatter: CurrencyFormatter,
}

impl ScoringEngine {
    pub fn new(formatter: CurrencyFormatter) -> Self {
        Self { formatter }
    }

    pub fn score(&self, request: &CardRequest, score: u16) -> Result<ScoreOutcome, PolicyError> {
        let decision = decide(score, request.income)?;
        let credit = decision.render(&self.formatter);

        Ok(ScoreOutcome {
            key: request.key(),
            score,
            decision,
            credit,
        })
    }
}

/// Result of scoring a single stored request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub key: RequestKey,
    pub score: u16,
    pub decision: CreditDecision,
    pub credit: String,
}
