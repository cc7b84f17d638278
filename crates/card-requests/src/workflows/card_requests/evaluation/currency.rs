use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Value handed to the formatter: either an amount or text that is already final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditValue {
    Text(String),
    Amount(Decimal),
}

impl From<&str> for CreditValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CreditValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for CreditValue {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}

/// Renders amounts as `<symbol> 1234,56`: two decimals, comma separator, no grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, value: impl Into<CreditValue>) -> String {
        match value.into() {
            CreditValue::Text(text) => text,
            CreditValue::Amount(amount) => self.format_amount(amount),
        }
    }

    fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{rounded:.2}").replace('.', ",");
        format!("{} {}", self.symbol, digits)
    }
}
