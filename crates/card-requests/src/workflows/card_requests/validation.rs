use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::domain::CardRequestSubmission;

/// Fields every submission must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "phone", "age", "cpf", "income"];

/// Reason a submission was refused at intake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid request body")]
    InvalidBody,
    #[error("field {0} is required")]
    MissingField(&'static str),
    #[error("field {0} has an invalid value")]
    InvalidField(&'static str),
}

/// Presence check over a raw payload. Only the first missing field is reported.
pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(payload: &Map<String, Value>) -> Result<(), ValidationError> {
        match REQUIRED_FIELDS
            .iter()
            .copied()
            .find(|field| !payload.contains_key(*field))
        {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Validate a request body and convert it into a typed submission.
    pub fn parse(body: &Value) -> Result<CardRequestSubmission, ValidationError> {
        let payload = match body {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(ValidationError::InvalidBody),
        };

        Self::validate(payload)?;

        Ok(CardRequestSubmission {
            name: present_value(payload, "name"),
            phone: present_value(payload, "phone"),
            age: present_value(payload, "age"),
            cpf: key_field(payload)?,
            income: income_field(payload)?,
        })
    }
}

fn present_value(payload: &Map<String, Value>, field: &str) -> Value {
    payload.get(field).cloned().unwrap_or(Value::Null)
}

// The cpf names the stored object, so it has to be non-blank text or a number.
fn key_field(payload: &Map<String, Value>) -> Result<String, ValidationError> {
    match payload.get("cpf") {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        _ => Err(ValidationError::InvalidField("cpf")),
    }
}

fn income_field(payload: &Map<String, Value>) -> Result<Decimal, ValidationError> {
    let income = match payload.get("income") {
        Some(Value::Number(number)) => {
            if let Some(value) = number.as_i64() {
                Some(Decimal::from(value))
            } else {
                number.as_f64().and_then(Decimal::from_f64)
            }
        }
        _ => None,
    };

    income
        .filter(|value| !value.is_sign_negative())
        .ok_or(ValidationError::InvalidField("income"))
}
