use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::PayError;

/// Merchant order number (`out_trade_no`). Assigned by the caller, unique per
/// payment attempt, never regenerated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    pub const MAX_LEN: usize = 32;

    pub fn new(id: impl Into<String>) -> Result<Self, PayError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PayError::Validation("OrderId must not be empty".into()));
        }
        if id.len() > Self::MAX_LEN {
            return Err(PayError::Validation(format!(
                "OrderId longer than {} chars: {id}",
                Self::MAX_LEN
            )));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "_-|*@".contains(*c)))
        {
            return Err(PayError::Validation(format!(
                "OrderId contains invalid char {c:?}: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for OrderId {
    type Error = PayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// The code the payer presents at the counter (18 digits).
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthCode(String);

impl AuthCode {
    pub fn new(code: impl Into<String>) -> Result<Self, PayError> {
        let code = code.into();
        if code.len() != 18 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PayError::Validation(format!(
                "AuthCode must be 18 digits, got: {code}"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthCode {
    type Error = PayError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AuthCode> for String {
    fn from(code: AuthCode) -> Self {
        code.0
    }
}
