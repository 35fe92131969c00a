use {
    super::error::PayError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Amount in the smallest currency unit. Single currency; zero is not a
/// payable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TotalFee(u64);

impl TotalFee {
    pub fn new(fen: u64) -> Result<Self, PayError> {
        if fen == 0 {
            return Err(PayError::Validation("TotalFee must be positive".into()));
        }
        Ok(Self(fen))
    }

    pub fn fen(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TotalFee {
    type Error = PayError;

    fn try_from(fen: u64) -> Result<Self, Self::Error> {
        Self::new(fen)
    }
}

impl From<TotalFee> for u64 {
    fn from(fee: TotalFee) -> Self {
        fee.0
    }
}

impl fmt::Display for TotalFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
