//! Closed vocabularies for the gateway's string-coded fields. The classifier
//! matches on these; raw strings never reach the engine.

use std::fmt;

/// `return_code`: whether the gateway call itself went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommStatus {
    Success,
    Fail,
}

impl From<&str> for CommStatus {
    fn from(s: &str) -> Self {
        match s {
            "SUCCESS" => Self::Success,
            _ => Self::Fail,
        }
    }
}

/// `result_code`: the gateway's verdict on the business operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BizResult {
    Success,
    Fail,
}

impl From<&str> for BizResult {
    fn from(s: &str) -> Self {
        match s {
            "SUCCESS" => Self::Success,
            _ => Self::Fail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeState {
    Completed,
    AwaitingUser,
    Other(String),
}

impl TradeState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "SUCCESS",
            Self::AwaitingUser => "USERPAYING",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for TradeState {
    fn from(s: &str) -> Self {
        match s {
            "SUCCESS" => Self::Completed,
            "USERPAYING" => Self::AwaitingUser,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TradeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `err_code`: only the codes the reconciliation protocol branches on are
/// named, everything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    AwaitingConfirmation,
    SystemError,
    OrderNotExist,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AwaitingConfirmation => "USERPAYING",
            Self::SystemError => "SYSTEMERROR",
            Self::OrderNotExist => "ORDERNOTEXIST",
            Self::Other(s) => s,
        }
    }

    /// Codes after which a submission may still complete.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation | Self::SystemError)
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        match s {
            "USERPAYING" => Self::AwaitingConfirmation,
            "SYSTEMERROR" => Self::SystemError,
            "ORDERNOTEXIST" => Self::OrderNotExist,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `recall`: gateway instruction to reissue a reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallFlag {
    Yes,
    No,
    Other(String),
}

impl From<&str> for RecallFlag {
    fn from(s: &str) -> Self {
        match s {
            "Y" => Self::Yes,
            "N" => Self::No,
            other => Self::Other(other.to_string()),
        }
    }
}
