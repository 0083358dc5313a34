use std::fmt;

use jobdesk_core::{ElementId, PendingReversion, RequestId};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "response is not json"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Result of one action request.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Body decoded to JSON `true`.
    Confirmed,
    /// Body decoded to some other JSON value; the server said no.
    Declined(Value),
    /// The request never produced a usable answer.
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn from_response(response: Result<Value, DispatchError>) -> Self {
        match response {
            Ok(Value::Bool(true)) => DispatchOutcome::Confirmed,
            Ok(other) => DispatchOutcome::Declined(other),
            Err(err) => DispatchOutcome::Failed(err),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, DispatchOutcome::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ActionFinished {
        request_id: RequestId,
        outcome: DispatchOutcome,
    },
    ReversionDue(PendingReversion),
    PreviewRead {
        target: ElementId,
        data_url: String,
    },
    FormSubmitted {
        form: ElementId,
    },
}
