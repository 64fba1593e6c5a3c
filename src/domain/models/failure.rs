#[cfg(test)]
#[path = "failure_test.rs"]
mod tests;

use thiserror::Error;

/// Every error that crosses the gateway, resource client or conversation
/// client boundary. Stores and sessions catch it; nothing above them sees it
/// as a panic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("Request could not be completed: {message}")]
    Transport { message: String },

    #[error("Server responded with status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Required field '{field}' is missing")]
    ValidationGap { field: String },

    #[error("Response body could not be decoded: {message}")]
    Decode { message: String },
}

impl Failure {
    pub fn transport(message: impl ToString) -> Failure {
        return Failure::Transport {
            message: message.to_string(),
        };
    }

    pub fn server(status: u16, message: impl ToString) -> Failure {
        return Failure::Server {
            status,
            message: message.to_string(),
        };
    }

    pub fn validation_gap(field: &str) -> Failure {
        return Failure::ValidationGap {
            field: field.to_string(),
        };
    }

    pub fn decode(message: impl ToString) -> Failure {
        return Failure::Decode {
            message: message.to_string(),
        };
    }

    pub fn status(&self) -> Option<u16> {
        if let Failure::Server { status, .. } = self {
            return Some(*status);
        }

        return None;
    }

    pub fn is_unauthorized(&self) -> bool {
        return matches!(self.status(), Some(401) | Some(403));
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Failure {
        return Failure::decode(err);
    }
}
