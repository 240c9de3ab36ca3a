use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request could not be delivered, or the response body could not
    /// be read (network, DNS, TLS...).
    Transport,
    /// The provider answered with a non-success status.
    Status,
    /// The response body doesn't have the expected shape.
    Decode,
    /// The response was well-formed but carried no usable candidate.
    MissingCandidate,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::Status => write!(f, "Unsuccessful status"),
            ErrorKind::Decode => write!(f, "Malformed response"),
            ErrorKind::MissingCandidate => write!(f, "Missing candidate"),
        }
    }
}
