//! Failures the controller turns into transcript entries.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

use chat_widget_model::{ErrorKind as ModelErrorKind, ModelProviderError};

/// Shown when the remote call failed for any reason other than a missing
/// candidate.
pub const CONNECTION_ERROR_TEXT: &str = "Sorry, there was an error connecting to the Gemini API. Please check your API key and try again.";

/// Shown when the remote call succeeded but carried no usable content.
pub const NO_RESPONSE_TEXT: &str =
    "Sorry, I couldn't generate a response. Please try again.";

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input was empty after trimming.
    EmptyInput,
    /// The remote call failed in transport, status or decoding.
    RemoteCall,
    /// The remote call returned no usable candidate.
    MissingCandidate,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::EmptyInput => write!(f, "Empty input"),
            ErrorKind::RemoteCall => write!(f, "Remote call failed"),
            ErrorKind::MissingCandidate => write!(f, "Missing candidate"),
        }
    }
}

/// Describes why a submission didn't produce a regular reply.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    /// Creates a new error with the `EmptyInput` kind.
    #[inline]
    pub fn empty_input() -> Self {
        Self {
            kind: ErrorKind::EmptyInput,
            reason: None,
        }
    }

    /// Creates a new error with the `RemoteCall` kind.
    #[inline]
    pub fn remote_call() -> Self {
        Self {
            kind: ErrorKind::RemoteCall,
            reason: None,
        }
    }

    /// Creates a new error with the `MissingCandidate` kind.
    #[inline]
    pub fn missing_candidate() -> Self {
        Self {
            kind: ErrorKind::MissingCandidate,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }

    /// Returns the assistant message that stands in for the reply, or
    /// `None` if the error doesn't produce one.
    #[inline]
    pub fn fallback_text(&self) -> Option<&'static str> {
        match self.kind {
            ErrorKind::EmptyInput => None,
            ErrorKind::RemoteCall => Some(CONNECTION_ERROR_TEXT),
            ErrorKind::MissingCandidate => Some(NO_RESPONSE_TEXT),
        }
    }

    pub(crate) fn from_provider(err: &dyn ModelProviderError) -> Self {
        let error = match err.kind() {
            ModelErrorKind::MissingCandidate => Self::missing_candidate(),
            ModelErrorKind::Transport
            | ModelErrorKind::Status
            | ModelErrorKind::Decode => Self::remote_call(),
        };
        error.with_reason(err.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {}
