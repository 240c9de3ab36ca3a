use std::fmt::{self, Debug, Formatter};

/// A request to be sent to the model provider.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The user message, already trimmed.
    pub message: String,
    /// The credential the user supplied for this send.
    pub credential: String,
}

impl ModelRequest {
    /// Creates a request for `message` authorized by `credential`.
    #[inline]
    pub fn new<M: Into<String>, C: Into<String>>(
        message: M,
        credential: C,
    ) -> Self {
        Self {
            message: message.into(),
            credential: credential.into(),
        }
    }
}

impl Debug for ModelRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRequest")
            .field("message", &self.message)
            .field("credential", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_credential() {
        let req = ModelRequest::new("Hello", "secret-key");
        let output = format!("{req:?}");
        assert!(output.contains("Hello"));
        assert!(!output.contains("secret-key"));
    }
}
