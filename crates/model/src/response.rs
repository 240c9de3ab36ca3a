use serde::{Deserialize, Serialize};

/// A complete reply from the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelReply {
    /// The reply text, exactly as the provider returned it.
    pub text: String,
}

impl ModelReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}
