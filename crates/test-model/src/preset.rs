use chat_widget_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// The preset outcome of one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetResponse {
    /// The request succeeds with this text.
    #[serde(rename = "reply")]
    Reply(String),
    /// The request fails with an error of this kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

impl PresetResponse {
    /// Creates a successful preset.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(text.into())
    }

    /// Creates a failing preset.
    #[inline]
    pub fn failure(kind: ErrorKind) -> Self {
        Self::Failure(kind)
    }
}
