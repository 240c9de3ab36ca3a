use chat_widget_model::{ErrorKind, ModelReply};
use serde::{Deserialize, Serialize};

use crate::{Error, GeminiConfig};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct GenerateContentResponse {
    /// Entries may be `null`, which counts as no candidate.
    pub candidates: Option<Vec<Option<Candidate>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Describes a model served by the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-3-flash-preview`.
    pub name: String,
    /// Human readable name.
    pub display_name: Option<String>,
    /// Methods like `generateContent` that the model supports.
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

// ----------------------------------
// Types shared by both the directions
// ----------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    message: &str,
    config: &GeminiConfig,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(config.render_prompt(message)),
            }],
            role: None,
        }],
    }
}

/// Pulls the reply out of `candidates[0].content.parts[0].text`.
pub fn extract_reply(
    resp: GenerateContentResponse,
) -> Result<ModelReply, Error> {
    let Some(content) = resp
        .candidates
        .and_then(|candidates| candidates.into_iter().next().flatten())
        .and_then(|candidate| candidate.content)
    else {
        return Err(Error::new(
            "response has no candidate content",
            ErrorKind::MissingCandidate,
        ));
    };

    // A candidate without a text part is a malformed response rather than
    // an empty one.
    let Some(text) = content.parts.into_iter().next().and_then(|p| p.text)
    else {
        return Err(Error::new(
            "candidate content has no text part",
            ErrorKind::Decode,
        ));
    };
    Ok(ModelReply::new(text))
}
