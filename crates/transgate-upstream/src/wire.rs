//! Upstream chat-completion wire types.
//!
//! Only the fields the gateway needs are modelled. Everything else in the
//! provider's response is ignored.

use serde::{Deserialize, Serialize};
use transgate_core::{ChatMessage, ProviderConfig, TranslationError};

/// Request body: `{ "model": ..., "messages": [system, user] }`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionPayload<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage; 2],
}

impl<'a> ChatCompletionPayload<'a> {
    /// Build the translation payload for `provider`.
    pub fn for_translation(provider: &'a ProviderConfig, text: &str) -> Self {
        Self {
            model: &provider.model_name,
            messages: ChatMessage::translation_pair(provider, text),
        }
    }
}

/// Response body: `{ "choices": [ { "message": { "content": ... } } ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Parse a 2xx body and pull out `choices[0].message.content`.
///
/// Malformed JSON is a parse error; an empty `choices` array is
/// [`TranslationError::EmptyResult`]. A null content is an empty string.
pub fn extract_translation(body: &str) -> Result<String, TranslationError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| TranslationError::ResponseParse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or(TranslationError::EmptyResult)
}
