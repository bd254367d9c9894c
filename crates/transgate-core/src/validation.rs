//! Translation request validation.
//!
//! Runs before any network activity. Checks are ordered and short-circuit:
//! the first failing check is the reported reason.

use thiserror::Error;

use crate::domain::{RequestMode, TranslationRequest};

/// Why a translation request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No text provided for translation")]
    MissingText,

    #[error("Missing required model configuration (modelType)")]
    MissingModelType,

    #[error("Missing required model configuration (systemMsg)")]
    MissingSystemMessage,

    #[error("Missing required model configuration (apiKey, apiUrl, modelName)")]
    MissingProviderFields,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Validate a translation request.
///
/// Registry-mode requests only need text; the registry handles model
/// selection. Inline requests must carry a complete provider description.
pub fn validate(req: &TranslationRequest) -> Result<(), ValidationError> {
    if req.text.trim().is_empty() {
        return Err(ValidationError::MissingText);
    }

    if req.mode() == RequestMode::Registry {
        return Ok(());
    }

    if req.model_type().is_none() {
        return Err(ValidationError::MissingModelType);
    }

    if is_blank(req.system_msg.as_ref()) {
        return Err(ValidationError::MissingSystemMessage);
    }

    if is_blank(req.api_key.as_ref())
        || is_blank(req.api_url.as_ref())
        || is_blank(req.model_name.as_ref())
    {
        return Err(ValidationError::MissingProviderFields);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline() -> TranslationRequest {
        TranslationRequest {
            text: "hello".into(),
            model_type: Some("deepseek".into()),
            api_key: Some("sk".into()),
            api_url: Some("https://api.example.com/v1/chat/completions".into()),
            model_name: Some("deepseek-chat".into()),
            system_msg: Some("Translate.".into()),
        }
    }

    #[test]
    fn test_registry_mode_only_requires_text() {
        assert_eq!(validate(&TranslationRequest::new("hello", None)), Ok(()));
        assert_eq!(
            validate(&TranslationRequest::new("", Some("deepseek"))),
            Err(ValidationError::MissingText)
        );
        assert_eq!(
            validate(&TranslationRequest::new("   \n", None)),
            Err(ValidationError::MissingText)
        );
    }

    #[test]
    fn test_complete_inline_request_passes() {
        assert_eq!(validate(&inline()), Ok(()));
    }

    #[test]
    fn test_inline_rules_in_order() {
        let mut req = inline();
        req.model_type = None;
        req.system_msg = None;
        req.api_key = None;
        assert_eq!(validate(&req), Err(ValidationError::MissingModelType));

        let mut req = inline();
        req.system_msg = Some(String::new());
        req.api_key = None;
        assert_eq!(validate(&req), Err(ValidationError::MissingSystemMessage));

        for field in 0..3 {
            let mut req = inline();
            match field {
                0 => req.api_key = None,
                1 => req.api_url = Some(String::new()),
                _ => req.model_name = None,
            }
            assert_eq!(validate(&req), Err(ValidationError::MissingProviderFields));
        }
    }

    #[test]
    fn test_missing_text_wins_over_inline_rules() {
        let mut req = inline();
        req.text = String::new();
        req.model_type = None;
        assert_eq!(validate(&req), Err(ValidationError::MissingText));
    }
}
