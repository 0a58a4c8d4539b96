// OpenAI chat-completions implementation of the remote classifier.
//
// The prompt lists every reference code with its description and asks for
// exactly one 4-digit code back. Temperature 0 keeps the selection as
// deterministic as the provider allows. The prompt is built from the same
// `prompt_options()` rendering the local matcher's reference list uses, so
// both paths see an identical table.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RemoteClassifier;
use crate::error::RemoteError;
use crate::reference::ReferenceList;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_INSTRUCTION: &str = "Select the most appropriate 4-digit ISIC code \
     from the provided list that matches the user's business activity \
     description. Respond with only the 4-digit code.";

/// Chat-completions-backed classifier.
pub struct OpenAiClassifier {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClassifier {
    /// Create a classifier with the given API key and the default model.
    ///
    /// Fails with `MissingCredential` on an empty key so the problem is
    /// reported before any row is processed, not per request.
    pub fn new(api_key: String) -> Result<Self, RemoteError> {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Result<Self, RemoteError> {
        if api_key.is_empty() {
            return Err(RemoteError::MissingCredential);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model,
        })
    }

    /// Build the user message for one activity. Deterministic for a given
    /// reference list and input text.
    fn user_message(activity: &str, references: &ReferenceList) -> String {
        format!(
            "Available codes:\n{}\n\nActivity: {}",
            references.prompt_options(),
            activity
        )
    }
}

#[async_trait]
impl RemoteClassifier for OpenAiClassifier {
    async fn pick_code(
        &self,
        activity: &str,
        references: &ReferenceList,
    ) -> Result<String, RemoteError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::user_message(activity, references),
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api { status, body });
        }

        let body = response.bytes().await?;
        let code = decode_response(&body)?;
        debug!(code = %code, "Remote classifier picked a code");
        Ok(code)
    }
}

/// Decode a successful response body into the selected code.
///
/// Invalid JSON and a choice-free response are distinct failures: the
/// first means the provider broke the wire contract, the second that it
/// answered with nothing to extract. The code is trimmed of surrounding
/// whitespace before being returned.
fn decode_response(body: &[u8]) -> Result<String, RemoteError> {
    let response: ChatResponse = serde_json::from_slice(body)?;
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or(RemoteError::EmptyResponse)?;
    Ok(content.trim().to_string())
}

// --- Chat-completions wire types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceEntry;

    #[test]
    fn test_user_message_is_deterministic() {
        let list = ReferenceList::from_entries(vec![
            ReferenceEntry {
                code: "0112".to_string(),
                description: "Raising of cattle".to_string(),
            },
            ReferenceEntry {
                code: "6201".to_string(),
                description: "Custom software development".to_string(),
            },
        ]);
        let msg = OpenAiClassifier::user_message("dairy farm", &list);
        assert_eq!(
            msg,
            "Available codes:\n0112: Raising of cattle\n6201: Custom software development\n\nActivity: dairy farm"
        );
        assert_eq!(msg, OpenAiClassifier::user_message("dairy farm", &list));
    }

    #[test]
    fn test_empty_key_rejected_up_front() {
        let err = OpenAiClassifier::new(String::new()).err().unwrap();
        assert!(matches!(err, RemoteError::MissingCredential));
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        let body = br#"{"choices":[{"message":{"role":"assistant","content":"  0112\n"}}]}"#;
        assert_eq!(decode_response(body).unwrap(), "0112");
    }

    #[test]
    fn test_decode_empty_choices_is_empty_response() {
        let body = br#"{"choices":[]}"#;
        let err = decode_response(body).unwrap_err();
        assert!(matches!(err, RemoteError::EmptyResponse));
    }

    #[test]
    fn test_decode_invalid_json_is_malformed_response() {
        let err = decode_response(b"not json at all").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));

        // Valid JSON with the wrong shape is also a broken wire contract.
        let err = decode_response(br#"{"answer":"0112"}"#).unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));
    }
}
