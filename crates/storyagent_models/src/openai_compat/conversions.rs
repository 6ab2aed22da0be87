//! Type conversions between StoryAgent and OpenAI formats.

use super::dto::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse};
use storyagent_core::{GenerateRequest, GenerateResponse, Role, TokenUsage};
use storyagent_error::{GatewayError, GatewayErrorKind};

/// Sampling defaults applied when the request leaves them unset.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SamplingDefaults {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Converts a GenerateRequest to OpenAI chat format.
pub(crate) fn to_chat_request(
    req: &GenerateRequest,
    default_model: &str,
    defaults: SamplingDefaults,
) -> Result<ChatRequest, GatewayError> {
    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| {
            let role = match msg.role() {
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::System => "system",
            };
            ChatMessage {
                role: role.to_string(),
                content: Some(msg.content().clone()),
            }
        })
        .collect();

    if messages.is_empty() {
        return Err(GatewayError::new(GatewayErrorKind::Request(
            "Request contains no messages".to_string(),
        )));
    }

    let model = req.model().as_deref().unwrap_or(default_model);

    let mut builder = ChatRequest::builder();
    builder.model(model.to_string()).messages(messages);

    if let Some(max_tokens) = req.max_tokens().or(defaults.max_tokens) {
        builder.max_tokens(max_tokens);
    }

    if let Some(temperature) = req.temperature().or(defaults.temperature) {
        builder.temperature(temperature);
    }

    builder.build().map_err(|e| {
        GatewayError::new(GatewayErrorKind::Request(format!(
            "Failed to build request: {}",
            e
        )))
    })
}

/// Converts an OpenAI chat response to a GenerateResponse.
pub(crate) fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, GatewayError> {
    let choice = response.choices.first().ok_or_else(|| {
        GatewayError::new(GatewayErrorKind::ResponseParsing(
            "No choices in response".to_string(),
        ))
    })?;

    let text = choice.message.content.clone().unwrap_or_default();

    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(input), Some(output), Some(total)) => Some(TokenUsage::new(input, output, total)),
            _ => None,
        }
    });

    Ok(GenerateResponse::new(
        text,
        choice.finish_reason.clone(),
        usage,
    ))
}

/// Maps a non-success HTTP status and body to a gateway error kind.
pub(crate) fn classify_status(status: u16, body: &str) -> GatewayErrorKind {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 | 403 => GatewayErrorKind::Unauthorized(message),
        429 => GatewayErrorKind::RateLimited(message),
        _ => GatewayErrorKind::Api { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyagent_core::Message;

    #[test]
    fn request_uses_default_model_and_sampling() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("Once upon a time")])
            .build()
            .unwrap();

        let chat = to_chat_request(
            &req,
            "deepseek-chat",
            SamplingDefaults {
                temperature: Some(0.0),
                max_tokens: None,
            },
        )
        .unwrap();

        assert_eq!(chat.model(), "deepseek-chat");
        assert_eq!(*chat.temperature(), Some(0.0));
        assert!(chat.max_tokens().is_none());
        assert_eq!(chat.messages()[0].role, "user");

        let json = serde_json::to_value(&chat).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn request_model_overrides_default() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .model("deepseek-reasoner".to_string())
            .temperature(0.7f32)
            .build()
            .unwrap();

        let chat = to_chat_request(&req, "deepseek-chat", SamplingDefaults::default()).unwrap();
        assert_eq!(chat.model(), "deepseek-reasoner");
        assert_eq!(*chat.temperature(), Some(0.7));
    }

    #[test]
    fn empty_request_is_rejected() {
        let req = GenerateRequest::default();
        let err = to_chat_request(&req, "deepseek-chat", SamplingDefaults::default()).unwrap_err();
        assert!(matches!(err.kind, GatewayErrorKind::Request(_)));
    }

    #[test]
    fn response_text_and_usage_are_extracted() {
        let body = r#"{
            "id": "abc",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "<speak>Hello</speak>"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let generated = from_chat_response(&response).unwrap();

        assert_eq!(generated.text(), "<speak>Hello</speak>");
        assert_eq!(generated.finish_reason().as_deref(), Some("stop"));
        assert_eq!(generated.usage().map(|u| *u.total_tokens()), Some(14));
    }

    #[test]
    fn null_content_becomes_empty_text() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let generated = from_chat_response(&response).unwrap();
        assert!(generated.text().is_empty());
    }

    #[test]
    fn missing_choices_is_a_parsing_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = from_chat_response(&response).unwrap_err();
        assert!(matches!(err.kind, GatewayErrorKind::ResponseParsing(_)));
    }

    #[test]
    fn statuses_map_to_kinds() {
        let body = r#"{"error": {"message": "Authentication Fails", "type": "authentication_error"}}"#;
        assert_eq!(
            classify_status(401, body),
            GatewayErrorKind::Unauthorized("Authentication Fails".to_string())
        );
        assert!(matches!(
            classify_status(429, "slow down"),
            GatewayErrorKind::RateLimited(m) if m == "slow down"
        ));
        let server = classify_status(503, "busy");
        assert!(matches!(server, GatewayErrorKind::Api { status: 503, .. }));
        assert!(server.is_retryable());
        assert!(!classify_status(400, "bad").is_retryable());
    }
}
