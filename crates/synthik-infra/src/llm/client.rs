//! OpenAI-compatible completion client implementation.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};

use synthik_core::llm::client::{CompletionClient, CompletionStream};
use synthik_types::llm::{CompletionError, CompletionRequest, Role};

use super::streaming::map_chat_stream;

/// Unified client for any OpenAI-compatible completion API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatClient {
    client: Client<OpenAIConfig>,
    name: String,
}

impl OpenAiCompatClient {
    /// Create a new client for the given base URL and API key.
    pub fn new(name: impl Into<String>, base_url: &str, api_key: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
            name: name.into(),
        }
    }

    /// Create a client for Ollama's OpenAI-compatible endpoint.
    ///
    /// Ollama ignores the API key; `"ollama"` is the conventional placeholder.
    pub fn ollama(base_url: &str) -> Self {
        Self::new("ollama", base_url, "ollama")
    }
}

/// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
fn build_request(
    request: &CompletionRequest,
) -> Result<CreateChatCompletionRequest, CompletionError> {
    if request.model.is_empty() {
        return Err(CompletionError::InvalidRequest(
            "model name is empty".to_string(),
        ));
    }

    let mut messages: Vec<ChatCompletionRequestMessage> =
        Vec::with_capacity(request.turns.len() + 1);

    // System message first
    if let Some(ref system) = request.system {
        messages.push(ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                name: None,
            },
        ));
    }

    // Conversation turns
    for turn in &request.turns {
        let message = match turn.role {
            Role::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(turn.content.clone()),
                name: None,
            }),
            Role::Assistant => {
                #[allow(deprecated)]
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                        turn.content.clone(),
                    )),
                    refusal: None,
                    name: None,
                    audio: None,
                    tool_calls: None,
                    function_call: None,
                })
            }
        };
        messages.push(message);
    }

    Ok(CreateChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_completion_tokens: Some(request.max_tokens),
        temperature: request.temperature,
        stream: Some(true),
        ..Default::default()
    })
}

impl CompletionClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, CompletionError> {
        let oai_request = build_request(&request)?;

        // create_stream performs the connection, so a dead endpoint fails
        // here rather than inside the returned stream.
        let stream = self
            .client
            .chat()
            .create_stream(oai_request)
            .await
            .map_err(map_openai_error)?;

        Ok(map_chat_stream(stream))
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`CompletionError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> CompletionError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.is_connect() || reqwest_err.is_timeout() {
                CompletionError::Unreachable(err.to_string())
            } else if let Some(status) = reqwest_err.status() {
                CompletionError::Rejected(format!("endpoint returned {status}"))
            } else {
                // No status means the request never completed
                CompletionError::Unreachable(err.to_string())
            }
        }
        OpenAIError::ApiError(api_err) => CompletionError::Rejected(api_err.message.clone()),
        OpenAIError::JSONDeserialize(_, content) => {
            CompletionError::Stream(format!("failed to parse response: {content}"))
        }
        OpenAIError::StreamError(stream_err) => CompletionError::Stream(stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => CompletionError::InvalidRequest(msg.clone()),
        _ => CompletionError::Stream(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthik_types::llm::Turn;

    fn make_request() -> CompletionRequest {
        CompletionRequest {
            model: "llama3.1:8b".to_string(),
            turns: vec![
                Turn {
                    role: Role::User,
                    content: "Hello".to_string(),
                },
                Turn {
                    role: Role::Assistant,
                    content: "Hi there!".to_string(),
                },
                Turn {
                    role: Role::User,
                    content: "Explain lifetimes".to_string(),
                },
            ],
            system: Some("Be helpful".to_string()),
            temperature: Some(0.7),
            max_tokens: 2000,
        }
    }

    #[test]
    fn test_ollama_factory() {
        let client = OpenAiCompatClient::ollama("http://localhost:11434/v1");
        assert_eq!(client.name(), "ollama");
    }

    #[test]
    fn test_build_request_messages() {
        let oai_req = build_request(&make_request()).unwrap();

        assert_eq!(oai_req.model, "llama3.1:8b");
        // 1 system + 3 conversation = 4 messages
        assert_eq!(oai_req.messages.len(), 4);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_req.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            oai_req.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert_eq!(oai_req.max_completion_tokens, Some(2000));
        assert_eq!(oai_req.temperature, Some(0.7));
        assert_eq!(oai_req.stream, Some(true));
    }

    #[test]
    fn test_build_request_without_system() {
        let mut request = make_request();
        request.system = None;

        let oai_req = build_request(&request).unwrap();
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::User(_)
        ));
    }

    #[test]
    fn test_build_request_empty_model_rejected() {
        let mut request = make_request();
        request.model = String::new();

        let err = build_request(&request).unwrap_err();
        assert!(matches!(err, CompletionError::InvalidRequest(_)));
    }

    #[test]
    fn test_map_openai_error_api_error() {
        use async_openai::error::{ApiError, OpenAIError};

        let api_err = ApiError {
            message: "model 'missing:7b' not found".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, CompletionError::Rejected(_)));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;

        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, CompletionError::InvalidRequest(_)));
    }

    #[test]
    fn test_map_openai_error_stream_error() {
        use async_openai::error::{OpenAIError, StreamError};

        let err = map_openai_error(OpenAIError::StreamError(Box::new(
            StreamError::EventStream("connection reset".to_string()),
        )));
        assert!(matches!(err, CompletionError::Stream(_)));
    }
}
