use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Seed message shown on a fresh transcript.
pub const GREETING: &str =
    "Hello! I can help you with stock information. Try asking about a stock price or analysis.";

/// Canned prompts offered on the dashboard.
pub const QUICK_QUESTIONS: [&str; 3] = [
    "What's the price of Apple stock?",
    "Compare Microsoft and Google stocks",
    "What are the top gainers today?",
];

const RATE_LIMITED_MSG: &str = "Rate limit exceeded. Please try again in a few moments.";
const SERVER_FAULT_MSG: &str = "Server error. Our AI service is currently experiencing issues.";
const UNREACHABLE_MSG: &str =
    "Could not connect to AI service. Please check your internet connection or try again later.";
const GENERIC_MSG: &str = "Sorry, I encountered an error processing your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub is_error: bool,
}

impl ChatMessage {
    fn user(content: String) -> Self {
        Self { role: ChatRole::User, content, is_error: false }
    }

    fn assistant(content: String) -> Self {
        Self { role: ChatRole::Assistant, content, is_error: false }
    }

    fn error(content: String) -> Self {
        Self { role: ChatRole::Assistant, content, is_error: true }
    }
}

/// How a chat request failed. Every variant maps to a fixed transcript
/// message via [`ChatError::user_message`]; none of them propagate past the
/// submission that produced them.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("rate limited by the AI service")]
    RateLimited,
    #[error("AI service error (HTTP {0})")]
    ServerFault(u16),
    #[error("no response from the AI service: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("response body missing the answer field")]
    ProtocolViolation,
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl ChatError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ChatError::RateLimited => RATE_LIMITED_MSG,
            ChatError::ServerFault(_) => SERVER_FAULT_MSG,
            ChatError::Unreachable(_) => UNREACHABLE_MSG,
            ChatError::ProtocolViolation | ChatError::Unknown(_) => GENERIC_MSG,
        }
    }
}

fn classify_status(status: StatusCode) -> ChatError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ChatError::RateLimited
    } else if status.is_server_error() {
        ChatError::ServerFault(status.as_u16())
    } else {
        ChatError::Unknown(format!("HTTP {status}"))
    }
}

fn classify_transport(err: reqwest::Error) -> ChatError {
    if err.is_builder() {
        ChatError::Unknown(err.to_string())
    } else {
        // Connect, timeout, and mid-request failures all mean the same thing
        // to the user: no answer arrived.
        ChatError::Unreachable(err)
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    response: String,
}

/// HTTP client for the remote inference endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    /// `timeout` is optional on purpose: with `None` a stalled connection
    /// hangs the in-flight request indefinitely, matching the endpoint's
    /// historical behavior.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoint: endpoint.to_string(),
        }
    }

    /// Send one query and return the assistant's reply text. Single attempt,
    /// no retry.
    pub async fn query(&self, query: &str) -> Result<String, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body: QueryResponse =
            response.json().await.map_err(|_| ChatError::ProtocolViolation)?;
        if body.response.trim().is_empty() {
            return Err(ChatError::ProtocolViolation);
        }
        Ok(body.response)
    }
}

/// The chat view's transcript plus the single-flight gate.
///
/// `begin` appends the user message optimistically (it is never retracted,
/// even when the request later fails) and closes the gate; `settle` appends
/// the outcome and reopens it. The caller dispatches the network call only
/// when `begin` returns a query.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    awaiting: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING.to_string())],
            awaiting: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a request is outstanding; input stays disabled.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Accept a submission. Returns the trimmed query to dispatch, or `None`
    /// when the input is blank or a request is already in flight.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let query = input.trim();
        if query.is_empty() || self.awaiting {
            return None;
        }
        self.messages.push(ChatMessage::user(query.to_string()));
        self.awaiting = true;
        Some(query.to_string())
    }

    /// Record the outcome of the in-flight request and reopen the gate.
    pub fn settle(&mut self, result: Result<String, ChatError>) {
        match result {
            Ok(text) => self.messages.push(ChatMessage::assistant(text)),
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                self.messages.push(ChatMessage::error(err.user_message().to_string()));
            }
        }
        self.awaiting = false;
    }

    /// Discard the transcript (the view navigated away) and reseed the
    /// greeting. Any in-flight task keeps running detached; its result has
    /// nowhere to land.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::assistant(GREETING.to_string()));
        self.awaiting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn begin_appends_exactly_one_user_entry() {
        let mut session = ChatSession::new();
        let before = session.messages().len();
        let query = session.begin("  What's AAPL at?  ");
        assert_eq!(query.as_deref(), Some("What's AAPL at?"));
        assert_eq!(session.messages().len(), before + 1);
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "What's AAPL at?");
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let mut session = ChatSession::new();
        let before = session.messages().len();
        assert!(session.begin("").is_none());
        assert!(session.begin("   \t  ").is_none());
        assert_eq!(session.messages().len(), before);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn gate_blocks_second_submission_until_settled() {
        let mut session = ChatSession::new();
        assert!(session.begin("first").is_some());
        assert!(session.is_awaiting());
        assert!(session.begin("second").is_none());

        session.settle(Ok("answer".to_string()));
        assert!(!session.is_awaiting());
        assert!(session.begin("third").is_some());
    }

    #[test]
    fn gate_reopens_after_failure() {
        let mut session = ChatSession::new();
        assert!(session.begin("first").is_some());
        session.settle(Err(ChatError::RateLimited));
        assert!(!session.is_awaiting());
        assert!(session.begin("second").is_some());
    }

    #[test]
    fn user_entry_survives_failure() {
        let mut session = ChatSession::new();
        session.begin("doomed question");
        session.settle(Err(ChatError::ProtocolViolation));
        let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
        assert_eq!(session.messages()[1].content, "doomed question");
    }

    #[test]
    fn settlement_messages_match_taxonomy() {
        for (err, expected) in [
            (ChatError::RateLimited, RATE_LIMITED_MSG),
            (ChatError::ServerFault(500), SERVER_FAULT_MSG),
            (ChatError::ProtocolViolation, GENERIC_MSG),
            (ChatError::Unknown("HTTP 404".to_string()), GENERIC_MSG),
        ] {
            let mut session = ChatSession::new();
            session.begin("q");
            session.settle(Err(err));
            let last = session.messages().last().unwrap();
            assert_eq!(last.role, ChatRole::Assistant);
            assert!(last.is_error);
            assert_eq!(last.content, expected);
        }
    }

    #[test]
    fn success_appends_plain_assistant_entry() {
        let mut session = ChatSession::new();
        session.begin("q");
        session.settle(Ok("X".to_string()));
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, "X");
        assert!(!last.is_error);
    }

    #[test]
    fn reset_reseeds_greeting() {
        let mut session = ChatSession::new();
        session.begin("q");
        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn status_classification() {
        assert!(matches!(classify_status(StatusCode::TOO_MANY_REQUESTS), ChatError::RateLimited));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            ChatError::ServerFault(500)
        ));
        assert!(matches!(classify_status(StatusCode::BAD_GATEWAY), ChatError::ServerFault(502)));
        assert!(matches!(classify_status(StatusCode::NOT_FOUND), ChatError::Unknown(_)));
    }

    // Minimal one-shot HTTP stub so the client is exercised over a real
    // socket without pulling in a server framework.
    async fn spawn_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&chunk[..n]);
                        if request_complete(&buf) {
                            break;
                        }
                    }
                }
            }
            let reply = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..pos]);
        let content_length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= pos + 4 + content_length
    }

    #[tokio::test]
    async fn query_returns_response_field() {
        let endpoint = spawn_stub("200 OK", r#"{"response":"AAPL is up today."}"#).await;
        let client = ChatClient::new(&endpoint, None);
        let reply = client.query("How is AAPL doing?").await.unwrap();
        assert_eq!(reply, "AAPL is up today.");
    }

    #[tokio::test]
    async fn query_maps_429_to_rate_limited() {
        let endpoint = spawn_stub("429 Too Many Requests", "{}").await;
        let client = ChatClient::new(&endpoint, None);
        let err = client.query("q").await.unwrap_err();
        assert!(matches!(err, ChatError::RateLimited));
    }

    #[tokio::test]
    async fn query_maps_5xx_to_server_fault() {
        let endpoint = spawn_stub("500 Internal Server Error", "{}").await;
        let client = ChatClient::new(&endpoint, None);
        let err = client.query("q").await.unwrap_err();
        assert!(matches!(err, ChatError::ServerFault(500)));
    }

    #[tokio::test]
    async fn malformed_success_body_is_protocol_violation() {
        let endpoint = spawn_stub("200 OK", r#"{"answer":"wrong shape"}"#).await;
        let client = ChatClient::new(&endpoint, None);
        let err = client.query("q").await.unwrap_err();
        assert!(matches!(err, ChatError::ProtocolViolation));
    }

    #[tokio::test]
    async fn empty_response_field_is_protocol_violation() {
        let endpoint = spawn_stub("200 OK", r#"{"response":"  "}"#).await;
        let client = ChatClient::new(&endpoint, None);
        let err = client.query("q").await.unwrap_err();
        assert!(matches!(err, ChatError::ProtocolViolation));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Bind then drop so the port is known-dead.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(&format!("http://{addr}"), None);
        let err = client.query("q").await.unwrap_err();
        assert!(matches!(err, ChatError::Unreachable(_)));
        assert_eq!(err.user_message(), UNREACHABLE_MSG);
    }
}
