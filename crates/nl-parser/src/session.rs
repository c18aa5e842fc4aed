//! Parser session state
//!
//! A session owns the state a UI binds to (`is_generating`, the current DSL
//! and the last error) and updates it from each call's outcome. A failed or
//! keyword-less call never erases the last good DSL. Calls made while one
//! is in flight are rejected rather than racing on the shared state.

use parking_lot::Mutex;
use ui_codegen::{SfcGenerator, UiDsl};

use crate::constants::messages;
use crate::parser::{GenerationOutcome, GenerationStatus, NlParser};

/// Snapshot of a session's observable state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub is_generating: bool,
    pub current_dsl: Option<UiDsl>,
    pub error_message: String,
}

/// Long-lived parser state for one UI session
pub struct ParserSession {
    parser: NlParser,
    state: Mutex<SessionState>,
}

impl ParserSession {
    pub fn new(parser: NlParser) -> Self {
        Self {
            parser,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn parser(&self) -> &NlParser {
        &self.parser
    }

    /// Parse a command and return its status line
    pub async fn parse_command(&self, text: &str) -> String {
        self.run_command(text)
            .await
            .map(|outcome| outcome.message)
            .unwrap_or_else(|| messages::BUSY.to_string())
    }

    /// Parse a command and return the full outcome
    ///
    /// Returns `None` without touching state when another call is in flight.
    /// Dropping the returned future mid-call releases the session again.
    pub async fn run_command(&self, text: &str) -> Option<GenerationOutcome> {
        let generating = GeneratingGuard::acquire(&self.state)?;

        let outcome = self.parser.generate(text).await;

        {
            let mut state = self.state.lock();
            match &outcome.status {
                GenerationStatus::Success { dsl, .. } => state.current_dsl = Some(dsl.clone()),
                GenerationStatus::Unchanged => {}
                GenerationStatus::Failure { message, .. } => {
                    state.error_message = message.clone()
                }
            }
        }
        drop(generating);

        Some(outcome)
    }

    pub fn is_generating(&self) -> bool {
        self.state.lock().is_generating
    }

    pub fn current_dsl(&self) -> Option<UiDsl> {
        self.state.lock().current_dsl.clone()
    }

    pub fn error_message(&self) -> String {
        self.state.lock().error_message.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Compile the current DSL; empty when nothing has been generated yet
    pub fn compile_current(&self, generator: &SfcGenerator) -> String {
        let state = self.state.lock();
        generator.generate(state.current_dsl.as_ref())
    }
}

/// Holds the session's `is_generating` flag for the lifetime of one call
struct GeneratingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl<'a> GeneratingGuard<'a> {
    /// Set the flag and clear the last error, or `None` if a call is in flight
    fn acquire(state: &'a Mutex<SessionState>) -> Option<Self> {
        let mut guarded = state.lock();
        if guarded.is_generating {
            log::warn!("Rejected command while another generation is in flight");
            return None;
        }
        guarded.is_generating = true;
        guarded.error_message.clear();
        Some(Self { state })
    }
}

impl Drop for GeneratingGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().is_generating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::MemorySettingsStore;
    use crate::constants::settings_keys;
    use crate::mock::mock_dsl;
    use crate::parser::tests::{fast_options, StubClient};
    use crate::parser::ParserOptions;

    fn session(settings: Arc<MemorySettingsStore>) -> ParserSession {
        ParserSession::new(NlParser::new(settings).with_options(fast_options()))
    }

    async fn json_completion(server: &mut mockito::ServerGuard, content: &str, status: usize) -> mockito::Mock {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        });
        server
            .mock("POST", "/chat/completions")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_initial_state() {
        let session = session(Arc::new(MemorySettingsStore::new()));
        assert_eq!(session.snapshot(), SessionState::default());
        assert_eq!(session.compile_current(&SfcGenerator::new()), "");
    }

    #[tokio::test]
    async fn test_mock_keyword_sets_dsl() {
        let session = session(Arc::new(MemorySettingsStore::new()));

        let status = session.parse_command("生成一个登录表单").await;
        assert_eq!(status, messages::MOCK_FORM);
        assert!(status.contains("Mock 表单"));
        assert_eq!(session.current_dsl(), Some(mock_dsl()));
        assert!(!session.is_generating());
        assert!(session
            .compile_current(&SfcGenerator::new())
            .contains("<d-button content=\"Mock 按钮\"></d-button>"));
    }

    #[tokio::test]
    async fn test_no_key_no_keyword_leaves_dsl_unset() {
        let session = session(Arc::new(MemorySettingsStore::new()));

        let status = session.parse_command("a sales dashboard").await;
        assert_eq!(status, messages::NOT_CONFIGURED);
        assert_eq!(session.current_dsl(), None);
        assert!(!session.is_generating());
        assert_eq!(session.error_message(), "");
    }

    #[tokio::test]
    async fn test_http_500_keeps_previous_dsl() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let settings = Arc::new(MemorySettingsStore::new());
        let session = session(settings.clone());

        // Seed a good result through the fallback, then configure the endpoint
        session.parse_command("表单").await;
        settings.set(settings_keys::API_KEY, "sk-test");
        settings.set(settings_keys::BASE_URL, server.url());

        let status = session.parse_command("登录页").await;
        assert!(status.contains("500"), "unexpected status: {}", status);
        assert_eq!(session.error_message(), "API Error: 500");
        assert_eq!(session.current_dsl(), Some(mock_dsl()));
        assert!(!session.is_generating());
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let content = "```json\n{\"page\":{\"title\":\"用户注册\",\"layout\":\"default\"},\
                       \"components\":[{\"component\":\"d-form\",\"children\":[\
                       {\"component\":\"d-form-item\",\"props\":{\"label\":\"用户名\",\"required\":true},\
                       \"children\":[{\"component\":\"d-input\"}]}]}]}\n```";
        let mock = json_completion(&mut server, content, 200).await;

        let settings = Arc::new(
            MemorySettingsStore::new()
                .with(settings_keys::API_KEY, "sk-test")
                .with(settings_keys::BASE_URL, server.url()),
        );
        let session = session(settings);

        let status = session.parse_command("用户注册页").await;
        assert_eq!(status, "已为您生成界面：用户注册");
        mock.assert_async().await;

        let dsl = session.current_dsl().unwrap();
        assert_eq!(dsl.components[0].component, "d-form");
        let source = session.compile_current(&SfcGenerator::new());
        assert!(source.contains("<d-form-item label=\"用户名\" :required=\"true\">"));
    }

    #[tokio::test]
    async fn test_error_cleared_on_next_call() {
        let mut server = mockito::Server::new_async().await;
        let _mock = json_completion(&mut server, "not json at all", 200).await;

        let settings = Arc::new(
            MemorySettingsStore::new()
                .with(settings_keys::API_KEY, "sk-test")
                .with(settings_keys::BASE_URL, server.url()),
        );
        let session = session(settings.clone());

        let status = session.parse_command("x").await;
        assert!(status.starts_with("生成失败: "));
        assert!(!session.error_message().is_empty());

        settings.remove(settings_keys::API_KEY);
        session.parse_command("x").await;
        assert_eq!(session.error_message(), "");
    }

    #[tokio::test]
    async fn test_overlapping_call_is_rejected() {
        let parser = NlParser::with_client(
            Arc::new(StubClient::replying("{}")),
            Arc::new(MemorySettingsStore::new()),
        )
        .with_options(ParserOptions {
            mock_delay: Duration::from_millis(50),
            ..fast_options()
        });
        let session = ParserSession::new(parser);

        let (first, second) = tokio::join!(
            session.parse_command("表单"),
            session.parse_command("表单")
        );

        assert_eq!(first, messages::MOCK_FORM);
        assert_eq!(second, messages::BUSY);
        assert!(!session.is_generating());
        assert_eq!(session.current_dsl(), Some(mock_dsl()));
    }

    #[tokio::test]
    async fn test_cancelled_call_releases_session() {
        let options = ParserOptions {
            mock_delay: Duration::from_millis(50),
            ..fast_options()
        };
        let session =
            ParserSession::new(NlParser::new(Arc::new(MemorySettingsStore::new())).with_options(options));

        let cancelled =
            tokio::time::timeout(Duration::from_millis(5), session.parse_command("表单")).await;
        assert!(cancelled.is_err());
        assert!(!session.is_generating());
        assert_eq!(session.current_dsl(), None);

        let status = session.parse_command("表单").await;
        assert_eq!(status, messages::MOCK_FORM);
        assert_eq!(session.current_dsl(), Some(mock_dsl()));
    }
}
