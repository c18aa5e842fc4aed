//! Natural-language to DSL parser
//!
//! `NlParser::generate` turns one request into an owned
//! `GenerationOutcome`. It reads the model settings on every call, falls
//! back to the keyword mock when no API key is configured, and never touches
//! shared state, so concurrent calls are independent. Projecting outcomes
//! into UI state is the job of `ParserSession`.

use std::sync::Arc;
use std::time::Duration;

use ui_codegen::{validate, DslViolation, UiDsl};
use uuid::Uuid;

use crate::client::{ChatClient, HttpChatClient};
use crate::config::{ModelSettings, SettingsStore};
use crate::constants::{defaults, messages};
use crate::error::{ErrorKind, ParseError};
use crate::mock::mock_parse;
use crate::prompt::{user_message, SYSTEM_PROMPT};
use crate::sanitize::decode_dsl;
use crate::types::{ChatEndpoint, ChatMessage, ChatRequest};

/// How strictly a decoded model DSL is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Skip validation
    Off,
    /// Log violations and attach them to the outcome
    #[default]
    Lenient,
    /// Reject any DSL with violations
    Strict,
}

/// Tunables for the parser
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Simulated latency of the keyword fallback
    pub mock_delay: Duration,
    /// Model used when none is configured
    pub default_model: String,
    /// Base URL used when none is configured
    pub default_base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Validation applied to model output
    pub validation: ValidationMode,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            mock_delay: Duration::from_millis(defaults::MOCK_DELAY_MS),
            default_model: defaults::MODEL.to_string(),
            default_base_url: defaults::BASE_URL.to_string(),
            temperature: defaults::TEMPERATURE,
            validation: ValidationMode::default(),
        }
    }
}

/// Where a successful DSL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DslSource {
    /// Produced by the chat model
    Model,
    /// Canned keyword fallback
    Mock,
}

/// Result state of one generation
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStatus {
    /// A new DSL replaces the current one
    Success { dsl: UiDsl, source: DslSource },
    /// Fallback without a keyword match; the current DSL stays as is
    Unchanged,
    /// The request failed; the current DSL stays as is
    Failure { kind: ErrorKind, message: String },
}

/// Owned outcome of one `generate` call
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Identifier used in log lines for this call
    pub request_id: Uuid,
    pub status: GenerationStatus,
    /// Human-readable status line
    pub message: String,
    /// Violations found by lenient validation
    pub violations: Vec<DslViolation>,
}

impl GenerationOutcome {
    fn new(request_id: Uuid, status: GenerationStatus, message: impl Into<String>) -> Self {
        Self {
            request_id,
            status,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn dsl(&self) -> Option<&UiDsl> {
        match &self.status {
            GenerationStatus::Success { dsl, .. } => Some(dsl),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, GenerationStatus::Success { .. })
    }

    /// Error message of a failed call
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            GenerationStatus::Failure { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Turns natural-language requests into UI DSL
pub struct NlParser {
    client: Arc<dyn ChatClient>,
    settings: Arc<dyn SettingsStore>,
    options: ParserOptions,
}

impl NlParser {
    /// Create a parser using the HTTP chat client
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_client(Arc::new(HttpChatClient::new()), settings)
    }

    /// Create a parser with a specific chat client
    pub fn with_client(client: Arc<dyn ChatClient>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            client,
            settings,
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Run one generation
    pub async fn generate(&self, text: &str) -> GenerationOutcome {
        let request_id = Uuid::new_v4();
        let settings = ModelSettings::read(self.settings.as_ref());

        let Some(api_key) = settings.api_key else {
            return self.generate_mock(request_id, text).await;
        };

        let endpoint = ChatEndpoint {
            base_url: settings
                .base_url
                .unwrap_or_else(|| self.options.default_base_url.clone()),
            api_key,
        };
        let model = settings
            .model
            .unwrap_or_else(|| self.options.default_model.clone());

        log::debug!(
            "[{}] Requesting DSL from {} via {} (model {})",
            request_id,
            endpoint.completions_url(),
            self.client.name(),
            model
        );

        match self.request_dsl(request_id, text, &endpoint, model).await {
            Ok((dsl, violations)) => {
                let message = messages::generated(dsl.title_or(messages::UNTITLED));
                log::info!(
                    "[{}] Generated page '{}' with {} top-level components",
                    request_id,
                    dsl.page.title,
                    dsl.components.len()
                );
                GenerationOutcome {
                    violations,
                    ..GenerationOutcome::new(
                        request_id,
                        GenerationStatus::Success {
                            dsl,
                            source: DslSource::Model,
                        },
                        message,
                    )
                }
            }
            Err(e) => {
                log::error!("[{}] DSL generation failed: {}", request_id, e);
                let reason = e.to_string();
                GenerationOutcome::new(
                    request_id,
                    GenerationStatus::Failure {
                        kind: e.kind(),
                        message: reason.clone(),
                    },
                    messages::failed(&reason),
                )
            }
        }
    }

    async fn request_dsl(
        &self,
        request_id: Uuid,
        text: &str,
        endpoint: &ChatEndpoint,
        model: String,
    ) -> Result<(UiDsl, Vec<DslViolation>), ParseError> {
        let request = ChatRequest {
            model,
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_message(text)),
            ],
            temperature: self.options.temperature,
        };

        let content = self.client.complete(endpoint, &request).await?;
        let dsl = decode_dsl(&content)?;

        let violations = match self.options.validation {
            ValidationMode::Off => Vec::new(),
            ValidationMode::Lenient => {
                let violations = validate(&dsl);
                for violation in &violations {
                    log::warn!("[{}] {}", request_id, violation);
                }
                violations
            }
            ValidationMode::Strict => {
                let violations = validate(&dsl);
                if !violations.is_empty() {
                    return Err(ParseError::validation(violations));
                }
                violations
            }
        };

        Ok((dsl, violations))
    }

    async fn generate_mock(&self, request_id: Uuid, text: &str) -> GenerationOutcome {
        tokio::time::sleep(self.options.mock_delay).await;

        match mock_parse(text) {
            Some(dsl) => {
                log::info!("[{}] No API key configured, serving mock page", request_id);
                GenerationOutcome::new(
                    request_id,
                    GenerationStatus::Success {
                        dsl,
                        source: DslSource::Mock,
                    },
                    messages::MOCK_FORM,
                )
            }
            None => {
                log::info!("[{}] No API key configured and no mock keyword", request_id);
                GenerationOutcome::new(request_id, GenerationStatus::Unchanged, messages::NOT_CONFIGURED)
            }
        }
    }
}
