//! Natural-language to UI DSL acquisition
//!
//! This library obtains a UI DSL for a free-form request:
//! - **Model path**: an OpenAI-compatible chat completion, sanitized and
//!   decoded into a `UiDsl`
//! - **Fallback path**: a keyword-triggered canned page used when no API key
//!   is configured
//!
//! Each call produces an owned `GenerationOutcome`; `ParserSession` projects
//! outcomes into the `is_generating` / current DSL / error state a UI binds to.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nl_parser::{FileSettingsStore, NlParser, ParserSession};
//!
//! let settings = FileSettingsStore::load(FileSettingsStore::default_path().unwrap()).await?;
//! let session = ParserSession::new(NlParser::new(Arc::new(settings)));
//!
//! let status = session.parse_command("生成一个用户注册表单").await;
//! println!("{}", status);
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod mock;
pub mod parser;
pub mod prompt;
pub mod sanitize;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use client::{ChatClient, HttpChatClient};
pub use config::{FileSettingsStore, MemorySettingsStore, ModelSettings, SettingsError, SettingsStore};
pub use error::{ErrorKind, ParseError};
pub use mock::{mock_dsl, mock_parse};
pub use parser::{
    DslSource, GenerationOutcome, GenerationStatus, NlParser, ParserOptions, ValidationMode,
};
pub use sanitize::{decode_dsl, strip_code_fences};
pub use session::{ParserSession, SessionState};
pub use types::{ChatEndpoint, ChatMessage, ChatRequest};
