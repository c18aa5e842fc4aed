//! Parser-wide constants
//!
//! Single source of truth for settings keys, request defaults and the
//! user-facing status strings.

/// Keys read from the durable settings store
pub mod settings_keys {
    /// Bearer token for the chat-completion endpoint
    pub const API_KEY: &str = "nl2ui_api_key";
    /// Endpoint base URL (`/chat/completions` is appended)
    pub const BASE_URL: &str = "nl2ui_base_url";
    /// Model identifier
    pub const MODEL: &str = "nl2ui_model";

    /// All keys, in display order
    pub const ALL: &[&str] = &[API_KEY, BASE_URL, MODEL];
}

/// Default values for model requests
pub mod defaults {
    /// Base URL used when none is configured
    pub const BASE_URL: &str = "https://api.openai.com/v1";
    /// Model used when none is configured
    pub const MODEL: &str = "gpt-3.5-turbo";
    /// Low temperature keeps the output format stable
    pub const TEMPERATURE: f32 = 0.2;
    /// Simulated latency of the keyword fallback
    pub const MOCK_DELAY_MS: u64 = 1000;
    /// Path appended to the base URL
    pub const COMPLETIONS_PATH: &str = "/chat/completions";
    /// Settings file name under the per-user config directory
    pub const SETTINGS_DIR: &str = "nl2ui";
    pub const SETTINGS_FILE: &str = "settings.json";
}

/// Keyword fallback data
pub mod mock {
    /// Keyword that triggers the canned form page
    pub const TRIGGER: &str = "表单";
    pub const PAGE_TITLE: &str = "Mock 表单";
    pub const BUTTON_TEXT: &str = "Mock 按钮";
}

/// Status strings returned to the caller
pub mod messages {
    /// Label prefixed to the user's request in the chat prompt
    pub const USER_PREFIX: &str = "用户需求: ";
    /// Title used when the generated page has none
    pub const UNTITLED: &str = "未命名页面";
    /// No API key, keyword matched
    pub const MOCK_FORM: &str = "检测到未配置 Key，已展示 Mock 表单数据。请点击右上角配置 AI。";
    /// No API key, no keyword
    pub const NOT_CONFIGURED: &str = "未配置 AI Key，且未命中 Mock 关键词。请配置 Key 后重试。";
    /// A call was made while another is still in flight
    pub const BUSY: &str = "正在生成中，请等待当前请求完成后再试。";

    /// Success status for a generated page
    pub fn generated(title: &str) -> String {
        format!("已为您生成界面：{}", title)
    }

    /// Failure status carrying the error message
    pub fn failed(reason: &str) -> String {
        format!("生成失败: {}。请检查 API Key 或 Prompt。", reason)
    }
}
