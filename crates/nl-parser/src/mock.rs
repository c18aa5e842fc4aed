//! Keyword fallback used when no API key is configured

use ui_codegen::{ComponentNode, Layout, UiDsl};

use crate::constants::mock;

/// The canned page: one card holding one button
pub fn mock_dsl() -> UiDsl {
    UiDsl::new(
        mock::PAGE_TITLE,
        Layout::Default,
        vec![ComponentNode::new("d-card")
            .with_child(ComponentNode::new("d-button").with_prop("content", mock::BUTTON_TEXT))],
    )
}

/// Return the canned page when `text` contains the trigger keyword
pub fn mock_parse(text: &str) -> Option<UiDsl> {
    text.contains(mock::TRIGGER).then(mock_dsl)
}
