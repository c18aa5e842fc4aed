//! Cleanup and decoding of raw model output

use ui_codegen::UiDsl;

use crate::error::ParseError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Remove every markdown code fence marker and surrounding whitespace
pub fn strip_code_fences(content: &str) -> String {
    content
        .replace(JSON_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Sanitize model output and decode it into a DSL
///
/// The output must be JSON with a `components` array; anything else is
/// rejected before the typed decode.
pub fn decode_dsl(content: &str) -> Result<UiDsl, ParseError> {
    let cleaned = strip_code_fences(content);
    let value: serde_json::Value =
        serde_json::from_str(&cleaned).map_err(ParseError::MalformedJson)?;

    if !value
        .get("components")
        .is_some_and(serde_json::Value::is_array)
    {
        return Err(ParseError::InvalidShape(
            "missing `components` array".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ParseError::InvalidShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ui_codegen::Layout;

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"components\":[]}\n```\n";
        assert_eq!(strip_code_fences(raw), "{\"components\":[]}");
    }

    #[test]
    fn test_strip_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }

    #[test]
    fn test_decode_fenced_dsl() {
        let raw = r#"```json
{ "page": { "title": "登录", "layout": "grid" },
  "components": [{ "component": "d-card", "children": [{ "component": "d-button" }] }] }
```"#;
        let dsl = decode_dsl(raw).unwrap();
        assert_eq!(dsl.page.title, "登录");
        assert_eq!(dsl.page.layout, Layout::Grid);
        assert_eq!(dsl.components[0].component, "d-card");
        assert_eq!(dsl.components[0].children.len(), 1);
    }

    #[test]
    fn test_decode_not_json() {
        let result = decode_dsl("Sure! Here is your page.");
        assert!(matches!(result, Err(ParseError::MalformedJson(_))));
    }

    #[test]
    fn test_decode_missing_components() {
        let result = decode_dsl(r#"{"page":{"title":"x"}}"#);
        assert!(matches!(result, Err(ParseError::InvalidShape(_))));
    }

    #[test]
    fn test_decode_components_not_array() {
        let result = decode_dsl(r#"{"components":{"component":"d-card"}}"#);
        assert!(matches!(result, Err(ParseError::InvalidShape(_))));

        let result = decode_dsl(r#"[{"component":"d-card"}]"#);
        assert!(matches!(result, Err(ParseError::InvalidShape(_))));
    }

    #[test]
    fn test_decode_bad_node_shape() {
        let result = decode_dsl(r#"{"components":["d-card"]}"#);
        assert!(matches!(result, Err(ParseError::InvalidShape(_))));
    }

    #[test]
    fn test_decode_tolerates_loose_model_output() {
        let dsl = decode_dsl(
            r#"{"page":{"title":null,"layout":"grid"},"components":[{"component":"d-card"}]}"#,
        )
        .unwrap();
        assert_eq!(dsl.page.title, "");
        assert_eq!(dsl.page.layout, Layout::Grid);

        let dsl = decode_dsl(r#"{"page":null,"components":[{"component":"d-card"}]}"#).unwrap();
        assert_eq!(dsl.page.layout, Layout::Default);

        let dsl =
            decode_dsl(r#"{"components":[{"component":"d-card","children":null}]}"#).unwrap();
        assert!(dsl.components[0].children.is_empty());

        let dsl = decode_dsl(
            r#"{"page":{"layout":"grid"},"components":[
                {"component":"d-col","span":"8"},
                {"component":"d-col","span":16.0}]}"#,
        )
        .unwrap();
        assert_eq!(dsl.components[0].span, Some(8));
        assert_eq!(dsl.components[1].span, Some(16));

        let dsl =
            decode_dsl(r#"{"components":[{"component":"d-card","children":[true]}]}"#).unwrap();
        assert_eq!(dsl.components[0].children.len(), 1);
    }
}
