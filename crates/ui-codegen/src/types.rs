//! Core types for the UI DSL
//!
//! These types define the intermediate representation produced by the
//! parser and consumed by the generator: a page header plus an ordered tree
//! of component nodes. Decoding is tolerant of what models actually emit:
//! unknown fields are ignored, absent or `null` optional fields take their
//! defaults, and spans written as strings or integral floats are coerced.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered component properties (insertion order is preserved)
pub type Props = IndexMap<String, PropValue>;

/// Page layout strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    /// Vertical flow of components
    #[default]
    Default,
    /// Components wrap in a 24-column grid using their `span`
    Grid,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Grid => "grid",
        }
    }
}

impl From<String> for Layout {
    fn from(value: String) -> Self {
        if value == "grid" {
            Layout::Grid
        } else {
            Layout::Default
        }
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.as_str().to_string()
    }
}

/// Page-level metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Human-readable title (informational only, never rendered)
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Layout strategy for the page body
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: Layout,
}

/// A component property value
///
/// Strings render as literal attributes; every other variant renders as a
/// bound expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<PropValue>),
    Object(IndexMap<String, PropValue>),
    Null,
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value.into())
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Number(value.into())
    }
}

impl From<f64> for PropValue {
    /// Non-finite floats have no JSON form and become `Null`
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(PropValue::Number)
            .unwrap_or(PropValue::Null)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(values: Vec<T>) -> Self {
        PropValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// A child entry: either a nested component or raw text content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(ComponentNode),
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Child {
    /// Create a text child
    pub fn text(text: impl Into<String>) -> Self {
        Child::Text(text.into())
    }

    /// The nested component, if this child is one
    pub fn as_node(&self) -> Option<&ComponentNode> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<ComponentNode> for Child {
    fn from(node: ComponentNode) -> Self {
        Child::Node(node)
    }
}

/// One node in the component tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Component tag name (e.g., "d-form-item")
    #[serde(default, deserialize_with = "null_as_default")]
    pub component: String,
    /// Attributes passed to the component
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub props: Props,
    /// Width out of 24 columns (grid layout only)
    #[serde(
        default,
        deserialize_with = "lenient_span",
        skip_serializing_if = "Option::is_none"
    )]
    pub span: Option<i64>,
    /// Ordered children
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Child>,
}

impl ComponentNode {
    /// Create a node with no props and no children
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Default::default()
        }
    }

    /// Add a prop, keeping insertion order
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set the grid span
    pub fn with_span(mut self, span: i64) -> Self {
        self.span = Some(span);
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Iterate over the nested component children, skipping text
    pub fn child_nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.children.iter().filter_map(Child::as_node)
    }
}

/// The root compilation unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiDsl {
    /// Page metadata (defaults to an untitled flow page)
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: Page,
    /// Top-level components, rendered as siblings inside the root container
    pub components: Vec<ComponentNode>,
}

impl UiDsl {
    /// Create a DSL with the given page header and components
    pub fn new(title: impl Into<String>, layout: Layout, components: Vec<ComponentNode>) -> Self {
        Self {
            page: Page {
                title: title.into(),
                layout,
            },
            components,
        }
    }

    /// Page title, or `fallback` when the title is empty
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.page.title.trim().is_empty() {
            fallback
        } else {
            &self.page.title
        }
    }
}

/// Decode an optional field, treating an explicit `null` like an absent one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a span from an integer, an integral float or a numeric string
///
/// Anything else (fractions, words, objects) decodes as no span.
fn lenient_span<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => span_from_number(&number),
        serde_json::Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<serde_json::Number>()
                    .ok()
                    .and_then(|number| span_from_number(&number))
            })
        }
        _ => None,
    })
}

fn span_from_number(number: &serde_json::Number) -> Option<i64> {
    if let Some(span) = number.as_i64() {
        return Some(span);
    }
    let float = number.as_f64()?;
    // Only integral floats inside the i64 range
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_defaults() {
        let dsl: UiDsl =
            serde_json::from_str(r#"{"components":[{"component":"d-card"}]}"#).unwrap();
        assert_eq!(dsl.page, Page::default());
        assert!(dsl.components[0].props.is_empty());
        assert!(dsl.components[0].children.is_empty());
        assert_eq!(dsl.components[0].span, None);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let dsl: UiDsl = serde_json::from_str(
            r#"{"page":{"title":"T","layout":"grid","theme":"dark"},
                "components":[{"component":"d-col","span":8,"id":"x"}],
                "version":2}"#,
        )
        .unwrap();
        assert_eq!(dsl.page.layout, Layout::Grid);
        assert_eq!(dsl.components[0].span, Some(8));
    }

    #[test]
    fn test_unknown_layout_is_default() {
        let page: Page = serde_json::from_str(r#"{"title":"x","layout":"masonry"}"#).unwrap();
        assert_eq!(page.layout, Layout::Default);
    }

    #[test]
    fn test_missing_components_rejected() {
        let result = serde_json::from_str::<UiDsl>(r#"{"page":{"title":"x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_props_keep_insertion_order() {
        let node: ComponentNode = serde_json::from_str(
            r#"{"component":"d-input","props":{"zeta":1,"alpha":"a","mid":true}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = node.props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_prop_value_variants() {
        let node: ComponentNode = serde_json::from_str(
            r#"{"component":"d-select","props":{
                "s":"x","n":3,"f":1.5,"b":false,"a":["a",1],"o":{"k":"v"},"z":null}}"#,
        )
        .unwrap();
        assert_eq!(node.props["s"], PropValue::from("x"));
        assert_eq!(node.props["n"], PropValue::from(3));
        assert_eq!(node.props["f"], PropValue::from(1.5));
        assert_eq!(node.props["b"], PropValue::Bool(false));
        assert!(matches!(node.props["a"], PropValue::Array(ref items) if items.len() == 2));
        assert!(matches!(node.props["o"], PropValue::Object(_)));
        assert_eq!(node.props["z"], PropValue::Null);
    }

    #[test]
    fn test_children_mix_nodes_and_text() {
        let node: ComponentNode = serde_json::from_str(
            r#"{"component":"d-card","children":[{"component":"d-button"},"hello",42]}"#,
        )
        .unwrap();
        assert!(matches!(node.children[0], Child::Node(_)));
        assert_eq!(node.children[1], Child::text("hello"));
        assert!(matches!(node.children[2], Child::Number(_)));
        assert_eq!(node.child_nodes().count(), 1);
    }

    #[test]
    fn test_decode_null_optional_fields() {
        let dsl: UiDsl = serde_json::from_str(
            r#"{"page":{"title":null,"layout":null},
                "components":[{"component":"d-card","props":null,"children":null}]}"#,
        )
        .unwrap();
        assert_eq!(dsl.page, Page::default());
        assert_eq!(dsl.title_or("未命名页面"), "未命名页面");
        assert!(dsl.components[0].props.is_empty());
        assert!(dsl.components[0].children.is_empty());

        let dsl: UiDsl =
            serde_json::from_str(r#"{"page":null,"components":[{"component":null}]}"#).unwrap();
        assert_eq!(dsl.page, Page::default());
        assert_eq!(dsl.components[0].component, "");
    }

    #[test]
    fn test_decode_lenient_span() {
        let node: ComponentNode =
            serde_json::from_str(r#"{"component":"d-col","span":"8"}"#).unwrap();
        assert_eq!(node.span, Some(8));
        let node: ComponentNode =
            serde_json::from_str(r#"{"component":"d-col","span":8.0}"#).unwrap();
        assert_eq!(node.span, Some(8));
        let node: ComponentNode =
            serde_json::from_str(r#"{"component":"d-col","span":" 12 "}"#).unwrap();
        assert_eq!(node.span, Some(12));

        for raw in [
            r#"{"component":"d-col","span":7.5}"#,
            r#"{"component":"d-col","span":"wide"}"#,
            r#"{"component":"d-col","span":null}"#,
            r#"{"component":"d-col","span":[8]}"#,
            r#"{"component":"d-col","span":1e300}"#,
        ] {
            let node: ComponentNode = serde_json::from_str(raw).unwrap();
            assert_eq!(node.span, None, "span from {}", raw);
        }
    }

    #[test]
    fn test_decode_bool_child() {
        let node: ComponentNode =
            serde_json::from_str(r#"{"component":"d-card","children":[true]}"#).unwrap();
        assert_eq!(node.children, vec![Child::Bool(true)]);
        assert_eq!(node.child_nodes().count(), 0);
    }

    #[test]
    fn test_title_or() {
        let untitled = UiDsl::default();
        assert_eq!(untitled.title_or("fallback"), "fallback");
        let titled = UiDsl::new("Sales", Layout::Default, Vec::new());
        assert_eq!(titled.title_or("fallback"), "Sales");
    }
}
