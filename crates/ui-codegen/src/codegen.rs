//! Code generation from the UI DSL to a Vue single-file component
//!
//! The generator is a set of pure functions: props are serialized into
//! attributes, the component tree is rendered recursively with a depth
//! accumulator, and the set of used components drives import inference.
//! Nothing here fails; malformed trees produce best-effort text.

use indexmap::IndexSet;

use crate::constants::{classes, defaults, STYLE_BLOCK};
use crate::naming::to_pascal_case;
use crate::types::{Child, ComponentNode, Layout, PropValue, Props, UiDsl};

/// How inferred component imports are emitted in the script block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Imports are written as comments (preview only, nothing is imported)
    #[default]
    Advisory,
    /// Imports are written as real declarations
    Live,
}

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Tag prefix identifying component library components
    pub library_prefix: String,
    /// Package library components are imported from
    pub library_package: String,
    /// Whether imports are advisory comments or live declarations
    pub import_mode: ImportMode,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            library_prefix: defaults::LIBRARY_PREFIX.to_string(),
            library_package: defaults::LIBRARY_PACKAGE.to_string(),
            import_mode: ImportMode::default(),
        }
    }
}

/// The three blocks of a generated single-file component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlocks {
    pub script: String,
    pub template: String,
    pub style: String,
}

impl SfcBlocks {
    /// Join the blocks in script, template, style order
    pub fn into_source(self) -> String {
        format!("{}\n\n{}\n\n{}", self.script, self.template, self.style)
    }
}

/// Generates single-file component source from a DSL tree
#[derive(Debug, Clone, Default)]
pub struct SfcGenerator {
    options: GeneratorOptions,
}

impl SfcGenerator {
    /// Create a generator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with custom options
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the three blocks separately; `None` when there is no DSL
    pub fn generate_blocks(&self, dsl: Option<&UiDsl>) -> Option<SfcBlocks> {
        let dsl = dsl?;

        let template = self.template_block(dsl);
        let used = collect_used_components(&dsl.components);
        let script = self.script_block(&used);

        log::debug!(
            "Generated component '{}' ({} top-level nodes, {} distinct components)",
            dsl.page.title,
            dsl.components.len(),
            used.len()
        );

        Some(SfcBlocks {
            script,
            template,
            style: STYLE_BLOCK.to_string(),
        })
    }

    /// Generate the combined source; empty when there is no DSL
    pub fn generate(&self, dsl: Option<&UiDsl>) -> String {
        self.generate_blocks(dsl)
            .map(SfcBlocks::into_source)
            .unwrap_or_default()
    }

    fn template_block(&self, dsl: &UiDsl) -> String {
        let layout_class = match dsl.page.layout {
            Layout::Grid => classes::GRID,
            Layout::Default => classes::FLOW,
        };

        let body = dsl
            .components
            .iter()
            .map(|node| render_component(node, defaults::BASE_DEPTH))
            .collect::<Vec<_>>()
            .join("\n");

        // Top-level nodes carry their own depth-2 indent: no extra prefix on
        // the first line, and an empty body adds no whitespace-only line
        let mut lines = vec![
            "<template>".to_string(),
            format!("{}<div class=\"{} {}\">", indent(1), classes::ROOT, layout_class),
        ];
        if !body.is_empty() {
            lines.push(body);
        }
        lines.push(format!("{}</div>", indent(1)));
        lines.push("</template>".to_string());
        lines.join("\n")
    }

    fn script_block(&self, used: &IndexSet<String>) -> String {
        let package = &self.options.library_package;
        let marker = match self.options.import_mode {
            ImportMode::Advisory => "// ",
            ImportMode::Live => "",
        };

        let mut lines = vec![
            "<script setup lang=\"ts\">".to_string(),
            "import { ref } from 'vue';".to_string(),
            format!("// 请确保已安装 {}", package),
        ];
        lines.extend(
            used.iter()
                .filter(|name| name.starts_with(self.options.library_prefix.as_str()))
                .map(|name| {
                    format!(
                        "{}import {{ {} }} from '{}';",
                        marker,
                        to_pascal_case(name),
                        package
                    )
                }),
        );
        lines.push("</script>".to_string());
        lines.join("\n")
    }
}

/// Compile a DSL into single-file component source with default options
///
/// Returns an empty string when `dsl` is `None`.
pub fn compile(dsl: Option<&UiDsl>) -> String {
    SfcGenerator::new().generate(dsl)
}

/// Serialize props into an attribute string
///
/// Strings become literal attributes (`key="value"`); every other value
/// becomes a bound attribute (`:key="expr"`). Entries keep insertion order
/// and are separated by a single space.
pub fn serialize_props(props: &Props) -> String {
    props
        .iter()
        .map(|(key, value)| match value {
            PropValue::String(text) => format!("{}=\"{}\"", key, escape_attribute(text)),
            other => format!(":{}=\"{}\"", key, escape_attribute(&expression_literal(other))),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one child at the given depth
///
/// Text children are emitted as indented raw text. A component without
/// children collapses onto one line; otherwise its children are rendered one
/// level deeper between the open and close tags.
pub fn render_node(child: &Child, depth: usize) -> String {
    match child {
        Child::Node(node) => render_component(node, depth),
        Child::Text(text) => format!("{}{}", indent(depth), text),
        Child::Number(number) => format!("{}{}", indent(depth), number),
        Child::Bool(value) => format!("{}{}", indent(depth), value),
    }
}

fn render_component(node: &ComponentNode, depth: usize) -> String {
    let name = &node.component;
    let attrs = serialize_props(&node.props);
    let open_tag = if attrs.is_empty() {
        format!("<{}>", name)
    } else {
        format!("<{} {}>", name, attrs)
    };
    let close_tag = format!("</{}>", name);

    if node.children.is_empty() {
        return format!("{}{}{}", indent(depth), open_tag, close_tag);
    }

    let children = node
        .children
        .iter()
        .map(|child| render_node(child, depth + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{pad}{open_tag}\n{children}\n{pad}{close_tag}",
        pad = indent(depth)
    )
}

/// Collect every distinct component name in the tree, in first-seen order
pub fn collect_used_components(nodes: &[ComponentNode]) -> IndexSet<String> {
    let mut used = IndexSet::new();
    collect_into(nodes.iter(), &mut used);
    used
}

fn collect_into<'a>(nodes: impl Iterator<Item = &'a ComponentNode>, used: &mut IndexSet<String>) {
    for node in nodes {
        if !node.component.is_empty() && !used.contains(&node.component) {
            used.insert(node.component.clone());
        }
        collect_into(node.child_nodes(), used);
    }
}

fn indent(depth: usize) -> String {
    defaults::INDENT.repeat(depth)
}

fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Render a value as a JavaScript expression literal
///
/// Strings nested in arrays and objects are single-quoted so the result can
/// sit inside a double-quoted attribute.
fn expression_literal(value: &PropValue) -> String {
    match value {
        PropValue::Bool(flag) => flag.to_string(),
        PropValue::Number(number) => number.to_string(),
        PropValue::String(text) => quote_string(text),
        PropValue::Null => "null".to_string(),
        PropValue::Array(items) => {
            let items = items
                .iter()
                .map(expression_literal)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{}]", items)
        }
        PropValue::Object(entries) if entries.is_empty() => "{}".to_string(),
        PropValue::Object(entries) => {
            let entries = entries
                .iter()
                .map(|(key, value)| {
                    let key = if is_identifier(key) {
                        key.clone()
                    } else {
                        quote_string(key)
                    };
                    format!("{}: {}", key, expression_literal(value))
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {} }}", entries)
        }
    }
}

fn quote_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
