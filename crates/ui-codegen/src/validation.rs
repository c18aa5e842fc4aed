//! DSL validation
//!
//! The generator compiles whatever tree it is given. This pass checks the
//! invariants the model is asked to follow (known component names, spans
//! within range and summing to a full grid row) and reports every violation
//! with the path of the offending node.

use crate::constants::{grid, vocabulary};
use crate::types::{Child, ComponentNode, Layout, UiDsl};

/// A violated DSL invariant with location context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslViolation {
    /// A node has no component name
    EmptyComponentName { path: String },
    /// A node uses a component outside the vocabulary
    UnknownComponent { path: String, component: String },
    /// A span is outside 1..=24
    SpanOutOfRange { path: String, span: i64 },
    /// A span is set but the page does not use the grid layout
    SpanWithoutGrid { path: String },
    /// Spans of a sibling group do not add up to a full row
    SpanSumMismatch { path: String, total: i64 },
}

impl DslViolation {
    /// Location of the offending node or sibling group
    pub fn path(&self) -> &str {
        match self {
            Self::EmptyComponentName { path }
            | Self::UnknownComponent { path, .. }
            | Self::SpanOutOfRange { path, .. }
            | Self::SpanWithoutGrid { path }
            | Self::SpanSumMismatch { path, .. } => path,
        }
    }
}

impl std::fmt::Display for DslViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyComponentName { path } => {
                write!(f, "Node '{}' has no component name", path)
            }
            Self::UnknownComponent { path, component } => {
                write!(f, "Node '{}' uses unknown component '{}'", path, component)
            }
            Self::SpanOutOfRange { path, span } => write!(
                f,
                "Node '{}' has span {} outside {}..={}",
                path,
                span,
                grid::MIN_SPAN,
                grid::COLUMNS
            ),
            Self::SpanWithoutGrid { path } => {
                write!(f, "Node '{}' sets a span but the page layout is not grid", path)
            }
            Self::SpanSumMismatch { path, total } => write!(
                f,
                "Spans under '{}' add up to {} instead of {}",
                path,
                total,
                grid::COLUMNS
            ),
        }
    }
}

impl std::error::Error for DslViolation {}

/// Validate a decoded DSL
///
/// Returns all violations found (not just the first), in tree order.
pub fn validate(dsl: &UiDsl) -> Vec<DslViolation> {
    let mut violations = Vec::new();
    let siblings: Vec<(String, &ComponentNode)> = dsl
        .components
        .iter()
        .enumerate()
        .map(|(index, node)| (format!("components[{}]", index), node))
        .collect();

    validate_group("components", &siblings, dsl.page.layout, &mut violations);
    violations
}

fn validate_group(
    group_path: &str,
    siblings: &[(String, &ComponentNode)],
    layout: Layout,
    violations: &mut Vec<DslViolation>,
) {
    if layout == Layout::Grid {
        check_span_sum(group_path, siblings, violations);
    }

    for (path, node) in siblings {
        validate_node(path, node, layout, violations);

        let children: Vec<(String, &ComponentNode)> = node
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| match child {
                Child::Node(child) => Some((format!("{}.children[{}]", path, index), child)),
                _ => None,
            })
            .collect();
        let children_path = format!("{}.children", path);
        validate_group(&children_path, &children, layout, violations);
    }
}

/// Check the name and span of a single node
fn validate_node(path: &str, node: &ComponentNode, layout: Layout, violations: &mut Vec<DslViolation>) {
    if node.component.trim().is_empty() {
        violations.push(DslViolation::EmptyComponentName {
            path: path.to_string(),
        });
    } else if !vocabulary::is_whitelisted(&node.component) {
        violations.push(DslViolation::UnknownComponent {
            path: path.to_string(),
            component: node.component.clone(),
        });
    }

    if let Some(span) = node.span {
        if !(grid::MIN_SPAN..=grid::COLUMNS).contains(&span) {
            violations.push(DslViolation::SpanOutOfRange {
                path: path.to_string(),
                span,
            });
        }
        if layout != Layout::Grid {
            violations.push(DslViolation::SpanWithoutGrid {
                path: path.to_string(),
            });
        }
    }
}

/// Spans are optional, but once any sibling sets one the group must fill a row
fn check_span_sum(
    group_path: &str,
    siblings: &[(String, &ComponentNode)],
    violations: &mut Vec<DslViolation>,
) {
    let spans: Vec<i64> = siblings.iter().filter_map(|(_, node)| node.span).collect();
    if spans.is_empty() {
        return;
    }

    // Spans are unbounded model input: sum in i128, clamp the reported total
    let total: i128 = spans.iter().map(|&span| i128::from(span)).sum();
    if total != i128::from(grid::COLUMNS) {
        let total = i64::try_from(total).unwrap_or(if total > 0 { i64::MAX } else { i64::MIN });
        violations.push(DslViolation::SpanSumMismatch {
            path: group_path.to_string(),
            total,
        });
    }
}
