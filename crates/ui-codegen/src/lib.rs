//! UI Codegen - DSL to Vue single-file component compiler for nl2ui
//!
//! This crate holds the intermediate representation produced from a
//! natural-language request and the deterministic generator that turns it
//! into source text:
//!
//! - `types`: the page + component tree DSL, decoded with serde
//! - `codegen`: prop serialization, recursive rendering, import inference
//! - `naming`: kebab-case to PascalCase conversion for import names
//! - `validation`: optional checks of the invariants the generator assumes
//!
//! # Example
//!
//! ```
//! use ui_codegen::{compile, ComponentNode, Layout, UiDsl};
//!
//! let dsl = UiDsl::new(
//!     "Login",
//!     Layout::Default,
//!     vec![ComponentNode::new("d-card").with_child(ComponentNode::new("d-button"))],
//! );
//! let source = compile(Some(&dsl));
//! assert!(source.contains("<d-button></d-button>"));
//! ```

pub mod codegen;
pub mod constants;
pub mod naming;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use codegen::{
    collect_used_components, compile, render_node, serialize_props, GeneratorOptions, ImportMode,
    SfcBlocks, SfcGenerator,
};
pub use naming::to_pascal_case;
pub use types::{Child, ComponentNode, Layout, Page, PropValue, Props, UiDsl};
pub use validation::{validate, DslViolation};
