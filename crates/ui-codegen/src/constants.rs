//! Generator-wide constants
//!
//! Single source of truth for the component vocabulary and the fixed
//! fragments of the generated single-file component.

/// Component vocabulary the model is instructed to use
pub mod vocabulary {
    /// Layout components (`span` = 1..24 on `d-col`)
    pub const LAYOUT: &[&str] = &["d-row", "d-col"];
    /// Container components
    pub const CONTAINER: &[&str] = &["d-card", "d-card-header", "d-card-content"];
    /// Form components
    pub const FORM: &[&str] = &[
        "d-form",
        "d-form-item",
        "d-input",
        "d-select",
        "d-button",
        "d-textarea",
    ];
    /// Chart components (local, not part of the component library)
    pub const CHART: &[&str] = &["simple-stat", "simple-chart"];

    /// Whether `name` belongs to any vocabulary category
    pub fn is_whitelisted(name: &str) -> bool {
        [LAYOUT, CONTAINER, FORM, CHART]
            .iter()
            .any(|category| category.contains(&name))
    }
}

/// Grid layout rules
pub mod grid {
    /// Number of columns a grid row is divided into
    pub const COLUMNS: i64 = 24;
    /// Smallest allowed span
    pub const MIN_SPAN: i64 = 1;
}

/// Default generator settings
pub mod defaults {
    /// Prefix marking components that come from the component library
    pub const LIBRARY_PREFIX: &str = "d-";
    /// Package the library components are imported from
    pub const LIBRARY_PACKAGE: &str = "vue-devui";
    /// Depth at which top-level components are rendered (inside the root div)
    pub const BASE_DEPTH: usize = 2;
    /// One level of indentation
    pub const INDENT: &str = "  ";
}

/// CSS class names used in the generated markup
pub mod classes {
    pub const ROOT: &str = "generated-page";
    pub const GRID: &str = "grid-layout";
    pub const FLOW: &str = "flow-layout";
}

/// Fixed style block appended to every generated component
pub const STYLE_BLOCK: &str = "<style scoped>
.generated-page { padding: 20px; }
.grid-layout { display: flex; flex-wrap: wrap; gap: 16px; }
.flow-layout { display: flex; flex-direction: column; gap: 16px; }
</style>";
