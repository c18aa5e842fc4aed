//! Identifier naming conversion

/// Convert a kebab-case tag name into a PascalCase identifier
///
/// Every hyphen is dropped and the character following it is uppercased, as
/// is the first character. Runs of hyphens collapse.
///
/// ```
/// use ui_codegen::to_pascal_case;
///
/// assert_eq!(to_pascal_case("d-form-item"), "DFormItem");
/// assert_eq!(to_pascal_case("button"), "Button");
/// ```
pub fn to_pascal_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = true;

    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}
