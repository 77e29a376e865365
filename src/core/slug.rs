//! Slug generation for company codes
//!
//! Turns a display name into a lowercase, hyphen-separated ASCII identifier:
//! `"Test Company"` → `"test-company"`, `"Ben & Jerry's"` → `"ben-jerrys"`.
//!
//! Whitespace, `-` and `_` separate words; every other non-alphanumeric
//! character is dropped. Runs of separators collapse into one hyphen and no
//! hyphen is emitted at either end.

/// Derive a URL-safe code from a human readable name
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    slug
}
