// ABOUTME: Utility functions for filename sanitization
// ABOUTME: Maps arbitrary document titles to filesystem-safe path segments

/// Characters allowed in a file or folder name besides word characters and
/// whitespace. Everything else becomes `_`.
const ALLOWED_PUNCT: &[char] = &[
    '.', '!', '@', '#', '$', '^', '+', '=', '-', '(', ')', '&',
];

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCT.contains(&c)
}

/// Replaces every disallowed character in a title with `_` and trims
/// surrounding whitespace. Always returns a string, possibly empty.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect();
    cleaned.trim().to_string()
}
