//! Common utility functions shared across the codebase.

/// Checks if the character can appear inside a C# or VB identifier.
///
/// # Examples
///
/// ```
/// use locscan::utils::is_identifier_char;
///
/// assert!(is_identifier_char('a'));
/// assert!(is_identifier_char('_'));
/// assert!(is_identifier_char('7'));
/// assert!(is_identifier_char('ř'));
/// assert!(!is_identifier_char('.'));
/// assert!(!is_identifier_char(' '));
/// ```
pub fn is_identifier_char(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_continue(c)
}

/// Checks if the text is a dotted identifier chain such as `System.Collections`.
///
/// Every segment must be non-empty and made of identifier characters only.
pub fn is_dotted_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(is_identifier_char))
}

/// Turns arbitrary text into an identifier the way resource class generators do.
///
/// Characters that cannot appear in an identifier become `_`, and a leading
/// digit gets a `_` prefix.
pub fn to_identifier(text: &str) -> String {
    let mut name: String = text
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}
