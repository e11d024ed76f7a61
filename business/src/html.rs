//! Markup escaping for interpolated record fields.

/// Escape text for insertion into HTML element content or attribute values.
///
/// `&` is replaced first so entities produced by the later substitutions are
/// not escaped twice.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
