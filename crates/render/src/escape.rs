//! Markup escaping for user-supplied text.

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape multi-line text, keeping its line breaks.
pub fn html_escape_multiline(s: &str) -> String {
    s.lines().map(html_escape).collect::<Vec<_>>().join("<br>\n")
}
