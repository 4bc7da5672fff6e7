//! Escaping of user content for the contexts code generation writes into.

use std::borrow::Cow;

/// How user-supplied values are interpolated into generated code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EscapeMode {
    /// Values are inserted as-is, byte-compatible with sites generated by
    /// earlier releases. Content can inject markup and script.
    #[default]
    Verbatim,
    /// Text, attribute and style values are escaped for their context and
    /// inline click handlers are dropped.
    Escaped,
}

impl EscapeMode {
    /// Escape a value for an HTML text or double-quoted attribute context.
    pub fn html<'a>(self, s: &'a str) -> Cow<'a, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(s),
            Self::Escaped => escape_html(s),
        }
    }

    /// Escape a value for a single-quoted JavaScript string literal.
    pub fn js_string<'a>(self, s: &'a str) -> Cow<'a, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(s),
            Self::Escaped => escape_js_string(s),
        }
    }

    /// Escape a selector or declaration value written inside `<style>`.
    pub fn css<'a>(self, s: &'a str) -> Cow<'a, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(s),
            Self::Escaped => escape_css(s),
        }
    }

    /// Whether user-authored script may be emitted.
    pub fn allows_inline_script(self) -> bool {
        self == Self::Verbatim
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape a string for a single-quoted JavaScript literal inside `<script>`.
pub fn escape_js_string(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\'', '"', '<', '\n', '\r']) {
        return Cow::Borrowed(s);
    }
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '"' => result.push_str("\\\""),
            '<' => result.push_str("\\u003c"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape `<` in CSS text as the hex escape `\3c `.
///
/// Style element content is raw text, so `</style>` in a value would close
/// it, and `<?` would open a PHP block in PHP documents.
pub fn escape_css(s: &str) -> Cow<'_, str> {
    if s.contains('<') {
        Cow::Owned(s.replace('<', "\\3c "))
    } else {
        Cow::Borrowed(s)
    }
}

/// Quote a value as a single-quoted PHP string literal.
///
/// Always applied: an unescaped quote would make the page unparseable.
pub fn php_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('\'');
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            _ => result.push(c),
        }
    }
    result.push('\'');
    result
}
