//! Presence tests for a single declaration.
//!
//! Matching is textual. A matcher never fails: text it cannot make sense of simply does not
//! match.

/// A closed set of presence tests. Every built-in rule uses [`Matcher::Attribute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Matcher {
    /// The text contains this exact substring.
    Substring(String),
    /// Some `element` tag carries `attribute="value"` before its closing `>`.
    ///
    /// The tag body runs from the end of the element name to the next `>`, or to the end of the
    /// text when the tag is unterminated. The attribute must not touch the element name, so
    /// `<uses-permissionandroid:name=...` does not match.
    Attribute {
        element: String,
        attribute: String,
        value: String,
    },
}

impl Matcher {
    /// `<uses-permission android:name="{permission}" ...>`
    pub fn uses_permission(permission: &str) -> Self {
        Self::Attribute {
            element: "uses-permission".to_string(),
            attribute: "android:name".to_string(),
            value: permission.to_string(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => text.contains(needle.as_str()),
            Self::Attribute {
                element,
                attribute,
                value,
            } => {
                let needle = format!("{attribute}=\"{value}\"");
                text.match_indices(element.as_str()).any(|(at, _)| {
                    let body = &text[at + element.len()..];
                    let body = match body.find('>') {
                        Some(end) => &body[..end],
                        None => body,
                    };
                    body.match_indices(needle.as_str()).any(|(idx, _)| idx > 0)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUETOOTH: &str = "android.permission.BLUETOOTH";

    #[test]
    fn attribute_matches_declaration_with_extra_attributes() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(m.is_match(
            r#"<uses-permission android:name="android.permission.BLUETOOTH" android:maxSdkVersion="30" />"#
        ));
        assert!(m.is_match(
            r#"<uses-permission android:maxSdkVersion="30" android:name="android.permission.BLUETOOTH"/>"#
        ));
    }

    #[test]
    fn attribute_requires_closing_quote() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(!m.is_match(
            r#"<uses-permission android:name="android.permission.BLUETOOTH_SCAN" />"#
        ));
        assert!(!m.is_match(
            r#"<uses-permission android:name="android.permission.BLUETOOTH_ADMIN" />"#
        ));
    }

    #[test]
    fn attribute_must_sit_inside_the_tag() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(!m.is_match(
            r#"<uses-permission android:name="x" /> <meta android:name="android.permission.BLUETOOTH" />"#
        ));
        assert!(!m.is_match(r#"<uses-feature android:name="android.permission.BLUETOOTH" />"#));
    }

    #[test]
    fn attribute_matches_multiline_tag() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(m.is_match(
            "<uses-permission\n    android:name=\"android.permission.BLUETOOTH\"\n    android:maxSdkVersion=\"30\" />"
        ));
    }

    #[test]
    fn attribute_matches_unterminated_tag() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(m.is_match(r#"<uses-permission android:name="android.permission.BLUETOOTH""#));
    }

    #[test]
    fn attribute_needs_separator_after_element() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(!m.is_match(r#"uses-permissionandroid:name="android.permission.BLUETOOTH""#));
    }

    #[test]
    fn attribute_handles_non_ascii_text() {
        let m = Matcher::uses_permission(BLUETOOTH);
        assert!(!m.is_match("<uses-permissioné android:name=\"other\" /> ✓"));
        assert!(m.is_match(
            "<!-- ✓ --><uses-permission\u{a0}android:name=\"android.permission.BLUETOOTH\" />"
        ));
    }

    #[test]
    fn substring_is_plain_contains() {
        let m = Matcher::Substring("BLUETOOTH_CONNECT".to_string());
        assert!(m.is_match("...BLUETOOTH_CONNECT..."));
        assert!(!m.is_match("BLUETOOTH_SCAN"));
        assert!(!m.is_match(""));
    }
}
