//! CSS values touched by sticking: `position`, `top`, and inline declarations.

use serde::{Serialize, Serializer};
use std::fmt;

/// Value of the CSS `position` property as written in an inline style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CssPosition {
    /// No inline value.
    #[default]
    Unset,
    /// `static`
    Static,
    /// `relative`
    Relative,
    /// `absolute`
    Absolute,
    /// `fixed`
    Fixed,
    /// `sticky`
    Sticky,
    /// Any other keyword (`inherit`, `revert`, ...), kept verbatim.
    Keyword(String),
}

impl CssPosition {
    /// Parse an inline `position` value. Empty input is [`CssPosition::Unset`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Self::Unset,
            "static" => Self::Static,
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" => Self::Sticky,
            _ => Self::Keyword(trimmed.to_string()),
        }
    }

    /// CSS text for this value, or `None` when the property should be removed.
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Static => Some("static"),
            Self::Relative => Some("relative"),
            Self::Absolute => Some("absolute"),
            Self::Fixed => Some("fixed"),
            Self::Sticky => Some("sticky"),
            Self::Keyword(keyword) => Some(keyword),
        }
    }
}

impl fmt::Display for CssPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css().unwrap_or("-"))
    }
}

impl Serialize for CssPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_css() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

/// Value of the CSS `top` property as written in an inline style.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CssTop {
    /// No inline value.
    #[default]
    Unset,
    /// A pixel length.
    Px(f64),
    /// Anything that is not a pixel length (`auto`, `2em`, `calc(...)`), kept verbatim.
    Keyword(String),
}

impl CssTop {
    /// Parse an inline `top` value.
    ///
    /// Bare numbers and `px` lengths become [`CssTop::Px`]; other units are
    /// kept as keywords so they restore exactly.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unset;
        }

        let lower = trimmed.to_ascii_lowercase();
        let number = lower.strip_suffix("px").unwrap_or(&lower).trim_end();
        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Px(value),
            _ => Self::Keyword(trimmed.to_string()),
        }
    }

    /// CSS text for this value, or `None` when the property should be removed.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Unset => None,
            Self::Px(value) => Some(format!("{value}px")),
            Self::Keyword(keyword) => Some(keyword.clone()),
        }
    }
}

impl From<f64> for CssTop {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl fmt::Display for CssTop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_css() {
            Some(text) => f.write_str(&text),
            None => f.write_str("-"),
        }
    }
}

impl Serialize for CssTop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Px(value) => serializer.serialize_f64(*value),
            Self::Keyword(keyword) => serializer.serialize_str(keyword),
        }
    }
}

/// One `property: value` pair of an inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Value as written, including any `!important`.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Whether this declaration sets `property` (ASCII case-insensitive).
    pub fn is(&self, property: &str) -> bool {
        self.property.eq_ignore_ascii_case(property)
    }
}

/// Split an inline style string into declarations.
///
/// Semicolons inside quotes or parentheses do not terminate a declaration.
/// Inside quotes a backslash escapes the next character.
/// Fragments without a `:` or with an empty property name are dropped.
pub fn parse_declarations(css_text: &str) -> Vec<Declaration> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, ch) in css_text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(_), '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                chunks.push(&css_text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    chunks.push(&css_text[start..]);

    chunks
        .into_iter()
        .filter_map(|chunk| {
            let (property, value) = chunk.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some(Declaration::new(property, value.trim()))
        })
        .collect()
}

/// Render declarations back to inline style text (`a: b; c: d;`).
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod position {
        use super::*;

        #[test]
        fn parse_known_keywords_case_insensitively() {
            assert_eq!(CssPosition::parse("FIXED"), CssPosition::Fixed);
            assert_eq!(CssPosition::parse(" relative "), CssPosition::Relative);
            assert_eq!(CssPosition::parse("sticky"), CssPosition::Sticky);
        }

        #[test]
        fn parse_empty_is_unset() {
            assert_eq!(CssPosition::parse(""), CssPosition::Unset);
            assert_eq!(CssPosition::parse("   "), CssPosition::Unset);
        }

        #[test]
        fn parse_unknown_keeps_keyword() {
            assert_eq!(
                CssPosition::parse("inherit"),
                CssPosition::Keyword("inherit".to_string())
            );
        }

        #[test]
        fn unset_has_no_css_text() {
            assert_eq!(CssPosition::Unset.as_css(), None);
            assert_eq!(CssPosition::Fixed.as_css(), Some("fixed"));
        }
    }

    mod top {
        use super::*;

        #[test]
        fn parse_px_and_bare_numbers() {
            assert_eq!(CssTop::parse("20px"), CssTop::Px(20.0));
            assert_eq!(CssTop::parse("12.5"), CssTop::Px(12.5));
            assert_eq!(CssTop::parse("-4PX"), CssTop::Px(-4.0));
        }

        #[test]
        fn parse_other_units_as_keywords() {
            assert_eq!(CssTop::parse("2em"), CssTop::Keyword("2em".to_string()));
            assert_eq!(CssTop::parse("auto"), CssTop::Keyword("auto".to_string()));
        }

        #[test]
        fn parse_non_finite_is_keyword() {
            assert_eq!(CssTop::parse("NaN"), CssTop::Keyword("NaN".to_string()));
        }

        #[test]
        fn to_css_uses_shortest_decimal() {
            assert_eq!(CssTop::Px(20.0).to_css().as_deref(), Some("20px"));
            assert_eq!(CssTop::Px(12.5).to_css().as_deref(), Some("12.5px"));
            assert_eq!(CssTop::Unset.to_css(), None);
        }
    }

    mod declarations {
        use super::*;

        #[test]
        fn parse_splits_and_trims() {
            let decls = parse_declarations(" color : red;top:10px ; ");
            assert_eq!(
                decls,
                vec![
                    Declaration::new("color", "red"),
                    Declaration::new("top", "10px"),
                ]
            );
        }

        #[test]
        fn parse_ignores_semicolons_in_parens_and_quotes() {
            let decls =
                parse_declarations("background: url(data:a;b); content: \"x;y\"; top: 0");
            assert_eq!(decls.len(), 3);
            assert_eq!(decls[0].value, "url(data:a;b)");
            assert_eq!(decls[1].value, "\"x;y\"");
        }

        #[test]
        fn parse_honours_escaped_quotes() {
            let decls = parse_declarations(r#"content: "a\"b; c"; color: red"#);
            assert_eq!(decls.len(), 2);
            assert_eq!(decls[0].value, r#""a\"b; c""#);
            assert_eq!(decls[1], Declaration::new("color", "red"));
        }

        #[test]
        fn escaped_quote_survives_a_rewrite_round_trip() {
            let css = r#"content: 'it\'s; fine'; top: 4px;"#;
            let decls = parse_declarations(css);
            assert_eq!(serialize_declarations(&decls), css);
        }

        #[test]
        fn parse_drops_fragments_without_colon() {
            assert!(parse_declarations("garbage; ;").is_empty());
        }

        #[test]
        fn serialize_joins_with_spaces() {
            let decls = vec![
                Declaration::new("position", "fixed"),
                Declaration::new("top", "20px"),
            ];
            assert_eq!(serialize_declarations(&decls), "position: fixed; top: 20px;");
        }

        #[test]
        fn is_matches_exact_property_only() {
            let margin = Declaration::new("margin-top", "4px");
            assert!(!margin.is("top"));
            assert!(Declaration::new("TOP", "4px").is("top"));
        }
    }
}
