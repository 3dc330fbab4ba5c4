//! Token classification.
//!
//! Inspects one raw argv token and determines its syntactic category. The
//! classifier is pure; all registry resolution happens in the dispatcher.
//!
//! # Examples
//!
//! ```
//! use flagline_core::{TokenKind, classify};
//!
//! assert_eq!(classify("--"), TokenKind::Separator);
//! assert_eq!(classify("--output"), TokenKind::Long("output"));
//! assert_eq!(classify("-v"), TokenKind::Short('v'));
//! assert_eq!(classify("-vko"), TokenKind::Group("vko"));
//! assert_eq!(
//!     classify("--tag=a"),
//!     TokenKind::Assignment { target: "--tag", value: "a" },
//! );
//! assert_eq!(classify("in.txt"), TokenKind::Positional);
//! assert_eq!(classify("-"), TokenKind::Positional);
//! ```

/// Syntactic category of a single argv token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Bare `--`: everything after it is positional, verbatim.
    Separator,
    /// `target=value` where `target` starts with `-`. The dispatcher decides
    /// whether `target` is a long name, an alias, or ambiguous.
    Assignment { target: &'a str, value: &'a str },
    /// `--name`: a long flag; the payload is the name without dashes.
    Long(&'a str),
    /// `-c`: a single short flag.
    Short(char),
    /// `-abc`: a grouped short-flag token (or a numeral); the payload is the
    /// token without the leading dash.
    Group(&'a str),
    /// Anything else, including a lone `-`.
    Positional,
}

/// Classifies one raw token.
///
/// Order matters: the `--` separator and `=`-assignments are recognized
/// before the long/short split, and a lone `-` is always positional.
pub fn classify(token: &str) -> TokenKind<'_> {
    if token == "--" {
        return TokenKind::Separator;
    }
    if !token.starts_with('-') || token == "-" {
        return TokenKind::Positional;
    }
    if let Some(eq) = token.find('=') {
        return TokenKind::Assignment {
            target: &token[..eq],
            value: &token[eq + 1..],
        };
    }
    if let Some(name) = token.strip_prefix("--") {
        return TokenKind::Long(name);
    }
    let rest = &token[1..];
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => TokenKind::Short(symbol),
        _ => TokenKind::Group(rest),
    }
}

/// Parses an optionally-signed integer, the numerical-argument predicate.
///
/// Applied to the dash-stripped body of a grouped short-flag token before
/// any alias resolution, so `-42` becomes the numerical argument `42`
/// rather than the grouped flags `4` and `2`.
pub fn numeral(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// Whether a token would be consumed as a flag rather than a value.
///
/// Used when looking ahead for a flag's value: a candidate starting with
/// `-` is rejected unless it is exactly `-` (conventional stdin marker).
pub fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_separator_and_positional() {
        assert_eq!(classify("--"), TokenKind::Separator);
        assert_eq!(classify("-"), TokenKind::Positional);
        assert_eq!(classify("plain"), TokenKind::Positional);
        assert_eq!(classify(""), TokenKind::Positional);
    }

    #[test]
    fn test_classify_long_and_short() {
        assert_eq!(classify("--verbose"), TokenKind::Long("verbose"));
        assert_eq!(classify("-v"), TokenKind::Short('v'));
        assert_eq!(classify("-vf"), TokenKind::Group("vf"));
        // Triple dash stays a long flag with a dashed name; the registry
        // rejects it later since names cannot start with '-'.
        assert_eq!(classify("---x"), TokenKind::Long("-x"));
    }

    #[test]
    fn test_classify_assignment_splits_at_first_equals() {
        assert_eq!(
            classify("--mode=a=b"),
            TokenKind::Assignment { target: "--mode", value: "a=b" },
        );
        assert_eq!(
            classify("-o=out.txt"),
            TokenKind::Assignment { target: "-o", value: "out.txt" },
        );
    }

    #[test]
    fn test_classify_negative_number_is_a_group() {
        assert_eq!(classify("-42"), TokenKind::Group("42"));
    }

    #[test]
    fn test_numeral() {
        assert_eq!(numeral("42"), Some(42));
        assert_eq!(numeral("-7"), Some(-7));
        assert_eq!(numeral("4x2"), None);
        assert_eq!(numeral(""), None);
    }

    #[test]
    fn test_looks_like_flag() {
        assert!(looks_like_flag("--out"));
        assert!(looks_like_flag("-o"));
        assert!(!looks_like_flag("-"));
        assert!(!looks_like_flag("out.txt"));
    }
}
