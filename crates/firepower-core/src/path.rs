//! Encoding of caller-supplied values that become a single path segment.

use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that would end, split or reinterpret a path segment.
///
/// `\` is included because special schemes treat it as `/`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode `raw` so it resolves as exactly one path segment.
///
/// Empty values are passed through. `.` and `..` are dot segments to every
/// URL parser whether or not they are escaped, so they cannot name a
/// resource and are rejected.
///
/// # Errors
///
/// Returns [`Error::RequestBuild`] for `.` and `..`.
pub fn encode_segment(raw: &str) -> Result<String> {
    if raw == "." || raw == ".." {
        return Err(Error::RequestBuild(format!(
            "`{raw}` cannot be used as a path segment"
        )));
    }
    Ok(utf8_percent_encode(raw, SEGMENT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_unchanged() {
        assert_eq!(
            encode_segment("00505686-7A5F-0ed3-0000-004294969460").unwrap(),
            "00505686-7A5F-0ed3-0000-004294969460"
        );
        assert_eq!(encode_segment("").unwrap(), "");
    }

    #[test]
    fn test_reserved_characters_escaped() {
        assert_eq!(encode_segment("a/b").unwrap(), "a%2Fb");
        assert_eq!(encode_segment("h1?expanded=false").unwrap(), "h1%3Fexpanded=false");
        assert_eq!(encode_segment("h1#frag").unwrap(), "h1%23frag");
        assert_eq!(encode_segment("..\\x").unwrap(), "..%5Cx");
        assert_eq!(encode_segment("100%").unwrap(), "100%25");
        assert_eq!(encode_segment("http:evil").unwrap(), "http%3Aevil");
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert!(matches!(encode_segment(".."), Err(Error::RequestBuild(_))));
        assert!(matches!(encode_segment("."), Err(Error::RequestBuild(_))));
        assert_eq!(encode_segment("...").unwrap(), "...");
    }
}
