//! Path splitting and pattern-segment detection.
//!
//! Registration and matching both go through [`split_path`], so a path string
//! parses identically on both sides of the tree.

use trellis_core::InvalidPathError;

/// Split a URI path into its segments.
///
/// The path must start with `/`. The literal path `/` yields zero segments.
/// A single trailing `/` is ignored; an empty segment anywhere else (two
/// adjacent slashes) is a format error.
pub fn split_path(path: &str) -> Result<Vec<&str>, InvalidPathError> {
    if !path.starts_with('/') {
        return Err(InvalidPathError::MissingLeadingSlash(path.to_owned()));
    }
    if path == "/" {
        return Ok(Vec::new());
    }
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let mut segments = Vec::new();
    for segment in trimmed[1..].split('/') {
        if segment.is_empty() {
            return Err(InvalidPathError::EmptySegment(path.to_owned()));
        }
        segments.push(segment);
    }
    Ok(segments)
}

/// The parameter name of a pattern segment, or `None` for a static segment.
///
/// A segment is a named wildcard iff it is wrapped in `{` and `}`; the name
/// is the substring between the delimiters.
pub(crate) fn pattern_parameter(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

#[cfg(test)]
mod tests {
    use super::pattern_parameter;
    use super::split_path;
    use trellis_core::InvalidPathError;

    #[test]
    fn root_path_has_no_segments() {
        assert_eq!(split_path("/").unwrap(), Vec::<&str>::new());
    }

    #[test]
    fn segments_are_slash_delimited_tokens() {
        assert_eq!(split_path("/foo/bar").unwrap(), vec!["foo", "bar"]);
        assert_eq!(split_path("/foo").unwrap(), vec!["foo"]);
        assert_eq!(split_path("/foo/{id}/x").unwrap(), vec!["foo", "{id}", "x"]);
    }

    #[test]
    fn one_trailing_slash_is_ignored() {
        assert_eq!(split_path("/foo/").unwrap(), vec!["foo"]);
        assert_eq!(split_path("/foo/bar/").unwrap(), vec!["foo", "bar"]);
    }

    #[test]
    fn missing_leading_slash_is_rejected() {
        assert_eq!(
            split_path("foo/bar"),
            Err(InvalidPathError::MissingLeadingSlash("foo/bar".to_owned()))
        );
        assert_eq!(
            split_path(""),
            Err(InvalidPathError::MissingLeadingSlash(String::new()))
        );
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert_eq!(
            split_path("//"),
            Err(InvalidPathError::EmptySegment("//".to_owned()))
        );
        assert_eq!(
            split_path("/a//b"),
            Err(InvalidPathError::EmptySegment("/a//b".to_owned()))
        );
        assert_eq!(
            split_path("/a//"),
            Err(InvalidPathError::EmptySegment("/a//".to_owned()))
        );
    }

    #[test]
    fn pattern_segments_are_brace_wrapped() {
        assert_eq!(pattern_parameter("{id}"), Some("id"));
        assert_eq!(pattern_parameter("{}"), Some(""));
        assert_eq!(pattern_parameter("id"), None);
        assert_eq!(pattern_parameter("{id"), None);
        assert_eq!(pattern_parameter("id}"), None);
    }
}
