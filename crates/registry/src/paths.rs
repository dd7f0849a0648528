//! Relative resource paths for the registry REST API.
//!
//! Paths never carry a scheme or host; the transport joins them onto its
//! configured server URL.

/// Joins path segments with a single `/`.
///
/// Leading and trailing `/` are stripped from every segment and segments that
/// end up empty are skipped, so the result never has a doubled, leading or
/// trailing separator. Segment contents are not escaped or validated.
pub fn build_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        let trimmed = segment.as_ref().trim_matches('/');
        if trimmed.is_empty() {
            continue;
        }
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(trimmed);
    }
    path
}

/// Builds a path from a mixed list of displayable segments.
///
/// ```
/// let id = "ws-1";
/// assert_eq!(registry::path!("workspace", id, "registry"), "workspace/ws-1/registry");
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),+ $(,)?) => {
        $crate::paths::build_path([$($segment.to_string()),+])
    };
}
