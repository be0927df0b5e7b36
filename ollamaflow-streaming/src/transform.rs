//! Per-line preprocessing applied before record decoding.

/// Transformation applied to each reassembled line before it is decoded.
///
/// The two wire dialects the gateway speaks differ only here: the native
/// dialect sends bare JSON objects one per line, the OpenAI-compatible
/// dialect prefixes each payload line with `data:`. A line that does not
/// carry the expected prefix passes through unchanged; if it is not a
/// record (an event-stream comment, or the `[DONE]` sentinel) the decoder
/// will skip it.
#[derive(Debug, Clone, Default)]
pub enum LineTransform {
    /// No transformation; the line is decoded as-is.
    #[default]
    Identity,
    /// Strip a fixed textual prefix (and any whitespace after it).
    StripPrefix(String),
}

impl LineTransform {
    /// The `data:` prefix transform used by the event-stream dialect.
    pub fn sse_data() -> Self {
        Self::StripPrefix("data:".to_string())
    }

    /// Apply the transform to one line.
    pub fn apply<'a>(&self, line: &'a str) -> &'a str {
        match self {
            Self::Identity => line,
            Self::StripPrefix(prefix) => match line.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.trim_start(),
                None => line,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_passthrough() {
        let transform = LineTransform::Identity;
        assert_eq!(transform.apply("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_data_prefix() {
        let transform = LineTransform::sse_data();
        assert_eq!(transform.apply("data: {\"a\":1}"), "{\"a\":1}");
        assert_eq!(transform.apply("data:{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_unprefixed_line_unchanged() {
        let transform = LineTransform::sse_data();
        assert_eq!(transform.apply(": comment"), ": comment");
        assert_eq!(transform.apply("event: done"), "event: done");
    }

    #[test]
    fn test_done_sentinel_stripped_but_not_json() {
        let transform = LineTransform::sse_data();
        assert_eq!(transform.apply("data: [DONE]"), "[DONE]");
    }
}
