//! Record decoding: one line or one buffered body into typed records.

use serde::de::DeserializeOwned;

/// Wrapper keys probed when a buffered body is an enveloped object.
pub const ENVELOPE_KEYS: &[&str] = &["data", "items"];

/// Wrapper keys probed for model-listing endpoints.
pub const MODEL_ENVELOPE_KEYS: &[&str] = &["models"];

/// Decode one preprocessed line into a typed record.
///
/// A malformed line (invalid syntax, missing required fields) yields `None`
/// and is skipped: partial fragments and log noise are expected in
/// long-running streams and must never abort an otherwise healthy stream.
pub fn decode_line<T: DeserializeOwned>(line: &str) -> Option<T> {
    match serde_json::from_str(line) {
        Ok(record) => Some(record),
        Err(error) => {
            tracing::debug!(%error, line, "skipping undecodable line");
            None
        }
    }
}

/// How a fully buffered body maps onto a list of records.
///
/// The shape is chosen once per payload by the caller, not probed ad hoc by
/// the decoder, so the decode path stays a single switch.
#[derive(Debug, Clone, Copy)]
pub enum DecodeStrategy {
    /// The body is a JSON array of records.
    DirectArray,
    /// The body is a JSON object wrapping the records under the first
    /// present key of the given set.
    Enveloped(&'static [&'static str]),
    /// The body is newline-delimited records, decoded one per line.
    Lines,
}

/// Decode a fully buffered body into records using one strategy.
///
/// An empty or non-matching body yields an empty list, never an error: the
/// materializing mode treats "no data" as a recoverable outcome.
pub fn decode_all<T: DeserializeOwned>(body: &str, strategy: DecodeStrategy) -> Vec<T> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    match strategy {
        DecodeStrategy::DirectArray => serde_json::from_str(body).unwrap_or_default(),
        DecodeStrategy::Enveloped(keys) => {
            let value: serde_json::Value = match serde_json::from_str(body) {
                Ok(value) => value,
                Err(error) => {
                    tracing::debug!(%error, "skipping undecodable body");
                    return Vec::new();
                }
            };
            for key in keys {
                if let Some(inner) = value.get(key) {
                    return serde_json::from_value(inner.clone()).unwrap_or_default();
                }
            }
            Vec::new()
        }
        DecodeStrategy::Lines => body.lines().filter_map(decode_line).collect(),
    }
}

/// Decode a body that is either a direct array or an enveloped object.
///
/// Tries the array shape first, then each envelope key in order. This is the
/// one place where two strategies are probed, and it exists because listing
/// endpoints legitimately answer in both shapes.
pub fn decode_listing<T: DeserializeOwned>(body: &str, keys: &'static [&'static str]) -> Vec<T> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') {
        decode_all(body, DecodeStrategy::DirectArray)
    } else {
        decode_all(body, DecodeStrategy::Enveloped(keys))
    }
}
