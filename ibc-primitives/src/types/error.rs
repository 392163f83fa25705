//! Foundational error types that are applicable across the workspace.

use displaydoc::Display;

/// Causes of decoding failures
#[derive(Debug, Display, PartialEq, Eq)]
pub enum DecodingError {
    /// invalid field: `{0}`
    InvalidField(String),
    /// missing field: `{0}`
    MissingField(String),
    /// mismatched type URLs: expected `{expected}`, actual `{actual}`
    MismatchedTypeUrls { expected: String, actual: String },
    /// failed to decode value: `{description}`
    FailedToDecode { description: String },
}

impl std::error::Error for DecodingError {}
