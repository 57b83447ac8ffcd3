//! Inbound image payload handling

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::AppError;

/// MIME type declared to the model for every image.
pub const DECLARED_MIME_TYPE: &str = "image/jpeg";

/// Standard alphabet, padding required, non-zero trailing bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// A base64 image that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data: String,
    decoded_len: usize,
    had_prefix: bool,
}

impl ImagePayload {
    /// Strip an optional data-URL header and check that the rest is valid base64.
    ///
    /// Everything after the first comma is the payload. ASCII whitespace (line wraps)
    /// is removed before decoding. An empty payload decodes to zero bytes and is passed
    /// on as is. The decoded bytes are only used to gate validity.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (encoded, had_prefix) = match raw.split_once(',') {
            Some((_, rest)) => (rest, true),
            None => (raw, false),
        };

        let data: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let decoded_len = LENIENT.decode(&data)?.len();

        Ok(Self {
            data,
            decoded_len,
            had_prefix,
        })
    }

    /// The base64 payload, without any data-URL header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &'static str {
        DECLARED_MIME_TYPE
    }

    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }

    pub fn had_prefix(&self) -> bool {
        self.had_prefix
    }
}
