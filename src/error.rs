//! Error types for the digit classifier binding.
//!
//! The adapter itself only ever rejects one thing: an input buffer whose byte
//! length is not exactly 900 floats. Anything else (allocation failure, a
//! misbehaving model) is left to the host environment.

use std::borrow::Cow;
use thiserror::Error;

/// Message carried by [`ClassifierError::InvalidInput`] for a bad input length.
pub const INPUT_LENGTH_MESSAGE: &str = "Input must be 900 floats";

/// Message carried by [`ClassifierError::InvalidInput`] for a bad score buffer.
pub const OUTPUT_LENGTH_MESSAGE: &str = "Output must be 10 floats";

/// Represents all errors raised by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Indicates that a caller supplied buffer has the wrong size.
    ///
    /// This error occurs when:
    /// - The input passed to `invoke` is not exactly 3600 bytes
    /// - A score buffer handed to `decode_scores` is not exactly 40 bytes
    ///
    /// The built-in messages are static, so raising this never allocates.
    #[error("{0}")]
    InvalidInput(Cow<'static, str>),
}

impl ClassifierError {
    pub(crate) fn input_length() -> Self {
        ClassifierError::InvalidInput(Cow::Borrowed(INPUT_LENGTH_MESSAGE))
    }

    pub(crate) fn output_length() -> Self {
        ClassifierError::InvalidInput(Cow::Borrowed(OUTPUT_LENGTH_MESSAGE))
    }
}
