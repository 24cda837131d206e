//! Structured log entry for classified errors.
//!
//! # Properties
//!
//! - Borrows from a [`ClassifiedError`](crate::ClassifiedError) with an
//!   explicit lifetime and cannot outlive it
//! - Accessors never allocate
//! - Formatted output truncates every field, so one enormous upstream
//!   message cannot flood a log sink
//!
//! The entry lives only for the duration of the logging call.

use crate::Code;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
pub const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Structured log view of a classified error.
///
/// # Example
///
/// ```rust
/// # use decode_errors::{ClassifiedError, Code};
/// # use decode_errors::identity::sentinel;
/// let err = ClassifiedError::new(Code::new(1001), "error.client", sentinel("client error 1"));
/// let log = err.internal_log();
/// assert_eq!(log.original().to_string(), "client error 1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TranslationLog<'a> {
    pub(crate) code: Code,
    pub(crate) message: &'a str,
    pub(crate) original: &'a (dyn Error + 'static),
}

impl<'a> TranslationLog<'a> {
    /// Write the entry to a formatter.
    ///
    /// Format: `[code=N] message='...' original='...'`, each field truncated
    /// to [`MAX_FIELD_OUTPUT_LEN`] bytes.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let original = self.original.to_string();
        write!(
            f,
            "[code={}] message='{}' original='{}'",
            self.code,
            truncate_with_indicator(self.message),
            truncate_with_indicator(&original)
        )
    }

    /// Classification code.
    #[inline]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// Translated message, untruncated.
    #[inline]
    pub const fn message(&self) -> &'a str {
        self.message
    }

    /// The original error, for structured sinks that walk its chain.
    #[inline]
    pub const fn original(&self) -> &'a (dyn Error + 'static) {
        self.original
    }
}

impl fmt::Display for TranslationLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Cut `s` to [`MAX_FIELD_OUTPUT_LEN`] bytes on a UTF-8 boundary, marking the
/// cut with [`TRUNCATION_INDICATOR`]. Short strings are borrowed.
pub(crate) fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
