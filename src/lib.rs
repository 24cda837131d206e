//! # Decode Errors
//!
//! Rule-based classification of error values into stable codes and
//! user-facing messages.
//!
//! ## Design Philosophy
//!
//! 1. **Error producers stay ignorant** of how their errors are presented
//! 2. **Rules are declarative** and compiled once into an immutable index
//! 3. **Identity beats inspection**: registered sentinels resolve in O(1)
//!    before any predicate runs
//! 4. **Unknown errors pass through untouched**, never masked by a generic
//!    message
//! 5. **Decoration keeps the cause chain**, so identity checks still see the
//!    original error
//!
//! ## Quick Start
//!
//! Errors near the top of a call stack are usually either returned as-is or
//! wrapped around a known sentinel. Rules bind those sentinels, or any error a
//! predicate recognizes, to a code and a message:
//!
//! ```rust
//! use decode_errors::{ClassifiedError, Code, Decoder, Rule, define_codes, identity};
//! use decode_errors::identity::SharedError;
//! use std::sync::LazyLock;
//!
//! define_codes! {
//!     CODE_INVALID_TOKEN = 1001,
//!     CODE_MISSING_CREDENTIALS = 1002,
//! }
//!
//! static ERR_INVALID_TOKEN: LazyLock<SharedError> =
//!     LazyLock::new(|| identity::sentinel("invalid token"));
//! static ERR_MISSING_EMAIL: LazyLock<SharedError> =
//!     LazyLock::new(|| identity::sentinel("missing email"));
//! static ERR_MISSING_PASSWORD: LazyLock<SharedError> =
//!     LazyLock::new(|| identity::sentinel("missing password"));
//!
//! let decoder = Decoder::new(vec![
//!     Rule::new(CODE_INVALID_TOKEN, "The provided token is not valid.")
//!         .with_error(ERR_INVALID_TOKEN.clone()),
//!     Rule::new(CODE_MISSING_CREDENTIALS, "An email and password is required.")
//!         .with_errors([ERR_MISSING_EMAIL.clone(), ERR_MISSING_PASSWORD.clone()]),
//! ]);
//!
//! fn my_app_domain_func() -> Result<(), SharedError> {
//!     Err(ERR_INVALID_TOKEN.clone())
//! }
//!
//! let err = decoder.translate_result(my_app_domain_func()).unwrap_err();
//! assert_eq!(err.to_string(), "The provided token is not valid.");
//!
//! let classified = identity::classified(err.as_ref()).unwrap();
//! assert_eq!(classified.code(), CODE_INVALID_TOKEN);
//! assert!(identity::is(err.as_ref(), &ERR_INVALID_TOKEN));
//! ```
//!
//! ## Matching by Type
//!
//! When errors are not sentinels, a matcher decides:
//!
//! ```rust
//! use decode_errors::{Code, Decoder, Rule, matchers};
//! use decode_errors::identity::shared;
//! use std::io;
//!
//! let decoder = Decoder::new(vec![
//!     Rule::new(Code::new(1003), "Storage is unavailable.")
//!         .with_matcher(matchers::is_type::<io::Error>()),
//! ]);
//!
//! let err = decoder.translate(shared(io::Error::from(io::ErrorKind::NotFound)));
//! assert_eq!(err.to_string(), "Storage is unavailable.");
//! ```
//!
//! ## Custom Classification and Localization
//!
//! The rule-backed classifier can be replaced wholesale
//! (`DecoderBuilder::classify_with`), and matched messages can be treated as
//! keys and resolved by a [`MessageTranslator`], e.g. a [`MessageCatalog`].
//!
//! ## Diagnostics
//!
//! - [`ClassifiedError::internal_log`] gives a borrowed, bounded log view
//! - Compilation and classification decisions are emitted as `tracing`
//!   events; the library never installs a subscriber

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

pub mod classify;
pub mod codes;
pub mod convenience;
pub mod decoder;
pub mod identity;
pub mod index;
pub mod logging;
pub mod matchers;
pub mod rules;
pub mod translate;

pub use classify::{Classification, Classifier, FnClassifier, RuleClassifier};
pub use codes::*;
pub use decoder::{Decoded, Decoder, DecoderBuilder};
pub use identity::{ErrorId, SharedError};
pub use index::{RuleIndex, RuleViolation};
pub use logging::*;
pub use rules::{Matcher, Rule};
pub use translate::{FnTranslator, IdentityTranslator, MessageCatalog, MessageTranslator};

/// An error recognized by a classification rule.
///
/// # Key Properties
///
/// - `Display` renders the (translated) classification message
/// - [`code`](Self::code) exposes the classification code
/// - [`wrapped`](Self::wrapped) and `Error::source` return the original
///   error handle, so chain walks (`identity::is`, `identity::find`) still
///   reach it
/// - The original error is shared, never copied or modified
#[must_use = "errors should be handled or logged"]
pub struct ClassifiedError {
    code: Code,
    message: Cow<'static, str>,
    wrapped: SharedError,
}

impl ClassifiedError {
    /// Decorate `wrapped` with a code and message.
    #[inline]
    pub fn new(code: Code, message: impl Into<Cow<'static, str>>, wrapped: SharedError) -> Self {
        Self {
            code,
            message: message.into(),
            wrapped,
        }
    }

    /// Classification code.
    #[inline]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// Classification message, after translation.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// The original error.
    #[inline]
    pub fn wrapped(&self) -> &SharedError {
        &self.wrapped
    }

    /// Give back the original error handle.
    #[inline]
    pub fn into_wrapped(self) -> SharedError {
        self.wrapped
    }

    /// Create a structured log entry borrowing from this error.
    ///
    /// The entry cannot outlive the error, so it is consumed by the logger
    /// on the spot:
    ///
    /// ```rust
    /// # use decode_errors::{ClassifiedError, Code};
    /// # use decode_errors::identity::sentinel;
    /// let err = ClassifiedError::new(Code::new(1001), "error.client", sentinel("client error 1"));
    /// let mut line = String::new();
    /// err.internal_log().write_to(&mut line).unwrap();
    /// assert_eq!(line, "[code=1001] message='error.client' original='client error 1'");
    /// ```
    #[inline]
    pub fn internal_log(&self) -> TranslationLog<'_> {
        TranslationLog {
            code: self.code,
            message: self.message.as_ref(),
            original: self.wrapped.as_ref(),
        }
    }

    /// Callback-style variant of [`internal_log`](Self::internal_log).
    #[inline]
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TranslationLog<'_>) -> R,
    {
        let log = self.internal_log();
        f(&log)
    }
}

impl fmt::Debug for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("wrapped", &self.wrapped)
            .finish()
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ClassifiedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.wrapped.as_ref())
    }
}
