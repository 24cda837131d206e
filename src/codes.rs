//! Classification codes - stable numeric identifiers for classes of errors.
//!
//! A code is the only part of a classification that downstream systems should
//! key on. Messages may be rewritten or localized; codes stay put.
//!
//! # Zero Is Reserved
//!
//! Zero means "unclassified" and is not representable as a [`Code`]:
//!
//! - [`Code::new`] asserts at compile time when used in a const context
//! - [`Code::checked_new`] returns [`CodeError::Zero`] at runtime
//!
//! The absence of a classification is expressed as `None`, never as a
//! sentinel code.
//!
//! # Example Usage
//!
//! ```rust
//! use decode_errors::{Code, define_codes};
//!
//! define_codes! {
//!     CODE_CATCH_ALL = 1000,
//!     CODE_CLIENT_ERROR = 1001,
//! }
//!
//! assert_eq!(CODE_CLIENT_ERROR.value(), 1001);
//! assert!(Code::checked_new(0).is_err());
//! ```

use std::fmt;
use std::num::NonZeroI32;

/// A non-zero classification code.
///
/// # Copy Semantics
///
/// Codes are small numeric values that are compared, hashed and passed
/// around freely, so the type is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(NonZeroI32);

impl Code {
    /// Create a code, rejecting zero.
    ///
    /// # Panics
    ///
    /// Panics at compile time (in const contexts) if `value` is zero.
    /// Panics at runtime (in non-const contexts) if `value` is zero.
    ///
    /// # Use Case
    ///
    /// For const code tables where the values are known at compile time.
    #[inline]
    pub const fn new(value: i32) -> Self {
        match NonZeroI32::new(value) {
            Some(v) => Self(v),
            None => panic!("Classification code 0 is reserved for unclassified errors"),
        }
    }

    /// Create a code with runtime validation.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError::Zero`] if `value` is zero.
    #[inline]
    pub const fn checked_new(value: i32) -> Result<Self, CodeError> {
        match NonZeroI32::new(value) {
            Some(v) => Ok(Self(v)),
            None => Err(CodeError::Zero),
        }
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0.get()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Code> for i32 {
    fn from(code: Code) -> Self {
        code.value()
    }
}

impl TryFrom<i32> for Code {
    type Error = CodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::checked_new(value)
    }
}

/// Error type for code validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// Zero is reserved for unclassified errors.
    Zero,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("Classification code 0 is reserved for unclassified errors"),
        }
    }
}

impl std::error::Error for CodeError {}
