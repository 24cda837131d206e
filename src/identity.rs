//! Error identity and cause-chain inspection.
//!
//! Rust errors carry no implicit reference identity, so classification keys
//! on the address of a shared allocation. Rules register [`SharedError`]
//! handles (usually long-lived sentinels) and incoming errors are compared by
//! where their data lives, never by what their message says.
//!
//! Two sentinels with identical text are different errors:
//!
//! ```rust
//! use decode_errors::identity::{ErrorId, sentinel};
//!
//! let a = sentinel("token expired");
//! let b = sentinel("token expired");
//! assert_ne!(ErrorId::of(a.as_ref()), ErrorId::of(b.as_ref()));
//! ```
//!
//! # Chain Walking
//!
//! [`chain`], [`is`] and [`find`] walk `Error::source()` links, so checks
//! made against a wrapped error still see everything it wraps, including
//! through a [`ClassifiedError`](crate::ClassifiedError).

use crate::ClassifiedError;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe handle to an error value.
///
/// This is the currency of the decoder: rules register these, and
/// `Decoder::translate` accepts and returns them.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Identity token of an error value: the address of its data.
///
/// For errors held in a [`SharedError`], the address is that of the shared
/// allocation and is stable for as long as any handle is alive. Zero-sized
/// errors that do not live behind an `Arc` may share addresses, so only
/// shared handles should be registered as known errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorId(usize);

impl ErrorId {
    /// Identity of the given error.
    #[inline]
    pub fn of(err: &(dyn Error + 'static)) -> Self {
        Self((err as *const dyn Error).cast::<()>() as usize)
    }
}

/// Plain message-only error, the shared analogue of a string sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    message: Cow<'static, str>,
}

impl Sentinel {
    /// Create a sentinel with the given message.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The sentinel's message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Sentinel {}

/// Create a new shared sentinel error with its own identity.
///
/// ```rust
/// use std::sync::LazyLock;
/// use decode_errors::identity::{SharedError, sentinel};
///
/// static ERR_INVALID_TOKEN: LazyLock<SharedError> =
///     LazyLock::new(|| sentinel("invalid token"));
///
/// assert_eq!(ERR_INVALID_TOKEN.to_string(), "invalid token");
/// ```
#[inline]
pub fn sentinel(message: impl Into<Cow<'static, str>>) -> SharedError {
    Arc::new(Sentinel::new(message))
}

/// Move any error into a new [`SharedError`].
#[inline]
pub fn shared<E>(err: E) -> SharedError
where
    E: Error + Send + Sync + 'static,
{
    Arc::new(err)
}

/// Iterator over an error and its transitive sources, outermost first.
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walk `err` and every error it wraps.
#[inline]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// Check whether `err` is `target`, or wraps it anywhere in its chain.
///
/// Comparison is by identity only.
pub fn is(err: &(dyn Error + 'static), target: &SharedError) -> bool {
    let wanted = ErrorId::of(target.as_ref());
    chain(err).any(|e| ErrorId::of(e) == wanted)
}

/// Find the first error of type `T` in the chain of `err`.
pub fn find<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    chain(err).find_map(|e| e.downcast_ref::<T>())
}

/// Find the outermost [`ClassifiedError`] anywhere in the chain of `err`.
///
/// This also finds a classification buried under later wrapping, so it does
/// not tell whether `err` itself came out of a decoder classified. For that,
/// use `err.downcast_ref::<ClassifiedError>()` or `Decoder::decode`.
#[inline]
pub fn classified<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ClassifiedError> {
    find::<ClassifiedError>(err)
}
