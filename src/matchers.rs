//! Stock matchers for common rule shapes.
//!
//! Every matcher here walks the full cause chain, so it keeps working when
//! the error it looks for has been wrapped by another layer.

use crate::identity::{self, ErrorId, SharedError};
use crate::rules::Matcher;
use std::error::Error;
use std::sync::Arc;

/// Matches everything. Useful as a catch-all rule.
pub fn always() -> Matcher {
    Arc::new(|_: &(dyn Error + 'static)| true)
}

/// Matches `target`, or any error wrapping it.
///
/// ```rust
/// use decode_errors::matchers;
/// use decode_errors::identity::sentinel;
///
/// let target = sentinel("wrapped error");
/// let matcher = matchers::is(target.clone());
/// assert!(matcher(target.as_ref()));
/// assert!(!matcher(sentinel("wrapped error").as_ref()));
/// ```
pub fn is(target: SharedError) -> Matcher {
    Arc::new(move |err: &(dyn Error + 'static)| identity::is(err, &target))
}

/// Matches any of `targets`, or any error wrapping one of them.
pub fn is_any<I>(targets: I) -> Matcher
where
    I: IntoIterator<Item = SharedError>,
{
    let targets: Vec<SharedError> = targets.into_iter().collect();
    Arc::new(move |err: &(dyn Error + 'static)| {
        identity::chain(err).any(|e| {
            let id = ErrorId::of(e);
            targets.iter().any(|t| ErrorId::of(t.as_ref()) == id)
        })
    })
}

/// Matches any error whose chain contains a `T`.
pub fn is_type<T>() -> Matcher
where
    T: Error + 'static,
{
    Arc::new(|err: &(dyn Error + 'static)| identity::find::<T>(err).is_some())
}
