//! Declarative classification rules.
//!
//! A rule binds a [`Code`] and a message to the errors it recognizes. It can
//! recognize errors two ways:
//!
//! - **Known errors**: shared sentinel instances, compared by identity
//! - **Matcher**: a predicate for anything identity cannot express, e.g.
//!   type checks or walks through wrapped causes
//!
//! A rule may carry both, or neither (in which case it never matches).
//!
//! # Example
//!
//! ```rust
//! use decode_errors::{Code, Rule, matchers};
//! use decode_errors::identity::sentinel;
//!
//! let err_client = sentinel("client error");
//!
//! let rules = vec![
//!     Rule::new(Code::new(1001), "error.client").with_error(err_client.clone()),
//!     Rule::new(Code::new(1000), "error.catchall").with_matcher(matchers::always()),
//! ];
//! assert_eq!(rules[0].known_errors().len(), 1);
//! ```

use crate::Code;
use crate::identity::SharedError;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an error belongs to a rule's class.
///
/// Shared so that compiled indexes and cloned rules reuse the same closure.
pub type Matcher = Arc<dyn Fn(&(dyn Error + 'static)) -> bool + Send + Sync>;

/// Most rules list a handful of sentinels; keep those inline.
type KnownErrors = SmallVec<[SharedError; 4]>;

/// A single classification rule.
#[derive(Clone)]
pub struct Rule {
    code: Code,
    message: Cow<'static, str>,
    errors: KnownErrors,
    matcher: Option<Matcher>,
}

impl Rule {
    /// Create a rule that matches nothing yet.
    ///
    /// Accepts `Cow<'static, str>` so string literals are stored without
    /// allocating.
    #[inline]
    pub fn new(code: Code, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: SmallVec::new(),
            matcher: None,
        }
    }

    /// Add a known error, compared by identity.
    #[inline]
    pub fn with_error(mut self, err: SharedError) -> Self {
        self.errors.push(err);
        self
    }

    /// Add several known errors, preserving their order.
    #[inline]
    pub fn with_errors<I>(mut self, errs: I) -> Self
    where
        I: IntoIterator<Item = SharedError>,
    {
        self.errors.extend(errs);
        self
    }

    /// Set the rule's matcher, replacing any previous one.
    #[inline]
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Set the rule's matcher from a closure.
    ///
    /// ```rust
    /// # use decode_errors::{Code, Rule};
    /// let rule = Rule::new(Code::new(1002), "error.io")
    ///     .matching(|err| err.downcast_ref::<std::io::Error>().is_some());
    /// assert!(rule.matcher().is_some());
    /// ```
    #[inline]
    pub fn matching<F>(self, matcher: F) -> Self
    where
        F: Fn(&(dyn Error + 'static)) -> bool + Send + Sync + 'static,
    {
        self.with_matcher(Arc::new(matcher))
    }

    /// The rule's code.
    #[inline]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// The rule's message, before any translation.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub(crate) fn message_cow(&self) -> &Cow<'static, str> {
        &self.message
    }

    /// Known errors in declaration order.
    #[inline]
    pub fn known_errors(&self) -> &[SharedError] {
        &self.errors
    }

    /// The rule's matcher, if one was set.
    #[inline]
    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    /// Whether the rule could ever match anything.
    ///
    /// Rules without known errors or a matcher are accepted but inert.
    #[inline]
    pub fn can_match(&self) -> bool {
        !self.errors.is_empty() || self.matcher.is_some()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("known_errors", &self.errors.len())
            .field("matcher", &self.matcher.as_ref().map(|_| "<PRESENT>"))
            .finish()
    }
}
