//! Classifiers: turn an error into a code and message, or decline.

use crate::Code;
use crate::index::RuleIndex;
use crate::rules::Rule;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Class of the error.
    pub code: Code,
    /// Message for the class, before translation.
    pub message: Cow<'static, str>,
}

impl Classification {
    /// Pair a code with its message.
    #[inline]
    pub fn new(code: Code, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Decides which class, if any, an error belongs to.
///
/// `None` means "unclassified" and is a normal outcome, not a failure.
/// Implementations must be safe to call concurrently.
pub trait Classifier: Send + Sync {
    /// Classify `err`.
    fn classify(&self, err: &(dyn Error + 'static)) -> Option<Classification>;
}

/// Default classifier backed by a compiled [`RuleIndex`].
///
/// Checks run in a fixed order:
///
/// 1. Identity: is `err` one of the registered known errors?
/// 2. Matchers: does any rule's predicate accept `err`?
///
/// Identity wins whenever both would apply.
#[derive(Debug)]
pub struct RuleClassifier {
    index: RuleIndex,
}

impl RuleClassifier {
    /// Compile `rules` into a classifier.
    pub fn new(rules: &[Rule]) -> Self {
        Self {
            index: RuleIndex::compile(rules),
        }
    }

    /// Wrap an already compiled index.
    #[inline]
    pub fn from_index(index: RuleIndex) -> Self {
        Self { index }
    }

    /// The underlying index.
    #[inline]
    pub fn index(&self) -> &RuleIndex {
        &self.index
    }

    fn classification(&self, code: Code) -> Classification {
        let message = self.index.message(code).cloned().unwrap_or_default();
        Classification { code, message }
    }
}

impl Classifier for RuleClassifier {
    fn classify(&self, err: &(dyn Error + 'static)) -> Option<Classification> {
        if let Some(code) = self.index.code_for(err) {
            return Some(self.classification(code));
        }
        self.index
            .matching_code(err)
            .map(|code| self.classification(code))
    }
}

/// Adapter running a closure as a [`Classifier`].
pub struct FnClassifier<F> {
    f: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&(dyn Error + 'static)) -> Option<Classification> + Send + Sync,
{
    /// Wrap `f`.
    #[inline]
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Classifier for FnClassifier<F>
where
    F: Fn(&(dyn Error + 'static)) -> Option<Classification> + Send + Sync,
{
    #[inline]
    fn classify(&self, err: &(dyn Error + 'static)) -> Option<Classification> {
        (self.f)(err)
    }
}

impl<F> fmt::Debug for FnClassifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnClassifier(<closure>)")
    }
}
