//! The decoder: classify, translate, decorate.
//!
//! A [`Decoder`] holds exactly two collaborators, a [`Classifier`] and a
//! [`MessageTranslator`], and nothing else. It is built once, is immutable
//! afterwards, and can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use decode_errors::{Code, ClassifiedError, Decoder, Rule};
//! use decode_errors::identity::sentinel;
//! use std::sync::Arc;
//!
//! let err_client = sentinel("client error 1");
//! let decoder = Decoder::new(vec![
//!     Rule::new(Code::new(1001), "error.client").with_error(err_client.clone()),
//! ]);
//!
//! let translated = decoder.translate(err_client.clone());
//! let classified = translated.downcast_ref::<ClassifiedError>().unwrap();
//! assert_eq!(classified.code(), Code::new(1001));
//! assert_eq!(translated.to_string(), "error.client");
//! assert!(Arc::ptr_eq(classified.wrapped(), &err_client));
//!
//! let unmatched = sentinel("unmatched");
//! let passed = decoder.translate(unmatched.clone());
//! assert!(Arc::ptr_eq(&passed, &unmatched));
//! ```

use crate::ClassifiedError;
use crate::classify::{Classification, Classifier, FnClassifier, RuleClassifier};
use crate::identity::SharedError;
use crate::index::{RuleIndex, RuleViolation};
use crate::rules::Rule;
use crate::translate::{FnTranslator, IdentityTranslator, MessageTranslator};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Classifies errors and decorates the ones it recognizes.
#[derive(Clone)]
pub struct Decoder {
    classifier: Arc<dyn Classifier>,
    translator: Arc<dyn MessageTranslator>,
}

impl Decoder {
    /// Decoder over `rules` with the identity translator.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::builder(rules).build()
    }

    /// Start configuring a decoder over `rules`.
    #[inline]
    pub fn builder(rules: Vec<Rule>) -> DecoderBuilder {
        DecoderBuilder::new(rules)
    }

    /// Raw classifier decision for `err`, without decorating.
    #[inline]
    pub fn classify(&self, err: &(dyn Error + 'static)) -> Option<Classification> {
        self.classifier.classify(err)
    }

    /// Classify `err` and report the outcome as a typed value.
    pub fn decode(&self, err: SharedError) -> Decoded {
        match self.classifier.classify(err.as_ref()) {
            None => {
                tracing::trace!("error passed through unclassified");
                Decoded::Unclassified(err)
            }
            Some(Classification { code, message }) => {
                tracing::trace!(code = code.value(), "error classified");
                let message = self.translator.translate(message);
                Decoded::Classified(Arc::new(ClassifiedError::new(code, message, err)))
            }
        }
    }

    /// Classify `err`, returning it unchanged when no rule applies.
    ///
    /// Unclassified errors come back as the very same handle. Classified
    /// errors come back as a [`ClassifiedError`] wrapping the input.
    #[inline]
    pub fn translate(&self, err: SharedError) -> SharedError {
        self.decode(err).into_shared()
    }

    /// [`translate`](Self::translate) the error side of a result.
    ///
    /// `Ok` values are returned untouched.
    #[inline]
    pub fn translate_result<T>(&self, result: Result<T, SharedError>) -> Result<T, SharedError> {
        result.map_err(|err| self.translate(err))
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("classifier", &"<dyn Classifier>")
            .field("translator", &"<dyn MessageTranslator>")
            .finish()
    }
}

/// Result of [`Decoder::decode`].
#[derive(Debug, Clone)]
pub enum Decoded {
    /// No rule applied; holds the input handle.
    Unclassified(SharedError),
    /// A rule applied; holds the decorated error.
    Classified(Arc<ClassifiedError>),
}

impl Decoded {
    /// Whether a rule applied.
    #[inline]
    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }

    /// The decorated error, if a rule applied.
    #[inline]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(err) => Some(&**err),
            Self::Unclassified(_) => None,
        }
    }

    /// Erase the distinction and return a plain shared error.
    #[inline]
    pub fn into_shared(self) -> SharedError {
        match self {
            Self::Unclassified(err) => err,
            Self::Classified(err) => err,
        }
    }
}

/// Construction-time configuration for a [`Decoder`].
///
/// Setters apply in call order and the last setter for a slot wins. Rules
/// are compiled at [`build`](Self::build) time, and only when no custom
/// classifier replaced the rule-backed one.
#[must_use = "builders do nothing until built"]
pub struct DecoderBuilder {
    rules: Vec<Rule>,
    classifier: Option<Arc<dyn Classifier>>,
    translator: Arc<dyn MessageTranslator>,
}

impl DecoderBuilder {
    /// Builder over `rules`, with default classifier and translator.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            classifier: None,
            translator: Arc::new(IdentityTranslator),
        }
    }

    /// Replace the rule-backed classifier entirely.
    ///
    /// The rules given to the builder are ignored once a classifier is set.
    pub fn classifier<C>(mut self, classifier: C) -> Self
    where
        C: Classifier + 'static,
    {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Replace the rule-backed classifier with a closure.
    ///
    /// ```rust
    /// use decode_errors::{Classification, Code, Decoder};
    /// use decode_errors::identity::sentinel;
    ///
    /// let decoder = Decoder::builder(Vec::new())
    ///     .classify_with(|_| Some(Classification::new(Code::new(1000), "An unknown error occurred.")))
    ///     .build();
    ///
    /// assert_eq!(decoder.translate(sentinel("boom")).to_string(), "An unknown error occurred.");
    /// ```
    pub fn classify_with<F>(self, f: F) -> Self
    where
        F: Fn(&(dyn Error + 'static)) -> Option<Classification> + Send + Sync + 'static,
    {
        self.classifier(FnClassifier::new(f))
    }

    /// Replace the message translator.
    pub fn message_translator<T>(mut self, translator: T) -> Self
    where
        T: MessageTranslator + 'static,
    {
        self.translator = Arc::new(translator);
        self
    }

    /// Replace the message translator with a closure.
    pub fn translate_with<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.message_translator(FnTranslator::new(f))
    }

    /// Build the decoder. Rule conflicts resolve last-write-wins.
    pub fn build(self) -> Decoder {
        let classifier: Arc<dyn Classifier> = match self.classifier {
            Some(custom) => custom,
            None => Arc::new(RuleClassifier::new(&self.rules)),
        };
        Decoder {
            classifier,
            translator: self.translator,
        }
    }

    /// Build the decoder, rejecting rule sets that rely on last-write-wins
    /// or contain rules that can never match.
    ///
    /// Validation is skipped when a custom classifier replaced the rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found.
    pub fn try_build(self) -> Result<Decoder, RuleViolation> {
        if self.classifier.is_none() {
            RuleIndex::validate(&self.rules)?;
        }
        Ok(self.build())
    }
}

impl fmt::Debug for DecoderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderBuilder")
            .field("rules", &self.rules.len())
            .field("custom_classifier", &self.classifier.is_some())
            .finish()
    }
}
