//! Compiled rule index.
//!
//! Turns an ordered rule set into three lookup tables:
//!
//! | Table             | Key       | Value   | Populated from        |
//! |-------------------|-----------|---------|-----------------------|
//! | `code_to_message` | `Code`    | message | every rule            |
//! | `code_to_matcher` | `Code`    | matcher | rules with a matcher  |
//! | `error_to_code`   | `ErrorId` | `Code`  | every known error     |
//!
//! Compilation walks the rules in order and overwrites on conflict, so the
//! last rule to mention a code or a known error wins. Every code reachable
//! from the matcher or error tables has a message.
//!
//! The index is immutable once built and safe to query from any number of
//! threads.
//!
//! # Strict Mode
//!
//! [`RuleIndex::validate`] reports the situations compilation silently
//! resolves (inert rules, conflicting messages, doubly-claimed errors). It is
//! opt-in; see `DecoderBuilder::try_build`.

use crate::Code;
use crate::identity::{ErrorId, SharedError};
use crate::rules::{Matcher, Rule};
use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Query-optimized form of a rule set.
pub struct RuleIndex {
    code_to_message: HashMap<Code, Cow<'static, str>>,
    /// Kept in first-declaration order so predicate evaluation is deterministic.
    code_to_matcher: Vec<(Code, Matcher)>,
    error_to_code: HashMap<ErrorId, Code>,
    /// Holds every registered error alive so no identity can be recycled.
    anchors: Vec<SharedError>,
}

impl RuleIndex {
    /// Compile rules into an index. Never fails; empty input matches nothing.
    pub fn compile(rules: &[Rule]) -> Self {
        let mut code_to_message = HashMap::with_capacity(rules.len());
        let mut code_to_matcher: Vec<(Code, Matcher)> = Vec::new();
        let mut error_to_code = HashMap::new();
        let mut anchors = Vec::new();

        for rule in rules {
            let code = rule.code();
            code_to_message.insert(code, rule.message_cow().clone());

            if let Some(matcher) = rule.matcher() {
                match code_to_matcher.iter_mut().find(|(c, _)| *c == code) {
                    Some(slot) => slot.1 = Arc::clone(matcher),
                    None => code_to_matcher.push((code, Arc::clone(matcher))),
                }
            }

            for err in rule.known_errors() {
                if error_to_code.insert(ErrorId::of(err.as_ref()), code).is_none() {
                    anchors.push(Arc::clone(err));
                }
            }
        }

        tracing::debug!(
            rules = rules.len(),
            codes = code_to_message.len(),
            matchers = code_to_matcher.len(),
            sentinels = error_to_code.len(),
            "compiled rule index"
        );

        Self {
            code_to_message,
            code_to_matcher,
            error_to_code,
            anchors,
        }
    }

    /// Check rules for the conflicts [`compile`](Self::compile) resolves silently.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found, in rule order.
    pub fn validate(rules: &[Rule]) -> Result<(), RuleViolation> {
        let mut messages: HashMap<Code, &str> = HashMap::with_capacity(rules.len());
        let mut claims: HashMap<ErrorId, Code> = HashMap::new();

        for (position, rule) in rules.iter().enumerate() {
            let code = rule.code();

            if !rule.can_match() {
                return Err(RuleViolation::NeverMatches { code, position });
            }

            match messages.entry(code) {
                Entry::Occupied(existing) if *existing.get() != rule.message() => {
                    return Err(RuleViolation::ConflictingMessage {
                        code,
                        first: existing.get().to_string(),
                        second: rule.message().to_string(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(rule.message());
                }
            }

            for err in rule.known_errors() {
                match claims.entry(ErrorId::of(err.as_ref())) {
                    Entry::Occupied(existing) if *existing.get() != code => {
                        return Err(RuleViolation::ConflictingClaim {
                            first: *existing.get(),
                            second: code,
                            position,
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(slot) => {
                        slot.insert(code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Code registered for this exact error instance.
    #[inline]
    pub fn code_for(&self, err: &(dyn Error + 'static)) -> Option<Code> {
        self.error_to_code.get(&ErrorId::of(err)).copied()
    }

    /// First matcher, in declaration order, that accepts `err`.
    pub fn matching_code(&self, err: &(dyn Error + 'static)) -> Option<Code> {
        self.code_to_matcher
            .iter()
            .find(|(_, matcher)| matcher(err))
            .map(|(code, _)| *code)
    }

    /// Message recorded for `code`.
    #[inline]
    pub fn message(&self, code: Code) -> Option<&Cow<'static, str>> {
        self.code_to_message.get(&code)
    }

    /// Number of distinct codes.
    #[inline]
    pub fn len(&self) -> usize {
        self.code_to_message.len()
    }

    /// Whether the index holds no codes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code_to_message.is_empty()
    }

    /// Number of codes with a matcher.
    #[inline]
    pub fn matcher_count(&self) -> usize {
        self.code_to_matcher.len()
    }

    /// Number of distinct known errors.
    #[inline]
    pub fn sentinel_count(&self) -> usize {
        self.anchors.len()
    }
}

impl fmt::Debug for RuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleIndex")
            .field("codes", &self.code_to_message.len())
            .field("matchers", &self.code_to_matcher.len())
            .field("sentinels", &self.error_to_code.len())
            .finish()
    }
}

/// Rule set problems reported by strict validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// Rule declares neither known errors nor a matcher.
    NeverMatches {
        /// Code of the inert rule.
        code: Code,
        /// Position of the rule in the input.
        position: usize,
    },
    /// Two rules share a code but disagree on its message.
    ConflictingMessage {
        /// Shared code.
        code: Code,
        /// Message of the earlier rule.
        first: String,
        /// Message of the later rule.
        second: String,
    },
    /// The same error instance is registered under two codes.
    ConflictingClaim {
        /// Code that claimed the error first.
        first: Code,
        /// Code that claimed it again.
        second: Code,
        /// Position of the later rule in the input.
        position: usize,
    },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverMatches { code, position } => {
                write!(
                    f,
                    "Rule {} (code {}) has no known errors and no matcher",
                    position, code
                )
            }
            Self::ConflictingMessage {
                code,
                first,
                second,
            } => {
                write!(
                    f,
                    "Code {} declared with conflicting messages '{}' and '{}'",
                    code, first, second
                )
            }
            Self::ConflictingClaim {
                first,
                second,
                position,
            } => {
                write!(
                    f,
                    "Rule {} claims an error already registered under code {} as code {}",
                    position, first, second
                )
            }
        }
    }
}

impl Error for RuleViolation {}
