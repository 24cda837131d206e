//! Property-based tests for decode_errors
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use decode_errors::identity::{self, SharedError, sentinel};
use decode_errors::{
    ClassifiedError, Code, Decoder, MAX_FIELD_OUTPUT_LEN, Rule, TRUNCATION_INDICATOR, matchers,
};
use proptest::prelude::*;
use std::sync::Arc;

/// Code of `err` itself, ignoring anything it wraps.
fn code_of(err: &SharedError) -> Option<Code> {
    err.downcast_ref::<ClassifiedError>().map(ClassifiedError::code)
}

// ============================================================================
// CLASSIFICATION PROPERTIES
// ============================================================================

proptest! {
    /// Errors nothing recognizes come back as the same handle
    #[test]
    fn unclassified_errors_pass_through(
        message in "\\PC{0,200}",
        codes in prop::collection::vec(1i32..10_000, 0..8),
    ) {
        let rules: Vec<Rule> = codes
            .iter()
            .map(|&c| Rule::new(Code::new(c), format!("m{}", c)).with_error(sentinel("registered")))
            .collect();
        let decoder = Decoder::new(rules);

        let err = sentinel(message);
        let out = decoder.translate(Arc::clone(&err));

        prop_assert!(Arc::ptr_eq(&out, &err));
        prop_assert!(code_of(&out).is_none());
    }

    /// Every registered error maps to its rule's code and message
    #[test]
    fn known_errors_map_to_their_rule(count in 1usize..32) {
        let errors: Vec<SharedError> = (0..count).map(|i| sentinel(format!("e{}", i))).collect();
        let rules: Vec<Rule> = errors
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let code = Code::new(i as i32 + 1);
                Rule::new(code, format!("msg.{}", i)).with_error(Arc::clone(e))
            })
            .collect();
        let decoder = Decoder::new(rules);

        for (i, e) in errors.iter().enumerate() {
            let out = decoder.translate(Arc::clone(e));
            prop_assert_eq!(code_of(&out), Some(Code::new(i as i32 + 1)));
            prop_assert_eq!(out.to_string(), format!("msg.{}", i));
            prop_assert!(identity::is(out.as_ref(), e));
        }
    }

    /// Identity hits win regardless of where the catch-all is declared
    #[test]
    fn identity_beats_matchers(catch_all_first in any::<bool>()) {
        let known = sentinel("known");
        let catch_all = Rule::new(Code::new(1000), "error.catchall").with_matcher(matchers::always());
        let specific = Rule::new(Code::new(1001), "error.known").with_error(Arc::clone(&known));

        let rules = if catch_all_first {
            vec![catch_all, specific]
        } else {
            vec![specific, catch_all]
        };
        let decoder = Decoder::new(rules);

        prop_assert_eq!(code_of(&decoder.translate(known)), Some(Code::new(1001)));
        prop_assert_eq!(code_of(&decoder.translate(sentinel("other"))), Some(Code::new(1000)));
    }

    /// The translator only ever sees classified messages
    #[test]
    fn translator_scope(message in "\\PC{1,100}") {
        let known = sentinel("known");
        let decoder = Decoder::builder(vec![
            Rule::new(Code::new(7), "key").with_error(Arc::clone(&known)),
        ])
        .translate_with(|msg| format!("<{}>", msg))
        .build();

        prop_assert_eq!(decoder.translate(sentinel(message.clone())).to_string(), message);
        prop_assert_eq!(decoder.translate(known).to_string(), "<key>");
    }
}

// ============================================================================
// LOGGING PROPERTIES
// ============================================================================

proptest! {
    /// Formatted log lines are valid UTF-8 and bounded
    #[test]
    fn internal_log_is_bounded(
        message in "\\PC{0,3000}",
        original in "\\PC{0,3000}",
    ) {
        let err = ClassifiedError::new(Code::new(1001), message, sentinel(original));

        let mut buffer = String::new();
        err.internal_log().write_to(&mut buffer).unwrap();

        prop_assert!(std::str::from_utf8(buffer.as_bytes()).is_ok());
        // Two truncated fields plus fixed framing
        prop_assert!(buffer.len() <= 2 * MAX_FIELD_OUTPUT_LEN + 64);
    }

    /// Short fields are never truncated
    #[test]
    fn short_fields_survive(message in "[a-z.]{0,64}") {
        let err = ClassifiedError::new(Code::new(1), message.clone(), sentinel("cause"));
        let line = err.internal_log().to_string();

        prop_assert!(line.contains(&message));
        prop_assert!(!line.contains(TRUNCATION_INDICATOR));
    }
}

// ============================================================================
// PASS-THROUGH PROPERTIES
// ============================================================================

proptest! {
    /// An earlier classification buried in the chain never makes a
    /// pass-through look classified
    #[test]
    fn reclassification_only_happens_at_the_top(code in 1i32..10_000, depth in 1usize..5) {
        let mut err: SharedError =
            Arc::new(ClassifiedError::new(Code::new(code), "inner", sentinel("root")));
        for _ in 0..depth {
            err = Arc::new(Layer(err));
        }
        let decoder = Decoder::new(vec![
            Rule::new(Code::new(-1), "error.never").with_error(sentinel("unrelated")),
        ]);

        let decoded = decoder.decode(Arc::clone(&err));
        prop_assert!(!decoded.is_classified());

        let out = decoded.into_shared();
        prop_assert!(Arc::ptr_eq(&out, &err));
        prop_assert!(code_of(&out).is_none());
        prop_assert_eq!(identity::classified(out.as_ref()).map(ClassifiedError::code), Some(Code::new(code)));
    }
}

/// Wrapping layer that forwards to its inner error.
#[derive(Debug)]
struct Layer(SharedError);

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer: {}", self.0)
    }
}

impl std::error::Error for Layer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}
