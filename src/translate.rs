//! Message translators: post-process the message of a classified error.
//!
//! Translators only ever see messages of matched errors. Unclassified errors
//! keep their own text untouched.
//!
//! A common setup is to declare rule messages as keys and resolve them
//! against a [`MessageCatalog`]:
//!
//! ```rust
//! use decode_errors::translate::{MessageCatalog, MessageTranslator};
//!
//! let catalog = MessageCatalog::new()
//!     .with_entry("error.auth", "The provided token is not valid.");
//!
//! assert_eq!(catalog.translate("error.auth".into()), "The provided token is not valid.");
//! assert_eq!(catalog.translate("error.unknown".into()), "error.unknown");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Rewrites a matched message.
///
/// Called synchronously from `Decoder::translate`; implementations that
/// block are responsible for their own timeouts.
pub trait MessageTranslator: Send + Sync {
    /// Translate `message`.
    fn translate(&self, message: Cow<'static, str>) -> Cow<'static, str>;
}

/// Returns messages as-is. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl MessageTranslator for IdentityTranslator {
    #[inline]
    fn translate(&self, message: Cow<'static, str>) -> Cow<'static, str> {
        message
    }
}

/// Adapter running a closure as a [`MessageTranslator`].
pub struct FnTranslator<F> {
    f: F,
}

impl<F> FnTranslator<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    /// Wrap `f`.
    #[inline]
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> MessageTranslator for FnTranslator<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    #[inline]
    fn translate(&self, message: Cow<'static, str>) -> Cow<'static, str> {
        Cow::Owned((self.f)(&message))
    }
}

impl<F> fmt::Debug for FnTranslator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnTranslator(<closure>)")
    }
}

/// Key-based lookup table, e.g. one locale's strings.
///
/// Keys without an entry fall through unchanged, so a missing translation
/// still shows something meaningful.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<Cow<'static, str>, Cow<'static, str>>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        text: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[inline]
    pub fn with_entry(
        mut self,
        key: impl Into<Cow<'static, str>>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(key, text);
        self
    }

    /// Text for `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|text| text.as_ref())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MessageCatalog
where
    K: Into<Cow<'static, str>>,
    V: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl MessageTranslator for MessageCatalog {
    fn translate(&self, message: Cow<'static, str>) -> Cow<'static, str> {
        match self.entries.get(message.as_ref()) {
            Some(text) => text.clone(),
            None => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_borrowed_unchanged() {
        let out = IdentityTranslator.translate(Cow::Borrowed("error.client"));
        assert!(matches!(out, Cow::Borrowed("error.client")));
    }

    #[test]
    fn fn_translator_applies_closure() {
        let upper = FnTranslator::new(|msg: &str| msg.to_uppercase());
        assert_eq!(upper.translate("quiet".into()), "QUIET");
    }

    #[test]
    fn catalog_resolves_known_keys() {
        let catalog: MessageCatalog = [("error.custom_defined", "Translated custom error.")]
            .into_iter()
            .collect();

        assert_eq!(
            catalog.translate("error.custom_defined".into()),
            "Translated custom error."
        );
        assert_eq!(catalog.get("error.custom_defined"), Some("Translated custom error."));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn catalog_falls_back_to_key() {
        let catalog = MessageCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.translate("error.missing".into()), "error.missing");
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("k", "one").insert("k", "two");
        assert_eq!(catalog.get("k"), Some("two"));
    }
}
