//! Convenience macros for declaring codes and rules.
//!
//! # Usage
//!
//! ```rust
//! use decode_errors::{define_codes, matchers, rule, Decoder};
//! use decode_errors::identity::sentinel;
//!
//! define_codes! {
//!     CODE_CATCH_ALL = 1000,
//!     CODE_CLIENT = 1001,
//! }
//!
//! let err_client = sentinel("client error 1");
//! let decoder = Decoder::new(vec![
//!     rule!(CODE_CLIENT, "error.client", [err_client.clone()]),
//!     rule!(CODE_CATCH_ALL, "error.catchall", match matchers::always()),
//! ]);
//!
//! assert_eq!(decoder.translate(err_client).to_string(), "error.client");
//! assert_eq!(decoder.translate(sentinel("other")).to_string(), "error.catchall");
//! ```
//!
//! A zero code is rejected while compiling:
//!
//! ```rust,compile_fail
//! # use decode_errors::define_code;
//! define_code!(CODE_NONE = 0);
//! ```

/// Declare a single public [`Code`](crate::Code) constant.
///
/// Evaluated in const context, so a zero value fails the build.
///
/// ```rust
/// # use decode_errors::{define_code, Code};
/// define_code!(CODE_TIMEOUT = 1004);
/// assert_eq!(CODE_TIMEOUT, Code::new(1004));
/// ```
#[macro_export]
macro_rules! define_code {
    ($(#[$meta:meta])* $name:ident = $value:expr $(,)?) => {
        $(#[$meta])*
        pub const $name: $crate::Code = $crate::Code::new($value);
    };
}

/// Declare a table of public [`Code`](crate::Code) constants.
#[macro_export]
macro_rules! define_codes {
    ($($(#[$meta:meta])* $name:ident = $value:expr),* $(,)?) => {
        $(
            $crate::define_code!($(#[$meta])* $name = $value);
        )*
    };
}

/// Build a [`Rule`](crate::Rule).
///
/// Forms:
///
/// - `rule!(code, message)`: matches nothing until extended
/// - `rule!(code, message, [err, ...])`: known errors
/// - `rule!(code, message, match matcher)`: a [`Matcher`](crate::Matcher)
/// - `rule!(code, message, [err, ...], match matcher)`: both
///
/// Closures go through [`Rule::matching`](crate::Rule::matching) instead,
/// or are wrapped in an `Arc` first.
#[macro_export]
macro_rules! rule {
    ($code:expr, $message:expr $(,)?) => {
        $crate::Rule::new($code, $message)
    };
    ($code:expr, $message:expr, [$($err:expr),* $(,)?] $(,)?) => {
        $crate::Rule::new($code, $message)
            $(.with_error($err))*
    };
    ($code:expr, $message:expr, match $matcher:expr $(,)?) => {
        $crate::Rule::new($code, $message).with_matcher($matcher)
    };
    ($code:expr, $message:expr, [$($err:expr),* $(,)?], match $matcher:expr $(,)?) => {
        $crate::Rule::new($code, $message)
            $(.with_error($err))*
            .with_matcher($matcher)
    };
}
