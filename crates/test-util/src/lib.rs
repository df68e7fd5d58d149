// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Test utilities for the registration core and the controller
pub use ::serde_json;
pub use pretty_assertions::assert_eq;

pub mod fixtures;
pub mod notify;
pub mod store;

#[cfg(feature = "database")]
pub mod database;

/// Helper macro to compare a `[Serialize]` implementor with a JSON literal
///
/// Asserts that the left expression equals the right JSON literal when serialized.
///
/// # Examples
///
/// ```
/// use checkin_test_util::assert_eq_json;
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Attendee {
///     code: String,
///     name: String,
/// }
///
/// let ana = Attendee {
///     code: "1".into(),
///     name: "Ana".into(),
/// };
///
/// assert_eq_json!(
///     ana,
///     {
///         "code": "1",
///         "name": "Ana",
///     }
/// );
/// ```
#[macro_export]
macro_rules! assert_eq_json {
    ($val:expr,$($json:tt)+) => {
        let val: $crate::serde_json::Value = $crate::serde_json::to_value(&$val).expect("Expected value to be serializable");

        $crate::assert_eq!(val, $crate::serde_json::json!($($json)+));
    };
}
