#![deny(missing_docs)]

//! # Prefix Matching
//!
//! Decides whether an import literal, exactly as written in the source
//! (quotes included), belongs to the relocated root.
//!
//! The comparison is purely textual. There is no path-segment boundary
//! check, so the prefix `acme/contract` also claims `acme/contractX`.

/// Returns true if `literal` starts with a double quote followed by `prefix`.
///
/// # Examples
/// ```
/// use reroot_core::matcher::matches_prefix;
///
/// assert!(matches_prefix("\"acme/contract/v1\"", "acme/contract"));
/// assert!(matches_prefix("\"acme/contractX\"", "acme/contract"));
/// assert!(!matches_prefix("\"fmt\"", "acme/contract"));
/// ```
pub fn matches_prefix(literal: &str, prefix: &str) -> bool {
    literal
        .strip_prefix('"')
        .is_some_and(|rest| rest.starts_with(prefix))
}
