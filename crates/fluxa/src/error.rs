//! Error types and error classification for actions.
//!
//! Two unrelated notions of "error" live here:
//! - [`FsaError`] is a Rust error returned to the caller when a creator or
//!   reducer is misused (duplicate type, missing state).
//! - [`ErrorPolicy`] decides whether an [`Action`](crate::Action) carries the
//!   `error` flag. That flag is data routed by the application, never a
//!   failure of this crate.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Errors surfaced by factories and reducers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsaError {
    /// A creator with this full type string already exists on the factory.
    ///
    /// Raised at creator construction time, only while the factory's
    /// duplicate check is enabled.
    #[error("duplicate action type: {action_type}")]
    DuplicateType { action_type: String },

    /// Dispatch received no state and the reducer has no initial value.
    #[error("no state supplied and reducer has no initial state")]
    MissingState,
}

/// Predicate applied to a type-erased payload.
pub type ErasedPredicate = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// Decides whether an action built from a payload is flagged as an error.
pub enum ErrorPolicy<P> {
    /// Defer to the owning factory's default predicate.
    Default,
    /// Every action carries `error: true`.
    Always,
    /// No action carries the error flag.
    Never,
    /// Flag the action when the predicate returns `true` for its payload.
    Predicate(Arc<dyn Fn(&P) -> bool + Send + Sync>),
}

impl<P> ErrorPolicy<P> {
    /// Build a policy from a payload predicate.
    pub fn predicate(f: impl Fn(&P) -> bool + Send + Sync + 'static) -> Self {
        ErrorPolicy::Predicate(Arc::new(f))
    }
}

impl<P> Default for ErrorPolicy<P> {
    fn default() -> Self {
        ErrorPolicy::Default
    }
}

impl<P> Clone for ErrorPolicy<P> {
    fn clone(&self) -> Self {
        match self {
            ErrorPolicy::Default => ErrorPolicy::Default,
            ErrorPolicy::Always => ErrorPolicy::Always,
            ErrorPolicy::Never => ErrorPolicy::Never,
            ErrorPolicy::Predicate(f) => ErrorPolicy::Predicate(Arc::clone(f)),
        }
    }
}

impl<P> fmt::Debug for ErrorPolicy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Default => f.write_str("Default"),
            ErrorPolicy::Always => f.write_str("Always"),
            ErrorPolicy::Never => f.write_str("Never"),
            ErrorPolicy::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<P> From<bool> for ErrorPolicy<P> {
    fn from(flag: bool) -> Self {
        if flag {
            ErrorPolicy::Always
        } else {
            ErrorPolicy::Never
        }
    }
}

/// Default error classification used by factories.
///
/// Returns `true` when the payload is a recognized error value:
/// [`anyhow::Error`], `Box<dyn Error + Send + Sync>`, [`std::io::Error`]
/// or [`FsaError`]. Any other payload is classified as non-error.
pub fn is_error_value(payload: &dyn Any) -> bool {
    payload.is::<anyhow::Error>()
        || payload.is::<Box<dyn std::error::Error + Send + Sync>>()
        || payload.is::<std::io::Error>()
        || payload.is::<FsaError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_type_display_names_the_type() {
        let err = FsaError::DuplicateType {
            action_type: "todos/ADD".into(),
        };
        assert_eq!(err.to_string(), "duplicate action type: todos/ADD");
    }

    #[test]
    fn missing_state_display() {
        assert_eq!(
            FsaError::MissingState.to_string(),
            "no state supplied and reducer has no initial state"
        );
    }

    #[test]
    fn recognizes_error_payloads() {
        assert!(is_error_value(&anyhow::anyhow!("boom")));
        assert!(is_error_value(&std::io::Error::other("disk")));
        let boxed: Box<dyn std::error::Error + Send + Sync> = "bad".into();
        assert!(is_error_value(&boxed));
        assert!(is_error_value(&FsaError::MissingState));
    }

    #[test]
    fn plain_payloads_are_not_errors() {
        assert!(!is_error_value(&"boom"));
        assert!(!is_error_value(&String::from("boom")));
        assert!(!is_error_value(&42_u32));
        assert!(!is_error_value(&()));
    }

    #[test]
    fn policy_from_bool() {
        assert!(matches!(ErrorPolicy::<()>::from(true), ErrorPolicy::Always));
        assert!(matches!(ErrorPolicy::<()>::from(false), ErrorPolicy::Never));
    }

    #[test]
    fn predicate_policy_debug_hides_closure() {
        let policy = ErrorPolicy::<u8>::predicate(|n| *n > 3);
        assert_eq!(format!("{policy:?}"), "Predicate(..)");
    }

    // Errors must cross thread boundaries alongside the actions that carry them.
    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<FsaError>();
            assert_send_sync::<ErrorPolicy<String>>();
        }
    };
}
