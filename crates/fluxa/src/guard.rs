//! Type guards: predicates over an action's type tag.
//!
//! A [`TypeGuard`] checks the tag and, on success, hands back the payload as
//! the creator's payload type. Namespace guards only test membership.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::action::{Action, ActionType, AnyAction};
use crate::creator::ActionCreator;
use crate::factory::HasFactory;

/// A predicate over action type strings.
pub trait Guard {
    fn matches_type(&self, action_type: &str) -> bool;

    /// Test an action, creator or raw type string.
    fn test<A: ActionType + ?Sized>(&self, action: &A) -> bool
    where
        Self: Sized,
    {
        self.matches_type(action.action_type())
    }

    /// Keep only the actions this guard accepts, preserving order.
    fn select<'a, A, I>(&self, actions: I) -> Vec<&'a A>
    where
        Self: Sized,
        A: ActionType + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        actions
            .into_iter()
            .filter(|a| self.matches_type(a.action_type()))
            .collect()
    }
}

impl<F> Guard for F
where
    F: Fn(&str) -> bool,
{
    fn matches_type(&self, action_type: &str) -> bool {
        self(action_type)
    }
}

/// Matches exactly one creator's type and narrows the payload to `P`.
pub struct TypeGuard<P> {
    action_type: String,
    _payload: PhantomData<fn() -> P>,
}

impl<P: Any> TypeGuard<P> {
    /// Borrow the payload as `P` if the action has this guard's type.
    ///
    /// Returns `None` for any other type, and for an action of this type
    /// whose payload is not a `P` (possible only for hand-built actions or
    /// duplicates created with the check disabled).
    pub fn narrow<'a>(&self, action: &'a AnyAction) -> Option<&'a P> {
        if action.action_type() != self.action_type {
            return None;
        }
        action.payload::<P>()
    }

    /// Rebuild the typed action, cloning the payload.
    pub fn narrow_action(&self, action: &AnyAction) -> Option<Action<P>>
    where
        P: Clone,
    {
        if action.action_type() != self.action_type {
            return None;
        }
        action.downcast::<P>()
    }
}

impl<P> TypeGuard<P> {
    pub fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl<P> Guard for TypeGuard<P> {
    fn matches_type(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }
}

impl<P> Clone for TypeGuard<P> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            _payload: PhantomData,
        }
    }
}

impl<P> fmt::Debug for TypeGuard<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeGuard").field(&self.action_type).finish()
    }
}

/// Matches any of several creators sharing payload type `P`.
pub struct AnyTypeGuard<P> {
    action_types: SmallVec<[String; 4]>,
    _payload: PhantomData<fn() -> P>,
}

impl<P: Any> AnyTypeGuard<P> {
    pub fn narrow<'a>(&self, action: &'a AnyAction) -> Option<&'a P> {
        if !self.matches_type(action.action_type()) {
            return None;
        }
        action.payload::<P>()
    }
}

impl<P> Guard for AnyTypeGuard<P> {
    fn matches_type(&self, action_type: &str) -> bool {
        self.action_types.iter().any(|t| t == action_type)
    }
}

impl<P> fmt::Debug for AnyTypeGuard<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyTypeGuard")
            .field(&self.action_types)
            .finish()
    }
}

/// Matches every action whose type starts with a factory's base prefix.
#[derive(Debug, Clone)]
pub struct NamespaceGuard {
    base: String,
}

impl NamespaceGuard {
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Guard for NamespaceGuard {
    fn matches_type(&self, action_type: &str) -> bool {
        action_type.starts_with(&self.base)
    }
}

/// Guard for exactly `creator`'s type.
///
/// # Examples
///
/// ```
/// use fluxa::{is_type, ActionCreatorFactory, Guard};
///
/// let factory = ActionCreatorFactory::new(Some("todos"));
/// let add = factory.create::<String>("ADD").unwrap();
/// let remove = factory.create::<usize>("REMOVE").unwrap();
///
/// let action = add.create("x".to_string()).into_any();
/// assert!(is_type(&add).test(&action));
/// assert!(!is_type(&remove).test(&action));
/// assert_eq!(is_type(&add).narrow(&action).map(String::as_str), Some("x"));
/// ```
pub fn is_type<P>(creator: &ActionCreator<P>) -> TypeGuard<P> {
    TypeGuard {
        action_type: creator.action_type().to_owned(),
        _payload: PhantomData,
    }
}

/// Guard matching any of `creators`.
pub fn is_type_of_any<'a, P, I>(creators: I) -> AnyTypeGuard<P>
where
    P: 'a,
    I: IntoIterator<Item = &'a ActionCreator<P>>,
{
    AnyTypeGuard {
        action_types: creators
            .into_iter()
            .map(|c| c.action_type().to_owned())
            .collect(),
        _payload: PhantomData,
    }
}

/// Guard matching every action produced under a factory's namespace.
///
/// Accepts the factory itself or any bundle implementing [`HasFactory`].
/// A factory without a namespace matches every action.
pub fn is_namespace<F: HasFactory + ?Sized>(source: &F) -> NamespaceGuard {
    NamespaceGuard {
        base: source.factory().base().to_owned(),
    }
}
