//! Reducer builders: ordered, first-match dispatch over typed cases.
//!
//! A [`ReducerBuilder`] is a persistent value. [`case`](ReducerBuilder::case)
//! returns a new builder that shares every earlier case with its parent, so
//! intermediate builders stay valid and can be reused or extended
//! independently.
//!
//! On a match the handler's result *is* the next state. Nothing from the
//! previous state is merged into it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::action::{ActionType, AnyAction};
use crate::creator::ActionCreator;
use crate::error::FsaError;
use crate::guard::Guard;

/// A pure `(state, action) -> state` function.
///
/// Implemented by [`ReducerBuilder`], [`Guarded`] and any closure of the
/// right shape, so they compose freely.
pub trait Reduce<InS, OutS = InS> {
    fn reduce(&self, state: InS, action: &AnyAction) -> OutS;
}

impl<InS, OutS, F> Reduce<InS, OutS> for F
where
    F: Fn(InS, &AnyAction) -> OutS,
{
    fn reduce(&self, state: InS, action: &AnyAction) -> OutS {
        self(state, action)
    }
}

/// Returns the state back when the payload is not the handler's type.
type ErasedHandler<InS, OutS> =
    Arc<dyn Fn(InS, &(dyn Any + Send + Sync)) -> Result<OutS, InS> + Send + Sync>;

struct Case<InS, OutS> {
    action_type: String,
    handler: ErasedHandler<InS, OutS>,
}

struct CaseNode<InS, OutS> {
    case: Case<InS, OutS>,
    prev: Option<Arc<CaseNode<InS, OutS>>>,
}

/// Ordered set of `(creator, handler)` cases compiled into one reducer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fluxa::{ActionCreatorFactory, ReducerBuilder};
///
/// let factory = ActionCreatorFactory::new(Some("todos"));
/// let add = factory.create::<String>("ADD").unwrap();
///
/// let todos = ReducerBuilder::with_initial_state(Arc::new(Vec::<String>::new()))
///     .case(&add, |state: Arc<Vec<String>>, text: &String| {
///         let mut next = (*state).clone();
///         next.push(text.clone());
///         Arc::new(next)
///     });
///
/// let state = todos.dispatch(None, &add.create("hi".into()).into_any()).unwrap();
/// assert_eq!(*state, vec!["hi".to_string()]);
/// ```
pub struct ReducerBuilder<InS, OutS = InS> {
    last: Option<Arc<CaseNode<InS, OutS>>>,
    len: usize,
    initial: Option<Arc<InS>>,
}

impl<S> ReducerBuilder<S, S> {
    /// Reducer that substitutes `initial` when dispatched without a state.
    pub fn with_initial_state(initial: S) -> Self {
        Self {
            last: None,
            len: 0,
            initial: Some(Arc::new(initial)),
        }
    }

    /// Reducer that requires callers to always supply a state.
    pub fn without_initial_state() -> Self {
        Self {
            last: None,
            len: 0,
            initial: None,
        }
    }
}

impl<InS: Into<OutS>, OutS> ReducerBuilder<InS, OutS> {
    /// Reducer whose handlers map `InS` into a different `OutS`.
    ///
    /// Unmatched actions convert the incoming state with [`Into`].
    pub fn upcasting() -> Self {
        Self {
            last: None,
            len: 0,
            initial: None,
        }
    }
}

impl<InS, OutS> ReducerBuilder<InS, OutS> {
    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn initial_state(&self) -> Option<&InS> {
        self.initial.as_deref()
    }

    /// Case types in registration order. Duplicates are listed as registered.
    pub fn case_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.nodes().map(|n| n.case.action_type.as_str()).collect();
        types.reverse();
        types
    }

    fn nodes(&self) -> impl Iterator<Item = &CaseNode<InS, OutS>> {
        std::iter::successors(self.last.as_deref(), |n| n.prev.as_deref())
    }

    /// Earliest-registered case for `action_type`.
    fn find(&self, action_type: &str) -> Option<&Case<InS, OutS>> {
        // Nodes run newest to oldest, so the last hit is the first registered.
        self.nodes()
            .filter(|n| n.case.action_type == action_type)
            .last()
            .map(|n| &n.case)
    }
}

impl<InS: 'static, OutS: 'static> ReducerBuilder<InS, OutS> {
    /// Register `handler` for `creator`'s type, returning a new builder.
    ///
    /// `self` is left untouched. If an earlier case already covers the same
    /// type, that case keeps winning and this one is never reached.
    pub fn case<P, F>(&self, creator: &ActionCreator<P>, handler: F) -> Self
    where
        P: Any + Send + Sync,
        F: Fn(InS, &P) -> OutS + Send + Sync + 'static,
    {
        let erased: ErasedHandler<InS, OutS> = Arc::new(
            move |state: InS, payload: &(dyn Any + Send + Sync)| -> Result<OutS, InS> {
                match payload.downcast_ref::<P>() {
                    Some(p) => Ok(handler(state, p)),
                    None => Err(state),
                }
            },
        );

        Self {
            last: Some(Arc::new(CaseNode {
                case: Case {
                    action_type: creator.action_type().to_owned(),
                    handler: erased,
                },
                prev: self.last.clone(),
            })),
            len: self.len + 1,
            initial: self.initial.clone(),
        }
    }
}

impl<InS: Into<OutS>, OutS> ReducerBuilder<InS, OutS> {
    /// Compute the next state.
    ///
    /// The first registered case whose type equals the action's type runs.
    /// With no match the incoming state is returned as-is (through [`Into`],
    /// which is the identity when `InS == OutS`).
    pub fn reduce(&self, state: InS, action: &AnyAction) -> OutS {
        let action_type = action.action_type();
        let Some(case) = self.find(action_type) else {
            tracing::trace!(action_type, "no case matched");
            return state.into();
        };

        match (case.handler)(state, action.payload_any()) {
            Ok(next) => {
                tracing::trace!(action_type, "case matched");
                next
            }
            Err(state) => {
                tracing::warn!(
                    action_type,
                    payload_type = action.payload_type_name(),
                    "payload does not match case type, state passed through"
                );
                state.into()
            }
        }
    }

    /// Like [`reduce`](Self::reduce), substituting the initial state when
    /// `state` is `None`.
    ///
    /// # Errors
    ///
    /// [`FsaError::MissingState`] when `state` is `None` and the builder has
    /// no initial state.
    pub fn dispatch(&self, state: Option<InS>, action: &AnyAction) -> Result<OutS, FsaError>
    where
        InS: Clone,
    {
        let state = match state {
            Some(state) => state,
            None => self
                .initial
                .as_deref()
                .cloned()
                .ok_or(FsaError::MissingState)?,
        };
        Ok(self.reduce(state, action))
    }

    /// Turn the builder into a plain closure.
    pub fn into_fn(self) -> impl Fn(InS, &AnyAction) -> OutS {
        move |state: InS, action: &AnyAction| self.reduce(state, action)
    }
}

impl<InS: Into<OutS>, OutS> Reduce<InS, OutS> for ReducerBuilder<InS, OutS> {
    fn reduce(&self, state: InS, action: &AnyAction) -> OutS {
        ReducerBuilder::reduce(self, state, action)
    }
}

impl<InS, OutS> Clone for ReducerBuilder<InS, OutS> {
    fn clone(&self) -> Self {
        Self {
            last: self.last.clone(),
            len: self.len,
            initial: self.initial.clone(),
        }
    }
}

impl<InS, OutS> Drop for ReducerBuilder<InS, OutS> {
    // Unlink nodes one at a time; the derived drop recurses once per case.
    fn drop(&mut self) {
        let mut next = self.last.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.prev.take(),
                // Still shared with another builder, which owns the rest.
                Err(_) => break,
            }
        }
    }
}

impl<InS, OutS> fmt::Debug for ReducerBuilder<InS, OutS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerBuilder")
            .field("cases", &self.case_types())
            .field("has_initial_state", &self.initial.is_some())
            .finish()
    }
}

/// Builder seeded with an initial state.
pub fn reducer_with_initial_state<S>(initial: S) -> ReducerBuilder<S, S> {
    ReducerBuilder::with_initial_state(initial)
}

pub fn reducer_without_initial_state<S>() -> ReducerBuilder<S, S> {
    ReducerBuilder::without_initial_state()
}

/// Builder whose output state type differs from its input.
pub fn upcasting_reducer<InS: Into<OutS>, OutS>() -> ReducerBuilder<InS, OutS> {
    ReducerBuilder::upcasting()
}

/// A reducer that only runs for actions accepted by a guard.
#[derive(Debug, Clone)]
pub struct Guarded<G, R> {
    guard: G,
    reducer: R,
}

impl<G, R, InS, OutS> Reduce<InS, OutS> for Guarded<G, R>
where
    G: Guard,
    R: Reduce<InS, OutS>,
    InS: Into<OutS>,
{
    fn reduce(&self, state: InS, action: &AnyAction) -> OutS {
        if self.guard.matches_type(action.action_type()) {
            self.reducer.reduce(state, action)
        } else {
            state.into()
        }
    }
}

/// Gate `reducer` behind `guard`; rejected actions pass the state through.
///
/// # Examples
///
/// ```
/// use fluxa::{is_namespace, when, Action, ActionCreatorFactory, AnyAction, Reduce};
///
/// let todos = ActionCreatorFactory::new(Some("todos"));
/// let count = when(is_namespace(&todos), |n: u32, _: &AnyAction| n + 1);
///
/// let add = todos.create::<()>("ADD").unwrap();
/// assert_eq!(count.reduce(0, &add.empty().into_any()), 1);
/// assert_eq!(count.reduce(0, &Action::new("users/LOGIN", ()).into_any()), 0);
/// ```
pub fn when<G: Guard, R>(guard: G, reducer: R) -> Guarded<G, R> {
    Guarded { guard, reducer }
}
