//! Action creators: callable constructors bound to one action type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::action::{Action, ActionType, Meta};
use crate::error::{ErasedPredicate, ErrorPolicy};
use crate::meta::merge_layers;
use crate::reducer::ReducerBuilder;

struct CreatorInner<P> {
    action_type: String,
    base: String,
    factory_meta: Option<Arc<Meta>>,
    common_meta: Option<Meta>,
    error_policy: ErrorPolicy<P>,
    default_is_error: ErasedPredicate,
}

/// Produces [`Action`]s of exactly one type.
///
/// Creators are obtained from an
/// [`ActionCreatorFactory`](crate::ActionCreatorFactory) and are immutable.
/// Cloning is cheap and every clone produces identical actions.
///
/// # Examples
///
/// ```
/// use fluxa::ActionCreatorFactory;
///
/// let factory = ActionCreatorFactory::new(Some("todos"));
/// let add = factory.create::<String>("ADD").unwrap();
///
/// let action = add.create("buy milk".to_string());
/// assert_eq!(action.action_type, "todos/ADD");
/// assert_eq!(action.payload, "buy milk");
/// assert!(!action.error);
/// ```
pub struct ActionCreator<P> {
    inner: Arc<CreatorInner<P>>,
}

impl<P> ActionCreator<P> {
    pub(crate) fn new(
        action_type: String,
        base: String,
        factory_meta: Option<Arc<Meta>>,
        common_meta: Option<Meta>,
        error_policy: ErrorPolicy<P>,
        default_is_error: ErasedPredicate,
    ) -> Self {
        Self {
            inner: Arc::new(CreatorInner {
                action_type,
                base,
                factory_meta,
                common_meta,
                error_policy,
                default_is_error,
            }),
        }
    }

    /// The full type string, namespace included.
    pub fn action_type(&self) -> &str {
        &self.inner.action_type
    }

    /// Namespace prefix including the trailing delimiter, or `""`.
    pub fn base(&self) -> &str {
        &self.inner.base
    }

    /// Meta attached to every action from this creator (before call-site meta).
    pub fn common_meta(&self) -> Option<&Meta> {
        self.inner.common_meta.as_ref()
    }
}

impl<P: Any> ActionCreator<P> {
    /// Whether an action built from `payload` carries the error flag.
    pub fn is_error(&self, payload: &P) -> bool {
        match &self.inner.error_policy {
            ErrorPolicy::Default => {
                let erased: &dyn Any = payload;
                (self.inner.default_is_error)(erased)
            }
            ErrorPolicy::Always => true,
            ErrorPolicy::Never => false,
            ErrorPolicy::Predicate(f) => f(payload),
        }
    }

    /// Build an action for `payload`.
    pub fn create(&self, payload: P) -> Action<P> {
        self.build(payload, None)
    }

    /// Build an action, layering `meta` over factory and creator meta.
    pub fn create_with_meta(&self, payload: P, meta: Meta) -> Action<P> {
        self.build(payload, Some(&meta))
    }

    fn build(&self, payload: P, call_meta: Option<&Meta>) -> Action<P> {
        let inner = &*self.inner;
        let meta = merge_layers(&[
            inner.factory_meta.as_deref(),
            inner.common_meta.as_ref(),
            call_meta,
        ]);
        let error = self.is_error(&payload);

        Action {
            action_type: inner.action_type.clone(),
            payload,
            error,
            meta,
        }
    }
}

impl<P: Any + Send + Sync> ActionCreator<P> {
    /// Bind `handler` to this creator's type.
    ///
    /// The result is a one-case reducer: it runs `handler` for actions of
    /// this type and passes every other state through unchanged.
    pub fn reduce<InS, OutS, F>(&self, handler: F) -> ReducerBuilder<InS, OutS>
    where
        InS: Into<OutS> + 'static,
        OutS: 'static,
        F: Fn(InS, &P) -> OutS + Send + Sync + 'static,
    {
        ReducerBuilder::upcasting().case(self, handler)
    }
}

impl ActionCreator<()> {
    /// Build a payload-less action.
    pub fn empty(&self) -> Action<()> {
        self.create(())
    }
}

impl<P> ActionType for ActionCreator<P> {
    fn action_type(&self) -> &str {
        &self.inner.action_type
    }
}

impl<P> Clone for ActionCreator<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> fmt::Debug for ActionCreator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("type", &self.inner.action_type)
            .field("base", &self.inner.base)
            .field("error_policy", &self.inner.error_policy)
            .finish()
    }
}
