//! The action record and its type-erased form.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Open metadata side-channel carried by actions.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Anything that carries an action type tag.
///
/// Guards test against this trait, so they accept typed actions, erased
/// actions and creators alike.
pub trait ActionType {
    /// The full type string, including any namespace prefix.
    fn action_type(&self) -> &str;
}

impl ActionType for str {
    fn action_type(&self) -> &str {
        self
    }
}

impl ActionType for String {
    fn action_type(&self) -> &str {
        self
    }
}

impl<T: ActionType + ?Sized> ActionType for &T {
    fn action_type(&self) -> &str {
        (**self).action_type()
    }
}

/// An immutable event record.
///
/// Serializes to `{ "type": .., "payload": .., "error"?: true, "meta"?: {..} }`.
/// `error` is omitted unless set, `meta` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action<P> {
    #[serde(rename = "type")]
    pub action_type: String,
    pub payload: P,
    #[serde(default, skip_serializing_if = "is_false")]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl<P> Action<P> {
    /// Build a bare action with no error flag and no meta.
    pub fn new(action_type: impl Into<String>, payload: P) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
            error: false,
            meta: None,
        }
    }

    /// Look up a single meta entry.
    pub fn meta_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.meta.as_ref().and_then(|m| m.get(key))
    }

    /// Erase the payload type so the action can flow through a dispatch function.
    pub fn into_any(self) -> AnyAction
    where
        P: Any + Send + Sync,
    {
        AnyAction::from(self)
    }
}

impl<P> ActionType for Action<P> {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

/// An action whose payload type has been erased.
///
/// This is what reducers receive. The payload is shared, so cloning an
/// `AnyAction` is cheap and replaying it does not copy payload data.
#[derive(Clone)]
pub struct AnyAction {
    action_type: String,
    payload: Arc<dyn Any + Send + Sync>,
    payload_type: &'static str,
    error: bool,
    meta: Option<Meta>,
}

impl AnyAction {
    pub fn error(&self) -> bool {
        self.error
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Rust type name of the erased payload, for diagnostics.
    pub fn payload_type_name(&self) -> &'static str {
        self.payload_type
    }

    /// Borrow the payload as `P`.
    ///
    /// Returns `None` if the payload is of another type. Prefer going through
    /// a [`TypeGuard`](crate::TypeGuard), which also checks the type tag.
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref::<P>()
    }

    pub(crate) fn payload_any(&self) -> &(dyn Any + Send + Sync) {
        &*self.payload
    }

    /// Rebuild a typed action, cloning the payload.
    pub fn downcast<P: Any + Clone>(&self) -> Option<Action<P>> {
        let payload = self.payload::<P>()?.clone();
        Some(Action {
            action_type: self.action_type.clone(),
            payload,
            error: self.error,
            meta: self.meta.clone(),
        })
    }
}

impl ActionType for AnyAction {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl<P: Any + Send + Sync> From<Action<P>> for AnyAction {
    fn from(action: Action<P>) -> Self {
        Self {
            action_type: action.action_type,
            payload: Arc::new(action.payload),
            payload_type: std::any::type_name::<P>(),
            error: action.error,
            meta: action.meta,
        }
    }
}

impl fmt::Debug for AnyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyAction")
            .field("type", &self.action_type)
            .field("payload", &format_args!("<{}>", self.payload_type))
            .field("error", &self.error)
            .field("meta", &self.meta)
            .finish()
    }
}

/// Payload of an async triad's `done` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success<P, S> {
    pub params: P,
    pub result: S,
}

/// Payload of an async triad's `failed` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure<P, E> {
    pub params: P,
    pub error: E,
}
