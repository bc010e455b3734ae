//! Assertion helpers for reducer contracts.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use fluxa::{ActionType, AnyAction, Reduce};

/// Assert that `reducer` returns the very same `Arc` for `action`.
///
/// # Panics
///
/// If the reducer produced a different allocation.
#[track_caller]
pub fn assert_passes_through<S, R>(reducer: &R, state: &Arc<S>, action: &AnyAction)
where
    R: Reduce<Arc<S>, Arc<S>>,
{
    let next = reducer.reduce(Arc::clone(state), action);
    assert!(
        Arc::ptr_eq(state, &next),
        "expected {} to leave state untouched, got a new state",
        action.action_type()
    );
}

/// Assert that `reducer` maps `state` to `expected` for `action`.
#[track_caller]
pub fn assert_handled<S, R>(reducer: &R, state: S, action: &AnyAction, expected: &S)
where
    S: PartialEq + Debug,
    R: Reduce<S, S>,
{
    let next = reducer.reduce(state, action);
    assert_eq!(
        &next,
        expected,
        "unexpected state after {}",
        action.action_type()
    );
}

/// Shared log of handler invocations.
///
/// Clone it into handlers, call [`record`](Self::record), then inspect
/// [`entries`](Self::entries) to see which handlers ran and in what order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(label.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
