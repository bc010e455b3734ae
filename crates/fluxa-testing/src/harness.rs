//! Action replay harness.

use fluxa::{AnyAction, Guard, Reduce};

/// One dispatched action with the states around it.
#[derive(Debug, Clone)]
pub struct Step<S> {
    pub action: AnyAction,
    pub before: S,
    pub after: S,
}

/// Minimal store loop for tests: holds a state, applies actions in order and
/// records each step.
///
/// # Example
///
/// ```
/// use fluxa::{reducer_with_initial_state, ActionCreatorFactory};
/// use fluxa_testing::ReplayHarness;
///
/// let factory = ActionCreatorFactory::new(Some("counter"));
/// let add = factory.create::<i32>("ADD").unwrap();
/// let reducer = reducer_with_initial_state(0_i32).case(&add, |s, n: &i32| s + n);
///
/// let mut harness = ReplayHarness::new(reducer, 0);
/// harness.dispatch(add.create(2));
/// harness.dispatch(add.create(3));
///
/// assert_eq!(*harness.state(), 5);
/// assert_eq!(harness.history().len(), 2);
/// ```
pub struct ReplayHarness<S, R> {
    reducer: R,
    state: S,
    history: Vec<Step<S>>,
}

impl<S, R> ReplayHarness<S, R>
where
    S: Clone,
    R: Reduce<S, S>,
{
    pub fn new(reducer: R, initial: S) -> Self {
        Self {
            reducer,
            state: initial,
            history: Vec::new(),
        }
    }

    /// Apply one action and return the new state.
    pub fn dispatch(&mut self, action: impl Into<AnyAction>) -> &S {
        let action = action.into();
        let before = self.state.clone();
        let after = self.reducer.reduce(before.clone(), &action);
        self.state = after.clone();
        self.history.push(Step {
            action,
            before,
            after,
        });
        &self.state
    }

    /// Apply every action in order.
    pub fn dispatch_all<I>(&mut self, actions: I) -> &S
    where
        I: IntoIterator,
        I::Item: Into<AnyAction>,
    {
        for action in actions {
            self.dispatch(action);
        }
        &self.state
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn history(&self) -> &[Step<S>] {
        &self.history
    }

    /// Dispatched actions accepted by `guard`, in dispatch order.
    pub fn actions_matching<G: Guard>(&self, guard: &G) -> Vec<&AnyAction> {
        guard.select(self.history.iter().map(|step| &step.action))
    }

    /// Drop recorded history, keeping the current state.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn into_state(self) -> S {
        self.state
    }
}
