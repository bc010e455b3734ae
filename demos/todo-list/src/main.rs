//! # Todo List Demo
//!
//! Wires a namespaced factory, an async triad and a reducer builder together,
//! then plays a small scripted session through a hand-rolled store loop.
//!
//! Run with `RUST_LOG=fluxa=trace cargo run -p todo-list-demo` to see dispatch
//! traces.

use anyhow::Result;
use fluxa::{
    action_bundle, is_namespace, reducer_with_initial_state, when, ActionCreatorFactory,
    ActionType, AnyAction, AsyncActionCreators, Failure, Guard, MetaBuilder, Reduce,
    ReducerBuilder, Success,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
struct Todo {
    id: usize,
    text: String,
    done: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
struct TodoState {
    todos: Vec<Todo>,
    syncing: bool,
    last_error: Option<String>,
}

// ============================================================================
// Actions
// ============================================================================

action_bundle! {
    struct TodoActions {
        add: String = "ADD",
        toggle: usize = "TOGGLE",
        clear_done: () = "CLEAR_DONE",
    }
}

/// Remote sync of the list: params are the number of todos sent.
type SyncActions = AsyncActionCreators<usize, usize, String>;

// ============================================================================
// Reducer
// ============================================================================

fn todo_reducer(actions: &TodoActions, sync: &SyncActions) -> ReducerBuilder<TodoState> {
    reducer_with_initial_state(TodoState::default())
        .case(&actions.add, |mut state: TodoState, text: &String| {
            let id = state.todos.len();
            state.todos.push(Todo {
                id,
                text: text.clone(),
                done: false,
            });
            state
        })
        .case(&actions.toggle, |mut state: TodoState, id: &usize| {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) {
                todo.done = !todo.done;
            }
            state
        })
        .case(&actions.clear_done, |mut state: TodoState, _| {
            state.todos.retain(|t| !t.done);
            state
        })
        .case(&sync.started, |state: TodoState, _| TodoState {
            syncing: true,
            last_error: None,
            ..state
        })
        .case(&sync.done, |state: TodoState, _: &Success<usize, usize>| TodoState {
            syncing: false,
            ..state
        })
        .case(&sync.failed, |state: TodoState, f: &Failure<usize, String>| TodoState {
            syncing: false,
            last_error: Some(f.error.clone()),
            ..state
        })
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = ActionCreatorFactory::builder()
        .namespace("app")
        .meta(MetaBuilder::new().insert("client", "todo-demo"))
        .build();

    let actions = TodoActions::new(app.child("todos"))?;
    let sync: SyncActions = app.child("sync").create_async("PUSH")?;

    let reducer = todo_reducer(&actions, &sync);
    let todo_edits = when(is_namespace(&actions), |n: usize, _: &AnyAction| n + 1);

    let session = MetaBuilder::new().actor("demo-user").new_correlation_id().build();
    let script: Vec<AnyAction> = vec![
        actions.add.create_with_meta("write docs".into(), session).into_any(),
        actions.add.create("ship it".into()).into_any(),
        actions.toggle.create(0).into_any(),
        sync.started.create(2).into_any(),
        sync.failed
            .create(Failure {
                params: 2,
                error: "server unavailable".into(),
            })
            .into_any(),
        sync.started.create(2).into_any(),
        sync.done.create(Success { params: 2, result: 2 }).into_any(),
        actions.clear_done.empty().into_any(),
    ];

    let mut state = reducer.dispatch(None, &script[0])?;
    let mut edits = todo_edits.reduce(0, &script[0]);
    for action in &script[1..] {
        state = reducer.reduce(state, action);
        edits = todo_edits.reduce(edits, action);
        tracing::info!(
            action_type = action.action_type(),
            error = action.error(),
            "dispatched"
        );
    }

    let sync_actions = is_namespace(&app.child("sync")).select(&script);
    println!("{}", serde_json::to_string_pretty(&state)?);
    println!("todo edits: {edits}, sync actions: {}", sync_actions.len());

    Ok(())
}
