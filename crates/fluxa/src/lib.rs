//! # Fluxa
//!
//! Typed action creators and first-match reducer builders for a
//! unidirectional state-update architecture.
//!
//! ## Core Concepts
//!
//! Fluxa separates **what happened** from **what it does to state**:
//! - [`Action`] = a tagged event record (`type`, `payload`, `error`, `meta`)
//! - [`ActionCreator`] = the only way to mint actions of one type
//! - [`ReducerBuilder`] = ordered `(creator, handler)` cases compiled into
//!   one `(state, action) -> state` function
//!
//! The key principle: **one type string = one creator**. Factories reject a
//! second creator for the same type while the duplicate check is enabled, so
//! copy-paste mistakes fail at startup instead of misrouting events later.
//!
//! ## Architecture
//!
//! ```text
//! ActionCreatorFactory ("todos")
//!     │
//!     ├─► create("ADD")          ─► ActionCreator<P>  ──┐
//!     │                                                 │ .create(payload)
//!     └─► create_async("FETCH")  ─► started/done/failed │
//!                                                       ▼
//!                                                   Action<P>
//!                                                       │ .into_any()
//!                                                       ▼
//! Host store loop ──(state, AnyAction)──► ReducerBuilder.reduce()
//!                                             │
//!                                             ├─► first case with same type
//!                                             │      └─► handler(state, &P)
//!                                             │
//!                                             └─► no match: state unchanged
//! ```
//!
//! ## Key Invariants
//!
//! 1. **Full type** - `namespace + "/" + local`, or just `local` without a namespace
//! 2. **Unique per factory** - each factory owns its registry; clones and
//!    children share it, independent factories never do
//! 3. **Async triads** - `_STARTED` never errors, `_FAILED` always errors
//! 4. **Persistent builders** - `case` returns a new builder, the old one is untouched
//! 5. **First match wins** - later cases for the same type are never reached
//! 6. **No match, no change** - the incoming state value is returned as-is
//!
//! ## Example
//!
//! ```
//! use fluxa::{is_type, reducer_with_initial_state, ActionCreatorFactory, Guard};
//!
//! let factory = ActionCreatorFactory::new(Some("todos"));
//! let add = factory.create::<String>("ADD").unwrap();
//! let clear = factory.create::<()>("CLEAR").unwrap();
//!
//! let todos = reducer_with_initial_state(Vec::<String>::new())
//!     .case(&add, |mut state, text: &String| {
//!         state.push(text.clone());
//!         state
//!     })
//!     .case(&clear, |_, _| Vec::new());
//!
//! let action = add.create("hi".to_string()).into_any();
//! assert!(is_type(&add).test(&action));
//!
//! let state = todos.dispatch(None, &action).unwrap();
//! assert_eq!(state, vec!["hi".to_string()]);
//! ```
//!
//! ## What This Is Not
//!
//! Fluxa is **not**:
//! - A store or dispatch loop
//! - A persistence layer
//! - A transport for actions between processes
//!
//! Those are host concerns; they consume [`Action`] records and the
//! reducers built here.

mod action;
mod bundle_macro;
mod creator;
mod error;
mod factory;
mod guard;
pub mod meta;
mod reducer;



// Re-export action types
pub use action::{Action, ActionType, AnyAction, Failure, Meta, Success};

// Re-export creator and factory types
pub use creator::ActionCreator;
pub use factory::{
    ActionCreatorFactory, AsyncActionCreators, DuplicateCheck, FactoryBuilder, FactoryConfig,
    HasFactory, DELIMITER, DONE_SUFFIX, FAILED_SUFFIX, MODE_ENV_VAR, STARTED_SUFFIX,
};

// Re-export error types
pub use error::{is_error_value, ErasedPredicate, ErrorPolicy, FsaError};

// Re-export guards
pub use guard::{
    is_namespace, is_type, is_type_of_any, AnyTypeGuard, Guard, NamespaceGuard, TypeGuard,
};

// Re-export reducer types
pub use reducer::{
    reducer_with_initial_state, reducer_without_initial_state, upcasting_reducer, when, Guarded,
    Reduce, ReducerBuilder,
};

pub use meta::MetaBuilder;
