//! Testing utilities for fluxa reducers.
//!
//! - [`ReplayHarness`] folds actions through a reducer and keeps every
//!   intermediate state, standing in for a host store in tests.
//! - [`CallLog`] records which handlers ran, for asserting dispatch order.
//! - [`assert_passes_through`] checks the "no match, no change" contract on
//!   `Arc`-wrapped state.

mod assertions;
mod harness;

pub use assertions::{assert_handled, assert_passes_through, CallLog};
pub use harness::{ReplayHarness, Step};
