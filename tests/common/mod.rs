//! Shared test utilities for kiln integration harnesses.
//!
//! Import everything you need via `#[macro_use] mod common; use common::*;`
//! at the top of each harness file. Helpers panic on setup failure rather
//! than returning `Result` — a fixture that cannot be stood up is a broken
//! harness, not a test outcome.

#[macro_use]
pub mod assertions;
pub mod contracts;
pub mod fixtures;

pub use contracts::*;
pub use fixtures::*;
