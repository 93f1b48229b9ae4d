//! Built-in contracts and their typed bindings.

pub mod greeter;

pub use greeter::{Greeter, GreeterContract};
