#![warn(missing_docs)]

//! Use the Rhai scripting language as a configuration format.
//!
//! A configuration source is a snippet of Rhai script text that evaluates to
//! a value; this crate evaluates it against a fresh, sandboxed engine and
//! transfers the result into a caller-supplied `&mut T` destination. The
//! script references the expected result slot through the conventional
//! `config::value(...)` binding, and callers may expose additional constants,
//! functions, and types to the script through named [`BindingSet`]s.
//!
//! Evaluation is a single synchronous call with no shared state: every call
//! builds its own engine, registers its bindings, evaluates once, and either
//! writes the destination exactly once or leaves it untouched and returns a
//! descriptive [`Error`]. Non-terminating script text is bounded by a
//! deadline (ten seconds by default) or an explicit [`CancelToken`].
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Limits {
//!     connections: i64,
//!     timeout: f64,
//! }
//!
//! let mut limits = Limits { connections: 0, timeout: 0.0 };
//! rhaiconf::eval_to(&mut limits, "config::value(#{connections: 32, timeout: 1.5})")?;
//! assert_eq!(limits, Limits { connections: 32, timeout: 1.5 });
//! # Ok::<(), rhaiconf::Error>(())
//! ```

mod bindings;
mod cancel;
mod error;
mod eval;
mod options;

pub use bindings::BindingSet;
pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use eval::{DEFAULT_TIMEOUT, eval_ext_to, eval_ext_with_cancel_to, eval_to, eval_with_cancel_to};
pub use options::EvalOptions;

// Re-export the evaluator so callers can build binding-set modules without
// naming the engine dependency themselves.
pub use rhai;
