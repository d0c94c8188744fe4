use std::{result::Result as StdResult, sync::Arc, time::Duration};

use rhai::{EvalAltResult, ParseError};

/// Errors that can occur while evaluating configuration source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A binding set was rejected before evaluation.
    #[error("invalid binding set `{name}`: {reason}")]
    Binding {
        /// Name of the offending binding set.
        name: String,
        /// Why the set was rejected.
        reason: String,
    },

    /// The configuration source failed to parse.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The configuration source failed at runtime.
    #[error("evaluation error: {0}")]
    Eval(Arc<EvalAltResult>),

    /// The evaluation deadline expired before the source finished.
    #[error("evaluation deadline exceeded after {}ms", .elapsed.as_millis())]
    DeadlineExceeded {
        /// Wall-clock time spent evaluating before the abort.
        elapsed: Duration,
    },

    /// The evaluation was cancelled through its [`CancelToken`](crate::CancelToken).
    #[error("evaluation cancelled")]
    Cancelled,

    /// The source evaluated to no value (statements or declarations only).
    #[error("no configuration value produced by the source")]
    NoValue,

    /// The produced value's type is not compatible with the destination.
    #[error("cannot use script value of type `{actual}` as configuration type `{expected}`: {detail}")]
    TypeMismatch {
        /// The destination's type name.
        expected: &'static str,
        /// The produced value's type name.
        actual: String,
        /// Underlying conversion failure detail.
        detail: String,
    },
}

/// Result alias using the crate error type.
pub type Result<T> = StdResult<T, Error>;
