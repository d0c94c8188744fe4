use std::{
    any,
    sync::Arc,
    time::{Duration, Instant},
};

use rhai::{Dynamic, Engine, EvalAltResult};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    bindings::{self, BindingSet},
    cancel::CancelToken,
    error::{Error, Result},
    options::EvalOptions,
};

/// Deadline applied by the entry points that do not take a [`CancelToken`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Evaluate configuration source and store the result in `dst`.
///
/// The destination's value is replaced on success and left untouched on any
/// failure. Script text references the result slot as `config::value(...)`.
/// Evaluation is abandoned with [`Error::DeadlineExceeded`] if it has not
/// completed within [`DEFAULT_TIMEOUT`].
pub fn eval_to<T>(dst: &mut T, src: &str) -> Result<()>
where
    T: DeserializeOwned + 'static,
{
    eval_with_cancel_to(&CancelToken::with_timeout(DEFAULT_TIMEOUT), dst, src)
}

/// Evaluate configuration source under a caller-supplied [`CancelToken`] and
/// store the result in `dst`.
pub fn eval_with_cancel_to<T>(cancel: &CancelToken, dst: &mut T, src: &str) -> Result<()>
where
    T: DeserializeOwned + 'static,
{
    eval_ext_with_cancel_to(cancel, dst, src, EvalOptions::default(), [])
}

/// Evaluate configuration source with evaluator options and extension
/// binding sets, storing the result in `dst`.
///
/// Evaluation is abandoned with [`Error::DeadlineExceeded`] if it has not
/// completed within [`DEFAULT_TIMEOUT`].
pub fn eval_ext_to<T>(
    dst: &mut T,
    src: &str,
    options: EvalOptions,
    sets: impl IntoIterator<Item = BindingSet>,
) -> Result<()>
where
    T: DeserializeOwned + 'static,
{
    eval_ext_with_cancel_to(
        &CancelToken::with_timeout(DEFAULT_TIMEOUT),
        dst,
        src,
        options,
        sets,
    )
}

/// Evaluate configuration source in its most general form: caller-supplied
/// cancellation, evaluator options, and extension binding sets.
///
/// This is the canonical entry point; the other three are convenience
/// wrappers around it. A fresh engine is built per call, the default
/// `config` binding set and every set in `sets` are registered, and `src` is
/// evaluated once. On success the produced value is transferred into `dst`:
/// a value of exactly type `T` is moved in unchanged, anything else is
/// converted structurally through the evaluator's serde bridge.
pub fn eval_ext_with_cancel_to<T>(
    cancel: &CancelToken,
    dst: &mut T,
    src: &str,
    options: EvalOptions,
    sets: impl IntoIterator<Item = BindingSet>,
) -> Result<()>
where
    T: DeserializeOwned + 'static,
{
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    if cancel.is_expired() {
        return Err(Error::DeadlineExceeded {
            elapsed: Duration::ZERO,
        });
    }

    let mut engine = options.build_engine();
    bindings::register(&mut engine, sets)?;
    install_halt_hook(&mut engine, cancel);

    debug!(bytes = src.len(), "evaluating configuration source");
    let ast = engine.compile(src)?;
    let value = engine.eval_ast::<Dynamic>(&ast).map_err(into_error)?;

    if value.is_unit() {
        return Err(Error::NoValue);
    }

    // Exact matches (extension-constructed values) move in unchanged; the
    // serde bridge handles maps and primitives.
    let value = match value.try_cast_result::<T>() {
        Ok(value) => value,
        Err(value) => {
            rhai::serde::from_dynamic(&value).map_err(|err| Error::TypeMismatch {
                expected: any::type_name::<T>(),
                actual: value.type_name().to_string(),
                detail: err.to_string(),
            })?
        }
    };
    *dst = value;
    Ok(())
}

/// Reason injected through the progress hook when a token fires.
#[derive(Debug, Clone)]
enum Halt {
    Deadline { elapsed: Duration },
    Cancelled,
}

fn install_halt_hook(engine: &mut Engine, cancel: &CancelToken) {
    let token = cancel.clone();
    let started = Instant::now();
    engine.on_progress(move |_ops| {
        if token.is_cancelled() {
            return Some(Dynamic::from(Halt::Cancelled));
        }
        if token.is_expired() {
            return Some(Dynamic::from(Halt::Deadline {
                elapsed: started.elapsed(),
            }));
        }
        None
    });
}

fn into_error(err: Box<EvalAltResult>) -> Error {
    if let EvalAltResult::ErrorTerminated(token, _) = err.as_ref() {
        if let Some(halt) = token.clone().try_cast::<Halt>() {
            return match halt {
                Halt::Deadline { elapsed } => Error::DeadlineExceeded { elapsed },
                Halt::Cancelled => Error::Cancelled,
            };
        }
    }
    Error::Eval(Arc::from(err))
}
