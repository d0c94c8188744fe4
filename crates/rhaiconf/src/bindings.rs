use rhai::{Dynamic, Engine, Identifier, Module, Shared, Variant};
use tracing::trace;

use crate::error::{Error, Result};

/// Name of the default binding set registered for every evaluation.
///
/// Scripts reference the result slot through it as `config::value(...)`.
pub(crate) const CONFIG_MODULE: &str = "config";

/// A named set of bindings exposed to configuration script text.
///
/// A binding set is registered with the evaluator as a static module, so a
/// set named `net` exposing a function `endpoint` is referenced from script
/// text as `net::endpoint(...)`, and a constant `port` as `net::port`.
/// Constants are added through [`with_value`](Self::with_value); native
/// functions and custom types go through [`module_mut`](Self::module_mut),
/// which hands out the underlying [`rhai::Module`] directly.
#[derive(Debug, Clone)]
pub struct BindingSet {
    name: Identifier,
    module: Module,
}

impl BindingSet {
    /// Create an empty binding set with the given symbolic name.
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            module: Module::new(),
        }
    }

    /// Wrap a caller-built module under the given symbolic name.
    pub fn from_module(name: impl Into<Identifier>, module: Module) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }

    /// Expose a constant value to script text as `<set>::<name>`.
    pub fn with_value(mut self, name: impl Into<Identifier>, value: impl Variant + Clone) -> Self {
        self.module.set_var(name, value);
        self
    }

    /// The symbolic name scripts use to reference this set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mutable access to the underlying module, for registrations the
    /// builder helpers do not cover.
    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    fn validate(&self) -> Result<()> {
        if self.name.as_str() == CONFIG_MODULE {
            return Err(self.rejected("the name is reserved for the default binding set"));
        }
        if !is_valid_name(&self.name) {
            return Err(self.rejected("the name is not a valid module identifier"));
        }
        Ok(())
    }

    fn rejected(&self, reason: &str) -> Error {
        Error::Binding {
            name: self.name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Register the default `config` module and every caller-supplied binding
/// set on the engine. Fails without touching the script if any set's name is
/// invalid, reserved, or duplicated.
pub(crate) fn register(
    engine: &mut Engine,
    sets: impl IntoIterator<Item = BindingSet>,
) -> Result<()> {
    let mut config = Module::new();
    config.set_native_fn("value", |value: Dynamic| Ok(value));
    engine.register_static_module(CONFIG_MODULE, config.into());

    let mut registered: Vec<Identifier> = Vec::new();
    for set in sets {
        set.validate()?;
        if registered.contains(&set.name) {
            return Err(set.rejected("another binding set already uses the name"));
        }
        trace!(module = %set.name, "registering binding set");
        registered.push(set.name.clone());
        let BindingSet { name, module } = set;
        engine.register_static_module(name.as_str(), Shared::new(module));
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(leading) = chars.next() else {
        return false;
    };
    (leading.is_ascii_alphabetic() || leading == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
