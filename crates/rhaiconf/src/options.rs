use rhai::{
    Engine,
    default_limits::MAX_STRINGS_INTERNED,
    packages::{Package, StandardPackage},
};

/// Resource limits passed through to the underlying evaluator.
///
/// Configuration sources run against a sandboxed engine: the standard
/// package only (no file or process access), strict variable resolution, and
/// the budgets below. The defaults are generous for configuration work; set
/// a budget to `0` to disable that particular limit.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Maximum number of operations the engine may perform.
    pub max_operations: u64,
    /// Maximum call stack depth.
    pub max_call_levels: usize,
    /// Maximum expression nesting depth.
    pub max_expr_depth: usize,
    /// Maximum expression nesting depth inside function bodies.
    pub max_function_expr_depth: usize,
    /// Maximum size of any string value.
    pub max_string_size: usize,
    /// Maximum size of any array.
    pub max_array_size: usize,
    /// Maximum size of any object map.
    pub max_map_size: usize,
    /// Maximum number of variables in scope.
    pub max_variables: usize,
    /// Maximum number of script-defined functions.
    pub max_functions: usize,
    /// Maximum number of modules the script may load.
    pub max_modules: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 1_000_000,
            max_array_size: 100_000,
            max_map_size: 100_000,
            max_variables: 10_000,
            max_functions: 1_000,
            max_modules: 10,
        }
    }
}

impl EvalOptions {
    /// Build a fresh sandboxed engine configured with these limits.
    pub(crate) fn build_engine(&self) -> Engine {
        let mut engine = Engine::new_raw();
        engine.register_global_module(StandardPackage::new().as_shared_module());

        engine.set_max_strings_interned(MAX_STRINGS_INTERNED);
        engine.set_strict_variables(true);
        engine.set_fail_on_invalid_map_property(true);

        engine.set_max_operations(self.max_operations);
        engine.set_max_call_levels(self.max_call_levels);
        engine.set_max_expr_depths(self.max_expr_depth, self.max_function_expr_depth);
        engine.set_max_string_size(self.max_string_size);
        engine.set_max_array_size(self.max_array_size);
        engine.set_max_map_size(self.max_map_size);
        engine.set_max_variables(self.max_variables);
        engine.set_max_functions(self.max_functions);
        engine.set_max_modules(self.max_modules);

        engine
    }
}

#[cfg(test)]
mod tests {
    use super::EvalOptions;

    #[test]
    fn default_engine_rejects_undefined_variables() {
        let engine = EvalOptions::default().build_engine();
        assert!(engine.compile("missing_variable + 1").is_err());
    }

    #[test]
    fn operations_budget_is_enforced() {
        let options = EvalOptions {
            max_operations: 100,
            ..EvalOptions::default()
        };
        let engine = options.build_engine();
        let result = engine.eval::<i64>("let x = 0; while x < 1_000_000 { x += 1 } x");
        assert!(result.is_err());
    }
}
