// Wed Aug 05 2026 - Alex
//
// The compatibility surface over the installed script engine: compile
// source into reusable scripts, create seeded contexts, and run against
// the default context, a fresh context, or a caller-supplied one.

use crate::engine::{self, CompiledScript, Context, ScriptEngine};
use crate::error::ScriptError;
use crate::sandbox::Sandbox;
use crate::trace;
use crate::value::ScriptValue;

/// Filename used when the caller does not supply one.
pub const DEFAULT_FILENAME: &str = "<anonymous>";

/// A compiled script bound to the context chosen at compile time.
#[derive(Debug)]
pub struct Script {
    compiled: CompiledScript,
    context: Context,
}

impl Script {
    /// Compile `source` via the installed engine, tagging errors with
    /// `filename`. Binds `context`, or the engine's shared default context
    /// when none is given.
    pub fn compile(
        source: &str,
        context: Option<Context>,
        filename: Option<&str>,
    ) -> Result<Self, ScriptError> {
        let engine = engine::require()?;
        let filename = filename.unwrap_or(DEFAULT_FILENAME);
        let compiled = engine.compile(source, filename)?;
        let context = match context {
            Some(ctx) => ctx,
            None => engine.global_context(),
        };
        Ok(Script { compiled, context })
    }

    /// The context bound at compile time.
    pub fn context(&self) -> Context {
        self.context
    }

    /// Run against the bound context.
    pub fn run(&self) -> Result<ScriptValue, ScriptError> {
        let engine = engine::require()?;
        Ok(engine.run(self.context, &self.compiled)?)
    }

    /// Run in a fresh context seeded from `sandbox`; the context's globals
    /// are written back into `sandbox` afterwards. A `None` sandbox skips
    /// both copies.
    pub fn run_in_new_context(
        &self,
        mut sandbox: Option<&mut Sandbox>,
    ) -> Result<ScriptValue, ScriptError> {
        let engine = engine::require()?;
        let context = engine.create_context();
        copy_from_sandbox(engine.as_ref(), sandbox.as_deref(), context);
        let result = engine.run(context, &self.compiled)?;
        copy_to_sandbox(engine.as_ref(), context, sandbox.as_deref_mut());
        Ok(result)
    }

    /// Run against an arbitrary existing context.
    pub fn run_in_context(&self, context: Context) -> Result<ScriptValue, ScriptError> {
        let engine = engine::require()?;
        Ok(engine.run(context, &self.compiled)?)
    }
}

/// Compile and run `source` against the default context in one engine
/// call.
pub fn run_in_this_context(source: &str, filename: &str) -> Result<ScriptValue, ScriptError> {
    let engine = engine::require()?;
    let context = engine.global_context();
    engine.compile_and_run(source, filename, context)
}

/// Compile `source`, run it in a fresh context seeded from `sandbox`, and
/// write the context's globals back into `sandbox`. Mutating the caller's
/// sandbox is the point of this call, not a side effect to avoid.
pub fn run_in_new_context(
    source: &str,
    mut sandbox: Option<&mut Sandbox>,
    filename: &str,
) -> Result<ScriptValue, ScriptError> {
    let engine = engine::require()?;
    let compiled = engine.compile(source, filename)?;
    let context = engine.create_context();
    copy_from_sandbox(engine.as_ref(), sandbox.as_deref(), context);
    let result = engine.run(context, &compiled)?;
    copy_to_sandbox(engine.as_ref(), context, sandbox.as_deref_mut());
    Ok(result)
}

/// Compile and run `source` against a caller-supplied context.
pub fn run_in_context(
    source: &str,
    context: Context,
    filename: &str,
) -> Result<ScriptValue, ScriptError> {
    engine::require()?.compile_and_run(source, filename, context)
}

/// Create a fresh context seeded from `sandbox`'s property descriptors.
/// The copy is one-way; the sandbox itself is never mutated here.
pub fn create_context(sandbox: Option<&Sandbox>) -> Result<Context, ScriptError> {
    let engine = engine::require()?;
    let context = engine.create_context();
    if trace::enabled() {
        trace::emit(&format!(
            "creating context using sandbox {}",
            trace::sandbox_snapshot(sandbox)
        ));
    }
    copy_from_sandbox(engine.as_ref(), sandbox, context);
    if trace::enabled() {
        trace::emit(&format!(
            "context after sandbox {}",
            trace::context_snapshot(engine.as_ref(), context)
        ));
    }
    Ok(context)
}

/// Copy every own property descriptor of the sandbox into the context,
/// non-enumerable and accessor properties included. Absent sandbox is a
/// no-op.
fn copy_from_sandbox(engine: &dyn ScriptEngine, sandbox: Option<&Sandbox>, context: Context) {
    let sandbox = match sandbox {
        Some(sandbox) => sandbox,
        None => return,
    };
    for (name, descriptor) in sandbox.iter() {
        engine.define_property(context, name, descriptor.clone());
    }
}

/// Copy every own property descriptor of the context back into the
/// sandbox. Absent sandbox is a no-op.
fn copy_to_sandbox(engine: &dyn ScriptEngine, context: Context, sandbox: Option<&mut Sandbox>) {
    let sandbox = match sandbox {
        Some(sandbox) => sandbox,
        None => return,
    };
    for name in engine.own_property_names(context) {
        if let Some(descriptor) = engine.own_property(context, &name) {
            sandbox.define(&name, descriptor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HostEngine, ScriptScope};
    use crate::error::RuntimeError;
    use crate::sandbox::{PropertyDescriptor, PropertyKind};
    use once_cell::sync::OnceCell;
    use std::sync::Arc;

    fn bump(scope: &ScriptScope, name: &str) -> Result<ScriptValue, RuntimeError> {
        let next = scope.get(name).and_then(|v| v.as_int()).unwrap_or(0) + 1;
        scope.set(name, ScriptValue::Integer(next));
        Ok(ScriptValue::Integer(next))
    }

    fn host() -> Arc<HostEngine> {
        static HOST: OnceCell<Arc<HostEngine>> = OnceCell::new();
        HOST.get_or_init(|| {
            let host = Arc::new(HostEngine::new());
            host.register("answer()", |_scope| Ok(ScriptValue::Integer(42)));
            host.register("define_result()", |scope| {
                scope.set("result", ScriptValue::Integer(7));
                Ok(ScriptValue::Nil)
            });
            host.register("bump()", |scope| bump(scope, "counter"));
            host.register("bump_tick()", |scope| bump(scope, "tick"));
            host.register("read_hidden()", |scope| {
                scope
                    .descriptor("hidden")
                    .and_then(|d| d.value().cloned())
                    .ok_or_else(|| scope.error("no hidden global"))
            });
            engine::install(host.clone());
            host
        })
        .clone()
    }

    fn seeded_sandbox() -> Sandbox {
        let host = host();
        let mut sandbox = Sandbox::new();
        sandbox.set("plain", ScriptValue::Integer(1));
        sandbox.define(
            "hidden",
            PropertyDescriptor::read_only(ScriptValue::string("secret")).with_enumerable(false),
        );
        sandbox.define(
            "computed",
            PropertyDescriptor::accessor(Some(host.function_ref()), None).with_configurable(false),
        );
        sandbox
    }

    #[test]
    fn test_compile_and_run_matches_one_shot_eval() {
        host();
        let script = Script::compile("answer()", None, None).unwrap();
        let compiled_result = script.run().unwrap();
        let direct_result = run_in_this_context("answer()", "eval.js").unwrap();
        assert_eq!(compiled_result, direct_result);
        assert_eq!(compiled_result, ScriptValue::Integer(42));
    }

    #[test]
    fn test_create_context_preserves_descriptors() {
        let host = host();
        let sandbox = seeded_sandbox();
        let before = sandbox.clone();

        let context = create_context(Some(&sandbox)).unwrap();

        for (name, descriptor) in sandbox.iter() {
            let copied = host.own_property(context, name).unwrap();
            assert_eq!(&copied, descriptor, "descriptor for {}", name);
        }
        // One-way copy: the sandbox is untouched.
        assert_eq!(sandbox, before);
    }

    #[test]
    fn test_run_in_new_context_writes_back_new_globals() {
        host();
        let mut sandbox = Sandbox::new();
        sandbox.set("seed", ScriptValue::Boolean(true));

        let result = run_in_new_context("define_result()", Some(&mut sandbox), "def.js").unwrap();
        assert_eq!(result, ScriptValue::Nil);
        assert_eq!(sandbox.get("result"), Some(&ScriptValue::Integer(7)));
        assert_eq!(sandbox.get("seed"), Some(&ScriptValue::Boolean(true)));
    }

    #[test]
    fn test_run_in_new_context_round_trips_flags() {
        host();
        let mut sandbox = seeded_sandbox();

        run_in_new_context("answer()", Some(&mut sandbox), "flags.js").unwrap();

        let hidden = sandbox.descriptor("hidden").unwrap();
        assert!(!hidden.enumerable);
        assert_eq!(hidden.kind, PropertyKind::Data {
            value: ScriptValue::string("secret"),
            writable: false,
        });
        assert!(sandbox.descriptor("computed").unwrap().is_accessor());
    }

    #[test]
    fn test_run_in_new_context_without_sandbox() {
        host();
        let result = run_in_new_context("answer()", None, "nosandbox.js").unwrap();
        assert_eq!(result, ScriptValue::Integer(42));
    }

    #[test]
    fn test_script_sees_non_enumerable_seed() {
        host();
        let mut sandbox = seeded_sandbox();
        let result = run_in_new_context("read_hidden()", Some(&mut sandbox), "hidden.js").unwrap();
        assert_eq!(result, ScriptValue::string("secret"));
    }

    #[test]
    fn test_unresolved_source_is_compile_error() {
        host();
        let err = run_in_new_context("this is not a script", None, "bad.js").unwrap_err();
        assert!(err.is_compile());

        let err = Script::compile("also not a script", None, Some("bad2.js")).unwrap_err();
        assert!(err.is_compile());
    }

    #[test]
    fn test_same_context_state_persists() {
        host();
        let context = create_context(None).unwrap();
        assert_eq!(
            run_in_context("bump()", context, "a.js").unwrap(),
            ScriptValue::Integer(1)
        );
        assert_eq!(
            run_in_context("bump()", context, "b.js").unwrap(),
            ScriptValue::Integer(2)
        );
    }

    #[test]
    fn test_fresh_contexts_are_isolated() {
        host();
        let first = create_context(None).unwrap();
        let second = create_context(None).unwrap();
        assert_eq!(
            run_in_context("bump()", first, "a.js").unwrap(),
            ScriptValue::Integer(1)
        );
        assert_eq!(
            run_in_context("bump()", second, "b.js").unwrap(),
            ScriptValue::Integer(1)
        );
    }

    #[test]
    fn test_instance_run_in_context_uses_given_context() {
        host();
        let script = Script::compile("bump_tick()", None, Some("tick.js")).unwrap();
        let context = create_context(None).unwrap();
        assert_ne!(script.context(), context);

        assert_eq!(
            script.run_in_context(context).unwrap(),
            ScriptValue::Integer(1)
        );
        assert_eq!(
            script.run_in_context(context).unwrap(),
            ScriptValue::Integer(2)
        );
    }

    #[test]
    fn test_instance_run_in_new_context_writes_back() {
        host();
        let script = Script::compile("define_result()", None, None).unwrap();
        let mut sandbox = Sandbox::new();
        script.run_in_new_context(Some(&mut sandbox)).unwrap();
        assert_eq!(sandbox.get("result"), Some(&ScriptValue::Integer(7)));
    }

    #[test]
    fn test_instance_bound_to_custom_context() {
        host();
        let context = create_context(None).unwrap();
        let script = Script::compile("bump()", Some(context), Some("bound.js")).unwrap();
        script.run().unwrap();
        let second = script.run().unwrap();
        assert_eq!(second, ScriptValue::Integer(2));
    }
}
