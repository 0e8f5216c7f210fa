// Wed Aug 05 2026 - Alex

pub mod builtins;
pub mod handle;
pub mod host;

pub use builtins::{register_builtins, BuiltinScripts};
pub use handle::{CompiledScript, Context, FunctionRef};
pub use host::{HostEngine, ScriptScope};

use crate::error::{CompileError, RuntimeError, ScriptError};
use crate::sandbox::PropertyDescriptor;
use crate::value::ScriptValue;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Capability surface of a script engine. The wrapper layer delegates all
/// compilation and execution here and uses the reflection methods to move
/// property descriptors through the opaque context handle.
pub trait ScriptEngine: Send + Sync {
    /// Compile source text, tagging errors with `filename`.
    fn compile(&self, source: &str, filename: &str) -> Result<CompiledScript, CompileError>;

    /// Execute a previously compiled script against a context.
    fn run(&self, context: Context, script: &CompiledScript) -> Result<ScriptValue, RuntimeError>;

    /// Combined compile + run in one engine call. Engines with a fused
    /// fast path may override.
    fn compile_and_run(
        &self,
        source: &str,
        filename: &str,
        context: Context,
    ) -> Result<ScriptValue, ScriptError> {
        let compiled = self.compile(source, filename)?;
        Ok(self.run(context, &compiled)?)
    }

    /// Create a fresh, empty context.
    fn create_context(&self) -> Context;

    /// The shared default context, created lazily on first use and stable
    /// for the life of the engine.
    fn global_context(&self) -> Context;

    /// Own property names of a context, non-enumerable included. Unknown
    /// handles yield an empty list.
    fn own_property_names(&self, context: Context) -> Vec<String>;

    /// Full descriptor of one own property of a context.
    fn own_property(&self, context: Context, name: &str) -> Option<PropertyDescriptor>;

    /// Define or replace an own property of a context. A no-op for
    /// unknown handles.
    fn define_property(&self, context: Context, name: &str, descriptor: PropertyDescriptor);
}

static INSTALLED: OnceCell<Arc<dyn ScriptEngine>> = OnceCell::new();

/// Install the process-wide engine backing the script wrapper. The first
/// install wins; returns false if an engine was already installed.
pub fn install(engine: Arc<dyn ScriptEngine>) -> bool {
    INSTALLED.set(engine).is_ok()
}

pub fn installed() -> Option<Arc<dyn ScriptEngine>> {
    INSTALLED.get().cloned()
}

pub(crate) fn require() -> Result<Arc<dyn ScriptEngine>, ScriptError> {
    installed().ok_or(ScriptError::EngineMissing)
}
