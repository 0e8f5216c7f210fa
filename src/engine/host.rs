// Wed Aug 05 2026 - Alex

use crate::engine::handle::{CompiledScript, Context, FunctionRef};
use crate::engine::ScriptEngine;
use crate::error::{CompileError, RuntimeError};
use crate::sandbox::PropertyDescriptor;
use crate::value::ScriptValue;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

type HostFn = dyn Fn(&ScriptScope) -> Result<ScriptValue, RuntimeError> + Send + Sync;

type PropertyMap = IndexMap<String, PropertyDescriptor>;

struct CompiledEntry {
    handler: Arc<HostFn>,
    filename: String,
}

/// Engine whose scripts are host-registered Rust callbacks. The engine
/// owns the context and compiled-script tables and hands out index-token
/// handles; "compilation" resolves source text against the registry, so
/// what a script does is always supplied by the embedder.
pub struct HostEngine {
    registry: RwLock<HashMap<String, Arc<HostFn>>>,
    compiled: RwLock<Vec<CompiledEntry>>,
    contexts: RwLock<Vec<PropertyMap>>,
    global: OnceCell<Context>,
    next_function: AtomicU32,
}

impl HostEngine {
    pub fn new() -> Self {
        HostEngine {
            registry: RwLock::new(HashMap::new()),
            compiled: RwLock::new(Vec::new()),
            contexts: RwLock::new(Vec::new()),
            global: OnceCell::new(),
            next_function: AtomicU32::new(0),
        }
    }

    /// Bind a source text to a host callback. Later registrations of the
    /// same source replace earlier ones; already-compiled scripts keep the
    /// handler they resolved to.
    pub fn register<F>(&self, source: &str, handler: F)
    where
        F: Fn(&ScriptScope) -> Result<ScriptValue, RuntimeError> + Send + Sync + 'static,
    {
        self.registry
            .write()
            .insert(source.trim().to_string(), Arc::new(handler));
    }

    /// All registered source texts, sorted.
    pub fn registered_sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self.registry.read().keys().cloned().collect();
        sources.sort();
        sources
    }

    /// Mint an opaque function token for accessor descriptors and
    /// function-valued globals.
    pub fn function_ref(&self) -> FunctionRef {
        FunctionRef::from_raw(self.next_function.fetch_add(1, Ordering::Relaxed))
    }

    fn alloc_context(&self) -> Context {
        let mut contexts = self.contexts.write();
        contexts.push(PropertyMap::new());
        Context::from_raw((contexts.len() - 1) as u32)
    }

    fn has_context(&self, context: Context) -> bool {
        (context.raw() as usize) < self.contexts.read().len()
    }
}

impl Default for HostEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngine for HostEngine {
    fn compile(&self, source: &str, filename: &str) -> Result<CompiledScript, CompileError> {
        let handler = self
            .registry
            .read()
            .get(source.trim())
            .cloned()
            .ok_or_else(|| CompileError::UnresolvedSource {
                filename: filename.to_string(),
            })?;

        let mut compiled = self.compiled.write();
        compiled.push(CompiledEntry {
            handler,
            filename: filename.to_string(),
        });
        Ok(CompiledScript::from_raw((compiled.len() - 1) as u32))
    }

    fn run(&self, context: Context, script: &CompiledScript) -> Result<ScriptValue, RuntimeError> {
        // Clone the entry out so no table lock is held while the handler
        // runs; handlers re-enter the engine through the scope.
        let (handler, filename) = {
            let compiled = self.compiled.read();
            let entry = compiled
                .get(script.raw() as usize)
                .ok_or(RuntimeError::UnknownScript)?;
            (entry.handler.clone(), entry.filename.clone())
        };

        if !self.has_context(context) {
            return Err(RuntimeError::UnknownContext);
        }

        let scope = ScriptScope {
            engine: self,
            context,
            filename: &filename,
        };
        (*handler)(&scope)
    }

    fn create_context(&self) -> Context {
        self.alloc_context()
    }

    fn global_context(&self) -> Context {
        *self.global.get_or_init(|| self.alloc_context())
    }

    fn own_property_names(&self, context: Context) -> Vec<String> {
        self.contexts
            .read()
            .get(context.raw() as usize)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn own_property(&self, context: Context, name: &str) -> Option<PropertyDescriptor> {
        self.contexts
            .read()
            .get(context.raw() as usize)
            .and_then(|map| map.get(name).cloned())
    }

    fn define_property(&self, context: Context, name: &str, descriptor: PropertyDescriptor) {
        if let Some(map) = self.contexts.write().get_mut(context.raw() as usize) {
            map.insert(name.to_string(), descriptor);
        }
    }
}

/// View over the target context handed to a host callback while it runs.
pub struct ScriptScope<'a> {
    engine: &'a HostEngine,
    context: Context,
    filename: &'a str,
}

impl<'a> ScriptScope<'a> {
    pub fn context(&self) -> Context {
        self.context
    }

    pub fn filename(&self) -> &str {
        self.filename
    }

    /// Data value of a global. Accessor properties have no materialized
    /// value and read as absent.
    pub fn get(&self, name: &str) -> Option<ScriptValue> {
        self.engine
            .own_property(self.context, name)
            .and_then(|d| d.value().cloned())
    }

    /// Set a plain data global with default flags.
    pub fn set(&self, name: &str, value: ScriptValue) {
        self.define(name, PropertyDescriptor::data(value));
    }

    pub fn define(&self, name: &str, descriptor: PropertyDescriptor) {
        self.engine.define_property(self.context, name, descriptor);
    }

    pub fn descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.engine.own_property(self.context, name)
    }

    pub fn names(&self) -> Vec<String> {
        self.engine.own_property_names(self.context)
    }

    /// Build an uncaught runtime error tagged with this script's filename.
    pub fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::uncaught(self.filename, message)
    }
}
