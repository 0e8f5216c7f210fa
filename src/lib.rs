// Wed Aug 05 2026 - Alex

pub mod config;
pub mod engine;
pub mod error;
pub mod sandbox;
pub mod script;
pub mod trace;
pub mod utils;
pub mod value;

pub use config::RunnerConfig;
pub use engine::{CompiledScript, Context, FunctionRef, HostEngine, ScriptEngine, ScriptScope};
pub use error::{CompileError, RuntimeError, ScriptError};
pub use sandbox::{PropertyDescriptor, PropertyKind, Sandbox};
pub use script::Script;
pub use value::ScriptValue;
