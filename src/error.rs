// Wed Aug 05 2026 - Alex

use thiserror::Error;

/// Compilation failures. Every variant carries the filename the caller
/// supplied so diagnostics point at the right script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("{filename}: no script registered for this source")]
    UnresolvedSource { filename: String },
    #[error("{filename}:{line}: {message}")]
    Syntax {
        filename: String,
        line: usize,
        message: String,
    },
}

impl CompileError {
    pub fn filename(&self) -> &str {
        match self {
            CompileError::UnresolvedSource { filename } => filename,
            CompileError::Syntax { filename, .. } => filename,
        }
    }
}

/// Failures raised while a compiled script executes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("{filename}: uncaught error: {message}")]
    Uncaught { filename: String, message: String },
    #[error("context handle does not belong to this engine")]
    UnknownContext,
    #[error("script handle does not belong to this engine")]
    UnknownScript,
}

impl RuntimeError {
    pub fn uncaught(filename: &str, message: impl Into<String>) -> Self {
        RuntimeError::Uncaught {
            filename: filename.to_string(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the script wrapper. Compile and runtime failures
/// propagate unchanged; `EngineMissing` is raised when no engine has been
/// installed for the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("no script engine installed")]
    EngineMissing,
}

impl ScriptError {
    pub fn is_compile(&self) -> bool {
        matches!(self, ScriptError::Compile(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, ScriptError::Runtime(_))
    }
}
