// Wed Aug 05 2026 - Alex

/// Opaque handle to a compiled script. Handles are index tokens into an
/// engine-managed table; deliberately not `Clone`, a compiled script has
/// exactly one owning wrapper.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CompiledScript(u32);

impl CompiledScript {
    pub fn from_raw(raw: u32) -> Self {
        CompiledScript(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to an isolated global-variable namespace. Contexts are
/// engine-owned and may be referenced by any number of wrappers, so the
/// handle is freely copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(u32);

impl Context {
    pub fn from_raw(raw: u32) -> Self {
        Context(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque token naming an engine-side function. Used as the getter/setter
/// payload of accessor descriptors and as `ScriptValue::Function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionRef(u32);

impl FunctionRef {
    pub fn from_raw(raw: u32) -> Self {
        FunctionRef(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_round_trip_raw() {
        assert_eq!(Context::from_raw(3).raw(), 3);
        assert_eq!(CompiledScript::from_raw(7).raw(), 7);
        assert_eq!(FunctionRef::from_raw(1).raw(), 1);
    }

    #[test]
    fn test_context_is_copy() {
        let ctx = Context::from_raw(0);
        let same = ctx;
        assert_eq!(ctx, same);
    }
}
