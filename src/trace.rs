// Thu Aug 06 2026 - Alex
//
// Debug tracing for context creation, gated on a debug-category filter in
// the environment. Purely observational; when disabled nothing here runs.

use crate::engine::{Context, ScriptEngine};
use crate::sandbox::Sandbox;
use once_cell::sync::Lazy;
use regex::Regex;

/// Environment variable holding the debug-category filter.
pub const DEBUG_ENV: &str = "SCRIPT_DEBUG";

const CATEGORY: &str = "vm";

static CATEGORY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(CATEGORY).expect("category pattern"));

static ENABLED: Lazy<bool> = Lazy::new(|| {
    std::env::var(DEBUG_ENV)
        .map(|filter| filter_matches(&filter))
        .unwrap_or(false)
});

/// True when the "vm" category was enabled when first checked. The filter
/// is read once per process.
pub fn enabled() -> bool {
    *ENABLED
}

fn filter_matches(filter: &str) -> bool {
    CATEGORY_RE.is_match(filter)
}

pub(crate) fn emit(message: &str) {
    log::debug!(target: "vm", "VM: {}", message);
}

/// Serialized view of a sandbox for trace lines; absent sandboxes render
/// the way the caller passed them.
pub(crate) fn sandbox_snapshot(sandbox: Option<&Sandbox>) -> String {
    match sandbox {
        Some(sandbox) => sandbox.to_json().to_string(),
        None => "undefined".to_string(),
    }
}

/// Serialized view of a context's enumerable data globals.
pub(crate) fn context_snapshot(engine: &dyn ScriptEngine, context: Context) -> String {
    let mut map = serde_json::Map::new();
    for name in engine.own_property_names(context) {
        let descriptor = match engine.own_property(context, &name) {
            Some(d) => d,
            None => continue,
        };
        if !descriptor.enumerable {
            continue;
        }
        if let Some(value) = descriptor.value() {
            map.insert(name, value.to_json());
        }
    }
    serde_json::Value::Object(map).to_string()
}
