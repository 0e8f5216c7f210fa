// Thu Aug 06 2026 - Alex

use crate::engine::host::HostEngine;
use crate::value::ScriptValue;
use indexmap::IndexMap;

/// Register the standard host scripts used by the CLI runner.
pub fn register_builtins(engine: &HostEngine) {
    engine.register("globals.keys()", |scope| {
        let names = scope
            .names()
            .into_iter()
            .map(ScriptValue::String)
            .collect();
        Ok(ScriptValue::Array(names))
    });

    engine.register("globals.dump()", |scope| {
        let mut table = IndexMap::new();
        for name in scope.names() {
            let descriptor = match scope.descriptor(&name) {
                Some(d) => d,
                None => continue,
            };
            if !descriptor.enumerable {
                continue;
            }
            if let Some(value) = descriptor.value() {
                table.insert(name, value.clone());
            }
        }
        Ok(ScriptValue::Table(table))
    });

    engine.register("counter.bump()", |scope| {
        let next = scope.get("counter").and_then(|v| v.as_int()).unwrap_or(0) + 1;
        scope.set("counter", ScriptValue::Integer(next));
        Ok(ScriptValue::Integer(next))
    });

    engine.register("sum(a, b)", |scope| {
        let a = scope.get("a");
        let b = scope.get("b");
        let total = match (
            a.as_ref().and_then(|v| v.as_int()),
            b.as_ref().and_then(|v| v.as_int()),
        ) {
            (Some(a), Some(b)) => ScriptValue::Integer(a + b),
            _ => {
                let a = a
                    .and_then(|v| v.as_float())
                    .ok_or_else(|| scope.error("global 'a' is not a number"))?;
                let b = b
                    .and_then(|v| v.as_float())
                    .ok_or_else(|| scope.error("global 'b' is not a number"))?;
                ScriptValue::Float(a + b)
            }
        };
        scope.set("total", total.clone());
        Ok(total)
    });

    engine.register("greet(name)", |scope| {
        let name = match scope.get("name") {
            Some(ScriptValue::String(s)) => s,
            _ => "world".to_string(),
        };
        let greeting = format!("Hello, {}!", name);
        scope.set("greeting", ScriptValue::string(greeting.clone()));
        Ok(ScriptValue::String(greeting))
    });
}

/// Built-in script registry, for --list style output.
pub struct BuiltinScripts;

impl BuiltinScripts {
    pub fn list() -> Vec<(&'static str, &'static str)> {
        vec![
            ("globals.keys()", "List own global names of the context"),
            ("globals.dump()", "Table of enumerable data globals"),
            ("counter.bump()", "Increment the 'counter' global"),
            ("sum(a, b)", "Add globals 'a' and 'b', store 'total'"),
            ("greet(name)", "Greet the 'name' global, store 'greeting'"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScriptEngine;
    use crate::sandbox::PropertyDescriptor;

    fn engine() -> HostEngine {
        let engine = HostEngine::new();
        register_builtins(&engine);
        engine
    }

    #[test]
    fn test_listed_scripts_are_registered() {
        let engine = engine();
        let registered = engine.registered_sources();
        for (source, _) in BuiltinScripts::list() {
            assert!(registered.contains(&source.to_string()), "{}", source);
        }
    }

    #[test]
    fn test_counter_bump_starts_at_zero() {
        let engine = engine();
        let compiled = engine.compile("counter.bump()", "counter.js").unwrap();
        let ctx = engine.create_context();
        assert_eq!(engine.run(ctx, &compiled), Ok(ScriptValue::Integer(1)));
        assert_eq!(engine.run(ctx, &compiled), Ok(ScriptValue::Integer(2)));
    }

    #[test]
    fn test_sum_prefers_integers() {
        let engine = engine();
        let ctx = engine.create_context();
        engine.define_property(ctx, "a", PropertyDescriptor::data(ScriptValue::Integer(2)));
        engine.define_property(ctx, "b", PropertyDescriptor::data(ScriptValue::Integer(3)));

        let compiled = engine.compile("sum(a, b)", "sum.js").unwrap();
        assert_eq!(engine.run(ctx, &compiled), Ok(ScriptValue::Integer(5)));
        assert_eq!(
            engine.own_property(ctx, "total").unwrap().value(),
            Some(&ScriptValue::Integer(5))
        );
    }

    #[test]
    fn test_sum_rejects_non_numbers() {
        let engine = engine();
        let ctx = engine.create_context();
        engine.define_property(ctx, "a", PropertyDescriptor::data(ScriptValue::string("x")));

        let compiled = engine.compile("sum(a, b)", "sum.js").unwrap();
        assert!(engine.run(ctx, &compiled).is_err());
    }

    #[test]
    fn test_greet_defaults_name() {
        let engine = engine();
        let ctx = engine.create_context();
        let compiled = engine.compile("greet(name)", "greet.js").unwrap();
        assert_eq!(
            engine.run(ctx, &compiled),
            Ok(ScriptValue::string("Hello, world!"))
        );
    }
}
