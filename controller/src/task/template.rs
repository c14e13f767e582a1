//! `<%= key %>` placeholder substitution for task files
//!
//! Task files are rendered with minijinja using ERB-style delimiters, so the
//! braces of the surrounding JSON never collide with template syntax. Dotted
//! keys such as `marathon.image` are exposed as nested maps.

use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior, Value};
use serde_json::Map;

use crate::errors::ControllerError;

/// Values available to placeholders
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    root: Map<String, serde_json::Value>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under a dotted `key`. A later key replaces any leaf
    /// that sits on its path.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let path: Vec<&str> = key.split('.').collect();
        insert_path(&mut self.root, &path, serde_json::Value::String(value.into()));
        self
    }
}

fn insert_path(map: &mut Map<String, serde_json::Value>, path: &[&str], value: serde_json::Value) {
    match path {
        [] => {}
        [leaf] => {
            map.insert(leaf.to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| serde_json::Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = serde_json::Value::Object(Map::new());
            }
            if let serde_json::Value::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

fn environment() -> Result<Environment<'static>, ControllerError> {
    let syntax = SyntaxConfig::builder()
        .block_delimiters("<%", "%>")
        .variable_delimiters("<%=", "%>")
        .comment_delimiters("<%#", "%>")
        .build()
        .map_err(|e| ControllerError::TemplateError(e.to_string()))?;

    let mut env = Environment::new();
    env.set_syntax(syntax);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    Ok(env)
}

/// Render every `<%= key %>` in `source`.
///
/// Unknown keys and malformed tags are errors.
pub fn render(source: &str, vars: &TemplateVars) -> Result<String, ControllerError> {
    let env = environment()?;
    let context = Value::from_serialize(&vars.root);

    env.render_str(source, context)
        .map_err(|e| ControllerError::TemplateError(e.to_string()))
}
