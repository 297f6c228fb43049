use mailcraft_editor::schema::{default_template, Node, NodeKind, Template};
use mailcraft_editor::Mutation;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Validate template JSON and return it in canonical form, defaults filled in
#[wasm_bindgen(js_name = validateTemplate)]
pub fn validate_template_js(source: &str) -> Result<String, JsValue> {
    validate_template(source).map_err(|e| JsValue::from_str(&e))
}

/// The starter template new documents open with
#[wasm_bindgen(js_name = defaultTemplate)]
pub fn default_template_js() -> String {
    to_json(&default_template()).unwrap_or_default()
}

/// Create a node of `kind` with defaults and a fresh id
#[wasm_bindgen(js_name = createNode)]
pub fn create_node_js(kind: &str, overrides: Option<String>) -> Result<String, JsValue> {
    create_node(kind, overrides.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Look up a node by id. Returns `undefined` when absent
#[wasm_bindgen(js_name = findNode)]
pub fn find_node_js(source: &str, id: &str) -> Result<Option<String>, JsValue> {
    find(source, id).map_err(|e| JsValue::from_str(&e))
}

/// Apply one mutation and return the new template
#[wasm_bindgen(js_name = applyMutation)]
pub fn apply_mutation_js(source: &str, mutation: &str) -> Result<String, JsValue> {
    apply_mutation(source, mutation).map_err(|e| JsValue::from_str(&e))
}

/// Whether a `parent` node may directly hold a `child` node
#[wasm_bindgen(js_name = canContain)]
pub fn can_contain_js(parent: &str, child: &str) -> bool {
    match (parent.parse::<NodeKind>(), child.parse::<NodeKind>()) {
        (Ok(parent), Ok(child)) => parent.accepts(child),
        _ => false,
    }
}

fn parse_template(source: &str) -> Result<Template, String> {
    let value: Value = serde_json::from_str(source).map_err(|e| format!("Parse error: {}", e))?;
    Template::validate(&value).map_err(|e| format!("Validation error: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn validate_template(source: &str) -> Result<String, String> {
    to_json(&parse_template(source)?)
}

fn create_node(kind: &str, overrides: Option<&str>) -> Result<String, String> {
    let kind: NodeKind = kind.parse()?;
    let node = match overrides {
        Some(source) => {
            let overrides: Value = serde_json::from_str(source).map_err(|e| format!("Parse error: {}", e))?;
            Node::defaults_with(kind, &overrides).map_err(|e| format!("Validation error: {}", e))?
        }
        None => Node::defaults(kind),
    };
    to_json(&node)
}

fn find(source: &str, id: &str) -> Result<Option<String>, String> {
    let template = parse_template(source)?;
    template.find(id).map(|node| to_json(&node)).transpose()
}

fn apply_mutation(source: &str, mutation: &str) -> Result<String, String> {
    let template = parse_template(source)?;
    let mutation: Mutation = serde_json::from_str(mutation).map_err(|e| format!("Invalid mutation: {}", e))?;
    let next = mutation
        .apply(&template)
        .map_err(|e| format!("{} failed: {}", mutation.label(), e))?;
    to_json(&next)
}
