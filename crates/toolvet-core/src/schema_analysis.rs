//! Traversal helpers over JSON-Schema-shaped input schemas.
//!
//! Two algorithms live here: nesting-depth measurement and structural
//! duplicate detection. Both are bounded by [`MAX_TRAVERSAL_DEPTH`] so that
//! pathological schemas terminate.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::tool::ToolDefinition;

/// Recursion guard for every traversal in this module.
pub const MAX_TRAVERSAL_DEPTH: usize = 64;

/// Deepest nesting accepted without a warning.
pub const MAX_NESTING_DEPTH: usize = 4;

/// Base pointer for locations inside a tool's input schema.
pub const SCHEMA_POINTER: &str = "/inputSchema";

/// Keys that describe a schema without changing its structure.
const VOLATILE_KEYS: &[&str] = &["description", "examples", "default", "title", "$comment"];

/// Keywords whose branches are transparent for depth purposes.
const COMBINATORS: &[&str] = &["oneOf", "anyOf", "allOf"];

/// Escape one JSON pointer segment.
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Pointer to a top-level property of the input schema.
pub fn property_pointer(name: &str) -> String {
    format!("{}/properties/{}", SCHEMA_POINTER, escape_pointer(name))
}

/// A schema object reached during a walk.
#[derive(Debug, Clone)]
pub struct SchemaNode<'a> {
    pub schema: &'a Map<String, Value>,
    /// JSON pointer from the tool root, e.g. `/inputSchema/properties/query`.
    pub pointer: String,
    /// Property name when this node is the value of a `properties` entry.
    pub property: Option<&'a str>,
    /// Number of structural levels above this node.
    pub level: usize,
}

impl SchemaNode<'_> {
    /// The `type` keyword when it is a single string.
    pub fn type_name(&self) -> Option<&str> {
        self.schema.get("type").and_then(Value::as_str)
    }

    /// Whether `type` is `name`, either directly or inside a type array.
    pub fn has_type(&self, name: &str) -> bool {
        match self.schema.get("type") {
            Some(Value::String(t)) => t == name,
            Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(name)),
            _ => false,
        }
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.schema.get("properties").and_then(Value::as_object)
    }
}

/// Visit every schema object reachable from `root`, parents before children.
///
/// Children are `properties` values, `items` (object or tuple array),
/// `additionalProperties` objects and combinator branches. Non-object values
/// are skipped.
pub fn walk_schema<'a>(root: &'a Value, mut visit: impl FnMut(&SchemaNode<'a>)) {
    walk_at(root, SCHEMA_POINTER.to_string(), None, 0, 0, &mut visit);
}

fn walk_at<'a>(
    value: &'a Value,
    pointer: String,
    property: Option<&'a str>,
    level: usize,
    guard: usize,
    visit: &mut impl FnMut(&SchemaNode<'a>),
) {
    let Some(schema) = value.as_object() else {
        return;
    };
    if guard >= MAX_TRAVERSAL_DEPTH {
        return;
    }

    let node = SchemaNode {
        schema,
        pointer,
        property,
        level,
    };
    visit(&node);

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, child) in properties {
            let child_pointer = format!("{}/properties/{}", node.pointer, escape_pointer(name));
            walk_at(child, child_pointer, Some(name), level + 1, guard + 1, visit);
        }
    }

    match schema.get("items") {
        Some(items @ Value::Object(_)) => {
            let child_pointer = format!("{}/items", node.pointer);
            walk_at(items, child_pointer, None, level + 1, guard + 1, visit);
        }
        Some(Value::Array(tuple)) => {
            for (i, item) in tuple.iter().enumerate() {
                let child_pointer = format!("{}/items/{}", node.pointer, i);
                walk_at(item, child_pointer, None, level + 1, guard + 1, visit);
            }
        }
        _ => {}
    }

    if let Some(extra @ Value::Object(_)) = schema.get("additionalProperties") {
        let child_pointer = format!("{}/additionalProperties", node.pointer);
        walk_at(extra, child_pointer, None, level + 1, guard + 1, visit);
    }

    for keyword in COMBINATORS {
        if let Some(Value::Array(branches)) = schema.get(*keyword) {
            for (i, branch) in branches.iter().enumerate() {
                let child_pointer = format!("{}/{}/{}", node.pointer, keyword, i);
                walk_at(branch, child_pointer, None, level, guard + 1, visit);
            }
        }
    }
}

// ============================================================================
// Depth measurement
// ============================================================================

/// Nesting depth of a schema.
///
/// A node without structural children has depth 0; otherwise its depth is one
/// more than its deepest child. Combinator branches count at the level of
/// the node that holds them.
pub fn schema_depth(schema: &Value) -> usize {
    depth_at(schema, 0)
}

fn depth_at(value: &Value, guard: usize) -> usize {
    let Some(schema) = value.as_object() else {
        return 0;
    };
    if guard >= MAX_TRAVERSAL_DEPTH {
        return 0;
    }

    let nested = structural_children(schema)
        .map(|child| depth_at(child, guard + 1))
        .max()
        .map_or(0, |deepest| deepest + 1);

    let branches = COMBINATORS
        .iter()
        .filter_map(|keyword| schema.get(*keyword).and_then(Value::as_array))
        .flatten()
        .map(|branch| depth_at(branch, guard + 1))
        .max()
        .unwrap_or(0);

    nested.max(branches)
}

/// Object-valued children that add a nesting level.
fn structural_children(schema: &Map<String, Value>) -> impl Iterator<Item = &Value> {
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|props| props.values());

    let items: Vec<&Value> = match schema.get("items") {
        Some(items @ Value::Object(_)) => vec![items],
        Some(Value::Array(tuple)) => tuple.iter().collect(),
        _ => Vec::new(),
    };

    let extra = schema
        .get("additionalProperties")
        .filter(|value| value.is_object());

    properties
        .chain(items)
        .chain(extra)
        .filter(|child| child.is_object())
}

// ============================================================================
// Structural duplicates
// ============================================================================

/// Canonical form of a schema used for structural comparison.
///
/// Object keys are sorted, `enum` and `required` become sorted sets, and
/// descriptive keys are dropped at every level except where they name a
/// property or sit inside an `enum` or `const` literal.
pub fn canonical_form(schema: &Value) -> Value {
    canonicalize(schema, false, 0)
}

fn canonicalize(value: &Value, is_property_map: bool, guard: usize) -> Value {
    if guard >= MAX_TRAVERSAL_DEPTH {
        return Value::Null;
    }

    match value {
        Value::Object(map) => {
            let mut sorted: BTreeMap<&str, Value> = BTreeMap::new();
            for (key, child) in map {
                if is_property_map {
                    sorted.insert(key, canonicalize(child, false, guard + 1));
                    continue;
                }
                if VOLATILE_KEYS.contains(&key.as_str()) {
                    continue;
                }
                let canonical = match (key.as_str(), child) {
                    ("properties", _) => canonicalize(child, true, guard + 1),
                    ("enum" | "required", Value::Array(values)) => literal_set(values),
                    ("const", literal) => literal.clone(),
                    _ => canonicalize(child, false, guard + 1),
                };
                sorted.insert(key, canonical);
            }
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, child)| (key.to_string(), child))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(
            values
                .iter()
                .map(|child| canonicalize(child, false, guard + 1))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// `enum` and `required` members are literal values: compared as a set, but
/// never canonicalized, so keys inside them survive.
fn literal_set(values: &[Value]) -> Value {
    let mut keyed: BTreeMap<String, Value> = BTreeMap::new();
    for value in values {
        keyed.insert(value.to_string(), value.clone());
    }
    Value::Array(keyed.into_values().collect())
}

/// Stable string identifying a schema's structure.
pub fn structural_fingerprint(schema: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&canonical_form(schema))
}

/// Whether two schemas are equal after canonicalization.
pub fn is_structural_duplicate(a: &Value, b: &Value) -> bool {
    canonical_form(a) == canonical_form(b)
}

fn is_object_schema(value: &Value) -> bool {
    value.as_object().is_some_and(|schema| {
        schema.get("type").and_then(Value::as_str) == Some("object")
            || schema.get("properties").is_some_and(Value::is_object)
    })
}

/// Whether a schema is complex enough for duplicate reporting: at least two
/// properties, an array of objects, or an object holding a nested object.
pub fn is_duplicate_candidate(schema: &Value) -> bool {
    let Some(map) = schema.as_object() else {
        return false;
    };

    if let Some(properties) = map.get("properties").and_then(Value::as_object) {
        if properties.len() >= 2 {
            return true;
        }
        if properties.values().any(is_object_schema) {
            return true;
        }
    }

    map.get("items").is_some_and(is_object_schema)
}

/// A top-level property structurally equal to an earlier sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingDuplicate {
    pub property: String,
    pub earlier: String,
}

/// A top-level property structurally equal to one in another tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossToolDuplicate {
    pub property: String,
    pub other_tool: String,
    pub other_property: String,
}

/// Eligible top-level properties of a tool with their fingerprints.
fn candidate_fingerprints(
    tool: &ToolDefinition,
) -> Result<Vec<(&str, String)>, serde_json::Error> {
    let Some(properties) = tool.properties() else {
        return Ok(Vec::new());
    };

    properties
        .iter()
        .filter(|(_, schema)| is_duplicate_candidate(schema))
        .map(|(name, schema)| Ok((name.as_str(), structural_fingerprint(schema)?)))
        .collect()
}

/// Duplicate pairs among a tool's own top-level properties, one entry per
/// pair, attributed to the later property.
pub fn find_sibling_duplicates(
    tool: &ToolDefinition,
) -> Result<Vec<SiblingDuplicate>, serde_json::Error> {
    let candidates = candidate_fingerprints(tool)?;
    let mut found = Vec::new();

    for (later_index, (property, fingerprint)) in candidates.iter().enumerate() {
        for (earlier, earlier_fingerprint) in &candidates[..later_index] {
            if earlier_fingerprint == fingerprint {
                found.push(SiblingDuplicate {
                    property: property.to_string(),
                    earlier: earlier.to_string(),
                });
            }
        }
    }

    Ok(found)
}

/// Top-level properties of `tool` that duplicate a top-level property of any
/// other tool in `all_tools`. `tool` itself is recognised by identity, so two
/// tools sharing a name are still compared.
pub fn find_cross_tool_duplicates(
    tool: &ToolDefinition,
    all_tools: &[ToolDefinition],
) -> Result<Vec<CrossToolDuplicate>, serde_json::Error> {
    let own = candidate_fingerprints(tool)?;
    if own.is_empty() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for other in all_tools.iter().filter(|other| !std::ptr::eq(*other, tool)) {
        let theirs = candidate_fingerprints(other)?;
        for (property, fingerprint) in &own {
            for (other_property, other_fingerprint) in &theirs {
                if fingerprint == other_fingerprint {
                    found.push(CrossToolDuplicate {
                        property: property.to_string(),
                        other_tool: other.name.clone(),
                        other_property: other_property.to_string(),
                    });
                }
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested(levels: usize) -> Value {
        let mut schema = json!({"type": "string"});
        for level in (1..=levels).rev() {
            schema = json!({
                "type": "object",
                "properties": { format!("level{}", level): schema }
            });
        }
        schema
    }

    fn address() -> Value {
        json!({
            "type": "object",
            "properties": {
                "street": {"type": "string"},
                "city": {"type": "string"},
                "zip": {"type": "string"}
            },
            "required": ["street", "city"]
        })
    }

    #[test]
    fn test_leaf_depth_is_zero() {
        assert_eq!(schema_depth(&json!({"type": "string"})), 0);
        assert_eq!(schema_depth(&json!({"type": "object"})), 0);
        assert_eq!(schema_depth(&json!({"type": "object", "properties": {}})), 0);
        assert_eq!(schema_depth(&json!(true)), 0);
    }

    #[test]
    fn test_depth_counts_property_levels() {
        assert_eq!(schema_depth(&nested(1)), 1);
        assert_eq!(schema_depth(&nested(4)), 4);
        assert_eq!(schema_depth(&nested(5)), 5);
    }

    #[test]
    fn test_depth_through_items_and_additional_properties() {
        let schema = json!({
            "type": "object",
            "properties": {
                "list": {"type": "array", "items": {"type": "object", "properties": {"x": {"type": "integer"}}}},
                "map": {"type": "object", "additionalProperties": {"type": "string"}}
            }
        });
        // root -> list -> items -> x
        assert_eq!(schema_depth(&schema), 3);

        let tuple = json!({"type": "array", "items": [{"type": "string"}, nested(2)]});
        assert_eq!(schema_depth(&tuple), 3);
    }

    #[test]
    fn test_combinators_are_transparent() {
        let schema = json!({
            "oneOf": [nested(2), {"type": "string"}],
            "anyOf": [{"allOf": [nested(3)]}]
        });
        assert_eq!(schema_depth(&schema), 3);
    }

    #[test]
    fn test_depth_guard_terminates() {
        let deep = nested(500);
        assert!(schema_depth(&deep) <= MAX_TRAVERSAL_DEPTH);
    }

    #[test]
    fn test_walk_reports_pointers_and_properties() {
        let schema = json!({
            "type": "object",
            "properties": {
                "a/b": {"type": "array", "items": {"type": "string"}},
                "c": {"anyOf": [{"type": "string"}, {"type": "null"}]}
            }
        });
        let mut seen = Vec::new();
        walk_schema(&schema, |node| {
            seen.push((node.pointer.clone(), node.property.map(str::to_string), node.level))
        });

        assert_eq!(
            seen,
            vec![
                ("/inputSchema".to_string(), None, 0),
                ("/inputSchema/properties/a~1b".to_string(), Some("a/b".to_string()), 1),
                ("/inputSchema/properties/a~1b/items".to_string(), None, 2),
                ("/inputSchema/properties/c".to_string(), Some("c".to_string()), 1),
                ("/inputSchema/properties/c/anyOf/0".to_string(), None, 1),
                ("/inputSchema/properties/c/anyOf/1".to_string(), None, 1),
            ]
        );
    }

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(escape_pointer("a~b/c"), "a~0b~1c");
        assert_eq!(property_pointer("x"), "/inputSchema/properties/x");
    }

    #[test]
    fn test_canonical_form_ignores_descriptive_fields_and_order() {
        let a = json!({
            "type": "object",
            "description": "Where to ship",
            "properties": {
                "street": {"type": "string", "description": "Street line"},
                "city": {"type": "string", "examples": ["Paris"]}
            },
            "required": ["street", "city"]
        });
        let b = json!({
            "required": ["city", "street", "city"],
            "properties": {
                "city": {"type": "string"},
                "street": {"title": "Street", "type": "string"}
            },
            "type": "object"
        });
        assert!(is_structural_duplicate(&a, &b));
        assert_eq!(
            structural_fingerprint(&a).unwrap(),
            structural_fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn test_property_named_like_volatile_key_is_kept() {
        let with = json!({"type": "object", "properties": {"description": {"type": "string"}, "id": {"type": "string"}}});
        let without = json!({"type": "object", "properties": {"id": {"type": "string"}}});
        assert!(!is_structural_duplicate(&with, &without));
    }

    #[test]
    fn test_enum_compared_as_set() {
        let a = json!({"type": "string", "enum": ["b", "a"]});
        let b = json!({"type": "string", "enum": ["a", "b", "a"]});
        let c = json!({"type": "string", "enum": ["a", "c"]});
        assert!(is_structural_duplicate(&a, &b));
        assert!(!is_structural_duplicate(&a, &c));
    }

    #[test]
    fn test_enum_and_const_literals_keep_descriptive_keys() {
        let a = json!({
            "type": "object",
            "enum": [{"description": "alpha"}, {"description": "beta"}]
        });
        let b = json!({"type": "object", "enum": [{"description": "gamma"}]});
        assert!(!is_structural_duplicate(&a, &b));

        let reordered = json!({
            "type": "object",
            "enum": [{"description": "beta"}, {"description": "alpha"}]
        });
        assert!(is_structural_duplicate(&a, &reordered));

        let x = json!({"const": {"title": "first"}});
        let y = json!({"const": {"title": "second"}});
        assert!(!is_structural_duplicate(&x, &y));
    }

    #[test]
    fn test_tuple_items_order_matters() {
        let a = json!({"type": "array", "items": [{"type": "string"}, {"type": "integer"}]});
        let b = json!({"type": "array", "items": [{"type": "integer"}, {"type": "string"}]});
        assert!(!is_structural_duplicate(&a, &b));
    }

    #[test]
    fn test_duplicate_candidate_thresholds() {
        assert!(is_duplicate_candidate(&address()));
        assert!(!is_duplicate_candidate(&json!({"type": "string"})));
        assert!(!is_duplicate_candidate(
            &json!({"type": "object", "properties": {"a": {"type": "string"}}})
        ));
        assert!(is_duplicate_candidate(
            &json!({"type": "array", "items": {"type": "object"}})
        ));
        assert!(is_duplicate_candidate(&json!({
            "type": "object",
            "properties": {"inner": {"type": "object"}}
        })));
        assert!(!is_duplicate_candidate(
            &json!({"type": "array", "items": {"type": "string"}})
        ));
    }

    #[test]
    fn test_sibling_duplicates_reported_once_per_pair() {
        let tool = ToolDefinition::new(
            "ship",
            "Ships things",
            json!({
                "type": "object",
                "properties": {
                    "from": address(),
                    "to": address(),
                    "note": {"type": "string"},
                    "billing": address()
                }
            }),
        );
        let found = find_sibling_duplicates(&tool).unwrap();
        let pairs: Vec<(&str, &str)> = found
            .iter()
            .map(|d| (d.property.as_str(), d.earlier.as_str()))
            .collect();
        assert_eq!(pairs, vec![("to", "from"), ("billing", "from"), ("billing", "to")]);
    }

    #[test]
    fn test_cross_tool_duplicates_from_each_side() {
        let tools = vec![
            ToolDefinition::new(
                "create-order",
                "Creates an order",
                json!({"type": "object", "properties": {"address": address()}}),
            ),
            ToolDefinition::new(
                "update-customer",
                "Updates a customer",
                json!({"type": "object", "properties": {"shipping": address()}}),
            ),
        ];

        let first = find_cross_tool_duplicates(&tools[0], &tools).unwrap();
        assert_eq!(
            first,
            vec![CrossToolDuplicate {
                property: "address".into(),
                other_tool: "update-customer".into(),
                other_property: "shipping".into(),
            }]
        );

        let second = find_cross_tool_duplicates(&tools[1], &tools).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].other_tool, "create-order");
    }

    #[test]
    fn test_cross_tool_ignores_self_but_not_same_named_tool() {
        let schema = json!({"type": "object", "properties": {"address": address()}});
        let tools = vec![
            ToolDefinition::new("same", "One", schema.clone()),
            ToolDefinition::new("same", "Two", schema),
        ];
        assert_eq!(find_cross_tool_duplicates(&tools[0], &tools).unwrap().len(), 1);
        assert!(find_cross_tool_duplicates(&tools[0], &tools[..1]).unwrap().is_empty());
    }
}
