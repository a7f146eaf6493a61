//! Build script for toolvet-rules.
//!
//! Generates the static rule catalog from rules.json at compile time.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

/// Maximum allowed file size for rules.json (1 MB)
const MAX_RULES_FILE_SIZE: u64 = 1024 * 1024;

const CATEGORIES: &[&str] = &[
    "schema",
    "security",
    "llm-compatibility",
    "naming",
    "best-practice",
];

const SEVERITIES: &[&str] = &["error", "warning", "suggestion"];

/// Rule ids are `PREFIX-NNN`: uppercase ASCII letters, a hyphen, three digits.
fn is_valid_id(id: &str) -> bool {
    let Some((prefix, number)) = id.split_once('-') else {
        return false;
    };
    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_uppercase())
        && number.len() == 3
        && number.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_text(text: &str, max: usize) -> bool {
    !text.is_empty() && text.len() <= max && !text.chars().any(|c| c.is_control())
}

fn escape_str(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let rules_path = Path::new(&manifest_dir).join("rules.json");

    println!("cargo:rerun-if-changed={}", rules_path.display());

    let file_size = fs::metadata(&rules_path)
        .unwrap_or_else(|e| panic!("Failed to get metadata for {}: {}", rules_path.display(), e))
        .len();
    if file_size > MAX_RULES_FILE_SIZE {
        panic!(
            "rules.json at {} is too large ({} bytes, max {} bytes)",
            rules_path.display(),
            file_size,
            MAX_RULES_FILE_SIZE
        );
    }

    let rules_json = fs::read_to_string(&rules_path)
        .unwrap_or_else(|e| panic!("Failed to read rules.json at {}: {}", rules_path.display(), e));

    let rules: serde_json::Value = serde_json::from_str(&rules_json).unwrap_or_else(|e| {
        panic!(
            "Failed to parse rules.json at {}: {}",
            rules_path.display(),
            e
        )
    });

    let rules_array = rules["rules"]
        .as_array()
        .expect("rules.json must have a 'rules' array");

    let mut generated_code = String::new();
    generated_code.push_str("// Auto-generated from rules.json by build.rs\n");
    generated_code.push_str("// Do not edit manually!\n\n");
    generated_code.push_str("/// The complete rule catalog, in registration order.\n");
    generated_code.push_str("pub const RULES_DATA: &[RuleData] = &[\n");

    let mut seen = HashSet::new();
    for (idx, rule) in rules_array.iter().enumerate() {
        let field = |name: &str| -> &str {
            rule[name]
                .as_str()
                .unwrap_or_else(|| panic!("rule[{}] must have string '{}' field", idx, name))
        };
        let id = field("id");
        let name = field("name");
        let category = field("category");
        let severity = field("severity");
        let description = field("description");

        if !is_valid_id(id) {
            panic!(
                "rule[{}] has invalid id '{}': expected PREFIX-NNN with an uppercase prefix",
                idx, id
            );
        }
        if !seen.insert(id.to_string()) {
            panic!("rule[{}] duplicates id '{}'", idx, id);
        }
        if !CATEGORIES.contains(&category) {
            panic!("rule[{}] '{}' has unknown category '{}'", idx, id, category);
        }
        if !SEVERITIES.contains(&severity) {
            panic!("rule[{}] '{}' has unknown severity '{}'", idx, id, severity);
        }
        if !is_valid_text(name, 200) || !is_valid_text(description, 1000) {
            panic!(
                "rule[{}] '{}' has invalid name or description: must be non-empty, no control characters",
                idx, id
            );
        }

        generated_code.push_str(&format!(
            "    RuleData {{ id: \"{}\", name: \"{}\", category: \"{}\", default_severity: \"{}\", description: \"{}\" }},\n",
            escape_str(id),
            escape_str(name),
            escape_str(category),
            escape_str(severity),
            escape_str(description),
        ));
    }

    generated_code.push_str("];\n");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("rules_data.rs");
    fs::write(&dest_path, generated_code).expect("Failed to write generated rules");
}
