//! Rule registry: maps stable rule ids to check functions.
//!
//! The built-in table is a compile-time list of `(id, check)` pairs. A rule
//! becomes usable only when both its check function and its metadata (from
//! the `toolvet-rules` catalog or a provider) are available; anything else
//! is treated as absent for the run rather than as an error.

use std::collections::HashMap;

use crate::config::RuleConfig;
use crate::diagnostics::{Category, RuleError, Severity, ValidationIssue};
use crate::engine::RuleContext;
use crate::rules;
use crate::tool::ToolDefinition;

/// Signature of a rule check.
///
/// Checks are pure: they read the tool and the context and return the issues
/// they found, with a provisional severity the engine will overwrite.
pub type RuleCheck =
    fn(&ToolDefinition, &RuleContext<'_>) -> Result<Vec<ValidationIssue>, RuleError>;

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub default_severity: Severity,
    pub description: &'static str,
}

impl RuleMeta {
    /// Build metadata from the catalog entry for `id`.
    ///
    /// Returns `None` when the id is not catalogued or the entry names an
    /// unknown category or severity.
    pub fn from_catalog(id: &str) -> Option<Self> {
        let data = toolvet_rules::get_rule(id)?;
        Some(Self {
            id: data.id,
            name: data.name,
            category: Category::parse(data.category)?,
            default_severity: Severity::parse(data.default_severity)?,
            description: data.description,
        })
    }

    pub fn documentation(&self) -> String {
        toolvet_rules::documentation_url(self.id)
    }
}

/// A loaded rule: metadata plus its check function.
#[derive(Clone, Copy)]
pub struct Rule {
    pub meta: RuleMeta,
    pub check: RuleCheck,
}

impl Rule {
    pub fn id(&self) -> &'static str {
        self.meta.id
    }

    pub fn category(&self) -> Category {
        self.meta.category
    }

    pub fn default_severity(&self) -> Severity {
        self.meta.default_severity
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("meta", &self.meta).finish()
    }
}

/// A provider of rule checks.
///
/// Implement this trait to supply rules from outside the built-in table.
/// Rules whose ids are not in the catalog must also return their metadata.
///
/// # Example
///
/// ```
/// use toolvet_core::{RuleCheck, RuleProvider, RuleRegistry};
///
/// struct MyProvider;
///
/// impl RuleProvider for MyProvider {
///     fn rules(&self) -> Vec<(&'static str, RuleCheck)> {
///         vec![]
///     }
/// }
///
/// let registry = RuleRegistry::builder()
///     .with_defaults()
///     .with_provider(&MyProvider)
///     .build();
/// assert!(registry.is_registered("SEC-001"));
/// ```
pub trait RuleProvider: Send + Sync {
    /// Human-readable name for this provider.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Rule ids and their checks, in registration order.
    fn rules(&self) -> Vec<(&'static str, RuleCheck)>;

    /// Metadata for rules that are not part of the built-in catalog.
    fn metadata(&self) -> Vec<RuleMeta> {
        Vec::new()
    }
}

/// The built-in rule provider.
pub(crate) struct BuiltinProvider;

impl RuleProvider for BuiltinProvider {
    fn rules(&self) -> Vec<(&'static str, RuleCheck)> {
        BUILTIN_RULES.to_vec()
    }
}

/// Registry of rule checks, in registration order.
pub struct RuleRegistry {
    checks: Vec<(&'static str, RuleCheck)>,
    metadata: HashMap<&'static str, RuleMeta>,
}

impl RuleRegistry {
    /// Create an empty registry with no registered rules.
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in rules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_provider(&BuiltinProvider);
        registry
    }

    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::new()
    }

    /// Register a check. The first registration of an id wins.
    pub fn register(&mut self, id: &'static str, check: RuleCheck) {
        if self.is_registered(id) {
            tracing::debug!(rule = id, "ignoring duplicate rule registration");
            return;
        }
        self.checks.push((id, check));
    }

    /// Register metadata for a rule outside the catalog.
    pub fn register_metadata(&mut self, meta: RuleMeta) {
        self.metadata.insert(meta.id, meta);
    }

    pub fn register_provider(&mut self, provider: &dyn RuleProvider) {
        for meta in provider.metadata() {
            self.register_metadata(meta);
        }
        for (id, check) in provider.rules() {
            self.register(id, check);
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.checks.iter().any(|(registered, _)| *registered == id)
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|(id, _)| *id)
    }

    /// Load a rule by id.
    ///
    /// Returns `None` when the id has no registered check or no metadata.
    pub fn load(&self, id: &str) -> Option<Rule> {
        let (_, check) = self.checks.iter().find(|(registered, _)| *registered == id)?;
        let meta = self
            .metadata
            .get(id)
            .copied()
            .or_else(|| RuleMeta::from_catalog(id));
        match meta {
            Some(meta) => Some(Rule {
                meta,
                check: *check,
            }),
            None => {
                tracing::debug!(rule = id, "rule has no metadata, skipping");
                None
            }
        }
    }

    /// Load every registered rule that appears in the config table, in
    /// registration order. Rules that fail to load are skipped; config ids
    /// without a registered check are inert.
    pub fn load_configured(&self, rules: &RuleConfig) -> Vec<Rule> {
        for (id, _) in rules.iter() {
            if !self.is_registered(id) {
                tracing::debug!(rule = id, "configured rule is not registered");
            }
        }

        self.checks
            .iter()
            .filter(|(id, _)| rules.contains(id))
            .filter_map(|(id, _)| self.load(id))
            .collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Builder for constructing a [`RuleRegistry`].
pub struct RuleRegistryBuilder {
    registry: RuleRegistry,
    excluded: Vec<String>,
}

impl RuleRegistryBuilder {
    fn new() -> Self {
        Self {
            registry: RuleRegistry::new(),
            excluded: Vec::new(),
        }
    }

    /// Add the built-in rules.
    pub fn with_defaults(&mut self) -> &mut Self {
        self.registry.register_provider(&BuiltinProvider);
        self
    }

    pub fn with_provider(&mut self, provider: &dyn RuleProvider) -> &mut Self {
        self.registry.register_provider(provider);
        self
    }

    pub fn with_rule(&mut self, id: &'static str, check: RuleCheck) -> &mut Self {
        self.registry.register(id, check);
        self
    }

    pub fn with_metadata(&mut self, meta: RuleMeta) -> &mut Self {
        self.registry.register_metadata(meta);
        self
    }

    /// Leave a rule out of the built registry entirely.
    pub fn without_rule(&mut self, id: impl Into<String>) -> &mut Self {
        self.excluded.push(id.into());
        self
    }

    pub fn build(&mut self) -> RuleRegistry {
        let mut registry = std::mem::replace(&mut self.registry, RuleRegistry::new());
        let excluded = std::mem::take(&mut self.excluded);
        registry
            .checks
            .retain(|(id, _)| !excluded.iter().any(|e| e == id));
        registry
    }
}

/// Built-in rule table, in registration order.
const BUILTIN_RULES: &[(&str, RuleCheck)] = &[
    ("SCH-001", rules::schema::check_object_root),
    ("SCH-002", rules::schema::check_property_types),
    ("SCH-003", rules::schema::check_required_list),
    ("SCH-004", rules::schema::check_type_names),
    ("SCH-005", rules::schema::check_array_items),
    ("SCH-006", rules::schema::check_enum_values),
    ("SCH-007", rules::schema::check_nesting_depth),
    ("SCH-008", rules::schema::check_duplicate_structures),
    ("NAME-001", rules::naming::check_name_format),
    ("NAME-002", rules::naming::check_name_length),
    ("NAME-003", rules::naming::check_name_casing_across_tools),
    ("NAME-004", rules::naming::check_parameter_casing),
    ("NAME-005", rules::naming::check_abbreviations),
    ("NAME-006", rules::naming::check_unique_names),
    ("SEC-001", rules::security::check_string_bounds),
    ("SEC-002", rules::security::check_injection_prone_parameters),
    ("SEC-003", rules::security::check_destructive_hint),
    ("SEC-004", rules::security::check_credential_parameters),
    ("SEC-005", rules::security::check_numeric_bounds),
    ("SEC-006", rules::security::check_additional_properties),
    ("LLM-001", rules::llm::check_description_present),
    ("LLM-002", rules::llm::check_description_min_length),
    ("LLM-003", rules::llm::check_description_max_length),
    ("LLM-004", rules::llm::check_parameter_descriptions),
    ("LLM-005", rules::llm::check_ambiguous_terms),
    ("LLM-006", rules::llm::check_usage_guidance),
    ("LLM-007", rules::llm::check_parameter_count),
    ("BP-001", rules::best_practice::check_required_declared),
    ("BP-002", rules::best_practice::check_annotations_present),
    ("BP-003", rules::best_practice::check_description_format),
    ("BP-004", rules::best_practice::check_workflow_description),
    ("BP-005", rules::best_practice::check_boolean_defaults),
];
