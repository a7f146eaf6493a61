//! Validator configuration.
//!
//! A [`ValidatorConfig`] is produced once per run by [`resolve`] from an
//! explicit [`ConfigDefaults`] value and the user's [`UserConfig`], and is
//! read-only afterwards.

use crate::diagnostics::Severity;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

mod builder;
mod discovery;
mod overrides;
mod resolver;

pub use builder::ValidatorConfigBuilder;
pub use discovery::{CONFIG_FILE_NAMES, discover_config, load_config_file, load_user_config};
pub use overrides::{apply_rule_overrides, parse_rule_override};
pub use resolver::{ConfigDefaults, PartialOutputConfig, UserConfig, resolve};

/// Per-rule setting.
///
/// In config files a setting is written as `true`, `false`, or a severity
/// name; `"on"` and `"off"` are accepted as aliases for the booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSetting {
    Disabled,
    /// Enabled with the rule's own default severity.
    #[default]
    EnabledDefault,
    /// Enabled with every issue forced to this severity.
    Enabled(Severity),
}

impl RuleSetting {
    pub fn is_enabled(self) -> bool {
        !matches!(self, RuleSetting::Disabled)
    }

    /// Severity attached to the rule's issues given its compiled-in default.
    pub fn effective_severity(self, default: Severity) -> Severity {
        match self {
            RuleSetting::Enabled(severity) => severity,
            RuleSetting::EnabledDefault | RuleSetting::Disabled => default,
        }
    }

    /// Parse a setting value (`off|false|on|true|error|warning|suggestion`),
    /// ignoring ASCII case. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("false") {
            return Some(RuleSetting::Disabled);
        }
        if value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("true") {
            return Some(RuleSetting::EnabledDefault);
        }
        Severity::parse(value).map(RuleSetting::Enabled)
    }
}

impl fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetting::Disabled => f.write_str("off"),
            RuleSetting::EnabledDefault => f.write_str("on"),
            RuleSetting::Enabled(severity) => write!(f, "{}", severity),
        }
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleSetting::Disabled => serializer.serialize_bool(false),
            RuleSetting::EnabledDefault => serializer.serialize_bool(true),
            RuleSetting::Enabled(severity) => serializer.serialize_str(severity.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Level(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(RuleSetting::EnabledDefault),
            Raw::Flag(false) => Ok(RuleSetting::Disabled),
            Raw::Level(value) => RuleSetting::parse(&value).ok_or_else(|| {
                D::Error::custom(format!(
                    "invalid rule setting '{}': expected true, false, error, warning or suggestion",
                    value
                ))
            }),
        }
    }
}

/// Mapping from rule id to its setting.
///
/// A rule id missing from the map is treated as [`RuleSetting::EnabledDefault`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfig(BTreeMap<String, RuleSetting>);

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setting for a rule, defaulting to enabled when absent.
    pub fn setting(&self, rule_id: &str) -> RuleSetting {
        self.0.get(rule_id).copied().unwrap_or_default()
    }

    pub fn get(&self, rule_id: &str) -> Option<RuleSetting> {
        self.0.get(rule_id).copied()
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.0.contains_key(rule_id)
    }

    pub fn set(&mut self, rule_id: impl Into<String>, setting: RuleSetting) {
        self.0.insert(rule_id.into(), setting);
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.setting(rule_id).is_enabled()
    }

    /// Overwrite entries key by key with those of `other`.
    pub fn merge(&mut self, other: &RuleConfig) {
        for (id, setting) in &other.0 {
            self.0.insert(id.clone(), *setting);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RuleSetting)> {
        self.0.iter().map(|(id, setting)| (id.as_str(), *setting))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RuleSetting)> for RuleConfig {
    fn from_iter<I: IntoIterator<Item = (K, RuleSetting)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Report format requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbose: bool,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
            color: true,
        }
    }
}

/// Settings for optional model-assisted analysis. Carried through resolution
/// untouched; the engine itself never contacts a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Where the user portion of a config came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    #[default]
    Default,
    Discovered(PathBuf),
    Explicit(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("default"),
            ConfigSource::Discovered(path) | ConfigSource::Explicit(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

/// Fully resolved configuration for one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorConfig {
    rules: RuleConfig,
    output: OutputConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    llm: Option<LlmConfig>,
    #[serde(skip)]
    source: ConfigSource,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        resolve(&ConfigDefaults::builtin(), UserConfig::default())
    }
}

impl ValidatorConfig {
    /// Create a new [`ValidatorConfigBuilder`] seeded with the built-in defaults.
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::new()
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn llm(&self) -> Option<&LlmConfig> {
        self.llm.as_ref()
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Record where the user config came from (builder pattern).
    pub fn with_source(mut self, source: ConfigSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.is_enabled(rule_id)
    }

    /// Whether model-assisted analysis was requested.
    pub fn llm_enabled(&self) -> bool {
        self.llm.as_ref().is_some_and(|llm| llm.enabled)
    }
}

#[cfg(test)]
mod tests;
