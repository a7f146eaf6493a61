use super::*;

/// The default rule and output tables a resolution starts from.
///
/// Passed explicitly into [`resolve`] so tests can use arbitrary tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub rules: RuleConfig,
    pub output: OutputConfig,
}

impl ConfigDefaults {
    /// Every catalog rule enabled at its default severity, text output.
    pub fn builtin() -> Self {
        Self {
            rules: toolvet_rules::RULES_DATA
                .iter()
                .map(|rule| (rule.id, RuleSetting::EnabledDefault))
                .collect(),
            output: OutputConfig::default(),
        }
    }
}

/// Output settings as written by the user; unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialOutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// User-supplied configuration, as read from a config file or built by a CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub rules: RuleConfig,
    pub output: PartialOutputConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
}

/// Merge `user` over `defaults`.
///
/// - `rules`: user entries overwrite default entries key by key.
/// - `output`: each field set by the user wins.
/// - `llm`: present only if the user supplied it.
pub fn resolve(defaults: &ConfigDefaults, user: UserConfig) -> ValidatorConfig {
    let mut rules = defaults.rules.clone();
    rules.merge(&user.rules);

    let output = OutputConfig {
        format: user.output.format.unwrap_or(defaults.output.format),
        verbose: user.output.verbose.unwrap_or(defaults.output.verbose),
        color: user.output.color.unwrap_or(defaults.output.color),
    };

    ValidatorConfig {
        rules,
        output,
        llm: user.llm,
        source: ConfigSource::Default,
    }
}
