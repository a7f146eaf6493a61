use super::*;

/// Builder for constructing a [`ValidatorConfig`] programmatically.
///
/// Uses the `&mut Self` return pattern for chaining setter calls, with a
/// terminal `build()` that runs the same resolution as config files do.
///
/// **Note:** `build()` drains the builder's state. A second call produces a
/// default config.
///
/// # Examples
///
/// ```rust
/// use toolvet_core::config::{RuleSetting, ValidatorConfig};
/// use toolvet_core::Severity;
///
/// let config = ValidatorConfig::builder()
///     .rule("LLM-001", RuleSetting::Disabled)
///     .rule("SEC-001", RuleSetting::Enabled(Severity::Error))
///     .build();
/// assert!(!config.is_rule_enabled("LLM-001"));
/// ```
pub struct ValidatorConfigBuilder {
    defaults: ConfigDefaults,
    user: UserConfig,
    source: ConfigSource,
}

impl ValidatorConfigBuilder {
    /// Prefer [`ValidatorConfig::builder()`] over calling this directly.
    pub(super) fn new() -> Self {
        Self {
            defaults: ConfigDefaults::builtin(),
            user: UserConfig::default(),
            source: ConfigSource::Default,
        }
    }

    /// Replace the default tables the user settings are merged over.
    pub fn defaults(&mut self, defaults: ConfigDefaults) -> &mut Self {
        self.defaults = defaults;
        self
    }

    /// Start from a user config, e.g. one loaded from disk.
    pub fn user_config(&mut self, user: UserConfig) -> &mut Self {
        self.user = user;
        self
    }

    pub fn rule(&mut self, rule_id: impl Into<String>, setting: RuleSetting) -> &mut Self {
        self.user.rules.set(rule_id, setting);
        self
    }

    pub fn disable_rule(&mut self, rule_id: impl Into<String>) -> &mut Self {
        self.rule(rule_id, RuleSetting::Disabled)
    }

    /// Apply `RULE-ID=value` tokens; invalid tokens are dropped.
    pub fn rule_overrides<S: AsRef<str>>(&mut self, tokens: &[S]) -> &mut Self {
        self.user.apply_rule_overrides(tokens);
        self
    }

    pub fn format(&mut self, format: OutputFormat) -> &mut Self {
        self.user.output.format = Some(format);
        self
    }

    pub fn verbose(&mut self, verbose: bool) -> &mut Self {
        self.user.output.verbose = Some(verbose);
        self
    }

    pub fn color(&mut self, color: bool) -> &mut Self {
        self.user.output.color = Some(color);
        self
    }

    pub fn llm(&mut self, llm: LlmConfig) -> &mut Self {
        self.user.llm = Some(llm);
        self
    }

    pub fn source(&mut self, source: ConfigSource) -> &mut Self {
        self.source = source;
        self
    }

    pub fn build(&mut self) -> ValidatorConfig {
        let defaults = std::mem::replace(&mut self.defaults, ConfigDefaults::builtin());
        let user = std::mem::take(&mut self.user);
        let source = std::mem::take(&mut self.source);
        resolve(&defaults, user).with_source(source)
    }
}

impl Default for ValidatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
