use super::*;
use std::io::Write;
use std::path::Path;

fn defaults_with(entries: &[(&str, RuleSetting)]) -> ConfigDefaults {
    ConfigDefaults {
        rules: entries.iter().copied().collect(),
        output: OutputConfig::default(),
    }
}

#[test]
fn test_default_config_enables_all_catalog_rules() {
    let config = ValidatorConfig::default();

    for rule in toolvet_rules::RULES_DATA {
        assert!(config.is_rule_enabled(rule.id), "{} should be enabled", rule.id);
        assert_eq!(config.rules().get(rule.id), Some(RuleSetting::EnabledDefault));
    }
    assert_eq!(config.rules().len(), toolvet_rules::rule_count());
    assert!(config.llm().is_none());
    assert_eq!(config.source(), &ConfigSource::Default);
}

#[test]
fn test_absent_rule_is_enabled_with_default_severity() {
    let rules = RuleConfig::new();
    assert_eq!(rules.setting("SEC-001"), RuleSetting::EnabledDefault);
    assert!(rules.is_enabled("SEC-001"));
}

#[test]
fn test_effective_severity() {
    assert_eq!(
        RuleSetting::EnabledDefault.effective_severity(Severity::Error),
        Severity::Error
    );
    assert_eq!(
        RuleSetting::Enabled(Severity::Warning).effective_severity(Severity::Error),
        Severity::Warning
    );
}

#[test]
fn test_resolve_user_rules_overwrite_defaults_key_by_key() {
    let defaults = defaults_with(&[
        ("SCH-001", RuleSetting::EnabledDefault),
        ("LLM-001", RuleSetting::EnabledDefault),
    ]);
    let mut user = UserConfig::default();
    user.rules.set("LLM-001", RuleSetting::Disabled);
    user.rules.set("SEC-002", RuleSetting::Enabled(Severity::Error));

    let config = resolve(&defaults, user);

    assert_eq!(config.rules().get("SCH-001"), Some(RuleSetting::EnabledDefault));
    assert_eq!(config.rules().get("LLM-001"), Some(RuleSetting::Disabled));
    assert_eq!(
        config.rules().get("SEC-002"),
        Some(RuleSetting::Enabled(Severity::Error))
    );
    assert_eq!(config.rules().len(), 3);
}

#[test]
fn test_resolve_output_fields_merge_individually() {
    let mut user = UserConfig::default();
    user.output.format = Some(OutputFormat::Json);

    let config = resolve(&ConfigDefaults::builtin(), user);

    assert_eq!(config.output().format, OutputFormat::Json);
    assert!(!config.output().verbose);
    assert!(config.output().color);
}

#[test]
fn test_llm_present_only_when_user_supplied() {
    let config = resolve(&ConfigDefaults::builtin(), UserConfig::default());
    assert!(config.llm().is_none());
    assert!(!config.llm_enabled());

    let user = UserConfig {
        llm: Some(LlmConfig {
            enabled: true,
            provider: Some("anthropic".into()),
            model: None,
        }),
        ..UserConfig::default()
    };
    let config = resolve(&ConfigDefaults::builtin(), user);
    assert!(config.llm().is_some());
    assert!(config.llm_enabled());
}

#[test]
fn test_parse_rule_override_values() {
    assert_eq!(
        parse_rule_override("SEC-001=off"),
        Some(("SEC-001".to_string(), RuleSetting::Disabled))
    );
    assert_eq!(
        parse_rule_override("SEC-001=false"),
        Some(("SEC-001".to_string(), RuleSetting::Disabled))
    );
    assert_eq!(
        parse_rule_override("SEC-001=on"),
        Some(("SEC-001".to_string(), RuleSetting::EnabledDefault))
    );
    assert_eq!(
        parse_rule_override("SEC-001=TRUE"),
        Some(("SEC-001".to_string(), RuleSetting::EnabledDefault))
    );
    assert_eq!(
        parse_rule_override("SEC-001=Warning"),
        Some(("SEC-001".to_string(), RuleSetting::Enabled(Severity::Warning)))
    );
    assert_eq!(
        parse_rule_override("SEC-001=suggestion"),
        Some((
            "SEC-001".to_string(),
            RuleSetting::Enabled(Severity::Suggestion)
        ))
    );
}

#[test]
fn test_parse_rule_override_rejects_malformed_tokens() {
    assert_eq!(parse_rule_override("SEC-001=critical"), None);
    assert_eq!(parse_rule_override("SEC-001"), None);
    assert_eq!(parse_rule_override("=error"), None);
    assert_eq!(parse_rule_override("SEC-001="), None);
}

#[test]
fn test_invalid_override_leaves_default_in_effect() {
    let mut user = UserConfig::default();
    user.apply_rule_overrides(&["LLM-001=loud", "SEC-001=error"]);
    let config = resolve(&ConfigDefaults::builtin(), user);

    assert_eq!(config.rules().get("LLM-001"), Some(RuleSetting::EnabledDefault));
    assert_eq!(
        config.rules().get("SEC-001"),
        Some(RuleSetting::Enabled(Severity::Error))
    );
}

#[test]
fn test_invalid_override_leaves_prior_user_setting_in_effect() {
    let mut user = UserConfig::default();
    user.rules.set("LLM-001", RuleSetting::Disabled);
    user.apply_rule_overrides(&["LLM-001=maybe"]);
    assert_eq!(user.rules.get("LLM-001"), Some(RuleSetting::Disabled));
}

#[test]
fn test_later_override_wins() {
    let mut rules = RuleConfig::new();
    apply_rule_overrides(&mut rules, &["NAME-002=off", "NAME-002=error"]);
    assert_eq!(
        rules.get("NAME-002"),
        Some(RuleSetting::Enabled(Severity::Error))
    );
}

#[test]
fn test_rule_setting_serde_round_trip_values() {
    let rules: RuleConfig = serde_json::from_str(
        r#"{"SEC-001": false, "SEC-002": true, "SEC-003": "warning", "SEC-004": "off"}"#,
    )
    .unwrap();
    assert_eq!(rules.get("SEC-001"), Some(RuleSetting::Disabled));
    assert_eq!(rules.get("SEC-002"), Some(RuleSetting::EnabledDefault));
    assert_eq!(
        rules.get("SEC-003"),
        Some(RuleSetting::Enabled(Severity::Warning))
    );
    assert_eq!(rules.get("SEC-004"), Some(RuleSetting::Disabled));

    let json = serde_json::to_value(&rules).unwrap();
    assert_eq!(json["SEC-001"], false);
    assert_eq!(json["SEC-003"], "warning");
}

#[test]
fn test_rule_setting_rejects_unknown_string_in_files() {
    let result: Result<RuleConfig, _> = serde_json::from_str(r#"{"SEC-001": "loud"}"#);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("invalid rule setting"), "{}", err);
}

#[test]
fn test_builder_applies_settings() {
    let config = ValidatorConfig::builder()
        .disable_rule("LLM-001")
        .rule("SEC-001", RuleSetting::Enabled(Severity::Error))
        .rule_overrides(&["NAME-002=suggestion", "BP-001=bogus"])
        .format(OutputFormat::Sarif)
        .verbose(true)
        .color(false)
        .source(ConfigSource::Explicit(PathBuf::from("cfg.toml")))
        .build();

    assert!(!config.is_rule_enabled("LLM-001"));
    assert_eq!(
        config.rules().get("NAME-002"),
        Some(RuleSetting::Enabled(Severity::Suggestion))
    );
    assert_eq!(config.rules().get("BP-001"), Some(RuleSetting::EnabledDefault));
    assert_eq!(config.output().format, OutputFormat::Sarif);
    assert!(config.output().verbose);
    assert!(!config.output().color);
    assert_eq!(config.source().to_string(), "cfg.toml");
}

#[test]
fn test_builder_with_custom_defaults() {
    let config = ValidatorConfig::builder()
        .defaults(defaults_with(&[("SCH-001", RuleSetting::EnabledDefault)]))
        .build();
    assert_eq!(config.rules().len(), 1);
}

// ===== Loading and discovery =====

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "toolvet.toml",
        r#"
[rules]
"LLM-001" = false
"SEC-001" = "error"

[output]
format = "json"
verbose = true
"#,
    );

    let user = load_config_file(&path).unwrap();
    assert_eq!(user.rules.get("LLM-001"), Some(RuleSetting::Disabled));
    assert_eq!(
        user.rules.get("SEC-001"),
        Some(RuleSetting::Enabled(Severity::Error))
    );
    assert_eq!(user.output.format, Some(OutputFormat::Json));
    assert_eq!(user.output.verbose, Some(true));
    assert_eq!(user.output.color, None);
}

#[test]
fn test_load_yaml_and_json_configs() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = write_file(
        dir.path(),
        "cfg.yaml",
        "rules:\n  NAME-002: warning\nllm:\n  enabled: false\n",
    );
    let user = load_config_file(&yaml).unwrap();
    assert_eq!(
        user.rules.get("NAME-002"),
        Some(RuleSetting::Enabled(Severity::Warning))
    );
    assert!(user.llm.is_some());

    let json = write_file(dir.path(), "cfg.json", r#"{"output": {"color": false}}"#);
    let user = load_config_file(&json).unwrap();
    assert_eq!(user.output.color, Some(false));
    assert!(user.llm.is_none());
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = load_user_config(Some(&missing), dir.path()).unwrap_err();
    assert!(matches!(err, crate::diagnostics::ConfigError::NotFound { .. }));
}

#[test]
fn test_explicit_invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.toml", "[rules\n");
    let err = load_user_config(Some(&path), dir.path()).unwrap_err();
    assert!(matches!(err, crate::diagnostics::ConfigError::Toml { .. }));
}

#[test]
fn test_explicit_config_reports_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "custom.toml", "[rules]\n\"BP-002\" = false\n");
    let (user, source) = load_user_config(Some(&path), dir.path()).unwrap();
    assert_eq!(user.rules.get("BP-002"), Some(RuleSetting::Disabled));
    assert_eq!(source, ConfigSource::Explicit(path));
}

#[test]
fn test_implicit_discovery_walks_ancestors() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    let path = write_file(dir.path(), ".toolvet.toml", "[rules]\n\"BP-002\" = false\n");

    let (user, source) = load_user_config(None, &nested).unwrap();
    assert_eq!(user.rules.get("BP-002"), Some(RuleSetting::Disabled));
    assert_eq!(source, ConfigSource::Discovered(path));
}

#[test]
fn test_implicit_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), ".toolvet.toml", "this is = = not toml");

    let (user, source) = load_user_config(None, dir.path()).unwrap();
    assert_eq!(user, UserConfig::default());
    assert_eq!(source, ConfigSource::Default);
}

#[test]
fn test_discovery_prefers_first_candidate_name() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), ".toolvet.json", "{}");
    let toml = write_file(dir.path(), ".toolvet.toml", "");
    assert_eq!(discover_config(dir.path()), Some(toml));
}
