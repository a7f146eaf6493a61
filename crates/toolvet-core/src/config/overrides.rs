use super::*;

/// Parse one `RULE-ID=value` token.
///
/// Returns `None` when the token has no `=`, an empty id, or a value that is
/// not one of `off|false|on|true|error|warning|suggestion` (case-insensitive).
pub fn parse_rule_override(token: &str) -> Option<(String, RuleSetting)> {
    let (id, value) = token.split_once('=')?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    let setting = RuleSetting::parse(value)?;
    Some((id.to_string(), setting))
}

/// Apply override tokens in order on top of `rules`.
///
/// Tokens that do not parse are dropped without a diagnostic, so an invalid
/// value leaves the prior setting for that rule in effect.
pub fn apply_rule_overrides<S: AsRef<str>>(rules: &mut RuleConfig, tokens: &[S]) {
    for token in tokens {
        if let Some((id, setting)) = parse_rule_override(token.as_ref()) {
            rules.set(id, setting);
        }
    }
}

impl UserConfig {
    /// Apply CLI `RULE-ID=value` overrides to the user rule table.
    pub fn apply_rule_overrides<S: AsRef<str>>(&mut self, tokens: &[S]) {
        apply_rule_overrides(&mut self.rules, tokens);
    }
}
