use std::str::FromStr;

use thiserror::Error;

use crate::mx::MxResult;

/// Associates a hostname suffix with a provider label.
///
/// Patterns match on label boundaries, case-insensitively. A leading `.`
/// restricts the match to strict subdomains (`.mail.protection.outlook.com`);
/// without it the pattern also matches the host itself (`smtp.google.com`).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRule {
    pattern: String,
    label: String,
}

impl ProviderRule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into().trim().to_ascii_lowercase(),
            label: label.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        if self.pattern.starts_with('.') {
            return host.len() > self.pattern.len() && host.ends_with(&self.pattern);
        }
        match host.strip_suffix(self.pattern.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("provider rule '{0}' must look like pattern=label")]
    MissingSeparator(String),
    #[error("provider rule '{0}' has an empty pattern")]
    EmptyPattern(String),
    #[error("provider rule '{0}' has an empty label")]
    EmptyLabel(String),
}

impl FromStr for ProviderRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pattern, label) = s
            .split_once('=')
            .ok_or_else(|| RuleParseError::MissingSeparator(s.to_string()))?;
        let pattern = pattern.trim();
        let label = label.trim();
        if pattern.trim_start_matches('.').is_empty() {
            return Err(RuleParseError::EmptyPattern(s.to_string()));
        }
        if label.is_empty() {
            return Err(RuleParseError::EmptyLabel(s.to_string()));
        }
        Ok(Self::new(pattern, label))
    }
}

/// Ordered provider table; first match wins.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRules {
    rules: Vec<ProviderRule>,
}

impl Default for ProviderRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ProviderRule::new(".mail.protection.outlook.com", "office365"),
                ProviderRule::new("smtp.google.com", "gsuite"),
                ProviderRule::new("messagingengine.com", "fastmail"),
            ],
        }
    }
}

impl ProviderRules {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: ProviderRule) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: ProviderRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ProviderRule] {
        &self.rules
    }

    /// Label of the first rule matching `host`, if any.
    pub fn provider_for(&self, host: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(host))
            .map(ProviderRule::label)
    }

    /// Provider label for a resolution outcome; `""` for empty, failed or
    /// unknown exchanges.
    pub fn classify(&self, result: &MxResult) -> &str {
        result
            .host()
            .and_then(|host| self.provider_for(host))
            .unwrap_or("")
    }
}

impl Extend<ProviderRule> for ProviderRules {
    fn extend<I: IntoIterator<Item = ProviderRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}
