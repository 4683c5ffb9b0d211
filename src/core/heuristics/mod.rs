mod builtin;

use builtin::{BUILTIN_RULES, BuiltinRule, FALLBACK_RULE};
use serde::{Deserialize, Serialize};

/// A keyword-triggered reply template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicRule {
    pub id: String,
    pub keywords: Vec<String>,
    pub narrative: String,
    pub steps: Vec<String>,
}

impl HeuristicRule {
    pub fn new<K, S>(
        id: impl Into<String>,
        keywords: impl IntoIterator<Item = K>,
        narrative: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            narrative: narrative.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
        .normalized()
    }

    /// Lowercase and trim keywords, dropping blanks. Input is lowercased
    /// before matching, so keywords must be too.
    pub fn normalized(mut self) -> Self {
        self.keywords = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// `normalized_input` must already be lowercase.
    pub fn matches(&self, normalized_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_input.contains(keyword.as_str()))
    }
}

fn from_builtin(rule: &BuiltinRule) -> HeuristicRule {
    HeuristicRule::new(
        rule.id,
        rule.keywords.iter().copied(),
        rule.narrative,
        rule.steps.iter().copied(),
    )
}

/// Ordered rule list with a fallback. Scanned linearly; first match wins.
#[derive(Debug, Clone)]
pub struct HeuristicTable {
    rules: Vec<HeuristicRule>,
    fallback: HeuristicRule,
}

impl Default for HeuristicTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HeuristicTable {
    pub fn new(rules: Vec<HeuristicRule>, fallback: HeuristicRule) -> Self {
        Self {
            rules: rules.into_iter().map(HeuristicRule::normalized).collect(),
            fallback,
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_RULES.iter().map(from_builtin).collect(),
            from_builtin(&FALLBACK_RULE),
        )
    }

    /// Custom rules take precedence over the stock ones; with
    /// `include_builtin = false` only the custom rules (plus the fallback)
    /// remain.
    pub fn with_custom_rules(custom: &[HeuristicRule], include_builtin: bool) -> Self {
        let mut rules: Vec<HeuristicRule> = custom.to_vec();
        if include_builtin {
            rules.extend(BUILTIN_RULES.iter().map(from_builtin));
        }
        Self::new(rules, from_builtin(&FALLBACK_RULE))
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &HeuristicRule {
        &self.fallback
    }

    /// Pick the rule for a piece of free text. Never fails: input that hits
    /// no keyword gets the fallback.
    pub fn match_rule(&self, input: &str) -> &HeuristicRule {
        let normalized = input.to_lowercase();
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .unwrap_or(&self.fallback);
        tracing::debug!(rule = %rule.id, "heuristic rule matched");
        rule
    }
}
