// AutoMod domain models - rules, config, word lists and scan verdicts.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer decides what to do with a verdict.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One orderable check inside the scanner.
///
/// `RuleKind::ALL` is the priority order: the first rule that reports a
/// violation wins and the rest are never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Discord invite links that are not on the invite safelist
    InviteLinks,
    /// Words from the profanity list, including leetspeak spellings
    Profanity,
    /// Reserved slot, no check implemented yet
    Impersonation,
    /// Reserved slot, no check implemented yet
    UnsafelistedUrls,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::InviteLinks,
        RuleKind::Profanity,
        RuleKind::Impersonation,
        RuleKind::UnsafelistedUrls,
    ];

    /// Key used for this rule in `AutoModConfig`.
    pub fn config_key(self) -> &'static str {
        match self {
            RuleKind::InviteLinks => "block_invite_links",
            RuleKind::Profanity => "block_profanity",
            RuleKind::Impersonation => "block_impersonation",
            RuleKind::UnsafelistedUrls => "block_unsafelisted_urls",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::InviteLinks => write!(f, "Invite Links"),
            RuleKind::Profanity => write!(f, "Profanity"),
            RuleKind::Impersonation => write!(f, "Impersonation"),
            RuleKind::UnsafelistedUrls => write!(f, "Unsafelisted URLs"),
        }
    }
}

/// Rule name -> enabled flag.
///
/// A rule whose key is absent is treated as disabled, so a partial config
/// turns rules off rather than failing the whole scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutoModConfig {
    rules: BTreeMap<String, bool>,
}

impl AutoModConfig {
    /// A config with no rules at all (everything disabled).
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        self.rules.get(rule.config_key()).copied().unwrap_or(false)
    }

    pub fn set(&mut self, rule: RuleKind, enabled: bool) {
        self.rules.insert(rule.config_key().to_string(), enabled);
    }

    /// Builder-style variant of `set`.
    pub fn with(mut self, rule: RuleKind, enabled: bool) -> Self {
        self.set(rule, enabled);
        self
    }
}

impl Default for AutoModConfig {
    fn default() -> Self {
        RuleKind::ALL
            .iter()
            .fold(Self::empty(), |config, rule| config.with(*rule, true))
    }
}

/// Values exempted from an otherwise blocking rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Safelist {
    entries: HashSet<String>,
}

impl Safelist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A dictionary word together with its word-boundary matcher.
#[derive(Debug, Clone)]
pub struct ProfanityEntry {
    pub word: String,
    pub(crate) boundary: Regex,
}

/// Lowercase, non-empty, deduplicated words in source order.
///
/// Matchers are compiled once here so a scan never compiles a regex.
#[derive(Debug, Clone, Default)]
pub struct ProfanityList {
    entries: Vec<ProfanityEntry>,
}

impl ProfanityList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for raw in words {
            let word = raw.as_ref().trim().to_lowercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }

            match Regex::new(&format!(r"\b{}\b", regex::escape(&word))) {
                Ok(boundary) => entries.push(ProfanityEntry { word, boundary }),
                Err(e) => {
                    tracing::warn!(word = %word, "Skipping profanity entry that failed to compile: {}", e);
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[ProfanityEntry] {
        &self.entries
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Verdict for a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub violated: bool,
    pub reason: Option<String>,
    /// Which rule produced the violation (if any)
    pub rule: Option<RuleKind>,
}

impl ScanResult {
    /// Create a "no violation" result
    pub fn clean() -> Self {
        Self {
            violated: false,
            reason: None,
            rule: None,
        }
    }

    /// Create a violation result
    pub fn violation(rule: RuleKind, reason: String) -> Self {
        Self {
            violated: true,
            reason: Some(reason),
            rule: Some(rule),
        }
    }
}

/// Which guilds the scanner runs in. Empty means every guild.
#[derive(Debug, Clone, Default)]
pub struct ScanScope {
    guild_ids: HashSet<u64>,
}

impl ScanScope {
    pub fn new(guild_ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            guild_ids: guild_ids.into_iter().collect(),
        }
    }

    pub fn covers(&self, guild_id: u64) -> bool {
        self.guild_ids.is_empty() || self.guild_ids.contains(&guild_id)
    }
}

/// On-disk AutoMod settings. Every field falls back to its default when
/// absent from the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoModSettings {
    pub rules: AutoModConfig,
    pub url_safelist: Vec<String>,
    pub invite_safelist: Vec<String>,
    pub custom_profanity: Vec<String>,
}

impl Default for AutoModSettings {
    fn default() -> Self {
        Self {
            rules: AutoModConfig::default(),
            url_safelist: vec!["audius.co".to_string(), "tenor.com".to_string()],
            invite_safelist: Vec::new(),
            custom_profanity: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enables_every_rule() {
        let config = AutoModConfig::default();
        for rule in RuleKind::ALL {
            assert!(config.is_enabled(rule), "{} should be enabled", rule);
        }
    }

    #[test]
    fn missing_rule_key_means_disabled() {
        let config: AutoModConfig =
            serde_json::from_str(r#"{ "block_invite_links": true }"#).unwrap();
        assert!(config.is_enabled(RuleKind::InviteLinks));
        assert!(!config.is_enabled(RuleKind::Profanity));
    }

    #[test]
    fn profanity_list_normalizes_entries() {
        let list = ProfanityList::new(["Bad", "  ", "bad", "worse", ""]);
        let words: Vec<&str> = list.words().collect();
        assert_eq!(words, vec!["bad", "worse"]);
    }

    #[test]
    fn empty_scope_covers_every_guild() {
        assert!(ScanScope::default().covers(42));
        let scope = ScanScope::new([1, 2]);
        assert!(scope.covers(2));
        assert!(!scope.covers(3));
    }

    #[test]
    fn safelist_matches_exact_entries_only() {
        let safelist = Safelist::new(["abc", "abc", "tenor.com"]);
        assert_eq!(safelist.len(), 2);
        assert!(safelist.contains("abc"));
        assert!(!safelist.contains("ABC"));
        assert!(!safelist.contains("ab"));
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: AutoModSettings =
            serde_json::from_str(r#"{ "invite_safelist": ["abc"] }"#).unwrap();
        assert_eq!(settings.invite_safelist, vec!["abc".to_string()]);
        assert_eq!(settings.url_safelist.len(), 2);
        assert!(settings.rules.is_enabled(RuleKind::Profanity));
    }
}
