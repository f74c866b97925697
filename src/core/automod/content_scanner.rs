// Content scanner - core business logic for AutoMod.
//
// This service handles:
// - Invite links to other servers (with a safelist)
// - Profanity, including common leetspeak spellings
// - Reserved slots for impersonation and URL safelisting
//
// NO Discord dependencies here - just text in, verdict out.

use super::automod_models::{
    AutoModConfig, AutoModSettings, ProfanityList, RuleKind, Safelist, ScanResult,
};
use super::normalization::normalized_tokens;
use regex::Regex;
use std::sync::LazyLock;

/// `discord.gg/<code>`, `discord.com/invite/<code>` and
/// `discordapp.com/invite/<code>`, with or without scheme and `www.`.
/// The host must start on a word boundary, so `notdiscord.gg` is not an invite.
static INVITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?\b(?:discord\.gg|discord(?:app)?\.com/invite)/([a-z0-9-]+)",
    )
    .expect("invite pattern is a valid regex")
});

/// Scans message text against the configured rules.
///
/// Holds only immutable state, so one instance can be shared across tasks
/// behind an `Arc` and scanned concurrently without locking.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    config: AutoModConfig,
    url_safelist: Safelist,
    invite_safelist: Safelist,
    /// `None` when no list could be loaded; the profanity rule is then skipped
    profanity: Option<ProfanityList>,
}

impl ContentScanner {
    pub fn new(
        config: AutoModConfig,
        url_safelist: Safelist,
        invite_safelist: Safelist,
        profanity: Option<ProfanityList>,
    ) -> Self {
        Self {
            config,
            url_safelist,
            invite_safelist,
            profanity,
        }
    }

    /// Build a scanner from loaded settings and an already fetched word list.
    pub fn from_settings(settings: AutoModSettings, profanity: Option<ProfanityList>) -> Self {
        Self::new(
            settings.rules,
            Safelist::new(settings.url_safelist),
            Safelist::new(settings.invite_safelist),
            profanity,
        )
    }

    pub fn config(&self) -> &AutoModConfig {
        &self.config
    }

    pub fn url_safelist(&self) -> &Safelist {
        &self.url_safelist
    }

    pub fn invite_safelist(&self) -> &Safelist {
        &self.invite_safelist
    }

    pub fn profanity_len(&self) -> usize {
        self.profanity.as_ref().map_or(0, ProfanityList::len)
    }

    /// Scan a message.
    ///
    /// Rules run in `RuleKind::ALL` order and the first violation is returned.
    /// Never fails, whatever the input.
    pub fn scan(&self, text: &str) -> ScanResult {
        for rule in RuleKind::ALL {
            if !self.config.is_enabled(rule) {
                continue;
            }

            if let Some(reason) = self.check(rule, text) {
                return ScanResult::violation(rule, reason);
            }
        }

        ScanResult::clean()
    }

    fn check(&self, rule: RuleKind, text: &str) -> Option<String> {
        match rule {
            RuleKind::InviteLinks => self.check_invite_links(text),
            RuleKind::Profanity => self.check_profanity(text),
            // No check yet: these slots exist only so the config can name them.
            RuleKind::Impersonation | RuleKind::UnsafelistedUrls => None,
        }
    }

    fn check_invite_links(&self, text: &str) -> Option<String> {
        let blocked: Vec<&str> = INVITE_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let link = caps.get(0)?.as_str();
                let code = caps.get(1).map_or("", |m| m.as_str());
                if self.invite_safelist.contains(code) || self.invite_safelist.contains(link) {
                    None
                } else {
                    Some(link)
                }
            })
            .collect();

        if blocked.is_empty() {
            None
        } else {
            Some(format!(
                "Unsafelisted invite link(s): {}",
                blocked.join(", ")
            ))
        }
    }

    fn check_profanity(&self, text: &str) -> Option<String> {
        let list = self.profanity.as_ref()?;
        let lowered = text.to_lowercase();

        let matched = matched_words(list, &lowered);
        if matched.is_empty() {
            None
        } else {
            Some(format!("Profanity: {}", matched.join(", ")))
        }
    }
}

/// Words from the list found in `lowered`, in list order.
///
/// A word counts if it appears on word boundaries in the text, or as a
/// substring of any leetspeak-normalized token.
fn matched_words<'a>(list: &'a ProfanityList, lowered: &str) -> Vec<&'a str> {
    let mut tokens: Option<Vec<String>> = None;

    list.entries()
        .iter()
        .filter(|entry| {
            if entry.boundary.is_match(lowered) {
                return true;
            }
            tokens
                .get_or_insert_with(|| normalized_tokens(lowered))
                .iter()
                .any(|token| token.contains(entry.word.as_str()))
        })
        .map(|entry| entry.word.as_str())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(words: &[&str]) -> ContentScanner {
        ContentScanner::new(
            AutoModConfig::default(),
            Safelist::default(),
            Safelist::default(),
            Some(ProfanityList::new(words.iter().copied())),
        )
    }

    #[test]
    fn test_clean_message_passes() {
        let result = scanner(&["bad"]).scan("Hello world!");
        assert_eq!(result, ScanResult::clean());
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_empty_and_huge_input() {
        let s = scanner(&["bad"]);
        assert!(!s.scan("").violated);

        let long = "lorem ipsum ".repeat(50_000);
        assert!(!s.scan(&long).violated);
    }

    #[test]
    fn test_unicode_input() {
        let s = scanner(&["bad", "ünter"]);
        let reason = |text: &str| s.scan(text).reason;

        assert_eq!(reason("İstanbul BAD").as_deref(), Some("Profanity: bad"));
        assert_eq!(reason("🙂b4d🙂").as_deref(), Some("Profanity: bad"));
        assert_eq!(reason("ÜNTER").as_deref(), Some("Profanity: ünter"));

        // fullwidth letters are not folded to ASCII
        assert_eq!(reason("ｂａｄ"), None);
        assert_eq!(reason("\0\u{FFFF}"), None);
        assert_eq!(reason(&"ß".repeat(10_000)), None);
    }

    #[test]
    fn test_invite_link_detected() {
        let result = scanner(&[]).scan("join us at discord.gg/abc123 now");
        assert!(result.violated);
        assert_eq!(result.rule, Some(RuleKind::InviteLinks));
        assert!(result.reason.unwrap().contains("discord.gg/abc123"));
    }

    #[test]
    fn test_invite_link_shapes() {
        let s = scanner(&[]);
        for text in [
            "https://discord.gg/xyz",
            "http://www.discord.com/invite/xyz",
            "discordapp.com/invite/xyz",
            "DISCORD.GG/XyZ",
        ] {
            assert!(s.scan(text).violated, "{} should be flagged", text);
        }
        assert!(!s.scan("discord.com/channels/1/2").violated);
    }

    #[test]
    fn test_lookalike_invite_host_ignored() {
        let s = scanner(&[]);
        assert!(!s.scan("notdiscord.gg/abc").violated);
        assert!(!s.scan("mydiscordapp.com/invite/abc").violated);

        let result = s.scan("see (discord.gg/abc)");
        assert_eq!(
            result.reason.as_deref(),
            Some("Unsafelisted invite link(s): discord.gg/abc")
        );
    }

    #[test]
    fn test_invite_reason_keeps_order_and_duplicates() {
        let result = scanner(&[]).scan("discord.gg/b then https://discord.gg/a and discord.gg/b");
        assert_eq!(
            result.reason.as_deref(),
            Some("Unsafelisted invite link(s): discord.gg/b, https://discord.gg/a, discord.gg/b")
        );
    }

    #[test]
    fn test_safelisted_invite_ignored() {
        let s = ContentScanner::new(
            AutoModConfig::default(),
            Safelist::default(),
            Safelist::new(["abc"]),
            None,
        );
        assert!(!s.scan("discord.gg/abc").violated);

        let result = s.scan("discord.gg/abc and discord.gg/nope");
        assert_eq!(
            result.reason.as_deref(),
            Some("Unsafelisted invite link(s): discord.gg/nope")
        );
    }

    #[test]
    fn test_exact_profanity_on_word_boundary() {
        let s = scanner(&["bad"]);
        let result = s.scan("That is BAD.");
        assert_eq!(result.rule, Some(RuleKind::Profanity));
        assert_eq!(result.reason.as_deref(), Some("Profanity: bad"));
    }

    #[test]
    fn test_leetspeak_is_caught() {
        let result = scanner(&["bad"]).scan("so b4d");
        assert!(result.violated);
        assert!(result.reason.unwrap().contains("bad"));
    }

    #[test]
    fn test_repeated_letters_collapse() {
        assert!(scanner(&["bad"]).scan("baaad").violated);
    }

    #[test]
    fn test_normalized_substring_match() {
        // not on a word boundary, but the normalized token contains the word
        assert!(scanner(&["bad"]).scan("sob4dly").violated);
    }

    #[test]
    fn test_profanity_matches_are_deduplicated_in_list_order() {
        let s = scanner(&["worse", "bad", "ugly"]);
        let result = s.scan("bad b4d w0rse bad");
        assert_eq!(result.reason.as_deref(), Some("Profanity: worse, bad"));
    }

    #[test]
    fn test_invite_wins_over_profanity() {
        let result = scanner(&["bad"]).scan("bad server: discord.gg/spam");
        assert_eq!(result.rule, Some(RuleKind::InviteLinks));
        assert!(!result.reason.unwrap().contains("Profanity"));
    }

    #[test]
    fn test_disabled_profanity_rule() {
        let config = AutoModConfig::default().with(RuleKind::Profanity, false);
        let s = ContentScanner::new(
            config,
            Safelist::default(),
            Safelist::default(),
            Some(ProfanityList::new(["bad"])),
        );

        assert!(!s.scan("bad").violated);
        assert!(s.scan("discord.gg/abc").violated);
    }

    #[test]
    fn test_missing_profanity_list_fails_open() {
        let s = ContentScanner::new(
            AutoModConfig::default(),
            Safelist::default(),
            Safelist::default(),
            None,
        );
        assert!(!s.scan("bad words everywhere").violated);
        assert!(s.scan("discord.gg/abc").violated);
    }

    #[test]
    fn test_stub_rules_never_fire() {
        let config = AutoModConfig::empty()
            .with(RuleKind::Impersonation, true)
            .with(RuleKind::UnsafelistedUrls, true);
        let s = ContentScanner::new(
            config,
            Safelist::new(["audius.co"]),
            Safelist::default(),
            Some(ProfanityList::new(["bad"])),
        );
        assert!(!s.scan("bad https://example.com discord.gg/abc").violated);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let s = scanner(&["bad"]);
        let text = "b4d stuff at discord.gg/abc";
        assert_eq!(s.scan(text), s.scan(text));
    }
}
