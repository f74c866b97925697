// Profanity word list loading.
//
// The list is fetched once at startup. If the source is unreachable the bot
// still starts: the list is built from the custom entries alone and a warning
// is logged, so moderation degrades instead of blocking startup.

use super::automod_models::ProfanityList;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfanityError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Source returned status {0}")]
    Status(u16),

    #[error("Malformed word list: {0}")]
    Malformed(String),
}

/// Where the profanity dictionary comes from.
#[async_trait]
pub trait ProfanitySource: Send + Sync {
    /// Fetch the raw word list. Entries need not be lowercased or unique.
    async fn fetch_words(&self) -> Result<Vec<String>, ProfanityError>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Build the profanity list from custom entries plus the remote source.
///
/// Custom entries come first so they keep their position in match reasons.
pub async fn load_profanity_list<P: ProfanitySource + ?Sized>(
    source: &P,
    custom: &[String],
) -> ProfanityList {
    let fetched = match source.fetch_words().await {
        Ok(words) => {
            tracing::info!(
                source = %source.describe(),
                count = words.len(),
                "Fetched profanity word list"
            );
            words
        }
        Err(e) => {
            tracing::warn!(
                source = %source.describe(),
                custom_entries = custom.len(),
                "Failed to fetch profanity word list, continuing with custom entries only: {}",
                e
            );
            Vec::new()
        }
    };

    ProfanityList::new(custom.iter().chain(fetched.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Vec<&'static str>);

    #[async_trait]
    impl ProfanitySource for StaticSource {
        async fn fetch_words(&self) -> Result<Vec<String>, ProfanityError> {
            Ok(self.0.iter().map(|w| w.to_string()).collect())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct DownSource;

    #[async_trait]
    impl ProfanitySource for DownSource {
        async fn fetch_words(&self) -> Result<Vec<String>, ProfanityError> {
            Err(ProfanityError::Status(503))
        }

        fn describe(&self) -> String {
            "down".to_string()
        }
    }

    #[tokio::test]
    async fn test_custom_entries_come_first() {
        let source = StaticSource(vec!["Remote", "custom"]);
        let custom = vec!["custom".to_string()];

        let list = load_profanity_list(&source, &custom).await;
        let words: Vec<&str> = list.words().collect();

        assert_eq!(words, vec!["custom", "remote"]);
    }

    #[tokio::test]
    async fn test_unreachable_source_keeps_custom_entries() {
        let custom = vec!["local".to_string()];

        let list = load_profanity_list(&DownSource, &custom).await;
        let words: Vec<&str> = list.words().collect();

        assert_eq!(words, vec!["local"]);
    }

    #[tokio::test]
    async fn test_unreachable_source_without_custom_is_empty() {
        let list = load_profanity_list(&DownSource, &[]).await;
        assert!(list.is_empty());
    }
}
