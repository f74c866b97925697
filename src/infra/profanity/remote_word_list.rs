use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::core::automod::{ProfanityError, ProfanitySource};

/// Maintained community word list, a JSON array of strings.
pub const DEFAULT_PROFANITY_LIST_URL: &str =
    "https://raw.githubusercontent.com/zautumnz/profane-words/refs/heads/master/words.json";

/// Fetches the profanity dictionary over HTTP.
pub struct RemoteWordList {
    client: Client,
    url: String,
}

impl RemoteWordList {
    pub fn new(url: impl Into<String>) -> Result<Self, ProfanityError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("AutoModBot/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProfanityError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

/// Parse a response body into words. Anything but an array of strings is rejected.
pub fn parse_word_list(body: &str) -> Result<Vec<String>, ProfanityError> {
    serde_json::from_str::<Vec<String>>(body).map_err(|e| ProfanityError::Malformed(e.to_string()))
}

#[async_trait]
impl ProfanitySource for RemoteWordList {
    async fn fetch_words(&self) -> Result<Vec<String>, ProfanityError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProfanityError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProfanityError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProfanityError::Request(e.to_string()))?;

        parse_word_list(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
