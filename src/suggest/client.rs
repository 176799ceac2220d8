use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::{GenerateRequest, GenerateResponse, SuggestionRequest, SuggestionResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("server rejected request: {0}")]
    Rejected(String),
}

/// Anything that can turn a context key and the last two words into a
/// ranked word list.
pub trait SuggestionService: Send + Sync {
    fn fetch_suggestions(
        &self,
        context_key: &str,
        last_words: &[String; 2],
    ) -> Result<SuggestionResponse, ClientError>;
}

/// JSON-over-HTTP client for the suggestion and generation endpoints.
pub struct HttpSuggestionClient {
    base_url: String,
    http: Client,
}

impl HttpSuggestionClient {
    /// `timeout` of `None` waits on the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, kind: &str, context_key: &str) -> String {
        format!(
            "{}/api/{}/{}.json",
            self.base_url,
            kind,
            urlencoding::encode(&context_key.to_lowercase())
        )
    }

    fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<String, ClientError> {
        let response = self.http.post(url).json(body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }

    /// Asks the server for `num` words (or characters) of generated text.
    pub fn generate(&self, context_key: &str, words: bool, num: u32) -> Result<String, ClientError> {
        let url = self.endpoint("generate", context_key);
        debug!(%url, words, num, "requesting generated text");

        let body = self.post(&url, &GenerateRequest { words, num })?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        if parsed.success {
            Ok(parsed.text)
        } else {
            Err(ClientError::Rejected(
                parsed.error.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }
}

impl SuggestionService for HttpSuggestionClient {
    fn fetch_suggestions(
        &self,
        context_key: &str,
        last_words: &[String; 2],
    ) -> Result<SuggestionResponse, ClientError> {
        let url = self.endpoint("suggest", context_key);
        let request = SuggestionRequest {
            key: [last_words[0].to_lowercase(), last_words[1].to_lowercase()],
        };
        debug!(%url, key = ?request.key, "requesting suggestions");

        let body = self.post(&url, &request)?;
        Ok(serde_json::from_str(&body)?)
    }
}
