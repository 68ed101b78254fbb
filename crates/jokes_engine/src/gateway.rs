use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::ACCEPT;
use url::Url;

use crate::payload::{decode_categories, decode_jokes, error_message};
use crate::{GatewayError, Joke};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "https://v2.jokeapi.dev/".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// The three operations of the remote content API.
#[async_trait::async_trait]
pub trait JokeGateway: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<String>, GatewayError>;

    async fn fetch_single_joke(&self, category: &str) -> Result<Joke, GatewayError>;

    async fn fetch_jokes(&self, category: &str, amount: usize) -> Result<Vec<Joke>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| {
            GatewayError::ClientFault(format!("invalid base url {}: {err}", settings.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::ClientFault(format!(
                "base url {} cannot carry a path",
                settings.base_url
            )));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::ClientFault(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn jokes_url(&self, category: &str, amount: usize) -> Url {
        let mut url = self.endpoint(&["joke", category]);
        url.query_pairs_mut()
            .append_pair("type", "single")
            .append_pair("amount", &amount.to_string());
        url
    }

    async fn get(&self, url: Url) -> Result<String, GatewayError> {
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        match status {
            200 | 201 => Ok(response.text().await?),
            100..=399 => Err(GatewayError::UnexpectedStatus(status)),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::Server {
                    status,
                    message: error_message(&body),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl JokeGateway for ReqwestGateway {
    async fn list_categories(&self) -> Result<Vec<String>, GatewayError> {
        let body = self.get(self.endpoint(&["categories"])).await?;
        decode_categories(&body)
    }

    async fn fetch_single_joke(&self, category: &str) -> Result<Joke, GatewayError> {
        let body = self.get(self.jokes_url(category, 1)).await?;
        decode_jokes(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::ClientFault("payload carries no jokes".into()))
    }

    async fn fetch_jokes(&self, category: &str, amount: usize) -> Result<Vec<Joke>, GatewayError> {
        let body = self.get(self.jokes_url(category, amount)).await?;
        decode_jokes(&body)
    }
}
