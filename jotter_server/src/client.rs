use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::models::client::{
    DegradedReason, InferenceConfig, InferenceRequest, SummaryOutcome, extract_summary,
};

/// Client for the text generation inference API used to summarize notes.
#[derive(Clone)]
pub struct SummaryClient {
    url: String,
    client: reqwest::Client,
}

impl SummaryClient {
    pub fn new(config: InferenceConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut header_map = HeaderMap::new();
        if let Some(api_key) = config.api_key.filter(|api_key| !api_key.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
            value.set_sensitive(true);
            header_map.insert(AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder()
            .default_headers(header_map)
            .build()?;
        let base_url = config.base_url.trim_end_matches("/");
        let url = format!("{base_url}/{}", config.model);
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Summarize a note's text. This never fails; when the API can't produce
    /// a summary a placeholder is returned instead, tagged with the reason.
    pub async fn summarize(&self, text: &str) -> SummaryOutcome {
        match self.post(InferenceRequest::summarize(text)).await {
            Ok(value) => match extract_summary(&value) {
                Some(summary) => SummaryOutcome::Generated(summary),
                None => {
                    tracing::error!(response = %value, "unexpected inference response");
                    SummaryOutcome::degraded(DegradedReason::UnexpectedResponse, text)
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "inference request failed");
                SummaryOutcome::degraded(DegradedReason::RequestFailed, text)
            }
        }
    }

    // The status code isn't checked. Error bodies from the API are JSON
    // objects and fall through to the unexpected shape branch.
    async fn post(&self, request: InferenceRequest) -> Result<Value, reqwest::Error> {
        self.client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json::<Value>()
            .await
    }
}
