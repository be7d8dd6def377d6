use jotter::{NewNoteRequest, Note, SummaryResponse};

/// Thin wrapper over the server's HTTP API. Non-success statuses are
/// turned into errors.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches("/").to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, reqwest::Error> {
        self.client
            .get(format!("{}/notes", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn add_note(&self, text: String) -> Result<Note, reqwest::Error> {
        let body = NewNoteRequest::builder().text(text).build();
        self.client
            .post(format!("{}/notes", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn summarize(&self, id: i32) -> Result<String, reqwest::Error> {
        let response: SummaryResponse = self
            .client
            .post(format!("{}/summarize/{id}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.summary)
    }
}
