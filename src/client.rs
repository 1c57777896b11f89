use crate::error::{Result, TicketingError};
use crate::types::{CheckResultResponse, DrawResponse, HealthReport, TicketReceipt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// HTTP client for a running ticketing server.
#[derive(Debug, Clone)]
pub struct TicketingClient {
    http: reqwest::Client,
    base_url: String,
}

impl TicketingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn buy_ticket(&self, user_name: &str) -> Result<TicketReceipt> {
        let response = self
            .http
            .post(format!("{}/buy-ticket", self.base_url))
            .query(&[("user_name", user_name)])
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn draw(&self) -> Result<Vec<u32>> {
        let response = self
            .http
            .post(format!("{}/draw", self.base_url))
            .send()
            .await?;
        let draw: DrawResponse = read_json(response).await?;
        Ok(draw.winning_numbers)
    }

    /// A `{"error": ...}` payload comes back as `CheckResultResponse::Error`.
    pub async fn check_result(&self, ticket_id: i64) -> Result<CheckResultResponse> {
        let response = self
            .http
            .get(format!("{}/check-result/{}", self.base_url, ticket_id))
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(TicketingError::UnexpectedResponse(format!("{status}: {body}")));
    }
    Ok(response.json::<T>().await?)
}
