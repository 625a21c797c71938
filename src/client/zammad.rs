//! Zammad API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::pagination::collect_pages;
use super::{ListParams, Organization, PaginationParams, Ticket, User, ZammadApi};
use crate::error::{ApiError, Error, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Zammad REST API client
pub struct ZammadClient {
    http: HttpClient,
    base_url: String,
    api_token: String,
}

impl ZammadClient {
    /// Create a new client for the Zammad instance at `base_url`
    /// (e.g. `https://helpdesk.example.com`).
    pub fn new(base_url: &str, api_token: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", path, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            status if status.is_success() => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|body| !body.is_empty())
                    .unwrap_or_else(|| path.to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|body| !body.is_empty())
                    .unwrap_or_else(|| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl ZammadApi for ZammadClient {
    async fn list_tickets(&self, pagination: &PaginationParams) -> Result<Vec<Ticket>> {
        collect_pages(pagination, |page| {
            let query = pagination.to_query_params(page);
            async move {
                self.request::<Vec<Ticket>>("/api/v1/tickets/search", &query)
                    .await
            }
        })
        .await
    }

    async fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>> {
        let path = format!("/api/v1/tickets/{}", ticket_id);
        match self.request::<Ticket>(&path, &[]).await {
            Ok(ticket) => Ok(Some(ticket)),
            Err(Error::Api(ApiError::NotFound(_))) => {
                debug!("Ticket {} not found upstream", ticket_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_organizations(&self, params: &ListParams) -> Result<Vec<Organization>> {
        self.request("/api/v1/organizations", &params.to_query_params())
            .await
    }

    async fn list_users(&self, params: &ListParams) -> Result<Vec<User>> {
        self.request("/api/v1/users", &params.to_query_params())
            .await
    }
}
