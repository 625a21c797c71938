//! Ticket resources

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{MAX_LIMIT, check_range};
use crate::client::{MAX_PAGE_SIZE, PaginationParams, Ticket};
use crate::server::{AppState, HttpError};

/// Query string of `GET /tickets`
///
/// `limit`/`offset` take precedence over `per_page`/`page`. `offset` without
/// `limit` is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct TicketsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub per_page: Option<usize>,
    pub page: Option<usize>,
    pub fetch_all: Option<bool>,
}

impl TicketsQuery {
    pub fn to_pagination(&self) -> Result<PaginationParams, HttpError> {
        let mut params = PaginationParams::new().fetch_all(self.fetch_all.unwrap_or(false));

        if let Some(limit) = self.limit {
            check_range("limit", limit, 1, MAX_LIMIT)?;
            let offset = self.offset.unwrap_or(0);
            return Ok(params.page_size(limit).page(offset / limit + 1));
        }
        if self.offset.is_some() {
            return Err(HttpError::bad_request("offset requires limit"));
        }

        if let Some(per_page) = self.per_page {
            check_range("per_page", per_page, 1, MAX_PAGE_SIZE)?;
            params = params.page_size(per_page);
        }
        if let Some(page) = self.page {
            check_range("page", page, 1, usize::MAX)?;
            params = params.page(page);
        }

        Ok(params)
    }
}

/// `GET /tickets`
pub async fn list_tickets(
    State(state): State<AppState>,
    query: Result<Query<TicketsQuery>, QueryRejection>,
) -> Result<Json<Vec<Ticket>>, HttpError> {
    let Query(query) = query?;
    let params = query.to_pagination()?;

    let tickets = state
        .service
        .list_tickets(&params)
        .await
        .map_err(|e| HttpError::service("Error fetching tickets", e))?;

    Ok(Json(tickets))
}

/// `GET /tickets/{ticket_id}`
pub async fn get_ticket(
    State(state): State<AppState>,
    ticket_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ticket>, HttpError> {
    let Path(ticket_id) = ticket_id?;

    state
        .service
        .get_ticket(ticket_id)
        .await
        .map_err(|e| HttpError::service("Error fetching ticket", e))?
        .map(Json)
        .ok_or_else(|| HttpError::not_found("Ticket not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockZammadClient;
    use crate::client::fixtures::{TicketBuilder, tickets_with_ids};
    use crate::error::ApiError;
    use crate::server::test_support::{get_json, router, router_with_handle};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_limit_offset_translation() {
        let query = TicketsQuery {
            limit: Some(10),
            offset: Some(25),
            ..Default::default()
        };

        let params = query.to_pagination().unwrap();

        assert_eq!(params.page_size, Some(10));
        assert_eq!(params.page, Some(3));
        assert!(!params.fetch_all);
    }

    #[test]
    fn test_page_params_validated() {
        let too_big = TicketsQuery {
            per_page: Some(501),
            ..Default::default()
        };
        assert_eq!(
            too_big.to_pagination().unwrap_err().status,
            StatusCode::BAD_REQUEST
        );

        let zero_page = TicketsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(zero_page.to_pagination().is_err());
    }

    #[test]
    fn test_offset_without_limit_rejected() {
        let query = TicketsQuery {
            offset: Some(20),
            page: Some(2),
            ..Default::default()
        };

        let err = query.to_pagination().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.detail, "offset requires limit");
    }

    #[tokio::test]
    async fn test_list_tickets_default_single_page() {
        let mock = MockZammadClient::new()
            .with_tickets(tickets_with_ids(1..=3))
            .await;
        let (router, mock) = router_with_handle(mock);

        let (status, body) = get_json(router, "/api/v1/tickets").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].page, Some(1));
        assert_eq!(requests[0].page_size, Some(500));
    }

    #[tokio::test]
    async fn test_list_tickets_with_limit_and_offset() {
        let mock = MockZammadClient::new()
            .with_tickets(tickets_with_ids(1..=30))
            .await;
        let (router, mock) = router_with_handle(mock);

        let (status, body) = get_json(router, "/api/v1/tickets?limit=10&offset=10").await;

        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
        assert_eq!(mock.captured_requests().await[0].page, Some(2));
    }

    #[tokio::test]
    async fn test_list_tickets_fetch_all() {
        let mock = MockZammadClient::new()
            .with_tickets(tickets_with_ids(1..=25))
            .await;
        let (router, mock) = router_with_handle(mock);

        let (status, body) = get_json(router, "/api/v1/tickets?per_page=10&fetch_all=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 25);
        assert_eq!(mock.call_counts().await.ticket_pages, 3);
    }

    #[tokio::test]
    async fn test_list_tickets_rejects_bad_limits() {
        for uri in [
            "/api/v1/tickets?limit=0",
            "/api/v1/tickets?limit=101",
            "/api/v1/tickets?offset=-1",
            "/api/v1/tickets?limit=abc",
        ] {
            let (status, body) = get_json(router(MockZammadClient::new()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body["detail"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_tickets_upstream_failure() {
        let mock = MockZammadClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let (status, body) = get_json(router(mock), "/api/v1/tickets").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Error fetching tickets: ")
        );
    }

    #[tokio::test]
    async fn test_get_ticket_found() {
        let mock = MockZammadClient::new()
            .with_tickets(vec![TicketBuilder::new(42).state("open").build()])
            .await;

        let (status, body) = get_json(router(mock), "/api/v1/tickets/42").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 42);
        assert_eq!(body["state"], "open");
    }

    #[tokio::test]
    async fn test_get_ticket_missing_is_404() {
        let (status, body) = get_json(router(MockZammadClient::new()), "/api/v1/tickets/7").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Ticket not found"}));
    }

    #[tokio::test]
    async fn test_get_ticket_upstream_error_is_502() {
        let mock = MockZammadClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        let (status, body) = get_json(router(mock), "/api/v1/tickets/7").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["detail"], "Error fetching ticket: Server error: boom");
    }

    #[tokio::test]
    async fn test_get_ticket_non_numeric_id() {
        let (status, _) = get_json(router(MockZammadClient::new()), "/api/v1/tickets/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
