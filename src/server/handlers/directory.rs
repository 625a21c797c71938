//! Organization and user resources

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::{MAX_LIMIT, check_range};
use crate::client::{ListParams, Organization, User};
use crate::server::{AppState, HttpError};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ListQuery {
    fn to_params(&self) -> Result<ListParams, HttpError> {
        if let Some(limit) = self.limit {
            check_range("limit", limit, 1, MAX_LIMIT)?;
        }
        Ok(ListParams::new(self.limit, self.offset))
    }
}

/// `GET /organizations`
pub async fn list_organizations(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Organization>>, HttpError> {
    let Query(query) = query?;

    let organizations = state
        .service
        .list_organizations(&query.to_params()?)
        .await
        .map_err(|e| HttpError::service("Error fetching organizations", e))?;

    Ok(Json(organizations))
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, HttpError> {
    let Query(query) = query?;

    let users = state
        .service
        .list_users(&query.to_params()?)
        .await
        .map_err(|e| HttpError::service("Error fetching users", e))?;

    Ok(Json(users))
}
