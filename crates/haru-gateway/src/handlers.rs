//! Request handlers for the errand API.

use serde::Serialize;
use tracing::{debug, warn};

use haru_core::{Errand, ProfileStore};
use haru_dispatch::{Clock, CreateErrandRequest, Environment, ErrandStore, IntakeService, Session};
use haru_feed::{ApplicationCounter, ErrandDirectory, FeedPage, FeedQuery, FeedService};

use crate::error::ApiError;

/// Status for successful reads.
pub const STATUS_OK: u16 = 200;

/// Status for successful creations.
pub const STATUS_CREATED: u16 = 201;

/// A successful API call: status code plus the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: T,
}

/// Handle `POST /errands`.
///
/// # Errors
///
/// 401 without a session, 400 on the first validation failure, 500 on
/// profile or persistence failure (redacted per the configured environment).
pub async fn handle_create_errand<P, E, C>(
    service: &IntakeService<P, E, C>,
    session: Option<&Session>,
    request: &CreateErrandRequest,
) -> Result<ApiResponse<Errand>, ApiError>
where
    P: ProfileStore,
    E: ErrandStore,
    C: Clock,
{
    let environment = service.config().environment;
    match service.create_errand(session, request).await {
        Ok(errand) => {
            debug!(errand_id = %errand.id, "create handled");
            Ok(ApiResponse {
                status: STATUS_CREATED,
                body: errand,
            })
        }
        Err(e) => {
            let api = ApiError::from_intake(&e, environment);
            warn!(status = api.status, error = %e, "create rejected");
            Err(api)
        }
    }
}

/// Handle `GET /errands`.
///
/// # Errors
///
/// 401 for `mode=my` without a session, 500 on store failure (redacted per
/// the supplied environment).
pub async fn handle_list_errands<D, P, A>(
    service: &FeedService<D, P, A>,
    viewer_user_id: Option<&str>,
    query: &FeedQuery,
    environment: Environment,
) -> Result<ApiResponse<FeedPage>, ApiError>
where
    D: ErrandDirectory,
    P: ProfileStore,
    A: ApplicationCounter,
{
    match service.list_errands(viewer_user_id, query).await {
        Ok(page) => {
            debug!(count = page.errands.len(), total = page.total, "list handled");
            Ok(ApiResponse {
                status: STATUS_OK,
                body: page,
            })
        }
        Err(e) => {
            let api = ApiError::from_feed(&e, environment);
            warn!(status = api.status, error = %e, "list rejected");
            Err(api)
        }
    }
}
