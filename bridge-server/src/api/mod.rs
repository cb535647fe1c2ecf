//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`lists`] - list CRUD under /mailchimp/lists
//! - [`members`] - member CRUD under /mailchimp/lists/{list_id}/members

pub mod health;
pub mod lists;
pub mod members;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use shared::AppError;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/mailchimp/lists", lists::routes().merge(members::routes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON body extractor whose rejections surface as the unified error body
///
/// Malformed JSON, wrong field types and unknown fields all come back as a
/// 400 `ValidationFailed` instead of axum's plain-text rejection.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}
