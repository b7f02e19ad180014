//! Request error type and its JSON rendering.
//!
//! Handlers return [`Result<T>`]; an [`AppError`] maps to a status code, is
//! reported to Sentry when it is a server error, and leaves the service as
//! `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Everything a catalog request can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// The Storefront API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Local failure such as a poisoned lock.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    ///
    /// An unknown collection is a 404 whichever layer noticed it; any other
    /// upstream failure is the gateway's fault.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(ShopifyError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to clients. Upstream and internal details stay in logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Shopify(ShopifyError::NotFound(what)) | Self::NotFound(what) => {
                format!("Not found: {what}")
            }
            Self::Shopify(_) => "External service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                status = status.as_u16(),
                sentry_event_id = %event_id,
                "Request failed"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a catalog step for Sentry reports raised later in the request.
///
/// ```rust,ignore
/// add_breadcrumb("catalog", "Viewed collection", &[("handle", "alla-lager")]);
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    breadcrumb.data.extend(
        data.iter()
            .map(|(k, v)| ((*k).to_string(), serde_json::Value::from(*v))),
    );

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let json = serde_json::from_slice(&bytes).expect("JSON body");
        (status, json)
    }

    #[test]
    fn test_status_per_variant() {
        assert_eq!(
            AppError::NotFound("alla-lager".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("lock".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ShopifyError::RateLimited(2)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(ShopifyError::NotFound("saknas".to_string())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_upstream_details_hidden() {
        let (status, body) = body_of(AppError::from(ShopifyError::RateLimited(30))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, serde_json::json!({ "error": "External service error" }));
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let (_, body) = body_of(AppError::Internal("poisoned filter cache".to_string())).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_unknown_collection_body() {
        let (status, body) = body_of(AppError::from(ShopifyError::NotFound(
            "Collection not found: saknas".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found: Collection not found: saknas");
    }
}
