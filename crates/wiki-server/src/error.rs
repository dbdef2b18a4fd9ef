//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wiki_page::PageError;
use wiki_render::RenderError;

/// Server error type.
///
/// Every variant is scoped to the request that raised it.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Path is not `/` or `/<op>/<title>` with a valid title.
    #[error("404 page not found")]
    NotFound,

    /// Page store failed for a reason other than a missing page.
    #[error(transparent)]
    Page(#[from] PageError),

    /// Template failed to render.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Request body is not a decodable form.
    #[error("Invalid form: {0}")]
    BadForm(String),

    /// Request body has a content type other than a form.
    #[error("Unsupported form content type: {0}")]
    UnsupportedForm(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Page(e) => {
                tracing::warn!(error = %e, "Page store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Render(e) => {
                tracing::warn!(error = %e, "Render failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadForm(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedForm(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        };

        (status, self.to_string()).into_response()
    }
}
