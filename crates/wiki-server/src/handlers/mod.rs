//! HTTP request handlers.
//!
//! A single fallback handler resolves every request path to a
//! [`Route`] and dispatches on it. The HTTP method is not inspected.

mod form;
pub(crate) mod pages;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use wiki_page::{Operation, Route};

use crate::error::ServerError;
use crate::state::AppState;

/// Route a request by its raw path.
pub(crate) async fn dispatch(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ServerError> {
    let route = Route::parse(request.uri().path());

    match route {
        Route::Root => Ok(found(Operation::View.path(&state.root_title))),
        Route::Page { op, title } => match op {
            Operation::View => pages::view(&state, &title),
            Operation::Edit => pages::edit(&state, title),
            Operation::Save => pages::save(&state, title, request).await,
        },
        Route::NotFound => {
            tracing::debug!(path = %request.uri().path(), "No route");
            Err(ServerError::NotFound)
        }
    }
}

/// 302 response pointing at `location`.
pub(crate) fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
