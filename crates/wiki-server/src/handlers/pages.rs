//! Page handlers.
//!
//! Each handler receives an already validated [`Title`].

use axum::extract::Request;
use axum::response::{Html, IntoResponse, Response};
use wiki_page::{Operation, Page, PageError, Title};
use wiki_render::Template;

use crate::error::ServerError;
use crate::handlers::{form, found};
use crate::state::AppState;

/// Form field holding the submitted page body.
const BODY_FIELD: &str = "body";

/// Handle `/view/<title>`.
///
/// Unsaved pages redirect to their edit form.
pub(crate) fn view(state: &AppState, title: &Title) -> Result<Response, ServerError> {
    match state.pages.load(title) {
        Ok(page) => render(state, Template::View, &page),
        Err(PageError::NotFound(_)) => {
            tracing::debug!(title = %title, "Page not saved yet, redirecting to edit");
            Ok(found(Operation::Edit.path(title)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle `/edit/<title>`.
///
/// Unsaved pages get an empty form.
pub(crate) fn edit(state: &AppState, title: Title) -> Result<Response, ServerError> {
    let page = match state.pages.load(&title) {
        Ok(page) => page,
        Err(PageError::NotFound(_)) => Page::empty(title),
        Err(e) => return Err(e.into()),
    };
    render(state, Template::Edit, &page)
}

/// Handle `/save/<title>`.
///
/// A missing `body` field saves an empty page.
pub(crate) async fn save(
    state: &AppState,
    title: Title,
    request: Request,
) -> Result<Response, ServerError> {
    let body = form::field(request, BODY_FIELD).await?.unwrap_or_default();

    let page = Page::new(title, body);
    state.pages.save(&page)?;

    Ok(found(Operation::View.path(&page.title)))
}

fn render(state: &AppState, template: Template, page: &Page) -> Result<Response, ServerError> {
    let html = state
        .renderer
        .render(template, page)
        .inspect_err(|e| {
            tracing::debug!(
                title = %page.title,
                template = template.file_name(),
                error = %e,
                "Render failed"
            );
        })?;
    Ok(Html(html).into_response())
}
