//! Router construction.
//!
//! Builds the axum router with the page dispatcher and middleware.

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Every path goes through [`handlers::dispatch`], so no route table is
/// registered here.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;
    use wiki_page::{PageStore, Title};
    use wiki_render::{Render, TemplateRenderer};
    use wiki_storage::{FsStorage, MockStorage, Storage, StorageErrorKind};

    use super::*;

    fn router(storage: Arc<dyn Storage>, renderer: Arc<dyn Render>) -> Router {
        create_router(Arc::new(AppState {
            pages: PageStore::new(storage),
            renderer,
            root_title: Title::parse("FrontPage").unwrap(),
        }))
    }

    fn mock_router(storage: &Arc<MockStorage>) -> Router {
        router(
            Arc::clone(storage) as Arc<dyn Storage>,
            Arc::new(TemplateRenderer::embedded().unwrap()),
        )
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_root_title() {
        let app = mock_router(&Arc::new(MockStorage::new()));

        let response = send(&app, get("/")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/FrontPage");
    }

    #[tokio::test]
    async fn test_root_redirects_to_configured_title() {
        let app = create_router(Arc::new(AppState {
            pages: PageStore::new(Arc::new(MockStorage::new())),
            renderer: Arc::new(TemplateRenderer::embedded().unwrap()),
            root_title: Title::parse("Home").unwrap(),
        }));

        let response = send(&app, get("/")).await;

        assert_eq!(location(&response), "/view/Home");
    }

    #[tokio::test]
    async fn test_view_unsaved_page_redirects_to_edit() {
        let app = mock_router(&Arc::new(MockStorage::new()));

        let response = send(&app, get("/view/FrontPage")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/edit/FrontPage");
    }

    #[tokio::test]
    async fn test_view_renders_saved_page() {
        let storage = Arc::new(MockStorage::new().with_record("Sandbox.txt", "Some text"));
        let app = mock_router(&storage);

        let response = send(&app, get("/view/Sandbox")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let html = body_text(response).await;
        assert!(html.contains("<h1>Sandbox</h1>"));
        assert!(html.contains("Some text"));
    }

    #[tokio::test]
    async fn test_edit_unsaved_page_shows_empty_form() {
        let app = mock_router(&Arc::new(MockStorage::new()));

        let response = send(&app, get("/edit/NewPage")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/save/NewPage\""));
        assert!(html.contains("></textarea>"));
    }

    #[tokio::test]
    async fn test_edit_saved_page_prefills_body() {
        let storage = Arc::new(MockStorage::new().with_record("Notes.txt", "draft"));
        let app = mock_router(&storage);

        let html = body_text(send(&app, get("/edit/Notes")).await).await;

        assert!(html.contains(">draft</textarea>"));
    }

    #[tokio::test]
    async fn test_save_stores_body_and_redirects_to_view() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        let response = send(&app, post_form("/save/FrontPage", &[("body", "Hello")])).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/FrontPage");
        assert_eq!(storage.record("FrontPage.txt"), Some(b"Hello".to_vec()));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_body() {
        let storage = Arc::new(MockStorage::new().with_record("Page.txt", "old"));
        let app = mock_router(&storage);

        send(&app, post_form("/save/Page", &[("body", "new")])).await;

        assert_eq!(storage.record("Page.txt"), Some(b"new".to_vec()));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_body_field_stores_empty_page() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        let response = send(&app, post_form("/save/Blank", &[])).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(storage.record("Blank.txt"), Some(Vec::new()));

        // An empty page still exists, so view renders instead of redirecting
        let response = send(&app, get("/view/Blank")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_save_reads_query_when_request_has_no_form_body() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save/Query?body=from%20query")
            .body(Body::empty())
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(storage.record("Query.txt"), Some(b"from query".to_vec()));
    }

    #[tokio::test]
    async fn test_dispatch_ignores_method() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        let response = send(&app, get("/save/ViaGet?body=hi")).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(storage.record("ViaGet.txt"), Some(b"hi".to_vec()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/view/ViaGet")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_save_takes_first_body_value() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        let response = send(
            &app,
            post_form("/save/Dup", &[("body", "a"), ("body", "b")]),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(storage.record("Dup.txt"), Some(b"a".to_vec()));
    }

    #[tokio::test]
    async fn test_save_stores_non_utf8_body_exactly() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save/Binary")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("body=%FFok"))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(storage.record("Binary.txt"), Some(vec![0xff, b'o', b'k']));
    }

    #[tokio::test]
    async fn test_save_multipart_form() {
        let storage = Arc::new(MockStorage::new().with_record("Page.txt", "precious"));
        let app = mock_router(&storage);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save/Page")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=wikiform")
            .body(Body::from(
                "--wikiform\r\n\
                 Content-Disposition: form-data; name=\"body\"\r\n\r\n\
                 Hello\r\n\
                 --wikiform--\r\n",
            ))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/Page");
        assert_eq!(storage.record("Page.txt"), Some(b"Hello".to_vec()));
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_content_type() {
        let storage = Arc::new(MockStorage::new().with_record("Page.txt", "precious"));
        let app = mock_router(&storage);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save/Page")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"body\":\"Hello\"}"))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(storage.record("Page.txt"), Some(b"precious".to_vec()));
    }

    #[tokio::test]
    async fn test_save_rejects_malformed_multipart() {
        let storage = Arc::new(MockStorage::new().with_record("Page.txt", "precious"));
        let app = mock_router(&storage);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/save/Page")
            .header(header::CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("body=Hello"))
            .unwrap();

        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(storage.record("Page.txt"), Some(b"precious".to_vec()));
    }

    #[tokio::test]
    async fn test_invalid_paths_are_not_found() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        for path in [
            "/view/bad%20title",
            "/view/",
            "/view/a-b",
            "/view/a/b",
            "/view/%C3%A9",
            "/delete/FrontPage",
            "/favicon.ico",
            "/FrontPage",
        ] {
            let response = send(&app, get(path)).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
            assert!(response.headers().get(header::LOCATION).is_none());
            assert_eq!(body_text(response).await, "404 page not found");
        }
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_save_path_stores_nothing() {
        let storage = Arc::new(MockStorage::new());
        let app = mock_router(&storage);

        let response = send(&app, post_form("/save/..%2Fetc", &[("body", "x")])).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_storage_read_failure_is_internal_error() {
        let storage = Arc::new(
            MockStorage::new()
                .with_record("Locked.txt", "secret")
                .with_read_error(StorageErrorKind::PermissionDenied),
        );
        let app = mock_router(&storage);

        for path in ["/view/Locked", "/edit/Locked"] {
            let response = send(&app, get(path)).await;

            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "path {path}"
            );
            assert!(body_text(response).await.contains("Permission denied"));
        }
    }

    #[tokio::test]
    async fn test_storage_write_failure_is_internal_error() {
        let storage = Arc::new(
            MockStorage::new()
                .with_record("Full.txt", "kept")
                .with_write_error(StorageErrorKind::StorageFull),
        );
        let app = mock_router(&storage);

        let response = send(&app, post_form("/save/Full", &[("body", "lost")])).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert!(body_text(response).await.contains("Storage full"));
        assert_eq!(storage.record("Full.txt"), Some(b"kept".to_vec()));
    }

    #[tokio::test]
    async fn test_render_failure_is_internal_error() {
        let storage: Arc<dyn Storage> =
            Arc::new(MockStorage::new().with_record("FrontPage.txt", "Hello"));
        let renderer = TemplateRenderer::from_sources(
            "{% include \"missing.html\" %}",
            "{% include \"missing.html\" %}",
        )
        .unwrap();
        let app = router(storage, Arc::new(renderer));

        for path in ["/view/FrontPage", "/edit/FrontPage", "/edit/Unsaved"] {
            let response = send(&app, get(path)).await;

            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "path {path}"
            );
            assert!(body_text(response).await.contains("missing.html"));
        }
    }

    #[tokio::test]
    async fn test_security_headers() {
        let app = mock_router(&Arc::new(MockStorage::new()));

        let response = send(&app, get("/edit/FrontPage")).await;

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_first_visit_edit_save_view_on_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join("data");
        let app = router(
            Arc::new(FsStorage::new(data_dir.clone())),
            Arc::new(TemplateRenderer::embedded().unwrap()),
        );

        let response = send(&app, get("/")).await;
        assert_eq!(location(&response), "/view/FrontPage");

        let response = send(&app, get("/view/FrontPage")).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/edit/FrontPage");

        let response = send(&app, get("/edit/FrontPage")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, post_form("/save/FrontPage", &[("body", "Hello")])).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/view/FrontPage");
        assert_eq!(
            std::fs::read(data_dir.join("FrontPage.txt")).unwrap(),
            b"Hello"
        );

        let response = send(&app, get("/view/FrontPage")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Hello"));
    }
}
