//! 대시보드 페이지.

use axum::{response::Html, routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn index_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = Router::new().route("/", get(index));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
