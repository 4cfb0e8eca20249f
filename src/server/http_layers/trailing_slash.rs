//! Strips the trailing slash from GET paths with a redirect, so `/music/`
//! and `/music` land on the same route.

use axum::{
    body::Body,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub async fn redirect_trailing_slash(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path();
    if request.method() == Method::GET && path.len() > 1 && path.ends_with('/') {
        let trimmed = &path[..path.len() - 1];
        return Redirect::temporary(trimmed).into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/music", get(|| async { "ok" }))
            .layer(middleware::from_fn(redirect_trailing_slash))
    }

    #[tokio::test]
    async fn get_with_trailing_slash_redirects() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/music/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/music");
    }

    #[tokio::test]
    async fn plain_path_and_root_pass_through() {
        let response = app()
            .oneshot(Request::builder().uri("/music").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        // No redirect loop on the bare root
        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }
}
