use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        cart::{add_item, clear_cart, get_cart, remove_item},
        health::{livez, readyz},
        pages::{cart_badge, cart_page, error_page, forbidden, home, not_found},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/{product_id}", delete(remove_item))
        .layer(cors);

    let request_timeout = state.request_timeout;

    // Main application router
    Router::new()
        .route("/", get(home))
        .route("/cart", get(cart_page))
        .route("/forbidden", get(forbidden))
        .route("/error/{code}", get(error_page))
        .route("/partials/cart-badge", get(cart_badge))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use async_trait::async_trait;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use storefront_core::cart::{Cart, CartMutation};
    use storefront_core::storage::{CartRepository, RepositoryError, Result as RepoResult};
    use tokio::task::JoinSet;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;

    async fn body_string(response: Response<Body>) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn add_item_request(body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/cart/items")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Returns the `name=value` part of the response's Set-Cookie header.
    fn cart_cookie(response: &Response<Body>) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_home_page_with_empty_cart() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains(r#"href="/cart""#));
        assert!(html.contains("cart-badge--invisible"));
        assert!(html.contains(r#"data-count="0""#));
    }

    #[tokio::test]
    async fn test_forbidden_page_defaults_to_403() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/forbidden", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let html = body_string(response).await;
        assert!(html.contains(r#"<h1 class="status-title">403</h1>"#));
        assert!(html.contains(r#"<h2 class="status-subtitle">Forbidden</h2>"#));
        assert!(html.contains(r#"<a class="status-home" href="/">Back Home</a>"#));
    }

    #[tokio::test]
    async fn test_error_page_404() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/error/404", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains(r#"<h1 class="status-title">404</h1>"#));
        assert!(html.contains(r#"<h2 class="status-subtitle">Not Found</h2>"#));
        assert!(html.contains(r#"<a class="status-home" href="/">Back Home</a>"#));
    }

    #[tokio::test]
    async fn test_error_page_other_code_is_not_found() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/error/500", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains(r#"<h1 class="status-title">500</h1>"#));
        assert!(html.contains("Not Found"));
        assert!(!html.contains("Forbidden"));
    }

    #[tokio::test]
    async fn test_error_page_explicit_403() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/error/403", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(body_string(response).await.contains("Forbidden"));
    }

    #[tokio::test]
    async fn test_unknown_route_renders_not_found() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(get_request("/does/not/exist", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains(r#"<h1 class="status-title">404</h1>"#));
        assert!(html.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_get_cart_without_cookie_is_empty() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/api/cart", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["count"], 0);
        assert!(json["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_sets_cookie_and_updates_badge() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":3}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = cart_cookie(&response);
        assert!(cookie.starts_with("cart_id="));

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["count"], 3);

        let response = app
            .oneshot(get_request("/partials/cart-badge", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains(r#"href="/cart""#));
        assert!(html.contains(r#"<span class="cart-badge" data-count="3">3</span>"#));
        assert!(!html.contains("cart-badge--invisible"));
    }

    #[tokio::test]
    async fn test_add_items_merges_and_counts_totals() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":2}"#,
                None,
            ))
            .await
            .unwrap();
        let cookie = cart_cookie(&response);

        for body in [
            r#"{"product_id":"sku-1","name":"Mug"}"#,
            r#"{"product_id":"sku-2","name":"Hat","quantity":4}"#,
        ] {
            let response = app
                .clone()
                .oneshot(add_item_request(body, Some(&cookie)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            assert!(response.headers().get(header::SET_COOKIE).is_none());
        }

        let response = app
            .oneshot(get_request("/api/cart", Some(&cookie)))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();

        assert_eq!(json["count"], 7);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_cart_page_lists_items() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-9","name":"Teapot","quantity":1}"#,
                None,
            ))
            .await
            .unwrap();
        let cookie = cart_cookie(&response);

        let response = app
            .oneshot(get_request("/cart", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Teapot"));
        assert!(html.contains(r#"data-product-id="sku-9""#));
    }

    #[tokio::test]
    async fn test_empty_cart_page() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/cart", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Your cart is empty."));
    }

    #[tokio::test]
    async fn test_add_item_with_zero_quantity_is_rejected() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":0}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remove_item_without_cart() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/cart/items/sku-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":2}"#,
                None,
            ))
            .await
            .unwrap();
        let cookie = cart_cookie(&response);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/cart/items/sku-1")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["count"], 0);

        // Removing it again reports the missing line
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/cart/items/sku-1")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":2}"#,
                None,
            ))
            .await
            .unwrap();
        let cookie = cart_cookie(&response);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/cart")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(get_request("/api/cart", Some(&cookie)))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_app(AppState::default());

        let response = app.clone().oneshot(get_request("/livez", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/readyz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Cart storage whose backend can never be reached.
    struct UnreachableCartRepository;

    #[async_trait]
    impl CartRepository for UnreachableCartRepository {
        async fn get_cart(&self, _id: Uuid) -> RepoResult<Option<Cart>> {
            Err(unreachable_backend())
        }

        async fn save_cart(&self, _cart: &Cart) -> RepoResult<()> {
            Err(unreachable_backend())
        }

        async fn update_cart(&self, _id: Uuid, _mutation: CartMutation) -> RepoResult<Cart> {
            Err(unreachable_backend())
        }

        async fn delete_cart(&self, _id: Uuid) -> RepoResult<()> {
            Err(unreachable_backend())
        }

        async fn ping(&self) -> RepoResult<()> {
            Err(unreachable_backend())
        }
    }

    fn unreachable_backend() -> RepositoryError {
        RepositoryError::ConnectionFailed("server selection timeout".to_string())
    }

    #[tokio::test]
    async fn test_readyz_unavailable_when_storage_is_down() {
        let state = AppState::new(Arc::new(UnreachableCartRepository), &Config::default());
        let app = create_app(state);

        let response = app.clone().oneshot(get_request("/readyz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["healthy"], false);
        assert!(json["error"].as_str().unwrap().contains("server selection timeout"));

        // Liveness does not depend on the backend
        let response = app.oneshot(get_request("/livez", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cart_api_unavailable_when_storage_is_down() {
        let state = AppState::new(Arc::new(UnreachableCartRepository), &Config::default());
        let app = create_app(state);

        let response = app
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":1}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_to_same_cart_are_all_counted() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(add_item_request(
                r#"{"product_id":"sku-1","name":"Mug","quantity":1}"#,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = cart_cookie(&response);

        let mut tasks = JoinSet::new();
        for _ in 0..10 {
            let app = app.clone();
            let cookie = cookie.clone();
            tasks.spawn(async move {
                app.oneshot(add_item_request(
                    r#"{"product_id":"sku-1","name":"Mug","quantity":1}"#,
                    Some(&cookie),
                ))
                .await
                .unwrap()
                .status()
            });
        }
        while let Some(status) = tasks.join_next().await {
            assert_eq!(status.unwrap(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(get_request("/api/cart", Some(&cookie)))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["count"], 11);
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
        assert_eq!(json["items"][0]["quantity"], 11);
    }

    #[tokio::test]
    async fn test_error_page_code_out_of_range_is_not_found() {
        let app = create_app(AppState::default());

        let response = app.oneshot(get_request("/error/70000", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains(r#"<h1 class="status-title">404</h1>"#));
        assert!(body.contains("Not Found"));
    }
}
