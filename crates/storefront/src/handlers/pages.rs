//! Server-rendered pages.
//!
//! Every page carries the cart indicator, built from the visitor's cart.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use storefront_core::cart::{Cart, CartBadge};
use storefront_core::status::AccessDenied;

use crate::{context::RequestContext, handlers::AppError, state::AppState};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    badge: CartBadge,
}

/// Cart page template listing the cart lines.
#[derive(Template)]
#[template(path = "cart.html")]
struct CartTemplate {
    badge: CartBadge,
    cart: Cart,
}

/// Access-denied status page template.
#[derive(Template)]
#[template(path = "access_denied.html")]
struct AccessDeniedTemplate {
    badge: CartBadge,
    view: AccessDenied,
}

/// The cart indicator on its own.
#[derive(Template)]
#[template(path = "partials/cart_badge.html")]
struct CartBadgeTemplate {
    badge: CartBadge,
}

/// Handler for the home page (GET /).
pub async fn home(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let badge = state.cart_badge(ctx.cart_id).await?;
    Ok(HtmlTemplate(HomeTemplate { badge }))
}

/// Handler for the cart page (GET /cart).
pub async fn cart_page(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let cart = state
        .load_cart(ctx.cart_id)
        .await?
        .unwrap_or_else(|| Cart::with_id(Uuid::nil()));
    let badge = CartBadge::for_cart(Some(&cart));

    Ok(HtmlTemplate(CartTemplate { badge, cart }))
}

/// Handler for the cart indicator fragment (GET /partials/cart-badge).
pub async fn cart_badge(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let badge = state.cart_badge(ctx.cart_id).await?;
    Ok(HtmlTemplate(CartBadgeTemplate { badge }))
}

/// Handler for the access-denied page with the default code (GET /forbidden).
pub async fn forbidden(State(state): State<AppState>, ctx: RequestContext) -> Response {
    access_denied(&state, ctx.cart_id, AccessDenied::default()).await
}

/// Handler for the access-denied page with an explicit code (GET /error/{code}).
///
/// A code that is not a number, or does not fit in a `u16` (such as 70000),
/// is shown as 404.
pub async fn error_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(code): Path<String>,
) -> Response {
    let code = code.parse::<u16>().unwrap_or(404);
    access_denied(&state, ctx.cart_id, AccessDenied::new(Some(code))).await
}

/// Fallback for unknown routes.
pub async fn not_found(State(state): State<AppState>, ctx: RequestContext) -> Response {
    access_denied(&state, ctx.cart_id, AccessDenied::new(Some(404))).await
}

/// Renders the access-denied view. The page still renders when the cart
/// cannot be loaded; the indicator then shows the empty state.
async fn access_denied(state: &AppState, cart_id: Option<Uuid>, view: AccessDenied) -> Response {
    let badge = state.cart_badge(cart_id).await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to load cart for status page");
        CartBadge::default()
    });

    let status =
        StatusCode::from_u16(view.response_status()).unwrap_or(StatusCode::NOT_FOUND);

    (status, HtmlTemplate(AccessDeniedTemplate { badge, view })).into_response()
}
