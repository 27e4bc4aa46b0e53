//! Cart API handlers.
//!
//! The visitor's cart is identified by the cart cookie. Reads without a
//! cookie see an empty cart; the first mutation creates the cart and sets
//! the cookie.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use uuid::Uuid;

use storefront_core::cart::{item_count, Cart, CartItem, CartMutation, CartSummary};
use storefront_core::storage::RepositoryError;

use crate::{context::RequestContext, handlers::AppError, state::AppState};

/// Request body for adding an item to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl From<AddItemRequest> for CartItem {
    fn from(request: AddItemRequest) -> Self {
        CartItem::new(request.product_id, request.name, request.quantity)
    }
}

/// Builds the cart cookie for a freshly created cart.
fn cart_cookie(name: &str, cart_id: Uuid) -> Cookie<'static> {
    Cookie::build((name.to_string(), cart_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Get the visitor's cart (GET /api/cart).
///
/// Visitors without a cart receive an empty cart with a nil ID.
pub async fn get_cart(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<CartSummary>, AppError> {
    let cart = state
        .load_cart(ctx.cart_id)
        .await?
        .unwrap_or_else(|| Cart::with_id(ctx.cart_id.unwrap_or_else(Uuid::nil)));

    Ok(Json(CartSummary::from(cart)))
}

/// Add an item to the visitor's cart (POST /api/cart/items).
pub async fn add_item(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Json(request): Json<AddItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (cart_id, is_new) = ctx.cart_id_or_new();

    let updated = state
        .cart_repo
        .update_cart(cart_id, CartMutation::AddItem(request.into()))
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        cart_id = %cart_id,
        new_cart = is_new,
        count = item_count(&updated),
        "Item added to cart"
    );

    let jar = if is_new {
        jar.add(cart_cookie(&state.cart_cookie_name, cart_id))
    } else {
        jar
    };

    Ok((StatusCode::CREATED, jar, Json(CartSummary::from(updated))))
}

/// Remove a product line from the visitor's cart (DELETE /api/cart/items/{product_id}).
pub async fn remove_item(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(product_id): Path<String>,
) -> Result<Json<CartSummary>, AppError> {
    let cart_id = ctx.cart_id.ok_or_else(|| RepositoryError::NotFound {
        entity_type: "Cart",
        id: "none".to_string(),
    })?;

    let updated = state
        .cart_repo
        .update_cart(cart_id, CartMutation::RemoveItem(product_id.clone()))
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        cart_id = %updated.id,
        product_id = %product_id,
        "Item removed from cart"
    );

    Ok(Json(CartSummary::from(updated)))
}

/// Discard the visitor's cart and its cookie (DELETE /api/cart).
pub async fn clear_cart(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cart_id) = ctx.cart_id {
        match state.cart_repo.delete_cart(cart_id).await {
            Ok(()) | Err(RepositoryError::NotFound { .. }) => {}
            Err(err) => return Err(err.into()),
        }
        tracing::info!(request_id = %ctx.request_id, cart_id = %cart_id, "Cart cleared");
    }

    let jar = jar.remove(Cookie::build(state.cart_cookie_name.to_string()).path("/"));

    Ok((StatusCode::NO_CONTENT, jar))
}
