use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_core::cart::{cart_error_to_status_code, CartError};
use storefront_core::storage::{repository_error_to_status_code, RepositoryError};

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on repository and cart operations inside handlers.
/// Known domain errors keep their HTTP status; everything else is a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(cart_error) = self.0.downcast_ref::<CartError>() {
            cart_error_to_status_code(cart_error)
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
