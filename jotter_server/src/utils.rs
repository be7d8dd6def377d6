use axum::{http::StatusCode, response::Json};
use diesel_async::{AsyncPgConnection, pooled_connection::AsyncDieselConnectionManager};
use jotter::ErrorResponse;

pub type Pool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;
pub type Conn<'a> = bb8::PooledConnection<'a, AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Error half of every handler's result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn default_database_url() -> String {
    "postgres://localhost:5432/notesdb".to_string()
}

pub fn default_port() -> u16 {
    5000
}

pub fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

pub fn default_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

/// Map a missing resource into a `404 Not Found` response.
pub fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

/// Map any error into a `500 Internal Server Error` response.
pub fn internal_error<E>(err: E) -> ApiError
where
    E: std::error::Error,
{
    tracing::error!("{err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
}
