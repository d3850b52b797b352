use core::convert::Infallible;

use headers::{ContentType, HeaderMapExt as _};
use http::{Response, StatusCode};
use skillshare_hub_catalog::session::FeedbackError;
use skillshare_hub_catalog::CatalogError;
use skillshare_hub_config::ConfigError;
use skillshare_hub_database::error::DatabaseError;
use tracing::{debug, error};

use crate::either::Body;
use crate::registration::RegistrationError;

const SERVER_ERROR: &str = "Server error";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Registration(#[from] RegistrationError),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Not found")]
    NotFound,
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("Invalid request body: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] serde_urlencoded::de::Error),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Feedback(#[from] FeedbackError),
    #[error("failed to read request body: {0}")]
    Body(Box<dyn std::error::Error + Send + Sync>),
    #[error("database error: {0}")]
    Database(DatabaseError),
    #[error("failed to hash password: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("json error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid header value: {0}")]
    HeaderValue(#[from] http::header::InvalidHeaderValue),
    #[error("webserver error: {0}")]
    Hyper(#[from] hyper::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<Infallible> for AppError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

impl From<DatabaseError> for AppError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::DuplicateEmail(_) => Self::DuplicateEmail,
            other => Self::Database(other),
        }
    }
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Registration(_)
            | Self::DuplicateEmail
            | Self::PayloadTooLarge(_)
            | Self::InvalidJson(_)
            | Self::InvalidQuery(_)
            | Self::Catalog(_)
            | Self::Feedback(_)
            | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Join(_)
            | Self::Serialize(_)
            | Self::HeaderValue(_)
            | Self::Hyper(_)
            | Self::Io(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message put into the `error` field. Server errors never carry details.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            SERVER_ERROR.to_owned()
        } else {
            self.to_string()
        }
    }

    pub fn into_response(self) -> Response<Body> {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }
        let body = serde_json::json!({ "error": self.public_message() }).to_string();
        let mut response = Response::new(Body::json(body));
        *response.status_mut() = status;
        response.headers_mut().typed_insert(ContentType::json());
        response
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt as _;

    use super::*;

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_a_client_error() {
        let error = AppError::from(DatabaseError::DuplicateEmail("a@b.co".to_owned()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Email already exists" })
        );
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let error = AppError::from(DatabaseError::InvalidRole("root".to_owned()));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = error.into_response();
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Server error" })
        );
    }

    #[test]
    fn validation_messages_pass_through() {
        let error = AppError::from(RegistrationError::PasswordMismatch);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "Passwords do not match.");
    }
}
