//! Submits the sign-up form to the backend and turns the result into the
//! notice shown to the user.

use core::future::Future;
use core::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::{BodyExt as _, Full};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use skillshare_hub_database::models::Role;
use thiserror::Error;
use tokio::net::TcpStream;
use tracing::{debug, warn};

pub use crate::registration::RegisterPayload as RegistrationForm;
use crate::registration::RegistrationError;

const REGISTER_PATH: &str = "/register";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    Uri(#[from] http::uri::InvalidUri),
    #[error("url has no host")]
    MissingHost,
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Hyper(#[from] hyper::Error),
    #[error("invalid request: {0}")]
    Http(#[from] http::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends one JSON request and returns the raw reply.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<TransportResponse, ClientError>> + Send;
}

/// HTTP/1.1 over a fresh TCP connection per request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Uri,
}

impl HttpTransport {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let base: Uri = base.parse()?;
        if base.host().is_none() {
            return Err(ClientError::MissingHost);
        }
        Ok(Self { base })
    }
}

// https://github.com/hyperium/hyper/blob/master/examples/client.rs

impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<TransportResponse, ClientError> {
        let host = self.base.host().ok_or(ClientError::MissingHost)?;
        let port = self.base.port_u16().unwrap_or(80);
        let stream = TcpStream::connect((host, port)).await?;

        let (mut sender, connection) =
            hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
        tokio::spawn(async move {
            if let Err(error) = connection.await {
                debug!(%error, "client connection closed");
            }
        });

        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(HOST, format!("{host}:{port}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))?;
        let response = sender.send_request(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        Ok(TransportResponse { status, body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Deserialize)]
struct Registered {
    user: RegisteredUser,
}

#[derive(Deserialize)]
struct Rejected {
    error: Option<String>,
}

#[derive(Debug)]
pub enum Outcome {
    Registered(RegisteredUser),
    /// The form failed a local check and nothing was sent.
    Invalid(RegistrationError),
    /// The server answered with an error message.
    Rejected(String),
    Unreachable(ClientError),
    /// Another submission of this client is still running.
    AlreadySubmitting,
}

/// A toast shown after submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_owned(),
            description: description.into(),
            destructive: true,
        }
    }
}

impl Outcome {
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Registered(_) => Some(Notice {
                title: "Account created!".to_owned(),
                description: "Welcome to SkillShare Hub. You can now start learning.".to_owned(),
                destructive: false,
            }),
            Self::Invalid(error) => Some(Notice::error(error.to_string())),
            Self::Rejected(message) => Some(Notice::error(message.clone())),
            Self::Unreachable(_) => Some(Notice::error("Server error. Please try again later.")),
            Self::AlreadySubmitting => None,
        }
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RegistrationClient<T> {
    transport: T,
    in_flight: AtomicBool,
}

impl<T: Transport> RegistrationClient<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is waiting for the server.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, form: &RegistrationForm) -> Outcome {
        if let Err(error) = form.check_confirmation() {
            return Outcome::Invalid(error);
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Outcome::AlreadySubmitting;
        }
        let _in_flight = InFlight(&self.in_flight);

        match self.send(form).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "registration request failed");
                Outcome::Unreachable(error)
            }
        }
    }

    async fn send(&self, form: &RegistrationForm) -> Result<Outcome, ClientError> {
        let body = serde_json::to_vec(form)?;
        let response = self.transport.post_json(REGISTER_PATH, body).await?;
        if response.status.is_success() {
            let Registered { user } = serde_json::from_slice(&response.body)?;
            Ok(Outcome::Registered(user))
        } else {
            let Rejected { error } = serde_json::from_slice(&response.body)?;
            Ok(Outcome::Rejected(
                error.unwrap_or_else(|| "Something went wrong".to_owned()),
            ))
        }
    }
}
