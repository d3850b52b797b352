pub mod conversations;
pub mod dashboard;
pub mod mentors;
pub mod register;
pub mod sessions;
pub mod skills;

use std::error::Error;

use bytes::Bytes;
use headers::{ContentType, HeaderMapExt as _};
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt as _, LengthLimitError, Limited};
use serde::Serialize;
use skillshare_hub_database::UserStore;
use tracing::debug;

use crate::either::Body;
use crate::error::AppError;
use crate::App;

pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, AppError> {
    let bytes = serde_json::to_vec(value).map_err(AppError::Serialize)?;
    let mut response = Response::new(Body::json(bytes));
    *response.status_mut() = status;
    response.headers_mut().typed_insert(ContentType::json());
    Ok(response)
}

/// Collects the body, failing once it grows past `limit` bytes.
pub async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, AppError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(error) if error.is::<LengthLimitError>() => Err(AppError::PayloadTooLarge(limit)),
        Err(error) => Err(AppError::Body(error)),
    }
}

fn preflight() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

fn allow_cross_origin(response: &mut Response<Body>, origin: &HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

/// Answers one request. Failures become JSON error responses, so this never fails.
pub async fn route<S, B>(app: &App<S>, request: Request<B>) -> Response<Body>
where
    S: UserStore,
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let mut response = match dispatch(app, &method, &path, request).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    };
    allow_cross_origin(&mut response, &app.allowed_origin);
    debug!(%method, %path, status = response.status().as_u16(), "handled request");
    response
}

async fn dispatch<S, B>(
    app: &App<S>,
    method: &Method,
    path: &str,
    request: Request<B>,
) -> Result<Response<Body>, AppError>
where
    S: UserStore,
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
    let query = request.uri().query().unwrap_or_default().to_owned();
    let catalog = app.catalog.as_ref();
    match (method, segments.as_slice()) {
        (&Method::OPTIONS, _) => Ok(preflight()),
        (&Method::POST, ["register"]) => {
            let body = read_body(request.into_body(), app.max_body_bytes).await?;
            register::register(&app.users, &body).await
        }
        (&Method::GET, ["skills"]) => skills::list(catalog, &query),
        (&Method::GET, ["mentors", id]) => mentors::profile(catalog, id),
        (&Method::GET, ["mentors", id, "slots"]) => mentors::slots(catalog, id, &query),
        (&Method::GET, ["conversations"]) => conversations::list(catalog, &query),
        (&Method::GET, ["conversations", id, "messages"]) => conversations::messages(catalog, id),
        (&Method::GET, ["dashboard"]) => dashboard::show(catalog, &query),
        (&Method::GET, ["sessions", id]) => sessions::show(catalog, id),
        (&Method::GET, ["sessions", id, "messages"]) => sessions::messages(catalog, id),
        (&Method::POST, ["sessions", id, "feedback"]) => {
            let body = read_body(request.into_body(), app.max_body_bytes).await?;
            sessions::feedback(catalog, id, &body)
        }
        _ => Err(AppError::NotFound),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use http_body_util::{BodyExt as _, Full};
    use skillshare_hub_catalog::fixtures::demo_catalog;
    use skillshare_hub_config::Config;
    use skillshare_hub_database::MemoryUserStore;

    use super::*;

    pub fn app() -> App<MemoryUserStore> {
        App::new(
            &Config::default(),
            MemoryUserStore::new(),
            Box::new(demo_catalog().unwrap()),
        )
        .unwrap()
    }

    pub async fn call(
        app: &App<MemoryUserStore>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_owned())))
            .unwrap();
        let response = route(app, request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/"),
            (Method::GET, "/register"),
            (Method::DELETE, "/skills"),
            (Method::GET, "/mentors/m1/reviews"),
        ] {
            let (status, json) = call(&app, method, uri, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json, serde_json::json!({ "error": "Not found" }));
        }
    }

    #[tokio::test]
    async fn preflight_carries_cors_headers() {
        let app = app();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/register")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = route(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let app = App::new(
            &Config {
                max_body_bytes: 16,
                ..Config::default()
            },
            MemoryUserStore::new(),
            Box::new(demo_catalog().unwrap()),
        )
        .unwrap();
        let body = format!("{{\"name\":\"{}\"}}", "x".repeat(64));
        let (status, json) = call(&app, Method::POST, "/register", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Request body exceeds 16 bytes");
    }

    #[tokio::test]
    async fn read_body_within_limit() {
        let bytes = read_body(Full::new(Bytes::from_static(b"hello")), 5)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");
    }
}
