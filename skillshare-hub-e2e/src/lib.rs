//! Starts the real server on an ephemeral port for end-to-end tests.

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use bytes::Bytes;
use http_body_util::{BodyExt as _, Full};
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use skillshare_hub_backend::error::AppError;
use skillshare_hub_backend::{serve, App};
use skillshare_hub_catalog::fixtures::demo_catalog;
use skillshare_hub_config::Config;
use skillshare_hub_database::MemoryUserStore;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

static TRACING: Once = Once::new();

// RUST_LOG=debug cargo test -p skillshare-hub-e2e
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestServer {
    pub address: SocketAddr,
    pub app: Arc<App<MemoryUserStore>>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<std::result::Result<(), AppError>>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        init_tracing();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let app = Arc::new(App::new(
            &Config::default(),
            MemoryUserStore::new(),
            Box::new(demo_catalog()?),
        )?);
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(serve(listener, Arc::clone(&app), async {
            let _ = stopped.await;
        }));
        info!(%address, "test server started");
        Ok(Self {
            address,
            app,
            stop,
            task,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: &str,
    ) -> Result<(StatusCode, serde_json::Value)> {
        request(self.address, method, path, body).await
    }

    pub async fn stop(self) -> Result<()> {
        let _ = self.stop.send(());
        self.task.await??;
        Ok(())
    }
}

/// Sends one request on a fresh HTTP/1.1 connection and decodes the JSON reply.
pub async fn request(
    address: SocketAddr,
    method: Method,
    path: &str,
    body: &str,
) -> Result<(StatusCode, serde_json::Value)> {
    let stream = TcpStream::connect(address).await?;
    let (mut sender, connection) =
        hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
    tokio::spawn(connection);

    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(HOST, address.to_string())
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_owned())))?;
    let response = sender.send_request(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}
