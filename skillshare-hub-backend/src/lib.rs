//! HTTP API of the marketplace: sign-up, skill search, mentor calendars,
//! the inbox and session pages.

pub mod client;
pub mod either;
pub mod error;
pub mod registration;
pub mod routes;

use core::convert::Infallible;
use core::future::Future;
use std::sync::Arc;

use error::AppError;
use futures_util::pin_mut;
use http::{HeaderValue, Request};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use skillshare_hub_catalog::fixtures::demo_catalog;
use skillshare_hub_catalog::CatalogRepository;
use skillshare_hub_config::Config;
use skillshare_hub_database::{AnyUserStore, UserStore};
use tokio::net::TcpListener;
use tokio::select;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Everything a request handler can reach.
pub struct App<S> {
    pub users: S,
    pub catalog: Box<dyn CatalogRepository>,
    pub allowed_origin: HeaderValue,
    pub max_body_bytes: usize,
}

impl<S: UserStore> App<S> {
    pub fn new(
        config: &Config,
        users: S,
        catalog: Box<dyn CatalogRepository>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            users,
            catalog,
            allowed_origin: HeaderValue::from_str(&config.allowed_origin)?,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

/// Accepts connections until `shutdown` resolves, then waits for open
/// connections to finish their current requests.
#[allow(clippy::redundant_pub_crate)]
pub async fn serve<S>(
    listener: TcpListener,
    app: Arc<App<S>>,
    shutdown: impl Future<Output = ()>,
) -> Result<(), AppError>
where
    S: UserStore + 'static,
{
    // tell the connections to shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let shutdown_tx = Arc::new(shutdown_tx);

    // wait for the connections to finish shutdown
    let (closed_tx, closed_rx) = watch::channel(());

    pin_mut!(shutdown);

    loop {
        select! {
            accept = listener.accept() => {
                let (socket, remote_addr) = match accept {
                    Ok(accepted) => accepted,
                    Err(error) => {
                        warn!(%error, "failed to accept connection");
                        continue;
                    }
                };

                let app = Arc::clone(&app);
                let shutdown_tx = Arc::clone(&shutdown_tx);
                let closed_rx = closed_rx.clone();

                tokio::spawn(async move {
                    let socket = TokioIo::new(socket);
                    let service = hyper::service::service_fn(move |request: Request<Incoming>| {
                        let app = Arc::clone(&app);
                        async move { Ok::<_, Infallible>(routes::route(&app, request).await) }
                    });

                    let builder = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new());
                    let connection = builder.serve_connection(socket, service);
                    pin_mut!(connection);

                    let connection_result = select! {
                        connection_result = connection.as_mut() => connection_result,
                        () = shutdown_tx.closed() => {
                            connection.as_mut().graceful_shutdown();
                            connection.await
                        }
                    };
                    if let Err(error) = connection_result {
                        error!(%remote_addr, "failed to serve connection: {error:#}");
                    }

                    drop(closed_rx);
                });
            }
            () = &mut shutdown => {
                info!("shutting down");
                drop(shutdown_rx); // initiate shutdown
                drop(closed_rx);
                closed_tx.closed().await;
                break;
            }
        }
    }

    Ok(())
}

pub async fn run_server(config: Config) -> Result<(), AppError> {
    info!("starting up server...");

    let users = AnyUserStore::connect(config.database_url.as_deref()).await?;
    let app = Arc::new(App::new(&config, users, Box::new(demo_catalog()?))?);

    let listener = TcpListener::bind(config.socket_address()).await?;
    info!(address = %listener.local_addr()?, "listening");

    serve(listener, app, shutdown_signal()).await
}

/// Resolves on Ctrl+C or SIGTERM.
#[allow(clippy::redundant_pub_crate)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(%error, "failed to listen for Ctrl+C");
            core::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!(%error, "failed to install SIGTERM handler");
                core::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = core::future::pending::<()>();

    select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use bytes::Bytes;
    use http_body_util::{BodyExt as _, Empty};
    use skillshare_hub_database::MemoryUserStore;
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use super::*;

    async fn get(address: SocketAddr, path: &str) -> (http::StatusCode, Bytes) {
        let stream = TcpStream::connect(address).await.unwrap();
        let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(connection);
        let request = Request::builder()
            .uri(path)
            .header(http::header::HOST, address.to_string())
            .body(Empty::<Bytes>::new())
            .unwrap();
        let response = sender.send_request(request).await.unwrap();
        let status = response.status();
        (status, response.into_body().collect().await.unwrap().to_bytes())
    }

    #[tokio::test]
    async fn serves_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = Arc::new(
            App::new(
                &Config::default(),
                MemoryUserStore::new(),
                Box::new(demo_catalog().unwrap()),
            )
            .unwrap(),
        );
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, app, async {
            let _ = stop_rx.await;
        }));

        let (status, body) = get(address, "/sessions/session-123").await;
        assert_eq!(status, http::StatusCode::OK);
        assert!(!body.is_empty());

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert!(TcpStream::connect(address).await.is_err());
    }

    #[test]
    fn invalid_origin_is_a_config_error() {
        let config = Config {
            allowed_origin: "bad\norigin".to_owned(),
            ..Config::default()
        };
        let result = App::new(
            &config,
            MemoryUserStore::new(),
            Box::new(demo_catalog().unwrap()),
        );
        assert!(matches!(result, Err(AppError::HeaderValue(_))));
    }
}
