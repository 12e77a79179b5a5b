use std::{io, net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{api, gate::TokenSignal, warning};

/// Handle to the running callback server.
///
/// The server stops when [`CallbackServer::shutdown`] is called or when the
/// handle is dropped.
#[derive(Debug)]
pub struct CallbackServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CallbackServer {
    /// Address the listener is actually bound to (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://{}/redirect", self.local_addr)
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warning!("Callback server task failed: {}", e);
            }
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn router(signal: Arc<TokenSignal>) -> Router {
    Router::new()
        .route("/redirect", get(api::redirect))
        .route("/capture", get(api::capture).layer(Extension(signal)))
}

/// Binds `addr` and serves the OAuth callback routes in a background task.
pub async fn start_callback_server(
    addr: SocketAddr,
    signal: Arc<TokenSignal>,
) -> io::Result<CallbackServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = router(signal);
    let task = tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                // A dropped sender also ends the server.
                let _ = shutdown_rx.await;
            })
            .await;

        if let Err(e) = served {
            warning!("Callback server stopped with an error: {}", e);
        }
    });

    Ok(CallbackServer {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}
