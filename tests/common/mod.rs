//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::Router;
use grpc_http_gateway::config::GatewayConfig;
use grpc_http_gateway::http::HttpServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A gateway serving on an ephemeral port. Dropping it stops the server.
pub struct TestGateway {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start `service` behind the gateway stack on 127.0.0.1.
pub async fn start_gateway(config: GatewayConfig, service: Router) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, service).unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    TestGateway {
        addr,
        _shutdown: tx,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
