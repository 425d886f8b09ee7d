//! Webhook gate server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use fraggate_core::GateConfig;
use tokio::net::TcpListener;

use crate::backend::{BackendClient, HttpBackend};
use crate::command::{CommandChannel, DisabledConsole, HttpConsole};
use crate::error::Result;
use crate::metrics;
use crate::routes::{create_router, with_metrics};
use crate::state::{create_shared_state, SharedState};

/// Log-webhook gate server
pub struct GateServer {
    state: SharedState,
    addr: SocketAddr,
    serve_metrics: bool,
}

impl GateServer {
    /// Run the server
    pub async fn run(self) -> Result<()> {
        let mut router = create_router(self.state);
        if self.serve_metrics {
            let handle = metrics::init_prometheus_recorder();
            router = with_metrics(router, handle);
        }

        tracing::info!("Starting log gate server on {}", self.addr);

        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Get the server state for testing
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }
}

/// Builder for GateServer
pub struct ServerBuilder {
    config: GateConfig,
    addr: SocketAddr,
    backend: Option<Arc<dyn BackendClient>>,
    console: Option<Arc<dyn CommandChannel>>,
    serve_metrics: bool,
}

impl ServerBuilder {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            addr: ([127, 0, 0, 1], 3000).into(),
            backend: None,
            console: None,
            serve_metrics: true,
        }
    }

    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.addr = ([0, 0, 0, 0], port).into();
        self
    }

    /// Override the backend client (useful for testing)
    pub fn backend(mut self, backend: Arc<dyn BackendClient>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Override the command channel (useful for testing)
    pub fn console(mut self, console: Arc<dyn CommandChannel>) -> Self {
        self.console = Some(console);
        self
    }

    /// Skip the Prometheus recorder (it can only be installed once per
    /// process, which matters for tests)
    pub fn without_metrics(mut self) -> Self {
        self.serve_metrics = false;
        self
    }

    pub fn build(self) -> Result<GateServer> {
        let backend: Arc<dyn BackendClient> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(HttpBackend::new(&self.config)?),
        };
        let console: Arc<dyn CommandChannel> = match self.console {
            Some(console) => console,
            None => match HttpConsole::from_config(&self.config)? {
                Some(console) => Arc::new(console),
                None => Arc::new(DisabledConsole),
            },
        };

        let state = create_shared_state(self.config, backend, console);
        Ok(GateServer {
            state,
            addr: self.addr,
            serve_metrics: self.serve_metrics,
        })
    }
}
