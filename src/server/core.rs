use log::{error, info, warn};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::auth::{AccessGuard, AllowAll, BearerToken};
use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::responder::FileResponder;
use crate::server::router::{self, AppState};
use crate::storage::{LinkOutcome, StorageRoot, create_public_link, public_url};

pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    config: Arc<ServerConfig>,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Result<Self, StartupError> {
        let root_path = config.storage_root_path();
        if let Err(e) = std::fs::create_dir_all(&root_path) {
            warn!("Failed to create storage root directory: {}", e);
        }
        let root = StorageRoot::open(&root_path)?;
        info!("Storage root directory: {}", root.path().display());

        if let Some(link) = &config.public_link {
            match create_public_link(&root, Path::new(link))? {
                LinkOutcome::Created => info!("Public link created at {}", link),
                LinkOutcome::AlreadyLinked => info!("Public link already present at {}", link),
            }
        }

        let guard = select_guard(&config)?;
        let responder = FileResponder::new(root, config.require_auth);
        let state = Arc::new(AppState::new(responder, guard));

        let socket = config.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(StartupError::Bind(socket, e));
            }
        };

        Ok(Self {
            listener,
            state,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until Ctrl-C. Each request runs as its own task.
    pub async fn start(self) -> Result<(), StartupError> {
        let mode = if self.state.responder.is_protected() {
            "token required"
        } else {
            "public"
        };
        match self
            .config
            .public_base()
            .ok()
            .and_then(|base| public_url(&base, &self.config.route_prefix, Path::new("")))
        {
            Some(url) => info!("Serving files at {}/ ({})", url, mode),
            None => info!("Serving files under /{}/ ({})", self.config.route_prefix, mode),
        }

        let app = router::create(Arc::clone(&self.state), &self.config.route_prefix);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)?;

        info!("Server stopped");
        Ok(())
    }
}

/// Pick the access guard for the configured protection mode
fn select_guard(config: &ServerConfig) -> Result<Arc<dyn AccessGuard>, StartupError> {
    if !config.require_auth {
        return Ok(Arc::new(AllowAll));
    }

    match config.api_token.as_deref() {
        Some(token) if !token.trim().is_empty() => Ok(Arc::new(BearerToken::new(token))),
        _ => Err(StartupError::Config(config::ConfigError::Message(
            "api_token must be set when require_auth is enabled".into(),
        ))),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
