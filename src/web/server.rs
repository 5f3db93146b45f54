//! Web server for the blog.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::auth::SessionManager;
use crate::config::Config;
use crate::{BlogError, Database, Result};

use super::handlers::AppState;
use super::middleware::SharedSessions;
use super::router::create_router;

/// Web server for the blog.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
    /// How often expired sessions are purged.
    cleanup_interval: Duration,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| BlogError::Config(format!("invalid server address: {e}")))?;

        let sessions = SessionManager::with_timeouts(
            config.session.duration_secs,
            config.session.idle_timeout_secs,
        );
        let app_state =
            AppState::new(db, sessions).with_main_page_size(config.board.main_page_size);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
            cleanup_interval: Duration::from_secs(config.session.cleanup_interval_secs),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    fn start_session_cleanup_task(sessions: SharedSessions, every: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let removed = sessions.lock().await.cleanup_expired();
                if removed > 0 {
                    tracing::info!(removed_count = removed, "Cleaned up expired sessions");
                } else {
                    tracing::debug!("No expired sessions to clean up");
                }
            }
        });
    }

    async fn bind(self) -> std::io::Result<(TcpListener, axum::Router)> {
        let sessions = self.app_state.sessions.clone();

        let router =
            create_router(self.app_state, &self.cors_origins).layer(CompressionLayer::new());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(sessions, self.cleanup_interval);
        tracing::info!(
            interval_secs = self.cleanup_interval.as_secs(),
            "Session cleanup task started"
        );

        tracing::info!("Web server listening on http://{}", local_addr);
        Ok((listener, router))
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let (listener, router) = self.bind().await?;
        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (listener, router) = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
