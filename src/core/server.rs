use crate::adapters::http::{build_router, AppState};
use crate::adapters::storage::SqliteStore;
use crate::core::ConfigProvider;
use crate::domain::services::EnrollmentValidator;
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ApiServer<C: ConfigProvider> {
    config: C,
    state: AppState,
}

impl<C: ConfigProvider> ApiServer<C> {
    pub fn new(config: C, store: SqliteStore) -> Self {
        let enrollment = EnrollmentValidator::new(config.max_students_per_course());
        let state = AppState::new(Arc::new(store), enrollment);
        Self { config, state }
    }

    /// Opens the database named by the configuration and wires the server.
    pub fn open(config: C) -> Result<Self> {
        tracing::info!("🗄️ Opening database: {}", config.database_path());
        let store = SqliteStore::open(config.database_path())?;
        Ok(Self::new(config, store))
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve(listener).await
    }

    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("🚀 Courses API listening on http://{}", addr);
        tracing::info!(
            "📏 Enrollment limit: {} students per course",
            self.config.max_students_per_course()
        );

        let app = build_router(self.state.clone());
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("👋 Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
