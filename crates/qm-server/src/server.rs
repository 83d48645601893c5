use std::sync::Arc;

use qm_auth::TokenCodec;
use qm_store::InventoryStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The Quartermaster HTTP server.
pub struct QmServer {
    config: ServerConfig,
    state: AppState,
}

impl QmServer {
    pub fn new(config: ServerConfig, store: Arc<dyn InventoryStore>) -> Self {
        let codec = TokenCodec::new(config.token_secret.clone());
        let state = AppState::new(store, codec);
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        if self.config.has_default_secret() {
            tracing::warn!("token_secret is the placeholder value; tokens are forgeable");
        }
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("quartermaster listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_store::InMemoryInventory;

    #[test]
    fn server_construction() {
        let server = QmServer::new(
            ServerConfig::default(),
            Arc::new(InMemoryInventory::new()),
        );
        assert_eq!(server.config().bind_addr, "127.0.0.1:8088".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = QmServer::new(
            ServerConfig::default(),
            Arc::new(InMemoryInventory::new()),
        );
        let _router = server.router();
    }
}
