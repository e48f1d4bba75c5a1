//! Axum server wiring.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::RpcError;
use crate::handlers;
use goodhaul_lifecycle::{ClaimCoordinator, DonationRegistry, HandoffVerifier, StatusQuery};
use goodhaul_otp::CodeIssuer;
use goodhaul_store::DonationStore;

/// The lifecycle components shared by every handler.
pub struct ServiceState {
    pub registry: DonationRegistry,
    pub claims: ClaimCoordinator,
    pub verifier: HandoffVerifier,
    pub status: StatusQuery,
}

impl ServiceState {
    /// Wire all components over one store and one issuer.
    pub fn new(store: Arc<dyn DonationStore>, issuer: Arc<dyn CodeIssuer>) -> Self {
        Self {
            registry: DonationRegistry::new(store.clone(), issuer),
            claims: ClaimCoordinator::new(store.clone()),
            verifier: HandoffVerifier::new(store.clone()),
            status: StatusQuery::new(store),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/donations", post(handlers::create_donation))
        .route("/donations/pending/:kind", get(handlers::list_pending))
        .route("/donations/:id", get(handlers::get_donation))
        .route("/donations/:id/status", get(handlers::check_status))
        .route("/donations/:id/claim", post(handlers::claim))
        .route("/donations/:id/verify", post(handlers::verify))
        .route("/donations/:id/reject", post(handlers::reject))
        .route("/donations/:id/reissue", post(handlers::reissue))
        .route("/requesters/:id/donations", get(handlers::list_by_requester))
        .route("/claimants/:id/donations", get(handlers::list_by_claimant))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The RPC server.
pub struct RpcServer {
    pub port: u16,
}

impl RpcServer {
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(&self, state: Arc<ServiceState>) -> Result<(), RpcError> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("API listening on http://{addr}");
        axum::serve(listener, router(state)).await?;
        Ok(())
    }
}
