//! # HTTP Interface
//!
//! JSON routes over the stores and the checkout flow.
//!
//! ## Routes
//!
//! - `POST /purchase-food-items` - purchase on behalf of the caller (auth)
//! - `GET /purchase-food-items` - every purchase
//! - `GET /purchase-food-items/:email` - the caller's purchases (auth)
//! - `DELETE /purchase-food-items/:id` - delete one of the caller's purchases (auth)
//! - `GET /top-purchased-foods` - the most purchased listings
//! - `POST /jwt`, `POST /logout` - set and clear the credential cookie

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/purchase-food-items",
            post(handlers::create_purchase).get(handlers::list_purchases),
        )
        .route(
            "/purchase-food-items/:key",
            get(handlers::purchases_by_buyer).delete(handlers::delete_purchase),
        )
        .route("/top-purchased-foods", get(handlers::top_purchased))
        .route("/jwt", post(handlers::issue_token))
        .route("/logout", post(handlers::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    let address = listener.local_addr()?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
