use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use signed_session_axum::{SessionGuard, require_session_or_redirect};

mod handlers;
mod server;
mod store;

use crate::{
    handlers::{AppState, index, me, protected, signin, signin_page, signout},
    server::{init_tracing, spawn_http_server},
    store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_session");

    let store = Arc::new(MemoryStore::default());
    let guard = SessionGuard::from_env(store.clone());
    if guard.secret().is_empty() {
        tracing::warn!("SESSION_SECRET is not set; sign-in will fail");
    }

    let state = AppState {
        guard: guard.clone(),
        store,
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/signin", get(signin_page).post(signin))
        .route("/signout", post(signout))
        .route("/me", get(me))
        .route(
            "/protected",
            get(protected).route_layer(from_fn_with_state(guard, require_session_or_redirect)),
        )
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await??;
    Ok(())
}
