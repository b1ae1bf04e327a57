mod error;
mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{delete, get, post, MethodRouter},
    Router,
};

pub use error::ApiError;
pub use middleware::{Pipeline, Stage, REQUEST_ID_HEADER};

use crate::store::CharacterStore;

/// Maximum accepted size of an uploaded character sheet.
pub const MAX_SHEET_SIZE: usize = 10 << 20;

/// Shared handler state. The store is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CharacterStore>,
}

/// Build the application router around `store`, with every route wrapped in
/// the standard request [`Pipeline`].
pub fn create_router(store: impl CharacterStore) -> Router {
    let state = AppState {
        store: Arc::new(store),
    };

    let routes: Vec<(Method, &str, MethodRouter<AppState>)> = vec![
        (Method::GET, "/health", get(handlers::health)),
        (Method::GET, "/favicon.ico", get(handlers::favicon)),
        (Method::GET, "/characters", get(handlers::list_characters)),
        (Method::POST, "/characters", post(handlers::create_character)),
        (
            Method::POST,
            "/characters/import",
            post(handlers::import_character).layer(DefaultBodyLimit::max(MAX_SHEET_SIZE)),
        ),
        (Method::GET, "/characters/{id}", get(handlers::get_character)),
        (
            Method::DELETE,
            "/characters/{id}",
            delete(handlers::delete_character),
        ),
    ];

    let router = routes
        .into_iter()
        .fold(Router::new(), |router, (method, path, handler)| {
            tracing::info!(endpoint = %format!("{} {}", method, path), "Route registered");
            router.route(path, handler)
        });

    Pipeline::standard().apply(router).with_state(state)
}
