// ABOUTME: HTTP API layer for SaveVault providing REST endpoints and routing
// ABOUTME: Exposes the tag commands over axum with a shared response envelope

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod commands;
pub mod health;
pub mod response;
pub mod tags_handlers;

pub use commands::TagCommands;
pub use response::{ApiError, ApiResponse};

/// Creates the tags API router
pub fn create_tags_router() -> Router<TagCommands> {
    Router::new()
        .route("/", get(tags_handlers::list_tags))
        .route("/", post(tags_handlers::create_tag))
        .route("/{name}", get(tags_handlers::get_tag))
        .route("/{name}", put(tags_handlers::update_tag))
        .route("/{name}", delete(tags_handlers::delete_tag))
        .route("/{name}/targets", get(tags_handlers::list_tag_targets))
}

/// Creates the backup tagging router
pub fn create_backup_tags_router() -> Router<TagCommands> {
    Router::new()
        .route(
            "/{save_name}/{backup_name}/tags",
            get(tags_handlers::get_backup_tags),
        )
        .route(
            "/{save_name}/{backup_name}/tags",
            post(tags_handlers::add_tags_to_backup),
        )
        .route(
            "/{save_name}/{backup_name}/tags",
            delete(tags_handlers::remove_tags_from_backup),
        )
}

/// Creates the save tagging router. The relative path may contain slashes.
pub fn create_save_tags_router() -> Router<TagCommands> {
    Router::new()
        .route("/tags/{*relative_path}", get(tags_handlers::get_save_tags))
        .route("/tags/{*relative_path}", post(tags_handlers::add_tags_to_save))
        .route(
            "/tags/{*relative_path}",
            delete(tags_handlers::remove_tags_from_save),
        )
}

/// Full application router over a shared command surface
pub fn create_router(commands: TagCommands) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/tags", create_tags_router())
        .nest("/api/backups", create_backup_tags_router())
        .nest("/api/saves", create_save_tags_router())
        .with_state(commands)
}
