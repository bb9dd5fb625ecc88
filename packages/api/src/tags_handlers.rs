// ABOUTME: HTTP request handlers for tag operations
// ABOUTME: Thin adapters from HTTP requests to tag commands

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use savevault_tags::TagUpdateInput;
use serde::Deserialize;
use tracing::info;

use super::commands::TagCommands;
use super::response::{ApiError, ApiResponse};

/// List all tags
pub async fn list_tags(State(commands): State<TagCommands>) -> impl IntoResponse {
    match commands.get_all_tags().await {
        Ok(tags) => (StatusCode::OK, ResponseJson(ApiResponse::success(tags))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for creating a tag
#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: String,
}

/// Create a new tag
pub async fn create_tag(
    State(commands): State<TagCommands>,
    Json(request): Json<CreateTagRequest>,
) -> impl IntoResponse {
    match commands.create_tag(&request.name, &request.color).await {
        Ok(tag) => (StatusCode::CREATED, ResponseJson(ApiResponse::success(tag))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Rename and/or recolor a tag. Omitted fields are left unchanged.
pub async fn update_tag(
    State(commands): State<TagCommands>,
    Path(name): Path<String>,
    Json(input): Json<TagUpdateInput>,
) -> impl IntoResponse {
    info!("Updating tag: {}", name);

    match commands.update_tag(&name, input).await {
        Ok(tag) => (StatusCode::OK, ResponseJson(ApiResponse::success(tag))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Fetch a single tag
pub async fn get_tag(
    State(commands): State<TagCommands>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match commands.get_tag(&name).await {
        Ok(tag) => (StatusCode::OK, ResponseJson(ApiResponse::success(tag))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Delete a tag and detach it everywhere
pub async fn delete_tag(
    State(commands): State<TagCommands>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match commands.delete_tag(&name).await {
        Ok(_) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success("Tag deleted successfully")),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// List every backup and save carrying a tag
pub async fn list_tag_targets(
    State(commands): State<TagCommands>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match commands.get_targets_for_tag(&name).await {
        Ok(targets) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(targets))).into_response()
        }
        Err(e) => ApiError(e).into_response(),
    }
}

/// Request body for attaching or detaching tags
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagNamesRequest {
    pub tag_names: Vec<String>,
}

/// Tags on a backup
pub async fn get_backup_tags(
    State(commands): State<TagCommands>,
    Path((save_name, backup_name)): Path<(String, String)>,
) -> impl IntoResponse {
    match commands.get_backup_tags(&save_name, &backup_name).await {
        Ok(tags) => (StatusCode::OK, ResponseJson(ApiResponse::success(tags))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Attach tags to a backup
pub async fn add_tags_to_backup(
    State(commands): State<TagCommands>,
    Path((save_name, backup_name)): Path<(String, String)>,
    Json(request): Json<TagNamesRequest>,
) -> impl IntoResponse {
    match commands
        .add_tags_to_backup(&save_name, &backup_name, &request.tag_names)
        .await
    {
        Ok(_) => (StatusCode::OK, ResponseJson(ApiResponse::success(()))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Detach tags from a backup
pub async fn remove_tags_from_backup(
    State(commands): State<TagCommands>,
    Path((save_name, backup_name)): Path<(String, String)>,
    Json(request): Json<TagNamesRequest>,
) -> impl IntoResponse {
    match commands
        .remove_tags_from_backup(&save_name, &backup_name, &request.tag_names)
        .await
    {
        Ok(_) => (StatusCode::OK, ResponseJson(ApiResponse::success(()))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Tags on a save
pub async fn get_save_tags(
    State(commands): State<TagCommands>,
    Path(relative_path): Path<String>,
) -> impl IntoResponse {
    match commands.get_save_tags(&relative_path).await {
        Ok(tags) => (StatusCode::OK, ResponseJson(ApiResponse::success(tags))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Attach tags to a save
pub async fn add_tags_to_save(
    State(commands): State<TagCommands>,
    Path(relative_path): Path<String>,
    Json(request): Json<TagNamesRequest>,
) -> impl IntoResponse {
    match commands
        .add_tags_to_save(&relative_path, &request.tag_names)
        .await
    {
        Ok(_) => (StatusCode::OK, ResponseJson(ApiResponse::success(()))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Detach tags from a save
pub async fn remove_tags_from_save(
    State(commands): State<TagCommands>,
    Path(relative_path): Path<String>,
    Json(request): Json<TagNamesRequest>,
) -> impl IntoResponse {
    match commands
        .remove_tags_from_save(&relative_path, &request.tag_names)
        .await
    {
        Ok(_) => (StatusCode::OK, ResponseJson(ApiResponse::success(()))).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}
