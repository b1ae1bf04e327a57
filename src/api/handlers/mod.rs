use axum::{
    extract::{multipart::MultipartRejection, rejection::FormRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use uuid::Uuid;

use super::error::ApiError;
use super::AppState;
use crate::models::*;
use crate::sheet;

/// Form field carrying an uploaded character sheet.
const SHEET_FIELD: &str = "jsonFile";

type ApiResult<T> = Result<T, ApiError>;

/// Path identifiers must be well-formed UUIDs before they reach the store.
fn parse_character_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        tracing::warn!(id = %raw, error = %e, "Failed to parse character ID");
        ApiError::validation("Wrong character ID format")
    })
}

fn save_character(
    state: &AppState,
    character: Character,
) -> ApiResult<(StatusCode, Json<OperationResult>)> {
    let id = character.id;
    state.store.create(character).map_err(|e| {
        tracing::error!(error = %e, "Failed to save character to storage");
        ApiError::unexpected(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(OperationResult::success(format!("Character {} created!", id))),
    ))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Browsers ask for this on every page load; answer without a 404.
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

// ============================================================
// Characters
// ============================================================

pub async fn list_characters(State(state): State<AppState>) -> ApiResult<Json<Vec<Character>>> {
    let characters = state.store.list().map_err(|e| {
        tracing::error!(error = %e, "Failed to get characters list");
        ApiError::unexpected(e)
    })?;
    Ok(Json(characters))
}

pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Character>> {
    let id = parse_character_id(&id)?;
    Ok(Json(state.store.get(id)?))
}

pub async fn create_character(
    State(state): State<AppState>,
    form: Result<Form<CreateCharacterInput>, FormRejection>,
) -> ApiResult<(StatusCode, Json<OperationResult>)> {
    let Form(input) = form.map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse form");
        ApiError::validation("Failed to parse form")
    })?;

    let character = input.into_character();
    tracing::info!(
        id = %character.id,
        name = %character.name,
        occupation = %character.occupation,
        age = %character.age,
        "Create character"
    );

    save_character(&state, character)
}

pub async fn import_character(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<OperationResult>)> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse form");
        ApiError::validation("Failed to parse form")
    })?;

    let mut data = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse form");
        ApiError::validation("Failed to parse form")
    })? {
        if field.name() != Some(SHEET_FIELD) {
            continue;
        }

        let bytes = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file from form");
            ApiError::validation("Failed to read file from form")
        })?;
        data = Some(bytes);
        break;
    }

    let data = data.ok_or_else(|| {
        tracing::error!(field = SHEET_FIELD, "Failed to get file from form");
        ApiError::validation("Failed to get file from form")
    })?;

    let input = sheet::parse_investigator(&data).map_err(|e| {
        tracing::error!(error = %e, "Failed to unmarshal investigator from file");
        ApiError::validation("Failed to unmarshal investigator from file")
    })?;

    save_character(&state, input.into_character())
}

pub async fn delete_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<OperationResult>)> {
    let id = parse_character_id(&id)?;
    state.store.delete(id)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(OperationResult::success(format!("Character {} deleted!", id))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_character_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_character_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_character_id_rejects_garbage() {
        let err = parse_character_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Wrong character ID format");
    }
}
