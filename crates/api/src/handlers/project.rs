//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_core::validation::{
    blank_to_none, required_text, validate_image_urls, validate_tags,
};
use folio_db::models::project::{CreateProject, Project};
use folio_db::repositories::ProjectRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub category: String,
    pub description: String,
    #[validate(length(max = 500))]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url)]
    pub github: Option<String>,
    #[validate(url)]
    pub live: Option<String>,
}

/// POST /api/v1/projects (staff only)
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    validate_image_urls(&input.images)?;
    validate_tags(&input.tags)?;

    let create_dto = CreateProject {
        title: required_text("title", &input.title)?,
        category: required_text("category", &input.category)?,
        description: required_text("description", &input.description)?,
        image: blank_to_none(input.image),
        images: input.images,
        tags: input.tags.into_iter().map(|t| t.trim().to_string()).collect(),
        github: blank_to_none(input.github),
        live: blank_to_none(input.live),
    };
    let project = ProjectRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(project_id = project.id, created_by = staff.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}
