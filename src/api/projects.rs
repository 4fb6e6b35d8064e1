//! Project and test profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::project::{
        CreateProject, CreateTestProfile, Project, TestProfile, UpdateProject,
        UpdateTestProfile,
    },
};

use super::validate_body;

// ---- Projects ----

/// List projects
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    responses((status = 200, description = "Project list", body = Vec<Project>))
)]
pub async fn list_projects(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.services.projects.list().await?))
}

/// Get one project
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.services.projects.get(id).await?))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_project(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_body(&request)?;
    let project = state.services.projects.create(request).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_body(&request)?;
    Ok(Json(state.services.projects.update(id, request).await?))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Test profiles ----

/// List test profiles
#[utoipa::path(
    get,
    path = "/test-profiles",
    tag = "projects",
    responses((status = 200, description = "Test profile list", body = Vec<TestProfile>))
)]
pub async fn list_test_profiles(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<TestProfile>>> {
    Ok(Json(state.services.projects.list_profiles().await?))
}

/// Get one test profile
#[utoipa::path(
    get,
    path = "/test-profiles/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Test profile ID")),
    responses(
        (status = 200, description = "Test profile", body = TestProfile),
        (status = 404, description = "Test profile not found")
    )
)]
pub async fn get_test_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TestProfile>> {
    Ok(Json(state.services.projects.get_profile(id).await?))
}

/// Create a test profile
#[utoipa::path(
    post,
    path = "/test-profiles",
    tag = "projects",
    request_body = CreateTestProfile,
    responses(
        (status = 201, description = "Test profile created", body = TestProfile),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_test_profile(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateTestProfile>,
) -> AppResult<(StatusCode, Json<TestProfile>)> {
    validate_body(&request)?;
    let profile = state.services.projects.create_profile(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update a test profile
#[utoipa::path(
    put,
    path = "/test-profiles/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Test profile ID")),
    request_body = UpdateTestProfile,
    responses(
        (status = 200, description = "Test profile updated", body = TestProfile),
        (status = 404, description = "Test profile not found")
    )
)]
pub async fn update_test_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTestProfile>,
) -> AppResult<Json<TestProfile>> {
    validate_body(&request)?;
    Ok(Json(state.services.projects.update_profile(id, request).await?))
}

/// Delete a test profile
#[utoipa::path(
    delete,
    path = "/test-profiles/{id}",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Test profile ID")),
    responses(
        (status = 204, description = "Test profile deleted"),
        (status = 404, description = "Test profile not found")
    )
)]
pub async fn delete_test_profile(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.projects.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
